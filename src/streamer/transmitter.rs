use std::net::{SocketAddr, UdpSocket};
use std::time::SystemTime;

use crate::tools::error::{Result, StreamError};
use crate::tools::system_time_to_millis;

/// UDP/IP transmitter
///
/// Non-blocking socket bound to an ephemeral port. Backpressure is
/// retried immediately and indefinitely, any other send failure is
/// fatal for the run.
#[derive(Debug)]
pub struct UdpTransmitter {
    sock: UdpSocket,
}

impl UdpTransmitter {
    /// Return a new UDP/IP transmitter
    pub fn new() -> Result<UdpTransmitter> {
        let sock = UdpSocket::bind("0.0.0.0:0").map_err(StreamError::Socket)?;
        sock.set_nonblocking(true).map_err(StreamError::Socket)?;
        Ok(UdpTransmitter { sock })
    }

    /// Send a datagram to `dest`, spinning on a would-block condition.
    ///
    /// Returns the send time in milliseconds since the Unix epoch,
    /// sampled just before the attempt that succeeded.
    pub fn send(&self, data: &[u8], dest: SocketAddr) -> Result<u64> {
        loop {
            let now = system_time_to_millis(&SystemTime::now());
            match self.sock.send_to(data, dest) {
                Ok(_) => return Ok(now),
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {}
                Err(e) => return Err(StreamError::Transmit(e)),
            }
        }
    }
}
