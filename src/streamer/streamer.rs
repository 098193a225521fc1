use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::builder::build_packet;
use super::config::Config;
use super::pacer::PacingClock;
use super::payload::PayloadStream;
use super::transmitter::UdpTransmitter;
use crate::common::udpendpoint::{port_for, UDPEndpoint};
use crate::common::wire::MAX_PAYLOAD;
use crate::tools::error::{Result, StreamError};
use crate::trace::{PacketType, TraceRecord};

/// Playback progress of the `Streamer`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Resources acquired, nothing sent yet
    Idle,
    /// Units are being built and transmitted
    Streaming,
    /// Last datagram sent, waiting for receivers to finish
    Draining,
    /// Playback over, remaining handles held until `close`
    Done,
}

///
/// Replays a parsed NALU trace over UDP
///
/// Owns the socket, the record sequence and the optional payload
/// source for the whole run. Slice-data units are transmitted in
/// trace order, short slices joined with their successor, and every
/// transmitted record receives its actual send timestamp.
///
#[derive(Debug)]
pub struct Streamer {
    records: Vec<TraceRecord>,
    payload: Option<PayloadStream>,
    transmitter: Option<UdpTransmitter>,
    dest: IpAddr,
    base_port: u16,
    clock: PacingClock,
    wait_after_stream: Duration,
    cursor: usize,
    state: State,
    shutdown: Arc<AtomicBool>,
}

impl Streamer {
    ///
    /// Creation of a `Streamer`
    ///
    /// Acquires the socket, resolves the destination host and takes
    /// ownership of the record sequence and the payload source.
    ///
    pub fn new(
        endpoint: &UDPEndpoint,
        records: Vec<TraceRecord>,
        payload: Option<PayloadStream>,
        config: &Config,
    ) -> Result<Streamer> {
        let clock = PacingClock::new(config.fps)?;
        let transmitter = UdpTransmitter::new()?;
        let dest = endpoint.resolve()?;

        Ok(Streamer {
            records,
            payload,
            transmitter: Some(transmitter),
            dest,
            base_port: endpoint.base_port,
            clock,
            wait_after_stream: config.wait_after_stream,
            cursor: 0,
            state: State::Idle,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Flag polled once per unit during playback.
    ///
    /// Setting it from a signal handler or another thread stops the
    /// run at the next unit boundary with `StreamError::Interrupted`.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Current playback state
    pub fn state(&self) -> State {
        self.state
    }

    /// Stream the whole trace, then drain.
    ///
    /// On success every transmitted record carries its send
    /// timestamp. Any error releases the socket and the payload
    /// source before returning.
    pub fn run(&mut self) -> Result<()> {
        let ret = self.stream();
        if ret.is_err() {
            self.release();
        }
        ret
    }

    /// Release the remaining handles and hand back the annotated trace
    pub fn close(self) -> Vec<TraceRecord> {
        self.records
    }

    fn stream(&mut self) -> Result<()> {
        self.state = State::Streaming;
        log::info!(
            "Streaming {} records to {} ports {}-{}, interval {:?}",
            self.records.len(),
            self.dest,
            self.base_port,
            self.base_port + 2,
            self.clock.interval()
        );

        self.clock.mark();
        while let Some(index) = self.next_slice(self.cursor) {
            if self.shutdown.load(Ordering::Relaxed) {
                log::info!("Shutdown requested, quitting");
                return Err(StreamError::Interrupted);
            }
            let sent = self.send_unit(index)?;
            self.cursor = index + sent;
        }

        self.drain()
    }

    /// Index of the next slice-data record at or after `from`
    fn next_slice(&self, from: usize) -> Option<usize> {
        self.records[from.min(self.records.len())..]
            .iter()
            .position(|r| r.packet_type == PacketType::SliceData)
            .map(|pos| from + pos)
    }

    /// Build, route and transmit the unit at `index`, joined with its
    /// successor when it is a control unit. Returns how many records
    /// were consumed.
    fn send_unit(&mut self, index: usize) -> Result<usize> {
        let last = index + 1 == self.records.len();
        let record = &self.records[index];
        let temporal_id = record.temporal_id;
        let control = record.is_control_unit();
        let mut packet = build_packet(record, last, self.payload.as_mut())?;

        let mut send_size = packet.len();
        if send_size > MAX_PAYLOAD {
            log::warn!(
                "Packet too long: {} bytes, truncating to {}",
                send_size,
                MAX_PAYLOAD
            );
            send_size = MAX_PAYLOAD;
        }

        let mut units = 1;
        let mut data;
        if control {
            let partner = index + 1;
            if partner >= self.records.len() {
                return Err(StreamError::PairingIncomplete);
            }
            packet.set_combined();

            let partner_last = partner + 1 == self.records.len();
            let next = build_packet(&self.records[partner], partner_last, self.payload.as_mut())?;

            data = packet.into_bytes();
            data.truncate(send_size);
            data.extend_from_slice(next.as_bytes());
            if data.len() > MAX_PAYLOAD {
                log::warn!(
                    "Combined packet too long: {} bytes, truncating to {}",
                    data.len(),
                    MAX_PAYLOAD
                );
                data.truncate(MAX_PAYLOAD);
            }
            units = 2;

            self.clock.pace();
        } else {
            data = packet.into_bytes();
            data.truncate(send_size);
        }

        let dest = SocketAddr::new(self.dest, port_for(self.base_port, temporal_id));
        let transmitter = self
            .transmitter
            .as_ref()
            .ok_or(StreamError::Interrupted)?;
        let timestamp = transmitter.send(&data, dest)?;

        self.records[index].timestamp = Some(timestamp);
        if units == 2 {
            self.records[index + 1].timestamp = Some(timestamp);
        }
        Ok(units)
    }

    /// Idle after the last datagram so receivers can finish, keeping
    /// the shutdown flag responsive.
    fn drain(&mut self) -> Result<()> {
        self.state = State::Draining;
        self.transmitter = None;
        log::info!(
            "Streaming done, waiting {:?} before handing the trace back",
            self.wait_after_stream
        );

        let mut remaining = self.wait_after_stream;
        while !remaining.is_zero() {
            if self.shutdown.load(Ordering::Relaxed) {
                log::info!("Shutdown requested while draining, quitting");
                return Err(StreamError::Interrupted);
            }
            let slice = remaining.min(Duration::from_secs(1));
            std::thread::sleep(slice);
            remaining -= slice;
        }

        self.state = State::Done;
        Ok(())
    }

    fn release(&mut self) {
        self.transmitter = None;
        self.payload = None;
    }
}
