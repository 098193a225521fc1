use std::hash::Hash;
use std::net::{IpAddr, ToSocketAddrs};

use serde::{Deserialize, Serialize};

use crate::tools::error::{Result, StreamError};

/// UDP Endpoint
#[derive(Debug, PartialEq, Deserialize, Serialize, Clone, Eq, Hash)]
pub struct UDPEndpoint {
    /// Network destination address, host name or IP
    pub destination_address: String,
    /// Base port of the temporal-layer port range
    pub base_port: u16,
}

impl UDPEndpoint {
    /// Create a new UDP Endpoint
    pub fn new(dest: String, base_port: u16) -> Self {
        Self {
            destination_address: dest,
            base_port,
        }
    }

    /// Resolve the destination host, once for the whole run
    pub fn resolve(&self) -> Result<IpAddr> {
        let addr = (self.destination_address.as_str(), self.base_port)
            .to_socket_addrs()
            .map_err(|e| {
                StreamError::Config(format!(
                    "fail to resolve '{}': {}",
                    self.destination_address, e
                ))
            })?
            .next()
            .ok_or_else(|| {
                StreamError::Config(format!(
                    "no address found for '{}'",
                    self.destination_address
                ))
            })?;
        Ok(addr.ip())
    }
}

/// Destination port of a temporal layer.
///
/// Layer 0 maps to `base_port`, layer 1 to `base_port + 1`, every
/// higher layer collapses onto `base_port + 2`.
pub fn port_for(base_port: u16, temporal_id: u8) -> u16 {
    match temporal_id {
        0 => base_port,
        1 => base_port + 1,
        _ => base_port + 2,
    }
}

#[cfg(test)]
mod tests {

    #[test]
    pub fn test_port_for() {
        crate::tests::init();
        assert_eq!(super::port_for(5000, 0), 5000);
        assert_eq!(super::port_for(5000, 1), 5001);
        assert_eq!(super::port_for(5000, 2), 5002);
        assert_eq!(super::port_for(5000, 99), 5002);
    }

    #[test]
    pub fn test_resolve() {
        crate::tests::init();
        let endpoint = super::UDPEndpoint::new("127.0.0.1".to_owned(), 5000);
        assert_eq!(
            endpoint.resolve().unwrap(),
            std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST)
        );

        let endpoint = super::UDPEndpoint::new("host.invalid.".to_owned(), 5000);
        assert!(endpoint.resolve().is_err());
    }
}
