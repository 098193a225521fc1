pub mod udpendpoint;
pub mod wire;
