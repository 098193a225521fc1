//!
//!  Packet pacing and transmission engine replaying a NALU trace over UDP
//!

mod builder;
mod config;
mod pacer;
mod payload;
mod streamer;
mod transmitter;

pub use builder::build_packet;
pub use builder::WirePacket;
pub use config::Config;
pub use pacer::PacingClock;
pub use payload::PayloadSourceTrait;
pub use payload::PayloadStream;
pub use streamer::State;
pub use streamer::Streamer;
pub use transmitter::UdpTransmitter;
