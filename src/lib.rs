//! # svcstream - Scalable-video NALU trace streamer
//!
//! Replays a pre-recorded, time-ordered NALU trace over UDP at a
//! controlled frame rate, for evaluating scalable-video (SVC)
//! streaming over lossy networks.
//!
//! The library is a traffic generator: it does not encode or decode
//! video. It paces and transmits previously analyzed trace records,
//! optionally carrying the real payload bytes of the source
//! bitstream, and hands the trace back annotated with the actual
//! send timestamps.
//!
//! Each unit is framed with a fixed 12-byte header and routed to one
//! of three UDP ports selected by its temporal layer id. Short
//! slice-data units (8 to 25 payload bytes) mark a layer switch and
//! are transmitted joined with the following unit in a single
//! datagram; pacing to the target frame interval happens at these
//! joined events.
//!
//! # UDP/IP trace streamer
//!
//! Replay a trace towards 127.0.0.1, temporal layers on ports
//! 5000-5002
//!
//!```rust
//! use svcstream::core::UDPEndpoint;
//! use svcstream::streamer::{Config, Streamer};
//! use svcstream::trace::parse_trace;
//!
//! let trace = "\
//! 0x00000000      65    0    0    0  StreamHeader           No           No
//! 0x00000041    1200    0    0    0     SliceData           No          Yes";
//!
//! // Parse the trace emitted by the bitstream analyzer
//! let records = parse_trace(trace.as_bytes()).unwrap();
//!
//! // Create the streamer, without a payload source the unit bytes are zero filled
//! let endpoint = UDPEndpoint::new("127.0.0.1".to_owned(), 5000);
//! let config = Config {
//!     fps: 25.0,
//!     wait_after_stream: std::time::Duration::ZERO,
//! };
//! let mut streamer = Streamer::new(&endpoint, records, None, &config).unwrap();
//!
//! // Replay the whole trace
//! streamer.run().unwrap();
//!
//! // Hand back the annotated records
//! for record in streamer.close() {
//!     println!("{} sent at {:?}", record.start_offset, record.timestamp);
//! }
//!```

#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

mod common;
mod tools;

pub mod streamer;
pub mod trace;
pub use crate::tools::error;

/// Core module with low-level function
pub mod core {
    pub use crate::common::udpendpoint::port_for;
    pub use crate::common::udpendpoint::UDPEndpoint;
    pub use crate::common::wire::parse_unit_header;
    pub use crate::common::wire::push_unit_header;
    pub use crate::common::wire::WireHeader;
    pub use crate::common::wire::FLAG_DISCARDABLE;
    pub use crate::common::wire::FLAG_LAST_UNIT;
    pub use crate::common::wire::FLAG_TRUNCATABLE;
    pub use crate::common::wire::FLAG_TWO_UNITS;
    pub use crate::common::wire::FLAG_TYPE_PARAMETER_SET;
    pub use crate::common::wire::FLAG_TYPE_SLICE_DATA;
    pub use crate::common::wire::FLAG_TYPE_STREAM_HEADER;
    pub use crate::common::wire::FLAG_TYPE_UNDEFINED;
    pub use crate::common::wire::HEADER_SIZE;
    pub use crate::common::wire::MAX_PAYLOAD;
}
