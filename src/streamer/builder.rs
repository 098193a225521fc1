use super::payload::PayloadStream;
use crate::common::wire;
use crate::tools::error::Result;
use crate::trace::{PacketType, TraceRecord};

/// Encoded unit, ready to be routed and transmitted
#[derive(Debug, Clone)]
pub struct WirePacket {
    data: Vec<u8>,
}

impl WirePacket {
    /// Mark this unit as the first of two combined units
    pub fn set_combined(&mut self) {
        wire::or_flags(&mut self.data, wire::FLAG_TWO_UNITS);
    }

    /// Encoded size in bytes, header included
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the packet holds no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the packet into its encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Build the wire packet of one trace record.
///
/// `last` marks the final record of the sequence. With a payload
/// source the unit bytes are read at the record's start offset,
/// without one the payload is zero filled.
pub fn build_packet(
    record: &TraceRecord,
    last: bool,
    payload: Option<&mut PayloadStream>,
) -> Result<WirePacket> {
    let mut flags = match last {
        true => wire::FLAG_LAST_UNIT,
        false => 0,
    };

    flags |= match record.packet_type {
        PacketType::StreamHeader => wire::FLAG_TYPE_STREAM_HEADER,
        PacketType::ParameterSet => wire::FLAG_TYPE_PARAMETER_SET,
        PacketType::SliceData => wire::FLAG_TYPE_SLICE_DATA,
        PacketType::Undefined => wire::FLAG_TYPE_UNDEFINED,
    };

    if record.discardable {
        flags |= wire::FLAG_DISCARDABLE;
    }

    if record.truncatable {
        flags |= wire::FLAG_TRUNCATABLE;
    }

    let mut data = Vec::with_capacity(wire::HEADER_SIZE + record.length);
    wire::push_unit_header(
        &mut data,
        (wire::HEADER_SIZE + record.length) as u16,
        record.layer_id,
        record.temporal_id,
        record.quality_id,
        flags,
        record.start_offset,
        record.frame_number,
    );

    match payload {
        Some(stream) => {
            let payload = stream.read_unit(record.start_offset, record.length)?;
            data.extend(payload);
        }
        None => data.resize(wire::HEADER_SIZE + record.length, 0),
    }

    log::debug!(
        "Built unit id={:#x} frame={} size={}",
        record.start_offset,
        record.frame_number,
        data.len()
    );
    Ok(WirePacket { data })
}
