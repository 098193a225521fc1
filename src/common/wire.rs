use crate::tools::error::{Result, StreamError};

/// Size in bytes of the fixed unit header.
pub const HEADER_SIZE: usize = 12;

/// Largest datagram ever handed to the socket, in bytes.
pub const MAX_PAYLOAD: usize = 1450;

/// Byte offset of the flags field inside an encoded unit header.
pub const FLAGS_OFFSET: usize = 5;

/// Last unit of the stream.
pub const FLAG_LAST_UNIT: u8 = 0x01;
/// Unit type: stream header.
pub const FLAG_TYPE_STREAM_HEADER: u8 = 0x02;
/// Unit type: parameter set.
pub const FLAG_TYPE_PARAMETER_SET: u8 = 0x04;
/// Unit type: slice data.
pub const FLAG_TYPE_SLICE_DATA: u8 = 0x08;
/// Unit type: undefined.
pub const FLAG_TYPE_UNDEFINED: u8 = 0x10;
/// Unit may be dropped by a network adapter.
pub const FLAG_DISCARDABLE: u8 = 0x20;
/// Unit may be truncated by a network adapter.
pub const FLAG_TRUNCATABLE: u8 = 0x40;
/// Two units are combined in this datagram.
pub const FLAG_TWO_UNITS: u8 = 0x80;

/// Unit Header
#[derive(Clone, Debug, PartialEq)]
pub struct WireHeader {
    /// Header size plus payload length
    pub total_size: u16,
    /// Scalable layer id
    pub layer_id: u8,
    /// Temporal layer id
    pub temporal_id: u8,
    /// Quality layer id
    pub quality_id: u8,
    /// Type/last/discardable/truncatable/combined bits
    pub flags: u8,
    /// Source offset of the unit
    pub unit_id: u32,
    /// Display frame index
    pub frame_number: u16,
}

/**
 *  All integer fields are in network byte order.
 *
 *  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
 *  |           total_size          |    layer_id   |  temporal_id  |
 *  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
 *  |   quality_id  |     flags     |            unit_id            |
 *  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
 *  |        unit_id (cont.)        |          frame_number         |
 *  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
 *  |                       payload (variable)                      |
 *  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
 *
 * total_size: 16 bits
 *      Header size plus payload length. Kept even when the outgoing
 *      datagram is truncated, so a receiver can tell how long the
 *      unit originally was.
 * layer_id / temporal_id / quality_id: 8 bits each
 *      Scalable-layer coordinates of the unit.
 * flags: 8 bits
 *      One-hot type code plus last/discardable/truncatable/combined
 *      markers, see the FLAG_* constants.
 * unit_id: 32 bits
 *      Byte offset of the unit inside the source bitstream, unique
 *      per unit within a trace.
 * frame_number: 16 bits
 *      Display frame index the unit belongs to.
 */
/// Appends a unit header to the provided data vector.
///
/// # Arguments
///
/// * `data`: The vector where the header is appended.
/// * `total_size`: Header size plus payload length.
/// * `layer_id`: Scalable layer id.
/// * `temporal_id`: Temporal layer id.
/// * `quality_id`: Quality layer id.
/// * `flags`: Type/last/discardable/truncatable/combined bits.
/// * `unit_id`: Source offset of the unit.
/// * `frame_number`: Display frame index.
pub fn push_unit_header(
    data: &mut Vec<u8>,
    total_size: u16,
    layer_id: u8,
    temporal_id: u8,
    quality_id: u8,
    flags: u8,
    unit_id: u32,
    frame_number: u16,
) {
    data.extend(total_size.to_be_bytes());
    data.push(layer_id);
    data.push(temporal_id);
    data.push(quality_id);
    data.push(flags);
    data.extend(unit_id.to_be_bytes());
    data.extend(frame_number.to_be_bytes());
}

/// ORs `flags` into the flags field of an already encoded unit header.
///
/// # Arguments
///
/// * `data`: The buffer containing the encoded header.
/// * `flags`: The flag bits to set.
pub fn or_flags(data: &mut [u8], flags: u8) {
    data[FLAGS_OFFSET] |= flags;
}

/// Parses a unit header from the front of `data`.
pub fn parse_unit_header(data: &[u8]) -> Result<WireHeader> {
    if data.len() < HEADER_SIZE {
        return Err(StreamError::Parse(format!(
            "unit header is {} bytes whereas pkt size is {}",
            HEADER_SIZE,
            data.len()
        )));
    }

    Ok(WireHeader {
        total_size: u16::from_be_bytes([data[0], data[1]]),
        layer_id: data[2],
        temporal_id: data[3],
        quality_id: data[4],
        flags: data[5],
        unit_id: u32::from_be_bytes([data[6], data[7], data[8], data[9]]),
        frame_number: u16::from_be_bytes([data[10], data[11]]),
    })
}

#[cfg(test)]
mod tests {

    #[test]
    pub fn test_unit_header() {
        crate::tests::init();
        let mut data = Vec::new();
        super::push_unit_header(
            &mut data,
            112,
            1,
            2,
            0,
            super::FLAG_TYPE_SLICE_DATA | super::FLAG_TRUNCATABLE,
            0x1234,
            42,
        );
        assert_eq!(data.len(), super::HEADER_SIZE);

        let header = super::parse_unit_header(&data).unwrap();
        assert_eq!(header.total_size, 112);
        assert_eq!(header.layer_id, 1);
        assert_eq!(header.temporal_id, 2);
        assert_eq!(header.quality_id, 0);
        assert_eq!(
            header.flags,
            super::FLAG_TYPE_SLICE_DATA | super::FLAG_TRUNCATABLE
        );
        assert_eq!(header.unit_id, 0x1234);
        assert_eq!(header.frame_number, 42);
    }

    #[test]
    pub fn test_or_flags() {
        crate::tests::init();
        let mut data = Vec::new();
        super::push_unit_header(&mut data, 20, 0, 0, 0, super::FLAG_TYPE_SLICE_DATA, 0, 0);
        super::or_flags(&mut data, super::FLAG_TWO_UNITS);
        let header = super::parse_unit_header(&data).unwrap();
        assert_eq!(
            header.flags,
            super::FLAG_TYPE_SLICE_DATA | super::FLAG_TWO_UNITS
        );
    }

    #[test]
    pub fn test_parse_short_buffer() {
        crate::tests::init();
        assert!(super::parse_unit_header(&[0u8; 11]).is_err());
    }
}
