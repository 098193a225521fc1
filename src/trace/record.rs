use serde::Serialize;

/// NALU content type
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum PacketType {
    /// Sequence or stream header unit
    StreamHeader = 0,
    /// Parameter set unit
    ParameterSet = 1,
    /// Coded slice data unit
    SliceData = 2,
    /// Anything else found in the trace
    Undefined = 3,
}

impl TryFrom<&str> for PacketType {
    type Error = ();

    fn try_from(v: &str) -> std::result::Result<Self, Self::Error> {
        match v {
            "StreamHeader" => Ok(PacketType::StreamHeader),
            "ParameterSet" => Ok(PacketType::ParameterSet),
            "SliceData" => Ok(PacketType::SliceData),
            "Undefined" => Ok(PacketType::Undefined),
            _ => Err(()),
        }
    }
}

impl PacketType {
    /// Convert PacketType to its string representation
    pub fn to_str(&self) -> &str {
        match self {
            PacketType::StreamHeader => "StreamHeader",
            PacketType::ParameterSet => "ParameterSet",
            PacketType::SliceData => "SliceData",
            PacketType::Undefined => "Undefined",
        }
    }
}

/// One entry of the parsed NALU trace
#[derive(Clone, Debug, Serialize)]
pub struct TraceRecord {
    /// Scalable layer id
    pub layer_id: u8,
    /// Temporal layer id, selects the destination port
    pub temporal_id: u8,
    /// Quality layer id
    pub quality_id: u8,
    /// NALU content type
    pub packet_type: PacketType,
    /// Payload byte length
    pub length: usize,
    /// Byte offset of the payload inside the source bitstream
    pub start_offset: u32,
    /// Display frame index
    pub frame_number: u16,
    /// Unit may be dropped by a network adapter
    pub discardable: bool,
    /// Unit may be truncated by a network adapter
    pub truncatable: bool,
    /// Actual send time in milliseconds since the Unix epoch, written
    /// once by the playback loop
    pub timestamp: Option<u64>,
}

impl TraceRecord {
    /// A short slice marks a layer switch and is transmitted joined
    /// with the following unit.
    pub fn is_control_unit(&self) -> bool {
        self.packet_type == PacketType::SliceData && self.length >= 8 && self.length <= 25
    }
}

#[cfg(test)]
mod tests {
    use super::{PacketType, TraceRecord};

    fn slice(length: usize) -> TraceRecord {
        TraceRecord {
            layer_id: 0,
            temporal_id: 0,
            quality_id: 0,
            packet_type: PacketType::SliceData,
            length,
            start_offset: 0,
            frame_number: 0,
            discardable: false,
            truncatable: false,
            timestamp: None,
        }
    }

    #[test]
    pub fn test_control_unit_boundaries() {
        crate::tests::init();
        assert!(!slice(7).is_control_unit());
        assert!(slice(8).is_control_unit());
        assert!(slice(25).is_control_unit());
        assert!(!slice(26).is_control_unit());
    }

    #[test]
    pub fn test_control_unit_requires_slice_data() {
        crate::tests::init();
        let mut record = slice(10);
        record.packet_type = PacketType::ParameterSet;
        assert!(!record.is_control_unit());
    }

    #[test]
    pub fn test_packet_type_strings() {
        crate::tests::init();
        assert_eq!(
            PacketType::try_from("SliceData").unwrap(),
            PacketType::SliceData
        );
        assert_eq!(
            PacketType::try_from("StreamHeader").unwrap(),
            PacketType::StreamHeader
        );
        assert!(PacketType::try_from("Slice").is_err());
        assert_eq!(PacketType::ParameterSet.to_str(), "ParameterSet");
    }
}
