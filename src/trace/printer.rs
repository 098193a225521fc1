use std::io::Write;

use super::record::TraceRecord;

/// Print the annotated trace in the analyzer column format.
///
/// The output carries a provenance banner, the input columns plus
/// `Frame-No` and `Timestamp` (milliseconds, `-` when the record was
/// never sent), and can be fed back to `parse_trace`.
pub fn print_trace<W: Write>(out: &mut W, records: &[TraceRecord], fps: f32) -> std::io::Result<()> {
    writeln!(
        out,
        "# {} {}, streamed at {} fps, written {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        fps,
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(
        out,
        "#Start-Pos.  Length  LId  TId  QId   Packet-Type  Discardable  Truncatable  Frame-No  Timestamp"
    )?;

    for record in records {
        let timestamp = match record.timestamp {
            Some(millis) => millis.to_string(),
            None => "-".to_owned(),
        };
        writeln!(
            out,
            "{:#010x}  {:>6}  {:>3}  {:>3}  {:>3}  {:>12}  {:>11}  {:>11}  {:>8}  {:>9}",
            record.start_offset,
            record.length,
            record.layer_id,
            record.temporal_id,
            record.quality_id,
            record.packet_type.to_str(),
            yes_no(record.discardable),
            yes_no(record.truncatable),
            record.frame_number,
            timestamp
        )?;
    }
    Ok(())
}

/// Write the annotated trace as a JSON array.
pub fn write_trace_json<W: Write>(out: &mut W, records: &[TraceRecord]) -> std::io::Result<()> {
    serde_json::to_writer_pretty(out, records)?;
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    match value {
        true => "Yes",
        false => "No",
    }
}

#[cfg(test)]
mod tests {
    use crate::trace::parse_trace;

    const TRACE: &str = "\
0x00000000      65    0    0    0  StreamHeader           No           No
0x0000005a    7744    0    0    0     SliceData           No          Yes
0x000023dc      18    1    0    1     SliceData          Yes           No
";

    #[test]
    pub fn test_print_is_reparseable() {
        crate::tests::init();
        let mut records = parse_trace(TRACE.as_bytes()).unwrap();
        records[1].timestamp = Some(1234567890);

        let mut out = Vec::new();
        super::print_trace(&mut out, &records, 25.0).unwrap();

        let reparsed = parse_trace(out.as_slice()).unwrap();
        assert_eq!(reparsed.len(), records.len());
        for (a, b) in records.iter().zip(reparsed.iter()) {
            assert_eq!(a.start_offset, b.start_offset);
            assert_eq!(a.length, b.length);
            assert_eq!(a.layer_id, b.layer_id);
            assert_eq!(a.temporal_id, b.temporal_id);
            assert_eq!(a.quality_id, b.quality_id);
            assert_eq!(a.packet_type, b.packet_type);
            assert_eq!(a.discardable, b.discardable);
            assert_eq!(a.truncatable, b.truncatable);
        }
    }

    #[test]
    pub fn test_json_output() {
        crate::tests::init();
        let mut records = parse_trace(TRACE.as_bytes()).unwrap();
        records[1].timestamp = Some(42);

        let mut out = Vec::new();
        super::write_trace_json(&mut out, &records).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array[1]["timestamp"], 42);
        assert_eq!(array[1]["packet_type"], "SliceData");
        assert_eq!(array[0]["timestamp"], serde_json::Value::Null);
    }
}
