use std::io::BufRead;

use super::record::{PacketType, TraceRecord};
use crate::tools::error::{Result, StreamError};

/// Parse a NALU trace produced by the bitstream analyzer.
///
/// Lines whose first token does not begin with `0x` are banner lines
/// and are skipped. Each data line carries the start offset (hex),
/// length, layer/temporal/quality ids, packet type and the
/// discardable/truncatable attributes. Display frame numbers are
/// assigned while parsing: a new frame begins at every slice-data
/// record of the base layer.
pub fn parse_trace<R: BufRead>(reader: R) -> Result<Vec<TraceRecord>> {
    let mut records = Vec::new();
    let mut frame: Option<u16> = None;

    for (index, line) in reader.lines().enumerate() {
        let lineno = index + 1;
        let line =
            line.map_err(|e| StreamError::Parse(format!("line {}: {}", lineno, e)))?;
        let fields: Vec<&str> = line.split_whitespace().collect();

        let start_offset = match fields.first().and_then(|f| f.strip_prefix("0x")) {
            Some(hex) => u32::from_str_radix(hex, 16).map_err(|_| {
                StreamError::Parse(format!("line {}: invalid start offset '{}'", lineno, fields[0]))
            })?,
            None => {
                log::debug!("Skip banner line {}", lineno);
                continue;
            }
        };

        if fields.len() < 8 {
            return Err(StreamError::Parse(format!(
                "line {}: expected 8 fields, got {}",
                lineno,
                fields.len()
            )));
        }

        let length = parse_field(fields[1], "length", lineno)?;
        let layer_id = parse_field(fields[2], "layer id", lineno)?;
        let temporal_id = parse_field(fields[3], "temporal id", lineno)?;
        let quality_id = parse_field(fields[4], "quality id", lineno)?;
        let packet_type = PacketType::try_from(fields[5]).unwrap_or(PacketType::Undefined);
        let discardable = parse_yes_no(fields[6], "discardable", lineno)?;
        let truncatable = parse_yes_no(fields[7], "truncatable", lineno)?;

        let frame_number = match packet_type {
            PacketType::SliceData => {
                if layer_id == 0 && quality_id == 0 {
                    frame = Some(frame.map_or(0, |f| f.wrapping_add(1)));
                }
                frame.unwrap_or(0)
            }
            _ => 0,
        };

        records.push(TraceRecord {
            layer_id,
            temporal_id,
            quality_id,
            packet_type,
            length,
            start_offset,
            frame_number,
            discardable,
            truncatable,
            timestamp: None,
        });
    }

    log::info!("Parsed {} trace records", records.len());
    Ok(records)
}

/// Parse the NALU trace file at `path`.
pub fn parse_trace_file<P: AsRef<std::path::Path>>(path: P) -> Result<Vec<TraceRecord>> {
    let file = std::fs::File::open(path.as_ref()).map_err(|e| {
        StreamError::Parse(format!("fail to read {}: {}", path.as_ref().display(), e))
    })?;
    parse_trace(std::io::BufReader::new(file))
}

fn parse_field<T: std::str::FromStr>(value: &str, what: &str, lineno: usize) -> Result<T> {
    value.parse::<T>().map_err(|_| {
        StreamError::Parse(format!("line {}: invalid {} '{}'", lineno, what, value))
    })
}

fn parse_yes_no(value: &str, what: &str, lineno: usize) -> Result<bool> {
    match value {
        "Yes" => Ok(true),
        "No" => Ok(false),
        _ => Err(StreamError::Parse(format!(
            "line {}: invalid {} '{}'",
            lineno, what, value
        ))),
    }
}
