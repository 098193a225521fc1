//!
//!  Parsing and printing of NALU trace files
//!

mod parser;
mod printer;
mod record;

pub use parser::parse_trace;
pub use parser::parse_trace_file;
pub use printer::print_trace;
pub use printer::write_trace_json;
pub use record::PacketType;
pub use record::TraceRecord;
