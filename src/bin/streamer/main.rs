use std::io::BufReader;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use clap::Parser;

use svcstream::core::UDPEndpoint;
use svcstream::error::StreamError;
use svcstream::streamer::{Config, PayloadStream, Streamer};
use svcstream::trace;

/// Replay a NALU trace over UDP at a fixed frame rate.
///
/// Temporal layers are sent to PORT, PORT+1 and PORT+2. After the
/// stream a configurable wait lets receivers finish, then the trace,
/// annotated with the actual send timestamps, is printed to stdout.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// NALU trace file produced by the bitstream analyzer
    trace: PathBuf,

    /// Target frame rate, in frames per second
    fps: f32,

    /// Destination host
    destination: String,

    /// Base UDP port of the 3-port temporal-layer range
    port: u16,

    /// Source bitstream providing the real payload bytes, zero fill without it
    video: Option<PathBuf>,

    /// Seconds to wait after the stream before printing the trace
    #[arg(default_value_t = 10)]
    wait: u64,

    /// Also write the annotated trace as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,
}

static SHUTDOWN: OnceLock<Arc<AtomicBool>> = OnceLock::new();

extern "C" fn quit_on_signal(_signum: libc::c_int) {
    if let Some(flag) = SHUTDOWN.get() {
        flag.store(true, Ordering::Relaxed);
    }
}

fn install_signal_handlers() {
    unsafe {
        libc::signal(libc::SIGINT, quit_on_signal as libc::sighandler_t);
        libc::signal(libc::SIGTERM, quit_on_signal as libc::sighandler_t);
    }
}

fn exit_status(err: &StreamError) -> i32 {
    match err {
        StreamError::Parse(_) => 1,
        StreamError::Socket(_) => 2,
        StreamError::Config(_) => 3,
        StreamError::PayloadTruncated { .. } => 5,
        StreamError::PayloadRead(_) => 5,
        StreamError::PairingIncomplete => 5,
        StreamError::Transmit(_) => 6,
        StreamError::Interrupted => 10,
    }
}

fn main() {
    let args = Args::parse();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::builder().try_init().ok();

    let payload: Option<PayloadStream> = match &args.video {
        Some(path) => match std::fs::File::open(path) {
            Ok(file) => {
                log::info!("Payload bytes from {}", path.display());
                Some(Box::new(BufReader::new(file)))
            }
            Err(e) => {
                log::error!("Fail to open {}: {}", path.display(), e);
                std::process::exit(4);
            }
        },
        None => {
            log::info!("No video file, unit payloads are zero filled");
            None
        }
    };

    let records = match trace::parse_trace_file(&args.trace) {
        Ok(records) => records,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(exit_status(&e));
        }
    };

    let endpoint = UDPEndpoint::new(args.destination.clone(), args.port);
    let config = Config {
        fps: args.fps,
        wait_after_stream: Duration::from_secs(args.wait),
    };

    let mut streamer = match Streamer::new(&endpoint, records, payload, &config) {
        Ok(streamer) => streamer,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(exit_status(&e));
        }
    };

    SHUTDOWN.set(streamer.shutdown_flag()).ok();
    install_signal_handlers();

    if let Err(e) = streamer.run() {
        log::error!("{}", e);
        std::process::exit(exit_status(&e));
    }

    let records = streamer.close();

    if let Some(path) = &args.json {
        let result = std::fs::File::create(path)
            .and_then(|mut file| trace::write_trace_json(&mut file, &records));
        if let Err(e) = result {
            log::error!("Fail to write {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    let stdout = std::io::stdout();
    if let Err(e) = trace::print_trace(&mut stdout.lock(), &records, args.fps) {
        log::error!("Fail to print the trace: {}", e);
        std::process::exit(1);
    }
    log::info!("Trace printed");
}
