use self::error::Result;
use self::error::StreamError;
use std::time::Duration;
use std::time::SystemTime;

/// Handle errors
pub mod error;

/// Convert the `SystemTime` into milliseconds since the Unix epoch.
pub fn system_time_to_millis(time: &SystemTime) -> u64 {
    time.duration_since(std::time::UNIX_EPOCH)
        .map(|duration| duration.as_millis() as u64)
        .unwrap_or(0)
}

/// Target inter-unit time budget of `1e9 / fps` nanoseconds.
pub fn interval_from_fps(fps: f32) -> Result<Duration> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(StreamError::Config(format!("invalid frame rate {}", fps)));
    }
    Ok(Duration::from_nanos((1e9 / fps as f64) as u64))
}
