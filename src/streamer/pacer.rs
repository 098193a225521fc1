use std::time::{Duration, Instant};

use crate::tools::error::Result;
use crate::tools::interval_from_fps;

/// Inter-unit pacing clock
///
/// Enforces the target frame interval with a monotonic mark and an
/// interruptible sleep.
#[derive(Debug)]
pub struct PacingClock {
    interval: Duration,
    last_mark: Instant,
}

impl PacingClock {
    /// Clock with a budget of `1e9 / fps` nanoseconds per paced event
    pub fn new(fps: f32) -> Result<Self> {
        Ok(Self {
            interval: interval_from_fps(fps)?,
            last_mark: Instant::now(),
        })
    }

    /// Target interval between paced events
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Restart the budget window at the current instant
    pub fn mark(&mut self) {
        self.last_mark = Instant::now();
    }

    /// Sleep for the remaining part of the budget, then restart the window.
    ///
    /// An over-budget window does not sleep at all.
    pub fn pace(&mut self) {
        let elapsed = self.last_mark.elapsed();
        let remaining = self.interval.saturating_sub(elapsed);
        if !remaining.is_zero() {
            interruptible_sleep(remaining);
        }
        self.mark();
    }
}

/// Nanosleep resumed on EINTR, aborted with a warning on any other failure.
fn interruptible_sleep(duration: Duration) {
    let mut requested = libc::timespec {
        tv_sec: duration.as_secs() as libc::time_t,
        tv_nsec: duration.subsec_nanos() as libc::c_long,
    };
    let mut remaining = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };

    // SAFETY: both pointers reference local storage valid for the call.
    while unsafe { libc::nanosleep(&requested, &mut remaining) } == -1 {
        let err = std::io::Error::last_os_error();
        match err.raw_os_error() {
            Some(libc::EINTR) => requested = remaining,
            _ => {
                log::warn!("nanosleep failed: {}", err);
                break;
            }
        }
    }
}
