///
/// Configuration of the `Streamer`
///
#[derive(Debug, Clone)]
pub struct Config {
    /// Target frame rate, in display frames per second.
    pub fps: f32,
    /// Idle period after the last datagram, letting receivers finish
    /// before the annotated trace is handed back.
    pub wait_after_stream: std::time::Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 25.0,
            wait_after_stream: std::time::Duration::from_secs(10),
        }
    }
}
