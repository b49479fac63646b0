//! Progress reporting and cancellation hooks for a running bake.

/// Receives progress updates and may request cancellation.
///
/// Reporting never affects the baked result.
pub trait BakeProgress {
    /// `fraction` runs from 0.0 (starting) to 1.0 (last target).
    fn report(&mut self, label: &str, fraction: f32);

    /// Polled before each target; returning true stops the bake before the
    /// next target is committed.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Discards all progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl BakeProgress for NoProgress {
    fn report(&mut self, _label: &str, _fraction: f32) {}
}

/// Logs each update at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress;

impl BakeProgress for LogProgress {
    fn report(&mut self, label: &str, fraction: f32) {
        log::info!("[{:>5.1}%] {}", fraction * 100.0, label);
    }
}
