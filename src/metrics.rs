// Performance metrics module
//
// Provides lightweight metrics tracking for monitoring pack generation

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Global performance metrics
///
/// Uses atomic operations for thread-safe metric tracking without locks.
/// The packaging pipeline records into a shared handle and the summary is
/// logged on shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Total number of packs successfully generated
    pub packs_generated: AtomicUsize,

    /// Total number of generation runs that failed
    pub packs_failed: AtomicUsize,

    /// Total number of textures copied into generated packs
    pub assets_packaged: AtomicUsize,

    /// Total generation time in milliseconds
    pub total_generation_time_ms: AtomicU64,

    /// Number of animation overrides applied to the binding store
    pub overrides_applied: AtomicU64,

    /// Application start time
    start_time: Instant,
}

impl Metrics {
    /// Create a new Metrics instance
    pub fn new() -> Self {
        Self {
            packs_generated: AtomicUsize::new(0),
            packs_failed: AtomicUsize::new(0),
            assets_packaged: AtomicUsize::new(0),
            total_generation_time_ms: AtomicU64::new(0),
            overrides_applied: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a successful generation run
    pub fn record_pack_generated(&self, asset_count: usize, duration: Duration) {
        self.packs_generated.fetch_add(1, Ordering::Relaxed);
        self.assets_packaged.fetch_add(asset_count, Ordering::Relaxed);
        self.total_generation_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record a failed generation run
    pub fn record_pack_failed(&self) {
        self.packs_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record animation overrides applied to the binding store
    pub fn record_overrides_applied(&self, count: usize) {
        self.overrides_applied
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get average generation time per pack in milliseconds
    pub fn avg_generation_time_ms(&self) -> f64 {
        let total = self.total_generation_time_ms.load(Ordering::Relaxed);
        let count = self.packs_generated.load(Ordering::Relaxed);
        if count > 0 {
            total as f64 / count as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        let uptime = self.uptime();
        tracing::info!("=== Performance Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", uptime.as_secs_f64());
        tracing::info!(
            "Packs: {} generated, {} failed",
            self.packs_generated.load(Ordering::Relaxed),
            self.packs_failed.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Textures packaged: {}",
            self.assets_packaged.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Total generation time: {:.2}s (avg: {:.2}ms per pack)",
            self.total_generation_time_ms.load(Ordering::Relaxed) as f64 / 1000.0,
            self.avg_generation_time_ms()
        );
        tracing::info!(
            "Animation overrides applied: {}",
            self.overrides_applied.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.packs_generated.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.packs_failed.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_record_generation_runs() {
        let metrics = Metrics::new();

        metrics.record_pack_generated(3, Duration::from_millis(100));
        metrics.record_pack_generated(2, Duration::from_millis(200));
        metrics.record_pack_failed();

        assert_eq!(metrics.packs_generated.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.packs_failed.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.assets_packaged.load(Ordering::Relaxed), 5);
        assert_eq!(metrics.total_generation_time_ms.load(Ordering::Relaxed), 300);
        assert_eq!(metrics.avg_generation_time_ms(), 150.0);
    }

    #[test]
    fn test_avg_generation_time_no_packs() {
        let metrics = Metrics::new();
        assert_eq!(metrics.avg_generation_time_ms(), 0.0);
    }

    #[test]
    fn test_record_overrides() {
        let metrics = Metrics::new();

        metrics.record_overrides_applied(2);
        metrics.record_overrides_applied(1);

        assert_eq!(metrics.overrides_applied.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_uptime() {
        let metrics = Metrics::new();
        thread::sleep(Duration::from_millis(10));
        assert!(metrics.uptime().as_millis() >= 10);
    }
}
