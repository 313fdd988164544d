/// Performance timing utilities for measuring latency
use std::time::Instant;

/// Performance timer that logs on drop
pub struct PerfTimer {
    label: &'static str,
    start: Instant,
}

impl PerfTimer {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Drop for PerfTimer {
    fn drop(&mut self) {
        tracing::debug!(label = self.label, duration_ms = self.elapsed_ms(), "Perf");
    }
}
