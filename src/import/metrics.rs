use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Tracks outcomes and timings of staged imports
#[derive(Debug, Default)]
pub struct ImportMetrics {
    import_times: RwLock<HashMap<String, Duration>>,
    import_counts: RwLock<HashMap<String, u64>>,
    successes: AtomicU64,
    failures: AtomicU64,
    bytes_staged: AtomicU64,
}

impl ImportMetrics {
    /// Create a new instance of ImportMetrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record how long importing `primary` took
    pub fn record_import_time(&self, primary: String, duration: Duration) {
        *self.import_counts.write().entry(primary.clone()).or_insert(0) += 1;
        self.import_times.write().insert(primary, duration);
    }

    /// Record a successful import
    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed import
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the size of a file list handed to the importer
    pub fn record_bytes_staged(&self, bytes: usize) {
        self.bytes_staged.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Number of successful imports
    pub fn successes(&self) -> u64 {
        self.successes.load(Ordering::Relaxed)
    }

    /// Number of failed imports
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Share of successful imports as a percentage
    pub fn success_rate(&self) -> f32 {
        let successes = self.successes() as f32;
        let failures = self.failures() as f32;

        if successes + failures > 0.0 {
            successes / (successes + failures) * 100.0
        } else {
            0.0
        }
    }

    /// Total bytes of all file lists imported so far
    pub fn total_bytes_staged(&self) -> u64 {
        self.bytes_staged.load(Ordering::Relaxed)
    }

    /// Duration of the most recent import of `primary`
    pub fn last_import_time(&self, primary: &str) -> Option<Duration> {
        self.import_times.read().get(primary).cloned()
    }

    /// How many times `primary` has been imported
    pub fn import_count(&self, primary: &str) -> u64 {
        *self.import_counts.read().get(primary).unwrap_or(&0)
    }
}

/// A thread-safe wrapper around ImportMetrics
#[derive(Debug, Clone, Default)]
pub struct ImportMetricsHandle(Arc<ImportMetrics>);

impl ImportMetricsHandle {
    pub fn new() -> Self {
        Self(Arc::new(ImportMetrics::new()))
    }
}

impl std::ops::Deref for ImportMetricsHandle {
    type Target = ImportMetrics;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
