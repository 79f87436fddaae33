//! Run metrics collection and logging setup.

use crate::runner::RunReport;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Aggregate counters across the runs of one process.
pub struct Metrics {
    run_count: AtomicU64,
    kept_count: AtomicU64,
    frame_count: AtomicU64,
    generation_count: AtomicU64,
    pub counters: Mutex<HashMap<String, AtomicU64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            run_count: AtomicU64::new(0),
            kept_count: AtomicU64::new(0),
            frame_count: AtomicU64::new(0),
            generation_count: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a finished run.
    pub fn record_run(&self, report: &RunReport, duration: Duration) {
        self.run_count.fetch_add(1, Ordering::Relaxed);
        if report.kept {
            self.kept_count.fetch_add(1, Ordering::Relaxed);
        }
        self.frame_count
            .fetch_add(u64::from(report.frames), Ordering::Relaxed);
        self.generation_count
            .fetch_add(report.generations, Ordering::Relaxed);

        tracing::info!(
            run = %report.id,
            outcome = ?report.outcome,
            frames = report.frames,
            generations = report.generations,
            duration_ms = duration.as_millis() as u64,
            "Run recorded"
        );
    }

    /// Increments a named counter.
    pub fn increment_counter(&self, name: &str) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn run_count(&self) -> u64 {
        self.run_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn kept_count(&self) -> u64 {
        self.kept_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
pub fn init_logging() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    )
    .ok();
}
