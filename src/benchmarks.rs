//! Tick-loop timing instrumentation.
//!
//! Named sections of the tick are timed through a [`Profiler`] and
//! aggregated in a process-wide store, so any part of the host can ask for
//! a summary without threading measurement state around. Instrumentation
//! defaults to on in debug builds and off in release builds.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::Local;

/// Configuration for timing instrumentation.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Whether sections are timed at all.
    pub enabled: bool,
    /// Whether a summary file is written on save.
    pub write_to_file: bool,
    /// Durations below this threshold are not recorded.
    pub min_duration_threshold: Duration,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
            write_to_file: cfg!(debug_assertions),
            min_duration_threshold: Duration::ZERO,
        }
    }
}

/// Aggregated timings for one named section.
#[derive(Debug, Clone, Copy)]
pub struct SectionMetrics {
    pub count: u64,
    pub total: Duration,
    pub min: Duration,
    pub max: Duration,
}

impl SectionMetrics {
    fn new() -> Self {
        Self {
            count: 0,
            total: Duration::ZERO,
            min: Duration::MAX,
            max: Duration::ZERO,
        }
    }

    fn update(&mut self, duration: Duration) {
        self.count += 1;
        self.total += duration;
        self.min = self.min.min(duration);
        self.max = self.max.max(duration);
    }

    pub fn average(&self) -> Duration {
        if self.count == 0 {
            Duration::ZERO
        } else {
            self.total / self.count as u32
        }
    }
}

lazy_static::lazy_static! {
    /// Process-wide measurement store.
    static ref MEASUREMENTS: Mutex<HashMap<String, SectionMetrics>> =
        Mutex::new(HashMap::new());
}

/// Records one measurement into the global store.
pub fn record_duration(name: &str, duration: Duration) {
    let mut measurements = MEASUREMENTS.lock().expect("measurement store poisoned");
    measurements
        .entry(name.to_string())
        .or_insert_with(SectionMetrics::new)
        .update(duration);
}

/// Returns a copy of every recorded section.
pub fn get_measurements() -> HashMap<String, SectionMetrics> {
    MEASUREMENTS
        .lock()
        .expect("measurement store poisoned")
        .clone()
}

/// Drops every recorded measurement.
pub fn clear_measurements() {
    MEASUREMENTS
        .lock()
        .expect("measurement store poisoned")
        .clear();
}

/// Formats the store as a readable table, slowest sections first.
pub fn summary() -> String {
    let measurements = get_measurements();
    let mut rows: Vec<(String, SectionMetrics)> = measurements.into_iter().collect();
    rows.sort_by(|a, b| b.1.total.cmp(&a.1.total));

    let mut out = String::from("section                     count      avg        max\n");
    for (name, metrics) in rows {
        out.push_str(&format!(
            "{:<26} {:>6} {:>10.2?} {:>10.2?}\n",
            name,
            metrics.count,
            metrics.average(),
            metrics.max
        ));
    }
    out
}

/// Writes the summary to a timestamped file in the working directory and
/// returns its path.
pub fn save_results() -> io::Result<PathBuf> {
    let path = PathBuf::from(format!(
        "farol-profile-{}.txt",
        Local::now().format("%Y%m%d-%H%M%S")
    ));
    fs::write(&path, summary())?;
    Ok(path)
}

/// Times named sections of a frame or tick.
///
/// Sections may interleave but not nest under the same name; ending a
/// section that was never started is ignored.
#[derive(Debug)]
pub struct Profiler {
    config: BenchmarkConfig,
    open_sections: HashMap<String, Instant>,
}

impl Profiler {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self {
            config,
            open_sections: HashMap::new(),
        }
    }

    pub fn start_section(&mut self, name: &str) {
        if self.config.enabled {
            self.open_sections.insert(name.to_string(), Instant::now());
        }
    }

    pub fn end_section(&mut self, name: &str) {
        if !self.config.enabled {
            return;
        }
        if let Some(started) = self.open_sections.remove(name) {
            let elapsed = started.elapsed();
            if elapsed >= self.config.min_duration_threshold {
                record_duration(name, elapsed);
            }
        }
    }

    /// Whether the host should write a summary file on shutdown.
    pub fn writes_to_file(&self) -> bool {
        self.config.enabled && self.config.write_to_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn test_config() -> BenchmarkConfig {
        BenchmarkConfig {
            enabled: true,
            write_to_file: false,
            min_duration_threshold: Duration::ZERO,
        }
    }

    /// Sections started and ended land in the global store.
    #[test]
    fn profiler_records_sections() {
        clear_measurements();

        let mut profiler = Profiler::new(test_config());
        profiler.start_section("test_section");
        thread::sleep(Duration::from_millis(5));
        profiler.end_section("test_section");

        let measurements = get_measurements();
        let metrics = measurements.get("test_section").expect("section recorded");
        assert_eq!(metrics.count, 1);
        assert!(metrics.total >= Duration::from_millis(5));

        clear_measurements();
    }

    #[test]
    fn ending_an_unstarted_section_is_ignored() {
        let mut profiler = Profiler::new(test_config());
        profiler.end_section("never_started");
        assert!(!get_measurements().contains_key("never_started"));
    }

    #[test]
    fn disabled_profiler_records_nothing() {
        let mut profiler = Profiler::new(BenchmarkConfig {
            enabled: false,
            ..test_config()
        });
        profiler.start_section("disabled");
        profiler.end_section("disabled");
        assert!(!get_measurements().contains_key("disabled"));
    }

    #[test]
    fn metrics_track_min_and_max() {
        let mut metrics = SectionMetrics::new();
        metrics.update(Duration::from_millis(2));
        metrics.update(Duration::from_millis(8));
        assert_eq!(metrics.count, 2);
        assert_eq!(metrics.min, Duration::from_millis(2));
        assert_eq!(metrics.max, Duration::from_millis(8));
        assert_eq!(metrics.average(), Duration::from_millis(5));
    }
}
