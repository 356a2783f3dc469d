use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use chrono::Local;
use log::{debug, info};
use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::matcher::SimilarityBreakdown;
use crate::storage::CacheStats;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTiming {
    pub stage: String,
    pub micros: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub generated_at: String,
    pub stages: Vec<StageTiming>,
    pub total_micros: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<SimilarityBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheStats>,
}

impl ProfileReport {
    pub fn slowest(&self) -> Option<&StageTiming> {
        self.stages.iter().max_by_key(|timing| timing.micros)
    }

    /// Attach the comparison details and cache counters of the profiled run.
    pub fn with_outcome(mut self, similarity: Option<SimilarityBreakdown>, cache: Option<CacheStats>) -> Self {
        self.similarity = similarity;
        self.cache = cache;
        self
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        info!("Profile written to {}", path.as_ref().display());
        Ok(())
    }
}

/// Wall-clock timings of named pipeline stages, in the order they ran.
pub struct StageProfiler {
    enabled: bool,
    stages: Vec<(String, Duration)>,
}

impl StageProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            stages: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Run `f`, recording its duration under `stage` when profiling is on.
    pub fn time<T, F: FnOnce() -> T>(&mut self, stage: &str, f: F) -> T {
        if !self.enabled {
            return f();
        }
        let start = Instant::now();
        let result = f();
        self.record(stage, start.elapsed());
        result
    }

    pub fn record(&mut self, stage: &str, elapsed: Duration) {
        if !self.enabled {
            return;
        }
        debug!("Stage {} took {:?}", stage, elapsed);
        self.stages.push((stage.to_string(), elapsed));
    }

    pub fn report(&self) -> ProfileReport {
        let stages: Vec<StageTiming> = self.stages.iter()
            .map(|(stage, elapsed)| StageTiming {
                stage: stage.clone(),
                micros: elapsed.as_micros() as u64,
            })
            .collect();
        let total_micros = stages.iter().map(|timing| timing.micros).sum();

        ProfileReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            stages,
            total_micros,
            similarity: None,
            cache: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_records_nothing() {
        let mut profiler = StageProfiler::new(false);
        let value = profiler.time("work", || 40 + 2);
        profiler.record("manual", Duration::from_millis(5));

        assert_eq!(value, 42);
        assert!(profiler.report().stages.is_empty());
    }

    #[test]
    fn test_stages_in_order_with_total() {
        let mut profiler = StageProfiler::new(true);
        profiler.record("read", Duration::from_micros(30));
        profiler.record("score", Duration::from_micros(70));

        let report = profiler.report();
        let names: Vec<&str> = report.stages.iter().map(|t| t.stage.as_str()).collect();
        assert_eq!(names, ["read", "score"]);
        assert_eq!(report.total_micros, 100);
        assert_eq!(report.slowest().map(|t| t.stage.as_str()), Some("score"));
    }

    #[test]
    fn test_outcome_survives_json() {
        let mut profiler = StageProfiler::new(true);
        profiler.record("similarity", Duration::from_micros(12));

        let breakdown = crate::matcher::SimilarityCalculator::with_ngram_size(2).unwrap()
            .compare_texts_detailed("abcd", "abce")
            .unwrap();
        let report = profiler.report().with_outcome(Some(breakdown), None);

        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("\"cache\""));
        let parsed: ProfileReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.similarity.map(|b| b.shared_distinct), Some(2));
        assert_eq!(parsed.similarity.map(|b| b.dot_product), Some(2));
        assert!(parsed.cache.is_none());
    }

    #[test]
    fn test_timed_closure_is_recorded() {
        let mut profiler = StageProfiler::new(true);
        let value = profiler.time("sum", || (1..=10).sum::<u32>());
        assert_eq!(value, 55);
        assert_eq!(profiler.report().stages.len(), 1);
    }
}
