//! Timing harness
//!
//! Runs each strategy in turn on a monotonic clock, prints
//! `<name>: <elapsed> ns` per run and collects everything into a
//! [`TimingRecord`].

pub mod record;

pub use record::{TimingRecord, TimingSeries};

use crate::config::BenchConfig;
use crate::error::Result;
use crate::functions::FunctionSet;
use crate::layout::Layout;
use crate::strategies::{FixedStrategy, Strategy};
use std::hint::black_box;
use std::time::Instant;

/// Counters for one harness
#[derive(Clone, Debug, Default)]
pub struct HarnessStats {
    /// Strategy invocations, successful or not
    pub runs: usize,

    /// Invocations that returned an error
    pub failures: usize,
}

pub struct Harness {
    config: BenchConfig,
    stats: HarnessStats,
}

impl Harness {
    pub fn new(config: BenchConfig) -> Self {
        Harness {
            config,
            stats: HarnessStats::default(),
        }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// General strategies this harness will run, in order
    pub fn strategies(&self) -> Vec<Strategy> {
        Strategy::ALL
            .into_iter()
            .filter(|&s| s != Strategy::Baseline || self.config.include_baseline)
            .collect()
    }

    /// Time every strategy `config.trials` times
    ///
    /// A failing strategy is logged and still gets its elapsed time
    /// recorded; the run carries on with the next one.
    pub fn run(&mut self, fs: &FunctionSet) -> Result<TimingRecord> {
        let layout = Layout::new(self.config.elements)?;
        let strategies = self.strategies();
        let mut record = TimingRecord::new(layout.elements());
        for &strategy in &strategies {
            record.insert_empty(strategy.name());
        }
        for strategy in FixedStrategy::ALL {
            record.insert_empty(strategy.name());
        }

        log::info!(
            "Timing {} strategies over {} elements, {} trial(s), functions: {}",
            strategies.len() + FixedStrategy::ALL.len(),
            layout.elements(),
            self.config.trials,
            fs.name()
        );

        for trial in 0..self.config.trials {
            if self.config.trials > 1 {
                println!("Trial {}", trial);
            }

            for &strategy in &strategies {
                let elapsed = self.time_general(strategy, fs, &layout);
                record.push(strategy.name(), elapsed);
            }

            for strategy in FixedStrategy::ALL {
                let elapsed = self.time_fixed(strategy, &layout);
                record.push(strategy.name(), elapsed);
            }
        }

        Ok(record)
    }

    fn time_general(&mut self, strategy: Strategy, fs: &FunctionSet, layout: &Layout) -> u64 {
        let limit = self.config.matrix_limit_bytes;
        let (result, elapsed) = timed(|| strategy.run_layout(fs, layout, limit));
        self.stats.runs += 1;

        match result {
            Ok(buffer) => {
                black_box(buffer);
            }
            Err(e) => {
                self.stats.failures += 1;
                log::warn!("{} failed: {}", strategy.name(), e);
            }
        }

        println!("{}: {} ns", strategy.name(), elapsed);
        elapsed
    }

    fn time_fixed(&mut self, strategy: FixedStrategy, layout: &Layout) -> u64 {
        let (buffer, elapsed) = timed(|| strategy.run(layout));
        self.stats.runs += 1;
        black_box(buffer);

        println!("{}: {} ns", strategy.name(), elapsed);
        elapsed
    }

    pub fn stats(&self) -> &HarnessStats {
        &self.stats
    }
}

/// Run `f` and return its output with elapsed wall-clock nanoseconds
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, u64) {
    let start = Instant::now();
    let out = f();
    let elapsed = start.elapsed().as_nanos();
    (out, u64::try_from(elapsed).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InterleaveError;

    #[test]
    fn test_baseline_excluded_by_default() {
        let harness = Harness::new(BenchConfig::with_elements(16));
        assert!(!harness.strategies().contains(&Strategy::Baseline));
    }

    #[test]
    fn test_run_records_every_strategy() {
        let cfg = BenchConfig {
            trials: 3,
            include_baseline: true,
            ..BenchConfig::with_elements(64)
        };
        let mut harness = Harness::new(cfg);
        let record = harness.run(&FunctionSet::standard()).unwrap();

        assert_eq!(record.len(), Strategy::ALL.len() + FixedStrategy::ALL.len());
        for series in record.iter() {
            assert_eq!(series.trials.len(), 3, "{}", series.strategy);
        }
        assert_eq!(harness.stats().runs, 3 * record.len());
        assert_eq!(harness.stats().failures, 0);
    }

    #[test]
    fn test_matrix_failure_is_recorded_not_fatal() {
        let cfg = BenchConfig {
            matrix_limit_bytes: 0,
            ..BenchConfig::with_elements(64)
        };
        let mut harness = Harness::new(cfg);
        let record = harness.run(&FunctionSet::linear()).unwrap();

        assert_eq!(harness.stats().failures, 1);
        assert_eq!(record.trials("transform_matrix").map(|t| t.len()), Some(1));
        assert!(record.get("fused_loop").is_some());
    }

    #[test]
    fn test_uneven_elements_rejected() {
        let mut harness = Harness::new(BenchConfig::with_elements(6));
        assert!(matches!(
            harness.run(&FunctionSet::linear()),
            Err(InterleaveError::UnevenElementCount(6))
        ));
    }

    #[test]
    fn test_zero_trials_registers_empty_series() {
        let cfg = BenchConfig {
            trials: 0,
            ..BenchConfig::with_elements(16)
        };
        let mut harness = Harness::new(cfg);
        assert_eq!(harness.config().trials, 0);
        let record = harness.run(&FunctionSet::linear()).unwrap();

        let names: Vec<&str> = record.iter().map(|s| s.strategy.as_str()).collect();
        assert_eq!(names[0], "transform_matrix");
        assert_eq!(record.len(), harness.strategies().len() + FixedStrategy::ALL.len());
        assert!(record.iter().all(|s| s.trials.is_empty()));
        assert!(record.means().is_empty());
    }

    #[test]
    fn test_timed_returns_output() {
        let (v, _ns) = timed(|| 21 * 2);
        assert_eq!(v, 42);
    }
}
