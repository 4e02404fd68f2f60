//! interleave-bench: ways to interleave four numeric sequences into one buffer
//!
//! Given functions `f0..f3`, every strategy produces
//! `[f0(0), f1(0), f2(0), f3(0), f0(1), ...]`. The harness times them and
//! the timing record carries the results to the plotter.

pub mod config;
pub mod error;
pub mod functions;
pub mod layout;
pub mod plot;
pub mod strategies;
pub mod timing;

pub use config::BenchConfig;
pub use error::{InterleaveError, Result};
pub use functions::{FunctionSet, WIDTH};
pub use layout::Layout;
pub use strategies::{FixedStrategy, Strategy};
pub use timing::{Harness, HarnessStats, TimingRecord, TimingSeries};

/// Install the process-wide logger
///
/// Level comes from `RUST_LOG`, defaulting to `info`. Safe to call more than
/// once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
