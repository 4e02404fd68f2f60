//! Time every interleaving strategy once per trial and print the results
//!
//! Environment:
//! - `INTERLEAVE_ELEMENTS`, `INTERLEAVE_TRIALS`, `INTERLEAVE_BASELINE`,
//!   `INTERLEAVE_MATRIX_LIMIT`: see `BenchConfig::from_env`
//! - `INTERLEAVE_RECORD`: if set, the timing record is written there

use anyhow::Context;
use interleave_bench::{init_logging, BenchConfig, FunctionSet, Harness};

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = BenchConfig::from_env();
    let record_path = config.record_path.clone();

    let mut harness = Harness::new(config);
    let record = harness
        .run(&FunctionSet::standard())
        .context("benchmark run failed")?;

    let stats = harness.stats();
    log::debug!("Finished with {:?}", harness.config());
    log::info!("{} runs, {} failed", stats.runs, stats.failures);

    if let Some(path) = record_path {
        record
            .save(&path)
            .with_context(|| format!("failed to write timing record to {:?}", path))?;
    }

    Ok(())
}
