//! Benchmark configuration
//!
//! Everything the strategies and the harness need to know about sizes lives
//! in a `BenchConfig` value that callers pass down explicitly. Binaries build
//! it with [`BenchConfig::from_env`]; tests build it directly.

use std::env;
use std::path::PathBuf;

/// Default buffer size: ten million interleaved elements
pub const DEFAULT_ELEMENTS: usize = 10_000_000;

/// Default ceiling for the transformation matrix (1 GiB)
pub const DEFAULT_MATRIX_LIMIT_BYTES: u64 = 1 << 30;

/// File the plotter reads when `INTERLEAVE_RECORD` is unset
pub const DEFAULT_RECORD_PATH: &str = "times.dat";

#[derive(Clone, Debug, PartialEq)]
pub struct BenchConfig {
    /// Length of the interleaved output buffer
    pub elements: usize,

    /// How many times every strategy is run
    pub trials: usize,

    /// Run the scalar double loop too (slow at full size)
    pub include_baseline: bool,

    /// Largest transformation matrix the matrix strategy may allocate
    pub matrix_limit_bytes: u64,

    /// Where the harness persists its timing record, if anywhere
    pub record_path: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            elements: DEFAULT_ELEMENTS,
            trials: 1,
            include_baseline: false,
            matrix_limit_bytes: DEFAULT_MATRIX_LIMIT_BYTES,
            record_path: None,
        }
    }
}

impl BenchConfig {
    /// Build a config from the process environment (and `.env` if present)
    ///
    /// Recognised variables:
    /// - `INTERLEAVE_ELEMENTS` (usize)
    /// - `INTERLEAVE_TRIALS` (usize, at least 1)
    /// - `INTERLEAVE_BASELINE` (`1`/`true`/`yes`/`on`)
    /// - `INTERLEAVE_MATRIX_LIMIT` (bytes)
    /// - `INTERLEAVE_RECORD` (path)
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("Loaded environment from {:?}", path);
        }

        let defaults = BenchConfig::default();
        BenchConfig {
            elements: resolve_usize("INTERLEAVE_ELEMENTS").unwrap_or(defaults.elements),
            trials: resolve_usize("INTERLEAVE_TRIALS")
                .filter(|&t| t > 0)
                .unwrap_or(defaults.trials),
            include_baseline: resolve_flag("INTERLEAVE_BASELINE")
                .unwrap_or(defaults.include_baseline),
            matrix_limit_bytes: resolve_u64("INTERLEAVE_MATRIX_LIMIT")
                .unwrap_or(defaults.matrix_limit_bytes),
            record_path: resolve_path("INTERLEAVE_RECORD"),
        }
    }

    /// Small config for tests and quick runs
    pub fn with_elements(elements: usize) -> Self {
        BenchConfig {
            elements,
            ..BenchConfig::default()
        }
    }
}

/// Path the plotter should read, honouring `INTERLEAVE_RECORD`
pub fn resolve_record_path() -> PathBuf {
    resolve_path("INTERLEAVE_RECORD").unwrap_or_else(|| PathBuf::from(DEFAULT_RECORD_PATH))
}

fn resolve_usize(name: &str) -> Option<usize> {
    let value = env::var(name).ok()?;
    match value.trim().parse::<usize>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not an unsigned integer", name, value);
            None
        }
    }
}

fn resolve_u64(name: &str) -> Option<u64> {
    let value = env::var(name).ok()?;
    match value.trim().parse::<u64>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not an unsigned integer", name, value);
            None
        }
    }
}

fn resolve_flag(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    let flag = parse_flag(&value);
    if flag.is_none() {
        log::warn!("Ignoring {}={:?}: not a boolean flag", name, value);
    }
    flag
}

fn resolve_path(name: &str) -> Option<PathBuf> {
    let value = env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
