//! Timing record: strategy name -> per-trial elapsed nanoseconds
//!
//! Persisted as a bincode payload tagged with magic bytes and a version so a
//! stray file is rejected instead of misread.

use crate::error::{InterleaveError, Result};
use bincode::{Decode, Encode};
use std::fs;
use std::path::Path;

const RECORD_MAGIC: [u8; 4] = *b"ILV1";
const RECORD_VERSION: u32 = 1;

/// Upper bound on bytes a decode may claim; length prefixes past it fail
/// instead of allocating
const RECORD_LIMIT_BYTES: usize = 64 << 20;

/// Trials for one strategy, in the order they ran
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct TimingSeries {
    pub strategy: String,
    pub trials: Vec<u64>,
}

impl TimingSeries {
    /// Arithmetic mean of the trials, `None` when there are none
    pub fn mean(&self) -> Option<f64> {
        if self.trials.is_empty() {
            return None;
        }
        let sum: u128 = self.trials.iter().map(|&t| t as u128).sum();
        Some(sum as f64 / self.trials.len() as f64)
    }
}

#[derive(Debug, Encode, Decode)]
struct RecordFile {
    magic: [u8; 4],
    version: u32,
    elements: u64,
    series: Vec<TimingSeries>,
}

/// Ordered mapping from strategy name to its trial sequence
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimingRecord {
    elements: u64,
    series: Vec<TimingSeries>,
}

impl TimingRecord {
    /// `elements` is the buffer size the timings were taken at
    pub fn new(elements: usize) -> Self {
        TimingRecord {
            elements: elements as u64,
            series: Vec::new(),
        }
    }

    pub fn elements(&self) -> u64 {
        self.elements
    }

    /// Append one trial; strategies keep the order they were first seen in
    pub fn push(&mut self, strategy: &str, elapsed_ns: u64) {
        match self.series.iter_mut().find(|s| s.strategy == strategy) {
            Some(series) => series.trials.push(elapsed_ns),
            None => self.series.push(TimingSeries {
                strategy: strategy.to_string(),
                trials: vec![elapsed_ns],
            }),
        }
    }

    /// Register a strategy with an empty trial list
    pub fn insert_empty(&mut self, strategy: &str) {
        if self.get(strategy).is_none() {
            self.series.push(TimingSeries {
                strategy: strategy.to_string(),
                trials: Vec::new(),
            });
        }
    }

    pub fn get(&self, strategy: &str) -> Option<&TimingSeries> {
        self.series.iter().find(|s| s.strategy == strategy)
    }

    pub fn trials(&self, strategy: &str) -> Option<&[u64]> {
        self.get(strategy).map(|s| s.trials.as_slice())
    }

    pub fn mean(&self, strategy: &str) -> Option<f64> {
        self.get(strategy).and_then(TimingSeries::mean)
    }

    /// Mean per strategy in record order; strategies without trials are skipped
    pub fn means(&self) -> Vec<(&str, f64)> {
        self.series
            .iter()
            .filter_map(|s| s.mean().map(|m| (s.strategy.as_str(), m)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimingSeries> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Longest trial sequence across strategies
    pub fn max_trials(&self) -> usize {
        self.series.iter().map(|s| s.trials.len()).max().unwrap_or(0)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let payload = RecordFile {
            magic: RECORD_MAGIC,
            version: RECORD_VERSION,
            elements: self.elements,
            series: self.series.clone(),
        };
        Ok(bincode::encode_to_vec(payload, bincode::config::standard())?)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let (payload, consumed): (RecordFile, usize) =
            bincode::decode_from_slice(
                data,
                bincode::config::standard().with_limit::<RECORD_LIMIT_BYTES>(),
            )?;

        if payload.magic != RECORD_MAGIC {
            return Err(InterleaveError::BadMagic(payload.magic));
        }
        if payload.version != RECORD_VERSION {
            return Err(InterleaveError::UnsupportedVersion(payload.version));
        }
        if consumed != data.len() {
            log::warn!(
                "Trailing bytes after timing record: {}",
                data.len() - consumed
            );
        }

        Ok(TimingRecord {
            elements: payload.elements,
            series: payload.series,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)?;
        log::info!("Wrote timing record for {} strategies to {:?}", self.len(), path);
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        let record = TimingRecord::from_bytes(&data)?;
        log::debug!("Loaded timing record with {} strategies from {:?}", record.len(), path);
        Ok(record)
    }
}
