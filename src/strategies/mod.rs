//! Interleaving strategies
//!
//! Every strategy turns four functions into the flat buffer
//! `[f0(0), f1(0), f2(0), f3(0), f0(1), ...]`.
//!
//! - [`Strategy`]: general strategies, parameterised by a [`FunctionSet`]
//! - [`FixedStrategy`]: fixed-function kernels with the standard set baked in

pub mod accelerated;
pub mod baseline;
pub mod matrix;
pub mod stacking;

pub use accelerated::{fused_loop, parallel_fill};
pub use baseline::baseline;
pub use matrix::{matrix_bytes, transform_matrix};
pub use stacking::{column_stack, preallocated, stack_transpose};

use crate::config::BenchConfig;
use crate::error::Result;
use crate::functions::FunctionSet;
use crate::layout::Layout;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    TransformMatrix,
    ColumnStack,
    StackTranspose,
    Preallocated,
    Baseline,
}

impl Strategy {
    /// Harness order
    pub const ALL: [Strategy; 5] = [
        Strategy::TransformMatrix,
        Strategy::ColumnStack,
        Strategy::StackTranspose,
        Strategy::Preallocated,
        Strategy::Baseline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::TransformMatrix => "transform_matrix",
            Strategy::ColumnStack => "column_stack",
            Strategy::StackTranspose => "stack_transpose",
            Strategy::Preallocated => "preallocated",
            Strategy::Baseline => "baseline",
        }
    }

    /// Build the layout from `config` and run
    pub fn run(self, fs: &FunctionSet, config: &BenchConfig) -> Result<Vec<f64>> {
        let layout = Layout::new(config.elements)?;
        self.run_layout(fs, &layout, config.matrix_limit_bytes)
    }

    pub fn run_layout(
        self,
        fs: &FunctionSet,
        layout: &Layout,
        matrix_limit_bytes: u64,
    ) -> Result<Vec<f64>> {
        match self {
            Strategy::TransformMatrix => transform_matrix(fs, layout, matrix_limit_bytes),
            Strategy::ColumnStack => column_stack(fs, layout),
            Strategy::StackTranspose => stack_transpose(fs, layout),
            Strategy::Preallocated => preallocated(fs, layout),
            Strategy::Baseline => Ok(baseline(fs, layout)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FixedStrategy {
    FusedLoop,
    ParallelFill,
}

impl FixedStrategy {
    pub const ALL: [FixedStrategy; 2] = [FixedStrategy::FusedLoop, FixedStrategy::ParallelFill];

    pub fn name(self) -> &'static str {
        match self {
            FixedStrategy::FusedLoop => "fused_loop",
            FixedStrategy::ParallelFill => "parallel_fill",
        }
    }

    pub fn run(self, layout: &Layout) -> Vec<f64> {
        match self {
            FixedStrategy::FusedLoop => fused_loop(layout),
            FixedStrategy::ParallelFill => parallel_fill(layout),
        }
    }
}
