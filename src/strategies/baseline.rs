//! Scalar double loop, the slow reference every other strategy is checked
//! against

use crate::functions::{FunctionSet, WIDTH};
use crate::layout::Layout;

/// Zeroed buffer filled one index and one function at a time
pub fn baseline(fs: &FunctionSet, layout: &Layout) -> Vec<f64> {
    let mut buffer = vec![0.0; layout.elements()];

    for i in 0..layout.quarter() {
        let x = i as f64;
        for j in 0..WIDTH {
            buffer[WIDTH * i + j] = fs.at(j, x);
        }
    }

    buffer
}
