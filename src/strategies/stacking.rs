//! Vectorised interleaving: evaluate each function over the whole index
//! vector, then reshape
//!
//! All three produce the same buffer; they differ only in which ndarray
//! primitive does the reshaping.

use crate::error::Result;
use crate::functions::{FunctionSet, WIDTH};
use crate::layout::Layout;
use ndarray::{concatenate, stack, Array2, ArrayView2, Axis};

/// Stack the four vectors as columns of a `quarter × 4` matrix and flatten
pub fn column_stack(fs: &FunctionSet, layout: &Layout) -> Result<Vec<f64>> {
    let [a0, a1, a2, a3] = fs.over_all(&layout.indices());

    let big = stack(Axis(1), &[a0.view(), a1.view(), a2.view(), a3.view()])?;
    Ok(flatten(big.view()))
}

/// Stack the four vectors as rows of a `4 × quarter` matrix, transpose and
/// flatten in logical order
pub fn stack_transpose(fs: &FunctionSet, layout: &Layout) -> Result<Vec<f64>> {
    let [a0, a1, a2, a3] = fs.over_all(&layout.indices());

    let rows = concatenate(
        Axis(0),
        &[
            a0.view().insert_axis(Axis(0)),
            a1.view().insert_axis(Axis(0)),
            a2.view().insert_axis(Axis(0)),
            a3.view().insert_axis(Axis(0)),
        ],
    )?;
    Ok(flatten(rows.t()))
}

/// Allocate a zeroed `quarter × 4` matrix up front and assign each column
pub fn preallocated(fs: &FunctionSet, layout: &Layout) -> Result<Vec<f64>> {
    let indices = layout.indices();
    let mut big = Array2::<f64>::zeros((layout.quarter(), WIDTH));

    for j in 0..WIDTH {
        big.column_mut(j).assign(&fs.over(j, &indices));
    }

    Ok(flatten(big.view()))
}

/// Row-major flatten: a straight copy when contiguous, logical-order walk
/// otherwise (transposed views)
fn flatten(a: ArrayView2<f64>) -> Vec<f64> {
    match a.as_slice() {
        Some(data) => data.to_vec(),
        None => a.iter().copied().collect(),
    }
}
