//! Transformation-matrix interleaving
//!
//! Maps each quarter-length vector onto the full buffer with an
//! `elements × quarter` matrix whose rows `0, 4, 8, ...` form the identity.
//! After each product the matrix is rolled down one row so the next
//! function lands one slot further along. The four products are summed.
//!
//! The matrix is quadratic in the buffer size: at ten million elements it
//! needs about 200 TB, so in practice this strategy only ever reports
//! [`InterleaveError::InsufficientMemory`]. It stays in the suite as the
//! reference point for why the stacking strategies exist.

use crate::error::{InterleaveError, Result};
use crate::functions::{FunctionSet, WIDTH};
use crate::layout::Layout;
use ndarray::{Array1, Array2};

/// Bytes needed for an `elements × quarter` f64 matrix, `None` on overflow
pub fn matrix_bytes(layout: &Layout) -> Option<u64> {
    let rows = layout.elements() as u64;
    let cols = layout.quarter() as u64;
    rows.checked_mul(cols)?
        .checked_mul(std::mem::size_of::<f64>() as u64)
}

/// Interleave via the shifted-identity matrix; fails with `InsufficientMemory`
/// when the matrix exceeds `limit_bytes`
pub fn transform_matrix(fs: &FunctionSet, layout: &Layout, limit_bytes: u64) -> Result<Vec<f64>> {
    let mut tsfm = allocate_transform(layout, limit_bytes)?;

    let indices = layout.indices();
    let mut total = Array1::<f64>::zeros(layout.elements());

    for j in 0..WIDTH {
        let values = fs.over(j, &indices);
        total += &tsfm.dot(&values);
        roll_rows_down(&mut tsfm);
    }

    Ok(total.to_vec())
}

/// Allocate the shifted identity, failing with a typed error instead of
/// aborting when the matrix cannot fit
fn allocate_transform(layout: &Layout, limit_bytes: u64) -> Result<Array2<f64>> {
    let requested = matrix_bytes(layout);
    let oom = || InterleaveError::InsufficientMemory {
        requested_bytes: requested,
        limit_bytes,
    };

    let bytes = match requested {
        Some(b) if b <= limit_bytes => b,
        _ => return Err(oom()),
    };
    let len = usize::try_from(bytes / std::mem::size_of::<f64>() as u64).map_err(|_| oom())?;

    let mut storage: Vec<f64> = Vec::new();
    storage.try_reserve_exact(len).map_err(|_| oom())?;
    storage.resize(len, 0.0);

    let rows = layout.elements();
    let cols = layout.quarter();
    let mut tsfm = Array2::from_shape_vec((rows, cols), storage)?;
    for i in 0..cols {
        tsfm[[WIDTH * i, i]] = 1.0;
    }

    log::debug!("Allocated {}x{} transformation matrix ({} bytes)", rows, cols, bytes);
    Ok(tsfm)
}

/// Shift every row down by one, wrapping the last row to the top
fn roll_rows_down(m: &mut Array2<f64>) {
    let cols = m.ncols();
    if let Some(data) = m.as_slice_mut() {
        data.rotate_right(cols);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::baseline::baseline;

    #[test]
    fn test_matches_baseline_small() {
        let fs = FunctionSet::standard();
        let layout = Layout::new(64).unwrap();
        let got = transform_matrix(&fs, &layout, 1 << 20).unwrap();
        assert_eq!(got, baseline(&fs, &layout));
    }

    #[test]
    fn test_full_size_reports_insufficient_memory() {
        let fs = FunctionSet::standard();
        let layout = Layout::new(10_000_000).unwrap();
        let err = transform_matrix(&fs, &layout, 1 << 30).unwrap_err();
        match err {
            InterleaveError::InsufficientMemory {
                requested_bytes,
                limit_bytes,
            } => {
                assert_eq!(requested_bytes, Some(200_000_000_000_000));
                assert_eq!(limit_bytes, 1 << 30);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_overflowing_size_reports_none() {
        let layout = Layout::new(usize::MAX - usize::MAX % 4).unwrap();
        assert_eq!(matrix_bytes(&layout), None);
        let err = transform_matrix(&FunctionSet::linear(), &layout, u64::MAX).unwrap_err();
        assert!(matches!(
            err,
            InterleaveError::InsufficientMemory {
                requested_bytes: None,
                ..
            }
        ));
    }

    #[test]
    fn test_roll_rows_down() {
        let mut m = Array2::from_shape_vec((3, 2), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        roll_rows_down(&mut m);
        assert_eq!(m.as_slice().unwrap(), &[5.0, 6.0, 1.0, 2.0, 3.0, 4.0]);
    }
}
