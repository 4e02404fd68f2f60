//! Fixed-function kernels (compiled-acceleration demo)
//!
//! The four functions are hard-wired to sin(πx), cos(πx), their sum and
//! their product, so the compiler sees one monomorphic loop: no boxed
//! function calls, sin/cos computed once per index and reused for the sum
//! and product lanes. These are deliberately not parameterised by a
//! `FunctionSet`.

use crate::functions::{cos_pi, sin_pi, WIDTH};
use crate::layout::Layout;
use rayon::prelude::*;

/// Minimum rows per rayon task; smaller splits cost more than they save
const PAR_MIN_ROWS: usize = 4096;

/// One output row: `[f0(x), f1(x), f2(x), f3(x)]`
#[inline(always)]
fn row(x: f64) -> [f64; WIDTH] {
    let s = sin_pi(x);
    let c = cos_pi(x);
    [s, c, s + c, s * c]
}

/// Single-threaded fused loop, output written without a zeroing pass
pub fn fused_loop(layout: &Layout) -> Vec<f64> {
    let n = layout.elements();
    let mut out: Vec<f64> = Vec::with_capacity(n);

    unsafe {
        let op = out.as_mut_ptr();
        for i in 0..layout.quarter() {
            let r = row(i as f64);
            std::ptr::copy_nonoverlapping(r.as_ptr(), op.add(WIDTH * i), WIDTH);
        }
        // Every slot in 0..n was written above
        out.set_len(n);
    }

    out
}

/// Same kernel, rows filled in parallel on the rayon pool
pub fn parallel_fill(layout: &Layout) -> Vec<f64> {
    let mut out = vec![0.0; layout.elements()];

    out.par_chunks_mut(WIDTH)
        .enumerate()
        .with_min_len(PAR_MIN_ROWS)
        .for_each(|(i, chunk)| chunk.copy_from_slice(&row(i as f64)));

    out
}
