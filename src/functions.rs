//! The four sequence functions being interleaved

use ndarray::Array1;
use std::f64::consts::PI;
use std::fmt;

/// Number of functions interleaved per index
pub const WIDTH: usize = 4;

/// A unary numeric function evaluated at an index
pub type SeqFn = Box<dyn Fn(f64) -> f64 + Send + Sync>;

// ===========================================================================
// Standard set: sin(πx), cos(πx), their sum and their product
// ===========================================================================

#[inline(always)]
pub fn sin_pi(x: f64) -> f64 {
    (PI * x).sin()
}

#[inline(always)]
pub fn cos_pi(x: f64) -> f64 {
    (PI * x).cos()
}

#[inline(always)]
pub fn sin_plus_cos(x: f64) -> f64 {
    sin_pi(x) + cos_pi(x)
}

#[inline(always)]
pub fn sin_times_cos(x: f64) -> f64 {
    sin_pi(x) * cos_pi(x)
}

/// Four functions plus a label for log output
pub struct FunctionSet {
    name: String,
    fns: [SeqFn; WIDTH],
}

impl FunctionSet {
    pub fn new<F0, F1, F2, F3>(name: impl Into<String>, f0: F0, f1: F1, f2: F2, f3: F3) -> Self
    where
        F0: Fn(f64) -> f64 + Send + Sync + 'static,
        F1: Fn(f64) -> f64 + Send + Sync + 'static,
        F2: Fn(f64) -> f64 + Send + Sync + 'static,
        F3: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        FunctionSet {
            name: name.into(),
            fns: [Box::new(f0), Box::new(f1), Box::new(f2), Box::new(f3)],
        }
    }

    /// sin(πx), cos(πx), sin+cos, sin·cos
    pub fn standard() -> Self {
        FunctionSet::new("standard", sin_pi, cos_pi, sin_plus_cos, sin_times_cos)
    }

    /// 0·x, 1·x, 2·x, 3·x
    ///
    /// Values at index k are `[0, k, 2k, 3k]`, which makes misplaced
    /// elements easy to spot.
    pub fn linear() -> Self {
        FunctionSet::new(
            "linear",
            |x: f64| 0.0 * x,
            |x: f64| x,
            |x: f64| 2.0 * x,
            |x: f64| 3.0 * x,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate function `j` at a single index
    ///
    /// `j` must be below [`WIDTH`].
    #[inline]
    pub fn at(&self, j: usize, x: f64) -> f64 {
        debug_assert!(j < WIDTH, "function index {} out of range", j);
        (self.fns[j])(x)
    }

    /// Evaluate function `j` over a whole index vector (`j < WIDTH`)
    pub fn over(&self, j: usize, indices: &Array1<f64>) -> Array1<f64> {
        debug_assert!(j < WIDTH, "function index {} out of range", j);
        let f = &self.fns[j];
        indices.mapv(|x| f(x))
    }

    /// Evaluate all four functions over the same index vector
    pub fn over_all(&self, indices: &Array1<f64>) -> [Array1<f64>; WIDTH] {
        [
            self.over(0, indices),
            self.over(1, indices),
            self.over(2, indices),
            self.over(3, indices),
        ]
    }
}

impl fmt::Debug for FunctionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionSet").field("name", &self.name).finish()
    }
}
