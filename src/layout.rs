//! Buffer geometry: total elements and the per-function quarter

use crate::error::{InterleaveError, Result};
use crate::functions::WIDTH;
use ndarray::Array1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    elements: usize,
}

impl Layout {
    /// `elements` must be a multiple of 4
    pub fn new(elements: usize) -> Result<Self> {
        if elements % WIDTH != 0 {
            return Err(InterleaveError::UnevenElementCount(elements));
        }
        Ok(Layout { elements })
    }

    pub fn elements(&self) -> usize {
        self.elements
    }

    /// Number of indices each function is evaluated at
    pub fn quarter(&self) -> usize {
        self.elements / WIDTH
    }

    /// `[0, 1, ..., quarter - 1]` as f64
    pub fn indices(&self) -> Array1<f64> {
        Array1::from_iter((0..self.quarter()).map(|i| i as f64))
    }
}
