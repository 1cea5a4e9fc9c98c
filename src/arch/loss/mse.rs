use super::LossFn;
use crate::{Matrix, MlErr, Result};

/// Mean squared error loss function, averaged over the outputs of one example.
#[derive(Default, Clone, Copy, Debug)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn loss(&self, y_pred: &Matrix, y: &[f64]) -> Result<f64> {
        let (rows, cols) = y_pred.shape();
        if rows * cols != y.len() {
            return Err(MlErr::SizeMismatch {
                a: "prediction",
                b: "label",
                got: rows * cols,
                expected: y.len(),
            });
        }

        let squared: f64 = y_pred
            .iter()
            .zip(y)
            .map(|(pred, expected)| (pred - expected).powi(2))
            .sum();

        Ok(squared / y.len() as f64)
    }
}
