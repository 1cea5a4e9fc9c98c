use crate::{Matrix, Result};

pub trait LossFn {
    /// Computes the loss of a single example.
    ///
    /// # Arguments
    /// * `y_pred` - The model's output column.
    /// * `y` - The expected output, one value per row of `y_pred`.
    fn loss(&self, y_pred: &Matrix, y: &[f64]) -> Result<f64>;
}
