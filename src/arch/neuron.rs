use super::Sigmoid;
use crate::{Matrix, MlErr, Result, matrix::SeedSource};

/// Evaluates a single affine + sigmoid layer: `sigmoid(weights · input + biases)`.
///
/// # Arguments
/// * `weights` - An `O x I` matrix.
/// * `biases` - An `O x 1` matrix.
/// * `input` - An `I x 1` column.
///
/// # Returns
/// A new `O x 1` column or `MlErr::ShapeMismatch` if the shapes don't line up.
pub fn evaluate(weights: &Matrix, biases: &Matrix, input: &Matrix) -> Result<Matrix> {
    let mut z = weights.dot(input)?;
    z.add(biases)?;
    Sigmoid.activate(&mut z);
    Ok(z)
}

/// The parameters of a single layer model.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    weights: Matrix,
    biases: Matrix,
}

impl Neuron {
    /// Creates a new `Neuron`.
    ///
    /// # Arguments
    /// * `weights` - An `O x I` matrix.
    /// * `biases` - An `O x 1` matrix.
    ///
    /// # Returns
    /// The neuron or `MlErr::ShapeMismatch` if `biases` isn't an `O x 1` column.
    pub fn new(weights: Matrix, biases: Matrix) -> Result<Self> {
        if biases.shape() != (weights.rows(), 1) {
            return Err(MlErr::ShapeMismatch {
                op: "neuron parameters",
                lhs: weights.shape(),
                rhs: biases.shape(),
            });
        }

        Ok(Self { weights, biases })
    }

    /// Creates a new `Neuron` with every parameter drawn uniformly from `[0, 1)`.
    pub fn random<S>(input_size: usize, output_size: usize, seeds: &mut S) -> Result<Self>
    where
        S: SeedSource + ?Sized,
    {
        let weights = Matrix::random(output_size, input_size, seeds)?;
        let biases = Matrix::random(output_size, 1, seeds)?;
        Self::new(weights, biases)
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &Matrix {
        &self.biases
    }

    /// Gives mutable access to both the weights and the biases at once.
    pub fn params_mut(&mut self) -> (&mut Matrix, &mut Matrix) {
        (&mut self.weights, &mut self.biases)
    }

    pub fn input_size(&self) -> usize {
        self.weights.cols()
    }

    pub fn output_size(&self) -> usize {
        self.weights.rows()
    }

    /// Evaluates the neuron on an `I x 1` input column.
    pub fn evaluate(&self, input: &Matrix) -> Result<Matrix> {
        evaluate(&self.weights, &self.biases, input)
    }

    /// Evaluates the neuron on a flat input of `I` values.
    pub fn predict(&self, x: &[f64]) -> Result<Matrix> {
        let input = Matrix::from_row_major(self.input_size(), 1, x)?;
        self.evaluate(&input)
    }
}
