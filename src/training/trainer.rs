use std::num::NonZeroUsize;

use log::{debug, info};

use super::{Gradient, Reporter, gradient, loss};
use crate::{Dataset, Result, arch::Neuron, arch::loss::LossFn, optimization::Optimizer};

/// A model `Trainer`. Contains the relevant components needed for training a neuron by
/// finite-difference gradient descent over a fixed amount of epochs.
pub struct Trainer<O, L, R>
where
    O: Optimizer,
    L: LossFn,
    R: Reporter,
{
    optimizer: O,
    loss_fn: L,
    reporter: R,

    epochs: NonZeroUsize,
    eps: f64,
    report_every: Option<NonZeroUsize>,
}

impl<O, L, R> Trainer<O, L, R>
where
    O: Optimizer,
    L: LossFn,
    R: Reporter,
{
    /// Returns a new `Trainer`.
    ///
    /// # Arguments
    /// * `optimizer` - Dictates how the parameters are updated from each gradient.
    /// * `loss_fn` - The per example loss function.
    /// * `reporter` - Receives the periodic reports.
    /// * `epochs` - The amount of updates `train` performs.
    /// * `eps` - The finite-difference perturbation.
    pub fn new(optimizer: O, loss_fn: L, reporter: R, epochs: NonZeroUsize, eps: f64) -> Self {
        Self {
            optimizer,
            loss_fn,
            reporter,
            epochs,
            eps,
            report_every: None,
        }
    }

    /// Sets the cadence, in epochs, at which the reporter is called.
    pub fn report_every(mut self, epochs: Option<NonZeroUsize>) -> Self {
        self.report_every = epochs;
        self
    }

    pub fn epochs(&self) -> NonZeroUsize {
        self.epochs
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Trains `neuron` over `dataset`.
    ///
    /// Every epoch first computes the whole gradient from the current parameters and only
    /// then applies it, weights and biases alike.
    ///
    /// # Returns
    /// The loss at the start of each epoch, or the first error encountered.
    pub fn train(&mut self, neuron: &mut Neuron, dataset: &Dataset) -> Result<Vec<f64>> {
        let epochs = self.epochs.get();
        let mut losses = Vec::with_capacity(epochs);

        info!(
            "training for {epochs} epochs over {} examples, eps={}",
            dataset.len(),
            self.eps
        );

        for epoch in 1..=epochs {
            let Gradient {
                weights: dw,
                biases: db,
                loss,
            } = gradient(
                neuron.weights(),
                neuron.biases(),
                dataset,
                self.eps,
                &self.loss_fn,
            )?;

            let (weights, biases) = neuron.params_mut();
            self.optimizer.update_params(weights, dw)?;
            self.optimizer.update_params(biases, db)?;
            losses.push(loss);

            if self.report_every.is_some_and(|n| epoch % n.get() == 0) {
                self.report(epoch, neuron, dataset)?;
            }
        }

        info!("training finished, loss={}", self.loss(neuron, dataset)?);
        Ok(losses)
    }

    /// Computes the loss of `neuron` over `dataset` with this trainer's loss function.
    pub fn loss(&self, neuron: &Neuron, dataset: &Dataset) -> Result<f64> {
        loss(neuron.weights(), neuron.biases(), dataset, &self.loss_fn)
    }

    fn report(&mut self, epoch: usize, neuron: &Neuron, dataset: &Dataset) -> Result<()> {
        let loss = self.loss(neuron, dataset)?;
        debug!(epoch = epoch, loss = loss; "epoch finished");
        self.reporter.report(epoch, neuron, dataset, loss)
    }
}
