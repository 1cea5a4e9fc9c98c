use crate::{Dataset, Result, arch::Neuron};

/// Receives the progress of a training session at a configured cadence.
pub trait Reporter {
    /// Reports the state after `epoch` updates.
    ///
    /// # Arguments
    /// * `epoch` - The amount of epochs run so far.
    /// * `neuron` - The current parameters.
    /// * `dataset` - The dataset being trained on.
    /// * `loss` - The loss of `neuron` over `dataset`.
    fn report(
        &mut self,
        epoch: usize,
        neuron: &Neuron,
        dataset: &Dataset,
        loss: f64,
    ) -> Result<()>;
}

/// Discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoReporter;

impl Reporter for NoReporter {
    fn report(&mut self, _: usize, _: &Neuron, _: &Dataset, _: f64) -> Result<()> {
        Ok(())
    }
}

/// Prints the model's output for every example, followed by the loss and the epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn report(
        &mut self,
        epoch: usize,
        neuron: &Neuron,
        dataset: &Dataset,
        loss: f64,
    ) -> Result<()> {
        print!("{}", listing(neuron, dataset)?);
        println!("loss: {loss:.6}");
        println!("epoch: {epoch}");
        Ok(())
    }
}

/// Renders one `[ input ]    =>    [ output ]` line per example of `dataset`.
pub fn listing(neuron: &Neuron, dataset: &Dataset) -> Result<String> {
    dataset
        .examples()
        .map(|(x, _)| -> Result<String> {
            let y_pred = neuron.predict(x)?;
            Ok(format!(
                "[{} ]    =>    [{} ]\n",
                cells(x.iter()),
                cells(y_pred.iter())
            ))
        })
        .collect()
}

fn cells<'a>(values: impl Iterator<Item = &'a f64>) -> String {
    values.map(|v| format!(" {v:.6}")).collect()
}
