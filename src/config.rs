use std::num::NonZeroUsize;

use serde::Deserialize;

use crate::{Dataset, MlErr, Result};

/// An inline dataset: two flat row-major buffers plus the width of each example.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasetConfig {
    pub inputs: Vec<f64>,
    pub outputs: Vec<f64>,
    pub input_size: usize,
    pub output_size: usize,
}

impl DatasetConfig {
    /// Builds the `Dataset`, the amount of examples is derived from `inputs`.
    pub fn build(&self) -> Result<Dataset> {
        if self.input_size == 0 {
            return Err(MlErr::InvalidConfig("input_size must be at least 1".into()));
        }

        Dataset::new(
            self.inputs.clone(),
            self.outputs.clone(),
            self.inputs.len() / self.input_size,
            self.input_size,
            self.output_size,
        )
    }
}

impl Default for DatasetConfig {
    /// The logical OR gate.
    fn default() -> Self {
        Self {
            inputs: vec![
                0., 0., //
                0., 1., //
                1., 0., //
                1., 1., //
            ],
            outputs: vec![0., 1., 1., 1.],
            input_size: 2,
            output_size: 1,
        }
    }
}

/// The settings of a training session, fixed once it starts.
///
/// Missing keys take their value from `TrainingConfig::default`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub epochs: NonZeroUsize,
    pub eps: f64,
    pub learning_rate: f64,
    pub report_every: Option<NonZeroUsize>,
    pub seed: Option<u64>,
    pub clock_seed_fallback: bool,
    pub dataset: DatasetConfig,
}

impl TrainingConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| MlErr::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the hyper-parameters and the dataset are usable.
    pub fn validate(&self) -> Result<()> {
        if !self.eps.is_finite() || self.eps <= 0. {
            return Err(MlErr::InvalidConfig(format!(
                "eps must be a finite positive number, got {}",
                self.eps
            )));
        }

        if !self.learning_rate.is_finite() || self.learning_rate <= 0. {
            return Err(MlErr::InvalidConfig(format!(
                "learning_rate must be a finite positive number, got {}",
                self.learning_rate
            )));
        }

        self.dataset
            .build()
            .map_err(|e| MlErr::InvalidConfig(format!("dataset: {e}")))?;

        Ok(())
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: NonZeroUsize::new(50_000).unwrap_or(NonZeroUsize::MIN),
            eps: 1.0,
            learning_rate: 1.0,
            report_every: None,
            seed: None,
            clock_seed_fallback: false,
            dataset: DatasetConfig::default(),
        }
    }
}
