use super::{Reporter, Trainer};
use crate::{
    Result,
    arch::loss::Mse,
    config::TrainingConfig,
    matrix::{FixedSeed, OsEntropy, SeedSource},
    optimization::GradientDescent,
};

/// Builds `Trainer`s and seed sources given a `TrainingConfig`.
#[derive(Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `Trainer` following a config.
    ///
    /// # Arguments
    /// * `config` - The training session's config.
    /// * `reporter` - Receives the periodic reports.
    ///
    /// # Returns
    /// The trainer or `MlErr::InvalidConfig` if the config doesn't validate.
    pub fn build<R>(
        &self,
        config: &TrainingConfig,
        reporter: R,
    ) -> Result<Trainer<GradientDescent, Mse, R>>
    where
        R: Reporter,
    {
        config.validate()?;

        let optimizer = GradientDescent::new(config.learning_rate);
        let trainer = Trainer::new(optimizer, Mse::new(), reporter, config.epochs, config.eps)
            .report_every(config.report_every);

        Ok(trainer)
    }

    /// Returns where the initial parameters' seeds come from: a fixed sequence when the
    /// config sets a seed, the operating system's entropy otherwise.
    pub fn seed_source(&self, config: &TrainingConfig) -> Box<dyn SeedSource> {
        match config.seed {
            Some(seed) => Box::new(FixedSeed::new(seed)),
            None => Box::new(OsEntropy::new().clock_fallback(config.clock_seed_fallback)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MlErr, training::NoReporter};

    #[test]
    fn builds_from_config() {
        let config = TrainingConfig::from_json(r#"{ "epochs": 3, "eps": 0.5 }"#).unwrap();

        let trainer = TrainerBuilder::new().build(&config, NoReporter).unwrap();

        assert_eq!(trainer.epochs().get(), 3);
        assert_eq!(trainer.eps(), 0.5);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = TrainingConfig {
            learning_rate: f64::NAN,
            ..Default::default()
        };

        assert!(matches!(
            TrainerBuilder::new().build(&config, NoReporter),
            Err(MlErr::InvalidConfig(_))
        ));
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let config = TrainingConfig {
            seed: Some(9),
            ..Default::default()
        };
        let builder = TrainerBuilder::new();

        let a = builder.seed_source(&config).seed().unwrap();
        let b = builder.seed_source(&config).seed().unwrap();

        assert_eq!(a, b);
    }
}
