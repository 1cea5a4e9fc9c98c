use std::{env, fs};

use anyhow::Context;
use log::info;
use numgrad::{
    arch::Neuron,
    config::TrainingConfig,
    training::{StdoutReporter, TrainerBuilder, listing},
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // An optional JSON config path, the OR gate session otherwise.
    let config = match env::args().nth(1) {
        Some(path) => {
            let raw =
                fs::read_to_string(&path).with_context(|| format!("reading config {path}"))?;
            TrainingConfig::from_json(&raw).with_context(|| format!("parsing config {path}"))?
        }
        None => TrainingConfig::default(),
    };

    let dataset = config.dataset.build()?;
    let builder = TrainerBuilder::new();
    let mut seeds = builder.seed_source(&config);
    let mut neuron = Neuron::random(dataset.x_size(), dataset.y_size(), seeds.as_mut())?;
    let mut trainer = builder.build(&config, StdoutReporter)?;

    let losses = trainer.train(&mut neuron, &dataset)?;
    info!(
        "loss went from {} to {}",
        losses.first().copied().unwrap_or_default(),
        trainer.loss(&neuron, &dataset)?
    );

    print!("{}", listing(&neuron, &dataset)?);
    println!("weights {}", neuron.weights());
    println!("biases {}", neuron.biases());

    Ok(())
}
