mod builder;
mod engine;
mod reporter;
mod trainer;

pub use builder::TrainerBuilder;
pub use engine::{Gradient, gradient, loss};
pub use reporter::{NoReporter, Reporter, StdoutReporter, listing};
pub use trainer::Trainer;
