pub mod loss;
mod neuron;
mod sigmoid;

pub use neuron::{Neuron, evaluate};
pub use sigmoid::Sigmoid;
