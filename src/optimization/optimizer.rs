use crate::{Matrix, Result};

pub trait Optimizer {
    fn update_params(&mut self, params: &mut Matrix, grad: Matrix) -> Result<()>;
}
