use crate::Matrix;

/// The logistic sigmoid, squashes any real value into `(0, 1)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sigmoid;

impl Sigmoid {
    pub fn f(&self, z: f64) -> f64 {
        1. / (1. + (-z).exp())
    }

    /// Applies the sigmoid to every cell of `z`.
    pub fn activate(&self, z: &mut Matrix) {
        z.map_inplace(|z| self.f(z));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        let s = Sigmoid;

        assert_eq!(s.f(0.), 0.5);
        assert!((s.f(2.) - 0.880_797_077_977_882_3).abs() < 1e-12);
        assert!((s.f(-2.) + s.f(2.) - 1.).abs() < 1e-12);
    }

    #[test]
    fn stays_in_open_unit_interval() {
        let s = Sigmoid;
        for z in [-30., -1., 0., 1., 30.] {
            let a = s.f(z);
            assert!(a > 0. && a < 1., "sigmoid({z}) = {a}");
        }
    }
}
