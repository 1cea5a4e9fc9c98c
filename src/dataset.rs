use crate::{MlErr, Result};

/// A fixed collection of labeled examples.
///
/// Inputs and outputs are kept as two flat row-major buffers: example `i` owns
/// `inputs[i * x_size..(i + 1) * x_size]` and `outputs[i * y_size..(i + 1) * y_size]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x_size: usize,
    y_size: usize,
    len: usize,
    inputs: Vec<f64>,
    outputs: Vec<f64>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `inputs` - The flat input buffer, `len * x_size` values.
    /// * `outputs` - The flat label buffer, `len * y_size` values.
    /// * `len` - The amount of examples.
    /// * `x_size` - The width of each input.
    /// * `y_size` - The width of each label.
    ///
    /// # Returns
    /// The dataset or an error if a width is 0, `len` times a width overflows or a buffer
    /// doesn't match the given sizes.
    pub fn new(
        inputs: Vec<f64>,
        outputs: Vec<f64>,
        len: usize,
        x_size: usize,
        y_size: usize,
    ) -> Result<Self> {
        if x_size == 0 || y_size == 0 {
            return Err(MlErr::InvalidInput("dataset widths must be at least 1"));
        }

        let (Some(x_len), Some(y_len)) = (len.checked_mul(x_size), len.checked_mul(y_size))
        else {
            return Err(MlErr::InvalidInput("dataset size overflows the address space"));
        };

        if inputs.len() != x_len {
            return Err(MlErr::SizeMismatch {
                a: "inputs",
                b: "len * x_size",
                got: inputs.len(),
                expected: x_len,
            });
        }

        if outputs.len() != y_len {
            return Err(MlErr::SizeMismatch {
                a: "outputs",
                b: "len * y_size",
                got: outputs.len(),
                expected: y_len,
            });
        }

        Ok(Self {
            x_size,
            y_size,
            len,
            inputs,
            outputs,
        })
    }

    /// Returns the amount of examples.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the width of each input.
    pub fn x_size(&self) -> usize {
        self.x_size
    }

    /// Returns the width of each label.
    pub fn y_size(&self) -> usize {
        self.y_size
    }

    /// Returns the `i`-th (0-based) input, if any.
    pub fn input(&self, i: usize) -> Option<&[f64]> {
        self.inputs.chunks_exact(self.x_size).nth(i)
    }

    /// Returns the `i`-th (0-based) label, if any.
    pub fn output(&self, i: usize) -> Option<&[f64]> {
        self.outputs.chunks_exact(self.y_size).nth(i)
    }

    /// Iterates over the `(input, label)` pairs in order.
    pub fn examples(&self) -> impl Iterator<Item = (&[f64], &[f64])> {
        self.inputs
            .chunks_exact(self.x_size)
            .zip(self.outputs.chunks_exact(self.y_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn or_gate() -> Dataset {
        Dataset::new(
            vec![0., 0., 0., 1., 1., 0., 1., 1.],
            vec![0., 1., 1., 1.],
            4,
            2,
            1,
        )
        .unwrap()
    }

    #[test]
    fn splits_buffers_per_example() {
        let dataset = or_gate();

        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.input(1), Some(&[0., 1.][..]));
        assert_eq!(dataset.output(0), Some(&[0.][..]));
        assert_eq!(dataset.input(4), None);

        let examples: Vec<_> = dataset.examples().collect();
        assert_eq!(examples.len(), 4);
        assert_eq!(examples[3], (&[1., 1.][..], &[1.][..]));
    }

    #[test]
    fn rejects_inconsistent_buffers() {
        assert!(matches!(
            Dataset::new(vec![0.; 7], vec![0.; 4], 4, 2, 1),
            Err(MlErr::SizeMismatch { a: "inputs", .. })
        ));
        assert!(matches!(
            Dataset::new(vec![0.; 8], vec![0.; 5], 4, 2, 1),
            Err(MlErr::SizeMismatch { a: "outputs", .. })
        ));
    }

    #[test]
    fn rejects_overflowing_sizes() {
        let len = usize::MAX / 2 + 1;

        assert!(matches!(
            Dataset::new(vec![], vec![], len, 2, 2),
            Err(MlErr::InvalidInput(_))
        ));
        assert!(matches!(
            Dataset::new(vec![], vec![], len, 1, 2),
            Err(MlErr::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_zero_widths() {
        assert!(Dataset::new(vec![], vec![0.; 4], 4, 0, 1).is_err());
        assert!(Dataset::new(vec![0.; 8], vec![], 4, 2, 0).is_err());
    }

    #[test]
    fn empty_dataset_is_allowed() {
        let dataset = Dataset::new(vec![], vec![], 0, 2, 1).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.examples().count(), 0);
    }
}
