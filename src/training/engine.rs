use crate::{
    Dataset, Matrix, MlErr, Result,
    arch::{evaluate, loss::LossFn},
};

/// The finite-difference gradient of the loss with respect to a neuron's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub weights: Matrix,
    pub biases: Matrix,
    /// The loss at the parameters the gradient was computed at.
    pub loss: f64,
}

/// Computes the loss of the model given by `weights` and `biases` over `dataset`.
///
/// Each example's loss is normalized by `loss_fn` on its own, while the examples are summed
/// up rather than averaged.
///
/// # Returns
/// The accumulated loss or an error if the parameters don't fit the dataset.
pub fn loss<L>(weights: &Matrix, biases: &Matrix, dataset: &Dataset, loss_fn: &L) -> Result<f64>
where
    L: LossFn,
{
    let mut input = Matrix::new(dataset.x_size(), 1)?;
    let mut total = 0.0;

    for (x, y) in dataset.examples() {
        input.assign(x)?;
        let y_pred = evaluate(weights, biases, &input)?;
        total += loss_fn.loss(&y_pred, y)?;
    }

    Ok(total)
}

/// Estimates the gradient of `loss` with respect to every weight and bias using forward
/// finite differences: `(loss(p + eps) - loss(p)) / eps`.
///
/// Every partial derivative perturbs a single cell of a fresh copy of its parameter matrix,
/// `weights` and `biases` themselves are never modified.
///
/// # Arguments
/// * `eps` - The perturbation, a finite positive number.
///
/// # Returns
/// The gradient together with the loss at `(weights, biases)`, or an error if `eps` is not
/// valid or the parameters don't fit the dataset.
pub fn gradient<L>(
    weights: &Matrix,
    biases: &Matrix,
    dataset: &Dataset,
    eps: f64,
    loss_fn: &L,
) -> Result<Gradient>
where
    L: LossFn,
{
    if !eps.is_finite() || eps <= 0.0 {
        return Err(MlErr::InvalidInput("eps must be a finite positive number"));
    }

    let base = loss(weights, biases, dataset, loss_fn)?;

    let dw = partials(weights, eps, base, |w| loss(w, biases, dataset, loss_fn))?;
    let db = partials(biases, eps, base, |b| loss(weights, b, dataset, loss_fn))?;

    Ok(Gradient {
        weights: dw,
        biases: db,
        loss: base,
    })
}

fn partials<F>(params: &Matrix, eps: f64, base: f64, mut loss_at: F) -> Result<Matrix>
where
    F: FnMut(&Matrix) -> Result<f64>,
{
    let (rows, cols) = params.shape();
    let mut grad = Matrix::new(rows, cols)?;

    for i in 1..=rows {
        for j in 1..=cols {
            let mut perturbed = params.clone();
            *perturbed.at_mut(i, j)? += eps;
            *grad.at_mut(i, j)? = (loss_at(&perturbed)? - base) / eps;
        }
    }

    Ok(grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::{Sigmoid, loss::Mse};

    fn m(rows: usize, cols: usize, values: &[f64]) -> Matrix {
        Matrix::from_row_major(rows, cols, values).unwrap()
    }

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

    /// d(loss)/d(params) computed by hand for `sigmoid(Wx + b)` under `Mse`.
    fn analytic_gradient(
        weights: &Matrix,
        biases: &Matrix,
        dataset: &Dataset,
    ) -> (Matrix, Matrix) {
        let (o, i) = weights.shape();
        let mut dw = Matrix::new(o, i).unwrap();
        let mut db = Matrix::new(o, 1).unwrap();

        for (x, y) in dataset.examples() {
            for r in 1..=o {
                let wx: f64 = (1..=i).map(|c| weights.at(r, c).unwrap() * x[c - 1]).sum();
                let a = Sigmoid.f(wx + biases.at(r, 1).unwrap());
                let delta = 2. / o as f64 * (a - y[r - 1]) * a * (1. - a);

                *db.at_mut(r, 1).unwrap() += delta;
                for c in 1..=i {
                    *dw.at_mut(r, c).unwrap() += delta * x[c - 1];
                }
            }
        }

        (dw, db)
    }

    #[test]
    fn loss_sums_per_example_means() {
        // zero parameters predict 0.5 everywhere
        let weights = Matrix::new(2, 1).unwrap();
        let biases = Matrix::new(2, 1).unwrap();
        let dataset = Dataset::new(vec![3., -1.], vec![1., 0.5, 0., 0.], 2, 1, 2).unwrap();

        let loss = loss(&weights, &biases, &dataset, &Mse).unwrap();

        // (0.25 + 0) / 2 + (0.25 + 0.25) / 2
        assert!((loss - 0.375).abs() < 1e-12, "{loss}");
    }

    #[test]
    fn loss_is_non_negative() {
        let dataset = or_gate();
        for (w, b) in [([0., 0.], 0.), ([5., -3.], 1.), ([-10., 10.], -4.)] {
            let loss = loss(&m(1, 2, &w), &m(1, 1, &[b]), &dataset, &Mse).unwrap();
            assert!(loss >= 0.);
        }
    }

    #[test]
    fn loss_of_empty_dataset_is_zero() {
        let dataset = Dataset::new(vec![], vec![], 0, 2, 1).unwrap();
        let loss = loss(&m(1, 2, &[1., 1.]), &m(1, 1, &[1.]), &dataset, &Mse).unwrap();
        assert_eq!(loss, 0.);
    }

    #[test]
    fn loss_rejects_parameters_not_fitting_the_dataset() {
        let dataset = or_gate();
        let wide = Matrix::new(1, 3).unwrap();
        let tall = Matrix::new(2, 1).unwrap();

        assert!(loss(&wide, &Matrix::new(1, 1).unwrap(), &dataset, &Mse).is_err());
        assert!(loss(&Matrix::new(1, 2).unwrap(), &tall, &dataset, &Mse).is_err());
    }

    #[test]
    fn gradient_matches_analytic_gradient() {
        let dataset = Dataset::new(
            vec![0.5, -0.2, 0.1, 0.3, -0.4, 0.8],
            vec![0.7, 0.2, 0.4, 0.9, 0.1, 0.6],
            3,
            2,
            2,
        )
        .unwrap();
        let weights = m(2, 2, &[0.1, -0.2, 0.05, 0.3]);
        let biases = m(2, 1, &[0.02, -0.1]);

        let grad = gradient(&weights, &biases, &dataset, 1e-4, &Mse).unwrap();
        let (dw, db) = analytic_gradient(&weights, &biases, &dataset);

        grad.weights
            .iter()
            .chain(grad.biases.iter())
            .zip(dw.iter().chain(db.iter()))
            .for_each(|(numeric, exact)| {
                assert!((numeric - exact).abs() < 1e-3, "{numeric} vs {exact}")
            });
    }

    #[test]
    fn gradient_reports_base_loss_and_keeps_params() {
        let dataset = or_gate();
        let weights = m(1, 2, &[0.3, 0.6]);
        let biases = m(1, 1, &[0.1]);
        let (w, b) = (weights.clone(), biases.clone());

        let grad = gradient(&weights, &biases, &dataset, 1.0, &Mse).unwrap();

        assert_eq!(grad.loss, loss(&weights, &biases, &dataset, &Mse).unwrap());
        assert_eq!(grad.weights.shape(), (1, 2));
        assert_eq!(grad.biases.shape(), (1, 1));
        assert_eq!((weights, biases), (w, b));
    }

    #[test]
    fn gradient_partials_are_isolated() {
        let dataset = or_gate();
        let weights = m(1, 2, &[0.3, 0.6]);
        let biases = m(1, 1, &[0.1]);
        let eps = 0.5;

        let grad = gradient(&weights, &biases, &dataset, eps, &Mse).unwrap();

        let base = loss(&weights, &biases, &dataset, &Mse).unwrap();
        let mut perturbed = weights.clone();
        *perturbed.at_mut(1, 2).unwrap() += eps;
        let shifted = loss(&perturbed, &biases, &dataset, &Mse).unwrap();
        assert_eq!(grad.weights.at(1, 2).unwrap(), (shifted - base) / eps);
    }

    #[test]
    fn gradient_rejects_invalid_eps() {
        let dataset = or_gate();
        let (w, b) = (Matrix::new(1, 2).unwrap(), Matrix::new(1, 1).unwrap());

        for eps in [0., -1., f64::NAN, f64::INFINITY] {
            assert!(matches!(
                gradient(&w, &b, &dataset, eps, &Mse),
                Err(MlErr::InvalidInput(_))
            ));
        }
    }
}
