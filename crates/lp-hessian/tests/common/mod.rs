//! Small models shared by the integration tests.

#![allow(dead_code)]

use lp_core::{Error, LogDensityModel, Result, Scalar};
use std::io::Write;

/// `f(x) = xᵀ A x` for a symmetric `A` (row-major).
pub struct QuadraticForm {
    pub n: usize,
    pub a: Vec<f64>,
}

impl QuadraticForm {
    pub fn new(n: usize, a: Vec<f64>) -> Self {
        assert_eq!(a.len(), n * n);
        Self { n, a }
    }
}

impl LogDensityModel for QuadraticForm {
    fn dim(&self) -> usize {
        self.n
    }

    fn log_prob<S: Scalar, const JACOBIAN: bool>(
        &mut self,
        p: &[S],
        _diagnostics: Option<&mut dyn Write>,
    ) -> Result<S> {
        self.check_dim(p.len())?;
        let mut acc = S::from_f64(0.0);
        for i in 0..self.n {
            for j in 0..self.n {
                acc = acc + S::from_f64(self.a[i * self.n + j]) * p[i] * p[j];
            }
        }
        Ok(acc)
    }
}

/// `f(x1, x2) = x1² + 3 x1 x2 + x2²`.
pub struct Poly;

impl LogDensityModel for Poly {
    fn dim(&self) -> usize {
        2
    }

    fn log_prob<S: Scalar, const JACOBIAN: bool>(
        &mut self,
        p: &[S],
        _diagnostics: Option<&mut dyn Write>,
    ) -> Result<S> {
        self.check_dim(p.len())?;
        Ok(p[0] * p[0] + S::from_f64(3.0) * p[0] * p[1] + p[1] * p[1])
    }
}

/// Beta(a, b) prior on `theta = logistic(z)`.
///
/// Raw log-density: `(a-1) ln θ + (b-1) ln(1-θ)`.
/// Jacobian term: `ln θ + ln(1-θ)`, with derivative `1 - 2θ` and second
/// derivative `-2 θ (1-θ)`.
pub struct LogitBeta {
    pub a: f64,
    pub b: f64,
}

impl LogDensityModel for LogitBeta {
    fn dim(&self) -> usize {
        1
    }

    fn log_prob<S: Scalar, const JACOBIAN: bool>(
        &mut self,
        p: &[S],
        _diagnostics: Option<&mut dyn Write>,
    ) -> Result<S> {
        self.check_dim(p.len())?;
        let one = S::from_f64(1.0);
        let theta = one / (one + (-p[0]).exp());
        let ln_theta = theta.ln();
        let ln_1m_theta = (one - theta).ln();
        let lp = S::from_f64(self.a - 1.0) * ln_theta + S::from_f64(self.b - 1.0) * ln_1m_theta;
        Ok(if JACOBIAN { lp + ln_theta + ln_1m_theta } else { lp })
    }
}

pub fn logistic(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Independent log-normal(0, 1) densities on positive parameters, evaluated
/// directly on the constrained scale.
pub struct LogNormalPositive {
    pub n: usize,
}

impl LogDensityModel for LogNormalPositive {
    fn dim(&self) -> usize {
        self.n
    }

    fn log_prob<S: Scalar, const JACOBIAN: bool>(
        &mut self,
        p: &[S],
        _diagnostics: Option<&mut dyn Write>,
    ) -> Result<S> {
        self.check_dim(p.len())?;
        let mut acc = S::from_f64(0.0);
        for (i, &x) in p.iter().enumerate() {
            if !(x.value() > 0.0) {
                return Err(Error::Evaluation(format!(
                    "lognormal: parameter {i} must be positive, got {}",
                    x.value()
                )));
            }
            let lx = x.ln();
            acc = acc - S::from_f64(0.5) * lx * lx - lx;
        }
        Ok(acc)
    }
}

/// Gaussian location model that reports every evaluation to its sink.
pub struct ChattyNormal {
    pub y: Vec<f64>,
    pub evals: usize,
}

impl LogDensityModel for ChattyNormal {
    fn dim(&self) -> usize {
        1
    }

    fn log_prob<S: Scalar, const JACOBIAN: bool>(
        &mut self,
        p: &[S],
        diagnostics: Option<&mut dyn Write>,
    ) -> Result<S> {
        self.check_dim(p.len())?;
        self.evals += 1;
        if let Some(out) = diagnostics {
            writeln!(out, "mu = {:.3}", p[0].value())?;
        }
        let mu = p[0];
        Ok(self
            .y
            .iter()
            .map(|&yi| {
                let d = S::from_f64(yi) - mu;
                S::from_f64(-0.5) * d * d
            })
            .sum())
    }
}
