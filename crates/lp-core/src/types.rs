//! Common data types for lp-hessian

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Log-density value, gradient and Hessian at one point.
///
/// Field names match the boundary names used by callers
/// (`log_prob`, `grad_log_prob`, `hessian`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HessianResult {
    /// Log-density at the evaluation point
    pub log_prob: f64,

    /// Gradient of the log-density (length N)
    pub grad_log_prob: Vec<f64>,

    /// Hessian of the log-density (N×N)
    pub hessian: DMatrix<f64>,
}

impl HessianResult {
    /// Bundle value, gradient and Hessian exactly as an engine produced them.
    pub fn new(log_prob: f64, grad_log_prob: Vec<f64>, hessian: DMatrix<f64>) -> Self {
        Self { log_prob, grad_log_prob, hessian }
    }

    /// Number of parameters.
    pub fn dim(&self) -> usize {
        self.grad_log_prob.len()
    }

    /// Largest `|H[i,j] - H[j,i]|`.
    pub fn max_asymmetry(&self) -> f64 {
        let n = self.hessian.nrows().min(self.hessian.ncols());
        let mut worst = 0.0_f64;
        for i in 0..n {
            for j in (i + 1)..n {
                worst = worst.max((self.hessian[(i, j)] - self.hessian[(j, i)]).abs());
            }
        }
        worst
    }

    /// Whether the Hessian is square and symmetric within `tol`.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        self.hessian.is_square() && self.max_asymmetry() <= tol
    }

    /// Hessian as row vectors.
    pub fn hessian_rows(&self) -> Vec<Vec<f64>> {
        self.hessian.row_iter().map(|r| r.iter().copied().collect()).collect()
    }
}
