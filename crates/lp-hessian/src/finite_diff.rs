//! Finite-difference Hessians from exact gradients.
//!
//! Each gradient is one reverse-mode pass; the Hessian is assembled from
//! central differences of those gradients along every coordinate:
//!
//! `H[i][j] = H[j][i] = (g⁺_j[i] − g⁻_j[i]) / (4 h_j) + (g⁺_i[j] − g⁻_i[j]) / (4 h_i)`
//!
//! where `g±_k = ∇f(x ± h_k e_k)`. Averaging the two one-sided estimates of
//! each off-diagonal entry makes the result symmetric. Truncation error is
//! `O(h²)`.

use crate::engine::{EngineKind, HessianEngine};
use crate::gradient::gradient;
use crate::objective::Objective;
use lp_core::{Error, HessianResult, Result};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Relative disagreement between `∂g_i/∂x_j` and `∂g_j/∂x_i` above which a
/// warning is logged.
const ASYMMETRY_WARN_TOL: f64 = 1e-4;

/// Perturbation size per coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepSize {
    /// `h_i = cbrt(ε) * max(1, |x_i|)`: balances `O(h²)` truncation against
    /// `O(ε/h)` rounding for a central difference.
    #[default]
    Auto,
    /// The same `h` for every coordinate.
    Fixed(f64),
}

impl StepSize {
    /// Step for a coordinate currently at `xi`.
    pub fn for_coordinate(&self, xi: f64) -> f64 {
        match *self {
            StepSize::Auto => f64::EPSILON.cbrt() * xi.abs().max(1.0),
            StepSize::Fixed(h) => h,
        }
    }

    fn validate(&self) -> Result<()> {
        if let StepSize::Fixed(h) = *self {
            if !h.is_finite() || h <= 0.0 {
                return Err(Error::Validation(format!("step size must be finite and > 0, got {h}")));
            }
        }
        Ok(())
    }
}

/// Finite-difference engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FiniteDiffConfig {
    /// Step-size rule.
    #[serde(default)]
    pub step: StepSize,
}

/// Finite-difference Hessian engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct FiniteDiffHessian {
    config: FiniteDiffConfig,
}

impl FiniteDiffHessian {
    /// Create the engine with an explicit configuration.
    pub fn new(config: FiniteDiffConfig) -> Self {
        Self { config }
    }

    /// Engine with a fixed step `h` for every coordinate.
    pub fn with_step(h: f64) -> Self {
        Self::new(FiniteDiffConfig { step: StepSize::Fixed(h) })
    }

    /// Active configuration.
    pub fn config(&self) -> &FiniteDiffConfig {
        &self.config
    }
}

impl HessianEngine for FiniteDiffHessian {
    fn kind(&self) -> EngineKind {
        EngineKind::FiniteDiff
    }

    fn hessian<F: Objective>(&self, f: &mut F, x: &[f64]) -> Result<HessianResult> {
        self.config.step.validate()?;
        let n = x.len();
        let steps: Vec<f64> = x.iter().map(|&xi| self.config.step.for_coordinate(xi)).collect();
        if let Some(i) = steps.iter().position(|h| !h.is_finite()) {
            return Err(Error::Computation(format!(
                "no finite step for coordinate {i} (x[{i}] = {})",
                x[i]
            )));
        }
        log::debug!("finite-diff hessian: n = {n}, declared dim = {:?}, steps = {steps:?}", f.dim());

        let mut g_plus = Vec::with_capacity(n);
        let mut g_minus = Vec::with_capacity(n);
        let mut x_tmp = x.to_vec();
        for (i, &h) in steps.iter().enumerate() {
            x_tmp[i] = x[i] + h;
            g_plus.push(gradient(f, &x_tmp)?.1);
            x_tmp[i] = x[i] - h;
            g_minus.push(gradient(f, &x_tmp)?.1);
            x_tmp[i] = x[i];
        }

        let mut hessian = DMatrix::zeros(n, n);
        let mut worst_asymmetry = 0.0_f64;
        for i in 0..n {
            for j in i..n {
                // d g_i / d x_j and d g_j / d x_i
                let dij = (g_plus[j][i] - g_minus[j][i]) / (2.0 * steps[j]);
                let dji = (g_plus[i][j] - g_minus[i][j]) / (2.0 * steps[i]);
                let h = 0.5 * (dij + dji);
                hessian[(i, j)] = h;
                hessian[(j, i)] = h;
                worst_asymmetry = worst_asymmetry.max((dij - dji).abs() / (1.0 + h.abs()));
            }
        }
        if worst_asymmetry > ASYMMETRY_WARN_TOL {
            log::warn!(
                "finite-diff hessian: one-sided estimates disagree by {worst_asymmetry:.3e} (relative) before symmetrization"
            );
        }

        let (value, grad) = gradient(f, x)?;
        Ok(HessianResult::new(value, grad, hessian))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lp_ad::Scalar;

    /// f(x, y) = x^4 y + exp(0.5 x + 0.3 y)
    struct Smooth;

    impl Objective for Smooth {
        fn eval<S: Scalar>(&mut self, x: &[S]) -> Result<S> {
            let lin = S::from_f64(0.5) * x[0] + S::from_f64(0.3) * x[1];
            Ok(x[0].powi(4) * x[1] + lin.exp())
        }
    }

    #[test]
    fn test_auto_step_heuristic() {
        let h = StepSize::Auto;
        assert_relative_eq!(h.for_coordinate(0.0), f64::EPSILON.cbrt(), epsilon = 1e-20);
        assert_relative_eq!(h.for_coordinate(-100.0), 100.0 * f64::EPSILON.cbrt(), epsilon = 1e-18);
        assert_eq!(StepSize::Fixed(1e-3).for_coordinate(50.0), 1e-3);
    }

    #[test]
    fn test_close_to_analytic() {
        let (x, y) = (1.2, -0.4);
        let r = FiniteDiffHessian::default().hessian(&mut Smooth, &[x, y]).unwrap();
        let e = (0.5 * x + 0.3 * y).exp();
        assert_relative_eq!(r.hessian[(0, 0)], 12.0 * x * x * y + 0.25 * e, epsilon = 1e-6);
        assert_relative_eq!(r.hessian[(0, 1)], 4.0 * x.powi(3) + 0.15 * e, epsilon = 1e-6);
        assert_relative_eq!(r.hessian[(1, 1)], 0.09 * e, epsilon = 1e-6);
    }

    #[test]
    fn test_result_is_exactly_symmetric() {
        let r = FiniteDiffHessian::default().hessian(&mut Smooth, &[0.3, 2.0]).unwrap();
        assert_eq!(r.hessian[(0, 1)], r.hessian[(1, 0)]);
    }

    #[test]
    fn test_value_and_gradient_are_exact() {
        let (x, y) = (0.8, 1.5);
        let r = FiniteDiffHessian::default().hessian(&mut Smooth, &[x, y]).unwrap();
        let e = (0.5 * x + 0.3 * y).exp();
        assert_relative_eq!(r.log_prob, x.powi(4) * y + e, epsilon = 1e-12);
        assert_relative_eq!(r.grad_log_prob[0], 4.0 * x.powi(3) * y + 0.5 * e, epsilon = 1e-12);
        assert_relative_eq!(r.grad_log_prob[1], x.powi(4) + 0.3 * e, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_fixed_step() {
        for h in [0.0, -1e-3, f64::NAN, f64::INFINITY] {
            let err = FiniteDiffHessian::with_step(h).hessian(&mut Smooth, &[1.0, 1.0]).unwrap_err();
            assert!(matches!(err, Error::Validation(_)));
        }
    }

    #[test]
    fn test_infinite_coordinate_has_no_step() {
        let err = FiniteDiffHessian::default().hessian(&mut Smooth, &[f64::INFINITY, 1.0]).unwrap_err();
        assert!(matches!(err, Error::Computation(_)));
        assert!(err.to_string().contains("coordinate 0"));
    }

    #[test]
    fn test_config_serde_defaults() {
        let cfg: FiniteDiffConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.step, StepSize::Auto);
        let cfg: FiniteDiffConfig = serde_json::from_str(r#"{"step":{"fixed":0.001}}"#).unwrap();
        assert_eq!(cfg.step, StepSize::Fixed(0.001));
        assert_eq!(FiniteDiffHessian::new(cfg).config().step, StepSize::Fixed(0.001));
    }
}
