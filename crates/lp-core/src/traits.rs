//! Core traits for lp-hessian
//!
//! [`LogDensityModel`] is the seam between the differentiation engines and
//! an arbitrary statistical model: the engines only ever see a log-density
//! evaluated at some [`Scalar`] type, never the model's internals.

use crate::{Error, Result};
use lp_ad::Scalar;
use std::io::Write;

/// A statistical model exposing its log-probability density over an
/// unconstrained parameter vector.
///
/// `log_prob` is written once, generically over the scalar type, and is
/// instantiated by the engines at `f64`, `Dual`, `Rev<f64>` and `Rev<Dual>`.
///
/// The evaluator takes `&mut self` so that a model may reuse internal scratch
/// buffers between evaluations. It must not change the log-density it
/// computes, and it never modifies `params`.
pub trait LogDensityModel {
    /// Number of unconstrained parameters.
    fn dim(&self) -> usize;

    /// Parameter names (defaults to `p0`, `p1`, ...).
    fn parameter_names(&self) -> Vec<String> {
        (0..self.dim()).map(|i| format!("p{i}")).collect()
    }

    /// Log-density at `params`.
    ///
    /// With `JACOBIAN = true` the log absolute determinant of the
    /// unconstrained-to-constrained transform is included; with `false` the
    /// raw log-density is returned. Informational text may be written to
    /// `diagnostics` when a sink is supplied.
    fn log_prob<S: Scalar, const JACOBIAN: bool>(
        &mut self,
        params: &[S],
        diagnostics: Option<&mut dyn Write>,
    ) -> Result<S>;

    /// Check that a parameter vector has the model's dimension.
    fn check_dim(&self, found: usize) -> Result<()> {
        let expected = self.dim();
        if found != expected {
            return Err(Error::DimensionMismatch { expected, found });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lp_ad::Dual;

    /// Exponential(1) prior on `theta = exp(z)`.
    struct ExpPrior;

    impl LogDensityModel for ExpPrior {
        fn dim(&self) -> usize {
            1
        }

        fn log_prob<S: Scalar, const JACOBIAN: bool>(
            &mut self,
            params: &[S],
            diagnostics: Option<&mut dyn Write>,
        ) -> Result<S> {
            self.check_dim(params.len())?;
            let z = params[0];
            if let Some(out) = diagnostics {
                writeln!(out, "z = {}", z.value())?;
            }
            let lp = -z.exp();
            Ok(if JACOBIAN { lp + z } else { lp })
        }
    }

    #[test]
    fn test_jacobian_flag_selects_overload() {
        let mut m = ExpPrior;
        let raw = m.log_prob::<f64, false>(&[0.5], None).unwrap();
        let adj = m.log_prob::<f64, true>(&[0.5], None).unwrap();
        assert_relative_eq!(raw, -0.5_f64.exp(), epsilon = 1e-12);
        assert_relative_eq!(adj - raw, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_generic_over_scalar() {
        let mut m = ExpPrior;
        let lp = m.log_prob::<Dual, true>(&[Dual::var(0.0)], None).unwrap();
        // d/dz (-exp(z) + z) = 1 - exp(z) = 0 at z = 0
        assert_relative_eq!(lp.val, -1.0, epsilon = 1e-12);
        assert_relative_eq!(lp.dot, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_check_dim_and_names() {
        let mut m = ExpPrior;
        assert_eq!(m.parameter_names(), vec!["p0".to_string()]);
        let err = m.log_prob::<f64, false>(&[0.0, 1.0], None).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { expected: 1, found: 2 }));
    }

    #[test]
    fn test_diagnostics_written_to_sink() {
        let mut m = ExpPrior;
        let mut buf: Vec<u8> = Vec::new();
        m.log_prob::<f64, false>(&[2.0], Some(&mut buf)).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "z = 2\n");
    }
}
