//! # lp-hessian
//!
//! Log-density value, gradient and Hessian for statistical models, in one
//! call.
//!
//! - [`AutodiffHessian`]: exact second derivatives by forward-over-reverse AD
//! - [`FiniteDiffHessian`]: central differences of exact gradients, for
//!   builds that select it (Cargo feature `finite-diff`) or for cross-checks
//! - [`LogProbObjective`]: adapts any [`LogDensityModel`] (with or without
//!   the Jacobian adjustment) to the engines
//!
//! ```
//! use lp_core::{LogDensityModel, Result, Scalar};
//! use lp_hessian::compute_hessian;
//! use std::io::Write;
//!
//! struct Poly;
//!
//! impl LogDensityModel for Poly {
//!     fn dim(&self) -> usize {
//!         2
//!     }
//!
//!     fn log_prob<S: Scalar, const JACOBIAN: bool>(
//!         &mut self,
//!         p: &[S],
//!         _diagnostics: Option<&mut dyn Write>,
//!     ) -> Result<S> {
//!         self.check_dim(p.len())?;
//!         Ok(p[0] * p[0] + S::from_f64(3.0) * p[0] * p[1] + p[1] * p[1])
//!     }
//! }
//!
//! let r = compute_hessian(&mut Poly, &[1.0, 2.0], false)?;
//! assert_eq!(r.log_prob, 11.0);
//! assert_eq!(r.grad_log_prob, vec![8.0, 7.0]);
//! # Ok::<(), lp_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Model-level entry points.
pub mod api;
/// Exact forward-over-reverse engine and Hessian-vector products.
pub mod autodiff;
/// Engine strategy trait and build-time selection.
pub mod engine;
/// Finite-difference engine and its configuration.
pub mod finite_diff;
/// Reverse-mode gradient driver.
pub mod gradient;
/// Objective trait and the log-density adapter.
pub mod objective;

pub use api::{compute_hessian, compute_hessian_with, compute_hessian_with_diagnostics, log_prob, log_prob_grad};
pub use autodiff::{AutodiffHessian, hessian_vector_product};
pub use engine::{ACTIVE_ENGINE, DefaultEngine, EngineKind, HessianEngine};
pub use finite_diff::{FiniteDiffConfig, FiniteDiffHessian, StepSize};
pub use gradient::gradient;
pub use objective::{LogProbObjective, Objective};

pub use lp_core::{Error, HessianResult, LogDensityModel, Result};
