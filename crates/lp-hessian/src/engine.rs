//! Hessian engine strategy and build-time engine selection.
//!
//! Both engines take the same inputs and return the same [`HessianResult`]
//! shape. Which one [`compute_hessian`](crate::compute_hessian) uses is fixed
//! when the crate is built: the exact engine by default, the finite-difference
//! engine when the `finite-diff` Cargo feature is enabled. It is not a
//! per-call choice; callers that need a specific engine call it directly
//! through [`HessianEngine`].

use crate::objective::Objective;
use lp_core::{HessianResult, Result};
use serde::{Deserialize, Serialize};

pub use crate::autodiff::AutodiffHessian;
pub use crate::finite_diff::FiniteDiffHessian;

/// Computes value, gradient and Hessian of an objective at a point.
pub trait HessianEngine {
    /// Which strategy this is.
    fn kind(&self) -> EngineKind;

    /// Value, gradient and Hessian of `f` at `x`.
    ///
    /// Any evaluation error aborts the computation; no partial result is
    /// returned.
    fn hessian<F: Objective>(&self, f: &mut F, x: &[f64]) -> Result<HessianResult>;
}

/// Hessian strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Exact forward-over-reverse automatic differentiation.
    Autodiff,
    /// Central differences of exact gradients.
    FiniteDiff,
}

impl EngineKind {
    /// Short name for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::Autodiff => "autodiff",
            EngineKind::FiniteDiff => "finite_diff",
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Engine used by [`compute_hessian`](crate::compute_hessian) in this build.
#[cfg(not(feature = "finite-diff"))]
pub type DefaultEngine = AutodiffHessian;

/// Engine used by [`compute_hessian`](crate::compute_hessian) in this build.
#[cfg(feature = "finite-diff")]
pub type DefaultEngine = FiniteDiffHessian;

/// Strategy selected at build time.
pub const ACTIVE_ENGINE: EngineKind =
    if cfg!(feature = "finite-diff") { EngineKind::FiniteDiff } else { EngineKind::Autodiff };
