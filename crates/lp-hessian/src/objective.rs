//! Scalar objectives and the log-density adapter.
//!
//! The engines differentiate anything implementing [`Objective`]: a function
//! `R^n -> R` that can be evaluated at every [`Scalar`] type. A model is
//! turned into one with [`LogProbObjective`], which fixes the Jacobian flag
//! (and an optional diagnostic sink) at construction.

use lp_ad::Scalar;
use lp_core::{LogDensityModel, Result};
use std::io::Write;

/// A scalar function of a parameter vector, evaluable at any [`Scalar`].
pub trait Objective {
    /// Expected input length, when the objective knows it.
    fn dim(&self) -> Option<usize> {
        None
    }

    /// Evaluate at `x`.
    fn eval<S: Scalar>(&mut self, x: &[S]) -> Result<S>;
}

/// A model's log-density with the Jacobian adjustment decided up front.
///
/// Errors raised by the model are returned untouched, and the diagnostic
/// sink is handed to the model as-is on every evaluation.
pub struct LogProbObjective<'a, M: LogDensityModel> {
    model: &'a mut M,
    jacobian: bool,
    diagnostics: Option<&'a mut dyn Write>,
}

impl<'a, M: LogDensityModel> LogProbObjective<'a, M> {
    /// Wrap `model`; `jacobian` selects the adjusted or raw log-density.
    pub fn new(model: &'a mut M, jacobian: bool) -> Self {
        Self { model, jacobian, diagnostics: None }
    }

    /// Like [`new`](Self::new), forwarding model output to `sink`.
    pub fn with_diagnostics(model: &'a mut M, jacobian: bool, sink: &'a mut dyn Write) -> Self {
        Self { model, jacobian, diagnostics: Some(sink) }
    }

    /// Whether the Jacobian adjustment is included.
    pub fn jacobian(&self) -> bool {
        self.jacobian
    }
}

impl<M: LogDensityModel> Objective for LogProbObjective<'_, M> {
    fn dim(&self) -> Option<usize> {
        Some(self.model.dim())
    }

    fn eval<S: Scalar>(&mut self, x: &[S]) -> Result<S> {
        let sink = match self.diagnostics.as_mut() {
            Some(w) => Some(&mut **w as &mut dyn Write),
            None => None,
        };
        if self.jacobian {
            self.model.log_prob::<S, true>(x, sink)
        } else {
            self.model.log_prob::<S, false>(x, sink)
        }
    }
}
