//! Model-level entry points.

use crate::engine::{DefaultEngine, HessianEngine};
use crate::gradient::gradient;
use crate::objective::{LogProbObjective, Objective};
use lp_core::{HessianResult, LogDensityModel, Result};
use std::io::Write;

/// Log-density, gradient and Hessian of `model` at `x`.
///
/// `jacobian` selects whether the transform's Jacobian adjustment is part of
/// the differentiated log-density. The engine is [`DefaultEngine`], chosen
/// when the crate is built (see [`ACTIVE_ENGINE`](crate::ACTIVE_ENGINE)).
/// The model validates the length of `x`.
pub fn compute_hessian<M: LogDensityModel>(
    model: &mut M,
    x: &[f64],
    jacobian: bool,
) -> Result<HessianResult> {
    compute_hessian_with(&DefaultEngine::default(), model, x, jacobian)
}

/// [`compute_hessian`], forwarding the model's informational output to `sink`.
pub fn compute_hessian_with_diagnostics<M: LogDensityModel>(
    model: &mut M,
    x: &[f64],
    jacobian: bool,
    sink: &mut dyn Write,
) -> Result<HessianResult> {
    let mut f = LogProbObjective::with_diagnostics(model, jacobian, sink);
    DefaultEngine::default().hessian(&mut f, x)
}

/// [`compute_hessian`] with an explicitly chosen engine.
pub fn compute_hessian_with<E: HessianEngine, M: LogDensityModel>(
    engine: &E,
    model: &mut M,
    x: &[f64],
    jacobian: bool,
) -> Result<HessianResult> {
    let mut f = LogProbObjective::new(model, jacobian);
    engine.hessian(&mut f, x)
}

/// Log-density of `model` at `x` (plain `f64` evaluation).
pub fn log_prob<M: LogDensityModel>(model: &mut M, x: &[f64], jacobian: bool) -> Result<f64> {
    LogProbObjective::new(model, jacobian).eval::<f64>(x)
}

/// Log-density and its gradient (one reverse-mode pass).
pub fn log_prob_grad<M: LogDensityModel>(
    model: &mut M,
    x: &[f64],
    jacobian: bool,
) -> Result<(f64, Vec<f64>)> {
    gradient(&mut LogProbObjective::new(model, jacobian), x)
}
