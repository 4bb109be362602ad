//! First-order reverse mode: value and gradient in one sweep.

use crate::objective::Objective;
use lp_ad::{Recording, Scalar};
use lp_core::Result;

/// Value and gradient of `f` at `x` via one reverse-mode pass.
///
/// The tape lives only for the duration of the call.
pub fn gradient<F: Objective>(f: &mut F, x: &[f64]) -> Result<(f64, Vec<f64>)> {
    let mut rec = Recording::<f64>::start();
    let xs = rec.inputs(x.iter().copied());
    let y = f.eval(&xs)?;
    rec.backward(y);
    let grad = xs.iter().map(|&xi| rec.adjoint(xi)).collect();
    Ok((y.value(), grad))
}
