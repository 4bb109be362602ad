//! # lp-ad
//!
//! Automatic differentiation (AD) primitives for lp-hessian.
//!
//! Provides:
//! - **Forward-mode AD** via [`dual::Dual`] numbers
//! - **Reverse-mode AD** via a computation [`tape::Tape`], generic over its
//!   value type so a `Tape<Dual>` gives forward-over-reverse second derivatives
//! - [`rev::Rev`], an operator-overloaded handle into a thread-local tape, and
//!   the [`rev::Recording`] guard that scopes one recording
//! - [`Scalar`] trait for writing generic code over `f64`, `Dual` and `Rev`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dual;
pub mod rev;
pub mod scalar;
pub mod tape;

pub use dual::Dual;
pub use rev::{ActiveTape, Recording, Rev};
pub use scalar::Scalar;
pub use tape::{Tape, TapeScalar};
