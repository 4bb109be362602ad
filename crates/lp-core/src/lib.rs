//! # lp-core
//!
//! Core types and traits for lp-hessian.
//!
//! - [`Error`] / [`Result`]: the error taxonomy shared by every crate
//! - [`LogDensityModel`]: the model-side evaluation capability
//! - [`HessianResult`]: value, gradient and Hessian returned to callers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::LogDensityModel;
pub use types::HessianResult;

pub use lp_ad::Scalar;
