//! [`Scalar`] trait: abstraction over `f64`, [`Dual`](crate::dual::Dual) and
//! the reverse-mode handle [`Rev`](crate::rev::Rev).
//!
//! A log-density written once against `Scalar` can be evaluated plainly, with
//! forward-mode tangents, on a first-order tape (gradient) and on a
//! second-order tape (gradient + Hessian columns).

use crate::dual::Dual;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A scalar type suitable for log-density computation.
///
/// Implemented for `f64` (plain evaluation), `Dual` (forward-mode AD),
/// `Rev<f64>` (reverse-mode AD) and `Rev<Dual>` (forward-over-reverse).
pub trait Scalar:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Sum
    + PartialOrd
    + Sized
{
    /// Wrap an `f64` constant (derivative = 0 for AD types).
    fn from_f64(v: f64) -> Self;

    /// Extract the primal (function) value.
    fn value(&self) -> f64;

    /// Natural logarithm.
    fn ln(self) -> Self;

    /// Exponential.
    fn exp(self) -> Self;

    /// Square root.
    fn sqrt(self) -> Self;

    /// Power with f64 exponent.
    fn powf(self, n: f64) -> Self;

    /// Integer power.
    fn powi(self, n: i32) -> Self;

    /// Absolute value.
    fn abs(self) -> Self;

    /// Maximum of two values (non-smooth; passes derivative of the winner).
    fn max_s(self, other: Self) -> Self;
}

// --- f64 implementation ---

impl Scalar for f64 {
    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn value(&self) -> f64 {
        *self
    }

    #[inline]
    fn ln(self) -> Self {
        f64::ln(self)
    }

    #[inline]
    fn exp(self) -> Self {
        f64::exp(self)
    }

    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline]
    fn powf(self, n: f64) -> Self {
        f64::powf(self, n)
    }

    #[inline]
    fn powi(self, n: i32) -> Self {
        f64::powi(self, n)
    }

    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline]
    fn max_s(self, other: Self) -> Self {
        f64::max(self, other)
    }
}

// --- Dual implementation ---

impl Scalar for Dual {
    #[inline]
    fn from_f64(v: f64) -> Self {
        Dual::constant(v)
    }

    #[inline]
    fn value(&self) -> f64 {
        self.val
    }

    #[inline]
    fn ln(self) -> Self {
        Dual::ln(self)
    }

    #[inline]
    fn exp(self) -> Self {
        Dual::exp(self)
    }

    #[inline]
    fn sqrt(self) -> Self {
        Dual::sqrt(self)
    }

    #[inline]
    fn powf(self, n: f64) -> Self {
        Dual::powf(self, n)
    }

    #[inline]
    fn powi(self, n: i32) -> Self {
        Dual::powi(self, n)
    }

    #[inline]
    fn abs(self) -> Self {
        Dual::abs(self)
    }

    #[inline]
    fn max_s(self, other: Self) -> Self {
        Dual::max(self, other)
    }
}
