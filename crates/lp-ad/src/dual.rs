//! Forward-mode automatic differentiation via dual numbers.
//!
//! A [`Dual`] carries a primal value and one directional derivative. Seeding
//! an input with `dot = 1` and evaluating any [`Scalar`](crate::scalar::Scalar)
//! code yields the derivative along that input.
//!
//! Duals are also the value type of the second-order tape: recording a
//! computation on a `Tape<Dual>` and sweeping it backward yields gradient
//! *and* Hessian-vector product at once (forward-over-reverse).

use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// An f64 dual number for forward-mode AD.
///
/// `val` holds the primal value, `dot` holds the tangent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual {
    /// Primal (function) value.
    pub val: f64,
    /// Tangent (derivative) value.
    pub dot: f64,
}

impl Dual {
    /// Create a constant (derivative = 0).
    #[inline]
    pub fn constant(val: f64) -> Self {
        Self { val, dot: 0.0 }
    }

    /// Create an independent variable (derivative = 1).
    #[inline]
    pub fn var(val: f64) -> Self {
        Self { val, dot: 1.0 }
    }

    /// Create a dual with explicit tangent.
    #[inline]
    pub fn new(val: f64, dot: f64) -> Self {
        Self { val, dot }
    }

    /// Natural logarithm: d/dx ln(x) = 1/x.
    #[inline]
    pub fn ln(self) -> Self {
        Self { val: self.val.ln(), dot: self.dot / self.val }
    }

    /// Exponential: d/dx exp(x) = exp(x).
    #[inline]
    pub fn exp(self) -> Self {
        let e = self.val.exp();
        Self { val: e, dot: self.dot * e }
    }

    /// Power with f64 exponent: d/dx x^n = n * x^(n-1).
    ///
    /// Exponents 0 and 1 have derivatives 0 and 1 everywhere, including at
    /// `x = 0`.
    #[inline]
    pub fn powf(self, n: f64) -> Self {
        let dot = if n == 0.0 {
            0.0
        } else if n == 1.0 {
            self.dot
        } else {
            self.dot * n * self.val.powf(n - 1.0)
        };
        Self { val: self.val.powf(n), dot }
    }

    /// Integer power: d/dx x^n = n * x^(n-1).
    #[inline]
    pub fn powi(self, n: i32) -> Self {
        let dot = match n {
            0 => 0.0,
            1 => self.dot,
            _ => self.dot * (n as f64) * self.val.powi(n - 1),
        };
        Self { val: self.val.powi(n), dot }
    }

    /// Square root: d/dx sqrt(x) = 1/(2*sqrt(x)).
    #[inline]
    pub fn sqrt(self) -> Self {
        let s = self.val.sqrt();
        Self { val: s, dot: self.dot / (2.0 * s) }
    }

    /// Absolute value: d/dx |x| = sign(x).
    #[inline]
    pub fn abs(self) -> Self {
        Self { val: self.val.abs(), dot: self.dot * self.val.signum() }
    }

    /// Maximum of two duals. Derivative follows the larger operand.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if self.val >= other.val { self } else { other }
    }
}

// --- Arithmetic: Dual op Dual ---

impl Add for Dual {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self { val: self.val + rhs.val, dot: self.dot + rhs.dot }
    }
}

impl Sub for Dual {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self { val: self.val - rhs.val, dot: self.dot - rhs.dot }
    }
}

impl Mul for Dual {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self { val: self.val * rhs.val, dot: self.dot * rhs.val + self.val * rhs.dot }
    }
}

impl Div for Dual {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self {
            val: self.val / rhs.val,
            dot: (self.dot * rhs.val - self.val * rhs.dot) / (rhs.val * rhs.val),
        }
    }
}

impl Neg for Dual {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self { val: -self.val, dot: -self.dot }
    }
}

// --- Arithmetic: Dual op f64 ---

impl Add<f64> for Dual {
    type Output = Self;
    #[inline]
    fn add(self, rhs: f64) -> Self {
        Self { val: self.val + rhs, dot: self.dot }
    }
}

impl Sub<f64> for Dual {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: f64) -> Self {
        Self { val: self.val - rhs, dot: self.dot }
    }
}

impl Mul<f64> for Dual {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self { val: self.val * rhs, dot: self.dot * rhs }
    }
}

impl Div<f64> for Dual {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self { val: self.val / rhs, dot: self.dot / rhs }
    }
}

// --- Sum ---

impl Sum for Dual {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Dual::constant(0.0), |acc, x| acc + x)
    }
}

// --- From ---

impl From<f64> for Dual {
    fn from(val: f64) -> Self {
        Self::constant(val)
    }
}

// --- PartialOrd ---

impl PartialOrd for Dual {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.val.partial_cmp(&other.val)
    }
}
