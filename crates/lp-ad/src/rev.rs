//! Operator-overloaded reverse mode on a thread-local tape.
//!
//! [`Rev<T>`] is a `Copy` handle (node index + cached value) into the active
//! tape of the current thread, so code written against
//! [`Scalar`](crate::scalar::Scalar) records itself simply by running on
//! `Rev` inputs. A [`Recording`] guard owns the scope of one recording: it
//! swaps a fresh tape in when created and puts the previous one back when
//! dropped, which makes recordings nestable and releases the recorded graph
//! on every exit path (including `?` returns).
//!
//! ```
//! use lp_ad::rev::Recording;
//! use lp_ad::scalar::Scalar;
//!
//! fn f<S: Scalar>(x: &[S]) -> S {
//!     x[0] * x[0] * x[1] + x[1].ln()
//! }
//!
//! let mut rec = Recording::<f64>::start();
//! let xs = rec.inputs([2.0, 1.0]);
//! let y = f(&xs);
//! rec.backward(y);
//! assert_eq!(rec.adjoint(xs[0]), 4.0); // 2 x0 x1
//! assert_eq!(rec.adjoint(xs[1]), 5.0); // x0^2 + 1/x1
//! ```
//!
//! A `Rev` must not outlive the `Recording` it was created under, and must
//! not be mixed with handles from an enclosing recording.

use crate::dual::Dual;
use crate::scalar::Scalar;
use crate::tape::{Tape, TapeScalar, Var};
use std::cell::RefCell;
use std::iter::Sum;
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::thread::LocalKey;

thread_local! {
    static TAPE_F64: RefCell<Tape<f64>> = RefCell::new(Tape::new());
    static TAPE_DUAL: RefCell<Tape<Dual>> = RefCell::new(Tape::new());
}

/// Tape value types that have a thread-local active tape.
pub trait ActiveTape: TapeScalar + 'static {
    /// The thread-local slot holding the active tape for this value type.
    fn tape_cell() -> &'static LocalKey<RefCell<Tape<Self>>>;
}

impl ActiveTape for f64 {
    fn tape_cell() -> &'static LocalKey<RefCell<Tape<Self>>> {
        &TAPE_F64
    }
}

impl ActiveTape for Dual {
    fn tape_cell() -> &'static LocalKey<RefCell<Tape<Self>>> {
        &TAPE_DUAL
    }
}

#[inline]
fn with_active<T: ActiveTape, R>(f: impl FnOnce(&mut Tape<T>) -> R) -> R {
    T::tape_cell().with(|cell| f(&mut cell.borrow_mut()))
}

/// Scope of one recording on the current thread's active tape.
///
/// Not `Send`: the handles it produces index a thread-local tape.
pub struct Recording<T: ActiveTape> {
    outer: Option<Tape<T>>,
    _not_send: PhantomData<*const ()>,
}

impl<T: ActiveTape> Recording<T> {
    /// Start recording on a fresh tape, parking whatever tape was active.
    pub fn start() -> Self {
        let outer = with_active(|tape: &mut Tape<T>| std::mem::take(tape));
        Self { outer: Some(outer), _not_send: PhantomData }
    }

    /// Record an independent input.
    pub fn input(&mut self, val: T) -> Rev<T> {
        Rev::record(|tape| tape.var(val))
    }

    /// Record a sequence of independent inputs, in order.
    pub fn inputs(&mut self, vals: impl IntoIterator<Item = T>) -> Vec<Rev<T>> {
        vals.into_iter().map(|v| self.input(v)).collect()
    }

    /// Number of nodes recorded so far.
    pub fn len(&self) -> usize {
        with_active(|tape: &mut Tape<T>| tape.len())
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reverse sweep from `out`.
    pub fn backward(&mut self, out: Rev<T>) {
        with_active(|tape: &mut Tape<T>| tape.backward(out.node))
    }

    /// ∂out/∂v after [`backward`](Recording::backward).
    pub fn adjoint(&self, v: Rev<T>) -> T {
        with_active(|tape: &mut Tape<T>| tape.adjoint(v.node))
    }
}

impl<T: ActiveTape> Drop for Recording<T> {
    fn drop(&mut self) {
        if let Some(outer) = self.outer.take() {
            // The slot is gone only during thread teardown; nothing to restore then.
            let _ = T::tape_cell().try_with(|cell| {
                *cell.borrow_mut() = outer;
            });
        }
    }
}

/// Reverse-mode scalar: a node on the active tape plus its value.
#[derive(Debug, Clone, Copy)]
pub struct Rev<T> {
    node: Var,
    val: T,
    _not_send: PhantomData<*const ()>,
}

impl<T: ActiveTape> Rev<T> {
    #[inline]
    fn record(op: impl FnOnce(&mut Tape<T>) -> Var) -> Self {
        with_active(|tape: &mut Tape<T>| {
            let node = op(tape);
            Rev { node, val: tape.val(node), _not_send: PhantomData }
        })
    }

    /// Value carried by this node (for `Rev<Dual>`, primal and tangent).
    #[inline]
    pub fn val(&self) -> T {
        self.val
    }
}

// --- Arithmetic ---

impl<T: ActiveTape> Add for Rev<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Rev::record(|t| t.add(self.node, rhs.node))
    }
}

impl<T: ActiveTape> Sub for Rev<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Rev::record(|t| t.sub(self.node, rhs.node))
    }
}

impl<T: ActiveTape> Mul for Rev<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Rev::record(|t| t.mul(self.node, rhs.node))
    }
}

impl<T: ActiveTape> Div for Rev<T> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        Rev::record(|t| t.div(self.node, rhs.node))
    }
}

impl<T: ActiveTape> Neg for Rev<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Rev::record(|t| t.neg(self.node))
    }
}

impl<T: ActiveTape> Sum for Rev<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(|acc, x| acc + x).unwrap_or_else(|| Rev::from_f64(0.0))
    }
}

// --- Ordering on the primal value ---

impl<T: ActiveTape> PartialEq for Rev<T> {
    fn eq(&self, other: &Self) -> bool {
        self.val.value() == other.val.value()
    }
}

impl<T: ActiveTape> PartialOrd for Rev<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.val.value().partial_cmp(&other.val.value())
    }
}

impl<T: ActiveTape> Scalar for Rev<T> {
    #[inline]
    fn from_f64(v: f64) -> Self {
        Rev::record(|t| t.constant(T::from_f64(v)))
    }

    #[inline]
    fn value(&self) -> f64 {
        self.val.value()
    }

    #[inline]
    fn ln(self) -> Self {
        Rev::record(|t| t.ln(self.node))
    }

    #[inline]
    fn exp(self) -> Self {
        Rev::record(|t| t.exp(self.node))
    }

    #[inline]
    fn sqrt(self) -> Self {
        Rev::record(|t| t.sqrt(self.node))
    }

    #[inline]
    fn powf(self, n: f64) -> Self {
        Rev::record(|t| t.powf(self.node, n))
    }

    #[inline]
    fn powi(self, n: i32) -> Self {
        Rev::record(|t| t.powi(self.node, n))
    }

    #[inline]
    fn abs(self) -> Self {
        Rev::record(|t| t.abs(self.node))
    }

    #[inline]
    fn max_s(self, other: Self) -> Self {
        Rev::record(|t| t.max(self.node, other.node))
    }
}
