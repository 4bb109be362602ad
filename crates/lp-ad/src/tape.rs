//! Tape-based reverse-mode automatic differentiation.
//!
//! Records a computation graph (forward pass), then computes **all** gradients
//! in a single backward sweep.  Cost: one forward + one backward pass regardless
//! of the number of inputs.
//!
//! The tape is generic over its value type. With `f64` values a backward sweep
//! yields the gradient. With [`Dual`](crate::dual::Dual) values whose tangents
//! are seeded along a direction `v`, the same sweep yields the gradient in the
//! primal parts of the adjoints and `H·v` in their tangent parts
//! (forward-over-reverse).
//!
//! # Example
//! ```
//! use lp_ad::tape::Tape;
//!
//! let mut tape: Tape = Tape::new();
//! let x = tape.var(3.0);
//! let y = tape.var(5.0);
//! let z = tape.mul(x, y);       // z = x * y = 15
//! let w = tape.add(z, x);       // w = z + x = 18
//! tape.backward(w);
//! assert_eq!(tape.adjoint(x), 6.0);  // dw/dx = y + 1 = 6
//! assert_eq!(tape.adjoint(y), 3.0);  // dw/dy = x = 3
//! ```

use crate::dual::Dual;
use crate::scalar::Scalar;

/// Handle to a node on the tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Var(pub(crate) usize);

/// Value types a tape can hold and propagate adjoints in.
pub trait TapeScalar: Scalar {
    /// `true` when the value carries no information at all (primal and every
    /// tangent are zero). Zero adjoints are skipped during the backward
    /// sweep, so a dual adjoint with a zero primal but a live tangent must
    /// report `false` here.
    fn is_all_zero(&self) -> bool;
}

impl TapeScalar for f64 {
    #[inline]
    fn is_all_zero(&self) -> bool {
        *self == 0.0
    }
}

impl TapeScalar for Dual {
    #[inline]
    fn is_all_zero(&self) -> bool {
        self.val == 0.0 && self.dot == 0.0
    }
}

/// Operation recorded on the tape.
#[derive(Debug, Clone, Copy)]
enum Op {
    /// Input variable (leaf).
    Input,
    /// Constant (adjoint never propagated).
    Const,
    // Binary ops
    Add(usize, usize),
    Sub(usize, usize),
    Mul(usize, usize),
    Div(usize, usize),
    // Unary ops
    Neg(usize),
    Ln(usize),
    Exp(usize),
    Sqrt(usize),
    Abs(usize),
    Powf(usize, f64),
    Powi(usize, i32),
    /// Max(a, b): gradient flows to the winner only.
    Max(usize, usize),
}

/// Node on the tape: value + operation that produced it.
#[derive(Debug, Clone)]
struct Node<T> {
    val: T,
    op: Op,
}

/// Reverse-mode AD tape.
///
/// Build a computation graph by calling methods (var, add, mul, ln, …),
/// then call [`backward`](Tape::backward) and read gradients with [`adjoint`](Tape::adjoint).
#[derive(Debug, Clone)]
pub struct Tape<T = f64> {
    nodes: Vec<Node<T>>,
    adjoints: Vec<T>,
}

impl<T: TapeScalar> Tape<T> {
    /// Create an empty tape.
    pub fn new() -> Self {
        Self { nodes: Vec::new(), adjoints: Vec::new() }
    }

    /// Create a tape pre-allocated for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { nodes: Vec::with_capacity(capacity), adjoints: Vec::with_capacity(capacity) }
    }

    /// Number of nodes on the tape.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tape is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clear the tape for reuse (avoids reallocation).
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.adjoints.clear();
    }

    #[inline]
    fn push(&mut self, val: T, op: Op) -> Var {
        let idx = self.nodes.len();
        self.nodes.push(Node { val, op });
        Var(idx)
    }

    // --- Leaf constructors ---

    /// Record an input variable.
    #[inline]
    pub fn var(&mut self, val: T) -> Var {
        self.push(val, Op::Input)
    }

    /// Record a constant (gradient never flows through it).
    #[inline]
    pub fn constant(&mut self, val: T) -> Var {
        self.push(val, Op::Const)
    }

    // --- Value access ---

    /// Get the value of a node.
    #[inline]
    pub fn val(&self, v: Var) -> T {
        self.nodes[v.0].val
    }

    // --- Binary operations ---

    /// `a + b`
    #[inline]
    pub fn add(&mut self, a: Var, b: Var) -> Var {
        let val = self.nodes[a.0].val + self.nodes[b.0].val;
        self.push(val, Op::Add(a.0, b.0))
    }

    /// `a - b`
    #[inline]
    pub fn sub(&mut self, a: Var, b: Var) -> Var {
        let val = self.nodes[a.0].val - self.nodes[b.0].val;
        self.push(val, Op::Sub(a.0, b.0))
    }

    /// `a * b`
    #[inline]
    pub fn mul(&mut self, a: Var, b: Var) -> Var {
        let val = self.nodes[a.0].val * self.nodes[b.0].val;
        self.push(val, Op::Mul(a.0, b.0))
    }

    /// `a / b`
    #[inline]
    pub fn div(&mut self, a: Var, b: Var) -> Var {
        let val = self.nodes[a.0].val / self.nodes[b.0].val;
        self.push(val, Op::Div(a.0, b.0))
    }

    /// `max(a, b)`, gradient flows to the winner.
    #[inline]
    pub fn max(&mut self, a: Var, b: Var) -> Var {
        let va = self.nodes[a.0].val;
        let vb = self.nodes[b.0].val;
        let val = if va.value() >= vb.value() { va } else { vb };
        self.push(val, Op::Max(a.0, b.0))
    }

    // --- Unary operations ---

    /// `-a`
    #[inline]
    pub fn neg(&mut self, a: Var) -> Var {
        let val = -self.nodes[a.0].val;
        self.push(val, Op::Neg(a.0))
    }

    /// `ln(a)`
    #[inline]
    pub fn ln(&mut self, a: Var) -> Var {
        let val = self.nodes[a.0].val.ln();
        self.push(val, Op::Ln(a.0))
    }

    /// `exp(a)`
    #[inline]
    pub fn exp(&mut self, a: Var) -> Var {
        let val = self.nodes[a.0].val.exp();
        self.push(val, Op::Exp(a.0))
    }

    /// `sqrt(a)`
    #[inline]
    pub fn sqrt(&mut self, a: Var) -> Var {
        let val = self.nodes[a.0].val.sqrt();
        self.push(val, Op::Sqrt(a.0))
    }

    /// `|a|`
    #[inline]
    pub fn abs(&mut self, a: Var) -> Var {
        let val = self.nodes[a.0].val.abs();
        self.push(val, Op::Abs(a.0))
    }

    /// `a^n` (float exponent)
    pub fn powf(&mut self, a: Var, n: f64) -> Var {
        let val = self.nodes[a.0].val.powf(n);
        self.push(val, Op::Powf(a.0, n))
    }

    /// `a^n` (integer exponent)
    pub fn powi(&mut self, a: Var, n: i32) -> Var {
        let val = self.nodes[a.0].val.powi(n);
        self.push(val, Op::Powi(a.0, n))
    }

    // --- Convenience: scalar helpers ---

    /// `a + scalar`
    #[inline]
    pub fn add_f64(&mut self, a: Var, s: f64) -> Var {
        let c = self.constant(T::from_f64(s));
        self.add(a, c)
    }

    /// `a * scalar`
    #[inline]
    pub fn mul_f64(&mut self, a: Var, s: f64) -> Var {
        let c = self.constant(T::from_f64(s));
        self.mul(a, c)
    }

    // --- Backward pass ---

    /// Run reverse-mode AD from output node `out`.
    ///
    /// After calling this, use [`adjoint`](Tape::adjoint) to read ∂out/∂x
    /// for any input `x`. Adjoints are accumulated in `T`, so a dual-valued
    /// tape propagates tangents of the adjoints as well.
    pub fn backward(&mut self, out: Var) {
        let n = self.nodes.len();
        let zero = T::from_f64(0.0);
        self.adjoints.clear();
        self.adjoints.resize(n, zero);
        self.adjoints[out.0] = T::from_f64(1.0);

        for i in (0..n).rev() {
            let adj = self.adjoints[i];
            if adj.is_all_zero() {
                continue;
            }

            match self.nodes[i].op {
                Op::Input | Op::Const => {}
                Op::Add(a, b) => {
                    self.adjoints[a] = self.adjoints[a] + adj;
                    self.adjoints[b] = self.adjoints[b] + adj;
                }
                Op::Sub(a, b) => {
                    self.adjoints[a] = self.adjoints[a] + adj;
                    self.adjoints[b] = self.adjoints[b] - adj;
                }
                Op::Mul(a, b) => {
                    let va = self.nodes[a].val;
                    let vb = self.nodes[b].val;
                    self.adjoints[a] = self.adjoints[a] + adj * vb;
                    self.adjoints[b] = self.adjoints[b] + adj * va;
                }
                Op::Div(a, b) => {
                    let va = self.nodes[a].val;
                    let vb = self.nodes[b].val;
                    self.adjoints[a] = self.adjoints[a] + adj / vb;
                    self.adjoints[b] = self.adjoints[b] - adj * va / (vb * vb);
                }
                Op::Neg(a) => {
                    self.adjoints[a] = self.adjoints[a] - adj;
                }
                Op::Ln(a) => {
                    self.adjoints[a] = self.adjoints[a] + adj / self.nodes[a].val;
                }
                Op::Exp(a) => {
                    // d/da exp(a) = exp(a) = self.nodes[i].val
                    self.adjoints[a] = self.adjoints[a] + adj * self.nodes[i].val;
                }
                Op::Sqrt(a) => {
                    let s = self.nodes[i].val;
                    self.adjoints[a] = self.adjoints[a] + adj / (s + s);
                }
                Op::Abs(a) => {
                    if self.nodes[a].val.value() >= 0.0 {
                        self.adjoints[a] = self.adjoints[a] + adj;
                    } else {
                        self.adjoints[a] = self.adjoints[a] - adj;
                    }
                }
                Op::Powf(a, n) => {
                    // d/da a^n = n * a^(n-1); a^0 is constant, a^1 has unit slope
                    if n == 1.0 {
                        self.adjoints[a] = self.adjoints[a] + adj;
                    } else if n != 0.0 {
                        let d = T::from_f64(n) * self.nodes[a].val.powf(n - 1.0);
                        self.adjoints[a] = self.adjoints[a] + adj * d;
                    }
                }
                Op::Powi(a, n) => match n {
                    0 => {}
                    1 => self.adjoints[a] = self.adjoints[a] + adj,
                    _ => {
                        let d = T::from_f64(n as f64) * self.nodes[a].val.powi(n - 1);
                        self.adjoints[a] = self.adjoints[a] + adj * d;
                    }
                },
                Op::Max(a, b) => {
                    if self.nodes[a].val.value() >= self.nodes[b].val.value() {
                        self.adjoints[a] = self.adjoints[a] + adj;
                    } else {
                        self.adjoints[b] = self.adjoints[b] + adj;
                    }
                }
            }
        }
    }

    /// Read ∂output/∂v after calling [`backward`](Tape::backward).
    #[inline]
    pub fn adjoint(&self, v: Var) -> T {
        self.adjoints.get(v.0).copied().unwrap_or_else(|| T::from_f64(0.0))
    }
}

impl<T: TapeScalar> Default for Tape<T> {
    fn default() -> Self {
        Self::new()
    }
}
