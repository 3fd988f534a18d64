//! The expression tree.
//!
//! An expression is an owned tree of [`Expr`] nodes: constants, variables, binary operations,
//! and calls to the elementary functions `sin`, `cos`, `ln`, and `exp`. Every node exclusively
//! owns its children, so a tree never contains shared or cyclic structure, and [`Clone`] is a
//! deep copy. Trees are never mutated in place; simplification and differentiation build new
//! trees.
//!
//! # Rendering
//!
//! The [`Display`] implementation renders a tree fully parenthesized: binary operations render
//! as `(lhs OP rhs)`, calls render as `func(arg)`, and constants use the canonical text of their
//! domain (see [`Scalar::fmt_canonical`]). The rendered text is unambiguous and can be parsed
//! back into an equivalent tree.
//!
//! ```
//! use symdiff_expr::Expr;
//!
//! let expr = Expr::<f64>::var("x").pow(Expr::constant(2.0)) + Expr::constant(1.0);
//! assert_eq!(expr.to_string(), "((x ^ 2) + 1)");
//! ```

mod op;

use crate::domain::{is_reserved, Canonical, Scalar};
use std::{
    collections::BTreeSet,
    fmt::{self, Display, Formatter},
    ops::{Add, Div, Mul, Sub},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use op::{Associativity, BinOpKind, FuncKind, Precedence, UnknownFunction};

/// A node of an expression tree, which owns all of its children.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr<T> {
    /// A numeric literal, such as `2` or `0.5`.
    Constant(T),

    /// A variable, such as `x` or `y`.
    Variable(String),

    /// A binary operation, such as `x + 1`.
    Binary(BinOpKind, Box<Expr<T>>, Box<Expr<T>>),

    /// A call to an elementary function, such as `sin(x)`.
    Call(FuncKind, Box<Expr<T>>),
}

impl<T: Scalar> Display for Expr<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => write!(f, "{}", Canonical(*value)),
            Self::Variable(name) => write!(f, "{}", name),
            Self::Binary(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op, rhs),
            Self::Call(func, arg) => write!(f, "{}({})", func, arg),
        }
    }
}

impl<T: Scalar> Expr<T> {
    /// Creates a constant node.
    pub fn constant(value: T) -> Self {
        Self::Constant(value)
    }

    /// Creates a variable node.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Creates a binary operation node. No simplification is done.
    pub fn binary(op: BinOpKind, lhs: Self, rhs: Self) -> Self {
        Self::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Creates a function call node. No simplification is done.
    pub fn call(func: FuncKind, arg: Self) -> Self {
        Self::Call(func, Box::new(arg))
    }

    /// The constant zero of the domain.
    pub fn zero() -> Self {
        Self::Constant(T::zero())
    }

    /// The constant one of the domain.
    pub fn one() -> Self {
        Self::Constant(T::one())
    }

    /// Raises this expression to the given power. No simplification is done.
    pub fn pow(self, exp: Self) -> Self {
        Self::binary(BinOpKind::Pow, self, exp)
    }

    pub fn sin(self) -> Self {
        Self::call(FuncKind::Sin, self)
    }

    pub fn cos(self) -> Self {
        Self::call(FuncKind::Cos, self)
    }

    pub fn exp(self) -> Self {
        Self::call(FuncKind::Exp, self)
    }

    pub fn ln(self) -> Self {
        Self::call(FuncKind::Ln, self)
    }

    /// Renders the expression in its fully parenthesized, re-parseable form.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// If the expression is a [`Expr::Constant`], returns the contained value.
    ///
    /// This does not evaluate anything: `1 + 1` is not a constant.
    pub fn as_constant(&self) -> Option<T> {
        match self {
            Self::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// If the expression is a [`Expr::Variable`], returns its name.
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Self::Variable(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true if the expression is a constant exactly equal to zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Constant(value) if value.is_zero())
    }

    /// Returns true if the expression is a constant exactly equal to one.
    pub fn is_one(&self) -> bool {
        matches!(self, Self::Constant(value) if value.is_one())
    }

    /// Returns true if the variable with the given name occurs in the expression.
    pub fn contains_variable(&self, name: &str) -> bool {
        match self {
            Self::Constant(_) => false,
            Self::Variable(var) => var == name,
            Self::Binary(_, lhs, rhs) => lhs.contains_variable(name) || rhs.contains_variable(name),
            Self::Call(_, arg) => arg.contains_variable(name),
        }
    }

    /// Returns the names of the variables that must be bound to evaluate the expression, in
    /// sorted order. The imaginary unit of the complex domain is not a variable.
    pub fn variables(&self) -> BTreeSet<&str> {
        fn collect<'a, T: Scalar>(expr: &'a Expr<T>, out: &mut BTreeSet<&'a str>) {
            match expr {
                Expr::Constant(_) => (),
                Expr::Variable(name) => {
                    if !is_reserved::<T>(name) {
                        out.insert(name);
                    }
                },
                Expr::Binary(_, lhs, rhs) => {
                    collect(lhs, out);
                    collect(rhs, out);
                },
                Expr::Call(_, arg) => collect(arg, out),
            }
        }

        let mut out = BTreeSet::new();
        collect(self, &mut out);
        out
    }

    /// Returns the number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Constant(_) | Self::Variable(_) => 1,
            Self::Binary(_, lhs, rhs) => 1 + lhs.node_count() + rhs.node_count(),
            Self::Call(_, arg) => 1 + arg.node_count(),
        }
    }

    /// Returns the depth of the tree; a single leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::Constant(_) | Self::Variable(_) => 1,
            Self::Binary(_, lhs, rhs) => 1 + lhs.depth().max(rhs.depth()),
            Self::Call(_, arg) => 1 + arg.depth(),
        }
    }
}

/// Builds a raw `lhs + rhs` node.
impl<T: Scalar> Add for Expr<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::binary(BinOpKind::Add, self, rhs)
    }
}

/// Builds a raw `lhs - rhs` node.
impl<T: Scalar> Sub for Expr<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::binary(BinOpKind::Sub, self, rhs)
    }
}

/// Builds a raw `lhs * rhs` node.
impl<T: Scalar> Mul for Expr<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::binary(BinOpKind::Mul, self, rhs)
    }
}

/// Builds a raw `lhs / rhs` node.
impl<T: Scalar> Div for Expr<T> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self::binary(BinOpKind::Div, self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr<f64> {
        Expr::var("x")
    }

    fn c(value: f64) -> Expr<f64> {
        Expr::constant(value)
    }

    #[test]
    fn render_fully_parenthesized() {
        let expr = (x() + c(2.0)) * x().sin() / c(3.0).pow(x());
        assert_eq!(expr.render(), "(((x + 2) * sin(x)) / (3 ^ x))");
    }

    #[test]
    fn render_negative_constant() {
        let expr = c(-1.0) * x().cos();
        assert_eq!(expr.render(), "((0 - 1) * cos(x))");
    }

    #[test]
    fn render_calls() {
        let expr = x().ln().exp();
        assert_eq!(expr.render(), "exp(ln(x))");
    }

    #[test]
    fn clone_is_deep() {
        let original = x() + c(1.0);
        let copy = original.clone();
        drop(original);
        assert_eq!(copy, Expr::binary(BinOpKind::Add, x(), c(1.0)));
    }

    #[test]
    fn literal_tests_are_structural() {
        assert!(c(0.0).is_zero());
        assert!(c(1.0).is_one());
        assert!(!(c(1.0) - c(1.0)).is_zero());
        assert!(!x().is_zero());
        assert_eq!((c(1.0) + c(1.0)).as_constant(), None);
    }

    #[test]
    fn variables_are_sorted_and_unique() {
        let expr = Expr::<f64>::var("y") * x() + x().sin();
        assert_eq!(expr.variables().into_iter().collect::<Vec<_>>(), vec!["x", "y"]);
        assert!(expr.contains_variable("y"));
        assert!(!expr.contains_variable("z"));
    }

    #[test]
    fn imaginary_unit_is_not_a_variable() {
        let real = Expr::<f64>::var("i") + x();
        let complex = Expr::<Complex64>::var("i") + Expr::var("x");
        assert_eq!(real.variables().len(), 2);
        assert_eq!(complex.variables().into_iter().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn size_measures() {
        let expr = (x() + c(2.0)).sin();
        assert_eq!(expr.node_count(), 4);
        assert_eq!(expr.depth(), 3);
    }
}
