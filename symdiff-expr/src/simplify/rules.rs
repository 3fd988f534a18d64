//! The rewrite rules applied when a binary operation node is built.
//!
//! Each rule inspects the two operands of the node about to be built, and returns `Some` with the
//! replacement if the rule applies, or `None` if it does not. Rules only look at the shape of the
//! operands: a "zero" or "one" is a [`Expr::Constant`] exactly equal to the zero or one of the
//! domain.

use crate::{
    domain::Scalar,
    eval::apply_binary,
    expr::{BinOpKind, Expr},
};

/// What a node is replaced with when a rule applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rewrite<T> {
    /// The node is replaced by its left operand.
    Lhs,

    /// The node is replaced by its right operand.
    Rhs,

    /// The node is replaced by a constant.
    Constant(T),
}

/// A named rewrite rule.
pub type Rule<T> = (&'static str, fn(&Expr<T>, &Expr<T>) -> Option<Rewrite<T>>);

/// Tries the rules for the given operation in order, and returns the name and result of the first
/// rule that applies.
pub fn first_match<T: Scalar>(
    op: BinOpKind,
    lhs: &Expr<T>,
    rhs: &Expr<T>,
) -> Option<(&'static str, Rewrite<T>)> {
    let find = |rules: &[Rule<T>]| {
        rules
            .iter()
            .find_map(|(name, rule)| rule(lhs, rhs).map(|rewrite| (*name, rewrite)))
    };

    match op {
        BinOpKind::Add => find(&[
            ("add_zero_right", add_zero_right),
            ("add_zero_left", add_zero_left),
            ("fold_add", fold_add),
        ]),
        BinOpKind::Sub => find(&[
            ("sub_zero", sub_zero),
            ("fold_sub", fold_sub),
        ]),
        BinOpKind::Mul => find(&[
            ("mul_one_right", mul_one_right),
            ("mul_one_left", mul_one_left),
            ("mul_zero", mul_zero),
            ("fold_mul", fold_mul),
        ]),
        BinOpKind::Div => find(&[
            ("div_one", div_one),
            ("div_zero_numerator", div_zero_numerator),
            ("fold_div", fold_div),
        ]),
        BinOpKind::Pow => find(&[
            ("pow_one", pow_one),
            ("pow_zero", pow_zero),
            ("fold_pow", fold_pow),
        ]),
    }
}

/// `a+0 = a`
fn add_zero_right<T: Scalar>(_: &Expr<T>, rhs: &Expr<T>) -> Option<Rewrite<T>> {
    rhs.is_zero().then_some(Rewrite::Lhs)
}

/// `0+a = a`
fn add_zero_left<T: Scalar>(lhs: &Expr<T>, _: &Expr<T>) -> Option<Rewrite<T>> {
    lhs.is_zero().then_some(Rewrite::Rhs)
}

/// `a-0 = a`
fn sub_zero<T: Scalar>(_: &Expr<T>, rhs: &Expr<T>) -> Option<Rewrite<T>> {
    rhs.is_zero().then_some(Rewrite::Lhs)
}

/// `a*1 = a`
fn mul_one_right<T: Scalar>(_: &Expr<T>, rhs: &Expr<T>) -> Option<Rewrite<T>> {
    rhs.is_one().then_some(Rewrite::Lhs)
}

/// `1*a = a`
fn mul_one_left<T: Scalar>(lhs: &Expr<T>, _: &Expr<T>) -> Option<Rewrite<T>> {
    lhs.is_one().then_some(Rewrite::Rhs)
}

/// `a*0 = 0`
/// `0*a = 0`
///
/// The other operand is discarded without being looked at, even if it could never be evaluated.
fn mul_zero<T: Scalar>(lhs: &Expr<T>, rhs: &Expr<T>) -> Option<Rewrite<T>> {
    (lhs.is_zero() || rhs.is_zero()).then(|| Rewrite::Constant(T::zero()))
}

/// `a/1 = a`
fn div_one<T: Scalar>(_: &Expr<T>, rhs: &Expr<T>) -> Option<Rewrite<T>> {
    rhs.is_one().then_some(Rewrite::Lhs)
}

/// `0/a = 0`
fn div_zero_numerator<T: Scalar>(lhs: &Expr<T>, _: &Expr<T>) -> Option<Rewrite<T>> {
    lhs.is_zero().then(|| Rewrite::Constant(T::zero()))
}

/// `a^1 = a`
fn pow_one<T: Scalar>(_: &Expr<T>, rhs: &Expr<T>) -> Option<Rewrite<T>> {
    rhs.is_one().then_some(Rewrite::Lhs)
}

/// `a^0 = 1`
fn pow_zero<T: Scalar>(_: &Expr<T>, rhs: &Expr<T>) -> Option<Rewrite<T>> {
    rhs.is_zero().then(|| Rewrite::Constant(T::one()))
}

/// Folds an operation on two constants into a single constant. Results that overflow or are NaN
/// have no constant form, and are left unfolded.
fn fold<T: Scalar>(op: BinOpKind, lhs: &Expr<T>, rhs: &Expr<T>) -> Option<Rewrite<T>> {
    let (lhs, rhs) = (lhs.as_constant()?, rhs.as_constant()?);
    apply_binary(op, lhs, rhs)
        .ok()
        .filter(|value| value.is_finite())
        .map(Rewrite::Constant)
}

fn fold_add<T: Scalar>(lhs: &Expr<T>, rhs: &Expr<T>) -> Option<Rewrite<T>> {
    fold(BinOpKind::Add, lhs, rhs)
}

fn fold_sub<T: Scalar>(lhs: &Expr<T>, rhs: &Expr<T>) -> Option<Rewrite<T>> {
    fold(BinOpKind::Sub, lhs, rhs)
}

fn fold_mul<T: Scalar>(lhs: &Expr<T>, rhs: &Expr<T>) -> Option<Rewrite<T>> {
    fold(BinOpKind::Mul, lhs, rhs)
}

/// Folds a division of two constants, unless the divisor is zero.
fn fold_div<T: Scalar>(lhs: &Expr<T>, rhs: &Expr<T>) -> Option<Rewrite<T>> {
    fold(BinOpKind::Div, lhs, rhs)
}

fn fold_pow<T: Scalar>(lhs: &Expr<T>, rhs: &Expr<T>) -> Option<Rewrite<T>> {
    fold(BinOpKind::Pow, lhs, rhs)
}
