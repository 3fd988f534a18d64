//! Construction-time simplification of binary operation nodes.
//!
//! Whenever a binary operation node is about to be built, the rules in [`rules`] are tried in
//! order for the operation. The first rule that applies decides the node that is built instead;
//! if no rule applies, the node is built as-is. The rules eliminate algebraic identities (`a+0`,
//! `a*1`, `a^1`, ...) and annihilators (`a*0`, `0/a`), and fold operations on two constants.
//!
//! ```
//! use symdiff_expr::{simplify, BinOpKind, Expr};
//!
//! let expr = simplify::binary(BinOpKind::Mul, Expr::var("x"), Expr::constant(1.0)).unwrap();
//! assert_eq!(expr, Expr::var("x"));
//!
//! let expr = simplify::binary(BinOpKind::Add, Expr::constant(2.0), Expr::constant(3.0)).unwrap();
//! assert_eq!(expr, Expr::constant(5.0));
//! ```

pub mod rules;

use crate::{
    domain::Scalar,
    error::DivisionByZero,
    expr::{BinOpKind, Expr},
};
use log::trace;
use rules::{first_match, Rewrite};
use symdiff_error::Error;

/// Builds the binary operation node `lhs op rhs`, applying the first simplification rule that
/// applies.
///
/// Returns [`DivisionByZero`] if a non-zero constant is divided by a constant zero.
pub fn binary<T: Scalar>(op: BinOpKind, lhs: Expr<T>, rhs: Expr<T>) -> Result<Expr<T>, Error> {
    if op == BinOpKind::Div
        && rhs.is_zero()
        && lhs.as_constant().is_some_and(|value| !value.is_zero())
    {
        return Err(Error::spanless(DivisionByZero));
    }

    Ok(rewrite(op, lhs, rhs))
}

/// Builds the binary operation node `lhs op rhs`, applying the first simplification rule that
/// applies.
///
/// Unlike [`binary`], this never fails: a division of a constant by a constant zero is left
/// unfolded, and will fail when evaluated.
pub(crate) fn rewrite<T: Scalar>(op: BinOpKind, lhs: Expr<T>, rhs: Expr<T>) -> Expr<T> {
    match first_match(op, &lhs, &rhs) {
        Some((name, rewrite)) => {
            trace!("`{}`: applied {}", op, name);
            match rewrite {
                Rewrite::Lhs => lhs,
                Rewrite::Rhs => rhs,
                Rewrite::Constant(value) => Expr::Constant(value),
            }
        },
        None => Expr::binary(op, lhs, rhs),
    }
}

/// Simplifies an existing tree, by rebuilding it bottom-up with [`binary`].
///
/// Function calls are kept, with their argument simplified.
pub fn simplify<T: Scalar>(expr: &Expr<T>) -> Result<Expr<T>, Error> {
    Ok(match expr {
        Expr::Constant(_) | Expr::Variable(_) => expr.clone(),
        Expr::Binary(op, lhs, rhs) => binary(*op, simplify(lhs)?, simplify(rhs)?)?,
        Expr::Call(func, arg) => Expr::call(*func, simplify(arg)?),
    })
}

impl<T: Scalar> Expr<T> {
    /// Simplifies the tree. See [`simplify`].
    pub fn simplify(&self) -> Result<Self, Error> {
        simplify(self)
    }
}
