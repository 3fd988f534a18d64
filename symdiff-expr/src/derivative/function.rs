//! Symbolic derivatives of the elementary functions.

use crate::{
    domain::Scalar,
    expr::{Expr, FuncKind},
};
use super::{derivative_with, NodeBuilder};

/// Computes the derivative of a function call and applies the chain rule.
///
/// `sin(a)' = cos(a) * a'`
/// `cos(a)' = -1 * sin(a) * a'`
/// `exp(a)' = exp(a) * a'`
/// `ln(a)' = (1 / a) * a'`
pub(super) fn function_derivative<T: Scalar, B: NodeBuilder<T>>(
    func: FuncKind,
    arg: &Expr<T>,
    var: &str,
    builder: &B,
) -> Expr<T> {
    let inner = derivative_with(arg, var, builder);

    let outer = match func {
        FuncKind::Sin => arg.clone().cos(),
        FuncKind::Cos => builder.mul(Expr::constant(-T::one()), arg.clone().sin()),
        FuncKind::Exp => arg.clone().exp(),
        FuncKind::Ln => {
            // avoid building `1 / a` when it would be discarded
            if inner.is_zero() {
                return inner;
            }
            builder.div(Expr::one(), arg.clone())
        },
    };

    builder.mul(outer, inner)
}
