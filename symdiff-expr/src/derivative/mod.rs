//! Structural derivatives of expression trees.
//!
//! The derivative is computed by recursion on the shape of the tree, using the sum, product,
//! quotient, power, and chain rules. Every node the rules build goes through a [`NodeBuilder`],
//! which decides whether the node is simplified as it is built:
//!
//! - [`Simplifying`] applies the construction-time simplification rules, keeping derivative
//!   trees compact even across repeated differentiation. This is what [`derivative`] and
//!   [`Expr::derivative`] use.
//! - [`Structural`] builds every node as-is, which gives the raw output of the rules. This is what
//!   [`Expr::structural_derivative`] uses.
//!
//! Differentiation never fails. The resulting tree can still fail to evaluate, for example if it
//! contains a division by an expression that is zero for some bindings.

mod function;

use crate::{
    domain::{is_reserved, Scalar},
    expr::{BinOpKind, Expr},
    simplify::rewrite,
};
use log::debug;

/// Builds the binary operation nodes of a derivative.
pub trait NodeBuilder<T: Scalar> {
    /// Builds the node `lhs op rhs`.
    fn binary(&self, op: BinOpKind, lhs: Expr<T>, rhs: Expr<T>) -> Expr<T>;

    fn add(&self, lhs: Expr<T>, rhs: Expr<T>) -> Expr<T> {
        self.binary(BinOpKind::Add, lhs, rhs)
    }

    fn sub(&self, lhs: Expr<T>, rhs: Expr<T>) -> Expr<T> {
        self.binary(BinOpKind::Sub, lhs, rhs)
    }

    fn mul(&self, lhs: Expr<T>, rhs: Expr<T>) -> Expr<T> {
        self.binary(BinOpKind::Mul, lhs, rhs)
    }

    fn div(&self, lhs: Expr<T>, rhs: Expr<T>) -> Expr<T> {
        self.binary(BinOpKind::Div, lhs, rhs)
    }

    fn pow(&self, lhs: Expr<T>, rhs: Expr<T>) -> Expr<T> {
        self.binary(BinOpKind::Pow, lhs, rhs)
    }
}

/// Builds every node as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Structural;

impl<T: Scalar> NodeBuilder<T> for Structural {
    fn binary(&self, op: BinOpKind, lhs: Expr<T>, rhs: Expr<T>) -> Expr<T> {
        Expr::binary(op, lhs, rhs)
    }
}

/// Builds every node through the simplification rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simplifying;

impl<T: Scalar> NodeBuilder<T> for Simplifying {
    fn binary(&self, op: BinOpKind, lhs: Expr<T>, rhs: Expr<T>) -> Expr<T> {
        rewrite(op, lhs, rhs)
    }
}

/// `(f + g)' = f' + g'`
/// `(f - g)' = f' - g'`
fn sum_rule<T: Scalar, B: NodeBuilder<T>>(
    op: BinOpKind,
    lhs: &Expr<T>,
    rhs: &Expr<T>,
    var: &str,
    builder: &B,
) -> Expr<T> {
    let lhs = derivative_with(lhs, var, builder);
    let rhs = derivative_with(rhs, var, builder);
    builder.binary(op, lhs, rhs)
}

/// `(f * g)' = f' * g + f * g'`
fn product_rule<T: Scalar, B: NodeBuilder<T>>(
    lhs: &Expr<T>,
    rhs: &Expr<T>,
    var: &str,
    builder: &B,
) -> Expr<T> {
    let left_term = builder.mul(derivative_with(lhs, var, builder), rhs.clone());
    let right_term = builder.mul(lhs.clone(), derivative_with(rhs, var, builder));
    builder.add(left_term, right_term)
}

/// `(f / g)' = (f' * g - f * g') / g^2`
fn quotient_rule<T: Scalar, B: NodeBuilder<T>>(
    lhs: &Expr<T>,
    rhs: &Expr<T>,
    var: &str,
    builder: &B,
) -> Expr<T> {
    let left_term = builder.mul(derivative_with(lhs, var, builder), rhs.clone());
    let right_term = builder.mul(lhs.clone(), derivative_with(rhs, var, builder));
    let numerator = builder.sub(left_term, right_term);
    let denominator = builder.pow(rhs.clone(), Expr::constant(T::from_f64(2.0)));
    builder.div(numerator, denominator)
}

/// `(f ^ g)' = f^g * (g' * ln(f) + g * (f' / f))`
///
/// If `g'` is exactly zero, this is the power rule instead:
///
/// `(f ^ g)' = g * f^(g - 1) * f'`
fn power_rule<T: Scalar, B: NodeBuilder<T>>(
    base: &Expr<T>,
    exp: &Expr<T>,
    var: &str,
    builder: &B,
) -> Expr<T> {
    let base_derivative = derivative_with(base, var, builder);
    let exp_derivative = derivative_with(exp, var, builder);

    if exp_derivative.is_zero() {
        let reduced_exp = builder.sub(exp.clone(), Expr::one());
        let power = builder.mul(exp.clone(), builder.pow(base.clone(), reduced_exp));
        return builder.mul(power, base_derivative);
    }

    let log_term = builder.mul(exp_derivative, base.clone().ln());
    let base_term = builder.mul(exp.clone(), builder.div(base_derivative, base.clone()));
    let factor = builder.add(log_term, base_term);
    builder.mul(builder.pow(base.clone(), exp.clone()), factor)
}

/// Computes the derivative of the expression with respect to `var`, building each node with the
/// given builder.
pub fn derivative_with<T: Scalar, B: NodeBuilder<T>>(expr: &Expr<T>, var: &str, builder: &B) -> Expr<T> {
    match expr {
        Expr::Constant(_) => Expr::zero(),
        Expr::Variable(name) => {
            if name == var && !is_reserved::<T>(name) {
                Expr::one()
            } else {
                Expr::zero()
            }
        },
        Expr::Binary(op @ (BinOpKind::Add | BinOpKind::Sub), lhs, rhs) => {
            sum_rule(*op, lhs, rhs, var, builder)
        },
        Expr::Binary(BinOpKind::Mul, lhs, rhs) => product_rule(lhs, rhs, var, builder),
        Expr::Binary(BinOpKind::Div, lhs, rhs) => quotient_rule(lhs, rhs, var, builder),
        Expr::Binary(BinOpKind::Pow, base, exp) => power_rule(base, exp, var, builder),
        Expr::Call(func, arg) => function::function_derivative(*func, arg, var, builder),
    }
}

/// Computes the derivative of the expression with respect to `var`, simplifying each node as it
/// is built.
pub fn derivative<T: Scalar>(expr: &Expr<T>, var: &str) -> Expr<T> {
    debug!("differentiating {} node(s) with respect to `{}`", expr.node_count(), var);
    let result = derivative_with(expr, var, &Simplifying);
    debug!("derivative has {} node(s)", result.node_count());
    result
}

/// Computes the `n`th derivative of the expression with respect to `var`. The zeroth derivative
/// is the expression itself.
pub fn nth_derivative<T: Scalar>(expr: &Expr<T>, var: &str, n: usize) -> Expr<T> {
    (0..n).fold(expr.clone(), |acc, _| derivative(&acc, var))
}

impl<T: Scalar> Expr<T> {
    /// Computes the derivative of the expression with respect to `var`. See [`derivative`].
    pub fn derivative(&self, var: &str) -> Self {
        derivative(self, var)
    }

    /// Computes the derivative of the expression with respect to `var`, without simplifying any
    /// of the nodes that are built.
    pub fn structural_derivative(&self, var: &str) -> Self {
        derivative_with(self, var, &Structural)
    }

    /// Computes the `n`th derivative of the expression with respect to `var`.
    pub fn nth_derivative(&self, var: &str, n: usize) -> Self {
        nth_derivative(self, var, n)
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use crate::{bindings::Bindings, expr::FuncKind};
    use num_complex::Complex64;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::f64::consts::PI;
    use super::*;

    fn x() -> Expr<f64> {
        Expr::var("x")
    }

    fn y() -> Expr<f64> {
        Expr::var("y")
    }

    fn c(value: f64) -> Expr<f64> {
        Expr::constant(value)
    }

    /// Evaluates the expression with `x` bound to the given value.
    fn eval_x(e: &Expr<f64>, x: f64) -> f64 {
        e.eval(&Bindings::new().with("x", x)).unwrap()
    }

    /// Approximates the derivative of the expression with a central difference.
    fn finite_difference(e: &Expr<f64>, x: f64) -> f64 {
        const DX: f64 = 0.00001;
        (eval_x(e, x + DX) - eval_x(e, x - DX)) / (2.0 * DX)
    }

    fn test_for_function(expr: Expr<f64>, points: impl IntoIterator<Item = f64>) {
        const TOL: f64 = 0.0001;

        let symbolic = expr.derivative("x");
        let structural = expr.structural_derivative("x");

        for point in points {
            let symbolically_computed = eval_x(&symbolic, point);
            let structurally_computed = eval_x(&structural, point);
            let numerically_computed = finite_difference(&expr, point);

            assert!(
                (symbolically_computed - numerically_computed).abs() < TOL,
                "For \"{expr}\" at x={point}, symbolically computed derivative was {symbolically_computed} but numerically computed derivative was {numerically_computed}, which was out of tolerance {TOL}"
            );
            assert!((symbolically_computed - structurally_computed).abs() < TOL);
        }
    }

    #[test]
    fn power_rule_polynomial() {
        test_for_function(x().pow(c(2.0)) + x() + c(1.0), [0.5, 1., 2., 5., 8.]);
    }

    #[test]
    fn product_and_quotient() {
        test_for_function(x() * x().sin(), [0.5, 1., 2., 3.]);
        test_for_function(x().cos() / (x() + c(2.0)), [0.5, 1., 2., 3.]);
    }

    #[test]
    fn variable_exponent() {
        test_for_function(x().pow(x()), [0.5, 1., 1.5, 2.]);
        test_for_function(c(2.0).pow(x() * c(3.0)), [0.0, 0.5, 1.]);
    }

    #[test]
    fn chain_rule() {
        test_for_function((x() * x()).sin().exp(), [0.1, 0.7, 1.2]);
        test_for_function((x().pow(c(2.0)) + c(1.0)).ln(), [-1., 0.5, 3.]);
    }

    #[test]
    fn cube_derivative() {
        let derivative = y().pow(c(3.0)).derivative("y");
        assert_eq!(derivative, c(3.0) * y().pow(c(2.0)));
        assert_eq!(derivative.eval(&Bindings::new().with("y", 3.0)).unwrap(), 27.0);
    }

    #[test]
    fn sine_derivative() {
        let derivative = y().sin().derivative("y");
        assert_eq!(derivative, y().cos());
        assert_float_absolute_eq!(derivative.eval(&Bindings::new().with("y", PI)).unwrap(), -1.0, 1e-9);
    }

    #[test]
    fn cosine_derivative() {
        let derivative = y().cos().derivative("y");
        assert_eq!(derivative, c(-1.0) * y().sin());
        assert_eq!(derivative.render(), "((0 - 1) * sin(y))");
    }

    #[test]
    fn logarithm_derivative() {
        let derivative = y().ln().derivative("y");
        assert_eq!(derivative, c(1.0) / y());
        assert_float_absolute_eq!(derivative.eval(&Bindings::new().with("y", 2.0)).unwrap(), 0.5, 1e-9);
    }

    #[test]
    fn logarithm_of_zero_constant() {
        let derivative = c(0.0).ln().derivative("x");
        assert_eq!(derivative, c(0.0));
    }

    #[test]
    fn variable_base_and_constant_exponent() {
        // derivative of `a^x` where `a` is not the variable
        let expr = Expr::var("a").pow(x());
        let derivative = expr.derivative("x");
        assert_eq!(derivative, Expr::var("a").pow(x()) * Expr::var("a").ln());
    }

    #[test]
    fn derivative_can_fail_to_evaluate() {
        let derivative = (c(1.0) / x()).derivative("x");
        assert_eq!(derivative, c(-1.0) / x().pow(c(2.0)));
        assert_eq!(eval_x(&derivative, 2.0), -0.25);

        let err = derivative.eval(&Bindings::new().with("x", 0.0)).unwrap_err();
        assert!(err.is::<crate::error::DivisionByZero>());
    }

    #[test]
    fn structural_derivative_is_unsimplified() {
        let derivative = (x() * c(2.0)).structural_derivative("x");
        assert_eq!(derivative, c(1.0) * c(2.0) + x() * c(0.0));
        assert_eq!((x() * c(2.0)).derivative("x"), c(2.0));
    }

    #[test]
    fn nth_derivative_of_polynomial() {
        let expr = x().pow(c(4.0));
        assert_eq!(expr.nth_derivative("x", 0), expr);
        assert_eq!(eval_x(&expr.nth_derivative("x", 2), 2.0), 48.0);
        assert_eq!(expr.nth_derivative("x", 5), c(0.0));
    }

    #[test]
    fn imaginary_unit_is_constant() {
        let i = Expr::<Complex64>::var("i");
        let z = Expr::<Complex64>::var("z");
        let derivative = (i.clone() * z.clone()).derivative("z");
        assert_eq!(derivative, i.clone());

        assert_eq!(i.derivative("i"), Expr::zero());
    }

    #[test]
    fn complex_chain_rule() {
        let z = Expr::<Complex64>::var("z");
        let derivative = z.clone().exp().derivative("z");
        let point = Complex64::new(0.5, 1.0);
        let value = derivative.eval(&Bindings::new().with("z", point)).unwrap();
        assert_float_absolute_eq!(value.re, point.exp().re);
        assert_float_absolute_eq!(value.im, point.exp().im);
    }

    /// Generates a random tree over the variables `x` and `y`, with positive constants.
    fn random_tree(rng: &mut StdRng, depth: usize) -> Expr<f64> {
        if depth == 0 || rng.gen_bool(0.25) {
            return match rng.gen_range(0..3) {
                0 => x(),
                1 => y(),
                _ => c(rng.gen_range(1..10) as f64),
            };
        }

        match rng.gen_range(0..7) {
            0 => random_tree(rng, depth - 1) + random_tree(rng, depth - 1),
            1 => random_tree(rng, depth - 1) - random_tree(rng, depth - 1),
            2 => random_tree(rng, depth - 1) * random_tree(rng, depth - 1),
            3 => random_tree(rng, depth - 1) / c(rng.gen_range(1..5) as f64),
            4 => random_tree(rng, depth - 1).pow(c(rng.gen_range(1..3) as f64)),
            5 => Expr::call(FuncKind::Sin, random_tree(rng, depth - 1)),
            _ => Expr::call(FuncKind::Cos, random_tree(rng, depth - 1)),
        }
    }

    #[test]
    fn zero_derivative_law() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let bindings = Bindings::new().with("x", 0.75).with("y", -1.25);
        for _ in 0..200 {
            let tree = random_tree(&mut rng, 4);
            let derivative = tree.derivative("z");
            assert_eq!(derivative.eval(&bindings).unwrap(), 0.0, "d/dz of {tree}");
            assert!(!derivative.contains_variable("z"));
        }
    }

    #[test]
    fn linearity() {
        let mut rng = StdRng::seed_from_u64(42);
        let bindings = Bindings::new().with("x", 0.75).with("y", -1.25);
        for _ in 0..200 {
            let a = random_tree(&mut rng, 3);
            let b = random_tree(&mut rng, 3);
            let whole = (a.clone() + b.clone()).derivative("x").eval(&bindings).unwrap();
            let parts = a.derivative("x").eval(&bindings).unwrap()
                + b.derivative("x").eval(&bindings).unwrap();
            assert_float_absolute_eq!(whole, parts, 1e-6 * (1.0 + parts.abs()));
        }
    }

    #[test]
    fn structural_and_simplified_agree() {
        let mut rng = StdRng::seed_from_u64(7);
        let bindings = Bindings::new().with("x", 0.75).with("y", -1.25);
        for _ in 0..200 {
            let tree = random_tree(&mut rng, 3);
            let simplified = tree.derivative("y").eval(&bindings).unwrap();
            let structural = tree.structural_derivative("y").eval(&bindings).unwrap();
            assert_float_absolute_eq!(simplified, structural, 1e-6 * (1.0 + structural.abs()));
        }
    }
}
