//! Numeric evaluation of expression trees.

use crate::{
    bindings::Bindings,
    domain::{is_reserved, Pretty, Scalar},
    error::{DivisionByZero, DomainError, UnboundVariable},
    expr::{BinOpKind, Expr, FuncKind},
};
use log::trace;
use symdiff_error::Error;

impl<T: Scalar> Expr<T> {
    /// Evaluates the expression, looking up the value of each variable in the given bindings.
    ///
    /// In the complex domain, the variable `i` always evaluates to the imaginary unit.
    ///
    /// Evaluation fails if a variable is not bound, if a divisor is exactly zero, or if the
    /// logarithm is taken of a number outside its domain. Other non-finite results, such as
    /// overflow, follow the floating-point semantics of the domain.
    pub fn eval(&self, bindings: &Bindings<T>) -> Result<T, Error> {
        trace!("evaluating `{}` with {} binding(s)", self, bindings.len());
        eval_inner(self, bindings)
    }
}

fn eval_inner<T: Scalar>(expr: &Expr<T>, bindings: &Bindings<T>) -> Result<T, Error> {
    match expr {
        Expr::Constant(value) => Ok(*value),
        Expr::Variable(name) => lookup(name, bindings),
        Expr::Binary(op, lhs, rhs) => {
            let lhs = eval_inner(lhs, bindings)?;
            let rhs = eval_inner(rhs, bindings)?;
            apply_binary(*op, lhs, rhs)
        },
        Expr::Call(func, arg) => {
            let arg = eval_inner(arg, bindings)?;
            apply_call(*func, arg)
        },
    }
}

fn lookup<T: Scalar>(name: &str, bindings: &Bindings<T>) -> Result<T, Error> {
    if is_reserved::<T>(name) {
        if let Some(unit) = T::imaginary_unit() {
            return Ok(unit);
        }
    }

    bindings.get_var(name).ok_or_else(|| {
        let suggestions = bindings
            .get_similar_vars(name)
            .into_iter()
            .map(ToString::to_string)
            .collect();
        Error::spanless(UnboundVariable { name: name.to_string(), suggestions })
    })
}

/// Applies a binary operation to two values.
pub(crate) fn apply_binary<T: Scalar>(op: BinOpKind, lhs: T, rhs: T) -> Result<T, Error> {
    Ok(match op {
        BinOpKind::Add => lhs + rhs,
        BinOpKind::Sub => lhs - rhs,
        BinOpKind::Mul => lhs * rhs,
        BinOpKind::Div => {
            if rhs.is_zero() {
                return Err(Error::spanless(DivisionByZero));
            }
            lhs / rhs
        },
        BinOpKind::Pow => lhs.pow(rhs),
    })
}

/// Applies an elementary function to a value.
pub(crate) fn apply_call<T: Scalar>(func: FuncKind, arg: T) -> Result<T, Error> {
    Ok(match func {
        FuncKind::Sin => arg.sin(),
        FuncKind::Cos => arg.cos(),
        FuncKind::Exp => arg.exp(),
        FuncKind::Ln => arg.ln().ok_or_else(|| {
            Error::spanless(DomainError {
                function: func.name(),
                argument: Pretty(arg).to_string(),
            })
        })?,
    })
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use num_complex::Complex64;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::f64::consts::PI;
    use super::*;

    fn x() -> Expr<f64> {
        Expr::var("x")
    }

    fn c(value: f64) -> Expr<f64> {
        Expr::constant(value)
    }

    #[test]
    fn constant_sum() {
        let expr = c(5.0) + c(7.0);
        assert_eq!(expr.eval(&Bindings::new()).unwrap(), 12.0);
    }

    #[test]
    fn bound_variable() {
        let expr = Expr::var("y") + c(4.0);
        assert_eq!(expr.eval(&Bindings::new().with("y", 6.0)).unwrap(), 10.0);
    }

    #[test]
    fn product_and_quotient() {
        let expr = c(3.0) * Expr::var("y") / c(6.0);
        assert_eq!(expr.eval(&Bindings::new().with("y", 12.0)).unwrap(), 6.0);
    }

    #[test]
    fn power() {
        let expr = Expr::var("y").pow(c(3.0));
        assert_eq!(expr.eval(&Bindings::new().with("y", 4.0)).unwrap(), 64.0);
    }

    #[test]
    fn elementary_functions() {
        let bindings = Bindings::new().with("x", PI / 6.0);
        assert_float_absolute_eq!(x().sin().eval(&bindings).unwrap(), 0.5);
        assert_float_absolute_eq!(x().cos().eval(&bindings).unwrap(), 3.0f64.sqrt() / 2.0);
        assert_float_absolute_eq!(x().exp().ln().eval(&bindings).unwrap(), PI / 6.0);
    }

    #[test]
    fn unbound_variable_suggests_similar() {
        let err = (x() + Expr::var("y")).eval(&Bindings::new().with("x", 1.0).with("z", 1.0)).unwrap_err();
        assert_eq!(err.downcast_ref::<UnboundVariable>(), Some(&UnboundVariable {
            name: "y".to_string(),
            suggestions: vec!["x".to_string(), "z".to_string()],
        }));
    }

    #[test]
    fn division_by_zero() {
        let expr = c(3.0) * Expr::var("y") / c(0.0);
        let err = expr.eval(&Bindings::new().with("y", 1.0)).unwrap_err();
        assert!(err.is::<DivisionByZero>());

        let expr = c(1.0) / (x() - x());
        let err = expr.eval(&Bindings::new().with("x", 2.0)).unwrap_err();
        assert!(err.is::<DivisionByZero>());
    }

    #[test]
    fn logarithm_outside_domain() {
        let err = x().ln().eval(&Bindings::new().with("x", -1.0)).unwrap_err();
        assert_eq!(err.downcast_ref::<DomainError>(), Some(&DomainError {
            function: "ln",
            argument: "-1".to_string(),
        }));
        assert!(x().ln().eval(&Bindings::new().with("x", 0.0)).is_err());
    }

    #[test]
    fn overflow_is_not_an_error() {
        let value = c(10.0).pow(c(400.0)).eval(&Bindings::new()).unwrap();
        assert!(value.is_infinite());
    }

    #[test]
    fn imaginary_unit() {
        let expr = Expr::<Complex64>::var("i") * Expr::var("i");
        assert_eq!(expr.eval(&Bindings::new()).unwrap(), Complex64::new(-1.0, 0.0));

        // not reserved in the real domain
        let expr = Expr::<f64>::var("i") * Expr::var("i");
        assert_eq!(expr.eval(&Bindings::new().with("i", 3.0)).unwrap(), 9.0);
    }

    #[test]
    fn complex_logarithm_of_negative() {
        let expr = Expr::<Complex64>::var("z").ln();
        let value = expr.eval(&Bindings::new().with("z", Complex64::new(-1.0, 0.0))).unwrap();
        assert_float_absolute_eq!(value.re, 0.0);
        assert_float_absolute_eq!(value.im, PI);
    }

    /// Generates a random tree over `x` and `y`, using every operator and function, so that some
    /// trees fail to evaluate and some evaluate to non-finite values.
    fn random_tree<T: Scalar>(rng: &mut StdRng, depth: usize) -> Expr<T> {
        if depth == 0 || rng.gen_bool(0.25) {
            return match rng.gen_range(0..3) {
                0 => Expr::var("x"),
                1 => Expr::var("y"),
                _ => Expr::constant(T::from_f64(rng.gen_range(-4..5) as f64 / 2.0)),
            };
        }

        match rng.gen_range(0..9) {
            n @ 0..=4 => Expr::binary(
                BinOpKind::ALL[n],
                random_tree(rng, depth - 1),
                random_tree(rng, depth - 1),
            ),
            n => Expr::call(FuncKind::ALL[n - 5], random_tree(rng, depth - 1)),
        }
    }

    #[test]
    fn real_evaluation_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(0xd5);
        let bindings = Bindings::new().with("x", 0.75).with("y", -1.25);
        for _ in 0..300 {
            let tree = random_tree::<f64>(&mut rng, 5);
            match (tree.eval(&bindings), tree.clone().eval(&bindings)) {
                (Ok(a), Ok(b)) => assert_eq!(a.to_bits(), b.to_bits(), "{tree}"),
                (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string(), "{tree}"),
                _ => panic!("evaluating {tree} twice gave different outcomes"),
            }
        }
    }

    #[test]
    fn complex_evaluation_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(0xc5);
        let bindings = Bindings::new()
            .with("x", Complex64::new(0.75, -0.5))
            .with("y", Complex64::new(-1.25, 2.0));
        for _ in 0..300 {
            let tree = random_tree::<Complex64>(&mut rng, 5);
            match (tree.eval(&bindings), tree.clone().eval(&bindings)) {
                (Ok(a), Ok(b)) => {
                    assert_eq!((a.re.to_bits(), a.im.to_bits()), (b.re.to_bits(), b.im.to_bits()), "{tree}");
                },
                (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string(), "{tree}"),
                _ => panic!("evaluating {tree} twice gave different outcomes"),
            }
        }
    }
}
