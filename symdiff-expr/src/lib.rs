//! Expression trees over real and complex numbers, with numeric evaluation, construction-time
//! simplification, and structural derivatives.
//!
//! An [`Expr`] is generic over a [`Scalar`], which is either [`f64`] (the real domain) or
//! [`Complex64`](num_complex::Complex64) (the complex domain). Trees are usually produced by the
//! `symdiff-parser` crate, but can also be built directly:
//!
//! ```
//! use symdiff_expr::{Bindings, Expr};
//!
//! // y^3
//! let expr = Expr::var("y").pow(Expr::constant(3.0));
//! let derivative = expr.derivative("y");
//! assert_eq!(derivative.to_string(), "(3 * (y ^ 2))");
//!
//! let bindings = Bindings::new().with("y", 3.0);
//! assert_eq!(derivative.eval(&bindings).unwrap(), 27.0);
//! ```

pub mod bindings;
pub mod derivative;
pub mod domain;
pub mod error;
mod eval;
pub mod expr;
pub mod simplify;

pub use bindings::Bindings;
pub use derivative::{derivative, nth_derivative};
pub use domain::{is_complex, parse_complex, Canonical, Domain, Pretty, Scalar};
pub use expr::{Associativity, BinOpKind, Expr, FuncKind, Precedence};
pub use num_complex::Complex64;
