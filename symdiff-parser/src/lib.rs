//! Parser for symdiff expressions.
//!
//! Text is split into tokens by the [`tokenizer`], then turned into an expression tree by the
//! operator-precedence [`parser`]. The parser is generic over the [`Scalar`] domain that numeric
//! literals are read in.
//!
//! ```
//! use symdiff_expr::{Bindings, Expr};
//! use symdiff_parser::parse;
//!
//! let expr: Expr<f64> = parse("y + 4").unwrap();
//! assert_eq!(expr.eval(&Bindings::new().with("y", 6.0)).unwrap(), 10.0);
//! ```
//!
//! [`Scalar`]: symdiff_expr::Scalar

pub mod parser;
pub mod tokenizer;

pub use parser::{parse, Parser};
