//! The numeric domains an expression can be evaluated in.
//!
//! Every expression tree is generic over a [`Scalar`], the type of its constants and of the
//! values it evaluates to. Two scalars are provided: [`f64`] for the [`Domain::Real`] domain, and
//! [`Complex64`](num_complex::Complex64) for the [`Domain::Complex`] domain. The trait bundles
//! everything that differs between the two: parsing literals, the elementary functions, and the
//! canonical text used when rendering constants.

pub mod complex;
mod real;

use num_traits::{One, Zero};
use std::{
    fmt::{self, Debug, Display, Formatter},
    ops::{Add, Div, Mul, Neg, Sub},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use complex::{is_complex, parse_complex};

/// The name of the variable that evaluates to the imaginary unit in the complex domain.
pub const IMAGINARY_UNIT: &str = "i";

/// A numeric domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Domain {
    /// Real numbers, represented as [`f64`].
    #[default]
    Real,

    /// Complex numbers, represented as [`Complex64`](num_complex::Complex64).
    Complex,
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Real => write!(f, "real"),
            Domain::Complex => write!(f, "complex"),
        }
    }
}

/// A number in one of the supported [`Domain`]s.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// The domain this scalar belongs to.
    const DOMAIN: Domain;

    /// Converts a real number into this domain.
    fn from_f64(value: f64) -> Self;

    /// Raises `self` to the power of `exp`.
    fn pow(self, exp: Self) -> Self;

    fn sin(self) -> Self;

    fn cos(self) -> Self;

    fn exp(self) -> Self;

    /// The natural logarithm of `self`, or [`None`] if `self` is outside the domain of the
    /// logarithm.
    fn ln(self) -> Option<Self>;

    /// Returns true if the value is neither infinite nor NaN. Only finite values have a canonical
    /// form.
    fn is_finite(&self) -> bool;

    /// The imaginary unit, if this domain has one.
    fn imaginary_unit() -> Option<Self>;

    /// Parses a numeric literal, such as `2` or `3.25`.
    fn parse_literal(lexeme: &str) -> Option<Self>;

    /// Parses the coefficient of an imaginary literal, such as the `2` in `2i`. Domains without
    /// an imaginary unit reject every coefficient.
    fn parse_imaginary(_coefficient: &str) -> Option<Self> {
        None
    }

    /// Parses a value written by a user, such as the value of a variable binding.
    fn parse_value(text: &str) -> Option<Self>;

    /// Writes the value in a form the expression parser can read back.
    fn fmt_canonical(&self, f: &mut Formatter<'_>) -> fmt::Result;

    /// Writes the value for a human reader.
    fn fmt_pretty(&self, f: &mut Formatter<'_>) -> fmt::Result;
}

/// Returns true if `name` is a reserved name in the domain of `T`, and does not refer to a
/// variable.
pub fn is_reserved<T: Scalar>(name: &str) -> bool {
    name == IMAGINARY_UNIT && T::imaginary_unit().is_some()
}

/// Displays a scalar in its canonical, re-parseable form.
#[derive(Debug, Clone, Copy)]
pub struct Canonical<T>(pub T);

impl<T: Scalar> Display for Canonical<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt_canonical(f)
    }
}

/// Displays a scalar in a form meant for humans.
#[derive(Debug, Clone, Copy)]
pub struct Pretty<T>(pub T);

impl<T: Scalar> Display for Pretty<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt_pretty(f)
    }
}
