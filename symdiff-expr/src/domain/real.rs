use std::fmt::{self, Formatter};
use super::{Domain, Scalar};

/// Writes a real number so that the parser can read it back. The parser has no unary minus, so a
/// negative number is written as a subtraction from zero.
pub(super) fn fmt_real(f: &mut Formatter<'_>, n: f64) -> fmt::Result {
    if n == 0.0 {
        write!(f, "0")
    } else if n.is_sign_negative() {
        write!(f, "(0 - {})", -n)
    } else {
        write!(f, "{}", n)
    }
}

impl Scalar for f64 {
    const DOMAIN: Domain = Domain::Real;

    fn from_f64(value: f64) -> Self {
        value
    }

    fn pow(self, exp: Self) -> Self {
        self.powf(exp)
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }

    fn cos(self) -> Self {
        f64::cos(self)
    }

    fn exp(self) -> Self {
        f64::exp(self)
    }

    fn ln(self) -> Option<Self> {
        (self > 0.0).then(|| f64::ln(self))
    }

    fn imaginary_unit() -> Option<Self> {
        None
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }

    fn parse_literal(lexeme: &str) -> Option<Self> {
        lexeme.parse().ok().filter(|n: &f64| n.is_finite())
    }

    fn parse_value(text: &str) -> Option<Self> {
        text.trim().parse().ok().filter(|n: &f64| n.is_finite())
    }

    fn fmt_canonical(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_real(f, *self)
    }

    fn fmt_pretty(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if *self == 0.0 {
            write!(f, "0")
        } else {
            write!(f, "{}", self)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{Canonical, Pretty};
    use super::*;

    #[test]
    fn canonical_real() {
        assert_eq!(Canonical(12.0_f64).to_string(), "12");
        assert_eq!(Canonical(0.5_f64).to_string(), "0.5");
        assert_eq!(Canonical(-3.25_f64).to_string(), "(0 - 3.25)");
        assert_eq!(Canonical(-0.0_f64).to_string(), "0");
    }

    #[test]
    fn pretty_real() {
        assert_eq!(Pretty(-3.25_f64).to_string(), "-3.25");
        assert_eq!(Pretty(-0.0_f64).to_string(), "0");
    }

    #[test]
    fn ln_domain() {
        assert_eq!(Scalar::ln(1.0_f64), Some(0.0));
        assert_eq!(Scalar::ln(0.0_f64), None);
        assert_eq!(Scalar::ln(-2.0_f64), None);
    }

    #[test]
    fn literals() {
        assert_eq!(f64::parse_literal("3."), Some(3.0));
        assert_eq!(f64::parse_literal(".5"), Some(0.5));
        assert_eq!(f64::parse_imaginary("2"), None);
        assert_eq!(f64::parse_value(" -1.5 "), Some(-1.5));
        assert_eq!(f64::parse_value("x"), None);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert_eq!(f64::parse_literal(&format!("1{}", "0".repeat(400))), None);
        assert_eq!(f64::parse_value("inf"), None);
        assert_eq!(f64::parse_value("NaN"), None);
        assert!(!Scalar::is_finite(&f64::INFINITY));
        assert!(Scalar::is_finite(&1e300));
    }
}
