//! The complex domain: literal parsing, input detection, and formatting of complex numbers.

use num_complex::Complex64;
use std::fmt::{self, Formatter};
use super::{real::fmt_real, Domain, Scalar, IMAGINARY_UNIT};

/// Characters that may appear directly before a standalone imaginary unit.
const LEFT_OF_UNIT: &[char] = &['.', '+', '-', '*', '/', '^', '(', '='];

/// Characters that may appear directly after a standalone imaginary unit.
const RIGHT_OF_UNIT: &[char] = &['+', '-', '*', '/', '^', ')'];

/// Returns true if the text contains a standalone imaginary unit `i`, such as in `2i`, `1 - i`,
/// or `z=3+i`, which means the text should be interpreted in the complex domain.
///
/// An `i` that is part of a longer name, like the one in `sin`, is ignored. This is a heuristic:
/// a user variable named `i` in something like `i + 1` is also taken as the imaginary unit.
pub fn is_complex(text: &str) -> bool {
    let chars = text.chars().collect::<Vec<_>>();

    chars.iter().enumerate().any(|(pos, &c)| {
        if c != 'i' {
            return false;
        }

        let left = pos.checked_sub(1).map(|p| chars[p]);
        let right = chars.get(pos + 1).copied();

        let left_valid = left.map_or(true, |l| {
            l.is_whitespace() || l.is_ascii_digit() || LEFT_OF_UNIT.contains(&l)
        });
        let right_valid = right.map_or(true, |r| {
            r.is_whitespace() || r.is_ascii_digit() || RIGHT_OF_UNIT.contains(&r)
        });

        left_valid && right_valid
    })
}

/// Parses a complex number of the form `a+bi`, where the real part `a`, the sign, and the
/// coefficient `b` are all optional. Whitespace is ignored.
///
/// Accepted forms include `3`, `2i`, `-i`, `1+i`, and `1.5-2.25i`.
pub fn parse_complex(text: &str) -> Option<Complex64> {
    let text = text.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    let Some(body) = text.strip_suffix(IMAGINARY_UNIT) else {
        return text.parse().ok().map(|re| Complex64::new(re, 0.0));
    };

    // the last sign that separates the real part from the imaginary part; the sign of an
    // exponent, as in `1e-3`, is not a separator
    let split = body
        .char_indices()
        .filter(|&(pos, c)| {
            (c == '+' || c == '-')
                && pos > 0
                && !body[..pos].ends_with(|c: char| c.eq_ignore_ascii_case(&'e'))
        })
        .map(|(pos, _)| pos)
        .last();
    let (re, im) = match split {
        Some(pos) => (&body[..pos], &body[pos..]),
        None => ("", body),
    };

    let re = if re.is_empty() { 0.0 } else { re.parse().ok()? };
    let im = match im {
        "" | "+" => 1.0,
        "-" => -1.0,
        coefficient => coefficient.parse().ok()?,
    };

    Some(Complex64::new(re, im))
}

/// Helper function to format the imaginary part of a complex number in canonical form.
fn fmt_canonical_imag(f: &mut Formatter<'_>, n: f64) -> fmt::Result {
    if n == 1.0 {
        write!(f, "{}", IMAGINARY_UNIT)
    } else {
        write!(f, "(")?;
        fmt_real(f, n)?;
        write!(f, " * {})", IMAGINARY_UNIT)
    }
}

/// Helper function to format the imaginary part of a complex number for humans.
fn fmt_pretty_imag(f: &mut Formatter<'_>, n: f64) -> fmt::Result {
    if n == 1.0 {
        write!(f, "i")
    } else if n == -1.0 {
        write!(f, "-i")
    } else {
        write!(f, "{}i", n)
    }
}

impl Scalar for Complex64 {
    const DOMAIN: Domain = Domain::Complex;

    fn from_f64(value: f64) -> Self {
        Complex64::new(value, 0.0)
    }

    fn pow(self, exp: Self) -> Self {
        if exp.im == 0.0 {
            self.powf(exp.re)
        } else {
            self.powc(exp)
        }
    }

    fn sin(self) -> Self {
        Complex64::sin(self)
    }

    fn cos(self) -> Self {
        Complex64::cos(self)
    }

    fn exp(self) -> Self {
        Complex64::exp(self)
    }

    fn ln(self) -> Option<Self> {
        Some(Complex64::ln(self))
    }

    fn imaginary_unit() -> Option<Self> {
        Some(Complex64::i())
    }

    fn is_finite(&self) -> bool {
        Complex64::is_finite(*self)
    }

    fn parse_literal(lexeme: &str) -> Option<Self> {
        lexeme.parse().ok().filter(|n: &f64| n.is_finite()).map(Self::from_f64)
    }

    fn parse_imaginary(coefficient: &str) -> Option<Self> {
        coefficient.parse().ok().filter(|n: &f64| n.is_finite()).map(|im| Complex64::new(0.0, im))
    }

    fn parse_value(text: &str) -> Option<Self> {
        parse_complex(text).filter(|z| z.is_finite())
    }

    fn fmt_canonical(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (re, im) = (self.re, self.im);
        match (re == 0.0, im == 0.0) {
            (_, true) => fmt_real(f, re),
            (true, false) => fmt_canonical_imag(f, im),
            (false, false) => {
                write!(f, "(")?;
                fmt_real(f, re)?;
                if im.is_sign_positive() {
                    write!(f, " + ")?;
                    fmt_canonical_imag(f, im)?;
                } else {
                    write!(f, " - ")?;
                    fmt_canonical_imag(f, -im)?;
                }
                write!(f, ")")
            },
        }
    }

    fn fmt_pretty(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (re, im) = (self.re, self.im);

        // four possible combinations:
        // 1. real and imaginary exist (i.e. are non-zero)
        // 2. only real exists
        // 3. only imaginary exists
        // 4. neither real nor imaginary exist (i.e. zero)
        match (re == 0.0, im == 0.0) {
            (false, false) => {
                write!(f, "{}", re)?;
                if im.is_sign_positive() {
                    write!(f, " + ")?;
                    fmt_pretty_imag(f, im)
                } else {
                    write!(f, " - ")?;
                    fmt_pretty_imag(f, -im)
                }
            },
            (false, true) => write!(f, "{}", re),
            (true, false) => fmt_pretty_imag(f, im),
            (true, true) => write!(f, "0"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{Canonical, Pretty};
    use super::*;

    #[test]
    fn detect_standalone_unit() {
        assert!(is_complex("2i"));
        assert!(is_complex("1 - i"));
        assert!(is_complex("3+2i"));
        assert!(is_complex("z=i"));
        assert!(is_complex("i"));
        assert!(is_complex("x * (2 + i)"));
    }

    #[test]
    fn ignore_unit_inside_names() {
        assert!(!is_complex("sin(x)"));
        assert!(!is_complex("pi + 1"));
        assert!(!is_complex("ix"));
        assert!(!is_complex("i=3"));
        assert!(!is_complex("y ^ 3"));
    }

    #[test]
    fn parse_complex_forms() {
        assert_eq!(parse_complex("3"), Some(Complex64::new(3.0, 0.0)));
        assert_eq!(parse_complex("2i"), Some(Complex64::new(0.0, 2.0)));
        assert_eq!(parse_complex("i"), Some(Complex64::new(0.0, 1.0)));
        assert_eq!(parse_complex("-i"), Some(Complex64::new(0.0, -1.0)));
        assert_eq!(parse_complex("1+i"), Some(Complex64::new(1.0, 1.0)));
        assert_eq!(parse_complex("1.5-2.25i"), Some(Complex64::new(1.5, -2.25)));
        assert_eq!(parse_complex("-2 + 4i"), Some(Complex64::new(-2.0, 4.0)));
        assert_eq!(parse_complex("1e-3+2i"), Some(Complex64::new(0.001, 2.0)));
    }

    #[test]
    fn reject_malformed_complex() {
        assert_eq!(parse_complex("xi"), None);
        assert_eq!(parse_complex("1+2"), None);
        assert_eq!(parse_complex(""), None);
        assert_eq!(parse_complex("1++2i"), None);
    }

    #[test]
    fn canonical_complex() {
        assert_eq!(Canonical(Complex64::new(3.0, 0.0)).to_string(), "3");
        assert_eq!(Canonical(Complex64::new(0.0, 1.0)).to_string(), "i");
        assert_eq!(Canonical(Complex64::new(0.0, 2.0)).to_string(), "(2 * i)");
        assert_eq!(Canonical(Complex64::new(1.0, -2.0)).to_string(), "(1 - (2 * i))");
        assert_eq!(Canonical(Complex64::new(-1.0, 1.0)).to_string(), "((0 - 1) + i)");
    }

    #[test]
    fn pretty_complex() {
        assert_eq!(Pretty(Complex64::new(3.0, 4.0)).to_string(), "3 + 4i");
        assert_eq!(Pretty(Complex64::new(3.0, -1.0)).to_string(), "3 - i");
        assert_eq!(Pretty(Complex64::new(0.0, -2.5)).to_string(), "-2.5i");
        assert_eq!(Pretty(Complex64::new(0.0, 0.0)).to_string(), "0");
    }

    #[test]
    fn principal_logarithm() {
        let ln = Scalar::ln(Complex64::new(-1.0, 0.0)).unwrap();
        assert!((ln.re).abs() < 1e-12);
        assert!((ln.im - std::f64::consts::PI).abs() < 1e-12);
    }
}
