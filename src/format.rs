//! Canonical text form of a quaternion.
//!
//! Components are written in the order `i, j, k, real`, zero components are
//! left out, unit coefficients are written as a bare sign and letter, and
//! terms after the first are joined with `+` unless they carry their own `-`.
//! The output, wrapped in parentheses, parses back to the same value.

use std::fmt;

use crate::algebra::{Basis, Quaternion};

const FORMAT_ORDER: [Basis; 4] = [Basis::I, Basis::J, Basis::K, Basis::Real];

/// Renders `q` in canonical form; the zero quaternion is `"0"`.
pub fn format(q: &Quaternion) -> String {
    let mut out = String::new();

    for basis in FORMAT_ORDER {
        let value = q.component(basis);
        if value == 0.0 {
            continue;
        }
        if !out.is_empty() && value > 0.0 {
            out.push('+');
        }
        out.push_str(&coefficient_text(basis, value));
    }

    if out.is_empty() {
        out.push('0');
    }
    out
}

/// Text of one nonzero component, sign included.
///
/// `±1` on an imaginary unit drops the digit (`i`, `-k`); the real part keeps
/// it (`1`, `-1`). Other values use the shortest decimal that reads back to
/// the same `f64`.
pub fn coefficient_text(basis: Basis, value: f64) -> String {
    let mut text = if value.abs() == 1.0 {
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{}{}", sign, basis.symbol())
    } else {
        format!("{}{}", value, basis.symbol())
    };

    if !text.ends_with(|c: char| c.is_ascii_digit() || Basis::from_letter(c).is_some()) {
        text.push('1');
    }
    text
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self))
    }
}
