//! Basis labels and the Hamilton multiplication table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four units a coefficient is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Basis {
    Real,
    I,
    J,
    K,
}

impl Basis {
    /// All labels in component order `(r, i, j, k)`.
    pub const ALL: [Basis; 4] = [Basis::Real, Basis::I, Basis::J, Basis::K];

    /// Component position within `(r, i, j, k)`.
    pub const fn index(self) -> usize {
        match self {
            Basis::Real => 0,
            Basis::I => 1,
            Basis::J => 2,
            Basis::K => 3,
        }
    }

    /// The letter written after a coefficient; empty for the real part.
    pub const fn symbol(self) -> &'static str {
        match self {
            Basis::Real => "",
            Basis::I => "i",
            Basis::J => "j",
            Basis::K => "k",
        }
    }

    pub fn from_letter(c: char) -> Option<Basis> {
        match c {
            'i' => Some(Basis::I),
            'j' => Some(Basis::J),
            'k' => Some(Basis::K),
            _ => None,
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Basis::Real => write!(f, "r"),
            other => write!(f, "{}", other.symbol()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub const fn factor(self) -> f64 {
        match self {
            Sign::Plus => 1.0,
            Sign::Minus => -1.0,
        }
    }

    pub const fn flip(self) -> Sign {
        match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        }
    }
}

/// Product of two basis labels.
///
/// `real` is the identity on either side, every imaginary unit squares to
/// `-1`, and distinct imaginary units follow the cycle `i -> j -> k -> i`:
/// forward pairs give `+`, reversed pairs give `-`.
pub fn multiply_base(a: Basis, b: Basis) -> (Sign, Basis) {
    use Basis::*;

    match (a, b) {
        (Real, x) | (x, Real) => (Sign::Plus, x),
        (I, I) | (J, J) | (K, K) => (Sign::Minus, Real),
        (I, J) => (Sign::Plus, K),
        (J, K) => (Sign::Plus, I),
        (K, I) => (Sign::Plus, J),
        (J, I) => (Sign::Minus, K),
        (K, J) => (Sign::Minus, I),
        (I, K) => (Sign::Minus, J),
    }
}
