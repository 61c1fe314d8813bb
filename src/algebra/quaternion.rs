use std::ops::Mul;

use serde::{Deserialize, Serialize};

use super::basis::{multiply_base, Basis};

/// `r + i·𝐢 + j·𝐣 + k·𝐤` with double-precision coefficients.
///
/// A plain value: every operation returns a new quaternion and nothing is
/// mutated once a value has been handed out.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quaternion {
    pub r: f64,
    pub i: f64,
    pub j: f64,
    pub k: f64,
}

impl Quaternion {
    pub const ZERO: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 0.0);
    pub const ONE: Quaternion = Quaternion::new(1.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f64, i: f64, j: f64, k: f64) -> Self {
        Self { r, i, j, k }
    }

    pub const fn from_array([r, i, j, k]: [f64; 4]) -> Self {
        Self::new(r, i, j, k)
    }

    pub const fn to_array(self) -> [f64; 4] {
        [self.r, self.i, self.j, self.k]
    }

    pub const fn component(&self, basis: Basis) -> f64 {
        match basis {
            Basis::Real => self.r,
            Basis::I => self.i,
            Basis::J => self.j,
            Basis::K => self.k,
        }
    }

    /// Returns a copy with `basis` set to `value`, replacing whatever was there.
    pub fn with_component(self, basis: Basis, value: f64) -> Self {
        let mut components = self.to_array();
        components[basis.index()] = value;
        Self::from_array(components)
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|c| c.is_finite())
    }

    /// Hamilton product `self · rhs`.
    ///
    /// Expands all 16 ordered basis pairs, accumulating `sign · self[p] · rhs[n]`
    /// into the component named by `multiply_base(p, n)`, pairs visited with `p`
    /// outer and `n` inner in `(r, i, j, k)` order.
    pub fn multiply(self, rhs: Quaternion) -> Quaternion {
        let mut acc = [0.0f64; 4];
        for p in Basis::ALL {
            for n in Basis::ALL {
                let (sign, basis) = multiply_base(p, n);
                acc[basis.index()] += sign.factor() * self.component(p) * rhs.component(n);
            }
        }
        Quaternion::from_array(acc)
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        self.multiply(rhs)
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from(components: [f64; 4]) -> Self {
        Quaternion::from_array(components)
    }
}
