//! Quaternion algebra: basis labels, the Hamilton table, and the product.

pub mod basis;
pub mod quaternion;

pub use basis::{multiply_base, Basis, Sign};
pub use quaternion::Quaternion;
