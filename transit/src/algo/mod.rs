//! Numerical algorithms backing the transit model.

pub mod quadrature;

pub use quadrature::{adaptive_simpson, QuadratureError, DEFAULT_TOLERANCE};
