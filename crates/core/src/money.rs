//! Monetary comparison with a fixed absolute tolerance.

/// Maximum absolute difference between two monetary figures still considered
/// equal. Fixed across currencies.
pub const TOLERANCE: f64 = 0.01;

/// Compare two monetary amounts within [`TOLERANCE`].
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}
