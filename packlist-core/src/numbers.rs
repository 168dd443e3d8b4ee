//! Numeric conversion helpers centralizing lossy casts.

use num_traits::cast::cast;

/// Convert a count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Fraction of `part` over `whole`, clamped to `0.0..=1.0`; zero when `whole` is zero.
#[must_use]
pub fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (usize_to_f64(part) / usize_to_f64(whole)).clamp(0.0, 1.0)
}

/// Widen a `u32` quantity for multiplication against `u64` prices.
#[must_use]
pub fn qty_to_u64(value: u32) -> u64 {
    cast::<u32, u64>(value).unwrap_or(0)
}
