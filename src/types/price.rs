//! Fixed-point price and quantity utilities.
//!
//! ## Overview
//!
//! All prices and sizes in depthbook use fixed-point representation so that
//! sort keys compare exactly. Values are stored as u64 scaled by 10^8.
//!
//! Feeds deliver levels as decimal strings (`"50000.1"`, `"0.25"`); these
//! helpers convert them at the boundary and back for display.
//!
//! ## Examples
//!
//! ```
//! use depthbook::types::price::{to_fixed, from_fixed};
//!
//! let price = to_fixed("50000.12345678").unwrap();
//! assert_eq!(price, 5_000_012_345_678);
//!
//! assert_eq!(from_fixed(price), "50000.12345678");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point arithmetic: 10^8
pub const SCALE: u64 = 100_000_000;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to fixed-point u64
///
/// Returns `None` if parsing fails, the value is negative, it carries more
/// than 8 fractional digits, or it does not fit in a u64 after scaling.
///
/// # Example
///
/// ```
/// use depthbook::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// assert_eq!(to_fixed("-1"), None);
/// assert_eq!(to_fixed("0.000000004"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s.trim()).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to fixed-point u64
///
/// Returns `None` if the value is negative, out of range, or not an exact
/// multiple of 10^-8. A positive size never rounds to zero.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() && !d.is_zero() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    if !scaled.fract().is_zero() {
        return None;
    }
    scaled.to_u64()
}

/// Convert fixed-point u64 to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Convert fixed-point u64 to a string with 8 decimal places
///
/// # Example
///
/// ```
/// use depthbook::types::price::from_fixed;
///
/// assert_eq!(from_fixed(100_000_000), "1.00000000");
/// ```
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

/// Convert fixed-point u64 to a human-readable string (trailing zeros trimmed)
///
/// # Example
///
/// ```
/// use depthbook::types::price::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
/// ```
pub fn from_fixed_trimmed(value: u64) -> String {
    format!("{}", fixed_to_decimal(value).normalize())
}

/// Parse an order count
///
/// Counts are plain non-negative integers, but some feeds send them as
/// decimals (`"3.0"`). Fractional counts are rejected.
///
/// ```
/// use depthbook::types::price::to_count;
///
/// assert_eq!(to_count("3"), Some(3));
/// assert_eq!(to_count("3.0"), Some(3));
/// assert_eq!(to_count("2.5"), None);
/// ```
pub fn to_count(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s.trim()).ok()?;
    if !decimal.fract().is_zero() {
        return None;
    }
    if decimal.is_sign_negative() && !decimal.is_zero() {
        return None;
    }
    decimal.to_u64()
}

// ============================================================================
// Unit Tests
// ============================================================================
