//! Comparison primitives used by case procedures.
//!
//! Every assertion returns a typed result instead of unwinding; procedures
//! propagate it with `?`, so the first failure ends the case.

use crate::host::{Rgba, Surface};
use crate::outcome::{CaseResult, Failure};
use std::fmt::Debug;
use std::sync::Arc;

/// Exact value equality.
pub fn assert_equal<T: PartialEq + Debug>(actual: T, expected: T, label: &str) -> Result<(), Failure> {
    if actual == expected {
        Ok(())
    } else {
        Err(Failure::AssertionMismatch {
            label: label.to_string(),
            actual: format!("{:?}", actual),
            expected: format!("{:?}", expected),
        })
    }
}

/// Read the pixel at `(x, y)` and compare every channel within `tolerance`.
///
/// A pixel that cannot be read is an uncaught exception, not a mismatch.
pub fn assert_pixel_approx(
    surface: &dyn Surface,
    x: u32,
    y: u32,
    expected: Rgba,
    tolerance: u8,
    label: &str,
) -> CaseResult {
    let actual = surface.read_pixel(x, y)?;
    check_pixel_approx(actual, x, y, expected, tolerance, label)?;
    Ok(())
}

/// The pure comparison behind [`assert_pixel_approx`].
pub fn check_pixel_approx(
    actual: Rgba,
    x: u32,
    y: u32,
    expected: Rgba,
    tolerance: u8,
    label: &str,
) -> Result<(), Failure> {
    if actual.max_channel_diff(&expected) <= tolerance {
        Ok(())
    } else {
        Err(Failure::PixelMismatch {
            label: label.to_string(),
            x,
            y,
            actual,
            expected,
            tolerance,
        })
    }
}

/// Both handles point at the same instance.
///
/// Only the allocation address is compared; two distinct instances with
/// equal contents fail.
pub fn assert_same<T: ?Sized>(actual: &Arc<T>, expected: &Arc<T>, label: &str) -> Result<(), Failure> {
    if std::ptr::addr_eq(Arc::as_ptr(actual), Arc::as_ptr(expected)) {
        Ok(())
    } else {
        Err(Failure::IdentityMismatch {
            label: label.to_string(),
            expected_same: true,
        })
    }
}

/// The handles point at different instances.
pub fn assert_not_same<T: ?Sized>(actual: &Arc<T>, other: &Arc<T>, label: &str) -> Result<(), Failure> {
    if std::ptr::addr_eq(Arc::as_ptr(actual), Arc::as_ptr(other)) {
        Err(Failure::IdentityMismatch {
            label: label.to_string(),
            expected_same: false,
        })
    } else {
        Ok(())
    }
}
