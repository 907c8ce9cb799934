// Copyright 2026 the Deeplist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar abstraction over floating point types.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Sub};

/// Floating point scalar used for heights, offsets, and scroll positions.
///
/// Implemented for `f32` and `f64` so the same engine can serve hosts with
/// either coordinate precision.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// The zero value.
    fn zero() -> Self;

    /// The larger of `self` and `other`.
    #[must_use]
    fn max(self, other: Self) -> Self;

    /// The smaller of `self` and `other`.
    #[must_use]
    fn min(self, other: Self) -> Self;

    /// `true` if this value is neither infinite nor NaN.
    fn is_finite(self) -> bool;

    /// `true` if this value has a negative sign, including `-0.0`.
    fn is_sign_negative(self) -> bool;

    /// Converts a `usize` to this scalar type.
    fn from_usize(value: usize) -> Self;

    /// Converts an `isize` to this scalar type.
    fn from_isize(value: isize) -> Self;

    /// Largest integer less than or equal to `self`, as an `isize`.
    fn floor_to_isize(self) -> isize;

    /// Clamps negative values (including `-0.0`) to zero.
    #[must_use]
    fn clamp_non_negative(self) -> Self {
        if self.is_sign_negative() {
            Self::zero()
        } else {
            self
        }
    }

    /// Smallest integral value greater than or equal to `self`.
    ///
    /// Only meaningful for non-negative finite inputs.
    #[must_use]
    fn ceil_non_negative(self) -> Self {
        let floored = self.floor_to_isize();
        let restored = Self::from_isize(floored);
        if restored < self {
            Self::from_isize(floored + 1)
        } else {
            restored
        }
    }
}

impl Scalar for f32 {
    fn zero() -> Self {
        0.0
    }

    fn max(self, other: Self) -> Self {
        Self::max(self, other)
    }

    fn min(self, other: Self) -> Self {
        Self::min(self, other)
    }

    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    fn is_sign_negative(self) -> bool {
        Self::is_sign_negative(self)
    }

    fn from_usize(value: usize) -> Self {
        value as Self
    }

    fn from_isize(value: isize) -> Self {
        value as Self
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "truncation toward zero is the desired floor for in-range values"
    )]
    fn floor_to_isize(self) -> isize {
        let truncated = self as isize;
        if self < 0.0 && self != truncated as Self {
            truncated - 1
        } else {
            truncated
        }
    }
}

impl Scalar for f64 {
    fn zero() -> Self {
        0.0
    }

    fn max(self, other: Self) -> Self {
        Self::max(self, other)
    }

    fn min(self, other: Self) -> Self {
        Self::min(self, other)
    }

    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    fn is_sign_negative(self) -> bool {
        Self::is_sign_negative(self)
    }

    fn from_usize(value: usize) -> Self {
        value as Self
    }

    fn from_isize(value: isize) -> Self {
        value as Self
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "truncation toward zero is the desired floor for in-range values"
    )]
    fn floor_to_isize(self) -> isize {
        let truncated = self as isize;
        if self < 0.0 && self != truncated as Self {
            truncated - 1
        } else {
            truncated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_non_negative_zeroes_negatives() {
        assert_eq!((-3.5_f64).clamp_non_negative(), 0.0);
        assert_eq!((-0.0_f64).clamp_non_negative(), 0.0);
        assert_eq!(2.5_f64.clamp_non_negative(), 2.5);
    }

    #[test]
    fn floor_to_isize_handles_negatives() {
        assert_eq!(2.9_f64.floor_to_isize(), 2);
        assert_eq!((-2.1_f64).floor_to_isize(), -3);
        assert_eq!((-2.0_f64).floor_to_isize(), -2);
        assert_eq!(0.0_f32.floor_to_isize(), 0);
    }

    #[test]
    fn ceil_non_negative_rounds_up() {
        assert_eq!(0.04_f64.ceil_non_negative(), 1.0);
        assert_eq!(5.0_f64.ceil_non_negative(), 5.0);
        assert_eq!(5.1_f32.ceil_non_negative(), 6.0);
    }
}
