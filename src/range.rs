// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use num_bigint::BigInt;

/// Closed interval of integer values a signal can carry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRange {
    pub min: BigInt,
    pub max: BigInt,
}

impl SignedRange {
    /// Returns the full range of a two's-complement value of `width` bits.
    pub fn of_width(width: usize) -> Self {
        assert!(width > 0, "signed width must be positive");
        let half = BigInt::from(1u32) << (width - 1);
        SignedRange {
            min: -half.clone(),
            max: half - 1u32,
        }
    }

    /// Returns the range of the sum of a value from `self` and a value from
    /// `other`.
    pub fn plus(&self, other: &SignedRange) -> Self {
        SignedRange {
            min: &self.min + &other.min,
            max: &self.max + &other.max,
        }
    }

    /// Returns `true` if every value in this range is representable in
    /// `width` signed bits.
    pub fn fits_in(&self, width: usize) -> bool {
        if width == 0 {
            return false;
        }
        let bound = SignedRange::of_width(width);
        self.min >= bound.min && self.max <= bound.max
    }
}

impl fmt::Display for SignedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
