// SPDX-License-Identifier: Apache-2.0

use fixedbitset::FixedBitSet;

use crate::util::range_fmt;

/// Tracks which bits of a signal have a driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DrivenBits {
    driven: FixedBitSet,
}

pub(crate) enum DrivenError {
    AlreadyDriven,
}

impl DrivenBits {
    pub(crate) fn new(width: usize) -> Self {
        DrivenBits {
            driven: FixedBitSet::with_capacity(width),
        }
    }

    /// Returns a tracker where every bit is already driven, e.g. for module
    /// inputs, which are driven from outside.
    pub(crate) fn new_all_driven(width: usize) -> Self {
        let mut driven = FixedBitSet::with_capacity(width);
        driven.insert_range(..);
        DrivenBits { driven }
    }

    pub(crate) fn driven(&mut self, msb: usize, lsb: usize) -> Result<(), DrivenError> {
        // make sure this is not already driven
        if self.driven.contains_any_in_range(lsb..msb + 1) {
            return Err(DrivenError::AlreadyDriven);
        }
        self.driven.insert_range(lsb..msb + 1);
        Ok(())
    }

    pub(crate) fn all_driven(&self) -> bool {
        self.driven.count_ones(..) == self.driven.len()
    }

    pub(crate) fn example_problematic_bits(&self) -> Option<String> {
        example_problematic_bits(&self.driven)
    }
}

/// Tracks which bits of a signal are read somewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UsedBits {
    used: FixedBitSet,
}

impl UsedBits {
    pub(crate) fn new(width: usize) -> Self {
        UsedBits {
            used: FixedBitSet::with_capacity(width),
        }
    }

    pub(crate) fn used(&mut self, msb: usize, lsb: usize) {
        self.used.insert_range(lsb..msb + 1);
    }

    pub(crate) fn all_used(&self) -> bool {
        self.used.count_ones(..) == self.used.len()
    }

    pub(crate) fn example_problematic_bits(&self) -> Option<String> {
        example_problematic_bits(&self.used)
    }
}

/// Returns the first contiguous run of clear bits, formatted as a bit range,
/// or an empty string if every bit is clear. Returns `None` if all bits are
/// set.
fn example_problematic_bits(bits: &FixedBitSet) -> Option<String> {
    let width = bits.len();
    let lsb = bits.zeroes().next()?;
    let msb = (lsb..width)
        .take_while(|&i| !bits.contains(i))
        .last()
        .unwrap_or(lsb);
    if msb - lsb + 1 == width {
        Some(String::new())
    } else {
        Some(range_fmt(msb, lsb))
    }
}
