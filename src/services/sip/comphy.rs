// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! Validation of the comphy base address and lane arguments of the comphy SiP calls.

use core::fmt::{self, Display, Formatter};

/// Offset of the comphy register block within a CP110 configuration space.
pub const COMPHY_OFFSET: u64 = 0x44_1000;

/// Any of these bits set marks a base address given relative to the SD/MMC block instead.
pub const SD_OFFSET: u64 = 0x12_0000;

/// Mask of the block offset field of a base address.
const OFFSET_MASK: u64 = 0xff_ffff;

/// The number of comphy lanes on a CP110.
pub const MAX_LANE_COUNT: u64 = 6;

/// An invalid comphy argument.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ComphyError {
    /// The base address doesn't point to a comphy block.
    WrongAddress(u64),
    /// The lane number is out of range.
    WrongLane(u64),
}

impl Display for ComphyError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::WrongAddress(base) => write!(f, "wrong address: {base:#x}"),
            Self::WrongLane(lane) => write!(f, "wrong lane nr: {lane:#x}"),
        }
    }
}

/// Rewrites a base address given relative to the SD block to the comphy block of the same CP.
///
/// Some callers pass the SD physical address instead of the comphy one.
pub fn canonical_base(base: u64) -> u64 {
    if base & SD_OFFSET != 0 {
        (base & !OFFSET_MASK) | COMPHY_OFFSET
    } else {
        base
    }
}

/// A validated comphy lane.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ComphyLane {
    base: u64,
    index: u8,
}

impl ComphyLane {
    /// Validates the base address and lane index arguments of a comphy call.
    ///
    /// The address is canonicalised first, and is then checked before the lane.
    pub fn new(base: u64, lane: u64) -> Result<Self, ComphyError> {
        let base = canonical_base(base);
        if base & OFFSET_MASK != COMPHY_OFFSET {
            return Err(ComphyError::WrongAddress(base));
        }
        if lane >= MAX_LANE_COUNT {
            return Err(ComphyError::WrongLane(lane));
        }

        Ok(Self {
            base,
            index: lane as u8,
        })
    }

    /// Returns the canonical comphy base address.
    pub fn base(self) -> u64 {
        self.base
    }

    /// Returns the lane index.
    pub fn index(self) -> u8 {
        self.index
    }
}
