// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! Security states and the entry points of the images which run in them after BL31.

use arm_sysregs::SpsrEl3;
use core::{
    fmt::{self, Display, Formatter},
    ops::{Index, IndexMut},
};
use log::info;
use num_enum::TryFromPrimitive;
use spin::Once;

/// The number of security states with a next-stage image.
pub const WORLD_COUNT: usize = 2;

/// A security state.
#[derive(Copy, Clone, Debug, Eq, PartialEq, TryFromPrimitive)]
#[repr(u32)]
pub enum World {
    // The enum values must match the `SECURE` and `NON_SECURE` image types of the C interface.
    /// Secure world, running the BL32 secure payload.
    Secure = 0,
    /// Normal world, running the BL33 non-trusted firmware.
    NonSecure = 1,
}

impl World {
    fn index(self) -> usize {
        self as usize
    }
}

/// An array with one `T` for each world.
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub struct PerWorld<T>(pub [T; WORLD_COUNT]);

impl<T> Index<World> for PerWorld<T> {
    type Output = T;

    fn index(&self, world: World) -> &Self::Output {
        &self.0[world.index()]
    }
}

impl<T> IndexMut<World> for PerWorld<T> {
    fn index_mut(&mut self, world: World) -> &mut Self::Output {
        &mut self.0[world.index()]
    }
}

/// Information about the entry point for a next stage (e.g. BL32 or BL33).
///
/// Shared with C as:
///
/// ```c
/// struct rf_a_entry_point_info {
///     uintptr_t pc;
///     uint64_t spsr;
///     uint32_t security_state;
///     uint64_t args[4];
/// };
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(C)]
pub struct EntryPointInfo {
    /// The entry point address. Zero means that there is no image.
    pub pc: usize,
    /// The `spsr_el3` value to set before `eret`, to set the appropriate PSTATE.
    pub spsr: SpsrEl3,
    /// The security state in which the image runs.
    pub security_state: World,
    /// Boot arguments to pass in `x0`-`x3`.
    pub args: [u64; 4],
}

/// Returns the SPSR with which the secure payload is entered.
///
/// The payload runs at S-EL2 if the `sel2` feature is enabled, otherwise at S-EL1. All exceptions
/// are masked.
pub fn secure_spsr() -> SpsrEl3 {
    #[cfg(feature = "sel2")]
    let mode = SpsrEl3::M_AARCH64_EL2H;
    #[cfg(not(feature = "sel2"))]
    let mode = SpsrEl3::M_AARCH64_EL1H;

    SpsrEl3::D | SpsrEl3::A | SpsrEl3::I | SpsrEl3::F | mode
}

/// Returns the SPSR with which the non-secure image is entered: EL2 if it is implemented,
/// otherwise EL1. All exceptions are masked.
pub fn non_secure_spsr(el2_present: bool) -> SpsrEl3 {
    let mode = if el2_present {
        SpsrEl3::M_AARCH64_EL2H
    } else {
        SpsrEl3::M_AARCH64_EL1H
    };

    SpsrEl3::D | SpsrEl3::A | SpsrEl3::I | SpsrEl3::F | mode
}

/// An error registering an entry point.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EntryPointError {
    /// An entry point was already registered for the world.
    AlreadyRegistered(World),
}

impl Display for EntryPointError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::AlreadyRegistered(world) => {
                write!(f, "entry point for {world:?} world already registered")
            }
        }
    }
}

/// The entry points of the next-stage images, one for each world.
///
/// Each entry point is written once during cold boot, before any secondary core is released, and
/// only read after that.
pub struct EntryPointRegistry {
    entry_points: PerWorld<Once<EntryPointInfo>>,
}

impl EntryPointRegistry {
    /// Creates a registry with no entry points.
    pub const fn new() -> Self {
        Self {
            entry_points: PerWorld([const { Once::new() }; WORLD_COUNT]),
        }
    }

    /// Registers the entry point for the world given by its `security_state`.
    pub fn set(&self, entry_point: EntryPointInfo) -> Result<(), EntryPointError> {
        let world = entry_point.security_state;
        let mut stored = false;
        self.entry_points[world].call_once(|| {
            stored = true;
            entry_point
        });

        if stored {
            Ok(())
        } else {
            Err(EntryPointError::AlreadyRegistered(world))
        }
    }

    /// Returns the entry point of the image for the given world, or `None` if there is no such
    /// image.
    pub fn get(&self, world: World) -> Option<&EntryPointInfo> {
        match self.entry_points[world].get() {
            Some(entry_point) if entry_point.pc != 0 => Some(entry_point),
            _ => {
                info!("Requested nonexistent image: {world:?}");
                None
            }
        }
    }
}

impl Default for EntryPointRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The entry points registered by the early platform setup.
pub static ENTRY_POINTS: EntryPointRegistry = EntryPointRegistry::new();

/// Returns the entry point to hand over to in the given world, or `None` if there is no image for
/// it.
pub fn next_image_entry_point(world: World) -> Option<&'static EntryPointInfo> {
    ENTRY_POINTS.get(world)
}
