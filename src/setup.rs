// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! Early platform setup for platforms on which BL31 is the reset vector.

use crate::{
    context::{ENTRY_POINTS, EntryPointError},
    platform::{Platform, PlatformImpl},
    populate_entry_points,
    sysregs::is_feat_el2_present,
};
use core::{ffi::c_void, ptr::NonNull};

/// Parameters handed over by BL2 (`bl31_params_t`).
///
/// BL31 only supports running as the reset vector, so there never are any.
#[repr(C)]
pub struct Bl31Params {
    _private: [u8; 0],
}

/// Early platform setup with the legacy BL2 parameters.
///
/// Both pointers must be null, as there is no BL2 before BL31. Registers the entry points of
/// BL32, if the platform has one, and BL33.
pub fn bl31_early_platform_setup(
    from_bl2: Option<NonNull<Bl31Params>>,
    plat_params_from_bl2: Option<NonNull<c_void>>,
) -> Result<(), EntryPointError> {
    // There are no parameters from BL2 if BL31 is a reset vector.
    assert!(from_bl2.is_none());
    assert!(plat_params_from_bl2.is_none());

    populate_entry_points::<PlatformImpl>(&ENTRY_POINTS, is_feat_el2_present())
}

/// Early platform setup with the arguments passed to BL31 in x0-x3 at reset.
///
/// Initialises the logger, then treats `arg0` and `arg1` as the BL2 parameter pointers of
/// [`bl31_early_platform_setup`].
pub fn bl31_early_platform_setup2(
    arg0: u64,
    arg1: u64,
    arg2: u64,
    arg3: u64,
) -> Result<(), EntryPointError> {
    PlatformImpl::init_early(arg0, arg1, arg2, arg3);

    bl31_early_platform_setup(
        NonNull::new(arg0 as usize as *mut Bl31Params),
        NonNull::new(arg1 as usize as *mut c_void),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn early_platform_setup_with_bl2_params() {
        let _ = bl31_early_platform_setup(Some(NonNull::dangling()), None);
    }

    #[test]
    #[should_panic]
    fn early_platform_setup2_with_platform_params() {
        let _ = bl31_early_platform_setup2(0, 0x8000_0000, 0, 0);
    }
}
