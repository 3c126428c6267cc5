// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! Functions called from the C parts of BL31.
//!
//! The C runtime service declaration for the SiP range forwards to [`rf_a_plat_sip_smc_handler`]
//! and writes its result to the caller's x0.

#[cfg(any(test, platform = "k3"))]
use crate::{
    context::{EntryPointInfo, next_image_entry_point},
    setup::{self, Bl31Params},
};
use crate::{
    context::World,
    platform::{Platform, PlatformImpl},
    services::Services,
    smccc::SmcReturn,
};
#[cfg(any(test, platform = "k3"))]
use core::{
    ffi::c_void,
    ptr::{self, NonNull},
};

/// Bit of the SMC flags which is set if the call came from Normal World.
const SMC_FROM_NON_SECURE: u64 = 1 << 0;

/// Initialises the logger on platforms whose early setup is done in C.
#[unsafe(no_mangle)]
pub extern "C" fn rf_a_plat_init_early(arg0: u64, arg1: u64, arg2: u64, arg3: u64) {
    PlatformImpl::init_early(arg0, arg1, arg2, arg3);
}

/// Handles an SMC call in the SiP range, returning the value for x0.
#[unsafe(no_mangle)]
pub extern "C" fn rf_a_plat_sip_smc_handler(
    smc_fid: u32,
    x1: u64,
    x2: u64,
    x3: u64,
    x4: u64,
    flags: u64,
) -> u64 {
    let world = if flags & SMC_FROM_NON_SECURE != 0 {
        World::NonSecure
    } else {
        World::Secure
    };
    let mut regs = SmcReturn::EMPTY;
    regs.mark_all_used()[..5].copy_from_slice(&[smc_fid.into(), x1, x2, x3, x4]);

    Services::get().handle_smc(&mut regs, world);

    regs.values().first().copied().unwrap_or_default()
}

/// `bl31_early_platform_setup` for BL31 as the reset vector. Both pointers must be null.
#[cfg(any(test, platform = "k3"))]
#[unsafe(no_mangle)]
pub extern "C" fn bl31_early_platform_setup(
    from_bl2: Option<NonNull<Bl31Params>>,
    plat_params_from_bl2: Option<NonNull<c_void>>,
) {
    if let Err(e) = setup::bl31_early_platform_setup(from_bl2, plat_params_from_bl2) {
        panic!("Early platform setup failed: {e}");
    }
}

/// `bl31_early_platform_setup2` for BL31 as the reset vector.
#[cfg(any(test, platform = "k3"))]
#[unsafe(no_mangle)]
pub extern "C" fn bl31_early_platform_setup2(arg0: u64, arg1: u64, arg2: u64, arg3: u64) {
    if let Err(e) = setup::bl31_early_platform_setup2(arg0, arg1, arg2, arg3) {
        panic!("Early platform setup failed: {e}");
    }
}

/// Returns the entry point of the next image for the given security state (0 for secure, 1 for
/// non-secure), or null if there is no such image.
#[cfg(any(test, platform = "k3"))]
#[unsafe(no_mangle)]
pub extern "C" fn rf_a_plat_get_next_image_ep_info(security_state: u32) -> *const EntryPointInfo {
    World::try_from(security_state)
        .ok()
        .and_then(next_image_entry_point)
        .map_or(ptr::null(), ptr::from_ref)
}
