// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! BL31 platform layer: the SiP SMC service of the platform, and the entry points of the images
//! which BL31 hands over to when it runs as the reset vector.
//!
//! The C parts of BL31 call in through the functions in [`exports`].

#![cfg_attr(all(target_os = "none", not(test)), no_std)]

#[cfg(not(test))]
mod console;
pub mod context;
mod debug;
pub mod exports;
pub mod logger;
pub mod platform;
pub mod services;
#[cfg(any(test, platform = "k3"))]
pub mod setup;
pub mod smccc;
pub mod sysregs;

use context::{
    EntryPointError, EntryPointInfo, EntryPointRegistry, World, non_secure_spsr, secure_spsr,
};
use log::debug;
use platform::ResetVectorPlatform;

/// Registers the entry points of the images of platform `P` in `registry`.
///
/// BL33 is entered at EL2 if `el2_present`, otherwise at EL1. If the platform has a hardware
/// configuration blob its address is passed to BL33 in x0, as Linux expects of a device tree.
pub fn populate_entry_points<P: ResetVectorPlatform>(
    registry: &EntryPointRegistry,
    el2_present: bool,
) -> Result<(), EntryPointError> {
    if let Some(pc) = P::BL32_BASE {
        debug!("BL32 entry point {pc:#x}");
        registry.set(EntryPointInfo {
            pc,
            spsr: secure_spsr(),
            security_state: World::Secure,
            args: [0; 4],
        })?;
    }

    // x1-x3 are reserved and must be 0.
    let args = match P::HW_CONFIG_BASE {
        Some(hw_config) => [hw_config, 0, 0, 0],
        None => [0; 4],
    };
    debug!("BL33 entry point {:#x}, EL2 present: {el2_present}", P::BL33_BASE);
    registry.set(EntryPointInfo {
        pc: P::BL33_BASE,
        spsr: non_secure_spsr(el2_present),
        security_state: World::NonSecure,
        args,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        platform::{Platform, TestLogSink, TestPlatform},
        services::DummyService,
    };
    use arm_sysregs::SpsrEl3;

    /// A platform with neither a secure payload nor a hardware configuration blob.
    struct NonSecureOnly;

    impl Platform for NonSecureOnly {
        type LogSinkImpl = TestLogSink;
        type PlatformServiceImpl = DummyService;

        fn init_early(_arg0: u64, _arg1: u64, _arg2: u64, _arg3: u64) {}

        fn create_service() -> Self::PlatformServiceImpl {
            DummyService
        }
    }

    impl ResetVectorPlatform for NonSecureOnly {
        const BL32_BASE: Option<usize> = None;
        const BL33_BASE: usize = 0x0400_0000;
        const HW_CONFIG_BASE: Option<u64> = None;
    }

    #[test]
    fn entry_points_with_secure_payload() {
        let registry = EntryPointRegistry::new();

        populate_entry_points::<TestPlatform>(&registry, false).unwrap();

        assert_eq!(
            registry.get(World::Secure),
            Some(&EntryPointInfo {
                pc: 0x9e80_0000,
                spsr: secure_spsr(),
                security_state: World::Secure,
                args: [0; 4],
            })
        );
        assert_eq!(
            registry.get(World::NonSecure),
            Some(&EntryPointInfo {
                pc: 0x8008_0000,
                spsr: SpsrEl3::D | SpsrEl3::A | SpsrEl3::I | SpsrEl3::F | SpsrEl3::M_AARCH64_EL1H,
                security_state: World::NonSecure,
                args: [0x8200_0000, 0, 0, 0],
            })
        );
    }

    #[test]
    fn entry_points_without_secure_payload() {
        let registry = EntryPointRegistry::new();

        populate_entry_points::<NonSecureOnly>(&registry, true).unwrap();

        assert_eq!(registry.get(World::Secure), None);
        let bl33 = registry.get(World::NonSecure).unwrap();
        assert_eq!(bl33.pc, 0x0400_0000);
        assert_eq!(bl33.args, [0; 4]);
        assert_eq!(
            bl33.spsr,
            SpsrEl3::D | SpsrEl3::A | SpsrEl3::I | SpsrEl3::F | SpsrEl3::M_AARCH64_EL2H
        );
    }

    #[test]
    fn entry_points_populated_once() {
        let registry = EntryPointRegistry::new();

        populate_entry_points::<NonSecureOnly>(&registry, true).unwrap();

        assert_eq!(
            populate_entry_points::<NonSecureOnly>(&registry, false),
            Err(EntryPointError::AlreadyRegistered(World::NonSecure))
        );
    }
}
