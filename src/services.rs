// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! The runtime services which SMC calls are routed to.

pub mod sip;

use crate::{
    context::World,
    platform::{self, Platform, PlatformImpl},
    smccc::{FunctionId, NOT_SUPPORTED, SetFrom, SmcReturn},
};
use log::warn;
use spin::Lazy;

/// Helper macro to define the range of SMC function ID values covered by a service
macro_rules! owns {
    // service handles the entire Owning Entity Number (OEN)
    ($owning_entity:expr) => {
        #[inline(always)]
        fn owns(&self, function: $crate::smccc::FunctionId) -> bool {
            function.oen() == $owning_entity
                && matches!(
                    function.call_type(),
                    $crate::smccc::SmcccCallType::Fast32 | $crate::smccc::SmcccCallType::Fast64
                )
        }
    };
    // service handles a sub-range of the OEN
    // range refers to the lower 16 bits [15:0] of the SMC FunctionId
    ($owning_entity:expr, $range:expr) => {
        #[inline(always)]
        fn owns(&self, function: $crate::smccc::FunctionId) -> bool {
            function.oen() == $owning_entity
                && $range.contains(&function.number())
                && matches!(
                    function.call_type(),
                    $crate::smccc::SmcccCallType::Fast32 | $crate::smccc::SmcccCallType::Fast64
                )
        }
    };
}
pub(crate) use owns;

/// A service which handles some range of SMC calls.
///
/// According to SMCCC v1.3+ the implementation must disregard the SVE hint bit in the function ID
/// and consider it to be 0 for the purpose of function identification.
pub trait Service {
    /// Returns whether this service is intended to handle the given function ID.
    fn owns(&self, function: FunctionId) -> bool;

    /// Handles the given SMC call from Normal World.
    ///
    /// `regs` holds the caller's registers on entry and is replaced by the return value.
    fn handle_non_secure_smc(&self, regs: &mut SmcReturn) -> World {
        regs.set_from(NOT_SUPPORTED);
        World::NonSecure
    }

    /// Handles the given SMC call from Secure World.
    ///
    /// `regs` holds the caller's registers on entry and is replaced by the return value.
    fn handle_secure_smc(&self, regs: &mut SmcReturn) -> World {
        regs.set_from(NOT_SUPPORTED);
        World::Secure
    }
}

/// For platforms that do not want to implement any custom SMC handlers.
pub struct DummyService;

impl Service for DummyService {
    fn owns(&self, _function: FunctionId) -> bool {
        // Does not own any function id.
        false
    }
}

static SERVICES: Lazy<Services> = Lazy::new(Services::new);

/// Contains an instance of all of the currently implemented services.
pub struct Services {
    /// The platform's SiP service.
    pub platform: platform::PlatformServiceImpl,
}

impl Services {
    /// Returns a reference to the global Services instance.
    ///
    /// Also, initializes it if it hasn't been initialized yet.
    pub fn get() -> &'static Self {
        &SERVICES
    }

    fn new() -> Self {
        Self {
            platform: PlatformImpl::create_service(),
        }
    }

    /// Handles an SMC call trapped from the given world.
    ///
    /// `regs` holds x0-x17 of the caller on entry, and the values to return on exit. Returns the
    /// world to return to.
    pub fn handle_smc(&self, regs: &mut SmcReturn, world: World) -> World {
        let function = FunctionId(regs.values().first().copied().unwrap_or_default() as u32);

        if !function.valid() {
            warn!("Invalid SMC function ID {function:?}");
            regs.set_from(NOT_SUPPORTED);
            return world;
        }

        let service: &dyn Service = if self.platform.owns(function) {
            &self.platform
        } else {
            regs.set_from(NOT_SUPPORTED);
            return world;
        };

        match world {
            World::NonSecure => service.handle_non_secure_smc(regs),
            World::Secure => service.handle_secure_smc(regs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SipBackendCall;

    fn regs_for(x: &[u64]) -> SmcReturn {
        let mut regs = SmcReturn::EMPTY;
        regs.mark_all_used()[..x.len()].copy_from_slice(x);
        regs
    }

    /// Tests the SiP LLC enable call as a simple example of SMC dispatch.
    ///
    /// The point of this isn't to test every individual SMC call, just that the common code in
    /// `handle_smc` works. Individual SMC calls can be tested directly within their modules.
    #[test]
    fn handle_smc_sip_llc_enable() {
        let services = Services::new();

        // The SVE hint bit is set, and must be ignored.
        let mut regs = regs_for(&[0x8201_0011]);

        let new_world = services.handle_smc(&mut regs, World::NonSecure);

        assert_eq!(new_world, World::NonSecure);
        assert_eq!(regs.values(), [0]);
        assert_eq!(
            services.platform.platform().calls(),
            [
                SipBackendCall::LlcRuntimeEnable { ap_index: 0 },
                SipBackendCall::LlcRuntimeEnable { ap_index: 1 }
            ]
        );
    }

    #[test]
    fn handle_smc_from_secure_world() {
        let services = Services::new();
        let mut regs = regs_for(&[0x8200_0010, 0xf000_0000]);

        assert_eq!(services.handle_smc(&mut regs, World::Secure), World::Secure);
        assert_eq!(
            services.platform.platform().calls(),
            [SipBackendCall::DramSize {
                ap_base: 0xf000_0000
            }]
        );
    }

    #[test]
    fn handle_smc_other_owner() {
        let services = Services::new();
        // PSCI_VERSION, owned by the standard secure service.
        let mut regs = regs_for(&[0x8400_0000]);

        assert_eq!(
            services.handle_smc(&mut regs, World::NonSecure),
            World::NonSecure
        );
        assert_eq!(regs.values(), [NOT_SUPPORTED as u64]);
        assert!(services.platform.platform().calls().is_empty());
    }

    #[test]
    fn handle_smc_yielding_sip_call() {
        let services = Services::new();
        let mut regs = regs_for(&[0x0200_0011]);

        services.handle_smc(&mut regs, World::NonSecure);

        assert_eq!(regs.values(), [NOT_SUPPORTED as u64]);
        assert!(services.platform.platform().calls().is_empty());
    }

    #[test]
    fn handle_smc_reserved_bits() {
        let services = Services::new();
        let mut regs = regs_for(&[0x8202_0011]);

        services.handle_smc(&mut regs, World::NonSecure);

        assert_eq!(regs.values(), [NOT_SUPPORTED as u64]);
        assert!(services.platform.platform().calls().is_empty());
    }

    #[test]
    fn dummy_service_owns_nothing() {
        let mut regs = regs_for(&[0x8200_0011]);

        assert!(!DummyService.owns(FunctionId(0x8200_0011)));
        assert_eq!(DummyService.handle_secure_smc(&mut regs), World::Secure);
        assert_eq!(regs.values(), [NOT_SUPPORTED as u64]);
    }
}
