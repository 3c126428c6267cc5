// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! Platform hooks, and the selection of the platform being built for.

macro_rules! select_platform {
    (platform = $condition:literal, $mod:ident::$plat_impl:ident) => {
        #[cfg(all(platform = $condition, not(test)))]
        mod $mod;

        #[cfg(all(platform = $condition, not(test)))]
        pub use $mod::$plat_impl as PlatformImpl;
    };
    (test, $mod:ident::$plat_impl:ident) => {
        #[cfg(test)]
        mod $mod;

        #[cfg(test)]
        pub use $mod::$plat_impl as PlatformImpl;
    };
}

select_platform!(platform = "armada", armada::Armada);
select_platform!(platform = "k3", k3::K3);
select_platform!(test, test::TestPlatform);

#[cfg(test)]
pub(crate) use test::{
    FakeSipPlatform, SipBackendCall, TestLogSink, TestPlatform, captured_logs, init_test_logger,
};

use crate::{logger::LogSink, services::Service};

/// Type alias for convenience, to avoid having to use the complicated type name everywhere.
pub type LogSinkImpl = <PlatformImpl as Platform>::LogSinkImpl;

/// The service handling the platform's SiP calls.
pub type PlatformServiceImpl = <PlatformImpl as Platform>::PlatformServiceImpl;

/// The hooks implemented by all platforms.
pub trait Platform {
    /// Platform dependent LogSink implementation type for Logger.
    type LogSinkImpl: LogSink;

    /// Service that handles platform-specific SMC calls.
    type PlatformServiceImpl: Service;

    /// Initialises the logger and anything else the platform needs, given the arguments passed to
    /// BL31 by the stage before it.
    ///
    /// Any logs sent before this is called will be ignored.
    fn init_early(arg0: u64, arg1: u64, arg2: u64, arg3: u64);

    /// Creates instance of PlatformServiceImpl.
    ///
    /// This is used for dispatching platform-specific SMCs.
    ///
    /// TODO: provide default implementation with DummyService
    /// once associated type defaults become stable
    /// see issue #29661 <https://github.com/rust-lang/rust/issues/29661>
    fn create_service() -> Self::PlatformServiceImpl;
}

/// A platform on which BL31 is the reset vector, so there is no BL2 to describe the next images.
/// They are preloaded at fixed addresses instead.
pub trait ResetVectorPlatform: Platform {
    /// The entry point of the secure payload (BL32), if there is one.
    const BL32_BASE: Option<usize>;

    /// The entry point of the non-trusted firmware (BL33).
    const BL33_BASE: usize;

    /// The address of the hardware configuration device tree passed to BL33 in x0, if known at
    /// build time.
    const HW_CONFIG_BASE: Option<u64>;
}
