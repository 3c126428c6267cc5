// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

use super::{Platform, ResetVectorPlatform};
use crate::{console::ConsoleSink, logger, services::DummyService};

/// TI K3 family, with BL31 as the reset vector of the A53/A72 cluster.
pub struct K3;

impl Platform for K3 {
    type LogSinkImpl = ConsoleSink;
    type PlatformServiceImpl = DummyService;

    fn init_early(_arg0: u64, _arg1: u64, _arg2: u64, _arg3: u64) {
        logger::init(ConsoleSink::new()).expect("Failed to initialise logger");
    }

    fn create_service() -> Self::PlatformServiceImpl {
        DummyService
    }
}

impl ResetVectorPlatform for K3 {
    const BL32_BASE: Option<usize> = Some(0x9e80_0000);
    const BL33_BASE: usize = 0x8008_0000;
    // Device tree blob for BL33.
    const HW_CONFIG_BASE: Option<u64> = Some(0x8200_0000);
}
