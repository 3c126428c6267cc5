// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

use super::Platform;
use crate::{
    console::ConsoleSink,
    logger,
    services::sip::{SipPlatformInterface, SipService},
};

// SoC drivers in the Marvell platform library.
unsafe extern "C" {
    safe fn mvebu_cp110_comphy_power_on(comphy_base: u64, comphy_index: u8, mode: u64) -> i32;
    safe fn mvebu_cp110_comphy_power_off(comphy_base: u64, comphy_index: u8) -> i32;
    safe fn mvebu_cp110_comphy_is_pll_locked(comphy_base: u64, comphy_index: u8) -> i32;
    safe fn mvebu_cp110_comphy_xfi_rx_training(comphy_base: u64, comphy_index: u8) -> i32;
    safe fn mvebu_cp110_comphy_digital_reset(
        comphy_base: u64,
        comphy_index: u8,
        comphy_mode: u32,
        command: u32,
    ) -> i32;
    safe fn mvebu_get_dram_size(ap_base_addr: u64) -> u32;
    safe fn ap_get_count() -> i32;
    safe fn llc_runtime_enable(ap_index: i32);
    #[cfg(feature = "pmu_irq_wa")]
    safe fn mvebu_pmu_interrupt_enable();
    #[cfg(feature = "pmu_irq_wa")]
    safe fn mvebu_pmu_interrupt_disable();
}

/// Sign-extends a C `int` status to the register width, as the SMC return path does.
fn status(ret: i32) -> u64 {
    i64::from(ret) as u64
}

/// Marvell Armada 7K/8K.
///
/// BL31 is loaded by BL2, and the C platform setup takes the next image entry points from it.
pub struct Armada;

impl Platform for Armada {
    type LogSinkImpl = ConsoleSink;
    type PlatformServiceImpl = SipService<ArmadaSipPlatform>;

    fn init_early(_arg0: u64, _arg1: u64, _arg2: u64, _arg3: u64) {
        // The console itself is registered by the C platform setup.
        logger::init(ConsoleSink::new()).expect("Failed to initialise logger");
    }

    fn create_service() -> Self::PlatformServiceImpl {
        SipService::new(ArmadaSipPlatform)
    }
}

/// The CP110 comphy, DRAM, LLC and PMU drivers.
pub struct ArmadaSipPlatform;

impl SipPlatformInterface for ArmadaSipPlatform {
    const PMU_IRQ_WORKAROUND: bool = cfg!(feature = "pmu_irq_wa");

    fn comphy_power_on(&self, base: u64, lane: u8, mode: u64) -> u64 {
        status(mvebu_cp110_comphy_power_on(base, lane, mode))
    }

    fn comphy_power_off(&self, base: u64, lane: u8) -> u64 {
        status(mvebu_cp110_comphy_power_off(base, lane))
    }

    fn comphy_is_pll_locked(&self, base: u64, lane: u8) -> u64 {
        status(mvebu_cp110_comphy_is_pll_locked(base, lane))
    }

    fn comphy_xfi_rx_training(&self, base: u64, lane: u8) -> u64 {
        status(mvebu_cp110_comphy_xfi_rx_training(base, lane))
    }

    fn comphy_digital_reset(&self, base: u64, lane: u8, mode: u64, command: u64) -> u64 {
        // The driver takes 32-bit mode and command words.
        status(mvebu_cp110_comphy_digital_reset(
            base,
            lane,
            mode as u32,
            command as u32,
        ))
    }

    fn dram_size(&self, ap_base: u64) -> u64 {
        mvebu_get_dram_size(ap_base).into()
    }

    fn ap_count(&self) -> usize {
        usize::try_from(ap_get_count()).unwrap_or(0)
    }

    fn llc_runtime_enable(&self, ap_index: usize) {
        // `ap_index` is below `ap_get_count()`, so it fits.
        llc_runtime_enable(ap_index as i32);
    }

    #[cfg(feature = "pmu_irq_wa")]
    fn pmu_interrupt_enable(&self) {
        mvebu_pmu_interrupt_enable();
    }

    #[cfg(feature = "pmu_irq_wa")]
    fn pmu_interrupt_disable(&self) {
        mvebu_pmu_interrupt_disable();
    }
}
