// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

use super::{Platform, ResetVectorPlatform};
use crate::{
    logger::{self, LogSink},
    services::sip::{SipPlatformInterface, SipService},
};
use core::fmt;
use spin::mutex::SpinMutex;
use std::{
    fmt::Write as _,
    io::{Write as _, stdout},
};

static CAPTURED_LOGS: SpinMutex<String> = SpinMutex::new(String::new());

/// A fake platform for unit tests.
pub struct TestPlatform;

impl TestPlatform {
    /// The number of APs reported by the SiP drivers of the global services.
    pub const AP_COUNT: usize = 2;
}

impl Platform for TestPlatform {
    type LogSinkImpl = TestLogSink;
    type PlatformServiceImpl = SipService<FakeSipPlatform>;

    fn init_early(_arg0: u64, _arg1: u64, _arg2: u64, _arg3: u64) {
        init_test_logger();
    }

    fn create_service() -> Self::PlatformServiceImpl {
        SipService::new(FakeSipPlatform::new(Self::AP_COUNT))
    }
}

impl ResetVectorPlatform for TestPlatform {
    const BL32_BASE: Option<usize> = Some(0x9e80_0000);
    const BL33_BASE: usize = 0x8008_0000;
    const HW_CONFIG_BASE: Option<u64> = Some(0x8200_0000);
}

/// Installs the test log sink, unless some other test has done so already.
pub fn init_test_logger() {
    // Tests run in parallel and share the one global logger, so only the first call succeeds.
    let _ = logger::init(TestLogSink);
}

/// Returns everything logged through the test log sink so far, by all tests.
pub fn captured_logs() -> String {
    CAPTURED_LOGS.lock().clone()
}

/// A log sink for tests which writes logs to standard output, and keeps a copy for tests to check.
pub struct TestLogSink;

impl LogSink for TestLogSink {
    fn write_fmt(&self, args: fmt::Arguments) {
        CAPTURED_LOGS.lock().write_fmt(args).unwrap();
        stdout().write_fmt(args).unwrap();
    }

    fn flush(&self) {
        stdout().flush().unwrap();
    }
}

/// A call made to the fake SiP drivers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SipBackendCall {
    ComphyPowerOn { base: u64, lane: u8, mode: u64 },
    ComphyPowerOff { base: u64, lane: u8 },
    ComphyIsPllLocked { base: u64, lane: u8 },
    ComphyXfiRxTraining { base: u64, lane: u8 },
    ComphyDigitalReset { base: u64, lane: u8, mode: u64, command: u64 },
    DramSize { ap_base: u64 },
    LlcRuntimeEnable { ap_index: usize },
    PmuInterruptEnable,
    PmuInterruptDisable,
}

#[derive(Default)]
struct FakeSipState {
    calls: Vec<SipBackendCall>,
    comphy_result: i64,
    pll_locked: bool,
}

/// Fake SiP drivers which record the calls made to them.
pub struct FakeSipPlatform<const PMU_IRQ_WORKAROUND: bool = false> {
    ap_count: usize,
    state: SpinMutex<FakeSipState>,
}

impl<const PMU_IRQ_WORKAROUND: bool> FakeSipPlatform<PMU_IRQ_WORKAROUND> {
    /// The DRAM size reported for any AP.
    pub const DRAM_SIZE: u64 = 0x1_0000_0000;

    /// Creates fake drivers for a system with the given number of APs.
    pub fn new(ap_count: usize) -> Self {
        Self {
            ap_count,
            state: SpinMutex::new(FakeSipState::default()),
        }
    }

    /// Returns the calls made so far, oldest first.
    pub fn calls(&self) -> Vec<SipBackendCall> {
        self.state.lock().calls.clone()
    }

    /// Sets the status returned by the comphy calls other than the PLL lock query.
    pub fn set_comphy_result(&self, result: i64) {
        self.state.lock().comphy_result = result;
    }

    /// Sets the PLL lock status reported for every lane.
    pub fn set_pll_locked(&self, locked: bool) {
        self.state.lock().pll_locked = locked;
    }

    fn record(&self, call: SipBackendCall) -> u64 {
        let mut state = self.state.lock();
        state.calls.push(call);
        state.comphy_result as u64
    }
}

impl<const PMU_IRQ_WORKAROUND: bool> SipPlatformInterface for FakeSipPlatform<PMU_IRQ_WORKAROUND> {
    const PMU_IRQ_WORKAROUND: bool = PMU_IRQ_WORKAROUND;

    fn comphy_power_on(&self, base: u64, lane: u8, mode: u64) -> u64 {
        self.record(SipBackendCall::ComphyPowerOn { base, lane, mode })
    }

    fn comphy_power_off(&self, base: u64, lane: u8) -> u64 {
        self.record(SipBackendCall::ComphyPowerOff { base, lane })
    }

    fn comphy_is_pll_locked(&self, base: u64, lane: u8) -> u64 {
        self.record(SipBackendCall::ComphyIsPllLocked { base, lane });
        self.state.lock().pll_locked.into()
    }

    fn comphy_xfi_rx_training(&self, base: u64, lane: u8) -> u64 {
        self.record(SipBackendCall::ComphyXfiRxTraining { base, lane })
    }

    fn comphy_digital_reset(&self, base: u64, lane: u8, mode: u64, command: u64) -> u64 {
        self.record(SipBackendCall::ComphyDigitalReset {
            base,
            lane,
            mode,
            command,
        })
    }

    fn dram_size(&self, ap_base: u64) -> u64 {
        self.record(SipBackendCall::DramSize { ap_base });
        Self::DRAM_SIZE
    }

    fn ap_count(&self) -> usize {
        self.ap_count
    }

    fn llc_runtime_enable(&self, ap_index: usize) {
        self.record(SipBackendCall::LlcRuntimeEnable { ap_index });
    }

    fn pmu_interrupt_enable(&self) {
        self.record(SipBackendCall::PmuInterruptEnable);
    }

    fn pmu_interrupt_disable(&self) {
        self.record(SipBackendCall::PmuInterruptDisable);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_logging() {
        let writer = TestLogSink;
        writeln!(writer, "hello");
        assert!(captured_logs().contains("hello\n"));
    }
}
