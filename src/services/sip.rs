// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! Silicon Partner calls of the Marvell Armada platforms: comphy lane control, DRAM size query,
//! LLC enable and the PMU interrupt workaround.

pub mod comphy;

use crate::{
    context::World,
    services::{Service, owns},
    smccc::{FunctionId, NOT_SUPPORTED, OwningEntityNumber, SUCCESS, SetFrom, SmcReturn},
};
use comphy::ComphyLane;
use log::{debug, error};
use num_enum::TryFromPrimitive;

/// The value returned in x0 for calls which aren't handled.
const SMC_UNK: u64 = NOT_SUPPORTED as u64;

const COMPHY_FID_FIRST: u32 = ComphyFunction::PowerOn as u32;
const COMPHY_FID_LAST: u32 = ComphyFunction::DigitalReset as u32;

/// Comphy SiP function IDs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, TryFromPrimitive)]
#[repr(u32)]
pub enum ComphyFunction {
    /// x1: comphy base, x2: lane, x3: mode.
    PowerOn = 0x8200_0001,
    /// x1: comphy base, x2: lane.
    PowerOff = 0x8200_0002,
    /// x1: comphy base, x2: lane.
    PllLock = 0x8200_0003,
    /// x1: comphy base, x2: lane.
    XfiTrain = 0x8200_0004,
    /// x1: comphy base, x2: lane, x3: mode, x4: command.
    DigitalReset = 0x8200_0005,
}

/// Miscellaneous SiP function IDs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, TryFromPrimitive)]
#[repr(u32)]
pub enum MiscFunction {
    /// x1: AP base address.
    DramSize = 0x8200_0010,
    /// No arguments.
    LlcEnable = 0x8200_0011,
    /// No arguments.
    PmuIrqEnable = 0x8200_0012,
    /// No arguments.
    PmuIrqDisable = 0x8200_0013,
}

/// A decoded SiP function ID.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SipCall {
    /// One of the comphy calls, whose base and lane arguments must be validated.
    Comphy(ComphyFunction),
    /// Any other supported call.
    Misc(MiscFunction),
    /// A function ID which this platform doesn't handle.
    Unknown(FunctionId),
}

impl SipCall {
    /// Decodes the given function ID, ignoring the SVE hint bit.
    ///
    /// The PMU interrupt calls are only recognised if `pmu_irq_workaround` is set.
    pub fn decode(mut function: FunctionId, pmu_irq_workaround: bool) -> Self {
        function.clear_sve_hint();

        match function.0 {
            COMPHY_FID_FIRST..=COMPHY_FID_LAST => ComphyFunction::try_from(function.0)
                .map_or(Self::Unknown(function), Self::Comphy),
            fid => match MiscFunction::try_from(fid) {
                Ok(MiscFunction::PmuIrqEnable | MiscFunction::PmuIrqDisable)
                    if !pmu_irq_workaround =>
                {
                    Self::Unknown(function)
                }
                Ok(misc) => Self::Misc(misc),
                Err(_) => Self::Unknown(function),
            },
        }
    }
}

/// The function ID and arguments of a SiP call.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SipRequest {
    /// The function ID from w0.
    pub function: FunctionId,
    /// First argument.
    pub x1: u64,
    /// Second argument.
    pub x2: u64,
    /// Third argument.
    pub x3: u64,
    /// Fourth argument.
    pub x4: u64,
}

impl SipRequest {
    /// Reads the request from the caller's registers. Missing registers read as 0.
    pub fn from_regs(regs: &[u64]) -> Self {
        let reg = |index: usize| regs.get(index).copied().unwrap_or_default();

        Self {
            function: FunctionId(reg(0) as u32),
            x1: reg(1),
            x2: reg(2),
            x3: reg(3),
            x4: reg(4),
        }
    }
}

/// The SoC drivers behind the SiP calls.
///
/// Return values are passed back to the caller in x0 unchanged.
pub trait SipPlatformInterface {
    /// Whether the PMU interrupt enable and disable calls are provided.
    const PMU_IRQ_WORKAROUND: bool = false;

    /// Powers on the given comphy lane in the given mode.
    fn comphy_power_on(&self, base: u64, lane: u8, mode: u64) -> u64;

    /// Powers off the given comphy lane.
    fn comphy_power_off(&self, base: u64, lane: u8) -> u64;

    /// Returns the PLL lock status of the given comphy lane.
    fn comphy_is_pll_locked(&self, base: u64, lane: u8) -> u64;

    /// Runs XFI receiver training on the given comphy lane.
    fn comphy_xfi_rx_training(&self, base: u64, lane: u8) -> u64;

    /// Asserts or clears the digital reset of the given comphy lane.
    fn comphy_digital_reset(&self, base: u64, lane: u8, mode: u64, command: u64) -> u64;

    /// Returns the size of the DRAM behind the AP with the given base address.
    fn dram_size(&self, ap_base: u64) -> u64;

    /// Returns the number of APs present.
    fn ap_count(&self) -> usize;

    /// Enables the last level cache of the given AP.
    fn llc_runtime_enable(&self, ap_index: usize);

    /// Unmasks the PMU overflow interrupt.
    fn pmu_interrupt_enable(&self) {}

    /// Masks the PMU overflow interrupt.
    fn pmu_interrupt_disable(&self) {}
}

/// SiP service routing calls to the SoC drivers.
pub struct SipService<P: SipPlatformInterface> {
    platform: P,
    pmu_irq_workaround: bool,
}

impl<P: SipPlatformInterface> SipService<P> {
    /// Creates a new SiP service backed by the given drivers.
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            pmu_irq_workaround: P::PMU_IRQ_WORKAROUND,
        }
    }

    /// Returns the drivers backing the service.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Handles the given call, returning the value for x0.
    pub fn dispatch(&self, request: &SipRequest) -> u64 {
        debug!(
            "SiP call {} x1 {:#x}, x2 {:#x}, x3 {:#x}",
            request.function, request.x1, request.x2, request.x3
        );

        match SipCall::decode(request.function, self.pmu_irq_workaround) {
            SipCall::Comphy(function) => match ComphyLane::new(request.x1, request.x2) {
                Ok(lane) => self.comphy(function, lane, request),
                Err(e) => {
                    error!("SiP call {}: {e}", request.function);
                    SMC_UNK
                }
            },
            SipCall::Misc(function) => self.misc(function, request),
            SipCall::Unknown(_) => {
                error!("Unhandled SiP call {}", request.function);
                SMC_UNK
            }
        }
    }

    fn comphy(&self, function: ComphyFunction, lane: ComphyLane, request: &SipRequest) -> u64 {
        let (base, index) = (lane.base(), lane.index());

        match function {
            ComphyFunction::PowerOn => self.platform.comphy_power_on(base, index, request.x3),
            ComphyFunction::PowerOff => self.platform.comphy_power_off(base, index),
            ComphyFunction::PllLock => self.platform.comphy_is_pll_locked(base, index),
            ComphyFunction::XfiTrain => self.platform.comphy_xfi_rx_training(base, index),
            ComphyFunction::DigitalReset => {
                let (mode, command) = (request.x3, request.x4);
                self.platform.comphy_digital_reset(base, index, mode, command)
            }
        }
    }

    fn misc(&self, function: MiscFunction, request: &SipRequest) -> u64 {
        match function {
            MiscFunction::DramSize => self.platform.dram_size(request.x1),
            MiscFunction::LlcEnable => {
                for ap_index in 0..self.platform.ap_count() {
                    self.platform.llc_runtime_enable(ap_index);
                }
                SUCCESS as u64
            }
            MiscFunction::PmuIrqEnable => {
                self.platform.pmu_interrupt_enable();
                SUCCESS as u64
            }
            MiscFunction::PmuIrqDisable => {
                self.platform.pmu_interrupt_disable();
                SUCCESS as u64
            }
        }
    }

    fn handle_smc(&self, regs: &mut SmcReturn) {
        let request = SipRequest::from_regs(regs.values());
        regs.set_from(self.dispatch(&request));
    }
}

impl<P: SipPlatformInterface> Service for SipService<P> {
    owns!(OwningEntityNumber::SIP);

    fn handle_non_secure_smc(&self, regs: &mut SmcReturn) -> World {
        self.handle_smc(regs);
        World::NonSecure
    }

    fn handle_secure_smc(&self, regs: &mut SmcReturn) -> World {
        self.handle_smc(regs);
        World::Secure
    }
}
