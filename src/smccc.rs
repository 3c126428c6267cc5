// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! Types and helpers related to the SMC Calling Convention.

use core::fmt::{self, Debug, Display, Formatter};

const FAST_CALL: u32 = 0x8000_0000;
const SMC64: u32 = 0x4000_0000;
const OEN_MASK: u32 = 0x3f00_0000;
const OEN_SHIFT: u8 = 24;
const SVE_HINT: u32 = 1 << 16;
const RESERVED_BITS: u32 = 0x7f << 17;

/// The call completed successfully.
pub const SUCCESS: i32 = 0;

/// The call is not supported by the implementation.
///
/// This is also the value returned for function IDs which no service recognises.
pub const NOT_SUPPORTED: i32 = -1;

/// The type of an SMCCC call: whether it is a fast call or yielding call, and which calling
/// convention it uses.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SmcccCallType {
    /// An SMC32/HVC32 fast call.
    Fast32,
    /// An SMC64/HVC64 fast call.
    Fast64,
    /// A yielding call.
    Yielding,
}

/// The kind of entity which owns a range of function IDs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OwningEntity {
    /// Arm Architecture calls.
    ArmArchitectureService,
    /// CPU service calls.
    CPUService,
    /// Silicon Partner service calls.
    SiPService,
    /// OEM service calls.
    OEMService,
    /// Standard secure service calls, e.g. PSCI.
    StandardSecureService,
    /// Standard hypervisor service calls.
    StandardHypervisorService,
    /// Vendor specific hypervisor service calls.
    VendorSpecificHypervisorService,
    /// Vendor specific EL3 monitor calls.
    VendorSpecificEL3MonitorService,
    /// Trusted application calls.
    TrustedApplications,
    /// Trusted OS calls.
    TrustedOS,
    /// Reserved.
    Unknown,
}

/// Owning Entity Number (OEN)
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OwningEntityNumber(pub u8);

impl OwningEntityNumber {
    /// Arm Architecture calls.
    pub const ARM_ARCHITECTURE: Self = Self(0);
    /// CPU service calls.
    pub const CPU: Self = Self(1);
    /// Silicon Partner service calls.
    pub const SIP: Self = Self(2);
    /// OEM service calls.
    pub const OEM: Self = Self(3);
    /// Standard secure service calls.
    pub const STANDARD_SECURE: Self = Self(4);
    /// Standard hypervisor service calls.
    pub const STANDARD_HYPERVISOR: Self = Self(5);
    /// Vendor specific hypervisor service calls.
    pub const VENDOR_SPECIFIC_HYPERVISOR: Self = Self(6);
    /// Vendor specific EL3 monitor calls.
    pub const VENDOR_SPECIFIC_EL3_MONITOR: Self = Self(7);

    /// Returns the kind of entity this number is assigned to.
    pub fn oe(self) -> OwningEntity {
        match self {
            Self::ARM_ARCHITECTURE => OwningEntity::ArmArchitectureService,
            Self::CPU => OwningEntity::CPUService,
            Self::SIP => OwningEntity::SiPService,
            Self::OEM => OwningEntity::OEMService,
            Self::STANDARD_SECURE => OwningEntity::StandardSecureService,
            Self::STANDARD_HYPERVISOR => OwningEntity::StandardHypervisorService,
            Self::VENDOR_SPECIFIC_HYPERVISOR => OwningEntity::VendorSpecificHypervisorService,
            Self::VENDOR_SPECIFIC_EL3_MONITOR => OwningEntity::VendorSpecificEL3MonitorService,
            Self(48..=49) => OwningEntity::TrustedApplications,
            Self(50..=63) => OwningEntity::TrustedOS,
            _ => OwningEntity::Unknown,
        }
    }
}

impl Display for OwningEntityNumber {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An SMCCC function ID.
#[derive(Copy, Clone, Eq, PartialEq)]
#[repr(transparent)]
pub struct FunctionId(pub u32);

impl FunctionId {
    /// Returns the Owning Entity Number of the function ID.
    pub fn oen(self) -> OwningEntityNumber {
        OwningEntityNumber(((self.0 & OEN_MASK) >> OEN_SHIFT) as u8)
    }

    /// Returns the lower 16 bits of the function ID.
    pub fn number(self) -> u16 {
        self.0 as u16
    }

    /// Returns what type of call this is.
    pub fn call_type(self) -> SmcccCallType {
        if self.0 & FAST_CALL != 0 {
            if self.0 & SMC64 != 0 {
                SmcccCallType::Fast64
            } else {
                SmcccCallType::Fast32
            }
        } else {
            SmcccCallType::Yielding
        }
    }

    /// Clears the SVE hint bit.
    pub fn clear_sve_hint(&mut self) {
        self.0 &= !SVE_HINT
    }

    /// Returns false if this is a fast call but has any of bits 17-23 set.
    ///
    /// They are reserved for future use and should always be 0.
    pub fn valid(self) -> bool {
        self.call_type() == SmcccCallType::Yielding || self.0 & RESERVED_BITS == 0
    }
}

impl Display for FunctionId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl Debug for FunctionId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{:#010x} ({:?} OEN {} {:?})",
            self.0,
            self.call_type(),
            self.oen(),
            self.oen().oe()
        )
    }
}

/// The register values of an SMC call.
///
/// On entry to a service this holds the caller's x0-x17, with all of them marked as used. The
/// service then overwrites it with its return value, which usually uses fewer registers.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct SmcReturn {
    /// The number of elements from `values` that are actually used for this return.
    used: usize,
    values: [u64; Self::MAX_VALUES],
}

impl SmcReturn {
    /// The maximum number of registers which can be passed or returned.
    pub const MAX_VALUES: usize = 18;

    /// A return value which doesn't write to any registers.
    pub const EMPTY: Self = Self {
        used: 0,
        values: [0; Self::MAX_VALUES],
    };

    /// Returns a slice containing the used values.
    pub fn values(&self) -> &[u64] {
        &self.values[0..self.used]
    }

    /// Marks all registers as used, and returns a mutable slice over all of them.
    pub fn mark_all_used(&mut self) -> &mut [u64; Self::MAX_VALUES] {
        self.used = Self::MAX_VALUES;
        &mut self.values
    }
}

impl Debug for SmcReturn {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "SmcReturn([")?;
        let values = self.values();
        if let Some(first) = values.first() {
            write!(f, "{first:#x}")?;
            for value in &values[1..] {
                write!(f, ", {value:#x}")?;
            }
        }
        write!(f, "])")?;
        Ok(())
    }
}

/// Overwrites an [`SmcReturn`] with a value of some type.
pub trait SetFrom<T> {
    /// Replaces the contents with `value`, marking only the registers it needs as used.
    fn set_from(&mut self, value: T);
}

impl SetFrom<u64> for SmcReturn {
    fn set_from(&mut self, value: u64) {
        self.used = 1;
        self.values[0] = value;
    }
}

impl SetFrom<i32> for SmcReturn {
    fn set_from(&mut self, value: i32) {
        // Negative status codes are sign-extended to the register width.
        self.set_from(i64::from(value) as u64)
    }
}
