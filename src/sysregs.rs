// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! Feature register queries.

use arm_sysregs::read_id_aa64pfr0_el1;

/// Returns whether EL2 is implemented, according to `ID_AA64PFR0_EL1.EL2`.
pub fn is_feat_el2_present() -> bool {
    read_id_aa64pfr0_el1().el2() != 0
}
