// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! Build script for the platform layer.

use std::env;

const PLATFORMS: [&str; 2] = ["armada", "k3"];
const DEFAULT_PLATFORM: &str = "armada";

fn main() {
    println!(
        "cargo::rustc-check-cfg=cfg(platform, values(\"{}\"))",
        PLATFORMS.join("\", \""),
    );
    println!("cargo::rerun-if-env-changed=LOG_LEVEL");

    match env::var("CARGO_CFG_PLATFORM") {
        Ok(platform) => {
            if !PLATFORMS.contains(&platform.as_str()) {
                panic!("Unknown platform {platform}");
            }
        }
        Err(_) => println!("cargo::rustc-cfg=platform=\"{DEFAULT_PLATFORM}\""),
    }
}
