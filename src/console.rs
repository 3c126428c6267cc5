// Copyright The Rusted Firmware-A Contributors.
//
// SPDX-License-Identifier: BSD-3-Clause

//! Output through the consoles registered with the firmware console framework.

use crate::logger::{LockedWriter, LogSink};
use core::fmt::{self, Arguments, Write};

unsafe extern "C" {
    /// Outputs a character on all consoles registered for the current state, returning the
    /// character or a negative error code.
    safe fn console_putc(c: i32) -> i32;

    /// Flushes all consoles registered for the current state.
    safe fn console_flush();
}

/// The set of registered consoles, as a `fmt::Write` sink.
pub struct Console;

impl Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if console_putc(byte.into()) < 0 {
                return Err(fmt::Error);
            }
        }
        Ok(())
    }
}

/// Log sink writing whole lines to the registered consoles.
pub struct ConsoleSink {
    writer: LockedWriter<Console>,
}

impl ConsoleSink {
    /// Creates a sink writing to the registered consoles.
    pub const fn new() -> Self {
        Self {
            writer: LockedWriter::new(Console),
        }
    }
}

impl LogSink for ConsoleSink {
    fn write_fmt(&self, args: Arguments) {
        self.writer.write_fmt(args);
    }

    fn flush(&self) {
        console_flush();
    }
}
