//! General-purpose register file.
//!
//! Reference storage for the 32 architectural integer registers. The pipeline
//! never touches it directly; it is reached through [`crate::soc::Platform`].

use super::constants::{NUM_GPRS, REG_ZERO};
use crate::isa::abi;

/// Thirty-two 64-bit integer registers; `x0` reads as zero and ignores writes.
#[derive(Clone, Debug, Default)]
pub struct RegisterFile {
    regs: [u64; NUM_GPRS],
}

impl RegisterFile {
    /// Creates a register file with every register cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads register `idx`.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Out-of-range indices read as zero.
    pub fn read(&self, idx: usize) -> u64 {
        if idx == REG_ZERO {
            0
        } else {
            self.regs.get(idx).copied().unwrap_or(0)
        }
    }

    /// Writes register `idx`. Writes to `x0` and out-of-range indices are dropped.
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx != REG_ZERO {
            if let Some(slot) = self.regs.get_mut(idx) {
                *slot = val;
            }
        }
    }

    /// Renders every register as `name value` rows, four per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (i, chunk) in self.regs.chunks(4).enumerate() {
            for (j, val) in chunk.iter().enumerate() {
                let idx = i * 4 + j;
                let name = format!("x{idx}({})", abi::name(idx));
                out.push_str(&format!("{name:<10} {val:#018x}  "));
            }
            out.push('\n');
        }
        out
    }
}
