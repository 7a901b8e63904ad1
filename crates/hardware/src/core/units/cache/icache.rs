//! Instruction-cache access path.
//!
//! The default geometry is 512 lines of 16 bytes: offset `addr[3:0]` (bits 3:2
//! select one of four words), index `addr[12:4]`, tag `addr >> 13`.

use super::{Cache, le_value};
use crate::common::constants::INSTRUCTION_BYTES;

/// Reads the instruction word at `pc` on a hit.
pub fn fetch_word(cache: &mut Cache, pc: u64) -> Option<u32> {
    cache
        .lookup(pc, INSTRUCTION_BYTES as usize)
        .map(|bytes| le_value(bytes) as u32)
}
