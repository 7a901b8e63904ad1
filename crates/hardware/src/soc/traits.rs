//! Platform trait: the core's only view of architectural state.
//!
//! The pipeline never stores the program counter, register values or memory
//! contents itself. Everything goes through [`Platform`]. It provides:
//! 1. **Memory:** Reads and writes of 1, 2, 4, 8 or 16 bytes, plus a readiness
//!    predicate polled by the two-phase cache fill.
//! 2. **Registers:** Indexed integer register access; `x0` is never written by the core.
//! 3. **Program counter:** The single architectural PC.

use crate::common::error::MemoryFault;

/// The architectural state and backing store a core runs against.
///
/// Reads deliver their bytes immediately; timing is modelled separately by
/// [`Platform::memory_ready`], which the caches poll before committing a fill.
pub trait Platform {
    /// Reads `buf.len()` bytes starting at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryFault::Read`] when the range is not backed.
    fn read_memory(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), MemoryFault>;

    /// Writes the low `size` bytes of `value` (little-endian) at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryFault::Write`] when the range is not backed.
    fn write_memory(&mut self, addr: u64, value: u64, size: usize) -> Result<(), MemoryFault>;

    /// Polls whether the read most recently issued at `addr` has completed.
    fn memory_ready(&mut self, addr: u64) -> bool;

    /// Reads integer register `idx`.
    fn read_register(&self, idx: usize) -> u64;

    /// Writes integer register `idx`.
    fn write_register(&mut self, idx: usize, value: u64);

    /// Current program counter.
    fn get_pc(&self) -> u64;

    /// Sets the program counter.
    fn set_pc(&mut self, pc: u64);
}
