//! Reference platform and the top-level `System` type.
//!
//! This module assembles the state a core runs against. It performs:
//! 1. **Memory setup:** Flat RAM with the configured latency model.
//! 2. **Register state:** The architectural register file and program counter.
//! 3. **Platform binding:** Implements [`Platform`] over both.

use crate::common::error::{LoadError, MemoryFault};
use crate::common::reg::RegisterFile;
use crate::config::Config;
use crate::soc::memory::FlatMemory;
use crate::soc::traits::Platform;

/// Architectural state plus memory: everything outside the pipeline.
#[derive(Debug)]
pub struct System {
    /// Main memory.
    pub memory: FlatMemory,
    /// Integer register file.
    pub regs: RegisterFile,
    pc: u64,
}

impl System {
    /// Builds a system from configuration, with the PC at `general.start_pc`.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulator configuration (memory map, latency, start PC).
    ///
    /// # Returns
    ///
    /// A `System` with zeroed memory and registers.
    pub fn new(config: &Config) -> Self {
        Self::with_memory(FlatMemory::new(&config.memory), config.general.start_pc)
    }

    /// Builds a system around an existing memory.
    pub fn with_memory(memory: FlatMemory, pc: u64) -> Self {
        Self {
            memory,
            regs: RegisterFile::new(),
            pc,
        }
    }

    /// Loads raw bytes into memory at `addr`.
    ///
    /// # Errors
    ///
    /// [`LoadError::OutOfRange`] when the bytes fall outside RAM.
    pub fn load_binary_at(&mut self, data: &[u8], addr: u64) -> Result<(), LoadError> {
        self.memory.load(addr, data)
    }
}

impl Platform for System {
    fn read_memory(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), MemoryFault> {
        self.memory.read(addr, buf)
    }

    fn write_memory(&mut self, addr: u64, value: u64, size: usize) -> Result<(), MemoryFault> {
        self.memory.write(addr, value, size)
    }

    fn memory_ready(&mut self, addr: u64) -> bool {
        self.memory.ready(addr)
    }

    fn read_register(&self, idx: usize) -> u64 {
        self.regs.read(idx)
    }

    fn write_register(&mut self, idx: usize, value: u64) {
        self.regs.write(idx, value);
    }

    fn get_pc(&self) -> u64 {
        self.pc
    }

    fn set_pc(&mut self, pc: u64) {
        self.pc = pc;
    }
}
