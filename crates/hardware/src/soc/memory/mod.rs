//! Reference main memory.
//!
//! This module implements the flat RAM the reference platform exposes. It provides:
//! 1. **Storage:** A `Vec<u8>` mapped at a base address; anything outside it faults.
//! 2. **Readiness:** Each read arms a countdown from the controller; `memory_ready`
//!    reports completion once the countdown expires. At most
//!    [`FlatMemory::MAX_OUTSTANDING`] countdowns are tracked; the oldest is
//!    dropped when a fill is abandoned and a new one is issued.
//! 3. **Controller:** Fixed or row-buffer latency models for that countdown.

/// Read-latency models.
pub mod controller;

use std::collections::VecDeque;

use self::controller::MemoryController;
use crate::common::error::{LoadError, MemoryFault};
use crate::config::MemoryConfig;

/// Byte-addressable RAM with a per-address readiness countdown.
#[derive(Debug)]
pub struct FlatMemory {
    base: u64,
    bytes: Vec<u8>,
    controller: Box<dyn MemoryController>,
    outstanding: VecDeque<(u64, u64)>,
}

impl FlatMemory {
    /// Countdowns kept before the oldest is forgotten.
    pub const MAX_OUTSTANDING: usize = 4;

    /// Creates zeroed memory from its configuration section.
    pub fn new(config: &MemoryConfig) -> Self {
        Self::with_controller(config.base, config.size, controller::from_config(config))
    }

    /// Creates zeroed memory with an explicit latency model.
    ///
    /// # Arguments
    ///
    /// * `base`       - First mapped address.
    /// * `size`       - Size in bytes.
    /// * `controller` - Latency model consulted on every read.
    pub fn with_controller(base: u64, size: usize, controller: Box<dyn MemoryController>) -> Self {
        Self {
            base,
            bytes: vec![0; size],
            controller,
            outstanding: VecDeque::with_capacity(Self::MAX_OUTSTANDING),
        }
    }

    /// First mapped address.
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Mapped size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    fn range(&self, addr: u64, len: usize) -> Option<std::ops::Range<usize>> {
        let start = usize::try_from(addr.checked_sub(self.base)?).ok()?;
        let end = start.checked_add(len)?;
        (end <= self.bytes.len()).then_some(start..end)
    }

    /// Copies `buf.len()` bytes from `addr` and arms the readiness countdown.
    ///
    /// # Errors
    ///
    /// [`MemoryFault::Read`] when any byte of the range is unmapped.
    pub fn read(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), MemoryFault> {
        let range = self.range(addr, buf.len()).ok_or(MemoryFault::Read {
            addr,
            size: buf.len(),
        })?;
        buf.copy_from_slice(&self.bytes[range]);
        let latency = self.controller.access_latency(addr);
        self.outstanding.retain(|&(a, _)| a != addr);
        if self.outstanding.len() == Self::MAX_OUTSTANDING {
            let _ = self.outstanding.pop_front();
        }
        self.outstanding.push_back((addr, latency));
        Ok(())
    }

    /// Writes the low `size` bytes of `value` at `addr`, little-endian.
    ///
    /// # Errors
    ///
    /// [`MemoryFault::Write`] when the range is unmapped or `size` exceeds eight.
    pub fn write(&mut self, addr: u64, value: u64, size: usize) -> Result<(), MemoryFault> {
        let fault = MemoryFault::Write { addr, size };
        if size > 8 {
            return Err(fault);
        }
        let range = self.range(addr, size).ok_or(fault)?;
        self.bytes[range].copy_from_slice(&value.to_le_bytes()[..size]);
        Ok(())
    }

    /// Counts down the read outstanding at `addr`.
    ///
    /// An address with no outstanding read is always ready.
    pub fn ready(&mut self, addr: u64) -> bool {
        let Some(pos) = self.outstanding.iter().position(|&(a, _)| a == addr) else {
            return true;
        };
        let remaining = &mut self.outstanding[pos].1;
        if *remaining == 0 {
            let _ = self.outstanding.remove(pos);
            true
        } else {
            *remaining -= 1;
            false
        }
    }

    /// Number of reads whose countdown is still tracked.
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    /// Copies an image into memory without timing.
    ///
    /// # Errors
    ///
    /// [`LoadError::OutOfRange`] when the image does not fit.
    pub fn load(&mut self, addr: u64, data: &[u8]) -> Result<(), LoadError> {
        let range = self.range(addr, data.len()).ok_or(LoadError::OutOfRange {
            addr,
            len: data.len(),
        })?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    /// Reads bytes without timing; `None` when unmapped.
    pub fn peek(&self, addr: u64, len: usize) -> Option<&[u8]> {
        self.range(addr, len).map(|r| &self.bytes[r])
    }
}
