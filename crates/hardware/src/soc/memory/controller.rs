//! Read-latency models for the reference memory.
//!
//! This module provides:
//! 1. **FixedLatency:** Every read takes the same number of readiness polls.
//! 2. **RowBuffer:** A single open row; reads to it are fast, others pay a switch penalty.
//!
//! Latency is counted in calls to `memory_ready` that answer "not yet".

use crate::config::{MemoryConfig, MemoryTiming};

/// Reports how long a read issued at an address stays outstanding.
pub trait MemoryController: std::fmt::Debug {
    /// Polls that must report "not ready" before the read at `addr` completes.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address of the read (used by row-buffer models).
    ///
    /// # Returns
    ///
    /// Latency in readiness polls; zero means ready on the first poll.
    fn access_latency(&mut self, addr: u64) -> u64;
}

/// Builds the controller selected by `config.timing`.
pub fn from_config(config: &MemoryConfig) -> Box<dyn MemoryController> {
    match config.timing {
        MemoryTiming::Fixed => Box::new(FixedLatency::new(config.latency)),
        MemoryTiming::Dram => Box::new(RowBuffer::new(config.t_cas, config.row_miss_penalty)),
    }
}

/// Every read takes `latency` polls.
#[derive(Clone, Copy, Debug)]
pub struct FixedLatency {
    latency: u64,
}

impl FixedLatency {
    /// Creates a controller with a fixed latency.
    pub const fn new(latency: u64) -> Self {
        Self { latency }
    }
}

impl MemoryController for FixedLatency {
    fn access_latency(&mut self, _addr: u64) -> u64 {
        self.latency
    }
}

/// Single open-row model.
#[derive(Clone, Copy, Debug)]
pub struct RowBuffer {
    open_row: Option<u64>,
    t_cas: u64,
    row_miss_penalty: u64,
    row_mask: u64,
}

impl RowBuffer {
    /// Row size in bytes.
    pub const ROW_BYTES: u64 = 2048;

    /// Creates a controller with no row open.
    ///
    /// # Arguments
    ///
    /// * `t_cas`            - Latency of a read to the open row.
    /// * `row_miss_penalty` - Extra latency when another row must be opened.
    pub const fn new(t_cas: u64, row_miss_penalty: u64) -> Self {
        Self {
            open_row: None,
            t_cas,
            row_miss_penalty,
            row_mask: !(Self::ROW_BYTES - 1),
        }
    }
}

impl MemoryController for RowBuffer {
    fn access_latency(&mut self, addr: u64) -> u64 {
        let row = addr & self.row_mask;
        if self.open_row == Some(row) {
            self.t_cas
        } else {
            self.open_row = Some(row);
            self.t_cas + self.row_miss_penalty
        }
    }
}
