//! Simulator configuration.
//!
//! This module defines every tunable parameter of the core and its reference
//! platform. It provides:
//! 1. **Defaults:** Baseline constants for cache geometry, BTB size, memory map and latency.
//! 2. **Structures:** `general`, `pipeline`, `cache` and `memory` sections, each deserializable
//!    from JSON with per-field defaults.
//! 3. **Validation:** Geometry checks the cache index/tag arithmetic relies on.
//!
//! Every field is optional in JSON; `Config::default()` reproduces the baseline design.

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Base address of simulated RAM; programs load and start here.
    pub const RAM_BASE: u64 = 0x8000_0000;

    /// Simulated RAM size (16 MiB).
    pub const RAM_SIZE: usize = 16 * 1024 * 1024;

    /// Polls of `memory_ready` that report "not ready" before a read completes.
    pub const MEMORY_LATENCY: u64 = 4;

    /// Row-buffer hit latency for the DRAM-style controller.
    pub const T_CAS: u64 = 4;

    /// Additional latency when a different row must be opened.
    pub const ROW_MISS_PENALTY: u64 = 12;

    /// BTB capacity. Entries are allocated lazily and never evicted.
    pub const BTB_ENTRIES: usize = 32;

    /// Instruction cache line count (index = `addr[12:4]`).
    pub const ICACHE_LINES: usize = 512;

    /// Instruction cache line size: four instruction words.
    pub const ICACHE_LINE_BYTES: usize = 16;

    /// Data cache line count (index = `addr[13:3]`).
    pub const DCACHE_LINES: usize = 2048;

    /// Data cache line size: one doubleword.
    pub const DCACHE_LINE_BYTES: usize = 8;

    /// Cycle limit used by the driver when none is given.
    pub const MAX_CYCLES: u64 = 10_000_000;
}

/// What to do with an instruction word that fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeFaultPolicy {
    /// Log the fault and issue the word as an inert system instruction.
    #[default]
    Nop,
    /// Halt the core when the faulting word reaches writeback.
    Halt,
}

/// Branch predictor selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchPredictorKind {
    /// Backward branches predicted through the BTB; forward branches not taken.
    #[default]
    Btb,
    /// Every branch predicted not taken; the BTB is unused.
    NotTaken,
}

/// Memory timing model of the reference platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryTiming {
    /// Every read takes `latency` polls.
    #[default]
    Fixed,
    /// Row-buffer model: hits take `t_cas`, row switches add `row_miss_penalty`.
    Dram,
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use rvpipe_core::config::{Config, DecodeFaultPolicy};
///
/// let json = r#"{
///     "pipeline": { "btb_entries": 16, "decode_fault": "halt" },
///     "memory": { "latency": 0 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.pipeline.btb_entries, 16);
/// assert_eq!(config.pipeline.decode_fault, DecodeFaultPolicy::Halt);
/// assert_eq!(config.cache.icache.lines, 512);
/// assert_eq!(config.memory.latency, 0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Driver settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline and predictor settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Cache geometry.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Reference memory settings.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON, or any error from [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the constraints the cache and predictor models rely on.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Geometry`] when a line count or size is not a power of two,
    /// when the I-cache line is not 16 bytes, or when the D-cache line is not 8 bytes.
    /// [`ConfigError::EmptyBtb`] for a zero-entry BTB under the `btb` predictor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cache
            .icache
            .validate("icache", defaults::ICACHE_LINE_BYTES)?;
        self.cache
            .dcache
            .validate("dcache", defaults::DCACHE_LINE_BYTES)?;
        if self.pipeline.btb_entries == 0
            && self.pipeline.branch_predictor == BranchPredictorKind::Btb
        {
            return Err(ConfigError::EmptyBtb);
        }
        Ok(())
    }
}

/// Driver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Initial program counter when the image does not supply an entry point.
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u64,

    /// Emit per-stage trace events.
    #[serde(default)]
    pub trace: bool,

    /// Stop after this many cycles even if no halt instruction retires.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    const fn default_start_pc() -> u64 {
        defaults::RAM_BASE
    }

    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_pc: defaults::RAM_BASE,
            trace: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Predictor in use.
    #[serde(default)]
    pub branch_predictor: BranchPredictorKind,

    /// BTB capacity.
    #[serde(default = "PipelineConfig::default_btb_entries")]
    pub btb_entries: usize,

    /// Handling of undecodable instruction words.
    #[serde(default)]
    pub decode_fault: DecodeFaultPolicy,
}

impl PipelineConfig {
    const fn default_btb_entries() -> usize {
        defaults::BTB_ENTRIES
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            branch_predictor: BranchPredictorKind::default(),
            btb_entries: defaults::BTB_ENTRIES,
            decode_fault: DecodeFaultPolicy::default(),
        }
    }
}

/// Geometry of one direct-mapped cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheGeometry {
    /// Number of lines.
    pub lines: usize,
    /// Bytes per line.
    pub line_bytes: usize,
}

impl CacheGeometry {
    fn validate(&self, cache: &'static str, required_line: usize) -> Result<(), ConfigError> {
        let bad = |reason: String| Err(ConfigError::Geometry { cache, reason });
        if self.lines == 0 || !self.lines.is_power_of_two() {
            return bad(format!("lines must be a non-zero power of two, got {}", self.lines));
        }
        if self.line_bytes != required_line {
            return bad(format!(
                "line_bytes must be {required_line}, got {}",
                self.line_bytes
            ));
        }
        Ok(())
    }
}

/// Instruction and data cache geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Instruction cache.
    #[serde(default = "CacheConfig::default_icache")]
    pub icache: CacheGeometry,
    /// Data cache.
    #[serde(default = "CacheConfig::default_dcache")]
    pub dcache: CacheGeometry,
}

impl CacheConfig {
    const fn default_icache() -> CacheGeometry {
        CacheGeometry {
            lines: defaults::ICACHE_LINES,
            line_bytes: defaults::ICACHE_LINE_BYTES,
        }
    }

    const fn default_dcache() -> CacheGeometry {
        CacheGeometry {
            lines: defaults::DCACHE_LINES,
            line_bytes: defaults::DCACHE_LINE_BYTES,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            icache: Self::default_icache(),
            dcache: Self::default_dcache(),
        }
    }
}

/// Reference memory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Base address of RAM.
    #[serde(default = "MemoryConfig::default_base")]
    pub base: u64,

    /// RAM size in bytes.
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,

    /// Timing model.
    #[serde(default)]
    pub timing: MemoryTiming,

    /// Fixed read latency in readiness polls (`fixed` timing).
    #[serde(default = "MemoryConfig::default_latency")]
    pub latency: u64,

    /// Row-hit latency (`dram` timing).
    #[serde(default = "MemoryConfig::default_t_cas")]
    pub t_cas: u64,

    /// Row-switch penalty (`dram` timing).
    #[serde(default = "MemoryConfig::default_row_miss_penalty")]
    pub row_miss_penalty: u64,
}

impl MemoryConfig {
    const fn default_base() -> u64 {
        defaults::RAM_BASE
    }

    const fn default_size() -> usize {
        defaults::RAM_SIZE
    }

    const fn default_latency() -> u64 {
        defaults::MEMORY_LATENCY
    }

    const fn default_t_cas() -> u64 {
        defaults::T_CAS
    }

    const fn default_row_miss_penalty() -> u64 {
        defaults::ROW_MISS_PENALTY
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            base: defaults::RAM_BASE,
            size: defaults::RAM_SIZE,
            timing: MemoryTiming::default(),
            latency: defaults::MEMORY_LATENCY,
            t_cas: defaults::T_CAS,
            row_miss_penalty: defaults::ROW_MISS_PENALTY,
        }
    }
}
