//! Error definitions.
//!
//! This module defines every failure the simulator reports. It provides:
//! 1. **Decode faults:** An unrecognized opcode/funct3/funct7 combination, with the word and PC.
//! 2. **Memory faults:** A backing-store read or write that did not succeed.
//! 3. **Configuration and loading errors:** Invalid geometry or unreadable program images.
//! 4. **Simulator errors:** The top-level error returned from a cycle.

use thiserror::Error;

/// Which field of the instruction word failed to classify.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeFaultKind {
    /// The low seven bits do not name a supported major opcode.
    Opcode,
    /// The opcode is known but funct3 is not.
    Funct3,
    /// Opcode and funct3 are known but funct7 (or the shift-type bits) are not.
    Funct7,
}

impl std::fmt::Display for DecodeFaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Opcode => write!(f, "opcode"),
            Self::Funct3 => write!(f, "funct3"),
            Self::Funct7 => write!(f, "funct7"),
        }
    }
}

/// An instruction word that does not decode to a supported operation.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("unrecognized {kind} in instruction {word:#010x} at pc {pc:#x}")]
pub struct DecodeError {
    /// The offending instruction word.
    pub word: u32,
    /// Address the word was fetched from.
    pub pc: u64,
    /// The field that failed to classify.
    pub kind: DecodeFaultKind,
}

/// A backing-store access that the platform could not satisfy.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MemoryFault {
    /// The read could not be serviced.
    #[error("memory read of {size} bytes at {addr:#x} failed")]
    Read {
        /// Faulting address.
        addr: u64,
        /// Requested access width in bytes.
        size: usize,
    },
    /// The write could not be serviced.
    #[error("memory write of {size} bytes at {addr:#x} failed")]
    Write {
        /// Faulting address.
        addr: u64,
        /// Requested access width in bytes.
        size: usize,
    },
}

/// Rejected configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document did not parse.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// A cache geometry field is out of range.
    #[error("{cache}: {reason}")]
    Geometry {
        /// Which cache (`icache` or `dcache`).
        cache: &'static str,
        /// Human-readable description of the violation.
        reason: String,
    },
    /// The branch target buffer must hold at least one entry.
    #[error("btb_entries must be non-zero")]
    EmptyBtb,
}

/// Failure while loading a program image into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("could not read '{path}': {source}")]
    Io {
        /// Path that was opened.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The ELF image did not parse.
    #[error("malformed ELF image: {0}")]
    Elf(#[from] object::read::Error),
    /// The ELF image is not a 64-bit RISC-V executable.
    #[error("unsupported ELF image: {0}")]
    Unsupported(&'static str),
    /// A segment falls outside the simulated memory.
    #[error("segment at {addr:#x} ({len} bytes) does not fit in memory")]
    OutOfRange {
        /// Segment load address.
        addr: u64,
        /// Segment length in bytes.
        len: usize,
    },
}

/// Top-level error returned by a simulated cycle.
#[derive(Debug, Error)]
pub enum SimError {
    /// A faulting instruction reached writeback under the `halt` policy.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The core already halted on an earlier fault.
    #[error("core is halted")]
    Halted,
}
