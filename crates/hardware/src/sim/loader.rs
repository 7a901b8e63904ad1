//! Program loader.
//!
//! This module places a program image in the reference memory and sets the
//! initial PC. It performs:
//! 1. **File reading:** Reads the image from disk, reporting the path on failure.
//! 2. **Flat binaries:** Copies raw bytes to a load address and starts there.
//! 3. **ELF images:** Copies each loadable segment of a 64-bit RISC-V executable and starts
//!    at its entry point.
//! 4. **Code extraction:** Finds the instruction bytes of an image for disassembly.

use std::fs;
use std::path::Path;

use object::{Architecture, Object, ObjectSection, ObjectSegment};

use crate::common::error::LoadError;
use crate::soc::{Platform, System};

/// First four bytes of every ELF file.
const ELF_MAGIC: &[u8; 4] = b"\x7fELF";

/// Reads a whole file.
///
/// # Errors
///
/// [`LoadError::Io`] naming `path`.
pub fn read_binary(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// True when `data` starts with the ELF magic.
pub fn is_elf(data: &[u8]) -> bool {
    data.starts_with(ELF_MAGIC)
}

/// Copies a flat binary to `addr` and points the PC at it.
///
/// # Arguments
///
/// * `system` - Target system.
/// * `data`   - Raw image.
/// * `addr`   - Load address, which is also the entry point.
///
/// # Returns
///
/// The entry point.
///
/// # Errors
///
/// [`LoadError::OutOfRange`] when the image does not fit in memory.
pub fn load_flat(system: &mut System, data: &[u8], addr: u64) -> Result<u64, LoadError> {
    system.load_binary_at(data, addr)?;
    system.set_pc(addr);
    tracing::debug!(addr = format_args!("{addr:#x}"), len = data.len(), "flat image loaded");
    Ok(addr)
}

/// Copies every loadable segment of an ELF64 RISC-V image and points the PC at its entry.
///
/// Bytes past a segment's file size are left as they are in memory (zero for a
/// fresh system).
///
/// # Errors
///
/// [`LoadError::Elf`] for a malformed file, [`LoadError::Unsupported`] for a
/// non-RV64 image, [`LoadError::OutOfRange`] when a segment does not fit.
pub fn load_elf(system: &mut System, data: &[u8]) -> Result<u64, LoadError> {
    let file = object::File::parse(data)?;
    if !file.is_64() || file.architecture() != Architecture::Riscv64 {
        return Err(LoadError::Unsupported("not a 64-bit RISC-V image"));
    }
    for segment in file.segments() {
        let bytes = segment.data()?;
        if bytes.is_empty() {
            continue;
        }
        system.load_binary_at(bytes, segment.address())?;
        tracing::debug!(
            addr = format_args!("{:#x}", segment.address()),
            len = bytes.len(),
            "segment loaded"
        );
    }
    let entry = file.entry();
    system.set_pc(entry);
    Ok(entry)
}

/// Loads `path` as ELF when it carries the magic, otherwise as a flat binary at `flat_addr`.
///
/// # Errors
///
/// Any error from [`read_binary`], [`load_elf`] or [`load_flat`].
pub fn load_program(system: &mut System, path: &Path, flat_addr: u64) -> Result<u64, LoadError> {
    let data = read_binary(path)?;
    if is_elf(&data) {
        load_elf(system, &data)
    } else {
        load_flat(system, &data, flat_addr)
    }
}

/// The instruction bytes of an image and the address they belong at.
///
/// For ELF this is the `.text` section; a flat binary is taken whole at `flat_addr`.
///
/// # Errors
///
/// [`LoadError::Elf`] for a malformed file, [`LoadError::Unsupported`] when an
/// ELF image has no `.text` section.
pub fn code_image(data: &[u8], flat_addr: u64) -> Result<(u64, Vec<u8>), LoadError> {
    if !is_elf(data) {
        return Ok((flat_addr, data.to_vec()));
    }
    let file = object::File::parse(data)?;
    let text = file
        .section_by_name(".text")
        .ok_or(LoadError::Unsupported("no .text section"))?;
    Ok((text.address(), text.data()?.to_vec()))
}
