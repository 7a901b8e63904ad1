//! Program Loader Tests.
//!
//! Verifies flat-binary placement, ELF segment loading from a hand-built
//! RV64 image, and the errors for unreadable or unsupported inputs.

use std::io::Write;

use rvpipe_core::common::error::LoadError;
use rvpipe_core::sim::loader;
use rvpipe_core::soc::{Platform, System};
use tempfile::NamedTempFile;

use crate::common::builder::instruction::*;
use crate::common::harness::{BASE, test_config};

const EM_RISCV: u16 = 243;
const EM_X86_64: u16 = 62;

/// A minimal little-endian ELF64 executable with one `PT_LOAD` segment.
fn elf_image(machine: u16, vaddr: u64, entry: u64, payload: &[u8]) -> Vec<u8> {
    const EHDR: usize = 64;
    const PHDR: usize = 56;
    let mut out = Vec::new();
    out.extend_from_slice(b"\x7fELF");
    out.extend_from_slice(&[2, 1, 1, 0]);
    out.extend_from_slice(&[0; 8]);
    out.extend_from_slice(&2u16.to_le_bytes()); // ET_EXEC
    out.extend_from_slice(&machine.to_le_bytes());
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&entry.to_le_bytes());
    out.extend_from_slice(&(EHDR as u64).to_le_bytes()); // e_phoff
    out.extend_from_slice(&0u64.to_le_bytes()); // e_shoff
    out.extend_from_slice(&0u32.to_le_bytes()); // e_flags
    out.extend_from_slice(&(EHDR as u16).to_le_bytes());
    out.extend_from_slice(&(PHDR as u16).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // e_phnum
    out.extend_from_slice(&64u16.to_le_bytes()); // e_shentsize
    out.extend_from_slice(&0u16.to_le_bytes()); // e_shnum
    out.extend_from_slice(&0u16.to_le_bytes()); // e_shstrndx
    assert_eq!(out.len(), EHDR);

    let offset = (EHDR + PHDR) as u64;
    let len = payload.len() as u64;
    out.extend_from_slice(&1u32.to_le_bytes()); // PT_LOAD
    out.extend_from_slice(&5u32.to_le_bytes()); // R+X
    out.extend_from_slice(&offset.to_le_bytes());
    out.extend_from_slice(&vaddr.to_le_bytes());
    out.extend_from_slice(&vaddr.to_le_bytes());
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(&4u64.to_le_bytes());
    assert_eq!(out.len(), EHDR + PHDR);

    out.extend_from_slice(payload);
    out
}

fn words(program: &[u32]) -> Vec<u8> {
    program.iter().flat_map(|w| w.to_le_bytes()).collect()
}

fn temp_file(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn flat_binary_loads_at_base() {
    let image = words(&[addi(1, 0, 1), ecall()]);
    let file = temp_file(&image);
    let mut sys = System::new(&test_config());

    let entry = loader::load_program(&mut sys, file.path(), BASE).unwrap();
    assert_eq!(entry, BASE);
    assert_eq!(sys.get_pc(), BASE);
    assert_eq!(sys.memory.peek(BASE, image.len()), Some(&image[..]));
}

#[test]
fn elf_segments_load_at_their_addresses() {
    let payload = words(&[nop(), addi(1, 0, 1), ecall()]);
    let vaddr = BASE + 0x100;
    let image = elf_image(EM_RISCV, vaddr, vaddr + 4, &payload);
    assert!(loader::is_elf(&image));

    let mut sys = System::new(&test_config());
    let entry = loader::load_elf(&mut sys, &image).unwrap();
    assert_eq!(entry, vaddr + 4);
    assert_eq!(sys.get_pc(), vaddr + 4);
    assert_eq!(sys.memory.peek(vaddr, payload.len()), Some(&payload[..]));
}

#[test]
fn elf_for_another_machine_is_rejected() {
    let image = elf_image(EM_X86_64, BASE, BASE, &words(&[nop()]));
    let mut sys = System::new(&test_config());
    assert!(matches!(
        loader::load_elf(&mut sys, &image),
        Err(LoadError::Unsupported(_))
    ));
}

#[test]
fn elf_segment_outside_memory_is_rejected() {
    let image = elf_image(EM_RISCV, 0x1000, 0x1000, &words(&[nop()]));
    let mut sys = System::new(&test_config());
    assert!(matches!(
        loader::load_elf(&mut sys, &image),
        Err(LoadError::OutOfRange { addr: 0x1000, .. })
    ));
}

#[test]
fn truncated_elf_is_malformed() {
    let mut image = elf_image(EM_RISCV, BASE, BASE, &[]);
    image.truncate(40);
    let mut sys = System::new(&test_config());
    assert!(matches!(loader::load_elf(&mut sys, &image), Err(LoadError::Elf(_))));
}

#[test]
fn missing_file_reports_its_path() {
    let mut sys = System::new(&test_config());
    let err = loader::load_program(&mut sys, std::path::Path::new("/nonexistent/prog.bin"), BASE)
        .unwrap_err();
    assert!(matches!(&err, LoadError::Io { path, .. } if path.contains("prog.bin")));
}

#[test]
fn flat_binary_too_large_for_memory() {
    let mut sys = System::new(&test_config());
    let big = vec![0u8; 128 * 1024];
    assert!(matches!(
        loader::load_flat(&mut sys, &big, BASE),
        Err(LoadError::OutOfRange { .. })
    ));
}

#[test]
fn code_image_of_flat_binary_is_the_whole_file() {
    let image = words(&[nop(), ecall()]);
    let (addr, code) = loader::code_image(&image, BASE).unwrap();
    assert_eq!(addr, BASE);
    assert_eq!(code, image);
}

#[test]
fn code_image_needs_a_text_section() {
    let image = elf_image(EM_RISCV, BASE, BASE, &words(&[nop()]));
    assert!(matches!(
        loader::code_image(&image, BASE),
        Err(LoadError::Unsupported(_))
    ));
}
