//! Reference Memory Tests.
//!
//! Verifies bounds checking, little-endian writes, the per-address readiness
//! countdown, and both latency controllers.

use rvpipe_core::common::error::MemoryFault;
use rvpipe_core::soc::memory::FlatMemory;
use rvpipe_core::soc::memory::controller::{FixedLatency, MemoryController, RowBuffer};
use rvpipe_core::soc::{Platform, System};

use crate::common::harness::{BASE, test_config};

fn memory(latency: u64) -> FlatMemory {
    FlatMemory::with_controller(BASE, 4096, Box::new(FixedLatency::new(latency)))
}

#[test]
fn write_is_little_endian_and_sized() {
    let mut m = memory(0);
    m.write(BASE, 0x1122_3344_5566_7788, 2).unwrap();
    assert_eq!(m.peek(BASE, 4), Some(&[0x88, 0x77, 0, 0][..]));
}

#[test]
fn out_of_range_accesses_fault() {
    let mut m = memory(0);
    let mut buf = [0u8; 8];
    assert_eq!(
        m.read(BASE + 4092, &mut buf),
        Err(MemoryFault::Read { addr: BASE + 4092, size: 8 })
    );
    assert_eq!(
        m.write(BASE - 8, 0, 8),
        Err(MemoryFault::Write { addr: BASE - 8, size: 8 })
    );
    assert!(m.write(BASE, 0, 16).is_err(), "writes wider than eight bytes fault");
}

#[test]
fn readiness_counts_down_per_address() {
    let mut m = memory(2);
    let mut buf = [0u8; 8];
    m.read(BASE, &mut buf).unwrap();
    m.read(BASE + 8, &mut buf).unwrap();

    assert!(!m.ready(BASE));
    assert!(!m.ready(BASE));
    assert!(m.ready(BASE));
    assert!(!m.ready(BASE + 8), "other addresses count independently");
    assert!(m.ready(BASE + 0x100), "no outstanding read means ready");
}

#[test]
fn abandoned_reads_do_not_accumulate() {
    let mut m = memory(3);
    let mut buf = [0u8; 8];
    for i in 0..6 {
        m.read(BASE + i * 16, &mut buf).unwrap();
    }
    assert_eq!(m.outstanding(), FlatMemory::MAX_OUTSTANDING);

    assert!(!m.ready(BASE + 80), "the newest read still counts down");
    assert!(m.ready(BASE), "the oldest read was forgotten");
}

#[test]
fn reissued_read_restarts_its_countdown() {
    let mut m = memory(1);
    let mut buf = [0u8; 8];
    m.read(BASE, &mut buf).unwrap();
    assert!(!m.ready(BASE));
    m.read(BASE, &mut buf).unwrap();
    assert_eq!(m.outstanding(), 1);

    assert!(!m.ready(BASE));
    assert!(m.ready(BASE));
    assert_eq!(m.outstanding(), 0);
}

#[test]
fn row_buffer_charges_row_switches() {
    let mut c = RowBuffer::new(4, 12);
    assert_eq!(c.access_latency(0x8000_0000), 16, "first access opens a row");
    assert_eq!(c.access_latency(0x8000_0010), 4, "same row");
    assert_eq!(c.access_latency(0x8000_0000 + RowBuffer::ROW_BYTES), 16);
    assert_eq!(c.access_latency(0x8000_0000), 16);
}

#[test]
fn system_is_a_platform() {
    let mut sys = System::new(&test_config());
    sys.set_pc(BASE + 8);
    sys.write_register(0, 5);
    sys.write_register(3, 9);
    sys.write_memory(BASE, 0xAB, 1).unwrap();
    let mut buf = [0u8; 1];
    sys.read_memory(BASE, &mut buf).unwrap();

    assert_eq!(sys.get_pc(), BASE + 8);
    assert_eq!(sys.read_register(0), 0);
    assert_eq!(sys.read_register(3), 9);
    assert_eq!(buf, [0xAB]);
    assert!(sys.memory_ready(BASE));
}

#[test]
fn register_dump_names_every_register() {
    let mut sys = System::new(&test_config());
    sys.regs.write(10, 0x2A);
    let dump = sys.regs.dump();
    assert!(dump.contains("x10(a0)"));
    assert!(dump.contains("0x000000000000002a"));
    assert_eq!(dump.lines().count(), 8);
}
