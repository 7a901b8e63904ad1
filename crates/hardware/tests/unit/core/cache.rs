//! Cache Tests.
//!
//! Verifies index/tag arithmetic for both default geometries, the two-phase
//! fill against real and mocked platforms, write-through without allocation,
//! and uncached handling of line-straddling accesses.

use rvpipe_core::common::error::MemoryFault;
use rvpipe_core::config::{CacheGeometry, Config};
use rvpipe_core::core::units::cache::{Cache, FillPoll, dcache, icache};
use rvpipe_core::soc::{Platform, System};

use crate::common::harness::{BASE, DATA, test_config};
use crate::common::mocks::platform::MockPlatform;

fn dcache() -> Cache {
    Cache::new("dcache", &Config::default().cache.dcache)
}

fn icache() -> Cache {
    Cache::new("icache", &Config::default().cache.icache)
}

fn system_with(latency: u64) -> System {
    let mut config = test_config();
    config.memory.latency = latency;
    System::new(&config)
}

/// Drives a fill to completion, returning how many polls reported `Waiting`.
fn complete_fill(cache: &mut Cache, platform: &mut impl Platform) -> usize {
    let mut waiting = 0;
    while cache.poll_fill(platform) == FillPoll::Waiting {
        waiting += 1;
        assert!(waiting < 100, "fill never became ready");
    }
    let _ = cache.commit_fill();
    waiting
}

// ══════════════════════════════════════════════════════════
// 1. Geometry
// ══════════════════════════════════════════════════════════

#[test]
fn dcache_default_geometry() {
    let c = dcache();
    assert_eq!(c.line_bytes(), 8);
    assert_eq!(c.offset(0x8000_000D), 5);
    assert_eq!(c.index(0x8000_0008), 1);
    assert_eq!(c.index(0x8000_0000 + (2048 * 8)), 0, "index wraps after 2048 lines");
    assert_eq!(c.tag(0x8000_0000), 0x8000_0000 >> 14);
}

#[test]
fn icache_default_geometry() {
    let c = icache();
    assert_eq!(c.line_bytes(), 16);
    assert_eq!(c.offset(0x8000_000C), 12);
    assert_eq!(c.index(0x8000_0010), 1);
    assert_eq!(c.tag(0x8000_2000), 0x8000_2000 >> 13);
}

#[test]
fn straddling_range_does_not_fit_a_line() {
    let c = dcache();
    assert!(c.fits_line(DATA, 8));
    assert!(!c.fits_line(DATA + 4, 8));
}

// ══════════════════════════════════════════════════════════
// 2. Two-phase fill
// ══════════════════════════════════════════════════════════

#[test]
fn miss_fill_then_hit() {
    let mut sys = system_with(0);
    sys.load_binary_at(&0x1122_3344_5566_7788u64.to_le_bytes(), DATA).unwrap();
    let mut c = dcache();

    assert_eq!(dcache::load(&mut c, DATA, 8), None);
    c.begin_fill(DATA, 8, &mut sys);
    assert_eq!(complete_fill(&mut c, &mut sys), 0, "zero latency is ready on first poll");
    assert!(c.pending().is_none());
    assert_eq!(dcache::load(&mut c, DATA, 8), Some(0x1122_3344_5566_7788));
    assert_eq!(dcache::load(&mut c, DATA + 4, 4), Some(0x1122_3344));
    assert_eq!((c.hits, c.misses), (2, 1));
}

#[test]
fn latency_sets_number_of_waiting_polls() {
    let mut sys = system_with(3);
    let mut c = dcache();
    c.begin_fill(DATA, 8, &mut sys);
    assert_eq!(complete_fill(&mut c, &mut sys), 3);
    assert!(c.contains(DATA));
}

#[test]
fn instruction_fill_brings_in_four_words() {
    let mut sys = system_with(0);
    let words: Vec<u8> = [1u32, 2, 3, 4].iter().flat_map(|w| w.to_le_bytes()).collect();
    sys.load_binary_at(&words, BASE).unwrap();
    let mut c = icache();

    assert_eq!(icache::fetch_word(&mut c, BASE), None);
    c.begin_fill(BASE, 4, &mut sys);
    let _ = complete_fill(&mut c, &mut sys);
    for (i, want) in [1u32, 2, 3, 4].into_iter().enumerate() {
        assert_eq!(icache::fetch_word(&mut c, BASE + 4 * i as u64), Some(want));
    }
    assert_eq!(icache::fetch_word(&mut c, BASE + 16), None, "next line is a separate miss");
}

#[test]
fn straddling_load_is_served_uncached() {
    let mut sys = system_with(0);
    sys.load_binary_at(&[1, 2, 3, 4, 5, 6, 7, 8], DATA + 4).unwrap();
    let mut c = dcache();

    c.begin_fill(DATA + 4, 8, &mut sys);
    assert_eq!(c.poll_fill(&mut sys), FillPoll::Ready);
    assert_eq!(c.commit_fill(), Some(vec![1, 2, 3, 4, 5, 6, 7, 8]));
    assert!(!c.contains(DATA + 4));
    assert!(!c.contains(DATA + 8));
}

#[test]
fn cancel_drops_the_pending_fill() {
    let mut sys = system_with(5);
    let mut c = icache();
    c.begin_fill(BASE, 4, &mut sys);
    assert!(c.pending().is_some());
    c.cancel_fill();
    assert!(c.pending().is_none());
    assert_eq!(c.commit_fill(), None);
    assert!(!c.contains(BASE));
}

#[test]
fn faulted_fill_read_is_reissued() {
    let mut mock = MockPlatform::new();
    let mut calls = 0;
    let _ = mock.expect_read_memory().times(2).returning(move |addr, buf| {
        calls += 1;
        if calls == 1 {
            return Err(MemoryFault::Read {
                addr,
                size: buf.len(),
            });
        }
        buf.copy_from_slice(&[0xAA; 8]);
        Ok(())
    });
    let _ = mock.expect_memory_ready().returning(|_| true);

    let mut c = dcache();
    c.begin_fill(DATA, 8, &mut mock);
    assert_eq!(c.faults, 1);
    assert!(c.pending().is_some_and(|f| f.data.is_none()));
    assert_eq!(c.poll_fill(&mut mock), FillPoll::Ready);
    assert_eq!(c.commit_fill(), None);
    assert_eq!(dcache::load(&mut c, DATA, 1), Some(0xAA));
}

// ══════════════════════════════════════════════════════════
// 3. Write-through stores
// ══════════════════════════════════════════════════════════

#[test]
fn store_miss_writes_memory_without_allocating() {
    let mut sys = system_with(0);
    let mut c = dcache();
    assert_eq!(dcache::store(&mut c, &mut sys, DATA, 0xDEAD_BEEF, 4), Ok(false));
    assert!(!c.contains(DATA));
    assert_eq!(sys.memory.peek(DATA, 4), Some(&0xDEAD_BEEFu32.to_le_bytes()[..]));
}

#[test]
fn store_hit_updates_the_cached_copy() {
    let mut sys = system_with(0);
    let mut c = dcache();
    c.begin_fill(DATA, 8, &mut sys);
    let _ = complete_fill(&mut c, &mut sys);

    assert_eq!(dcache::store(&mut c, &mut sys, DATA + 2, 0xABCD, 2), Ok(true));
    assert_eq!(dcache::load(&mut c, DATA, 8), Some(0xABCD_0000));
}

#[test]
fn store_fault_leaves_cache_untouched() {
    let mut mock = MockPlatform::new();
    let _ = mock.expect_write_memory()
        .times(1)
        .returning(|addr, _, size| Err(MemoryFault::Write { addr, size }));

    let mut c = dcache();
    let result = dcache::store(&mut c, &mut mock, DATA, 1, 8);
    assert_eq!(result, Err(MemoryFault::Write { addr: DATA, size: 8 }));
    assert_eq!((c.hits, c.misses), (0, 0));
}

#[test]
fn geometry_is_taken_from_config() {
    let c = Cache::new("dcache", &CacheGeometry { lines: 4, line_bytes: 8 });
    assert_eq!(c.index(DATA + 32), c.index(DATA), "four lines wrap every 32 bytes");
}
