//! Statistics Tests.
//!
//! Verifies that the counters folded from cycle reports agree with what the
//! program did, and that derived metrics and serialization behave.

use rvpipe_core::stats::{STATS_SECTIONS, SimStats};

use crate::common::builder::instruction::*;
use crate::common::harness::{DATA, TestContext};

fn loop_with_memory() -> TestContext {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 2),
        ld(3, 2, 0),
        sd(3, 2, 8),
        addi(1, 1, -1),
        bne(1, 0, -12),
        ecall(),
    ]);
    ctx.set_reg(2, DATA);
    ctx.run_to_halt();
    ctx
}

#[test]
fn instruction_mix_adds_up() {
    let ctx = loop_with_memory();
    let s = ctx.stats();

    assert_eq!(s.instructions_retired, ctx.retired_pcs().len() as u64);
    assert_eq!(s.inst_load, 2);
    assert_eq!(s.inst_store, 2);
    assert_eq!(s.inst_branch, 2);
    assert_eq!(s.inst_system, 1);
    assert_eq!(s.inst_alu, 3);
    assert_eq!(
        s.inst_alu + s.inst_load + s.inst_store + s.inst_branch + s.inst_system,
        s.instructions_retired
    );
}

#[test]
fn cycle_count_matches_reports() {
    let ctx = loop_with_memory();
    let s = ctx.stats();

    assert_eq!(s.cycles, ctx.reports.len() as u64);
    assert!(s.ipc() > 0.0 && s.ipc() < 1.0);
    assert!((s.ipc() * s.cpi() - 1.0).abs() < 1e-9);
    assert_eq!(s.stalls_icache, ctx.count(|r| r.stalls.icache) as u64);
    assert_eq!(s.squashed, ctx.reports.iter().map(|r| r.squashed as u64).sum::<u64>());
}

#[test]
fn cache_counters_are_synced_from_the_pipeline() {
    let ctx = loop_with_memory();
    let s = ctx.stats();
    assert_eq!(s.dcache_hits, ctx.sim.pipeline.dcache().hits);
    assert_eq!(s.dcache_misses, ctx.sim.pipeline.dcache().misses);
    assert_eq!(s.icache_misses, ctx.sim.pipeline.icache().misses);
    assert!(s.dcache_hits > 0, "second trip hits the line the first trip filled");
}

#[test]
fn empty_stats_have_zero_ratios() {
    let s = SimStats::default();
    assert_eq!(s.ipc(), 0.0);
    assert_eq!(s.cpi(), 0.0);
}

#[test]
fn json_output_omits_host_timing() {
    let ctx = loop_with_memory();
    let json = serde_json::to_value(ctx.stats()).unwrap();
    assert_eq!(json["instructions_retired"], ctx.stats().instructions_retired);
    assert!(json.get("start_time").is_none());
}

#[test]
fn printing_every_section_does_not_panic() {
    let ctx = loop_with_memory();
    let sections: Vec<String> = STATS_SECTIONS.iter().map(|s| (*s).to_string()).collect();
    ctx.stats().print_sections(&sections);
    ctx.stats().print();
}
