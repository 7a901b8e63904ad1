//! Static predictors.
//!
//! [`BackwardTakenPredictor`] is the default: forward branches are assumed not
//! taken and never touch the BTB, while backward branches (loop edges) are
//! predicted through it. [`NotTakenPredictor`] never predicts.

use super::BranchPredictor;
use super::btb::{Btb, BtbLookup, BtbResolution};
use crate::isa::decode::imm_b;
use crate::isa::instruction::OPCODE_MASK;
use crate::isa::rv64i::opcodes::OP_BRANCH;

/// True when `inst` is a conditional branch with a negative displacement.
pub const fn is_backward_branch(inst: u32) -> bool {
    (inst & OPCODE_MASK) == OP_BRANCH && imm_b(inst) < 0
}

/// Backward-taken / forward-not-taken predictor backed by a BTB.
#[derive(Clone, Debug)]
pub struct BackwardTakenPredictor {
    btb: Btb,
}

impl BackwardTakenPredictor {
    /// Creates the predictor with a BTB of `btb_entries` slots.
    pub fn new(btb_entries: usize) -> Self {
        Self {
            btb: Btb::new(btb_entries),
        }
    }

    /// The underlying BTB.
    pub const fn btb(&self) -> &Btb {
        &self.btb
    }
}

impl BranchPredictor for BackwardTakenPredictor {
    fn predict(&mut self, pc: u64, inst: u32) -> Option<u64> {
        if !is_backward_branch(inst) {
            return None;
        }
        match self.btb.lookup(pc) {
            BtbLookup::Hit(target) => Some(target),
            BtbLookup::Allocated => {
                tracing::debug!(pc = format_args!("{pc:#x}"), "btb allocate");
                None
            }
            BtbLookup::Pending | BtbLookup::Full => None,
        }
    }

    fn resolve(&mut self, pc: u64, target: u64) -> BtbResolution {
        self.btb.resolve(pc, target)
    }
}

/// Predicts every branch not taken.
#[derive(Clone, Copy, Debug, Default)]
pub struct NotTakenPredictor;

impl BranchPredictor for NotTakenPredictor {
    fn predict(&mut self, _pc: u64, _inst: u32) -> Option<u64> {
        None
    }

    fn resolve(&mut self, _pc: u64, _target: u64) -> BtbResolution {
        BtbResolution::Untracked
    }
}
