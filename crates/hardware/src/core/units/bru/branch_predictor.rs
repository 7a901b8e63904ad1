//! Branch predictor interface.

use super::btb::BtbResolution;

/// A fetch-time predictor with execute-time feedback.
pub trait BranchPredictor {
    /// Predicts the next fetch address for the instruction word at `pc`.
    ///
    /// Returns `Some(target)` to redirect fetch, or `None` for "no prediction"
    /// (fall through to `pc + 4`).
    fn predict(&mut self, pc: u64, inst: u32) -> Option<u64>;

    /// Reports the resolved taken-target of the branch at `pc`.
    fn resolve(&mut self, pc: u64, target: u64) -> BtbResolution;
}
