//! Branch resolution unit.
//!
//! Holds the BTB, the static direction policy, and the enum that selects
//! between predictors without dynamic dispatch in the fetch path.

pub use self::branch_predictor::BranchPredictor;

/// Predictor trait.
pub mod branch_predictor;

/// Branch target buffer.
pub mod btb;

/// Backward-taken and never-taken policies.
pub mod static_bp;

use self::btb::{Btb, BtbResolution};
use self::static_bp::{BackwardTakenPredictor, NotTakenPredictor};
use crate::config::{BranchPredictorKind, PipelineConfig};

/// The configured predictor.
#[derive(Clone, Debug)]
pub enum Predictor {
    /// Backward branches through the BTB.
    Backward(BackwardTakenPredictor),
    /// No prediction at all.
    NotTaken(NotTakenPredictor),
}

impl Predictor {
    /// Builds the predictor selected in `config`.
    pub fn new(config: &PipelineConfig) -> Self {
        match config.branch_predictor {
            BranchPredictorKind::Btb => {
                Self::Backward(BackwardTakenPredictor::new(config.btb_entries))
            }
            BranchPredictorKind::NotTaken => Self::NotTaken(NotTakenPredictor),
        }
    }

    /// The BTB, when the predictor has one.
    pub const fn btb(&self) -> Option<&Btb> {
        match self {
            Self::Backward(p) => Some(p.btb()),
            Self::NotTaken(_) => None,
        }
    }
}

impl BranchPredictor for Predictor {
    #[inline]
    fn predict(&mut self, pc: u64, inst: u32) -> Option<u64> {
        match self {
            Self::Backward(p) => p.predict(pc, inst),
            Self::NotTaken(p) => p.predict(pc, inst),
        }
    }

    #[inline]
    fn resolve(&mut self, pc: u64, target: u64) -> BtbResolution {
        match self {
            Self::Backward(p) => p.resolve(pc, target),
            Self::NotTaken(p) => p.resolve(pc, target),
        }
    }
}
