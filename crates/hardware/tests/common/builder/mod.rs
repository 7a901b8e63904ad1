/// RV64IM instruction encoders.
pub mod instruction;
