//! M extension selector.

/// funct7 value marking a multiply/divide under `OP_REG` or `OP_REG_32`.
pub const M_EXTENSION: u32 = 0b000_0001;
