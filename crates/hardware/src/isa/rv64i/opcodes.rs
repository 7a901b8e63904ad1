//! RV64I major opcodes (instruction bits 6:0).

/// Loads (`lb` .. `lwu`, `ld`). I-type.
pub const OP_LOAD: u32 = 0b000_0011;
/// `fence`, `fence.i`. I-type.
pub const OP_MISC_MEM: u32 = 0b000_1111;
/// Register-immediate ALU. I-type.
pub const OP_IMM: u32 = 0b001_0011;
/// `auipc`. U-type.
pub const OP_AUIPC: u32 = 0b001_0111;
/// 32-bit register-immediate ALU (`addiw`, `slliw`, ...). I-type.
pub const OP_IMM_32: u32 = 0b001_1011;
/// Stores. S-type.
pub const OP_STORE: u32 = 0b010_0011;
/// Register-register ALU, including the M extension. R-type.
pub const OP_REG: u32 = 0b011_0011;
/// `lui`. U-type.
pub const OP_LUI: u32 = 0b011_0111;
/// 32-bit register-register ALU. R-type.
pub const OP_REG_32: u32 = 0b011_1011;
/// Conditional branches. B-type.
pub const OP_BRANCH: u32 = 0b110_0011;
/// `jalr`. I-type.
pub const OP_JALR: u32 = 0b110_0111;
/// `jal`. J-type.
pub const OP_JAL: u32 = 0b110_1111;
