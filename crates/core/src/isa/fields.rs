//! Instruction field table.
//!
//! Every operand and immediate of the words this crate builds or inspects is
//! described here once, as a [`Field`] at its architectural position.

use crate::common::bits::Field;

/// Flag-setting bit of add/sub and logical forms.
pub const S: Field = Field::new("s", 29, 1);
/// 64-bit operation size bit.
pub const SF: Field = Field::new("sf", 31, 1);
/// Load/store access size.
pub const SZ: Field = Field::new("sz", 30, 2);

/// Destination register.
pub const RD: Field = Field::new("rd", 0, 5);
/// First source register.
pub const RN: Field = Field::new("rn", 5, 5);
/// Accumulator register of three-source forms.
pub const RA: Field = Field::new("ra", 10, 5);
/// Second source register.
pub const RM: Field = Field::new("rm", 16, 5);
/// Load/store transfer register.
pub const RT: Field = Field::new("rt", 0, 5);
/// Second transfer register of pair forms.
pub const RT2: Field = Field::new("rt2", 10, 5);
/// Status register of store-exclusive forms.
pub const RS: Field = Field::new("rs", 16, 5);

/// Vector destination register.
pub const VD: Field = Field::new("vd", 0, 5);
/// Vector first source register.
pub const VN: Field = Field::new("vn", 5, 5);
/// Vector second source register.
pub const VM: Field = Field::new("vm", 16, 5);
/// Vector transfer register.
pub const VT: Field = Field::new("vt", 0, 5);
/// Second vector transfer register.
pub const VT2: Field = Field::new("vt2", 10, 5);

/// Extended-register shift amount.
pub const IMM3: Field = Field::new("imm3", 10, 3);
/// SIMD element index (source).
pub const IMM4: Field = Field::new("imm4", 11, 4);
/// SIMD element index and size (destination).
pub const IMM5: Field = Field::new("imm5", 16, 5);
/// Shift amount of shifted-register forms.
pub const IMM6: Field = Field::new("imm6", 10, 6);
/// Scaled offset of pair forms.
pub const IMM7: Field = Field::new("imm7", 15, 7);
/// Floating-point immediate.
pub const IMM8: Field = Field::new("imm8", 13, 8);
/// Unscaled offset of load/store forms.
pub const IMM9: Field = Field::new("imm9", 12, 9);
/// Add/sub immediate or scaled unsigned load/store offset.
pub const IMM12: Field = Field::new("imm12", 10, 12);
/// Add/sub immediate shift (0 or 12).
pub const IMM12_SHIFT: Field = Field::new("imm12_shift", 22, 2);
/// Test-and-branch offset.
pub const IMM14: Field = Field::new("imm14", 5, 14);
/// Move-wide or exception immediate.
pub const IMM16: Field = Field::new("imm16", 5, 16);
/// Conditional, compare-and-branch and literal offset.
pub const IMM19: Field = Field::new("imm19", 5, 19);
/// Unconditional branch offset.
pub const IMM26: Field = Field::new("imm26", 0, 26);

/// Low two bits of a PC-relative address offset.
pub const IMM_LO: Field = Field::new("immlo", 29, 2);
/// High nineteen bits of a PC-relative address offset.
pub const IMM_HI: Field = Field::new("immhi", 5, 19);

/// Tested bit, bits 0..4 (test-and-branch).
pub const B40: Field = Field::new("b40", 19, 5);
/// Tested bit, bit 5 (test-and-branch).
pub const B5: Field = Field::new("b5", 31, 1);

/// Branch condition.
pub const COND: Field = Field::new("cond", 0, 4);
/// Conditional select condition.
pub const SEL_COND: Field = Field::new("sel_cond", 12, 4);

/// Logical immediate element-size bit.
pub const N: Field = Field::new("n", 22, 1);
/// Logical immediate rotation.
pub const IMM_R: Field = Field::new("immr", 16, 6);
/// Logical immediate run length and element size.
pub const IMM_S: Field = Field::new("imms", 10, 6);
/// Move-wide half-word position.
pub const HW: Field = Field::new("hw", 21, 2);

/// Distinguishes extended-register from shifted-register add/sub.
pub const ADD_SHIFT_EXTEND: Field = Field::new("add_shift_extend", 21, 1);
/// Shift kind.
pub const SHIFT_TYPE: Field = Field::new("shift_type", 22, 2);
/// Extend kind.
pub const EXTEND_TYPE: Field = Field::new("extend_type", 13, 3);

/// Pair addressing mode (post-index, offset, pre-index).
pub const PAIR_ADDRESSING: Field = Field::new("pair_addressing", 23, 2);
/// Unscaled/indexed addressing mode of single-register load/store.
pub const INDEX_MODE: Field = Field::new("index_mode", 10, 2);

/// Hint `CRm` operand.
pub const HINT_CRM: Field = Field::new("hint_crm", 8, 4);
/// Hint `op2` operand.
pub const HINT_OP2: Field = Field::new("hint_op2", 5, 3);

/// Every field of the table, for diagnostics and tests.
pub const ALL: &[Field] = &[
    S,
    SF,
    SZ,
    RD,
    RN,
    RA,
    RM,
    RT,
    RT2,
    RS,
    VD,
    VN,
    VM,
    VT,
    VT2,
    IMM3,
    IMM4,
    IMM5,
    IMM6,
    IMM7,
    IMM8,
    IMM9,
    IMM12,
    IMM12_SHIFT,
    IMM14,
    IMM16,
    IMM19,
    IMM26,
    IMM_LO,
    IMM_HI,
    B40,
    B5,
    COND,
    SEL_COND,
    N,
    IMM_R,
    IMM_S,
    HW,
    ADD_SHIFT_EXTEND,
    SHIFT_TYPE,
    EXTEND_TYPE,
    PAIR_ADDRESSING,
    INDEX_MODE,
    HINT_CRM,
    HINT_OP2,
];
