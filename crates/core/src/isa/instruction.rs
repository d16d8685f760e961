//! Instruction word accessors and special instruction words.
//!
//! Provides:
//! 1. **Constants:** Instruction size, PC read offset and the fixed words the
//!    VM emits for breakpoints, simulator redirections, padding and barriers.
//! 2. **Operand Modes:** [`destination_register_mode`] and
//!    [`first_operand_register_mode`] decide whether register field value 31
//!    means the stack pointer or the zero register for a given word.
//! 3. **Field Access:** The [`InstructionBits`] trait, implemented for `u32`,
//!    reads every operand and immediate field as a typed value.

use crate::common::bits::B21;
use crate::isa::condition::{Condition, Extend, Shift};
use crate::isa::families::Family;
use crate::isa::fields;
use crate::isa::immediate::{RegisterSize, decode_logical_immediate};
use crate::isa::ops::branch::{exception_gen, system};
use crate::isa::ops::dp_register::logical_shift;
use crate::isa::registers::{R31Type, Register, VRegister};

/// Size of an instruction in bytes.
pub const INSTR_SIZE: usize = 4;

/// log2 of [`INSTR_SIZE`].
pub const INSTR_SIZE_LOG2: u32 = 2;

/// Distance from an instruction to the PC value it reads.
pub const PC_READ_OFFSET: i64 = 8;

/// Immediate of the breakpoint the VM plants for debugger stops.
pub const BREAKPOINT_CODE: u32 = 0xDEB0;
/// Immediate of the simulator's break instruction.
pub const SIMULATOR_BREAK_CODE: u32 = 0xDEB2;
/// Immediate of the simulator's runtime-call redirection.
pub const SIMULATOR_REDIRECT_CODE: u32 = 0xCA11;
/// Immediate of the simulator's FFI-call redirection.
pub const SIMULATOR_FFI_REDIRECT_CODE: u32 = 0xCA12;

/// `NOP`, the all-zero hint.
pub const NOP_INSTRUCTION: u32 = system::HINT.bits();
/// `BRK #0xDEB0`.
pub const BREAKPOINT_INSTRUCTION: u32 = exception_gen::BRK.bits() | (BREAKPOINT_CODE << 5);
/// `HLT #0xDEB2`.
pub const SIMULATOR_BREAKPOINT_INSTRUCTION: u32 =
    exception_gen::HLT.bits() | (SIMULATOR_BREAK_CODE << 5);
/// `HLT #0xCA11`.
pub const SIMULATOR_REDIRECT_INSTRUCTION: u32 =
    exception_gen::HLT.bits() | (SIMULATOR_REDIRECT_CODE << 5);
/// `HLT #0xCA12`.
pub const SIMULATOR_FFI_REDIRECT_INSTRUCTION: u32 =
    exception_gen::HLT.bits() | (SIMULATOR_FFI_REDIRECT_CODE << 5);

/// Two `BRK #0` words, used to fill unused code space.
pub const BREAK_INSTRUCTION_FILLER: u64 = 0xD420_0000_D420_0000;

/// `DMB ISH`.
pub const DATA_MEMORY_BARRIER: u32 = 0xD503_3BBF;

const _: () = assert!(BREAK_INSTRUCTION_FILLER as u32 == exception_gen::BRK.bits());
const _: () = assert!(NOP_INSTRUCTION == 0xD503_201F);

/// Returns whether an add/sub shifted-or-extended word uses the extended form.
#[inline]
const fn is_extended_add_sub(word: u32) -> bool {
    Family::AddSubShiftExt.matches(word) && word & B21 != 0
}

/// How register field `Rd` of `word` treats encoding 31.
///
/// Add/sub immediate and the extended-register add/sub form write the stack
/// pointer unless they set flags; logical immediates write it unless they are
/// `ANDS`. Every other destination is the zero register.
pub const fn destination_register_mode(word: u32) -> R31Type {
    if Family::AddSubImm.matches(word) || is_extended_add_sub(word) {
        if fields::S.extract(word) == 1 {
            R31Type::ZeroRegister
        } else {
            R31Type::StackPointer
        }
    } else if Family::LogicalImm.matches(word) {
        if (word >> 29) & 0x3 == 0x3 {
            R31Type::ZeroRegister
        } else {
            R31Type::StackPointer
        }
    } else {
        R31Type::ZeroRegister
    }
}

/// How register field `Rn` of `word` treats encoding 31.
///
/// Base registers of loads and stores, and the first operand of add/sub
/// immediate and extended-register add/sub, are the stack pointer.
pub const fn first_operand_register_mode(word: u32) -> R31Type {
    if Family::LoadStore.matches(word) || Family::AddSubImm.matches(word) || is_extended_add_sub(word)
    {
        R31Type::StackPointer
    } else {
        R31Type::ZeroRegister
    }
}

/// Trait for extracting instruction fields from encoded instructions.
///
/// Register accessors return the raw field (`R31` for encoding 31); the
/// `*_register` variants resolve 31 through the word's operand mode.
pub trait InstructionBits {
    /// Extracts bit `nr`.
    fn bit(&self, nr: u32) -> u32;

    /// Extracts `count` bits starting at `shift`.
    fn bits(&self, shift: u32, count: u32) -> u32;

    /// Returns whether the word belongs to `family`.
    fn is(&self, family: Family) -> bool;

    /// Operand width selected by the `sf` bit.
    fn register_size(&self) -> RegisterSize;

    /// Flag-setting bit.
    fn has_s(&self) -> bool;

    /// Logical immediate element-size bit.
    fn n_field(&self) -> u32;

    /// Load/store access size (log2 of bytes).
    fn sz_field(&self) -> u32;

    /// Raw destination register field.
    fn rd(&self) -> Register;

    /// Raw first source register field.
    fn rn(&self) -> Register;

    /// Raw second source register field.
    fn rm(&self) -> Register;

    /// Raw accumulator register field.
    fn ra(&self) -> Register;

    /// Raw transfer register field.
    fn rt(&self) -> Register;

    /// Raw second transfer register field.
    fn rt2(&self) -> Register;

    /// Raw status register field.
    fn rs(&self) -> Register;

    /// Destination register with encoding 31 resolved.
    fn rd_register(&self) -> Register;

    /// First source register with encoding 31 resolved.
    fn rn_register(&self) -> Register;

    /// Vector destination register.
    fn vd(&self) -> VRegister;

    /// Vector first source register.
    fn vn(&self) -> VRegister;

    /// Vector second source register.
    fn vm(&self) -> VRegister;

    /// Vector transfer register.
    fn vt(&self) -> VRegister;

    /// Second vector transfer register.
    fn vt2(&self) -> VRegister;

    /// Extended-register shift amount.
    fn imm3(&self) -> u32;

    /// Shifted-register amount.
    fn imm6(&self) -> u32;

    /// Signed pair offset (unscaled field value).
    fn simm7(&self) -> i64;

    /// FP immediate byte.
    fn imm8(&self) -> u8;

    /// Signed unscaled load/store offset.
    fn simm9(&self) -> i64;

    /// Unsigned 12-bit immediate.
    fn imm12(&self) -> u32;

    /// Add/sub immediate shift selector.
    fn imm12_shift(&self) -> u32;

    /// Signed test-and-branch offset in instructions.
    fn simm14(&self) -> i64;

    /// Move-wide or exception immediate.
    fn imm16(&self) -> u32;

    /// Signed conditional or literal offset in instructions.
    fn simm19(&self) -> i64;

    /// Signed unconditional branch offset in instructions.
    fn simm26(&self) -> i64;

    /// Signed PC-relative address offset (ADR byte offset, ADRP page offset).
    fn simm21(&self) -> i64;

    /// Move-wide half-word position.
    fn hw(&self) -> u32;

    /// Logical immediate rotation.
    fn imm_r(&self) -> u32;

    /// Logical immediate run/size field.
    fn imm_s(&self) -> u32;

    /// Bit number tested by TBZ/TBNZ.
    fn test_bit(&self) -> u32;

    /// Branch condition.
    fn condition(&self) -> Condition;

    /// Conditional select condition.
    fn select_condition(&self) -> Condition;

    /// Returns whether an add/sub word uses the shifted-register form.
    fn is_shift(&self) -> bool;

    /// Returns whether an add/sub word uses the extended-register form.
    fn is_extend(&self) -> bool;

    /// Shift kind.
    fn shift_type(&self) -> Shift;

    /// Extend kind.
    fn extend_type(&self) -> Extend;

    /// Constant denoted by the logical immediate fields.
    fn imm_logical(&self) -> u64;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn bit(&self, nr: u32) -> u32 {
        (self >> nr) & 1
    }

    #[inline(always)]
    fn bits(&self, shift: u32, count: u32) -> u32 {
        (self >> shift) & ((1 << count) - 1)
    }

    #[inline(always)]
    fn is(&self, family: Family) -> bool {
        family.matches(*self)
    }

    #[inline(always)]
    fn register_size(&self) -> RegisterSize {
        RegisterSize::from_sf(fields::SF.extract(*self))
    }

    #[inline(always)]
    fn has_s(&self) -> bool {
        fields::S.extract(*self) == 1
    }

    #[inline(always)]
    fn n_field(&self) -> u32 {
        fields::N.extract(*self)
    }

    #[inline(always)]
    fn sz_field(&self) -> u32 {
        fields::SZ.extract(*self)
    }

    #[inline(always)]
    fn rd(&self) -> Register {
        raw_register(fields::RD.extract(*self))
    }

    #[inline(always)]
    fn rn(&self) -> Register {
        raw_register(fields::RN.extract(*self))
    }

    #[inline(always)]
    fn rm(&self) -> Register {
        raw_register(fields::RM.extract(*self))
    }

    #[inline(always)]
    fn ra(&self) -> Register {
        raw_register(fields::RA.extract(*self))
    }

    #[inline(always)]
    fn rt(&self) -> Register {
        raw_register(fields::RT.extract(*self))
    }

    #[inline(always)]
    fn rt2(&self) -> Register {
        raw_register(fields::RT2.extract(*self))
    }

    #[inline(always)]
    fn rs(&self) -> Register {
        raw_register(fields::RS.extract(*self))
    }

    #[inline]
    fn rd_register(&self) -> Register {
        Register::decode(fields::RD.extract(*self), destination_register_mode(*self))
    }

    #[inline]
    fn rn_register(&self) -> Register {
        Register::decode(fields::RN.extract(*self), first_operand_register_mode(*self))
    }

    #[inline(always)]
    fn vd(&self) -> VRegister {
        raw_v_register(fields::VD.extract(*self))
    }

    #[inline(always)]
    fn vn(&self) -> VRegister {
        raw_v_register(fields::VN.extract(*self))
    }

    #[inline(always)]
    fn vm(&self) -> VRegister {
        raw_v_register(fields::VM.extract(*self))
    }

    #[inline(always)]
    fn vt(&self) -> VRegister {
        raw_v_register(fields::VT.extract(*self))
    }

    #[inline(always)]
    fn vt2(&self) -> VRegister {
        raw_v_register(fields::VT2.extract(*self))
    }

    #[inline(always)]
    fn imm3(&self) -> u32 {
        fields::IMM3.extract(*self)
    }

    #[inline(always)]
    fn imm6(&self) -> u32 {
        fields::IMM6.extract(*self)
    }

    #[inline(always)]
    fn simm7(&self) -> i64 {
        fields::IMM7.extract_signed(*self)
    }

    #[inline(always)]
    fn imm8(&self) -> u8 {
        fields::IMM8.extract(*self) as u8
    }

    #[inline(always)]
    fn simm9(&self) -> i64 {
        fields::IMM9.extract_signed(*self)
    }

    #[inline(always)]
    fn imm12(&self) -> u32 {
        fields::IMM12.extract(*self)
    }

    #[inline(always)]
    fn imm12_shift(&self) -> u32 {
        fields::IMM12_SHIFT.extract(*self)
    }

    #[inline(always)]
    fn simm14(&self) -> i64 {
        fields::IMM14.extract_signed(*self)
    }

    #[inline(always)]
    fn imm16(&self) -> u32 {
        fields::IMM16.extract(*self)
    }

    #[inline(always)]
    fn simm19(&self) -> i64 {
        fields::IMM19.extract_signed(*self)
    }

    #[inline(always)]
    fn simm26(&self) -> i64 {
        fields::IMM26.extract_signed(*self)
    }

    #[inline]
    fn simm21(&self) -> i64 {
        let combined = (fields::IMM_HI.extract(*self) << 2) | fields::IMM_LO.extract(*self);
        // Sign-extend from bit 20.
        ((combined << 11) as i32 >> 11) as i64
    }

    #[inline(always)]
    fn hw(&self) -> u32 {
        fields::HW.extract(*self)
    }

    #[inline(always)]
    fn imm_r(&self) -> u32 {
        fields::IMM_R.extract(*self)
    }

    #[inline(always)]
    fn imm_s(&self) -> u32 {
        fields::IMM_S.extract(*self)
    }

    #[inline(always)]
    fn test_bit(&self) -> u32 {
        (fields::B5.extract(*self) << 5) | fields::B40.extract(*self)
    }

    #[inline(always)]
    fn condition(&self) -> Condition {
        Condition::from_bits(fields::COND.extract(*self))
    }

    #[inline(always)]
    fn select_condition(&self) -> Condition {
        Condition::from_bits(fields::SEL_COND.extract(*self))
    }

    #[inline]
    fn is_shift(&self) -> bool {
        Family::LogicalShift.matches(*self) || self & B21 == 0
    }

    #[inline]
    fn is_extend(&self) -> bool {
        is_extended_add_sub(*self)
    }

    #[inline(always)]
    fn shift_type(&self) -> Shift {
        Shift::from_bits(fields::SHIFT_TYPE.extract(*self))
    }

    #[inline(always)]
    fn extend_type(&self) -> Extend {
        Extend::from_bits(fields::EXTEND_TYPE.extract(*self))
    }

    #[inline]
    fn imm_logical(&self) -> u64 {
        decode_logical_immediate(
            self.n_field(),
            self.imm_s(),
            self.imm_r(),
            self.register_size(),
        )
    }
}

#[inline(always)]
const fn raw_register(field: u32) -> Register {
    Register::from_field(field)
}

#[inline(always)]
const fn raw_v_register(field: u32) -> VRegister {
    VRegister::ALL[(field & 0x1F) as usize]
}

/// Returns whether `word` is the `ORR` form of a register move (`mov rd, rm`).
pub fn is_register_move(word: u32) -> bool {
    logical_shift::ORR.matches(word)
        && fields::RN.extract(word) == 31
        && fields::IMM6.extract(word) == 0
}
