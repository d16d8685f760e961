//! Instruction Decoder.
//!
//! This module turns a 32-bit word into a structured [`Decoded`] view for the
//! code inspector and the patching logic. It classifies the word into its
//! encoding family, identifies the sub-operation, resolves register field 31
//! through the word's operand modes, and computes the family's immediate
//! (scaled branch offsets, logical constants, FP immediates, ...).

use crate::common::bits::B24;
use crate::isa::families::Family;
use crate::isa::immediate::{RegisterSize, vfp_expand_imm};
use crate::isa::instruction::{INSTR_SIZE_LOG2, InstructionBits};
use crate::isa::ops::{self, SubOp};
use crate::isa::ops::dp_immediate::pc_rel;
use crate::isa::registers::Register;

/// Decoded instruction structure containing the fields common to most families.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// Raw 32-bit instruction encoding.
    pub raw: u32,
    /// Most specific encoding family, if any matched.
    pub family: Option<Family>,
    /// Identified sub-operation, if the word is one of the declared ones.
    pub op: Option<SubOp>,
    /// Operand width from the `sf` bit.
    pub size: RegisterSize,
    /// Destination (or transfer) register, with encoding 31 resolved.
    pub rd: Register,
    /// First source (or base) register, with encoding 31 resolved.
    pub rn: Register,
    /// Second source register.
    pub rm: Register,
    /// Family-specific immediate (byte offsets for PC-relative forms; IEEE
    /// bits for FP immediates).
    pub imm: i64,
}

/// Decodes an instruction word.
///
/// # Arguments
///
/// * `word` - The 32-bit instruction encoding to decode
///
/// # Returns
///
/// A `Decoded` structure; words outside every family decode with `family`
/// and `op` set to `None` and a zero immediate.
pub fn decode(word: u32) -> Decoded {
    let family = Family::classify(word);
    let op = family.and_then(|f| {
        ops::sub_operations(f)
            .iter()
            .copied()
            .find(|op| op.matches(word))
    });
    let imm = family.map_or(0, |f| decode_imm(word, f));

    Decoded {
        raw: word,
        family,
        op,
        size: word.register_size(),
        rd: word.rd_register(),
        rn: word.rn_register(),
        rm: word.rm(),
        imm,
    }
}

/// Computes the immediate operand of `word` as a member of `family`.
fn decode_imm(word: u32, family: Family) -> i64 {
    match family {
        Family::AddSubImm => i64::from(word.imm12()) << (12 * word.imm12_shift()),
        Family::LogicalImm => word.imm_logical() as i64,
        Family::MoveWide => i64::from(word.imm16()) << (16 * word.hw()),
        Family::PcRel => {
            if pc_rel::ADRP.matches(word) {
                word.simm21() << 12
            } else {
                word.simm21()
            }
        }
        Family::UnconditionalBranch => word.simm26() << INSTR_SIZE_LOG2,
        Family::ConditionalBranch | Family::CompareAndBranch | Family::LoadRegLiteral => {
            word.simm19() << INSTR_SIZE_LOG2
        }
        Family::TestAndBranch => word.simm14() << INSTR_SIZE_LOG2,
        Family::LoadStoreReg => decode_load_store_offset(word),
        Family::LoadStoreRegPair => word.simm7() << pair_scale(word),
        Family::ExceptionGen => i64::from(word.imm16()),
        Family::FpImm => vfp_expand_imm(word.imm8()) as i64,
        _ => 0,
    }
}

/// Byte offset of a single-register load/store.
///
/// The unsigned-offset form scales its 12-bit field by the access size; the
/// unscaled and indexed forms carry a signed 9-bit byte offset.
fn decode_load_store_offset(word: u32) -> i64 {
    if word & B24 != 0 {
        i64::from(word.imm12()) << load_store_scale(word)
    } else {
        word.simm9()
    }
}

/// log2 of the access size of a single-register load/store.
fn load_store_scale(word: u32) -> u32 {
    let size = word.sz_field();
    // FP access with opc<1> set and size 0 is a 128-bit access.
    let vector = word.bit(26) == 1;
    if vector && size == 0 && word.bit(23) == 1 {
        4
    } else {
        size
    }
}

/// log2 of the element size of a load/store pair.
fn pair_scale(word: u32) -> u32 {
    let opc = word.bits(30, 2);
    if word.bit(26) == 1 {
        // S, D, Q registers.
        2 + opc
    } else if opc == 0b10 {
        3
    } else {
        2
    }
}

/// Byte offset of a PC-relative branch or literal load, if `word` is one.
pub fn branch_offset(word: u32) -> Option<i64> {
    match Family::classify(word)? {
        family @ (Family::UnconditionalBranch
        | Family::ConditionalBranch
        | Family::CompareAndBranch
        | Family::TestAndBranch
        | Family::LoadRegLiteral) => Some(decode_imm(word, family)),
        _ => None,
    }
}
