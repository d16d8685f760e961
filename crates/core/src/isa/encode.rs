//! Instruction word builders.
//!
//! Each builder takes a sub-operation of the matching family and typed
//! operands, and returns the finished word. Operand values are range-checked
//! against their fields; registers are checked against the operand slot's
//! [`R31Type`], so `Csp` cannot land where the word reads the zero register and
//! vice versa. A sub-operation of another family, or an operand form the
//! operation lacks, is reported as an [`EncodingError`] like any other
//! operand mismatch.

use crate::common::bits::{B21, B24, B26, B30, B31};
use crate::common::error::EncodingError;
use crate::isa::condition::{Condition, Extend, ScaleFactor, Shift};
use crate::isa::families::Family;
use crate::isa::fields;
use crate::isa::immediate::{RegisterSize, encode_logical_immediate, encode_vfp_imm};
use crate::isa::ops::SubOp;
use crate::isa::ops::branch::{conditional_branch, exception_gen, unconditional_branch_reg};
use crate::isa::ops::fp::{fp_compare, fp_int_cvt};
use crate::isa::ops::dp_immediate::{logical_imm, pc_rel};
use crate::isa::ops::load_store::load_store_reg;
use crate::isa::registers::{LINK_REGISTER, LinkRegisterUse, R31Type, Register, VRegister};

/// Register operand with an optional shift (`rm, LSL #amount`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftedRegister {
    /// Shifted register.
    pub rm: Register,
    /// Shift kind.
    pub shift: Shift,
    /// Shift amount.
    pub amount: u32,
}

impl ShiftedRegister {
    /// The register without a shift.
    pub const fn plain(rm: Register) -> Self {
        Self {
            rm,
            shift: Shift::Lsl,
            amount: 0,
        }
    }
}

/// Register operand with an extension and optional left shift (`rm, SXTW #amount`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedRegister {
    /// Extended register.
    pub rm: Register,
    /// Extension kind.
    pub extend: Extend,
    /// Left shift applied after extension (0..=4).
    pub amount: u32,
}

/// Addressing mode of a load or store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Address {
    /// `[rn, #offset]`.
    Offset(i64),
    /// `[rn, #offset]!`, writing the address back before the access.
    PreIndex(i64),
    /// `[rn], #offset`, writing the address back after the access.
    PostIndex(i64),
}

#[inline]
fn register_field(reg: Register, mode: R31Type, operand: &'static str) -> Result<u32, EncodingError> {
    match (reg, mode) {
        (Register::Csp, R31Type::ZeroRegister) | (Register::Zr, R31Type::StackPointer) => {
            Err(EncodingError::InvalidOperand {
                register: reg,
                operand,
            })
        }
        _ => Ok(u32::from(reg.encoding())),
    }
}

#[inline]
fn scaled_offset(offset: i64, scale: u32) -> Result<i64, EncodingError> {
    let unit = 1i64 << scale;
    if offset % unit == 0 {
        Ok(offset >> scale)
    } else {
        Err(EncodingError::MisalignedOffset {
            offset,
            scale: 1 << scale,
        })
    }
}

#[inline]
fn check_family(op: SubOp, family: Family) -> Result<(), EncodingError> {
    if op.family() == family {
        Ok(())
    } else {
        Err(EncodingError::WrongFamily {
            operation: op.name(),
            family: op.family().name(),
            expected: family.name(),
        })
    }
}

#[inline]
fn require(holds: bool, op: SubOp, reason: &'static str) -> Result<(), EncodingError> {
    if holds {
        Ok(())
    } else {
        Err(EncodingError::UnsupportedForm {
            operation: op.name(),
            reason,
        })
    }
}

#[inline]
const fn size_bits(size: RegisterSize) -> u32 {
    size.sf() << fields::SF.shift
}

#[inline]
fn flag_bit(set_flags: bool) -> u32 {
    u32::from(set_flags) << fields::S.shift
}

// ── Data processing (immediate) ─────────────────────────────

/// `ADD`/`SUB{S} rd, rn, #imm`, with `imm` shifted by 12 when needed.
///
/// # Errors
///
/// Fails if `imm` is neither a 12-bit value nor a 12-bit value shifted left
/// by 12, or if a register cannot occupy its slot.
pub fn add_sub_immediate(
    op: SubOp,
    size: RegisterSize,
    set_flags: bool,
    rd: Register,
    rn: Register,
    imm: u64,
) -> Result<u32, EncodingError> {
    check_family(op, Family::AddSubImm)?;
    let (imm12, shift) = if fields::IMM12.fits(imm) {
        (imm, 0)
    } else if imm & 0xFFF == 0 && fields::IMM12.fits(imm >> 12) {
        (imm >> 12, 1)
    } else {
        return Err(EncodingError::FieldOverflow {
            field: fields::IMM12.name,
            value: imm as i64,
            width: fields::IMM12.width,
        });
    };
    let rd_mode = if set_flags {
        R31Type::ZeroRegister
    } else {
        R31Type::StackPointer
    };
    let word = op.bits() | size_bits(size) | flag_bit(set_flags) | fields::IMM12_SHIFT.place(shift);
    let word = fields::IMM12.insert(word, imm12)?;
    let word = fields::RN.insert(word, register_field(rn, R31Type::StackPointer, "add/sub base")?.into())?;
    fields::RD.insert(word, register_field(rd, rd_mode, "add/sub destination")?.into())
}

/// `AND`/`ORR`/`EOR`/`ANDS rd, rn, #value`.
///
/// # Errors
///
/// Fails if `value` is not a logical immediate at `size`.
pub fn logical_immediate(
    op: SubOp,
    size: RegisterSize,
    rd: Register,
    rn: Register,
    value: u64,
) -> Result<u32, EncodingError> {
    check_family(op, Family::LogicalImm)?;
    let imm = encode_logical_immediate(value, size)?;
    let rd_mode = if op == logical_imm::ANDIS {
        R31Type::ZeroRegister
    } else {
        R31Type::StackPointer
    };
    let word = op.bits()
        | size_bits(size)
        | fields::N.place(imm.n)
        | fields::IMM_R.place(imm.imm_r)
        | fields::IMM_S.place(imm.imm_s);
    let word = fields::RN.insert(word, register_field(rn, R31Type::ZeroRegister, "logical source")?.into())?;
    fields::RD.insert(word, register_field(rd, rd_mode, "logical destination")?.into())
}

/// `MOVN`/`MOVZ`/`MOVK rd, #imm16, LSL #(hw * 16)`.
///
/// # Errors
///
/// Fails if `hw` selects a half-word outside the register.
pub fn move_wide(
    op: SubOp,
    size: RegisterSize,
    rd: Register,
    imm16: u16,
    hw: u32,
) -> Result<u32, EncodingError> {
    check_family(op, Family::MoveWide)?;
    let half_words = size.bits() / 16;
    if hw >= half_words {
        return Err(EncodingError::FieldOverflow {
            field: fields::HW.name,
            value: i64::from(hw),
            width: half_words.trailing_zeros(),
        });
    }
    let word = op.bits() | size_bits(size) | fields::HW.place(hw) | fields::IMM16.place(imm16.into());
    fields::RD.insert(word, register_field(rd, R31Type::ZeroRegister, "move destination")?.into())
}

/// `ADR rd, #offset` or `ADRP rd, #offset` (page-aligned byte offset).
///
/// # Errors
///
/// Fails if an `ADRP` offset is not page aligned or the offset needs more
/// than 21 signed bits (after page scaling).
pub fn pc_relative(op: SubOp, rd: Register, offset: i64) -> Result<u32, EncodingError> {
    check_family(op, Family::PcRel)?;
    let imm = if op == pc_rel::ADRP {
        scaled_offset(offset, 12)?
    } else {
        offset
    };
    let half = 1i64 << 20;
    if imm < -half || imm >= half {
        return Err(EncodingError::FieldOverflow {
            field: "imm21",
            value: imm,
            width: 21,
        });
    }
    let imm = imm as u32;
    let word = op.bits() | fields::IMM_LO.place(imm & 0x3) | fields::IMM_HI.place(imm >> 2);
    fields::RD.insert(word, register_field(rd, R31Type::ZeroRegister, "address destination")?.into())
}

// ── Data processing (register) ──────────────────────────────

/// `ADD`/`SUB{S} rd, rn, rm{, shift #amount}`.
///
/// # Errors
///
/// Fails if the shift amount is not below the register width or a register
/// cannot occupy its slot.
/// Also fails for a `ROR` shift, which add/sub does not accept.
pub fn add_sub_shifted(
    op: SubOp,
    size: RegisterSize,
    set_flags: bool,
    rd: Register,
    rn: Register,
    operand: ShiftedRegister,
) -> Result<u32, EncodingError> {
    check_family(op, Family::AddSubShiftExt)?;
    require(operand.shift != Shift::Ror, op, "cannot rotate its operand")?;
    shifted_register_word(op.bits() | flag_bit(set_flags), size, rd, rn, operand)
}

/// `ADD`/`SUB{S} rd, rn, rm, extend #amount`.
///
/// # Errors
///
/// Fails if the left shift exceeds 4 or a register cannot occupy its slot.
pub fn add_sub_extended(
    op: SubOp,
    size: RegisterSize,
    set_flags: bool,
    rd: Register,
    rn: Register,
    operand: ExtendedRegister,
) -> Result<u32, EncodingError> {
    check_family(op, Family::AddSubShiftExt)?;
    if operand.amount > 4 {
        return Err(EncodingError::FieldOverflow {
            field: fields::IMM3.name,
            value: i64::from(operand.amount),
            width: fields::IMM3.width,
        });
    }
    let rd_mode = if set_flags {
        R31Type::ZeroRegister
    } else {
        R31Type::StackPointer
    };
    let word = op.bits()
        | size_bits(size)
        | flag_bit(set_flags)
        | B21
        | fields::EXTEND_TYPE.place(operand.extend.bits())
        | fields::IMM3.place(operand.amount);
    let word = fields::RM.insert(word, register_field(operand.rm, R31Type::ZeroRegister, "extended operand")?.into())?;
    let word = fields::RN.insert(word, register_field(rn, R31Type::StackPointer, "add/sub base")?.into())?;
    fields::RD.insert(word, register_field(rd, rd_mode, "add/sub destination")?.into())
}

/// `AND`/`ORR`/`EOR`/`BIC`/... `rd, rn, rm{, shift #amount}`.
///
/// # Errors
///
/// Fails if the shift amount is not below the register width or a register
/// cannot occupy its slot.
pub fn logical_shifted(
    op: SubOp,
    size: RegisterSize,
    rd: Register,
    rn: Register,
    operand: ShiftedRegister,
) -> Result<u32, EncodingError> {
    check_family(op, Family::LogicalShift)?;
    shifted_register_word(op.bits(), size, rd, rn, operand)
}

fn shifted_register_word(
    bits: u32,
    size: RegisterSize,
    rd: Register,
    rn: Register,
    operand: ShiftedRegister,
) -> Result<u32, EncodingError> {
    if operand.amount >= size.bits() {
        return Err(EncodingError::FieldOverflow {
            field: fields::IMM6.name,
            value: i64::from(operand.amount),
            width: size.bits().trailing_zeros(),
        });
    }
    let word = bits
        | size_bits(size)
        | fields::SHIFT_TYPE.place(operand.shift.bits())
        | fields::IMM6.place(operand.amount);
    let word = fields::RM.insert(word, register_field(operand.rm, R31Type::ZeroRegister, "shifted operand")?.into())?;
    let word = fields::RN.insert(word, register_field(rn, R31Type::ZeroRegister, "first operand")?.into())?;
    fields::RD.insert(word, register_field(rd, R31Type::ZeroRegister, "destination")?.into())
}

/// `CSEL`/`CSINC`/`CSINV`/`CSNEG rd, rn, rm, cond`.
///
/// # Errors
///
/// Fails if a register cannot occupy its slot.
pub fn conditional_select(
    op: SubOp,
    size: RegisterSize,
    rd: Register,
    rn: Register,
    rm: Register,
    cond: Condition,
) -> Result<u32, EncodingError> {
    check_family(op, Family::ConditionalSelect)?;
    let word = op.bits() | size_bits(size) | fields::SEL_COND.place(cond.bits());
    three_registers(word, rd, rn, rm)
}

/// `CLZ`/`RBIT rd, rn`.
///
/// # Errors
///
/// Fails if a register cannot occupy its slot.
pub fn data_processing_1(op: SubOp, size: RegisterSize, rd: Register, rn: Register) -> Result<u32, EncodingError> {
    check_family(op, Family::MiscDp1Source)?;
    let word = op.bits() | size_bits(size);
    let word = fields::RN.insert(word, register_field(rn, R31Type::ZeroRegister, "source")?.into())?;
    fields::RD.insert(word, register_field(rd, R31Type::ZeroRegister, "destination")?.into())
}

/// `UDIV`/`SDIV`/`LSLV`/`LSRV`/`ASRV rd, rn, rm`.
///
/// # Errors
///
/// Fails if a register cannot occupy its slot.
pub fn data_processing_2(
    op: SubOp,
    size: RegisterSize,
    rd: Register,
    rn: Register,
    rm: Register,
) -> Result<u32, EncodingError> {
    check_family(op, Family::MiscDp2Source)?;
    three_registers(op.bits() | size_bits(size), rd, rn, rm)
}

/// Multiply-add family: `rd = ra ± rn * rm` (operand width is part of `op`).
///
/// # Errors
///
/// Fails if a register cannot occupy its slot.
pub fn data_processing_3(
    op: SubOp,
    rd: Register,
    rn: Register,
    rm: Register,
    ra: Register,
) -> Result<u32, EncodingError> {
    check_family(op, Family::MiscDp3Source)?;
    let word = fields::RA.insert(op.bits(), register_field(ra, R31Type::ZeroRegister, "accumulator")?.into())?;
    three_registers(word, rd, rn, rm)
}

fn three_registers(word: u32, rd: Register, rn: Register, rm: Register) -> Result<u32, EncodingError> {
    let word = fields::RM.insert(word, register_field(rm, R31Type::ZeroRegister, "second operand")?.into())?;
    let word = fields::RN.insert(word, register_field(rn, R31Type::ZeroRegister, "first operand")?.into())?;
    fields::RD.insert(word, register_field(rd, R31Type::ZeroRegister, "destination")?.into())
}

// ── Branches ────────────────────────────────────────────────

/// `B`/`BL` to a byte offset from the instruction.
///
/// # Errors
///
/// Fails if `offset` is not a multiple of 4 or exceeds ±128MB.
pub fn unconditional_branch(op: SubOp, offset: i64) -> Result<u32, EncodingError> {
    check_family(op, Family::UnconditionalBranch)?;
    fields::IMM26.insert_signed(op.bits(), scaled_offset(offset, 2)?)
}

/// `B.cond` to a byte offset from the instruction.
///
/// # Errors
///
/// Fails if `offset` is not a multiple of 4 or exceeds ±1MB.
pub fn conditional_branch(cond: Condition, offset: i64) -> Result<u32, EncodingError> {
    let word = conditional_branch::BCOND.bits() | fields::COND.place(cond.bits());
    fields::IMM19.insert_signed(word, scaled_offset(offset, 2)?)
}

/// `CBZ`/`CBNZ rt, offset`.
///
/// # Errors
///
/// Fails if `offset` is not a multiple of 4, exceeds ±1MB, or `rt` is `Csp`.
pub fn compare_and_branch(
    op: SubOp,
    size: RegisterSize,
    rt: Register,
    offset: i64,
) -> Result<u32, EncodingError> {
    check_family(op, Family::CompareAndBranch)?;
    let word = fields::IMM19.insert_signed(op.bits() | size_bits(size), scaled_offset(offset, 2)?)?;
    fields::RT.insert(word, register_field(rt, R31Type::ZeroRegister, "compared register")?.into())
}

/// `TBZ`/`TBNZ rt, #bit, offset`.
///
/// # Errors
///
/// Fails if `bit` is above 63, `offset` is not a multiple of 4 or exceeds
/// ±32KB, or `rt` is `Csp`.
pub fn test_and_branch(op: SubOp, rt: Register, bit: u32, offset: i64) -> Result<u32, EncodingError> {
    check_family(op, Family::TestAndBranch)?;
    if bit >= 64 {
        return Err(EncodingError::FieldOverflow {
            field: "bit",
            value: i64::from(bit),
            width: 6,
        });
    }
    let word = op.bits() | fields::B5.place(bit >> 5) | fields::B40.place(bit & 0x1F);
    let word = fields::IMM14.insert_signed(word, scaled_offset(offset, 2)?)?;
    fields::RT.insert(word, register_field(rt, R31Type::ZeroRegister, "tested register")?.into())
}

/// `BR`/`BLR`/`RET rn`.
///
/// # Errors
///
/// Fails if `rn` is an encoding-31 alias.
pub fn branch_register(op: SubOp, rn: Register) -> Result<u32, EncodingError> {
    check_family(op, Family::UnconditionalBranchReg)?;
    if rn.is_alias() {
        return Err(EncodingError::InvalidOperand {
            register: rn,
            operand: "branch target",
        });
    }
    fields::RN.insert(op.bits(), rn.encoding().into())
}

/// `RET` through the link register.
pub const fn ret() -> u32 {
    let lr = LINK_REGISTER.access(LinkRegisterUse::ReadReturnAddress);
    unconditional_branch_reg::RET.bits() | fields::RN.place(lr.encoding() as u32)
}

/// `SVC`/`BRK`/`HLT #imm16`.
///
/// # Errors
///
/// Fails if `op` is not an exception-generating operation.
pub fn exception(op: SubOp, imm16: u16) -> Result<u32, EncodingError> {
    check_family(op, Family::ExceptionGen)?;
    Ok(op.bits() | fields::IMM16.place(imm16.into()))
}

/// `BRK #imm16`.
pub const fn breakpoint(imm16: u16) -> u32 {
    exception_gen::BRK.bits() | fields::IMM16.place(imm16 as u32)
}

// ── Loads and stores ────────────────────────────────────────

/// Single-register integer load or store.
///
/// `Offset` addresses use the scaled unsigned 12-bit form when the offset
/// allows it and fall back to the unscaled signed 9-bit form.
///
/// # Errors
///
/// Fails if the offset fits neither form or a register cannot occupy its slot.
/// Also fails if `op` is an FP load/store or `scale` is 16 bytes.
pub fn load_store(
    op: SubOp,
    scale: ScaleFactor,
    rt: Register,
    rn: Register,
    address: Address,
) -> Result<u32, EncodingError> {
    check_family(op, Family::LoadStoreReg)?;
    require(op.extra() & B26 == 0, op, "transfers an FP register")?;
    require(scale != ScaleFactor::Times16, op, "cannot access 16 bytes")?;
    let rt = register_field(rt, R31Type::ZeroRegister, "transfer register")?;
    load_store_word(op.bits() | fields::SZ.place(scale.log2()), scale, rt, rn, address)
}

/// Single-register FP load or store (`FSTR`/`FLDR`, or `FSTRQ`/`FLDRQ` with a
/// 16-byte scale).
///
/// # Errors
///
/// Fails if the offset fits neither addressing form or `rn` is `Zr`, if `op`
/// is an integer load/store, or if the Q forms and a 16-byte scale are not
/// used together.
pub fn load_store_fp(
    op: SubOp,
    scale: ScaleFactor,
    vt: VRegister,
    rn: Register,
    address: Address,
) -> Result<u32, EncodingError> {
    check_family(op, Family::LoadStoreReg)?;
    require(op.extra() & B26 != 0, op, "transfers a general-purpose register")?;
    let quad = op == load_store_reg::FSTRQ || op == load_store_reg::FLDRQ;
    require(quad == (scale == ScaleFactor::Times16), op, "needs a scale matching its register width")?;
    let sz = if quad { 0 } else { scale.log2() };
    load_store_word(op.bits() | fields::SZ.place(sz), scale, vt.encoding().into(), rn, address)
}

fn load_store_word(
    word: u32,
    scale: ScaleFactor,
    rt: u32,
    rn: Register,
    address: Address,
) -> Result<u32, EncodingError> {
    let word = match address {
        Address::Offset(offset)
            if offset >= 0 && offset % i64::from(scale.bytes()) == 0
                && fields::IMM12.fits((offset >> scale.log2()) as u64) =>
        {
            fields::IMM12.insert(word | B24, (offset >> scale.log2()) as u64)?
        }
        Address::Offset(offset) => fields::IMM9.insert_signed(word, offset)?,
        Address::PreIndex(offset) => {
            fields::IMM9.insert_signed(word | fields::INDEX_MODE.place(0b11), offset)?
        }
        Address::PostIndex(offset) => {
            fields::IMM9.insert_signed(word | fields::INDEX_MODE.place(0b01), offset)?
        }
    };
    let word = fields::RN.insert(word, register_field(rn, R31Type::StackPointer, "base register")?.into())?;
    fields::RT.insert(word, rt.into())
}

/// Integer `STP`/`LDP rt, rt2, [rn, ...]`.
///
/// # Errors
///
/// Fails if the offset is not a multiple of the register size or does not
/// fit seven signed bits after scaling, or if `op` is an FP pair.
pub fn load_store_pair(
    op: SubOp,
    size: RegisterSize,
    rt: Register,
    rt2: Register,
    rn: Register,
    address: Address,
) -> Result<u32, EncodingError> {
    check_family(op, Family::LoadStoreRegPair)?;
    require(op.extra() & B26 == 0, op, "transfers FP registers")?;
    let (opc, scale) = match size {
        RegisterSize::W => (0, 2),
        RegisterSize::X => (B31, 3),
    };
    let rt = register_field(rt, R31Type::ZeroRegister, "first transfer register")?;
    let rt2 = register_field(rt2, R31Type::ZeroRegister, "second transfer register")?;
    pair_word(op.bits() | opc, scale, rt, rt2, rn, address)
}

/// FP `FSTP`/`FLDP` of two D registers.
///
/// # Errors
///
/// Fails if the offset is not a multiple of 8 or does not fit seven signed
/// bits after scaling, or if `op` is an integer pair.
pub fn load_store_pair_fp(
    op: SubOp,
    vt: VRegister,
    vt2: VRegister,
    rn: Register,
    address: Address,
) -> Result<u32, EncodingError> {
    check_family(op, Family::LoadStoreRegPair)?;
    require(op.extra() & B26 != 0, op, "transfers general-purpose registers")?;
    pair_word(op.bits() | B30, 3, vt.encoding().into(), vt2.encoding().into(), rn, address)
}

fn pair_word(
    word: u32,
    scale: u32,
    rt: u32,
    rt2: u32,
    rn: Register,
    address: Address,
) -> Result<u32, EncodingError> {
    let (mode, offset) = match address {
        Address::PostIndex(offset) => (0b01, offset),
        Address::Offset(offset) => (0b10, offset),
        Address::PreIndex(offset) => (0b11, offset),
    };
    let word = fields::IMM7.insert_signed(word | fields::PAIR_ADDRESSING.place(mode), scaled_offset(offset, scale)?)?;
    let word = fields::RN.insert(word, register_field(rn, R31Type::StackPointer, "base register")?.into())?;
    let word = fields::RT2.insert(word, rt2.into())?;
    fields::RT.insert(word, rt.into())
}

// ── Floating point ──────────────────────────────────────────

/// `FMOV vd, #value`.
///
/// # Errors
///
/// Fails if `value` has no 8-bit immediate encoding.
pub fn fp_move_immediate(op: SubOp, vd: VRegister, value: f64) -> Result<u32, EncodingError> {
    check_family(op, Family::FpImm)?;
    let imm8 = encode_vfp_imm(value)?;
    Ok(op.bits() | fields::IMM8.place(imm8.into()) | fields::VD.place(vd.encoding().into()))
}

/// One-source FP operation `vd = op(vn)`.
///
/// # Errors
///
/// Fails if `op` is not a one-source FP operation.
pub fn fp_one_source(op: SubOp, vd: VRegister, vn: VRegister) -> Result<u32, EncodingError> {
    check_family(op, Family::FpOneSource)?;
    Ok(op.bits() | fields::VN.place(vn.encoding().into()) | fields::VD.place(vd.encoding().into()))
}

/// Two-source FP operation `vd = vn op vm`.
///
/// # Errors
///
/// Fails if `op` is not a two-source FP operation.
pub fn fp_two_source(op: SubOp, vd: VRegister, vn: VRegister, vm: VRegister) -> Result<u32, EncodingError> {
    check_family(op, Family::FpTwoSource)?;
    Ok(vector_operands(op.bits(), vd, vn, vm))
}

/// `FCMP vn, vm`, or `FCMP vn, #0.0` when `vm` is `None`.
pub fn fp_compare_registers(vn: VRegister, vm: Option<VRegister>) -> u32 {
    let word = match vm {
        Some(vm) => fp_compare::FCMPD.bits() | fields::VM.place(vm.encoding().into()),
        None => fp_compare::FCMPZD.bits(),
    };
    word | fields::VN.place(vn.encoding().into())
}

/// FP-to-general move or conversion (`FMOV`, `FCVT*S`).
///
/// # Errors
///
/// Fails if `rd` is `Csp` or `op` writes an FP register.
pub fn fp_to_int(op: SubOp, size: RegisterSize, rd: Register, vn: VRegister) -> Result<u32, EncodingError> {
    check_family(op, Family::FpIntCvt)?;
    require(!writes_fp_register(op), op, "writes an FP register")?;
    let word = op.bits() | size_bits(size) | fields::VN.place(vn.encoding().into());
    fields::RD.insert(word, register_field(rd, R31Type::ZeroRegister, "destination")?.into())
}

/// General-to-FP move or conversion (`FMOV`, `SCVTF`).
///
/// # Errors
///
/// Fails if `rn` is `Csp` or `op` writes a general-purpose register.
pub fn int_to_fp(op: SubOp, size: RegisterSize, vd: VRegister, rn: Register) -> Result<u32, EncodingError> {
    check_family(op, Family::FpIntCvt)?;
    require(writes_fp_register(op), op, "writes a general-purpose register")?;
    let word = op.bits() | size_bits(size) | fields::VD.place(vd.encoding().into());
    fields::RN.insert(word, register_field(rn, R31Type::ZeroRegister, "source")?.into())
}

fn writes_fp_register(op: SubOp) -> bool {
    op == fp_int_cvt::FMOVSR || op == fp_int_cvt::FMOVDR || op == fp_int_cvt::SCVTFD
}

// ── SIMD ────────────────────────────────────────────────────

/// Three-same SIMD operation `vd = vn op vm` on full 128-bit vectors.
///
/// # Errors
///
/// Fails if `op` is not a three-same SIMD operation.
pub fn simd_three_same(op: SubOp, vd: VRegister, vn: VRegister, vm: VRegister) -> Result<u32, EncodingError> {
    check_family(op, Family::SimdThreeSame)?;
    Ok(vector_operands(op.bits(), vd, vn, vm))
}

/// Two-register SIMD operation `vd = op(vn)` on full 128-bit vectors.
///
/// # Errors
///
/// Fails if `op` is not a two-register SIMD operation.
pub fn simd_two_reg(op: SubOp, vd: VRegister, vn: VRegister) -> Result<u32, EncodingError> {
    check_family(op, Family::SimdTwoReg)?;
    Ok(op.bits() | fields::VN.place(vn.encoding().into()) | fields::VD.place(vd.encoding().into()))
}

fn vector_operands(word: u32, vd: VRegister, vn: VRegister, vm: VRegister) -> u32 {
    word | fields::VM.place(vm.encoding().into())
        | fields::VN.place(vn.encoding().into())
        | fields::VD.place(vd.encoding().into())
}

// ── Patching ────────────────────────────────────────────────

/// Replaces the 12-bit immediate of an add/sub immediate or scaled load/store.
///
/// # Errors
///
/// Fails if `imm12` needs more than 12 bits.
pub const fn set_imm12(word: u32, imm12: u32) -> Result<u32, EncodingError> {
    fields::IMM12.insert(word, imm12 as u64)
}

/// Re-targets a PC-relative branch or literal load to `offset` bytes.
///
/// # Errors
///
/// Fails if the word has no PC-relative offset or `offset` does not fit it.
pub fn set_branch_offset(word: u32, offset: i64) -> Result<u32, EncodingError> {
    let field = match Family::classify(word) {
        Some(Family::UnconditionalBranch) => fields::IMM26,
        Some(Family::ConditionalBranch | Family::CompareAndBranch | Family::LoadRegLiteral) => {
            fields::IMM19
        }
        Some(Family::TestAndBranch) => fields::IMM14,
        _ => return Err(EncodingError::NotPcRelative { word }),
    };
    field.insert_signed(word, scaled_offset(offset, 2)?)
}
