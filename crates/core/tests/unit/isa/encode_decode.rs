//! Word Builder and Decoder Tests.
//!
//! Every expected word below is the assembler's encoding of the instruction
//! in the trailing comment. Each group then decodes its words back and checks
//! the family, sub-operation, registers and immediate.

use arm64_vm_core::common::error::EncodingError;
use arm64_vm_core::isa::condition::{Condition, Extend, ScaleFactor, Shift};
use arm64_vm_core::isa::decode::{branch_offset, decode};
use arm64_vm_core::isa::encode::{self, Address, ExtendedRegister, ShiftedRegister};
use arm64_vm_core::isa::families::Family;
use arm64_vm_core::isa::immediate::RegisterSize::{W, X};
use arm64_vm_core::isa::instruction::{BREAK_INSTRUCTION_FILLER, NOP_INSTRUCTION, is_register_move};
use arm64_vm_core::isa::ops::branch::{compare_and_branch, test_and_branch, unconditional_branch, unconditional_branch_reg};
use arm64_vm_core::isa::ops::dp_immediate::{add_sub_imm, logical_imm, move_wide, pc_rel};
use arm64_vm_core::isa::ops::dp_register::{add_sub_shift_ext, conditional_select, logical_shift, misc_dp_2_source, misc_dp_3_source};
use arm64_vm_core::isa::ops::fp::{fp_imm, fp_int_cvt, fp_one_source, fp_two_source};
use arm64_vm_core::isa::ops::load_store::{load_store_reg, load_store_reg_pair};
use arm64_vm_core::isa::ops::simd::simd_three_same;
use arm64_vm_core::isa::registers::{LINK_REGISTER, LinkRegisterUse, Register, VRegister};
use pretty_assertions::assert_eq;

const R0: Register = Register::R0;
const R1: Register = Register::R1;
const R2: Register = Register::R2;
const R16: Register = Register::R16;
const R29: Register = Register::R29;
const CSP: Register = Register::Csp;
const ZR: Register = Register::Zr;
use VRegister::{V0, V1, V2};

#[test]
fn data_processing_immediate() {
    // add x0, x1, #1
    assert_eq!(encode::add_sub_immediate(add_sub_imm::ADDI, X, false, R0, R1, 1), Ok(0x9100_0420));
    // add x0, x1, #0x1000
    assert_eq!(encode::add_sub_immediate(add_sub_imm::ADDI, X, false, R0, R1, 0x1000), Ok(0x9140_0420));
    // cmp x1, #2
    assert_eq!(encode::add_sub_immediate(add_sub_imm::SUBI, X, true, ZR, R1, 2), Ok(0xF100_083F));
    // mov x0, #0xff
    assert_eq!(encode::logical_immediate(logical_imm::ORRI, X, R0, ZR, 0xFF), Ok(0xB240_1FE0));
    // movz x0, #1
    assert_eq!(encode::move_wide(move_wide::MOVZ, X, R0, 1, 0), Ok(0xD280_0020));
    // adr x0, .+8
    assert_eq!(encode::pc_relative(pc_rel::ADR, R0, 8), Ok(0x1000_0040));
    // adrp x0, .+0x1000
    assert_eq!(encode::pc_relative(pc_rel::ADRP, R0, 0x1000), Ok(0xB000_0000));
}

#[test]
fn decode_data_processing_immediate() {
    let add = decode(0x9140_0420);
    assert_eq!(add.family, Some(Family::AddSubImm));
    assert_eq!(add.op, Some(add_sub_imm::ADDI));
    assert_eq!((add.rd, add.rn, add.imm), (R0, R1, 0x1000));

    let cmp = decode(0xF100_083F);
    assert_eq!(cmp.op, Some(add_sub_imm::SUBI));
    assert_eq!(cmp.rd, ZR);

    let mov = decode(0xB240_1FE0);
    assert_eq!(mov.op, Some(logical_imm::ORRI));
    assert_eq!((mov.rd, mov.rn, mov.imm), (R0, ZR, 0xFF));

    assert_eq!(decode(0xD280_0020).imm, 1);
    assert_eq!(decode(0x1000_0040).imm, 8);
    assert_eq!(decode(0xB000_0000).op, Some(pc_rel::ADRP));
    assert_eq!(decode(0xB000_0000).imm, 0x1000);
}

#[test]
fn data_processing_register() {
    // add x0, x1, x2, lsl #3
    let shifted = ShiftedRegister {
        rm: R2,
        shift: Shift::Lsl,
        amount: 3,
    };
    assert_eq!(encode::add_sub_shifted(add_sub_shift_ext::ADD, X, false, R0, R1, shifted), Ok(0x8B02_0C20));
    // add x0, csp, w1, uxtw
    let extended = ExtendedRegister {
        rm: R1,
        extend: Extend::Uxtw,
        amount: 0,
    };
    assert_eq!(encode::add_sub_extended(add_sub_shift_ext::ADD, X, false, R0, CSP, extended), Ok(0x8B21_43E0));
    // mov x0, x1
    assert_eq!(
        encode::logical_shifted(logical_shift::ORR, X, R0, ZR, ShiftedRegister::plain(R1)),
        Ok(0xAA01_03E0)
    );
    // mul x0, x1, x2
    assert_eq!(encode::data_processing_3(misc_dp_3_source::MADD, R0, R1, R2, ZR), Ok(0x9B02_7C20));
    // sdiv x0, x1, x2
    assert_eq!(encode::data_processing_2(misc_dp_2_source::SDIV, X, R0, R1, R2), Ok(0x9AC2_0C20));
    // csel x0, x1, x2, eq
    assert_eq!(
        encode::conditional_select(conditional_select::CSEL, X, R0, R1, R2, Condition::EQUAL),
        Ok(0x9A82_0020)
    );
}

#[test]
fn decode_data_processing_register() {
    let add = decode(0x8B21_43E0);
    assert_eq!(add.op, Some(add_sub_shift_ext::ADD));
    assert_eq!((add.rd, add.rn, add.rm), (R0, CSP, R1));

    let mov = decode(0xAA01_03E0);
    assert_eq!(mov.op, Some(logical_shift::ORR));
    assert_eq!((mov.rd, mov.rn, mov.rm), (R0, ZR, R1));
    assert!(is_register_move(0xAA01_03E0));
    assert!(!is_register_move(0x8B02_0C20));

    let mul = decode(0x9B02_7C20);
    assert_eq!(mul.op, Some(misc_dp_3_source::MADD));
    assert_eq!(mul.size, X);
}

#[test]
fn loads_and_stores() {
    // ldr x1, [x2, #8]
    assert_eq!(
        encode::load_store(load_store_reg::LDR, ScaleFactor::Times8, R1, R2, Address::Offset(8)),
        Ok(0xF940_0441)
    );
    // stur x0, [x1, #-8]
    assert_eq!(
        encode::load_store(load_store_reg::STR, ScaleFactor::Times8, R0, R1, Address::Offset(-8)),
        Ok(0xF81F_8020)
    );
    // str x0, [csp, #-8]!
    assert_eq!(
        encode::load_store(load_store_reg::STR, ScaleFactor::Times8, R0, CSP, Address::PreIndex(-8)),
        Ok(0xF81F_8FE0)
    );

    let lr = LINK_REGISTER.access(LinkRegisterUse::SpillToFrame);
    // stp fp, lr, [csp, #-16]!
    assert_eq!(
        encode::load_store_pair(load_store_reg_pair::STP, X, R29, lr, CSP, Address::PreIndex(-16)),
        Ok(0xA9BF_7BFD)
    );
    // ldp fp, lr, [csp], #16
    assert_eq!(
        encode::load_store_pair(load_store_reg_pair::LDP, X, R29, lr, CSP, Address::PostIndex(16)),
        Ok(0xA8C1_7BFD)
    );
}

#[test]
fn decode_loads_and_stores() {
    let ldr = decode(0xF940_0441);
    assert_eq!(ldr.op, Some(load_store_reg::LDR));
    assert_eq!((ldr.rd, ldr.rn, ldr.imm), (R1, R2, 8));

    let push = decode(0xF81F_8FE0);
    assert_eq!(push.op, Some(load_store_reg::STR));
    assert_eq!((push.rn, push.imm), (CSP, -8));

    let stp = decode(0xA9BF_7BFD);
    assert_eq!(stp.op, Some(load_store_reg_pair::STP));
    assert_eq!((stp.rn, stp.imm), (CSP, -16));

    assert_eq!(decode(0xA8C1_7BFD).imm, 16);
}

#[test]
fn branches() {
    assert_eq!(encode::unconditional_branch(unconditional_branch::B, 8), Ok(0x1400_0002));
    assert_eq!(encode::unconditional_branch(unconditional_branch::BL, 8), Ok(0x9400_0002));
    assert_eq!(encode::conditional_branch(Condition::NOT_EQUAL, 8), Ok(0x5400_0041));
    assert_eq!(encode::compare_and_branch(compare_and_branch::CBZ, X, R0, 8), Ok(0xB400_0040));
    assert_eq!(encode::test_and_branch(test_and_branch::TBNZ, R0, 3, 8), Ok(0x3718_0040));
    assert_eq!(encode::branch_register(unconditional_branch_reg::BR, R16), Ok(0xD61F_0200));
    assert_eq!(encode::branch_register(unconditional_branch_reg::BLR, R16), Ok(0xD63F_0200));
    assert_eq!(encode::ret(), 0xD65F_03C0);
    assert_eq!(encode::breakpoint(0), 0xD420_0000);
    assert_eq!(NOP_INSTRUCTION, 0xD503_201F);
    assert_eq!(BREAK_INSTRUCTION_FILLER, 0xD420_0000_D420_0000);
}

#[test]
fn decode_branches() {
    for word in [0x1400_0002, 0x9400_0002, 0x5400_0041, 0xB400_0040, 0x3718_0040] {
        assert_eq!(branch_offset(word), Some(8), "{word:#010x}");
    }
    assert_eq!(branch_offset(0xD65F_03C0), None);
    assert_eq!(decode(0xD65F_03C0).op, Some(unconditional_branch_reg::RET));
    assert_eq!(decode(0x3718_0040).op, Some(test_and_branch::TBNZ));
    // b .-4
    assert_eq!(branch_offset(0x17FF_FFFF), Some(-4));
}

#[test]
fn floating_point_and_simd() {
    assert_eq!(encode::fp_move_immediate(fp_imm::FMOVDI, V0, 1.0), Ok(0x1E6E_1000));
    assert_eq!(encode::fp_one_source(fp_one_source::FMOVDD, V0, V1), Ok(0x1E60_4020));
    assert_eq!(encode::fp_two_source(fp_two_source::FADDD, V0, V1, V2), Ok(0x1E62_2820));
    assert_eq!(encode::fp_compare_registers(V0, Some(V1)), 0x1E61_2000);
    assert_eq!(encode::fp_compare_registers(V0, None), 0x1E60_2008);
    assert_eq!(encode::fp_to_int(fp_int_cvt::FCVTZS_D, X, R0, V1), Ok(0x9E78_0020));
    assert_eq!(encode::int_to_fp(fp_int_cvt::SCVTFD, X, V0, R1), Ok(0x9E62_0020));
    assert_eq!(encode::fp_to_int(fp_int_cvt::FMOVRD, X, R0, V1), Ok(0x9E66_0020));
    assert_eq!(encode::int_to_fp(fp_int_cvt::FMOVDR, X, V0, R1), Ok(0x9E67_0020));
    assert_eq!(encode::simd_three_same(simd_three_same::VADDW, V0, V1, V2), Ok(0x4EA2_8420));

    let fmov = decode(0x1E6E_1000);
    assert_eq!(fmov.op, Some(fp_imm::FMOVDI));
    assert_eq!(f64::from_bits(fmov.imm as u64), 1.0);
    assert_eq!(decode(0x9E78_0020).op, Some(fp_int_cvt::FCVTZS_D));
    assert_eq!(decode(0x4EA2_8420).op, Some(simd_three_same::VADDW));
}

#[test]
fn operand_errors() {
    assert_eq!(
        encode::add_sub_immediate(add_sub_imm::ADDI, X, false, R0, R1, 0x1001),
        Err(EncodingError::FieldOverflow {
            field: "imm12",
            value: 0x1001,
            width: 12,
        })
    );
    assert_eq!(
        encode::add_sub_immediate(add_sub_imm::ADDI, X, true, CSP, R1, 1),
        Err(EncodingError::InvalidOperand {
            register: CSP,
            operand: "add/sub destination",
        })
    );
    assert_eq!(
        encode::load_store(load_store_reg::LDR, ScaleFactor::Times8, R0, ZR, Address::Offset(0)),
        Err(EncodingError::InvalidOperand {
            register: ZR,
            operand: "base register",
        })
    );
    assert_eq!(
        encode::branch_register(unconditional_branch_reg::BR, CSP),
        Err(EncodingError::InvalidOperand {
            register: CSP,
            operand: "branch target",
        })
    );
    assert_eq!(
        encode::unconditional_branch(unconditional_branch::B, 6),
        Err(EncodingError::MisalignedOffset { offset: 6, scale: 4 })
    );
    assert_eq!(
        encode::conditional_branch(Condition::EQUAL, 1 << 20),
        Err(EncodingError::FieldOverflow {
            field: "imm19",
            value: 1 << 18,
            width: 19,
        })
    );
    assert!(encode::pc_relative(pc_rel::ADRP, R0, 0x800).is_err());
    assert!(encode::move_wide(move_wide::MOVZ, W, R0, 1, 2).is_err());
    assert!(encode::logical_immediate(logical_imm::ANDI, X, R0, R1, 0x1234).is_err());
    assert!(matches!(
        encode::fp_move_immediate(fp_imm::FMOVDI, V0, 0.1),
        Err(EncodingError::UnencodableFpImmediate { .. })
    ));
}

/// A sub-operation from another family is rejected with both family names.
#[test]
fn wrong_family_is_an_error() {
    let err = encode::add_sub_immediate(logical_imm::ORRI, X, false, R0, R1, 1);
    assert_eq!(
        err,
        Err(EncodingError::WrongFamily {
            operation: "ORRI",
            family: "LogicalImm",
            expected: "AddSubImm",
        })
    );
    assert_eq!(
        err.unwrap_err().to_string(),
        "LogicalImm::ORRI is not a AddSubImm operation"
    );
    assert!(matches!(
        encode::fp_one_source(fp_two_source::FADDD, V0, V1),
        Err(EncodingError::WrongFamily { expected: "FpOneSource", .. })
    ));
    assert!(matches!(
        encode::simd_three_same(fp_one_source::FMOVDD, V0, V1, V2),
        Err(EncodingError::WrongFamily { .. })
    ));
}

/// Operand forms an operation lacks are errors, not panics.
#[test]
fn unsupported_forms() {
    let rotated = ShiftedRegister {
        rm: R2,
        shift: Shift::Ror,
        amount: 3,
    };
    assert_eq!(
        encode::add_sub_shifted(add_sub_shift_ext::ADD, X, false, R0, R1, rotated),
        Err(EncodingError::UnsupportedForm {
            operation: "ADD",
            reason: "cannot rotate its operand",
        })
    );
    // Logical operations do accept a rotated operand.
    assert!(encode::logical_shifted(logical_shift::ORR, X, R0, R1, rotated).is_ok());

    assert!(matches!(
        encode::load_store(load_store_reg::FLDR, ScaleFactor::Times8, R0, R1, Address::Offset(0)),
        Err(EncodingError::UnsupportedForm { operation: "FLDR", .. })
    ));
    assert!(matches!(
        encode::load_store(load_store_reg::LDR, ScaleFactor::Times16, R0, R1, Address::Offset(0)),
        Err(EncodingError::UnsupportedForm { operation: "LDR", .. })
    ));
    assert!(matches!(
        encode::load_store_fp(load_store_reg::FLDRQ, ScaleFactor::Times8, V0, R1, Address::Offset(0)),
        Err(EncodingError::UnsupportedForm { operation: "FLDRQ", .. })
    ));
    assert!(matches!(
        encode::load_store_pair_fp(load_store_reg_pair::LDP, V0, V1, CSP, Address::Offset(0)),
        Err(EncodingError::UnsupportedForm { operation: "LDP", .. })
    ));
    assert!(matches!(
        encode::fp_to_int(fp_int_cvt::SCVTFD, X, R0, V1),
        Err(EncodingError::UnsupportedForm { operation: "SCVTFD", .. })
    ));
    assert!(matches!(
        encode::int_to_fp(fp_int_cvt::FCVTZS_D, X, V0, R1),
        Err(EncodingError::UnsupportedForm { operation: "FCVTZS_D", .. })
    ));
}

/// An out-of-range half-word selector reports the usable width of `hw`.
#[test]
fn move_wide_half_word_range() {
    assert_eq!(encode::move_wide(move_wide::MOVK, X, R0, 0xFFFF, 3), Ok(0xF2FF_FFE0));
    assert_eq!(
        encode::move_wide(move_wide::MOVZ, X, R0, 1, 4),
        Err(EncodingError::FieldOverflow {
            field: "hw",
            value: 4,
            width: 2,
        })
    );
    assert_eq!(
        encode::move_wide(move_wide::MOVZ, W, R0, 1, 2),
        Err(EncodingError::FieldOverflow {
            field: "hw",
            value: 2,
            width: 1,
        })
    );
}

/// Undeclared words decode without a family.
#[test]
fn decode_unknown_word() {
    let d = decode(0);
    assert_eq!(d.family, None);
    assert_eq!(d.op, None);
    assert_eq!(d.imm, 0);
}
