//! Register Field 31 Resolution Tests.
//!
//! The same field value names the stack pointer or the zero register
//! depending on the family and flag bits of the word.

use arm64_vm_core::common::error::EncodingError;
use arm64_vm_core::isa::decode::decode;
use arm64_vm_core::isa::encode::{self, ShiftedRegister};
use arm64_vm_core::isa::immediate::RegisterSize;
use arm64_vm_core::isa::instruction::{destination_register_mode, first_operand_register_mode};
use arm64_vm_core::isa::ops::dp_immediate::{add_sub_imm, logical_imm};
use arm64_vm_core::isa::ops::dp_register::logical_shift;
use arm64_vm_core::isa::registers::{R31Type, Register};
use rstest::rstest;

use R31Type::{StackPointer, ZeroRegister};

/// Operand modes of representative words.
#[rstest]
#[case::add_immediate(0x9100_0420, StackPointer, StackPointer)]
#[case::cmp_immediate(0xF100_083F, ZeroRegister, StackPointer)]
#[case::orr_immediate(0xB240_1FE0, StackPointer, ZeroRegister)]
#[case::ands_immediate(0xF240_1FE0, ZeroRegister, ZeroRegister)]
#[case::add_extended(0x8B21_43E0, StackPointer, StackPointer)]
#[case::add_shifted(0x8B02_0C20, ZeroRegister, ZeroRegister)]
#[case::orr_shifted(0xAA01_03E0, ZeroRegister, ZeroRegister)]
#[case::orn_shifted(0xAA22_0020, ZeroRegister, ZeroRegister)]
#[case::bics_shifted(0xEA22_03FF, ZeroRegister, ZeroRegister)]
#[case::adds_extended(0xAB21_43E0, ZeroRegister, StackPointer)]
#[case::load(0xF940_0441, ZeroRegister, StackPointer)]
#[case::store_pair(0xA9BF_7BFD, ZeroRegister, StackPointer)]
#[case::csel(0x9A82_0020, ZeroRegister, ZeroRegister)]
fn modes(#[case] word: u32, #[case] rd: R31Type, #[case] rn: R31Type) {
    assert_eq!(destination_register_mode(word), rd, "rd of {word:#010x}");
    assert_eq!(first_operand_register_mode(word), rn, "rn of {word:#010x}");
}

/// Decoding resolves field 31 through the modes.
#[test]
fn decode_resolves_aliases() {
    // mov x0, sp
    let d = decode(0x9100_03E0);
    assert_eq!((d.rd, d.rn), (Register::R0, Register::Csp));
    // mov sp, x0
    let d = decode(0x9100_001F);
    assert_eq!((d.rd, d.rn), (Register::Csp, Register::R0));
    // mov x0, xzr
    let d = decode(0xAA1F_03E0);
    assert_eq!((d.rd, d.rn), (Register::R0, Register::Zr));
    // ldr xzr, [sp]
    let d = decode(0xF940_03FF);
    assert_eq!((d.rd, d.rn), (Register::Zr, Register::Csp));
}

/// The encoders refuse an alias in a slot that reads the other one.
#[test]
fn encoders_check_slots() {
    assert_eq!(
        encode::add_sub_immediate(add_sub_imm::ADDI, RegisterSize::X, false, Register::R0, Register::Zr, 0),
        Err(EncodingError::InvalidOperand {
            register: Register::Zr,
            operand: "add/sub base",
        })
    );
    assert_eq!(
        encode::logical_shifted(
            logical_shift::ORR,
            RegisterSize::X,
            Register::R0,
            Register::Csp,
            ShiftedRegister::plain(Register::R1),
        ),
        Err(EncodingError::InvalidOperand {
            register: Register::Csp,
            operand: "first operand",
        })
    );
    assert!(encode::logical_immediate(logical_imm::ANDIS, RegisterSize::X, Register::Csp, Register::R1, 0xFF).is_err());
    // The raw encoding register is accepted in either slot.
    assert_eq!(
        encode::add_sub_immediate(add_sub_imm::ADDI, RegisterSize::X, false, Register::R0, Register::R31, 0),
        Ok(0x9100_03E0)
    );
}
