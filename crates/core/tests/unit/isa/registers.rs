//! Register Identity and Partition Tests.
//!
//! Verifies the encoding-31 aliases, role aliases, display names and the
//! reserved / available / preserved register partitions.

use arm64_vm_core::isa::registers::*;
use arm64_vm_core::isa::regset::*;
use pretty_assertions::assert_eq;

/// Both aliases encode as 31 but stay distinct identifiers.
#[test]
fn aliases_share_encoding_31() {
    assert_eq!(Register::Csp.encoding(), 31);
    assert_eq!(Register::Zr.encoding(), 31);
    assert_eq!(Register::R31.encoding(), 31);
    assert_ne!(Register::Csp, Register::Zr);
    assert_ne!(Register::Csp.id(), Register::Zr.id());
    assert!(Register::Csp.is_alias());
    assert!(!Register::R31.is_alias());
}

/// Every plain register round-trips through its encoding.
#[test]
fn every_register_has_an_encoding() {
    for code in 0..32u8 {
        let reg = Register::from_encoding(code).unwrap();
        assert_eq!(reg.encoding(), code);
        assert_eq!(reg.id(), code);
        assert_eq!(Register::from_field(u32::from(code) | 0x40), reg);
    }
    assert_eq!(Register::from_encoding(32), None);
    for (code, reg) in VRegister::ALL.iter().enumerate() {
        assert_eq!(usize::from(reg.encoding()), code);
    }
}

/// Field 31 resolves to the alias its operand mode selects.
#[test]
fn decode_field_31() {
    assert_eq!(Register::decode(31, R31Type::StackPointer), Register::Csp);
    assert_eq!(Register::decode(31, R31Type::ZeroRegister), Register::Zr);
    assert_eq!(Register::decode(5, R31Type::StackPointer), Register::R5);
}

/// Role registers carry their role names.
#[test]
fn display_names() {
    assert_eq!(THR.to_string(), "thr");
    assert_eq!(PP.to_string(), "pp");
    assert_eq!(SPREG.to_string(), "sp");
    assert_eq!(Register::Csp.to_string(), "csp");
    assert_eq!(Register::Zr.abi_name(), "xzr");
    assert_eq!(Register::Csp.abi_name(), "sp");
    assert_eq!(TMP.abi_name(), "ip0");
    assert_eq!(VRegister::V7.to_string(), "v7");
}

/// The link register has no named identifier; the token hands it out for
/// every purpose and decoding field 30 yields the same register.
#[test]
fn link_register_token() {
    let decoded = Register::decode(30, R31Type::ZeroRegister);
    for purpose in [
        LinkRegisterUse::Clobber,
        LinkRegisterUse::SpillToRegister,
        LinkRegisterUse::RestoreFromRegister,
        LinkRegisterUse::SpillToFrame,
        LinkRegisterUse::RestoreFromFrame,
        LinkRegisterUse::ReadReturnAddress,
        LinkRegisterUse::WriteReturnAddress,
    ] {
        assert_eq!(LINK_REGISTER.access(purpose), decoded);
    }
    assert!(decoded == LINK_REGISTER);
    assert!(Register::R29 != LINK_REGISTER);
    assert!(Register::Zr != LINK_REGISTER);
    assert_eq!(LINK_REGISTER.encoding(), 30);
    assert_eq!(LINK_REGISTER.to_string(), "lr");
    assert_eq!(decoded.to_string(), "lr");
    assert_eq!(decoded.abi_name(), "lr");
}

/// Debug output names the encoding, or the alias.
#[test]
fn debug_names() {
    assert_eq!(format!("{:?}", Register::R7), "R7");
    assert_eq!(format!("{:?}", LINK_REGISTER.access(LinkRegisterUse::Clobber)), "R30");
    assert_eq!(format!("{:?}", Register::Csp), "Csp");
    assert_eq!(format!("{:?}", Register::Zr), "Zr");
}

/// Reserved and available registers partition the encodings.
#[test]
fn reserved_and_available_partition() {
    assert!(RESERVED_CPU_REGISTERS.is_disjoint(AVAILABLE_CPU_REGISTERS));
    assert_eq!(
        RESERVED_CPU_REGISTERS | AVAILABLE_CPU_REGISTERS,
        RegisterSet::ALL
    );
    assert_eq!(NUMBER_OF_RESERVED_CPU_REGISTERS, 12);
    assert_eq!(NUMBER_OF_AVAILABLE_CPU_REGISTERS, 20);
    for reg in [THR, PP, NULL_REG, HEAP_BITS, DISPATCH_TABLE_REG, TMP, TMP2, SPREG, FPREG] {
        assert!(RESERVED_CPU_REGISTERS.contains(reg), "{reg} must be reserved");
    }
    assert!(AVAILABLE_CPU_REGISTERS.contains(CODE_REG));
}

/// The allocator's preserved set is drawn from the available registers.
#[test]
fn preserved_within_available() {
    assert!(DART_PRESERVED_CPU_REGISTERS.is_subset(AVAILABLE_CPU_REGISTERS));
    assert!(DART_PRESERVED_CPU_REGISTERS.is_disjoint(RESERVED_CPU_REGISTERS));
    assert_eq!(
        DART_PRESERVED_CPU_REGISTERS,
        RegisterSet::of(&[
            Register::R19,
            Register::R20,
            Register::R23,
            Register::R24,
            Register::R25,
        ])
    );
    assert_eq!(
        DART_VOLATILE_CPU_REGISTERS,
        RegisterSet::range(Register::R0, Register::R14)
    );
}

/// Native volatile and preserved sets do not overlap.
#[test]
fn native_partitions() {
    assert!(ABI_VOLATILE_CPU_REGISTERS.is_disjoint(ABI_PRESERVED_CPU_REGISTERS));
    assert!(ABI_VOLATILE_CPU_REGISTERS.contains(LINK_REGISTER.access(LinkRegisterUse::Clobber)));
    assert_eq!(ABI_PRESERVED_FPU_REGISTERS.len(), 8);
    assert_eq!(
        ABI_VOLATILE_FPU_REGISTERS | ABI_PRESERVED_FPU_REGISTERS,
        VRegisterSet::ALL
    );
}

/// Set algebra and iteration order.
#[test]
fn register_set_operations() {
    let set: RegisterSet = [Register::R3, Register::R1, Register::R2].into_iter().collect();
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![Register::R1, Register::R2, Register::R3]);
    assert_eq!(set.first(), Some(Register::R1));
    assert_eq!(set.last(), Some(Register::R3));
    assert_eq!((set - RegisterSet::of(&[Register::R2])).len(), 2);
    assert_eq!(set & RegisterSet::of(&[Register::R2, Register::R9]), RegisterSet::of(&[Register::R2]));
    assert_eq!(RegisterSet::EMPTY.first(), None);
    assert_eq!(format!("{:?}", RegisterSet::of(&[Register::R0, THR])), "{R0, R26}");
}
