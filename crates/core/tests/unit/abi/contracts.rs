//! Stub Contract Tests.
//!
//! Checks the role sets of the built-in contracts, the layered internal
//! registers and the declared register sharing.

use arm64_vm_core::abi::contract::layered_internal_registers_disjoint;
use arm64_vm_core::abi::stubs::*;
use arm64_vm_core::isa::registers::{CODE_REG, Register};
use arm64_vm_core::isa::regset::{DART_PRESERVED_CPU_REGISTERS, RESERVED_CPU_REGISTERS, RegisterSet};
use pretty_assertions::assert_eq;

const R0: Register = Register::R0;
const R1: Register = Register::R1;
const R2: Register = Register::R2;
const R3: Register = Register::R3;
const R4: Register = Register::R4;
const R5: Register = Register::R5;
const R6: Register = Register::R6;
const R7: Register = Register::R7;
const R8: Register = Register::R8;
const R9: Register = Register::R9;
const R10: Register = Register::R10;
const R11: Register = Register::R11;
const R12: Register = Register::R12;
const R13: Register = Register::R13;

/// Every built-in contract passes both forms of the rules.
#[test]
fn builtins_are_well_formed() {
    for contract in BUILTIN_CONTRACTS {
        let outer = contract.outer().and_then(builtin_contract);
        assert!(contract.is_well_formed(RESERVED_CPU_REGISTERS, outer), "{}", contract.name);
        assert_eq!(contract.validate(RESERVED_CPU_REGISTERS, outer), Ok(()), "{}", contract.name);
        assert!(contract.used().is_disjoint(RESERVED_CPU_REGISTERS), "{}", contract.name);
    }
}

#[test]
fn type_test_partition() {
    assert_eq!(TypeTestAbi::PRESERVED_ABI_REGISTERS, RegisterSet::of(&[R0, R1, R2, R8]));
    assert_eq!(
        TypeTestAbi::NON_PRESERVED_ABI_REGISTERS,
        RegisterSet::of(&[R3, R4, R5, R6, R7, R9, R10, R11, R12, R13, CODE_REG])
    );
    assert!(TypeTestAbi::PRESERVED_ABI_REGISTERS.is_disjoint(TypeTestAbi::NON_PRESERVED_ABI_REGISTERS));
    assert!(TypeTestAbi::ABI_REGISTERS.contains(TypeTestAbi::SUBTYPE_TEST_CACHE_RESULT_REG));
    assert_eq!(TypeTestAbi::INSTANCE_OF_RESULT_REG, TypeTestAbi::INSTANCE_REG);
    assert_eq!(TypeTestAbi::CONTRACT.register("dst_type"), Some(R8));
}

/// Internal scratch registers never overwrite what the outer stub keeps.
#[test]
fn layered_internal_registers() {
    assert!(layered_internal_registers_disjoint(&TtsInternalRegs::CONTRACT, &TypeTestAbi::CONTRACT));
    assert!(layered_internal_registers_disjoint(&StcInternalRegs::CONTRACT, &TypeTestAbi::CONTRACT));
    assert!(layered_internal_registers_disjoint(
        &InstantiateTavInternalRegs::CONTRACT,
        &InstantiationAbi::CONTRACT
    ));
    assert_eq!(TtsInternalRegs::INTERNAL_REGISTERS, RegisterSet::of(&[R5, R6, R7, R9]));
    assert_eq!(TtsInternalRegs::CONTRACT.outer(), Some("TypeTestAbi"));
    assert_eq!(InstantiationAbi::CONTRACT.outer(), None);
}

/// Shared registers are declared, in either order.
#[test]
fn declared_aliases() {
    let resume = ResumeStubAbi::CONTRACT;
    for (a, b) in [("frame_size", "resume_pc"), ("src_frame", "exception"), ("dst_frame", "stack_trace")] {
        assert_eq!(resume.register(a), resume.register(b));
        assert!(resume.is_declared_alias(a, b));
        assert!(resume.is_declared_alias(b, a));
    }
    assert!(!resume.is_declared_alias("temp", "suspend_state"));
    assert_eq!(SuspendStubAbi::TYPE_ARGS_REG, SuspendStubAbi::TEMP_REG);
    assert_eq!(
        DoubleToIntegerStubAbi::RECOGNIZED_KIND_REG,
        DoubleToIntegerStubAbi::RESULT_REG
    );
}

/// Stubs that must keep their operands alive.
#[test]
fn preserving_stubs() {
    assert_eq!(
        WriteBarrierAbi::CONTRACT.preserved(),
        RegisterSet::of(&[WriteBarrierAbi::OBJECT_REG, WriteBarrierAbi::VALUE_REG, WriteBarrierAbi::SLOT_REG])
    );
    assert!(WriteBarrierAbi::CONTRACT.clobbered().is_empty());
    assert_eq!(AssertSubtypeAbi::ABI_REGISTERS, AssertSubtypeAbi::CONTRACT.preserved());
    assert_eq!(
        InstantiationAbi::CONTRACT.preserved(),
        RegisterSet::of(&[R1, R2, R3])
    );
    assert!(DART_PRESERVED_CPU_REGISTERS.contains(WriteBarrierAbi::SLOT_REG));
}

#[test]
fn lookup_by_name() {
    assert_eq!(builtin_contract("CatchEntryAbi").map(|c| c.roles.len()), Some(2));
    assert_eq!(BoxDoubleStubAbi::CONTRACT.register("value"), None);
    assert!(BoxDoubleStubAbi::CONTRACT.fpu_clobbered().contains(BoxDoubleStubAbi::VALUE_REG));
    assert_eq!(SuspendStubAbi::RESUME_PC_DISTANCE, 0);
}
