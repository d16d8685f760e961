//! Calling Convention Tests.
//!
//! Compares argument assignment on a word-slot target (Linux) against the
//! packed, extending Apple variant.

use arm64_vm_core::abi::calling_convention::{
    AlignmentStrategy, ArgumentLocation, ArgumentPlace, DartCallingConvention, ExtensionStrategy,
    NativeCallingConvention, NativeType,
};
use arm64_vm_core::abi::{TargetAbi, TargetOs};
use arm64_vm_core::isa::registers::{ARGS_DESC_REG, FUNCTION_REG, Register, VRegister};
use arm64_vm_core::isa::regset::RESERVED_CPU_REGISTERS;
use pretty_assertions::assert_eq;
use rstest::rstest;

use NativeType::{Double, Float, Int8, Int16, Int32, Int64, Pointer, Uint8};

fn convention(os: TargetOs) -> NativeCallingConvention {
    NativeCallingConvention::for_target(&TargetAbi::new(os))
}

/// Eight integer registers, then the rest on the stack.
fn overflowing_args() -> Vec<NativeType> {
    let mut args = vec![Int32; NativeCallingConvention::NUM_ARG_REGS];
    args.extend([Int8, Int16, Int64]);
    args
}

fn stack_offsets(locations: &[ArgumentLocation]) -> Vec<usize> {
    locations
        .iter()
        .filter_map(|loc| match loc.place {
            ArgumentPlace::Stack { offset } => Some(offset),
            _ => None,
        })
        .collect()
}

/// Word-slot targets give every stack argument its own 8 bytes; Apple
/// packs them by size.
#[rstest]
#[case(TargetOs::Linux, vec![0, 8, 16])]
#[case(TargetOs::Android, vec![0, 8, 16])]
#[case(TargetOs::Windows, vec![0, 8, 16])]
#[case(TargetOs::MacOs, vec![0, 2, 8])]
#[case(TargetOs::Ios, vec![0, 2, 8])]
fn stack_packing(#[case] os: TargetOs, #[case] expected: Vec<usize>) {
    let locations = convention(os).assign_arguments(&overflowing_args());
    assert_eq!(stack_offsets(&locations), expected);
    for (loc, reg) in locations.iter().zip(NativeCallingConvention::CPU_ARGUMENT_REGISTERS) {
        assert_eq!(loc.place, ArgumentPlace::Cpu(reg));
    }
}

#[test]
fn sub_word_extension() {
    let linux = convention(TargetOs::Linux).assign_arguments(&[Int8, Uint8, Int64]);
    assert_eq!(linux.iter().map(|l| l.size).collect::<Vec<_>>(), vec![1, 1, 8]);

    let apple = convention(TargetOs::MacOs).assign_arguments(&[Int8, Uint8, Int64]);
    assert_eq!(apple.iter().map(|l| l.size).collect::<Vec<_>>(), vec![4, 4, 8]);

    // Stack arguments are never extended.
    let stacked = convention(TargetOs::MacOs).assign_arguments(&overflowing_args());
    assert_eq!(stacked[8].size, 1);
}

/// Integer and FP arguments consume separate register files.
#[test]
fn independent_register_files() {
    assert!(!NativeCallingConvention::INT_REG_XOR_FPU_REG);
    let locations = convention(TargetOs::Linux).assign_arguments(&[Double, Pointer, Float, Int32]);
    let places: Vec<_> = locations.iter().map(|l| l.place).collect();
    assert_eq!(
        places,
        vec![
            ArgumentPlace::Fpu(VRegister::V0),
            ArgumentPlace::Cpu(Register::R0),
            ArgumentPlace::Fpu(VRegister::V1),
            ArgumentPlace::Cpu(Register::R1),
        ]
    );

    let doubles = convention(TargetOs::Linux).assign_arguments(&[Double; 9]);
    assert_eq!(doubles[7].place, ArgumentPlace::Fpu(VRegister::V7));
    assert_eq!(doubles[8].place, ArgumentPlace::Stack { offset: 0 });
}

#[test]
fn return_locations() {
    let linux = convention(TargetOs::Linux);
    let apple = convention(TargetOs::Ios);
    assert_eq!(linux.return_location(Int16).size, 2);
    assert_eq!(apple.return_location(Int16).size, 4);
    assert_eq!(apple.return_location(Int16).place, ArgumentPlace::Cpu(NativeCallingConvention::RETURN_REG));
    assert_eq!(linux.return_location(Double).place, ArgumentPlace::Fpu(NativeCallingConvention::RETURN_FPU_REG));
}

#[test]
fn target_parameters() {
    let fuchsia = convention(TargetOs::Fuchsia);
    assert!(fuchsia.callee_save_cpu_registers().contains(Register::R18));
    assert!(!convention(TargetOs::Linux).callee_save_cpu_registers().contains(Register::R18));
    assert_eq!(fuchsia.callee_save_fpu_registers().len(), 8);
    assert_eq!(convention(TargetOs::MacOs).argument_stack_alignment(), AlignmentStrategy::AlignedToValueSize);
    assert_eq!(
        convention(TargetOs::MacOs).argument_stack_alignment_varargs(),
        AlignmentStrategy::AlignedToWordSize
    );
    assert_eq!(convention(TargetOs::Linux).argument_register_extension(), ExtensionStrategy::NotExtended);
    assert_eq!(convention(TargetOs::Ios).return_register_extension(), ExtensionStrategy::ExtendedTo4);
    assert_eq!(fuchsia.target().os, TargetOs::Fuchsia);
}

#[test]
fn scratch_registers_carry_no_arguments() {
    let args = NativeCallingConvention::ARGUMENT_REGISTERS;
    assert_eq!(args.len(), 8);
    assert!(!args.contains(NativeCallingConvention::FIRST_NON_ARGUMENT_REGISTER));
    assert!(!args.contains(NativeCallingConvention::SECOND_NON_ARGUMENT_REGISTER));
    assert!(!args.contains(NativeCallingConvention::POINTER_TO_RETURN_STRUCT_REGISTER_CALL));
    assert!(RESERVED_CPU_REGISTERS.contains(NativeCallingConvention::STACK_POINTER_REGISTER));
}

#[test]
fn dart_argument_registers() {
    let cpu = DartCallingConvention::CPU_ARGUMENT_REGISTERS;
    assert_eq!(cpu.len(), 6);
    assert!(cpu.is_disjoint(RESERVED_CPU_REGISTERS));
    assert!(!cpu.contains(FUNCTION_REG));
    assert!(!cpu.contains(ARGS_DESC_REG));
    assert_eq!(DartCallingConvention::FPU_ARGUMENT_REGISTERS.len(), 6);
}
