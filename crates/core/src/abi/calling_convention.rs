//! Native and VM-private calling conventions.
//!
//! The native convention is the platform's AAPCS64 variant, parameterised by
//! [`TargetAbi`]: Apple targets pack stack arguments by value size and extend
//! sub-word register arguments to four bytes, everything else uses word-sized
//! slots and leaves the upper bits undefined.
//!
//! The VM-private convention only lists the registers compiled Dart code uses
//! to pass unboxed arguments.

use crate::abi::target::TargetAbi;
use crate::isa::registers::{ARGS_DESC_REG, FUNCTION_REG, Register, SPREG, VRegister};
use crate::isa::regset::{
    ABI_ARGUMENT_CPU_REGISTERS, ABI_PRESERVED_FPU_REGISTERS, RESERVED_CPU_REGISTERS, RegisterSet,
    VRegisterSet,
};

/// Machine word size in bytes.
pub const WORD_SIZE: usize = 8;

/// How a value is aligned in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentStrategy {
    /// Aligned to its own size; slots are packed.
    AlignedToValueSize,
    /// Every value starts a fresh word-sized slot.
    AlignedToWordSize,
}

impl AlignmentStrategy {
    /// Offset at which a `size`-byte value following `offset` is placed.
    pub const fn align(self, offset: usize, size: usize, word: usize) -> usize {
        let alignment = match self {
            Self::AlignedToValueSize => {
                if size == 0 {
                    1
                } else if size > word {
                    word
                } else {
                    size.next_power_of_two()
                }
            }
            Self::AlignedToWordSize => word,
        };
        offset.next_multiple_of(alignment)
    }

    /// Bytes a `size`-byte value occupies.
    pub const fn slot_size(self, size: usize, word: usize) -> usize {
        match self {
            Self::AlignedToValueSize => size,
            Self::AlignedToWordSize => size.next_multiple_of(word),
        }
    }
}

/// Whether sub-word values are widened by the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionStrategy {
    /// Upper bits are undefined.
    NotExtended,
    /// Values narrower than 4 bytes are sign- or zero-extended to 4 bytes.
    ExtendedTo4,
}

impl ExtensionStrategy {
    /// Number of defined bytes of a `size`-byte value after extension.
    pub const fn extended_size(self, size: usize) -> usize {
        match self {
            Self::ExtendedTo4 if size < 4 => 4,
            _ => size,
        }
    }
}

/// Primitive native type of an FFI argument or result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    /// Signed 8-bit.
    Int8,
    /// Unsigned 8-bit.
    Uint8,
    /// Signed 16-bit.
    Int16,
    /// Unsigned 16-bit.
    Uint16,
    /// Signed 32-bit.
    Int32,
    /// Unsigned 32-bit.
    Uint32,
    /// Signed 64-bit.
    Int64,
    /// Unsigned 64-bit.
    Uint64,
    /// Single-precision float.
    Float,
    /// Double-precision float.
    Double,
    /// Untyped pointer.
    Pointer,
}

impl NativeType {
    /// Size in bytes.
    pub const fn size(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float => 4,
            Self::Int64 | Self::Uint64 | Self::Double | Self::Pointer => 8,
        }
    }

    /// Returns whether the value travels in vector registers.
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Returns whether extension of the value is a sign extension.
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }
}

/// Where a value lives at the call boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentPlace {
    /// A general-purpose register.
    Cpu(Register),
    /// A vector register.
    Fpu(VRegister),
    /// The outgoing argument area, at a byte offset from the stack pointer.
    Stack {
        /// Byte offset.
        offset: usize,
    },
}

/// Assigned location of one argument or result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentLocation {
    /// Native type.
    pub ty: NativeType,
    /// Register or stack slot.
    pub place: ArgumentPlace,
    /// Bytes the receiver may rely on (after any extension).
    pub size: usize,
}

/// Native (C) calling convention of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCallingConvention {
    target: TargetAbi,
}

impl NativeCallingConvention {
    /// Integer argument registers, in order.
    pub const CPU_ARGUMENT_REGISTERS: [Register; 8] = [
        Register::R0,
        Register::R1,
        Register::R2,
        Register::R3,
        Register::R4,
        Register::R5,
        Register::R6,
        Register::R7,
    ];
    /// FP argument registers, in order.
    pub const FPU_ARGUMENT_REGISTERS: [VRegister; 8] = [
        VRegister::V0,
        VRegister::V1,
        VRegister::V2,
        VRegister::V3,
        VRegister::V4,
        VRegister::V5,
        VRegister::V6,
        VRegister::V7,
    ];
    /// Integer argument registers as a set.
    pub const ARGUMENT_REGISTERS: RegisterSet = ABI_ARGUMENT_CPU_REGISTERS;
    /// FP argument registers as a set.
    pub const FPU_ARGUMENT_REGISTER_SET: VRegisterSet =
        VRegisterSet::of(&Self::FPU_ARGUMENT_REGISTERS);
    /// Number of integer argument registers.
    pub const NUM_ARG_REGS: usize = Self::CPU_ARGUMENT_REGISTERS.len();
    /// Number of FP argument registers.
    pub const NUM_FPU_ARG_REGS: usize = Self::FPU_ARGUMENT_REGISTERS.len();
    /// Integer and FP arguments consume their register files independently.
    pub const INT_REG_XOR_FPU_REG: bool = false;

    /// Holds the address of a returned struct at the call.
    pub const POINTER_TO_RETURN_STRUCT_REGISTER_CALL: Register = Register::R8;
    /// Holds the address of a returned struct on return.
    pub const POINTER_TO_RETURN_STRUCT_REGISTER_RETURN: Register = Register::R8;

    /// Integer result.
    pub const RETURN_REG: Register = Register::R0;
    /// Upper half of a two-register integer result.
    pub const SECOND_RETURN_REG: Register = Register::R1;
    /// FP result.
    pub const RETURN_FPU_REG: VRegister = VRegister::V0;

    /// Callee-saved register free to hold any FFI-trampoline value.
    pub const FFI_ANY_NON_ABI_REGISTER: Register = Register::R19;
    /// Scratch register that never carries an argument.
    pub const FIRST_NON_ARGUMENT_REGISTER: Register = Register::R9;
    /// Second scratch register that never carries an argument.
    pub const SECOND_NON_ARGUMENT_REGISTER: Register = Register::R10;
    /// Stack pointer used for outgoing arguments.
    pub const STACK_POINTER_REGISTER: Register = SPREG;

    /// Alignment of arguments in registers.
    pub const ARGUMENT_REGISTER_ALIGNMENT: AlignmentStrategy = AlignmentStrategy::AlignedToWordSize;
    /// Alignment of struct fields.
    pub const FIELD_ALIGNMENT: AlignmentStrategy = AlignmentStrategy::AlignedToValueSize;
    /// Stack arguments are never extended.
    pub const ARGUMENT_STACK_EXTENSION: ExtensionStrategy = ExtensionStrategy::NotExtended;

    /// Calling convention of `target`.
    pub const fn for_target(target: &TargetAbi) -> Self {
        Self { target: *target }
    }

    /// Target parameters this convention was built from.
    pub const fn target(&self) -> &TargetAbi {
        &self.target
    }

    /// Callee-saved general-purpose registers.
    pub const fn callee_save_cpu_registers(&self) -> RegisterSet {
        self.target.abi_preserved_cpu_registers
    }

    /// Callee-saved vector registers.
    pub const fn callee_save_fpu_registers(&self) -> VRegisterSet {
        ABI_PRESERVED_FPU_REGISTERS
    }

    /// Alignment of non-variadic stack arguments.
    pub const fn argument_stack_alignment(&self) -> AlignmentStrategy {
        self.target.argument_stack_alignment
    }

    /// Alignment of variadic stack arguments.
    pub const fn argument_stack_alignment_varargs(&self) -> AlignmentStrategy {
        self.target.argument_stack_alignment_varargs
    }

    /// Extension of sub-word register arguments.
    pub const fn argument_register_extension(&self) -> ExtensionStrategy {
        self.target.argument_register_extension
    }

    /// Extension of sub-word return values.
    pub const fn return_register_extension(&self) -> ExtensionStrategy {
        self.target.return_register_extension
    }

    /// Assigns each argument to a register or a stack slot.
    ///
    /// Integer and FP arguments draw from their own register files; once a
    /// file is exhausted, further arguments of that class go to the stack in
    /// order, aligned per the target.
    pub fn assign_arguments(&self, args: &[NativeType]) -> Vec<ArgumentLocation> {
        let mut next_cpu = 0;
        let mut next_fpu = 0;
        let mut stack_offset = 0;
        let stack_alignment = self.argument_stack_alignment();

        args.iter()
            .map(|&ty| {
                if ty.is_float() && next_fpu < Self::NUM_FPU_ARG_REGS {
                    let reg = Self::FPU_ARGUMENT_REGISTERS[next_fpu];
                    next_fpu += 1;
                    ArgumentLocation {
                        ty,
                        place: ArgumentPlace::Fpu(reg),
                        size: ty.size(),
                    }
                } else if !ty.is_float() && next_cpu < Self::NUM_ARG_REGS {
                    let reg = Self::CPU_ARGUMENT_REGISTERS[next_cpu];
                    next_cpu += 1;
                    ArgumentLocation {
                        ty,
                        place: ArgumentPlace::Cpu(reg),
                        size: self.argument_register_extension().extended_size(ty.size()),
                    }
                } else {
                    let offset = stack_alignment.align(stack_offset, ty.size(), WORD_SIZE);
                    stack_offset = offset + stack_alignment.slot_size(ty.size(), WORD_SIZE);
                    ArgumentLocation {
                        ty,
                        place: ArgumentPlace::Stack { offset },
                        size: Self::ARGUMENT_STACK_EXTENSION.extended_size(ty.size()),
                    }
                }
            })
            .collect()
    }

    /// Location of a returned value of type `ty`.
    pub const fn return_location(&self, ty: NativeType) -> ArgumentLocation {
        if ty.is_float() {
            ArgumentLocation {
                ty,
                place: ArgumentPlace::Fpu(Self::RETURN_FPU_REG),
                size: ty.size(),
            }
        } else {
            ArgumentLocation {
                ty,
                place: ArgumentPlace::Cpu(Self::RETURN_REG),
                size: self.return_register_extension().extended_size(ty.size()),
            }
        }
    }
}

const _: () = assert!(
    !NativeCallingConvention::ARGUMENT_REGISTERS
        .with(NativeCallingConvention::POINTER_TO_RETURN_STRUCT_REGISTER_CALL)
        .contains(NativeCallingConvention::FIRST_NON_ARGUMENT_REGISTER)
);
const _: () = assert!(
    !NativeCallingConvention::ARGUMENT_REGISTERS
        .with(NativeCallingConvention::POINTER_TO_RETURN_STRUCT_REGISTER_CALL)
        .contains(NativeCallingConvention::SECOND_NON_ARGUMENT_REGISTER)
);
const _: () = assert!(
    NativeCallingConvention::FIRST_NON_ARGUMENT_REGISTER.id()
        != NativeCallingConvention::SECOND_NON_ARGUMENT_REGISTER.id()
);

/// Registers compiled code uses to pass unboxed arguments between Dart functions.
#[derive(Debug, Clone, Copy)]
pub struct DartCallingConvention;

impl DartCallingConvention {
    /// Integer argument registers, in order.
    pub const CPU_REGISTERS_FOR_ARGS: [Register; 6] = [
        Register::R1,
        Register::R2,
        Register::R3,
        Register::R5,
        Register::R6,
        Register::R7,
    ];
    /// FP argument registers, in order.
    pub const FPU_REGISTERS_FOR_ARGS: [VRegister; 6] = [
        VRegister::V0,
        VRegister::V1,
        VRegister::V2,
        VRegister::V3,
        VRegister::V4,
        VRegister::V5,
    ];
    /// Integer argument registers as a set.
    pub const CPU_ARGUMENT_REGISTERS: RegisterSet = RegisterSet::of(&Self::CPU_REGISTERS_FOR_ARGS);
    /// FP argument registers as a set.
    pub const FPU_ARGUMENT_REGISTERS: VRegisterSet =
        VRegisterSet::of(&Self::FPU_REGISTERS_FOR_ARGS);
}

const _: () = assert!(
    DartCallingConvention::CPU_ARGUMENT_REGISTERS.is_disjoint(RESERVED_CPU_REGISTERS)
);
const _: () = assert!(!DartCallingConvention::CPU_ARGUMENT_REGISTERS.contains(FUNCTION_REG));
const _: () = assert!(!DartCallingConvention::CPU_ARGUMENT_REGISTERS.contains(ARGS_DESC_REG));
