//! Target operating system selection.
//!
//! Every OS-dependent ABI choice lives in one [`TargetAbi`] value, built once
//! from a [`TargetOs`] and passed to whatever needs it.

use serde::Deserialize;
use tracing::debug;

use crate::abi::calling_convention::{AlignmentStrategy, ExtensionStrategy};
use crate::isa::registers::Register;
use crate::isa::regset::{
    ABI_PRESERVED_CPU_REGISTERS, ABI_PRESERVED_CPU_REGISTERS_FUCHSIA, AVAILABLE_CPU_REGISTERS,
    RESERVED_CPU_REGISTERS, RegisterSet,
};

/// Operating system the generated code runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    /// Linux.
    #[default]
    Linux,
    /// Android.
    Android,
    /// Fuchsia, whose ABI also preserves `R18`.
    Fuchsia,
    /// macOS (Apple ARM64 ABI).
    #[serde(alias = "macOS", alias = "mac_os")]
    MacOs,
    /// iOS (Apple ARM64 ABI).
    #[serde(alias = "iOS")]
    Ios,
    /// Windows.
    Windows,
}

impl TargetOs {
    /// Every supported OS.
    pub const ALL: [TargetOs; 6] = [
        TargetOs::Linux,
        TargetOs::Android,
        TargetOs::Fuchsia,
        TargetOs::MacOs,
        TargetOs::Ios,
        TargetOs::Windows,
    ];

    /// Returns whether the OS follows Apple's ARM64 procedure call variant.
    pub const fn is_apple(self) -> bool {
        matches!(self, TargetOs::MacOs | TargetOs::Ios)
    }
}

/// OS-dependent ABI parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetAbi {
    /// Operating system.
    pub os: TargetOs,
    /// Callee-saved general-purpose registers of the native ABI.
    pub abi_preserved_cpu_registers: RegisterSet,
    /// Alignment of native stack arguments.
    pub argument_stack_alignment: AlignmentStrategy,
    /// Alignment of variadic native stack arguments.
    pub argument_stack_alignment_varargs: AlignmentStrategy,
    /// Extension of sub-word native arguments passed in registers.
    pub argument_register_extension: ExtensionStrategy,
    /// Extension of sub-word native return values.
    pub return_register_extension: ExtensionStrategy,
    /// Preferred alignment of loop headers, in bytes.
    pub preferred_loop_alignment: usize,
}

impl TargetAbi {
    /// Builds the ABI parameters of `os`.
    pub fn for_os(os: TargetOs) -> Self {
        let abi = Self::new(os);
        debug!(
            ?os,
            preserved = abi.abi_preserved_cpu_registers.len(),
            stack_alignment = ?abi.argument_stack_alignment,
            "selected target ABI"
        );
        abi
    }

    /// `const` form of [`TargetAbi::for_os`], without logging.
    pub const fn new(os: TargetOs) -> Self {
        let apple = os.is_apple();
        Self {
            os,
            abi_preserved_cpu_registers: if matches!(os, TargetOs::Fuchsia) {
                ABI_PRESERVED_CPU_REGISTERS_FUCHSIA
            } else {
                ABI_PRESERVED_CPU_REGISTERS
            },
            argument_stack_alignment: if apple {
                AlignmentStrategy::AlignedToValueSize
            } else {
                AlignmentStrategy::AlignedToWordSize
            },
            argument_stack_alignment_varargs: AlignmentStrategy::AlignedToWordSize,
            argument_register_extension: if apple {
                ExtensionStrategy::ExtendedTo4
            } else {
                ExtensionStrategy::NotExtended
            },
            return_register_extension: if apple {
                ExtensionStrategy::ExtendedTo4
            } else {
                ExtensionStrategy::NotExtended
            },
            preferred_loop_alignment: if apple { 1 } else { 32 },
        }
    }

    /// Registers the allocator never uses.
    pub const fn reserved_cpu_registers(&self) -> RegisterSet {
        RESERVED_CPU_REGISTERS
    }

    /// Returns whether `reg` is reserved.
    pub const fn is_reserved(&self, reg: Register) -> bool {
        RESERVED_CPU_REGISTERS.contains(reg)
    }

    /// First callee-saved register.
    pub const fn abi_first_preserved_cpu_register(&self) -> Option<Register> {
        self.abi_preserved_cpu_registers.first()
    }

    /// Last callee-saved register.
    pub const fn abi_last_preserved_cpu_register(&self) -> Option<Register> {
        self.abi_preserved_cpu_registers.last()
    }

    /// Number of callee-saved registers.
    pub const fn abi_preserved_cpu_reg_count(&self) -> u32 {
        self.abi_preserved_cpu_registers.len()
    }

    /// Allocatable registers the native ABI preserves across calls.
    pub const fn dart_preserved_cpu_registers(&self) -> RegisterSet {
        AVAILABLE_CPU_REGISTERS.intersection(self.abi_preserved_cpu_registers)
    }

    /// Allocatable registers clobbered by native calls.
    pub const fn dart_volatile_cpu_registers(&self) -> RegisterSet {
        AVAILABLE_CPU_REGISTERS.difference(self.abi_preserved_cpu_registers)
    }
}

impl Default for TargetAbi {
    fn default() -> Self {
        Self::new(TargetOs::default())
    }
}

const _: () = assert!(TargetAbi::new(TargetOs::Fuchsia).abi_preserved_cpu_reg_count() == 11);
const _: () = assert!(TargetAbi::new(TargetOs::Linux).abi_preserved_cpu_reg_count() == 10);
const _: () = assert!(
    TargetAbi::new(TargetOs::Fuchsia)
        .dart_volatile_cpu_registers()
        .len()
        == TargetAbi::new(TargetOs::Linux).dart_volatile_cpu_registers().len()
);
