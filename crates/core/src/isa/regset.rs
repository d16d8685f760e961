//! Register sets and the global register partitions.
//!
//! A set is a 32-bit mask indexed by hardware encoding, so `Csp` and `Zr` both
//! occupy bit 31 alongside `R31`. Every operation is `const`, which lets the
//! partitions below and the ABI contracts be checked by the compiler.

use std::fmt;
use std::ops::{BitAnd, BitOr, Sub};

use crate::isa::registers::{
    DISPATCH_TABLE_REG, FPREG, HEAP_BITS, LINK_REGISTER, LinkRegisterUse, NULL_REG, PP, Register,
    SPREG, THR, TMP, TMP2, VRegister,
};

macro_rules! register_set {
    ($(#[$meta:meta])* $name:ident, $reg:ty) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(u32);

        impl $name {
            /// The empty set.
            pub const EMPTY: Self = Self(0);

            /// Builds a set from a raw encoding mask.
            #[inline]
            pub const fn from_bits(bits: u32) -> Self {
                Self(bits)
            }

            /// Raw encoding mask.
            #[inline]
            pub const fn bits(self) -> u32 {
                self.0
            }

            /// Builds a set from a list of registers.
            pub const fn of(regs: &[$reg]) -> Self {
                let mut bits = 0;
                let mut i = 0;
                while i < regs.len() {
                    bits |= 1 << regs[i].encoding();
                    i += 1;
                }
                Self(bits)
            }

            /// Returns the set with `reg` added.
            #[inline]
            #[must_use]
            pub const fn with(self, reg: $reg) -> Self {
                Self(self.0 | (1 << reg.encoding()))
            }

            /// Returns the set with `reg` removed.
            #[inline]
            #[must_use]
            pub const fn without(self, reg: $reg) -> Self {
                Self(self.0 & !(1 << reg.encoding()))
            }

            /// Returns whether `reg` is in the set.
            #[inline]
            pub const fn contains(self, reg: $reg) -> bool {
                self.0 & (1 << reg.encoding()) != 0
            }

            /// Set union.
            #[inline]
            #[must_use]
            pub const fn union(self, other: Self) -> Self {
                Self(self.0 | other.0)
            }

            /// Set intersection.
            #[inline]
            #[must_use]
            pub const fn intersection(self, other: Self) -> Self {
                Self(self.0 & other.0)
            }

            /// Registers in `self` but not in `other`.
            #[inline]
            #[must_use]
            pub const fn difference(self, other: Self) -> Self {
                Self(self.0 & !other.0)
            }

            /// Returns whether the sets share no register.
            #[inline]
            pub const fn is_disjoint(self, other: Self) -> bool {
                self.0 & other.0 == 0
            }

            /// Returns whether every register of `self` is in `other`.
            #[inline]
            pub const fn is_subset(self, other: Self) -> bool {
                self.0 & !other.0 == 0
            }

            /// Returns whether the set is empty.
            #[inline]
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// Number of registers in the set.
            #[inline]
            pub const fn len(self) -> u32 {
                self.0.count_ones()
            }

            /// Lowest-encoded register in the set.
            pub const fn first(self) -> Option<$reg> {
                if self.0 == 0 {
                    None
                } else {
                    <$reg>::from_encoding(self.0.trailing_zeros() as u8)
                }
            }

            /// Highest-encoded register in the set.
            pub const fn last(self) -> Option<$reg> {
                if self.0 == 0 {
                    None
                } else {
                    <$reg>::from_encoding((31 - self.0.leading_zeros()) as u8)
                }
            }

            /// Iterates the members in encoding order.
            pub fn iter(self) -> impl Iterator<Item = $reg> {
                (0..32u8)
                    .filter(move |code| self.0 & (1 << code) != 0)
                    .filter_map(<$reg>::from_encoding)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_set().entries(self.iter()).finish()
            }
        }

        impl BitOr for $name {
            type Output = Self;
            fn bitor(self, rhs: Self) -> Self {
                self.union(rhs)
            }
        }

        impl BitAnd for $name {
            type Output = Self;
            fn bitand(self, rhs: Self) -> Self {
                self.intersection(rhs)
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                self.difference(rhs)
            }
        }

        impl FromIterator<$reg> for $name {
            fn from_iter<I: IntoIterator<Item = $reg>>(iter: I) -> Self {
                iter.into_iter().fold(Self::EMPTY, Self::with)
            }
        }
    };
}

register_set!(
    /// Set of general-purpose registers, indexed by hardware encoding.
    RegisterSet,
    Register
);

register_set!(
    /// Set of vector registers.
    VRegisterSet,
    VRegister
);

impl RegisterSet {
    /// Every encoding, 0..=31.
    pub const ALL: Self = Self(u32::MAX);

    /// Contiguous range `first..=last` by encoding.
    pub const fn range(first: Register, last: Register) -> Self {
        let lo = first.encoding() as u32;
        let hi = last.encoding() as u32;
        assert!(lo <= hi, "register range is reversed");
        let top = if hi == 31 { u32::MAX } else { (1 << (hi + 1)) - 1 };
        Self(top & !((1 << lo) - 1))
    }
}

impl VRegisterSet {
    /// Every vector register.
    pub const ALL: Self = Self(u32::MAX);

    /// Contiguous range `first..=last` by encoding.
    pub const fn range(first: VRegister, last: VRegister) -> Self {
        let lo = first.encoding() as u32;
        let hi = last.encoding() as u32;
        assert!(lo <= hi, "register range is reversed");
        let top = if hi == 31 { u32::MAX } else { (1 << (hi + 1)) - 1 };
        Self(top & !((1 << lo) - 1))
    }
}

// ── Global partitions ───────────────────────────────────────

/// Registers the allocator never hands out.
///
/// The machine stack pointer (encoding 31) is the C++ stack pointer; `R18` is
/// the platform register on every target we run on.
pub const RESERVED_CPU_REGISTERS: RegisterSet = RegisterSet::of(&[
    SPREG,
    FPREG,
    TMP,
    TMP2,
    PP,
    THR,
    LINK_REGISTER.access(LinkRegisterUse::Clobber),
    HEAP_BITS,
    NULL_REG,
    Register::R31,
    Register::R18,
    DISPATCH_TABLE_REG,
]);

/// Number of reserved registers.
pub const NUMBER_OF_RESERVED_CPU_REGISTERS: u32 = RESERVED_CPU_REGISTERS.len();

/// Registers available to the allocator.
pub const AVAILABLE_CPU_REGISTERS: RegisterSet = RegisterSet::ALL.difference(RESERVED_CPU_REGISTERS);

/// Number of allocatable registers.
pub const NUMBER_OF_AVAILABLE_CPU_REGISTERS: u32 = AVAILABLE_CPU_REGISTERS.len();

/// Native argument registers.
pub const ABI_ARGUMENT_CPU_REGISTERS: RegisterSet = RegisterSet::range(Register::R0, Register::R7);

/// Native caller-saved registers, including the link register.
pub const ABI_VOLATILE_CPU_REGISTERS: RegisterSet = RegisterSet::range(Register::R0, Register::R17)
    .with(LINK_REGISTER.access(LinkRegisterUse::Clobber));

/// Native callee-saved registers on every target except Fuchsia.
pub const ABI_PRESERVED_CPU_REGISTERS: RegisterSet = RegisterSet::range(Register::R19, Register::R28);

/// Native callee-saved registers on Fuchsia, which also saves the shadow call stack register.
pub const ABI_PRESERVED_CPU_REGISTERS_FUCHSIA: RegisterSet =
    RegisterSet::range(Register::R18, Register::R28);

/// Native caller-saved vector registers.
pub const ABI_VOLATILE_FPU_REGISTERS: VRegisterSet = VRegisterSet::range(VRegister::V0, VRegister::V7)
    .union(VRegisterSet::range(VRegister::V16, VRegister::V31));

/// Native callee-saved vector registers (low 64 bits).
pub const ABI_PRESERVED_FPU_REGISTERS: VRegisterSet =
    VRegisterSet::range(VRegister::V8, VRegister::V15);

/// Allocatable registers that native code does not preserve.
pub const DART_VOLATILE_CPU_REGISTERS: RegisterSet =
    AVAILABLE_CPU_REGISTERS.difference(ABI_PRESERVED_CPU_REGISTERS);

/// Allocatable registers that native code preserves.
pub const DART_PRESERVED_CPU_REGISTERS: RegisterSet =
    AVAILABLE_CPU_REGISTERS.intersection(ABI_PRESERVED_CPU_REGISTERS);

/// Number of allocatable caller-saved registers.
pub const DART_VOLATILE_CPU_REG_COUNT: u32 = DART_VOLATILE_CPU_REGISTERS.len();

/// Number of caller-saved vector registers.
pub const DART_VOLATILE_FPU_REG_COUNT: u32 = 24;

const _: () = assert!(NUMBER_OF_RESERVED_CPU_REGISTERS == 12);
const _: () = assert!(NUMBER_OF_AVAILABLE_CPU_REGISTERS == 20);
const _: () = assert!(AVAILABLE_CPU_REGISTERS.is_disjoint(RESERVED_CPU_REGISTERS));
const _: () = assert!(DART_PRESERVED_CPU_REGISTERS.is_subset(AVAILABLE_CPU_REGISTERS));
const _: () = assert!(DART_VOLATILE_CPU_REG_COUNT == 15);
const _: () = assert!(ABI_PRESERVED_CPU_REGISTERS.len() == 10);
const _: () = assert!(ABI_PRESERVED_CPU_REGISTERS_FUCHSIA.len() == 11);
const _: () = assert!(ABI_VOLATILE_FPU_REGISTERS.len() == DART_VOLATILE_FPU_REG_COUNT);
const _: () = assert!(ABI_VOLATILE_FPU_REGISTERS.is_disjoint(ABI_PRESERVED_FPU_REGISTERS));
const _: () = assert!(ABI_VOLATILE_CPU_REGISTERS.is_disjoint(ABI_PRESERVED_CPU_REGISTERS));
