//! Sub-operations of each encoding family.
//!
//! A sub-operation is its family's fixed pattern OR-ed with a few extra opcode
//! bits. Each family module declares its sub-operations with
//! `sub_operations!`, which also derives the family's selector mask (the union
//! of every extra bit the family uses) and checks at build time that no extra
//! bit overlaps the family mask.

use std::fmt;

use crate::isa::families::Family;

macro_rules! sub_operations {
    ($family:ident { $( $(#[$doc:meta])* $op:ident = $extra:expr ),+ $(,)? }) => {
        /// Union of the extra bits of this family's sub-operations.
        pub const SELECT: u32 = 0 $(| ($extra))+;

        $(
            $(#[$doc])*
            pub const $op: $crate::isa::ops::SubOp = $crate::isa::ops::SubOp::new(
                $crate::isa::families::Family::$family,
                stringify!($op),
                $extra,
                SELECT,
            );
        )+

        /// Every sub-operation of the family, in declaration order.
        pub const ALL: &[$crate::isa::ops::SubOp] = &[$($op),+];
    };
}

/// Branches, exception generation and system sub-operations.
pub mod branch;
/// Immediate data processing sub-operations.
pub mod dp_immediate;
/// Register data processing sub-operations.
pub mod dp_register;
/// Scalar floating point sub-operations.
pub mod fp;
/// Load and store sub-operations.
pub mod load_store;
/// SIMD sub-operations.
pub mod simd;

/// One concrete operation inside an encoding family.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubOp {
    family: Family,
    name: &'static str,
    extra: u32,
    select: u32,
}

impl SubOp {
    /// Declares a sub-operation.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in a constant) if `extra` overlaps the family mask
    /// or is not covered by `select`.
    pub const fn new(family: Family, name: &'static str, extra: u32, select: u32) -> Self {
        assert!(extra & family.mask() == 0, "sub-operation bits overlap the family mask");
        assert!(extra & !select == 0, "sub-operation bits outside the family selector");
        Self {
            family,
            name,
            extra,
            select,
        }
    }

    /// Enclosing family.
    #[inline]
    pub const fn family(self) -> Family {
        self.family
    }

    /// Mnemonic-style name (`ADD`, `LDR`, `FCMPD`, ...).
    #[inline]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Extra opcode bits beyond the family's fixed pattern.
    #[inline]
    pub const fn extra(self) -> u32 {
        self.extra
    }

    /// Full opcode pattern: family fixed bits OR extra bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.family.fixed() | self.extra
    }

    /// Membership in the sub-operation's family (family mask only).
    ///
    /// This cannot tell sibling sub-operations apart; use [`SubOp::matches`]
    /// for that.
    #[inline]
    pub const fn in_family(self, word: u32) -> bool {
        (word & self.family.mask()) == (self.bits() & self.family.mask())
    }

    /// Exact identification: compares the family mask and every selector bit
    /// of the family.
    #[inline]
    pub const fn matches(self, word: u32) -> bool {
        let mask = self.family.mask() | self.select;
        (word & mask) == (self.bits() & mask)
    }
}

impl fmt::Debug for SubOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.family.name(), self.name)
    }
}

impl fmt::Display for SubOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Sub-operations declared for `family`; empty for groups and families with none.
pub const fn sub_operations(family: Family) -> &'static [SubOp] {
    match family {
        Family::CompareAndBranch => branch::compare_and_branch::ALL,
        Family::ConditionalBranch => branch::conditional_branch::ALL,
        Family::ExceptionGen => branch::exception_gen::ALL,
        Family::System => branch::system::ALL,
        Family::TestAndBranch => branch::test_and_branch::ALL,
        Family::UnconditionalBranch => branch::unconditional_branch::ALL,
        Family::UnconditionalBranchReg => branch::unconditional_branch_reg::ALL,
        Family::LoadRegLiteral => load_store::load_reg_literal::ALL,
        Family::LoadStoreExclusive => load_store::load_store_exclusive::ALL,
        Family::AtomicMemory => load_store::atomic_memory::ALL,
        Family::LoadStoreReg => load_store::load_store_reg::ALL,
        Family::LoadStoreRegPair => load_store::load_store_reg_pair::ALL,
        Family::AddSubImm => dp_immediate::add_sub_imm::ALL,
        Family::Bitfield => dp_immediate::bitfield::ALL,
        Family::LogicalImm => dp_immediate::logical_imm::ALL,
        Family::MoveWide => dp_immediate::move_wide::ALL,
        Family::PcRel => dp_immediate::pc_rel::ALL,
        Family::AddSubShiftExt => dp_register::add_sub_shift_ext::ALL,
        Family::AddSubWithCarry => dp_register::add_sub_with_carry::ALL,
        Family::ConditionalSelect => dp_register::conditional_select::ALL,
        Family::MiscDp1Source => dp_register::misc_dp_1_source::ALL,
        Family::MiscDp2Source => dp_register::misc_dp_2_source::ALL,
        Family::MiscDp3Source => dp_register::misc_dp_3_source::ALL,
        Family::LogicalShift => dp_register::logical_shift::ALL,
        Family::SimdCopy => simd::simd_copy::ALL,
        Family::SimdThreeSame => simd::simd_three_same::ALL,
        Family::SimdTwoReg => simd::simd_two_reg::ALL,
        Family::FpCompare => fp::fp_compare::ALL,
        Family::FpOneSource => fp::fp_one_source::ALL,
        Family::FpTwoSource => fp::fp_two_source::ALL,
        Family::FpImm => fp::fp_imm::ALL,
        Family::FpIntCvt => fp::fp_int_cvt::ALL,
        Family::DpImmediate
        | Family::CompareBranch
        | Family::LoadStore
        | Family::DpRegister
        | Family::DpSimd1
        | Family::DpSimd2
        | Family::Fp => &[],
    }
}

/// Identifies the sub-operation `word` encodes, if it is one of the declared ones.
pub fn identify(word: u32) -> Option<SubOp> {
    let family = Family::classify(word)?;
    sub_operations(family).iter().copied().find(|op| op.matches(word))
}
