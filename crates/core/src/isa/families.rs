//! Opcode family table.
//!
//! A family is a `(mask, fixed)` pair: a word belongs to the family when the
//! bits selected by `mask` equal the corresponding bits of `fixed`. Families
//! nest: each encoding family belongs to one top-level group (data processing
//! with immediates, compare and branch, load/store, ...), and the group's own
//! pattern is OR-ed into its members' fixed bits.
//!
//! The table is written once, in [`opcode_families!`], which generates the
//! [`Family`] enum together with its mask, fixed bits, group and name.

use crate::common::bits::{B10, B11, B12, B13, B14, B21, B22, B23, B24, B25, B26, B27, B28, B29, B30, B31};

macro_rules! opcode_families {
    ($(
        $(#[$doc:meta])*
        $variant:ident = $name:literal, mask: $mask:expr, fixed: $fixed:expr, group: $group:expr;
    )*) => {
        /// Opcode family (top-level group or encoding family).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Family {
            $( $(#[$doc])* $variant, )*
        }

        impl Family {
            /// Every family, groups first, in table order.
            pub const ALL: &'static [Family] = &[$(Family::$variant),*];

            /// Bits that decide membership.
            #[inline]
            pub const fn mask(self) -> u32 {
                match self {
                    $(Family::$variant => $mask,)*
                }
            }

            /// Expected values of the mask bits (may carry further opcode bits).
            #[inline]
            pub const fn fixed(self) -> u32 {
                match self {
                    $(Family::$variant => $fixed,)*
                }
            }

            /// Enclosing group, or `None` for a top-level group.
            #[inline]
            pub const fn group(self) -> Option<Family> {
                match self {
                    $(Family::$variant => $group,)*
                }
            }

            /// Diagnostic name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Family::$variant => $name,)*
                }
            }
        }
    };
}

const DP_IMMEDIATE_FIXED: u32 = B28;
const COMPARE_BRANCH_FIXED: u32 = B28 | B26;
const LOAD_STORE_FIXED: u32 = B27;
const DP_REGISTER_FIXED: u32 = B27 | B25;
const DP_SIMD1_FIXED: u32 = B27 | B26 | B25;
const DP_SIMD2_FIXED: u32 = B28 | DP_SIMD1_FIXED;
const FP_FIXED: u32 = B28 | B27 | B26 | B25;

opcode_families! {
    /// Data processing with immediate operands.
    DpImmediate = "DPImmediate", mask: 0x1C00_0000, fixed: DP_IMMEDIATE_FIXED, group: None;
    /// Branches, exception generation and system instructions.
    CompareBranch = "CompareBranch", mask: 0x1C00_0000, fixed: COMPARE_BRANCH_FIXED, group: None;
    /// Loads and stores.
    LoadStore = "LoadStore", mask: B27 | B25, fixed: LOAD_STORE_FIXED, group: None;
    /// Data processing with register operands.
    DpRegister = "DPRegister", mask: 0x0E00_0000, fixed: DP_REGISTER_FIXED, group: None;
    /// SIMD data processing, first half.
    DpSimd1 = "DPSimd1", mask: 0x1E00_0000, fixed: DP_SIMD1_FIXED, group: None;
    /// SIMD data processing, second half.
    DpSimd2 = "DPSimd2", mask: 0x1E00_0000, fixed: DP_SIMD2_FIXED, group: None;
    /// Scalar floating point.
    Fp = "FP", mask: 0x5E00_0000, fixed: FP_FIXED, group: Some(Family::DpSimd2);

    /// CBZ / CBNZ.
    CompareAndBranch = "CompareAndBranch", mask: 0x7E00_0000, fixed: COMPARE_BRANCH_FIXED | B29, group: Some(Family::CompareBranch);
    /// B.cond.
    ConditionalBranch = "ConditionalBranch", mask: 0xFE00_0000, fixed: COMPARE_BRANCH_FIXED | B30, group: Some(Family::CompareBranch);
    /// SVC / BRK / HLT.
    ExceptionGen = "ExceptionGen", mask: 0xFF00_0000, fixed: COMPARE_BRANCH_FIXED | B31 | B30, group: Some(Family::CompareBranch);
    /// Hints, barriers and system register access.
    System = "System", mask: 0xFFC0_0000, fixed: COMPARE_BRANCH_FIXED | B31 | B30 | B24, group: Some(Family::CompareBranch);
    /// TBZ / TBNZ.
    TestAndBranch = "TestAndBranch", mask: 0x7E00_0000, fixed: COMPARE_BRANCH_FIXED | B29 | B25, group: Some(Family::CompareBranch);
    /// B / BL.
    UnconditionalBranch = "UnconditionalBranch", mask: 0x7C00_0000, fixed: COMPARE_BRANCH_FIXED, group: Some(Family::CompareBranch);
    /// BR / BLR / RET.
    UnconditionalBranchReg = "UnconditionalBranchReg", mask: 0xFE00_0000, fixed: COMPARE_BRANCH_FIXED | B31 | B30 | B25, group: Some(Family::CompareBranch);

    /// PC-relative literal load.
    LoadRegLiteral = "LoadRegLiteral", mask: 0x3B00_0000, fixed: LOAD_STORE_FIXED | B28, group: Some(Family::LoadStore);
    /// Exclusive and acquire/release loads and stores.
    LoadStoreExclusive = "LoadStoreExclusive", mask: 0x3F00_0000, fixed: B27, group: Some(Family::LoadStore);
    /// Atomic memory operations.
    AtomicMemory = "AtomicMemory", mask: 0x3F20_0C00, fixed: B29 | B28 | B27 | B21, group: Some(Family::LoadStore);
    /// Single-register loads and stores.
    LoadStoreReg = "LoadStoreReg", mask: 0x3A00_0000, fixed: LOAD_STORE_FIXED | B29 | B28, group: Some(Family::LoadStore);
    /// Register-pair loads and stores.
    LoadStoreRegPair = "LoadStoreRegPair", mask: 0x3A00_0000, fixed: LOAD_STORE_FIXED | B29, group: Some(Family::LoadStore);

    /// Add/subtract with a 12-bit immediate.
    AddSubImm = "AddSubImm", mask: 0x1F00_0000, fixed: DP_IMMEDIATE_FIXED | B24, group: Some(Family::DpImmediate);
    /// Bitfield moves.
    Bitfield = "Bitfield", mask: 0x1F80_0000, fixed: 0x1300_0000, group: Some(Family::DpImmediate);
    /// Logical operations with a bitmask immediate.
    LogicalImm = "LogicalImm", mask: 0x1F80_0000, fixed: DP_IMMEDIATE_FIXED | B25, group: Some(Family::DpImmediate);
    /// MOVN / MOVZ / MOVK.
    MoveWide = "MoveWide", mask: 0x1F80_0000, fixed: DP_IMMEDIATE_FIXED | B25 | B23, group: Some(Family::DpImmediate);
    /// ADR / ADRP.
    PcRel = "PCRel", mask: 0x1F00_0000, fixed: DP_IMMEDIATE_FIXED, group: Some(Family::DpImmediate);

    /// Add/subtract with a shifted or extended register.
    AddSubShiftExt = "AddSubShiftExt", mask: 0x1F00_0000, fixed: DP_REGISTER_FIXED | B24, group: Some(Family::DpRegister);
    /// Add/subtract with carry.
    AddSubWithCarry = "AddSubWithCarry", mask: 0x1FE0_0000, fixed: DP_REGISTER_FIXED | B28, group: Some(Family::DpRegister);
    /// Conditional select.
    ConditionalSelect = "ConditionalSelect", mask: 0x1FE0_0000, fixed: DP_REGISTER_FIXED | B28 | B23, group: Some(Family::DpRegister);
    /// One-source data processing.
    MiscDp1Source = "MiscDP1Source", mask: 0x5FE0_0000, fixed: DP_REGISTER_FIXED | B30 | B28 | B23 | B22, group: Some(Family::DpRegister);
    /// Two-source data processing.
    MiscDp2Source = "MiscDP2Source", mask: 0x5FE0_0000, fixed: DP_REGISTER_FIXED | B28 | B23 | B22, group: Some(Family::DpRegister);
    /// Three-source data processing (multiply-add family).
    MiscDp3Source = "MiscDP3Source", mask: 0x1F00_0000, fixed: DP_REGISTER_FIXED | B28 | B24, group: Some(Family::DpRegister);
    /// Logical operations with a shifted register.
    LogicalShift = "LogicalShift", mask: 0x1F00_0000, fixed: DP_REGISTER_FIXED, group: Some(Family::DpRegister);

    /// SIMD element copy.
    SimdCopy = "SIMDCopy", mask: 0x9FE0_8400, fixed: DP_SIMD1_FIXED | B10, group: Some(Family::DpSimd1);
    /// SIMD three registers of the same type.
    SimdThreeSame = "SIMDThreeSame", mask: 0x9F20_0400, fixed: DP_SIMD1_FIXED | B21 | B10, group: Some(Family::DpSimd1);
    /// SIMD two-register miscellaneous.
    SimdTwoReg = "SIMDTwoReg", mask: 0x9F3E_0C00, fixed: DP_SIMD1_FIXED | B21 | B11, group: Some(Family::DpSimd1);

    /// Floating-point compare.
    FpCompare = "FPCompare", mask: 0xFFA0_FC07, fixed: FP_FIXED | B21 | B13, group: Some(Family::Fp);
    /// Floating-point one-source.
    FpOneSource = "FPOneSource", mask: 0x5F20_7C00, fixed: FP_FIXED | B21 | B14, group: Some(Family::Fp);
    /// Floating-point two-source.
    FpTwoSource = "FPTwoSource", mask: 0xFF20_0C00, fixed: FP_FIXED | B21 | B11, group: Some(Family::Fp);
    /// Floating-point move immediate.
    FpImm = "FPImm", mask: 0x5F20_1C00, fixed: FP_FIXED | B21 | B12, group: Some(Family::Fp);
    /// Floating-point / integer conversion.
    FpIntCvt = "FPIntCvt", mask: 0x5F00_FC00, fixed: FP_FIXED | B21, group: Some(Family::Fp);
}

impl Family {
    /// Returns whether `word` belongs to this family.
    ///
    /// Only the mask bits are compared: some fixed patterns carry opcode bits
    /// outside their mask (`FPIntCvt` fixes bit 21 without testing it).
    #[inline]
    pub const fn matches(self, word: u32) -> bool {
        (word & self.mask()) == (self.fixed() & self.mask())
    }

    /// Returns whether this is a top-level group.
    #[inline]
    pub const fn is_group(self) -> bool {
        self.group().is_none()
    }

    /// Returns whether any family names this one as its group.
    pub const fn has_members(self) -> bool {
        let mut i = 0;
        while i < Self::ALL.len() {
            if let Some(group) = Self::ALL[i].group() {
                if group as u8 == self as u8 {
                    return true;
                }
            }
            i += 1;
        }
        false
    }

    /// Iterates the families whose group is `self`.
    pub fn members(self) -> impl Iterator<Item = Family> {
        Self::ALL.iter().copied().filter(move |f| f.group() == Some(self))
    }

    /// Top-level group `word` belongs to, if any.
    pub fn classify_group(word: u32) -> Option<Family> {
        Self::ALL
            .iter()
            .copied()
            .filter(|f| f.is_group() && f.matches(word))
            .max_by_key(|f| f.mask().count_ones())
    }

    /// Most specific encoding family `word` belongs to.
    ///
    /// Family patterns are not pairwise exclusive (`AtomicMemory` words also
    /// satisfy `LoadStoreReg`), so among the matching families the one whose
    /// mask tests the most bits wins.
    pub fn classify(word: u32) -> Option<Family> {
        Self::ALL
            .iter()
            .copied()
            .filter(|f| !f.is_group() && f.matches(word))
            .fold(None, |best: Option<Family>, f| match best {
                Some(b) if b.mask().count_ones() >= f.mask().count_ones() => Some(b),
                _ => Some(f),
            })
    }
}

const fn fixed_inside_group(family: Family) -> bool {
    match family.group() {
        Some(group) => group.matches(family.fixed()),
        None => true,
    }
}

const fn table_is_nested() -> bool {
    let mut i = 0;
    while i < Family::ALL.len() {
        if !fixed_inside_group(Family::ALL[i]) {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(table_is_nested(), "a family's fixed bits fall outside its group");
