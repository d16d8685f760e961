//! Condition codes, shift and extend kinds, and addressing scale factors.

use std::fmt;

/// Branch and select condition (the 4-bit `cond` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Condition {
    /// Equal.
    Eq = 0,
    /// Not equal.
    Ne = 1,
    /// Carry set (unsigned higher or same).
    Cs = 2,
    /// Carry clear (unsigned lower).
    Cc = 3,
    /// Minus / negative.
    Mi = 4,
    /// Plus / positive or zero.
    Pl = 5,
    /// Overflow.
    Vs = 6,
    /// No overflow.
    Vc = 7,
    /// Unsigned higher.
    Hi = 8,
    /// Unsigned lower or same.
    Ls = 9,
    /// Signed greater than or equal.
    Ge = 10,
    /// Signed less than.
    Lt = 11,
    /// Signed greater than.
    Gt = 12,
    /// Signed less than or equal.
    Le = 13,
    /// Always.
    Al = 14,
    /// Always (behaves as `Al`).
    Nv = 15,
}

impl Condition {
    /// Equal.
    pub const EQUAL: Self = Self::Eq;
    /// Not equal.
    pub const NOT_EQUAL: Self = Self::Ne;
    /// Signed less than.
    pub const LESS: Self = Self::Lt;
    /// Signed less than or equal.
    pub const LESS_EQUAL: Self = Self::Le;
    /// Signed greater than or equal.
    pub const GREATER_EQUAL: Self = Self::Ge;
    /// Signed greater than.
    pub const GREATER: Self = Self::Gt;
    /// Unsigned lower.
    pub const UNSIGNED_LESS: Self = Self::Cc;
    /// Unsigned lower or same.
    pub const UNSIGNED_LESS_EQUAL: Self = Self::Ls;
    /// Unsigned higher.
    pub const UNSIGNED_GREATER: Self = Self::Hi;
    /// Unsigned higher or same.
    pub const UNSIGNED_GREATER_EQUAL: Self = Self::Cs;
    /// Overflow.
    pub const OVERFLOW: Self = Self::Vs;
    /// No overflow.
    pub const NO_OVERFLOW: Self = Self::Vc;
    /// Result is zero.
    pub const ZERO: Self = Self::Eq;
    /// Result is not zero.
    pub const NOT_ZERO: Self = Self::Ne;
    /// Result is negative.
    pub const NEGATIVE: Self = Self::Mi;
    /// Result is positive or zero.
    pub const POSITIVE: Self = Self::Pl;

    const ALL: [Condition; 16] = [
        Self::Eq,
        Self::Ne,
        Self::Cs,
        Self::Cc,
        Self::Mi,
        Self::Pl,
        Self::Vs,
        Self::Vc,
        Self::Hi,
        Self::Ls,
        Self::Ge,
        Self::Lt,
        Self::Gt,
        Self::Le,
        Self::Al,
        Self::Nv,
    ];

    /// Condition from the low four bits of `bits`.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self::ALL[(bits & 0xF) as usize]
    }

    /// Field value.
    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Logical negation, obtained by flipping the low bit.
    ///
    /// # Panics
    ///
    /// Panics on `Al`, whose flip (`Nv`) also means "always".
    #[inline]
    pub const fn invert(self) -> Self {
        assert!(!matches!(self, Self::Al), "cannot invert the always condition");
        Self::from_bits(self.bits() ^ 1)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; 16] = [
            "eq", "ne", "cs", "cc", "mi", "pl", "vs", "vc", "hi", "ls", "ge", "lt", "gt", "le", "al",
            "nv",
        ];
        f.write_str(NAMES[*self as usize])
    }
}

/// Shift applied to the second register operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Shift {
    /// Logical shift left.
    Lsl = 0,
    /// Logical shift right.
    Lsr = 1,
    /// Arithmetic shift right.
    Asr = 2,
    /// Rotate right (logical forms only).
    Ror = 3,
}

impl Shift {
    /// Shift from the low two bits of `bits`.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 3 {
            0 => Self::Lsl,
            1 => Self::Lsr,
            2 => Self::Asr,
            _ => Self::Ror,
        }
    }

    /// Field value.
    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }
}

/// Extension applied to the second register operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Extend {
    /// Zero-extend byte.
    Uxtb = 0,
    /// Zero-extend half-word.
    Uxth = 1,
    /// Zero-extend word.
    Uxtw = 2,
    /// Zero-extend double-word (LSL in 64-bit forms).
    Uxtx = 3,
    /// Sign-extend byte.
    Sxtb = 4,
    /// Sign-extend half-word.
    Sxth = 5,
    /// Sign-extend word.
    Sxtw = 6,
    /// Sign-extend double-word.
    Sxtx = 7,
}

impl Extend {
    /// Extend from the low three bits of `bits`.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 7 {
            0 => Self::Uxtb,
            1 => Self::Uxth,
            2 => Self::Uxtw,
            3 => Self::Uxtx,
            4 => Self::Sxtb,
            5 => Self::Sxth,
            6 => Self::Sxtw,
            _ => Self::Sxtx,
        }
    }

    /// Field value.
    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }
}

/// Scale applied to an index register in an address computation (as log2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ScaleFactor {
    /// Byte elements.
    Times1 = 0,
    /// Half-word elements.
    Times2 = 1,
    /// Word elements.
    Times4 = 2,
    /// Double-word elements.
    Times8 = 3,
    /// Quad-word elements.
    Times16 = 4,
}

impl ScaleFactor {
    /// Scale of a machine word.
    pub const TIMES_WORD_SIZE: Self = Self::Times8;
    /// Scale of a half machine word.
    pub const TIMES_HALF_WORD_SIZE: Self = Self::Times4;

    /// Scale of a (possibly compressed) object pointer.
    #[inline]
    pub const fn compressed_word_size(compressed_pointers: bool) -> Self {
        if compressed_pointers {
            Self::Times4
        } else {
            Self::Times8
        }
    }

    /// Half of [`ScaleFactor::compressed_word_size`].
    #[inline]
    pub const fn compressed_half_word_size(compressed_pointers: bool) -> Self {
        if compressed_pointers {
            Self::Times2
        } else {
            Self::Times4
        }
    }

    /// Shift amount.
    #[inline]
    pub const fn log2(self) -> u32 {
        self as u32
    }

    /// Multiplier in bytes.
    #[inline]
    pub const fn bytes(self) -> u32 {
        1 << self.log2()
    }
}
