//! Single-bit constants and instruction field descriptors.
//!
//! Opcode patterns are composed by OR-ing the `Bn` constants, exactly as the
//! architecture manual prints them. Operand and immediate fields are described
//! by a [`Field`], a `(shift, width)` pair that knows how to extract, sign-extend
//! and insert its value.

use crate::common::error::EncodingError;

/// Bit 0.
pub const B0: u32 = 1 << 0;
/// Bit 1.
pub const B1: u32 = 1 << 1;
/// Bit 2.
pub const B2: u32 = 1 << 2;
/// Bit 3.
pub const B3: u32 = 1 << 3;
/// Bit 4.
pub const B4: u32 = 1 << 4;
/// Bit 5.
pub const B5: u32 = 1 << 5;
/// Bit 6.
pub const B6: u32 = 1 << 6;
/// Bit 7.
pub const B7: u32 = 1 << 7;
/// Bit 8.
pub const B8: u32 = 1 << 8;
/// Bit 9.
pub const B9: u32 = 1 << 9;
/// Bit 10.
pub const B10: u32 = 1 << 10;
/// Bit 11.
pub const B11: u32 = 1 << 11;
/// Bit 12.
pub const B12: u32 = 1 << 12;
/// Bit 13.
pub const B13: u32 = 1 << 13;
/// Bit 14.
pub const B14: u32 = 1 << 14;
/// Bit 15.
pub const B15: u32 = 1 << 15;
/// Bit 16.
pub const B16: u32 = 1 << 16;
/// Bit 17.
pub const B17: u32 = 1 << 17;
/// Bit 18.
pub const B18: u32 = 1 << 18;
/// Bit 19.
pub const B19: u32 = 1 << 19;
/// Bit 20.
pub const B20: u32 = 1 << 20;
/// Bit 21.
pub const B21: u32 = 1 << 21;
/// Bit 22.
pub const B22: u32 = 1 << 22;
/// Bit 23.
pub const B23: u32 = 1 << 23;
/// Bit 24.
pub const B24: u32 = 1 << 24;
/// Bit 25.
pub const B25: u32 = 1 << 25;
/// Bit 26.
pub const B26: u32 = 1 << 26;
/// Bit 27.
pub const B27: u32 = 1 << 27;
/// Bit 28.
pub const B28: u32 = 1 << 28;
/// Bit 29.
pub const B29: u32 = 1 << 29;
/// Bit 30.
pub const B30: u32 = 1 << 30;
/// Bit 31.
pub const B31: u32 = 1 << 31;

/// Width of an instruction word in bits.
pub const WORD_BITS: u32 = 32;

/// A named bit field of a 32-bit instruction word.
///
/// The field occupies bits `shift .. shift + width`. Construction is `const`
/// and rejects fields that do not fit in a word, so a malformed field table
/// fails the build instead of producing wrong encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    /// Name used in diagnostics.
    pub name: &'static str,
    /// Position of the least significant bit.
    pub shift: u32,
    /// Number of bits.
    pub width: u32,
}

impl Field {
    /// Creates a field descriptor.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a constant) if the field is empty
    /// or extends past bit 31.
    pub const fn new(name: &'static str, shift: u32, width: u32) -> Self {
        assert!(width > 0 && width <= WORD_BITS, "field width out of range");
        assert!(shift + width <= WORD_BITS, "field extends past bit 31");
        Self { name, shift, width }
    }

    /// Mask of the field's bits once extracted (the low `width` bits).
    #[inline(always)]
    pub const fn value_mask(self) -> u32 {
        if self.width == WORD_BITS {
            u32::MAX
        } else {
            (1 << self.width) - 1
        }
    }

    /// Mask of the field's bits in place within the word.
    #[inline(always)]
    pub const fn mask(self) -> u32 {
        self.value_mask() << self.shift
    }

    /// Extracts the unsigned field value: `(word >> shift) & ((1 << width) - 1)`.
    #[inline(always)]
    pub const fn extract(self, word: u32) -> u32 {
        (word >> self.shift) & self.value_mask()
    }

    /// Extracts the field value and sign-extends it from its top bit.
    ///
    /// The extracted value is shifted left so the field's sign bit lands in bit
    /// 31, then shifted back arithmetically by the same `32 - width` amount.
    #[inline(always)]
    pub const fn extract_signed(self, word: u32) -> i64 {
        let unused = WORD_BITS - self.width;
        (((self.extract(word) as i32) << unused) >> unused) as i64
    }

    /// Places `value` into the field's position without range checking.
    ///
    /// Bits of `value` above the field width are discarded.
    #[inline(always)]
    pub const fn place(self, value: u32) -> u32 {
        (value & self.value_mask()) << self.shift
    }

    /// Returns whether `value` is representable as an unsigned field value.
    #[inline]
    pub const fn fits(self, value: u64) -> bool {
        value <= self.value_mask() as u64
    }

    /// Returns whether `value` is representable as a signed field value.
    #[inline]
    pub const fn fits_signed(self, value: i64) -> bool {
        let half = 1i64 << (self.width - 1);
        value >= -half && value < half
    }

    /// Replaces the field in `word` with the unsigned `value`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::FieldOverflow`] if `value` needs more than
    /// `width` bits.
    pub const fn insert(self, word: u32, value: u64) -> Result<u32, EncodingError> {
        if !self.fits(value) {
            return Err(EncodingError::FieldOverflow {
                field: self.name,
                value: value as i64,
                width: self.width,
            });
        }
        Ok((word & !self.mask()) | self.place(value as u32))
    }

    /// Replaces the field in `word` with the two's-complement `value`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::FieldOverflow`] if `value` is outside
    /// `-(2^(width-1)) ..= 2^(width-1) - 1`.
    pub const fn insert_signed(self, word: u32, value: i64) -> Result<u32, EncodingError> {
        if !self.fits_signed(value) {
            return Err(EncodingError::FieldOverflow {
                field: self.name,
                value,
                width: self.width,
            });
        }
        Ok((word & !self.mask()) | self.place(value as u32))
    }
}
