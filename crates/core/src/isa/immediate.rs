//! Immediate codecs.
//!
//! 1. **Logical (bitmask) immediates:** The `(N, imms, immr)` triple describes a
//!    run of ones inside a 2..64-bit element, rotated and then replicated across
//!    the register. [`decode_logical_immediate`] follows the architecture's
//!    `DecodeBitMasks`; [`encode_logical_immediate`] searches the inverse.
//! 2. **Floating-point immediates:** An 8-bit `abcdefgh` pattern expands to a
//!    double as `a:NOT(b):bbbbbbbb:cd:efgh:0{48}`.

use crate::common::error::EncodingError;

/// Operand width of a data-processing instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterSize {
    /// 32-bit (`W`) registers.
    W,
    /// 64-bit (`X`) registers.
    X,
}

impl RegisterSize {
    /// Width in bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            Self::W => 32,
            Self::X => 64,
        }
    }

    /// Size from the `sf` bit.
    #[inline]
    pub const fn from_sf(sf: u32) -> Self {
        if sf & 1 == 0 { Self::W } else { Self::X }
    }

    /// Value of the `sf` bit.
    #[inline]
    pub const fn sf(self) -> u32 {
        match self {
            Self::W => 0,
            Self::X => 1,
        }
    }
}

/// Rotates the low `width` bits of `value` right by `rotate`.
///
/// `value` must not have bits set at or above `width`, and `rotate` must be
/// below `width`; only the low six bits of either shift amount are used.
#[inline]
pub const fn rotate_right(value: u64, rotate: u32, width: u32) -> u64 {
    assert!(width <= 64, "rotation width exceeds 64 bits");
    let right = rotate & 63;
    let left = width.wrapping_sub(rotate) & 63;
    ((value & ((1u64 << right) - 1)) << left) | (value >> right)
}

/// Replicates the low `width` bits of `value` across a `reg_size`-bit register.
///
/// # Panics
///
/// Panics unless `width` is 2, 4, 8, 16 or 32 and `reg_size` is 32 or 64.
#[inline]
pub const fn repeat_bits_across_reg(reg_size: u32, value: u64, width: u32) -> u64 {
    assert!(matches!(width, 2 | 4 | 8 | 16 | 32), "element width must be 2..=32");
    assert!(matches!(reg_size, 32 | 64), "register size must be 32 or 64");
    let mut result = value & ((1u64 << width) - 1);
    let mut i = width;
    while i < reg_size {
        result |= result << i;
        i *= 2;
    }
    result
}

/// Expands a logical-immediate triple into the constant it denotes.
///
/// Reserved patterns (all-ones element, `imms == 0x3F` with `N == 1`, ...)
/// decode to 0, which no valid encoding produces.
///
/// # Panics
///
/// Panics if `n` is not a single bit or `imm_s`/`imm_r` exceed six bits.
pub const fn decode_logical_immediate(n: u32, imm_s: u32, imm_r: u32, size: RegisterSize) -> u64 {
    assert!(n < 2 && imm_s < 64 && imm_r < 64, "logical immediate field out of range");
    if n == 1 {
        if imm_s == 0x3F {
            return 0;
        }
        let bits = (1u64 << (imm_s + 1)) - 1;
        return rotate_right(bits, imm_r, 64);
    }
    if (imm_s >> 1) == 0x1F {
        return 0;
    }
    let mut width = 0x20;
    while width >= 0x2 {
        if imm_s & width == 0 {
            let mask = width - 1;
            if imm_s & mask == mask {
                return 0;
            }
            let bits = (1u64 << ((imm_s & mask) + 1)) - 1;
            return repeat_bits_across_reg(
                size.bits(),
                rotate_right(bits, imm_r & mask, width),
                width,
            );
        }
        width >>= 1;
    }
    unreachable!()
}

/// An encodable bitmask immediate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogicalImmediate {
    /// Element-size bit (set only for 64-bit elements).
    pub n: u32,
    /// Run length and element size.
    pub imm_s: u32,
    /// Rotation.
    pub imm_r: u32,
}

impl LogicalImmediate {
    /// The constant this triple denotes at `size`.
    pub const fn value(self, size: RegisterSize) -> u64 {
        decode_logical_immediate(self.n, self.imm_s, self.imm_r, size)
    }
}

/// Finds the `(N, imms, immr)` encoding of `value` for a `size` register.
///
/// # Errors
///
/// Returns [`EncodingError::UnencodableLogicalImmediate`] for 0, all ones, a
/// `W` value wider than 32 bits, and any value that is not a rotated run of
/// ones replicated across the register.
pub const fn encode_logical_immediate(
    value: u64,
    size: RegisterSize,
) -> Result<LogicalImmediate, EncodingError> {
    let unencodable = EncodingError::UnencodableLogicalImmediate {
        value,
        reg_bits: size.bits(),
    };
    let wide = match size {
        RegisterSize::W => {
            if value > u32::MAX as u64 {
                return Err(unencodable);
            }
            value | (value << 32)
        }
        RegisterSize::X => value,
    };
    if wide == 0 || wide == u64::MAX {
        return Err(unencodable);
    }

    // Smallest element that repeats across the register.
    let mut element_size = 64u32;
    while element_size > 2 {
        let half = element_size / 2;
        let mask = (1u64 << half) - 1;
        if (wide & mask) != ((wide >> half) & mask) {
            break;
        }
        element_size = half;
    }
    let element_mask = if element_size == 64 {
        u64::MAX
    } else {
        (1u64 << element_size) - 1
    };
    let element = wide & element_mask;
    let ones = element.count_ones();
    let run = (1u64 << ones) - 1;

    let mut rotation = 0;
    while rotation < element_size {
        if rotate_right(element, rotation, element_size) == run {
            let imm_r = (element_size - rotation) % element_size;
            let n = if element_size == 64 { 1 } else { 0 };
            let imm_s = ((!(element_size * 2 - 1)) & 0x3F) | (ones - 1);
            return Ok(LogicalImmediate {
                n,
                imm_s: imm_s & 0x3F,
                imm_r,
            });
        }
        rotation += 1;
    }
    Err(unencodable)
}

/// Returns whether `value` can be an `AND`/`ORR`/`EOR` immediate at `size`.
#[inline]
pub const fn is_logical_immediate(value: u64, size: RegisterSize) -> bool {
    encode_logical_immediate(value, size).is_ok()
}

/// Expands an 8-bit floating-point immediate into IEEE-754 double bits.
#[inline]
pub const fn vfp_expand_imm(imm8: u8) -> u64 {
    let imm8 = imm8 as u64;
    let sign = ((imm8 >> 7) & 1) << 63;
    let bit6 = (imm8 >> 6) & 1;
    let hi_exp = (bit6 ^ 1) << 62;
    let mid_exp = if bit6 == 1 { 0xFF << 54 } else { 0 };
    let low_exp = ((imm8 >> 4) & 0x3) << 52;
    let frac = (imm8 & 0xF) << 48;
    sign | hi_exp | mid_exp | low_exp | frac
}

/// Finds the 8-bit immediate of `value`, if it has one.
///
/// # Errors
///
/// Returns [`EncodingError::UnencodableFpImmediate`] when the low 48 bits are
/// not zero or exponent bits 61..54 are not all the inverse of bit 62.
pub const fn encode_vfp_imm(value: f64) -> Result<u8, EncodingError> {
    let bits = value.to_bits();
    if bits & ((1 << 48) - 1) != 0 {
        return Err(EncodingError::UnencodableFpImmediate { bits });
    }
    let bit62 = (bits >> 62) & 1;
    let mid_exp = (bits >> 54) & 0xFF;
    let expected = if bit62 == 1 { 0 } else { 0xFF };
    if mid_exp != expected {
        return Err(EncodingError::UnencodableFpImmediate { bits });
    }
    let imm8 = ((bits >> 63) << 7) | ((bit62 ^ 1) << 6) | (((bits >> 52) & 0x3) << 4) | ((bits >> 48) & 0xF);
    Ok(imm8 as u8)
}
