//! Field Extraction and Sign Extension Tests.
//!
//! Checks the signed field accessors at the extremes of each signed width
//! and against a reference two's-complement extension.

use arm64_vm_core::common::bits::Field;
use arm64_vm_core::common::error::EncodingError;
use arm64_vm_core::isa::fields;
use arm64_vm_core::isa::instruction::InstructionBits;
use proptest::prelude::*;
use rstest::rstest;

/// Reference sign extension of the low `width` bits of `raw`.
fn sign_extend(raw: u32, width: u32) -> i64 {
    let value = i64::from(raw & ((1 << width) - 1));
    if value >= 1 << (width - 1) {
        value - (1 << width)
    } else {
        value
    }
}

/// The maximum positive value and the lone sign bit decode to the range ends.
#[rstest]
#[case(fields::IMM7)]
#[case(fields::IMM9)]
#[case(fields::IMM14)]
#[case(fields::IMM19)]
#[case(fields::IMM26)]
fn signed_extremes(#[case] field: Field) {
    let w = field.width;
    let max = field.place((1 << (w - 1)) - 1);
    let min = field.place(1 << (w - 1));
    assert_eq!(field.extract_signed(max), (1i64 << (w - 1)) - 1);
    assert_eq!(field.extract_signed(min), -(1i64 << (w - 1)));
    assert_eq!(field.extract_signed(field.mask()), -1);
    assert_eq!(field.extract_signed(0), 0);
}

/// Signed accessors of the instruction trait agree with the fields.
#[rstest]
#[case(fields::IMM7, |w: u32| w.simm7())]
#[case(fields::IMM9, |w: u32| w.simm9())]
#[case(fields::IMM14, |w: u32| w.simm14())]
#[case(fields::IMM19, |w: u32| w.simm19())]
#[case(fields::IMM26, |w: u32| w.simm26())]
fn accessor_extremes(#[case] field: Field, #[case] accessor: fn(u32) -> i64) {
    let w = field.width;
    assert_eq!(accessor(field.place((1 << (w - 1)) - 1)), (1i64 << (w - 1)) - 1);
    assert_eq!(accessor(field.place(1 << (w - 1))), -(1i64 << (w - 1)));
}

/// Inserting outside the signed range fails with the field's name.
#[test]
fn insert_signed_rejects_overflow() {
    assert_eq!(
        fields::IMM9.insert_signed(0, 256),
        Err(EncodingError::FieldOverflow {
            field: "imm9",
            value: 256,
            width: 9,
        })
    );
    assert_eq!(fields::IMM9.insert_signed(0, -256), Ok(0x0010_0000));
    assert!(fields::IMM12.insert(0, 4096).is_err());
}

/// No two register fields overlap within a word, and all fit in 32 bits.
#[test]
fn field_table_is_well_formed() {
    for field in fields::ALL {
        assert!(field.shift + field.width <= 32, "{} overflows", field.name);
    }
    assert_eq!(fields::RD.mask() & fields::RN.mask(), 0);
    assert_eq!(fields::RN.mask() & fields::RM.mask(), 0);
    assert_eq!(fields::RT2.mask() & fields::RM.mask(), 0);
}

proptest! {
    /// Signed extraction matches manual two's-complement extension.
    #[test]
    fn extract_signed_matches_reference(word in any::<u32>()) {
        for field in [fields::IMM7, fields::IMM9, fields::IMM14, fields::IMM19, fields::IMM26] {
            prop_assert_eq!(field.extract_signed(word), sign_extend(field.extract(word), field.width));
        }
    }

    /// Inserting a value in range and extracting it gives the value back.
    #[test]
    fn insert_then_extract(value in -(1i64 << 18)..(1i64 << 18), word in any::<u32>()) {
        let patched = fields::IMM19.insert_signed(word, value).unwrap();
        prop_assert_eq!(fields::IMM19.extract_signed(patched), value);
        prop_assert_eq!(patched & !fields::IMM19.mask(), word & !fields::IMM19.mask());
    }
}
