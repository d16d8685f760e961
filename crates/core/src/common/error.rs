//! Error definitions.
//!
//! Almost every invariant of this crate is checked at build time or by an
//! assertion: a violation means the code generator itself is wrong. The errors
//! below cover the caller-facing operations that legitimately fail:
//! 1. **Encoding:** An operand does not fit its field, or an immediate has no
//!    compact encoding and must be materialised another way.
//! 2. **Code Access:** A code buffer offset is unaligned or out of bounds.
//! 3. **ABI Contracts:** A contract added to the catalogue breaks a register
//!    partitioning rule.
//! 4. **Configuration:** A configuration document cannot be parsed.

use thiserror::Error;

use crate::isa::registers::Register;

/// Failure to build or access an instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// A value needs more bits than its field provides.
    #[error("value {value:#x} does not fit the {width}-bit `{field}` field")]
    FieldOverflow {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: i64,
        /// Field width in bits.
        width: u32,
    },

    /// The value has no (N, imms, immr) logical-immediate encoding.
    #[error("{value:#x} has no {reg_bits}-bit logical immediate encoding")]
    UnencodableLogicalImmediate {
        /// Requested constant.
        value: u64,
        /// Register width in bits (32 or 64).
        reg_bits: u32,
    },

    /// The double has no 8-bit floating-point immediate encoding.
    #[error("double with bits {bits:#018x} has no 8-bit immediate encoding")]
    UnencodableFpImmediate {
        /// IEEE-754 bits of the rejected double.
        bits: u64,
    },

    /// A PC-relative or scaled offset is not a multiple of its scale.
    #[error("offset {offset} is not a multiple of {scale}")]
    MisalignedOffset {
        /// Rejected byte offset.
        offset: i64,
        /// Required multiple.
        scale: u32,
    },

    /// The register cannot occupy the operand slot it was given.
    #[error("{register} cannot be used as {operand}")]
    InvalidOperand {
        /// Offending register.
        register: Register,
        /// Operand slot description.
        operand: &'static str,
    },

    /// The sub-operation belongs to a different family than the builder encodes.
    #[error("{family}::{operation} is not a {expected} operation")]
    WrongFamily {
        /// Sub-operation name.
        operation: &'static str,
        /// Family of the sub-operation.
        family: &'static str,
        /// Family the builder encodes.
        expected: &'static str,
    },

    /// The sub-operation exists but not with the requested operand form.
    #[error("{operation} {reason}")]
    UnsupportedForm {
        /// Sub-operation name.
        operation: &'static str,
        /// What the operation does not accept.
        reason: &'static str,
    },

    /// The word has no PC-relative offset field to patch.
    #[error("{word:#010x} is not a PC-relative instruction")]
    NotPcRelative {
        /// Offending instruction word.
        word: u32,
    },

    /// A code buffer offset is not aligned to the instruction size.
    #[error("code offset {offset:#x} is not aligned to the 4-byte instruction size")]
    UnalignedCodeOffset {
        /// Byte offset into the buffer.
        offset: usize,
    },

    /// A code buffer offset does not address a whole instruction in the buffer.
    #[error("code offset {offset:#x} is outside the {len}-byte buffer")]
    CodeOutOfBounds {
        /// Byte offset into the buffer.
        offset: usize,
        /// Buffer length in bytes.
        len: usize,
    },
}

/// Violation of an ABI contract partitioning rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// A register is both preserved and clobbered by the same stub.
    #[error("{contract}: {register} is declared both preserved and clobbered")]
    PreservedAndClobbered {
        /// Contract name.
        contract: &'static str,
        /// Offending register, by display name.
        register: String,
    },

    /// A role is assigned a globally reserved register.
    #[error("{contract}: role `{role}` uses reserved register {register}")]
    ReservedRegister {
        /// Contract name.
        contract: &'static str,
        /// Role name.
        role: &'static str,
        /// Offending register, by display name.
        register: String,
    },

    /// Two roles share a register without declaring the alias.
    #[error("{contract}: roles `{first}` and `{second}` share {register} without a declared alias")]
    UndeclaredAlias {
        /// Contract name.
        contract: &'static str,
        /// First role.
        first: &'static str,
        /// Second role.
        second: &'static str,
        /// Shared register, by display name.
        register: String,
    },

    /// An internal register set overlaps the registers its outer contract preserves.
    #[error("{contract}: internal register {register} is preserved by outer contract {outer}")]
    InternalOverlapsPreserved {
        /// Internal contract name.
        contract: &'static str,
        /// Outer contract name.
        outer: &'static str,
        /// Offending register, by display name.
        register: String,
    },

    /// An internal register set names an outer contract that is not in the catalogue.
    #[error("{contract}: outer contract {outer} is not in the catalogue")]
    UnknownOuterContract {
        /// Internal contract name.
        contract: &'static str,
        /// Missing outer contract name.
        outer: &'static str,
    },

    /// A contract with the same name is already in the catalogue.
    #[error("contract {contract} is already in the catalogue")]
    DuplicateContract {
        /// Contract name.
        contract: &'static str,
    },
}

/// Failure to load a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
