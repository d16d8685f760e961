//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the ARM64 vocabulary the code generator and its inspector share:
//! register identifiers and sets, the instruction field table, opcode
//! families and their sub-operations, immediate codecs, word builders and the
//! decoder.
//!
//! # Layers
//!
//! * `registers` / `regset`: Register identifiers, role aliases and partitions.
//! * `fields` / `families` / `ops`: Field positions, family masks, sub-operations.
//! * `instruction`: Field accessors, operand modes and special words.
//! * `immediate`: Logical and floating-point immediate codecs.
//! * `encode` / `decode` / `code`: Word builders, decoder and code buffer views.

/// Register identifiers, role aliases and the link register token.
pub mod registers;

/// Register sets and the global register partitions.
pub mod regset;

/// Condition codes, shift/extend kinds and scale factors.
pub mod condition;

/// Instruction field table.
pub mod fields;

/// Opcode family table and classification.
pub mod families;

/// Per-family sub-operations.
pub mod ops;

/// Field accessors, operand-mode resolution and special instruction words.
pub mod instruction;

/// Logical and floating-point immediate codecs.
pub mod immediate;

/// Instruction word builders.
pub mod encode;

/// Instruction decoder.
pub mod decode;

/// Little-endian views of code buffers.
pub mod code;
