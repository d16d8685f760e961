//! ARM64 code generation vocabulary for a managed-language VM.
//!
//! This crate is the static layer a native code generator, its inspector and the
//! runtime's stack walker are built on:
//! 1. **Registers:** General-purpose and vector register identifiers, role aliases,
//!    and the reserved/available/preserved register partitions.
//! 2. **Encoding:** Bit and field primitives, the opcode family table, per-family
//!    sub-operations, field accessors and operand-mode resolution for 32-bit words.
//! 3. **Immediates:** Logical-immediate and 8-bit floating-point immediate codecs.
//! 4. **ABI:** Register-role contracts of the VM's fast-path stubs and the native
//!    and VM-private calling conventions, selected per target OS.
//! 5. **Configuration:** JSON-deserialisable target and code generation settings.

/// Bit/field primitives and error types shared by every layer.
pub mod common;
/// Target and code generation configuration.
pub mod config;
/// Instruction set vocabulary (registers, fields, families, codecs, encoder, decoder).
pub mod isa;
/// Stub register contracts, calling conventions and target ABI selection.
pub mod abi;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Target-dependent ABI choices; construct with `TargetAbi::for_os`.
pub use crate::abi::target::{TargetAbi, TargetOs};
/// Register identifier types.
pub use crate::isa::registers::{Register, VRegister};
