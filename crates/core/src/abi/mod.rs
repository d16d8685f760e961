//! Application Binary Interface.
//!
//! Register-role contracts of the stubs, the native and VM-private calling
//! conventions, and the OS-dependent parameters they are built from.

/// OS selection and OS-dependent ABI parameters.
pub mod target;

/// Native (FFI) and VM-private calling conventions.
pub mod calling_convention;

/// Contract model and partitioning rules.
pub mod contract;

/// Built-in stub contracts.
pub mod stubs;

/// Extensible, name-keyed contract table.
pub mod catalogue;

pub use catalogue::AbiCatalogue;
pub use contract::{AbiContract, ContractKind, Role, RoleRegister};
pub use target::{TargetAbi, TargetOs};
