//! Register contracts of the built-in stubs.
//!
//! Each stub gets a unit struct whose associated constants name the registers
//! of its roles, plus a `CONTRACT` describing which of them survive the call.
//! Internal-register structs list the scratch registers a stub uses on top of
//! its outer contract.

use crate::abi::contract::{AbiContract, Role, str_eq};
use crate::isa::registers::{CODE_REG, EXCEPTION_OBJECT_REG, Register, STACK_TRACE_OBJECT_REG, VRegister};
use crate::isa::regset::{RESERVED_CPU_REGISTERS, RegisterSet};

/// Shared slow-path stubs.
#[derive(Debug, Clone, Copy)]
pub struct SharedSlowPathStubAbi;

impl SharedSlowPathStubAbi {
    /// Result.
    pub const RESULT_REG: Register = Register::R0;
    /// Contract.
    pub const CONTRACT: AbiContract =
        AbiContract::stub("SharedSlowPathStubAbi", &[Role::clobbered("result", Self::RESULT_REG)]);
}

/// Type argument and type instantiation stubs.
#[derive(Debug, Clone, Copy)]
pub struct InstantiationAbi;

impl InstantiationAbi {
    /// Type arguments to instantiate.
    pub const UNINSTANTIATED_TYPE_ARGUMENTS_REG: Register = Register::R3;
    /// Instantiator type arguments.
    pub const INSTANTIATOR_TYPE_ARGUMENTS_REG: Register = Register::R2;
    /// Function type arguments.
    pub const FUNCTION_TYPE_ARGUMENTS_REG: Register = Register::R1;
    /// Instantiated type arguments.
    pub const RESULT_TYPE_ARGUMENTS_REG: Register = Register::R0;
    /// Instantiated type.
    pub const RESULT_TYPE_REG: Register = Register::R0;
    /// Scratch.
    pub const SCRATCH_REG: Register = Register::R8;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "InstantiationAbi",
        &[
            Role::preserved("uninstantiated_type_arguments", Self::UNINSTANTIATED_TYPE_ARGUMENTS_REG),
            Role::preserved("instantiator_type_arguments", Self::INSTANTIATOR_TYPE_ARGUMENTS_REG),
            Role::preserved("function_type_arguments", Self::FUNCTION_TYPE_ARGUMENTS_REG),
            Role::clobbered("result_type_arguments", Self::RESULT_TYPE_ARGUMENTS_REG),
            Role::clobbered("result_type", Self::RESULT_TYPE_REG),
            Role::clobbered("scratch", Self::SCRATCH_REG),
        ],
    )
    .with_aliases(&[("result_type_arguments", "result_type")]);
}

/// Registers used while probing the instantiation cache, on top of
/// [`InstantiationAbi`].
#[derive(Debug, Clone, Copy)]
pub struct InstantiateTavInternalRegs;

impl InstantiateTavInternalRegs {
    /// Registers pushed around the probe because they overlap the outer contract.
    pub const SAVED_REGISTERS: RegisterSet = RegisterSet::EMPTY;
    /// Start of the current cache entry.
    pub const ENTRY_START_REG: Register = Register::R9;
    /// Hash mask of the cache.
    pub const PROBE_MASK_REG: Register = Register::R7;
    /// Linear probe distance.
    pub const PROBE_DISTANCE_REG: Register = Register::R6;
    /// Index of the current entry.
    pub const CURRENT_ENTRY_INDEX_REG: Register = Register::R10;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::internal(
        "InstantiateTavInternalRegs",
        InstantiationAbi::CONTRACT.name,
        Self::SAVED_REGISTERS,
        &[
            Role::clobbered("entry_start", Self::ENTRY_START_REG),
            Role::clobbered("probe_mask", Self::PROBE_MASK_REG),
            Role::clobbered("probe_distance", Self::PROBE_DISTANCE_REG),
            Role::clobbered("current_entry_index", Self::CURRENT_ENTRY_INDEX_REG),
        ],
    );
}

/// Scratch registers of the type testing stubs, on top of [`TypeTestAbi`].
#[derive(Debug, Clone, Copy)]
pub struct TtsInternalRegs;

impl TtsInternalRegs {
    /// Type arguments of the instance.
    pub const INSTANCE_TYPE_ARGUMENTS_REG: Register = Register::R7;
    /// Scratch.
    pub const SCRATCH_REG: Register = Register::R9;
    /// Type argument of the subtype.
    pub const SUB_TYPE_ARGUMENT_REG: Register = Register::R5;
    /// Type argument of the supertype.
    pub const SUPER_TYPE_ARGUMENT_REG: Register = Register::R6;
    /// Registers pushed while generic type arguments are checked.
    pub const SAVED_TYPE_ARGUMENT_REGISTERS: RegisterSet = RegisterSet::EMPTY;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::internal(
        "TtsInternalRegs",
        TypeTestAbi::NAME,
        Self::SAVED_TYPE_ARGUMENT_REGISTERS,
        &[
            Role::clobbered("instance_type_arguments", Self::INSTANCE_TYPE_ARGUMENTS_REG),
            Role::clobbered("scratch", Self::SCRATCH_REG),
            Role::clobbered("sub_type_argument", Self::SUB_TYPE_ARGUMENT_REG),
            Role::clobbered("super_type_argument", Self::SUPER_TYPE_ARGUMENT_REG),
        ],
    );
    /// Registers clobbered inside the stubs.
    pub const INTERNAL_REGISTERS: RegisterSet = Self::CONTRACT.internal_registers();
}

/// Scratch registers of the subtype test cache stubs, on top of [`TypeTestAbi`].
#[derive(Debug, Clone, Copy)]
pub struct StcInternalRegs;

impl StcInternalRegs {
    /// Class id or signature of the instance.
    pub const INSTANCE_CID_OR_SIGNATURE_REG: Register = Register::R6;
    /// Instantiator type arguments of the instance.
    pub const INSTANCE_INSTANTIATOR_TYPE_ARGUMENTS_REG: Register = Register::R5;
    /// Parent function type arguments of a closure instance.
    pub const INSTANCE_PARENT_FUNCTION_TYPE_ARGUMENTS_REG: Register = Register::R9;
    /// Delayed function type arguments of a closure instance.
    pub const INSTANCE_DELAYED_FUNCTION_TYPE_ARGUMENTS_REG: Register = Register::R10;
    /// End of the cache entries.
    pub const CACHE_ENTRIES_END_REG: Register = Register::R11;
    /// Size of the cache contents.
    pub const CACHE_CONTENTS_SIZE_REG: Register = Register::R12;
    /// Linear probe distance.
    pub const PROBE_DISTANCE_REG: Register = Register::R13;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::internal(
        "StcInternalRegs",
        TypeTestAbi::NAME,
        RegisterSet::EMPTY,
        &[
            Role::clobbered("instance_cid_or_signature", Self::INSTANCE_CID_OR_SIGNATURE_REG),
            Role::clobbered(
                "instance_instantiator_type_arguments",
                Self::INSTANCE_INSTANTIATOR_TYPE_ARGUMENTS_REG,
            ),
            Role::clobbered(
                "instance_parent_function_type_arguments",
                Self::INSTANCE_PARENT_FUNCTION_TYPE_ARGUMENTS_REG,
            ),
            Role::clobbered(
                "instance_delayed_function_type_arguments",
                Self::INSTANCE_DELAYED_FUNCTION_TYPE_ARGUMENTS_REG,
            ),
            Role::clobbered("cache_entries_end", Self::CACHE_ENTRIES_END_REG),
            Role::clobbered("cache_contents_size", Self::CACHE_CONTENTS_SIZE_REG),
            Role::clobbered("probe_distance", Self::PROBE_DISTANCE_REG),
        ],
    );
    /// Registers clobbered inside the stubs.
    pub const INTERNAL_REGISTERS: RegisterSet = Self::CONTRACT.internal_registers();
}

/// Type testing and subtype test cache stubs.
#[derive(Debug, Clone, Copy)]
pub struct TypeTestAbi;

impl TypeTestAbi {
    const NAME: &'static str = "TypeTestAbi";

    /// Instance under test.
    pub const INSTANCE_REG: Register = Register::R0;
    /// Destination type.
    pub const DST_TYPE_REG: Register = Register::R8;
    /// Instantiator type arguments.
    pub const INSTANTIATOR_TYPE_ARGUMENTS_REG: Register = Register::R2;
    /// Function type arguments.
    pub const FUNCTION_TYPE_ARGUMENTS_REG: Register = Register::R1;
    /// Subtype test cache.
    pub const SUBTYPE_TEST_CACHE_REG: Register = Register::R3;
    /// Scratch.
    pub const SCRATCH_REG: Register = Register::R4;
    /// Result of a subtype test cache probe. Distinct from the registers above.
    pub const SUBTYPE_TEST_CACHE_RESULT_REG: Register = Register::R7;
    /// Result of an instance-of check; overwrites the instance.
    pub const INSTANCE_OF_RESULT_REG: Register = Self::INSTANCE_REG;

    /// Registers the stubs leave intact.
    pub const PRESERVED_ABI_REGISTERS: RegisterSet = Self::CONTRACT.preserved();
    /// Registers the stubs may clobber.
    pub const NON_PRESERVED_ABI_REGISTERS: RegisterSet = Self::CONTRACT.clobbered();
    /// Every register of the contract.
    pub const ABI_REGISTERS: RegisterSet = Self::CONTRACT.used();

    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        Self::NAME,
        &[
            Role::preserved("instance", Self::INSTANCE_REG),
            Role::preserved("dst_type", Self::DST_TYPE_REG),
            Role::preserved("instantiator_type_arguments", Self::INSTANTIATOR_TYPE_ARGUMENTS_REG),
            Role::preserved("function_type_arguments", Self::FUNCTION_TYPE_ARGUMENTS_REG),
            Role::clobbered("subtype_test_cache", Self::SUBTYPE_TEST_CACHE_REG),
            Role::clobbered("scratch", Self::SCRATCH_REG),
            Role::clobbered("subtype_test_cache_result", Self::SUBTYPE_TEST_CACHE_RESULT_REG),
        ],
    )
    .with_extra_clobbered(
        TtsInternalRegs::INTERNAL_REGISTERS
            .union(StcInternalRegs::INTERNAL_REGISTERS)
            .with(CODE_REG),
    );
}

/// Subtype assertion stub. Runs only for the exception it may throw.
#[derive(Debug, Clone, Copy)]
pub struct AssertSubtypeAbi;

impl AssertSubtypeAbi {
    /// Subtype.
    pub const SUB_TYPE_REG: Register = Register::R0;
    /// Supertype.
    pub const SUPER_TYPE_REG: Register = Register::R8;
    /// Instantiator type arguments.
    pub const INSTANTIATOR_TYPE_ARGUMENTS_REG: Register = Register::R2;
    /// Function type arguments.
    pub const FUNCTION_TYPE_ARGUMENTS_REG: Register = Register::R1;
    /// Name of the checked destination, for the error message.
    pub const DST_NAME_REG: Register = Register::R3;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "AssertSubtypeAbi",
        &[
            Role::preserved("sub_type", Self::SUB_TYPE_REG),
            Role::preserved("super_type", Self::SUPER_TYPE_REG),
            Role::preserved("instantiator_type_arguments", Self::INSTANTIATOR_TYPE_ARGUMENTS_REG),
            Role::preserved("function_type_arguments", Self::FUNCTION_TYPE_ARGUMENTS_REG),
            Role::preserved("dst_name", Self::DST_NAME_REG),
        ],
    );
    /// Every register of the contract.
    pub const ABI_REGISTERS: RegisterSet = Self::CONTRACT.used();
}

/// Static field initialisation stub.
#[derive(Debug, Clone, Copy)]
pub struct InitStaticFieldAbi;

impl InitStaticFieldAbi {
    /// Field.
    pub const FIELD_REG: Register = Register::R2;
    /// Initial value.
    pub const RESULT_REG: Register = Register::R0;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "InitStaticFieldAbi",
        &[
            Role::clobbered("field", Self::FIELD_REG),
            Role::clobbered("result", Self::RESULT_REG),
        ],
    );
}

/// Scratch registers of the late static field initialisation stub.
#[derive(Debug, Clone, Copy)]
pub struct InitLateStaticFieldInternalRegs;

impl InitLateStaticFieldInternalRegs {
    /// Address of the field.
    pub const ADDRESS_REG: Register = Register::R3;
    /// Scratch.
    pub const SCRATCH_REG: Register = Register::R4;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::internal(
        "InitLateStaticFieldInternalRegs",
        InitStaticFieldAbi::CONTRACT.name,
        RegisterSet::EMPTY,
        &[
            Role::clobbered("address", Self::ADDRESS_REG),
            Role::clobbered("scratch", Self::SCRATCH_REG),
        ],
    );
}

/// Instance field initialisation stub.
#[derive(Debug, Clone, Copy)]
pub struct InitInstanceFieldAbi;

impl InitInstanceFieldAbi {
    /// Instance owning the field.
    pub const INSTANCE_REG: Register = Register::R1;
    /// Field.
    pub const FIELD_REG: Register = Register::R2;
    /// Initial value.
    pub const RESULT_REG: Register = Register::R0;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "InitInstanceFieldAbi",
        &[
            Role::clobbered("instance", Self::INSTANCE_REG),
            Role::clobbered("field", Self::FIELD_REG),
            Role::clobbered("result", Self::RESULT_REG),
        ],
    );
}

/// Scratch registers of the late instance field initialisation stub.
#[derive(Debug, Clone, Copy)]
pub struct InitLateInstanceFieldInternalRegs;

impl InitLateInstanceFieldInternalRegs {
    /// Address of the field.
    pub const ADDRESS_REG: Register = Register::R3;
    /// Scratch.
    pub const SCRATCH_REG: Register = Register::R4;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::internal(
        "InitLateInstanceFieldInternalRegs",
        InitInstanceFieldAbi::CONTRACT.name,
        RegisterSet::EMPTY,
        &[
            Role::clobbered("address", Self::ADDRESS_REG),
            Role::clobbered("scratch", Self::SCRATCH_REG),
        ],
    );
}

/// Stubs throwing a late initialisation error.
#[derive(Debug, Clone, Copy)]
pub struct LateInitializationErrorAbi;

impl LateInitializationErrorAbi {
    /// Field.
    pub const FIELD_REG: Register = Register::R9;
    /// Contract.
    pub const CONTRACT: AbiContract =
        AbiContract::stub("LateInitializationErrorAbi", &[Role::clobbered("field", Self::FIELD_REG)]);
}

/// Stubs throwing a field access error.
#[derive(Debug, Clone, Copy)]
pub struct FieldAccessErrorAbi;

impl FieldAccessErrorAbi {
    /// Field.
    pub const FIELD_REG: Register = Register::R9;
    /// Contract.
    pub const CONTRACT: AbiContract =
        AbiContract::stub("FieldAccessErrorAbi", &[Role::clobbered("field", Self::FIELD_REG)]);
}

/// Throw stub.
#[derive(Debug, Clone, Copy)]
pub struct ThrowAbi;

impl ThrowAbi {
    /// Exception.
    pub const EXCEPTION_REG: Register = Register::R0;
    /// Contract.
    pub const CONTRACT: AbiContract =
        AbiContract::stub("ThrowAbi", &[Role::clobbered("exception", Self::EXCEPTION_REG)]);
}

/// Rethrow stub.
#[derive(Debug, Clone, Copy)]
pub struct ReThrowAbi;

impl ReThrowAbi {
    /// Exception.
    pub const EXCEPTION_REG: Register = Register::R0;
    /// Stack trace.
    pub const STACK_TRACE_REG: Register = Register::R1;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "ReThrowAbi",
        &[
            Role::clobbered("exception", Self::EXCEPTION_REG),
            Role::clobbered("stack_trace", Self::STACK_TRACE_REG),
        ],
    );
}

/// Range error stub.
#[derive(Debug, Clone, Copy)]
pub struct RangeErrorAbi;

impl RangeErrorAbi {
    /// Length of the indexed object.
    pub const LENGTH_REG: Register = Register::R0;
    /// Offending index.
    pub const INDEX_REG: Register = Register::R1;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "RangeErrorAbi",
        &[
            Role::clobbered("length", Self::LENGTH_REG),
            Role::clobbered("index", Self::INDEX_REG),
        ],
    );
}

/// Object allocation stub.
#[derive(Debug, Clone, Copy)]
pub struct AllocateObjectAbi;

impl AllocateObjectAbi {
    /// New object. Shared by every allocation stub.
    pub const RESULT_REG: Register = Register::R0;
    /// Type arguments of the new object.
    pub const TYPE_ARGUMENTS_REG: Register = Register::R1;
    /// Header tags.
    pub const TAGS_REG: Register = Register::R2;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "AllocateObjectAbi",
        &[
            Role::clobbered("result", Self::RESULT_REG),
            Role::clobbered("type_arguments", Self::TYPE_ARGUMENTS_REG),
            Role::clobbered("tags", Self::TAGS_REG),
        ],
    );
}

/// Closure allocation stub.
#[derive(Debug, Clone, Copy)]
pub struct AllocateClosureAbi;

impl AllocateClosureAbi {
    /// New closure.
    pub const RESULT_REG: Register = AllocateObjectAbi::RESULT_REG;
    /// Closure function.
    pub const FUNCTION_REG: Register = Register::R1;
    /// Captured context.
    pub const CONTEXT_REG: Register = Register::R2;
    /// Instantiator type arguments.
    pub const INSTANTIATOR_TYPE_ARGS_REG: Register = Register::R3;
    /// Scratch.
    pub const SCRATCH_REG: Register = Register::R4;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "AllocateClosureAbi",
        &[
            Role::clobbered("result", Self::RESULT_REG),
            Role::clobbered("function", Self::FUNCTION_REG),
            Role::clobbered("context", Self::CONTEXT_REG),
            Role::clobbered("instantiator_type_args", Self::INSTANTIATOR_TYPE_ARGS_REG),
            Role::clobbered("scratch", Self::SCRATCH_REG),
        ],
    );
}

/// Shared mint allocation stubs.
#[derive(Debug, Clone, Copy)]
pub struct AllocateMintAbi;

impl AllocateMintAbi {
    /// New mint.
    pub const RESULT_REG: Register = AllocateObjectAbi::RESULT_REG;
    /// Scratch.
    pub const TEMP_REG: Register = Register::R1;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "AllocateMintAbi",
        &[
            Role::clobbered("result", Self::RESULT_REG),
            Role::clobbered("temp", Self::TEMP_REG),
        ],
    );
}

/// Box allocation stubs (mint, double, `Float32x4`, `Float64x2`).
#[derive(Debug, Clone, Copy)]
pub struct AllocateBoxAbi;

impl AllocateBoxAbi {
    /// New box.
    pub const RESULT_REG: Register = AllocateObjectAbi::RESULT_REG;
    /// Scratch.
    pub const TEMP_REG: Register = Register::R1;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "AllocateBoxAbi",
        &[
            Role::clobbered("result", Self::RESULT_REG),
            Role::clobbered("temp", Self::TEMP_REG),
        ],
    );
}

/// Array allocation stub.
#[derive(Debug, Clone, Copy)]
pub struct AllocateArrayAbi;

impl AllocateArrayAbi {
    /// New array.
    pub const RESULT_REG: Register = AllocateObjectAbi::RESULT_REG;
    /// Length.
    pub const LENGTH_REG: Register = Register::R2;
    /// Element type arguments.
    pub const TYPE_ARGUMENTS_REG: Register = Register::R1;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "AllocateArrayAbi",
        &[
            Role::clobbered("result", Self::RESULT_REG),
            Role::clobbered("length", Self::LENGTH_REG),
            Role::clobbered("type_arguments", Self::TYPE_ARGUMENTS_REG),
        ],
    );
}

/// Record allocation stub.
#[derive(Debug, Clone, Copy)]
pub struct AllocateRecordAbi;

impl AllocateRecordAbi {
    /// New record.
    pub const RESULT_REG: Register = AllocateObjectAbi::RESULT_REG;
    /// Record shape.
    pub const SHAPE_REG: Register = Register::R1;
    /// First scratch.
    pub const TEMP1_REG: Register = Register::R2;
    /// Second scratch.
    pub const TEMP2_REG: Register = Register::R3;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "AllocateRecordAbi",
        &[
            Role::clobbered("result", Self::RESULT_REG),
            Role::clobbered("shape", Self::SHAPE_REG),
            Role::clobbered("temp1", Self::TEMP1_REG),
            Role::clobbered("temp2", Self::TEMP2_REG),
        ],
    );
}

/// Allocation stubs of records with two or three fields.
#[derive(Debug, Clone, Copy)]
pub struct AllocateSmallRecordAbi;

impl AllocateSmallRecordAbi {
    /// New record.
    pub const RESULT_REG: Register = AllocateObjectAbi::RESULT_REG;
    /// Record shape.
    pub const SHAPE_REG: Register = Register::R1;
    /// First field value.
    pub const VALUE0_REG: Register = Register::R2;
    /// Second field value.
    pub const VALUE1_REG: Register = Register::R3;
    /// Third field value.
    pub const VALUE2_REG: Register = Register::R4;
    /// Scratch.
    pub const TEMP_REG: Register = Register::R5;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "AllocateSmallRecordAbi",
        &[
            Role::clobbered("result", Self::RESULT_REG),
            Role::clobbered("shape", Self::SHAPE_REG),
            Role::clobbered("value0", Self::VALUE0_REG),
            Role::clobbered("value1", Self::VALUE1_REG),
            Role::clobbered("value2", Self::VALUE2_REG),
            Role::clobbered("temp", Self::TEMP_REG),
        ],
    );
}

/// Typed data array allocation stub.
#[derive(Debug, Clone, Copy)]
pub struct AllocateTypedDataArrayAbi;

impl AllocateTypedDataArrayAbi {
    /// New array.
    pub const RESULT_REG: Register = AllocateObjectAbi::RESULT_REG;
    /// Length.
    pub const LENGTH_REG: Register = Register::R4;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "AllocateTypedDataArrayAbi",
        &[
            Role::clobbered("result", Self::RESULT_REG),
            Role::clobbered("length", Self::LENGTH_REG),
        ],
    );
}

/// Double boxing stub.
#[derive(Debug, Clone, Copy)]
pub struct BoxDoubleStubAbi;

impl BoxDoubleStubAbi {
    /// Unboxed value.
    pub const VALUE_REG: VRegister = VRegister::V0;
    /// Scratch.
    pub const TEMP_REG: Register = Register::R1;
    /// Boxed value.
    pub const RESULT_REG: Register = Register::R0;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "BoxDoubleStubAbi",
        &[
            Role::fpu("value", Self::VALUE_REG),
            Role::clobbered("temp", Self::TEMP_REG),
            Role::clobbered("result", Self::RESULT_REG),
        ],
    );
}

/// Double to integer conversion stub.
#[derive(Debug, Clone, Copy)]
pub struct DoubleToIntegerStubAbi;

impl DoubleToIntegerStubAbi {
    /// Input double.
    pub const INPUT_REG: VRegister = VRegister::V0;
    /// Recognized rounding method.
    pub const RECOGNIZED_KIND_REG: Register = Register::R0;
    /// Integer result.
    pub const RESULT_REG: Register = Register::R0;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "DoubleToIntegerStubAbi",
        &[
            Role::fpu("input", Self::INPUT_REG),
            Role::clobbered("recognized_kind", Self::RECOGNIZED_KIND_REG),
            Role::clobbered("result", Self::RESULT_REG),
        ],
    )
    .with_aliases(&[("recognized_kind", "result")]);
}

/// Suspend stubs (await, yield, sync* suspension points).
#[derive(Debug, Clone, Copy)]
pub struct SuspendStubAbi;

impl SuspendStubAbi {
    /// Awaited or yielded value.
    pub const ARGUMENT_REG: Register = Register::R0;
    /// Type arguments; may share the scratch register.
    pub const TYPE_ARGS_REG: Register = Register::R1;
    /// Scratch.
    pub const TEMP_REG: Register = Register::R1;
    /// Frame size.
    pub const FRAME_SIZE_REG: Register = Register::R2;
    /// Suspend state object.
    pub const SUSPEND_STATE_REG: Register = Register::R3;
    /// Function data.
    pub const FUNCTION_DATA_REG: Register = Register::R4;
    /// Frame copy source.
    pub const SRC_FRAME_REG: Register = Register::R5;
    /// Frame copy destination.
    pub const DST_FRAME_REG: Register = Register::R6;
    /// Bytes skipped after the return address to resume.
    pub const RESUME_PC_DISTANCE: usize = 0;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "SuspendStubAbi",
        &[
            Role::clobbered("argument", Self::ARGUMENT_REG),
            Role::clobbered("type_args", Self::TYPE_ARGS_REG),
            Role::clobbered("temp", Self::TEMP_REG),
            Role::clobbered("frame_size", Self::FRAME_SIZE_REG),
            Role::clobbered("suspend_state", Self::SUSPEND_STATE_REG),
            Role::clobbered("function_data", Self::FUNCTION_DATA_REG),
            Role::clobbered("src_frame", Self::SRC_FRAME_REG),
            Role::clobbered("dst_frame", Self::DST_FRAME_REG),
        ],
    )
    .with_aliases(&[("type_args", "temp")]);
}

/// Stubs initialising async, async* and sync* functions.
#[derive(Debug, Clone, Copy)]
pub struct InitSuspendableFunctionStubAbi;

impl InitSuspendableFunctionStubAbi {
    /// Type arguments.
    pub const TYPE_ARGS_REG: Register = Register::R0;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "InitSuspendableFunctionStubAbi",
        &[Role::clobbered("type_args", Self::TYPE_ARGS_REG)],
    );
}

/// Resume stub.
///
/// Copies the frame first, then transfers control; the second phase reuses
/// registers of the first.
#[derive(Debug, Clone, Copy)]
pub struct ResumeStubAbi;

impl ResumeStubAbi {
    /// Suspend state object.
    pub const SUSPEND_STATE_REG: Register = Register::R2;
    /// Scratch.
    pub const TEMP_REG: Register = Register::R0;
    /// Frame size.
    pub const FRAME_SIZE_REG: Register = Register::R1;
    /// Frame copy source.
    pub const SRC_FRAME_REG: Register = Register::R3;
    /// Frame copy destination.
    pub const DST_FRAME_REG: Register = Register::R4;
    /// Resume address.
    pub const RESUME_PC_REG: Register = Register::R1;
    /// Exception to rethrow on resumption. Must not be `CODE_REG` or `PP`.
    pub const EXCEPTION_REG: Register = Register::R3;
    /// Stack trace of the exception.
    pub const STACK_TRACE_REG: Register = Register::R4;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "ResumeStubAbi",
        &[
            Role::clobbered("suspend_state", Self::SUSPEND_STATE_REG),
            Role::clobbered("temp", Self::TEMP_REG),
            Role::clobbered("frame_size", Self::FRAME_SIZE_REG),
            Role::clobbered("src_frame", Self::SRC_FRAME_REG),
            Role::clobbered("dst_frame", Self::DST_FRAME_REG),
            Role::clobbered("resume_pc", Self::RESUME_PC_REG),
            Role::clobbered("exception", Self::EXCEPTION_REG),
            Role::clobbered("stack_trace", Self::STACK_TRACE_REG),
        ],
    )
    .with_aliases(&[
        ("frame_size", "resume_pc"),
        ("src_frame", "exception"),
        ("dst_frame", "stack_trace"),
    ]);
}

/// Return stubs of async and async* functions.
#[derive(Debug, Clone, Copy)]
pub struct ReturnStubAbi;

impl ReturnStubAbi {
    /// Suspend state object.
    pub const SUSPEND_STATE_REG: Register = Register::R2;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "ReturnStubAbi",
        &[Role::clobbered("suspend_state", Self::SUSPEND_STATE_REG)],
    );
}

/// Async exception handler stub.
#[derive(Debug, Clone, Copy)]
pub struct AsyncExceptionHandlerStubAbi;

impl AsyncExceptionHandlerStubAbi {
    /// Suspend state object.
    pub const SUSPEND_STATE_REG: Register = Register::R2;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "AsyncExceptionHandlerStubAbi",
        &[Role::clobbered("suspend_state", Self::SUSPEND_STATE_REG)],
    );
}

/// Suspend state cloning stub.
#[derive(Debug, Clone, Copy)]
pub struct CloneSuspendStateStubAbi;

impl CloneSuspendStateStubAbi {
    /// State to clone.
    pub const SOURCE_REG: Register = Register::R0;
    /// Clone.
    pub const DESTINATION_REG: Register = Register::R1;
    /// Scratch.
    pub const TEMP_REG: Register = Register::R2;
    /// Frame size.
    pub const FRAME_SIZE_REG: Register = Register::R3;
    /// Frame copy source.
    pub const SRC_FRAME_REG: Register = Register::R4;
    /// Frame copy destination.
    pub const DST_FRAME_REG: Register = Register::R5;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "CloneSuspendStateStubAbi",
        &[
            Role::clobbered("source", Self::SOURCE_REG),
            Role::clobbered("destination", Self::DESTINATION_REG),
            Role::clobbered("temp", Self::TEMP_REG),
            Role::clobbered("frame_size", Self::FRAME_SIZE_REG),
            Role::clobbered("src_frame", Self::SRC_FRAME_REG),
            Role::clobbered("dst_frame", Self::DST_FRAME_REG),
        ],
    );
}

/// Stub sending the arguments of an async FFI callback.
#[derive(Debug, Clone, Copy)]
pub struct FfiAsyncCallbackSendStubAbi;

impl FfiAsyncCallbackSendStubAbi {
    /// Arguments message.
    pub const ARGS_REG: Register = Register::R0;
    /// Contract.
    pub const CONTRACT: AbiContract =
        AbiContract::stub("FfiAsyncCallbackSendStubAbi", &[Role::clobbered("args", Self::ARGS_REG)]);
}

/// Null error raised by dispatch table calls.
///
/// Every dispatch table call passes the class id here so a null receiver can
/// be told apart from memory corruption.
#[derive(Debug, Clone, Copy)]
pub struct DispatchTableNullErrorAbi;

impl DispatchTableNullErrorAbi {
    /// Receiver class id.
    pub const CLASS_ID_REG: Register = Register::R0;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "DispatchTableNullErrorAbi",
        &[Role::clobbered("class_id", Self::CLASS_ID_REG)],
    );
}

/// Write barrier stub.
#[derive(Debug, Clone, Copy)]
pub struct WriteBarrierAbi;

impl WriteBarrierAbi {
    /// Object written into.
    pub const OBJECT_REG: Register = Register::R1;
    /// Stored value.
    pub const VALUE_REG: Register = Register::R0;
    /// Address of the written slot, for array stores.
    pub const SLOT_REG: Register = Register::R25;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "WriteBarrierAbi",
        &[
            Role::preserved("object", Self::OBJECT_REG),
            Role::preserved("value", Self::VALUE_REG),
            Role::preserved("slot", Self::SLOT_REG),
        ],
    );
}

/// Registers holding the exception on entry to a catch block.
#[derive(Debug, Clone, Copy)]
pub struct CatchEntryAbi;

impl CatchEntryAbi {
    /// Exception object.
    pub const EXCEPTION_REG: Register = EXCEPTION_OBJECT_REG;
    /// Stack trace object.
    pub const STACK_TRACE_REG: Register = STACK_TRACE_OBJECT_REG;
    /// Contract.
    pub const CONTRACT: AbiContract = AbiContract::stub(
        "CatchEntryAbi",
        &[
            Role::clobbered("exception", Self::EXCEPTION_REG),
            Role::clobbered("stack_trace", Self::STACK_TRACE_REG),
        ],
    );
}

/// Every built-in contract. Outer contracts precede their internal layers.
pub const BUILTIN_CONTRACTS: &[AbiContract] = &[
    SharedSlowPathStubAbi::CONTRACT,
    InstantiationAbi::CONTRACT,
    InstantiateTavInternalRegs::CONTRACT,
    TypeTestAbi::CONTRACT,
    TtsInternalRegs::CONTRACT,
    StcInternalRegs::CONTRACT,
    AssertSubtypeAbi::CONTRACT,
    InitStaticFieldAbi::CONTRACT,
    InitLateStaticFieldInternalRegs::CONTRACT,
    InitInstanceFieldAbi::CONTRACT,
    InitLateInstanceFieldInternalRegs::CONTRACT,
    LateInitializationErrorAbi::CONTRACT,
    FieldAccessErrorAbi::CONTRACT,
    ThrowAbi::CONTRACT,
    ReThrowAbi::CONTRACT,
    RangeErrorAbi::CONTRACT,
    AllocateObjectAbi::CONTRACT,
    AllocateClosureAbi::CONTRACT,
    AllocateMintAbi::CONTRACT,
    AllocateBoxAbi::CONTRACT,
    AllocateArrayAbi::CONTRACT,
    AllocateRecordAbi::CONTRACT,
    AllocateSmallRecordAbi::CONTRACT,
    AllocateTypedDataArrayAbi::CONTRACT,
    BoxDoubleStubAbi::CONTRACT,
    DoubleToIntegerStubAbi::CONTRACT,
    SuspendStubAbi::CONTRACT,
    InitSuspendableFunctionStubAbi::CONTRACT,
    ResumeStubAbi::CONTRACT,
    ReturnStubAbi::CONTRACT,
    AsyncExceptionHandlerStubAbi::CONTRACT,
    CloneSuspendStateStubAbi::CONTRACT,
    FfiAsyncCallbackSendStubAbi::CONTRACT,
    DispatchTableNullErrorAbi::CONTRACT,
    WriteBarrierAbi::CONTRACT,
    CatchEntryAbi::CONTRACT,
];

/// Finds a built-in contract by name.
pub const fn builtin_contract(name: &str) -> Option<&'static AbiContract> {
    let mut i = 0;
    while i < BUILTIN_CONTRACTS.len() {
        if str_eq(BUILTIN_CONTRACTS[i].name, name) {
            return Some(&BUILTIN_CONTRACTS[i]);
        }
        i += 1;
    }
    None
}

const fn builtin_contracts_are_well_formed() -> bool {
    let mut i = 0;
    while i < BUILTIN_CONTRACTS.len() {
        let contract = &BUILTIN_CONTRACTS[i];
        let outer = match contract.outer() {
            Some(name) => builtin_contract(name),
            None => None,
        };
        if !contract.is_well_formed(RESERVED_CPU_REGISTERS, outer) {
            return false;
        }
        let mut j = i + 1;
        while j < BUILTIN_CONTRACTS.len() {
            if str_eq(contract.name, BUILTIN_CONTRACTS[j].name) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(builtin_contracts_are_well_formed());
const _: () = assert!(TtsInternalRegs::INTERNAL_REGISTERS.is_disjoint(TypeTestAbi::PRESERVED_ABI_REGISTERS));
const _: () = assert!(StcInternalRegs::INTERNAL_REGISTERS.is_disjoint(TypeTestAbi::PRESERVED_ABI_REGISTERS));
const _: () = assert!(
    InstantiateTavInternalRegs::CONTRACT
        .internal_registers()
        .is_disjoint(InstantiationAbi::CONTRACT.preserved())
);
const _: () = assert!(TypeTestAbi::ABI_REGISTERS.contains(TypeTestAbi::SUBTYPE_TEST_CACHE_RESULT_REG));
const _: () = assert!(
    !RegisterSet::of(&[
        TypeTestAbi::INSTANCE_REG,
        TypeTestAbi::DST_TYPE_REG,
        TypeTestAbi::INSTANTIATOR_TYPE_ARGUMENTS_REG,
        TypeTestAbi::FUNCTION_TYPE_ARGUMENTS_REG,
        TypeTestAbi::SUBTYPE_TEST_CACHE_REG,
        TypeTestAbi::SCRATCH_REG,
    ])
    .contains(TypeTestAbi::SUBTYPE_TEST_CACHE_RESULT_REG)
);
