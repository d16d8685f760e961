//! Contract Catalogue Tests.
//!
//! New stub contracts are validated on insertion. Each rejection below
//! exercises one partitioning rule; the catalogue must be unchanged after it.

use arm64_vm_core::abi::stubs::BUILTIN_CONTRACTS;
use arm64_vm_core::abi::{AbiCatalogue, AbiContract, Role};
use arm64_vm_core::common::error::AbiError;
use arm64_vm_core::isa::registers::{Register, THR};
use arm64_vm_core::isa::regset::{RESERVED_CPU_REGISTERS, RegisterSet};
use pretty_assertions::assert_eq;

use crate::common::init_tracing;

const LOOKUP_ROLES: &[Role] = &[
    Role::preserved("receiver", Register::R0),
    Role::clobbered("selector", Register::R5),
    Role::clobbered("result", Register::R1),
];

const THREAD_ROLES: &[Role] = &[Role::clobbered("thread", THR)];

const SHARED_ROLES: &[Role] = &[
    Role::clobbered("lhs", Register::R2),
    Role::clobbered("rhs", Register::R2),
];

const SCRATCH_ON_DST_TYPE: &[Role] = &[Role::clobbered("scratch", Register::R8)];

const KEPT_ROLES: &[Role] = &[Role::preserved("kept", Register::R9)];

/// Asserts that inserting `contract` fails with `expected` and changes nothing.
fn assert_rejected(catalogue: &mut AbiCatalogue, contract: AbiContract, expected: &AbiError) {
    let before = catalogue.len();
    assert_eq!(catalogue.insert(contract).as_ref(), Err(expected));
    assert_eq!(catalogue.len(), before);
}

#[test]
fn builtin_catalogue() {
    init_tracing();
    let catalogue = AbiCatalogue::default();
    assert_eq!(catalogue.len(), BUILTIN_CONTRACTS.len());
    assert_eq!(catalogue.reserved(), RESERVED_CPU_REGISTERS);
    assert_eq!(catalogue.validate_all(), Ok(()));
    assert!(catalogue.get("TypeTestAbi").is_some());
    let names: Vec<_> = (&catalogue).into_iter().map(|c| c.name).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[test]
fn insert_valid_contract() {
    init_tracing();
    let mut catalogue = AbiCatalogue::builtin();
    let contract = AbiContract::stub("MegamorphicLookupAbi", LOOKUP_ROLES);
    assert_eq!(catalogue.insert(contract), Ok(()));
    assert_eq!(catalogue.get("MegamorphicLookupAbi"), Some(&contract));
    assert_eq!(catalogue.validate_all(), Ok(()));
}

#[test]
fn rejects_each_rule() {
    init_tracing();
    let mut catalogue = AbiCatalogue::builtin();

    assert_rejected(
        &mut catalogue,
        AbiContract::stub("KeptAndClobbered", KEPT_ROLES).with_extra_clobbered(RegisterSet::of(&[Register::R9])),
        &AbiError::PreservedAndClobbered {
            contract: "KeptAndClobbered",
            register: "r9".to_string(),
        },
    );
    assert_rejected(
        &mut catalogue,
        AbiContract::stub("UsesThread", THREAD_ROLES),
        &AbiError::ReservedRegister {
            contract: "UsesThread",
            role: "thread",
            register: "thr".to_string(),
        },
    );
    assert_rejected(
        &mut catalogue,
        AbiContract::stub("ClobbersPoolPointer", &[]).with_extra_clobbered(RegisterSet::of(&[Register::R27])),
        &AbiError::ReservedRegister {
            contract: "ClobbersPoolPointer",
            role: "extra clobbered",
            register: "pp".to_string(),
        },
    );
    assert_rejected(
        &mut catalogue,
        AbiContract::stub("SharesR2", SHARED_ROLES),
        &AbiError::UndeclaredAlias {
            contract: "SharesR2",
            first: "lhs",
            second: "rhs",
            register: "r2".to_string(),
        },
    );
    assert_rejected(
        &mut catalogue,
        AbiContract::internal("BadTtsScratch", "TypeTestAbi", RegisterSet::EMPTY, SCRATCH_ON_DST_TYPE),
        &AbiError::InternalOverlapsPreserved {
            contract: "BadTtsScratch",
            outer: "TypeTestAbi",
            register: "r8".to_string(),
        },
    );
    assert_rejected(
        &mut catalogue,
        AbiContract::internal("Orphan", "NoSuchAbi", RegisterSet::EMPTY, SCRATCH_ON_DST_TYPE),
        &AbiError::UnknownOuterContract {
            contract: "Orphan",
            outer: "NoSuchAbi",
        },
    );
    assert_rejected(
        &mut catalogue,
        AbiContract::stub("ThrowAbi", LOOKUP_ROLES),
        &AbiError::DuplicateContract { contract: "ThrowAbi" },
    );
}

/// The documented escapes from the rules.
#[test]
fn declared_exceptions_are_accepted() {
    let mut catalogue = AbiCatalogue::builtin();
    assert_eq!(
        catalogue.insert(AbiContract::stub("SharesR2", SHARED_ROLES).with_aliases(&[("rhs", "lhs")])),
        Ok(())
    );
    assert_eq!(
        catalogue.insert(
            AbiContract::stub("UsesThread", THREAD_ROLES).with_reserved_reuse(RegisterSet::of(&[THR]))
        ),
        Ok(())
    );
    assert_eq!(
        catalogue.insert(AbiContract::internal(
            "SavedTtsScratch",
            "TypeTestAbi",
            RegisterSet::of(&[Register::R8]),
            SCRATCH_ON_DST_TYPE,
        )),
        Ok(())
    );
    assert_eq!(catalogue.validate_all(), Ok(()));
}

/// Internal layers need their outer contract in the catalogue first.
#[test]
fn outer_before_inner() {
    let mut catalogue = AbiCatalogue::new(RESERVED_CPU_REGISTERS);
    assert!(catalogue.is_empty());
    let inner = AbiContract::internal("Scratch", "Lookup", RegisterSet::EMPTY, KEPT_ROLES);
    assert!(matches!(
        catalogue.insert(inner),
        Err(AbiError::UnknownOuterContract { outer: "Lookup", .. })
    ));
    assert_eq!(catalogue.insert(AbiContract::stub("Lookup", LOOKUP_ROLES)), Ok(()));
    assert_eq!(catalogue.insert(inner), Ok(()));
    assert_eq!(catalogue.len(), 2);
}

#[test]
fn contracts_clobbering() {
    let catalogue = AbiCatalogue::builtin();
    let names: Vec<_> = catalogue.contracts_clobbering(Register::R0).map(|c| c.name).collect();
    assert!(names.contains(&"SharedSlowPathStubAbi"));
    assert!(!names.contains(&"WriteBarrierAbi"));
    assert!(!names.contains(&"TypeTestAbi"));
    assert_eq!(catalogue.contracts_clobbering(THR).count(), 0);
}
