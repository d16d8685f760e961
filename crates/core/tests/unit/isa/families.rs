//! Family Membership and Sub-Operation Tests.
//!
//! Classifies known instruction words, checks that sibling families reject
//! them, and that every declared sub-operation identifies its own pattern.

use arm64_vm_core::isa::families::Family;
use arm64_vm_core::isa::ops::{self, SubOp};
use arm64_vm_core::isa::ops::dp_immediate::{add_sub_imm, logical_imm};
use arm64_vm_core::isa::ops::dp_register::{add_sub_shift_ext, logical_shift};
use arm64_vm_core::isa::ops::load_store::{atomic_memory, load_store_reg};
use rstest::rstest;

/// Known words land in the most specific family.
#[rstest]
#[case(0x9100_0420, Family::AddSubImm)] // add x0, x1, #1
#[case(0xB240_1FE0, Family::LogicalImm)] // mov x0, #0xff
#[case(0xD280_0020, Family::MoveWide)] // movz x0, #1
#[case(0x1000_0040, Family::PcRel)] // adr x0, #8
#[case(0x8B02_0C20, Family::AddSubShiftExt)] // add x0, x1, x2, lsl #3
#[case(0xAA01_03E0, Family::LogicalShift)] // mov x0, x1
#[case(0x9A82_0020, Family::ConditionalSelect)] // csel x0, x1, x2, eq
#[case(0x9AC2_0C20, Family::MiscDp2Source)] // sdiv x0, x1, x2
#[case(0x9B02_7C20, Family::MiscDp3Source)] // mul x0, x1, x2
#[case(0xF940_0441, Family::LoadStoreReg)] // ldr x1, [x2, #8]
#[case(0xA9BF_7BFD, Family::LoadStoreRegPair)] // stp fp, lr, [csp, #-16]!
#[case(0x5800_0040, Family::LoadRegLiteral)] // ldr x0, .+8
#[case(0x1400_0002, Family::UnconditionalBranch)] // b .+8
#[case(0x5400_0041, Family::ConditionalBranch)] // b.ne .+8
#[case(0xB400_0040, Family::CompareAndBranch)] // cbz x0, .+8
#[case(0x3718_0040, Family::TestAndBranch)] // tbnz w0, #3, .+8
#[case(0xD65F_03C0, Family::UnconditionalBranchReg)] // ret
#[case(0xD420_0000, Family::ExceptionGen)] // brk #0
#[case(0xD503_201F, Family::System)] // nop
#[case(0x1E6E_1000, Family::FpImm)] // fmov d0, #1.0
#[case(0x1E62_2820, Family::FpTwoSource)] // fadd d0, d1, d2
#[case(0x1E61_2000, Family::FpCompare)] // fcmp d0, d1
#[case(0x9E78_0020, Family::FpIntCvt)] // fcvtzs x0, d1
#[case(0x4EA2_8420, Family::SimdThreeSame)] // add v0.4s, v1.4s, v2.4s
fn classify_known_words(#[case] word: u32, #[case] family: Family) {
    assert_eq!(Family::classify(word), Some(family), "{word:#010x}");
    assert!(family.matches(word));
    if let Some(group) = family.group() {
        assert!(group.matches(word), "{word:#010x} outside group {}", group.name());
    }
}

/// The add/sub register word is rejected by every sibling family.
#[test]
fn siblings_reject_add_register() {
    let word = 0x0B02_0020; // add w0, w1, w2
    assert!(Family::AddSubShiftExt.matches(word));
    for sibling in Family::DpRegister.members() {
        if sibling != Family::AddSubShiftExt {
            assert!(!sibling.matches(word), "{} accepts {word:#010x}", sibling.name());
        }
    }
    assert_eq!(Family::classify_group(word), Some(Family::DpRegister));
}

/// Atomic memory operations are told apart from plain loads and stores.
#[test]
fn atomics_beat_load_store_register() {
    let ldset = atomic_memory::LDSET.bits() | 0xC000_0000;
    assert!(Family::LoadStoreReg.matches(ldset));
    assert_eq!(Family::classify(ldset), Some(Family::AtomicMemory));
    assert_eq!(ops::identify(ldset), Some(atomic_memory::LDSET));
}

/// Words outside every family are unclassified.
#[test]
fn unallocated_words() {
    assert_eq!(Family::classify(0), None);
    assert_eq!(Family::classify_group(0), None);
    assert_eq!(ops::identify(0), None);
}

/// Each family's members carry it as their group.
#[test]
fn groups_and_members() {
    for &family in Family::ALL {
        if family.is_group() {
            assert!(family.has_members());
            assert!(family.members().all(|m| m.group() == Some(family)));
        } else {
            assert!(family.group().is_some(), "{} has no group", family.name());
        }
    }
}

/// Every sub-operation identifies its own pattern and no sibling's.
#[test]
fn sub_operations_are_distinct() {
    for &family in Family::ALL {
        let subs: &[SubOp] = ops::sub_operations(family);
        for op in subs {
            assert_eq!(op.family(), family);
            assert!(op.in_family(op.bits()));
            assert!(op.matches(op.bits()), "{op:?}");
            for other in subs {
                if other != op {
                    assert!(!other.matches(op.bits()), "{other:?} matches {op:?}");
                }
            }
        }
    }
}

/// Family membership alone cannot tell siblings apart; `matches` can.
#[test]
fn in_family_versus_matches() {
    let orr = logical_shift::ORR.bits();
    assert!(logical_shift::AND.in_family(orr));
    assert!(!logical_shift::AND.matches(orr));
    assert!(add_sub_imm::SUBI.matches(add_sub_imm::SUBI.bits() | 0x8000_0000));
    assert_eq!(ops::identify(0xB240_1FE0), Some(logical_imm::ORRI));
    assert_eq!(ops::identify(0x0B02_0020), Some(add_sub_shift_ext::ADD));
    assert_eq!(format!("{:?}", load_store_reg::LDR), "LoadStoreReg::LDR");
    assert_eq!(load_store_reg::LDR.to_string(), "LDR");
}
