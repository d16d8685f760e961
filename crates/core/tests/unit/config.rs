//! Configuration Loading Tests.

use arm64_vm_core::config::Config;
use arm64_vm_core::isa::condition::ScaleFactor;
use arm64_vm_core::isa::registers::DISPATCH_TABLE_REG;
use arm64_vm_core::TargetOs;
use arm64_vm_core::common::error::ConfigError;

use crate::common::init_tracing;

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.target.os, TargetOs::Linux);
    assert!(!config.codegen.compressed_pointers);
    assert!(config.codegen.use_dispatch_table);
    assert_eq!(config.codegen.loop_alignment, None);
    assert_eq!(config.dispatch_table_register(), Some(DISPATCH_TABLE_REG));
    assert_eq!(config.word_scale(), ScaleFactor::Times8);
    assert_eq!(config.target_abi().preferred_loop_alignment, 32);
}

/// An empty document and one with empty sections give the defaults.
#[test]
fn empty_sections() {
    init_tracing();
    for json in ["{}", r#"{ "target": {}, "codegen": {} }"#] {
        let config = Config::from_json(json).unwrap();
        assert_eq!(config.target.os, TargetOs::Linux);
        assert!(config.codegen.use_dispatch_table);
    }
}

#[test]
fn full_document() {
    init_tracing();
    let json = r#"{
        "target": { "os": "fuchsia" },
        "codegen": {
            "compressed_pointers": true,
            "use_dispatch_table": false,
            "loop_alignment": 16
        }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.target.os, TargetOs::Fuchsia);
    assert_eq!(config.word_scale(), ScaleFactor::Times4);
    assert_eq!(config.dispatch_table_register(), None);

    let abi = config.target_abi();
    assert_eq!(abi.os, TargetOs::Fuchsia);
    assert_eq!(abi.preferred_loop_alignment, 16);
    assert_eq!(abi.abi_preserved_cpu_reg_count(), 11);
}

#[test]
fn rejects_bad_documents() {
    assert!(matches!(
        Config::from_json(r#"{ "target": { "os": "beos" } }"#),
        Err(ConfigError::Parse(_))
    ));
    assert!(Config::from_json(r#"{ "codegen": { "loop_alignment": -1 } }"#).is_err());
    assert!(Config::from_json("not json").is_err());
}
