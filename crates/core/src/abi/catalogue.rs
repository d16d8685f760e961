//! Name-keyed table of stub contracts.
//!
//! The built-in contracts are checked at build time. Contracts for new stub
//! variants go through [`AbiCatalogue::insert`], which applies the same rules
//! against the reserved set and the contract's outer layer before accepting it.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::abi::contract::AbiContract;
use crate::abi::stubs::BUILTIN_CONTRACTS;
use crate::common::error::AbiError;
use crate::isa::registers::Register;
use crate::isa::regset::{RESERVED_CPU_REGISTERS, RegisterSet};

/// Extensible set of ABI contracts, keyed by stub name.
#[derive(Debug, Clone)]
pub struct AbiCatalogue {
    contracts: BTreeMap<&'static str, AbiContract>,
    reserved: RegisterSet,
}

impl AbiCatalogue {
    /// An empty catalogue checking against `reserved`.
    pub const fn new(reserved: RegisterSet) -> Self {
        Self {
            contracts: BTreeMap::new(),
            reserved,
        }
    }

    /// The catalogue of built-in stub contracts.
    pub fn builtin() -> Self {
        let mut contracts = BTreeMap::new();
        for contract in BUILTIN_CONTRACTS {
            let _ = contracts.insert(contract.name, *contract);
        }
        debug!(contracts = contracts.len(), "built-in ABI catalogue");
        Self {
            contracts,
            reserved: RESERVED_CPU_REGISTERS,
        }
    }

    /// Reserved registers contracts are checked against.
    pub const fn reserved(&self) -> RegisterSet {
        self.reserved
    }

    /// Validates and adds `contract`.
    ///
    /// # Errors
    ///
    /// Fails if the name is taken, the outer contract of an internal layer is
    /// missing, or the contract breaks a partitioning rule. The catalogue is
    /// unchanged on failure.
    pub fn insert(&mut self, contract: AbiContract) -> Result<(), AbiError> {
        let result = self.check(&contract);
        match &result {
            Ok(()) => {
                debug!(
                    contract = contract.name,
                    preserved = contract.preserved().len(),
                    clobbered = contract.clobbered().len(),
                    "add ABI contract"
                );
                let _ = self.contracts.insert(contract.name, contract);
            }
            Err(err) => warn!(contract = contract.name, %err, "reject ABI contract"),
        }
        result
    }

    fn check(&self, contract: &AbiContract) -> Result<(), AbiError> {
        if self.contracts.contains_key(contract.name) {
            return Err(AbiError::DuplicateContract {
                contract: contract.name,
            });
        }
        let outer = match contract.outer() {
            Some(name) => Some(self.get(name).ok_or(AbiError::UnknownOuterContract {
                contract: contract.name,
                outer: name,
            })?),
            None => None,
        };
        contract.validate(self.reserved, outer)
    }

    /// Looks up a contract by name.
    pub fn get(&self, name: &str) -> Option<&AbiContract> {
        self.contracts.get(name)
    }

    /// Iterates the contracts in name order.
    pub fn iter(&self) -> impl Iterator<Item = &AbiContract> {
        self.contracts.values()
    }

    /// Number of contracts.
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Returns whether the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Re-checks every contract.
    ///
    /// # Errors
    ///
    /// Returns the first violation, in name order.
    pub fn validate_all(&self) -> Result<(), AbiError> {
        for contract in self.contracts.values() {
            let outer = match contract.outer() {
                Some(name) => Some(self.get(name).ok_or(AbiError::UnknownOuterContract {
                    contract: contract.name,
                    outer: name,
                })?),
                None => None,
            };
            contract.validate(self.reserved, outer)?;
        }
        Ok(())
    }

    /// Contracts whose stubs may overwrite `reg`.
    pub fn contracts_clobbering(&self, reg: Register) -> impl Iterator<Item = &AbiContract> {
        self.iter().filter(move |c| c.clobbered().contains(reg))
    }
}

impl Default for AbiCatalogue {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a AbiCatalogue {
    type Item = &'a AbiContract;
    type IntoIter = std::collections::btree_map::Values<'a, &'static str, AbiContract>;

    fn into_iter(self) -> Self::IntoIter {
        self.contracts.values()
    }
}
