//! Register-role contracts of the hand-written stubs.
//!
//! An [`AbiContract`] names every register a stub reads, writes or keeps, and
//! says whether the caller may rely on it after the call. Stub contracts stand
//! alone; internal contracts describe scratch registers a stub uses on top of
//! an outer contract, minus the ones it saves around their use.
//!
//! Everything here is `const` so contracts can be checked at build time; the
//! same rules are available at run time through [`AbiContract::validate`] for
//! contracts added later.

use crate::common::error::AbiError;
use crate::isa::registers::{Register, VRegister};
use crate::isa::regset::{RegisterSet, VRegisterSet};

/// Register a role is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleRegister {
    /// General-purpose register.
    Cpu(Register),
    /// Vector register.
    Fpu(VRegister),
}

impl RoleRegister {
    const fn same_as(self, other: Self) -> bool {
        match (self, other) {
            (Self::Cpu(a), Self::Cpu(b)) => a.id() == b.id(),
            (Self::Fpu(a), Self::Fpu(b)) => a.encoding() == b.encoding(),
            _ => false,
        }
    }
}

impl std::fmt::Display for RoleRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpu(reg) => reg.fmt(f),
            Self::Fpu(reg) => reg.fmt(f),
        }
    }
}

/// One named register of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Role {
    /// Role name, e.g. `result` or `scratch`.
    pub name: &'static str,
    /// Assigned register.
    pub location: RoleRegister,
    /// Whether the register holds the same value after the call.
    pub preserved: bool,
}

impl Role {
    /// A general-purpose register the stub leaves intact.
    pub const fn preserved(name: &'static str, reg: Register) -> Self {
        Self {
            name,
            location: RoleRegister::Cpu(reg),
            preserved: true,
        }
    }

    /// A general-purpose register the stub may overwrite.
    pub const fn clobbered(name: &'static str, reg: Register) -> Self {
        Self {
            name,
            location: RoleRegister::Cpu(reg),
            preserved: false,
        }
    }

    /// A vector register the stub may overwrite.
    pub const fn fpu(name: &'static str, reg: VRegister) -> Self {
        Self {
            name,
            location: RoleRegister::Fpu(reg),
            preserved: false,
        }
    }
}

/// Whether a contract stands alone or extends another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractKind {
    /// Calling contract of a stub.
    Stub,
    /// Registers used inside a stub in addition to its outer contract.
    Internal {
        /// Name of the outer contract.
        outer: &'static str,
        /// Registers saved and restored around their internal use.
        saved: RegisterSet,
    },
}

/// Register contract of a stub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbiContract {
    /// Unique name, used as the catalogue key.
    pub name: &'static str,
    /// Stub or internal layer.
    pub kind: ContractKind,
    /// Named registers.
    pub roles: &'static [Role],
    /// Clobbered registers that carry no role of their own.
    pub extra_clobbered: RegisterSet,
    /// Role pairs allowed to share a register.
    pub aliases: &'static [(&'static str, &'static str)],
    /// Reserved registers this contract is allowed to use, in their usual role.
    pub reserved_reuse: RegisterSet,
}

impl AbiContract {
    /// A stub contract.
    pub const fn stub(name: &'static str, roles: &'static [Role]) -> Self {
        Self {
            name,
            kind: ContractKind::Stub,
            roles,
            extra_clobbered: RegisterSet::EMPTY,
            aliases: &[],
            reserved_reuse: RegisterSet::EMPTY,
        }
    }

    /// An internal contract layered on `outer`.
    pub const fn internal(
        name: &'static str,
        outer: &'static str,
        saved: RegisterSet,
        roles: &'static [Role],
    ) -> Self {
        Self {
            name,
            kind: ContractKind::Internal { outer, saved },
            roles,
            extra_clobbered: RegisterSet::EMPTY,
            aliases: &[],
            reserved_reuse: RegisterSet::EMPTY,
        }
    }

    /// Adds clobbered registers that have no role.
    #[must_use]
    pub const fn with_extra_clobbered(mut self, regs: RegisterSet) -> Self {
        self.extra_clobbered = self.extra_clobbered.union(regs);
        self
    }

    /// Declares role pairs that may share a register.
    #[must_use]
    pub const fn with_aliases(mut self, aliases: &'static [(&'static str, &'static str)]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Allows the contract to use reserved registers in their documented role.
    #[must_use]
    pub const fn with_reserved_reuse(mut self, regs: RegisterSet) -> Self {
        self.reserved_reuse = regs;
        self
    }

    /// Name of the outer contract of an internal layer.
    pub const fn outer(&self) -> Option<&'static str> {
        match self.kind {
            ContractKind::Stub => None,
            ContractKind::Internal { outer, .. } => Some(outer),
        }
    }

    const fn cpu_roles(&self, preserved: bool) -> RegisterSet {
        let mut set = RegisterSet::EMPTY;
        let mut i = 0;
        while i < self.roles.len() {
            let role = &self.roles[i];
            if let RoleRegister::Cpu(reg) = role.location {
                if role.preserved == preserved {
                    set = set.with(reg);
                }
            }
            i += 1;
        }
        set
    }

    const fn fpu_roles(&self, preserved: bool) -> VRegisterSet {
        let mut set = VRegisterSet::EMPTY;
        let mut i = 0;
        while i < self.roles.len() {
            let role = &self.roles[i];
            if let RoleRegister::Fpu(reg) = role.location {
                if role.preserved == preserved {
                    set = set.with(reg);
                }
            }
            i += 1;
        }
        set
    }

    /// General-purpose registers the caller may rely on after the call.
    pub const fn preserved(&self) -> RegisterSet {
        self.cpu_roles(true)
    }

    /// General-purpose registers that are dead after the call.
    pub const fn clobbered(&self) -> RegisterSet {
        self.cpu_roles(false).union(self.extra_clobbered)
    }

    /// Vector registers the caller may rely on after the call.
    pub const fn fpu_preserved(&self) -> VRegisterSet {
        self.fpu_roles(true)
    }

    /// Vector registers that are dead after the call.
    pub const fn fpu_clobbered(&self) -> VRegisterSet {
        self.fpu_roles(false)
    }

    /// Every general-purpose register the contract mentions.
    pub const fn used(&self) -> RegisterSet {
        self.preserved().union(self.clobbered())
    }

    /// Clobbered registers of an internal layer that are not saved around
    /// their use. Empty for stub contracts.
    pub const fn internal_registers(&self) -> RegisterSet {
        match self.kind {
            ContractKind::Stub => RegisterSet::EMPTY,
            ContractKind::Internal { saved, .. } => self.clobbered().difference(saved),
        }
    }

    /// Looks up a role by name.
    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.name == name)
    }

    /// Register of the general-purpose role `name`.
    pub fn register(&self, name: &str) -> Option<Register> {
        match self.role(name)?.location {
            RoleRegister::Cpu(reg) => Some(reg),
            RoleRegister::Fpu(_) => None,
        }
    }

    /// Returns whether roles `a` and `b` are declared to share a register.
    pub const fn is_declared_alias(&self, a: &str, b: &str) -> bool {
        let mut i = 0;
        while i < self.aliases.len() {
            let (x, y) = self.aliases[i];
            if (str_eq(x, a) && str_eq(y, b)) || (str_eq(x, b) && str_eq(y, a)) {
                return true;
            }
            i += 1;
        }
        false
    }

    /// First pair of roles sharing a register without a declared alias.
    const fn undeclared_alias(&self) -> Option<(&'static Role, &'static Role)> {
        let roles = self.roles;
        let mut i = 0;
        while i < roles.len() {
            let mut j = i + 1;
            while j < roles.len() {
                if roles[i].location.same_as(roles[j].location)
                    && !self.is_declared_alias(roles[i].name, roles[j].name)
                {
                    return Some((&roles[i], &roles[j]));
                }
                j += 1;
            }
            i += 1;
        }
        None
    }

    /// Build-time form of [`AbiContract::validate`].
    ///
    /// An internal contract whose outer contract is not supplied fails.
    pub const fn is_well_formed(&self, reserved: RegisterSet, outer: Option<&AbiContract>) -> bool {
        if !self.preserved().is_disjoint(self.clobbered()) {
            return false;
        }
        if !self.fpu_preserved().is_disjoint(self.fpu_clobbered()) {
            return false;
        }
        if !self.used().is_disjoint(reserved.difference(self.reserved_reuse)) {
            return false;
        }
        if self.undeclared_alias().is_some() {
            return false;
        }
        match (self.kind, outer) {
            (ContractKind::Stub, _) => true,
            (ContractKind::Internal { .. }, None) => false,
            (ContractKind::Internal { .. }, Some(outer)) => {
                layered_internal_registers_disjoint(self, outer)
            }
        }
    }

    /// Checks the contract against the partitioning rules.
    ///
    /// 1. No register is both preserved and clobbered.
    /// 2. No register is globally reserved, unless listed in `reserved_reuse`.
    /// 3. Roles sharing a register are declared aliases.
    /// 4. An internal layer's unsaved registers are not preserved by `outer`.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule. An internal contract checked without
    /// its outer contract fails with [`AbiError::UnknownOuterContract`].
    pub fn validate(&self, reserved: RegisterSet, outer: Option<&AbiContract>) -> Result<(), AbiError> {
        let contract = self.name;

        if let Some(reg) = self.preserved().intersection(self.clobbered()).first() {
            return Err(AbiError::PreservedAndClobbered {
                contract,
                register: reg.to_string(),
            });
        }
        if let Some(reg) = self.fpu_preserved().intersection(self.fpu_clobbered()).first() {
            return Err(AbiError::PreservedAndClobbered {
                contract,
                register: reg.to_string(),
            });
        }

        let forbidden = reserved.difference(self.reserved_reuse);
        for role in self.roles {
            if let RoleRegister::Cpu(reg) = role.location {
                if forbidden.contains(reg) {
                    return Err(AbiError::ReservedRegister {
                        contract,
                        role: role.name,
                        register: reg.to_string(),
                    });
                }
            }
        }
        if let Some(reg) = self.extra_clobbered.intersection(forbidden).first() {
            return Err(AbiError::ReservedRegister {
                contract,
                role: "extra clobbered",
                register: reg.to_string(),
            });
        }

        if let Some((first, second)) = self.undeclared_alias() {
            return Err(AbiError::UndeclaredAlias {
                contract,
                first: first.name,
                second: second.name,
                register: first.location.to_string(),
            });
        }

        if let ContractKind::Internal { outer: outer_name, .. } = self.kind {
            let Some(outer) = outer else {
                return Err(AbiError::UnknownOuterContract {
                    contract,
                    outer: outer_name,
                });
            };
            if let Some(reg) = self.internal_registers().intersection(outer.preserved()).first() {
                return Err(AbiError::InternalOverlapsPreserved {
                    contract,
                    outer: outer.name,
                    register: reg.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Returns whether the unsaved registers of `inner` avoid everything `outer`
/// preserves.
pub const fn layered_internal_registers_disjoint(inner: &AbiContract, outer: &AbiContract) -> bool {
    inner.internal_registers().is_disjoint(outer.preserved())
}

/// `const` string equality.
pub(crate) const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}
