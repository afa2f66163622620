// Privileged Role Registry
// Three flat, independent role slots gate every administrative mutation.
//
// There is no inheritance between roles: the chief officer does not pass
// the operations or finance checks. Only the current chief may reassign
// any slot, and the chief slot can never be left empty.

use serde::{Deserialize, Serialize};

use crate::account::Address;
use crate::error::{RegistryError, RegistryResult};

/// The three privileged role slots.
///
/// Constructed with the deploying account as chief; the operations and
/// finance slots stay unset until the chief assigns them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRegistry {
    chief: Address,
    operations: Option<Address>,
    finance: Option<Address>,
}

impl RoleRegistry {
    /// Create the role registry with `deployer` as chief.
    ///
    /// Fails with `InvalidAccount` for a null deployer, keeping the
    /// chief-is-never-null invariant from the first instant.
    pub fn new(deployer: Address) -> RegistryResult<Self> {
        if deployer.is_zero() {
            return Err(RegistryError::InvalidAccount);
        }
        Ok(Self {
            chief: deployer,
            operations: None,
            finance: None,
        })
    }

    // ========================================
    // Role Mutations (chief-gated)
    // ========================================

    /// Replace the chief officer. Chief-only; the new chief must be a
    /// real account.
    pub fn set_chief(&mut self, caller: &Address, new_chief: Address) -> RegistryResult<()> {
        self.require_chief(caller)?;
        if new_chief.is_zero() {
            return Err(RegistryError::InvalidAccount);
        }
        log::debug!("chief officer {} -> {}", self.chief, new_chief);
        self.chief = new_chief;
        Ok(())
    }

    /// Replace the operations officer. Chief-only; replacement only, there
    /// is no unset path.
    pub fn set_operations_officer(
        &mut self,
        caller: &Address,
        new_officer: Address,
    ) -> RegistryResult<()> {
        self.require_chief(caller)?;
        if new_officer.is_zero() {
            return Err(RegistryError::InvalidAccount);
        }
        log::debug!("operations officer -> {}", new_officer);
        self.operations = Some(new_officer);
        Ok(())
    }

    /// Replace the finance officer. Chief-only; replacement only.
    pub fn set_finance_officer(
        &mut self,
        caller: &Address,
        new_officer: Address,
    ) -> RegistryResult<()> {
        self.require_chief(caller)?;
        if new_officer.is_zero() {
            return Err(RegistryError::InvalidAccount);
        }
        log::debug!("finance officer -> {}", new_officer);
        self.finance = Some(new_officer);
        Ok(())
    }

    // ========================================
    // Authorization Predicates
    // ========================================

    /// Fail with `Unauthorized` unless the caller is the chief officer.
    pub fn require_chief(&self, caller: &Address) -> RegistryResult<()> {
        if *caller != self.chief {
            return Err(RegistryError::Unauthorized);
        }
        Ok(())
    }

    /// Fail with `Unauthorized` unless the caller is the operations officer.
    pub fn require_operations(&self, caller: &Address) -> RegistryResult<()> {
        if self.operations.as_ref() != Some(caller) {
            return Err(RegistryError::Unauthorized);
        }
        Ok(())
    }

    /// Fail with `Unauthorized` unless the caller is the finance officer.
    pub fn require_finance(&self, caller: &Address) -> RegistryResult<()> {
        if self.finance.as_ref() != Some(caller) {
            return Err(RegistryError::Unauthorized);
        }
        Ok(())
    }

    // ========================================
    // Read Accessors
    // ========================================

    /// Current chief officer. Never null.
    pub fn chief(&self) -> &Address {
        &self.chief
    }

    /// Current operations officer, if assigned.
    pub fn operations_officer(&self) -> Option<&Address> {
        self.operations.as_ref()
    }

    /// Current finance officer, if assigned.
    pub fn finance_officer(&self) -> Option<&Address> {
        self.finance.as_ref()
    }
}
