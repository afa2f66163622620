// Approval Registry
// Per-square single-approval slots and per-owner blanket operator
// approvals, consulted by the transfer authorization check.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::account::Address;
use crate::error::{RegistryError, RegistryResult};
use crate::types::SquareId;

/// Delegation state for the registry.
///
/// A square approval names one account allowed to move that square; it is
/// wiped on every transfer. An operator approval is owner-scoped and
/// survives transfers.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApprovalRegistry {
    /// Single approved spender per square; absent means none
    approved: HashMap<SquareId, Address>,

    /// Blanket operators per owner
    operators: IndexMap<Address, IndexSet<Address>>,
}

impl ApprovalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or clear, with the null account) the approved spender for a
    /// square. The caller must be the square's current owner, and the
    /// owner itself cannot be the spender.
    pub fn approve(
        &mut self,
        caller: &Address,
        owner: &Address,
        id: SquareId,
        spender: Address,
    ) -> RegistryResult<()> {
        if caller != owner {
            return Err(RegistryError::Unauthorized);
        }
        if spender == *owner {
            return Err(RegistryError::SelfApproval);
        }
        if spender.is_zero() {
            self.approved.remove(&id);
        } else {
            self.approved.insert(id, spender);
        }
        Ok(())
    }

    /// Grant or revoke a blanket operator for the caller's squares.
    /// The operator value is unrestricted; revoking a never-granted
    /// operator is a no-op.
    pub fn set_operator(&mut self, caller: &Address, operator: Address, approved: bool) {
        let set = self.operators.entry(*caller).or_default();
        if approved {
            set.insert(operator);
        } else {
            set.swap_remove(&operator);
        }
    }

    /// Unconditionally drop the approved spender for a square. Called on
    /// every successful transfer.
    pub fn clear(&mut self, id: SquareId) {
        self.approved.remove(&id);
    }

    /// Put back a previously cleared approval. Used only by the
    /// safe-transfer rejection rollback.
    pub(crate) fn restore(&mut self, id: SquareId, spender: Option<Address>) {
        match spender {
            Some(spender) => {
                self.approved.insert(id, spender);
            }
            None => {
                self.approved.remove(&id);
            }
        }
    }

    /// Approved spender for a square, if any.
    pub fn get_approved(&self, id: SquareId) -> Option<&Address> {
        self.approved.get(&id)
    }

    /// Whether `operator` holds a blanket approval from `owner`.
    pub fn is_operator(&self, owner: &Address, operator: &Address) -> bool {
        self.operators
            .get(owner)
            .is_some_and(|set| set.contains(operator))
    }

    /// Whether `caller` may move the square: owner, approved spender, or
    /// blanket operator of the owner.
    pub fn is_authorized(&self, caller: &Address, owner: &Address, id: SquareId) -> bool {
        if caller == owner {
            return true;
        }
        if self.get_approved(id) == Some(caller) {
            return true;
        }
        self.is_operator(owner, caller)
    }
}
