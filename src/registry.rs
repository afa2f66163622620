// Square Registry
// The transfer engine: the only code path allowed to reassign ownership.
// Composes the ownership index, the approval registry, and the role
// registry, and performs the recipient capability probe for safe
// transfers.

use serde::{Deserialize, Serialize};

use crate::account::Address;
use crate::approvals::ApprovalRegistry;
use crate::error::{RegistryError, RegistryResult};
use crate::index::OwnershipIndex;
use crate::roles::RoleRegistry;
use crate::types::{
    CapabilityId, RegistryConfig, SquareId, CAP_BASE, CAP_ENUMERATION, CAP_METADATA,
    CAP_OWNERSHIP, MAX_SAFE_TRANSFER_DATA_LENGTH, RECEIPT_ACK,
};

// ========================================
// Receiver Capability Probe
// ========================================

/// Recipient-side hook for safe transfers.
///
/// The registry commits all of its own state for a transfer before the
/// hook runs, so a hook that calls back into the registry observes
/// post-transfer state. A contract recipient must echo `RECEIPT_ACK`
/// back; anything else rejects the transfer and the registry rolls the
/// assignment back exactly.
pub trait SquareReceiver {
    /// Whether the account is contract-capable. Plain accounts skip the
    /// receipt hook entirely.
    fn is_contract(&self, account: &Address) -> bool;

    /// Called after the transfer has been committed. Return `RECEIPT_ACK`
    /// to accept the square.
    fn on_square_received(
        &mut self,
        registry: &SquareRegistry,
        operator: &Address,
        from: &Address,
        id: SquareId,
        data: &[u8],
    ) -> CapabilityId;
}

/// Receiver for transfers to plain accounts only.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoReceiver;

impl SquareReceiver for NoReceiver {
    fn is_contract(&self, _account: &Address) -> bool {
        false
    }

    fn on_square_received(
        &mut self,
        _registry: &SquareRegistry,
        _operator: &Address,
        _from: &Address,
        _id: SquareId,
        _data: &[u8],
    ) -> CapabilityId {
        RECEIPT_ACK
    }
}

// ========================================
// Registry
// ========================================

/// Access-controlled ownership registry over a fixed square universe.
///
/// Every square in `[1, N]` exists from construction, held by the
/// configured registry account; `mint` is the first assignment out of
/// that account and transfers back to it are ordinary transfers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SquareRegistry {
    config: RegistryConfig,
    roles: RoleRegistry,
    index: OwnershipIndex,
    approvals: ApprovalRegistry,
}

impl SquareRegistry {
    /// Create a registry; `deployer` becomes the chief officer.
    pub fn new(config: RegistryConfig, deployer: Address) -> RegistryResult<Self> {
        config.validate()?;
        let roles = RoleRegistry::new(deployer)?;
        let index = OwnershipIndex::new(config.universe_size, config.registry_account);
        Ok(Self {
            config,
            roles,
            index,
            approvals: ApprovalRegistry::new(),
        })
    }

    // ========================================
    // Mutations
    // ========================================

    /// First-time assignment of a square out of the registry account.
    pub fn mint(&mut self, id: SquareId, to: Address) -> RegistryResult<()> {
        // Step 1: Input validation
        if to.is_zero() {
            return Err(RegistryError::InvalidAccount);
        }
        // Step 2: The square must still sit with the registry account
        if self.index.owner_of(id)? != self.config.registry_account {
            return Err(RegistryError::AlreadyOwned);
        }
        // Step 3: Assign, then drop any spender the registry account
        // approved while it held the square
        self.index.assign(id, to)?;
        self.approvals.clear(id);
        log::debug!("square {} minted to {}", id, to);
        Ok(())
    }

    /// Transfer a square on behalf of its current owner.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        from: &Address,
        to: Address,
        id: SquareId,
    ) -> RegistryResult<()> {
        self.check_transfer(caller, from, &to, id)?;
        self.approvals.clear(id);
        self.index.assign(id, to)?;
        log::debug!("square {} transferred {} -> {}", id, from, to);
        Ok(())
    }

    /// Transfer with a recipient capability probe.
    ///
    /// The registry's own state is fully committed before the probe is
    /// invoked; a rejected probe rolls the assignment (and the cleared
    /// approval) back to the exact pre-call state.
    pub fn safe_transfer_from<R: SquareReceiver>(
        &mut self,
        caller: &Address,
        from: &Address,
        to: Address,
        id: SquareId,
        data: &[u8],
        receiver: &mut R,
    ) -> RegistryResult<()> {
        if data.len() > MAX_SAFE_TRANSFER_DATA_LENGTH {
            return Err(RegistryError::DataTooLong);
        }
        self.check_transfer(caller, from, &to, id)?;

        // Commit before the probe so a reentrant read observes
        // post-transfer state
        let prev_approved = self.approvals.get_approved(id).copied();
        self.approvals.clear(id);
        let receipt = self.index.assign(id, to)?;
        log::debug!("square {} transferred {} -> {} (safe)", id, from, to);

        if receiver.is_contract(&to) {
            let ack = receiver.on_square_received(&*self, caller, from, id, data);
            if ack != RECEIPT_ACK {
                self.index.revert(receipt);
                self.approvals.restore(id, prev_approved);
                log::debug!("square {} receipt rejected, transfer rolled back", id);
                return Err(RegistryError::TransferRejected);
            }
        }
        Ok(())
    }

    /// Set or clear the approved spender for a square. Owner-only.
    pub fn approve(
        &mut self,
        caller: &Address,
        id: SquareId,
        spender: Address,
    ) -> RegistryResult<()> {
        let owner = self.index.owner_of(id)?;
        self.approvals.approve(caller, &owner, id, spender)
    }

    /// Grant or revoke a blanket operator for the caller's squares.
    pub fn set_operator(&mut self, caller: &Address, operator: Address, approved: bool) {
        self.approvals.set_operator(caller, operator, approved);
    }

    /// Shared precondition chain for both transfer forms. Checks only;
    /// no mutation happens here.
    fn check_transfer(
        &self,
        caller: &Address,
        from: &Address,
        to: &Address,
        id: SquareId,
    ) -> RegistryResult<()> {
        if to.is_zero() {
            return Err(RegistryError::InvalidAccount);
        }
        let owner = self.index.owner_of(id)?;
        if owner != *from {
            return Err(RegistryError::OwnerMismatch);
        }
        if owner == *to {
            return Err(RegistryError::SelfAssignment);
        }
        if !self.approvals.is_authorized(caller, &owner, id) {
            return Err(RegistryError::Unauthorized);
        }
        Ok(())
    }

    // ========================================
    // Ownership Reads
    // ========================================

    /// Current owner of a square.
    pub fn owner_of(&self, id: SquareId) -> RegistryResult<Address> {
        self.index.owner_of(id)
    }

    /// Number of squares held by an account.
    pub fn count_owned_by(&self, account: &Address) -> RegistryResult<u64> {
        self.index.count_owned_by(account)
    }

    /// Every square id, in genesis order.
    pub fn enumerate_all(&self) -> &[SquareId] {
        self.index.enumerate_all()
    }

    /// Square id at a global enumeration index.
    pub fn square_by_index(&self, index: u64) -> RegistryResult<SquareId> {
        self.index.square_by_index(index)
    }

    /// Squares currently held by an account, in insertion order.
    pub fn enumerate_owned_by(&self, account: &Address) -> &[SquareId] {
        self.index.enumerate_owned_by(account)
    }

    /// Square id at an index within an owner's list.
    pub fn square_of_owner_by_index(
        &self,
        account: &Address,
        index: u64,
    ) -> RegistryResult<SquareId> {
        self.index.square_of_owner_by_index(account, index)
    }

    /// Number of squares in the universe. Constant for the registry's
    /// lifetime; squares are never destroyed.
    pub fn total_supply(&self) -> u64 {
        self.index.universe_size()
    }

    // ========================================
    // Approval Reads
    // ========================================

    /// Approved spender for a square, if any. Validates the id.
    pub fn get_approved(&self, id: SquareId) -> RegistryResult<Option<Address>> {
        self.index.owner_of(id)?;
        Ok(self.approvals.get_approved(id).copied())
    }

    /// Whether `operator` holds a blanket approval from `owner`.
    pub fn is_operator(&self, owner: &Address, operator: &Address) -> bool {
        self.approvals.is_operator(owner, operator)
    }

    /// Whether `caller` may act on the square (owner, approved spender,
    /// or operator). Collaborators gate per-square actions on this.
    pub fn is_authorized_for(&self, caller: &Address, id: SquareId) -> RegistryResult<bool> {
        let owner = self.index.owner_of(id)?;
        Ok(self.approvals.is_authorized(caller, &owner, id))
    }

    // ========================================
    // Roles
    // ========================================

    /// Role slots and authorization predicates.
    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    pub fn set_chief(&mut self, caller: &Address, new_chief: Address) -> RegistryResult<()> {
        self.roles.set_chief(caller, new_chief)
    }

    pub fn set_operations_officer(
        &mut self,
        caller: &Address,
        officer: Address,
    ) -> RegistryResult<()> {
        self.roles.set_operations_officer(caller, officer)
    }

    pub fn set_finance_officer(
        &mut self,
        caller: &Address,
        officer: Address,
    ) -> RegistryResult<()> {
        self.roles.set_finance_officer(caller, officer)
    }

    // ========================================
    // Metadata and Capabilities
    // ========================================

    /// Registry display name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Registry symbol.
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    /// Metadata reference for a square: base URI plus the five-digit
    /// zero-padded id.
    pub fn square_uri(&self, id: SquareId) -> RegistryResult<String> {
        if !self.config.contains(id) {
            return Err(RegistryError::InvalidSquare);
        }
        Ok(format!("{}{:05}.json", self.config.base_uri, id))
    }

    /// Capability probe. Unrecognized identifiers return false rather
    /// than failing.
    pub fn supports_capability(&self, capability: CapabilityId) -> bool {
        capability == CAP_BASE
            || capability == CAP_OWNERSHIP
            || capability == CAP_METADATA
            || capability == CAP_ENUMERATION
    }

    /// The account holding every not-yet-minted square.
    pub fn registry_account(&self) -> &Address {
        &self.config.registry_account
    }

    /// Construction-time configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}
