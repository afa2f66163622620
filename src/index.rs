// Ownership Index
// The square-to-owner map and both enumeration indices, kept consistent
// as one atomic unit.
//
// All mutation goes through `assign`, which performs the swap-and-pop
// removal from the old owner's list and the append to the new owner's
// list inside a single method so the owner map, the per-owner lists, and
// the slot back-references never drift apart. The global id list is fixed
// at genesis and never changes: squares are re-owned, never destroyed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::account::Address;
use crate::error::{RegistryError, RegistryResult};
use crate::types::SquareId;

/// Record of a single `assign`, sufficient to restore the exact prior
/// state (including list ordering). Consumed by `revert` on the
/// safe-transfer rejection path.
#[derive(Debug)]
pub(crate) struct AssignReceipt {
    id: SquareId,
    prev_owner: Address,
    /// Slot the square occupied in the previous owner's list
    prev_slot: usize,
    /// Square swapped into `prev_slot` during removal, if any
    displaced: Option<SquareId>,
}

/// Square-to-owner mapping plus the two enumeration indices.
///
/// Enumeration order within an owner's list is insertion order, not id
/// order. Removing a square swaps the list's last element into the
/// vacated slot; that reordering is part of the contract, not a bug.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OwnershipIndex {
    /// Owner of square `i + 1`
    owners: Vec<Address>,

    /// Global enumeration; fixed to `[1..=N]` at genesis
    all_ids: Vec<SquareId>,

    /// Per-owner id lists, insertion-ordered
    owned: IndexMap<Address, Vec<SquareId>>,

    /// Position of square `i + 1` inside its owner's list
    slot_of: Vec<usize>,
}

impl OwnershipIndex {
    /// Build the index with every square in `[1, universe_size]` held by
    /// `genesis_owner`.
    pub fn new(universe_size: u64, genesis_owner: Address) -> Self {
        let n = universe_size as usize;
        let all_ids: Vec<SquareId> = (1..=universe_size).collect();
        let mut owned = IndexMap::new();
        owned.insert(genesis_owner, all_ids.clone());
        Self {
            owners: vec![genesis_owner; n],
            all_ids,
            owned,
            slot_of: (0..n).collect(),
        }
    }

    /// Number of squares in the universe
    pub fn universe_size(&self) -> u64 {
        self.all_ids.len() as u64
    }

    fn check_bounds(&self, id: SquareId) -> RegistryResult<usize> {
        if id == 0 || id > self.all_ids.len() as u64 {
            return Err(RegistryError::InvalidSquare);
        }
        Ok((id - 1) as usize)
    }

    // ========================================
    // Mutation Primitive
    // ========================================

    /// Move `id` from its current owner to `new_owner`.
    ///
    /// Fails with `InvalidSquare` outside the universe, `InvalidAccount`
    /// for a null recipient, and `SelfAssignment` when `new_owner` already
    /// holds the square. On success every index is updated; the returned
    /// receipt lets `revert` undo exactly this assignment.
    pub(crate) fn assign(
        &mut self,
        id: SquareId,
        new_owner: Address,
    ) -> RegistryResult<AssignReceipt> {
        let idx = self.check_bounds(id)?;
        if new_owner.is_zero() {
            return Err(RegistryError::InvalidAccount);
        }
        let prev_owner = self.owners[idx];
        if prev_owner == new_owner {
            return Err(RegistryError::SelfAssignment);
        }

        // Swap-and-pop removal from the previous owner's list
        let prev_slot = self.slot_of[idx];
        let list = self
            .owned
            .get_mut(&prev_owner)
            .expect("owner list exists for every current owner");
        let last = list.pop().expect("owner list contains the square");
        let displaced = if prev_slot < list.len() {
            list[prev_slot] = last;
            self.slot_of[(last - 1) as usize] = prev_slot;
            Some(last)
        } else {
            debug_assert_eq!(last, id);
            None
        };

        // Append to the new owner's list
        let target = self.owned.entry(new_owner).or_default();
        target.push(id);
        self.slot_of[idx] = target.len() - 1;
        self.owners[idx] = new_owner;

        log::trace!("square {} assigned {} -> {}", id, prev_owner, new_owner);
        Ok(AssignReceipt {
            id,
            prev_owner,
            prev_slot,
            displaced,
        })
    }

    /// Undo one `assign`, restoring owner, slot, and list ordering to the
    /// exact state before the call. Only the most recent assignment for a
    /// square may be reverted.
    pub(crate) fn revert(&mut self, receipt: AssignReceipt) {
        let idx = (receipt.id - 1) as usize;
        let current_owner = self.owners[idx];

        // The square is the last element of its current owner's list
        let list = self
            .owned
            .get_mut(&current_owner)
            .expect("owner list exists for every current owner");
        let popped = list.pop();
        debug_assert_eq!(popped, Some(receipt.id));

        // Reinsert at the old slot, pushing any displaced square back to
        // the end of the previous owner's list
        let list = self
            .owned
            .entry(receipt.prev_owner)
            .or_default();
        match receipt.displaced {
            Some(displaced) => {
                list.push(displaced);
                list[receipt.prev_slot] = receipt.id;
                self.slot_of[(displaced - 1) as usize] = list.len() - 1;
            }
            None => {
                debug_assert_eq!(receipt.prev_slot, list.len());
                list.push(receipt.id);
            }
        }
        self.slot_of[idx] = receipt.prev_slot;
        self.owners[idx] = receipt.prev_owner;
        log::trace!("square {} assignment reverted", receipt.id);
    }

    // ========================================
    // Read Accessors
    // ========================================

    /// Current owner of a square.
    pub fn owner_of(&self, id: SquareId) -> RegistryResult<Address> {
        let idx = self.check_bounds(id)?;
        Ok(self.owners[idx])
    }

    /// Every square id, in genesis order.
    pub fn enumerate_all(&self) -> &[SquareId] {
        &self.all_ids
    }

    /// Square id at a global enumeration index.
    pub fn square_by_index(&self, index: u64) -> RegistryResult<SquareId> {
        self.all_ids
            .get(index as usize)
            .copied()
            .ok_or(RegistryError::IndexOutOfRange)
    }

    /// Squares currently held by an account, in insertion order.
    pub fn enumerate_owned_by(&self, account: &Address) -> &[SquareId] {
        self.owned.get(account).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Square id at an index within an owner's list.
    pub fn square_of_owner_by_index(
        &self,
        account: &Address,
        index: u64,
    ) -> RegistryResult<SquareId> {
        self.enumerate_owned_by(account)
            .get(index as usize)
            .copied()
            .ok_or(RegistryError::IndexOutOfRange)
    }

    /// Number of squares held by an account.
    pub fn count_owned_by(&self, account: &Address) -> RegistryResult<u64> {
        if account.is_zero() {
            return Err(RegistryError::InvalidAccount);
        }
        Ok(self.enumerate_owned_by(account).len() as u64)
    }
}
