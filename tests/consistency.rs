// Index consistency under arbitrary mint/transfer sequences, checked
// against a flat model after every step.

use std::collections::HashMap;

use proptest::prelude::*;
use square_registry::{Address, RegistryConfig, RegistryError, SquareRegistry};

const UNIVERSE: u64 = 25;
const ACCOUNTS: u8 = 6;

fn addr(byte: u8) -> Address {
    Address::new([byte; 32])
}

fn registry_account() -> Address {
    addr(0xfe)
}

fn registry() -> SquareRegistry {
    let mut config = RegistryConfig::new(registry_account());
    config.universe_size = UNIVERSE;
    SquareRegistry::new(config, addr(1)).unwrap()
}

/// Apply one step: mint if the square still sits with the registry
/// account, otherwise an owner-initiated transfer.
fn apply(registry: &mut SquareRegistry, model: &mut HashMap<u64, Address>, id: u64, to: Address) {
    let owner = registry.owner_of(id).unwrap();
    let result = if owner == registry_account() {
        registry.mint(id, to)
    } else {
        registry.transfer_from(&owner, &owner, to, id)
    };
    match result {
        Ok(()) => {
            model.insert(id, to);
        }
        // The only acceptable failure in this drive is a same-owner move
        Err(e) => assert_eq!(e, RegistryError::SelfAssignment),
    }
}

/// Full cross-check of the registry against the model.
fn check(registry: &SquareRegistry, model: &HashMap<u64, Address>) {
    // Global enumeration: every id exactly once, length N
    let all = registry.enumerate_all();
    assert_eq!(all.len() as u64, UNIVERSE);
    let mut seen = vec![false; UNIVERSE as usize + 1];
    for &id in all {
        assert!(!seen[id as usize], "duplicate id {} in global index", id);
        seen[id as usize] = true;
    }

    // Owner map matches the model
    for id in 1..=UNIVERSE {
        let expected = model.get(&id).copied().unwrap_or(registry_account());
        assert_eq!(registry.owner_of(id).unwrap(), expected);
    }

    // Per-owner lists: exactly the owned ids, no duplicates, counts agree
    let mut accounts: Vec<Address> = (1..=ACCOUNTS).map(addr).collect();
    accounts.push(registry_account());
    let mut listed_total = 0usize;
    for account in &accounts {
        let list = registry.enumerate_owned_by(account);
        assert_eq!(list.len() as u64, registry.count_owned_by(account).unwrap());
        listed_total += list.len();
        let mut sorted: Vec<u64> = list.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), list.len(), "duplicate in owner list");
        for &id in list {
            assert_eq!(registry.owner_of(id).unwrap(), *account);
        }
        // The per-owner index view agrees with the slice view
        for (i, &id) in list.iter().enumerate() {
            assert_eq!(
                registry.square_of_owner_by_index(account, i as u64).unwrap(),
                id
            );
        }
    }
    assert_eq!(listed_total as u64, UNIVERSE, "squares lost or duplicated");
}

proptest! {
    #[test]
    fn index_stays_consistent(steps in proptest::collection::vec((1..=UNIVERSE, 1..=ACCOUNTS), 1..120)) {
        let mut registry = registry();
        let mut model = HashMap::new();
        check(&registry, &model);
        for (id, account) in steps {
            apply(&mut registry, &mut model, id, addr(account));
            check(&registry, &model);
        }
    }

    #[test]
    fn approval_cleared_by_every_transfer(
        steps in proptest::collection::vec((1..=UNIVERSE, 1..=ACCOUNTS), 1..60),
        spender in 1..=ACCOUNTS,
    ) {
        let mut registry = registry();
        let mut model = HashMap::new();
        for (id, account) in steps {
            let owner = registry.owner_of(id).unwrap();
            // Owners delegate before the move, the registry account
            // included, so approvals also cross the mint boundary
            if addr(spender) != owner {
                registry.approve(&owner, id, addr(spender)).unwrap();
            }
            apply(&mut registry, &mut model, id, addr(account));
            if registry.owner_of(id).unwrap() != owner {
                prop_assert_eq!(registry.get_approved(id).unwrap(), None);
            }
        }
    }
}
