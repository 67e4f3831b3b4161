#![no_std]

//! Enumerable holder set for fungible tokens.
//!
//! The ledger gives a token contract no way to enumerate its balance
//! holders, so a token that wants to be distributable maintains this
//! registry from its balance-changing entry points. The set is an
//! insertion-ordered list plus a reverse index, giving O(1) membership
//! checks, insertion, and swap-removal. Enumeration via [`all`] is linear in
//! the holder count and must fit inside a single invocation; that bound is
//! the scalability ceiling of everything built on top.
//!
//! Invariant: an address is present exactly when its current balance is
//! greater than zero. Entries are created the moment a balance first turns
//! positive and destroyed the moment it returns to exactly zero; partial
//! debits leave membership untouched.

use soroban_sdk::{contracttype, Address, Env, Vec};

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

/// Storage keys, scoped to the embedding contract instance.
#[contracttype]
#[derive(Clone)]
pub enum RegistryKey {
    /// Insertion-ordered list of holders.
    Holders,
    /// Position of a holder within the list.
    HolderIndex(Address),
}

/// Returns true if `addr` is registered as a holder.
pub fn contains(env: &Env, addr: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&RegistryKey::HolderIndex(addr.clone()))
}

/// The full holder set, in insertion order modulo swap-removal reordering.
pub fn all(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&RegistryKey::Holders)
        .unwrap_or(Vec::new(env))
}

/// Number of registered holders.
pub fn count(env: &Env) -> u32 {
    all(env).len()
}

/// Registers `addr` as a holder. No-op when already present.
pub fn add(env: &Env, addr: &Address) {
    if contains(env, addr) {
        return;
    }
    let mut holders = all(env);
    holders.push_back(addr.clone());
    env.storage()
        .persistent()
        .set(&RegistryKey::HolderIndex(addr.clone()), &(holders.len() - 1));
    env.storage().persistent().set(&RegistryKey::Holders, &holders);
}

/// Unregisters `addr`, swapping the last entry into its slot. No-op when
/// absent.
pub fn remove(env: &Env, addr: &Address) {
    let key = RegistryKey::HolderIndex(addr.clone());
    let index: u32 = match env.storage().persistent().get(&key) {
        Some(index) => index,
        None => return,
    };
    let mut holders = all(env);
    let last = holders.len() - 1;
    if index != last {
        let moved = holders.get_unchecked(last);
        holders.set(index, moved.clone());
        env.storage()
            .persistent()
            .set(&RegistryKey::HolderIndex(moved), &index);
    }
    holders.pop_back();
    env.storage().persistent().set(&RegistryKey::Holders, &holders);
    env.storage().persistent().remove(&key);
}

/// Balance hook for a token's transfer/mint/burn paths: call with the
/// post-operation balance of every touched address.
pub fn record_balance(env: &Env, addr: &Address, balance: i128) {
    if balance > 0 {
        add(env, addr);
    } else {
        remove(env, addr);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::{contract, Address, Env};

    #[contract]
    struct Host;

    fn setup() -> (Env, Address) {
        let env = Env::default();
        let host = env.register(Host, ());
        (env, host)
    }

    #[test]
    fn add_is_idempotent() {
        let (env, host) = setup();
        let a = Address::generate(&env);
        env.as_contract(&host, || {
            add(&env, &a);
            add(&env, &a);
            assert!(contains(&env, &a));
            assert_eq!(count(&env), 1);
        });
    }

    #[test]
    fn remove_absent_is_noop() {
        let (env, host) = setup();
        let a = Address::generate(&env);
        env.as_contract(&host, || {
            remove(&env, &a);
            assert_eq!(count(&env), 0);
        });
    }

    #[test]
    fn swap_removal_keeps_set_consistent() {
        let (env, host) = setup();
        let a = Address::generate(&env);
        let b = Address::generate(&env);
        let c = Address::generate(&env);
        env.as_contract(&host, || {
            add(&env, &a);
            add(&env, &b);
            add(&env, &c);
            remove(&env, &a);
            assert!(!contains(&env, &a));
            assert!(contains(&env, &b));
            assert!(contains(&env, &c));
            assert_eq!(count(&env), 2);

            // The moved element's index must stay usable for removal.
            remove(&env, &c);
            assert!(!contains(&env, &c));
            assert_eq!(all(&env).len(), 1);
            assert_eq!(all(&env).get_unchecked(0), b);
        });
    }

    #[test]
    fn record_balance_tracks_zero_boundary() {
        let (env, host) = setup();
        let a = Address::generate(&env);
        env.as_contract(&host, || {
            record_balance(&env, &a, 10);
            assert!(contains(&env, &a));
            // Partial debit keeps membership.
            record_balance(&env, &a, 3);
            assert!(contains(&env, &a));
            record_balance(&env, &a, 0);
            assert!(!contains(&env, &a));
        });
    }

    #[test]
    fn enumeration_is_insertion_ordered() {
        let (env, host) = setup();
        let a = Address::generate(&env);
        let b = Address::generate(&env);
        env.as_contract(&host, || {
            add(&env, &a);
            add(&env, &b);
            let holders = all(&env);
            assert_eq!(holders.get_unchecked(0), a);
            assert_eq!(holders.get_unchecked(1), b);
        });
    }
}
