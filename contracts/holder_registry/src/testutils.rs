//! Test-support token with an enumerable holder set.
//!
//! Minimal fungible token that wires [`crate::record_balance`] into every
//! balance-changing entry point and exports the `balance`/`holders`
//! capability surface the distribution engine consumes. Used as the fixture
//! for registry, distributor, and workflow tests; it is not a production
//! token.

use crate as holder_registry;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Vec};

#[contracttype]
#[derive(Clone)]
enum TokenKey {
    Admin,
    Balance(Address),
    Allowance(Address, Address),
}

#[contract]
pub struct RegistryToken;

fn read_balance(env: &Env, id: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&TokenKey::Balance(id.clone()))
        .unwrap_or(0)
}

fn write_balance(env: &Env, id: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&TokenKey::Balance(id.clone()), &amount);
    holder_registry::record_balance(env, id, amount);
}

fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) {
    assert!(amount >= 0, "Amount must not be negative");
    let from_balance = read_balance(env, from);
    assert!(from_balance >= amount, "Insufficient balance");
    write_balance(env, from, from_balance - amount);
    write_balance(env, to, read_balance(env, to) + amount);
}

#[contractimpl]
impl RegistryToken {
    pub fn initialize(env: Env, admin: Address) {
        if env.storage().persistent().has(&TokenKey::Admin) {
            panic!("Already initialized");
        }
        env.storage().persistent().set(&TokenKey::Admin, &admin);
    }

    pub fn mint(env: Env, to: Address, amount: i128) {
        let admin: Address = env
            .storage()
            .persistent()
            .get(&TokenKey::Admin)
            .expect("Not initialized");
        admin.require_auth();
        assert!(amount >= 0, "Amount must not be negative");
        write_balance(&env, &to, read_balance(&env, &to) + amount);
    }

    pub fn burn(env: Env, from: Address, amount: i128) {
        from.require_auth();
        let balance = read_balance(&env, &from);
        assert!(balance >= amount, "Insufficient balance");
        write_balance(&env, &from, balance - amount);
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        move_balance(&env, &from, &to, amount);
    }

    pub fn approve(env: Env, from: Address, spender: Address, amount: i128) {
        from.require_auth();
        env.storage()
            .persistent()
            .set(&TokenKey::Allowance(from, spender), &amount);
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&TokenKey::Allowance(from, spender))
            .unwrap_or(0)
    }

    pub fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        let allowance = Self::allowance(env.clone(), from.clone(), spender.clone());
        assert!(allowance >= amount, "Insufficient allowance");
        env.storage()
            .persistent()
            .set(&TokenKey::Allowance(from.clone(), spender), &(allowance - amount));
        move_balance(&env, &from, &to, amount);
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        read_balance(&env, &id)
    }

    pub fn holders(env: Env) -> Vec<Address> {
        holder_registry::all(&env)
    }
}
