//! End-to-end workflows across the holder registry, the dividend
//! distribution engine, and the salary streaming engine.
//!
//! ## Coverage
//!
//! 1. **Dividend lifecycle** — an enumerable token's holder set evolving
//!    through mints, transfers, and burns, with equal and weighted
//!    distributions computed from live balances at each point.
//! 2. **Salary lifecycle** — hiring, scheduling, partial withdrawal,
//!    schedule extension, and forced settlement on employment removal.

#![cfg(test)]

use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{
    contract, contractimpl, token, vec, Address, Env,
};

use dividend_distributor::{
    DistributionMode, DividendDistributorContract, DividendDistributorContractClient,
};
use holder_registry::testutils::{RegistryToken, RegistryTokenClient};
use salary_stream::{SalaryStreamContract, SalaryStreamContractClient};

const PERIOD: u64 = 3_600;

// ============================================================================
// FIXTURES AND HELPERS
// ============================================================================

/// Credential contract standing in for the external admin-badge NFT.
#[contract]
pub struct StubCredential;

#[contractimpl]
impl StubCredential {
    pub fn grant(env: Env, holder: Address, subject: Address) {
        env.storage().persistent().set(&(holder, subject), &true);
    }

    pub fn holds_credential_for(env: Env, holder: Address, subject: Address) -> bool {
        env.storage()
            .persistent()
            .get(&(holder, subject))
            .unwrap_or(false)
    }
}

fn env() -> Env {
    let e = Env::default();
    e.mock_all_auths();
    e
}

fn addr(env: &Env) -> Address {
    Address::generate(env)
}

/// Deploys a Stellar Asset Contract and returns its address.
fn sac(env: &Env) -> Address {
    let admin = addr(env);
    env.register_stellar_asset_contract_v2(admin).address()
}

fn mint(env: &Env, tok: &Address, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, tok).mint(to, &amount);
}

fn approve(env: &Env, tok: &Address, from: &Address, spender: &Address, amount: i128) {
    let expiration = env.ledger().sequence() + 10_000;
    token::Client::new(env, tok).approve(from, spender, &amount, &expiration);
}

fn balance(env: &Env, tok: &Address, who: &Address) -> i128 {
    token::Client::new(env, tok).balance(who)
}

fn advance(env: &Env, seconds: u64) {
    env.ledger().with_mut(|li| li.timestamp += seconds);
}

// ============================================================================
// DIVIDEND LIFECYCLE
// ============================================================================

#[test]
fn test_dividend_workflow_tracks_live_holder_set() {
    let env = env();
    let credential_id = env.register(StubCredential, ());
    let credential = StubCredentialClient::new(&env, &credential_id);
    let native = sac(&env);
    let distributor_id = env.register(DividendDistributorContract, ());
    let distributor = DividendDistributorContractClient::new(&env, &distributor_id);
    distributor.initialize(&credential_id, &native);

    let issuer = addr(&env);
    let alice = addr(&env);
    let bob = addr(&env);
    let carol = addr(&env);

    let shares_id = env.register(RegistryToken, ());
    let shares = RegistryTokenClient::new(&env, &shares_id);
    shares.initialize(&issuer);
    credential.grant(&issuer, &shares_id);

    shares.mint(&alice, &400);
    shares.mint(&bob, &100);
    assert_eq!(shares.holders().len(), 2);

    let payout = sac(&env);
    mint(&env, &payout, &issuer, 10_000);
    approve(&env, &payout, &issuer, &distributor.address, 10_000);

    // Equal split across the two current holders.
    let paid = distributor.distribute(
        &issuer,
        &shares_id,
        &Some(payout.clone()),
        &1_000,
        &DistributionMode::Equal,
        &0,
    );
    assert_eq!(paid, 1_000);
    assert_eq!(balance(&env, &payout, &alice), 500);
    assert_eq!(balance(&env, &payout, &bob), 500);

    // Carol buys in, Bob sells half to her; the next run sees three
    // holders weighted by live balances.
    shares.transfer(&bob, &carol, &50);
    assert_eq!(shares.holders().len(), 3);
    assert_eq!(distributor.calc_min_weight(&shares_id), 50);

    let paid = distributor.distribute(
        &issuer,
        &shares_id,
        &Some(payout.clone()),
        &1_000,
        &DistributionMode::Weighted,
        &50,
    );
    // 400/50 + 50/50 + 50/50
    assert_eq!(paid, 10);
    assert_eq!(balance(&env, &payout, &alice), 508);
    assert_eq!(balance(&env, &payout, &bob), 501);
    assert_eq!(balance(&env, &payout, &carol), 1);

    // Burning to zero removes Bob from the holder set entirely.
    shares.burn(&bob, &50);
    let holders = shares.holders();
    assert_eq!(holders.len(), 2);
    assert!(holders.iter().all(|h| h != bob));

    let paid = distributor.distribute(
        &issuer,
        &shares_id,
        &Some(payout.clone()),
        &900,
        &DistributionMode::Equal,
        &0,
    );
    assert_eq!(paid, 900);
    assert_eq!(balance(&env, &payout, &alice), 958);
    assert_eq!(balance(&env, &payout, &bob), 501);
    assert_eq!(balance(&env, &payout, &carol), 451);

    // 1000 + 10 + 900 left the issuer in total.
    assert_eq!(balance(&env, &payout, &issuer), 8_090);
}

// ============================================================================
// SALARY LIFECYCLE
// ============================================================================

#[test]
fn test_salary_workflow_end_to_end() {
    let env = env();
    let credential_id = env.register(StubCredential, ());
    let credential = StubCredentialClient::new(&env, &credential_id);
    let org = addr(&env);
    let salary_id = env.register(SalaryStreamContract, ());
    let salary = SalaryStreamContractClient::new(&env, &salary_id);
    salary.initialize(&credential_id, &org);

    let employer = addr(&env);
    let employee = addr(&env);
    credential.grant(&employer, &org);

    let wage_token = sac(&env);
    mint(&env, &wage_token, &employer, 9_000);
    approve(&env, &wage_token, &employer, &salary.address, 9_000);

    salary.add_employee(&employer, &employee);
    let amounts = vec![&env, 1_000i128, 1_000, 1_000, 1_500, 1_500];
    let id = salary.add_salary(&employer, &employee, &wage_token, &PERIOD, &amounts);
    assert_eq!(balance(&env, &wage_token, &employer), 3_000);

    // Two and a half periods in: 1000 + 1000 + 500.
    advance(&env, PERIOD * 2 + PERIOD / 2);
    assert_eq!(salary.withdraw_salary(&employee, &id), 2_500);
    assert_eq!(balance(&env, &wage_token, &employee), 2_500);

    // A raise: two more periods funded from the remaining allowance.
    let extra = vec![&env, 1_500i128, 1_500];
    salary.add_periods_to_salary(&employer, &id, &extra);
    assert_eq!(balance(&env, &wage_token, &employer), 0);
    assert_eq!(salary.get_salary(&id).unwrap().period_amounts.len(), 7);

    // Half a period later the employment ends. Accrued pay since the last
    // withdrawal: the other half of period 2 plus half of period 3.
    advance(&env, PERIOD);
    salary.remove_employee(&employer, &employee);
    assert_eq!(balance(&env, &wage_token, &employee), 2_500 + 500 + 750);
    // Everything unaccrued returns to the employer.
    assert_eq!(balance(&env, &wage_token, &employer), 5_250);
    assert_eq!(balance(&env, &wage_token, &salary.address), 0);
    assert!(!salary.is_employee(&employer, &employee));
    assert_eq!(salary.get_salary(&id), None);
}
