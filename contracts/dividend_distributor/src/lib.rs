#![no_std]

//! Dividend distribution engine.
//!
//! Pays a dividend asset pro rata to the current holder set of a reference
//! token, either as an equal split of a fixed pot or as one payout unit per
//! `weight` units of reference balance. There is no snapshot or epoch
//! mechanism: entitlements are computed from live balances at the moment of
//! distribution, and the whole run is a single atomic invocation.
//!
//! Funding is pull-based. The run pulls exactly what it will pay from the
//! caller's allowance, pays each holder from the contract address, and
//! returns whatever a failed leg leaves behind before the call ends, so the
//! engine never holds funds between invocations.

mod error;
mod events;
mod interfaces;
mod storage;

pub use error::DistributorError;
pub use interfaces::{Credential, CredentialClient, HolderToken, HolderTokenClient};

use events::DistributionCompleted;
use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env, Symbol, Val, Vec};
use storage::StorageKey;

/// Strkey of the all-zero contract id, rejected as a reference token.
const ZERO_CONTRACT: &str = "CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSC4";

/// How a distribution divides the pot.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DistributionMode {
    /// Every holder receives `amount / holder_count`, rounded down.
    Equal,
    /// Every holder receives `balance / weight`, rounded down.
    Weighted,
}

#[contract]
pub struct DividendDistributorContract;

#[contractimpl]
impl DividendDistributorContract {
    /// Initializes the engine with the credential contract gating
    /// distribution rights and the native-asset contract backing the
    /// native-currency payout sentinel.
    pub fn initialize(env: Env, credential: Address, native_token: Address) {
        if env.storage().persistent().has(&StorageKey::Credential) {
            panic!("Already initialized");
        }
        env.storage()
            .persistent()
            .set(&StorageKey::Credential, &credential);
        env.storage()
            .persistent()
            .set(&StorageKey::NativeToken, &native_token);
    }

    /// Distributes `amount` of `payout_token` to the current holders of
    /// `reference_token`. `payout_token: None` pays the native asset.
    ///
    /// Equal mode splits `amount` evenly; the division remainder is never
    /// pulled and stays with the payer. Weighted mode pays
    /// `balance / weight` per holder and treats `amount` as the payer's
    /// spend cap. The engine's own address never receives a share. A
    /// failed transfer leg is skipped and its funds are refunded to the
    /// payer; the remaining legs still settle.
    ///
    /// Returns the total actually paid out.
    pub fn distribute(
        env: Env,
        caller: Address,
        reference_token: Address,
        payout_token: Option<Address>,
        amount: i128,
        mode: DistributionMode,
        weight: i128,
    ) -> Result<i128, DistributorError> {
        caller.require_auth();

        if reference_token == Address::from_str(&env, ZERO_CONTRACT) {
            return Err(DistributorError::ZeroAddressToken);
        }
        require_credential(&env, &caller, &reference_token)?;
        if amount < 1 {
            return Err(DistributorError::InvalidAmount);
        }
        if mode == DistributionMode::Weighted && weight < 1 {
            return Err(DistributorError::WeightTooLow);
        }

        let payout = payout_token.unwrap_or_else(|| storage::read_native_token(&env));
        let holders = fetch_holders(&env, &reference_token)?;
        if holders.is_empty() {
            return Err(DistributorError::NoReceivers);
        }

        let this = env.current_contract_address();
        let receivers = receivers_of(&env, &holders, &this);
        if receivers.is_empty() {
            // The engine was the only holder: nothing to pay, but the run
            // completes and is observable.
            events::emit_distribution_completed(
                &env,
                DistributionCompleted {
                    reference_token,
                    payout_token: payout,
                    total_paid: 0,
                    receivers: 0,
                    skipped: 0,
                },
            );
            return Ok(0);
        }

        let payout_client = token::Client::new(&env, &payout);
        let n = receivers.len();

        let mut shares: Vec<i128> = Vec::new(&env);
        let pulled: i128;
        match mode {
            DistributionMode::Equal => {
                if payout_client.balance(&caller) < amount {
                    return Err(DistributorError::InsufficientFunds);
                }
                let share = amount / i128::from(n);
                for _ in 0..n {
                    shares.push_back(share);
                }
                pulled = share.checked_mul(i128::from(n)).expect("Amount overflow");
            }
            DistributionMode::Weighted => {
                let reference_client = HolderTokenClient::new(&env, &reference_token);
                let mut required = 0i128;
                let mut min_balance = i128::MAX;
                for holder in receivers.iter() {
                    let balance = reference_client.balance(&holder);
                    if balance < min_balance {
                        min_balance = balance;
                    }
                    let share = balance / weight;
                    required = required.checked_add(share).expect("Amount overflow");
                    shares.push_back(share);
                }
                if weight > min_balance {
                    return Err(DistributorError::WeightTooHigh);
                }
                if required > amount || payout_client.balance(&caller) < required {
                    return Err(DistributorError::InsufficientFunds);
                }
                pulled = required;
            }
        }

        if pulled > 0 {
            if payout_client.allowance(&caller, &this) < pulled {
                return Err(DistributorError::InsufficientAllowance);
            }
            payout_client.transfer_from(&this, &caller, &this, &pulled);
        }

        let mut total_paid = 0i128;
        let mut skipped = 0u32;
        for i in 0..n {
            let share = shares.get_unchecked(i);
            if share == 0 {
                continue;
            }
            let to = receivers.get_unchecked(i);
            if payout_client.try_transfer(&this, &to, &share).is_ok() {
                total_paid += share;
            } else {
                skipped += 1;
            }
        }

        let leftover = pulled - total_paid;
        if leftover > 0 {
            payout_client.transfer(&this, &caller, &leftover);
        }

        events::emit_distribution_completed(
            &env,
            DistributionCompleted {
                reference_token,
                payout_token: payout,
                total_paid,
                receivers: n,
                skipped,
            },
        );
        Ok(total_paid)
    }

    /// The largest weight that still gives every holder a non-zero share:
    /// the minimum balance across receivers.
    pub fn calc_min_weight(
        env: Env,
        reference_token: Address,
    ) -> Result<i128, DistributorError> {
        let holders = fetch_holders(&env, &reference_token)?;
        if holders.is_empty() {
            return Err(DistributorError::NoReceivers);
        }
        let this = env.current_contract_address();
        let receivers = receivers_of(&env, &holders, &this);
        if receivers.is_empty() {
            return Err(DistributorError::NoReceivers);
        }
        let reference_client = HolderTokenClient::new(&env, &reference_token);
        let mut min_balance = i128::MAX;
        for holder in receivers.iter() {
            let balance = reference_client.balance(&holder);
            if balance < min_balance {
                min_balance = balance;
            }
        }
        Ok(min_balance)
    }

    pub fn get_credential(env: Env) -> Address {
        storage::read_credential(&env)
    }

    pub fn get_native_token(env: Env) -> Address {
        storage::read_native_token(&env)
    }
}

/// Probes the holder-enumeration capability. A reference token without it
/// is rejected before any state changes.
fn fetch_holders(env: &Env, token: &Address) -> Result<Vec<Address>, DistributorError> {
    let args: Vec<Val> = Vec::new(env);
    match env.try_invoke_contract::<Vec<Address>, soroban_sdk::Error>(
        token,
        &Symbol::new(env, "holders"),
        args,
    ) {
        Ok(Ok(holders)) => Ok(holders),
        _ => Err(DistributorError::UnsupportedToken),
    }
}

fn receivers_of(env: &Env, holders: &Vec<Address>, this: &Address) -> Vec<Address> {
    let mut receivers = Vec::new(env);
    for holder in holders.iter() {
        if holder != *this {
            receivers.push_back(holder);
        }
    }
    receivers
}

fn require_credential(
    env: &Env,
    caller: &Address,
    subject: &Address,
) -> Result<(), DistributorError> {
    let credential = storage::read_credential(env);
    if CredentialClient::new(env, &credential).holds_credential_for(caller, subject) {
        Ok(())
    } else {
        Err(DistributorError::NotAuthorized)
    }
}
