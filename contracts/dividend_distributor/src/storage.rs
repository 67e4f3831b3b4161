use soroban_sdk::{contracttype, Address, Env};

/// Storage keys
#[contracttype]
#[derive(Clone)]
pub enum StorageKey {
    /// Credential contract consulted for distribution rights.
    Credential,
    /// Stellar Asset Contract of the native asset; target of the
    /// native-currency payout sentinel.
    NativeToken,
}

pub fn read_credential(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&StorageKey::Credential)
        .expect("Not initialized")
}

pub fn read_native_token(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&StorageKey::NativeToken)
        .expect("Not initialized")
}
