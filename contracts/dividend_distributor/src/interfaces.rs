use soroban_sdk::{contractclient, Address, Env, Vec};

/// Capability surface a reference token must expose to be distributable.
///
/// Tokens embed the `holder_registry` library to satisfy `holders`; plain
/// tokens without it are rejected up front as unsupported.
#[contractclient(name = "HolderTokenClient")]
pub trait HolderToken {
    /// Balance of `id`.
    fn balance(env: Env, id: Address) -> i128;

    /// Every address currently holding a non-zero balance.
    fn holders(env: Env) -> Vec<Address>;
}

/// Admin credential lookup. Owning the credential for `subject` grants the
/// right to administer that asset, including distributing its dividends.
#[contractclient(name = "CredentialClient")]
pub trait Credential {
    fn holds_credential_for(env: Env, holder: Address, subject: Address) -> bool;
}
