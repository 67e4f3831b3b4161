use soroban_sdk::{contractclient, Address, Env};

/// Admin credential lookup. The engine is configured with a subject asset
/// at initialization; holding the credential for it makes an address an
/// employer here.
#[contractclient(name = "CredentialClient")]
pub trait Credential {
    fn holds_credential_for(env: Env, holder: Address, subject: Address) -> bool;
}
