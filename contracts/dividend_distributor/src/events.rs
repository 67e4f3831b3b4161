use soroban_sdk::{contractevent, Address, Env};

/// Event: distribution run completed. Aggregate totals only; per-recipient
/// detail is reconstructable from the token's own transfer events.
#[contractevent]
#[derive(Clone, Debug)]
pub struct DistributionCompleted {
    pub reference_token: Address,
    pub payout_token: Address,
    pub total_paid: i128,
    pub receivers: u32,
    pub skipped: u32,
}

pub fn emit_distribution_completed(e: &Env, event: DistributionCompleted) {
    event.publish(e);
}
