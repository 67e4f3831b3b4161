use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum DistributorError {
    /// Raised when the caller does not hold the admin credential for the
    /// reference token.
    NotAuthorized = 1,
    /// Raised when the reference token is the zero contract address.
    ZeroAddressToken = 2,
    /// Raised when the distribution amount is below one unit.
    InvalidAmount = 3,
    /// Raised when a weighted distribution is requested with weight < 1.
    WeightTooLow = 4,
    /// Raised when the weight would leave some holder with a zero share.
    WeightTooHigh = 5,
    /// Raised when the reference token does not expose a holder set.
    UnsupportedToken = 6,
    /// Raised when the reference token has no holders at all.
    NoReceivers = 7,
    /// Raised when the payer cannot cover the computed payout.
    InsufficientFunds = 8,
    /// Raised when the payer has not approved the engine for the pull.
    InsufficientAllowance = 9,
}
