use anchor_lang::prelude::*;

/// Custom error codes for the parimutuel markets program.
///
/// Every precondition violation fails the whole transaction; no
/// partial state mutation is ever persisted.
#[error_code]
pub enum MarketError {
    /// Question is empty or exceeds the maximum length.
    #[msg("Question is empty or too long (max 280 bytes)")]
    InvalidQuestion,

    /// The supplied digest does not match the hash of the question text.
    #[msg("Question hash does not match question text")]
    InvalidQuestionHash,

    /// Minimum bet must be greater than zero.
    #[msg("Minimum bet amount must be > 0")]
    InvalidMinBetAmount,

    /// Bet attempted on a settled, cancelled, or expired market.
    #[msg("Market is not active")]
    MarketNotActive,

    /// Bet amount is below the market's minimum stake.
    #[msg("Bet amount is below the minimum")]
    BetBelowMinimum,

    /// Settlement attempted before the market's expiry time.
    #[msg("Market has not expired yet")]
    MarketNotExpired,

    /// Redundant settle, or cancel of a settled market.
    #[msg("Market is already settled")]
    MarketAlreadySettled,

    /// Redundant cancel, or settle of a cancelled market.
    #[msg("Market is already cancelled")]
    MarketAlreadyCancelled,

    /// Withdrawal attempted before settlement.
    #[msg("Market is not settled yet")]
    MarketNotSettled,

    /// Refund attempted on a market that was not cancelled.
    #[msg("Market is not cancelled")]
    MarketNotCancelled,

    /// Caller is not the market's recorded admin.
    #[msg("Unauthorized: not the market admin")]
    UnauthorizedAdmin,

    /// Position does not belong to the calling user.
    #[msg("Position does not belong to this user")]
    InvalidUserPosition,

    /// Second withdrawal or refund attempt by the same position.
    #[msg("Winnings already claimed")]
    AlreadyClaimed,

    /// Position has zero stake on the winning side (or zero stake at all
    /// for a refund).
    #[msg("Nothing to claim for this position")]
    NothingToClaim,

    /// Settlement outcome must be Yes or No.
    #[msg("Invalid outcome")]
    InvalidOutcome,

    /// Additive or multiplicative step would overflow; the operation is
    /// rejected wholesale.
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
