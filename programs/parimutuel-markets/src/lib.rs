use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;
use state::{BetSide, Outcome};

declare_id!("H9FmHbWSRvSrkgaFyUr3Hi2ZDDzhpepmBo6FyHEDZMEq");

#[program]
pub mod parimutuel_markets {
    use super::*;

    /// Create a new binary prediction market.
    ///
    /// The market address is derived from `(admin, question_hash)`, so
    /// the same admin cannot create the same question twice. The vault
    /// token account is opened in the same transaction. A negative
    /// `duration_seconds` is allowed and yields a market that is
    /// expired from the start (settleable immediately).
    pub fn create_market(
        ctx: Context<CreateMarket>,
        question_hash: [u8; 32],
        question: String,
        duration_seconds: i64,
        min_bet_amount: u64,
    ) -> Result<()> {
        instructions::create_market::handler(
            ctx,
            question_hash,
            question,
            duration_seconds,
            min_bet_amount,
        )
    }

    /// Place a bet on YES or NO.
    ///
    /// Transfers `amount` from the bettor into the market vault and
    /// accumulates it onto the bettor's position and the market's
    /// per-side total. A user may bet on both sides across calls.
    pub fn place_bet(ctx: Context<PlaceBet>, side: BetSide, amount: u64) -> Result<()> {
        instructions::place_bet::handler(ctx, side, amount)
    }

    /// Record the winning outcome of an expired market.
    ///
    /// Admin only. Settlement only records the outcome — no funds move
    /// here; winners withdraw individually afterwards. Irreversible.
    pub fn settle_market(ctx: Context<SettleMarket>, winning_outcome: Outcome) -> Result<()> {
        instructions::settle::handler(ctx, winning_outcome)
    }

    /// Withdraw a winning position's share of the pool.
    ///
    ///   payout = winning_stake * (total_yes + total_no) / winning_side_total
    ///
    /// Losing stakes are forfeited. Each position can claim exactly once;
    /// the claim flag flips in the same transaction as the transfer.
    pub fn withdraw_winnings(ctx: Context<WithdrawWinnings>) -> Result<()> {
        instructions::withdraw::handler(ctx)
    }

    /// Cancel a market that has not been settled.
    ///
    /// Admin only. Irreversible; bettors recover their stakes via
    /// `claim_refund`.
    pub fn cancel_market(ctx: Context<CancelMarket>) -> Result<()> {
        instructions::cancel::handler(ctx)
    }

    /// Claim back the full original stake from a cancelled market.
    ///
    /// Returns `yes_amount + no_amount` — no proportional math applies
    /// to refunds. Each position can claim exactly once.
    pub fn claim_refund(ctx: Context<ClaimRefund>) -> Result<()> {
        instructions::claim_refund::handler(ctx)
    }
}
