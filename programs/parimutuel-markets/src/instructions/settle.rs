use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::events::MarketSettled;
use crate::state::*;

#[derive(Accounts)]
pub struct SettleMarket<'info> {
    /// The market's recorded admin — the only identity allowed to settle.
    #[account(
        constraint = admin.key() == market.admin @ MarketError::UnauthorizedAdmin,
    )]
    pub admin: Signer<'info>,

    /// The market to settle. Must still be active; both terminal states
    /// reject a second transition.
    #[account(
        mut,
        constraint = !market.is_settled @ MarketError::MarketAlreadySettled,
        constraint = !market.is_cancelled @ MarketError::MarketAlreadyCancelled,
    )]
    pub market: Account<'info, Market>,
}

pub fn handler(ctx: Context<SettleMarket>, winning_outcome: Outcome) -> Result<()> {
    require!(
        winning_outcome != Outcome::Unresolved,
        MarketError::InvalidOutcome
    );

    let clock = Clock::get()?;
    let market = &mut ctx.accounts.market;

    // A negative duration makes this true from the moment of creation.
    require!(
        market.is_expired(clock.unix_timestamp),
        MarketError::MarketNotExpired
    );

    market.is_settled = true;
    market.winning_outcome = winning_outcome;

    let winning_side = market.winning_side().ok_or(MarketError::InvalidOutcome)?;
    let winning_side_total = market.side_total(winning_side);

    emit!(MarketSettled {
        market: market.key(),
        winning_outcome,
        winning_side_total,
        total_pool: market.total_pool()?,
    });

    msg!(
        "Market settled: {:?} wins | winning pool: {} | total pool: {}",
        winning_outcome,
        winning_side_total,
        market.total_pool()?,
    );

    Ok(())
}
