use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::events::MarketCancelled;
use crate::state::*;

#[derive(Accounts)]
pub struct CancelMarket<'info> {
    /// The market's recorded admin — the only identity allowed to cancel.
    #[account(
        constraint = admin.key() == market.admin @ MarketError::UnauthorizedAdmin,
    )]
    pub admin: Signer<'info>,

    /// The market to cancel. A settled market cannot be cancelled and
    /// a cancelled market cannot be cancelled twice.
    #[account(
        mut,
        constraint = !market.is_settled @ MarketError::MarketAlreadySettled,
        constraint = !market.is_cancelled @ MarketError::MarketAlreadyCancelled,
    )]
    pub market: Account<'info, Market>,
}

pub fn handler(ctx: Context<CancelMarket>) -> Result<()> {
    let market = &mut ctx.accounts.market;

    market.is_cancelled = true;

    emit!(MarketCancelled {
        market: market.key(),
        admin: ctx.accounts.admin.key(),
    });

    msg!("Market cancelled: {}", market.question);

    Ok(())
}
