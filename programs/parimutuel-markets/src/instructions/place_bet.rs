use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::errors::MarketError;
use crate::events::BetPlaced;
use crate::state::*;

#[derive(Accounts)]
pub struct PlaceBet<'info> {
    /// The bettor placing the wager.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The prediction market. Terminal flags are checked here; the
    /// expiry check needs the clock and happens in the handler.
    #[account(
        mut,
        constraint = !market.is_settled && !market.is_cancelled
            @ MarketError::MarketNotActive,
    )]
    pub market: Account<'info, Market>,

    /// User position PDA — created on first bet, accumulated on
    /// subsequent bets by the same user.
    #[account(
        init_if_needed,
        payer = user,
        space = UserPosition::SIZE,
        seeds = [b"position", market.key().as_ref(), user.key().as_ref()],
        bump,
    )]
    pub user_position: Account<'info, UserPosition>,

    /// Bettor's token account, debited by `amount`.
    #[account(
        mut,
        constraint = user_token_account.owner == user.key(),
        constraint = user_token_account.mint == market.mint,
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Market vault, credited by `amount`.
    #[account(
        mut,
        address = market.vault,
        constraint = vault.mint == market.mint,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<PlaceBet>, side: BetSide, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let market = &mut ctx.accounts.market;
    let user_position = &mut ctx.accounts.user_position;

    require!(
        market.is_active(clock.unix_timestamp),
        MarketError::MarketNotActive
    );
    require!(amount >= market.min_bet_amount, MarketError::BetBelowMinimum);

    // First bet by this user on this market: fill in the fresh account.
    if user_position.market == Pubkey::default() {
        user_position.market = market.key();
        user_position.user = ctx.accounts.user.key();
        user_position.yes_amount = 0;
        user_position.no_amount = 0;
        user_position.has_claimed = false;
        user_position.bump = ctx.bumps.user_position;
    }

    let first_on_side = user_position.stake_on(side) == 0;

    // All overflow checks run before any funds move, so a rejected bet
    // leaves totals, vault, and position untouched.
    market.credit_stake(side, amount)?;
    user_position.credit_stake(side, amount)?;
    if first_on_side {
        match side {
            BetSide::Yes => {
                market.yes_bettors_count = market
                    .yes_bettors_count
                    .checked_add(1)
                    .ok_or(MarketError::ArithmeticOverflow)?;
            }
            BetSide::No => {
                market.no_bettors_count = market
                    .no_bettors_count
                    .checked_add(1)
                    .ok_or(MarketError::ArithmeticOverflow)?;
            }
        }
    }

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(BetPlaced {
        market: market.key(),
        user: ctx.accounts.user.key(),
        side,
        amount,
        total_yes_amount: market.total_yes_amount,
        total_no_amount: market.total_no_amount,
    });

    msg!(
        "Bet placed: {} on {:?} | pool: {}",
        amount,
        side,
        market.total_pool()?,
    );

    Ok(())
}
