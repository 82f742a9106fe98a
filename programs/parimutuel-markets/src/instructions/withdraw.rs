use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::errors::MarketError;
use crate::events::WinningsWithdrawn;
use crate::state::*;

#[derive(Accounts)]
pub struct WithdrawWinnings<'info> {
    /// The user claiming their payout.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The settled market.
    #[account(
        constraint = market.is_settled @ MarketError::MarketNotSettled,
    )]
    pub market: Account<'info, Market>,

    /// The user's position. The claim flag is the sole double-payout
    /// guard; it flips in the same transaction as the transfer.
    #[account(
        mut,
        seeds = [b"position", market.key().as_ref(), user.key().as_ref()],
        bump = user_position.bump,
        constraint = user_position.user == user.key() @ MarketError::InvalidUserPosition,
        constraint = !user_position.has_claimed @ MarketError::AlreadyClaimed,
    )]
    pub user_position: Account<'info, UserPosition>,

    /// Market vault, debited by the payout.
    #[account(
        mut,
        address = market.vault,
        constraint = vault.mint == market.mint,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// User's token account, credited by the payout.
    #[account(
        mut,
        constraint = user_token_account.owner == user.key(),
        constraint = user_token_account.mint == market.mint,
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<WithdrawWinnings>) -> Result<()> {
    let market = &ctx.accounts.market;
    let user_position = &mut ctx.accounts.user_position;

    let winning_side = market
        .winning_side()
        .ok_or(MarketError::MarketNotSettled)?;
    let winning_stake = user_position.stake_on(winning_side);
    require!(winning_stake > 0, MarketError::NothingToClaim);

    let payout = market.calculate_payout(winning_stake)?;

    // Vault transfers are signed by the market PDA (vault authority).
    let seeds: &[&[u8]] = &[
        b"market",
        market.admin.as_ref(),
        market.question_hash.as_ref(),
        &[market.bump],
    ];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.user_token_account.to_account_info(),
                authority: ctx.accounts.market.to_account_info(),
            },
            &[seeds],
        ),
        payout,
    )?;

    user_position.has_claimed = true;

    emit!(WinningsWithdrawn {
        market: market.key(),
        user: ctx.accounts.user.key(),
        winning_stake,
        payout,
    });

    msg!(
        "Winnings withdrawn: {} | winning stake: {}",
        payout,
        winning_stake,
    );

    Ok(())
}
