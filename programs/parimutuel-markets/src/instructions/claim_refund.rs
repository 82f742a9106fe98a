use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::errors::MarketError;
use crate::events::RefundClaimed;
use crate::state::*;

#[derive(Accounts)]
pub struct ClaimRefund<'info> {
    /// The user claiming their refund.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The cancelled market.
    #[account(
        constraint = market.is_cancelled @ MarketError::MarketNotCancelled,
    )]
    pub market: Account<'info, Market>,

    /// The user's position. Reuses the claim flag: a position refunds
    /// at most once, and never after a payout.
    #[account(
        mut,
        seeds = [b"position", market.key().as_ref(), user.key().as_ref()],
        bump = user_position.bump,
        constraint = user_position.user == user.key() @ MarketError::InvalidUserPosition,
        constraint = !user_position.has_claimed @ MarketError::AlreadyClaimed,
    )]
    pub user_position: Account<'info, UserPosition>,

    /// Market vault, debited by the refund.
    #[account(
        mut,
        address = market.vault,
        constraint = vault.mint == market.mint,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// User's token account, credited by the refund.
    #[account(
        mut,
        constraint = user_token_account.owner == user.key(),
        constraint = user_token_account.mint == market.mint,
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<ClaimRefund>) -> Result<()> {
    let market = &ctx.accounts.market;
    let user_position = &mut ctx.accounts.user_position;

    // Refunds return the full original stake, both sides combined.
    // No proportional math applies here.
    let refund = user_position.total_stake()?;
    require!(refund > 0, MarketError::NothingToClaim);

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
        refund,
    )?;

    user_position.has_claimed = true;

    emit!(RefundClaimed {
        market: market.key(),
        user: ctx.accounts.user.key(),
        amount: refund,
    });

    msg!("Refund claimed: {}", refund);

    Ok(())
}
