use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::MarketError;
use crate::events::MarketCreated;
use crate::state::*;

#[derive(Accounts)]
#[instruction(question_hash: [u8; 32])]
pub struct CreateMarket<'info> {
    /// Market admin — pays for account allocation and is the only
    /// identity allowed to settle or cancel later.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Market PDA, derived from the admin and the question digest so
    /// clients can locate it without a directory lookup.
    #[account(
        init,
        payer = admin,
        space = Market::SIZE,
        seeds = [b"market", admin.key().as_ref(), question_hash.as_ref()],
        bump,
    )]
    pub market: Account<'info, Market>,

    /// Token mint the market escrows.
    pub mint: Account<'info, Mint>,

    /// Vault — the market's associated token account; holds every
    /// wagered unit until withdrawal or refund.
    #[account(
        init,
        payer = admin,
        associated_token::mint = mint,
        associated_token::authority = market,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn handler(
    ctx: Context<CreateMarket>,
    question_hash: [u8; 32],
    question: String,
    duration_seconds: i64,
    min_bet_amount: u64,
) -> Result<()> {
    require!(
        !question.is_empty() && question.len() <= MAX_QUESTION_LEN,
        MarketError::InvalidQuestion
    );
    require!(
        hash(question.as_bytes()).to_bytes() == question_hash,
        MarketError::InvalidQuestionHash
    );
    require!(min_bet_amount > 0, MarketError::InvalidMinBetAmount);

    // duration_seconds is intentionally unconstrained: a negative value
    // creates an already-expired market that can be settled immediately.

    let clock = Clock::get()?;
    let market = &mut ctx.accounts.market;

    market.admin = ctx.accounts.admin.key();
    market.question_hash = question_hash;
    market.question = question;
    market.created_at = clock.unix_timestamp;
    market.duration_seconds = duration_seconds;
    market.min_bet_amount = min_bet_amount;
    market.total_yes_amount = 0;
    market.total_no_amount = 0;
    market.yes_bettors_count = 0;
    market.no_bettors_count = 0;
    market.is_settled = false;
    market.winning_outcome = Outcome::Unresolved;
    market.is_cancelled = false;
    market.mint = ctx.accounts.mint.key();
    market.vault = ctx.accounts.vault.key();
    market.bump = ctx.bumps.market;

    emit!(MarketCreated {
        market: market.key(),
        admin: market.admin,
        question: market.question.clone(),
        expires_at: market.expires_at(),
        min_bet_amount,
    });

    msg!(
        "Market created: {} | expires at: {} | min bet: {}",
        market.question,
        market.expires_at(),
        market.min_bet_amount,
    );

    Ok(())
}
