use anchor_lang::prelude::*;

use crate::state::{BetSide, Outcome};

#[event]
pub struct MarketCreated {
    pub market: Pubkey,
    pub admin: Pubkey,
    pub question: String,
    pub expires_at: i64,
    pub min_bet_amount: u64,
}

#[event]
pub struct BetPlaced {
    pub market: Pubkey,
    pub user: Pubkey,
    pub side: BetSide,
    pub amount: u64,
    pub total_yes_amount: u64,
    pub total_no_amount: u64,
}

#[event]
pub struct MarketSettled {
    pub market: Pubkey,
    pub winning_outcome: Outcome,
    pub winning_side_total: u64,
    pub total_pool: u64,
}

#[event]
pub struct MarketCancelled {
    pub market: Pubkey,
    pub admin: Pubkey,
}

#[event]
pub struct WinningsWithdrawn {
    pub market: Pubkey,
    pub user: Pubkey,
    pub winning_stake: u64,
    pub payout: u64,
}

#[event]
pub struct RefundClaimed {
    pub market: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
}
