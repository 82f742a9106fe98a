use anchor_lang::prelude::*;

use crate::errors::MarketError;

/// Maximum byte length of a market question.
pub const MAX_QUESTION_LEN: usize = 280;

/// ─── Market Account ───────────────────────────────────────────────
///
/// PDA: seeds = [b"market", admin.key, question_hash]
///
/// One binary prediction market. The address is fully determined by
/// `(admin, question_hash)`, so any client that knows both can locate
/// the market without a directory lookup, and re-creating the same
/// pair fails because the account already exists.
#[account]
#[derive(Default)]
pub struct Market {
    /// Identity authorized to settle or cancel. Set at creation, immutable.
    pub admin: Pubkey,

    /// SHA-256 digest of `question`; part of the PDA derivation.
    pub question_hash: [u8; 32],

    /// Human-readable question (max 280 bytes).
    pub question: String,

    /// Unix timestamp at creation.
    pub created_at: i64,

    /// Signed betting window. A negative value produces a market that is
    /// already expired at creation, which allows immediate settlement.
    pub duration_seconds: i64,

    /// Minimum stake accepted per bet.
    pub min_bet_amount: u64,

    // ─── Pool accounting ───
    /// Running sum of YES stakes. Non-decreasing while active.
    pub total_yes_amount: u64,

    /// Running sum of NO stakes. Non-decreasing while active.
    pub total_no_amount: u64,

    /// Distinct users with a nonzero YES stake.
    pub yes_bettors_count: u32,

    /// Distinct users with a nonzero NO stake.
    pub no_bettors_count: u32,

    // ─── Terminal state ───
    /// Settlement flag. Mutually exclusive with `is_cancelled`.
    pub is_settled: bool,

    /// Recorded winner. `Unresolved` until `is_settled`.
    pub winning_outcome: Outcome,

    /// Cancellation flag. Mutually exclusive with `is_settled`.
    pub is_cancelled: bool,

    /// Token mint the market escrows.
    pub mint: Pubkey,

    /// Vault token account (ATA owned by this market PDA).
    pub vault: Pubkey,

    /// Market PDA bump seed.
    pub bump: u8,
}

impl Market {
    /// Account size for Anchor allocation.
    pub const SIZE: usize = 8   // discriminator
        + 32                    // admin
        + 32                    // question_hash
        + (4 + MAX_QUESTION_LEN) // question
        + 8                     // created_at
        + 8                     // duration_seconds
        + 8                     // min_bet_amount
        + 8                     // total_yes_amount
        + 8                     // total_no_amount
        + 4                     // yes_bettors_count
        + 4                     // no_bettors_count
        + 1                     // is_settled
        + 1                     // winning_outcome
        + 1                     // is_cancelled
        + 32                    // mint
        + 32                    // vault
        + 1;                    // bump

    /// Expiry timestamp. Saturates rather than wrapping for extreme
    /// durations; a negative duration simply lands before `created_at`.
    pub fn expires_at(&self) -> i64 {
        self.created_at.saturating_add(self.duration_seconds)
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at()
    }

    /// Active means: neither terminal flag set and the betting window
    /// still open. The clock is injected so the state machine stays a
    /// pure function of its inputs.
    pub fn is_active(&self, now: i64) -> bool {
        !self.is_settled && !self.is_cancelled && now < self.expires_at()
    }

    /// Total funds wagered on both sides.
    pub fn total_pool(&self) -> Result<u64> {
        self.total_yes_amount
            .checked_add(self.total_no_amount)
            .ok_or_else(|| error!(MarketError::ArithmeticOverflow))
    }

    /// Record a stake on one side. Fails the whole bet on overflow;
    /// callers run this before moving any funds.
    pub fn credit_stake(&mut self, side: BetSide, amount: u64) -> Result<()> {
        match side {
            BetSide::Yes => {
                self.total_yes_amount = self
                    .total_yes_amount
                    .checked_add(amount)
                    .ok_or(MarketError::ArithmeticOverflow)?;
            }
            BetSide::No => {
                self.total_no_amount = self
                    .total_no_amount
                    .checked_add(amount)
                    .ok_or(MarketError::ArithmeticOverflow)?;
            }
        }
        Ok(())
    }

    pub fn side_total(&self, side: BetSide) -> u64 {
        match side {
            BetSide::Yes => self.total_yes_amount,
            BetSide::No => self.total_no_amount,
        }
    }

    /// The winning side, once settled.
    pub fn winning_side(&self) -> Option<BetSide> {
        match self.winning_outcome {
            Outcome::Yes => Some(BetSide::Yes),
            Outcome::No => Some(BetSide::No),
            Outcome::Unresolved => None,
        }
    }

    /// Parimutuel payout for a winning stake:
    ///
    ///   payout = winning_stake * (total_yes + total_no) / winning_side_total
    ///
    /// Each winning unit of stake is paid the entire pool pro-rated by
    /// share of the winning side; losing stakes are forfeited. A nonzero
    /// `winning_stake` implies `winning_side_total >= winning_stake > 0`,
    /// so the division is safe.
    pub fn calculate_payout(&self, winning_stake: u64) -> Result<u64> {
        require!(winning_stake > 0, MarketError::NothingToClaim);

        let side = self.winning_side().ok_or(MarketError::MarketNotSettled)?;
        let winning_side_total = self.side_total(side);
        let pool = self.total_pool()?;

        let payout = (winning_stake as u128)
            .checked_mul(pool as u128)
            .ok_or(MarketError::ArithmeticOverflow)?
            / winning_side_total as u128;

        u64::try_from(payout).map_err(|_| error!(MarketError::ArithmeticOverflow))
    }
}

/// ─── Bet Side ─────────────────────────────────────────────────────
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum BetSide {
    Yes,
    No,
}

/// ─── Outcome ──────────────────────────────────────────────────────
///
/// Recorded winner of a settled market.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Outcome {
    #[default]
    Unresolved,
    Yes,
    No,
}

/// ─── User Position ────────────────────────────────────────────────
///
/// PDA: seeds = [b"position", market.key, user.key]
///
/// Cumulative stake ledger for one user in one market. Created on the
/// user's first bet, never destroyed. A user may hold stake on both
/// sides; amounts accumulate across bets.
#[account]
#[derive(Default)]
pub struct UserPosition {
    /// The market this position belongs to.
    pub market: Pubkey,

    /// The user who owns this position.
    pub user: Pubkey,

    /// Cumulative YES stake.
    pub yes_amount: u64,

    /// Cumulative NO stake.
    pub no_amount: u64,

    /// One-way flag, flipped atomically with the payout or refund
    /// transfer. The sole guard against double payout.
    pub has_claimed: bool,

    /// Bump seed.
    pub bump: u8,
}

impl UserPosition {
    pub const SIZE: usize = 8   // discriminator
        + 32                    // market
        + 32                    // user
        + 8                     // yes_amount
        + 8                     // no_amount
        + 1                     // has_claimed
        + 1;                    // bump

    pub fn stake_on(&self, side: BetSide) -> u64 {
        match side {
            BetSide::Yes => self.yes_amount,
            BetSide::No => self.no_amount,
        }
    }

    /// Combined stake, both sides. The refund amount for a cancelled market.
    pub fn total_stake(&self) -> Result<u64> {
        self.yes_amount
            .checked_add(self.no_amount)
            .ok_or_else(|| error!(MarketError::ArithmeticOverflow))
    }

    pub fn credit_stake(&mut self, side: BetSide, amount: u64) -> Result<()> {
        match side {
            BetSide::Yes => {
                self.yes_amount = self
                    .yes_amount
                    .checked_add(amount)
                    .ok_or(MarketError::ArithmeticOverflow)?;
            }
            BetSide::No => {
                self.no_amount = self
                    .no_amount
                    .checked_add(amount)
                    .ok_or(MarketError::ArithmeticOverflow)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(created_at: i64, duration_seconds: i64) -> Market {
        Market {
            created_at,
            duration_seconds,
            min_bet_amount: 1_000_000,
            ..Default::default()
        }
    }

    #[test]
    fn fresh_market_is_active_with_zero_totals() {
        // 30-day window, created at t=1000
        let m = market(1000, 2_592_000);
        assert!(m.is_active(1000));
        assert!(m.is_active(1000 + 2_591_999));
        assert!(!m.is_active(1000 + 2_592_000));
        assert_eq!(m.total_pool().unwrap(), 0);
        assert!(!m.is_settled);
        assert!(!m.is_cancelled);
        assert_eq!(m.winning_outcome, Outcome::Unresolved);
    }

    #[test]
    fn negative_duration_expires_at_creation() {
        let m = market(1000, -10);
        assert!(m.is_expired(1000));
        assert!(!m.is_active(1000));
        assert!(!m.is_active(991));
    }

    #[test]
    fn terminal_flags_deactivate_market() {
        let mut m = market(1000, 2_592_000);
        m.is_settled = true;
        assert!(!m.is_active(1001));

        let mut m = market(1000, 2_592_000);
        m.is_cancelled = true;
        assert!(!m.is_active(1001));
    }

    #[test]
    fn stake_accounting_matches_positions() {
        let mut m = market(0, 3600);
        let mut alice = UserPosition::default();
        let mut bob = UserPosition::default();

        m.credit_stake(BetSide::Yes, 10_000_000).unwrap();
        alice.credit_stake(BetSide::Yes, 10_000_000).unwrap();
        m.credit_stake(BetSide::No, 4_000_000).unwrap();
        bob.credit_stake(BetSide::No, 4_000_000).unwrap();
        m.credit_stake(BetSide::No, 2_000_000).unwrap();
        alice.credit_stake(BetSide::No, 2_000_000).unwrap();

        assert_eq!(m.total_yes_amount, 10_000_000);
        assert_eq!(m.total_no_amount, 6_000_000);
        assert_eq!(
            m.total_pool().unwrap(),
            alice.total_stake().unwrap() + bob.total_stake().unwrap()
        );
        assert_eq!(alice.stake_on(BetSide::Yes), 10_000_000);
        assert_eq!(alice.stake_on(BetSide::No), 2_000_000);
    }

    #[test]
    fn stake_overflow_is_rejected_without_mutation() {
        let mut m = market(0, 3600);
        m.credit_stake(BetSide::Yes, u64::MAX).unwrap();
        assert!(m.credit_stake(BetSide::Yes, 1).is_err());
        assert_eq!(m.total_yes_amount, u64::MAX);

        // Cross-side sum overflows in total_pool, not in credit_stake
        m.credit_stake(BetSide::No, 1).unwrap();
        assert!(m.total_pool().is_err());
    }

    #[test]
    fn single_winner_takes_entire_pool() {
        let mut m = market(0, -1);
        m.credit_stake(BetSide::Yes, 20_000_000).unwrap();
        m.credit_stake(BetSide::No, 10_000_000).unwrap();
        m.is_settled = true;
        m.winning_outcome = Outcome::Yes;

        assert_eq!(m.calculate_payout(20_000_000).unwrap(), 30_000_000);
    }

    #[test]
    fn payouts_split_pool_proportionally() {
        let mut m = market(0, -1);
        m.credit_stake(BetSide::Yes, 30_000_000).unwrap();
        m.credit_stake(BetSide::Yes, 10_000_000).unwrap();
        m.credit_stake(BetSide::No, 60_000_000).unwrap();
        m.is_settled = true;
        m.winning_outcome = Outcome::Yes;

        let a = m.calculate_payout(30_000_000).unwrap();
        let b = m.calculate_payout(10_000_000).unwrap();
        assert_eq!(a, 75_000_000);
        assert_eq!(b, 25_000_000);
        assert!(a + b <= m.total_pool().unwrap());
    }

    #[test]
    fn truncating_division_never_overdraws_vault() {
        let mut m = market(0, -1);
        m.credit_stake(BetSide::Yes, 3).unwrap();
        m.credit_stake(BetSide::Yes, 3).unwrap();
        m.credit_stake(BetSide::Yes, 1).unwrap();
        m.credit_stake(BetSide::No, 3).unwrap();
        m.is_settled = true;
        m.winning_outcome = Outcome::Yes;

        let total: u64 = [3u64, 3, 1]
            .iter()
            .map(|&s| m.calculate_payout(s).unwrap())
            .sum();
        assert!(total <= m.total_pool().unwrap());
    }

    #[test]
    fn zero_winning_stake_has_nothing_to_claim() {
        let mut m = market(0, -1);
        m.credit_stake(BetSide::Yes, 20_000_000).unwrap();
        m.credit_stake(BetSide::No, 10_000_000).unwrap();
        m.is_settled = true;
        m.winning_outcome = Outcome::Yes;

        // A pure NO position has zero stake on the winning side
        let loser = UserPosition {
            no_amount: 10_000_000,
            ..Default::default()
        };
        assert_eq!(loser.stake_on(BetSide::Yes), 0);
        assert!(m.calculate_payout(0).is_err());
    }

    #[test]
    fn payout_requires_settlement() {
        let mut m = market(0, -1);
        m.credit_stake(BetSide::Yes, 1_000_000).unwrap();
        assert!(m.winning_side().is_none());
        assert!(m.calculate_payout(1_000_000).is_err());
    }

    #[test]
    fn payout_fits_u64_via_u128_intermediate() {
        let mut m = market(0, -1);
        m.credit_stake(BetSide::Yes, u64::MAX - 1).unwrap();
        m.credit_stake(BetSide::No, 1).unwrap();
        m.is_settled = true;
        m.winning_outcome = Outcome::Yes;

        assert_eq!(m.calculate_payout(u64::MAX - 1).unwrap(), u64::MAX);
    }

    #[test]
    fn refund_is_full_stake_both_sides() {
        let pos = UserPosition {
            yes_amount: 7_000_000,
            no_amount: 3_000_000,
            ..Default::default()
        };
        assert_eq!(pos.total_stake().unwrap(), 10_000_000);
    }
}
