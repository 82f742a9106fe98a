pub mod cancel;
pub mod claim_refund;
pub mod create_market;
pub mod place_bet;
pub mod settle;
pub mod withdraw;

pub use cancel::*;
pub use claim_refund::*;
pub use create_market::*;
pub use place_bet::*;
pub use settle::*;
pub use withdraw::*;
