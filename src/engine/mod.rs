pub mod payout;
pub mod ranking;
