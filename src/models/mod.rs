pub mod account;
pub mod courier;
pub mod kitchen_worker;
pub mod order;
pub mod payout;
