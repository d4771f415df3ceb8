#![cfg_attr(not(test), no_std)]

pub mod channel;
pub mod config;
pub mod units;
