//! Trading-day and ATM strike resolution for samvat.
//!
//! This crate holds the pipeline's pure derivation logic:
//!
//! - [`last_trading_day`] - most recent weekday not in the holiday set
//! - [`atm_strike`] - nearest strike for a spot price and granularity
//! - [`nearest_thursday`] - weekly index-expiry fallback
//!
//! Nothing here performs I/O; holiday lists and spot prices are supplied
//! by the caller.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/samvat-rs/samvat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod calendar;
mod strike;

pub use calendar::{DEFAULT_LOOKBACK_DAYS, TradingDay, last_trading_day, nearest_thursday};
pub use strike::{StrikeError, atm_strike};
