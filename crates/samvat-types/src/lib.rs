//! Core types for samvat NSE option data downloader.
//!
//! This crate provides the fundamental data structures used throughout samvat:
//!
//! - [`InstrumentRecord`] - One instrument from a broker catalog snapshot
//! - [`InstrumentType`] - Instrument classification (CE, PE, FUT, ...)
//! - [`OptionSide`] - Call/put side of an option pair
//! - [`Candle`] - A single OHLCV bar with an epoch-millisecond timestamp
//! - [`Fetched`] - Tagged outcome of a best-effort network call

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/samvat-rs/samvat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod candle;
mod instrument;
mod outcome;

pub use candle::Candle;
pub use instrument::{InstrumentRecord, InstrumentType, OptionSide};
pub use outcome::Fetched;
