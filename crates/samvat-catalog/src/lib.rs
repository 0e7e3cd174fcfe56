//! Instrument catalog loading and reconciliation for samvat.
//!
//! This crate turns raw broker payloads into queryable catalogs:
//!
//! - [`load_nse_json`] - Upstox NSE instrument dump (gzip or plain JSON)
//! - [`load_groww_csv`] - Groww instrument dump (CSV with header row)
//! - [`SymbolMap`] - display-name to canonical-symbol normalization
//! - [`find_contract`] - option contract lookup by symbol/expiry/strike/side
//! - [`future_expiries`] - upcoming option expiries for an underlying
//!
//! Loaders operate on already-fetched payloads and perform no network I/O.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/samvat-rs/samvat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod groww;
mod locate;
mod nse;
mod symbols;

pub use error::CatalogError;
pub use groww::load_groww_csv;
pub use locate::{find_contract, future_expiries};
pub use nse::load_nse_json;
pub use symbols::SymbolMap;
