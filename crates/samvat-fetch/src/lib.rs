//! HTTP client and market-data endpoints for samvat.
//!
//! This crate provides the pipeline's network layer:
//!
//! - [`ApiClient`] - bearer-token HTTP client with bounded timeouts
//! - [`ApiClient::market_holidays`] / [`ApiClient::spot_close`] /
//!   [`ApiClient::minute_candles`] - best-effort market-data calls
//! - [`ApiClient::download`] - raw catalog payload download
//! - [`auth`] - login-dialog URL and authorization-code exchange

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/samvat-rs/samvat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
mod client;
mod market;
pub mod url;

pub use client::{ApiClient, ClientConfig};
