//! Credential and environment file handling for samvat.
//!
//! This crate owns the operator-edited JSON environment file:
//!
//! - [`Settings`] - credentials, access token, target expiry, data dir
//! - [`Settings::load`] - read, or create a blank skeleton on first use
//! - [`Settings::save`] - write back after a token refresh
//! - [`default_env_path`] - platform config location

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/samvat-rs/samvat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod env;

pub use env::{ConfigError, Credentials, Settings, default_env_path};
