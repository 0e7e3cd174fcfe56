//! Persisted option-leg artifacts for samvat.
//!
//! This crate serializes a fetched option leg to its durable record:
//!
//! - [`LegArtifact`] - contract metadata + trading date + candles
//! - [`persist_leg`] - whole-file write with the tri-state [`PersistResult`]
//! - [`read_leg`] - reads an artifact back
//! - [`leg_filename`] - the `{strike}_{DDMM}_{ce|pe}.json` convention

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/samvat-rs/samvat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod leg;

pub use leg::{LegArtifact, PersistResult, StoreError, leg_filename, persist_leg, read_leg};
