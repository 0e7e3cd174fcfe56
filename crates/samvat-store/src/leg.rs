//! Option-leg artifact serialization.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use samvat_types::{Candle, InstrumentRecord, InstrumentType, OptionSide};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from reading an artifact back.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One persisted option leg: contract metadata, the trading date, and the
/// day's candles in ascending timestamp order.
///
/// The contract fields are flattened into the top level of the JSON
/// document, so the artifact reads as "the contract, annotated with its
/// trading date and candles".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegArtifact {
    /// The located option contract.
    #[serde(flatten)]
    pub contract: InstrumentRecord,
    /// The trading day the candles cover.
    pub trading_date: NaiveDate,
    /// The day's candles, ascending by timestamp.
    pub candles: Vec<Candle>,
}

/// Outcome of a persist call, so the caller can count completed legs.
#[derive(Debug)]
#[must_use]
pub enum PersistResult {
    /// The fetch returned zero candles; nothing was written.
    NoCandles,
    /// The artifact was written.
    Written {
        /// Path of the written file.
        path: PathBuf,
        /// Number of candles in the artifact.
        candles: usize,
    },
    /// Writing failed.
    WriteFailed {
        /// Human-readable failure reason.
        reason: String,
    },
}

impl PersistResult {
    /// Returns true if the artifact was written.
    #[must_use]
    pub const fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// Builds the artifact filename for a leg: `{strike}_{DDMM}_{ce|pe}.json`.
///
/// The strike is printed without decimals (strikes are whole multiples of
/// the granularity) and the date as day-month, matching the files existing
/// downstream tooling expects.
#[must_use]
pub fn leg_filename(strike: f64, trading_day: NaiveDate, side: OptionSide) -> String {
    format!(
        "{}_{}_{}.json",
        strike as i64,
        trading_day.format("%d%m"),
        side.as_lower()
    )
}

/// Persists one option leg to `dir`, overwriting any previous artifact at
/// the same path. The leg's side is read off the contract itself.
///
/// An empty candle slice yields [`PersistResult::NoCandles`] without
/// touching the filesystem. Write failures are reported in the result, not
/// raised: one failed leg must not abort the sibling leg.
pub fn persist_leg(
    dir: &Path,
    contract: &InstrumentRecord,
    trading_day: NaiveDate,
    candles: &[Candle],
) -> PersistResult {
    if candles.is_empty() {
        return PersistResult::NoCandles;
    }

    let side = match contract.instrument_type() {
        InstrumentType::Ce => OptionSide::Call,
        InstrumentType::Pe => OptionSide::Put,
        other => {
            return PersistResult::WriteFailed {
                reason: format!(
                    "contract {} is not an option (type {other})",
                    contract.instrument_key()
                ),
            };
        }
    };
    let Some(strike) = contract.strike_price() else {
        return PersistResult::WriteFailed {
            reason: format!("contract {} has no strike price", contract.instrument_key()),
        };
    };

    let artifact = LegArtifact {
        contract: contract.clone(),
        trading_date: trading_day,
        candles: candles.to_vec(),
    };

    let path = dir.join(leg_filename(strike, trading_day, side));
    match write_artifact(dir, &path, &artifact) {
        Ok(()) => PersistResult::Written {
            path,
            candles: candles.len(),
        },
        Err(e) => PersistResult::WriteFailed {
            reason: e.to_string(),
        },
    }
}

/// Reads an artifact back from disk.
///
/// # Errors
///
/// Returns [`StoreError`] if the file cannot be read or parsed.
pub fn read_leg(path: &Path) -> Result<LegArtifact, StoreError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn write_artifact(dir: &Path, path: &Path, artifact: &LegArtifact) -> Result<(), StoreError> {
    fs::create_dir_all(dir)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), artifact)?;
    Ok(())
}
