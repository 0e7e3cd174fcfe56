//! Full pipeline command implementation.
//!
//! Mirrors the six-stage flow: refresh both instrument dumps, reconcile
//! them into canonical catalogs, verify the session token, then resolve
//! the trading day, spot, and ATM strike and fetch both option legs.
//! Every stage is attempted and reported; only hard data dependencies
//! (no catalog, no token, no spot) skip downstream work.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use samvat_lib::prelude::*;
use samvat_lib::url::{GROWW_CATALOG_URL, NIFTY_SPOT_KEY, NSE_CATALOG_URL};

use crate::display::Summary;

pub(crate) async fn run(
    env_path: &Path,
    symbol: &str,
    strike_step: f64,
    expiry_override: Option<&str>,
    quiet: bool,
) -> Result<()> {
    let settings = Settings::load(env_path)?;
    let client = ApiClient::with_defaults(settings.upstox.access_token.as_str())?;
    let mut summary = Summary::new();

    // Stages 1-2: refresh both instrument dumps
    let nse_path = settings.nse_catalog_path()?;
    let nse_ok = refresh_catalog(&client, NSE_CATALOG_URL, &nse_path, quiet).await;
    summary.stage("NSE instrument dump", nse_ok);

    let groww_path = settings.groww_catalog_path()?;
    let groww_ok = refresh_catalog(&client, GROWW_CATALOG_URL, &groww_path, quiet).await;
    summary.stage("Groww instrument dump", groww_ok);

    // Stage 3: reconcile whatever is on disk into canonical symbol space.
    // A failed refresh can still reconcile from a previous run's files.
    let map = SymbolMap::default();
    let nse_catalog = load_nse_catalog(&nse_path, &map, quiet);
    let groww_catalog = load_groww_catalog(&groww_path, &map, quiet);
    if let (Some(nse), Some(groww)) = (&nse_catalog, &groww_catalog) {
        report_reconciliation(nse, groww, quiet);
    }
    summary.stage(
        "Catalog reconciliation",
        nse_catalog.is_some() && groww_catalog.is_some(),
    );

    // Stage 4: a session token is required for every market-data call
    let auth_ok = client.has_token();
    if !auth_ok && !quiet {
        println!("No access token configured; run `samvat auth` first");
    }
    summary.stage("Session token", auth_ok);

    // Stages 5-6: resolve the ATM pair and fetch both legs
    let fetched = match (&nse_catalog, auth_ok) {
        (Some(catalog), true) => {
            fetch_atm_legs(
                &client,
                &settings,
                catalog,
                symbol,
                strike_step,
                expiry_override,
                quiet,
            )
            .await?
        }
        _ => {
            if !quiet {
                println!("Skipping historical fetch");
            }
            false
        }
    };
    summary.stage("Historic ATM data", fetched);

    summary.print();
    if summary.all_ok() {
        Ok(())
    } else {
        bail!("{} stage(s) failed: {}", summary.failed().len(), summary.failed().join(", "));
    }
}

/// Downloads one instrument dump and stores it verbatim. Best-effort: a
/// failure leaves any previous file in place.
async fn refresh_catalog(client: &ApiClient, url: &str, path: &Path, quiet: bool) -> bool {
    match client.download(url).await {
        Fetched::Data(bytes) => {
            if let Some(parent) = path.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    if !quiet {
                        println!("Could not create {}: {e}", parent.display());
                    }
                    return false;
                }
            }
            match fs::write(path, &bytes) {
                Ok(()) => {
                    if !quiet {
                        println!("Stored {} ({} bytes)", path.display(), bytes.len());
                    }
                    true
                }
                Err(e) => {
                    if !quiet {
                        println!("Could not write {}: {e}", path.display());
                    }
                    false
                }
            }
        }
        Fetched::Failed { reason } => {
            if !quiet {
                println!("Download failed: {reason}");
            }
            false
        }
    }
}

fn load_nse_catalog(path: &Path, map: &SymbolMap, quiet: bool) -> Option<Vec<InstrumentRecord>> {
    let bytes = read_payload(path, quiet)?;
    match load_nse_json(&bytes) {
        Ok(records) => Some(map.apply(records)),
        Err(e) => {
            if !quiet {
                println!("NSE catalog unusable: {e}");
            }
            None
        }
    }
}

fn load_groww_catalog(path: &Path, map: &SymbolMap, quiet: bool) -> Option<Vec<InstrumentRecord>> {
    let bytes = read_payload(path, quiet)?;
    let text = String::from_utf8_lossy(&bytes);
    match load_groww_csv(&text) {
        Ok(records) => Some(map.apply(records)),
        Err(e) => {
            if !quiet {
                println!("Groww catalog unusable: {e}");
            }
            None
        }
    }
}

fn read_payload(path: &Path, quiet: bool) -> Option<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            if !quiet {
                println!("Could not read {}: {e}", path.display());
            }
            None
        }
    }
}

/// Reports how the two providers line up in canonical symbol space.
fn report_reconciliation(nse: &[InstrumentRecord], groww: &[InstrumentRecord], quiet: bool) {
    if quiet {
        return;
    }
    let canonical = |records: &[InstrumentRecord]| -> HashSet<String> {
        records
            .iter()
            .filter_map(|r| r.canonical().map(str::to_string))
            .collect()
    };
    let shared = canonical(nse).intersection(&canonical(groww)).count();
    println!(
        "Reconciled {} NSE and {} Groww records; {} canonical underlyings in both",
        nse.len(),
        groww.len(),
        shared
    );
}

/// Resolves trading day, spot, and ATM strike, then fetches and persists
/// both legs. Returns true if at least one leg was written.
async fn fetch_atm_legs(
    client: &ApiClient,
    settings: &Settings,
    catalog: &[InstrumentRecord],
    symbol: &str,
    strike_step: f64,
    expiry_override: Option<&str>,
    quiet: bool,
) -> Result<bool> {
    let expiry = match expiry_override {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .with_context(|| format!("Invalid expiry date: {text}"))?,
        None => match settings.upstox.expiry_date {
            Some(date) => date,
            None => {
                if !quiet {
                    println!("No target expiry configured; run `samvat auth` or pass --expiry");
                }
                return Ok(false);
            }
        },
    };

    // Holiday fetch failure degrades to "no known holidays"
    let holidays: HashSet<NaiveDate> = match client.market_holidays().await {
        Fetched::Data(dates) => dates.into_iter().collect(),
        Fetched::Failed { reason } => {
            if !quiet {
                println!("Holiday list unavailable ({reason}); assuming none");
            }
            HashSet::new()
        }
    };

    let today = chrono::Local::now().date_naive();
    let trading_day = last_trading_day(today, &holidays, DEFAULT_LOOKBACK_DAYS);
    if trading_day.fallback && !quiet {
        println!("Trading-day lookback exhausted; using {trading_day}");
    }

    let Some(spot_key) = spot_instrument_key(catalog, symbol) else {
        if !quiet {
            println!("No index instrument found for {symbol}");
        }
        return Ok(false);
    };

    let spot = match client.spot_close(&spot_key, trading_day.date).await {
        Fetched::Data(Some(close)) => close,
        Fetched::Data(None) => {
            if !quiet {
                println!("No spot candle for {symbol} on {}", trading_day.date);
            }
            return Ok(false);
        }
        Fetched::Failed { reason } => {
            if !quiet {
                println!("Spot lookup failed: {reason}");
            }
            return Ok(false);
        }
    };

    let strike = atm_strike(spot, strike_step)?;
    if !quiet {
        println!(
            "Target: {} | Spot: {spot:.2} | ATM: {strike} | Expiry: {expiry}",
            trading_day.date
        );
    }

    let historic_dir = settings.historic_dir()?;
    let mut written = 0;

    for side in OptionSide::BOTH {
        let Some(contract) = find_contract(catalog, symbol, expiry, strike, side)? else {
            if !quiet {
                println!("{side}: no contract at {strike} expiring {expiry}");
            }
            continue;
        };

        let candles = match client
            .minute_candles(contract.instrument_key(), trading_day.date)
            .await
        {
            Fetched::Data(candles) => candles,
            Fetched::Failed { reason } => {
                if !quiet {
                    println!("{side}: candle fetch failed: {reason}");
                }
                continue;
            }
        };

        match persist_leg(&historic_dir, contract, trading_day.date, &candles) {
            PersistResult::Written { path, candles } => {
                written += 1;
                if !quiet {
                    println!("{side}: {candles} candles -> {}", path.display());
                }
            }
            PersistResult::NoCandles => {
                if !quiet {
                    println!("{side}: no candles returned");
                }
            }
            PersistResult::WriteFailed { reason } => {
                if !quiet {
                    println!("{side}: write failed: {reason}");
                }
            }
        }
    }

    if !quiet {
        println!("Historic data: {written}/2 legs completed");
    }
    Ok(written > 0)
}

/// Finds the spot-lookup instrument key for an underlying: its index record
/// in the catalog, with a fixed fallback for NIFTY.
fn spot_instrument_key(catalog: &[InstrumentRecord], symbol: &str) -> Option<String> {
    catalog
        .iter()
        .find(|r| r.instrument_type() == InstrumentType::Index && r.symbol() == symbol)
        .map(|r| r.instrument_key().to_string())
        .or_else(|| (symbol == "NIFTY").then(|| NIFTY_SPOT_KEY.to_string()))
}
