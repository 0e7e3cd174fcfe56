//! Expiry listing command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use samvat_lib::prelude::*;

pub(crate) fn expiries(env_path: &Path, symbol: &str) -> Result<()> {
    let settings = Settings::load(env_path)?;
    let catalog_path = settings.nse_catalog_path()?;

    let bytes = fs::read(&catalog_path).with_context(|| {
        format!(
            "No catalog at {}; run `samvat catalogs` first",
            catalog_path.display()
        )
    })?;
    let catalog = SymbolMap::default().apply(load_nse_json(&bytes)?);

    let today = chrono::Local::now().date_naive();
    let upcoming = future_expiries(&catalog, symbol, today);

    if upcoming.is_empty() {
        println!("No upcoming option expiries for {symbol}");
        return Ok(());
    }

    println!("Upcoming {symbol} option expiries:");
    for expiry in upcoming {
        println!("  {expiry}");
    }
    Ok(())
}
