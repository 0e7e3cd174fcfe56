//! Access-token command implementation.
//!
//! The broker login itself happens in a browser; this command prints the
//! login URL, takes the pasted redirect URL (or an explicit `--code`),
//! exchanges the code for a token, and stores the token together with the
//! nearest future option expiry read from the catalog.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use samvat_lib::auth::{auth_code_from_redirect, exchange_code, login_url};
use samvat_lib::prelude::*;

pub(crate) async fn auth(env_path: &Path, code: Option<&str>) -> Result<()> {
    let mut settings = Settings::load(env_path)?;
    if !settings.has_credentials() {
        bail!(
            "API key and secret are not configured; edit {}",
            env_path.display()
        );
    }

    let code = match code {
        Some(code) => code.to_string(),
        None => prompt_for_code(&settings)?,
    };

    let token = exchange_code(
        &settings.upstox.api_key,
        &settings.upstox.api_secret,
        &settings.upstox.redirect_url,
        &code,
    )
    .await?;

    let today = chrono::Local::now().date_naive();
    let expiry = target_expiry(&settings, today);

    settings.upstox.access_token = token;
    settings.upstox.expiry_date = Some(expiry);
    settings.save(env_path)?;

    println!("Access token updated in {}", env_path.display());
    println!("Target expiry: {expiry}");
    Ok(())
}

/// Prints the login URL and extracts the code from the pasted redirect URL.
fn prompt_for_code(settings: &Settings) -> Result<String> {
    println!(
        "Open this URL, log in (credentials plus OTP), then paste the full redirect URL:\n\n{}\n",
        login_url(&settings.upstox.api_key, &settings.upstox.redirect_url)
    );

    let redirect = inquire::Text::new("Redirect URL:")
        .prompt()
        .context("No redirect URL entered")?;

    auth_code_from_redirect(&redirect).context("No authorization code found in the redirect URL")
}

/// Picks the target expiry: the nearest future option expiry for NIFTY from
/// the stored catalog, or the coming Thursday when the catalog yields none.
fn target_expiry(settings: &Settings, today: chrono::NaiveDate) -> chrono::NaiveDate {
    let from_catalog = settings
        .nse_catalog_path()
        .ok()
        .and_then(|path| fs::read(path).ok())
        .and_then(|bytes| load_nse_json(&bytes).ok())
        .map(|records| SymbolMap::default().apply(records))
        .and_then(|catalog| future_expiries(&catalog, "NIFTY", today).first().copied());

    from_catalog.unwrap_or_else(|| {
        println!("No future expiry found in the catalog; falling back to the coming Thursday");
        nearest_thursday(today)
    })
}
