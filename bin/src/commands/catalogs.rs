//! Catalog download command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use samvat_lib::prelude::*;
use samvat_lib::url::{GROWW_CATALOG_URL, NSE_CATALOG_URL};

pub(crate) async fn catalogs(env_path: &Path, quiet: bool) -> Result<()> {
    let settings = Settings::load(env_path)?;
    let client = ApiClient::with_defaults("")?;

    let nse_count = download_and_count(
        &client,
        NSE_CATALOG_URL,
        &settings.nse_catalog_path()?,
        CatalogKind::Nse,
        quiet,
    )
    .await;
    let groww_count = download_and_count(
        &client,
        GROWW_CATALOG_URL,
        &settings.groww_catalog_path()?,
        CatalogKind::Groww,
        quiet,
    )
    .await;

    match (nse_count, groww_count) {
        (Some(nse), Some(groww)) => {
            println!("{nse} NSE instruments, {groww} Groww instruments");
            Ok(())
        }
        _ => bail!("One or more catalog downloads failed"),
    }
}

#[derive(Clone, Copy)]
enum CatalogKind {
    Nse,
    Groww,
}

/// Downloads one dump, stores it verbatim, and returns its record count.
async fn download_and_count(
    client: &ApiClient,
    url: &str,
    path: &Path,
    kind: CatalogKind,
    quiet: bool,
) -> Option<usize> {
    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("Invalid progress template"),
        );
        pb.set_message(format!("Downloading {url}"));
        pb
    };

    let bytes = match client.download(url).await {
        Fetched::Data(bytes) => bytes,
        Fetched::Failed { reason } => {
            spinner.finish_with_message(format!("Download failed: {reason}"));
            return None;
        }
    };

    let count = match kind {
        CatalogKind::Nse => load_nse_json(&bytes).map(|records| records.len()),
        CatalogKind::Groww => {
            load_groww_csv(&String::from_utf8_lossy(&bytes)).map(|records| records.len())
        }
    };
    let count = match count {
        Ok(count) => count,
        Err(e) => {
            spinner.finish_with_message(format!("Downloaded payload is unusable: {e}"));
            return None;
        }
    };

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            spinner.finish_with_message(format!("Could not create {}: {e}", parent.display()));
            return None;
        }
    }
    if let Err(e) = fs::write(path, &bytes) {
        spinner.finish_with_message(format!("Could not write {}: {e}", path.display()));
        return None;
    }

    spinner.finish_with_message(format!("Stored {} ({count} records)", path.display()));
    Some(count)
}
