//! NSE instrument reconciliation and ATM option data downloader.
//!
//! This is a facade crate that re-exports functionality from the samvat
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use samvat_lib::prelude::*;
//! use std::collections::HashSet;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::with_defaults("my-access-token")?;
//!
//!     let holidays: HashSet<_> = client
//!         .market_holidays()
//!         .await
//!         .unwrap_or(Vec::new())
//!         .into_iter()
//!         .collect();
//!     let day = last_trading_day(
//!         chrono::Local::now().date_naive(),
//!         &holidays,
//!         DEFAULT_LOOKBACK_DAYS,
//!     );
//!     println!("Last trading day: {day}");
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/samvat-rs/samvat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use samvat_types::*;

// Re-export catalog loading and lookup
pub use samvat_catalog::{
    CatalogError, SymbolMap, find_contract, future_expiries, load_groww_csv, load_nse_json,
};

// Re-export derivation logic
pub use samvat_resolve::{
    DEFAULT_LOOKBACK_DAYS, StrikeError, TradingDay, atm_strike, last_trading_day, nearest_thursday,
};

// Re-export the network layer
pub use samvat_fetch::{ApiClient, ClientConfig, auth, url};

// Re-export persistence
pub use samvat_store::{
    LegArtifact, PersistResult, StoreError, leg_filename, persist_leg, read_leg,
};

// Re-export configuration
pub use samvat_config::{ConfigError, Credentials, Settings, default_env_path};

/// Prelude module for convenient imports.
///
/// ```
/// use samvat_lib::prelude::*;
/// ```
pub mod prelude {
    pub use samvat_types::{Candle, Fetched, InstrumentRecord, InstrumentType, OptionSide};

    pub use samvat_catalog::{
        CatalogError, SymbolMap, find_contract, future_expiries, load_groww_csv, load_nse_json,
    };

    pub use samvat_resolve::{
        DEFAULT_LOOKBACK_DAYS, TradingDay, atm_strike, last_trading_day, nearest_thursday,
    };

    pub use samvat_fetch::{ApiClient, ClientConfig};

    pub use samvat_store::{LegArtifact, PersistResult, leg_filename, persist_leg, read_leg};

    pub use samvat_config::{Settings, default_env_path};
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    #[test]
    fn test_atm_pair_resolution_scenario() {
        let expiry = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        let catalog = SymbolMap::default().apply(vec![InstrumentRecord::new(
            "NIFTY",
            InstrumentType::Ce,
            Some(22_000.0),
            Some(expiry),
            "NSE_FO|54321",
        )]);

        let strike = atm_strike(21_980.0, 50.0).unwrap();
        assert_eq!(strike, 22_000.0);

        let contract = find_contract(&catalog, "NIFTY", expiry, strike, OptionSide::Call)
            .unwrap()
            .expect("contract should match");
        assert_eq!(contract.instrument_key(), "NSE_FO|54321");

        let put = find_contract(&catalog, "NIFTY", expiry, strike, OptionSide::Put).unwrap();
        assert!(put.is_none());
    }

    #[test]
    fn test_holiday_step_back_scenario() {
        let holidays: HashSet<NaiveDate> = [NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()]
            .into_iter()
            .collect();
        let reference = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();

        let day = last_trading_day(reference, &holidays, DEFAULT_LOOKBACK_DAYS);
        assert_eq!(day.date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert!(!day.fallback);
    }
}
