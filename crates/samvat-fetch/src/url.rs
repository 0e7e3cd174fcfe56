//! Upstox endpoint URL construction.

use chrono::NaiveDate;

/// Base URL for the Upstox API.
pub const BASE_URL: &str = "https://api.upstox.com";

/// Instrument key of the NIFTY 50 index, used for spot lookups.
pub const NIFTY_SPOT_KEY: &str = "NSE_INDEX|Nifty 50";

/// URL of the gzip-compressed NSE instrument dump.
pub const NSE_CATALOG_URL: &str =
    "https://assets.upstox.com/market-quote/instruments/exchange/NSE.json.gz";

/// URL of the Groww instrument CSV dump.
pub const GROWW_CATALOG_URL: &str = "https://growwapi-assets.groww.in/instruments/instrument.csv";

/// Builds the exchange-holiday endpoint URL.
#[must_use]
pub fn holidays_url(base: &str) -> String {
    format!("{base}/v2/market/holidays")
}

/// Builds the daily-candle endpoint URL for a single date.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use samvat_fetch::url::{BASE_URL, daily_candle_url};
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
/// let url = daily_candle_url(BASE_URL, "NSE_INDEX|Nifty 50", date);
/// assert_eq!(
///     url,
///     "https://api.upstox.com/v3/historical-candle/NSE_INDEX|Nifty 50/days/1/2025-01-07/2025-01-07"
/// );
/// ```
#[must_use]
pub fn daily_candle_url(base: &str, instrument_key: &str, date: NaiveDate) -> String {
    format!("{base}/v3/historical-candle/{instrument_key}/days/1/{date}/{date}")
}

/// Builds the 1-minute-candle endpoint URL for a single date.
#[must_use]
pub fn minute_candle_url(base: &str, instrument_key: &str, date: NaiveDate) -> String {
    format!("{base}/v3/historical-candle/{instrument_key}/minutes/1/{date}/{date}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_holidays_url() {
        assert_eq!(
            holidays_url(BASE_URL),
            "https://api.upstox.com/v2/market/holidays"
        );
    }

    #[test]
    fn test_minute_candle_url() {
        let url = minute_candle_url(BASE_URL, "NSE_FO|54321", date(2025, 1, 7));
        assert_eq!(
            url,
            "https://api.upstox.com/v3/historical-candle/NSE_FO|54321/minutes/1/2025-01-07/2025-01-07"
        );
    }

    #[test]
    fn test_single_day_window() {
        let url = daily_candle_url(BASE_URL, "NSE_INDEX|Nifty 50", date(2024, 12, 31));
        assert!(url.ends_with("/days/1/2024-12-31/2024-12-31"));
    }
}
