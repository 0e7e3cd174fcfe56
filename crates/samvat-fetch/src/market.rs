//! Market-data endpoints: holidays, spot candles, minute candles.

use chrono::{DateTime, NaiveDate, Utc};
use samvat_types::{Candle, Fetched};
use serde::Deserialize;
use serde_json::Value;

use crate::ApiClient;
use crate::url::{daily_candle_url, holidays_url, minute_candle_url};

/// Response shape of `GET /v2/market/holidays`.
#[derive(Debug, Deserialize)]
struct HolidayResponse {
    #[serde(default)]
    data: Vec<HolidayEntry>,
}

#[derive(Debug, Deserialize)]
struct HolidayEntry {
    date: NaiveDate,
}

/// Response shape of the historical-candle endpoints. Candle rows are
/// positional arrays `[timestamp, open, high, low, close, volume, ...]`;
/// trailing columns (open interest) are ignored.
#[derive(Debug, Deserialize)]
struct CandleResponse {
    #[serde(default)]
    data: CandleData,
}

#[derive(Debug, Deserialize, Default)]
struct CandleData {
    #[serde(default)]
    candles: Vec<Vec<Value>>,
}

impl ApiClient {
    /// Fetches the exchange holiday list.
    ///
    /// Best-effort: a transport failure, non-2xx status, or unparseable
    /// body yields [`Fetched::Failed`]. Callers treat a failure as "no
    /// known holidays" when resolving the trading calendar.
    pub async fn market_holidays(&self) -> Fetched<Vec<NaiveDate>> {
        let url = holidays_url(self.base_url());
        match self.get_authenticated(&url).await {
            Fetched::Data(body) => match serde_json::from_slice::<HolidayResponse>(&body) {
                Ok(response) => {
                    Fetched::Data(response.data.into_iter().map(|entry| entry.date).collect())
                }
                Err(e) => Fetched::failed(format!("holiday response: {e}")),
            },
            Fetched::Failed { reason } => Fetched::Failed { reason },
        }
    }

    /// Fetches the daily close of an instrument for a single date.
    ///
    /// Returns `Data(None)` when the API answers but the day has no candle
    /// (e.g. an unexpectedly closed market) - distinct from a failed call.
    pub async fn spot_close(&self, instrument_key: &str, date: NaiveDate) -> Fetched<Option<f64>> {
        let url = daily_candle_url(self.base_url(), instrument_key, date);
        match self.fetch_candles(&url).await {
            Fetched::Data(candles) => Fetched::Data(candles.first().map(|c| c.close)),
            Fetched::Failed { reason } => Fetched::Failed { reason },
        }
    }

    /// Fetches the 1-minute candles of an instrument for a single date,
    /// ordered ascending by timestamp.
    ///
    /// An empty candle list from a successful call propagates as
    /// `Data(vec![])`; callers distinguish "no data" from a failed fetch.
    pub async fn minute_candles(&self, instrument_key: &str, date: NaiveDate) -> Fetched<Vec<Candle>> {
        let url = minute_candle_url(self.base_url(), instrument_key, date);
        self.fetch_candles(&url).await
    }

    async fn fetch_candles(&self, url: &str) -> Fetched<Vec<Candle>> {
        match self.get_authenticated(url).await {
            Fetched::Data(body) => match serde_json::from_slice::<CandleResponse>(&body) {
                Ok(response) => match parse_candle_rows(&response.data.candles) {
                    Ok(candles) => Fetched::Data(candles),
                    Err(reason) => Fetched::failed(format!("candle response: {reason}")),
                },
                Err(e) => Fetched::failed(format!("candle response: {e}")),
            },
            Fetched::Failed { reason } => Fetched::Failed { reason },
        }
    }
}

/// Decodes positional candle rows and sorts them ascending by timestamp.
///
/// The API returns newest-first; persisted artifacts are oldest-first.
fn parse_candle_rows(rows: &[Vec<Value>]) -> Result<Vec<Candle>, String> {
    let mut candles = rows.iter().map(|row| candle_from_row(row)).collect::<Result<Vec<_>, _>>()?;
    candles.sort_by_key(|candle| candle.timestamp);
    Ok(candles)
}

/// Decodes one positional candle row.
///
/// Timestamps arrive as RFC 3339 strings ("2025-01-07T09:15:00+05:30") or
/// epoch milliseconds, depending on the endpoint revision.
fn candle_from_row(row: &[Value]) -> Result<Candle, String> {
    if row.len() < 6 {
        return Err(format!("candle row has {} fields, expected 6", row.len()));
    }

    let timestamp = parse_timestamp(&row[0])?;
    let mut prices = [0.0_f64; 4];
    for (i, price) in prices.iter_mut().enumerate() {
        *price = row[i + 1]
            .as_f64()
            .ok_or_else(|| format!("non-numeric price in candle row: {}", row[i + 1]))?;
    }
    let volume = row[5]
        .as_u64()
        .or_else(|| row[5].as_f64().map(|v| v as u64))
        .ok_or_else(|| format!("non-numeric volume in candle row: {}", row[5]))?;

    Ok(Candle::new(
        timestamp, prices[0], prices[1], prices[2], prices[3], volume,
    ))
}

fn parse_timestamp(value: &Value) -> Result<DateTime<Utc>, String> {
    match value {
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| format!("invalid candle timestamp '{text}': {e}")),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .ok_or_else(|| format!("invalid candle timestamp: {n}")),
        other => Err(format!("invalid candle timestamp: {other}")),
    }
}
