//! Loader for the Groww instrument dump.

use chrono::NaiveDate;
use samvat_types::{InstrumentRecord, InstrumentType};
use serde::Deserialize;

use crate::CatalogError;

/// Columns the loader cannot do without.
const REQUIRED_COLUMNS: [&str; 3] = ["trading_symbol", "name", "instrument_type"];

/// One row of the Groww CSV dump. The full dump carries many more columns
/// (lot size, tick size, ISIN, ...); only the fields the pipeline consumes
/// are decoded.
#[derive(Debug, Deserialize)]
struct GrowwRow {
    trading_symbol: String,
    name: String,
    instrument_type: String,
    #[serde(default)]
    expiry_date: Option<String>,
    #[serde(default)]
    strike_price: Option<f64>,
}

/// Parses the Groww instrument dump from CSV text.
///
/// The payload must already have been fetched; this function performs no
/// network I/O. A header-only payload (zero data rows) is valid and yields
/// an empty catalog.
///
/// # Errors
///
/// Returns [`CatalogError`] if a required column is absent from the header,
/// a row cannot be decoded, or an expiry date is unparseable.
pub fn load_groww_csv(text: &str) -> Result<Vec<InstrumentRecord>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(CatalogError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for row in reader.deserialize::<GrowwRow>() {
        let row = row?;
        let expiry = match row.expiry_date.as_deref().filter(|s| !s.is_empty()) {
            Some(value) => Some(NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(
                |source| CatalogError::InvalidDate {
                    value: value.to_string(),
                    source,
                },
            )?),
            None => None,
        };
        records.push(InstrumentRecord::new(
            row.name,
            InstrumentType::from_code(&row.instrument_type),
            row.strike_price,
            expiry,
            row.trading_symbol,
        ));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
trading_symbol,name,instrument_type,expiry_date,strike_price
NIFTY25JAN22000CE,NIFTY,CE,2025-01-30,22000.0
RELIANCE,Reliance Industries,EQ,,
";

    #[test]
    fn test_load_rows() {
        let records = load_groww_csv(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].instrument_key(), "NIFTY25JAN22000CE");
        assert_eq!(records[0].instrument_type(), InstrumentType::Ce);
        assert_eq!(records[0].strike_price(), Some(22_000.0));
        assert_eq!(records[0].expiry(), NaiveDate::from_ymd_opt(2025, 1, 30));

        assert_eq!(records[1].instrument_type(), InstrumentType::Eq);
        assert!(records[1].expiry().is_none());
        assert!(records[1].strike_price().is_none());
    }

    #[test]
    fn test_header_only_is_valid() {
        let records =
            load_groww_csv("trading_symbol,name,instrument_type,expiry_date,strike_price\n")
                .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let text = "\
trading_symbol,name,instrument_type,lot_size,tick_size
NIFTY25JANFUT,NIFTY,FUT,25,0.05
";
        let records = load_groww_csv(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].instrument_type(), InstrumentType::Fut);
    }

    #[test]
    fn test_missing_required_column() {
        let text = "symbol,name,instrument_type\nX,X,EQ\n";
        assert!(matches!(
            load_groww_csv(text),
            Err(CatalogError::MissingColumn("trading_symbol"))
        ));
    }

    #[test]
    fn test_bad_expiry_date() {
        let text = "\
trading_symbol,name,instrument_type,expiry_date,strike_price
NIFTY25JAN22000CE,NIFTY,CE,30-01-2025,22000.0
";
        assert!(matches!(
            load_groww_csv(text),
            Err(CatalogError::InvalidDate { .. })
        ));
    }
}
