//! Option contract lookup over a loaded catalog.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use samvat_types::{InstrumentRecord, OptionSide};

use crate::CatalogError;

/// Finds the option contract matching all four of symbol, expiry, strike,
/// and side.
///
/// The symbol is compared against the record's canonical symbol when the
/// normalizer mapped one, and against the raw name otherwise. Expiries are
/// compared as normalized dates, never as provider-native encodings.
///
/// Returns `Ok(None)` when nothing matches: "not found" is an expected
/// outcome, not an error. If the catalog contains duplicate contracts the
/// first match in catalog order wins.
///
/// # Errors
///
/// Returns [`CatalogError::MissingField`] when a candidate option record
/// lacks a strike or expiry: that is a malformed catalog, not a non-match.
pub fn find_contract<'a>(
    catalog: &'a [InstrumentRecord],
    symbol: &str,
    expiry: NaiveDate,
    strike: f64,
    side: OptionSide,
) -> Result<Option<&'a InstrumentRecord>, CatalogError> {
    for record in catalog {
        if record.symbol() != symbol || record.instrument_type() != side.instrument_type() {
            continue;
        }

        let record_strike = record.strike_price().ok_or_else(|| missing(record, "strike_price"))?;
        let record_expiry = record.expiry().ok_or_else(|| missing(record, "expiry"))?;

        if record_expiry == expiry && record_strike == strike {
            return Ok(Some(record));
        }
    }
    Ok(None)
}

/// Returns the sorted future option expiries for an underlying.
///
/// Scans both CE and PE records whose symbol matches and keeps expiries on
/// or after `today`. Used to pick the nearest contract cycle after a token
/// refresh.
#[must_use]
pub fn future_expiries(
    catalog: &[InstrumentRecord],
    symbol: &str,
    today: NaiveDate,
) -> Vec<NaiveDate> {
    let expiries: BTreeSet<NaiveDate> = catalog
        .iter()
        .filter(|r| r.is_option() && r.symbol() == symbol)
        .filter_map(InstrumentRecord::expiry)
        .filter(|&expiry| expiry >= today)
        .collect();
    expiries.into_iter().collect()
}

fn missing(record: &InstrumentRecord, field: &'static str) -> CatalogError {
    CatalogError::MissingField {
        key: record.instrument_key().to_string(),
        field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use samvat_types::InstrumentType;

    fn option(
        name: &str,
        side: InstrumentType,
        strike: f64,
        expiry: (i32, u32, u32),
        key: &str,
    ) -> InstrumentRecord {
        InstrumentRecord::new(
            name,
            side,
            Some(strike),
            NaiveDate::from_ymd_opt(expiry.0, expiry.1, expiry.2),
            key,
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_find_unique_match() {
        let catalog = vec![
            option("NIFTY", InstrumentType::Ce, 22_000.0, (2025, 1, 30), "NSE_FO|1"),
            option("NIFTY", InstrumentType::Pe, 22_000.0, (2025, 1, 30), "NSE_FO|2"),
            option("NIFTY", InstrumentType::Ce, 22_050.0, (2025, 1, 30), "NSE_FO|3"),
            option("NIFTY", InstrumentType::Ce, 22_000.0, (2025, 2, 6), "NSE_FO|4"),
        ];

        let found = find_contract(&catalog, "NIFTY", date(2025, 1, 30), 22_000.0, OptionSide::Call)
            .unwrap()
            .unwrap();
        assert_eq!(found.instrument_key(), "NSE_FO|1");

        let put = find_contract(&catalog, "NIFTY", date(2025, 1, 30), 22_000.0, OptionSide::Put)
            .unwrap()
            .unwrap();
        assert_eq!(put.instrument_key(), "NSE_FO|2");
    }

    #[test]
    fn test_empty_catalog_is_not_found() {
        let result = find_contract(&[], "NIFTY", date(2025, 1, 30), 22_000.0, OptionSide::Call);
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_no_match_is_not_found() {
        let catalog = vec![option(
            "BANKNIFTY",
            InstrumentType::Ce,
            48_000.0,
            (2025, 1, 30),
            "NSE_FO|9",
        )];
        let result = find_contract(&catalog, "NIFTY", date(2025, 1, 30), 22_000.0, OptionSide::Call);
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_first_match_wins_on_duplicates() {
        let catalog = vec![
            option("NIFTY", InstrumentType::Ce, 22_000.0, (2025, 1, 30), "NSE_FO|first"),
            option("NIFTY", InstrumentType::Ce, 22_000.0, (2025, 1, 30), "NSE_FO|second"),
        ];
        let found = find_contract(&catalog, "NIFTY", date(2025, 1, 30), 22_000.0, OptionSide::Call)
            .unwrap()
            .unwrap();
        assert_eq!(found.instrument_key(), "NSE_FO|first");
    }

    #[test]
    fn test_candidate_missing_strike_is_an_error() {
        let catalog = vec![InstrumentRecord::new(
            "NIFTY",
            InstrumentType::Ce,
            None,
            NaiveDate::from_ymd_opt(2025, 1, 30),
            "NSE_FO|bad",
        )];
        let result = find_contract(&catalog, "NIFTY", date(2025, 1, 30), 22_000.0, OptionSide::Call);
        assert!(matches!(
            result,
            Err(CatalogError::MissingField { field: "strike_price", .. })
        ));
    }

    #[test]
    fn test_matches_canonical_symbol() {
        let record = option("NIFTY", InstrumentType::Ce, 22_000.0, (2025, 1, 30), "NSE_FO|1")
            .with_canonical("NIFTY");
        let catalog = vec![record];
        let found = find_contract(&catalog, "NIFTY", date(2025, 1, 30), 22_000.0, OptionSide::Call)
            .unwrap();
        assert!(found.is_some());
    }

    #[test]
    fn test_future_expiries_sorted_and_deduped() {
        let catalog = vec![
            option("NIFTY", InstrumentType::Ce, 22_000.0, (2025, 2, 6), "a"),
            option("NIFTY", InstrumentType::Pe, 22_000.0, (2025, 1, 30), "b"),
            option("NIFTY", InstrumentType::Ce, 22_100.0, (2025, 1, 30), "c"),
            option("NIFTY", InstrumentType::Ce, 22_000.0, (2025, 1, 23), "d"),
            option("BANKNIFTY", InstrumentType::Ce, 48_000.0, (2025, 1, 28), "e"),
        ];

        let expiries = future_expiries(&catalog, "NIFTY", date(2025, 1, 25));
        assert_eq!(expiries, vec![date(2025, 1, 30), date(2025, 2, 6)]);
    }

    #[test]
    fn test_future_expiries_empty_when_all_past() {
        let catalog = vec![option("NIFTY", InstrumentType::Ce, 22_000.0, (2025, 1, 2), "a")];
        assert!(future_expiries(&catalog, "NIFTY", date(2025, 6, 1)).is_empty());
    }
}
