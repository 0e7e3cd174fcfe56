//! Instrument records loaded from broker catalogs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Instrument classification as reported by the exchange master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentType {
    /// Call option.
    #[serde(rename = "CE")]
    Ce,
    /// Put option.
    #[serde(rename = "PE")]
    Pe,
    /// Future.
    #[serde(rename = "FUT")]
    Fut,
    /// Equity.
    #[serde(rename = "EQ")]
    Eq,
    /// Index.
    #[serde(rename = "INDEX")]
    Index,
    /// Any other type present in the dump.
    #[serde(other, rename = "OTHER")]
    Other,
}

impl InstrumentType {
    /// Returns the type as the exchange's string code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ce => "CE",
            Self::Pe => "PE",
            Self::Fut => "FUT",
            Self::Eq => "EQ",
            Self::Index => "INDEX",
            Self::Other => "OTHER",
        }
    }

    /// Returns true for option contracts (CE or PE).
    #[must_use]
    pub const fn is_option(&self) -> bool {
        matches!(self, Self::Ce | Self::Pe)
    }

    /// Parses an exchange type code, case-insensitively. Unrecognized codes
    /// map to [`Self::Other`] rather than failing, mirroring the catalog
    /// deserializer.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.to_uppercase().as_str() {
            "CE" => Self::Ce,
            "PE" => Self::Pe,
            "FUT" => Self::Fut,
            "EQ" => Self::Eq,
            "INDEX" | "IDX" => Self::Index,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One side of an option pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionSide {
    /// Call (CE) leg.
    Call,
    /// Put (PE) leg.
    Put,
}

impl OptionSide {
    /// Both sides, in the order the pipeline processes them.
    pub const BOTH: [Self; 2] = [Self::Call, Self::Put];

    /// Returns the exchange code ("CE" or "PE").
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "CE",
            Self::Put => "PE",
        }
    }

    /// Returns the lowercase code used in artifact filenames.
    #[must_use]
    pub const fn as_lower(&self) -> &'static str {
        match self {
            Self::Call => "ce",
            Self::Put => "pe",
        }
    }

    /// Returns the corresponding instrument type.
    #[must_use]
    pub const fn instrument_type(&self) -> InstrumentType {
        match self {
            Self::Call => InstrumentType::Ce,
            Self::Put => InstrumentType::Pe,
        }
    }
}

impl std::fmt::Display for OptionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One instrument from a catalog snapshot.
///
/// Records are immutable once loaded. The expiry is normalized at load time:
/// the NSE dump encodes it either as an ISO date string (with an optional
/// time suffix) or as epoch milliseconds, and both forms decode to a
/// [`NaiveDate`]. The canonical symbol is absent in the raw payload and is
/// filled in by the symbol normalizer, which derives a new record rather
/// than mutating the loaded one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    /// Display name as reported by the provider (e.g. "NIFTY 50").
    name: String,
    /// Instrument classification.
    instrument_type: InstrumentType,
    /// Strike price, present for options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    strike_price: Option<f64>,
    /// Contract expiry, present for derivatives.
    #[serde(default, with = "expiry_format")]
    expiry: Option<NaiveDate>,
    /// Provider-native trading identifier.
    instrument_key: String,
    /// Canonical underlying symbol, filled by the normalizer.
    #[serde(skip)]
    canonical: Option<String>,
}

impl InstrumentRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        instrument_type: InstrumentType,
        strike_price: Option<f64>,
        expiry: Option<NaiveDate>,
        instrument_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            instrument_type,
            strike_price,
            expiry,
            instrument_key: instrument_key.into(),
            canonical: None,
        }
    }

    /// Returns a copy of this record with the canonical symbol set.
    #[must_use]
    pub fn with_canonical(mut self, canonical: impl Into<String>) -> Self {
        self.canonical = Some(canonical.into());
        self
    }

    /// Returns the provider display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the instrument classification.
    #[must_use]
    pub const fn instrument_type(&self) -> InstrumentType {
        self.instrument_type
    }

    /// Returns the strike price, if any.
    #[must_use]
    pub const fn strike_price(&self) -> Option<f64> {
        self.strike_price
    }

    /// Returns the contract expiry, if any.
    #[must_use]
    pub const fn expiry(&self) -> Option<NaiveDate> {
        self.expiry
    }

    /// Returns the provider-native trading identifier.
    #[must_use]
    pub fn instrument_key(&self) -> &str {
        &self.instrument_key
    }

    /// Returns the canonical symbol, if the normalizer mapped one.
    #[must_use]
    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    /// Returns the symbol this record is addressed by: the canonical symbol
    /// when mapped, the raw display name otherwise.
    #[must_use]
    pub fn symbol(&self) -> &str {
        self.canonical.as_deref().unwrap_or(&self.name)
    }

    /// Returns true for option contracts (CE or PE).
    #[must_use]
    pub const fn is_option(&self) -> bool {
        self.instrument_type.is_option()
    }
}

impl std::fmt::Display for InstrumentRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.instrument_key)
    }
}

/// Serde codec for the provider's heterogeneous expiry encodings.
///
/// Deserializes ISO date strings ("2025-01-30" or "2025-01-30T14:30:00"),
/// epoch-millisecond integers, or null. Millisecond expiries are anchored to
/// IST (+05:30), the exchange's local time, so a contract expiring at
/// midnight IST lands on the right calendar day. Serializes as an ISO date.
mod expiry_format {
    use chrono::{DateTime, FixedOffset, NaiveDate};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// IST offset in seconds (+05:30).
    const IST_OFFSET_SECS: i32 = 5 * 3600 + 1800;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawExpiry {
        Text(String),
        Millis(i64),
    }

    pub(super) fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<RawExpiry>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawExpiry::Text(text)) => {
                let date_part = text.split('T').next().unwrap_or(&text);
                NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                    .map(Some)
                    .map_err(|e| D::Error::custom(format!("invalid expiry '{text}': {e}")))
            }
            Some(RawExpiry::Millis(ms)) => {
                let utc = DateTime::from_timestamp_millis(ms)
                    .ok_or_else(|| D::Error::custom(format!("expiry out of range: {ms}")))?;
                let ist = FixedOffset::east_opt(IST_OFFSET_SECS).expect("valid offset");
                Ok(Some(utc.with_timezone(&ist).date_naive()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accessors() {
        let expiry = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        let record = InstrumentRecord::new(
            "NIFTY",
            InstrumentType::Ce,
            Some(22_000.0),
            Some(expiry),
            "NSE_FO|54321",
        );

        assert_eq!(record.name(), "NIFTY");
        assert_eq!(record.instrument_type(), InstrumentType::Ce);
        assert_eq!(record.strike_price(), Some(22_000.0));
        assert_eq!(record.expiry(), Some(expiry));
        assert_eq!(record.instrument_key(), "NSE_FO|54321");
        assert!(record.is_option());
        assert!(record.canonical().is_none());
    }

    #[test]
    fn test_symbol_prefers_canonical() {
        let record = InstrumentRecord::new("NIFTY 50", InstrumentType::Index, None, None, "k");
        assert_eq!(record.symbol(), "NIFTY 50");

        let mapped = record.with_canonical("NIFTY");
        assert_eq!(mapped.symbol(), "NIFTY");
        assert_eq!(mapped.name(), "NIFTY 50");
    }

    #[test]
    fn test_expiry_from_iso_string() {
        let record: InstrumentRecord = serde_json::from_str(
            r#"{"name":"NIFTY","instrument_type":"CE","strike_price":22000.0,
                "expiry":"2025-01-30","instrument_key":"NSE_FO|54321"}"#,
        )
        .unwrap();
        assert_eq!(record.expiry(), NaiveDate::from_ymd_opt(2025, 1, 30));
    }

    #[test]
    fn test_expiry_from_iso_string_with_time_suffix() {
        let record: InstrumentRecord = serde_json::from_str(
            r#"{"name":"NIFTY","instrument_type":"PE","strike_price":22000.0,
                "expiry":"2025-01-30T14:30:00","instrument_key":"NSE_FO|54322"}"#,
        )
        .unwrap();
        assert_eq!(record.expiry(), NaiveDate::from_ymd_opt(2025, 1, 30));
    }

    #[test]
    fn test_expiry_from_epoch_millis() {
        // 2025-01-30 00:00:00 IST == 2025-01-29 18:30:00 UTC
        let record: InstrumentRecord = serde_json::from_str(
            r#"{"name":"NIFTY","instrument_type":"CE","strike_price":22000.0,
                "expiry":1738175400000,"instrument_key":"NSE_FO|54321"}"#,
        )
        .unwrap();
        assert_eq!(record.expiry(), NaiveDate::from_ymd_opt(2025, 1, 30));
    }

    #[test]
    fn test_expiry_absent() {
        let record: InstrumentRecord = serde_json::from_str(
            r#"{"name":"NIFTY 50","instrument_type":"INDEX","instrument_key":"NSE_INDEX|Nifty 50"}"#,
        )
        .unwrap();
        assert!(record.expiry().is_none());
        assert!(record.strike_price().is_none());
    }

    #[test]
    fn test_unknown_instrument_type() {
        let record: InstrumentRecord = serde_json::from_str(
            r#"{"name":"X","instrument_type":"SME","instrument_key":"NSE_EQ|X"}"#,
        )
        .unwrap();
        assert_eq!(record.instrument_type(), InstrumentType::Other);
        assert!(!record.is_option());
    }

    #[test]
    fn test_serializes_expiry_as_iso_date() {
        let record = InstrumentRecord::new(
            "NIFTY",
            InstrumentType::Pe,
            Some(22_000.0),
            NaiveDate::from_ymd_opt(2025, 1, 30),
            "NSE_FO|54322",
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["expiry"].as_str(), Some("2025-01-30"));
        assert_eq!(json["instrument_type"].as_str(), Some("PE"));
    }
}
