//! Loader for the Upstox NSE instrument dump.

use std::io::Read;

use flate2::read::GzDecoder;
use samvat_types::InstrumentRecord;
use serde::Deserialize;

use crate::CatalogError;

/// Gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// The dump is either a bare array or wrapped in a `data` field, depending
/// on the asset revision.
#[derive(Deserialize)]
#[serde(untagged)]
enum NseDump {
    List(Vec<InstrumentRecord>),
    Wrapped { data: Vec<InstrumentRecord> },
}

/// Parses the NSE instrument dump from gzip-compressed or plain JSON bytes.
///
/// The payload must already have been fetched; this function performs no
/// network I/O. An empty instrument array is valid and yields an empty
/// catalog.
///
/// # Errors
///
/// Returns [`CatalogError`] if the gzip stream is corrupt or the JSON is not
/// a list of instrument objects.
pub fn load_nse_json(bytes: &[u8]) -> Result<Vec<InstrumentRecord>, CatalogError> {
    let json = if bytes.starts_with(&GZIP_MAGIC) {
        let mut decompressed = Vec::new();
        GzDecoder::new(bytes).read_to_end(&mut decompressed)?;
        decompressed
    } else {
        bytes.to_vec()
    };

    let dump: NseDump = serde_json::from_slice(&json)?;
    Ok(match dump {
        NseDump::List(records) => records,
        NseDump::Wrapped { data } => data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use samvat_types::InstrumentType;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {"name":"NIFTY","instrument_type":"CE","strike_price":22000.0,
         "expiry":"2025-01-30","instrument_key":"NSE_FO|54321","lot_size":25},
        {"name":"NIFTY 50","instrument_type":"INDEX","instrument_key":"NSE_INDEX|Nifty 50"}
    ]"#;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_load_plain_json() {
        let records = load_nse_json(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].instrument_type(), InstrumentType::Ce);
        assert_eq!(records[0].strike_price(), Some(22_000.0));
        assert_eq!(records[0].expiry(), NaiveDate::from_ymd_opt(2025, 1, 30));
        assert_eq!(records[1].instrument_key(), "NSE_INDEX|Nifty 50");
    }

    #[test]
    fn test_load_gzip_json() {
        let records = load_nse_json(&gzip(SAMPLE.as_bytes())).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_load_wrapped_dump() {
        let wrapped = format!(r#"{{"data":{SAMPLE}}}"#);
        let records = load_nse_json(wrapped.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let records = load_nse_json(b"[]").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            load_nse_json(b"{not json"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_non_list_document_is_an_error() {
        assert!(load_nse_json(br#"{"count":3}"#).is_err());
    }

    #[test]
    fn test_corrupt_gzip_is_an_error() {
        let mut bytes = gzip(SAMPLE.as_bytes());
        bytes.truncate(10);
        assert!(matches!(
            load_nse_json(&bytes),
            Err(CatalogError::Gzip(_))
        ));
    }
}
