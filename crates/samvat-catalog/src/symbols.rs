//! Canonical symbol normalization.

use std::collections::HashMap;

use samvat_types::InstrumentRecord;

/// Maps provider display names to canonical underlying symbols.
///
/// The map is injected configuration, not something inferred from catalog
/// data: extending it to a new underlying means adding an entry, and the
/// canonical set stays closed. Lookup is case-insensitive and exact; names
/// without an entry yield `None` and callers decide whether to drop the
/// record or keep it under its raw name.
#[derive(Debug, Clone)]
pub struct SymbolMap {
    entries: HashMap<String, String>,
}

impl SymbolMap {
    /// Builds a map from `(raw name, canonical symbol)` pairs.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into().to_uppercase(), v.into()))
                .collect(),
        }
    }

    /// Returns the canonical symbol for a raw display name, if mapped.
    ///
    /// Normalization is idempotent: canonical symbols map to themselves.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> Option<&str> {
        self.entries.get(&raw.to_uppercase()).map(String::as_str)
    }

    /// Returns the number of raw names in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Derives a new catalog with canonical symbols filled in.
    ///
    /// Unmapped records are retained under their raw name; they simply never
    /// match a canonical query.
    #[must_use]
    pub fn apply(&self, records: Vec<InstrumentRecord>) -> Vec<InstrumentRecord> {
        records
            .into_iter()
            .map(|record| match self.normalize(record.name()) {
                Some(canonical) => {
                    let canonical = canonical.to_string();
                    record.with_canonical(canonical)
                }
                None => record,
            })
            .collect()
    }
}

impl Default for SymbolMap {
    /// The index set traded on NSE and BSE that this pipeline knows about.
    fn default() -> Self {
        Self::with_entries([
            ("NIFTY", "NIFTY"),
            ("NIFTY 50", "NIFTY"),
            ("BANKNIFTY", "BANKNIFTY"),
            ("NIFTY BANK", "BANKNIFTY"),
            ("FINNIFTY", "FINNIFTY"),
            ("NIFTY FIN SERVICE", "FINNIFTY"),
            ("NIFTY FINANCIAL SERVICES", "FINNIFTY"),
            ("MIDCPNIFTY", "MIDCPNIFTY"),
            ("NIFTY MIDCAP SELECT", "MIDCPNIFTY"),
            ("SENSEX", "SENSEX"),
            ("BANKEX", "BANKEX"),
        ])
    }
}
