//! Tagged outcome for best-effort network calls.

/// Outcome of a single-attempt network fetch.
///
/// Market-data calls never raise on transport failure: they degrade to
/// [`Fetched::Failed`] with a reason, and the caller decides how to
/// aggregate partial failures. This keeps a flaky endpoint from aborting
/// the whole pipeline while still making every degradation visible.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Fetched<T> {
    /// The call succeeded and produced data (possibly empty).
    Data(T),
    /// The call failed; the pipeline continues without this input.
    Failed {
        /// Human-readable failure reason, surfaced in the run summary.
        reason: String,
    },
}

impl<T> Fetched<T> {
    /// Creates a failed outcome from any displayable reason.
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self::Failed {
            reason: reason.to_string(),
        }
    }

    /// Returns true if the fetch produced data.
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    /// Returns the failure reason, if the fetch failed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Data(_) => None,
            Self::Failed { reason } => Some(reason),
        }
    }

    /// Converts into the fetched data, discarding the failure reason.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Data(data) => Some(data),
            Self::Failed { .. } => None,
        }
    }

    /// Maps the data value, preserving a failure untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Self::Data(data) => Fetched::Data(f(data)),
            Self::Failed { reason } => Fetched::Failed { reason },
        }
    }

    /// Returns the data, or `default` if the fetch failed.
    pub fn unwrap_or(self, default: T) -> T {
        self.into_data().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_accessors() {
        let fetched = Fetched::Data(vec![1, 2, 3]);
        assert!(fetched.is_data());
        assert!(fetched.reason().is_none());
        assert_eq!(fetched.into_data(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_failed_accessors() {
        let fetched: Fetched<Vec<i32>> = Fetched::failed("HTTP 503");
        assert!(!fetched.is_data());
        assert_eq!(fetched.reason(), Some("HTTP 503"));
        assert_eq!(fetched.unwrap_or(Vec::new()), Vec::<i32>::new());
    }

    #[test]
    fn test_map_preserves_failure() {
        let fetched: Fetched<u32> = Fetched::failed("timed out");
        let mapped = fetched.map(|n| n * 2);
        assert_eq!(mapped.reason(), Some("timed out"));

        let doubled = Fetched::Data(21).map(|n| n * 2);
        assert_eq!(doubled.into_data(), Some(42));
    }
}
