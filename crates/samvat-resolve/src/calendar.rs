//! Trading-calendar resolution.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

/// Default number of days to step back before giving up.
///
/// No NSE holiday run (weekends included) has exceeded this span; the bound
/// exists so a wildly wrong holiday list cannot send the search into the
/// distant past.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 10;

/// A resolved trading day.
///
/// `fallback` records that the lookback was exhausted and the resolver
/// returned `reference - 1 day` unconditionally. A fallback date may be a
/// weekend or holiday; callers must surface the flag rather than treat the
/// date as verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingDay {
    /// The resolved calendar date.
    pub date: NaiveDate,
    /// True if the lookback bound was exhausted and the unverified
    /// fallback date was returned.
    pub fallback: bool,
}

impl std::fmt::Display for TradingDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.fallback {
            write!(f, "{} (unverified fallback)", self.date)
        } else {
            write!(f, "{}", self.date)
        }
    }
}

/// Resolves the most recent trading day strictly before `reference`.
///
/// Steps backward from `reference - 1 day`, accepting the first date that
/// is a weekday (Mon-Fri) and absent from `holidays`. An empty holiday set
/// means "no known holidays" - a failed holiday fetch degrades the answer,
/// it does not abort it.
///
/// If no candidate passes within `lookback_days` steps, returns
/// `reference - 1 day` flagged as a fallback. Availability wins over
/// correctness there by design; the flag keeps the degradation visible.
#[must_use]
pub fn last_trading_day(
    reference: NaiveDate,
    holidays: &HashSet<NaiveDate>,
    lookback_days: u32,
) -> TradingDay {
    let mut candidate = reference - TimeDelta::days(1);

    for _ in 0..lookback_days {
        if is_weekday(candidate) && !holidays.contains(&candidate) {
            return TradingDay {
                date: candidate,
                fallback: false,
            };
        }
        candidate -= TimeDelta::days(1);
    }

    TradingDay {
        date: reference - TimeDelta::days(1),
        fallback: true,
    }
}

/// Returns the nearest Thursday on or after `reference`.
///
/// NIFTY weekly options expire on Thursdays; this is the expiry fallback
/// when the catalog yields no future expiry to read.
#[must_use]
pub fn nearest_thursday(reference: NaiveDate) -> NaiveDate {
    let weekday = reference.weekday().num_days_from_monday() as i64;
    let thursday = Weekday::Thu.num_days_from_monday() as i64;
    reference + TimeDelta::days((thursday - weekday).rem_euclid(7))
}

fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
