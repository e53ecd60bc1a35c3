//! Time utilities: timestamp storage format, parsing, elapsed-time formatting.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime, TimeDelta};

/// Storage format for every timestamp column (microsecond precision).
pub const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Parse format; `%.f` also accepts timestamps without a fractional part.
const TS_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Current local wall-clock time, without timezone.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn format_ts(ts: &NaiveDateTime) -> String {
    ts.format(TS_FORMAT).to_string()
}

pub fn parse_ts(s: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TS_PARSE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Whole seconds between two instants, never negative.
pub fn seconds_between(start: &NaiveDateTime, end: &NaiveDateTime) -> i64 {
    let delta: TimeDelta = *end - *start;
    delta.num_seconds().max(0)
}

/// Human readable elapsed time at hour/minute granularity.
///
/// The largest non-zero unit comes first, followed by the minute remainder
/// when it is non-zero. Seconds are discarded, so anything under a minute
/// reads `0 minutes`.
pub fn pretty_elapsed(seconds: i64) -> String {
    const CHUNKS: [(i64, &str); 2] = [(60 * 60, "hours"), (60, "minutes")];

    let since = seconds.max(0);

    let mut idx = CHUNKS.len() - 1;
    let mut count = 0;
    for (i, (unit, _)) in CHUNKS.iter().enumerate() {
        count = since / unit;
        if count != 0 {
            idx = i;
            break;
        }
    }

    let (unit, name) = CHUNKS[idx];
    let mut pretty = format!("{} {}", count, name);

    if let Some((unit2, name2)) = CHUNKS.get(idx + 1) {
        let count2 = (since - unit * count) / unit2;
        if count2 != 0 {
            pretty = format!("{}, {} {}", pretty, count2, name2);
        }
    }

    pretty
}
