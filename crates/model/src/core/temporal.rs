//! Time-of-day arithmetic shared by the native encoders and literal rendering.
//!
//! `time` and `datetime2` keep `10^-scale` second units and truncate finer
//! digits. `datetime` rounds to the nearest 1/300 second.

use crate::core::data_type::Scale;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const HUNDRED_NANOS_PER_SECOND: u64 = 10_000_000;
const MAX_NANOS: u32 = 999_999_999;

pub const DATETIME_TICKS_PER_SECOND: u32 = 300;
pub const DATETIME_TICKS_PER_DAY: u64 = 86_400 * DATETIME_TICKS_PER_SECOND as u64;

/// Time of day in 100ns units. A leap second is folded into the last tick of
/// the preceding second.
pub fn hundred_nanos(time: &NaiveTime) -> u64 {
    let nanos = time.nanosecond().min(MAX_NANOS);
    u64::from(time.num_seconds_from_midnight()) * HUNDRED_NANOS_PER_SECOND
        + u64::from(nanos / 100)
}

/// Time of day as the integer stored for `scale`.
pub fn scaled_ticks(time: &NaiveTime, scale: Scale) -> u64 {
    hundred_nanos(time) / 10u64.pow(u32::from(7 - scale.get()))
}

/// Smallest scale that keeps every 100ns digit of `time`.
pub fn exact_scale(time: &NaiveTime) -> Scale {
    let ticks = hundred_nanos(time);
    let digits = (0..=7u8)
        .find(|digits| ticks % 10u64.pow(u32::from(7 - digits)) == 0)
        .unwrap_or(7);
    Scale::new(u32::from(digits)).unwrap_or_default()
}

/// `hh:mm:ss` followed by exactly `scale` truncated fraction digits.
pub fn format_time(time: &NaiveTime, scale: Scale) -> String {
    let digits = usize::from(scale.get());
    let ticks = scaled_ticks(time, scale);
    let unit = 10u64.pow(u32::from(scale.get()));
    let seconds = ticks / unit;

    let mut out = format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    );
    if digits > 0 {
        out.push_str(&format!(".{:0digits$}", ticks % unit));
    }
    out
}

/// `datetime` rounded to the nearest 1/300 second tick, carrying into the next
/// day. `None` when the carry leaves the calendar.
pub fn datetime_ticks(datetime: &NaiveDateTime) -> Option<(NaiveDate, u32)> {
    let time = datetime.time();
    let nanos = u64::from(time.num_seconds_from_midnight()) * 1_000_000_000
        + u64::from(time.nanosecond().min(MAX_NANOS));
    let mut ticks = (nanos * 3 + 5_000_000) / 10_000_000;
    let mut date = datetime.date();
    if ticks >= DATETIME_TICKS_PER_DAY {
        ticks -= DATETIME_TICKS_PER_DAY;
        date = date.checked_add_days(Days::new(1))?;
    }
    Some((date, ticks as u32))
}

/// `yyyy-mm-ddThh:mm:ss.fff` naming the same tick the value rounds to.
///
/// Milliseconds are rounded to the nearest of `.000`, `.003` and `.007`, which
/// the server maps back onto the identical tick.
pub fn format_datetime(datetime: &NaiveDateTime) -> String {
    let Some((date, ticks)) = datetime_ticks(datetime) else {
        return datetime.format("%Y-%m-%dT%H:%M:%S%.3f").to_string();
    };

    let seconds = ticks / DATETIME_TICKS_PER_SECOND;
    let millis = (ticks % DATETIME_TICKS_PER_SECOND * 10 + 1) / 3;
    format!(
        "{}T{:02}:{:02}:{:02}.{:03}",
        date.format("%Y-%m-%d"),
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60,
        millis
    )
}
