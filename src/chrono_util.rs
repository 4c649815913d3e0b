use anyhow::Context;
use chrono::{Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

/// Timestamp format used in archive file names.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// The game server timestamps days in China Standard Time.
pub fn cst() -> FixedOffset {
    FixedOffset::east_opt(8 * 60 * 60).unwrap()
}

/// Interprets a naive datetime as CST and converts it to Unix milliseconds.
pub fn to_epoch_millis(time: NaiveDateTime) -> i64 {
    time.and_local_timezone(cst()).unwrap().timestamp_millis()
}

pub fn file_timestamp(time: NaiveDateTime) -> impl std::fmt::Display {
    time.format(FILE_TIMESTAMP_FORMAT)
}

/// Returns the first instant of the given month and the last second of it
/// (one second before the first instant of the following month).
pub fn month_range(year: i32, month: u32) -> anyhow::Result<(NaiveDateTime, NaiveDateTime)> {
    let start = first_instant_of(year, month)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = first_instant_of(next_year, next_month)? - Duration::seconds(1);
    Ok((start, end))
}

fn first_instant_of(year: i32, month: u32) -> anyhow::Result<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(year, month, 1)
        .with_context(|| format!("Invalid year and month: {year}-{month}"))?;
    Ok(date.and_time(NaiveTime::MIN))
}
