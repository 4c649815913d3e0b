use std::fmt::Display;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime, Timelike};
use getset::CopyGetters;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chrono_util::{file_timestamp, month_range, FILE_TIMESTAMP_FORMAT};

/// Game mode filter passed through to the API verbatim
/// (e.g. 16 for four-player Throne South).
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Debug,
    derive_more::From,
    derive_more::Display,
    derive_more::FromStr,
    Serialize,
    Deserialize,
)]
pub struct GameMode(u32);

/// A six-hour slice of a single day, the unit of one API request.
#[derive(Clone, Copy, PartialEq, Eq, Debug, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct FetchWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl FetchWindow {
    /// Splits every day of the given month into four quarter-day windows.
    /// Consecutive windows share their boundary instant,
    /// and the last window ends at the first instant of the following month.
    pub fn month_windows(year: i32, month: u32) -> anyhow::Result<Vec<FetchWindow>> {
        let (month_start, month_end) = month_range(year, month)?;
        let mut windows = vec![];
        let mut day = month_start;
        while day <= month_end {
            for quarter in 0..4 {
                let start = day + Duration::hours(6 * quarter);
                windows.push(FetchWindow {
                    start,
                    end: start + Duration::hours(6),
                });
            }
            day += Duration::days(1);
        }
        Ok(windows)
    }

    /// Zero-based index of this window within its day.
    pub fn quarter(self) -> u32 {
        self.start.hour() / 6
    }
}

/// Name of a saved game list file:
/// `{start}-{end}-mode{mode}-{match_count}.json`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct ArchiveFileName {
    start: NaiveDateTime,
    end: NaiveDateTime,
    mode: GameMode,
    match_count: usize,
}

impl ArchiveFileName {
    pub fn new(window: FetchWindow, mode: GameMode, match_count: usize) -> Self {
        Self {
            start: window.start(),
            end: window.end(),
            mode,
            match_count,
        }
    }

    /// The file records the given window and mode, regardless of match count.
    pub fn matches(&self, window: FetchWindow, mode: GameMode) -> bool {
        self.start == window.start() && self.end == window.end() && self.mode == mode
    }
}

impl Display for ArchiveFileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-mode{}-{}.json",
            file_timestamp(self.start),
            file_timestamp(self.end),
            self.mode,
            self.match_count
        )
    }
}

#[derive(PartialEq, Debug, Error)]
pub enum ArchiveFileNameParseError {
    #[error("Not an archive file name: {0:?}")]
    UnrecognizedFormat(String),
    #[error("Error while parsing timestamp: {0}")]
    TimestampParseError(#[from] chrono::format::ParseError),
    #[error("Value cannot be parsed as an integer: {0}")]
    ParseIntError(#[from] ParseIntError),
}

impl FromStr for ArchiveFileName {
    type Err = ArchiveFileNameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pattern = regex!(
            r"^(\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2})-(\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2})-mode(\d+)-(\d+)\.json$"
        );
        let captures = pattern
            .captures(s)
            .ok_or_else(|| ArchiveFileNameParseError::UnrecognizedFormat(s.to_owned()))?;
        let timestamp = |i: usize| NaiveDateTime::parse_from_str(&captures[i], FILE_TIMESTAMP_FORMAT);
        Ok(Self {
            start: timestamp(1)?,
            end: timestamp(2)?,
            mode: GameMode::from(captures[3].parse::<u32>()?),
            match_count: captures[4].parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use itertools::Itertools;

    use super::{ArchiveFileName, ArchiveFileNameParseError, FetchWindow, GameMode};

    fn at(year: i32, month: u32, day: u32, hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn quarter_windows_partition_a_leap_february() {
        let windows = FetchWindow::month_windows(2024, 2).unwrap();
        assert_eq!(windows.len(), 29 * 4);
        assert_eq!(windows[0].start(), at(2024, 2, 1, 0));
        assert_eq!(windows.last().unwrap().end(), at(2024, 3, 1, 0));
        for window in &windows {
            assert_eq!(window.end() - window.start(), Duration::hours(6));
        }
        for (a, b) in windows.iter().tuple_windows() {
            assert_eq!(a.end(), b.start());
        }
    }

    #[test]
    fn quarter_windows_partition_a_non_leap_february() {
        let windows = FetchWindow::month_windows(2023, 2).unwrap();
        assert_eq!(windows.len(), 28 * 4);
        assert_eq!(windows.last().unwrap().end(), at(2023, 3, 1, 0));
    }

    #[test]
    fn quarter_index_follows_start_hour() {
        let windows = FetchWindow::month_windows(2024, 1).unwrap();
        assert_eq!(
            windows[..4].iter().map(|w| w.quarter()).collect_vec(),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn archive_file_name_is_formatted_and_parsed_consistently() {
        let window = FetchWindow {
            start: at(2024, 1, 5, 0),
            end: at(2024, 1, 5, 6),
        };
        let name = ArchiveFileName::new(window, GameMode::from(16), 123);
        let formatted = name.to_string();
        assert_eq!(
            formatted,
            "2024-01-05_00-00-00-2024-01-05_06-00-00-mode16-123.json"
        );
        assert_eq!(formatted.parse::<ArchiveFileName>().unwrap(), name);
        assert!(name.matches(window, GameMode::from(16)));
        assert!(!name.matches(window, GameMode::from(12)));
    }

    #[test]
    fn unrelated_file_names_are_rejected() {
        for name in ["notes.json", "2024-01-05_00-00-00-mode16-123.json", ""] {
            assert_eq!(
                name.parse::<ArchiveFileName>(),
                Err(ArchiveFileNameParseError::UnrecognizedFormat(
                    name.to_owned()
                ))
            );
        }
    }
}
