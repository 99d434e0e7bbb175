//! Validation of command line values.
//!
//! A value that is out of range is replaced by a default and a warning is
//! printed, rather than aborting the run.

use log::warn;
use std::str::FromStr;

/// First and last seasons in the Retrosheet archive
pub const FIRST_YEAR: i32 = 1871;
pub const LAST_YEAR: i32 = 2025;

pub const DEFAULT_LIMIT: usize = 30;
pub const MIN_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 120;

pub const DEFAULT_START_MMDD: &str = "0301";
pub const DEFAULT_END_MMDD: &str = "1031";

/// A validated value, with the warning to show if a default was substituted
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<T> {
    pub value: T,
    pub warning: Option<String>,
}

impl<T> Checked<T> {
    fn valid(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    fn replaced(value: T, warning: String) -> Self {
        Self {
            value,
            warning: Some(warning),
        }
    }

    /// Print the warning, if any, and return the value
    pub fn announce(self) -> T {
        if let Some(warning) = &self.warning {
            eprintln!(">>> {}", warning);
            warn!("{}", warning);
        }
        self.value
    }
}

fn in_archive(year: i32) -> bool {
    (FIRST_YEAR..=LAST_YEAR).contains(&year)
}

pub fn start_year(raw: i32, default: i32) -> Checked<i32> {
    if in_archive(raw) {
        Checked::valid(raw)
    } else {
        Checked::replaced(
            default,
            format!("INVALID start year '{}'! Using default year = {}.", raw, default),
        )
    }
}

/// End year of a range. Missing means the start year.
pub fn end_year(raw: Option<i32>, start: i32) -> Checked<i32> {
    match raw {
        None => Checked::valid(start),
        Some(end) if in_archive(end) && end >= start => Checked::valid(end),
        Some(end) => Checked::replaced(
            start,
            format!("INVALID end year '{}'! Using end year = {}.", end, start),
        ),
    }
}

pub fn limit(raw: usize) -> Checked<usize> {
    if (MIN_LIMIT..=MAX_LIMIT).contains(&raw) {
        Checked::valid(raw)
    } else {
        Checked::replaced(
            DEFAULT_LIMIT,
            format!("IMPROPER limit '{}'! Using default value = {}.", raw, DEFAULT_LIMIT),
        )
    }
}

pub fn stat<S: FromStr + std::fmt::Display>(raw: &str, default: S) -> Checked<S> {
    match raw.parse() {
        Ok(stat) => Checked::valid(stat),
        Err(_) => {
            let warning = format!("IMPROPER stat '{}'! Using default value = {}.", raw, default);
            Checked::replaced(default, warning)
        }
    }
}

/// Retrosheet player id: five letters and three digits, e.g. `maysw101`
pub fn player_id(raw: &str, default: &str) -> Checked<String> {
    let id = raw.trim().to_ascii_lowercase();
    let well_formed = id.len() >= 8
        && id.is_ascii()
        && id[..5].chars().all(|c| c.is_ascii_alphabetic())
        && id[5..8].chars().all(|c| c.is_ascii_digit());
    if well_formed {
        Checked::valid(id[..8].to_string())
    } else {
        Checked::replaced(
            default.to_string(),
            format!("INVALID player id '{}'! Using default id = {}.", raw.trim(), default),
        )
    }
}

/// Retrosheet team id, upper-cased and cut to three characters
pub fn team(raw: &str, default: &str) -> Checked<String> {
    let team = raw.trim().to_ascii_uppercase();
    if team.len() >= 3 && team.chars().all(|c| c.is_ascii_alphanumeric()) {
        Checked::valid(team[..3].to_string())
    } else {
        Checked::replaced(
            default.to_string(),
            format!("INVALID team '{}'! Using default team = {}.", raw.trim(), default),
        )
    }
}

/// Month and day as `MMDD`
pub fn month_day(raw: Option<&str>, default: &str) -> Checked<String> {
    let Some(raw) = raw else {
        return Checked::valid(default.to_string());
    };
    let text = raw.trim();
    let valid = text.len() == 4
        && text.chars().all(|c| c.is_ascii_digit())
        && matches!(text[..2].parse::<u32>(), Ok(1..=12))
        && matches!(text[2..].parse::<u32>(), Ok(1..=31));
    if valid {
        Checked::valid(text.to_string())
    } else {
        Checked::replaced(
            default.to_string(),
            format!("INVALID date '{}'! Using default date = {}.", text, default),
        )
    }
}
