//! Stat accumulators
//!
//! A [`StatLine`] is a set of counting stats that can be summed game by game
//! and season by season. A [`Stat`] names one column of a line, either a
//! counting stat or a rate derived from the counts.

mod batting;
mod pitching;
mod season;

pub use batting::{BattingLine, BattingStat};
pub use pitching::{PitchingLine, PitchingStat};
pub use season::{SeasonLedger, SeasonRow};

use serde::Serialize;
use std::fmt;
use std::ops::AddAssign;

/// A line of counting stats
pub trait StatLine: fmt::Debug + Default + Clone + AddAssign + Serialize {
    /// Games played, used to decide whether a season was active
    fn games(&self) -> u32;

    /// Every counting stat divided by `years`, rounded to the nearest integer
    fn averaged(&self, years: u32) -> Self;
}

/// One named column of a [`StatLine`]
pub trait Stat: Copy + PartialEq + fmt::Display + 'static {
    type Line: StatLine;

    /// Playing-time column that qualifies a player for rate stats
    const QUALIFIER: Self;

    /// Width of a table column
    const WIDTH: usize;

    /// `Batting` or `Pitching`
    const KIND: &'static str;

    fn all() -> &'static [Self];
    fn label(self) -> &'static str;
    fn precision(self) -> usize;
    fn is_rate(self) -> bool;
    fn lower_is_better(self) -> bool;
    fn count(self, line: &Self::Line) -> Option<u32>;
    fn value(self, line: &Self::Line) -> f64;

    /// Text of the stat as printed in a table cell
    fn display(self, line: &Self::Line) -> String;
}

impl Stat for BattingStat {
    type Line = BattingLine;

    const QUALIFIER: Self = BattingStat::PlateAppearances;
    const WIDTH: usize = 6;
    const KIND: &'static str = "Batting";

    fn all() -> &'static [Self] {
        &BattingStat::ALL
    }

    fn label(self) -> &'static str {
        BattingStat::label(self)
    }

    fn precision(self) -> usize {
        BattingStat::precision(self)
    }

    fn is_rate(self) -> bool {
        BattingStat::is_rate(self)
    }

    fn lower_is_better(self) -> bool {
        false
    }

    fn count(self, line: &BattingLine) -> Option<u32> {
        BattingStat::count(self, line)
    }

    fn value(self, line: &BattingLine) -> f64 {
        BattingStat::value(self, line)
    }

    fn display(self, line: &BattingLine) -> String {
        match BattingStat::count(self, line) {
            Some(n) => n.to_string(),
            None => format_rate(BattingStat::value(self, line), 3),
        }
    }
}

impl Stat for PitchingStat {
    type Line = PitchingLine;

    const QUALIFIER: Self = PitchingStat::InningsPitched;
    const WIDTH: usize = 7;
    const KIND: &'static str = "Pitching";

    fn all() -> &'static [Self] {
        &PitchingStat::ALL
    }

    fn label(self) -> &'static str {
        PitchingStat::label(self)
    }

    fn precision(self) -> usize {
        PitchingStat::precision(self)
    }

    fn is_rate(self) -> bool {
        PitchingStat::is_rate(self)
    }

    fn lower_is_better(self) -> bool {
        PitchingStat::lower_is_better(self)
    }

    fn count(self, line: &PitchingLine) -> Option<u32> {
        PitchingStat::count(self, line)
    }

    fn value(self, line: &PitchingLine) -> f64 {
        PitchingStat::value(self, line)
    }

    fn display(self, line: &PitchingLine) -> String {
        match self {
            PitchingStat::InningsPitched => format_innings(line.outs),
            stat if stat.is_rate() => format!(
                "{:.*}",
                PitchingStat::precision(stat),
                PitchingStat::value(stat, line)
            ),
            stat => PitchingStat::count(stat, line).unwrap_or(0).to_string(),
        }
    }
}

/// Yearly average of a counting stat, rounded half away from zero
pub fn average_count(total: u32, years: u32) -> u32 {
    if years == 0 {
        return 0;
    }
    (total as f64 / years as f64).round() as u32
}

/// Format a fractional rate the way box scores print it: `.250`, `1.023`
pub fn format_rate(value: f64, precision: usize) -> String {
    let text = format!("{:.*}", precision, value);
    match text.strip_prefix("0.") {
        Some(frac) => format!(".{}", frac),
        None => text,
    }
}

/// Format outs as innings pitched: 605 outs is `201.2`
pub fn format_innings(outs: u32) -> String {
    format!("{}.{}", outs / 3, outs % 3)
}

/// Round a value to the precision it is displayed with
pub fn round_to(value: f64, precision: usize) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_count() {
        assert_eq!(average_count(305, 2), 153);
        assert_eq!(average_count(10, 3), 3);
        assert_eq!(average_count(10, 0), 0);
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.25, 3), ".250");
        assert_eq!(format_rate(1.0234, 3), "1.023");
        assert_eq!(format_rate(0.0, 3), ".000");
    }

    #[test]
    fn test_format_innings() {
        assert_eq!(format_innings(605), "201.2");
        assert_eq!(format_innings(0), "0.0");
    }

    #[test]
    fn test_stat_display() {
        let batting = BattingLine {
            h: 100,
            ab: 400,
            ..Default::default()
        };
        assert_eq!(BattingStat::BattingAverage.display(&batting), ".250");
        assert_eq!(BattingStat::Hits.display(&batting), "100");

        let pitching = PitchingLine {
            outs: 600,
            er: 60,
            w: 3,
            l: 1,
            ..Default::default()
        };
        assert_eq!(PitchingStat::InningsPitched.display(&pitching), "200.0");
        assert_eq!(PitchingStat::EarnedRunAverage.display(&pitching), "2.70");
        assert_eq!(PitchingStat::WinPct.display(&pitching), "75.0");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.30049, 3), 0.3);
        assert_eq!(round_to(2.705, 1), 2.7);
    }
}
