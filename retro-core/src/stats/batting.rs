//! Batting counting stats and the rate stats derived from them

use super::{average_count, StatLine};
use serde::Serialize;
use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

/// One batting line: a single game, a season, or a career total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BattingLine {
    pub g: u32,
    pub pa: u32,
    pub ab: u32,
    pub r: u32,
    pub h: u32,
    pub b2: u32,
    pub b3: u32,
    pub hr: u32,
    /// `None` when the source did not record runs batted in
    pub rbi: Option<u32>,
    pub so: u32,
    pub bb: u32,
    pub ibb: u32,
    pub sb: u32,
    pub cs: u32,
    pub sh: u32,
    pub sf: u32,
    pub hbp: u32,
    pub gdp: u32,
}

impl BattingLine {
    pub fn total_bases(&self) -> u32 {
        self.h + self.b2 + 2 * self.b3 + 3 * self.hr
    }

    pub fn extra_base_hits(&self) -> u32 {
        self.b2 + self.b3 + self.hr
    }

    pub fn batting_average(&self) -> f64 {
        ratio(self.h, self.ab)
    }

    pub fn on_base_percentage(&self) -> f64 {
        let on_base = self.h + self.bb + self.hbp;
        ratio(on_base, self.ab + self.bb + self.hbp + self.sf)
    }

    pub fn slugging(&self) -> f64 {
        ratio(self.total_bases(), self.ab)
    }

    pub fn on_base_plus_slugging(&self) -> f64 {
        self.on_base_percentage() + self.slugging()
    }
}

fn ratio(num: u32, denom: u32) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

impl AddAssign for BattingLine {
    fn add_assign(&mut self, other: Self) {
        self.g += other.g;
        self.pa += other.pa;
        self.ab += other.ab;
        self.r += other.r;
        self.h += other.h;
        self.b2 += other.b2;
        self.b3 += other.b3;
        self.hr += other.hr;
        // an unrecorded RBI count contributes nothing
        self.rbi = match (self.rbi, other.rbi) {
            (Some(a), Some(b)) => Some(a + b),
            (a, b) => a.or(b),
        };
        self.so += other.so;
        self.bb += other.bb;
        self.ibb += other.ibb;
        self.sb += other.sb;
        self.cs += other.cs;
        self.sh += other.sh;
        self.sf += other.sf;
        self.hbp += other.hbp;
        self.gdp += other.gdp;
    }
}

impl StatLine for BattingLine {
    fn games(&self) -> u32 {
        self.g
    }

    fn averaged(&self, years: u32) -> Self {
        let avg = |n: u32| average_count(n, years);
        BattingLine {
            g: avg(self.g),
            pa: avg(self.pa),
            ab: avg(self.ab),
            r: avg(self.r),
            h: avg(self.h),
            b2: avg(self.b2),
            b3: avg(self.b3),
            hr: avg(self.hr),
            rbi: self.rbi.map(avg),
            so: avg(self.so),
            bb: avg(self.bb),
            ibb: avg(self.ibb),
            sb: avg(self.sb),
            cs: avg(self.cs),
            sh: avg(self.sh),
            sf: avg(self.sf),
            hbp: avg(self.hbp),
            gdp: avg(self.gdp),
        }
    }
}

/// A batting stat addressable by its abbreviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BattingStat {
    Games,
    PlateAppearances,
    AtBats,
    Runs,
    Hits,
    Doubles,
    Triples,
    HomeRuns,
    ExtraBaseHits,
    RunsBattedIn,
    Strikeouts,
    Walks,
    IntentionalWalks,
    StolenBases,
    CaughtStealing,
    SacrificeHits,
    SacrificeFlies,
    HitByPitch,
    GroundedIntoDoublePlay,
    TotalBases,
    BattingAverage,
    OnBasePercentage,
    Slugging,
    OnBasePlusSlugging,
}

impl BattingStat {
    /// Every stat, in table column order
    pub const ALL: [BattingStat; 24] = [
        BattingStat::Games,
        BattingStat::PlateAppearances,
        BattingStat::AtBats,
        BattingStat::Runs,
        BattingStat::Hits,
        BattingStat::Doubles,
        BattingStat::Triples,
        BattingStat::HomeRuns,
        BattingStat::ExtraBaseHits,
        BattingStat::RunsBattedIn,
        BattingStat::Strikeouts,
        BattingStat::Walks,
        BattingStat::IntentionalWalks,
        BattingStat::StolenBases,
        BattingStat::CaughtStealing,
        BattingStat::SacrificeHits,
        BattingStat::SacrificeFlies,
        BattingStat::HitByPitch,
        BattingStat::GroundedIntoDoublePlay,
        BattingStat::TotalBases,
        BattingStat::BattingAverage,
        BattingStat::OnBasePercentage,
        BattingStat::Slugging,
        BattingStat::OnBasePlusSlugging,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BattingStat::Games => "G",
            BattingStat::PlateAppearances => "PA",
            BattingStat::AtBats => "AB",
            BattingStat::Runs => "R",
            BattingStat::Hits => "H",
            BattingStat::Doubles => "2B",
            BattingStat::Triples => "3B",
            BattingStat::HomeRuns => "HR",
            BattingStat::ExtraBaseHits => "XBH",
            BattingStat::RunsBattedIn => "RBI",
            BattingStat::Strikeouts => "SO",
            BattingStat::Walks => "BB",
            BattingStat::IntentionalWalks => "IBB",
            BattingStat::StolenBases => "SB",
            BattingStat::CaughtStealing => "CS",
            BattingStat::SacrificeHits => "SH",
            BattingStat::SacrificeFlies => "SF",
            BattingStat::HitByPitch => "HBP",
            BattingStat::GroundedIntoDoublePlay => "GDP",
            BattingStat::TotalBases => "TB",
            BattingStat::BattingAverage => "BA",
            BattingStat::OnBasePercentage => "OBP",
            BattingStat::Slugging => "SLG",
            BattingStat::OnBasePlusSlugging => "OPS",
        }
    }

    pub fn is_rate(self) -> bool {
        matches!(
            self,
            BattingStat::BattingAverage
                | BattingStat::OnBasePercentage
                | BattingStat::Slugging
                | BattingStat::OnBasePlusSlugging
        )
    }

    /// Decimal places shown for the stat
    pub fn precision(self) -> usize {
        if self.is_rate() {
            3
        } else {
            0
        }
    }

    /// Counting value of the stat, `None` for rate stats
    pub fn count(self, line: &BattingLine) -> Option<u32> {
        let n = match self {
            BattingStat::Games => line.g,
            BattingStat::PlateAppearances => line.pa,
            BattingStat::AtBats => line.ab,
            BattingStat::Runs => line.r,
            BattingStat::Hits => line.h,
            BattingStat::Doubles => line.b2,
            BattingStat::Triples => line.b3,
            BattingStat::HomeRuns => line.hr,
            BattingStat::ExtraBaseHits => line.extra_base_hits(),
            BattingStat::RunsBattedIn => line.rbi.unwrap_or(0),
            BattingStat::Strikeouts => line.so,
            BattingStat::Walks => line.bb,
            BattingStat::IntentionalWalks => line.ibb,
            BattingStat::StolenBases => line.sb,
            BattingStat::CaughtStealing => line.cs,
            BattingStat::SacrificeHits => line.sh,
            BattingStat::SacrificeFlies => line.sf,
            BattingStat::HitByPitch => line.hbp,
            BattingStat::GroundedIntoDoublePlay => line.gdp,
            BattingStat::TotalBases => line.total_bases(),
            _ => return None,
        };
        Some(n)
    }

    pub fn value(self, line: &BattingLine) -> f64 {
        match self {
            BattingStat::BattingAverage => line.batting_average(),
            BattingStat::OnBasePercentage => line.on_base_percentage(),
            BattingStat::Slugging => line.slugging(),
            BattingStat::OnBasePlusSlugging => line.on_base_plus_slugging(),
            counting => counting.count(line).unwrap_or(0) as f64,
        }
    }
}

impl fmt::Display for BattingStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BattingStat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        let wanted = match wanted.as_str() {
            "AVG" => "BA",
            "K" => "SO",
            "HP" => "HBP",
            "GIDP" => "GDP",
            "B2" => "2B",
            "B3" => "3B",
            other => other,
        };
        BattingStat::ALL
            .iter()
            .copied()
            .find(|stat| stat.label() == wanted)
            .ok_or_else(|| format!("unknown batting stat '{}'", s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BattingLine {
        BattingLine {
            g: 120,
            pa: 470,
            ab: 400,
            r: 70,
            h: 100,
            b2: 20,
            b3: 5,
            hr: 10,
            rbi: Some(60),
            so: 80,
            bb: 50,
            ibb: 4,
            sb: 12,
            cs: 3,
            sh: 5,
            sf: 5,
            hbp: 10,
            gdp: 8,
        }
    }

    #[test]
    fn test_batting_average() {
        let line = sample();
        assert!((line.batting_average() - 0.250).abs() < 1e-12);
    }

    #[test]
    fn test_on_base_and_slugging() {
        let line = sample();
        // (100 + 50 + 10) / (400 + 50 + 10 + 5)
        assert!((line.on_base_percentage() - 160.0 / 465.0).abs() < 1e-12);
        assert_eq!(line.total_bases(), 100 + 20 + 10 + 30);
        assert!((line.slugging() - 160.0 / 400.0).abs() < 1e-12);
        let ops = line.on_base_percentage() + line.slugging();
        assert!((line.on_base_plus_slugging() - ops).abs() < 1e-12);
        assert_eq!(line.extra_base_hits(), 35);
    }

    #[test]
    fn test_zero_denominators() {
        let line = BattingLine::default();
        assert_eq!(line.batting_average(), 0.0);
        assert_eq!(line.on_base_percentage(), 0.0);
        assert_eq!(line.slugging(), 0.0);
    }

    #[test]
    fn test_add_assign_with_unknown_rbi() {
        let mut total = BattingLine {
            rbi: None,
            h: 2,
            ..Default::default()
        };
        total += BattingLine {
            rbi: Some(3),
            h: 1,
            ..Default::default()
        };
        total += BattingLine {
            rbi: None,
            ..Default::default()
        };
        assert_eq!(total.rbi, Some(3));
        assert_eq!(total.h, 3);
    }

    #[test]
    fn test_averaged_rounds_each_count() {
        let line = BattingLine {
            g: 305,
            hr: 45,
            rbi: Some(101),
            ..Default::default()
        };
        let avg = line.averaged(2);
        assert_eq!(avg.g, 153);
        assert_eq!(avg.hr, 23);
        assert_eq!(avg.rbi, Some(51));
    }

    #[test]
    fn test_stat_parsing() {
        assert_eq!("hr".parse::<BattingStat>(), Ok(BattingStat::HomeRuns));
        assert_eq!(" RBI ".parse::<BattingStat>(), Ok(BattingStat::RunsBattedIn));
        assert_eq!("avg".parse::<BattingStat>(), Ok(BattingStat::BattingAverage));
        assert_eq!("2b".parse::<BattingStat>(), Ok(BattingStat::Doubles));
        assert!("WAR".parse::<BattingStat>().is_err());
    }

    #[test]
    fn test_stat_values() {
        let line = sample();
        assert_eq!(BattingStat::TotalBases.value(&line), 160.0);
        assert_eq!(BattingStat::RunsBattedIn.count(&line), Some(60));
        assert_eq!(BattingStat::BattingAverage.count(&line), None);
        assert!(BattingStat::Slugging.is_rate());
        assert_eq!(BattingStat::Slugging.precision(), 3);
        assert_eq!(BattingStat::Hits.precision(), 0);
    }
}
