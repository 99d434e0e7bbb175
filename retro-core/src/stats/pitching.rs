//! Pitching counting stats and the rate stats derived from them

use super::{average_count, StatLine};
use serde::Serialize;
use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

/// One pitching line. Innings are kept as outs recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PitchingLine {
    pub g: u32,
    pub gs: u32,
    pub gf: u32,
    pub cg: u32,
    pub sho: u32,
    pub outs: u32,
    pub h: u32,
    pub r: u32,
    pub er: u32,
    pub hr: u32,
    pub so: u32,
    pub bb: u32,
    pub ibb: u32,
    pub bf: u32,
    pub w: u32,
    pub l: u32,
    pub sv: u32,
    pub gb: u32,
    pub fb: u32,
    pub wp: u32,
    pub hbp: u32,
    pub bk: u32,
    pub pitches: u32,
    pub strikes: u32,
}

impl PitchingLine {
    /// Innings pitched as a decimal number of innings
    pub fn innings(&self) -> f64 {
        self.outs as f64 / 3.0
    }

    pub fn era(&self) -> f64 {
        per_nine(self.er, self.outs)
    }

    pub fn whip(&self) -> f64 {
        if self.outs == 0 {
            0.0
        } else {
            (self.bb + self.h) as f64 * 3.0 / self.outs as f64
        }
    }

    pub fn hits_per_nine(&self) -> f64 {
        per_nine(self.h, self.outs)
    }

    pub fn home_runs_per_nine(&self) -> f64 {
        per_nine(self.hr, self.outs)
    }

    pub fn strikeouts_per_nine(&self) -> f64 {
        per_nine(self.so, self.outs)
    }

    pub fn walks_per_nine(&self) -> f64 {
        per_nine(self.bb, self.outs)
    }

    pub fn strikeouts_per_walk(&self) -> f64 {
        if self.bb == 0 {
            0.0
        } else {
            self.so as f64 / self.bb as f64
        }
    }

    /// Winning percentage on a 0-100 scale
    pub fn win_pct(&self) -> f64 {
        let decisions = self.w + self.l;
        if decisions == 0 {
            0.0
        } else {
            self.w as f64 * 100.0 / decisions as f64
        }
    }
}

fn per_nine(count: u32, outs: u32) -> f64 {
    if outs == 0 {
        0.0
    } else {
        count as f64 * 27.0 / outs as f64
    }
}

impl AddAssign for PitchingLine {
    fn add_assign(&mut self, other: Self) {
        self.g += other.g;
        self.gs += other.gs;
        self.gf += other.gf;
        self.cg += other.cg;
        self.sho += other.sho;
        self.outs += other.outs;
        self.h += other.h;
        self.r += other.r;
        self.er += other.er;
        self.hr += other.hr;
        self.so += other.so;
        self.bb += other.bb;
        self.ibb += other.ibb;
        self.bf += other.bf;
        self.w += other.w;
        self.l += other.l;
        self.sv += other.sv;
        self.gb += other.gb;
        self.fb += other.fb;
        self.wp += other.wp;
        self.hbp += other.hbp;
        self.bk += other.bk;
        self.pitches += other.pitches;
        self.strikes += other.strikes;
    }
}

impl StatLine for PitchingLine {
    fn games(&self) -> u32 {
        self.g
    }

    fn averaged(&self, years: u32) -> Self {
        let avg = |n: u32| average_count(n, years);
        PitchingLine {
            g: avg(self.g),
            gs: avg(self.gs),
            gf: avg(self.gf),
            cg: avg(self.cg),
            sho: avg(self.sho),
            outs: avg(self.outs),
            h: avg(self.h),
            r: avg(self.r),
            er: avg(self.er),
            hr: avg(self.hr),
            so: avg(self.so),
            bb: avg(self.bb),
            ibb: avg(self.ibb),
            bf: avg(self.bf),
            w: avg(self.w),
            l: avg(self.l),
            sv: avg(self.sv),
            gb: avg(self.gb),
            fb: avg(self.fb),
            wp: avg(self.wp),
            hbp: avg(self.hbp),
            bk: avg(self.bk),
            pitches: avg(self.pitches),
            strikes: avg(self.strikes),
        }
    }
}

/// A pitching stat addressable by its abbreviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PitchingStat {
    Games,
    GamesStarted,
    GamesFinished,
    CompleteGames,
    Shutouts,
    InningsPitched,
    Hits,
    Runs,
    EarnedRuns,
    HomeRuns,
    Strikeouts,
    Walks,
    IntentionalWalks,
    BattersFaced,
    Wins,
    Losses,
    Saves,
    GroundBalls,
    FlyBalls,
    WildPitches,
    HitBatters,
    Balks,
    Pitches,
    Strikes,
    EarnedRunAverage,
    Whip,
    HitsPerNine,
    HomeRunsPerNine,
    StrikeoutsPerNine,
    WalksPerNine,
    StrikeoutsPerWalk,
    WinPct,
}

impl PitchingStat {
    /// Every stat, in table column order
    pub const ALL: [PitchingStat; 32] = [
        PitchingStat::Games,
        PitchingStat::GamesStarted,
        PitchingStat::GamesFinished,
        PitchingStat::CompleteGames,
        PitchingStat::Shutouts,
        PitchingStat::InningsPitched,
        PitchingStat::Hits,
        PitchingStat::Runs,
        PitchingStat::EarnedRuns,
        PitchingStat::HomeRuns,
        PitchingStat::Strikeouts,
        PitchingStat::Walks,
        PitchingStat::IntentionalWalks,
        PitchingStat::BattersFaced,
        PitchingStat::Wins,
        PitchingStat::Losses,
        PitchingStat::Saves,
        PitchingStat::GroundBalls,
        PitchingStat::FlyBalls,
        PitchingStat::WildPitches,
        PitchingStat::HitBatters,
        PitchingStat::Balks,
        PitchingStat::Pitches,
        PitchingStat::Strikes,
        PitchingStat::EarnedRunAverage,
        PitchingStat::Whip,
        PitchingStat::HitsPerNine,
        PitchingStat::HomeRunsPerNine,
        PitchingStat::StrikeoutsPerNine,
        PitchingStat::WalksPerNine,
        PitchingStat::StrikeoutsPerWalk,
        PitchingStat::WinPct,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PitchingStat::Games => "G",
            PitchingStat::GamesStarted => "GS",
            PitchingStat::GamesFinished => "GF",
            PitchingStat::CompleteGames => "CG",
            PitchingStat::Shutouts => "SHO",
            PitchingStat::InningsPitched => "IP",
            PitchingStat::Hits => "H",
            PitchingStat::Runs => "R",
            PitchingStat::EarnedRuns => "ER",
            PitchingStat::HomeRuns => "HR",
            PitchingStat::Strikeouts => "SO",
            PitchingStat::Walks => "BB",
            PitchingStat::IntentionalWalks => "IBB",
            PitchingStat::BattersFaced => "BF",
            PitchingStat::Wins => "W",
            PitchingStat::Losses => "L",
            PitchingStat::Saves => "SV",
            PitchingStat::GroundBalls => "GB",
            PitchingStat::FlyBalls => "FB",
            PitchingStat::WildPitches => "WP",
            PitchingStat::HitBatters => "HBP",
            PitchingStat::Balks => "BK",
            PitchingStat::Pitches => "TP",
            PitchingStat::Strikes => "TS",
            PitchingStat::EarnedRunAverage => "ERA",
            PitchingStat::Whip => "WHIP",
            PitchingStat::HitsPerNine => "H9",
            PitchingStat::HomeRunsPerNine => "HR9",
            PitchingStat::StrikeoutsPerNine => "SO9",
            PitchingStat::WalksPerNine => "BB9",
            PitchingStat::StrikeoutsPerWalk => "SO/BB",
            PitchingStat::WinPct => "WL%",
        }
    }

    pub fn is_rate(self) -> bool {
        self.precision() > 0
    }

    pub fn precision(self) -> usize {
        match self {
            PitchingStat::Whip => 3,
            PitchingStat::EarnedRunAverage
            | PitchingStat::HitsPerNine
            | PitchingStat::HomeRunsPerNine
            | PitchingStat::StrikeoutsPerNine
            | PitchingStat::WalksPerNine
            | PitchingStat::StrikeoutsPerWalk => 2,
            PitchingStat::WinPct => 1,
            _ => 0,
        }
    }

    /// Stats where a smaller value ranks higher
    pub fn lower_is_better(self) -> bool {
        matches!(
            self,
            PitchingStat::EarnedRunAverage
                | PitchingStat::Whip
                | PitchingStat::HitsPerNine
                | PitchingStat::HomeRunsPerNine
                | PitchingStat::WalksPerNine
        )
    }

    /// Counting value of the stat (outs for IP), `None` for rate stats
    pub fn count(self, line: &PitchingLine) -> Option<u32> {
        let n = match self {
            PitchingStat::Games => line.g,
            PitchingStat::GamesStarted => line.gs,
            PitchingStat::GamesFinished => line.gf,
            PitchingStat::CompleteGames => line.cg,
            PitchingStat::Shutouts => line.sho,
            PitchingStat::InningsPitched => line.outs,
            PitchingStat::Hits => line.h,
            PitchingStat::Runs => line.r,
            PitchingStat::EarnedRuns => line.er,
            PitchingStat::HomeRuns => line.hr,
            PitchingStat::Strikeouts => line.so,
            PitchingStat::Walks => line.bb,
            PitchingStat::IntentionalWalks => line.ibb,
            PitchingStat::BattersFaced => line.bf,
            PitchingStat::Wins => line.w,
            PitchingStat::Losses => line.l,
            PitchingStat::Saves => line.sv,
            PitchingStat::GroundBalls => line.gb,
            PitchingStat::FlyBalls => line.fb,
            PitchingStat::WildPitches => line.wp,
            PitchingStat::HitBatters => line.hbp,
            PitchingStat::Balks => line.bk,
            PitchingStat::Pitches => line.pitches,
            PitchingStat::Strikes => line.strikes,
            _ => return None,
        };
        Some(n)
    }

    pub fn value(self, line: &PitchingLine) -> f64 {
        match self {
            PitchingStat::EarnedRunAverage => line.era(),
            PitchingStat::Whip => line.whip(),
            PitchingStat::HitsPerNine => line.hits_per_nine(),
            PitchingStat::HomeRunsPerNine => line.home_runs_per_nine(),
            PitchingStat::StrikeoutsPerNine => line.strikeouts_per_nine(),
            PitchingStat::WalksPerNine => line.walks_per_nine(),
            PitchingStat::StrikeoutsPerWalk => line.strikeouts_per_walk(),
            PitchingStat::WinPct => line.win_pct(),
            counting => counting.count(line).unwrap_or(0) as f64,
        }
    }
}

impl fmt::Display for PitchingStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PitchingStat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        let wanted = match wanted.as_str() {
            "K" => "SO",
            "HB" | "HP" => "HBP",
            "SOBB" | "K/BB" => "SO/BB",
            "WL" | "W-L%" | "WPCT" => "WL%",
            "GBO" => "GB",
            "FBO" => "FB",
            other => other,
        };
        PitchingStat::ALL
            .iter()
            .copied()
            .find(|stat| stat.label() == wanted)
            .ok_or_else(|| format!("unknown pitching stat '{}'", s.trim()))
    }
}
