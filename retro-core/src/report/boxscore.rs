//! Text box score of one game, laid out the way `cwbox` prints it

use super::table::truncate;
use crate::catalog::NameBook;
use crate::model::{BoxPitcher, BoxPlayer, GameBox, Side};
use crate::stats::BattingLine;
use serde::Serialize;
use std::io::{self, Write};

const MARKERS: [char; 3] = ['*', '+', '#'];

/// Width of one team's batting cell
const CELL: usize = 45;

/// A game together with what is needed to print it
#[derive(Serialize)]
pub struct GameSummary<'a> {
    pub game: &'a GameBox,
    /// Visitor and home city names
    pub cities: [String; 2],
    #[serde(skip)]
    names: &'a NameBook,
}

impl<'a> GameSummary<'a> {
    pub fn new(game: &'a GameBox, names: &'a NameBook, cities: [String; 2]) -> Self {
        Self { game, cities, names }
    }

    fn city(&self, side: Side) -> &str {
        &self.cities[side.index()]
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.write_header(out)?;
        self.write_batting(out)?;
        writeln!(out)?;
        self.write_line_score(out)?;
        writeln!(out)?;
        self.write_pitching(out)?;
        writeln!(out)?;
        self.write_apparatus(out)?;
        writeln!(out)
    }

    fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let info = &self.game.info;
        let date = match info.month_day_year() {
            Some((month, day, year)) => format!("{}/{}/{}", month, day, year),
            None => info.date.clone(),
        };
        let number = match info.number {
            0 => String::new(),
            n => format!(", game #{}", n),
        };
        writeln!(out)?;
        writeln!(
            out,
            "\t\tGame of {}{} -- {} @ {} ({})",
            date,
            number,
            self.city(Side::Visitor),
            self.city(Side::Home),
            info.daynight_code()
        )?;
        writeln!(out)
    }

    /// Name and positions, fit into the twenty character name column
    fn player_label(&self, player: &BoxPlayer) -> String {
        let name = self.names.box_name(&player.player_id);
        let positions: Vec<&str> = player.positions.iter().map(|p| p.abbrev()).collect();
        let posstr = positions.join("-");
        if posstr.len() <= 10 {
            let room = 18 - posstr.len();
            format!("{}, {}", truncate(&name, room), posstr)
        } else {
            format!("{}, {}...", name, positions.first().copied().unwrap_or(""))
        }
    }

    fn batting_cell(&self, player: &BoxPlayer) -> String {
        let b = &player.batting;
        let mut cell = format!(
            "{:20}{:3}{:4}{:4}{:4}{:4}{:3}",
            self.player_label(player),
            b.pa,
            b.ab,
            b.h,
            b.bb,
            b.so,
            b.r
        );
        if let Some(rbi) = b.rbi {
            cell.push_str(&format!("{:3}", rbi));
        }
        format!("{:width$}", cell, width = CELL)
    }

    fn write_batting<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "  {:18} PA  AB   H  BB  SO  R RBI      {:18} PA  AB   H  BB  SO  R RBI",
            self.city(Side::Visitor),
            self.city(Side::Home)
        )?;

        let visitors = self.game.batting_order(Side::Visitor);
        let home = self.game.batting_order(Side::Home);
        for i in 0..visitors.len().max(home.len()) {
            let mut line = String::new();
            for order in [&visitors, &home] {
                match order.get(i) {
                    Some(player) => line.push_str(&self.batting_cell(player)),
                    None => line.push_str(&" ".repeat(CELL)),
                }
                line.push_str("     ");
            }
            writeln!(out, "{}", line.trim_end())?;
        }

        writeln!(
            out,
            "{:20} --  --  --  --  -- -- -- {:24} --  --  --  --  -- -- --",
            "", ""
        )?;
        let totals = |side: Side| {
            let t = self.game.team_batting(side);
            let rbi = if self.rbi_known(side) {
                format!("{:3} ", t.rbi.unwrap_or(0))
            } else {
                "    ".to_string()
            };
            format!("{:3}{:4}{:4}{:4}{:4}{:3}{}", t.pa, t.ab, t.h, t.bb, t.so, t.r, rbi)
        };
        let line = format!(
            "{:20}{}{:24}{}",
            "",
            totals(Side::Visitor),
            "",
            totals(Side::Home)
        );
        writeln!(out, "{}", line.trim_end())
    }

    fn rbi_known(&self, side: Side) -> bool {
        self.game
            .batters
            .iter()
            .filter(|b| b.side == side)
            .all(|b| b.batting.rbi.is_some())
    }

    fn write_line_score<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for side in Side::BOTH {
            let mut line = format!("{:16}", truncate(self.city(side), 16));
            if let Some(score) = &self.game.line_score {
                for (i, runs) in score.innings(side).iter().enumerate() {
                    match runs {
                        Some(r) if *r >= 10 => line.push_str(&format!("({})", r)),
                        Some(r) => line.push_str(&r.to_string()),
                        None => {
                            if side == Side::Home {
                                line.push_str("x ");
                            }
                            break;
                        }
                    }
                    if (i + 1) % 3 == 0 {
                        line.push(' ');
                    }
                }
            }
            writeln!(out, "{} -- {:2}", line, self.game.runs(side))?;
        }
        Ok(())
    }

    fn pitcher_label(&self, pitcher: &BoxPitcher, notes: &mut usize) -> String {
        let info = &self.game.info;
        let id = Some(pitcher.player_id.as_str());
        let mut name = self.names.box_name(&pitcher.player_id);
        if info.winning_pitcher.as_deref() == id {
            name.push_str(" (W)");
        } else if info.losing_pitcher.as_deref() == id {
            name.push_str(" (L)");
        } else if info.save.as_deref() == id {
            name.push_str(" (S)");
        }
        if has_no_out_note(pitcher) {
            name.push_str(&marker(*notes));
            *notes += 1;
        }
        name
    }

    fn write_pitching<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut notes = 0;
        for side in Side::BOTH {
            writeln!(out, "  {:18}   IP  H  R ER BB SO  TP TS GB FB", self.city(side))?;
            for pitcher in self.game.pitching_order(side) {
                let p = &pitcher.pitching;
                writeln!(
                    out,
                    "{:20} {:2}.{} {:2} {:2}{:3}{:3}{:3}{:4}{:3}{:3}{:3}",
                    self.pitcher_label(pitcher, &mut notes),
                    p.outs / 3,
                    p.outs % 3,
                    p.h,
                    p.r,
                    p.er,
                    p.bb,
                    p.so,
                    p.pitches,
                    p.strikes,
                    p.gb,
                    p.fb
                )?;
            }
            if side == Side::Visitor {
                writeln!(out)?;
            }
        }

        let mut notes = 0;
        for side in Side::BOTH {
            for pitcher in self.game.pitching_order(side) {
                let Some(note) = pitcher.no_out.filter(|n| n.batters > 0) else {
                    continue;
                };
                let batters = match note.batters {
                    1 => "1 batter".to_string(),
                    n => format!("{} batters", n),
                };
                match note.inning {
                    Some(inning) => writeln!(
                        out,
                        "  {} Pitched to {} in {}",
                        marker(notes),
                        batters,
                        ordinal(inning)
                    )?,
                    None => writeln!(
                        out,
                        "  {} Pitched to {} without retiring a batter",
                        marker(notes),
                        batters
                    )?,
                }
                notes += 1;
            }
        }
        Ok(())
    }

    /// `Name` or `Name N` for every player with a non-zero count, visitors first
    fn player_counts<F>(&self, count: F) -> Vec<String>
    where
        F: Fn(&BattingLine) -> u32,
    {
        let mut seen: Vec<(&str, u32)> = Vec::new();
        for side in Side::BOTH {
            for player in self.game.batting_order(side) {
                let n = count(&player.batting);
                if n == 0 {
                    continue;
                }
                match seen.iter_mut().find(|(id, _)| *id == player.player_id) {
                    Some(entry) => entry.1 += n,
                    None => seen.push((player.player_id.as_str(), n)),
                }
            }
        }
        seen.into_iter().map(|(id, n)| self.counted(id, n)).collect()
    }

    fn counted(&self, player_id: &str, n: u32) -> String {
        let name = self.names.box_name(player_id);
        if n == 1 {
            name
        } else {
            format!("{} {}", name, n)
        }
    }

    fn team_counts(&self, counts: [Option<u32>; 2]) -> Option<String> {
        let parts: Vec<String> = Side::BOTH
            .iter()
            .filter_map(|side| match counts[side.index()] {
                Some(n) if n > 0 => Some(format!("{} {}", self.city(*side), n)),
                _ => None,
            })
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }

    fn write_apparatus<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let game = self.game;
        let list = |out: &mut W, label: &str, items: Vec<String>| -> io::Result<()> {
            if items.is_empty() {
                return Ok(());
            }
            writeln!(out, "{} -- {}", label, items.join(", "))
        };

        let by_side = move |side: Side| game.fielders.iter().filter(move |f| f.side == side);
        let errors: Vec<String> = Side::BOTH
            .iter()
            .flat_map(|side| by_side(*side))
            .filter(|f| f.errors > 0)
            .map(|f| self.counted(&f.player_id, f.errors))
            .collect();
        list(out, "E", errors)?;

        if let Some(dp) = self.team_counts(game.double_plays) {
            writeln!(out, "DP -- {}", dp)?;
        }
        if let Some(tp) = self.team_counts(game.triple_plays) {
            writeln!(out, "TP -- {}", tp)?;
        }
        let lob = game.left_on_base;
        if lob.iter().any(|n| n.unwrap_or(0) > 0) {
            writeln!(
                out,
                "LOB -- {} {}, {} {}",
                self.city(Side::Visitor),
                lob[0].unwrap_or(0),
                self.city(Side::Home),
                lob[1].unwrap_or(0)
            )?;
        }

        list(out, "2B", self.player_counts(|b| b.b2))?;
        list(out, "3B", self.player_counts(|b| b.b3))?;
        list(out, "HR", self.player_counts(|b| b.hr))?;
        list(out, "SB", self.player_counts(|b| b.sb))?;
        list(out, "CS", self.player_counts(|b| b.cs))?;
        list(out, "SH", self.player_counts(|b| b.sh))?;
        list(out, "SF", self.player_counts(|b| b.sf))?;
        list(out, "HBP", self.hit_by_pitch())?;

        let pitchers = move || Side::BOTH.into_iter().flat_map(move |side| game.pitching_order(side));
        let wild: Vec<String> = pitchers()
            .filter(|p| p.pitching.wp > 0)
            .map(|p| self.counted(&p.player_id, p.pitching.wp))
            .collect();
        list(out, "WP", wild)?;
        let balks: Vec<String> = pitchers()
            .filter(|p| p.pitching.bk > 0)
            .map(|p| self.counted(&p.player_id, p.pitching.bk))
            .collect();
        list(out, "Balk", balks)?;

        let passed: Vec<String> = Side::BOTH
            .iter()
            .flat_map(|side| by_side(*side))
            .filter(|f| f.passed_balls > 0)
            .map(|f| self.counted(&f.player_id, f.passed_balls))
            .collect();
        list(out, "PB", passed)?;

        if let Some(minutes) = game.info.time_of_game.filter(|m| *m > 0) {
            writeln!(out, "T -- {}:{:02}", minutes / 60, minutes % 60)?;
        }
        if let Some(attendance) = game.info.attendance {
            writeln!(out, "A -- {}", attendance)?;
        }
        Ok(())
    }

    /// `by Pitcher (Batter)`, with a count for repeats
    fn hit_by_pitch(&self) -> Vec<String> {
        let mut seen: Vec<(Option<&str>, &str, u32)> = Vec::new();
        for hbp in &self.game.hit_by_pitch {
            let key = (hbp.pitcher.as_deref(), hbp.batter.as_str());
            match seen.iter_mut().find(|(p, b, _)| (*p, *b) == key) {
                Some(entry) => entry.2 += 1,
                None => seen.push((key.0, key.1, 1)),
            }
        }
        seen.into_iter()
            .map(|(pitcher, batter, n)| {
                let batter = self.names.box_name(batter);
                let text = match pitcher {
                    Some(p) => format!("by {} ({})", self.names.box_name(p), batter),
                    None => batter,
                };
                if n == 1 {
                    text
                } else {
                    format!("{} {}", text, n)
                }
            })
            .collect()
    }
}

fn has_no_out_note(pitcher: &BoxPitcher) -> bool {
    pitcher.no_out.map_or(false, |n| n.batters > 0)
}

/// `*`, `+`, `#`, then `**`, `++`, `##` and so on
fn marker(index: usize) -> String {
    MARKERS[index % 3].to_string().repeat(index / 3 + 1)
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, 11) | (2, 12) | (3, 13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
