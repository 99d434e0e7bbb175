//! Per-game box score data shared by the engines and the reports

use crate::stats::{BattingLine, PitchingLine};
use serde::Serialize;
use std::fmt;

/// Which team a line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Side {
    Visitor,
    Home,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Visitor, Side::Home];

    /// Retrosheet encodes the visitor as 0 and the home team as 1
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "0" => Some(Side::Visitor),
            "1" => Some(Side::Home),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Visitor => 0,
            Side::Home => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Side::Visitor => Side::Home,
            Side::Home => Side::Visitor,
        }
    }
}

/// Fielding position, numbered the way scorers number them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Position {
    Pitcher,
    Catcher,
    FirstBase,
    SecondBase,
    ThirdBase,
    Shortstop,
    LeftField,
    CenterField,
    RightField,
    DesignatedHitter,
    PinchHitter,
    PinchRunner,
}

impl Position {
    /// The nine fielding positions in scoring order
    pub const FIELD: [Position; 9] = [
        Position::Pitcher,
        Position::Catcher,
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::Shortstop,
        Position::LeftField,
        Position::CenterField,
        Position::RightField,
    ];

    pub fn from_number(n: u32) -> Option<Self> {
        let pos = match n {
            1 => Position::Pitcher,
            2 => Position::Catcher,
            3 => Position::FirstBase,
            4 => Position::SecondBase,
            5 => Position::ThirdBase,
            6 => Position::Shortstop,
            7 => Position::LeftField,
            8 => Position::CenterField,
            9 => Position::RightField,
            10 => Position::DesignatedHitter,
            11 => Position::PinchHitter,
            12 => Position::PinchRunner,
            _ => return None,
        };
        Some(pos)
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            Position::Pitcher => "p",
            Position::Catcher => "c",
            Position::FirstBase => "1b",
            Position::SecondBase => "2b",
            Position::ThirdBase => "3b",
            Position::Shortstop => "ss",
            Position::LeftField => "lf",
            Position::CenterField => "cf",
            Position::RightField => "rf",
            Position::DesignatedHitter => "dh",
            Position::PinchHitter => "ph",
            Position::PinchRunner => "pr",
        }
    }

    /// Column prefix used by cwdaily for this position's fielding counts
    pub fn daily_code(self) -> &'static str {
        match self {
            Position::Pitcher => "P",
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::Shortstop => "SS",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
            Position::DesignatedHitter => "DH",
            Position::PinchHitter => "PH",
            Position::PinchRunner => "PR",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// A batter's line in one game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlayer {
    pub player_id: String,
    pub side: Side,
    /// Batting order slot, 1 through 9
    pub slot: u32,
    /// Order of appearance within the slot, starters are 1
    pub seq: u32,
    pub positions: Vec<Position>,
    pub batting: BattingLine,
}

/// Batters faced in an inning without retiring anyone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoOutNote {
    pub batters: u32,
    /// Inning, when the source records it
    pub inning: Option<u32>,
}

/// A pitcher's line in one game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPitcher {
    pub player_id: String,
    pub side: Side,
    /// Order of appearance, the starter is 1
    pub seq: u32,
    pub pitching: PitchingLine,
    pub no_out: Option<NoOutNote>,
}

/// Errors and passed balls charged to a fielder in one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldingNote {
    pub player_id: String,
    pub side: Side,
    pub errors: u32,
    pub passed_balls: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitByPitch {
    pub pitcher: Option<String>,
    pub batter: String,
}

/// Runs by inning. `None` marks a half inning that was not played.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineScore {
    pub visitor: Vec<Option<u32>>,
    pub home: Vec<Option<u32>>,
}

impl LineScore {
    pub fn innings(&self, side: Side) -> &[Option<u32>] {
        match side {
            Side::Visitor => &self.visitor,
            Side::Home => &self.home,
        }
    }

    pub fn runs(&self, side: Side) -> u32 {
        self.innings(side).iter().flatten().sum()
    }

    /// Parse the compact line text cwgame prints: one digit per inning,
    /// `(nn)` for double-digit innings and `x` for an unplayed half
    pub fn parse_innings(text: &str) -> Option<Vec<Option<u32>>> {
        let mut innings = Vec::new();
        let mut chars = text.trim().chars();
        while let Some(c) = chars.next() {
            match c {
                'x' | 'X' => innings.push(None),
                '(' => {
                    let digits: String = chars.by_ref().take_while(|c| *c != ')').collect();
                    innings.push(Some(digits.parse().ok()?));
                }
                d => innings.push(Some(d.to_digit(10)?)),
            }
        }
        Some(innings)
    }
}

/// Game-level facts from the info records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameInfo {
    pub visitor: String,
    pub home: String,
    /// `yyyy/mm/dd`
    pub date: String,
    /// 0 for a single game, 1 or 2 in a doubleheader
    pub number: u32,
    pub daynight: Option<String>,
    pub attendance: Option<u32>,
    /// Minutes
    pub time_of_game: Option<u32>,
    pub winning_pitcher: Option<String>,
    pub losing_pitcher: Option<String>,
    pub save: Option<String>,
}

impl GameInfo {
    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Visitor => &self.visitor,
            Side::Home => &self.home,
        }
    }

    /// Month, day and year of the game
    pub fn month_day_year(&self) -> Option<(u32, u32, i32)> {
        let mut parts = self.date.split('/');
        let year = parts.next()?.trim().parse().ok()?;
        let month = parts.next()?.trim().parse().ok()?;
        let day = parts.next()?.trim().parse().ok()?;
        Some((month, day, year))
    }

    /// `D`, `N` or `?`
    pub fn daynight_code(&self) -> &str {
        match self.daynight.as_deref() {
            Some("day") => "D",
            Some("night") => "N",
            Some(other) if !other.is_empty() => other,
            _ => "?",
        }
    }
}

/// Everything known about one game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameBox {
    pub game_id: String,
    pub info: GameInfo,
    pub batters: Vec<BoxPlayer>,
    pub pitchers: Vec<BoxPitcher>,
    pub fielders: Vec<FieldingNote>,
    pub line_score: Option<LineScore>,
    pub left_on_base: [Option<u32>; 2],
    pub double_plays: [Option<u32>; 2],
    pub triple_plays: [Option<u32>; 2],
    pub hit_by_pitch: Vec<HitByPitch>,
}

impl GameBox {
    pub fn new(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            info: GameInfo::default(),
            batters: Vec::new(),
            pitchers: Vec::new(),
            fielders: Vec::new(),
            line_score: None,
            left_on_base: [None; 2],
            double_plays: [None; 2],
            triple_plays: [None; 2],
            hit_by_pitch: Vec::new(),
        }
    }

    /// `yyyymmdd` part of the game id, e.g. `TOR199304060` gives `19930406`
    pub fn date_key(&self) -> &str {
        self.game_id.get(3..11).unwrap_or("")
    }

    /// Date and game number, the order games are printed in
    pub fn sort_key(&self) -> &str {
        self.game_id.get(3..).unwrap_or("")
    }

    pub fn involves_team(&self, team: &str) -> bool {
        self.info.visitor == team || self.info.home == team
    }

    /// Batters for one side in batting order
    pub fn batting_order(&self, side: Side) -> Vec<&BoxPlayer> {
        let mut batters: Vec<&BoxPlayer> =
            self.batters.iter().filter(|b| b.side == side).collect();
        batters.sort_by_key(|b| (b.slot, b.seq));
        batters
    }

    /// Pitchers for one side in order of appearance
    pub fn pitching_order(&self, side: Side) -> Vec<&BoxPitcher> {
        let mut pitchers: Vec<&BoxPitcher> =
            self.pitchers.iter().filter(|p| p.side == side).collect();
        pitchers.sort_by_key(|p| p.seq);
        pitchers
    }

    /// A player's batting in this game, counted as one game even with several lines
    pub fn batting_for(&self, player_id: &str) -> Option<BattingLine> {
        let mut found: Option<BattingLine> = None;
        for batter in self.batters.iter().filter(|b| b.player_id == player_id) {
            *found.get_or_insert_with(BattingLine::default) += batter.batting;
        }
        found.map(|mut line| {
            line.g = line.g.min(1);
            line
        })
    }

    pub fn pitching_for(&self, player_id: &str) -> Option<PitchingLine> {
        let mut found: Option<PitchingLine> = None;
        for pitcher in self.pitchers.iter().filter(|p| p.player_id == player_id) {
            *found.get_or_insert_with(PitchingLine::default) += pitcher.pitching;
        }
        found.map(|mut line| {
            line.g = line.g.min(1);
            line
        })
    }

    /// Sum of the batting lines of one side
    pub fn team_batting(&self, side: Side) -> BattingLine {
        let mut total = BattingLine::default();
        for batter in self.batters.iter().filter(|b| b.side == side) {
            total += batter.batting;
        }
        total
    }

    /// Runs scored by a side, from the line score when there is one
    pub fn runs(&self, side: Side) -> u32 {
        match &self.line_score {
            Some(line) => line.runs(side),
            None => self.team_batting(side).r,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batter(id: &str, side: Side, slot: u32, seq: u32, h: u32) -> BoxPlayer {
        BoxPlayer {
            player_id: id.to_string(),
            side,
            slot,
            seq,
            positions: vec![Position::Shortstop],
            batting: BattingLine {
                g: 1,
                ab: 4,
                h,
                r: h,
                rbi: Some(1),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_parse_line_innings() {
        assert_eq!(
            LineScore::parse_innings("010(10)0000x"),
            Some(vec![
                Some(0),
                Some(1),
                Some(0),
                Some(10),
                Some(0),
                Some(0),
                Some(0),
                Some(0),
                None
            ])
        );
        assert_eq!(LineScore::parse_innings("0a1"), None);
    }

    #[test]
    fn test_batting_order_and_totals() {
        let mut game = GameBox::new("TOR199304060");
        game.batters.push(batter("carte001", Side::Home, 4, 1, 2));
        game.batters.push(batter("alomr001", Side::Home, 2, 1, 1));
        game.batters.push(batter("whitd001", Side::Visitor, 1, 1, 0));
        game.batters.push(batter("sprie001", Side::Home, 2, 2, 1));

        let order: Vec<&str> = game
            .batting_order(Side::Home)
            .iter()
            .map(|b| b.player_id.as_str())
            .collect();
        assert_eq!(order, vec!["alomr001", "sprie001", "carte001"]);
        assert_eq!(game.team_batting(Side::Home).h, 4);
        assert_eq!(game.runs(Side::Home), 4);
        assert_eq!(game.date_key(), "19930406");
    }

    #[test]
    fn test_batting_for_counts_one_game() {
        let mut game = GameBox::new("TOR199304060");
        game.batters.push(batter("alomr001", Side::Home, 2, 1, 1));
        game.batters.push(batter("alomr001", Side::Home, 2, 3, 1));

        let line = game.batting_for("alomr001").unwrap();
        assert_eq!(line.g, 1);
        assert_eq!(line.h, 2);
        assert_eq!(line.rbi, Some(2));
        assert!(game.batting_for("nobody01").is_none());
    }

    #[test]
    fn test_runs_prefer_line_score() {
        let mut game = GameBox::new("BOS190404150");
        game.batters.push(batter("collj101", Side::Home, 3, 1, 2));
        game.line_score = Some(LineScore {
            visitor: vec![Some(0), Some(2)],
            home: vec![Some(1), Some(0), Some(3)],
        });
        assert_eq!(game.runs(Side::Home), 4);
        assert_eq!(game.runs(Side::Visitor), 2);
    }

    #[test]
    fn test_game_info_helpers() {
        let info = GameInfo {
            date: "1993/04/06".to_string(),
            daynight: Some("night".to_string()),
            ..Default::default()
        };
        assert_eq!(info.month_day_year(), Some((4, 6, 1993)));
        assert_eq!(info.daynight_code(), "N");
        assert_eq!(GameInfo::default().daynight_code(), "?");
        assert_eq!(Side::from_code("1"), Some(Side::Home));
        assert_eq!(Position::from_number(6), Some(Position::Shortstop));
    }
}
