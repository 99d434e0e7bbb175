//! Chadwick engine
//!
//! Runs `cwdaily` (one row per player per game) and `cwgame` (one row per
//! game) over a season's event files and assembles their CSV output into
//! [`GameBox`] values. Columns are looked up by header name, so a tool
//! version that drops a column only loses that stat.

use super::{count_field, known_field, non_empty, BoxscoreSource};
use crate::error::{RetroError, RetroResult};
use crate::model::{
    BoxPitcher, BoxPlayer, FieldingNote, GameBox, GameInfo, HitByPitch, LineScore, Position, Side,
};
use crate::stats::{BattingLine, PitchingLine};
use csv::StringRecord;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const DAILY_TOOL: &str = "cwdaily";
const GAME_TOOL: &str = "cwgame";

/// The Chadwick command line tools
#[derive(Debug, Clone, Default)]
pub struct Chadwick {
    tool_dir: Option<PathBuf>,
}

impl Chadwick {
    /// Use the tools in `tool_dir`, or look them up on `PATH` when `None`
    pub fn new(tool_dir: Option<PathBuf>) -> RetroResult<Self> {
        if let Some(dir) = &tool_dir {
            for tool in [DAILY_TOOL, GAME_TOOL] {
                let path = tool_path(Some(dir), tool);
                if !path.is_file() {
                    return Err(RetroError::not_found("Chadwick tool", path));
                }
            }
        }
        Ok(Self { tool_dir })
    }

    /// Run one tool over `files` and return its standard output
    fn run(&self, tool: &str, files: &[PathBuf], year: i32) -> RetroResult<String> {
        let workdir = files
            .first()
            .and_then(|f| f.parent())
            .unwrap_or_else(|| Path::new("."));
        let names: Vec<&std::ffi::OsStr> = files.iter().filter_map(|f| f.file_name()).collect();

        debug!("{} -n -y {} over {} files in {:?}", tool, year, names.len(), workdir);

        // The tools look for TEAMyyyy in their working directory
        let output = Command::new(tool_path(self.tool_dir.as_deref(), tool))
            .current_dir(workdir)
            .arg("-n")
            .arg("-y")
            .arg(year.to_string())
            .args(&names)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| RetroError::EngineSpawn {
                tool: tool.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(RetroError::EngineFailed {
                tool: tool.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn tool_path(dir: Option<&Path>, tool: &str) -> PathBuf {
    let name = format!("{}{}", tool, std::env::consts::EXE_SUFFIX);
    match dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

impl BoxscoreSource for Chadwick {
    fn read_games(&self, files: &[PathBuf], year: i32) -> RetroResult<Vec<GameBox>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let games = self.run(GAME_TOOL, files, year)?;
        let daily = self.run(DAILY_TOOL, files, year)?;
        let boxes = parse_engine_output(&games, &daily)?;

        info!("{}: {} games from {} event files", year, boxes.len(), files.len());
        Ok(boxes)
    }
}

/// Header name to column index for one CSV table
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn new(headers: &StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        Self { index }
    }

    fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    fn text<'r>(&self, record: &'r StringRecord, name: &str) -> &'r str {
        self.index
            .get(name)
            .and_then(|i| record.get(*i))
            .map(str::trim)
            .unwrap_or("")
    }

    fn count(&self, record: &StringRecord, name: &str) -> u32 {
        count_field(self.text(record, name))
    }

    /// Count for a column the tool may not print
    fn optional(&self, record: &StringRecord, name: &str) -> Option<u32> {
        if self.has(name) {
            Some(self.count(record, name))
        } else {
            None
        }
    }
}

fn reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes())
}

/// Build box scores from `cwgame` and `cwdaily` output, both with header rows
pub fn parse_engine_output(game_csv: &str, daily_csv: &str) -> RetroResult<Vec<GameBox>> {
    let mut games: Vec<GameBox> = Vec::new();
    let mut by_id: HashMap<String, usize> = HashMap::new();

    let mut rdr = reader(game_csv);
    let cols = Columns::new(rdr.headers()?);
    for record in rdr.records() {
        let record = record?;
        let game = game_from_row(&cols, &record);
        if game.game_id.is_empty() {
            warn!("skipping cwgame row without a game id");
            continue;
        }
        by_id.insert(game.game_id.clone(), games.len());
        games.push(game);
    }

    let mut rdr = reader(daily_csv);
    let cols = Columns::new(rdr.headers()?);
    for record in rdr.records() {
        let record = record?;
        let game_id = cols.text(&record, "GAME_ID");
        if game_id.is_empty() {
            warn!("skipping cwdaily row without a game id");
            continue;
        }
        let idx = match by_id.get(game_id) {
            Some(idx) => *idx,
            None => {
                by_id.insert(game_id.to_string(), games.len());
                games.push(game_without_summary(game_id));
                games.len() - 1
            }
        };
        add_player_row(&mut games[idx], &cols, &record);
    }

    for game in &mut games {
        order_pitchers(game);
        add_hit_batters(game);
    }
    Ok(games)
}

fn date_from_id(game_id: &str) -> (String, u32) {
    let date = match (game_id.get(3..7), game_id.get(7..9), game_id.get(9..11)) {
        (Some(y), Some(m), Some(d)) => format!("{}/{}/{}", y, m, d),
        _ => String::new(),
    };
    let number = game_id.get(11..12).map(count_field).unwrap_or(0);
    (date, number)
}

fn game_without_summary(game_id: &str) -> GameBox {
    let mut game = GameBox::new(game_id);
    let (date, number) = date_from_id(game_id);
    game.info.date = date;
    game.info.number = number;
    game
}

fn game_from_row(cols: &Columns, record: &StringRecord) -> GameBox {
    let mut game = game_without_summary(cols.text(record, "GAME_ID"));
    let daynight = match cols.text(record, "DAYNIGHT_PARK_CD") {
        "D" => Some("day".to_string()),
        "N" => Some("night".to_string()),
        other => non_empty(other),
    };
    game.info = GameInfo {
        visitor: cols.text(record, "AWAY_TEAM_ID").to_string(),
        home: cols.text(record, "HOME_TEAM_ID").to_string(),
        daynight,
        attendance: known_field(cols.text(record, "ATTEND_PARK_CT")),
        time_of_game: known_field(cols.text(record, "MINUTES_GAME_CT")).filter(|m| *m > 0),
        winning_pitcher: non_empty(cols.text(record, "WIN_PIT_ID")),
        losing_pitcher: non_empty(cols.text(record, "LOSE_PIT_ID")),
        save: non_empty(cols.text(record, "SAVE_PIT_ID")),
        ..game.info
    };
    game.left_on_base = [
        cols.optional(record, "AWAY_LOB_CT"),
        cols.optional(record, "HOME_LOB_CT"),
    ];
    game.double_plays = [
        cols.optional(record, "AWAY_DP_CT"),
        cols.optional(record, "HOME_DP_CT"),
    ];
    game.triple_plays = [
        cols.optional(record, "AWAY_TP_CT"),
        cols.optional(record, "HOME_TP_CT"),
    ];

    let visitor = LineScore::parse_innings(cols.text(record, "AWAY_LINE_TX"));
    let home = LineScore::parse_innings(cols.text(record, "HOME_LINE_TX"));
    if let (Some(visitor), Some(home)) = (visitor, home) {
        if !visitor.is_empty() {
            game.line_score = Some(LineScore { visitor, home });
        }
    }
    game
}

fn side_of(cols: &Columns, record: &StringRecord) -> Side {
    match cols.text(record, "HOME_FL") {
        "1" | "T" | "t" => Side::Home,
        _ => Side::Visitor,
    }
}

fn add_player_row(game: &mut GameBox, cols: &Columns, record: &StringRecord) {
    let player_id = cols.text(record, "PLAYER_ID").to_string();
    let side = side_of(cols, record);
    let team = cols.text(record, "TEAM_ID");
    if !team.is_empty() {
        let known = match side {
            Side::Visitor => &mut game.info.visitor,
            Side::Home => &mut game.info.home,
        };
        if known.is_empty() {
            *known = team.to_string();
        }
    }

    let slot = cols.count(record, "SLOT_CT");
    if slot > 0 {
        game.batters.push(BoxPlayer {
            player_id: player_id.clone(),
            side,
            slot,
            seq: cols.count(record, "SEQ_CT").max(1),
            positions: positions(cols, record),
            batting: batting_line(cols, record),
        });
    }

    if cols.count(record, "P_G") > 0 {
        game.pitchers.push(BoxPitcher {
            player_id: player_id.clone(),
            side,
            seq: 0,
            pitching: pitching_line(cols, record),
            no_out: None,
        });
    }

    let errors: u32 = Position::FIELD
        .iter()
        .map(|pos| cols.count(record, &format!("F_{}_E", pos.daily_code())))
        .sum();
    let passed_balls = cols.count(record, "F_C_PB");
    if errors > 0 || passed_balls > 0 {
        game.fielders.push(FieldingNote {
            player_id,
            side,
            errors,
            passed_balls,
        });
    }
}

fn positions(cols: &Columns, record: &StringRecord) -> Vec<Position> {
    let mut positions = Vec::new();
    if cols.count(record, "B_G_PH") > 0 {
        positions.push(Position::PinchHitter);
    } else if cols.count(record, "B_G_PR") > 0 {
        positions.push(Position::PinchRunner);
    }
    for pos in Position::FIELD {
        if cols.count(record, &format!("F_{}_G", pos.daily_code())) > 0 {
            positions.push(pos);
        }
    }
    if cols.count(record, "B_G_DH") > 0 {
        positions.push(Position::DesignatedHitter);
    }
    positions
}

fn batting_line(cols: &Columns, record: &StringRecord) -> BattingLine {
    let n = |name: &str| cols.count(record, name);
    BattingLine {
        g: n("B_G").min(1),
        pa: n("B_PA"),
        ab: n("B_AB"),
        r: n("B_R"),
        h: n("B_H"),
        b2: n("B_2B"),
        b3: n("B_3B"),
        hr: n("B_HR"),
        rbi: known_field(cols.text(record, "B_RBI")),
        so: n("B_SO"),
        bb: n("B_BB"),
        ibb: n("B_IBB"),
        sb: n("B_SB"),
        cs: n("B_CS"),
        sh: n("B_SH"),
        sf: n("B_SF"),
        hbp: n("B_HP"),
        gdp: n("B_GDP"),
    }
}

fn pitching_line(cols: &Columns, record: &StringRecord) -> PitchingLine {
    let n = |name: &str| cols.count(record, name);
    PitchingLine {
        g: n("P_G").min(1),
        gs: n("P_GS"),
        gf: n("P_GF"),
        cg: n("P_CG"),
        sho: n("P_SHO"),
        outs: n("P_OUT"),
        h: n("P_H"),
        r: n("P_R"),
        er: n("P_ER"),
        hr: n("P_HR"),
        so: n("P_SO"),
        bb: n("P_BB"),
        ibb: n("P_IBB"),
        bf: n("P_TBF"),
        w: n("P_W"),
        l: n("P_L"),
        sv: n("P_SV"),
        gb: n("P_GO"),
        fb: n("P_AO"),
        wp: n("P_WP"),
        hbp: n("P_HP"),
        bk: n("P_BK"),
        pitches: n("P_PITCH"),
        strikes: n("P_STRIKE"),
    }
}

/// cwdaily lists players by lineup, so rebuild the order of appearance:
/// the starter first, the pitcher who finished last, the rest as listed
fn order_pitchers(game: &mut GameBox) {
    for side in Side::BOTH {
        let mut rank: Vec<(u8, usize)> = game
            .pitchers
            .iter()
            .enumerate()
            .filter(|(_, p)| p.side == side)
            .map(|(i, p)| {
                let key = if p.pitching.gs > 0 {
                    0
                } else if p.pitching.gf > 0 {
                    2
                } else {
                    1
                };
                (key, i)
            })
            .collect();
        rank.sort();
        for (seq, (_, i)) in rank.into_iter().enumerate() {
            game.pitchers[i].seq = seq as u32 + 1;
        }
    }
}

/// cwdaily has hit-by-pitch counts but not the pitcher
fn add_hit_batters(game: &mut GameBox) {
    for side in Side::BOTH {
        let hit: Vec<HitByPitch> = game
            .batting_order(side)
            .into_iter()
            .flat_map(|b| {
                (0..b.batting.hbp).map(move |_| HitByPitch {
                    pitcher: None,
                    batter: b.player_id.clone(),
                })
            })
            .collect();
        game.hit_by_pitch.extend(hit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAMES: &str = "\
\"GAME_ID\",\"AWAY_TEAM_ID\",\"HOME_TEAM_ID\",\"DAYNIGHT_PARK_CD\",\"ATTEND_PARK_CT\",\"MINUTES_GAME_CT\",\"AWAY_LOB_CT\",\"HOME_LOB_CT\",\"WIN_PIT_ID\",\"LOSE_PIT_ID\",\"SAVE_PIT_ID\",\"AWAY_LINE_TX\",\"HOME_LINE_TX\"
\"TOR199304060\",\"SEA\",\"TOR\",\"N\",50435,171,5,7,\"stewd001\",\"johnr005\",\"\",\"000100000\",\"00200100x\"
";

    const DAILY: &str = "\
\"GAME_ID\",\"TEAM_ID\",\"PLAYER_ID\",\"SLOT_CT\",\"SEQ_CT\",\"HOME_FL\",\"B_G\",\"B_PA\",\"B_AB\",\"B_R\",\"B_H\",\"B_2B\",\"B_HR\",\"B_RBI\",\"B_HP\",\"B_G_PH\",\"F_2B_G\",\"F_2B_E\",\"F_C_G\",\"F_C_PB\",\"P_G\",\"P_GS\",\"P_GF\",\"P_OUT\",\"P_ER\",\"P_SO\",\"P_W\"
\"TOR199304060\",\"TOR\",\"alomr001\",2,1,\"T\",1,4,4,1,2,1,0,1,0,0,1,1,0,0,0,0,0,0,0,0,0
\"TOR199304060\",\"TOR\",\"bordp001\",9,1,\"T\",1,3,2,0,0,0,0,-1,1,0,0,0,1,2,0,0,0,0,0,0,0
\"TOR199304060\",\"TOR\",\"wardd001\",0,0,\"T\",0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,0,1,3,0,2,0
\"TOR199304060\",\"TOR\",\"stewd001\",0,0,\"T\",0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,1,0,24,1,6,1
\"TOR199304060\",\"SEA\",\"grifk002\",3,1,\"F\",1,4,4,0,1,0,1,1,0,0,0,0,0,0,0,0,0,0,0,0,0
";

    #[test]
    fn test_game_summary_fields() {
        let games = parse_engine_output(GAMES, DAILY).unwrap();
        assert_eq!(games.len(), 1);
        let game = &games[0];
        assert_eq!(game.info.visitor, "SEA");
        assert_eq!(game.info.home, "TOR");
        assert_eq!(game.info.date, "1993/04/06");
        assert_eq!(game.info.daynight_code(), "N");
        assert_eq!(game.info.attendance, Some(50435));
        assert_eq!(game.info.winning_pitcher.as_deref(), Some("stewd001"));
        assert_eq!(game.info.save, None);
        assert_eq!(game.left_on_base, [Some(5), Some(7)]);
        assert_eq!(game.double_plays, [None, None]);
        assert_eq!(game.runs(Side::Visitor), 1);
        assert_eq!(game.runs(Side::Home), 3);
    }

    #[test]
    fn test_player_rows() {
        let games = parse_engine_output(GAMES, DAILY).unwrap();
        let game = &games[0];

        let home: Vec<&str> = game
            .batting_order(Side::Home)
            .iter()
            .map(|b| b.player_id.as_str())
            .collect();
        assert_eq!(home, vec!["alomr001", "bordp001"]);

        let alomar = game.batting_for("alomr001").unwrap();
        assert_eq!(alomar.h, 2);
        assert_eq!(alomar.b2, 1);
        assert_eq!(alomar.rbi, Some(1));
        assert_eq!(game.batting_for("bordp001").unwrap().rbi, None);
        assert_eq!(game.batters[0].positions, vec![Position::SecondBase]);

        assert_eq!(game.fielders.len(), 2);
        assert_eq!(game.fielders[1].passed_balls, 2);
        assert_eq!(game.hit_by_pitch.len(), 1);
        assert_eq!(game.hit_by_pitch[0].batter, "bordp001");
    }

    #[test]
    fn test_pitchers_in_order_of_appearance() {
        let games = parse_engine_output(GAMES, DAILY).unwrap();
        let order: Vec<&str> = games[0]
            .pitching_order(Side::Home)
            .iter()
            .map(|p| p.player_id.as_str())
            .collect();
        assert_eq!(order, vec!["stewd001", "wardd001"]);

        let stewart = games[0].pitching_for("stewd001").unwrap();
        assert_eq!(stewart.outs, 24);
        assert_eq!(stewart.w, 1);
    }

    #[test]
    fn test_daily_rows_without_game_summary() {
        let games = parse_engine_output("\"GAME_ID\"\n", DAILY).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].info.home, "TOR");
        assert_eq!(games[0].info.visitor, "SEA");
        assert!(games[0].line_score.is_none());
        // runs fall back to the batting lines
        assert_eq!(games[0].runs(Side::Home), 1);
    }

    #[test]
    fn test_missing_tool_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Chadwick::new(Some(dir.path().to_path_buf())).unwrap_err();
        assert!(err.is_not_found());
        assert!(Chadwick::new(None).is_ok());
    }

    #[test]
    fn test_no_files_skips_tools() {
        let engine = Chadwick::new(None).unwrap();
        assert!(engine.read_games(&[], 1993).unwrap().is_empty());
    }
}
