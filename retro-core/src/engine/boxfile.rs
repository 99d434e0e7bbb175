//! Reader for Retrosheet box score files (`yyyy.EBN`, `yyyy.EBA`)
//!
//! These cover games for which no play-by-play exists. Each game starts
//! with an `id` record, followed by `info`, `stat`, `line` and `event`
//! records. Sides are `0` for the visitors and `1` for the home team.

use super::{count_field, credit_pitchers, known_field, non_empty, BoxscoreSource};
use crate::error::{RetroError, RetroResult};
use crate::model::{
    BoxPitcher, BoxPlayer, FieldingNote, GameBox, HitByPitch, LineScore, NoOutNote, Position, Side,
};
use crate::stats::{BattingLine, PitchingLine};
use csv::StringRecord;
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Reads box score files without any external tool
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxFileReader;

impl BoxFileReader {
    pub fn new() -> Self {
        BoxFileReader
    }

    pub fn read_file(&self, path: &Path) -> RetroResult<Vec<GameBox>> {
        let file = File::open(path)?;
        let games = parse_boxscores(file, path)?;
        debug!("{} games in {:?}", games.len(), path);
        Ok(games)
    }
}

impl BoxscoreSource for BoxFileReader {
    fn read_games(&self, files: &[PathBuf], year: i32) -> RetroResult<Vec<GameBox>> {
        let mut games = Vec::new();
        for path in files {
            games.extend(self.read_file(path)?);
        }
        info!("{}: {} games from {} box score files", year, games.len(), files.len());
        Ok(games)
    }
}

/// Fielding line kept until the game is complete, to order positions by `seq`
struct Appearance {
    player_id: String,
    side: Side,
    seq: u32,
    position: Position,
}

/// Game under construction
struct Pending {
    game: GameBox,
    appearances: Vec<Appearance>,
    substitutes: Vec<(String, Side, Position)>,
}

impl Pending {
    fn new(game_id: &str) -> Self {
        Self {
            game: GameBox::new(game_id),
            appearances: Vec::new(),
            substitutes: Vec::new(),
        }
    }

    fn finish(mut self) -> GameBox {
        self.appearances.sort_by_key(|a| a.seq);
        let game = &mut self.game;
        for batter in &mut game.batters {
            if let Some((_, _, pos)) = self
                .substitutes
                .iter()
                .find(|(id, side, _)| *id == batter.player_id && *side == batter.side)
            {
                batter.positions.push(*pos);
            }
            for appearance in &self.appearances {
                if appearance.player_id == batter.player_id
                    && appearance.side == batter.side
                    && !batter.positions.contains(&appearance.position)
                {
                    batter.positions.push(appearance.position);
                }
            }
        }
        credit_pitchers(game);
        self.game
    }
}

/// Reads the records of one file
struct Parser<'a> {
    path: &'a Path,
    games: Vec<GameBox>,
    current: Option<Pending>,
}

impl<'a> Parser<'a> {
    fn invalid(&self, line: usize, message: impl Into<String>) -> RetroError {
        RetroError::InvalidRecord {
            path: self.path.to_path_buf(),
            line,
            message: message.into(),
        }
    }

    fn pending(&mut self, line: usize) -> RetroResult<&mut Pending> {
        let path = self.path;
        self.current
            .as_mut()
            .ok_or_else(|| RetroError::InvalidRecord {
                path: path.to_path_buf(),
                line,
                message: "record before the first game id".to_string(),
            })
    }

    fn side(&self, text: &str, line: usize) -> RetroResult<Side> {
        Side::from_code(text).ok_or_else(|| self.invalid(line, format!("bad side '{}'", text)))
    }

    fn finish_game(&mut self) {
        if let Some(pending) = self.current.take() {
            self.games.push(pending.finish());
        }
    }

    fn record(&mut self, record: &StringRecord, line: usize) -> RetroResult<()> {
        let field = |i: usize| record.get(i).unwrap_or("").trim();
        match field(0) {
            "id" => {
                self.finish_game();
                self.current = Some(Pending::new(field(1)));
            }
            "info" => self.info(field(1), field(2), line)?,
            "stat" => self.stat(record, line)?,
            "line" => {
                let side = self.side(field(1), line)?;
                let innings: Vec<Option<u32>> =
                    record.iter().skip(2).map(known_field).collect();
                let game = &mut self.pending(line)?.game;
                let score = game.line_score.get_or_insert_with(LineScore::default);
                match side {
                    Side::Visitor => score.visitor = innings,
                    Side::Home => score.home = innings,
                }
            }
            "event" if field(1) == "hpline" => {
                // the last two fields are the pitcher and the batter
                let n = record.len();
                if n < 4 {
                    return Err(self.invalid(line, "short hpline record"));
                }
                let pitcher = non_empty(field(n - 2));
                let batter = field(n - 1).to_string();
                self.pending(line)?
                    .game
                    .hit_by_pitch
                    .push(HitByPitch { pitcher, batter });
            }
            "event" | "version" | "" => {}
            other => debug!("{:?} line {}: ignoring '{}' record", self.path, line, other),
        }
        Ok(())
    }

    fn info(&mut self, key: &str, value: &str, line: usize) -> RetroResult<()> {
        let info = &mut self.pending(line)?.game.info;
        match key {
            "visteam" => info.visitor = value.to_string(),
            "hometeam" => info.home = value.to_string(),
            "date" => info.date = value.to_string(),
            "number" => info.number = count_field(value),
            "daynight" => info.daynight = non_empty(value),
            "attendance" => info.attendance = known_field(value).filter(|a| *a > 0),
            "timeofgame" => info.time_of_game = known_field(value).filter(|m| *m > 0),
            "wp" => info.winning_pitcher = non_empty(value),
            "lp" => info.losing_pitcher = non_empty(value),
            "save" => info.save = non_empty(value),
            _ => {}
        }
        Ok(())
    }

    fn stat(&mut self, record: &StringRecord, line: usize) -> RetroResult<()> {
        let field = |i: usize| record.get(i).unwrap_or("").trim();
        let n = |i: usize| count_field(field(i));

        match field(1) {
            "bline" => {
                let side = self.side(field(3), line)?;
                let (ab, sh, sf, hbp, bb) = (n(6), n(13), n(14), n(15), n(16));
                let batting = BattingLine {
                    g: 1,
                    pa: ab + sh + sf + hbp + bb + n(22),
                    ab,
                    r: n(7),
                    h: n(8),
                    b2: n(9),
                    b3: n(10),
                    hr: n(11),
                    rbi: known_field(field(12)),
                    so: n(18),
                    bb,
                    ibb: n(17),
                    sb: n(19),
                    cs: n(20),
                    sh,
                    sf,
                    hbp,
                    gdp: n(21),
                };
                self.pending(line)?.game.batters.push(BoxPlayer {
                    player_id: field(2).to_string(),
                    side,
                    slot: n(4),
                    seq: n(5).max(1),
                    positions: Vec::new(),
                    batting,
                });
            }
            "phline" | "prline" => {
                let position = if field(1) == "phline" {
                    Position::PinchHitter
                } else {
                    Position::PinchRunner
                };
                let side = self.side(field(4), line)?;
                let id = field(2).to_string();
                self.pending(line)?.substitutes.push((id, side, position));
            }
            "dline" => {
                let side = self.side(field(3), line)?;
                let position = Position::from_number(n(5))
                    .ok_or_else(|| self.invalid(line, format!("bad position '{}'", field(5))))?;
                let player_id = field(2).to_string();
                let (errors, passed_balls) = (n(9), n(12));
                let pending = self.pending(line)?;
                pending.appearances.push(Appearance {
                    player_id: player_id.clone(),
                    side,
                    seq: n(4),
                    position,
                });
                if errors > 0 || passed_balls > 0 {
                    pending.game.fielders.push(FieldingNote {
                        player_id,
                        side,
                        errors,
                        passed_balls,
                    });
                }
            }
            "pline" => {
                let side = self.side(field(3), line)?;
                let no_out = n(6);
                let pitching = PitchingLine {
                    g: 1,
                    outs: n(5),
                    bf: n(7),
                    h: n(8),
                    hr: n(11),
                    r: n(12),
                    er: n(13),
                    bb: n(14),
                    ibb: n(15),
                    so: n(16),
                    hbp: n(17),
                    wp: n(18),
                    bk: n(19),
                    ..Default::default()
                };
                self.pending(line)?.game.pitchers.push(BoxPitcher {
                    player_id: field(2).to_string(),
                    side,
                    seq: n(4),
                    pitching,
                    no_out: (no_out > 0).then_some(NoOutNote {
                        batters: no_out,
                        inning: None,
                    }),
                });
            }
            "tline" => {
                let side = self.side(field(2), line)?;
                let game = &mut self.pending(line)?.game;
                let i = side.index();
                game.left_on_base[i] = known_field(field(3));
                game.double_plays[i] = known_field(field(5));
                game.triple_plays[i] = known_field(field(6));
            }
            other => debug!("{:?} line {}: ignoring stat '{}'", self.path, line, other),
        }
        Ok(())
    }
}

/// Parse every game in a box score file
pub fn parse_boxscores<R: Read>(rdr: R, path: &Path) -> RetroResult<Vec<GameBox>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rdr);

    let mut parser = Parser {
        path,
        games: Vec::new(),
        current: None,
    };
    for result in reader.records() {
        let record = result?;
        let line = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(0);
        parser.record(&record, line)?;
    }
    parser.finish_game();
    Ok(parser.games)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOXSCORE: &str = "\
id,BOS190404150
version,3
info,visteam,NY1
info,hometeam,BOS
info,date,1904/04/15
info,number,0
info,daynight,day
info,wp,youngc01
info,lp,chesj101
info,save,
info,timeofgame,105
info,attendance,6500
stat,bline,dunnj101,0,1,1,4,0,1,0,0,0,0,0,0,0,0,,0,0,0,0,0
stat,bline,chesj101,0,9,1,3,0,0,0,0,0,-1,0,0,1,0,,1,0,0,0,0
stat,bline,wardh101,0,9,2,1,0,0,0,0,0,0,0,0,0,0,,0,0,0,0,0
stat,bline,collj101,1,3,1,4,1,2,1,0,0,2,0,0,0,1,,0,1,0,0,0
stat,bline,youngc01,1,9,1,3,0,1,0,0,0,0,1,0,0,0,,1,0,0,0,0
stat,phline,wardh101,9,0
stat,dline,dunnj101,0,1,6,27,2,3,1,1,0,0
stat,dline,chesj101,0,1,1,21,0,2,0,0,0,0
stat,dline,collj101,1,1,5,27,1,2,0,0,0,0
stat,dline,youngc01,1,1,1,27,0,3,0,0,0,0
stat,pline,chesj101,0,1,21,0,29,7,1,0,0,2,1,1,0,3,0,0,0,0,0
stat,pline,clarw101,0,2,3,1,5,2,0,0,0,1,1,0,0,0,0,1,0,0,0
stat,pline,youngc01,1,1,27,0,31,1,0,0,0,0,0,0,0,4,1,0,0,0,0
stat,tline,0,4,0,1,0
stat,tline,1,6,1,0,0
line,0,0,0,0,0,0,0,0,0,0
line,1,0,1,0,0,1,0,1,0,x
event,hpline,0,youngc01,chesj101
id,BOS190404160
info,visteam,NY1
info,hometeam,BOS
info,date,1904/04/16
stat,bline,dunnj101,0,1,1,4,1,1,0,0,0,,0,0,0,0,,0,0,0,0,0
";

    fn parse() -> Vec<GameBox> {
        parse_boxscores(BOXSCORE.as_bytes(), Path::new("1904.EBN")).unwrap()
    }

    #[test]
    fn test_games_and_info() {
        let games = parse();
        assert_eq!(games.len(), 2);
        let game = &games[0];
        assert_eq!(game.game_id, "BOS190404150");
        assert_eq!(game.info.visitor, "NY1");
        assert_eq!(game.info.month_day_year(), Some((4, 15, 1904)));
        assert_eq!(game.info.daynight_code(), "D");
        assert_eq!(game.info.save, None);
        assert_eq!(game.info.time_of_game, Some(105));
        assert_eq!(game.left_on_base, [Some(4), Some(6)]);
        assert_eq!(game.double_plays, [Some(1), Some(0)]);
        assert_eq!(game.runs(Side::Home), 3);
        assert_eq!(game.runs(Side::Visitor), 0);
        assert_eq!(game.line_score.as_ref().unwrap().home[8], None);
    }

    #[test]
    fn test_batting_lines() {
        let games = parse();
        let collins = games[0].batting_for("collj101").unwrap();
        assert_eq!(collins.g, 1);
        assert_eq!(collins.pa, 5); // 4 AB + 1 BB
        assert_eq!(collins.b2, 1);
        assert_eq!(collins.rbi, Some(2));
        assert_eq!(collins.so, 0);
        assert_eq!(games[0].batting_for("chesj101").unwrap().rbi, None);
        assert_eq!(games[1].batting_for("dunnj101").unwrap().rbi, None);

        let ward = games[0]
            .batters
            .iter()
            .find(|b| b.player_id == "wardh101")
            .unwrap();
        assert_eq!(ward.positions, vec![Position::PinchHitter]);
        let dunn = &games[0].batters[0];
        assert_eq!(dunn.positions, vec![Position::Shortstop]);
    }

    #[test]
    fn test_pitchers_credited() {
        let games = parse();
        let game = &games[0];
        let young = game.pitching_for("youngc01").unwrap();
        assert_eq!((young.gs, young.cg, young.sho, young.w), (1, 1, 1, 1));
        assert_eq!(young.outs, 27);
        assert_eq!(young.so, 4);

        let chesbro = game.pitching_for("chesj101").unwrap();
        assert_eq!((chesbro.gs, chesbro.cg, chesbro.l), (1, 0, 1));

        let relief = game.pitching_for("clarw101").unwrap();
        assert_eq!((relief.gs, relief.gf), (0, 1));
        let note = game.pitching_order(Side::Visitor)[1].no_out.unwrap();
        assert_eq!(note.batters, 1);
    }

    #[test]
    fn test_fielding_and_hit_by_pitch() {
        let games = parse();
        let game = &games[0];
        assert_eq!(game.fielders.len(), 1);
        assert_eq!(game.fielders[0].player_id, "dunnj101");
        assert_eq!(game.hit_by_pitch.len(), 1);
        assert_eq!(game.hit_by_pitch[0].pitcher.as_deref(), Some("youngc01"));
        assert_eq!(game.hit_by_pitch[0].batter, "chesj101");
    }

    #[test]
    fn test_substitute_matched_by_side() {
        let text = "\
id,BOS190404170
info,visteam,NY1
info,hometeam,BOS
stat,bline,smitj101,0,9,1,4,0,1,0,0,0,0,0,0,0,0,,0,0,0,0,0
stat,bline,smitj101,1,9,2,1,0,0,0,0,0,0,0,0,0,0,,0,0,0,0,0
stat,prline,smitj101,8,1
";
        let games = parse_boxscores(text.as_bytes(), Path::new("1904.EBN")).unwrap();
        let by_side = |side: Side| {
            games[0]
                .batters
                .iter()
                .find(|b| b.side == side)
                .unwrap()
                .positions
                .clone()
        };
        assert!(by_side(Side::Visitor).is_empty());
        assert_eq!(by_side(Side::Home), vec![Position::PinchRunner]);
    }

    #[test]
    fn test_record_before_id_is_invalid() {
        let err = parse_boxscores("info,visteam,NY1\n".as_bytes(), Path::new("x.EBN"))
            .unwrap_err();
        assert!(matches!(err, RetroError::InvalidRecord { line: 1, .. }));
    }

    #[test]
    fn test_read_games_from_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("1904.EBN");
        std::fs::write(&path, BOXSCORE).unwrap();
        let games = BoxFileReader::new().read_games(&[path], 1904).unwrap();
        assert_eq!(games.len(), 2);
    }
}
