//! A season read through a fake engine plus the box score files, then ranked
//! and printed.

use retro_core::catalog::{Catalog, DataPaths, SeasonType};
use retro_core::engine::BoxscoreSource;
use retro_core::leaders::{self, Leaderboard};
use retro_core::model::{BoxPlayer, GameBox, Position, Side};
use retro_core::stats::{BattingLine, BattingStat, SeasonLedger};
use retro_core::{CareerReport, RetroResult, SeasonRunner};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct FakeEngine;

fn hitter(id: &str, side: Side, slot: u32, ab: u32, h: u32, hr: u32) -> BoxPlayer {
    BoxPlayer {
        player_id: id.to_string(),
        side,
        slot,
        seq: 1,
        positions: vec![Position::ThirdBase],
        batting: BattingLine {
            g: 1,
            pa: ab,
            ab,
            h,
            hr,
            rbi: Some(hr),
            ..Default::default()
        },
    }
}

impl BoxscoreSource for FakeEngine {
    fn read_games(&self, files: &[PathBuf], _year: i32) -> RetroResult<Vec<GameBox>> {
        assert_eq!(files.len(), 2);
        let mut game = GameBox::new("BOS190404140");
        game.info.visitor = "NY1".to_string();
        game.info.home = "BOS".to_string();
        game.batters = vec![
            hitter("dunnj101", Side::Visitor, 1, 4, 1, 1),
            hitter("collj101", Side::Home, 3, 4, 2, 2),
        ];
        Ok(vec![game])
    }
}

const BOX_FILE: &str = "\
id,BOS190404140
info,visteam,NY1
info,hometeam,BOS
stat,bline,collj101,1,3,1,4,0,4,0,0,4,4,0,0,0,0,0,0,0,0,0,0
id,BOS190404150
info,visteam,NY1
info,hometeam,BOS
info,date,1904/04/15
stat,bline,collj101,1,3,1,4,1,2,0,0,1,1,0,0,0,0,0,0,0,0,0,0
stat,bline,dunnj101,0,1,1,4,0,0,0,0,0,0,0,0,0,0,0,1,0,0,0,0
";

fn data_dir() -> TempDir {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    for sub in ["event/regular", "rosters", "boxscore"] {
        fs::create_dir_all(root.join(sub)).unwrap();
    }
    fs::write(
        root.join("event/regular/TEAM1904"),
        "BOS,A,Boston,Americans\nNY1,N,New York,Giants\n",
    )
    .unwrap();
    fs::write(root.join("event/regular/1904BOS.EVA"), "").unwrap();
    fs::write(root.join("event/regular/1904NY1.EVN"), "").unwrap();
    fs::write(
        root.join("rosters/BOS1904.ROS"),
        "collj101,Collins,Jimmy,R,R,BOS,3B\n",
    )
    .unwrap();
    fs::write(
        root.join("rosters/NY11904.ROS"),
        "dunnj101,Dunn,Jack,R,R,NY1,SS\n",
    )
    .unwrap();
    fs::write(root.join("boxscore/1904.EBA"), BOX_FILE).unwrap();
    dir
}

#[test]
fn test_season_totals_and_leaders() {
    let dir = data_dir();
    let catalog = Catalog::new(DataPaths::new(dir.path()));
    let mut runner = SeasonRunner::new(&catalog, FakeEngine, SeasonType::Regular);

    let mut totals: HashMap<String, BattingLine> = HashMap::new();
    runner
        .for_each_year(1904..=1904, |_, games| {
            for game in games {
                for batter in &game.batters {
                    if let Some(line) = game.batting_for(&batter.player_id) {
                        if batter.seq == 1 {
                            *totals.entry(batter.player_id.clone()).or_default() += line;
                        }
                    }
                }
            }
        })
        .unwrap();

    // the duplicate BOS190404140 in the box score file is ignored
    assert_eq!(runner.stats().games, 2);
    assert_eq!(runner.stats().boxscore_games, 1);
    assert_eq!(totals["collj101"].hr, 3);
    assert_eq!(totals["collj101"].g, 2);
    assert_eq!(totals["dunnj101"].so, 1);

    let names = catalog.season_names(1904).unwrap();
    let entries = leaders::rank(&totals, BattingStat::HomeRuns, 10, 0, |id| names.full_name(id));
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "Jimmy Collins");
    assert_eq!(entries[0].display, "3");
    assert_eq!(entries[1].rank, 2);

    let board = Leaderboard {
        stat: "HR".to_string(),
        season: SeasonType::Regular,
        start: 1904,
        end: 1904,
        limit: 10,
        qualifier: None,
        entries,
    };
    let mut out = Vec::new();
    board.write_text(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("   1  collj101  Jimmy Collins"));
}

#[test]
fn test_career_table_from_season() {
    let dir = data_dir();
    let catalog = Catalog::new(DataPaths::new(dir.path()));
    let mut runner = SeasonRunner::new(&catalog, FakeEngine, SeasonType::Regular);

    let mut ledger = SeasonLedger::new();
    runner
        .for_each_year(1904..=1904, |year, games| {
            for game in games {
                if let Some(line) = game.batting_for("collj101") {
                    ledger.record(year, line);
                }
            }
        })
        .unwrap();

    let player = catalog.find_player("collj101", 1904..=1904).unwrap().unwrap();
    let report: CareerReport<BattingStat> =
        CareerReport::new("collj101", &player.full_name(), SeasonType::Regular, ledger);
    let mut out = Vec::new();
    report.write_text(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("\tJimmy Collins Regular Season Batting Stats:"));
    // 4 hits in 8 at bats
    assert!(text.contains("  .500"));
}
