//! Retrosheet data directory layout, team lists and rosters
//!
//! ```text
//! <root>/event/regular/TEAM1993        team list for a season
//! <root>/event/regular/1993TOR.EVA     regular season events, one file per home team
//! <root>/event/post/1993WS.EVE         postseason events
//! <root>/rosters/TOR1993.ROS           roster for a team and season
//! <root>/boxscore/1993.EBN             box score files for games without events
//! ```

use crate::error::{RetroError, RetroResult};
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Regular season or postseason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SeasonType {
    Regular,
    Post,
}

impl SeasonType {
    pub fn from_post_flag(post: bool) -> Self {
        if post {
            SeasonType::Post
        } else {
            SeasonType::Regular
        }
    }
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonType::Regular => f.write_str("Regular Season"),
            SeasonType::Post => f.write_str("Post Season"),
        }
    }
}

/// Locations of the data files under a Retrosheet checkout
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn regular_dir(&self) -> PathBuf {
        self.root.join("event").join("regular")
    }

    pub fn post_dir(&self) -> PathBuf {
        self.root.join("event").join("post")
    }

    pub fn rosters_dir(&self) -> PathBuf {
        self.root.join("rosters")
    }

    pub fn boxscore_dir(&self) -> PathBuf {
        self.root.join("boxscore")
    }

    pub fn team_file(&self, year: i32) -> PathBuf {
        self.regular_dir().join(format!("TEAM{}", year))
    }

    pub fn roster_file(&self, team: &str, year: i32) -> PathBuf {
        self.rosters_dir().join(format!("{}{}.ROS", team, year))
    }

    pub fn event_file(&self, year: i32, team: &TeamEntry) -> PathBuf {
        self.regular_dir()
            .join(format!("{}{}.EV{}", year, team.team_id, team.league))
    }

    pub fn boxscore_files(&self, year: i32) -> [PathBuf; 2] {
        let dir = self.boxscore_dir();
        [
            dir.join(format!("{}.EBN", year)),
            dir.join(format!("{}.EBA", year)),
        ]
    }
}

/// One line of a `TEAMyyyy` file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamEntry {
    pub team_id: String,
    pub league: String,
    pub city: String,
    pub nickname: String,
}

/// One line of a roster file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterPlayer {
    pub player_id: String,
    pub last_name: String,
    pub first_name: String,
    pub bats: String,
    pub throws: String,
    pub team: String,
    pub position: String,
}

impl RosterPlayer {
    /// `Given Family`
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// `Family G`, the way box scores list players
    pub fn box_name(&self) -> String {
        match self.first_name.chars().next() {
            Some(initial) => format!("{} {}", self.last_name, initial),
            None => self.last_name.clone(),
        }
    }
}

/// Players of one team in one season
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: HashMap<String, RosterPlayer>,
}

impl Roster {
    pub fn get(&self, player_id: &str) -> Option<&RosterPlayer> {
        self.players.get(player_id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Player names gathered from one or more rosters
#[derive(Debug, Clone, Default)]
pub struct NameBook {
    players: HashMap<String, RosterPlayer>,
}

impl NameBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every player of a roster. The first roster a player appears on wins.
    pub fn add_roster(&mut self, roster: &Roster) {
        for (id, player) in &roster.players {
            self.players
                .entry(id.clone())
                .or_insert_with(|| player.clone());
        }
    }

    pub fn get(&self, player_id: &str) -> Option<&RosterPlayer> {
        self.players.get(player_id)
    }

    /// Full name, or the id when the player is not on any roster
    pub fn full_name(&self, player_id: &str) -> String {
        self.get(player_id)
            .map(RosterPlayer::full_name)
            .unwrap_or_else(|| player_id.to_string())
    }

    pub fn box_name(&self, player_id: &str) -> String {
        self.get(player_id)
            .map(RosterPlayer::box_name)
            .unwrap_or_else(|| player_id.to_string())
    }
}

fn read_teams_from_reader<R: Read>(rdr: R, path: &Path) -> RetroResult<Vec<TeamEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rdr);

    let mut teams = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let field = |i: usize| record.get(i).unwrap_or("").trim().to_string();
        let team_id = field(0);
        if team_id.is_empty() {
            continue;
        }
        let league = field(1);
        if league.is_empty() {
            return Err(RetroError::InvalidRecord {
                path: path.to_path_buf(),
                line: idx + 1,
                message: format!("team {} has no league", team_id),
            });
        }
        teams.push(TeamEntry {
            team_id,
            league,
            city: field(2),
            nickname: field(3),
        });
    }
    Ok(teams)
}

fn read_roster_from_reader<R: Read>(rdr: R) -> RetroResult<Roster> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rdr);

    let mut roster = Roster::default();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping malformed roster row: {}", e);
                continue;
            }
        };
        if record.len() < 3 {
            warn!("skipping short roster row: {:?}", record);
            continue;
        }
        let field = |i: usize| record.get(i).unwrap_or("").trim().to_string();
        let player = RosterPlayer {
            player_id: field(0),
            last_name: field(1),
            first_name: field(2),
            bats: field(3),
            throws: field(4),
            team: field(5),
            position: field(6),
        };
        roster.players.insert(player.player_id.clone(), player);
    }
    Ok(roster)
}

fn open(kind: &'static str, path: &Path) -> RetroResult<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RetroError::not_found(kind, path)
        } else {
            RetroError::Io(e)
        }
    })
}

/// Access to the files of one data directory
#[derive(Debug, Clone)]
pub struct Catalog {
    paths: DataPaths,
}

impl Catalog {
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    /// Teams of a season, from `TEAMyyyy`
    pub fn teams(&self, year: i32) -> RetroResult<Vec<TeamEntry>> {
        let path = self.paths.team_file(year);
        debug!("team file = {:?}", path);
        let file = open("team", &path)?;
        read_teams_from_reader(file, &path)
    }

    pub fn roster(&self, team: &str, year: i32) -> RetroResult<Roster> {
        let path = self.paths.roster_file(team, year);
        debug!("roster file = {:?}", path);
        let file = open("roster", &path)?;
        read_roster_from_reader(file)
    }

    /// Event files for a season. Every team listed for the regular season must have one.
    pub fn event_files(&self, year: i32, season: SeasonType) -> RetroResult<Vec<PathBuf>> {
        match season {
            SeasonType::Regular => {
                let mut files = Vec::new();
                for team in self.teams(year)? {
                    let path = self.paths.event_file(year, &team);
                    if !path.is_file() {
                        return Err(RetroError::not_found("event", path));
                    }
                    files.push(path);
                }
                Ok(files)
            }
            SeasonType::Post => self.post_event_files(year),
        }
    }

    fn post_event_files(&self, year: i32) -> RetroResult<Vec<PathBuf>> {
        let dir = self.paths.post_dir();
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RetroError::not_found("postseason event", dir));
            }
            Err(e) => return Err(e.into()),
        };

        let prefix = year.to_string();
        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_event = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_ascii_uppercase().starts_with("EV"))
                .unwrap_or(false);
            let in_year = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with(&prefix))
                .unwrap_or(false);
            if is_event && in_year {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Box score files that exist for a season
    pub fn boxscore_files(&self, year: i32) -> Vec<PathBuf> {
        self.paths
            .boxscore_files(year)
            .into_iter()
            .filter(|path| path.is_file())
            .collect()
    }

    /// Names of every player on every roster of a season
    pub fn season_names(&self, year: i32) -> RetroResult<NameBook> {
        self.names([year])
    }

    /// Names from the rosters of several seasons. A player keeps the
    /// name from the earliest season they appear in.
    pub fn names(&self, years: impl IntoIterator<Item = i32>) -> RetroResult<NameBook> {
        let mut book = NameBook::new();
        for year in years {
            for team in self.teams(year)? {
                book.add_roster(&self.roster(&team.team_id, year)?);
            }
        }
        Ok(book)
    }

    /// Search the rosters of the given years for a player.
    ///
    /// Years without a team file are skipped. A listed team without a roster is an error.
    pub fn find_player(
        &self,
        player_id: &str,
        years: impl IntoIterator<Item = i32>,
    ) -> RetroResult<Option<RosterPlayer>> {
        for year in years {
            let teams = match self.teams(year) {
                Ok(teams) => teams,
                Err(e) if e.is_not_found() => {
                    warn!("{}", e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            for team in teams {
                let roster = self.roster(&team.team_id, year)?;
                if let Some(player) = roster.get(player_id) {
                    debug!("found {} on {} {}", player_id, team.team_id, year);
                    return Ok(Some(player.clone()));
                }
            }
        }
        Ok(None)
    }
}
