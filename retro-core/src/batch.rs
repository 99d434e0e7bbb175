//! Season-at-a-time processing
//!
//! Runs the engine once over all event files of a season, then fills in
//! regular season games that only exist in the box score files.

use crate::catalog::{Catalog, SeasonType};
use crate::engine::{BoxFileReader, BoxscoreSource};
use crate::error::{RetroError, RetroResult};
use crate::model::GameBox;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Statistics from batch processing
#[derive(Debug, Default, Clone, Serialize)]
pub struct ProcessingStats {
    pub years_processed: usize,
    pub years_skipped: usize,
    pub event_files: usize,
    pub games: usize,
    pub boxscore_games: usize,
}

/// Reads the games of one season after another
pub struct SeasonRunner<'a, E: BoxscoreSource> {
    catalog: &'a Catalog,
    engine: E,
    boxfiles: BoxFileReader,
    season: SeasonType,
    skip_missing_years: bool,
    stats: ProcessingStats,
}

impl<'a, E: BoxscoreSource> SeasonRunner<'a, E> {
    pub fn new(catalog: &'a Catalog, engine: E, season: SeasonType) -> Self {
        Self {
            catalog,
            engine,
            boxfiles: BoxFileReader::new(),
            season,
            skip_missing_years: false,
            stats: ProcessingStats::default(),
        }
    }

    /// Skip a year with no team file instead of failing
    pub fn skip_missing_years(mut self, skip: bool) -> Self {
        self.skip_missing_years = skip;
        self
    }

    pub fn season(&self) -> SeasonType {
        self.season
    }

    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    /// Every game of one season
    pub fn games(&mut self, year: i32) -> RetroResult<Vec<GameBox>> {
        let files = self.catalog.event_files(year, self.season)?;
        debug!("{} {}: {} event files", year, self.season, files.len());

        let mut games = self.engine.read_games(&files, year)?;
        self.stats.event_files += files.len();

        if self.season == SeasonType::Regular {
            let box_files = self.catalog.boxscore_files(year);
            if !box_files.is_empty() {
                let mut seen: HashSet<String> = games.iter().map(|g| g.game_id.clone()).collect();
                for game in self.boxfiles.read_games(&box_files, year)? {
                    if seen.insert(game.game_id.clone()) {
                        self.stats.boxscore_games += 1;
                        games.push(game);
                    } else {
                        debug!("{} already read from the event files", game.game_id);
                    }
                }
            }
        }

        self.stats.games += games.len();
        self.stats.years_processed += 1;
        Ok(games)
    }

    /// Visit the games of every year in `years`, in order
    pub fn for_each_year<F>(&mut self, years: RangeInclusive<i32>, mut visit: F) -> RetroResult<()>
    where
        F: FnMut(i32, &[GameBox]),
    {
        for year in years {
            let games = match self.games(year) {
                Ok(games) => games,
                Err(RetroError::NotFound { kind: "team", path }) if self.skip_missing_years => {
                    warn!("skipping {}: cannot find team file {:?}", year, path);
                    self.stats.years_skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };
            info!("{} {}: {} games", year, self.season, games.len());
            visit(year, &games);
        }
        Ok(())
    }
}
