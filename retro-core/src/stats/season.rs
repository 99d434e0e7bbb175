use super::StatLine;
use serde::Serialize;

/// One season of a career
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRow<L> {
    pub year: i32,
    pub line: L,
}

/// Per-year lines of a player in year order, with the running career total
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeasonLedger<L> {
    seasons: Vec<SeasonRow<L>>,
    total: L,
}

impl<L: StatLine> SeasonLedger<L> {
    pub fn new() -> Self {
        Self {
            seasons: Vec::new(),
            total: L::default(),
        }
    }

    /// Add a line for `year`. Lines for the year already being recorded are merged.
    pub fn record(&mut self, year: i32, line: L) {
        self.total += line.clone();
        match self.seasons.last_mut() {
            Some(row) if row.year == year => row.line += line,
            _ => self.seasons.push(SeasonRow { year, line }),
        }
    }

    pub fn seasons(&self) -> &[SeasonRow<L>] {
        &self.seasons
    }

    pub fn total(&self) -> &L {
        &self.total
    }

    /// Seasons in which the player appeared in at least one game
    pub fn active_years(&self) -> u32 {
        self.seasons
            .iter()
            .filter(|row| row.line.games() > 0)
            .count() as u32
    }

    /// Average of each counting stat over the active years
    pub fn average(&self) -> Option<L> {
        match self.active_years() {
            0 => None,
            years => Some(self.total.averaged(years)),
        }
    }
}
