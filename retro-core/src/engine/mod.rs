//! Box score sources
//!
//! - [`Chadwick`] runs the Chadwick command line tools over event files
//! - [`BoxFileReader`] reads Retrosheet box score files directly

mod boxfile;
mod chadwick;

pub use boxfile::{parse_boxscores, BoxFileReader};
pub use chadwick::{parse_engine_output, Chadwick};

use crate::error::RetroResult;
use crate::model::GameBox;
use std::path::PathBuf;

/// Something that turns a season's data files into per-game box scores
pub trait BoxscoreSource {
    /// Read every game in `files`. All files belong to season `year`.
    fn read_games(&self, files: &[PathBuf], year: i32) -> RetroResult<Vec<GameBox>>;
}

/// Non-negative integer field, blank or negative values count as zero
pub(crate) fn count_field(text: &str) -> u32 {
    text.trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n >= 0)
        .map(|n| n as u32)
        .unwrap_or(0)
}

/// Integer field where a blank or negative value means unknown
pub(crate) fn known_field(text: &str) -> Option<u32> {
    text.trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n >= 0)
        .map(|n| n as u32)
}

/// Empty strings become `None`
pub(crate) fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Give the first pitcher of each side the start, the last the finish,
/// and a complete game (with a shutout if the opponent did not score)
/// to a starter who pitched alone. Decisions come from the game info.
pub(crate) fn credit_pitchers(game: &mut GameBox) {
    use crate::model::Side;

    let runs = [game.runs(Side::Visitor), game.runs(Side::Home)];
    let info = game.info.clone();
    for side in Side::BOTH {
        let mut seqs: Vec<u32> = game
            .pitchers
            .iter()
            .filter(|p| p.side == side)
            .map(|p| p.seq)
            .collect();
        seqs.sort_unstable();
        let (first, last) = match (seqs.first(), seqs.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => continue,
        };
        let alone = seqs.len() == 1;

        for pitcher in game.pitchers.iter_mut().filter(|p| p.side == side) {
            let line = &mut pitcher.pitching;
            line.g = 1;
            if pitcher.seq == first {
                line.gs = 1;
                if alone {
                    line.cg = 1;
                    if runs[side.opponent().index()] == 0 {
                        line.sho = 1;
                    }
                }
            } else if pitcher.seq == last {
                line.gf = 1;
            }
            let id = Some(pitcher.player_id.as_str());
            line.w = u32::from(info.winning_pitcher.as_deref() == id);
            line.l = u32::from(info.losing_pitcher.as_deref() == id);
            line.sv = u32::from(info.save.as_deref() == id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_parsing() {
        assert_eq!(count_field(" 4 "), 4);
        assert_eq!(count_field(""), 0);
        assert_eq!(count_field("-1"), 0);
        assert_eq!(known_field("-1"), None);
        assert_eq!(known_field("3"), Some(3));
        assert_eq!(non_empty("  "), None);
    }
}
