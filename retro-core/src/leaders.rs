//! Top-N leaderboards with ties at the cutoff

use crate::catalog::SeasonType;
use crate::stats::{round_to, Stat};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Plate appearances per season a batter needs to qualify for rate stats
pub fn min_plate_appearances(season: SeasonType, seasons: u32) -> u32 {
    let per_season = match season {
        SeasonType::Regular => 502,
        SeasonType::Post => 20,
    };
    per_season * seasons
}

/// Outs per season a pitcher needs to qualify for rate stats (162 and 5 innings)
pub fn min_outs(season: SeasonType, seasons: u32) -> u32 {
    let per_season = match season {
        SeasonType::Regular => 486,
        SeasonType::Post => 15,
    };
    per_season * seasons
}

/// Keep the first `limit` items of an already sorted list, plus every
/// following item whose value equals the last one kept
pub fn cutoff<T>(sorted: Vec<T>, limit: usize, value: impl Fn(&T) -> f64) -> Vec<T> {
    if sorted.len() <= limit {
        return sorted;
    }
    if limit == 0 {
        return Vec::new();
    }
    let boundary = value(&sorted[limit - 1]);
    let keep = limit
        + sorted[limit..]
            .iter()
            .take_while(|item| value(*item) == boundary)
            .count();
    let mut sorted = sorted;
    sorted.truncate(keep);
    sorted
}

/// One row of a leaderboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderEntry {
    /// Shared by every entry of a tie group
    pub rank: usize,
    pub player_id: String,
    pub name: String,
    pub value: f64,
    pub display: String,
    /// Playing time, shown for rate stats
    pub qualifier: Option<String>,
}

/// A ranked list for one stat over a range of seasons
#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    pub stat: String,
    pub season: SeasonType,
    pub start: i32,
    pub end: i32,
    pub limit: usize,
    /// Label and minimum of the playing-time column, for rate stats
    pub qualifier: Option<(String, String)>,
    pub entries: Vec<LeaderEntry>,
}

/// Rank players by `stat`.
///
/// Rate stats need `min_playing_time` of the stat's qualifier column, and
/// never less than one. Counting stats leave out players with none.
pub fn rank<S: Stat>(
    totals: &HashMap<String, S::Line>,
    stat: S,
    limit: usize,
    min_playing_time: u32,
    name_of: impl Fn(&str) -> String,
) -> Vec<LeaderEntry> {
    let mut candidates: Vec<(&String, &S::Line, f64)> = totals
        .iter()
        .filter(|(_, line)| {
            !stat.is_rate() || S::QUALIFIER.count(line).unwrap_or(0) >= min_playing_time.max(1)
        })
        .map(|(id, line)| (id, line, round_to(stat.value(line), stat.precision())))
        .filter(|(_, _, value)| stat.is_rate() || *value > 0.0)
        .collect();

    let ascending = stat.lower_is_better();
    candidates.sort_by(|a, b| {
        let by_value = if ascending {
            a.2.partial_cmp(&b.2)
        } else {
            b.2.partial_cmp(&a.2)
        };
        by_value.unwrap_or(Ordering::Equal).then_with(|| a.0.cmp(b.0))
    });

    let kept = cutoff(candidates, limit, |c| c.2);

    let mut entries: Vec<LeaderEntry> = Vec::with_capacity(kept.len());
    for (i, (id, line, value)) in kept.into_iter().enumerate() {
        let rank = match entries.last() {
            Some(prev) if prev.value == value => prev.rank,
            _ => i + 1,
        };
        entries.push(LeaderEntry {
            rank,
            player_id: id.clone(),
            name: name_of(id),
            value,
            display: stat.display(line),
            qualifier: stat.is_rate().then(|| S::QUALIFIER.display(line)),
        });
    }
    entries
}
