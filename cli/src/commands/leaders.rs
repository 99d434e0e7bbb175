//! `leaders` and `pitching-leaders`

use super::Context;
use crate::args;
use anyhow::{Context as _, Result};
use clap::Args;
use log::info;
use retro_core::leaders::{self, Leaderboard};
use retro_core::model::GameBox;
use retro_core::stats::format_innings;
use retro_core::{write_json, BattingStat, PitchingStat, SeasonRunner, SeasonType, Stat};
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::ops::RangeInclusive;

const DEFAULT_BATTING_YEAR: i32 = 1954;
const DEFAULT_PITCHING_YEAR: i32 = 2014;

/// Options shared by both leaderboards
#[derive(Args, Debug)]
pub struct LeaderRange {
    /// Stat to rank by, e.g. HR, BA, ERA, SO
    #[arg(short, long)]
    pub stat: String,

    /// First season
    #[arg(short = 'y', long = "year", value_name = "YEAR")]
    pub start: i32,

    /// Last season (default: the first season)
    #[arg(short, long, value_name = "YEAR")]
    pub end: Option<i32>,

    /// Number of leaders to list; ties at the cutoff are all listed
    #[arg(short, long, default_value_t = args::DEFAULT_LIMIT)]
    pub limit: usize,

    /// Postseason instead of regular season
    #[arg(short, long)]
    pub post: bool,
}

#[derive(Args, Debug)]
pub struct BattingLeadersArgs {
    #[command(flatten)]
    pub range: LeaderRange,

    /// Plate appearances needed for rate stats (default: 502 per season, 20 in the postseason)
    #[arg(long = "min-pa", value_name = "PA")]
    pub min_pa: Option<u32>,
}

#[derive(Args, Debug)]
pub struct PitchingLeadersArgs {
    #[command(flatten)]
    pub range: LeaderRange,

    /// Innings needed for rate stats (default: 162 per season, 5 in the postseason)
    #[arg(long = "min-ip", value_name = "IP")]
    pub min_ip: Option<u32>,
}

/// Validated seasons and limit
struct Query {
    season: SeasonType,
    years: RangeInclusive<i32>,
    limit: usize,
}

impl Query {
    fn new(range: &LeaderRange, default_year: i32) -> Self {
        let start = args::start_year(range.start, default_year).announce();
        let end = args::end_year(range.end, start).announce();
        Self {
            season: SeasonType::from_post_flag(range.post),
            years: start..=end,
            limit: args::limit(range.limit).announce(),
        }
    }

    fn seasons(&self) -> u32 {
        (self.years.end() - self.years.start() + 1) as u32
    }
}

pub fn run_batting(ctx: &Context, args: &BattingLeadersArgs) -> Result<()> {
    let stat = args::stat(&args.range.stat, BattingStat::RunsBattedIn).announce();
    let query = Query::new(&args.range, DEFAULT_BATTING_YEAR);
    let min = args
        .min_pa
        .unwrap_or_else(|| leaders::min_plate_appearances(query.season, query.seasons()));

    run(ctx, &query, stat, min, min.to_string(), |game| {
        player_ids(game.batters.iter().map(|b| b.player_id.as_str()))
            .filter_map(|id| game.batting_for(id).map(|line| (id.to_string(), line)))
            .collect()
    })
}

pub fn run_pitching(ctx: &Context, args: &PitchingLeadersArgs) -> Result<()> {
    let stat = args::stat(&args.range.stat, PitchingStat::Strikeouts).announce();
    let query = Query::new(&args.range, DEFAULT_PITCHING_YEAR);
    let min = min_outs(args.min_ip, &query);

    run(ctx, &query, stat, min, format_innings(min), |game| {
        player_ids(game.pitchers.iter().map(|p| p.player_id.as_str()))
            .filter_map(|id| game.pitching_for(id).map(|line| (id.to_string(), line)))
            .collect()
    })
}

/// Outs a pitcher needs for rate stats, from `--min-ip` or the season default
fn min_outs(min_ip: Option<u32>, query: &Query) -> u32 {
    min_ip
        .map(|innings| innings.saturating_mul(3))
        .unwrap_or_else(|| leaders::min_outs(query.season, query.seasons()))
}

/// Each id once, in order of first appearance
fn player_ids<'a>(ids: impl Iterator<Item = &'a str>) -> impl Iterator<Item = &'a str> {
    let mut seen = HashSet::new();
    ids.filter(move |id| seen.insert(*id))
}

fn run<S, F>(
    ctx: &Context,
    query: &Query,
    stat: S,
    min_playing_time: u32,
    min_text: String,
    lines: F,
) -> Result<()>
where
    S: Stat,
    F: Fn(&GameBox) -> Vec<(String, S::Line)>,
{
    info!(
        "{} {} leaders for {}-{}",
        query.season,
        stat,
        query.years.start(),
        query.years.end()
    );

    let mut runner = SeasonRunner::new(&ctx.catalog, ctx.engine()?, query.season);
    let mut totals: HashMap<String, S::Line> = HashMap::new();
    runner
        .for_each_year(query.years.clone(), |_, games| {
            for game in games {
                for (id, line) in lines(game) {
                    *totals.entry(id).or_default() += line;
                }
            }
        })
        .context("Failed to read the season games")?;
    info!(
        "{} games, {} players",
        runner.stats().games,
        totals.len()
    );

    let names = ctx
        .catalog
        .names(query.years.clone())
        .context("Failed to read the rosters")?;
    let entries = leaders::rank(&totals, stat, query.limit, min_playing_time, |id| {
        names.full_name(id)
    });

    let board = Leaderboard {
        stat: stat.label().to_string(),
        season: query.season,
        start: *query.years.start(),
        end: *query.years.end(),
        limit: query.limit,
        qualifier: stat
            .is_rate()
            .then(|| (S::QUALIFIER.label().to_string(), min_text)),
        entries,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if ctx.json {
        write_json(&board, &mut out)?;
    } else {
        board.write_text(&mut out)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_ids_once() {
        let ids: Vec<&str> = player_ids(["a", "b", "a", "c", "b"].into_iter()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_query_validation() {
        let range = LeaderRange {
            stat: "HR".to_string(),
            start: 1960,
            end: Some(1950),
            limit: 5,
            post: true,
        };
        let query = Query::new(&range, DEFAULT_BATTING_YEAR);
        assert_eq!(query.years, 1960..=1960);
        assert_eq!(query.limit, args::DEFAULT_LIMIT);
        assert_eq!(query.season, SeasonType::Post);
        assert_eq!(query.seasons(), 1);
    }

    #[test]
    fn test_min_outs() {
        let range = LeaderRange {
            stat: "ERA".to_string(),
            start: 2013,
            end: Some(2014),
            limit: 30,
            post: false,
        };
        let query = Query::new(&range, DEFAULT_PITCHING_YEAR);
        assert_eq!(min_outs(None, &query), 972);
        assert_eq!(min_outs(Some(100), &query), 300);
        assert_eq!(min_outs(Some(u32::MAX), &query), u32::MAX);
    }
}
