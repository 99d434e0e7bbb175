//! `summary`: box scores of one team's games

use super::Context;
use crate::args;
use anyhow::{Context as _, Result};
use clap::Args;
use log::{debug, info};
use retro_core::model::GameBox;
use retro_core::{write_json, GameSummary, SeasonRunner, SeasonType, Side};
use std::collections::HashMap;
use std::io::{self, Write};

const DEFAULT_TEAM: &str = "TOR";
const DEFAULT_YEAR: i32 = 1993;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Retrosheet team id, e.g. TOR, LAN
    #[arg(short, long)]
    pub team: String,

    /// Season
    #[arg(short, long)]
    pub year: i32,

    /// First date as MMDD (default: 0301)
    #[arg(short, long, value_name = "MMDD")]
    pub start: Option<String>,

    /// Last date as MMDD (default: 1031)
    #[arg(short, long, value_name = "MMDD")]
    pub end: Option<String>,

    /// Postseason instead of regular season
    #[arg(short, long)]
    pub post: bool,
}

/// Games of `team` between two `yyyymmdd` dates, in date and game number order
fn select_games(mut games: Vec<GameBox>, team: &str, first: &str, last: &str) -> Vec<GameBox> {
    games.retain(|game| {
        let date = game.date_key();
        game.involves_team(team) && date >= first && date <= last
    });
    games.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
    games
}

pub fn run(ctx: &Context, args: &SummaryArgs) -> Result<()> {
    let team = args::team(&args.team, DEFAULT_TEAM).announce();
    let year = args::start_year(args.year, DEFAULT_YEAR).announce();
    let start = args::month_day(args.start.as_deref(), args::DEFAULT_START_MMDD).announce();
    let end = args::month_day(args.end.as_deref(), args::DEFAULT_END_MMDD).announce();
    let season = SeasonType::from_post_flag(args.post);

    let first = format!("{}{}", year, start);
    let last = format!("{}{}", year, end);
    info!("{} {} games of {} from {} to {}", year, season, team, first, last);

    let mut runner = SeasonRunner::new(&ctx.catalog, ctx.engine()?, season);
    let games = runner
        .games(year)
        .with_context(|| format!("Failed to read the {} games of {}", season, year))?;
    let games = select_games(games, &team, &first, &last);
    info!("found {} games", games.len());

    let names = ctx
        .catalog
        .season_names(year)
        .context("Failed to read the rosters")?;
    let cities: HashMap<String, String> = ctx
        .catalog
        .teams(year)?
        .into_iter()
        .map(|t| (t.team_id, t.city))
        .collect();
    let city = |game: &GameBox, side: Side| {
        let id = game.info.team(side);
        cities.get(id).cloned().unwrap_or_else(|| id.to_string())
    };

    let summaries: Vec<GameSummary> = games
        .iter()
        .map(|game| {
            debug!("game {}", game.game_id);
            GameSummary::new(
                game,
                &names,
                [city(game, Side::Visitor), city(game, Side::Home)],
            )
        })
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if ctx.json {
        write_json(&summaries, &mut out)?;
    } else {
        for summary in &summaries {
            summary.write_text(&mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}
