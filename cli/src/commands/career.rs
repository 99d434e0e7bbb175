//! `batting` and `pitching`: year-by-year stats of one player

use super::Context;
use crate::args;
use anyhow::{Context as _, Result};
use clap::Args;
use log::{info, warn};
use retro_core::model::GameBox;
use retro_core::{
    write_json, BattingStat, CareerReport, PitchingStat, SeasonLedger, SeasonRunner, SeasonType,
    Stat,
};
use std::io::{self, Write};
use std::ops::RangeInclusive;

const DEFAULT_BATTER: &str = "maysw101";
const DEFAULT_PITCHER: &str = "kersc001";
const DEFAULT_BATTING_YEAR: i32 = 1954;
const DEFAULT_PITCHING_YEAR: i32 = 2014;

#[derive(Args, Debug)]
pub struct CareerArgs {
    /// Retrosheet player id, e.g. maysw101
    #[arg(short = 'i', long = "id", value_name = "PLAYER")]
    pub player: String,

    /// First season
    #[arg(short, long, value_name = "YEAR")]
    pub start: i32,

    /// Last season (default: the first season)
    #[arg(short, long, value_name = "YEAR")]
    pub end: Option<i32>,

    /// Postseason instead of regular season
    #[arg(short, long)]
    pub post: bool,
}

struct Player {
    id: String,
    years: RangeInclusive<i32>,
    season: SeasonType,
}

impl Player {
    fn new(args: &CareerArgs, default_id: &str, default_year: i32) -> Self {
        let id = args::player_id(&args.player, default_id).announce();
        let start = args::start_year(args.start, default_year).announce();
        let end = args::end_year(args.end, start).announce();
        Self {
            id,
            years: start..=end,
            season: SeasonType::from_post_flag(args.post),
        }
    }
}

pub fn run_batting(ctx: &Context, args: &CareerArgs) -> Result<()> {
    let player = Player::new(args, DEFAULT_BATTER, DEFAULT_BATTING_YEAR);
    run::<BattingStat, _>(ctx, &player, |game| game.batting_for(&player.id))
}

pub fn run_pitching(ctx: &Context, args: &CareerArgs) -> Result<()> {
    let player = Player::new(args, DEFAULT_PITCHER, DEFAULT_PITCHING_YEAR);
    run::<PitchingStat, _>(ctx, &player, |game| game.pitching_for(&player.id))
}

fn run<S, F>(ctx: &Context, player: &Player, line_for: F) -> Result<()>
where
    S: Stat,
    F: Fn(&GameBox) -> Option<S::Line>,
{
    let name = match ctx
        .catalog
        .find_player(&player.id, player.years.clone())
        .context("Failed to search the rosters")?
    {
        Some(found) => found.full_name(),
        None => {
            warn!(
                "{} is not on any roster from {} to {}",
                player.id,
                player.years.start(),
                player.years.end()
            );
            player.id.clone()
        }
    };
    info!("{} {} {} stats for {}", player.season, S::KIND, name, player.id);

    let mut ledger: SeasonLedger<S::Line> = SeasonLedger::new();
    let mut runner =
        SeasonRunner::new(&ctx.catalog, ctx.engine()?, player.season).skip_missing_years(true);
    runner
        .for_each_year(player.years.clone(), |year, games| {
            ledger.record(year, <S::Line as Default>::default());
            for line in games.iter().filter_map(&line_for) {
                ledger.record(year, line);
            }
        })
        .context("Failed to read the season games")?;

    let stats = runner.stats();
    info!(
        "{} years read, {} skipped, {} games",
        stats.years_processed, stats.years_skipped, stats.games
    );

    let report: CareerReport<S> = CareerReport::new(&player.id, &name, player.season, ledger);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if ctx.json {
        write_json(&report, &mut out)?;
    } else {
        report.write_text(&mut out)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_defaults() {
        let args = CareerArgs {
            player: "bad".to_string(),
            start: 1800,
            end: None,
            post: false,
        };
        let player = Player::new(&args, DEFAULT_PITCHER, DEFAULT_PITCHING_YEAR);
        assert_eq!(player.id, "kersc001");
        assert_eq!(player.years, 2014..=2014);
        assert_eq!(player.season, SeasonType::Regular);
    }
}
