//! retrostats: Retrosheet box scores, career stats and leaderboards
//!
//! Reads a local Retrosheet checkout through the Chadwick tools.

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use retro_core::{Catalog, DataPaths};
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

mod args;
mod commands;

use commands::{career, leaders, summary, Context};

/// Retrosheet stats from the command line
///
/// Prints box scores, year-by-year player stats and leaderboards from the
/// Retrosheet event and box score files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Root of the Retrosheet data (holds event/, rosters/ and boxscore/)
    #[arg(
        short,
        long,
        env = "RETROSHEET_DIR",
        default_value = "retrosheet",
        global = true,
        value_name = "DIR"
    )]
    data_dir: PathBuf,

    /// Directory holding cwgame and cwdaily (default: search PATH)
    #[arg(long, env = "CHADWICK_DIR", global = true, value_name = "DIR")]
    chadwick_dir: Option<PathBuf>,

    /// Enable verbose logging (use -vv for trace output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Write log records to FILE instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Batting leaders over a range of seasons
    Leaders(leaders::BattingLeadersArgs),

    /// Pitching leaders over a range of seasons
    PitchingLeaders(leaders::PitchingLeadersArgs),

    /// Year-by-year batting stats of one player
    Batting(career::CareerArgs),

    /// Year-by-year pitching stats of one player
    Pitching(career::CareerArgs),

    /// Box scores of one team's games in a date range
    Summary(summary::SummaryArgs),
}

fn init_logging(cli: &Cli) -> Result<()> {
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));
    builder.format_timestamp_millis();

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {:?}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let started = Instant::now();
    info!("retrostats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Data directory: {:?}", cli.data_dir);
    debug!("Chadwick directory: {:?}", cli.chadwick_dir);

    if !cli.data_dir.is_dir() {
        anyhow::bail!(
            "Retrosheet data directory not found: {:?}. Use --data-dir or RETROSHEET_DIR.",
            cli.data_dir
        );
    }

    let ctx = Context {
        catalog: Catalog::new(DataPaths::new(&cli.data_dir)),
        chadwick_dir: cli.chadwick_dir.clone(),
        json: cli.json,
    };

    match &cli.command {
        Command::Leaders(args) => leaders::run_batting(&ctx, args)?,
        Command::PitchingLeaders(args) => leaders::run_pitching(&ctx, args)?,
        Command::Batting(args) => career::run_batting(&ctx, args)?,
        Command::Pitching(args) => career::run_pitching(&ctx, args)?,
        Command::Summary(args) => summary::run(&ctx, args)?,
    }

    info!("Running time = {:.3} seconds", started.elapsed().as_secs_f64());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_leaders() {
        let cli = Cli::try_parse_from([
            "retrostats", "-v", "--json", "leaders", "-s", "HR", "-y", "1954", "-e", "1960", "-p",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(cli.json);
        match cli.command {
            Command::Leaders(args) => {
                assert_eq!(args.range.stat, "HR");
                assert_eq!(args.range.start, 1954);
                assert_eq!(args.range.end, Some(1960));
                assert!(args.range.post);
                assert_eq!(args.range.limit, 30);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_summary() {
        let cli = Cli::try_parse_from([
            "retrostats", "summary", "-t", "tor", "-y", "1993", "-s", "0406", "-d", "/data",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/data"));
        match cli.command {
            Command::Summary(args) => {
                assert_eq!(args.team, "tor");
                assert_eq!(args.start.as_deref(), Some("0406"));
                assert_eq!(args.end, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_career_requires_player() {
        assert!(Cli::try_parse_from(["retrostats", "batting", "-s", "1954"]).is_err());
    }
}
