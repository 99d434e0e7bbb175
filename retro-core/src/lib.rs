//! retro-core
//!
//! Box scores, career tables and leaderboards from a local Retrosheet
//! checkout. Event files are run through the Chadwick command-line tools;
//! games that only exist in the box score files are read directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌─────────────────┐
//! │  SeasonRunner   │────▶│  cwgame/cwdaily  │────▶│  event files    │
//! │  (batch)        │ CSV │  (Chadwick)      │     │  (.EVA/.EVN)    │
//! └─────────────────┘     └──────────────────┘     └─────────────────┘
//!         │
//!         ├──────────────▶ BoxFileReader ──────▶ box score files (.EBA/.EBN)
//!         ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  GameBox        │────▶│  stats/leaders   │────▶ report (text or JSON)
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`catalog`] - Data directory layout, team and roster files
//! - [`engine`] - Box score sources
//! - [`batch`] - Season-at-a-time processing
//! - [`model`] - Per-game box score data
//! - [`stats`] - Batting and pitching accumulators
//! - [`leaders`] - Top-N leaderboards
//! - [`report`] - Text and JSON output
//! - [`error`] - Error types

pub mod batch;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod leaders;
pub mod model;
pub mod report;
pub mod stats;

pub use batch::{ProcessingStats, SeasonRunner};
pub use catalog::{Catalog, DataPaths, NameBook, SeasonType};
pub use engine::{BoxFileReader, BoxscoreSource, Chadwick};
pub use error::{RetroError, RetroResult};
pub use leaders::{LeaderEntry, Leaderboard};
pub use model::{GameBox, Side};
pub use report::{write_json, CareerReport, GameSummary};
pub use stats::{BattingLine, BattingStat, PitchingLine, PitchingStat, SeasonLedger, Stat, StatLine};
