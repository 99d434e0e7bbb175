//! Subcommand implementations

pub mod career;
pub mod leaders;
pub mod summary;

use anyhow::{Context as _, Result};
use retro_core::{Catalog, Chadwick};
use std::path::PathBuf;

/// What every subcommand needs
#[derive(Debug)]
pub struct Context {
    pub catalog: Catalog,
    pub chadwick_dir: Option<PathBuf>,
    pub json: bool,
}

impl Context {
    pub fn engine(&self) -> Result<Chadwick> {
        Chadwick::new(self.chadwick_dir.clone())
            .context("Failed to locate the Chadwick tools. Use --chadwick-dir or CHADWICK_DIR.")
    }
}
