use std::path::PathBuf;

use clap::Parser;

use crate::shapes::RandomShapes;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "blockfall", about = "Falling-block puzzle in the terminal")]
pub struct Config {
    /// Seed for the shape sequence. Omit for a different game every run.
    #[arg(long, env = "TETRIS_SEED")]
    pub seed: Option<u64>,

    /// Do not ring the terminal bell.
    #[arg(long)]
    pub mute: bool,

    /// Write logs to this file instead of stderr. Filter with RUST_LOG.
    #[arg(long, value_name = "path")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn shape_provider(&self) -> RandomShapes {
        match self.seed {
            Some(seed) => RandomShapes::seeded(seed),
            None => RandomShapes::new(),
        }
    }
}
