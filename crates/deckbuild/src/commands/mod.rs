mod all;
mod build;
mod changed;

use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Build the given deck packages, restoring cached output when available
    Build {
        /// Deck package directories or package.json manifests to build
        #[arg(required = true)]
        targets: Vec<PathBuf>,

        /// Always run the build tool, even when cached output exists
        #[arg(long)]
        no_cache: bool,
    },
    /// Build only the decks affected by changes since the base commit
    Changed,
    /// Run the build script of every workspace package
    All,
}

impl Commands {
    pub(crate) fn execute(self, start_dir: &Path) -> Result<()> {
        match self {
            Self::Build { targets, no_cache } => build::run(start_dir, &targets, no_cache),
            Self::Changed => changed::run(start_dir),
            Self::All => all::run(start_dir),
        }
    }
}
