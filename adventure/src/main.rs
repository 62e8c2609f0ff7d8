//! adventure - interactive entry point
//!
//! Environment:
//! - `ADVENTURE_CONTENT_DIR`: directory of content TOML replacing the built-in set
//! - `ADVENTURE_CONSTANTS`: TOML file of game constants
//! - `ADVENTURE_SAVE_DIR`: where save files go (default `saves`)
//! - `RUST_LOG`: log filter, logs go to stderr

use adventure::{Prompt, Shell};
use content_core::ContentRegistry;
use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_SAVE_DIR: &str = "saves";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match std::env::var_os("ADVENTURE_CONSTANTS") {
        Some(path) => stat_core::init_constants(Path::new(&path))?,
        None => stat_core::init_constants_default()?,
    }

    let content = match std::env::var_os("ADVENTURE_CONTENT_DIR") {
        Some(dir) => ContentRegistry::load(Path::new(&dir))?,
        None => ContentRegistry::builtin()?,
    };
    tracing::info!(
        enemies = content.enemies().len(),
        quests = content.quests().len(),
        "content loaded"
    );

    let save_dir = std::env::var_os("ADVENTURE_SAVE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_DIR));

    let prompt = Prompt::new(io::stdin().lock(), io::stdout());
    let mut shell = Shell::create(prompt, content, save_dir, rand::thread_rng())?;
    shell.run()?;
    Ok(())
}
