//! content_core - Static content tables
//!
//! Enemy archetypes, quest templates, daily quest templates and the
//! exploration table, read from TOML. The crate ships a built-in set
//! (`ContentRegistry::builtin`) and can load a directory of overrides.

mod config;
mod enemy;
mod quest;
mod registry;
mod world;

pub use enemy::{EnemyTable, EnemyTemplate, FALLBACK_ENEMY};
pub use quest::{DailyQuestTemplate, QuestCategory, QuestId, QuestKind, QuestTemplate};
pub use registry::ContentRegistry;
pub use world::{Exploration, ExplorationTable};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading content
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path:?}': {message}")]
    Validation {
        message: String,
        path: Option<PathBuf>,
    },
}
