use std::path::PathBuf;
use thiserror::Error;

/// Error reading or writing a save file
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error at '{}': {error}", .path.display())]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Parse error in '{}': {error}", .path.display())]
    Parse {
        error: serde_json::Error,
        path: PathBuf,
    },
    #[error("Encode error: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Malformed save: {0}")]
    Malformed(String),
}

/// A session action that could not be carried out
///
/// None of these mutate the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No weapons in inventory!")]
    NoWeapons,
    #[error("No armor in inventory!")]
    NoArmor,
    #[error("No consumable items!")]
    NoConsumables,
    #[error("Invalid choice!")]
    InvalidChoice,
    #[error("{0} has been defeated and cannot continue")]
    PlayerDefeated(String),
    #[error(transparent)]
    Save(#[from] SaveError),
}
