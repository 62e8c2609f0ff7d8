//! Save files - one JSON document per saved game

use crate::error::SaveError;
use crate::session::GameSession;
use content_core::{ContentRegistry, QuestId};
use quest_core::{Quest, QuestLedger};
use serde::{Deserialize, Serialize};
use stat_core::Character;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Extension of save files in the save directory
pub const SAVE_EXTENSION: &str = "sav";

/// On-disk form of a session
///
/// The character holds quest ids; the records for those ids travel
/// alongside it so their progress survives a reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub character: Character,
    #[serde(default)]
    pub active_quests: Vec<Quest>,
    #[serde(default)]
    pub completed_quests: Vec<Quest>,
    #[serde(default)]
    pub story_progress: u32,
}

impl SaveGame {
    pub fn capture(session: &GameSession) -> Self {
        SaveGame {
            character: session.character().clone(),
            active_quests: session.active_quests().into_iter().cloned().collect(),
            completed_quests: session.completed_quests().into_iter().cloned().collect(),
            story_progress: session.ledger().story_progress(),
        }
    }

    /// Rebuild a session on top of `content`
    ///
    /// Fails if the character references a quest with no record, lists a
    /// quest twice or as both active and completed, or a record cannot be
    /// placed in the ledger.
    pub fn into_session(self, content: ContentRegistry) -> Result<GameSession, SaveError> {
        let character = self.character;
        validate_character(&character)?;

        let mut ledger = QuestLedger::new(&content);
        for quest in self.active_quests.into_iter().chain(self.completed_quests) {
            let id = quest.id.clone();
            if !ledger.restore_quest(quest) {
                return Err(SaveError::Malformed(format!("unknown quest '{}'", id)));
            }
        }
        ledger.set_story_progress(self.story_progress);

        check_quest_ids(&ledger, &character.active_quests, "active")?;
        check_quest_ids(&ledger, &character.completed_quests, "completed")?;
        if let Some(id) = character
            .active_quests
            .iter()
            .find(|id| character.completed_quests.contains(id))
        {
            return Err(SaveError::Malformed(format!(
                "quest '{}' is both active and completed",
                id
            )));
        }

        Ok(GameSession::from_parts(character, ledger, content))
    }
}

fn validate_character(character: &Character) -> Result<(), SaveError> {
    if character.level == 0 {
        return Err(SaveError::Malformed("level must be at least 1".to_string()));
    }
    if character.current_health > character.max_health {
        return Err(SaveError::Malformed(format!(
            "current health {} exceeds max health {}",
            character.current_health, character.max_health
        )));
    }
    if character.experience_to_next_level == 0 {
        return Err(SaveError::Malformed(
            "experience_to_next_level must be positive".to_string(),
        ));
    }
    Ok(())
}

fn check_quest_ids(ledger: &QuestLedger, ids: &[QuestId], list: &str) -> Result<(), SaveError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !ledger.contains(id) {
            return Err(SaveError::Malformed(format!(
                "{} quest '{}' has no record",
                list, id
            )));
        }
        if !seen.insert(id) {
            return Err(SaveError::Malformed(format!(
                "{} quest '{}' listed twice",
                list, id
            )));
        }
    }
    Ok(())
}

/// `<name>_lvl<level>.sav`
pub fn save_file_name(character: &Character) -> String {
    format!("{}_lvl{}.{}", character.name, character.level, SAVE_EXTENSION)
}

/// Write the session to `path` as pretty JSON, creating parent directories
pub fn save_to_path(session: &GameSession, path: &Path) -> Result<(), SaveError> {
    let io_error = |error| SaveError::Io {
        error,
        path: path.to_path_buf(),
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    let json =
        serde_json::to_string_pretty(&SaveGame::capture(session)).map_err(SaveError::Encode)?;
    std::fs::write(path, json).map_err(io_error)?;

    tracing::info!(path = %path.display(), "game saved");
    Ok(())
}

/// Read a save file and rebuild its session on top of `content`
pub fn load_from_path(path: &Path, content: ContentRegistry) -> Result<GameSession, SaveError> {
    let json = std::fs::read_to_string(path).map_err(|error| SaveError::Io {
        error,
        path: path.to_path_buf(),
    })?;
    let save: SaveGame = serde_json::from_str(&json).map_err(|error| SaveError::Parse {
        error,
        path: path.to_path_buf(),
    })?;

    let session = save.into_session(content)?;
    tracing::info!(
        path = %path.display(),
        name = %session.character().name,
        level = session.character().level,
        "game loaded"
    );
    Ok(session)
}

/// Save files in `dir`, sorted by name; a missing directory has none
pub fn list_saves(dir: &Path) -> Result<Vec<PathBuf>, SaveError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let io_error = |error| SaveError::Io {
        error,
        path: dir.to_path_buf(),
    };

    let mut saves = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == SAVE_EXTENSION) {
            saves.push(path);
        }
    }
    saves.sort();
    Ok(saves)
}
