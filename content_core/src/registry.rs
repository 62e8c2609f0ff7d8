use crate::config::{ContentFileConfig, EncounterConfig, ExplorationConfig};
use crate::enemy::{EnemyTable, EnemyTemplate, FALLBACK_ENEMY};
use crate::quest::{DailyQuestTemplate, QuestTemplate};
use crate::world::ExplorationTable;
use crate::ContentError;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

const BUILTIN_ENEMIES: &str = include_str!("../data/enemies.toml");
const BUILTIN_QUESTS: &str = include_str!("../data/quests.toml");
const BUILTIN_WORLD: &str = include_str!("../data/world.toml");

/// All static content the game core consumes
#[derive(Debug, Clone)]
pub struct ContentRegistry {
    enemies: EnemyTable,
    quests: Vec<QuestTemplate>,
    daily_quests: Vec<DailyQuestTemplate>,
    exploration: ExplorationTable,
}

impl ContentRegistry {
    /// Content shipped with the crate
    pub fn builtin() -> Result<Self, ContentError> {
        let mut builder = ContentBuilder::default();
        for (name, source) in [
            ("enemies.toml", BUILTIN_ENEMIES),
            ("quests.toml", BUILTIN_QUESTS),
            ("world.toml", BUILTIN_WORLD),
        ] {
            builder.add_str(source, Path::new(name))?;
        }
        builder.finish(None)
    }

    /// Load all content files from a directory (recursively)
    pub fn load(dir: &Path) -> Result<Self, ContentError> {
        let mut builder = ContentBuilder::default();
        builder.load_dir(dir)?;
        builder.finish(Some(dir.to_path_buf()))
    }

    /// Parse content from a single TOML string
    pub fn from_toml_str(source: &str) -> Result<Self, ContentError> {
        let mut builder = ContentBuilder::default();
        builder.add_str(source, Path::new("<string>"))?;
        builder.finish(None)
    }

    pub fn enemies(&self) -> &EnemyTable {
        &self.enemies
    }

    /// Quest templates in file order
    pub fn quests(&self) -> &[QuestTemplate] {
        &self.quests
    }

    pub fn daily_quests(&self) -> &[DailyQuestTemplate] {
        &self.daily_quests
    }

    pub fn exploration(&self) -> &ExplorationTable {
        &self.exploration
    }
}

/// Accumulates content files before validation
#[derive(Debug, Default)]
struct ContentBuilder {
    enemies: HashMap<String, EnemyTemplate>,
    quests: Vec<QuestTemplate>,
    daily_quests: Vec<DailyQuestTemplate>,
    exploration: Option<ExplorationConfig>,
    encounters: Vec<EncounterConfig>,
}

impl ContentBuilder {
    fn load_dir(&mut self, dir: &Path) -> Result<(), ContentError> {
        let mut entries = std::fs::read_dir(dir)
            .map_err(|e| ContentError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ContentError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
        // Quest offer order follows file order, so make it deterministic
        entries.sort_by_key(|entry| entry.path());

        for entry in entries {
            let path = entry.path();
            if path.is_dir() {
                self.load_dir(&path)?;
            } else if path.extension().is_some_and(|ext| ext == "toml") {
                self.load_file(&path)?;
            }
        }

        Ok(())
    }

    fn load_file(&mut self, path: &Path) -> Result<(), ContentError> {
        let content = std::fs::read_to_string(path).map_err(|e| ContentError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        self.add_str(&content, path)
    }

    fn add_str(&mut self, source: &str, path: &Path) -> Result<(), ContentError> {
        let config: ContentFileConfig = toml::from_str(source).map_err(|e| ContentError::Parse {
            error: e,
            path: path.to_path_buf(),
        })?;

        tracing::debug!(
            path = %path.display(),
            enemies = config.enemies.len(),
            quests = config.quests.len(),
            "loaded content file"
        );

        for enemy in config.enemies {
            self.enemies.insert(enemy.id.clone(), enemy);
        }
        self.quests.extend(config.quests);
        self.daily_quests.extend(config.daily_quests);
        if config.exploration.is_some() {
            self.exploration = config.exploration;
        }
        self.encounters.extend(config.encounters);
        Ok(())
    }

    fn finish(self, path: Option<PathBuf>) -> Result<ContentRegistry, ContentError> {
        let invalid = |message: String| ContentError::Validation {
            message,
            path: path.clone(),
        };

        let mut seen = HashSet::new();
        for quest in &self.quests {
            if !seen.insert(&quest.id) {
                return Err(invalid(format!("duplicate quest id '{}'", quest.id)));
            }
            if quest.target_amount == 0 {
                return Err(invalid(format!("quest '{}' has target_amount 0", quest.id)));
            }
        }
        for daily in &self.daily_quests {
            if daily.amounts.is_empty() || daily.experience.is_empty() || daily.gold.is_empty() {
                return Err(invalid(format!("daily quest '{}' has no tiers", daily.name)));
            }
        }

        let enemies = EnemyTable::new(self.enemies)
            .ok_or_else(|| invalid(format!("missing fallback enemy '{}'", FALLBACK_ENEMY)))?;

        let exploration_config = self
            .exploration
            .ok_or_else(|| invalid("missing [exploration] section".to_string()))?;
        let exploration =
            ExplorationTable::from_config(exploration_config, self.encounters).map_err(invalid)?;

        for key in exploration.referenced_enemies() {
            if !enemies.contains(key) {
                tracing::warn!(key, "encounter pool references unknown enemy, it will spawn as the fallback");
            }
        }

        Ok(ContentRegistry {
            enemies,
            quests: self.quests,
            daily_quests: self.daily_quests,
            exploration,
        })
    }
}
