//! adventure - A turn-based text adventure
//!
//! This library provides:
//! - GameSession: one player's game; exploring, fighting, equipment and
//!   quests, with every action reported to the quest ledger
//! - Save files: JSON snapshots of a session (`save_to_path`,
//!   `load_from_path`)
//! - Shell: the interactive menu loop used by the `adventure` binary
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use adventure::{GameSession, save_to_path};
//! use content_core::ContentRegistry;
//! use stat_core::{Character, CharacterClass};
//!
//! let content = ContentRegistry::builtin()?;
//! let mut session = GameSession::new(Character::new("Aria", CharacterClass::Warrior), content);
//! session.accept_quest(0);
//! let report = session.explore(&mut my_input, &mut rand::thread_rng())?;
//! save_to_path(&session, Path::new("saves/Aria_lvl1.sav"))?;
//! ```

mod error;
pub mod save;
pub mod session;
pub mod shell;

pub use error::{SaveError, SessionError};
pub use save::{list_saves, load_from_path, save_file_name, save_to_path, SaveGame};
pub use session::{Discovery, ExploreReport, GameSession};
pub use shell::{Prompt, Shell};
