//! item_core - Items and inventories
//!
//! Items are tagged records: the kind decides which bonus field is present
//! (weapon damage, armor defense, consumable healing). The serialized form is
//! the same flat record used by content tables and save files.

mod inventory;
mod item;
pub mod types;

pub use inventory::Inventory;
pub use item::Item;
pub use types::ItemKind;
