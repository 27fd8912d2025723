//! Save slots
//!
//! Three JSON save slots on disk. Loads check the version tag and reject
//! incompatible saves with a typed error instead of crashing mid-game.

use crate::core::calendar;
use crate::core::error::{Result, SimError};
use crate::state::{WorldState, SAVE_VERSION};
use std::fs;
use std::path::{Path, PathBuf};

/// Number of available save slots.
pub const SLOTS: u8 = 3;

/// What occupies a slot, for menu display.
#[derive(Debug, Clone)]
pub struct SlotInfo {
    pub slot: u8,
    pub empty: bool,
    pub player_name: String,
    pub party: String,
    pub date: String,
    pub turn: u32,
}

/// A directory of save slots.
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    /// Open (creating if needed) a save directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn slot_path(&self, slot: u8) -> Result<PathBuf> {
        if slot == 0 || slot > SLOTS {
            return Err(SimError::UnknownSlot(slot));
        }
        Ok(self.dir.join(format!("slot{slot}.json")))
    }

    /// Write the game to a slot, overwriting whatever was there.
    pub fn save(&self, slot: u8, state: &WorldState) -> Result<()> {
        let path = self.slot_path(slot)?;
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&path, json)?;
        tracing::debug!(slot, path = %path.display(), "game saved");
        Ok(())
    }

    /// Load the game from a slot.
    ///
    /// Saves written by an incompatible major version are rejected with
    /// [`SimError::SaveVersion`] rather than deserialized on hope.
    pub fn load(&self, slot: u8) -> Result<WorldState> {
        let path = self.slot_path(slot)?;
        if !path.exists() {
            return Err(SimError::EmptySlot(slot));
        }
        let raw = fs::read_to_string(&path)?;
        let state: WorldState = serde_json::from_str(&raw)?;

        if major_version(&state.version) != major_version(SAVE_VERSION) {
            return Err(SimError::SaveVersion {
                found: state.version,
                expected: SAVE_VERSION.to_string(),
            });
        }
        Ok(state)
    }

    /// Remove a slot's save, if any.
    pub fn delete(&self, slot: u8) -> Result<()> {
        let path = self.slot_path(slot)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Describe every slot for a load menu. Unreadable files show as
    /// empty rather than erroring the menu.
    pub fn slots(&self) -> Vec<SlotInfo> {
        (1..=SLOTS)
            .map(|slot| match self.load(slot) {
                Ok(state) => SlotInfo {
                    slot,
                    empty: false,
                    player_name: state.player_name.clone(),
                    party: state.player_party.to_string(),
                    date: calendar::format_date(state.turn),
                    turn: state.turn,
                },
                Err(_) => SlotInfo {
                    slot,
                    empty: true,
                    player_name: String::new(),
                    party: String::new(),
                    date: String::new(),
                    turn: 0,
                },
            })
            .collect()
    }

    /// True if any slot holds a loadable save.
    pub fn has_any(&self) -> bool {
        self.slots().iter().any(|s| !s.empty)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn major_version(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}
