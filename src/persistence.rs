//! Best-effort JSON persistence for ~/.dungeonheart/ save files.
//!
//! Only resources, research progress and the prestige level are durable.
//! The map, monsters, traps and log are intentionally regenerated fresh on
//! every load. Loading never raises: a missing or malformed record leaves
//! the defaults untouched field by field.

use crate::core::game_state::{GameState, Resources};
use crate::research::types::ResearchState;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

pub const SAVE_FILE: &str = "save.json";

/// The durable record. Every field is optional so a partial or older save
/// applies what it has and leaves the rest alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default)]
    pub resources: Option<Resources>,
    #[serde(default)]
    pub research_state: Option<ResearchState>,
    #[serde(default)]
    pub prestige_level: Option<u32>,
    /// Wall-clock stamp of the save, informational only.
    #[serde(default)]
    pub saved_at: Option<i64>,
}

impl SaveData {
    pub fn snapshot(state: &GameState) -> Self {
        Self {
            resources: Some(state.resources.clone()),
            research_state: Some(state.research),
            prestige_level: Some(state.prestige_level),
            saved_at: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// Field-by-field partial application onto live state.
    pub fn apply(self, state: &mut GameState) {
        if let Some(resources) = self.resources {
            state.resources = resources;
        }
        if let Some(research) = self.research_state {
            state.research = research;
        }
        if let Some(prestige) = self.prestige_level {
            state.prestige_level = prestige;
        }
    }
}

/// The ~/.dungeonheart/ directory, created on first use.
pub fn save_dir() -> io::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "could not determine home directory")
    })?;
    let dir = home.join(".dungeonheart");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(save_dir()?.join(filename))
}

/// Write the durable record as pretty JSON.
pub fn save_to(filename: &str, state: &GameState) -> io::Result<()> {
    let path = save_path(filename)?;
    let json = serde_json::to_string_pretty(&SaveData::snapshot(state))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

pub fn save(state: &GameState) -> io::Result<()> {
    save_to(SAVE_FILE, state)
}

/// Best-effort load-and-apply. A missing file is a silent fresh start; any
/// other failure logs a warning and the simulation continues as it was.
pub fn load_into(filename: &str, state: &mut GameState) {
    let path = match save_path(filename) {
        Ok(p) => p,
        Err(_) => {
            state.log.push("Save location unavailable; starting fresh.");
            return;
        }
    };
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return,
        Err(_) => {
            state.log.push("Save file unreadable; starting fresh.");
            return;
        }
    };
    match serde_json::from_str::<SaveData>(&raw) {
        Ok(data) => data.apply(state),
        Err(_) => state.log.push("Save file corrupt; starting fresh."),
    }
}
