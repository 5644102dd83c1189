//! Central mutable game state.
//!
//! Everything the tick path mutates lives here (or in the [`DungeonMap`]
//! owned alongside it by the engine). Only `resources`, `research`, and
//! `prestige_level` survive a process restart; the rest regenerates.

use crate::core::constants::{DEFAULT_TIME_SCALE, EXPANSION_INTERVAL_SECONDS, STARTING_MANA};
use crate::core::log::GameLog;
use crate::difficulty::DifficultyTracker;
use crate::dungeon::hex::Hex;
use crate::research::types::{ActiveResearch, ResearchCost, ResearchState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Spendable resources. Non-negative reals, floor-displayed as integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default)]
    pub gold: f64,
    #[serde(default)]
    pub mana: f64,
    #[serde(default)]
    pub essence: f64,
    #[serde(default)]
    pub souls: f64,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            gold: 0.0,
            mana: STARTING_MANA,
            essence: 0.0,
            souls: 0.0,
        }
    }
}

impl Resources {
    /// Affordability check; must pass before any [`Resources::pay`].
    pub fn can_afford(&self, cost: &ResearchCost) -> bool {
        self.mana >= cost.mana && self.gold >= cost.gold && self.essence >= cost.essence
    }

    /// Debit a research cost. Callers check affordability first, which keeps
    /// every balance non-negative.
    pub fn pay(&mut self, cost: &ResearchCost) {
        self.mana -= cost.mana;
        self.gold -= cost.gold;
        self.essence -= cost.essence;
    }
}

/// A scheduled monster revival on the simulated clock. Queued at death,
/// drained by the tick orchestrator once `due_at` passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingRevival {
    pub due_at: f64,
    pub room: Hex,
    pub monster: Uuid,
}

#[derive(Debug)]
pub struct GameState {
    pub resources: Resources,
    pub floor: u32,
    pub waves_defeated: u32,
    /// Waves since the last boss floor.
    pub boss_counter: u32,
    pub prestige_level: u32,
    pub research: ResearchState,
    /// The single process-wide research job slot.
    pub current_research: Option<ActiveResearch>,
    pub difficulty: DifficultyTracker,
    /// Simulated seconds since engine construction.
    pub elapsed: f64,
    pub time_scale: f64,
    pub running: bool,
    /// Simulated-seconds deadline of the next map expansion.
    pub next_expansion_at: f64,
    /// Simulated-seconds deadline of the next hero wave.
    pub next_wave_at: f64,
    /// Current expansion cadence; shortened once by the Accelerated
    /// Expansion research effect.
    pub expansion_interval: f64,
    pub pending_revivals: Vec<PendingRevival>,
    pub log: GameLog,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            resources: Resources::default(),
            floor: 1,
            waves_defeated: 0,
            boss_counter: 0,
            prestige_level: 0,
            research: ResearchState::default(),
            current_research: None,
            difficulty: DifficultyTracker::new(),
            elapsed: 0.0,
            time_scale: DEFAULT_TIME_SCALE,
            running: true,
            next_expansion_at: 0.0,
            next_wave_at: 0.0,
            expansion_interval: EXPANSION_INTERVAL_SECONDS,
            pending_revivals: Vec::new(),
            log: GameLog::new(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
