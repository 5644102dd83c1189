//! The prestige reset: discard the dungeon, keep the meta-progress.

use crate::core::constants::{PRESTIGE_ESSENCE_GRANT, PRESTIGE_RESEARCH_RETENTION, PRESTIGE_RESET_MANA};
use crate::core::game_state::GameState;
use crate::difficulty::DifficultyTracker;
use crate::dungeon::map::DungeonMap;
use crate::research::types::Branch;
use rand::Rng;

/// Perform a prestige.
///
/// Increments the prestige level and grants one essence; rebuilds the map to
/// the initial center-plus-six layout; resets gold, mana, souls, floor and
/// the waves-defeated counter; floor-halves every research branch. Prestige
/// level and essence are untouched. An in-flight research job is cancelled
/// without refund; its cost was debited non-refundably at start time.
pub fn perform_prestige<R: Rng>(state: &mut GameState, map: &mut DungeonMap, rng: &mut R) {
    state.prestige_level += 1;
    state.resources.essence += PRESTIGE_ESSENCE_GRANT;
    state.log.push(format!(
        "Prestige complete! Prestige level: {}",
        state.prestige_level
    ));

    if state.current_research.take().is_some() {
        state.log.push("In-flight research cancelled by the reset.");
    }
    // The old rooms are gone; nothing queued against them may fire.
    state.pending_revivals.clear();

    // The new dungeon is seeded while the research counters are still at
    // their pre-reset values, then the halving lands.
    *map = DungeonMap::new(&state.research, state.elapsed, rng, &mut state.log);

    state.resources.gold = 0.0;
    state.resources.mana = PRESTIGE_RESET_MANA;
    state.resources.souls = 0.0;
    state.floor = 1;
    state.waves_defeated = 0;
    state.boss_counter = 0;
    state.difficulty = DifficultyTracker::new();

    for branch in Branch::all() {
        let level = state.research.level_mut(branch);
        *level = (*level as f64 * PRESTIGE_RESEARCH_RETENTION).floor() as u32;
    }
}
