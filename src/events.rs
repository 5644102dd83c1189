//! Low-probability world-perturbation events.

use crate::core::constants::{EVENT_FIRE_CHANCE, EVENT_TRAP_SPREAD_CHANCE, EVENT_TRAP_SURGE_FACTOR};
use crate::core::log::GameLog;
use crate::dungeon::map::DungeonMap;
use crate::monsters::logic::mutate;
use crate::dungeon::types::room_type_by_id;
use crate::research::types::ResearchState;
use crate::traps::Trap;
use rand::Rng;

/// Gate and fire one world event. The tick orchestrator calls this on a
/// low-probability roll; only 5% of those calls actually perturb the world.
pub fn maybe_trigger_event<R: Rng>(
    map: &mut DungeonMap,
    research: &ResearchState,
    now: f64,
    rng: &mut R,
    log: &mut GameLog,
) {
    if !rng.gen_bool(EVENT_FIRE_CHANCE) {
        return;
    }
    match rng.gen_range(0..4) {
        0 => trap_infestation(map, rng, log),
        1 => trap_surge(map, log),
        2 => mass_mutation(map, research, rng, log),
        _ => archaeological_find(map, research, now, rng, log),
    }
}

/// Each room has a small chance to sprout an extra trap.
fn trap_infestation<R: Rng>(map: &mut DungeonMap, rng: &mut R, log: &mut GameLog) {
    for room in map.rooms_mut() {
        if rng.gen_bool(EVENT_TRAP_SPREAD_CHANCE) {
            room.traps.push(Trap::create_random(rng));
        }
    }
    log.push("Rat infestation — makeshift traps appear across the dungeon");
}

/// Every trap doubles in efficiency. The cap reasserts itself on the next
/// researched repair tick.
fn trap_surge(map: &mut DungeonMap, log: &mut GameLog) {
    for room in map.rooms_mut() {
        for trap in room.traps.iter_mut() {
            trap.efficiency *= EVENT_TRAP_SURGE_FACTOR;
        }
    }
    log.push("Magic dust — traps twice as effective");
}

/// Every monster in the dungeon mutates at once.
fn mass_mutation<R: Rng>(
    map: &mut DungeonMap,
    research: &ResearchState,
    rng: &mut R,
    log: &mut GameLog,
) {
    log.push("Mass mutation! Every monster mutates");
    for room in map.rooms_mut() {
        for monster in room.monsters.iter_mut() {
            mutate(monster, research.monsters, rng, log);
        }
    }
}

/// One extra room appears and is forced to the secret type.
fn archaeological_find<R: Rng>(
    map: &mut DungeonMap,
    research: &ResearchState,
    now: f64,
    rng: &mut R,
    log: &mut GameLog,
) {
    log.push("Archaeological find — a new special room appears");
    if let Some(hex) = map.expand_one(research, now, rng, log) {
        if let (Some(room), Some(secret)) = (map.get_mut(hex), room_type_by_id("secret")) {
            room.room_type = secret;
        }
    }
}
