//! Per-room simulation: initial population, monster ticks, den spawns,
//! hybridization, and researched trap repair.

use crate::core::constants::{
    COMBAT_SPAWN_RESEARCH_FACTOR, COMBO_TRAP_CHANCE, DEN_SPAWN_INTERVAL_SECONDS,
    DEN_SPAWN_LEVEL_PER_BRANCH, DEN_SPAWN_RESEARCH_FACTOR, HYBRID_CHANCE, HYBRID_JITTER,
    HYBRID_MIN_ROOMMATES, TRAP_COUNT_RESEARCH_FACTOR,
};
use crate::core::log::GameLog;
use crate::dungeon::types::{Room, RoomCategory};
use crate::monsters::logic::{spawn_monster, tick_monster};
use crate::monsters::types::{Gene, Genome, Monster, ARCHETYPES};
use crate::research::types::ResearchState;
use crate::traps::Trap;
use rand::Rng;

/// Initial population rolled at room creation. Combat rooms get level-1
/// monsters, trap rooms get traps; research fattens both rolls.
pub fn populate_room<R: Rng>(
    room: &mut Room,
    research: &ResearchState,
    rng: &mut R,
    log: &mut GameLog,
) {
    match room.room_type.category {
        RoomCategory::Combat => {
            let count = 1
                + rng.gen_range(0..2)
                + (COMBAT_SPAWN_RESEARCH_FACTOR * research.monsters as f64).floor() as usize;
            for _ in 0..count {
                room.monsters.push(spawn_monster(1, research.monsters, rng, log));
            }
        }
        RoomCategory::Trap => {
            let count = 1
                + rng.gen_range(0..3)
                + (TRAP_COUNT_RESEARCH_FACTOR * research.traps as f64).floor() as usize;
            for _ in 0..count {
                room.traps.push(Trap::create_random(rng));
            }
            if research.traps >= 4 && rng.gen_bool(COMBO_TRAP_CHANCE) {
                room.traps.push(Trap::create_combo(rng));
            }
        }
        RoomCategory::Support | RoomCategory::Special => {}
    }
}

/// One simulation step for a room: tick every monster, run the den spawn
/// timer, and repair traps when the research allows it.
pub fn tick_room<R: Rng>(
    room: &mut Room,
    dt: f64,
    research: &ResearchState,
    rng: &mut R,
    log: &mut GameLog,
) {
    let in_sanctuary = room.is_sanctuary();
    for monster in room.monsters.iter_mut() {
        tick_monster(monster, dt, in_sanctuary, research.monsters, rng, log);
    }

    if room.is_den() {
        let mut interval = DEN_SPAWN_INTERVAL_SECONDS;
        if research.monsters >= 1 {
            interval *= DEN_SPAWN_RESEARCH_FACTOR;
        }
        room.den_timer += dt;
        if room.den_timer >= interval {
            room.den_timer = 0.0;
            den_spawn(room, research, rng, log);
        }
    }

    if research.traps >= 3 {
        for trap in room.traps.iter_mut() {
            trap.repair(dt);
        }
    }
}

/// A den produces either a fresh level-scaled monster or, with advanced
/// monster research, a hybrid bred from two room-mates.
fn den_spawn<R: Rng>(room: &mut Room, research: &ResearchState, rng: &mut R, log: &mut GameLog) {
    let roll_hybrid = research.monsters >= 4
        && room.monsters.len() >= HYBRID_MIN_ROOMMATES
        && rng.gen_bool(HYBRID_CHANCE);
    if roll_hybrid {
        let hybrid = breed_hybrid(&room.monsters, rng);
        room.monsters.push(hybrid);
        log.push("Hybridization: a hybrid monster appears!");
    } else {
        let level = 1 + (DEN_SPAWN_LEVEL_PER_BRANCH * research.monsters as f64).floor() as u32;
        room.monsters.push(spawn_monster(level, research.monsters, rng, log));
        log.push(format!("A monster appears in {}", room.room_type.display_name));
    }
}

/// Trait-wise average of two randomly chosen parents (each drawn
/// independently), ±5 jitter per trait, one level above the higher parent.
fn breed_hybrid<R: Rng>(roster: &[Monster], rng: &mut R) -> Monster {
    let a = &roster[rng.gen_range(0..roster.len())];
    let b = &roster[rng.gen_range(0..roster.len())];
    let mut genome = Genome::average(&a.genome, &b.genome);
    for gene in Gene::all() {
        genome.nudge(gene, rng.gen_range(-HYBRID_JITTER..=HYBRID_JITTER));
    }
    let archetype = ARCHETYPES[rng.gen_range(0..ARCHETYPES.len())];
    Monster::new(a.level.max(b.level) + 1, archetype, genome)
}
