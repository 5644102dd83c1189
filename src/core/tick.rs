//! Per-tick orchestration.
//!
//! One logical tick per frame. Everything runs on the simulated clock
//! (`dt = dt_real × time_scale`); ordering within a tick is part of the
//! engine contract and must not be reshuffled:
//!
//! 1. advance elapsed time and drain due revivals,
//! 2. tick every room,
//! 3. passive mana regen,
//! 4. map expansion check,
//! 5. world-event roll,
//! 6. hero-wave check (resolved synchronously),
//! 7. active-research countdown.

use crate::core::constants::{
    EVENT_ROLL_RATE_PER_SECOND, EXPANSION_INTERVAL_FLOOR, EXPANSION_RESEARCH_DISCOUNT,
    MANA_REGEN_PER_SECOND, MANA_REGEN_RESEARCH_MULTIPLIER,
};
use crate::core::engine::{wave_delay, Engine};
use crate::core::game_state::{GameState, PendingRevival};
use crate::difficulty::wave_size;
use crate::dungeon::logic::tick_room;
use crate::dungeon::map::DungeonMap;
use crate::dungeon::types::room_type_by_id;
use crate::events::maybe_trigger_event;
use crate::monsters::logic::revive;
use crate::research::logic::tick_research;
use crate::waves::resolve::resolve_wave;
use crate::waves::types::HeroWave;
use rand::Rng;

pub fn advance(engine: &mut Engine, dt_real: f64) {
    let Engine {
        state,
        map,
        config,
        rng,
    } = engine;

    if !state.running || dt_real <= 0.0 {
        return;
    }
    let dt = dt_real * state.time_scale;

    // ── 1. Clock and deferred revivals ──────────────────────────
    state.elapsed += dt;
    state.log.set_time(state.elapsed);
    drain_revivals(state, map);

    // ── 2. Rooms: monsters, den spawns, trap regen ──────────────
    for room in map.rooms_mut() {
        tick_room(room, dt, &state.research, rng, &mut state.log);
    }

    // ── 3. Passive mana regen ───────────────────────────────────
    let regen_mult = if state.research.magic >= 1 {
        MANA_REGEN_RESEARCH_MULTIPLIER
    } else {
        1.0
    };
    state.resources.mana += dt * MANA_REGEN_PER_SECOND * regen_mult;

    // ── 4. Map expansion ────────────────────────────────────────
    if state.elapsed >= state.next_expansion_at {
        if let Some(hex) = map.expand_one(&state.research, state.elapsed, rng, &mut state.log) {
            if let Some(room) = map.get(hex) {
                state.log.push(format!("New room: {}", room.room_type.display_name));
            }
        }
        let discount = (1.0 - state.research.architecture as f64 * EXPANSION_RESEARCH_DISCOUNT)
            .max(EXPANSION_INTERVAL_FLOOR);
        state.next_expansion_at = state.elapsed + state.expansion_interval * discount;
    }

    // ── 5. World events ─────────────────────────────────────────
    if rng.gen_bool((EVENT_ROLL_RATE_PER_SECOND * dt).min(1.0)) {
        maybe_trigger_event(map, &state.research, state.elapsed, rng, &mut state.log);
    }

    // ── 6. Hero wave ────────────────────────────────────────────
    if state.elapsed >= state.next_wave_at {
        let difficulty = state.difficulty.estimate(map, state.floor);
        let size = wave_size(difficulty);
        let mut wave = HeroWave::compose(size, state.floor, rng);
        let outcome = resolve_wave(
            &mut wave,
            map,
            state.floor,
            &state.research,
            state.elapsed,
            rng,
            &mut state.log,
        );
        state.resources.gold += outcome.gold_earned;
        state.resources.souls += outcome.souls_earned;
        state.difficulty.record(outcome.success_metric());
        if outcome.wiped() {
            state.waves_defeated += 1;
        }
        state.pending_revivals.extend(outcome.revivals);

        state.next_wave_at = state.elapsed + wave_delay(config, rng);
        state.floor += 1;
        state.boss_counter += 1;
        if state.boss_counter >= config.boss_every_floors {
            state.boss_counter = 0;
            if let Some(hex) = map.expand_one(&state.research, state.elapsed, rng, &mut state.log)
            {
                if let (Some(room), Some(boss)) = (map.get_mut(hex), room_type_by_id("boss")) {
                    room.room_type = boss;
                }
                state.log.push("A boss has risen in a new chamber!");
            }
        }
    }

    // ── 7. Active research ──────────────────────────────────────
    tick_research(
        &mut state.current_research,
        dt,
        &mut state.research,
        &mut state.expansion_interval,
        &mut state.log,
    );
}

/// Fire every revival whose simulated-time deadline has passed. Entries
/// whose room or monster no longer resolves are silently dropped.
fn drain_revivals(state: &mut GameState, map: &mut DungeonMap) {
    if state.pending_revivals.is_empty() {
        return;
    }
    let now = state.elapsed;
    let mut due: Vec<PendingRevival> = Vec::new();
    state.pending_revivals.retain(|p| {
        if p.due_at <= now {
            due.push(*p);
            false
        } else {
            true
        }
    });
    for pending in due {
        if let Some(room) = map.get_mut(pending.room) {
            if let Some(monster) = room
                .monsters
                .iter_mut()
                .find(|m| m.id == pending.monster && !m.alive)
            {
                revive(monster);
                state.log.push("Magical resurrection: a monster returns!");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::EngineConfig;
    use uuid::Uuid;

    fn seeded(seed: u64) -> Engine {
        Engine::new(EngineConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }

    #[test]
    fn test_elapsed_advances_by_scaled_time() {
        let mut engine = seeded(1);
        engine.state.time_scale = 10.0;
        engine.tick(0.5);
        assert!((engine.state.elapsed - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_mana_regen_accrues() {
        let mut engine = seeded(2);
        engine.state.time_scale = 1.0;
        let before = engine.state.resources.mana;
        engine.tick(10.0);
        // 0.1/s unresearched.
        assert!((engine.state.resources.mana - before - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mana_regen_research_multiplier() {
        let mut engine = seeded(3);
        engine.state.time_scale = 1.0;
        engine.state.research.magic = 1;
        let before = engine.state.resources.mana;
        engine.tick(10.0);
        assert!((engine.state.resources.mana - before - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_expansion_fires_on_schedule() {
        let mut engine = seeded(4);
        engine.state.time_scale = 1.0;
        assert_eq!(engine.map.room_count(), 7);
        engine.tick(29.0);
        assert_eq!(engine.map.room_count(), 7);
        engine.tick(2.0);
        assert_eq!(engine.map.room_count(), 8);
        // Rescheduled relative to now.
        assert!(engine.state.next_expansion_at > engine.state.elapsed);
    }

    #[test]
    fn test_expansion_reschedule_honors_architecture_discount() {
        let mut engine = seeded(5);
        engine.state.time_scale = 1.0;
        engine.state.research.architecture = 3;
        engine.tick(31.0);
        let gap = engine.state.next_expansion_at - engine.state.elapsed;
        // 30 · (1 − 0.36) = 19.2
        assert!((gap - 19.2).abs() < 1e-9);
    }

    #[test]
    fn test_wave_fires_and_advances_floor() {
        let mut engine = seeded(6);
        engine.state.time_scale = 1.0;
        engine.state.next_wave_at = 5.0;
        let floor_before = engine.state.floor;
        engine.tick(6.0);
        assert_eq!(engine.state.floor, floor_before + 1);
        assert!(engine.state.next_wave_at > engine.state.elapsed);
        assert!(!engine.state.difficulty.samples().is_empty());
    }

    #[test]
    fn test_boss_floor_every_25_waves() {
        let mut engine = seeded(7);
        engine.state.time_scale = 1.0;
        for _ in 0..25 {
            engine.state.next_wave_at = engine.state.elapsed;
            engine.tick(0.1);
        }
        assert_eq!(engine.state.boss_counter, 0);
        let boss_rooms = engine
            .map
            .rooms()
            .iter()
            .filter(|r| r.room_type.id == "boss")
            .count();
        assert!(boss_rooms >= 1, "the 25th wave retypes a room to boss");
    }

    #[test]
    fn test_revival_fires_on_simulated_clock() {
        let mut engine = seeded(8);
        engine.state.time_scale = 1.0;
        let hex = engine.map.rooms()[0].hex;
        let monster_id = {
            let room = engine.map.get_mut(hex).unwrap();
            let m = &mut room.monsters[0];
            m.alive = false;
            m.hp = 0.0;
            m.id
        };
        engine.state.pending_revivals.push(PendingRevival {
            due_at: engine.state.elapsed + 5.0,
            room: hex,
            monster: monster_id,
        });

        engine.tick(4.0);
        assert!(!engine.map.get(hex).unwrap().monsters[0].alive);

        engine.tick(1.5);
        let m = &engine.map.get(hex).unwrap().monsters[0];
        assert!(m.alive);
        assert!(m.hp > 0.0);
        assert!(engine.state.pending_revivals.is_empty());
    }

    #[test]
    fn test_revival_respects_time_scale_changes() {
        // 5 simulated seconds at 50x elapse in 0.1 real seconds.
        let mut engine = seeded(9);
        engine.state.time_scale = 50.0;
        let hex = engine.map.rooms()[0].hex;
        let monster_id = {
            let room = engine.map.get_mut(hex).unwrap();
            let m = &mut room.monsters[0];
            m.alive = false;
            m.id
        };
        engine.state.pending_revivals.push(PendingRevival {
            due_at: engine.state.elapsed + 5.0,
            room: hex,
            monster: monster_id,
        });
        engine.tick(0.2);
        assert!(engine.map.get(hex).unwrap().monsters[0].alive);
    }

    #[test]
    fn test_revival_for_vanished_monster_is_dropped() {
        let mut engine = seeded(10);
        engine.state.time_scale = 1.0;
        let hex = engine.map.rooms()[0].hex;
        engine.state.pending_revivals.push(PendingRevival {
            due_at: engine.state.elapsed + 1.0,
            room: hex,
            monster: Uuid::new_v4(),
        });
        engine.tick(2.0);
        assert!(engine.state.pending_revivals.is_empty());
    }

    #[test]
    fn test_paused_engine_does_nothing() {
        let mut engine = seeded(11);
        engine.state.running = false;
        let mana = engine.state.resources.mana;
        engine.tick(100.0);
        assert_eq!(engine.state.elapsed, 0.0);
        assert_eq!(engine.state.resources.mana, mana);
        assert_eq!(engine.map.room_count(), 7);
    }

    #[test]
    fn test_research_completes_through_tick_path() {
        let mut engine = seeded(12);
        engine.state.time_scale = 1.0;
        engine.state.resources.mana = 10.0;
        assert!(engine.start_research("monsters_1"));
        assert_eq!(engine.state.resources.mana, 0.0);

        engine.tick(14.0);
        assert!(engine.state.current_research.is_some());
        engine.tick(1.5);
        assert!(engine.state.current_research.is_none());
        assert_eq!(engine.state.research.monsters, 1);
    }

    #[test]
    fn test_long_run_keeps_invariants() {
        use crate::monsters::types::Gene;
        let mut engine = seeded(13);
        engine.state.time_scale = 50.0;
        for _ in 0..600 {
            engine.tick(0.1);
        }
        // 3000 simulated seconds: expansions and waves have happened.
        assert!(engine.map.room_count() > 7);
        assert!(engine.state.floor > 1);
        for room in engine.map.rooms() {
            for m in &room.monsters {
                assert!(m.hp >= 0.0 && m.hp <= m.max_hp());
                for gene in Gene::all() {
                    assert!((1..=100).contains(&m.genome.get(gene)));
                }
            }
        }
        assert!(engine.state.resources.gold >= 0.0);
        assert!(engine.state.resources.mana >= 0.0);
    }
}
