//! The engine: one explicit value owning the whole simulation.
//!
//! No ambient singleton: tests build as many independent engines as they
//! like. The engine owns the RNG so a seeded config yields a reproducible
//! run.

use crate::core::constants::{
    BOSS_EVERY_FLOORS, DEFAULT_TIME_SCALE, EXPANSION_INTERVAL_SECONDS, HEX_SIZE, SPEED_STEPS,
    WAVE_MAX_INTERVAL_SECONDS, WAVE_MIN_INTERVAL_SECONDS,
};
use crate::core::game_state::GameState;
use crate::dungeon::map::DungeonMap;
use crate::prestige::perform_prestige;
use crate::render::{node_view, ResearchNodeView};
use crate::research::logic::start_research;
use crate::research::types::node_by_id;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub time_scale: f64,
    pub expansion_interval: f64,
    pub wave_min_interval: f64,
    pub wave_max_interval: f64,
    pub boss_every_floors: u32,
    pub hex_size: f64,
    /// Seed for the engine RNG; None draws from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            expansion_interval: EXPANSION_INTERVAL_SECONDS,
            wave_min_interval: WAVE_MIN_INTERVAL_SECONDS,
            wave_max_interval: WAVE_MAX_INTERVAL_SECONDS,
            boss_every_floors: BOSS_EVERY_FLOORS,
            hex_size: HEX_SIZE,
            seed: None,
        }
    }
}

#[derive(Debug)]
pub struct Engine {
    pub state: GameState,
    pub map: DungeonMap,
    pub config: EngineConfig,
    pub(crate) rng: StdRng,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut state = GameState::new();
        state.time_scale = config.time_scale;
        state.expansion_interval = config.expansion_interval;
        let map = DungeonMap::new(&state.research, 0.0, &mut rng, &mut state.log);

        state.next_expansion_at = state.expansion_interval;
        state.next_wave_at = wave_delay(&config, &mut rng);
        state.log.push("Dungeon initialized.");

        Self {
            state,
            map,
            config,
            rng,
        }
    }

    /// Advance the simulation by `dt_real` wall seconds (scaled internally).
    pub fn tick(&mut self, dt_real: f64) {
        crate::core::tick::advance(self, dt_real);
    }

    /// Cycle the time multiplier through the fixed speed steps.
    pub fn cycle_speed(&mut self) -> f64 {
        let next = if self.state.time_scale == SPEED_STEPS[0] {
            SPEED_STEPS[1]
        } else if self.state.time_scale == SPEED_STEPS[1] {
            SPEED_STEPS[2]
        } else {
            SPEED_STEPS[0]
        };
        self.state.time_scale = next;
        self.state.log.push(format!("Speed set to x{}", next));
        next
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.state.running = !self.state.running;
        self.state.running
    }

    /// Full soft reset; guarded by user confirmation upstream.
    pub fn prestige(&mut self) {
        perform_prestige(&mut self.state, &mut self.map, &mut self.rng);
    }

    /// Start researching a node by id. Soft-fails with a log line.
    pub fn start_research(&mut self, node_id: &str) -> bool {
        let Some(node) = node_by_id(node_id) else {
            self.state.log.push(format!("Unknown research node: {node_id}"));
            return false;
        };
        start_research(
            node,
            &mut self.state.resources,
            &self.state.research,
            &mut self.state.current_research,
            &mut self.state.log,
        )
    }

    /// Read-only detail view of a research node.
    pub fn node_details(&self, node_id: &str) -> Option<ResearchNodeView> {
        node_by_id(node_id).map(|node| node_view(node, &self.state))
    }
}

/// Delay until the next hero wave, in simulated seconds.
pub(crate) fn wave_delay<R: Rng>(config: &EngineConfig, rng: &mut R) -> f64 {
    if config.wave_max_interval > config.wave_min_interval {
        rng.gen_range(config.wave_min_interval..config.wave_max_interval)
    } else {
        config.wave_min_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> Engine {
        Engine::new(EngineConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }

    #[test]
    fn test_fresh_engine_has_seven_rooms() {
        let engine = seeded(1);
        assert_eq!(engine.map.room_count(), 7);
        assert!(engine.map.rooms().iter().all(|r| r.discovered));
        assert_eq!(engine.state.floor, 1);
    }

    #[test]
    fn test_wave_and_expansion_scheduled() {
        let engine = seeded(2);
        assert_eq!(engine.state.next_expansion_at, 30.0);
        let at = engine.state.next_wave_at;
        assert!((120.0..300.0).contains(&at), "wave at {at}");
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = seeded(99);
        let b = seeded(99);
        let hexes_a: Vec<_> = a.map.rooms().iter().map(|r| r.hex).collect();
        let hexes_b: Vec<_> = b.map.rooms().iter().map(|r| r.hex).collect();
        assert_eq!(hexes_a, hexes_b);
        let types_a: Vec<&str> = a.map.rooms().iter().map(|r| r.room_type.id).collect();
        let types_b: Vec<&str> = b.map.rooms().iter().map(|r| r.room_type.id).collect();
        assert_eq!(types_a, types_b);
        assert_eq!(a.state.next_wave_at, b.state.next_wave_at);
    }

    #[test]
    fn test_speed_cycle_steps() {
        let mut engine = seeded(3);
        // Default 20 is outside the steps; the first press lands on 1x.
        assert_eq!(engine.cycle_speed(), 1.0);
        assert_eq!(engine.cycle_speed(), 10.0);
        assert_eq!(engine.cycle_speed(), 50.0);
        assert_eq!(engine.cycle_speed(), 1.0);
    }

    #[test]
    fn test_toggle_pause() {
        let mut engine = seeded(4);
        assert!(!engine.toggle_pause());
        let elapsed = engine.state.elapsed;
        engine.tick(1.0);
        assert_eq!(engine.state.elapsed, elapsed);
        assert!(engine.toggle_pause());
        engine.tick(1.0);
        assert!(engine.state.elapsed > elapsed);
    }

    #[test]
    fn test_start_research_by_id() {
        let mut engine = seeded(5);
        assert!(engine.start_research("monsters_1"));
        assert!(engine.state.current_research.is_some());
        assert!(!engine.start_research("monsters_2"));
        assert!(!engine.start_research("no_such_node"));
    }

    #[test]
    fn test_node_details_read_only() {
        let engine = seeded(6);
        let view = engine.node_details("magic_1").unwrap();
        assert_eq!(view.title, "Mana Regeneration");
        assert!(view.unlocked);
        assert!(!view.completed);
        assert!(engine.node_details("bogus").is_none());
    }
}
