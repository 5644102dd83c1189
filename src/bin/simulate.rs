//! Headless simulator: run the engine for a stretch of simulated time and
//! print a balance report. Useful for tuning without the TUI.
//!
//! Usage: simulate [sim-hours] [seed]

use dungeonheart::core::engine::{Engine, EngineConfig};
use dungeonheart::research::types::Branch;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let sim_hours: f64 = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(1.0);
    let seed: Option<u64> = args.get(2).and_then(|a| a.parse().ok());

    let config = EngineConfig {
        seed,
        ..Default::default()
    };
    let time_scale = config.time_scale;
    let mut engine = Engine::new(config);

    // 100ms frames of real time, scaled by the engine's multiplier.
    let frame = 0.1;
    let total_real_seconds = sim_hours * 3600.0 / time_scale;
    let frames = (total_real_seconds / frame).ceil() as u64;

    println!(
        "Simulating {:.1} dungeon-hours ({} frames at x{} speed, seed {:?})...",
        sim_hours, frames, time_scale, seed
    );

    for _ in 0..frames {
        engine.tick(frame);
    }

    let state = &engine.state;
    let monsters: usize = engine.map.rooms().iter().map(|r| r.living_monster_count()).sum();
    let traps: usize = engine.map.rooms().iter().map(|r| r.traps.len()).sum();
    let max_level = engine
        .map
        .rooms()
        .iter()
        .flat_map(|r| r.monsters.iter().filter(|m| m.alive).map(|m| m.level))
        .max()
        .unwrap_or(0);

    println!("── Report ──────────────────────────────");
    println!("Simulated time     {:.0}s", state.elapsed);
    println!("Rooms              {}", engine.map.room_count());
    println!("Living monsters    {monsters} (max level {max_level})");
    println!("Traps              {traps}");
    println!("Floor              {}", state.floor);
    println!("Waves wiped        {}", state.waves_defeated);
    println!(
        "Difficulty         {:.0}",
        state.difficulty.samples().last().copied().unwrap_or(0.0)
    );
    println!(
        "Gold {:.0} | Mana {:.0} | Essence {:.0} | Souls {:.0}",
        state.resources.gold,
        state.resources.mana,
        state.resources.essence,
        state.resources.souls
    );
    for branch in Branch::all() {
        println!(
            "Research {:<13} level {}",
            branch.name(),
            state.research.level(branch)
        );
    }
    println!("── Last events ─────────────────────────");
    for line in state.log.recent(10) {
        println!("{line}");
    }
}
