//! Rolling difficulty estimation.
//!
//! A single scalar blending monster strength, trap strength, floor depth and
//! recent wave history. The score sizes hero waves and feeds the UI.

use crate::core::constants::{
    DIFFICULTY_FLOOR_SCALE, DIFFICULTY_FLOOR_WEIGHT, DIFFICULTY_HISTORY_CAP,
    DIFFICULTY_HISTORY_WEIGHT, DIFFICULTY_MONSTER_WEIGHT, DIFFICULTY_ROLLING_WINDOW,
    DIFFICULTY_TRAP_SCALE, DIFFICULTY_TRAP_WEIGHT, WAVE_MAX_SIZE, WAVE_SIZE_DIVISOR,
};
use crate::dungeon::map::DungeonMap;

/// Bounded history of difficulty samples. Wave outcomes are recorded here
/// too: the success metric of each resolved wave feeds later estimates.
#[derive(Debug, Clone, Default)]
pub struct DifficultyTracker {
    history: Vec<f64>,
}

impl DifficultyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample, trimming to the retention cap.
    pub fn record(&mut self, sample: f64) {
        self.history.push(sample);
        if self.history.len() > DIFFICULTY_HISTORY_CAP {
            let excess = self.history.len() - DIFFICULTY_HISTORY_CAP;
            self.history.drain(..excess);
        }
    }

    /// Mean of up to the last 10 samples; 0 when none recorded yet.
    pub fn rolling_average(&self) -> f64 {
        let window = self.history.len().min(DIFFICULTY_ROLLING_WINDOW);
        if window == 0 {
            return 0.0;
        }
        let tail = &self.history[self.history.len() - window..];
        tail.iter().sum::<f64>() / window as f64
    }

    pub fn samples(&self) -> &[f64] {
        &self.history
    }

    /// Compute the current difficulty score, record it, and return it
    /// rounded. `D = 0.4·monsters + 0.3·traps + 0.2·floor + 0.1·history`.
    pub fn estimate(&mut self, map: &DungeonMap, floor: u32) -> f64 {
        let mut monster_pressure = 1.0;
        let living: Vec<u32> = map
            .rooms()
            .iter()
            .flat_map(|r| r.monsters.iter().filter(|m| m.alive).map(|m| m.level))
            .collect();
        if !living.is_empty() {
            let avg = living.iter().sum::<u32>() as f64 / living.len() as f64;
            monster_pressure = avg.clamp(1.0, 100.0);
        }

        let trap_powers: Vec<f64> = map
            .rooms()
            .iter()
            .flat_map(|r| r.traps.iter().map(|t| t.power))
            .collect();
        let trap_pressure = if trap_powers.is_empty() {
            1.0
        } else {
            let avg = trap_powers.iter().sum::<f64>() / trap_powers.len() as f64;
            (avg * DIFFICULTY_TRAP_SCALE).clamp(1.0, 100.0)
        };

        let floor_pressure = floor as f64 * DIFFICULTY_FLOOR_SCALE;

        let score = monster_pressure * DIFFICULTY_MONSTER_WEIGHT
            + trap_pressure * DIFFICULTY_TRAP_WEIGHT
            + floor_pressure * DIFFICULTY_FLOOR_WEIGHT
            + self.rolling_average() * DIFFICULTY_HISTORY_WEIGHT;
        self.record(score);
        score.round()
    }
}

/// Heroes per wave for a difficulty score: `clamp(1 + floor(D/20), 1, 20)`.
pub fn wave_size(difficulty: f64) -> u32 {
    ((1.0 + (difficulty / WAVE_SIZE_DIVISOR).floor()) as u32).clamp(1, WAVE_MAX_SIZE)
}
