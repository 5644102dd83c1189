//! Trap state machine: damage rolls, avoidance learning, researched repair.

use crate::core::constants::{
    COMBO_TRAP_POWER_FACTOR, TRAP_BASE_DAMAGE, TRAP_DAMAGE_JITTER, TRAP_DAMAGE_SCALE,
    TRAP_EFFICIENCY_CAP, TRAP_LEARN_FACTOR, TRAP_LEARN_THRESHOLD, TRAP_POWER_MAX, TRAP_POWER_MIN,
    TRAP_REPAIR_PER_SECOND,
};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapKind {
    Physical,
    Magic,
    Psycho,
}

impl TrapKind {
    pub fn all() -> [TrapKind; 3] {
        [TrapKind::Physical, TrapKind::Magic, TrapKind::Psycho]
    }

    /// Damage multiplier by kind.
    pub fn multiplier(&self) -> f64 {
        match self {
            TrapKind::Physical => 1.0,
            TrapKind::Magic => 1.2,
            TrapKind::Psycho => 0.9,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TrapKind::Physical => "physical",
            TrapKind::Magic => "magic",
            TrapKind::Psycho => "psycho",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Trap {
    pub kind: TrapKind,
    /// Combo traps keep their drawn kind for the damage multiplier but carry
    /// power pre-multiplied at creation and report the `combo` category.
    pub combo: bool,
    pub power: f64,
    pub efficiency: f64,
    pub avoid_count: u32,
}

impl Trap {
    pub fn new(kind: TrapKind, power: f64) -> Self {
        Self {
            kind,
            combo: false,
            power,
            efficiency: 1.0,
            avoid_count: 0,
        }
    }

    /// Random kind, power uniform in [0.8, 1.4].
    pub fn create_random<R: Rng>(rng: &mut R) -> Self {
        let kinds = TrapKind::all();
        let kind = kinds[rng.gen_range(0..kinds.len())];
        Trap::new(kind, rng.gen_range(TRAP_POWER_MIN..TRAP_POWER_MAX))
    }

    /// Random combo trap: an ordinary draw with power ×1.8.
    pub fn create_combo<R: Rng>(rng: &mut R) -> Self {
        let mut t = Trap::create_random(rng);
        t.power *= COMBO_TRAP_POWER_FACTOR;
        t.combo = true;
        t
    }

    pub fn category_name(&self) -> &'static str {
        if self.combo {
            "combo"
        } else {
            self.kind.name()
        }
    }

    /// Damage dealt to a hero who failed to avoid:
    /// `round(5 + power·efficiency·multiplier·10 + U(0,10))`.
    pub fn trigger<R: Rng>(&self, rng: &mut R) -> i32 {
        let base = self.power * self.efficiency * self.kind.multiplier();
        (TRAP_BASE_DAMAGE + base * TRAP_DAMAGE_SCALE + rng.gen_range(0.0..TRAP_DAMAGE_JITTER))
            .round() as i32
    }

    /// Record a successful dodge. Beyond the learning threshold every dodge
    /// makes the trap permanently more efficient, up to the hard cap.
    pub fn on_avoid_attempt(&mut self) {
        self.avoid_count += 1;
        if self.avoid_count > TRAP_LEARN_THRESHOLD {
            self.efficiency = (self.efficiency * TRAP_LEARN_FACTOR).min(TRAP_EFFICIENCY_CAP);
        }
    }

    /// Research-gated continuous repair toward the efficiency cap.
    pub fn repair(&mut self, dt: f64) {
        self.efficiency = (self.efficiency + dt * TRAP_REPAIR_PER_SECOND).min(TRAP_EFFICIENCY_CAP);
    }
}
