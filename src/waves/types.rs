//! Hero classes and wave composition.
//!
//! Heroes are ephemeral: composed for one wave, resolved, and discarded.

use crate::core::constants::{
    HERO_ATTACK_PER_LEVEL, HERO_BASE_ATTACK, HERO_BASE_HP, HERO_HP_PER_LEVEL, HERO_MAX_LEVEL,
};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeroClass {
    Warrior,
    Rogue,
    Mage,
    Priest,
    Ranger,
}

impl HeroClass {
    pub fn all() -> [HeroClass; 5] {
        [
            HeroClass::Warrior,
            HeroClass::Rogue,
            HeroClass::Mage,
            HeroClass::Priest,
            HeroClass::Ranger,
        ]
    }

    /// Wave composition weight.
    pub fn weight(&self) -> f64 {
        match self {
            HeroClass::Warrior => 0.30,
            HeroClass::Rogue => 0.25,
            HeroClass::Mage => 0.20,
            HeroClass::Priest => 0.15,
            HeroClass::Ranger => 0.10,
        }
    }

    /// Base probability of dodging a trap. Rogues are the trap specialists.
    pub fn avoidance(&self) -> f64 {
        match self {
            HeroClass::Rogue => 0.35,
            _ => 0.05,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            HeroClass::Warrior => "Warrior",
            HeroClass::Rogue => "Rogue",
            HeroClass::Mage => "Mage",
            HeroClass::Priest => "Priest",
            HeroClass::Ranger => "Ranger",
        }
    }
}

/// Weighted draw over the class catalog. Falls back to the last entry if
/// numeric drift leaves nothing selected.
pub fn weighted_class<R: Rng>(rng: &mut R) -> HeroClass {
    let classes = HeroClass::all();
    let total: f64 = classes.iter().map(|c| c.weight()).sum();
    let mut roll = rng.gen_range(0.0..total);
    for class in classes {
        roll -= class.weight();
        if roll <= 0.0 {
            return class;
        }
    }
    classes[classes.len() - 1]
}

/// One invader, alive for a single wave.
#[derive(Debug, Clone)]
pub struct Hero {
    pub level: u32,
    pub class: HeroClass,
    pub hp: i32,
    pub attack: i32,
    pub alive: bool,
}

impl Hero {
    pub fn new(level: u32, class: HeroClass) -> Self {
        Self {
            level,
            class,
            hp: HERO_BASE_HP + level as i32 * HERO_HP_PER_LEVEL,
            attack: HERO_BASE_ATTACK + level as i32 * HERO_ATTACK_PER_LEVEL,
            alive: true,
        }
    }

    /// Trap avoidance probability, reduced when dungeon architecture
    /// research has made traps harder to read.
    pub fn avoid_chance(&self, reduction: f64) -> f64 {
        self.class.avoidance() * (1.0 - reduction)
    }
}

/// An ordered party of heroes sized by current difficulty.
#[derive(Debug, Clone)]
pub struct HeroWave {
    pub heroes: Vec<Hero>,
}

impl HeroWave {
    /// Compose a wave for the given dungeon floor: classes are drawn by
    /// weight, levels scale with depth
    /// (`clamp(1 + floor(0.5·depth) + U[0, depth/5], 1, 100)`).
    pub fn compose<R: Rng>(size: u32, floor: u32, rng: &mut R) -> Self {
        let mut heroes = Vec::with_capacity(size as usize);
        for _ in 0..size {
            let class = weighted_class(rng);
            let spread = floor / 5;
            let level = (1 + floor / 2 + rng.gen_range(0..=spread)).clamp(1, HERO_MAX_LEVEL);
            heroes.push(Hero::new(level, class));
        }
        Self { heroes }
    }

    pub fn size(&self) -> usize {
        self.heroes.len()
    }
}
