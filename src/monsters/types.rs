//! Monster data structures: genome, archetypes, and the creature itself.

use crate::core::constants::{
    GENOME_LEVEL_SCALE, GENOME_MAX, GENOME_MIN, MONSTER_ATTACK_GROWTH, MONSTER_BASE_ATTACK,
    MONSTER_BASE_HP, MONSTER_HP_GROWTH,
};
use crate::waves::types::HeroClass;
use rand::Rng;
use std::collections::HashMap;
use uuid::Uuid;

/// Cosmetic flavor tags; no combat effect.
pub const ARCHETYPES: [&str; 5] = ["Brute", "Agile", "Arcane", "Technical", "Beast"];

/// Pool of acquirable trait tags. A monster never holds duplicates.
pub const TRAIT_TAG_POOL: [&str; 6] = [
    "Poison",
    "Flight",
    "Regeneration",
    "Camouflage",
    "Frostfire",
    "Impact",
];

/// The five heritable genome traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gene {
    Force,
    Agility,
    Intelligence,
    Resistance,
    Luck,
}

impl Gene {
    pub fn all() -> [Gene; 5] {
        [
            Gene::Force,
            Gene::Agility,
            Gene::Intelligence,
            Gene::Resistance,
            Gene::Luck,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gene::Force => "Force",
            Gene::Agility => "Agility",
            Gene::Intelligence => "Intelligence",
            Gene::Resistance => "Resistance",
            Gene::Luck => "Luck",
        }
    }

    fn index(&self) -> usize {
        match self {
            Gene::Force => 0,
            Gene::Agility => 1,
            Gene::Intelligence => 2,
            Gene::Resistance => 3,
            Gene::Luck => 4,
        }
    }
}

/// A five-trait numeric vector. Every value stays in [1,100] after any write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    values: [u32; 5],
}

impl Genome {
    /// Fresh random genome: Force/Agility/Intelligence/Resistance in 10..=60,
    /// Luck in 5..=40.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            values: [
                rng.gen_range(10..=60),
                rng.gen_range(10..=60),
                rng.gen_range(10..=60),
                rng.gen_range(10..=60),
                rng.gen_range(5..=40),
            ],
        }
    }

    pub fn from_values(values: [u32; 5]) -> Self {
        let mut g = Self { values: [1; 5] };
        for (i, v) in values.iter().enumerate() {
            g.values[i] = (*v).clamp(GENOME_MIN, GENOME_MAX);
        }
        g
    }

    pub fn get(&self, gene: Gene) -> u32 {
        self.values[gene.index()]
    }

    pub fn set(&mut self, gene: Gene, value: u32) {
        self.values[gene.index()] = value.clamp(GENOME_MIN, GENOME_MAX);
    }

    /// Shift one trait by a signed delta, clamped to the genome bounds.
    pub fn nudge(&mut self, gene: Gene, delta: i32) {
        let current = self.values[gene.index()] as i32;
        self.set(gene, (current + delta).max(0) as u32);
    }

    /// Scale every trait by a factor, rounding and clamping each value.
    pub fn scale(&mut self, factor: f64) {
        for gene in Gene::all() {
            let scaled = (self.get(gene) as f64 * factor).round().max(0.0) as u32;
            self.set(gene, scaled);
        }
    }

    /// Trait-wise average of two genomes, clamped; jitter is applied by the
    /// hybridization routine.
    pub fn average(a: &Genome, b: &Genome) -> Genome {
        let mut out = Genome { values: [1; 5] };
        for gene in Gene::all() {
            let avg = ((a.get(gene) + b.get(gene)) as f64 / 2.0).round() as u32;
            out.set(gene, avg);
        }
        out
    }
}

/// A dungeon creature. Never persisted; lives and dies with the current map.
#[derive(Debug, Clone)]
pub struct Monster {
    pub id: Uuid,
    pub level: u32,
    pub archetype: &'static str,
    pub genome: Genome,
    pub trait_tags: Vec<&'static str>,
    pub xp: f64,
    pub hp: f64,
    pub alive: bool,
    /// Wins recorded per hero class.
    pub memory: HashMap<HeroClass, u32>,
    /// Multiplicative combat bonus per hero class, built from wins.
    pub adapt_bonus: HashMap<HeroClass, f64>,
}

impl Monster {
    pub fn new(level: u32, archetype: &'static str, genome: Genome) -> Self {
        let mut m = Self {
            id: Uuid::new_v4(),
            level: level.max(1),
            archetype,
            genome,
            trait_tags: Vec::new(),
            xp: 0.0,
            hp: 0.0,
            alive: true,
            memory: HashMap::new(),
            adapt_bonus: HashMap::new(),
        };
        m.hp = m.max_hp();
        m
    }

    /// `round(10 · 1.5^(level−1) · (1 + resistance/100))`
    pub fn max_hp(&self) -> f64 {
        (MONSTER_BASE_HP
            * MONSTER_HP_GROWTH.powi(self.level as i32 - 1)
            * (1.0 + self.genome.get(Gene::Resistance) as f64 / 100.0))
            .round()
    }

    /// `round(5 · 1.4^(level−1) · (1 + force/100))`
    pub fn attack_power(&self) -> f64 {
        (MONSTER_BASE_ATTACK
            * MONSTER_ATTACK_GROWTH.powi(self.level as i32 - 1)
            * (1.0 + self.genome.get(Gene::Force) as f64 / 100.0))
            .round()
    }

    /// Adaptation bonus against a hero class (0 when never fought).
    pub fn adaptation_against(&self, class: HeroClass) -> f64 {
        self.adapt_bonus.get(&class).copied().unwrap_or(0.0)
    }

    /// Random level-scaled monster. Genome traits grow `1 + (level−1)·0.08`
    /// before clamping; higher-level spawns may arrive pre-mutated.
    pub fn create_random<R: Rng>(level: u32, rng: &mut R) -> Self {
        let archetype = ARCHETYPES[rng.gen_range(0..ARCHETYPES.len())];
        let mut genome = Genome::random(rng);
        genome.scale(1.0 + (level.max(1) - 1) as f64 * GENOME_LEVEL_SCALE);
        Monster::new(level, archetype, genome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_random_genome_ranges() {
        let mut rng = test_rng();
        for _ in 0..200 {
            let g = Genome::random(&mut rng);
            for gene in [Gene::Force, Gene::Agility, Gene::Intelligence, Gene::Resistance] {
                assert!((10..=60).contains(&g.get(gene)), "{:?}", gene);
            }
            assert!((5..=40).contains(&g.get(Gene::Luck)));
        }
    }

    #[test]
    fn test_genome_clamps_on_write() {
        let mut g = Genome::from_values([50, 50, 50, 50, 50]);
        g.set(Gene::Force, 500);
        assert_eq!(g.get(Gene::Force), 100);
        g.set(Gene::Force, 0);
        assert_eq!(g.get(Gene::Force), 1);
        g.nudge(Gene::Luck, -200);
        assert_eq!(g.get(Gene::Luck), 1);
        g.nudge(Gene::Luck, 500);
        assert_eq!(g.get(Gene::Luck), 100);
    }

    #[test]
    fn test_genome_average() {
        let a = Genome::from_values([10, 20, 30, 40, 50]);
        let b = Genome::from_values([20, 40, 60, 80, 100]);
        let avg = Genome::average(&a, &b);
        assert_eq!(avg.get(Gene::Force), 15);
        assert_eq!(avg.get(Gene::Agility), 30);
        assert_eq!(avg.get(Gene::Intelligence), 45);
        assert_eq!(avg.get(Gene::Resistance), 60);
        assert_eq!(avg.get(Gene::Luck), 75);
    }

    #[test]
    fn test_max_hp_formula() {
        let genome = Genome::from_values([50, 50, 50, 50, 50]);
        let m = Monster::new(1, "Brute", genome.clone());
        // 10 · 1.5^0 · 1.5 = 15
        assert_eq!(m.max_hp(), 15.0);

        let m3 = Monster::new(3, "Brute", genome);
        // 10 · 2.25 · 1.5 = 33.75 → 34
        assert_eq!(m3.max_hp(), 34.0);
    }

    #[test]
    fn test_attack_power_formula() {
        let genome = Genome::from_values([100, 50, 50, 50, 50]);
        let m = Monster::new(2, "Agile", genome);
        // 5 · 1.4 · 2.0 = 14
        assert_eq!(m.attack_power(), 14.0);
    }

    #[test]
    fn test_new_monster_starts_at_full_hp() {
        let mut rng = test_rng();
        for _ in 0..20 {
            let m = Monster::create_random(rng.gen_range(1..8), &mut rng);
            assert!(m.alive);
            assert_eq!(m.hp, m.max_hp());
            assert!(m.memory.is_empty());
        }
    }

    #[test]
    fn test_create_random_genome_in_bounds() {
        let mut rng = test_rng();
        for _ in 0..100 {
            let m = Monster::create_random(50, &mut rng);
            for gene in Gene::all() {
                let v = m.genome.get(gene);
                assert!((1..=100).contains(&v));
            }
        }
    }

    #[test]
    fn test_monster_ids_unique() {
        let mut rng = test_rng();
        let a = Monster::create_random(1, &mut rng);
        let b = Monster::create_random(1, &mut rng);
        assert_ne!(a.id, b.id);
    }
}
