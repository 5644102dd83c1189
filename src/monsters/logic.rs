//! Monster behavior: passive growth, mutation, adaptation, and death.
//!
//! Functions here mutate a monster (or a room's roster) in place and write
//! notable events to the game log. Randomness always comes from the caller's
//! generator so simulations stay reproducible under a fixed seed.

use crate::core::constants::{
    ADAPT_BONUS_CAP, ADAPT_BONUS_STEP, DEATH_XP_SHARE, DIRECTED_MUTATION_BIAS,
    LEVEL_UP_MUTATION_CHANCE, MUTATION_DELTA_MAX, MUTATION_DELTA_MIN, MUTATION_TRAIT_CHANCE,
    PASSIVE_XP_PER_SECOND, PASSIVE_XP_PER_SECOND_RESEARCHED, REVIVAL_CHANCE, REVIVAL_HP_FRACTION,
    SANCTUARY_REGEN_PER_SECOND, XP_THRESHOLD_PER_LEVEL,
};
use crate::core::log::GameLog;
use crate::monsters::types::{Gene, Monster, TRAIT_TAG_POOL};
use crate::waves::types::HeroClass;
use rand::Rng;

/// Spawn a level-scaled monster; high-level spawns may arrive pre-mutated.
pub fn spawn_monster<R: Rng>(
    level: u32,
    monsters_branch: u32,
    rng: &mut R,
    log: &mut GameLog,
) -> Monster {
    let mut m = Monster::create_random(level, rng);
    let premutate = (LEVEL_UP_MUTATION_CHANCE * level.max(1) as f64 / 10.0).min(1.0);
    if rng.gen_bool(premutate) {
        mutate(&mut m, monsters_branch, rng, log);
    }
    m
}

/// One simulation step for a single monster: sanctuary healing, passive
/// experience, and level-ups on crossing the `10 × level` threshold.
pub fn tick_monster<R: Rng>(
    m: &mut Monster,
    dt: f64,
    in_sanctuary: bool,
    monsters_branch: u32,
    rng: &mut R,
    log: &mut GameLog,
) {
    if !m.alive {
        return;
    }
    if in_sanctuary {
        m.hp = (m.hp + dt * SANCTUARY_REGEN_PER_SECOND).min(m.max_hp());
    }
    let rate = if monsters_branch >= 3 {
        PASSIVE_XP_PER_SECOND_RESEARCHED
    } else {
        PASSIVE_XP_PER_SECOND
    };
    m.xp += dt * rate;
    if m.xp >= XP_THRESHOLD_PER_LEVEL * m.level as f64 {
        m.xp = 0.0;
        level_up(m, monsters_branch, rng, log);
    }
}

/// +1 level, 20% mutation roll, full heal. Mutation runs before the heal so
/// a Resistance shift is reflected in the new hit points.
pub fn level_up<R: Rng>(m: &mut Monster, monsters_branch: u32, rng: &mut R, log: &mut GameLog) {
    m.level += 1;
    if rng.gen_bool(LEVEL_UP_MUTATION_CHANCE) {
        mutate(m, monsters_branch, rng, log);
    }
    log.push(format!("{} reaches level {}", m.archetype, m.level));
    m.hp = m.max_hp();
}

/// Mutate one random genome trait by a delta in [−10,15], biased positive
/// when directed mutations are researched; 25% chance to also gain a new
/// trait tag from the fixed pool.
pub fn mutate<R: Rng>(m: &mut Monster, monsters_branch: u32, rng: &mut R, log: &mut GameLog) {
    let genes = Gene::all();
    let gene = genes[rng.gen_range(0..genes.len())];
    let mut delta = rng.gen_range(MUTATION_DELTA_MIN..=MUTATION_DELTA_MAX);
    if monsters_branch >= 2 && rng.gen_bool(DIRECTED_MUTATION_BIAS) {
        delta = delta.abs();
    }
    m.genome.nudge(gene, delta);
    // A Resistance drop can shrink the hp ceiling below current hp.
    m.hp = m.hp.min(m.max_hp());
    if rng.gen_bool(MUTATION_TRAIT_CHANCE) {
        let tag = TRAIT_TAG_POOL[rng.gen_range(0..TRAIT_TAG_POOL.len())];
        if !m.trait_tags.contains(&tag) {
            m.trait_tags.push(tag);
        }
    }
    log.push(format!(
        "{} mutated ({} {}{})",
        m.archetype,
        gene.name(),
        if delta >= 0 { "+" } else { "" },
        delta
    ));
}

/// Credit a defeated (or nearly defeated) hero to the monster's memory and
/// grow its adaptation bonus against that class, capped.
pub fn record_win(m: &mut Monster, class: HeroClass, hero_level: u32) {
    *m.memory.entry(class).or_insert(0) += 1;
    let bonus = m.adapt_bonus.entry(class).or_insert(0.0);
    *bonus = (*bonus + ADAPT_BONUS_STEP).min(ADAPT_BONUS_CAP);
    m.xp += hero_level as f64 * 2.0;
}

/// Flag a monster dead and redistribute 30% of its experience evenly among
/// its living room-mates. Returns true when a delayed magical revival should
/// be scheduled by the caller (magic branch ≥3, 10% roll).
pub fn on_monster_death<R: Rng>(
    monsters: &mut [Monster],
    idx: usize,
    magic_branch: u32,
    rng: &mut R,
) -> bool {
    let share_total = monsters[idx].xp * DEATH_XP_SHARE;
    monsters[idx].alive = false;
    monsters[idx].hp = monsters[idx].hp.max(0.0);
    let heirs: Vec<usize> = monsters
        .iter()
        .enumerate()
        .filter(|(i, m)| *i != idx && m.alive)
        .map(|(i, _)| i)
        .collect();
    if !heirs.is_empty() {
        let each = share_total / heirs.len() as f64;
        for i in heirs {
            monsters[i].xp += each;
        }
    }
    magic_branch >= 3 && rng.gen_bool(REVIVAL_CHANCE)
}

/// Bring a dead monster back at 30% of its maximum hit points.
pub fn revive(m: &mut Monster) {
    m.alive = true;
    m.hp = (m.max_hp() * REVIVAL_HP_FRACTION).round();
}
