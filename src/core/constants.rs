// Clock and scheduling
pub const DEFAULT_TIME_SCALE: f64 = 20.0;
pub const EXPANSION_INTERVAL_SECONDS: f64 = 30.0;
pub const EXPANSION_INTERVAL_FLOOR: f64 = 0.4;
pub const EXPANSION_RESEARCH_DISCOUNT: f64 = 0.12;
pub const WAVE_MIN_INTERVAL_SECONDS: f64 = 120.0;
pub const WAVE_MAX_INTERVAL_SECONDS: f64 = 300.0;
pub const BOSS_EVERY_FLOORS: u32 = 25;
pub const SPEED_STEPS: [f64; 3] = [1.0, 10.0, 50.0];

// Resources
pub const STARTING_MANA: f64 = 50.0;
pub const MANA_REGEN_PER_SECOND: f64 = 0.1;
pub const MANA_REGEN_RESEARCH_MULTIPLIER: f64 = 1.5;
pub const PRESTIGE_RESET_MANA: f64 = 20.0;
pub const PRESTIGE_ESSENCE_GRANT: f64 = 1.0;
pub const SOUL_HERO_MIN_LEVEL: u32 = 61;

// Monsters
pub const MONSTER_BASE_HP: f64 = 10.0;
pub const MONSTER_HP_GROWTH: f64 = 1.5;
pub const MONSTER_BASE_ATTACK: f64 = 5.0;
pub const MONSTER_ATTACK_GROWTH: f64 = 1.4;
pub const SANCTUARY_REGEN_PER_SECOND: f64 = 0.5;
pub const PASSIVE_XP_PER_SECOND: f64 = 0.1;
pub const PASSIVE_XP_PER_SECOND_RESEARCHED: f64 = 0.4;
pub const XP_THRESHOLD_PER_LEVEL: f64 = 10.0;
pub const LEVEL_UP_MUTATION_CHANCE: f64 = 0.20;
pub const MUTATION_TRAIT_CHANCE: f64 = 0.25;
pub const MUTATION_DELTA_MIN: i32 = -10;
pub const MUTATION_DELTA_MAX: i32 = 15;
pub const DIRECTED_MUTATION_BIAS: f64 = 0.7;
pub const GENOME_MIN: u32 = 1;
pub const GENOME_MAX: u32 = 100;
pub const GENOME_LEVEL_SCALE: f64 = 0.08;
pub const ADAPT_BONUS_STEP: f64 = 0.05;
pub const ADAPT_BONUS_CAP: f64 = 2.0;
pub const DEATH_XP_SHARE: f64 = 0.3;
pub const REVIVAL_CHANCE: f64 = 0.1;
pub const REVIVAL_DELAY_SECONDS: f64 = 5.0;
pub const REVIVAL_HP_FRACTION: f64 = 0.3;
pub const NEAR_MISS_MEMORY_CHANCE: f64 = 0.2;

// Dens and hybrids
pub const DEN_SPAWN_INTERVAL_SECONDS: f64 = 10.0;
pub const DEN_SPAWN_RESEARCH_FACTOR: f64 = 0.8;
pub const DEN_SPAWN_LEVEL_PER_BRANCH: f64 = 0.6;
pub const HYBRID_CHANCE: f64 = 0.12;
pub const HYBRID_MIN_ROOMMATES: usize = 2;
pub const HYBRID_JITTER: i32 = 5;

// Traps
pub const TRAP_POWER_MIN: f64 = 0.8;
pub const TRAP_POWER_MAX: f64 = 1.4;
pub const TRAP_BASE_DAMAGE: f64 = 5.0;
pub const TRAP_DAMAGE_SCALE: f64 = 10.0;
pub const TRAP_DAMAGE_JITTER: f64 = 10.0;
pub const TRAP_LEARN_THRESHOLD: u32 = 2;
pub const TRAP_LEARN_FACTOR: f64 = 1.12;
pub const TRAP_EFFICIENCY_CAP: f64 = 2.0;
pub const TRAP_REPAIR_PER_SECOND: f64 = 0.01;
pub const COMBO_TRAP_POWER_FACTOR: f64 = 1.8;
pub const COMBO_TRAP_CHANCE: f64 = 0.3;

// Room population
pub const COMBAT_SPAWN_RESEARCH_FACTOR: f64 = 0.2;
pub const TRAP_COUNT_RESEARCH_FACTOR: f64 = 0.3;
pub const TREASURE_GOLD_MULTIPLIER: f64 = 1.2;

// Heroes and waves
pub const HERO_BASE_HP: i32 = 20;
pub const HERO_HP_PER_LEVEL: i32 = 8;
pub const HERO_BASE_ATTACK: i32 = 5;
pub const HERO_ATTACK_PER_LEVEL: i32 = 4;
pub const HERO_MAX_LEVEL: u32 = 100;
pub const HERO_MAX_VISITS: u32 = 8;
pub const WAVE_MAX_SIZE: u32 = 20;
pub const ROOM_SAMPLE_MIN_PREFIX: usize = 6;
pub const ROOM_SAMPLE_PREFIX_FRACTION: f64 = 0.6;
pub const AVOID_REDUCTION_RESEARCHED: f64 = 0.12;
pub const MIND_CONTROL_CHANCE: f64 = 0.02;
pub const GOLD_PER_HERO_LEVEL: f64 = 10.0;
pub const GOLD_ROOM_BONUS: f64 = 0.01;
pub const GOLD_RESEARCH_BONUS: f64 = 0.02;

// Difficulty
pub const DIFFICULTY_MONSTER_WEIGHT: f64 = 0.4;
pub const DIFFICULTY_TRAP_WEIGHT: f64 = 0.3;
pub const DIFFICULTY_FLOOR_WEIGHT: f64 = 0.2;
pub const DIFFICULTY_HISTORY_WEIGHT: f64 = 0.1;
pub const DIFFICULTY_TRAP_SCALE: f64 = 20.0;
pub const DIFFICULTY_FLOOR_SCALE: f64 = 10.0;
pub const DIFFICULTY_ROLLING_WINDOW: usize = 10;
pub const DIFFICULTY_HISTORY_CAP: usize = 20;
pub const WAVE_SIZE_DIVISOR: f64 = 20.0;

// World events
pub const EVENT_ROLL_RATE_PER_SECOND: f64 = 0.01;
pub const EVENT_FIRE_CHANCE: f64 = 0.05;
pub const EVENT_TRAP_SPREAD_CHANCE: f64 = 0.02;
pub const EVENT_TRAP_SURGE_FACTOR: f64 = 2.0;

// Research
pub const RESEARCH_MAX_LEVEL: u32 = 5;
pub const PRESTIGE_RESEARCH_RETENTION: f64 = 0.5;
pub const EXPANSION_EFFECT_FACTOR: f64 = 0.75;

// Logging
pub const LOG_CAPACITY: usize = 500;
pub const LOG_VIEW_LINES: usize = 20;

// Persistence
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 5;

// Rendering defaults
pub const HEX_SIZE: f64 = 48.0;
