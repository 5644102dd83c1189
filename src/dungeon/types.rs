//! Room-type catalog and the Room structure.

use crate::core::constants::TREASURE_GOLD_MULTIPLIER;
use crate::dungeon::hex::Hex;
use crate::monsters::types::Monster;
use crate::traps::Trap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomCategory {
    Combat,
    Trap,
    Support,
    Special,
}

/// Immutable catalog entry. Room instances hold a reference into the catalog;
/// events and boss floors may re-point that reference, never mutate the entry.
#[derive(Debug, PartialEq)]
pub struct RoomType {
    pub id: &'static str,
    pub display_name: &'static str,
    pub category: RoomCategory,
    pub base_weight: f64,
    pub color: (u8, u8, u8),
}

#[rustfmt::skip]
pub const ROOM_TYPES: [RoomType; 15] = [
    RoomType { id: "monster_den", display_name: "Monster Den", category: RoomCategory::Combat, base_weight: 0.30, color: (47, 133, 90) },
    RoomType { id: "training", display_name: "Training Hall", category: RoomCategory::Combat, base_weight: 0.10, color: (49, 130, 206) },
    RoomType { id: "armory", display_name: "Armory", category: RoomCategory::Combat, base_weight: 0.05, color: (214, 158, 46) },
    RoomType { id: "sanctuary", display_name: "Sanctuary", category: RoomCategory::Combat, base_weight: 0.03, color: (128, 90, 213) },
    RoomType { id: "trapped_corridor", display_name: "Trapped Corridor", category: RoomCategory::Trap, base_weight: 0.15, color: (229, 62, 62) },
    RoomType { id: "lab", display_name: "Laboratory", category: RoomCategory::Trap, base_weight: 0.07, color: (221, 107, 32) },
    RoomType { id: "mechanisms", display_name: "Mechanism Room", category: RoomCategory::Trap, base_weight: 0.05, color: (151, 90, 22) },
    RoomType { id: "treasure", display_name: "Treasury", category: RoomCategory::Support, base_weight: 0.08, color: (214, 158, 46) },
    RoomType { id: "library", display_name: "Library", category: RoomCategory::Support, base_weight: 0.06, color: (43, 108, 176) },
    RoomType { id: "nexus", display_name: "Nexus", category: RoomCategory::Support, base_weight: 0.04, color: (127, 156, 245) },
    RoomType { id: "kitchen", display_name: "Kitchen", category: RoomCategory::Support, base_weight: 0.03, color: (246, 173, 85) },
    RoomType { id: "boss", display_name: "Boss Chamber", category: RoomCategory::Special, base_weight: 0.02, color: (159, 122, 234) },
    RoomType { id: "portal", display_name: "Portal", category: RoomCategory::Special, base_weight: 0.02, color: (99, 179, 237) },
    RoomType { id: "secret", display_name: "Secret Room", category: RoomCategory::Special, base_weight: 0.01, color: (236, 201, 75) },
    RoomType { id: "altar", display_name: "Altar", category: RoomCategory::Special, base_weight: 0.01, color: (245, 101, 101) },
];

pub fn room_type_by_id(id: &str) -> Option<&'static RoomType> {
    ROOM_TYPES.iter().find(|t| t.id == id)
}

/// One hex cell of the dungeon. Owns its monsters (insertion order = spawn
/// order) and traps; never destroyed before prestige.
#[derive(Debug)]
pub struct Room {
    pub hex: Hex,
    pub room_type: &'static RoomType,
    pub monsters: Vec<Monster>,
    pub traps: Vec<Trap>,
    pub discovered: bool,
    /// Simulated-seconds timestamp of creation.
    pub created_at: f64,
    /// Den spawn accumulator.
    pub den_timer: f64,
    pub gold_multiplier: f64,
}

impl Room {
    pub fn new(hex: Hex, room_type: &'static RoomType, created_at: f64) -> Self {
        let gold_multiplier = if room_type.id == "treasure" {
            TREASURE_GOLD_MULTIPLIER
        } else {
            1.0
        };
        Self {
            hex,
            room_type,
            monsters: Vec::new(),
            traps: Vec::new(),
            discovered: true,
            created_at,
            den_timer: 0.0,
            gold_multiplier,
        }
    }

    pub fn is_den(&self) -> bool {
        self.room_type.id == "monster_den"
    }

    pub fn is_sanctuary(&self) -> bool {
        self.room_type.id == "sanctuary"
    }

    pub fn living_monster_count(&self) -> usize {
        self.monsters.iter().filter(|m| m.alive).count()
    }
}
