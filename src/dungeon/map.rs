//! Room registry keyed by hex coordinate, frontier discovery, expansion.

use crate::core::log::GameLog;
use crate::dungeon::hex::Hex;
use crate::dungeon::logic::populate_room;
use crate::dungeon::types::{Room, RoomType, ROOM_TYPES};
use crate::research::types::ResearchState;
use rand::Rng;
use std::collections::{BTreeSet, HashMap};

/// The dungeon: one Room per occupied hex, keys unique by construction.
/// Rooms live in a creation-order vector (the wave resolver samples a
/// creation-order prefix, and deterministic iteration keeps seeded runs
/// reproducible); the hex index maps coordinates onto it. Cells are never
/// removed before prestige.
#[derive(Debug)]
pub struct DungeonMap {
    rooms: Vec<Room>,
    index: HashMap<Hex, usize>,
    pub center: Hex,
}

impl DungeonMap {
    /// Initial layout: the center cell (fixed to the first catalog entry, a
    /// monster den) plus its six neighbors, each independently typed.
    pub fn new<R: Rng>(
        research: &ResearchState,
        now: f64,
        rng: &mut R,
        log: &mut GameLog,
    ) -> Self {
        let mut map = Self {
            rooms: Vec::new(),
            index: HashMap::new(),
            center: Hex::ORIGIN,
        };
        map.add_room(Hex::ORIGIN, &ROOM_TYPES[0], research, now, rng, log);
        for neighbor in Hex::ORIGIN.neighbors() {
            let room_type = random_room_type(research.architecture, rng);
            map.add_room(neighbor, room_type, research, now, rng, log);
        }
        map
    }

    /// Register and populate a room. Returns false (and changes nothing) if
    /// the cell is already occupied.
    pub fn add_room<R: Rng>(
        &mut self,
        hex: Hex,
        room_type: &'static RoomType,
        research: &ResearchState,
        now: f64,
        rng: &mut R,
        log: &mut GameLog,
    ) -> bool {
        if self.index.contains_key(&hex) {
            return false;
        }
        let mut room = Room::new(hex, room_type, now);
        populate_room(&mut room, research, rng, log);
        self.index.insert(hex, self.rooms.len());
        self.rooms.push(room);
        true
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.index.contains_key(&hex)
    }

    pub fn get(&self, hex: Hex) -> Option<&Room> {
        self.index.get(&hex).map(|&i| &self.rooms[i])
    }

    pub fn get_mut(&mut self, hex: Hex) -> Option<&mut Room> {
        match self.index.get(&hex) {
            Some(&i) => self.rooms.get_mut(i),
            None => None,
        }
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Rooms in creation order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn rooms_mut(&mut self) -> &mut [Room] {
        &mut self.rooms
    }

    /// Unoccupied cells adjacent to at least one room, deduplicated. Sorted
    /// by coordinate so a seeded run expands deterministically.
    pub fn frontier(&self) -> Vec<Hex> {
        let mut free = BTreeSet::new();
        for room in &self.rooms {
            for neighbor in room.hex.neighbors() {
                if !self.index.contains_key(&neighbor) {
                    free.insert(neighbor);
                }
            }
        }
        free.into_iter().collect()
    }

    /// Claim one frontier cell uniformly at random and instantiate a freshly
    /// typed room there. None when no frontier cell exists.
    pub fn expand_one<R: Rng>(
        &mut self,
        research: &ResearchState,
        now: f64,
        rng: &mut R,
        log: &mut GameLog,
    ) -> Option<Hex> {
        let frontier = self.frontier();
        if frontier.is_empty() {
            return None;
        }
        let hex = frontier[rng.gen_range(0..frontier.len())];
        let room_type = random_room_type(research.architecture, rng);
        self.add_room(hex, room_type, research, now, rng, log);
        Some(hex)
    }
}

/// Weighted room-type draw. Base weights are scaled by the architecture
/// research level; falls back to the first catalog entry if numeric drift
/// leaves nothing selected.
pub fn random_room_type<R: Rng>(architecture_branch: u32, rng: &mut R) -> &'static RoomType {
    let scale = 1.0 + 0.02 * architecture_branch as f64;
    let total: f64 = ROOM_TYPES.iter().map(|t| t.base_weight * scale).sum();
    let mut roll = rng.gen_range(0.0..total);
    for room_type in &ROOM_TYPES {
        roll -= room_type.base_weight * scale;
        if roll <= 0.0 {
            return room_type;
        }
    }
    &ROOM_TYPES[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::types::room_type_by_id;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(21)
    }

    fn fresh_map(rng: &mut ChaCha8Rng) -> DungeonMap {
        DungeonMap::new(&ResearchState::default(), 0.0, rng, &mut GameLog::new())
    }

    #[test]
    fn test_initial_layout_is_center_plus_six() {
        let mut rng = test_rng();
        let map = fresh_map(&mut rng);
        assert_eq!(map.room_count(), 7);
        assert!(map.contains(Hex::ORIGIN));
        for neighbor in Hex::ORIGIN.neighbors() {
            assert!(map.contains(neighbor));
        }
        assert!(map.rooms().iter().all(|r| r.discovered));
        // Center is always the den.
        assert_eq!(map.get(Hex::ORIGIN).unwrap().room_type.id, "monster_den");
    }

    #[test]
    fn test_add_room_rejects_occupied_cell() {
        let mut rng = test_rng();
        let mut log = GameLog::new();
        let research = ResearchState::default();
        let mut map = fresh_map(&mut rng);
        let den = room_type_by_id("monster_den").unwrap();
        assert!(!map.add_room(Hex::ORIGIN, den, &research, 5.0, &mut rng, &mut log));
        assert_eq!(map.room_count(), 7);
    }

    #[test]
    fn test_expansion_keys_stay_unique() {
        let mut rng = test_rng();
        let mut log = GameLog::new();
        let research = ResearchState::default();
        let mut map = fresh_map(&mut rng);
        for _ in 0..100 {
            assert!(map.expand_one(&research, 0.0, &mut rng, &mut log).is_some());
        }
        assert_eq!(map.room_count(), 107);
        let mut hexes: Vec<Hex> = map.rooms().iter().map(|r| r.hex).collect();
        hexes.sort();
        hexes.dedup();
        assert_eq!(hexes.len(), 107);
    }

    #[test]
    fn test_expansion_claims_frontier_cells_only() {
        let mut rng = test_rng();
        let mut log = GameLog::new();
        let research = ResearchState::default();
        let mut map = fresh_map(&mut rng);
        for _ in 0..50 {
            let before = map.frontier();
            let hex = map.expand_one(&research, 0.0, &mut rng, &mut log).unwrap();
            assert!(before.contains(&hex));
        }
    }

    #[test]
    fn test_frontier_of_initial_map() {
        let mut rng = test_rng();
        let map = fresh_map(&mut rng);
        let frontier = map.frontier();
        // A hex flower of 7 cells has exactly 12 boundary neighbors.
        assert_eq!(frontier.len(), 12);
        for hex in &frontier {
            assert!(!map.contains(*hex));
            assert!(hex.neighbors().iter().any(|n| map.contains(*n)));
        }
    }

    #[test]
    fn test_creation_order_is_preserved() {
        let mut rng = test_rng();
        let mut log = GameLog::new();
        let research = ResearchState::default();
        let mut map = fresh_map(&mut rng);
        let mut expected: Vec<Hex> = map.rooms().iter().map(|r| r.hex).collect();
        for _ in 0..10 {
            let hex = map.expand_one(&research, 0.0, &mut rng, &mut log).unwrap();
            expected.push(hex);
        }
        let actual: Vec<Hex> = map.rooms().iter().map(|r| r.hex).collect();
        assert_eq!(actual, expected);
        // The index resolves every room back to itself.
        for (i, room) in map.rooms().iter().enumerate() {
            assert_eq!(map.get(room.hex).map(|r| r.hex), Some(expected[i]));
        }
    }

    #[test]
    fn test_weighted_draw_favors_heavy_entries() {
        let mut rng = test_rng();
        let mut dens = 0;
        let mut altars = 0;
        for _ in 0..5000 {
            let t = random_room_type(0, &mut rng);
            match t.id {
                "monster_den" => dens += 1,
                "altar" => altars += 1,
                _ => {}
            }
        }
        // 30% vs 1% base weight.
        assert!(dens > altars * 5, "dens {dens}, altars {altars}");
    }

    #[test]
    fn test_weighted_draw_covers_catalog() {
        let mut rng = test_rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..20000 {
            seen.insert(random_room_type(3, &mut rng).id);
        }
        assert_eq!(seen.len(), ROOM_TYPES.len());
    }
}
