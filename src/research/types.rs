//! Research catalog: four branches, five levels each, linear chains.
//!
//! Nodes are immutable catalog entries; progress lives in [`ResearchState`]
//! (the only part of the tree that is persisted) plus the single process-wide
//! [`ActiveResearch`] job slot.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Monsters,
    Traps,
    Architecture,
    Magic,
}

impl Branch {
    pub fn all() -> [Branch; 4] {
        [
            Branch::Monsters,
            Branch::Traps,
            Branch::Architecture,
            Branch::Magic,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Branch::Monsters => "monsters",
            Branch::Traps => "traps",
            Branch::Architecture => "architecture",
            Branch::Magic => "magic",
        }
    }
}

/// Completed level per branch (0 = nothing completed). Non-decreasing within
/// a dungeon generation; only prestige lowers it, by floor-halving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchState {
    #[serde(default)]
    pub monsters: u32,
    #[serde(default)]
    pub traps: u32,
    #[serde(default)]
    pub architecture: u32,
    #[serde(default)]
    pub magic: u32,
}

impl ResearchState {
    pub fn level(&self, branch: Branch) -> u32 {
        match branch {
            Branch::Monsters => self.monsters,
            Branch::Traps => self.traps,
            Branch::Architecture => self.architecture,
            Branch::Magic => self.magic,
        }
    }

    pub fn level_mut(&mut self, branch: Branch) -> &mut u32 {
        match branch {
            Branch::Monsters => &mut self.monsters,
            Branch::Traps => &mut self.traps,
            Branch::Architecture => &mut self.architecture,
            Branch::Magic => &mut self.magic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResearchCost {
    pub mana: f64,
    pub gold: f64,
    pub essence: f64,
}

const fn cost(mana: f64, gold: f64, essence: f64) -> ResearchCost {
    ResearchCost { mana, gold, essence }
}

#[derive(Debug, PartialEq)]
pub struct ResearchNode {
    pub branch: Branch,
    pub level: u32,
    pub title: &'static str,
    pub desc: &'static str,
    pub cost: ResearchCost,
    /// Research duration in simulated seconds.
    pub duration: f64,
    /// Effect text for the detail view.
    pub effect_summary: &'static str,
}

impl ResearchNode {
    /// Stable identifier, e.g. `monsters_3`.
    pub fn id(&self) -> String {
        format!("{}_{}", self.branch.name(), self.level)
    }

    /// The sole prerequisite is level−1 of the same branch.
    pub fn is_unlocked(&self, state: &ResearchState) -> bool {
        state.level(self.branch) >= self.level - 1
    }

    pub fn is_completed(&self, state: &ResearchState) -> bool {
        state.level(self.branch) >= self.level
    }
}

#[rustfmt::skip]
pub const RESEARCH_NODES: [ResearchNode; 20] = [
    ResearchNode { branch: Branch::Monsters, level: 1, title: "Accelerated Breeding", desc: "+20% spawn speed in dens", cost: cost(10.0, 0.0, 0.0), duration: 15.0, effect_summary: "Den spawn interval ×0.80" },
    ResearchNode { branch: Branch::Monsters, level: 2, title: "Directed Mutations", desc: "Mutations are mostly beneficial", cost: cost(25.0, 50.0, 0.0), duration: 25.0, effect_summary: "70% of mutation deltas forced positive" },
    ResearchNode { branch: Branch::Monsters, level: 3, title: "Forced Evolution", desc: "Monsters gain passive experience faster", cost: cost(60.0, 120.0, 1.0), duration: 40.0, effect_summary: "Passive xp 0.4/s instead of 0.1/s" },
    ResearchNode { branch: Branch::Monsters, level: 4, title: "Hybridization", desc: "Dens can breed hybrid monsters", cost: cost(120.0, 300.0, 1.0), duration: 60.0, effect_summary: "12% chance a den spawn is a hybrid of two room-mates" },
    ResearchNode { branch: Branch::Monsters, level: 5, title: "Ascension", desc: "Legendary monsters may appear", cost: cost(300.0, 1000.0, 3.0), duration: 120.0, effect_summary: "Den spawns arrive at higher levels" },
    ResearchNode { branch: Branch::Traps, level: 1, title: "Complexity", desc: "+1 trap per room", cost: cost(15.0, 20.0, 0.0), duration: 15.0, effect_summary: "New trap rooms roll extra traps" },
    ResearchNode { branch: Branch::Traps, level: 2, title: "Camouflage", desc: "Traps are harder to detect", cost: cost(40.0, 80.0, 0.0), duration: 30.0, effect_summary: "Contributes to room trap counts" },
    ResearchNode { branch: Branch::Traps, level: 3, title: "Self-Repair", desc: "Traps regain efficiency over time", cost: cost(80.0, 200.0, 1.0), duration: 50.0, effect_summary: "Efficiency regenerates toward the 2.0 cap" },
    ResearchNode { branch: Branch::Traps, level: 4, title: "Auto-Combination", desc: "Combo traps appear in new rooms", cost: cost(160.0, 400.0, 2.0), duration: 80.0, effect_summary: "30% chance of a bonus combo trap per trap room" },
    ResearchNode { branch: Branch::Traps, level: 5, title: "Living Traps", desc: "Some traps behave like creatures", cost: cost(400.0, 1200.0, 4.0), duration: 140.0, effect_summary: "Trap rooms roll the largest trap counts" },
    ResearchNode { branch: Branch::Architecture, level: 1, title: "Accelerated Expansion", desc: "+25% expansion speed", cost: cost(20.0, 30.0, 0.0), duration: 18.0, effect_summary: "Expansion interval ×0.75, applied once on completion" },
    ResearchNode { branch: Branch::Architecture, level: 2, title: "Specialized Rooms", desc: "New specialized rooms appear", cost: cost(50.0, 90.0, 0.0), duration: 30.0, effect_summary: "Hero trap avoidance reduced 12%" },
    ResearchNode { branch: Branch::Architecture, level: 3, title: "Restructuring", desc: "The dungeon optimizes itself", cost: cost(100.0, 220.0, 1.0), duration: 50.0, effect_summary: "Further shortens the expansion schedule" },
    ResearchNode { branch: Branch::Architecture, level: 4, title: "Dimensions", desc: "Sub-floors grant progression bonuses", cost: cost(220.0, 500.0, 2.0), duration: 90.0, effect_summary: "Raises room-type weights and wave gold" },
    ResearchNode { branch: Branch::Architecture, level: 5, title: "Warped Reality", desc: "The dungeon bends physical law", cost: cost(600.0, 2000.0, 5.0), duration: 180.0, effect_summary: "Maximum expansion discount" },
    ResearchNode { branch: Branch::Magic, level: 1, title: "Mana Regeneration", desc: "+50% mana regeneration", cost: cost(15.0, 20.0, 0.0), duration: 15.0, effect_summary: "Passive mana regen ×1.5" },
    ResearchNode { branch: Branch::Magic, level: 2, title: "Debilitating Aura", desc: "Heroes fight at a disadvantage", cost: cost(50.0, 120.0, 1.0), duration: 30.0, effect_summary: "Precursor to resurrection and mind control" },
    ResearchNode { branch: Branch::Magic, level: 3, title: "Monster Resurrection", desc: "Dead monsters may return", cost: cost(120.0, 300.0, 2.0), duration: 60.0, effect_summary: "10% chance a death schedules a delayed revival" },
    ResearchNode { branch: Branch::Magic, level: 4, title: "Mind Control", desc: "Chance to turn a hero", cost: cost(260.0, 700.0, 3.0), duration: 100.0, effect_summary: "2% per combat exchange to disable a hero outright" },
    ResearchNode { branch: Branch::Magic, level: 5, title: "Divine Domain", desc: "Major control over the dungeon", cost: cost(700.0, 2500.0, 6.0), duration: 220.0, effect_summary: "Capstone of the magic branch" },
];

pub fn node_by_id(id: &str) -> Option<&'static ResearchNode> {
    RESEARCH_NODES.iter().find(|n| n.id() == id)
}

pub fn node_at(branch: Branch, level: u32) -> Option<&'static ResearchNode> {
    RESEARCH_NODES
        .iter()
        .find(|n| n.branch == branch && n.level == level)
}

/// The single in-flight research job. At most one exists at a time.
#[derive(Debug, Clone, Copy)]
pub struct ActiveResearch {
    pub node: &'static ResearchNode,
    /// Simulated seconds left.
    pub remaining: f64,
}

impl ActiveResearch {
    pub fn progress(&self) -> f64 {
        (1.0 - self.remaining / self.node.duration).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_four_linear_chains() {
        for branch in Branch::all() {
            for level in 1..=5 {
                assert!(
                    node_at(branch, level).is_some(),
                    "missing {} level {level}",
                    branch.name()
                );
            }
        }
        assert_eq!(RESEARCH_NODES.len(), 20);
    }

    #[test]
    fn test_node_ids_unique() {
        let mut ids: Vec<String> = RESEARCH_NODES.iter().map(|n| n.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_unlock_requires_previous_level() {
        let mut state = ResearchState::default();
        let n2 = node_at(Branch::Monsters, 2).unwrap();
        assert!(!n2.is_unlocked(&state));
        state.monsters = 1;
        assert!(n2.is_unlocked(&state));
        assert!(!n2.is_completed(&state));
        state.monsters = 2;
        assert!(n2.is_completed(&state));
    }

    #[test]
    fn test_level_one_always_unlocked() {
        let state = ResearchState::default();
        for branch in Branch::all() {
            assert!(node_at(branch, 1).unwrap().is_unlocked(&state));
        }
    }

    #[test]
    fn test_active_research_progress() {
        let node = node_at(Branch::Monsters, 1).unwrap();
        let job = ActiveResearch {
            node,
            remaining: 15.0,
        };
        assert_eq!(job.progress(), 0.0);
        let half = ActiveResearch {
            node,
            remaining: 7.5,
        };
        assert!((half.progress() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_research_state_serde_round_trip() {
        let state = ResearchState {
            monsters: 3,
            traps: 1,
            architecture: 0,
            magic: 5,
        };
        let json = serde_json::to_string(&state).unwrap();
        let back: ResearchState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_research_state_defaults_missing_fields() {
        // Older or partial saves may lack branches.
        let back: ResearchState = serde_json::from_str(r#"{"monsters": 2}"#).unwrap();
        assert_eq!(back.monsters, 2);
        assert_eq!(back.traps, 0);
        assert_eq!(back.magic, 0);
    }

    #[test]
    fn test_node_by_id() {
        assert_eq!(node_by_id("magic_3").unwrap().title, "Monster Resurrection");
        assert!(node_by_id("magic_6").is_none());
        assert!(node_by_id("cooking_1").is_none());
    }
}
