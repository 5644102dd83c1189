//! Per-frame snapshot data for rendering collaborators.
//!
//! The engine exposes plain view structs; the TUI (or any other front end)
//! lays them out without reaching into simulation internals.

use crate::core::game_state::GameState;
use crate::dungeon::hex::Hex;
use crate::dungeon::map::DungeonMap;
use crate::research::types::{Branch, ResearchCost, ResearchNode, RESEARCH_NODES};

/// One room, ready to draw.
#[derive(Debug, Clone)]
pub struct RoomView {
    pub hex: Hex,
    pub pixel: (f64, f64),
    pub name: &'static str,
    pub color: (u8, u8, u8),
    pub living_monsters: usize,
    pub trap_count: usize,
}

/// Rooms in creation order, projected to pixels.
pub fn room_views(map: &DungeonMap, hex_size: f64, origin: (f64, f64)) -> Vec<RoomView> {
    map.rooms()
        .iter()
        .map(|room| RoomView {
            hex: room.hex,
            pixel: room.hex.to_pixel(hex_size, origin),
            name: room.room_type.display_name,
            color: room.room_type.color,
            living_monsters: room.living_monster_count(),
            trap_count: room.traps.len(),
        })
        .collect()
}

pub fn center_pixel(map: &DungeonMap, hex_size: f64, origin: (f64, f64)) -> (f64, f64) {
    map.center.to_pixel(hex_size, origin)
}

/// A research node annotated with its current status.
#[derive(Debug, Clone)]
pub struct ResearchNodeView {
    pub id: String,
    pub branch: Branch,
    pub level: u32,
    pub title: &'static str,
    pub desc: &'static str,
    pub effect_summary: &'static str,
    pub cost: ResearchCost,
    pub duration: f64,
    pub unlocked: bool,
    pub completed: bool,
    pub active: bool,
    pub affordable: bool,
    /// Completion percentage of the active job, if this node is the one.
    pub progress_percent: Option<u32>,
    pub remaining_seconds: Option<f64>,
}

pub fn node_view(node: &'static ResearchNode, state: &GameState) -> ResearchNodeView {
    let active_job = state
        .current_research
        .filter(|job| std::ptr::eq(job.node, node));
    ResearchNodeView {
        id: node.id(),
        branch: node.branch,
        level: node.level,
        title: node.title,
        desc: node.desc,
        effect_summary: node.effect_summary,
        cost: node.cost,
        duration: node.duration,
        unlocked: node.is_unlocked(&state.research),
        completed: node.is_completed(&state.research),
        active: active_job.is_some(),
        affordable: state.resources.can_afford(&node.cost),
        progress_percent: active_job.map(|job| (job.progress() * 100.0).round() as u32),
        remaining_seconds: active_job.map(|job| job.remaining.max(0.0)),
    }
}

/// The full catalog, annotated. Catalog order (branch-major, level-minor).
pub fn research_views(state: &GameState) -> Vec<ResearchNodeView> {
    RESEARCH_NODES.iter().map(|n| node_view(n, state)).collect()
}

/// Edge color signal for the level N−1 → N dependency arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSignal {
    /// Both endpoints completed.
    Settled,
    /// Destination is the active job.
    InProgress,
    /// Source incomplete, or nothing notable.
    Dim,
}

#[derive(Debug, Clone)]
pub struct ResearchEdge {
    pub from: String,
    pub to: String,
    pub signal: EdgeSignal,
}

/// One edge per node above level 1, within its branch.
pub fn research_edges(state: &GameState) -> Vec<ResearchEdge> {
    RESEARCH_NODES
        .iter()
        .filter(|node| node.level > 1)
        .map(|node| {
            let completed_from = state.research.level(node.branch) >= node.level - 1;
            let completed_to = node.is_completed(&state.research);
            let active_to = state
                .current_research
                .map(|job| std::ptr::eq(job.node, node))
                .unwrap_or(false);
            let signal = if completed_from && completed_to {
                EdgeSignal::Settled
            } else if active_to {
                EdgeSignal::InProgress
            } else {
                EdgeSignal::Dim
            };
            ResearchEdge {
                from: format!("{}_{}", node.branch.name(), node.level - 1),
                to: node.id(),
                signal,
            }
        })
        .collect()
}
