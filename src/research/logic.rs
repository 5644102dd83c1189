//! Research job lifecycle: start, countdown, completion, one-time effects.

use crate::core::constants::EXPANSION_EFFECT_FACTOR;
use crate::core::game_state::Resources;
use crate::core::log::GameLog;
use crate::research::types::{ActiveResearch, Branch, ResearchNode, ResearchState};

/// Try to open the single research job slot on a node.
///
/// Soft-fails (no state change, explanatory log line) when the node is
/// locked, already completed, another job is running, or the cost cannot be
/// met. On success the cost is debited immediately and non-refundably.
pub fn start_research(
    node: &'static ResearchNode,
    resources: &mut Resources,
    research: &ResearchState,
    current: &mut Option<ActiveResearch>,
    log: &mut GameLog,
) -> bool {
    if !node.is_unlocked(research) {
        log.push(format!("Research {} is locked.", node.title));
        return false;
    }
    if node.is_completed(research) {
        log.push(format!("Research {} is already complete.", node.title));
        return false;
    }
    if current.is_some() {
        log.push("Another research is already in progress.");
        return false;
    }
    if !resources.can_afford(&node.cost) {
        log.push(format!("Insufficient resources for {}.", node.title));
        return false;
    }
    resources.pay(&node.cost);
    *current = Some(ActiveResearch {
        node,
        remaining: node.duration,
    });
    log.push(format!(
        "Research started: {} ({} level {})",
        node.title,
        node.branch.name(),
        node.level
    ));
    true
}

/// Advance the active job by `dt` simulated seconds; complete it at zero.
pub fn tick_research(
    current: &mut Option<ActiveResearch>,
    dt: f64,
    research: &mut ResearchState,
    expansion_interval: &mut f64,
    log: &mut GameLog,
) {
    let Some(job) = current else {
        return;
    };
    job.remaining -= dt;
    if job.remaining > 0.0 {
        return;
    }
    let node = job.node;
    *current = None;

    let level = research.level_mut(node.branch);
    *level = (*level).max(node.level);
    log.push(format!(
        "Research complete: {} ({} level {})",
        node.title,
        node.branch.name(),
        node.level
    ));
    apply_effect(node, expansion_interval, log);
}

/// The node's fixed one-time effect. Most nodes act through their branch
/// counter being consulted live; Accelerated Expansion is the one effect
/// that rewrites a stored value.
fn apply_effect(node: &ResearchNode, expansion_interval: &mut f64, log: &mut GameLog) {
    if node.branch == Branch::Architecture && node.level == 1 {
        *expansion_interval *= EXPANSION_EFFECT_FACTOR;
    }
    log.push(format!("Effect applied: {}", node.effect_summary));
}
