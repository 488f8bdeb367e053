//! Greedy assignment strategies: nearest, round-robin, load-balanced.

use quarry_core::{AgentRecord, TargetSet};
use quarry_paths::manhattan;

use super::Task;

/// For each target in label order, pick the idle agent at minimum
/// Manhattan distance; both leave further consideration. Ties go to the
/// earliest-registered agent, keeping rounds deterministic.
pub(super) fn nearest(idle: &[&AgentRecord], targets: &TargetSet) -> Vec<Task> {
    let mut pool: Vec<&AgentRecord> = idle.to_vec();
    let mut tasks = Vec::new();

    for (label, target) in targets.iter() {
        // min_by_key keeps the first minimum, so ties are stable.
        let Some((best, _)) = pool
            .iter()
            .enumerate()
            .min_by_key(|(_, a)| manhattan(a.position(), target))
        else {
            break;
        };
        let agent = pool.remove(best);
        tasks.push(Task {
            agent_id: agent.id().to_string(),
            label,
            target,
        });
    }
    tasks
}

/// Hand targets to idle agents in registration order, ignoring distance
/// entirely. Stops when the smaller side runs out.
pub(super) fn round_robin(idle: &[&AgentRecord], targets: &TargetSet) -> Vec<Task> {
    idle.iter()
        .zip(targets.iter())
        .map(|(agent, (label, target))| Task {
            agent_id: agent.id().to_string(),
            label,
            target,
        })
        .collect()
}

/// For each target, pick the idle agent with the fewest tasks over its
/// lifetime (the agent's audit history seeds the count), breaking ties
/// toward the earliest-registered agent.
pub(super) fn load_balanced(idle: &[&AgentRecord], targets: &TargetSet) -> Vec<Task> {
    let mut pool: Vec<(&AgentRecord, usize)> =
        idle.iter().map(|a| (*a, a.task_count())).collect();
    let mut tasks = Vec::new();

    for (label, target) in targets.iter() {
        let Some((best, _)) = pool.iter().enumerate().min_by_key(|(_, (_, count))| *count)
        else {
            break;
        };
        let (agent, _) = pool.remove(best);
        tasks.push(Task {
            agent_id: agent.id().to_string(),
            label,
            target,
        });
    }
    tasks
}
