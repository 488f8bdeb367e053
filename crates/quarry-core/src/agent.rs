//! Fleet agent records.

use crate::cell::{Cell, Route};

/// One entry in an agent's append-only event history.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentEvent {
    /// A task was assigned: head for `target` to collect `label`.
    TaskSet { label: char, target: Cell },
    /// The agent advanced one cell along its route.
    Moved { from: Cell, to: Cell },
    /// The agent grabbed its target.
    Grabbed { label: char, at: Cell },
    /// The agent released its target and became idle.
    Released { at: Cell },
    /// The agent was taken out of service.
    Deactivated,
}

/// A mobile agent: identity, position, current task, and history.
///
/// Records are never deleted, only marked inactive. The history is an
/// append-only audit log owned exclusively by the record.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentRecord {
    id: String,
    position: Cell,
    target: Option<(char, Cell)>,
    route: Option<Route>,
    busy: bool,
    active: bool,
    history: Vec<AgentEvent>,
}

impl AgentRecord {
    /// Create an idle, active agent at `position`.
    pub fn new(id: impl Into<String>, position: Cell) -> Self {
        Self {
            id: id.into(),
            position,
            target: None,
            route: None,
            busy: false,
            active: true,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// The current target as `(label, cell)`, if a task is assigned.
    pub fn target(&self) -> Option<(char, Cell)> {
        self.target
    }

    /// The remaining route, if one has been planned. The front cell is the
    /// agent's current position.
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Idle means active and without an outstanding task: only idle agents
    /// take part in assignment rounds.
    pub fn is_idle(&self) -> bool {
        self.active && !self.busy
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The full event history, oldest first.
    pub fn history(&self) -> &[AgentEvent] {
        &self.history
    }

    /// How many tasks this agent has ever been handed. Used by the
    /// load-balanced assignment strategy.
    pub fn task_count(&self) -> usize {
        self.history
            .iter()
            .filter(|e| matches!(e, AgentEvent::TaskSet { .. }))
            .count()
    }

    /// Hand the agent a task. Marks it busy and drops any stale route.
    pub fn assign_task(&mut self, label: char, target: Cell) {
        self.target = Some((label, target));
        self.route = None;
        self.busy = true;
        self.history.push(AgentEvent::TaskSet { label, target });
    }

    /// Install the planned route for the current task.
    ///
    /// An empty route records an unreachable target; [`step`](Self::step)
    /// will simply never move the agent.
    pub fn set_route(&mut self, route: Route) {
        self.route = Some(route);
    }

    /// Whether the agent stands on its target cell.
    pub fn at_target(&self) -> bool {
        matches!(self.target, Some((_, cell)) if cell == self.position)
    }

    /// Advance one cell along the planned route.
    ///
    /// Returns the new position, or `None` if there is no route left to
    /// walk (unreachable target, no task, or already arrived).
    pub fn step(&mut self) -> Option<Cell> {
        let route = self.route.as_mut()?;
        if route.len() < 2 {
            return None;
        }
        let from = self.position;
        route.remove(0);
        self.position = route[0];
        self.history.push(AgentEvent::Moved {
            from,
            to: self.position,
        });
        Some(self.position)
    }

    /// Record that the agent grabbed its target. Stays busy until
    /// [`release`](Self::release).
    pub fn grab(&mut self) {
        if let Some((label, _)) = self.target {
            self.history.push(AgentEvent::Grabbed {
                label,
                at: self.position,
            });
        }
    }

    /// Release the current target and become idle again.
    pub fn release(&mut self) {
        self.target = None;
        self.route = None;
        self.busy = false;
        self.history.push(AgentEvent::Released { at: self.position });
    }

    /// Take the agent out of service. The record and its history remain.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.history.push(AgentEvent::Deactivated);
    }
}
