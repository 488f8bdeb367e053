//! The coordinating controller.
//!
//! One controller owns the fleet's agent records and the target registry
//! for the current scenario. It is the single writer during a planning
//! round: assignment marks winners busy and removes claimed targets, and
//! the execution step advances each busy agent one cell per tick.

use std::collections::BTreeMap;

use quarry_core::{AgentEvent, AgentRecord, Cell, Error, Grid, Route, TargetSet};
use quarry_paths::{Search, Strategy};

use crate::assign::{self, AssignStrategy, Task};

/// One entry in the controller's append-only command history.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    AgentRegistered { id: String },
    TargetRegistered { label: char },
    TasksAssigned { strategy: AssignStrategy, count: usize },
}

/// Coordinates a fleet of agents against one grid snapshot.
#[derive(Debug)]
pub struct Controller {
    id: String,
    position: Cell,
    agents: Vec<AgentRecord>,
    targets: TargetSet,
    history: Vec<Command>,
}

impl Controller {
    /// Create a controller stationed at `position`.
    pub fn new(id: impl Into<String>, position: Cell) -> Self {
        Self {
            id: id.into(),
            position,
            agents: Vec::new(),
            targets: TargetSet::new(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// All agent records, in registration order.
    pub fn agents(&self) -> &[AgentRecord] {
        &self.agents
    }

    /// The agent with the given id, if registered.
    pub fn agent(&self, id: &str) -> Option<&AgentRecord> {
        self.agents.iter().find(|a| a.id() == id)
    }

    /// Targets still awaiting assignment.
    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    /// The command history, oldest first.
    pub fn history(&self) -> &[Command] {
        &self.history
    }

    /// Add an agent to the fleet.
    pub fn register_agent(&mut self, agent: AgentRecord) {
        self.history.push(Command::AgentRegistered {
            id: agent.id().to_string(),
        });
        self.agents.push(agent);
    }

    /// Register one target label.
    ///
    /// A duplicate label is rejected and the first registration kept.
    pub fn receive_target(&mut self, label: char, cell: Cell) -> Result<(), Error> {
        self.targets.register(label, cell)?;
        self.history.push(Command::TargetRegistered { label });
        Ok(())
    }

    /// Register a batch of reported targets (say, from a [`Scout`]
    /// scan), logging and skipping duplicates. Returns the number
    /// accepted.
    ///
    /// [`Scout`]: crate::Scout
    pub fn receive_targets(&mut self, reported: impl IntoIterator<Item = (char, Cell)>) -> usize {
        let mut accepted = 0;
        for (label, cell) in reported {
            match self.receive_target(label, cell) {
                Ok(()) => accepted += 1,
                Err(err) => log::warn!("target rejected: {err}"),
            }
        }
        accepted
    }

    /// Run one assignment round with the named strategy.
    ///
    /// Winning agents are marked busy and their targets leave the
    /// registry, so a later round never hands them out again.
    pub fn assign(&mut self, grid: &Grid, strategy: &str) -> Result<Vec<Task>, Error> {
        let strategy: AssignStrategy = strategy.parse()?;
        let tasks = assign::assign_with(grid, &self.agents, &self.targets, strategy);
        for task in &tasks {
            self.targets.remove(task.label);
            if let Some(agent) = self.agents.iter_mut().find(|a| a.id() == task.agent_id) {
                agent.assign_task(task.label, task.target);
            }
        }
        log::info!(
            "controller {}: assigned {} tasks via {strategy}",
            self.id,
            tasks.len()
        );
        self.history.push(Command::TasksAssigned {
            strategy,
            count: tasks.len(),
        });
        Ok(tasks)
    }

    /// Plan a route for every busy agent that lacks one.
    ///
    /// Unreachable targets leave an empty route installed: the agent
    /// simply never moves, and the caller may release and reassign it.
    pub fn plan_routes(&mut self, grid: &Grid, strategy: Strategy) {
        let mut search = Search::for_grid(grid);
        for agent in self.agents.iter_mut().filter(|a| a.is_busy()) {
            if agent.route().is_some() {
                continue;
            }
            let Some((_, target)) = agent.target() else {
                continue;
            };
            let route = strategy
                .find_path(&mut search, grid, agent.position(), target)
                .unwrap_or_default();
            agent.set_route(route);
            if agent.at_target() {
                agent.grab();
            }
        }
    }

    /// Advance every busy agent one cell along its route. Agents grab
    /// their target on arrival. Returns how many agents moved.
    pub fn step(&mut self) -> usize {
        let mut moved = 0;
        for agent in self.agents.iter_mut().filter(|a| a.is_busy()) {
            if agent.step().is_some() {
                moved += 1;
                if agent.at_target() {
                    agent.grab();
                }
            }
        }
        moved
    }

    /// Whether any busy agent still has route left to walk.
    pub fn any_in_transit(&self) -> bool {
        self.agents
            .iter()
            .filter(|a| a.is_busy())
            .any(|a| a.route().is_some_and(|r| r.len() > 1))
    }

    /// The planned route of every busy agent, keyed by agent id, for the
    /// conflict detector.
    pub fn routes_by_agent(&self) -> BTreeMap<String, Route> {
        self.agents
            .iter()
            .filter(|a| a.is_busy())
            .filter_map(|a| a.route().map(|r| (a.id().to_string(), r.clone())))
            .collect()
    }

    /// Release every agent that has grabbed its target, making it idle
    /// for the next round. Returns the released agent ids.
    pub fn release_arrived(&mut self) -> Vec<String> {
        let mut released = Vec::new();
        for agent in self.agents.iter_mut().filter(|a| a.is_busy()) {
            let grabbed = agent
                .history()
                .iter()
                .rev()
                .take_while(|e| !matches!(e, AgentEvent::Released { .. }))
                .any(|e| matches!(e, AgentEvent::Grabbed { .. }));
            if grabbed {
                agent.release();
                released.push(agent.id().to_string());
            }
        }
        released
    }
}
