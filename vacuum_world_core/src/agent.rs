use std::fmt;

use crate::{Action, Location, Percept};

/// Anything that can be placed in an environment: a name for display, a
/// liveness flag, and a location once placed.
///
/// `alive` is only consulted by the environment's done-check; plain
/// objects are created not-alive, agents alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub alive: bool,
    pub location: Option<Location>,
}

impl Entity {
    /// Creates an unplaced, not-alive entity (dirt, walls, furniture...).
    pub fn new(name: impl Into<String>) -> Self {
        Entity {
            name: name.into(),
            alive: false,
            location: None,
        }
    }

    /// Returns true iff this entity is tracked as alive.
    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

/// A decision program: maps the current percept to an action.
///
/// `&mut self` lets stateful policies (model-based, table-driven) keep
/// private memory across calls. Programs see only the percept, never the
/// environment, so all world effects flow back through
/// [`World::execute_action`](crate::environment::World::execute_action).
///
/// Returning `None` means "no decision"; the environment ignores the turn.
pub trait Program: fmt::Debug + ProgramClone {
    fn decide(&mut self, percept: Percept) -> Option<Action>;
}

/// Object-safe clone support so boxed programs (and therefore whole
/// environments) can be deep-copied by the comparison harness.
pub trait ProgramClone {
    fn clone_box(&self) -> Box<dyn Program>;
}

impl<P> ProgramClone for P
where
    P: Program + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn Program> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Program> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// An entity with a decision program and a performance score.
///
/// `performance` is mutated only by the environment while executing the
/// agent's actions; policies themselves never touch it.
#[derive(Debug, Clone)]
pub struct Agent {
    pub entity: Entity,
    pub performance: i64,
    program: Box<dyn Program>,
}

impl Agent {
    /// Creates an alive, unplaced agent running the given program.
    pub fn new(name: impl Into<String>, program: Box<dyn Program>) -> Self {
        Agent {
            entity: Entity {
                name: name.into(),
                alive: true,
                location: None,
            },
            performance: 0,
            program,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.entity.is_alive()
    }

    /// Runs the agent's program on one percept.
    pub fn decide(&mut self, percept: Percept) -> Option<Action> {
        self.program.decide(percept)
    }
}

/// Decorator that logs every percept/action pair of the wrapped program
/// without changing what it decides.
#[derive(Debug, Clone)]
pub struct TraceAgent {
    name: String,
    inner: Box<dyn Program>,
}

impl TraceAgent {
    pub fn new(name: impl Into<String>, inner: Box<dyn Program>) -> Self {
        TraceAgent {
            name: name.into(),
            inner,
        }
    }
}

impl Program for TraceAgent {
    fn decide(&mut self, percept: Percept) -> Option<Action> {
        let action = self.inner.decide(percept);
        tracing::info!(
            agent = %self.name,
            percept = ?percept,
            action = ?action,
            "agent decision"
        );
        action
    }
}
