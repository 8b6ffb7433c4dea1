use std::collections::HashMap;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Action, LOC_A, LOC_B, Location, Percept, Status,
    agent::{Agent, Entity},
};

/// Errors raised while registering entities into an environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvironmentError {
    #[error("location ({x}, {y}) is not part of this environment")]
    InvalidLocation { x: i32, y: i32 },
}

/// World-specific behavior: how percepts are derived, how actions change
/// the world, and where new entities land by default.
///
/// The generic step loop lives in [`Environment`]; concrete worlds only
/// implement these hooks. Every method here must be total over the
/// world's own location set; being asked about a location the world never
/// defined is a configuration bug, not a recoverable condition.
pub trait World {
    /// Returns the percept the given entity sees right now.
    fn percept(&self, entity: &Entity) -> Percept;

    /// Applies one action for one agent, updating world state and the
    /// agent's location and performance.
    fn execute_action(&mut self, agent: &mut Agent, action: Action);

    /// Where to place an entity added without an explicit location. Takes
    /// `&mut self` so randomized worlds can draw from an owned rng.
    fn default_location(&mut self, entity: &Entity) -> Location;

    /// Whether an explicitly requested location exists in this world.
    fn is_valid_location(&self, _location: Location) -> bool {
        true
    }

    /// Spontaneous world change applied at the end of each step. Most
    /// worlds have none.
    fn exogenous_change(&mut self) {}
}

/// Owns the entities and agents placed in a [`World`] and drives the
/// turn-based simulation loop.
///
/// Agents act in registration order. Clonable whenever the world is, so
/// the comparison harness can deep-copy whole setups.
#[derive(Debug, Clone)]
pub struct Environment<W: World> {
    world: W,
    objects: Vec<Entity>,
    agents: Vec<Agent>,
}

impl<W: World> Environment<W> {
    /// Creates an environment with no entities in it yet.
    pub fn new(world: W) -> Self {
        Environment {
            world,
            objects: Vec::new(),
            agents: Vec::new(),
        }
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    /// Agents in registration order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Non-agent entities in registration order.
    pub fn objects(&self) -> &[Entity] {
        &self.objects
    }

    /// All entities: plain objects first, then each agent's entity view.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.objects
            .iter()
            .chain(self.agents.iter().map(|agent| &agent.entity))
    }

    fn place(&mut self, entity: &Entity, location: Option<Location>) -> Result<Location, EnvironmentError> {
        match location {
            Some(location) => {
                if self.world.is_valid_location(location) {
                    Ok(location)
                } else {
                    Err(EnvironmentError::InvalidLocation {
                        x: location.x,
                        y: location.y,
                    })
                }
            }
            None => Ok(self.world.default_location(entity)),
        }
    }

    /// Adds a plain entity, placing it at `location` or at the world's
    /// default spot.
    pub fn add_entity(
        &mut self,
        mut entity: Entity,
        location: Option<Location>,
    ) -> Result<(), EnvironmentError> {
        entity.location = Some(self.place(&entity, location)?);
        self.objects.push(entity);
        Ok(())
    }

    /// Adds an agent, placing it like [`add_entity`](Self::add_entity) and
    /// resetting its score for this environment.
    pub fn add_agent(
        &mut self,
        mut agent: Agent,
        location: Option<Location>,
    ) -> Result<(), EnvironmentError> {
        agent.entity.location = Some(self.place(&agent.entity, location)?);
        agent.entity.alive = true;
        agent.performance = 0;
        tracing::debug!(agent = %agent.entity.name, location = ?agent.entity.location, "agent added");
        self.agents.push(agent);
        Ok(())
    }

    /// True once no registered agent is alive. An environment with no
    /// agents is immediately done.
    pub fn is_done(&self) -> bool {
        !self.agents.iter().any(Agent::is_alive)
    }

    /// Runs one time step: every agent perceives, then every agent
    /// decides, then every buffered action is applied, then any exogenous
    /// change happens. Percepts are all taken before any action is
    /// applied, so agents move simultaneously as far as this step's
    /// observations are concerned. Does nothing once [`is_done`](Self::is_done).
    pub fn step(&mut self) {
        if self.is_done() {
            return;
        }
        let percepts: Vec<Percept> = self
            .agents
            .iter()
            .map(|agent| self.world.percept(&agent.entity))
            .collect();
        let actions: Vec<Option<Action>> = self
            .agents
            .iter_mut()
            .zip(&percepts)
            .map(|(agent, percept)| agent.decide(*percept))
            .collect();
        for (agent, action) in self.agents.iter_mut().zip(actions) {
            // An undecided turn is ignored, same as NoOp.
            if let Some(action) = action {
                self.world.execute_action(agent, action);
            }
        }
        self.world.exogenous_change();
    }

    /// Runs at most `steps` time steps, stopping before any step once the
    /// environment is done.
    pub fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            if self.is_done() {
                return;
            }
            self.step();
        }
    }
}

/// How a [`VacuumWorld`] is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VacuumConfig {
    /// Caller-specified statuses and a fixed starting room.
    Explicit {
        status_a: Status,
        status_b: Status,
        start: Location,
    },
    /// Statuses drawn 50/50 per room and starting room drawn uniformly,
    /// all from a generator seeded here. Never global randomness.
    Random { seed: u64 },
}

/// The two-room vacuum world: rooms A and B, each clean or dirty.
///
/// Scoring: +10 for each spot of dirt sucked up, -1 for each move. Dirt
/// never reappears on its own.
#[derive(Debug, Clone)]
pub struct VacuumWorld {
    status: HashMap<Location, Status>,
    start: Option<Location>,
    rng: StdRng,
}

impl VacuumWorld {
    pub fn new(config: VacuumConfig) -> Self {
        match config {
            VacuumConfig::Explicit {
                status_a,
                status_b,
                start,
            } => VacuumWorld {
                status: HashMap::from([(LOC_A, status_a), (LOC_B, status_b)]),
                start: Some(start),
                rng: StdRng::seed_from_u64(0),
            },
            VacuumConfig::Random { seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                let draw = |rng: &mut StdRng| {
                    if rng.random_bool(0.5) {
                        Status::Dirty
                    } else {
                        Status::Clean
                    }
                };
                let status_a = draw(&mut rng);
                let status_b = draw(&mut rng);
                VacuumWorld {
                    status: HashMap::from([(LOC_A, status_a), (LOC_B, status_b)]),
                    start: None,
                    rng,
                }
            }
        }
    }

    /// Current status of one room. Panics on a location this world never
    /// defined; see [`World`].
    pub fn status(&self, location: Location) -> Status {
        self.status[&location]
    }
}

impl World for VacuumWorld {
    fn percept(&self, entity: &Entity) -> Percept {
        let location = entity.location.expect("entity perceives before being placed");
        Percept {
            location,
            status: self.status[&location],
        }
    }

    fn execute_action(&mut self, agent: &mut Agent, action: Action) {
        match action {
            Action::Right => {
                agent.entity.location = Some(LOC_B);
                agent.performance -= 1;
            }
            Action::Left => {
                agent.entity.location = Some(LOC_A);
                agent.performance -= 1;
            }
            Action::Suck => {
                let location = agent.entity.location.expect("agent acts before being placed");
                if self.status[&location] == Status::Dirty {
                    agent.performance += 10;
                    self.status.insert(location, Status::Clean);
                }
            }
            Action::NoOp => {}
        }
    }

    fn default_location(&mut self, _entity: &Entity) -> Location {
        match self.start {
            Some(start) => start,
            None => {
                if self.rng.random_bool(0.5) {
                    LOC_A
                } else {
                    LOC_B
                }
            }
        }
    }

    fn is_valid_location(&self, location: Location) -> bool {
        self.status.contains_key(&location)
    }
}
