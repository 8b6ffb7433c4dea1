use std::collections::HashMap;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Action, LOC_A, LOC_B, Location, Percept, Status,
    agent::Program,
};

/// Stateless reflex policy for the two-room vacuum world.
///
/// Dirty spot: suck. Clean at A: go right. Clean at B: go left. It never
/// idles, so on a clean world it shuttles between the rooms forever.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflexVacuumAgent;

impl Program for ReflexVacuumAgent {
    fn decide(&mut self, percept: Percept) -> Option<Action> {
        if percept.status == Status::Dirty {
            Some(Action::Suck)
        } else if percept.location == LOC_A {
            Some(Action::Right)
        } else if percept.location == LOC_B {
            Some(Action::Left)
        } else {
            None
        }
    }
}

/// Internal state code produced by [`SimpleReflexAgent::interpret_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleState {
    CleanAtA,
    DirtyAtA,
    CleanAtB,
    DirtySpot,
}

/// Reflex policy built as an explicit interpret-then-match pipeline: the
/// percept is first abstracted into a [`RuleState`], then a condition-action
/// rule fires on that state.
///
/// Behaves like [`ReflexVacuumAgent`] but, having no memory, it keeps
/// acting even once everything is clean; the caller's step budget is the
/// only thing that stops it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleReflexAgent;

impl SimpleReflexAgent {
    fn interpret_input(percept: Percept) -> RuleState {
        match (percept.location, percept.status) {
            (loc, Status::Clean) if loc == LOC_A => RuleState::CleanAtA,
            (loc, Status::Dirty) if loc == LOC_A => RuleState::DirtyAtA,
            (loc, Status::Clean) if loc == LOC_B => RuleState::CleanAtB,
            _ => RuleState::DirtySpot,
        }
    }

    fn rule_match(state: RuleState) -> Action {
        match state {
            RuleState::CleanAtA => Action::Right,
            RuleState::DirtyAtA => Action::Suck,
            RuleState::CleanAtB => Action::Left,
            RuleState::DirtySpot => Action::Suck,
        }
    }
}

impl Program for SimpleReflexAgent {
    fn decide(&mut self, percept: Percept) -> Option<Action> {
        let state = Self::interpret_input(percept);
        Some(Self::rule_match(state))
    }
}

/// Reflex policy with a memory of the last status seen at each room.
///
/// Once the model believes both A and B are clean it answers `NoOp`
/// forever. The belief is never revalidated, so an exogenously re-dirtied
/// room it does not revisit would be missed; in this world nothing
/// re-dirties, so that case stays latent.
#[derive(Debug, Clone, Default)]
pub struct ModelBasedVacuumAgent {
    model: HashMap<Location, Status>,
}

impl ModelBasedVacuumAgent {
    pub fn new() -> Self {
        Self::default()
    }

    fn believes_all_clean(&self) -> bool {
        self.model.get(&LOC_A) == Some(&Status::Clean)
            && self.model.get(&LOC_B) == Some(&Status::Clean)
    }
}

impl Program for ModelBasedVacuumAgent {
    fn decide(&mut self, percept: Percept) -> Option<Action> {
        self.model.insert(percept.location, percept.status);
        if self.believes_all_clean() {
            Some(Action::NoOp)
        } else if percept.status == Status::Dirty {
            Some(Action::Suck)
        } else if percept.location == LOC_A {
            Some(Action::Right)
        } else if percept.location == LOC_B {
            Some(Action::Left)
        } else {
            None
        }
    }
}

/// Policy that looks the *entire* percept history up in a caller-supplied
/// table. Only workable for tiny, fully enumerated domains; any history
/// the table does not list yields no decision.
#[derive(Debug, Clone)]
pub struct TableDrivenAgent {
    table: HashMap<Vec<Percept>, Action>,
    percepts: Vec<Percept>,
}

impl TableDrivenAgent {
    /// Supply the full mapping of percept sequences to actions.
    pub fn new(table: HashMap<Vec<Percept>, Action>) -> Self {
        TableDrivenAgent {
            table,
            percepts: Vec::new(),
        }
    }
}

impl Program for TableDrivenAgent {
    fn decide(&mut self, percept: Percept) -> Option<Action> {
        self.percepts.push(percept);
        self.table.get(&self.percepts).copied()
    }
}

/// Policy that ignores the percept and picks uniformly from a fixed set
/// of actions, using an owned seeded rng.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    actions: Vec<Action>,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(actions: Vec<Action>, seed: u64) -> Self {
        RandomAgent {
            actions,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Program for RandomAgent {
    fn decide(&mut self, _percept: Percept) -> Option<Action> {
        if self.actions.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..self.actions.len());
        Some(self.actions[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_percepts() -> Vec<Percept> {
        let mut percepts = Vec::new();
        for location in [LOC_A, LOC_B] {
            for status in [Status::Clean, Status::Dirty] {
                percepts.push(Percept { location, status });
            }
        }
        percepts
    }

    #[test]
    fn reflex_agent_rules() {
        let mut agent = ReflexVacuumAgent;
        let dirty_a = Percept {
            location: LOC_A,
            status: Status::Dirty,
        };
        let clean_a = Percept {
            location: LOC_A,
            status: Status::Clean,
        };
        let dirty_b = Percept {
            location: LOC_B,
            status: Status::Dirty,
        };
        let clean_b = Percept {
            location: LOC_B,
            status: Status::Clean,
        };
        assert_eq!(agent.decide(dirty_a), Some(Action::Suck));
        assert_eq!(agent.decide(dirty_b), Some(Action::Suck));
        assert_eq!(agent.decide(clean_a), Some(Action::Right));
        assert_eq!(agent.decide(clean_b), Some(Action::Left));
    }

    #[test]
    fn reflex_policies_never_idle() {
        let mut reflex = ReflexVacuumAgent;
        let mut simple = SimpleReflexAgent;
        for percept in all_percepts() {
            assert_ne!(reflex.decide(percept), Some(Action::NoOp));
            assert_ne!(simple.decide(percept), Some(Action::NoOp));
        }
    }

    #[test]
    fn simple_reflex_matches_rule_table() {
        let mut agent = SimpleReflexAgent;
        for percept in all_percepts() {
            let expected = match (percept.location, percept.status) {
                (loc, Status::Clean) if loc == LOC_A => Action::Right,
                (loc, Status::Clean) if loc == LOC_B => Action::Left,
                _ => Action::Suck,
            };
            assert_eq!(agent.decide(percept), Some(expected));
        }
    }

    #[test]
    fn simple_reflex_keeps_acting_on_clean_world() {
        let mut agent = SimpleReflexAgent;
        let clean_a = Percept {
            location: LOC_A,
            status: Status::Clean,
        };
        for _ in 0..100 {
            assert_eq!(agent.decide(clean_a), Some(Action::Right));
        }
    }

    #[test]
    fn model_based_idles_only_after_seeing_both_rooms_clean() {
        let mut agent = ModelBasedVacuumAgent::new();
        let clean_a = Percept {
            location: LOC_A,
            status: Status::Clean,
        };
        let clean_b = Percept {
            location: LOC_B,
            status: Status::Clean,
        };
        // Only A observed so far: keep moving.
        assert_eq!(agent.decide(clean_a), Some(Action::Right));
        // B observed clean too: model complete, stop.
        assert_eq!(agent.decide(clean_b), Some(Action::NoOp));
        assert_eq!(agent.decide(clean_b), Some(Action::NoOp));
    }

    #[test]
    fn model_based_sucks_before_trusting_model() {
        let mut agent = ModelBasedVacuumAgent::new();
        let dirty_a = Percept {
            location: LOC_A,
            status: Status::Dirty,
        };
        assert_eq!(agent.decide(dirty_a), Some(Action::Suck));
    }

    #[test]
    fn table_driven_follows_table_and_goes_silent_on_miss() {
        let dirty_a = Percept {
            location: LOC_A,
            status: Status::Dirty,
        };
        let clean_a = Percept {
            location: LOC_A,
            status: Status::Clean,
        };
        let mut table = HashMap::new();
        table.insert(vec![dirty_a], Action::Suck);
        table.insert(vec![dirty_a, clean_a], Action::Right);

        let mut agent = TableDrivenAgent::new(table);
        assert_eq!(agent.decide(dirty_a), Some(Action::Suck));
        assert_eq!(agent.decide(clean_a), Some(Action::Right));
        // Three-percept history was never enumerated.
        assert_eq!(agent.decide(clean_a), None);
    }

    #[test]
    fn random_agent_is_deterministic_for_a_seed() {
        let actions = vec![Action::Left, Action::Right, Action::Suck];
        let mut first = RandomAgent::new(actions.clone(), 7);
        let mut second = RandomAgent::new(actions, 7);
        let percept = Percept {
            location: LOC_A,
            status: Status::Clean,
        };
        for _ in 0..32 {
            assert_eq!(first.decide(percept), second.decide(percept));
        }
    }
}
