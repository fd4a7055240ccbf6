//! Interfaces the checking algorithms are written against.
//!
//! The classifier, the fixpoints and the counterexample builder never touch
//! variable encodings: they only combine opaque predicates, compute images and
//! sample concrete states. [`SymbolicModel`][crate::model::SymbolicModel]
//! implements these traits on top of the BDD manager; tests also use small
//! explicit-state implementations.

use std::fmt;

use crate::error::Result;
use crate::formula::Node;

/// Boolean lattice of state and input predicates.
pub trait PredicateAlgebra {
    type Pred: Copy + Eq + fmt::Debug;

    fn empty(&self) -> Self::Pred;
    fn full(&self) -> Self::Pred;
    fn union(&self, a: Self::Pred, b: Self::Pred) -> Self::Pred;
    fn intersect(&self, a: Self::Pred, b: Self::Pred) -> Self::Pred;
    fn complement(&self, a: Self::Pred) -> Self::Pred;

    fn subtract(&self, a: Self::Pred, b: Self::Pred) -> Self::Pred {
        self.intersect(a, self.complement(b))
    }

    fn is_empty(&self, a: Self::Pred) -> bool {
        a == self.empty()
    }

    fn is_subset(&self, a: Self::Pred, b: Self::Pred) -> bool {
        self.is_empty(self.subtract(a, b))
    }

    /// Size of the underlying representation, used for the node budget.
    fn footprint(&self) -> usize {
        0
    }

    /// Number of states in `a`, when the backend can count them.
    fn count_states(&self, _a: Self::Pred) -> Option<u64> {
        None
    }
}

/// Renders a state count for log lines, `?` when unknown.
pub(crate) fn display_count<A: PredicateAlgebra + ?Sized>(system: &A, states: A::Pred) -> String {
    match system.count_states(states) {
        Some(count) => count.to_string(),
        None => "?".to_string(),
    }
}

/// Ordered variable assignment of a concrete state or input.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Assignment(pub Vec<(String, bool)>);

impl Assignment {
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.iter().find(|(n, _)| n == name).map(|&(_, value)| value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", name, if *value { "TRUE" } else { "FALSE" })?;
        }
        write!(f, "}}")
    }
}

/// Finite-state system with (optional) input variables.
pub trait TransitionSystem: PredicateAlgebra {
    /// A single concrete state.
    type State: Clone + Eq + fmt::Debug;
    /// A single concrete input valuation.
    type Input: Clone + Eq + fmt::Debug;

    fn initial_states(&self) -> Self::Pred;

    /// States reachable in one step from `states`.
    fn forward_image(&self, states: Self::Pred) -> Self::Pred;

    /// States with a successor in `states`.
    fn backward_image(&self, states: Self::Pred) -> Self::Pred;

    fn has_input_variables(&self) -> bool;

    fn sample_one_state(&self, states: Self::Pred) -> Option<Self::State>;

    fn sample_one_input(&self, inputs: Self::Pred) -> Option<Self::Input>;

    /// Inputs under which `from` steps to `to` (empty if there is no such transition).
    fn inputs_enabling(&self, from: &Self::State, to: &Self::State) -> Self::Pred;

    fn state_to_predicate(&self, state: &Self::State) -> Self::Pred;

    fn state_assignment(&self, state: &Self::State) -> Assignment;

    fn input_assignment(&self, input: &Self::Input) -> Assignment;
}

/// Turns a boolean (non-temporal) formula into the set of states satisfying it.
pub trait FormulaEvaluator: PredicateAlgebra {
    fn evaluate(&self, formula: &Node) -> Result<Self::Pred>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SymbolicModel;
    use crate::parser::parse_expression;

    struct Flag;

    impl PredicateAlgebra for Flag {
        type Pred = bool;

        fn empty(&self) -> bool {
            false
        }
        fn full(&self) -> bool {
            true
        }
        fn union(&self, a: bool, b: bool) -> bool {
            a | b
        }
        fn intersect(&self, a: bool, b: bool) -> bool {
            a & b
        }
        fn complement(&self, a: bool) -> bool {
            !a
        }
    }

    #[test]
    fn test_display_count() {
        let (system, _) = SymbolicModel::from_source("MODULE main VAR x : boolean; y : boolean; z : boolean;", 4).unwrap();
        let either = system.evaluate(&parse_expression("x | y").unwrap()).unwrap();
        assert_eq!(display_count(&system, either), "6");
        assert_eq!(display_count(&system, system.empty()), "0");

        assert_eq!(Flag.count_states(true), None);
        assert_eq!(display_count(&Flag, true), "?");
    }

    #[test]
    fn test_assignment_display() {
        let assignment = Assignment(vec![("x".to_string(), true), ("y".to_string(), false)]);
        assert_eq!(assignment.to_string(), "{x = TRUE, y = FALSE}");
        assert_eq!(assignment.get("y"), Some(false));
        assert_eq!(assignment.get("z"), None);
        assert_eq!(Assignment::default().to_string(), "{}");
    }
}
