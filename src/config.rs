use crate::error::{Error, Phase, Result};
use crate::system::PredicateAlgebra;

/// Resource budget of a single property check.
///
/// Both limits are off by default: the fixpoints always terminate on a finite
/// model, the budget only bounds how long and how large they may get.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CheckerConfig {
    /// Maximal number of iterations of any single loop; each loop counts separately.
    pub max_iterations: Option<usize>,
    /// Maximal number of nodes in the predicate representation.
    pub max_nodes: Option<usize>,
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Fresh iteration counter for one loop of the given phase.
    pub fn fuel(&self, phase: Phase) -> Fuel<'_> {
        Fuel {
            config: self,
            phase,
            spent: 0,
        }
    }
}

/// Iteration counter of one fixpoint loop.
#[derive(Debug)]
pub struct Fuel<'a> {
    config: &'a CheckerConfig,
    phase: Phase,
    spent: usize,
}

impl Fuel<'_> {
    /// Account for one more iteration, failing once a limit is exceeded.
    pub fn burn<A: PredicateAlgebra + ?Sized>(&mut self, algebra: &A) -> Result<()> {
        self.spent += 1;

        if let Some(max) = self.config.max_iterations {
            if self.spent > max {
                return Err(Error::ResourceExhausted {
                    phase: self.phase,
                    reason: format!("more than {} iterations", max),
                });
            }
        }

        if let Some(max) = self.config.max_nodes {
            let nodes = algebra.footprint();
            if nodes > max {
                return Err(Error::ResourceExhausted {
                    phase: self.phase,
                    reason: format!("{} nodes exceed the limit of {}", nodes, max),
                });
            }
        }

        Ok(())
    }

    pub fn spent(&self) -> usize {
        self.spent
    }
}
