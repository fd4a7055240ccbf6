//! Search for a reachable cycle through `f ∧ ¬g` that never visits `g`.
//!
//! Emerson–Lei style refinement: `recur` starts as the reachable `f ∧ ¬g`
//! states; each round computes the states that reach `recur` in one or more
//! `¬g` steps and drops the part of `recur` outside of them. A round in which
//! all of `recur` reaches itself again proves a bad cycle exists.

use log::debug;

use crate::config::CheckerConfig;
use crate::error::{Phase, Result};
use crate::system::{display_count, TransitionSystem};

/// Symbolic witness of a bad cycle.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BadCycle<P> {
    /// Non-empty set of `f ∧ ¬g` states, each reaching `recur` again through `¬g` states.
    pub recur: P,
    /// Union of `frontiers`: states reaching `recur` in at least one `¬g` step.
    pub pre_reach: P,
    /// Backward layers of the last round, `frontiers[0]` being `pre(recur) ∩ ¬g`.
    pub frontiers: Vec<P>,
}

/// Returns `None` when no reachable `f`-state lies on a cycle avoiding `g`.
pub fn find_bad_cycle<T: TransitionSystem>(
    system: &T,
    reachable: T::Pred,
    f: T::Pred,
    g: T::Pred,
    config: &CheckerConfig,
) -> Result<Option<BadCycle<T::Pred>>> {
    let not_g = system.complement(g);
    let mut recur = system.intersect(system.intersect(reachable, f), not_g);
    debug!("Initial recur: {} states", display_count(system, recur));

    let mut rounds = config.fuel(Phase::CycleSearch);
    while !system.is_empty(recur) {
        rounds.burn(system)?;

        let mut pre_reach = system.empty();
        let mut frontiers = Vec::new();
        let mut new = system.intersect(system.backward_image(recur), not_g);

        let mut steps = config.fuel(Phase::CycleSearch);
        while !system.is_empty(new) {
            steps.burn(system)?;

            pre_reach = system.union(pre_reach, new);
            frontiers.push(new);

            if system.is_subset(recur, pre_reach) {
                debug!(
                    "Bad cycle found in round {} after {} backward steps: recur {} states, pre_reach {} states",
                    rounds.spent(),
                    frontiers.len(),
                    display_count(system, recur),
                    display_count(system, pre_reach)
                );
                return Ok(Some(BadCycle {
                    recur,
                    pre_reach,
                    frontiers,
                }));
            }

            new = system.intersect(system.subtract(system.backward_image(new), pre_reach), not_g);
        }

        recur = system.intersect(recur, pre_reach);
        debug!(
            "Round {}: recur shrunk to {} states after {} backward steps, pre_reach {} states",
            rounds.spent(),
            display_count(system, recur),
            frontiers.len(),
            display_count(system, pre_reach)
        );
    }

    debug!("No bad cycle after {} rounds", rounds.spent());
    Ok(None)
}
