//! Forward reachability.

use log::debug;

use crate::config::{CheckerConfig, Fuel};
use crate::error::{Phase, Result};
use crate::system::{display_count, TransitionSystem};

/// All states reachable from the initial states, inclusive.
pub fn reachable<T: TransitionSystem>(system: &T, config: &CheckerConfig) -> Result<T::Pred> {
    let mut fuel = config.fuel(Phase::Reachability);
    let mut reach = system.initial_states();
    let mut frontier = reach;

    while !system.is_empty(frontier) {
        fuel.burn(system)?;
        frontier = system.subtract(system.forward_image(frontier), reach);
        reach = system.union(reach, frontier);
    }

    debug!(
        "Reachability converged after {} iterations, {} states",
        fuel.spent(),
        display_count(system, reach)
    );
    Ok(reach)
}

/// BFS layers from `start`, staying inside `within`.
///
/// `layers[0]` is `start ∩ within`, and every following layer holds the states
/// first seen at that distance. Stops as soon as a layer meets `target`
/// (that layer is included) or no new states appear.
/// The second component is the union of all layers.
pub fn forward_layers<T: TransitionSystem>(
    system: &T,
    start: T::Pred,
    within: T::Pred,
    target: T::Pred,
    fuel: &mut Fuel<'_>,
) -> Result<(Vec<T::Pred>, T::Pred)> {
    let mut current = system.intersect(start, within);
    let mut seen = current;
    let mut layers = Vec::new();

    while !system.is_empty(current) {
        layers.push(current);
        if !system.is_empty(system.intersect(current, target)) {
            break;
        }
        fuel.burn(system)?;
        current = system.subtract(system.intersect(system.forward_image(current), within), seen);
        seen = system.union(seen, current);
    }

    Ok((layers, seen))
}
