//! Lasso-shaped counterexamples.
//!
//! Given a [`BadCycle`], the builder picks an anchor state of `recur` that lies
//! on a cycle inside `pre_reach`, then builds
//! - the prefix: a shortest path from an initial state to the anchor,
//! - the loop: a path from the anchor back to itself through `pre_reach`.
//!
//! Every state of the loop satisfies `¬g` and the anchor satisfies `f ∧ ¬g`.

use std::fmt;

use log::debug;

use crate::config::CheckerConfig;
use crate::cycle::BadCycle;
use crate::error::{Error, Phase, Result};
use crate::reach::forward_layers;
use crate::system::{Assignment, TransitionSystem};

/// A state together with the input taken to leave it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Step<S, I> {
    pub state: S,
    /// `None` when the system has no input variables.
    pub input: Option<I>,
}

/// Concrete infinite execution `prefix · cycle^ω`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Lasso<S, I> {
    /// Steps from an initial state up to (excluding) the anchor.
    pub prefix: Vec<Step<S, I>>,
    /// Steps from the anchor around the loop; the last input leads back to the anchor.
    pub cycle: Vec<Step<S, I>>,
}

impl<S: Clone, I: Clone> Lasso<S, I> {
    /// The recurring state where the loop starts and ends.
    pub fn anchor(&self) -> &S {
        &self.cycle[0].state
    }

    /// All transitions `(from, input, to)` of the lasso, the closing one included.
    pub fn transitions(&self) -> Vec<(&S, Option<&I>, &S)> {
        let steps: Vec<&Step<S, I>> = self.prefix.iter().chain(&self.cycle).collect();
        let mut transitions = Vec::with_capacity(steps.len());
        for (i, step) in steps.iter().enumerate() {
            let to = steps.get(i + 1).map_or(self.anchor(), |next| &next.state);
            transitions.push((&step.state, step.input.as_ref(), to));
        }
        transitions
    }

    pub fn render<T>(&self, system: &T) -> CounterexamplePath
    where
        T: TransitionSystem<State = S, Input = I>,
    {
        let mut elements = Vec::with_capacity(2 * (self.prefix.len() + self.cycle.len()) + 1);
        for step in self.prefix.iter().chain(&self.cycle) {
            elements.push(Element::State(system.state_assignment(&step.state)));
            let input = step.input.as_ref().map(|input| system.input_assignment(input)).unwrap_or_default();
            elements.push(Element::Input(input));
        }
        elements.push(Element::State(system.state_assignment(self.anchor())));

        CounterexamplePath {
            elements,
            loop_start: 2 * self.prefix.len(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Element {
    State(Assignment),
    Input(Assignment),
}

/// Alternating state and input assignments; the last state repeats the one at `loop_start`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CounterexamplePath {
    pub elements: Vec<Element>,
    pub loop_start: usize,
}

impl CounterexamplePath {
    pub fn states(&self) -> impl Iterator<Item = &Assignment> {
        self.elements.iter().filter_map(|element| match element {
            Element::State(state) => Some(state),
            Element::Input(_) => None,
        })
    }
}

impl fmt::Display for CounterexamplePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut state_index = 0;
        for (i, element) in self.elements.iter().enumerate() {
            if i == self.loop_start {
                writeln!(f, "  -- Loop starts here")?;
            }
            match element {
                Element::State(state) => {
                    state_index += 1;
                    writeln!(f, "  State {}: {}", state_index, state)?;
                }
                Element::Input(input) => writeln!(f, "  Input: {}", input)?,
            }
        }
        Ok(())
    }
}

pub fn build_counterexample<T: TransitionSystem>(
    system: &T,
    cycle: &BadCycle<T::Pred>,
    config: &CheckerConfig,
) -> Result<Lasso<T::State, T::Input>> {
    let (anchor, loop_layers) = select_anchor(system, cycle, config)?;
    let prefix = build_prefix(system, &anchor, config)?;
    let cycle = build_loop(system, anchor, &loop_layers, config)?;
    debug!("Counterexample: prefix of {} steps, loop of {} steps", prefix.len(), cycle.len());
    Ok(Lasso { prefix, cycle })
}

fn sample_state<T: TransitionSystem>(system: &T, states: T::Pred, phase: Phase) -> Result<T::State> {
    system
        .sample_one_state(states)
        .ok_or(Error::EmptySample { phase, what: "state" })
}

fn enabling_input<T: TransitionSystem>(system: &T, from: &T::State, to: &T::State, phase: Phase) -> Result<Option<T::Input>> {
    if !system.has_input_variables() {
        return Ok(None);
    }
    let inputs = system.inputs_enabling(from, to);
    system
        .sample_one_input(inputs)
        .map(Some)
        .ok_or(Error::EmptySample { phase, what: "input" })
}

/// Pick a state of `recur` lying on a cycle inside `pre_reach`.
///
/// Also returns the forward layers of that state inside `pre_reach`, the last
/// one being the first to contain the state again.
fn select_anchor<T: TransitionSystem>(
    system: &T,
    cycle: &BadCycle<T::Pred>,
    config: &CheckerConfig,
) -> Result<(T::State, Vec<T::Pred>)> {
    let BadCycle { recur, pre_reach, .. } = *cycle;

    let mut fuel = config.fuel(Phase::Anchor);
    let (_, seen) = forward_layers(system, system.forward_image(recur), pre_reach, recur, &mut fuel)?;
    let mut anchor = sample_state(system, system.intersect(seen, recur), Phase::Anchor)?;

    // A state of recur reachable from recur is not necessarily on a cycle:
    // move along recur until it is. The states reachable from the anchor
    // shrink strictly on each move.
    let mut moves = config.fuel(Phase::Anchor);
    loop {
        moves.burn(system)?;
        let target = system.state_to_predicate(&anchor);
        let mut fuel = config.fuel(Phase::Anchor);
        let (layers, seen) = forward_layers(system, system.forward_image(target), pre_reach, target, &mut fuel)?;
        if system.is_subset(target, seen) {
            return Ok((anchor, layers));
        }
        anchor = sample_state(system, system.intersect(seen, recur), Phase::Anchor)?;
    }
}

/// Shortest path from an initial state to `anchor`, excluding the anchor.
fn build_prefix<T: TransitionSystem>(system: &T, anchor: &T::State, config: &CheckerConfig) -> Result<Vec<Step<T::State, T::Input>>> {
    let mut fuel = config.fuel(Phase::Prefix);
    let target = system.state_to_predicate(anchor);
    let (layers, _) = forward_layers(system, system.initial_states(), system.full(), target, &mut fuel)?;

    match layers.last() {
        Some(&last) if system.is_subset(target, last) => {}
        _ => {
            return Err(Error::EmptySample {
                phase: Phase::Prefix,
                what: "path to the anchor",
            })
        }
    }

    walk_back(system, anchor, &layers[..layers.len() - 1], Phase::Prefix, config)
}

/// Walk `layers` backwards from `last`, one predecessor per layer.
///
/// The result starts in `layers[0]` and its final input leads into `last`.
fn walk_back<T: TransitionSystem>(
    system: &T,
    last: &T::State,
    layers: &[T::Pred],
    phase: Phase,
    config: &CheckerConfig,
) -> Result<Vec<Step<T::State, T::Input>>> {
    let mut fuel = config.fuel(phase);
    let mut steps = Vec::with_capacity(layers.len());
    let mut next = last.clone();

    for &layer in layers.iter().rev() {
        fuel.burn(system)?;
        let predecessors = system.intersect(layer, system.backward_image(system.state_to_predicate(&next)));
        let state = sample_state(system, predecessors, phase)?;
        let input = enabling_input(system, &state, &next, phase)?;
        next = state.clone();
        steps.push(Step { state, input });
    }

    steps.reverse();
    Ok(steps)
}

/// Loop from `anchor` through its forward layers back to itself.
fn build_loop<T: TransitionSystem>(
    system: &T,
    anchor: T::State,
    layers: &[T::Pred],
    config: &CheckerConfig,
) -> Result<Vec<Step<T::State, T::Input>>> {
    let Some((_, inner)) = layers.split_last() else {
        return Err(Error::EmptySample {
            phase: Phase::Loop,
            what: "cycle through the anchor",
        });
    };

    let rest = walk_back(system, &anchor, inner, Phase::Loop, config)?;
    // First state after the anchor (the anchor itself for a self-loop).
    let first = rest.first().map_or(&anchor, |step| &step.state);
    let input = enabling_input(system, &anchor, first, Phase::Loop)?;

    let mut cycle = Vec::with_capacity(rest.len() + 1);
    cycle.push(Step { state: anchor, input });
    cycle.extend(rest);
    Ok(cycle)
}
