//! Checking properties of a model end to end.

use std::fmt;

use log::{info, warn};

use crate::classify::{classify, Classified, Rejection};
use crate::config::CheckerConfig;
use crate::counterexample::{build_counterexample, CounterexamplePath, Lasso};
use crate::cycle::find_bad_cycle;
use crate::error::{Error, Result};
use crate::formula::Node;
use crate::parser::{Property, PropertyKind};
use crate::reach::reachable;
use crate::system::{FormulaEvaluator, TransitionSystem};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Verdict<S, I> {
    NotReactive(Rejection),
    Satisfied,
    Violated(Lasso<S, I>),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum VerificationResult {
    Satisfied,
    Violated(CounterexamplePath),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SkipReason {
    NotLtl(PropertyKind),
    NotReactive(Rejection),
}

#[derive(Debug)]
pub enum PropertyOutcome {
    Checked(VerificationResult),
    Skipped(SkipReason),
    Aborted(Error),
}

#[derive(Debug)]
pub struct PropertyReport {
    pub name: Option<String>,
    pub text: String,
    pub outcome: PropertyOutcome,
}

impl fmt::Display for PropertyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => writeln!(f, "{} := {}", name, self.text)?,
            None => writeln!(f, "{}", self.text)?,
        }
        match &self.outcome {
            PropertyOutcome::Skipped(SkipReason::NotLtl(_)) => writeln!(f, "property is not LTLSPEC, skipping"),
            PropertyOutcome::Skipped(SkipReason::NotReactive(_)) => {
                writeln!(f, "Property is not a GR(1) formula, skipping")
            }
            PropertyOutcome::Checked(VerificationResult::Satisfied) => writeln!(f, "Property is respected"),
            PropertyOutcome::Checked(VerificationResult::Violated(path)) => {
                writeln!(f, "Property is not respected")?;
                writeln!(f, "Counterexample:")?;
                write!(f, "{}", path)
            }
            PropertyOutcome::Aborted(err) => writeln!(f, "Check aborted: {}", err),
        }
    }
}

/// Decide `G F f -> G F g` for a context-wrapped formula.
pub fn check_reactivity<T>(system: &T, formula: &Node, config: &CheckerConfig) -> Result<Verdict<T::State, T::Input>>
where
    T: TransitionSystem + FormulaEvaluator,
{
    let (f, g) = match classify(formula) {
        Classified::Rejected(rejection) => {
            info!("Not a reactivity formula: {}", rejection);
            return Ok(Verdict::NotReactive(rejection));
        }
        Classified::Reactive { f, g } => (f, g),
    };
    info!("Checking G F {} -> G F {}", f, g);

    let sf = system.evaluate(f)?;
    let sg = system.evaluate(g)?;
    let reach = reachable(system, config)?;

    match find_bad_cycle(system, reach, sf, sg, config)? {
        None => {
            info!("No bad cycle: property holds");
            Ok(Verdict::Satisfied)
        }
        Some(cycle) => {
            let lasso = build_counterexample(system, &cycle, config)?;
            info!(
                "Bad cycle: counterexample with prefix of {} and loop of {} steps",
                lasso.prefix.len(),
                lasso.cycle.len()
            );
            Ok(Verdict::Violated(lasso))
        }
    }
}

pub fn check_property<T>(system: &T, property: &Property, config: &CheckerConfig) -> PropertyReport
where
    T: TransitionSystem + FormulaEvaluator,
{
    let outcome = match (property.kind, &property.formula) {
        (PropertyKind::Ltl, Some(formula)) => match check_reactivity(system, formula, config) {
            Ok(Verdict::NotReactive(rejection)) => PropertyOutcome::Skipped(SkipReason::NotReactive(rejection)),
            Ok(Verdict::Satisfied) => PropertyOutcome::Checked(VerificationResult::Satisfied),
            Ok(Verdict::Violated(lasso)) => PropertyOutcome::Checked(VerificationResult::Violated(lasso.render(system))),
            Err(err) => {
                warn!("Check of '{}' aborted: {}", property.text, err);
                PropertyOutcome::Aborted(err)
            }
        },
        (kind, _) => {
            info!("Skipping {} property '{}'", kind, property.text);
            PropertyOutcome::Skipped(SkipReason::NotLtl(kind))
        }
    };

    PropertyReport {
        name: property.name.clone(),
        text: property.text.clone(),
        outcome,
    }
}

/// Check every property in order; a failing property does not stop the others.
pub fn check_all<T>(system: &T, properties: &[Property], config: &CheckerConfig) -> Vec<PropertyReport>
where
    T: TransitionSystem + FormulaEvaluator,
{
    properties.iter().map(|property| check_property(system, property, config)).collect()
}
