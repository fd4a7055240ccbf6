//! Symbolic encoding of a parsed SMV model.
//!
//! Every state variable `v` gets a pair of adjacent BDD variables (`v`, `v'`) for
//! its present and next value; every input variable gets a single BDD variable.
//! Sets of states are BDDs over present variables, the transition relation is a
//! BDD over present, input and next variables.

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use log::debug;
use num_traits::ToPrimitive;

use crate::bdd::Bdd;
use crate::error::{Error, Result};
use crate::formula::{Kind, Node};
use crate::parser::{parse_model, AssignTarget, Model, Property, Rhs};
use crate::reference::Ref;
use crate::system::{Assignment, FormulaEvaluator, PredicateAlgebra, TransitionSystem};
use crate::types::{Lit, Var};

/// A concrete state or input: a full assignment to the relevant variables.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Cube {
    node: Ref,
    literals: Vec<Lit>,
}

impl Cube {
    pub fn node(&self) -> Ref {
        self.node
    }
}

#[derive(Debug, Copy, Clone)]
enum Slot {
    State { present: Var, next: Var },
    Input(Var),
}

/// Which variables an expression may mention.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Scope {
    /// Present state variables only.
    State,
    /// Present and next state variables and inputs.
    Transition,
}

pub struct SymbolicModel {
    bdd: Rc<Bdd>,
    slots: HashMap<String, Slot>,
    state_names: Vec<String>,
    input_names: Vec<String>,
    present_vars: Vec<Var>,
    next_vars: Vec<Var>,
    input_vars: Vec<Var>,
    initial: Ref,
    transition: Ref,
    invariant: Ref,
}

impl SymbolicModel {
    /// Encode `model` in the given manager.
    pub fn new(bdd: Rc<Bdd>, model: &Model) -> Result<Self> {
        let mut slots = HashMap::new();
        let mut present_vars = Vec::new();
        let mut next_vars = Vec::new();
        let mut input_vars = Vec::new();

        for name in &model.state_vars {
            let present = bdd.allocate_variable();
            let next = bdd.allocate_variable();
            if slots.insert(name.clone(), Slot::State { present, next }).is_some() {
                return Err(Error::DuplicateVariable(name.clone()));
            }
            present_vars.push(present);
            next_vars.push(next);
        }
        for name in &model.input_vars {
            let var = bdd.allocate_variable();
            if slots.insert(name.clone(), Slot::Input(var)).is_some() {
                return Err(Error::DuplicateVariable(name.clone()));
            }
            input_vars.push(var);
        }

        let mut system = SymbolicModel {
            initial: bdd.one(),
            transition: bdd.one(),
            invariant: bdd.one(),
            bdd,
            slots,
            state_names: model.state_vars.clone(),
            input_names: model.input_vars.clone(),
            present_vars,
            next_vars,
            input_vars,
        };

        let mut initial = Vec::new();
        let mut transition = Vec::new();
        let mut invariant = Vec::new();

        for expr in &model.init {
            initial.push(system.encode(expr, Scope::State)?);
        }
        for expr in &model.invar {
            invariant.push(system.encode(expr, Scope::State)?);
        }
        for expr in &model.trans {
            transition.push(system.encode(expr, Scope::Transition)?);
        }
        for assign in &model.assigns {
            match &assign.target {
                AssignTarget::Init(name) => {
                    let (present, _) = system.state_slot(name)?;
                    let target = system.bdd.mk_var(present);
                    initial.push(system.encode_rhs(target, &assign.rhs, Scope::State)?);
                }
                AssignTarget::Next(name) => {
                    let (_, next) = system.state_slot(name)?;
                    let target = system.bdd.mk_var(next);
                    transition.push(system.encode_rhs(target, &assign.rhs, Scope::Transition)?);
                }
                AssignTarget::Current(name) => {
                    let (present, _) = system.state_slot(name)?;
                    let target = system.bdd.mk_var(present);
                    invariant.push(system.encode_rhs(target, &assign.rhs, Scope::State)?);
                }
            }
        }

        let bdd = &system.bdd;
        let invariant = bdd.apply_and_many(invariant);
        let invariant_next = system.rename_present_to_next(invariant);
        system.invariant = invariant;
        system.initial = bdd.apply_and(bdd.apply_and_many(initial), invariant);
        system.transition = bdd.apply_and_many(transition.into_iter().chain([invariant, invariant_next]));

        debug!(
            "Encoded model with {} state and {} input variables: init has {} nodes, trans has {} nodes",
            system.state_names.len(),
            system.input_names.len(),
            bdd.size(system.initial),
            bdd.size(system.transition)
        );

        Ok(system)
    }

    /// Parse and encode SMV source text.
    pub fn from_source(source: &str, storage_bits: usize) -> Result<(Self, Vec<Property>)> {
        let model = parse_model(source)?;
        let bdd = Rc::new(Bdd::new(storage_bits));
        let system = SymbolicModel::new(bdd, &model)?;
        Ok((system, model.properties))
    }

    /// Read, parse and encode an SMV file.
    pub fn load(path: &Path, storage_bits: usize) -> Result<(Self, Vec<Property>)> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(&source, storage_bits)
    }

    pub fn bdd(&self) -> &Bdd {
        &self.bdd
    }

    pub fn state_names(&self) -> &[String] {
        &self.state_names
    }

    pub fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn state_slot(&self, name: &str) -> Result<(Var, Var)> {
        match self.slots.get(name) {
            Some(&Slot::State { present, next }) => Ok((present, next)),
            Some(Slot::Input(_)) => Err(Error::InputInStateExpression(name.to_string())),
            None => Err(Error::UndeclaredVariable(name.to_string())),
        }
    }

    /// Build the BDD of an expression.
    fn encode(&self, node: &Node, scope: Scope) -> Result<Ref> {
        let bdd = self.bdd();
        match node {
            Node::Context(_, body) => self.encode(body, scope),
            Node::True => Ok(bdd.one()),
            Node::False => Ok(bdd.zero()),
            Node::Number(0) => Ok(bdd.zero()),
            Node::Number(1) => Ok(bdd.one()),
            Node::Number(value) => Err(Error::NonBooleanNumber(*value)),
            Node::Atom(name) => match self.slots.get(name) {
                Some(Slot::State { present, .. }) => Ok(bdd.mk_var(*present)),
                Some(Slot::Input(var)) if scope == Scope::Transition => Ok(bdd.mk_var(*var)),
                Some(Slot::Input(_)) => Err(Error::InputInStateExpression(name.clone())),
                None => Err(Error::UndeclaredVariable(name.clone())),
            },
            Node::NextVar(name) => {
                if scope != Scope::Transition {
                    return Err(Error::NotAStateExpression(node.to_string()));
                }
                match self.slots.get(name) {
                    Some(Slot::State { next, .. }) => Ok(bdd.mk_var(*next)),
                    Some(Slot::Input(_)) => Err(Error::NotAStateExpression(node.to_string())),
                    None => Err(Error::UndeclaredVariable(name.clone())),
                }
            }
            Node::Unary(Kind::Not, child) => Ok(-self.encode(child, scope)?),
            Node::Unary(..) => Err(Error::NotAStateExpression(node.to_string())),
            Node::Binary(kind, left, right) => {
                if !kind.is_connective() && !kind.is_comparison() {
                    return Err(Error::NotAStateExpression(node.to_string()));
                }
                let a = self.encode(left, scope)?;
                let b = self.encode(right, scope)?;
                // Booleans are ordered FALSE < TRUE.
                let res = match kind {
                    Kind::And => bdd.apply_and(a, b),
                    Kind::Or => bdd.apply_or(a, b),
                    Kind::Xor | Kind::NotEqual => bdd.apply_xor(a, b),
                    Kind::Xnor | Kind::Iff | Kind::Equal => bdd.apply_eq(a, b),
                    Kind::Implies | Kind::LessEqual => bdd.apply_imply(a, b),
                    Kind::GreaterEqual => bdd.apply_imply(b, a),
                    Kind::Less => bdd.apply_and(-a, b),
                    Kind::Greater => bdd.apply_and(a, -b),
                    _ => unreachable!("{:?} is neither a connective nor a comparison", kind),
                };
                Ok(res)
            }
        }
    }

    /// Relation `target ∈ rhs`.
    fn encode_rhs(&self, target: Ref, rhs: &Rhs, scope: Scope) -> Result<Ref> {
        let bdd = self.bdd();
        match rhs {
            Rhs::Expr(expr) => Ok(bdd.apply_eq(target, self.encode(expr, scope)?)),
            Rhs::Set(items) => {
                let mut options = Vec::with_capacity(items.len());
                for item in items {
                    options.push(bdd.apply_eq(target, self.encode(item, scope)?));
                }
                Ok(bdd.apply_or_many(options))
            }
            Rhs::Case(branches) => {
                // No matching branch: FALSE.
                let mut res = -target;
                for (condition, value) in branches.iter().rev() {
                    let condition = self.encode(condition, scope)?;
                    let value = self.encode_rhs(target, value, scope)?;
                    res = bdd.apply_ite(condition, value, res);
                }
                Ok(res)
            }
        }
    }

    fn rename_present_to_next(&self, f: Ref) -> Ref {
        let perm: HashMap<Var, Var> = self.present_vars.iter().copied().zip(self.next_vars.iter().copied()).collect();
        self.bdd.rename_vars(f, &perm)
    }

    fn rename_next_to_present(&self, f: Ref) -> Ref {
        let perm: HashMap<Var, Var> = self.next_vars.iter().copied().zip(self.present_vars.iter().copied()).collect();
        self.bdd.rename_vars(f, &perm)
    }

    /// Whether `from --input--> to` is a transition (`input` is ignored without inputs).
    pub fn is_transition(&self, from: &Cube, input: Option<&Cube>, to: &Cube) -> bool {
        let bdd = self.bdd();
        let to_next = self.rename_present_to_next(to.node);
        let input = input.map_or(bdd.one(), |input| input.node);
        let step = bdd.apply_and_many([from.node, input, to_next, self.transition]);
        !bdd.is_zero(step)
    }

    fn assignment(&self, literals: &[Lit], names: &[String], vars: &[Var]) -> Assignment {
        let values: HashMap<Var, bool> = literals.iter().map(|lit| (lit.var(), lit.is_positive())).collect();
        Assignment(
            names
                .iter()
                .zip(vars)
                .filter_map(|(name, var)| values.get(var).map(|&value| (name.clone(), value)))
                .collect(),
        )
    }
}

impl PredicateAlgebra for SymbolicModel {
    type Pred = Ref;

    fn empty(&self) -> Ref {
        self.bdd.zero()
    }

    fn full(&self) -> Ref {
        self.bdd.one()
    }

    fn union(&self, a: Ref, b: Ref) -> Ref {
        self.bdd.apply_or(a, b)
    }

    fn intersect(&self, a: Ref, b: Ref) -> Ref {
        self.bdd.apply_and(a, b)
    }

    fn complement(&self, a: Ref) -> Ref {
        self.bdd.apply_not(a)
    }

    fn is_empty(&self, a: Ref) -> bool {
        self.bdd.is_zero(a)
    }

    fn is_subset(&self, a: Ref, b: Ref) -> bool {
        self.bdd.is_subset(a, b)
    }

    fn footprint(&self) -> usize {
        self.bdd.num_nodes()
    }

    /// `None` beyond `u64`, or when `a` mentions next or input variables.
    fn count_states(&self, a: Ref) -> Option<u64> {
        self.bdd.sat_count(a, &self.present_vars)?.to_u64()
    }
}

impl TransitionSystem for SymbolicModel {
    type State = Cube;
    type Input = Cube;

    fn initial_states(&self) -> Ref {
        self.initial
    }

    /// `(∃s,i. from(s) ∧ T(s, i, s'))[s' → s]`
    fn forward_image(&self, from: Ref) -> Ref {
        let quantified: Vec<Var> = self.present_vars.iter().chain(&self.input_vars).copied().collect();
        let next = self.bdd.rel_product(from, self.transition, &quantified);
        self.rename_next_to_present(next)
    }

    /// `∃i,s'. T(s, i, s') ∧ to(s')`
    fn backward_image(&self, to: Ref) -> Ref {
        let to_next = self.rename_present_to_next(to);
        let quantified: Vec<Var> = self.next_vars.iter().chain(&self.input_vars).copied().collect();
        self.bdd.rel_product(self.transition, to_next, &quantified)
    }

    fn has_input_variables(&self) -> bool {
        !self.input_vars.is_empty()
    }

    fn sample_one_state(&self, states: Ref) -> Option<Cube> {
        let literals = self.bdd.pick_minterm(states, &self.present_vars)?;
        let node = self.bdd.mk_cube(literals.iter().copied());
        Some(Cube { node, literals })
    }

    fn sample_one_input(&self, inputs: Ref) -> Option<Cube> {
        let literals = self.bdd.pick_minterm(inputs, &self.input_vars)?;
        let node = self.bdd.mk_cube(literals.iter().copied());
        Some(Cube { node, literals })
    }

    fn inputs_enabling(&self, from: &Cube, to: &Cube) -> Ref {
        let to_next = self.rename_present_to_next(to.node);
        let step = self.bdd.apply_and_many([from.node, self.transition, to_next]);
        let quantified: Vec<Var> = self.present_vars.iter().chain(&self.next_vars).copied().collect();
        self.bdd.exists(step, &quantified)
    }

    fn state_to_predicate(&self, state: &Cube) -> Ref {
        state.node
    }

    fn state_assignment(&self, state: &Cube) -> Assignment {
        self.assignment(&state.literals, &self.state_names, &self.present_vars)
    }

    fn input_assignment(&self, input: &Cube) -> Assignment {
        self.assignment(&input.literals, &self.input_names, &self.input_vars)
    }
}

impl FormulaEvaluator for SymbolicModel {
    fn evaluate(&self, formula: &Node) -> Result<Ref> {
        self.encode(formula, Scope::State)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::parser::parse_expression;

    fn load(source: &str) -> SymbolicModel {
        SymbolicModel::from_source(source, 10).unwrap().0
    }

    #[test]
    fn test_toggle_images() {
        let system = load(
            "MODULE main
             VAR x : boolean;
             ASSIGN init(x) := FALSE; next(x) := !x;",
        );
        let x = system.evaluate(&Node::atom("x")).unwrap();

        assert_eq!(system.initial_states(), -x);
        assert_eq!(system.forward_image(-x), x);
        assert_eq!(system.forward_image(x), -x);
        assert_eq!(system.backward_image(x), -x);
        assert_eq!(system.backward_image(system.full()), system.full());
        assert!(!system.has_input_variables());
    }

    #[test]
    fn test_counter_reachable_count() {
        // Two-bit counter: (0,0) -> (1,0) -> (0,1) -> (1,1) -> (0,0)
        let system = load(
            "MODULE main
             VAR x : boolean; y : boolean;
             INIT !x & !y
             TRANS next(x) = !x & next(y) = (y xor x)",
        );
        let mut reach = system.initial_states();
        loop {
            let next = system.union(reach, system.forward_image(reach));
            if next == reach {
                break;
            }
            reach = next;
        }
        assert_eq!(system.count_states(reach), Some(4));
        assert_eq!(system.count_states(system.initial_states()), Some(1));
    }

    #[test]
    fn test_inputs_enabling() {
        let system = load(
            "MODULE main
             VAR x : boolean;
             IVAR go : boolean;
             INIT !x
             TRANS next(x) = (x | go)",
        );
        assert!(system.has_input_variables());

        let s0 = system.sample_one_state(system.initial_states()).unwrap();
        let x = system.evaluate(&Node::atom("x")).unwrap();
        let s1 = system.sample_one_state(x).unwrap();

        let inputs = system.inputs_enabling(&s0, &s1);
        let input = system.sample_one_input(inputs).unwrap();
        assert_eq!(system.input_assignment(&input).to_string(), "{go = TRUE}");
        assert!(system.is_transition(&s0, Some(&input), &s1));

        // x stays TRUE whatever the input.
        let both = system.inputs_enabling(&s1, &s1);
        assert_eq!(both, system.full());
        let back = system.inputs_enabling(&s1, &s0);
        assert!(system.is_empty(back));
        assert_eq!(system.sample_one_input(back), None);
    }

    #[test]
    fn test_sample_assignment() {
        let system = load(
            "MODULE main
             VAR a : boolean; b : boolean; c : boolean;
             INIT a & !c",
        );
        let state = system.sample_one_state(system.initial_states()).unwrap();
        let assignment = system.state_assignment(&state);
        assert_eq!(assignment.to_string(), "{a = TRUE, b = FALSE, c = FALSE}");
        assert_eq!(system.state_to_predicate(&state), state.node());
        assert!(system.is_subset(state.node(), system.initial_states()));
    }

    #[test]
    fn test_invar_and_current_assign() {
        let system = load(
            "MODULE main
             VAR x : boolean; y : boolean;
             ASSIGN y := !x;
             INVAR x | y",
        );
        let expected = system.evaluate(&parse_expression("x xor y").unwrap()).unwrap();
        assert_eq!(system.initial_states(), expected);
        assert!(system.is_subset(system.forward_image(system.full()), expected));
    }

    #[test]
    fn test_case_assign() {
        let system = load(
            "MODULE main
             VAR x : boolean; y : boolean;
             ASSIGN
               init(x) := {TRUE, FALSE};
               init(y) := case x : FALSE; TRUE : TRUE; esac;",
        );
        let expected = system.evaluate(&parse_expression("x != y").unwrap()).unwrap();
        assert_eq!(system.initial_states(), expected);
    }

    #[test]
    fn test_comparisons() {
        let system = load("MODULE main VAR a : boolean; b : boolean;");
        let eval = |text: &str| system.evaluate(&parse_expression(text).unwrap()).unwrap();

        assert_eq!(eval("a < b"), eval("!a & b"));
        assert_eq!(eval("a >= b"), eval("b -> a"));
        assert_eq!(eval("a = 1"), eval("a"));
        assert_eq!(eval("a != 0"), eval("a"));
        assert_eq!(eval("a <-> b"), eval("a xnor b"));
    }

    #[test]
    fn test_evaluate_errors() {
        let system = load("MODULE main VAR a : boolean; IVAR i : boolean;");
        let eval = |text: &str| system.evaluate(&parse_expression(text).unwrap());

        assert!(matches!(eval("a & z"), Err(Error::UndeclaredVariable(name)) if name == "z"));
        assert!(matches!(eval("a | i"), Err(Error::InputInStateExpression(name)) if name == "i"));
        assert!(matches!(eval("F a"), Err(Error::NotAStateExpression(_))));
        assert!(matches!(eval("next(a)"), Err(Error::NotAStateExpression(_))));
        assert!(matches!(eval("a = 2"), Err(Error::NonBooleanNumber(2))));
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            SymbolicModel::from_source("MODULE main VAR a : boolean; ASSIGN next(b) := a;", 8),
            Err(Error::UndeclaredVariable(name)) if name == "b"
        ));
        assert!(matches!(
            SymbolicModel::from_source("MODULE main VAR a : boolean; INIT next(a)", 8),
            Err(Error::NotAStateExpression(_))
        ));
        assert!(matches!(
            SymbolicModel::load(Path::new("/nonexistent/model.smv"), 8),
            Err(Error::Io { .. })
        ));
    }
}
