//! Recognition of reactivity formulas `G F f -> G F g`.

use std::fmt;

use crate::formula::{Kind, Node};

/// Why a formula is not a reactivity formula.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Rejection {
    MissingContext,
    NotAnImplication,
    LeftNotGf,
    LeftNotBoolean,
    RightNotGf,
    RightNotBoolean,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::MissingContext => "formula is not wrapped in a module context",
            Rejection::NotAnImplication => "top-level operator is not an implication",
            Rejection::LeftNotGf => "left-hand side is not of the form G F f",
            Rejection::LeftNotBoolean => "left-hand side G F f has temporal operators in f",
            Rejection::RightNotGf => "right-hand side is not of the form G F g",
            Rejection::RightNotBoolean => "right-hand side G F g has temporal operators in g",
        };
        write!(f, "{}", reason)
    }
}

/// Outcome of matching `G F φ`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GfShape<'a> {
    NotGf,
    /// `G F φ` where `φ` has temporal content.
    NonBoolean(&'a Node),
    Boolean(&'a Node),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Classified<'a> {
    Rejected(Rejection),
    Reactive { f: &'a Node, g: &'a Node },
}

/// Whether `node` is a boolean combination of atomic formulas.
///
/// Atoms, numbers, constants and comparisons are atomic; comparison operands are
/// not inspected further.
pub fn is_boolean_formula(node: &Node) -> bool {
    let kind = node.kind();
    if matches!(kind, Kind::Atom | Kind::Number | Kind::True | Kind::False) || kind.is_comparison() {
        return true;
    }
    match node {
        Node::Unary(Kind::Not, child) => is_boolean_formula(child),
        Node::Binary(kind, left, right) if kind.is_connective() => is_boolean_formula(left) && is_boolean_formula(right),
        _ => false,
    }
}

pub fn match_gf(node: &Node) -> GfShape<'_> {
    if node.kind() != Kind::Globally {
        return GfShape::NotGf;
    }
    let Some(inner) = node.child().filter(|child| child.kind() == Kind::Eventually) else {
        return GfShape::NotGf;
    };
    match inner.child() {
        Some(phi) if is_boolean_formula(phi) => GfShape::Boolean(phi),
        Some(phi) => GfShape::NonBoolean(phi),
        None => GfShape::NotGf,
    }
}

/// Extract `(f, g)` from `context(G F f -> G F g)`.
pub fn classify(spec: &Node) -> Classified<'_> {
    if spec.kind() != Kind::Context {
        return Classified::Rejected(Rejection::MissingContext);
    }
    let Some(body) = spec.child() else {
        return Classified::Rejected(Rejection::MissingContext);
    };
    let (Kind::Implies, Some(left), Some(right)) = (body.kind(), body.left(), body.right()) else {
        return Classified::Rejected(Rejection::NotAnImplication);
    };

    let f = match match_gf(left) {
        GfShape::Boolean(f) => f,
        GfShape::NonBoolean(_) => return Classified::Rejected(Rejection::LeftNotBoolean),
        GfShape::NotGf => return Classified::Rejected(Rejection::LeftNotGf),
    };
    let g = match match_gf(right) {
        GfShape::Boolean(g) => g,
        GfShape::NonBoolean(_) => return Classified::Rejected(Rejection::RightNotBoolean),
        GfShape::NotGf => return Classified::Rejected(Rejection::RightNotGf),
    };

    Classified::Reactive { f, g }
}
