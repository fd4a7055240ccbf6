//! Syntax trees of model expressions and temporal formulas.
//!
//! The same [`Node`] type is used for `INIT`/`INVAR`/`TRANS`/`ASSIGN` bodies and
//! for `LTLSPEC` properties. Nodes are immutable once built.

use std::fmt;

/// Operator or atom kind of a [`Node`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Kind {
    Context,
    Atom,
    Number,
    True,
    False,
    Not,
    Implies,
    Iff,
    Or,
    Xor,
    Xnor,
    And,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Globally,
    Eventually,
    Next,
    Until,
    NextVar,
}

impl Kind {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Kind::Equal | Kind::NotEqual | Kind::Less | Kind::Greater | Kind::LessEqual | Kind::GreaterEqual
        )
    }

    /// `&`, `|`, `xor`, `xnor`, `<->`, `->`.
    pub fn is_connective(self) -> bool {
        matches!(self, Kind::Implies | Kind::Iff | Kind::Or | Kind::Xor | Kind::Xnor | Kind::And)
    }

    fn symbol(self) -> &'static str {
        match self {
            Kind::Not => "!",
            Kind::Implies => "->",
            Kind::Iff => "<->",
            Kind::Or => "|",
            Kind::Xor => "xor",
            Kind::Xnor => "xnor",
            Kind::And => "&",
            Kind::Equal => "=",
            Kind::NotEqual => "!=",
            Kind::Less => "<",
            Kind::Greater => ">",
            Kind::LessEqual => "<=",
            Kind::GreaterEqual => ">=",
            Kind::Globally => "G",
            Kind::Eventually => "F",
            Kind::Next => "X",
            Kind::Until => "U",
            Kind::Context => "context",
            Kind::Atom => "atom",
            Kind::Number => "number",
            Kind::True => "TRUE",
            Kind::False => "FALSE",
            Kind::NextVar => "next",
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Node {
    /// Module context a property is stated in (`None` for `main`).
    Context(Option<String>, Box<Node>),
    Atom(String),
    Number(i64),
    True,
    False,
    /// `next(v)` inside `TRANS` bodies.
    NextVar(String),
    Unary(Kind, Box<Node>),
    Binary(Kind, Box<Node>, Box<Node>),
}

impl Node {
    pub fn atom(name: impl Into<String>) -> Self {
        Node::Atom(name.into())
    }

    pub fn context(module: Option<String>, body: Node) -> Self {
        Node::Context(module, Box::new(body))
    }

    pub fn unary(kind: Kind, child: Node) -> Self {
        debug_assert!(matches!(kind, Kind::Not | Kind::Globally | Kind::Eventually | Kind::Next));
        Node::Unary(kind, Box::new(child))
    }

    pub fn binary(kind: Kind, left: Node, right: Node) -> Self {
        debug_assert!(kind.is_connective() || kind.is_comparison() || kind == Kind::Until);
        Node::Binary(kind, Box::new(left), Box::new(right))
    }

    pub fn not(child: Node) -> Self {
        Node::unary(Kind::Not, child)
    }

    pub fn and(left: Node, right: Node) -> Self {
        Node::binary(Kind::And, left, right)
    }

    pub fn or(left: Node, right: Node) -> Self {
        Node::binary(Kind::Or, left, right)
    }

    pub fn implies(left: Node, right: Node) -> Self {
        Node::binary(Kind::Implies, left, right)
    }

    pub fn globally(child: Node) -> Self {
        Node::unary(Kind::Globally, child)
    }

    pub fn eventually(child: Node) -> Self {
        Node::unary(Kind::Eventually, child)
    }

    /// `G F child`
    pub fn gf(child: Node) -> Self {
        Node::globally(Node::eventually(child))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Node::Context(..) => Kind::Context,
            Node::Atom(_) => Kind::Atom,
            Node::Number(_) => Kind::Number,
            Node::True => Kind::True,
            Node::False => Kind::False,
            Node::NextVar(_) => Kind::NextVar,
            Node::Unary(kind, _) => *kind,
            Node::Binary(kind, ..) => *kind,
        }
    }

    /// The single child of a unary node (or the body of a context).
    pub fn child(&self) -> Option<&Node> {
        match self {
            Node::Context(_, body) => Some(body),
            Node::Unary(_, child) => Some(child),
            _ => None,
        }
    }

    pub fn left(&self) -> Option<&Node> {
        match self {
            Node::Binary(_, left, _) => Some(left),
            _ => None,
        }
    }

    pub fn right(&self) -> Option<&Node> {
        match self {
            Node::Binary(_, _, right) => Some(right),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Context(_, body) => write!(f, "{}", body),
            Node::Atom(name) => write!(f, "{}", name),
            Node::Number(value) => write!(f, "{}", value),
            Node::True => write!(f, "TRUE"),
            Node::False => write!(f, "FALSE"),
            Node::NextVar(name) => write!(f, "next({})", name),
            Node::Unary(kind, child) => match kind {
                Kind::Not => write!(f, "!{}", child),
                _ => write!(f, "{} {}", kind.symbol(), child),
            },
            Node::Binary(kind, left, right) => write!(f, "({} {} {})", left, kind.symbol(), right),
        }
    }
}
