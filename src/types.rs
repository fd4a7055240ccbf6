//! Typed wrappers for BDD variables and literals.

use std::fmt;
use std::ops::Neg;

/// A BDD variable, numbered from 1 in allocation order.
///
/// Smaller ids sit closer to the root. A model allocates one variable per
/// input and two adjacent ones (present, next) per state variable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// # Panics
    ///
    /// On `id == 0`, which is reserved for the terminal.
    pub fn new(id: u32) -> Self {
        assert!(id != 0, "BDD variable ids start at 1");
        Var(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }

    pub fn pos(self) -> Lit {
        Lit::new(self, false)
    }

    pub fn neg(self) -> Lit {
        Lit::new(self, true)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}

/// A variable together with a polarity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lit {
    var: Var,
    negated: bool,
}

impl Lit {
    pub fn new(var: Var, negated: bool) -> Self {
        Lit { var, negated }
    }

    /// Builds a literal from a signed DIMACS integer (`-3` is `¬x3`).
    pub fn from_dimacs(value: i32) -> Self {
        assert_ne!(value, 0, "DIMACS literal cannot be zero");
        Lit::new(Var::new(value.unsigned_abs()), value < 0)
    }

    pub fn var(self) -> Var {
        self.var
    }

    pub fn is_positive(self) -> bool {
        !self.negated
    }

    pub fn is_negative(self) -> bool {
        self.negated
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Lit::new(self.var, !self.negated)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "¬{}", self.var)
        } else {
            write!(f, "{}", self.var)
        }
    }
}
