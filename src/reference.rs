use std::fmt::{Display, Formatter};
use std::ops::Neg;

/// A reference to a BDD node, possibly complemented.
///
/// The node id lives in the upper 31 bits, the lowest bit is the complement flag.
/// Two references are equal iff they denote the same boolean function,
/// since the manager keeps every node canonical.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Ref(u32);

impl Ref {
    /// Sentinel for "not set yet".
    pub const INVALID: Self = Self(u32::MAX);

    pub const fn new(id: u32, negated: bool) -> Self {
        Self((id << 1) | (negated as u32))
    }

    pub const fn positive(id: u32) -> Self {
        Self::new(id, false)
    }

    pub const fn negative(id: u32) -> Self {
        Self::new(id, true)
    }

    /// Index of the node in the unique table.
    pub const fn id(self) -> u32 {
        self.0 >> 1
    }

    pub const fn is_negated(self) -> bool {
        (self.0 & 1) != 0
    }

    /// The same node without the complement flag.
    pub const fn regular(self) -> Self {
        Self(self.0 & !1)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Default for Ref {
    fn default() -> Self {
        Self::INVALID
    }
}

impl Neg for Ref {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(self.0 ^ 1)
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_negated() {
            write!(f, "~@{}", self.id())
        } else {
            write!(f, "@{}", self.id())
        }
    }
}
