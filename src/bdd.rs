//! The BDD manager.
//!
//! All boolean functions live inside one [`Bdd`] manager and are handled through
//! lightweight [`Ref`] handles. Nodes are hash-consed in a unique [`Table`] and
//! complement edges make negation O(1). The manager is the predicate algebra
//! behind [`SymbolicModel`][crate::model::SymbolicModel]: every state set,
//! input set and transition relation of a loaded model is a `Ref` here.
//!
//! Variables are ordered by id (no dynamic reordering), and the high edge of a
//! stored node is never complemented, so every function has exactly one `Ref`.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

use log::trace;

use crate::cache::Cache;
use crate::reference::Ref;
use crate::table::Table;
use crate::types::{Lit, Var};
use crate::utils::{mix, pairing2, pairing3, MyHash};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Node {
    variable: u32,
    low: Ref,
    high: Ref,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            variable: 0,
            low: Ref::INVALID,
            high: Ref::INVALID,
        }
    }
}

impl MyHash for Node {
    fn hash(&self) -> u64 {
        mix(pairing3(self.variable as u64, self.low.raw() as u64, self.high.raw() as u64))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum OpKey {
    Ite(Ref, Ref, Ref),
    Exists(Ref, Ref),
}

impl MyHash for OpKey {
    fn hash(&self) -> u64 {
        match self {
            OpKey::Ite(f, g, h) => mix(pairing3(f.raw() as u64, g.raw() as u64, h.raw() as u64)),
            OpKey::Exists(f, cube) => mix(pairing2(f.raw() as u64, cube.raw() as u64) ^ 0x5bd1_e995),
        }
    }
}

pub struct Bdd {
    storage: RefCell<Table<Node>>,
    cache: RefCell<Cache<OpKey, Ref>>,
    num_vars: Cell<u32>,
    zero: Ref,
    one: Ref,
}

impl Bdd {
    /// Create a manager whose unique table starts with `2^bits` buckets.
    /// The table grows on demand; `bits` also sizes the computed cache.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Storage bits should be in the range 0..=31");

        let mut storage = Table::new(bits);
        let terminal = storage.put(Node::default());
        assert_eq!(terminal, 1); // Make sure the terminal node is (1).
        let one = Ref::positive(terminal);

        Self {
            storage: RefCell::new(storage),
            cache: RefCell::new(Cache::new(bits.min(20))),
            num_vars: Cell::new(0),
            zero: -one,
            one,
        }
    }
}

impl Default for Bdd {
    fn default() -> Self {
        Bdd::new(16)
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let storage = self.storage.borrow();
        let cache = self.cache.borrow();
        f.debug_struct("Bdd")
            .field("nodes", &storage.size())
            .field("buckets", &storage.num_buckets())
            .field("vars", &self.num_vars.get())
            .field("cache_hits", &cache.hits())
            .field("cache_misses", &cache.misses())
            .finish()
    }
}

impl Bdd {
    pub fn zero(&self) -> Ref {
        self.zero
    }
    pub fn one(&self) -> Ref {
        self.one
    }

    pub fn is_zero(&self, node: Ref) -> bool {
        node == self.zero
    }
    pub fn is_one(&self, node: Ref) -> bool {
        node == self.one
    }
    pub fn is_terminal(&self, node: Ref) -> bool {
        node.id() == self.one.id()
    }

    /// Number of nodes ever created, the terminal included.
    pub fn num_nodes(&self) -> usize {
        self.storage.borrow().size()
    }

    /// Number of variables handed out by [`Bdd::allocate_variable`].
    pub fn num_vars(&self) -> u32 {
        self.num_vars.get()
    }

    /// Reserve a fresh variable placed below all previously allocated ones.
    pub fn allocate_variable(&self) -> Var {
        let id = self.num_vars.get() + 1;
        self.num_vars.set(id);
        Var::new(id)
    }

    /// Decision variable of the node (`0` for the terminal).
    pub fn variable(&self, id: u32) -> u32 {
        self.storage.borrow().value(id).variable
    }
    pub fn low(&self, id: u32) -> Ref {
        self.storage.borrow().value(id).low
    }
    pub fn high(&self, id: u32) -> Ref {
        self.storage.borrow().value(id).high
    }

    pub fn low_node(&self, node: Ref) -> Ref {
        let low = self.low(node.id());
        if node.is_negated() {
            -low
        } else {
            low
        }
    }
    pub fn high_node(&self, node: Ref) -> Ref {
        let high = self.high(node.id());
        if node.is_negated() {
            -high
        } else {
            high
        }
    }

    /// Top variable of `node`, `0` for constants.
    fn top(&self, node: Ref) -> u32 {
        self.variable(node.id())
    }

    pub fn mk_node(&self, v: u32, low: Ref, high: Ref) -> Ref {
        assert_ne!(v, 0, "Variable index should not be zero");

        if low == high {
            return low;
        }

        // Canonical form: the high edge is regular.
        if high.is_negated() {
            return -self.mk_node(v, -low, -high);
        }

        let id = self.storage.borrow_mut().put(Node { variable: v, low, high });
        Ref::positive(id)
    }

    pub fn mk_var(&self, v: impl Into<u32>) -> Ref {
        self.mk_node(v.into(), self.zero, self.one)
    }

    /// Conjunction of the given literals.
    pub fn mk_cube(&self, literals: impl IntoIterator<Item = Lit>) -> Ref {
        let mut literals: Vec<Lit> = literals.into_iter().collect();
        literals.sort_by_key(|lit| std::cmp::Reverse(lit.var()));
        let mut current = self.one;
        for lit in literals {
            current = if lit.is_negative() {
                self.mk_node(lit.var().id(), current, self.zero)
            } else {
                self.mk_node(lit.var().id(), self.zero, current)
            };
        }
        current
    }

    pub fn top_cofactors(&self, node: Ref, v: u32) -> (Ref, Ref) {
        assert_ne!(v, 0, "Variable index should not be zero");

        if self.is_terminal(node) || v < self.top(node) {
            return (node, node);
        }
        assert_eq!(v, self.top(node));
        (self.low_node(node), self.high_node(node))
    }

    /// Apply the ITE operation to the arguments.
    ///
    /// ```text
    /// ITE(f, g, h) = (f ∧ g) ∨ (¬f ∧ h)
    /// ```
    pub fn apply_ite(&self, f: Ref, g: Ref, h: Ref) -> Ref {
        trace!("apply_ite(f = {}, g = {}, h = {})", f, g, h);

        if self.is_one(f) {
            return g;
        }
        if self.is_zero(f) {
            return h;
        }

        // ite(F,F,H) => ite(F,1,H), ite(F,~F,H) => ite(F,0,H)
        let g = if g == f {
            self.one
        } else if g == -f {
            self.zero
        } else {
            g
        };
        // ite(F,G,F) => ite(F,G,0), ite(F,G,~F) => ite(F,G,1)
        let h = if h == f {
            self.zero
        } else if h == -f {
            self.one
        } else {
            h
        };

        if g == h {
            return g;
        }
        if self.is_one(g) && self.is_zero(h) {
            return f;
        }
        if self.is_zero(g) && self.is_one(h) {
            return -f;
        }

        // ite(~F,G,H) => ite(F,H,G)
        let (f, g, h) = if f.is_negated() { (-f, h, g) } else { (f, g, h) };
        // ite(F,~G,H) => ~ite(F,G,~H)
        let (g, h, negate) = if g.is_negated() { (-g, -h, true) } else { (g, h, false) };

        let key = OpKey::Ite(f, g, h);
        if let Some(res) = self.cache.borrow().get(&key) {
            return if negate { -res } else { res };
        }

        let m = [f, g, h]
            .into_iter()
            .filter(|&node| !self.is_terminal(node))
            .map(|node| self.top(node))
            .min()
            .unwrap_or_else(|| unreachable!("f is not terminal here"));

        let (f0, f1) = self.top_cofactors(f, m);
        let (g0, g1) = self.top_cofactors(g, m);
        let (h0, h1) = self.top_cofactors(h, m);

        let e = self.apply_ite(f0, g0, h0);
        let t = self.apply_ite(f1, g1, h1);
        let res = self.mk_node(m, e, t);
        self.cache.borrow_mut().insert(key, res);

        if negate {
            -res
        } else {
            res
        }
    }

    pub fn apply_not(&self, f: Ref) -> Ref {
        -f
    }

    pub fn apply_and(&self, u: Ref, v: Ref) -> Ref {
        self.apply_ite(u, v, self.zero)
    }

    pub fn apply_or(&self, u: Ref, v: Ref) -> Ref {
        self.apply_ite(u, self.one, v)
    }

    pub fn apply_xor(&self, u: Ref, v: Ref) -> Ref {
        self.apply_ite(u, -v, v)
    }

    pub fn apply_eq(&self, u: Ref, v: Ref) -> Ref {
        self.apply_ite(u, v, -v)
    }

    pub fn apply_imply(&self, u: Ref, v: Ref) -> Ref {
        self.apply_ite(u, v, self.one)
    }

    pub fn apply_and_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Ref {
        nodes.into_iter().fold(self.one, |acc, node| self.apply_and(acc, node))
    }

    pub fn apply_or_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Ref {
        nodes.into_iter().fold(self.zero, |acc, node| self.apply_or(acc, node))
    }

    /// Whether `f → g` is valid.
    pub fn is_subset(&self, f: Ref, g: Ref) -> bool {
        self.is_zero(self.apply_and(f, -g))
    }

    /// f|v<-b
    pub fn restrict(&self, f: Ref, v: Var, b: bool) -> Ref {
        let mut cache = HashMap::new();
        self.restrict_(f, v.id(), b, &mut cache)
    }

    fn restrict_(&self, f: Ref, v: u32, b: bool, cache: &mut HashMap<Ref, Ref>) -> Ref {
        if self.is_terminal(f) {
            return f;
        }

        let i = self.top(f);
        if v < i {
            // 'f' does not depend on 'v'
            return f;
        }
        if v == i {
            return if b { self.high_node(f) } else { self.low_node(f) };
        }

        if let Some(&res) = cache.get(&f) {
            return res;
        }

        let low = self.restrict_(self.low_node(f), v, b, cache);
        let high = self.restrict_(self.high_node(f), v, b, cache);
        let res = self.mk_node(i, low, high);
        cache.insert(f, res);
        res
    }

    /// Existential quantification: `∃vars. f`.
    pub fn exists(&self, f: Ref, vars: &[Var]) -> Ref {
        let cube = self.mk_cube(vars.iter().map(|v| v.pos()));
        self.exists_cube(f, cube)
    }

    fn exists_cube(&self, f: Ref, cube: Ref) -> Ref {
        if self.is_terminal(f) {
            return f;
        }

        let v = self.top(f);

        // Skip quantified variables above the top of `f`.
        let mut cube = cube;
        while !self.is_one(cube) && self.top(cube) < v {
            cube = self.high_node(cube);
        }
        if self.is_one(cube) {
            return f;
        }

        let key = OpKey::Exists(f, cube);
        if let Some(res) = self.cache.borrow().get(&key) {
            return res;
        }

        let f0 = self.low_node(f);
        let f1 = self.high_node(f);
        let res = if self.top(cube) == v {
            let rest = self.high_node(cube);
            let r0 = self.exists_cube(f0, rest);
            if self.is_one(r0) {
                r0
            } else {
                let r1 = self.exists_cube(f1, rest);
                self.apply_or(r0, r1)
            }
        } else {
            let r0 = self.exists_cube(f0, cube);
            let r1 = self.exists_cube(f1, cube);
            self.mk_node(v, r0, r1)
        };

        self.cache.borrow_mut().insert(key, res);
        res
    }

    /// Relational product: `∃vars. f ∧ g`.
    pub fn rel_product(&self, f: Ref, g: Ref, vars: &[Var]) -> Ref {
        let conj = self.apply_and(f, g);
        self.exists(conj, vars)
    }

    /// Rename variables of `f` according to `perm`; unmapped variables stay.
    ///
    /// The renaming does not need to preserve the variable order:
    /// every node is rebuilt through ITE on its new variable.
    pub fn rename_vars(&self, f: Ref, perm: &HashMap<Var, Var>) -> Ref {
        let mut cache = HashMap::new();
        self.rename_(f, perm, &mut cache)
    }

    fn rename_(&self, f: Ref, perm: &HashMap<Var, Var>, cache: &mut HashMap<Ref, Ref>) -> Ref {
        if self.is_terminal(f) {
            return f;
        }
        if f.is_negated() {
            return -self.rename_(-f, perm, cache);
        }
        if let Some(&res) = cache.get(&f) {
            return res;
        }

        let v = Var::new(self.top(f));
        let low = self.rename_(self.low_node(f), perm, cache);
        let high = self.rename_(self.high_node(f), perm, cache);
        let target = perm.get(&v).copied().unwrap_or(v);
        let res = self.apply_ite(self.mk_var(target), high, low);
        cache.insert(f, res);
        res
    }

    /// Number of distinct nodes reachable from `f`, the terminal included.
    pub fn size(&self, f: Ref) -> usize {
        let mut visited = HashSet::new();
        let mut stack = vec![f.id()];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) || id == self.one.id() {
                continue;
            }
            stack.push(self.low(id).id());
            stack.push(self.high(id).id());
        }
        visited.len()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_var() {
        let bdd = Bdd::default();

        let x = bdd.mk_var(1u32);

        assert_eq!(bdd.variable(x.id()), 1);
        assert_eq!(bdd.high_node(x), bdd.one());
        assert_eq!(bdd.low_node(x), bdd.zero());
        assert_eq!(bdd.high_node(-x), bdd.zero());
        assert_eq!(bdd.low_node(-x), bdd.one());
    }

    #[test]
    fn test_terminal() {
        let bdd = Bdd::default();

        assert!(bdd.is_terminal(bdd.zero()));
        assert!(bdd.is_zero(bdd.zero()));
        assert!(!bdd.is_one(bdd.zero()));
        assert!(bdd.is_one(bdd.one()));
        assert_eq!(-bdd.one(), bdd.zero());
        assert_eq!(bdd.variable(bdd.one().id()), 0);
    }

    #[test]
    fn test_cube() {
        let bdd = Bdd::default();

        let x1 = bdd.mk_var(1u32);
        let x2 = bdd.mk_var(2u32);
        let x3 = bdd.mk_var(3u32);

        let f = bdd.apply_and_many([x1, -x2, x3]);
        let cube = bdd.mk_cube([1, -2, 3].map(Lit::from_dimacs));
        assert_eq!(f, cube);
    }

    #[test]
    fn test_de_morgan() {
        let bdd = Bdd::default();

        let x = bdd.mk_var(1u32);
        let y = bdd.mk_var(2u32);

        assert_eq!(-bdd.apply_and(x, y), bdd.apply_or(-x, -y));
        assert_eq!(-bdd.apply_or(x, y), bdd.apply_and(-x, -y));
    }

    #[test]
    fn test_xor_eq() {
        let bdd = Bdd::default();

        let x = bdd.mk_var(1u32);
        let y = bdd.mk_var(2u32);
        let f = bdd.apply_and(x, y);

        assert_eq!(bdd.apply_xor(f, f), bdd.zero());
        assert_eq!(bdd.apply_xor(f, -f), bdd.one());
        assert_eq!(bdd.apply_eq(x, y), -bdd.apply_xor(x, y));
        assert_eq!(bdd.apply_imply(x, y), bdd.apply_or(-x, y));
    }

    #[test]
    fn test_ite_order_independent() {
        let bdd = Bdd::default();

        let x1 = bdd.mk_var(1u32);
        let x2 = bdd.mk_var(2u32);
        let x3 = bdd.mk_var(3u32);

        // Build the same function with variables combined in two different orders.
        let f = bdd.apply_or(bdd.apply_and(x3, x1), bdd.apply_and(-x3, x2));
        let g = bdd.apply_ite(x3, x1, x2);
        assert_eq!(f, g);
    }

    #[test]
    fn test_is_subset() {
        let bdd = Bdd::default();

        let x = bdd.mk_var(1u32);
        let y = bdd.mk_var(2u32);
        let xy = bdd.apply_and(x, y);

        assert!(bdd.is_subset(xy, x));
        assert!(!bdd.is_subset(x, xy));
        assert!(bdd.is_subset(bdd.zero(), x));
        assert!(bdd.is_subset(x, bdd.one()));
    }

    #[test]
    fn test_restrict() {
        let bdd = Bdd::default();

        let x1 = bdd.mk_var(1u32);
        let x2 = bdd.mk_var(2u32);
        let x3 = bdd.mk_var(3u32);

        let f = bdd.apply_or(bdd.apply_eq(x1, x2), x3);
        let f_x2_zero = bdd.restrict(f, Var::new(2), false);
        assert_eq!(f_x2_zero, bdd.apply_or(-x1, x3));
    }

    #[test]
    fn test_exists() {
        let bdd = Bdd::default();

        let x1 = bdd.mk_var(1u32);
        let x2 = bdd.mk_var(2u32);
        let x3 = bdd.mk_var(3u32);

        // ∃x2. (x1 ∧ x2) ∨ (¬x2 ∧ x3) = x1 ∨ x3
        let f = bdd.apply_ite(x2, x1, x3);
        assert_eq!(bdd.exists(f, &[Var::new(2)]), bdd.apply_or(x1, x3));

        // ∃x1,x3. x1 ∧ ¬x3 = 1
        let g = bdd.apply_and(x1, -x3);
        assert_eq!(bdd.exists(g, &[Var::new(1), Var::new(3)]), bdd.one());

        assert_eq!(bdd.exists(bdd.zero(), &[Var::new(1)]), bdd.zero());
        assert_eq!(bdd.exists(x2, &[]), x2);
    }

    #[test]
    fn test_rel_product() {
        let bdd = Bdd::default();

        let x1 = bdd.mk_var(1u32);
        let x2 = bdd.mk_var(2u32);

        // ∃x1. x1 ∧ (x1 ↔ x2) = x2
        let r = bdd.rel_product(x1, bdd.apply_eq(x1, x2), &[Var::new(1)]);
        assert_eq!(r, x2);
    }

    #[test]
    fn test_rename_vars() {
        let bdd = Bdd::default();

        let x1 = bdd.mk_var(1u32);
        let x2 = bdd.mk_var(2u32);
        let x3 = bdd.mk_var(3u32);
        let x4 = bdd.mk_var(4u32);

        let f = bdd.apply_and(x1, -x3);

        // Order-preserving: 1 -> 2, 3 -> 4
        let perm = HashMap::from([(Var::new(1), Var::new(2)), (Var::new(3), Var::new(4))]);
        assert_eq!(bdd.rename_vars(f, &perm), bdd.apply_and(x2, -x4));

        // Order-reversing swap: 1 <-> 3
        let swap = HashMap::from([(Var::new(1), Var::new(3)), (Var::new(3), Var::new(1))]);
        assert_eq!(bdd.rename_vars(f, &swap), bdd.apply_and(x3, -x1));
    }

    #[test]
    fn test_size() {
        let bdd = Bdd::default();

        let x1 = bdd.mk_var(1u32);
        let x3 = bdd.mk_var(3u32);
        let f = bdd.apply_xor(x1, x3);

        // x1 node, one x3 node shared through complement edges, terminal.
        assert_eq!(bdd.size(f), 3);
        assert_eq!(bdd.size(bdd.zero()), 1);
    }

    #[test]
    fn test_allocate_variable() {
        let bdd = Bdd::default();
        assert_eq!(bdd.allocate_variable(), Var::new(1));
        assert_eq!(bdd.allocate_variable(), Var::new(2));
        assert_eq!(bdd.num_vars(), 2);
    }
}
