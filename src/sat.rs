//! Picking and counting satisfying assignments.

use std::collections::HashMap;

use num_bigint::BigUint;

use crate::bdd::Bdd;
use crate::reference::Ref;
use crate::types::{Lit, Var};

impl Bdd {
    /// Picks a full assignment to `vars` under which `node` stays satisfiable.
    ///
    /// Variables are fixed one by one in the given order, `false` first, so the
    /// result is deterministic for a given function and variable order.
    /// Variables of `node` outside `vars` are left unconstrained.
    pub fn pick_minterm(&self, node: Ref, vars: &[Var]) -> Option<Vec<Lit>> {
        if self.is_zero(node) {
            return None;
        }

        let mut current = node;
        let mut minterm = Vec::with_capacity(vars.len());
        for &var in vars {
            let low = self.restrict(current, var, false);
            if !self.is_zero(low) {
                minterm.push(var.neg());
                current = low;
            } else {
                minterm.push(var.pos());
                current = self.restrict(current, var, true);
            }
        }
        debug_assert!(!self.is_zero(current));

        Some(minterm)
    }

    /// Number of assignments to `vars` satisfying `node`.
    ///
    /// Returns `None` if `node` depends on a variable outside `vars`.
    pub fn sat_count(&self, node: Ref, vars: &[Var]) -> Option<BigUint> {
        let mut order: Vec<u32> = vars.iter().map(|v| v.id()).collect();
        order.sort_unstable();
        order.dedup();
        let levels: HashMap<u32, usize> = order.iter().enumerate().map(|(level, &id)| (id, level)).collect();

        let mut counter = MintermCounter {
            bdd: self,
            levels: &levels,
            num_levels: order.len(),
            cache: HashMap::new(),
        };
        let level = counter.level(node)?;
        let below = counter.count(node)?;
        Some(below << level)
    }
}

/// Counts assignments to the variables at or below the level of a node.
struct MintermCounter<'a> {
    bdd: &'a Bdd,
    levels: &'a HashMap<u32, usize>,
    num_levels: usize,
    cache: HashMap<Ref, BigUint>,
}

impl MintermCounter<'_> {
    fn level(&self, node: Ref) -> Option<usize> {
        if self.bdd.is_terminal(node) {
            return Some(self.num_levels);
        }
        self.levels.get(&self.bdd.variable(node.id())).copied()
    }

    fn count(&mut self, node: Ref) -> Option<BigUint> {
        if self.bdd.is_zero(node) {
            return Some(BigUint::ZERO);
        }
        if self.bdd.is_one(node) {
            return Some(BigUint::from(1u32));
        }
        if let Some(count) = self.cache.get(&node) {
            return Some(count.clone());
        }

        let level = self.level(node)?;
        let regular = node.regular();
        let mut count = BigUint::ZERO;
        for child in [self.bdd.low(regular.id()), self.bdd.high(regular.id())] {
            let gap = self.level(child)? - level - 1;
            count += self.count(child)? << gap;
        }
        if node.is_negated() {
            count = (BigUint::from(1u32) << (self.num_levels - level)) - count;
        }

        self.cache.insert(node, count.clone());
        Some(count)
    }
}
