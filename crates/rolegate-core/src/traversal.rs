//! Hierarchy traversal strategies.
//!
//! Both strategies walk `Role::parents()` lazily and keep a visited set keyed
//! by role name. Role graphs built from `Arc` links are acyclic, so the
//! visited set exists to collapse diamond inheritance: an ancestor shared by
//! two parents is yielded once.
//!
//! The order only matters for how quickly a caller that stops at the first
//! match finds it. The set of roles yielded is the same for both strategies.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use rolegate_contracts::role::Role;

use crate::traits::TraversalStrategy;

/// A lazy, finite sequence of roles produced by a `TraversalStrategy`.
pub type RoleIter = Box<dyn Iterator<Item = Arc<Role>> + Send>;

// ── Breadth-first ─────────────────────────────────────────────────────────────

/// Visits the starting role, then its parents, then their parents, and so on.
///
/// Ancestors closer to the starting role are visited before farther ones.
/// Parents at the same distance are visited in declaration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirstStrategy;

impl TraversalStrategy for BreadthFirstStrategy {
    fn roles_iter(&self, start: Arc<Role>) -> RoleIter {
        Box::new(BreadthFirstIter::new(start))
    }
}

struct BreadthFirstIter {
    queue: VecDeque<Arc<Role>>,
    // Names are recorded when a role is queued, so a role is queued once.
    seen: HashSet<String>,
}

impl BreadthFirstIter {
    fn new(start: Arc<Role>) -> Self {
        let mut seen = HashSet::new();
        seen.insert(start.name().to_string());
        let mut queue = VecDeque::new();
        queue.push_back(start);
        Self { queue, seen }
    }
}

impl Iterator for BreadthFirstIter {
    type Item = Arc<Role>;

    fn next(&mut self) -> Option<Self::Item> {
        let role = self.queue.pop_front()?;
        for parent in role.parents() {
            if self.seen.insert(parent.name().to_string()) {
                self.queue.push_back(Arc::clone(parent));
            }
        }
        Some(role)
    }
}

// ── Depth-first ───────────────────────────────────────────────────────────────

/// Visits the starting role, then exhausts the first parent's ancestry before
/// moving to the second parent (pre-order depth-first walk).
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstStrategy;

impl TraversalStrategy for DepthFirstStrategy {
    fn roles_iter(&self, start: Arc<Role>) -> RoleIter {
        Box::new(DepthFirstIter {
            stack: vec![start],
            visited: HashSet::new(),
        })
    }
}

struct DepthFirstIter {
    stack: Vec<Arc<Role>>,
    visited: HashSet<String>,
}

impl Iterator for DepthFirstIter {
    type Item = Arc<Role>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(role) = self.stack.pop() {
            if !self.visited.insert(role.name().to_string()) {
                continue;
            }
            // Reversed so the first declared parent is popped next.
            for parent in role.parents().iter().rev() {
                if !self.visited.contains(parent.name()) {
                    self.stack.push(Arc::clone(parent));
                }
            }
            return Some(role);
        }
        None
    }
}
