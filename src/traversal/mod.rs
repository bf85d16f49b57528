//! Explicit-stack tree traversal
//!
//! Every iterator here keeps its pending work in a heap-allocated stack or
//! queue of indexes, so arbitrarily tall or wide trees never deepen the call
//! stack. Iterators are lazy and single-pass: traverse again by building a
//! new one.
//!
//! Depth bounds count levels: `max_depth = 1` visits only the start node,
//! `max_depth = 0` visits nothing. Nodes on the last permitted level are
//! reported but their children are not expanded.

mod breadth_first;
mod depth_first;

pub use breadth_first::BreadthFirst;
pub use depth_first::{Branches, DepthFirst, Paths};

/// Depth bound meaning "no bound"
pub const UNBOUNDED: usize = usize::MAX;

/// Largest level reached below `start`, plus one (0 for an empty tree)
pub fn height(structure: &[usize], start: usize) -> usize {
    DepthFirst::new(structure, start, UNBOUNDED)
        .map(|(level, _)| level + 1)
        .max()
        .unwrap_or(0)
}
