//! Depth-first descent and the branch/path iterators built on it

use crate::index::ChildIndexes;

/// Pending-node stack shared by the depth-first iterators
///
/// Stack depth: O(height x width) indexes in the worst case, never call
/// frames.
#[derive(Debug, Clone)]
struct Descent<'a> {
    structure: &'a [usize],

    /// Nodes still to visit, paired with their level
    pending: Vec<(usize, usize)>,

    max_depth: usize,
}

impl<'a> Descent<'a> {
    fn new(structure: &'a [usize], start: usize, max_depth: usize) -> Self {
        let mut pending = Vec::new();
        if start < structure.len() && max_depth > 0 {
            pending.push((0, start));
        }
        Self {
            structure,
            pending,
            max_depth,
        }
    }

    /// Pop the next node and schedule its children, first child on top
    ///
    /// Returns the node, its level and whether its children were expanded.
    fn step(&mut self) -> Option<(usize, usize, bool)> {
        let (level, index) = self.pending.pop()?;
        let expand = level + 1 < self.max_depth && self.structure[index] > 0;
        if expand {
            // ChildIndexes runs last to first, leaving the first child on top
            for child in ChildIndexes::new(self.structure, index) {
                self.pending.push((level + 1, child));
            }
        }
        Some((level, index, expand))
    }
}

/// Pre-order iterator yielding `(level, index)`
///
/// A node is followed by its children in child order.
#[derive(Debug, Clone)]
pub struct DepthFirst<'a> {
    descent: Descent<'a>,
}

impl<'a> DepthFirst<'a> {
    /// Traverse the subtree at `start`, levels relative to it
    pub fn new(structure: &'a [usize], start: usize, max_depth: usize) -> Self {
        Self {
            descent: Descent::new(structure, start, max_depth),
        }
    }
}

impl Iterator for DepthFirst<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        self.descent
            .step()
            .map(|(level, index, _)| (level, index))
    }
}

/// Ancestor chain tracked alongside the descent
#[derive(Debug, Clone)]
struct Chain<'a> {
    descent: Descent<'a>,
    active: Vec<usize>,
}

impl<'a> Chain<'a> {
    fn new(structure: &'a [usize], start: usize, max_depth: usize) -> Self {
        Self {
            descent: Descent::new(structure, start, max_depth),
            active: Vec::new(),
        }
    }

    /// Retract the chain to the popped node's level and extend it
    fn advance(&mut self) -> Option<bool> {
        let (level, index, expanded) = self.descent.step()?;
        self.active.truncate(level);
        self.active.push(index);
        Some(expanded)
    }
}

/// Iterator over branches: index chains from the start node to every leaf
///
/// Under a depth bound a node on the last level counts as a leaf.
#[derive(Debug, Clone)]
pub struct Branches<'a> {
    chain: Chain<'a>,
}

impl<'a> Branches<'a> {
    /// Branches of the subtree at `start`
    pub fn new(structure: &'a [usize], start: usize, max_depth: usize) -> Self {
        Self {
            chain: Chain::new(structure, start, max_depth),
        }
    }
}

impl Iterator for Branches<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        loop {
            let expanded = self.chain.advance()?;
            if !expanded {
                return Some(self.chain.active.clone());
            }
        }
    }
}

/// Iterator over paths: the index chain of every node, in pre-order
#[derive(Debug, Clone)]
pub struct Paths<'a> {
    chain: Chain<'a>,
}

impl<'a> Paths<'a> {
    /// Paths of the subtree at `start`
    pub fn new(structure: &'a [usize], start: usize, max_depth: usize) -> Self {
        Self {
            chain: Chain::new(structure, start, max_depth),
        }
    }
}

impl Iterator for Paths<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        self.chain.advance()?;
        Some(self.chain.active.clone())
    }
}
