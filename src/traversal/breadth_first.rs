//! Level-order iteration

use std::collections::VecDeque;

use crate::index::children_indexes;

/// Breadth-first iterator yielding `(level, index)`
///
/// Children are enqueued in child order when their parent is dequeued.
#[derive(Debug, Clone)]
pub struct BreadthFirst<'a> {
    structure: &'a [usize],
    queue: VecDeque<(usize, usize)>,
    max_depth: usize,
}

impl<'a> BreadthFirst<'a> {
    /// Traverse the subtree at `start`, levels relative to it
    pub fn new(structure: &'a [usize], start: usize, max_depth: usize) -> Self {
        let mut queue = VecDeque::new();
        if start < structure.len() && max_depth > 0 {
            queue.push_back((0, start));
        }
        Self {
            structure,
            queue,
            max_depth,
        }
    }
}

impl Iterator for BreadthFirst<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        let (level, index) = self.queue.pop_front()?;
        if level + 1 < self.max_depth {
            for child in children_indexes(self.structure, index) {
                self.queue.push_back((level + 1, child));
            }
        }
        Some((level, index))
    }
}
