//! Lazy children enumeration

use super::tree_size;

/// Iterator over the direct children of a node, last child first
///
/// Each step skips one whole subtree leftward, so the iterator is single-pass
/// and costs the size of the visited children in total.
#[derive(Debug, Clone)]
pub struct ChildIndexes<'a> {
    structure: &'a [usize],
    next: usize,
    remaining: usize,
}

impl<'a> ChildIndexes<'a> {
    /// Children of `parent`; empty for a leaf or an index past the end
    pub fn new(structure: &'a [usize], parent: usize) -> Self {
        let remaining = structure.get(parent).copied().unwrap_or(0);
        Self {
            structure,
            next: parent.saturating_sub(1),
            remaining,
        }
    }
}

impl Iterator for ChildIndexes<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }

        let current = self.next;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next = current - tree_size(self.structure, current);
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ChildIndexes<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_from_last_to_first() {
        // a(b(d,e),c)
        let structure = [0, 0, 2, 0, 2];
        let children: Vec<usize> = ChildIndexes::new(&structure, 4).collect();
        assert_eq!(children, vec![3, 2]);
        assert_eq!(ChildIndexes::new(&structure, 4).len(), 2);
        assert_eq!(ChildIndexes::new(&structure, 0).count(), 0);
        assert_eq!(ChildIndexes::new(&structure, 42).count(), 0);
    }
}
