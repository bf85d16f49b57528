//! Mutable scratch buffers for building and editing encodings
//!
//! A [`TreeBuffer`] is owned exclusively by the call that edits it. Published
//! trees are never touched: an edit copies the encoding into a buffer,
//! reshapes it with the primitives below and publishes a fresh tree.
//!
//! Every shifting primitive has a `_tracked` form that updates a slice of
//! caller-held indexes in lockstep, so multi-step edits never observe stale
//! positions.

mod tracking;

use tracing::trace;

use crate::index;
use crate::TreeError;

/// Growable `(structure, values)` pair mirroring the encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeBuffer<T> {
    structure: Vec<usize>,
    values: Vec<T>,
}

impl<T> Default for TreeBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeBuffer<T> {
    /// Empty buffer
    pub fn new() -> Self {
        Self {
            structure: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Empty buffer with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            structure: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Wrap existing sequences; only their lengths are checked
    pub fn from_parts(structure: Vec<usize>, values: Vec<T>) -> Result<Self, TreeError> {
        if structure.len() != values.len() {
            return Err(TreeError::LengthMismatch {
                structure: structure.len(),
                values: values.len(),
            });
        }
        Ok(Self { structure, values })
    }

    /// Split back into the two sequences
    pub fn into_parts(self) -> (Vec<usize>, Vec<T>) {
        (self.structure, self.values)
    }

    /// Child counts
    pub fn structure(&self) -> &[usize] {
        &self.structure
    }

    /// Node values
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.structure.len()
    }

    /// No slots at all
    pub fn is_empty(&self) -> bool {
        self.structure.is_empty()
    }

    /// Index of the last slot (the root of a single tree)
    pub fn root(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    /// Parent of `index`
    pub fn parent_index(&self, index: usize) -> Option<usize> {
        index::parent_index(&self.structure, index)
    }

    /// Subtree size at `index`
    pub fn tree_size(&self, index: usize) -> usize {
        index::tree_size(&self.structure, index)
    }

    /// Leftmost index of the subtree at `index`
    pub fn bottom_index(&self, index: usize) -> usize {
        index::bottom_index(&self.structure, index)
    }

    /// Direct children of `index` in child order
    pub fn children_indexes(&self, index: usize) -> Vec<usize> {
        index::children_indexes(&self.structure, index)
    }

    /// Append a raw slot at the end
    pub fn push(&mut self, children: usize, value: T) {
        self.structure.push(children);
        self.values.push(value);
    }

    /// Child count at `index`
    pub fn children_count(&self, index: usize) -> usize {
        self.structure[index]
    }

    /// Overwrite the child count at `index`
    pub fn set_children_count(&mut self, index: usize, children: usize) {
        self.structure[index] = children;
    }

    /// Value at `index`
    pub fn value(&self, index: usize) -> &T {
        &self.values[index]
    }

    /// Swap in a new value at `index`, returning the old one
    pub fn replace_value(&mut self, index: usize, value: T) -> T {
        std::mem::replace(&mut self.values[index], value)
    }

    /// Insert a leaf slot at `index` and count it as a child of `parent`
    pub fn insert_value(&mut self, index: usize, parent: Option<usize>, value: T) {
        self.insert_value_tracked(index, parent, value, &mut []);
    }

    /// [`insert_value`](Self::insert_value) keeping `tracked` in lockstep
    pub fn insert_value_tracked(
        &mut self,
        index: usize,
        parent: Option<usize>,
        value: T,
        tracked: &mut [usize],
    ) {
        if let Some(parent) = parent {
            self.structure[parent] += 1;
        }
        self.structure.insert(index, 0);
        self.values.insert(index, value);
        tracking::inserted(tracked, index, 1);
    }

    /// Copy an encoded slice in at `index`
    ///
    /// Parent counts are left to the caller.
    pub fn insert_slice(&mut self, index: usize, structure: &[usize], values: &[T])
    where
        T: Clone,
    {
        self.insert_slice_tracked(index, structure, values, &mut []);
    }

    /// [`insert_slice`](Self::insert_slice) keeping `tracked` in lockstep
    pub fn insert_slice_tracked(
        &mut self,
        index: usize,
        structure: &[usize],
        values: &[T],
        tracked: &mut [usize],
    ) where
        T: Clone,
    {
        debug_assert_eq!(structure.len(), values.len());
        self.structure
            .splice(index..index, structure.iter().copied());
        self.values.splice(index..index, values.iter().cloned());
        tracking::inserted(tracked, index, structure.len());
    }

    /// Remove the single slot at `index`, promoting its children to `parent`
    pub fn remove_value(&mut self, index: usize, parent: Option<usize>) -> T {
        self.remove_value_tracked(index, parent, &mut [])
    }

    /// [`remove_value`](Self::remove_value) keeping `tracked` in lockstep
    pub fn remove_value_tracked(
        &mut self,
        index: usize,
        parent: Option<usize>,
        tracked: &mut [usize],
    ) -> T {
        let children = self.structure.remove(index);
        if let Some(parent) = parent {
            // The parent sits right of `index` and has already shifted left
            self.structure[parent - 1] = self.structure[parent - 1] + children - 1;
        }
        tracking::removed(tracked, index, index + 1);
        self.values.remove(index)
    }

    /// Remove the whole subtree at `index`, returning the number of slots removed
    pub fn remove_tree(&mut self, index: usize, parent: Option<usize>) -> usize {
        self.remove_tree_tracked(index, parent, &mut [])
    }

    /// [`remove_tree`](Self::remove_tree) keeping `tracked` in lockstep
    pub fn remove_tree_tracked(
        &mut self,
        index: usize,
        parent: Option<usize>,
        tracked: &mut [usize],
    ) -> usize {
        let size = self.tree_size(index);
        if size == 0 {
            return 0;
        }
        if let Some(parent) = parent {
            self.structure[parent] -= 1;
        }
        let bottom = index + 1 - size;
        self.structure.drain(bottom..=index);
        self.values.drain(bottom..=index);
        tracking::removed(tracked, bottom, index + 1);
        size
    }

    /// Replace the subtree at `index` with an encoded slice
    ///
    /// The parent count is unchanged. Returns the index of the new subtree
    /// root, or `None` when the replacement is empty (the old subtree is then
    /// simply removed).
    pub fn replace_tree(
        &mut self,
        index: usize,
        parent: Option<usize>,
        structure: &[usize],
        values: &[T],
    ) -> Option<usize>
    where
        T: Clone,
    {
        if structure.is_empty() {
            self.remove_tree(index, parent);
            return None;
        }
        let bottom = self.bottom_index(index);
        self.structure
            .splice(bottom..=index, structure.iter().copied());
        self.values.splice(bottom..=index, values.iter().cloned());
        Some(bottom + structure.len() - 1)
    }

    /// Trade the adjacent ranges `[a, b)` and `[b, c)`
    ///
    /// The relocation primitive: relative order inside each range and of all
    /// other slots is preserved.
    pub fn swap_ranges(&mut self, a: usize, b: usize, c: usize) {
        self.swap_ranges_tracked(a, b, c, &mut []);
    }

    /// [`swap_ranges`](Self::swap_ranges) keeping `tracked` in lockstep
    pub fn swap_ranges_tracked(&mut self, a: usize, b: usize, c: usize, tracked: &mut [usize]) {
        debug_assert!(a <= b && b <= c && c <= self.len());
        if a == b || b == c {
            return;
        }
        trace!(a, b, c, "relocating range");
        self.structure[a..c].rotate_left(b - a);
        self.values[a..c].rotate_left(b - a);
        tracking::swapped(tracked, a, b, c);
    }
}
