//! Persistent tree facade
//!
//! [`ArrayTree`] publishes an immutable encoding behind shared pointers:
//! cloning is cheap and every edit returns a new tree. [`NodeTree`] is the
//! linked alternative; both implement the [`TreeLike`] conversion contract.

mod edit;
mod node;
mod query;

pub use node::{NodeTree, TreeNode};

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::buffer::TreeBuffer;
use crate::index;
use crate::TreeError;

/// Conversion contract shared by every tree representation
///
/// The encoding is the post-order `(structure, values)` pair described in the
/// crate documentation; any representation can be rebuilt from it.
pub trait TreeLike<T: Clone>: Sized {
    /// Encoding as read-only sequences, borrowed when the representation
    /// already stores them
    fn to_slices(&self) -> (Cow<'_, [usize]>, Cow<'_, [T]>);

    /// Rebuild from an encoding
    fn from_slices(structure: &[usize], values: &[T]) -> Result<Self, TreeError>;

    /// Encoding as growable scratch buffers
    fn to_buffers(&self) -> TreeBuffer<T> {
        let (structure, values) = self.to_slices();
        let mut buffer = TreeBuffer::with_capacity(structure.len());
        buffer.insert_slice(0, &structure, &values);
        buffer
    }

    /// Rebuild from scratch buffers
    fn from_buffers(buffer: TreeBuffer<T>) -> Result<Self, TreeError>;

    /// Number of nodes
    fn size(&self) -> usize;

    /// No nodes at all
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// The empty tree
    fn empty() -> Self;
}

/// Move a tree between representations
///
/// Fails only when the source hands out an encoding that is not a single
/// valid tree.
pub fn convert<T, A, B>(tree: &A) -> Result<B, TreeError>
where
    T: Clone,
    A: TreeLike<T>,
    B: TreeLike<T>,
{
    let (structure, values) = tree.to_slices();
    B::from_slices(&structure, &values)
}

/// Outcome of an edit that must report whether it took effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    /// The edit took effect
    Applied(T),

    /// The target did not exist; carries the original
    Rejected(T),
}

impl<T> Edit<T> {
    /// The edit took effect
    pub fn is_applied(&self) -> bool {
        matches!(self, Edit::Applied(_))
    }

    /// The resulting tree either way
    pub fn into_inner(self) -> T {
        match self {
            Edit::Applied(tree) | Edit::Rejected(tree) => tree,
        }
    }

    /// The new tree, if the edit took effect
    pub fn applied(self) -> Option<T> {
        match self {
            Edit::Applied(tree) => Some(tree),
            Edit::Rejected(_) => None,
        }
    }
}

/// Immutable tree stored as aligned post-order sequences
///
/// Structural and value-wise equality: two trees are equal when their
/// encodings are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArrayTree<T> {
    /// Direct-child count per node, root last
    structure: Arc<[usize]>,

    /// Payload per node, aligned with `structure`
    values: Arc<[T]>,
}

impl<T> ArrayTree<T> {
    /// The empty tree
    pub fn empty() -> Self {
        Self {
            structure: Arc::from(Vec::new()),
            values: Arc::from(Vec::new()),
        }
    }

    /// Single-node tree
    pub fn leaf(value: T) -> Self {
        Self {
            structure: Arc::from(vec![0]),
            values: Arc::from(vec![value]),
        }
    }

    /// Publish sequences already known to be a valid single tree
    pub(crate) fn from_trusted(structure: Vec<usize>, values: Vec<T>) -> Self {
        debug_assert_eq!(structure.len(), values.len());
        debug_assert!(index::validate(&structure).is_ok());
        Self {
            structure: Arc::from(structure),
            values: Arc::from(values),
        }
    }

    /// Publish an edited scratch buffer
    pub(crate) fn publish(buffer: TreeBuffer<T>) -> Self {
        let (structure, values) = buffer.into_parts();
        Self::from_trusted(structure, values)
    }

    /// Rebuild from scratch buffers, checking the encoding
    pub fn from_buffers(buffer: TreeBuffer<T>) -> Result<Self, TreeError> {
        index::validate(buffer.structure())?;
        Ok(Self::publish(buffer))
    }

    /// Child counts, root last
    pub fn structure(&self) -> &[usize] {
        &self.structure
    }

    /// Values aligned with [`structure`](Self::structure)
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Number of nodes
    pub fn size(&self) -> usize {
        self.structure.len()
    }

    /// No nodes at all
    pub fn is_empty(&self) -> bool {
        self.structure.is_empty()
    }

    /// Exactly one node
    pub fn is_leaf(&self) -> bool {
        self.size() == 1
    }

    /// Index of the root (the last slot)
    pub fn root_index(&self) -> Option<usize> {
        self.size().checked_sub(1)
    }

    /// Root value
    pub fn head(&self) -> Option<&T> {
        self.values.last()
    }

    /// Number of direct children of the root
    pub fn width(&self) -> usize {
        self.structure.last().copied().unwrap_or(0)
    }
}

impl<T: Clone> ArrayTree<T> {
    /// Rebuild from an encoding, checking it
    pub fn from_slices(structure: &[usize], values: &[T]) -> Result<Self, TreeError> {
        Self::from_buffers(TreeBuffer::from_parts(structure.to_vec(), values.to_vec())?)
    }

    /// Tree with `value` at the root and `children` below it, in order
    ///
    /// Empty children are skipped.
    pub fn node<I>(value: T, children: I) -> Self
    where
        I: IntoIterator<Item = ArrayTree<T>>,
    {
        let mut buffer = TreeBuffer::new();
        let mut width = 0;
        for child in children.into_iter().filter(|child| !child.is_empty()) {
            let end = buffer.len();
            buffer.insert_slice(end, child.structure(), child.values());
            width += 1;
        }
        buffer.push(width, value);
        Self::publish(buffer)
    }

    /// Copy the encoding into a scratch buffer
    pub fn to_buffer(&self) -> TreeBuffer<T> {
        let mut buffer = TreeBuffer::with_capacity(self.size() + 1);
        buffer.insert_slice(0, &self.structure, &self.values);
        buffer
    }

    /// Subtree rooted at `index`, copied out of the encoding
    pub(crate) fn subtree_at(&self, index: usize) -> Self {
        if index >= self.size() {
            return Self::empty();
        }
        let bottom = index::bottom_index(&self.structure, index);
        Self::from_trusted(
            self.structure[bottom..=index].to_vec(),
            self.values[bottom..=index].to_vec(),
        )
    }
}

impl<T> Default for ArrayTree<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> TryFrom<TreeBuffer<T>> for ArrayTree<T> {
    type Error = TreeError;

    fn try_from(buffer: TreeBuffer<T>) -> Result<Self, Self::Error> {
        Self::from_buffers(buffer)
    }
}

impl<T: Clone> TreeLike<T> for ArrayTree<T> {
    fn to_slices(&self) -> (Cow<'_, [usize]>, Cow<'_, [T]>) {
        (Cow::Borrowed(self.structure()), Cow::Borrowed(self.values()))
    }

    fn from_slices(structure: &[usize], values: &[T]) -> Result<Self, TreeError> {
        ArrayTree::from_slices(structure, values)
    }

    fn to_buffers(&self) -> TreeBuffer<T> {
        self.to_buffer()
    }

    fn from_buffers(buffer: TreeBuffer<T>) -> Result<Self, TreeError> {
        ArrayTree::from_buffers(buffer)
    }

    fn size(&self) -> usize {
        ArrayTree::size(self)
    }

    fn empty() -> Self {
        ArrayTree::empty()
    }
}

impl<T: fmt::Display> fmt::Display for ArrayTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::notation::write_tree(f, self.structure(), self.values())
    }
}
