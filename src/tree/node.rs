//! Linked tree representation
//!
//! Each node owns its children directly. Conversions to and from the encoding
//! walk explicit stacks, and so do cloning, debug output and dropping, so a
//! tall tree never recurses.

use std::borrow::Cow;
use std::fmt;

use crate::buffer::TreeBuffer;
use crate::index;
use crate::TreeError;

use super::TreeLike;

/// Node of a [`NodeTree`]
pub struct TreeNode<T> {
    /// Payload
    pub value: T,

    /// Direct children, first child first
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    /// Node with the given children
    pub fn new(value: T, children: Vec<TreeNode<T>>) -> Self {
        Self { value, children }
    }

    /// Childless node
    pub fn leaf(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    /// Check if leaf
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl<T> Drop for TreeNode<T> {
    fn drop(&mut self) {
        // Flatten the descendants so each node drops with no children left
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl<T: Clone> Clone for TreeNode<T> {
    fn clone(&self) -> Self {
        let (structure, values) = encode(Some(self));
        // One root in, one tree out
        decode(&structure, &values).swap_remove(0)
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeNode<T> {
    /// `value(child, child(..))` with each value in its debug form
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.value)?;
        let mut stack: Vec<(&TreeNode<T>, usize)> = vec![(self, 0)];
        while let Some((node, cursor)) = stack.last_mut() {
            let node: &TreeNode<T> = *node;
            match node.children.get(*cursor) {
                Some(child) => {
                    f.write_str(if *cursor == 0 { "(" } else { "," })?;
                    *cursor += 1;
                    write!(f, "{:?}", child.value)?;
                    stack.push((child, 0));
                }
                None => {
                    if !node.children.is_empty() {
                        f.write_str(")")?;
                    }
                    stack.pop();
                }
            }
        }
        Ok(())
    }
}

/// Post-order encoding of the tree under `root`
fn encode<T: Clone>(root: Option<&TreeNode<T>>) -> (Vec<usize>, Vec<T>) {
    let mut structure = Vec::new();
    let mut values = Vec::new();

    // (node, next child to descend into)
    let mut stack: Vec<(&TreeNode<T>, usize)> = root.into_iter().map(|n| (n, 0)).collect();
    while let Some((node, cursor)) = stack.last_mut() {
        let node: &TreeNode<T> = *node;
        if let Some(child) = node.children.get(*cursor) {
            *cursor += 1;
            stack.push((child, 0));
        } else {
            structure.push(node.children.len());
            values.push(node.value.clone());
            stack.pop();
        }
    }

    (structure, values)
}

/// Top-level trees of a well-formed encoding, left to right
fn decode<T: Clone>(structure: &[usize], values: &[T]) -> Vec<TreeNode<T>> {
    // Every node adopts the last `count` finished subtrees
    let mut finished: Vec<TreeNode<T>> = Vec::new();
    for (&count, value) in structure.iter().zip(values) {
        let children = finished.split_off(finished.len() - count);
        finished.push(TreeNode::new(value.clone(), children));
    }
    finished
}

/// Tree of owned [`TreeNode`]s, possibly empty
#[derive(Debug)]
pub struct NodeTree<T> {
    root: Option<TreeNode<T>>,
}

impl<T> NodeTree<T> {
    /// Tree rooted at `root`
    pub fn new(root: TreeNode<T>) -> Self {
        Self { root: Some(root) }
    }

    /// Root node, if any
    pub fn root(&self) -> Option<&TreeNode<T>> {
        self.root.as_ref()
    }

    /// Take the root node out
    pub fn into_root(self) -> Option<TreeNode<T>> {
        self.root
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&TreeNode<T>> = self.root.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

impl<T> Default for NodeTree<T> {
    fn default() -> Self {
        Self { root: None }
    }
}

impl<T: Clone> NodeTree<T> {
    fn encode(&self) -> (Vec<usize>, Vec<T>) {
        encode(self.root.as_ref())
    }
}

impl<T: Clone> Clone for NodeTree<T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<T: Clone> TreeLike<T> for NodeTree<T> {
    fn to_slices(&self) -> (Cow<'_, [usize]>, Cow<'_, [T]>) {
        let (structure, values) = self.encode();
        (Cow::Owned(structure), Cow::Owned(values))
    }

    fn from_slices(structure: &[usize], values: &[T]) -> Result<Self, TreeError> {
        if structure.len() != values.len() {
            return Err(TreeError::LengthMismatch {
                structure: structure.len(),
                values: values.len(),
            });
        }
        index::validate(structure)?;

        Ok(Self {
            root: decode(structure, values).pop(),
        })
    }

    fn from_buffers(buffer: TreeBuffer<T>) -> Result<Self, TreeError> {
        Self::from_slices(buffer.structure(), buffer.values())
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn empty() -> Self {
        Self::default()
    }
}

impl<T: Clone + PartialEq> PartialEq for NodeTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.encode() == other.encode()
    }
}

impl<T: Clone + Eq> Eq for NodeTree<T> {}

impl<T: Clone + fmt::Display> fmt::Display for NodeTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (structure, values) = self.encode();
        crate::notation::write_tree(f, &structure, &values)
    }
}
