//! Index arithmetic over the structure sequence
//!
//! Nodes are stored in post-order: the root is the last slot and the direct
//! children of a node occupy the contiguous range immediately left of it,
//! first child lowest. Every function here works on the child counts alone
//! and allocates nothing unless it returns a collection.

mod children;

pub use children::ChildIndexes;

use crate::TreeError;

/// Index of the parent of `index`
///
/// Walks rightward counting completed subtrees; the first node that consumes
/// at least that many subtrees is the parent. Returns `None` for a root
/// (including the top-level trees of a forest) or an index past the end.
pub fn parent_index(structure: &[usize], index: usize) -> Option<usize> {
    if index + 1 >= structure.len() {
        return None;
    }

    let mut completed = 1;
    for (offset, &count) in structure[index + 1..].iter().enumerate() {
        if count >= completed {
            return Some(index + 1 + offset);
        }
        completed = completed + 1 - count;
    }

    None
}

/// Subtree size at `index`, or an error when the scan runs off the buffer
///
/// Returns 0 for an index past the end.
pub fn try_tree_size(structure: &[usize], index: usize) -> Result<usize, TreeError> {
    if index >= structure.len() {
        return Ok(0);
    }

    let mut owed = structure[index];
    let mut position = index;
    while owed > 0 {
        if position == 0 {
            return Err(TreeError::MalformedEncoding { index, owed });
        }
        position -= 1;
        owed = owed - 1 + structure[position];
    }

    Ok(index - position + 1)
}

/// Subtree size at `index` (self-inclusive)
///
/// # Panics
///
/// On a malformed encoding. Published trees are validated on construction,
/// so this only fires for raw slices that never described a tree.
pub fn tree_size(structure: &[usize], index: usize) -> usize {
    match try_tree_size(structure, index) {
        Ok(size) => size,
        Err(err) => panic!("{err}"),
    }
}

/// Leftmost index of the subtree rooted at `index`
#[inline]
pub fn bottom_index(structure: &[usize], index: usize) -> usize {
    match tree_size(structure, index) {
        0 => index,
        size => index + 1 - size,
    }
}

/// Index of the last (rightmost) child, adjacent to the parent
#[inline]
pub fn last_child_index(structure: &[usize], index: usize) -> Option<usize> {
    match structure.get(index) {
        Some(&count) if count > 0 => Some(index - 1),
        _ => None,
    }
}

/// Index of the first (leftmost) child
pub fn first_child_index(structure: &[usize], index: usize) -> Option<usize> {
    ChildIndexes::new(structure, index).last()
}

/// Index of the `n`-th child in child order (0 = first)
pub fn child_index(structure: &[usize], index: usize, n: usize) -> Option<usize> {
    let count = structure.get(index).copied().unwrap_or(0);
    if n >= count {
        return None;
    }
    ChildIndexes::new(structure, index).nth(count - 1 - n)
}

/// Direct children of `parent` in child order
pub fn children_indexes(structure: &[usize], parent: usize) -> Vec<usize> {
    let mut indexes: Vec<usize> = ChildIndexes::new(structure, parent).collect();
    indexes.reverse();
    indexes
}

/// Number of ancestors of `index`
pub fn level(structure: &[usize], index: usize) -> usize {
    let mut level = 0;
    let mut current = index;
    while let Some(parent) = parent_index(structure, current) {
        level += 1;
        current = parent;
    }
    level
}

/// Top-level tree roots of a linearized forest, left to right
pub fn root_indexes(structure: &[usize]) -> Result<Vec<usize>, TreeError> {
    let mut roots = Vec::new();
    let mut next = structure.len();
    while next > 0 {
        let root = next - 1;
        roots.push(root);
        next -= try_tree_size(structure, root)?;
    }
    roots.reverse();
    Ok(roots)
}

/// Check that `structure` encodes exactly one tree (or none)
pub fn validate(structure: &[usize]) -> Result<(), TreeError> {
    let roots = root_indexes(structure)?;
    if roots.len() > 1 {
        return Err(TreeError::DanglingNodes { roots: roots.len() });
    }
    Ok(())
}
