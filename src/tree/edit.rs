//! Structural edits on [`ArrayTree`]
//!
//! Each edit copies the encoding into a [`TreeBuffer`], applies buffer
//! primitives at the resolved index and, when the config keeps siblings
//! distinct, repairs the collisions it created before publishing a new tree.
//!
//! Paths start at the root: the first item must match the root value.
//! Missing paths leave the tree unchanged; the `try_` variants report them as
//! [`Edit::Rejected`].

use tracing::debug;

use super::{ArrayTree, Edit};
use crate::buffer::TreeBuffer;
use crate::merge;
use crate::{EditConfig, Placement, Preference, TreeError};

/// Slot where the next child of `parent` goes
fn insertion_point<T>(buffer: &TreeBuffer<T>, parent: usize, placement: Placement) -> usize {
    match placement {
        Placement::Append => parent,
        Placement::Prepend => buffer.bottom_index(parent),
    }
}

/// Child of `parent` carrying `value`
fn find_child<T: PartialEq>(
    buffer: &TreeBuffer<T>,
    parent: usize,
    value: &T,
    preference: Preference,
) -> Option<usize> {
    let children = buffer.children_indexes(parent);
    match preference {
        Preference::Leftmost => children.into_iter().find(|&c| buffer.value(c) == value),
        Preference::Rightmost => children.into_iter().rev().find(|&c| buffer.value(c) == value),
    }
}

/// Merge colliding children of `parent`; returns the parent's new index
fn repair_children<T: PartialEq>(
    buffer: &mut TreeBuffer<T>,
    parent: usize,
    preference: Preference,
) -> usize {
    let mut tracked = vec![parent];
    merge::make_children_distinct(buffer, parent, preference, &mut tracked);
    tracked[0]
}

/// Copy of `tree` with its own sibling collisions merged
fn normalized<T: Clone + PartialEq>(tree: &ArrayTree<T>, preference: Preference) -> TreeBuffer<T> {
    let mut buffer = tree.to_buffer();
    merge::make_all_distinct(&mut buffer, preference, &mut Vec::new());
    buffer
}

/// Insert leaves under `parent`, returning the parent's new index
fn insert_leaves_under<T, I>(
    buffer: &mut TreeBuffer<T>,
    mut parent: usize,
    values: I,
    config: EditConfig,
) -> usize
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    let mut at = insertion_point(buffer, parent, config.placement);
    for value in values {
        if config.keep_distinct && find_child(buffer, parent, &value, config.preference).is_some() {
            continue;
        }
        buffer.insert_value(at, Some(parent), value);
        parent += 1;
        at = match config.placement {
            Placement::Append => parent,
            Placement::Prepend => at + 1,
        };
    }
    parent
}

/// Insert subtrees under `parent`, returning the parent's new index
fn insert_subtrees_under<'t, T, I>(
    buffer: &mut TreeBuffer<T>,
    mut parent: usize,
    subtrees: I,
    config: EditConfig,
) -> usize
where
    T: Clone + PartialEq + 't,
    I: IntoIterator<Item = &'t ArrayTree<T>>,
{
    let mut at = insertion_point(buffer, parent, config.placement);
    for subtree in subtrees.into_iter().filter(|subtree| !subtree.is_empty()) {
        let inserted = if config.keep_distinct {
            normalized(subtree, config.preference)
        } else {
            subtree.to_buffer()
        };
        let len = inserted.len();
        buffer.insert_slice(at, inserted.structure(), inserted.values());
        parent += len;
        buffer.set_children_count(parent, buffer.children_count(parent) + 1);
        at = match config.placement {
            Placement::Append => parent,
            Placement::Prepend => at + len,
        };
    }
    if config.keep_distinct {
        parent = repair_children(buffer, parent, config.preference);
    }
    parent
}

/// Replace the subtree at `index` in place
fn replace_subtree<T: Clone + PartialEq>(
    buffer: &mut TreeBuffer<T>,
    index: usize,
    replacement: &ArrayTree<T>,
    config: EditConfig,
) {
    let replacement = if config.keep_distinct {
        normalized(replacement, config.preference)
    } else {
        replacement.to_buffer()
    };

    let Some(parent) = buffer.parent_index(index) else {
        *buffer = replacement;
        return;
    };

    let old_size = buffer.tree_size(index);
    let new_size = replacement.len();
    if new_size == 0 {
        buffer.remove_tree(index, Some(parent));
    } else {
        buffer.replace_tree(index, Some(parent), replacement.structure(), replacement.values());
    }
    if config.keep_distinct {
        repair_children(buffer, parent - old_size + new_size, config.preference);
    }
}

/// Overwrite the value at `index`, merging it into an equal sibling if asked
fn replace_value<T: PartialEq>(
    buffer: &mut TreeBuffer<T>,
    index: usize,
    value: T,
    config: EditConfig,
) {
    buffer.replace_value(index, value);
    if config.keep_distinct {
        if let Some(parent) = buffer.parent_index(index) {
            repair_children(buffer, parent, config.preference);
        }
    }
}

/// Single chain `items[0](items[1](...))` as an encoded slice
fn chain_encoding<'t, T, I>(items: I) -> (Vec<usize>, Vec<T>)
where
    T: Clone + 't,
    I: IntoIterator<Item = &'t T>,
{
    let mut values: Vec<T> = items.into_iter().cloned().collect();
    values.reverse();
    let structure = (0..values.len()).map(|i| usize::from(i > 0)).collect();
    (structure, values)
}

impl<T: Clone + PartialEq> ArrayTree<T> {
    /// Apply `edit` at the end of `path`, or reject
    fn edit_at<F>(&self, path: &[T], preference: Preference, edit: F) -> Edit<Self>
    where
        F: FnOnce(&mut TreeBuffer<T>, usize),
    {
        match self.resolve(path, preference) {
            Some(index) => {
                let mut buffer = self.to_buffer();
                edit(&mut buffer, index);
                Edit::Applied(ArrayTree::publish(buffer))
            }
            None => Edit::Rejected(self.clone()),
        }
    }

    /// Apply `edit` at the root; the empty tree is returned as is
    fn edit_root<F>(&self, edit: F) -> Self
    where
        F: FnOnce(&mut TreeBuffer<T>, usize),
    {
        match self.root_index() {
            Some(root) => {
                let mut buffer = self.to_buffer();
                edit(&mut buffer, root);
                ArrayTree::publish(buffer)
            }
            None => self.clone(),
        }
    }

    /// Add a leaf under the root
    ///
    /// With `keep_distinct` an existing child with the same value makes this
    /// a no-op. Inserting into the empty tree yields the leaf itself.
    pub fn insert_leaf(&self, value: T, config: EditConfig) -> Self {
        if self.is_empty() {
            return ArrayTree::leaf(value);
        }
        self.edit_root(|buffer, root| {
            insert_leaves_under(buffer, root, [value], config);
        })
    }

    /// Add several leaves under the root, in order
    ///
    /// The empty tree has no root to attach them to and is returned as is.
    pub fn insert_leaves<I>(&self, values: I, config: EditConfig) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        self.edit_root(|buffer, root| {
            insert_leaves_under(buffer, root, values, config);
        })
    }

    /// Add a subtree under the root
    ///
    /// With `keep_distinct` a child with the same head absorbs the subtree by
    /// deep merging. Inserting into the empty tree yields the subtree itself.
    pub fn insert_child(&self, child: &ArrayTree<T>, config: EditConfig) -> Self {
        if self.is_empty() {
            return if config.keep_distinct {
                ArrayTree::publish(normalized(child, config.preference))
            } else {
                child.clone()
            };
        }
        self.edit_root(|buffer, root| {
            insert_subtrees_under(buffer, root, [child], config);
        })
    }

    /// Add several subtrees under the root, in order
    pub fn insert_children(&self, children: &[ArrayTree<T>], config: EditConfig) -> Self {
        self.edit_root(|buffer, root| {
            insert_subtrees_under(buffer, root, children, config);
        })
    }

    /// Add a leaf under the node at the end of `path`
    pub fn insert_leaf_at(&self, path: &[T], value: T, config: EditConfig) -> Self {
        self.try_insert_leaf_at(path, value, config).into_inner()
    }

    /// [`insert_leaf_at`](Self::insert_leaf_at), reporting a missing path
    pub fn try_insert_leaf_at(&self, path: &[T], value: T, config: EditConfig) -> Edit<Self> {
        self.edit_at(path, config.preference, |buffer, parent| {
            insert_leaves_under(buffer, parent, [value], config);
        })
    }

    /// Add a subtree under the node at the end of `path`
    pub fn insert_child_at(&self, path: &[T], child: &ArrayTree<T>, config: EditConfig) -> Self {
        self.try_insert_child_at(path, child, config).into_inner()
    }

    /// [`insert_child_at`](Self::insert_child_at), reporting a missing path
    pub fn try_insert_child_at(
        &self,
        path: &[T],
        child: &ArrayTree<T>,
        config: EditConfig,
    ) -> Edit<Self> {
        self.edit_at(path, config.preference, |buffer, parent| {
            insert_subtrees_under(buffer, parent, [child], config);
        })
    }

    /// Make `branch` (root first) a branch of the tree
    ///
    /// With `keep_distinct` the longest existing prefix is followed and the
    /// rest is added as a chain below it, so a branch already present is a
    /// no-op. Otherwise everything after the root item is added as a new
    /// chain under the root, next to any equal siblings. A branch whose first
    /// item is not the root value is ignored; on the empty tree the branch
    /// becomes the whole tree.
    pub fn insert_branch(&self, branch: &[T], config: EditConfig) -> Self {
        if branch.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            let (structure, values) = chain_encoding(branch);
            return ArrayTree::from_trusted(structure, values);
        }

        let (parent, (structure, values)) = if config.keep_distinct {
            let matched =
                self.follow_path_by(branch, config.preference, |item, value| item == value);
            let (Some(parent), Some(first)) = (matched.last(), matched.unmatched) else {
                return self.clone();
            };
            (parent, chain_encoding(std::iter::once(first).chain(matched.remaining)))
        } else {
            let Some(root) = self.root_index().filter(|&root| self.values()[root] == branch[0])
            else {
                return self.clone();
            };
            if branch.len() == 1 {
                return self.clone();
            }
            (root, chain_encoding(&branch[1..]))
        };

        let mut buffer = self.to_buffer();
        let at = insertion_point(&buffer, parent, config.placement);
        buffer.insert_slice(at, &structure, &values);
        let parent = parent + structure.len();
        buffer.set_children_count(parent, buffer.children_count(parent) + 1);
        ArrayTree::publish(buffer)
    }

    /// Replace the root value
    pub fn update_head(&self, value: T) -> Self {
        self.edit_root(|buffer, root| {
            buffer.replace_value(root, value);
        })
    }

    /// Replace the value of the root's child carrying `existing`
    pub fn update_child_value(&self, existing: &T, replacement: T, config: EditConfig) -> Self {
        self.edit_root(|buffer, root| {
            if let Some(child) = find_child(buffer, root, existing, config.preference) {
                replace_value(buffer, child, replacement, config);
            }
        })
    }

    /// Replace the value at the end of `path`
    pub fn update_value_at(&self, path: &[T], value: T, config: EditConfig) -> Self {
        self.try_update_value_at(path, value, config).into_inner()
    }

    /// [`update_value_at`](Self::update_value_at), reporting a missing path
    pub fn try_update_value_at(&self, path: &[T], value: T, config: EditConfig) -> Edit<Self> {
        self.edit_at(path, config.preference, |buffer, index| {
            replace_value(buffer, index, value, config);
        })
    }

    /// Replace the value at the end of `path` with `modify(value)`
    pub fn modify_value_at<F>(&self, path: &[T], modify: F, config: EditConfig) -> Self
    where
        F: FnOnce(&T) -> T,
    {
        self.try_modify_value_at(path, modify, config).into_inner()
    }

    /// [`modify_value_at`](Self::modify_value_at), reporting a missing path
    pub fn try_modify_value_at<F>(&self, path: &[T], modify: F, config: EditConfig) -> Edit<Self>
    where
        F: FnOnce(&T) -> T,
    {
        self.edit_at(path, config.preference, |buffer, index| {
            let value = modify(buffer.value(index));
            replace_value(buffer, index, value, config);
        })
    }

    /// Replace the subtree at the end of `path`
    ///
    /// An empty replacement removes the subtree.
    pub fn update_tree_at(&self, path: &[T], subtree: &ArrayTree<T>, config: EditConfig) -> Self {
        self.try_update_tree_at(path, subtree, config).into_inner()
    }

    /// [`update_tree_at`](Self::update_tree_at), reporting a missing path
    pub fn try_update_tree_at(
        &self,
        path: &[T],
        subtree: &ArrayTree<T>,
        config: EditConfig,
    ) -> Edit<Self> {
        self.edit_at(path, config.preference, |buffer, index| {
            replace_subtree(buffer, index, subtree, config);
        })
    }

    /// Replace the subtree at the end of `path` with `modify(subtree)`
    pub fn modify_tree_at<F>(&self, path: &[T], modify: F, config: EditConfig) -> Self
    where
        F: FnOnce(&ArrayTree<T>) -> ArrayTree<T>,
    {
        self.try_modify_tree_at(path, modify, config).into_inner()
    }

    /// [`modify_tree_at`](Self::modify_tree_at), reporting a missing path
    pub fn try_modify_tree_at<F>(&self, path: &[T], modify: F, config: EditConfig) -> Edit<Self>
    where
        F: FnOnce(&ArrayTree<T>) -> ArrayTree<T>,
    {
        self.edit_at(path, config.preference, |buffer, index| {
            let current = ArrayTree::publish({
                let bottom = buffer.bottom_index(index);
                let mut copy = TreeBuffer::with_capacity(index + 1 - bottom);
                copy.insert_slice(
                    0,
                    &buffer.structure()[bottom..=index],
                    &buffer.values()[bottom..=index],
                );
                copy
            });
            let replacement = modify(&current);
            replace_subtree(buffer, index, &replacement, config);
        })
    }

    /// Remove the root's child carrying `value`, promoting its children
    pub fn remove_child_value(&self, value: &T, config: EditConfig) -> Self {
        self.edit_root(|buffer, root| {
            if let Some(child) = find_child(buffer, root, value, config.preference) {
                buffer.remove_value(child, Some(root));
                if config.keep_distinct {
                    repair_children(buffer, root - 1, config.preference);
                }
            }
        })
    }

    /// Remove the subtree of the root's child carrying `value`
    pub fn remove_child_tree(&self, value: &T) -> Self {
        self.edit_root(|buffer, root| {
            if let Some(child) = find_child(buffer, root, value, Preference::Leftmost) {
                buffer.remove_tree(child, Some(root));
            }
        })
    }

    /// Remove the value at the end of `path`, promoting its children
    ///
    /// A path to the root follows the [`remove_root`](Self::remove_root)
    /// contract. A missing path leaves the tree unchanged.
    pub fn remove_value_at(&self, path: &[T], config: EditConfig) -> Result<Self, TreeError> {
        let Some(index) = self.resolve(path, config.preference) else {
            return Ok(self.clone());
        };
        let Some(parent) = crate::index::parent_index(self.structure(), index) else {
            return self.remove_root();
        };
        let mut buffer = self.to_buffer();
        buffer.remove_value(index, Some(parent));
        if config.keep_distinct {
            repair_children(&mut buffer, parent - 1, config.preference);
        }
        Ok(ArrayTree::publish(buffer))
    }

    /// Remove the subtree at the end of `path`
    pub fn remove_tree_at(&self, path: &[T]) -> Self {
        self.try_remove_tree_at(path).into_inner()
    }

    /// [`remove_tree_at`](Self::remove_tree_at), reporting a missing path
    pub fn try_remove_tree_at(&self, path: &[T]) -> Edit<Self> {
        self.edit_at(path, Preference::Leftmost, |buffer, index| {
            match buffer.parent_index(index) {
                Some(parent) => {
                    buffer.remove_tree(index, Some(parent));
                }
                None => *buffer = TreeBuffer::new(),
            }
        })
    }

    /// Remove every child of the node at the end of `path`
    pub fn remove_children_at(&self, path: &[T]) -> Self {
        self.edit_at(path, Preference::Leftmost, |buffer, mut index| {
            while buffer.children_count(index) > 0 {
                index -= buffer.remove_tree(index - 1, Some(index));
            }
        })
        .into_inner()
    }

    /// Remove the root value
    ///
    /// A root with one child leaves that child as the new root, a single node
    /// leaves the empty tree. A root with several children cannot be removed.
    pub fn remove_root(&self) -> Result<Self, TreeError> {
        if self.is_empty() {
            return Ok(self.clone());
        }
        match self.width() {
            0 => Ok(ArrayTree::empty()),
            1 => {
                debug!(size = self.size(), "promoting only child to root");
                let last = self.size() - 1;
                Ok(ArrayTree::from_trusted(
                    self.structure()[..last].to_vec(),
                    self.values()[..last].to_vec(),
                ))
            }
            children => Err(TreeError::InvalidRootRemoval { children }),
        }
    }

    /// Merge every pair of equal siblings, at every depth
    pub fn make_distinct(&self, preference: Preference) -> Self {
        let mut buffer = self.to_buffer();
        let merges = merge::make_all_distinct(&mut buffer, preference, &mut Vec::new());
        if merges == 0 {
            return self.clone();
        }
        ArrayTree::publish(buffer)
    }

    /// Deep-merge the node at `donor` into the node at `recipient`
    ///
    /// The donor's children join the recipient's and the donor node itself
    /// disappears; collisions exposed among the merged children are repaired
    /// recursively. Missing or identical paths leave the tree unchanged.
    pub fn merge_deeply(&self, recipient: &[T], donor: &[T], preference: Preference) -> Self {
        let (Some(recipient), Some(donor)) = (
            self.resolve(recipient, preference),
            self.resolve(donor, preference),
        ) else {
            return self.clone();
        };
        if recipient == donor {
            return self.clone();
        }
        debug!(recipient, donor, "merging subtrees");
        let mut buffer = self.to_buffer();
        merge::deep_merge(&mut buffer, recipient, donor, preference, &mut Vec::new());
        ArrayTree::publish(buffer)
    }
}
