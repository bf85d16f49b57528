//! Read-only queries on [`ArrayTree`]
//!
//! Everything here is index arithmetic or a lazy traversal over the shared
//! encoding. Iterators borrow the tree; subtrees are copied out as new trees.

use std::fmt;

use super::ArrayTree;
use crate::index;
use crate::path::{self, PathMatch};
use crate::traversal::{self, BreadthFirst, Branches, DepthFirst, Paths, UNBOUNDED};
use crate::Preference;

impl<T> ArrayTree<T> {
    /// Number of levels, 0 for the empty tree
    pub fn height(&self) -> usize {
        match self.root_index() {
            Some(root) => traversal::height(self.structure(), root),
            None => 0,
        }
    }

    /// Number of nodes without children
    pub fn leaves_count(&self) -> usize {
        self.structure().iter().filter(|&&count| count == 0).count()
    }

    /// Leaf values in depth-first order
    pub fn leaves(&self) -> impl Iterator<Item = &T> + '_ {
        self.depth_first(UNBOUNDED)
            .filter(move |&(_, index)| self.structure()[index] == 0)
            .map(move |(_, index)| &self.values()[index])
    }

    /// Values of the root's children, in child order
    pub fn child_values(&self) -> impl Iterator<Item = &T> + '_ {
        self.child_indexes().into_iter().map(move |index| &self.values()[index])
    }

    /// Values in depth-first (pre-order) order
    pub fn values_dfs(&self) -> impl Iterator<Item = &T> + '_ {
        self.values_with_max_depth(UNBOUNDED)
    }

    /// Values in breadth-first order
    pub fn values_bfs(&self) -> impl Iterator<Item = &T> + '_ {
        self.breadth_first(UNBOUNDED)
            .map(move |(_, index)| &self.values()[index])
    }

    /// Values with their level below the root, depth-first
    pub fn values_with_levels(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.depth_first(UNBOUNDED)
            .map(move |(level, index)| (level, &self.values()[index]))
    }

    /// Values on the first `max_depth` levels, depth-first
    pub fn values_with_max_depth(&self, max_depth: usize) -> impl Iterator<Item = &T> + '_ {
        self.depth_first(max_depth)
            .map(move |(_, index)| &self.values()[index])
    }

    /// Values on the first `max_depth` levels, breadth-first
    pub fn values_bfs_with_max_depth(&self, max_depth: usize) -> impl Iterator<Item = &T> + '_ {
        self.breadth_first(max_depth)
            .map(move |(_, index)| &self.values()[index])
    }

    /// Every root-to-leaf chain of values
    pub fn branches(&self) -> impl Iterator<Item = Vec<&T>> + '_ {
        self.branches_with_max_depth(UNBOUNDED)
    }

    /// Root-to-leaf chains, cut at `max_depth` levels
    pub fn branches_with_max_depth(&self, max_depth: usize) -> impl Iterator<Item = Vec<&T>> + '_ {
        let root = self.root_index().unwrap_or(0);
        Branches::new(self.structure(), root, max_depth).map(move |chain| self.chain_values(&chain))
    }

    /// Number of branches (one per leaf)
    pub fn count_branches(&self) -> usize {
        self.leaves_count()
    }

    /// Chain of values from the root to every node, depth-first
    pub fn paths(&self) -> impl Iterator<Item = Vec<&T>> + '_ {
        self.paths_with_max_depth(UNBOUNDED)
    }

    /// Paths no longer than `max_depth`
    pub fn paths_with_max_depth(&self, max_depth: usize) -> impl Iterator<Item = Vec<&T>> + '_ {
        let root = self.root_index().unwrap_or(0);
        Paths::new(self.structure(), root, max_depth).map(move |chain| self.chain_values(&chain))
    }

    /// Follow `path` from the root, leftmost match first
    pub fn follow_path<'p>(&self, path: &'p [T]) -> PathMatch<'p, T>
    where
        T: PartialEq,
    {
        self.follow_path_by(path, Preference::Leftmost, |item, value| item == value)
    }

    /// Follow a path of keys from the root
    ///
    /// `eq` compares a path item with a node value.
    pub fn follow_path_by<'p, K, F>(
        &self,
        path: &'p [K],
        preference: Preference,
        eq: F,
    ) -> PathMatch<'p, K>
    where
        F: Fn(&K, &T) -> bool,
    {
        path::follow_path(self.structure(), self.values(), None, path, preference, eq)
    }

    /// Some direct child of the root carries `value`
    pub fn contains_child(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.child_values().any(|child| child == value)
    }

    /// `path` matches from the root down to a leaf
    pub fn contains_branch(&self, path: &[T]) -> bool
    where
        T: PartialEq,
    {
        let matched = self.follow_path(path);
        matched.is_complete() && matched.full_branch
    }

    /// `path` matches from the root down, ending anywhere
    pub fn contains_path(&self, path: &[T]) -> bool
    where
        T: PartialEq,
    {
        !path.is_empty() && self.follow_path(path).is_complete()
    }

    /// Value at the end of `path`
    pub fn select_value(&self, path: &[T]) -> Option<&T>
    where
        T: PartialEq,
    {
        self.resolve(path, Preference::Leftmost)
            .map(|index| &self.values()[index])
    }

    /// Depth-first `(level, index)` pairs from the root
    pub(crate) fn depth_first(&self, max_depth: usize) -> DepthFirst<'_> {
        DepthFirst::new(self.structure(), self.root_index().unwrap_or(0), max_depth)
    }

    pub(crate) fn breadth_first(&self, max_depth: usize) -> BreadthFirst<'_> {
        BreadthFirst::new(self.structure(), self.root_index().unwrap_or(0), max_depth)
    }

    /// Children of the root, in child order
    pub(crate) fn child_indexes(&self) -> Vec<usize> {
        match self.root_index() {
            Some(root) => index::children_indexes(self.structure(), root),
            None => Vec::new(),
        }
    }

    /// Index at the end of a fully matched, non-empty path
    pub(crate) fn resolve(&self, path: &[T], preference: Preference) -> Option<usize>
    where
        T: PartialEq,
    {
        path::follow_entire_path(
            self.structure(),
            self.values(),
            None,
            path,
            preference,
            |item, value| item == value,
        )
        .and_then(|indexes| indexes.last().copied())
    }

    fn chain_values(&self, chain: &[usize]) -> Vec<&T> {
        chain.iter().map(|&index| &self.values()[index]).collect()
    }
}

impl<T: Clone> ArrayTree<T> {
    /// Subtrees of the root's children, in child order
    pub fn children(&self) -> Vec<ArrayTree<T>> {
        self.child_indexes()
            .into_iter()
            .map(|index| self.subtree_at(index))
            .collect()
    }

    /// Subtree of the first child
    pub fn first_child(&self) -> Option<ArrayTree<T>> {
        let root = self.root_index()?;
        index::first_child_index(self.structure(), root).map(|index| self.subtree_at(index))
    }

    /// Subtree of the last child
    pub fn last_child(&self) -> Option<ArrayTree<T>> {
        let root = self.root_index()?;
        index::last_child_index(self.structure(), root).map(|index| self.subtree_at(index))
    }

    /// Every subtree, depth-first, starting with the whole tree
    pub fn subtrees(&self) -> impl Iterator<Item = ArrayTree<T>> + '_ {
        self.subtrees_with_max_depth(UNBOUNDED)
    }

    /// Subtrees rooted on the first `max_depth` levels
    pub fn subtrees_with_max_depth(
        &self,
        max_depth: usize,
    ) -> impl Iterator<Item = ArrayTree<T>> + '_ {
        self.depth_first(max_depth)
            .map(move |(_, index)| self.subtree_at(index))
    }

    /// Subtrees with their level below the root, depth-first
    pub fn nodes_with_levels(&self) -> impl Iterator<Item = (usize, ArrayTree<T>)> + '_ {
        self.depth_first(UNBOUNDED)
            .map(move |(level, index)| (level, self.subtree_at(index)))
    }

    /// Subtree at the end of `path`
    pub fn select_tree(&self, path: &[T]) -> Option<ArrayTree<T>>
    where
        T: PartialEq,
    {
        self.resolve(path, Preference::Leftmost)
            .map(|index| self.subtree_at(index))
    }

    /// Subtree at the end of a path of keys
    pub fn select_tree_by<K, F>(&self, path: &[K], eq: F) -> Option<ArrayTree<T>>
    where
        F: Fn(&K, &T) -> bool,
    {
        path::follow_entire_path(
            self.structure(),
            self.values(),
            None,
            path,
            Preference::Leftmost,
            eq,
        )
            .and_then(|indexes| indexes.last().copied())
            .map(|index| self.subtree_at(index))
    }
}

impl<T: fmt::Display> ArrayTree<T> {
    /// One line per branch, values joined by `separator`
    pub fn render_branches(&self, separator: &str) -> String {
        self.branch_strings(separator).join("\n")
    }

    /// Each branch rendered as a string
    pub fn branch_strings(&self, separator: &str) -> Vec<String> {
        self.branches()
            .map(|branch| {
                branch
                    .iter()
                    .map(|value| value.to_string())
                    .collect::<Vec<_>>()
                    .join(separator)
            })
            .collect()
    }
}
