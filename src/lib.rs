//! # Linearized Persistent Trees
//!
//! This library implements an immutable, ordered tree whose whole shape is
//! stored in two aligned sequences instead of a web of pointers.
//!
//! ## Encoding
//!
//! 1. **Structure**: one child count per node
//! 2. **Values**: one payload per node, aligned with the structure
//! 3. **Post-order layout**: the root is the last slot, and the children of a
//!    node occupy the contiguous range immediately left of it
//!
//! `a(b(d,e),c)` is stored as structure `[0,0,2,0,2]` and values
//! `[d,e,b,c,a]`. Every subtree is therefore a contiguous slice, and all
//! navigation is index arithmetic over the child counts.
//!
//! ## Layers
//!
//! - [`index`]: parent, subtree size and children arithmetic
//! - [`traversal`]: lazy depth-first, breadth-first, branch and path iterators
//! - [`path`]: greedy path matching against direct children
//! - [`buffer`]: scratch buffers with insert/remove/relocate primitives
//! - [`merge`]: merging of colliding sibling subtrees
//! - [`tree`]: the [`ArrayTree`] facade and the [`TreeLike`] conversion contract
//!
//! ## Usage Example
//!
//! ```rust
//! use lintree::{ArrayTree, EditConfig};
//!
//! let tree = ArrayTree::node("a", [
//!     ArrayTree::node("b", [ArrayTree::leaf("d"), ArrayTree::leaf("e")]),
//!     ArrayTree::leaf("c"),
//! ]);
//! assert_eq!(tree.structure(), &[0, 0, 2, 0, 2]);
//!
//! let tree = tree.insert_leaf("f", EditConfig::distinct());
//! assert_eq!(tree.child_values().copied().collect::<Vec<_>>(), ["b", "c", "f"]);
//! assert_eq!(tree.insert_leaf("f", EditConfig::distinct()), tree);
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules, leaves first
pub mod index;      // Index arithmetic over the structure sequence
pub mod traversal;  // Explicit-stack iterators
pub mod path;       // Path and branch matching
pub mod buffer;     // Mutable scratch buffers
pub mod merge;      // Distinct-sibling repair
pub mod tree;       // Public tree facade
pub mod builder;    // Flat descriptor construction
pub mod notation;   // Text notation for trees

// Re-exports for convenience
pub use buffer::TreeBuffer;
pub use builder::Builder;
pub use path::PathMatch;
pub use tree::{convert, ArrayTree, Edit, NodeTree, TreeLike};

use thiserror::Error;

/// Where newly inserted children are placed among existing siblings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// After the current last child
    #[default]
    Append,

    /// Before the current first child
    Prepend,
}

/// Which of several equal siblings wins
///
/// Used both when a path item matches more than one child and when two
/// colliding siblings are merged: with `Leftmost` the lower index is kept as
/// the recipient of the merge, with `Rightmost` the higher index is (the merged
/// node is "pulled up" to the later position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Preference {
    /// Lowest index first
    #[default]
    Leftmost,

    /// Highest index first
    Rightmost,
}

/// Options shared by every editing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditConfig {
    /// Merge siblings that end up carrying equal values
    pub keep_distinct: bool,

    /// Position of new children
    pub placement: Placement,

    /// Duplicate resolution for matching and merging
    pub preference: Preference,
}

impl EditConfig {
    /// Keep siblings distinct, append new children, prefer leftmost matches
    pub fn distinct() -> Self {
        Self {
            keep_distinct: true,
            placement: Placement::Append,
            preference: Preference::Leftmost,
        }
    }

    /// Allow duplicate siblings
    pub fn lax() -> Self {
        Self {
            keep_distinct: false,
            ..Self::distinct()
        }
    }

    /// Same options with a different placement
    pub fn with_placement(self, placement: Placement) -> Self {
        Self { placement, ..self }
    }

    /// Same options with a different duplicate preference
    pub fn with_preference(self, preference: Preference) -> Self {
        Self { preference, ..self }
    }
}

impl Default for EditConfig {
    fn default() -> Self {
        Self::distinct()
    }
}

/// Errors raised by tree construction and structural edits
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The structure sequence owes children past its first slot
    #[error("malformed encoding: node {index} still owes {owed} children at the start of the buffer")]
    MalformedEncoding {
        /// Index whose subtree scan ran off the buffer
        index: usize,
        /// Children still owed when the scan stopped
        owed: usize,
    },

    /// Structure and values have different lengths
    #[error("structure has {structure} entries but values has {values}")]
    LengthMismatch {
        /// Length of the structure sequence
        structure: usize,
        /// Length of the values sequence
        values: usize,
    },

    /// The sequences decode to a forest where a single tree was required
    #[error("encoding holds {roots} top-level trees, expected one")]
    DanglingNodes {
        /// Number of top-level trees found
        roots: usize,
    },

    /// Removing the root value would leave several roots
    #[error("cannot remove a root value with {children} children")]
    InvalidRootRemoval {
        /// Child count of the root
        children: usize,
    },

    /// Text notation could not be parsed
    #[error("notation error at byte {position}: {message}")]
    Notation {
        /// Byte offset of the failure
        position: usize,
        /// What was expected
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_distinct() {
        let config = EditConfig::default();
        assert!(config.keep_distinct);
        assert_eq!(config.placement, Placement::Append);
        assert_eq!(config.preference, Preference::Leftmost);
    }

    #[test]
    fn test_config_helpers() {
        let config = EditConfig::lax()
            .with_placement(Placement::Prepend)
            .with_preference(Preference::Rightmost);
        assert!(!config.keep_distinct);
        assert_eq!(config.placement, Placement::Prepend);
        assert_eq!(config.preference, Preference::Rightmost);
    }

    #[test]
    fn test_error_messages() {
        let err = TreeError::InvalidRootRemoval { children: 2 };
        assert_eq!(err.to_string(), "cannot remove a root value with 2 children");
    }
}
