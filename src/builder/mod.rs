//! Forest construction from flat descriptors
//!
//! A descriptor list uses the same post-order linearization as a tree but may
//! hold several top-level trees side by side. [`Builder`] splits it into
//! independent [`ArrayTree`]s, left to right.

use tracing::debug;

use crate::index;
use crate::tree::ArrayTree;
use crate::TreeError;

/// Splits flat `(child count, value)` sequences into trees
#[derive(Debug, Clone, Copy, Default)]
pub struct Builder;

impl Builder {
    /// Trees described by aligned `child_counts` and `values`
    ///
    /// Fails when the lengths differ or a node claims more children than
    /// precede it.
    pub fn from_pairs<T: Clone>(
        child_counts: &[usize],
        values: &[T],
    ) -> Result<Vec<ArrayTree<T>>, TreeError> {
        if child_counts.len() != values.len() {
            return Err(TreeError::LengthMismatch {
                structure: child_counts.len(),
                values: values.len(),
            });
        }

        let roots = index::root_indexes(child_counts)?;
        debug!(nodes = child_counts.len(), trees = roots.len(), "splitting forest");

        let mut bottom = 0;
        let trees = roots
            .into_iter()
            .map(|root| {
                let tree = ArrayTree::from_trusted(
                    child_counts[bottom..=root].to_vec(),
                    values[bottom..=root].to_vec(),
                );
                bottom = root + 1;
                tree
            })
            .collect();
        Ok(trees)
    }

    /// Trees described by a sequence of `(child count, value)` pairs
    pub fn from_descriptors<T, I>(descriptors: I) -> Result<Vec<ArrayTree<T>>, TreeError>
    where
        T: Clone,
        I: IntoIterator<Item = (usize, T)>,
    {
        let (child_counts, values): (Vec<usize>, Vec<T>) = descriptors.into_iter().unzip();
        Self::from_pairs(&child_counts, &values)
    }

    /// The single tree described by the descriptors
    ///
    /// Fails with [`TreeError::DanglingNodes`] when they describe a forest.
    pub fn single<T, I>(descriptors: I) -> Result<ArrayTree<T>, TreeError>
    where
        T: Clone,
        I: IntoIterator<Item = (usize, T)>,
    {
        let mut trees = Self::from_descriptors(descriptors)?;
        match trees.len() {
            0 => Ok(ArrayTree::empty()),
            1 => Ok(trees.remove(0)),
            roots => Err(TreeError::DanglingNodes { roots }),
        }
    }
}
