//! Greedy path matching
//!
//! A path is matched top-down: each item must equal the value of one direct
//! child of the node matched by the previous item. Sibling values are assumed
//! distinct; when they are not, the first (or last) structural match wins.

use crate::index::children_indexes;
use crate::Preference;

/// Outcome of following a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch<'p, K> {
    /// Indexes of the matched nodes, top-down
    pub indexes: Vec<usize>,

    /// First item with no matching child
    pub unmatched: Option<&'p K>,

    /// Items after the unmatched one
    pub remaining: &'p [K],

    /// Whole path matched and ended on a leaf
    pub full_branch: bool,
}

impl<K> PathMatch<'_, K> {
    /// Every item matched
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_none()
    }

    /// Index of the deepest matched node
    pub fn last(&self) -> Option<usize> {
        self.indexes.last().copied()
    }
}

/// Follow `path` from `start`
///
/// With `start = None` the first item is matched against the root; with
/// `Some(index)` it is matched against the children of `index`. `eq` compares
/// a path item with a node value, so items may be keys extracted from values.
pub fn follow_path<'p, T, K, F>(
    structure: &[usize],
    values: &[T],
    start: Option<usize>,
    path: &'p [K],
    preference: Preference,
    eq: F,
) -> PathMatch<'p, K>
where
    F: Fn(&K, &T) -> bool,
{
    let mut candidates = match start {
        None => structure.len().checked_sub(1).into_iter().collect(),
        Some(index) => children_indexes(structure, index),
    };
    let mut indexes = Vec::with_capacity(path.len());

    for (position, item) in path.iter().enumerate() {
        let found = match preference {
            Preference::Leftmost => candidates.iter().find(|&&c| eq(item, &values[c])),
            Preference::Rightmost => candidates.iter().rev().find(|&&c| eq(item, &values[c])),
        };

        match found.copied() {
            Some(index) => {
                indexes.push(index);
                candidates = children_indexes(structure, index);
            }
            None => {
                return PathMatch {
                    indexes,
                    unmatched: Some(item),
                    remaining: &path[position + 1..],
                    full_branch: false,
                }
            }
        }
    }

    let full_branch = !indexes.is_empty() && candidates.is_empty();
    PathMatch {
        indexes,
        unmatched: None,
        remaining: &[],
        full_branch,
    }
}

/// Indexes of the whole path, or `None` unless every item matched
pub fn follow_entire_path<T, K, F>(
    structure: &[usize],
    values: &[T],
    start: Option<usize>,
    path: &[K],
    preference: Preference,
    eq: F,
) -> Option<Vec<usize>>
where
    F: Fn(&K, &T) -> bool,
{
    let matched = follow_path(structure, values, start, path, preference, eq);
    matched.is_complete().then_some(matched.indexes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<usize>, Vec<char>) {
        // a(b(d,e),c)
        (vec![0, 0, 2, 0, 2], vec!['d', 'e', 'b', 'c', 'a'])
    }

    fn eq(item: &char, value: &char) -> bool {
        item == value
    }

    #[test]
    fn test_full_branch_match() {
        let (structure, values) = sample();
        let path = ['a', 'b', 'd'];
        let matched = follow_path(&structure, &values, None, &path, Preference::Leftmost, eq);
        assert_eq!(matched.indexes, vec![4, 2, 0]);
        assert_eq!(matched.unmatched, None);
        assert!(matched.remaining.is_empty());
        assert!(matched.full_branch);
    }

    #[test]
    fn test_partial_match_reports_remainder() {
        let (structure, values) = sample();
        let path = ['a', 'b', 'x', 'y', 'z'];
        let matched = follow_path(&structure, &values, None, &path, Preference::Leftmost, eq);
        assert_eq!(matched.indexes, vec![4, 2]);
        assert_eq!(matched.unmatched, Some(&'x'));
        assert_eq!(matched.remaining, &['y', 'z']);
        assert!(!matched.full_branch);
        assert_eq!(
            follow_entire_path(&structure, &values, None, &path, Preference::Leftmost, eq),
            None
        );
    }

    #[test]
    fn test_prefix_is_not_a_branch() {
        let (structure, values) = sample();
        let matched = follow_path(&structure, &values, None, &['a', 'b'], Preference::Leftmost, eq);
        assert!(matched.is_complete());
        assert!(!matched.full_branch);
    }

    #[test]
    fn test_start_below_root() {
        let (structure, values) = sample();
        let matched = follow_path(&structure, &values, Some(4), &['c'], Preference::Leftmost, eq);
        assert_eq!(matched.indexes, vec![3]);
        assert!(matched.full_branch);
    }

    #[test]
    fn test_duplicate_siblings_follow_preference() {
        // a(b(x), b(y))
        let structure = vec![0, 1, 0, 1, 2];
        let values = vec!['x', 'b', 'y', 'b', 'a'];
        let left = follow_path(&structure, &values, None, &['a', 'b'], Preference::Leftmost, eq);
        let right = follow_path(&structure, &values, None, &['a', 'b'], Preference::Rightmost, eq);
        assert_eq!(left.indexes, vec![4, 1]);
        assert_eq!(right.indexes, vec![4, 3]);
    }

    #[test]
    fn test_keys_extracted_from_values() {
        let structure = vec![0, 0, 2];
        let values = vec![(1, "one"), (2, "two"), (0, "root")];
        let matched = follow_path(
            &structure,
            &values,
            None,
            &[0, 2],
            Preference::Leftmost,
            |k: &i32, v: &(i32, &str)| *k == v.0,
        );
        assert_eq!(matched.indexes, vec![2, 1]);
    }

    #[test]
    fn test_empty_tree_and_empty_path() {
        let matched =
            follow_path::<char, char, _>(&[], &[], None, &['a'], Preference::Leftmost, eq);
        assert_eq!(matched.unmatched, Some(&'a'));
        let (structure, values) = sample();
        let matched = follow_path(&structure, &values, None, &[], Preference::Leftmost, eq);
        assert!(matched.indexes.is_empty());
        assert!(!matched.full_branch);
    }
}
