mod common;

use common::{arb_tree, is_distinct};
use lintree::index::{self, tree_size};
use lintree::merge::{deep_merge, shallow_merge};
use lintree::path::follow_entire_path;
use lintree::{convert, ArrayTree, EditConfig, NodeTree, Preference, TreeLike};
use proptest::prelude::*;

fn sorted(mut values: Vec<char>) -> Vec<char> {
    values.sort_unstable();
    values
}

proptest! {
    #[test]
    fn slices_buffers_and_links_round_trip(tree in arb_tree(40)) {
        let (structure, values) = tree.to_slices();
        prop_assert_eq!(&ArrayTree::from_slices(&structure, &values).unwrap(), &tree);
        prop_assert_eq!(&ArrayTree::from_buffers(tree.to_buffer()).unwrap(), &tree);
        let linked: NodeTree<char> = convert(&tree).unwrap();
        prop_assert_eq!(&convert::<char, _, ArrayTree<char>>(&linked).unwrap(), &tree);
    }

    #[test]
    fn root_subtree_spans_the_encoding(tree in arb_tree(40)) {
        let root = tree.size() - 1;
        prop_assert_eq!(tree_size(tree.structure(), root), tree.size());
        prop_assert_eq!(tree.structure().len(), tree.values().len());
        prop_assert!(index::validate(tree.structure()).is_ok());
    }

    #[test]
    fn parent_and_children_agree(tree in arb_tree(40)) {
        let structure = tree.structure();
        for parent in 0..structure.len() {
            let children = index::children_indexes(structure, parent);
            prop_assert_eq!(children.len(), structure[parent]);
            for child in children {
                prop_assert_eq!(index::parent_index(structure, child), Some(parent));
            }
        }
    }

    #[test]
    fn make_distinct_closes_every_level(
        tree in arb_tree(40),
        rightmost in any::<bool>(),
    ) {
        let preference = if rightmost { Preference::Rightmost } else { Preference::Leftmost };
        let distinct = tree.make_distinct(preference);
        prop_assert!(is_distinct(&distinct));
        prop_assert!(distinct.size() <= tree.size());
        prop_assert_eq!(distinct.head(), tree.head());
        prop_assert_eq!(distinct.make_distinct(preference), distinct);
    }

    #[test]
    fn distinct_edits_preserve_distinctness(
        tree in arb_tree(30),
        other in arb_tree(10),
        leaf in prop::sample::select(vec!['a', 'b', 'c', 'd', 'e']),
        target in any::<prop::sample::Index>(),
    ) {
        let config = EditConfig::distinct();
        let tree = tree.make_distinct(Preference::Leftmost);
        let paths: Vec<Vec<char>> = tree
            .paths()
            .map(|p| p.into_iter().copied().collect())
            .collect();
        let path = target.get(&paths);

        let with_leaf = tree.insert_leaf_at(path, leaf, config);
        prop_assert!(is_distinct(&with_leaf));
        let with_child = tree.insert_child_at(path, &other, config);
        prop_assert!(is_distinct(&with_child));
        let renamed = tree.update_value_at(path, leaf, config);
        prop_assert!(is_distinct(&renamed));
        let flattened = tree.remove_value_at(path, config).unwrap_or_else(|_| tree.clone());
        prop_assert!(is_distinct(&flattened));
    }

    #[test]
    fn distinct_leaf_insertion_is_idempotent(
        tree in arb_tree(30),
        leaf in prop::sample::select(vec!['a', 'b', 'c', 'd']),
    ) {
        let once = tree.insert_leaf(leaf, EditConfig::distinct());
        prop_assert_eq!(once.insert_leaf(leaf, EditConfig::distinct()), once.clone());
        prop_assert!(once.contains_child(&leaf));
    }

    #[test]
    fn shallow_merge_removes_exactly_the_donor(
        tree in arb_tree(40),
        first in any::<prop::sample::Index>(),
        second in any::<prop::sample::Index>(),
    ) {
        let size = tree.size();
        let recipient = first.index(size);
        let donor = second.index(size);
        prop_assume!(recipient != donor);

        let mut buffer = tree.to_buffer();
        let merged = shallow_merge(&mut buffer, recipient, donor, &mut Vec::new());
        prop_assert_eq!(buffer.len(), size - 1);
        prop_assert!(index::validate(buffer.structure()).is_ok());
        prop_assert_eq!(buffer.value(merged), &tree.values()[recipient]);

        let mut expected = tree.values().to_vec();
        expected.remove(donor);
        prop_assert_eq!(sorted(buffer.values().to_vec()), sorted(expected));
    }

    #[test]
    fn deep_merge_repairs_the_recipient(
        tree in arb_tree(40),
        first in any::<prop::sample::Index>(),
        second in any::<prop::sample::Index>(),
    ) {
        let tree = tree.make_distinct(Preference::Leftmost);
        let size = tree.size();
        let recipient = first.index(size);
        let donor = second.index(size);
        prop_assume!(recipient != donor);

        let mut buffer = tree.to_buffer();
        let merged = deep_merge(
            &mut buffer,
            recipient,
            donor,
            Preference::Leftmost,
            &mut Vec::new(),
        );
        prop_assert!(buffer.len() < size);
        let published = ArrayTree::try_from(buffer).unwrap();
        let children = index::children_indexes(published.structure(), merged);
        let values: Vec<char> = children.iter().map(|&c| published.values()[c]).collect();
        let mut unique = values.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(unique.len(), values.len());
    }

    #[test]
    fn branch_containment_matches_full_path_match(
        tree in arb_tree(30),
        probe in proptest::collection::vec(prop::sample::select(vec!['a', 'b', 'c', 'd']), 0..6),
    ) {
        let full = follow_entire_path(
            tree.structure(),
            tree.values(),
            None,
            &probe,
            Preference::Leftmost,
            |item: &char, value: &char| item == value,
        );
        let ends_on_leaf = full
            .as_ref()
            .and_then(|indexes| indexes.last())
            .map(|&last| tree.structure()[last] == 0)
            .unwrap_or(false);
        prop_assert_eq!(tree.contains_branch(&probe), ends_on_leaf);

        for branch in tree.branches() {
            let branch: Vec<char> = branch.into_iter().copied().collect();
            let indexes = follow_entire_path(
                tree.structure(),
                tree.values(),
                None,
                &branch,
                Preference::Leftmost,
                |item: &char, value: &char| item == value,
            );
            prop_assert!(indexes.is_some());
        }
    }
}
