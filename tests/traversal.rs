mod common;

use common::{assert_snapshot, tree};
use lintree::traversal::{height, BreadthFirst, Branches, DepthFirst, Paths, UNBOUNDED};
use lintree::ArrayTree;

const TEXT: &str = "root(a(a1,a2(x,y)),b,c(c1))";

#[test]
fn depth_first_and_breadth_first_orders() {
    let tree = tree(TEXT);
    let dfs: Vec<&str> = tree.values_dfs().map(String::as_str).collect();
    assert_eq!(dfs, ["root", "a", "a1", "a2", "x", "y", "b", "c", "c1"]);
    let bfs: Vec<&str> = tree.values_bfs().map(String::as_str).collect();
    assert_eq!(bfs, ["root", "a", "b", "c", "a1", "a2", "c1", "x", "y"]);
}

#[test]
fn levels_are_relative_to_the_start() {
    let tree = tree(TEXT);
    let structure = tree.structure();
    let a = tree.values().iter().position(|v| v == "a").unwrap();
    let levels: Vec<usize> = DepthFirst::new(structure, a, UNBOUNDED)
        .map(|(level, _)| level)
        .collect();
    assert_eq!(levels, [0, 1, 1, 2, 2]);
    assert_eq!(height(structure, a), 3);
    assert_eq!(tree.height(), 4);
}

#[test]
fn depth_bound_truncates_every_iterator() {
    let tree = tree(TEXT);
    let structure = tree.structure();
    let root = structure.len() - 1;
    assert_eq!(DepthFirst::new(structure, root, 2).count(), 4);
    assert_eq!(BreadthFirst::new(structure, root, 2).count(), 4);
    assert_eq!(Branches::new(structure, root, 2).count(), 3);
    assert_eq!(Paths::new(structure, root, 3).count(), 7);
    assert_eq!(DepthFirst::new(structure, root, 0).count(), 0);
}

#[test]
fn branches_snapshot() {
    assert_snapshot("branches.txt", &tree(TEXT).render_branches(" > "));
}

#[test]
fn branch_count_matches_leaves() {
    let tree = tree(TEXT);
    assert_eq!(tree.branches().count(), tree.leaves_count());
    assert_eq!(tree.count_branches(), 5);
    for branch in tree.branches() {
        let path: Vec<String> = branch.into_iter().cloned().collect();
        assert!(tree.contains_branch(&path));
    }
}

#[test]
fn iterators_are_single_pass() {
    let tree = tree(TEXT);
    let mut values = tree.values_dfs();
    assert_eq!(values.by_ref().count(), 9);
    assert_eq!(values.next(), None);
}

#[test]
fn wide_and_tall_trees_stay_iterative() {
    let wide = ArrayTree::node(0u32, (1..=50_000).map(ArrayTree::leaf));
    assert_eq!(wide.values_bfs().count(), 50_001);
    assert_eq!(wide.height(), 2);

    let depth = 100_000;
    let structure: Vec<usize> = (0..depth).map(|i| usize::from(i > 0)).collect();
    let values: Vec<usize> = (0..depth).collect();
    let tall = ArrayTree::from_slices(&structure, &values).expect("chain is valid");
    assert_eq!(tall.height(), depth);
    assert_eq!(tall.branches().next().map(|b| b.len()), Some(depth));
    assert_eq!(tall.subtrees_with_max_depth(3).count(), 3);
}
