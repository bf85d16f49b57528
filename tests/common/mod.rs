#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use lintree::{index, notation, ArrayTree};
use proptest::prelude::*;

fn snapshot_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_root().join(name);
    if std::env::var("LINTREE_UPDATE_SNAPSHOTS").is_ok() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("snapshot {:?} not found", path));
    if normalize(&expected) != normalize(actual) {
        panic!(
            "Snapshot mismatch for {:?}. Set LINTREE_UPDATE_SNAPSHOTS=1 to regenerate.\nExpected:\n{}\nActual:\n{}",
            path,
            expected,
            actual
        );
    }
}

fn normalize(input: &str) -> String {
    input.replace("\r\n", "\n").trim_end().to_string()
}

pub fn tree(text: &str) -> ArrayTree<String> {
    notation::parse(text).expect("valid notation")
}

pub fn path(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// No node anywhere has two children with equal values
pub fn is_distinct<T: PartialEq>(tree: &ArrayTree<T>) -> bool {
    let structure = tree.structure();
    let values = tree.values();
    (0..structure.len()).all(|parent| {
        let children = index::children_indexes(structure, parent);
        children.iter().enumerate().all(|(position, &first)| {
            children[position + 1..]
                .iter()
                .all(|&other| values[other] != values[first])
        })
    })
}

/// Tree where node `k > 0` hangs under `parents[k - 1]`, children in id order
pub fn from_parents(parents: &[usize], values: &[char]) -> ArrayTree<char> {
    let mut children = vec![Vec::new(); values.len()];
    for (offset, &parent) in parents.iter().enumerate() {
        children[parent].push(offset + 1);
    }

    let mut structure = Vec::with_capacity(values.len());
    let mut encoded = Vec::with_capacity(values.len());
    let mut stack = vec![(0usize, 0usize)];
    while let Some((node, cursor)) = stack.last_mut() {
        let node = *node;
        if let Some(&child) = children[node].get(*cursor) {
            *cursor += 1;
            stack.push((child, 0));
        } else {
            structure.push(children[node].len());
            encoded.push(values[node]);
            stack.pop();
        }
    }

    ArrayTree::from_slices(&structure, &encoded).expect("parent lists describe one tree")
}

/// Random trees over a small alphabet, so equal siblings are common
pub fn arb_tree(max_nodes: usize) -> impl Strategy<Value = ArrayTree<char>> {
    (1..=max_nodes)
        .prop_flat_map(|nodes| {
            (
                proptest::collection::vec(any::<prop::sample::Index>(), nodes - 1),
                proptest::collection::vec(prop::sample::select(vec!['a', 'b', 'c', 'd']), nodes),
            )
        })
        .prop_map(|(parents, values)| {
            let parents: Vec<usize> = parents
                .iter()
                .enumerate()
                .map(|(offset, choice)| choice.index(offset + 1))
                .collect();
            from_parents(&parents, &values)
        })
}
