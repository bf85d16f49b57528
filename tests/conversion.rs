mod common;

use common::tree;
use lintree::tree::TreeNode;
use lintree::{convert, ArrayTree, Builder, NodeTree, TreeBuffer, TreeError, TreeLike};
use test_case::test_case;

fn round_trip<R: TreeLike<String>>(text: &str) -> ArrayTree<String> {
    let original = tree(text);
    let other: R = convert(&original).unwrap();
    assert_eq!(other.size(), original.size());
    convert(&other).unwrap()
}

#[test_case("a" ; "leaf")]
#[test_case("a(b(d,e),c)" ; "nested")]
#[test_case("a(b,b,b(c,c))" ; "duplicate siblings survive conversion")]
#[test_case("" ; "empty")]
fn array_and_node_trees_agree(text: &str) {
    assert_eq!(round_trip::<NodeTree<String>>(text), tree(text));
    assert_eq!(round_trip::<ArrayTree<String>>(text), tree(text));
}

#[test]
fn slices_and_buffers_round_trip() {
    let original = tree("r(x(y(z)),w)");
    let (structure, values) = original.to_slices();
    assert_eq!(ArrayTree::from_slices(&structure, &values).unwrap(), original);

    let buffer: TreeBuffer<String> = original.to_buffers();
    assert_eq!(
        <ArrayTree<String> as TreeLike<String>>::from_buffers(buffer.clone()).unwrap(),
        original
    );
    assert_eq!(NodeTree::from_buffers(buffer).unwrap().to_string(), "r(x(y(z)),w)");
}

#[test]
fn node_tree_exposes_children_in_order() {
    let node_tree: NodeTree<String> = convert(&tree("a(b(d,e),c)")).unwrap();
    let root: &TreeNode<String> = node_tree.root().expect("non-empty");
    let names: Vec<&str> = root.children.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(names, ["b", "c"]);
}

#[test]
fn invalid_encodings_are_rejected_by_both_representations() {
    let forest = [0usize, 0];
    let values = [1, 2];
    assert_eq!(
        ArrayTree::from_slices(&forest, &values),
        Err(TreeError::DanglingNodes { roots: 2 })
    );
    assert_eq!(
        NodeTree::from_slices(&forest, &values),
        Err(TreeError::DanglingNodes { roots: 2 })
    );
    assert!(matches!(
        ArrayTree::from_slices(&[2, 0], &[1, 2]),
        Err(TreeError::MalformedEncoding { .. })
    ));
    let buffer = TreeBuffer::from_parts(vec![0, 0], vec!['x', 'y']).unwrap();
    assert!(ArrayTree::try_from(buffer).is_err());
}

#[test]
fn builder_output_converts_cleanly() {
    let trees = Builder::from_descriptors([(0, 'x'), (1, 'b'), (0, 'c')]).unwrap();
    assert_eq!(trees.len(), 2);
    for tree in &trees {
        let linked: NodeTree<char> = convert(tree).unwrap();
        let back: ArrayTree<char> = convert(&linked).unwrap();
        assert_eq!(&back, tree);
    }
}

#[test]
fn shared_snapshots_are_thread_safe() {
    let shared = tree("a(b(c),d)");
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let snapshot = shared.clone();
            std::thread::spawn(move || {
                snapshot
                    .insert_leaf(format!("n{i}"), lintree::EditConfig::distinct())
                    .size()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 5);
    }
    assert_eq!(shared.to_string(), "a(b(c),d)");
}
