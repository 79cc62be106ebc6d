//! Tree node and ownership-exchanging rotations
//!
//! Nodes own their children outright; there are no parent links. A
//! rotation takes the subtree root by value and returns the promoted
//! node, moving the three reattached subtrees between owners.

/// Single node: a key, its value, and at most one child per side.
#[derive(Debug)]
pub(super) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) left: Option<Box<Node<K, V>>>,
    pub(super) right: Option<Box<Node<K, V>>>,
}

impl<K, V> Node<K, V> {
    pub(super) fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
        })
    }
}

/// Promote `root.left`, demoting `root` to its right child.
///
/// The promoted node's former right subtree becomes `root`'s new left
/// subtree, which keeps every key on the correct side of every node it
/// moves under. Identity when there is no left child; that makes the
/// final step of a splay total.
pub(super) fn rotate_right<K, V>(mut root: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match root.left.take() {
        Some(mut pivot) => {
            root.left = pivot.right.take();
            pivot.right = Some(root);
            pivot
        }
        None => root,
    }
}

/// Mirror of [`rotate_right`]: promote `root.right`.
pub(super) fn rotate_left<K, V>(mut root: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match root.right.take() {
        Some(mut pivot) => {
            root.right = pivot.left.take();
            pivot.left = Some(root);
            pivot
        }
        None => root,
    }
}
