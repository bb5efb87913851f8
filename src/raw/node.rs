use super::handle::Handle;

/// A single AVL node.
///
/// The key is immutable for the node's whole life; the value lives in the
/// tree's value arena and is reached through `value`. `parent` is a weak
/// back-link (the arena owns the memory), so upward fix-up walks need no
/// auxiliary stack.
///
/// `balance` is height(right) - height(left). Between public operations it is
/// one of {-1, 0, 1}; a transient +2 or -2 appears only inside a fix-up and is
/// resolved by rotation before the operation returns.
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) value: Handle,
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    pub(crate) balance: i8,
}

impl<K> Node<K> {
    /// A fresh leaf: no children, balance 0.
    pub(crate) const fn new(key: K, value: Handle, parent: Option<Handle>) -> Self {
        Self {
            key,
            value,
            parent,
            left: None,
            right: None,
            balance: 0,
        }
    }

    pub(crate) const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn fresh_node_is_a_balanced_leaf() {
        let value = Handle::new(0);
        let node: Node<i32> = Node::new(7, value, None);

        assert!(node.is_leaf());
        assert_eq!(node.balance, 0);
        assert_eq!(node.parent, None);
        assert_eq!(node.value, value);
    }
}
