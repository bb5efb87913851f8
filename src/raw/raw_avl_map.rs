use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;

/// The core AVL tree implementation backing `AvlMap`.
pub(crate) struct RawAvlMap<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K>>,
    /// Arena storing all values (separate from nodes so value mutation never
    /// aliases node links during iteration).
    values: Arena<V>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of key-value pairs in the tree.
    len: usize,
}

/// Type alias for an explicit traversal stack. An AVL tree over a `u32`
/// handle space is at most 46 levels deep; deeper stacks spill to the heap.
type TraversalStack<T> = SmallVec<[T; 48]>;

impl<K, V> RawAvlMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self { nodes: Arena::new(), values: Arena::new(), root: None, len: 0 }
    }

    /// Creates a new tree with the specified capacity.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            values: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the capacity of the tree.
    pub(crate) fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.values.clear();
        self.root = None;
        self.len = 0;
    }

    /// Drains all key-value pairs from the tree in key order.
    /// This is O(n) as it avoids rebalancing, unlike repeated `pop_first`/`pop_last`.
    pub(crate) fn drain_to_vec(&mut self) -> alloc::vec::Vec<(K, V)> {
        let mut result = alloc::vec::Vec::with_capacity(self.len);
        let mut stack: TraversalStack<Handle> = SmallVec::new();
        let mut current = self.root;

        // In-order walk, freeing each node at its visit. Ancestors still on
        // the stack are untouched until their left subtrees are exhausted.
        loop {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.nodes.get(handle).left;
            }
            let Some(handle) = stack.pop() else { break };
            let node = self.nodes.take(handle);
            let value = self.values.take(node.value);
            result.push((node.key, value));
            current = node.right;
        }

        self.nodes.clear();
        self.values.clear();
        self.root = None;
        self.len = 0;
        result
    }

    /// Returns a reference to a node by handle.
    pub(crate) fn node(&self, handle: Handle) -> &Node<K> {
        self.nodes.get(handle)
    }

    /// Returns a reference to a node by handle from a raw pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawAvlMap<K, V>`.
    pub(crate) unsafe fn node_ptr<'a>(ptr: *const Self, handle: Handle) -> &'a Node<K> {
        // SAFETY: We only access the `nodes` field through addr_of, avoiding aliasing with
        // the `values` field.
        unsafe { Arena::get_ptr(core::ptr::addr_of!((*ptr).nodes), handle) }
    }

    /// Returns a mutable reference to a node by handle.
    fn node_mut(&mut self, handle: Handle) -> &mut Node<K> {
        self.nodes.get_mut(handle)
    }

    /// Returns a reference to a value by handle.
    pub(crate) fn value(&self, handle: Handle) -> &V {
        self.values.get(handle)
    }

    /// Returns a mutable reference to a value by handle.
    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        self.values.get_mut(handle)
    }

    /// Returns a mutable reference to a value by handle from a raw pointer.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawAvlMap<K, V>`.
    /// - The caller must ensure no other mutable references to the values arena exist.
    /// - The caller must have logical exclusive access to the value at `handle`.
    pub(crate) unsafe fn value_mut_ptr<'a>(ptr: *mut Self, handle: Handle) -> &'a mut V {
        // SAFETY: We only access the `values` field, avoiding aliasing with the `nodes` field.
        unsafe { (*core::ptr::addr_of_mut!((*ptr).values)).get_mut(handle) }
    }

    /// Returns the handle of the first (minimum) node, if any.
    pub(crate) fn first_handle(&self) -> Option<Handle> {
        self.root.map(|root| self.min_in(root))
    }

    /// Returns the handle of the last (maximum) node, if any.
    pub(crate) fn last_handle(&self) -> Option<Handle> {
        self.root.map(|root| self.max_in(root))
    }

    /// Returns the leftmost handle within the subtree rooted at `handle`.
    fn min_in(&self, handle: Handle) -> Handle {
        let mut current = handle;
        while let Some(left) = self.nodes.get(current).left {
            current = left;
        }
        current
    }

    /// Returns the rightmost handle within the subtree rooted at `handle`.
    fn max_in(&self, handle: Handle) -> Handle {
        let mut current = handle;
        while let Some(right) = self.nodes.get(current).right {
            current = right;
        }
        current
    }

    /// Returns the handle of the node after `handle` in key order.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        // SAFETY: `self` is a valid tree.
        unsafe { Self::successor_ptr(self, handle) }
    }

    /// Returns the handle of the node before `handle` in key order.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        // SAFETY: `self` is a valid tree.
        unsafe { Self::predecessor_ptr(self, handle) }
    }

    /// Returns the successor of `handle` from a raw pointer, touching only
    /// the nodes arena.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawAvlMap<K, V>`.
    pub(crate) unsafe fn successor_ptr(ptr: *const Self, handle: Handle) -> Option<Handle> {
        unsafe {
            let node = Self::node_ptr(ptr, handle);
            if let Some(right) = node.right {
                let mut current = right;
                while let Some(left) = Self::node_ptr(ptr, current).left {
                    current = left;
                }
                Some(current)
            } else {
                // Climb until arriving from a left child.
                let mut current = handle;
                let mut parent = node.parent;
                while let Some(above) = parent {
                    let above_node = Self::node_ptr(ptr, above);
                    if above_node.left == Some(current) {
                        return Some(above);
                    }
                    current = above;
                    parent = above_node.parent;
                }
                None
            }
        }
    }

    /// Returns the predecessor of `handle` from a raw pointer, touching only
    /// the nodes arena.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawAvlMap<K, V>`.
    pub(crate) unsafe fn predecessor_ptr(ptr: *const Self, handle: Handle) -> Option<Handle> {
        unsafe {
            let node = Self::node_ptr(ptr, handle);
            if let Some(left) = node.left {
                let mut current = left;
                while let Some(right) = Self::node_ptr(ptr, current).right {
                    current = right;
                }
                Some(current)
            } else {
                // Climb until arriving from a right child.
                let mut current = handle;
                let mut parent = node.parent;
                while let Some(above) = parent {
                    let above_node = Self::node_ptr(ptr, above);
                    if above_node.right == Some(current) {
                        return Some(above);
                    }
                    current = above;
                    parent = above_node.parent;
                }
                None
            }
        }
    }

    /// Returns the first key-value pair in the tree.
    pub(crate) fn first_key_value(&self) -> Option<(&K, &V)> {
        let handle = self.first_handle()?;
        let node = self.nodes.get(handle);
        Some((&node.key, self.values.get(node.value)))
    }

    /// Returns the last key-value pair in the tree.
    pub(crate) fn last_key_value(&self) -> Option<(&K, &V)> {
        let handle = self.last_handle()?;
        let node = self.nodes.get(handle);
        Some((&node.key, self.values.get(node.value)))
    }

    /// Removes and returns the first key-value pair, if any.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let handle = self.first_handle()?;
        Some(self.remove_handle(handle))
    }

    /// Removes and returns the last key-value pair, if any.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let handle = self.last_handle()?;
        Some(self.remove_handle(handle))
    }

    /// Retains only the pairs for which the predicate returns true.
    pub(crate) fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        // Handles are stable across removals of other nodes, so the in-order
        // walk can be collected up front and edited as we go.
        let mut handles = alloc::vec::Vec::with_capacity(self.len);
        let mut current = self.first_handle();
        while let Some(handle) = current {
            handles.push(handle);
            current = self.successor(handle);
        }

        for handle in handles {
            let node = self.nodes.get(handle);
            if !f(&node.key, self.values.get_mut(node.value)) {
                self.remove_handle(handle);
            }
        }
    }

    /// Removes the node at `handle`, rebalancing ancestors, and returns its
    /// key and value. Only this handle is invalidated; the structural swap
    /// performed for a two-child node moves wiring, not arena slots.
    pub(crate) fn remove_handle(&mut self, handle: Handle) -> (K, V) {
        // A node with two children first trades places with its in-order
        // predecessor (rightmost of the left subtree), which has at most one
        // child, so the detach below always splices out at most one link.
        let node = self.nodes.get(handle);
        if let (Some(left), Some(_)) = (node.left, node.right) {
            let predecessor = self.max_in(left);
            self.swap_nodes(handle, predecessor);
        }

        let node = self.nodes.get(handle);
        let parent = node.parent;
        let child = node.left.or(node.right);

        // Which side of the parent loses a level: +1 when the left subtree
        // shrinks, -1 when the right subtree shrinks.
        let diff: i8 = match parent {
            Some(parent) if self.nodes.get(parent).left == Some(handle) => 1,
            Some(_) => -1,
            None => 0,
        };

        self.replace_child(parent, handle, child);
        if let Some(child) = child {
            self.nodes.get_mut(child).parent = parent;
        }

        let node = self.nodes.take(handle);
        let value = self.values.take(node.value);
        self.len -= 1;

        if let Some(parent) = parent {
            self.remove_fix(parent, diff);
        }
        (node.key, value)
    }

    /// Walks upward from the parent of a detached node, restoring balance.
    /// `diff` is the correction for the side that lost a level. Each case is
    /// keyed on balances read before any rotation.
    fn remove_fix(&mut self, mut node: Handle, mut diff: i8) {
        loop {
            // Captured up front; the rotations below can demote `node`.
            let parent = self.nodes.get(node).parent;
            let next_diff: i8 = match parent {
                Some(parent) if self.nodes.get(parent).left == Some(node) => 1,
                Some(_) => -1,
                None => 0,
            };

            if diff == -1 {
                let new_balance = self.nodes.get(node).balance - 1;
                if new_balance == -2 {
                    let child = self
                        .nodes
                        .get(node)
                        .left
                        .expect("`RawAvlMap::remove_fix()` - balance -2 without a left child!");
                    let child_balance = self.nodes.get(child).balance;
                    if child_balance == -1 {
                        // Zig-zig: the subtree ends up one level shorter, so
                        // the shrink keeps propagating.
                        self.rotate_right(node);
                        self.nodes.get_mut(node).balance = 0;
                        self.nodes.get_mut(child).balance = 0;
                    } else if child_balance == 0 {
                        // Zig-zig with a level child: height is preserved.
                        self.rotate_right(node);
                        self.nodes.get_mut(node).balance = -1;
                        self.nodes.get_mut(child).balance = 1;
                        return;
                    } else {
                        // Zig-zag through the grandchild; its pre-rotation
                        // balance decides all three results.
                        let grandchild = self
                            .nodes
                            .get(child)
                            .right
                            .expect("`RawAvlMap::remove_fix()` - zig-zag without a grandchild!");
                        let grandchild_balance = self.nodes.get(grandchild).balance;
                        self.rotate_left(child);
                        self.rotate_right(node);
                        match grandchild_balance {
                            1 => {
                                self.nodes.get_mut(node).balance = 0;
                                self.nodes.get_mut(child).balance = -1;
                            }
                            0 => {
                                self.nodes.get_mut(node).balance = 0;
                                self.nodes.get_mut(child).balance = 0;
                            }
                            _ => {
                                self.nodes.get_mut(node).balance = 1;
                                self.nodes.get_mut(child).balance = 0;
                            }
                        }
                        self.nodes.get_mut(grandchild).balance = 0;
                    }
                } else if new_balance == -1 {
                    // The taller side absorbed the shrink; heights above are
                    // unchanged.
                    self.nodes.get_mut(node).balance = -1;
                    return;
                } else {
                    // new_balance == 0: this subtree is now shorter.
                    self.nodes.get_mut(node).balance = 0;
                }
            } else {
                let new_balance = self.nodes.get(node).balance + 1;
                if new_balance == 2 {
                    let child = self
                        .nodes
                        .get(node)
                        .right
                        .expect("`RawAvlMap::remove_fix()` - balance 2 without a right child!");
                    let child_balance = self.nodes.get(child).balance;
                    if child_balance == 1 {
                        self.rotate_left(node);
                        self.nodes.get_mut(node).balance = 0;
                        self.nodes.get_mut(child).balance = 0;
                    } else if child_balance == 0 {
                        self.rotate_left(node);
                        self.nodes.get_mut(node).balance = 1;
                        self.nodes.get_mut(child).balance = -1;
                        return;
                    } else {
                        let grandchild = self
                            .nodes
                            .get(child)
                            .left
                            .expect("`RawAvlMap::remove_fix()` - zig-zag without a grandchild!");
                        let grandchild_balance = self.nodes.get(grandchild).balance;
                        self.rotate_right(child);
                        self.rotate_left(node);
                        match grandchild_balance {
                            -1 => {
                                self.nodes.get_mut(node).balance = 0;
                                self.nodes.get_mut(child).balance = 1;
                            }
                            0 => {
                                self.nodes.get_mut(node).balance = 0;
                                self.nodes.get_mut(child).balance = 0;
                            }
                            _ => {
                                self.nodes.get_mut(node).balance = -1;
                                self.nodes.get_mut(child).balance = 0;
                            }
                        }
                        self.nodes.get_mut(grandchild).balance = 0;
                    }
                } else if new_balance == 1 {
                    self.nodes.get_mut(node).balance = 1;
                    return;
                } else {
                    self.nodes.get_mut(node).balance = 0;
                }
            }

            let Some(parent) = parent else { return };
            node = parent;
            diff = next_diff;
        }
    }

    /// Rotates left around `node`, promoting its right child. The child must
    /// exist. The second balance update reads the first's result.
    fn rotate_left(&mut self, node: Handle) {
        let right = self
            .nodes
            .get(node)
            .right
            .expect("`RawAvlMap::rotate_left()` - node has no right child!");

        // The promoted child's left subtree crosses over to `node`.
        let right_left = self.nodes.get(right).left;
        self.nodes.get_mut(node).right = right_left;
        if let Some(moved) = right_left {
            self.nodes.get_mut(moved).parent = Some(node);
        }

        // The promoted child takes `node`'s place under its parent.
        let parent = self.nodes.get(node).parent;
        self.nodes.get_mut(right).parent = parent;
        self.replace_child(parent, node, Some(right));

        self.nodes.get_mut(right).left = Some(node);
        self.nodes.get_mut(node).parent = Some(right);

        let right_balance = self.nodes.get(right).balance;
        let node_balance = self.nodes.get(node).balance - 1 - right_balance.max(0);
        self.nodes.get_mut(node).balance = node_balance;
        self.nodes.get_mut(right).balance = right_balance - 1 + node_balance.min(0);
    }

    /// Rotates right around `node`, promoting its left child. The child must
    /// exist. The second balance update reads the first's result.
    fn rotate_right(&mut self, node: Handle) {
        let left = self
            .nodes
            .get(node)
            .left
            .expect("`RawAvlMap::rotate_right()` - node has no left child!");

        // The promoted child's right subtree crosses over to `node`.
        let left_right = self.nodes.get(left).right;
        self.nodes.get_mut(node).left = left_right;
        if let Some(moved) = left_right {
            self.nodes.get_mut(moved).parent = Some(node);
        }

        // The promoted child takes `node`'s place under its parent.
        let parent = self.nodes.get(node).parent;
        self.nodes.get_mut(left).parent = parent;
        self.replace_child(parent, node, Some(left));

        self.nodes.get_mut(left).right = Some(node);
        self.nodes.get_mut(node).parent = Some(left);

        let left_balance = self.nodes.get(left).balance;
        let node_balance = self.nodes.get(node).balance + 1 - left_balance.min(0);
        self.nodes.get_mut(node).balance = node_balance;
        self.nodes.get_mut(left).balance = left_balance + 1 + node_balance.max(0);
    }

    /// Points the `parent` link that held `old` at `new` instead. A missing
    /// parent means `old` was the root.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent_node = self.nodes.get_mut(parent);
                if parent_node.left == Some(old) {
                    parent_node.left = new;
                } else {
                    parent_node.right = new;
                }
            }
        }
    }

    /// Exchanges the tree positions of two nodes: parent and child wiring
    /// plus balance factors move, while keys, values, and handles stay put.
    /// Direct parent-child adjacency and the root are handled.
    fn swap_nodes(&mut self, a: Handle, b: Handle) {
        if a == b {
            return;
        }
        // Normalize so any adjacency has `b` below `a`.
        let b_node = self.nodes.get(b);
        if b_node.left == Some(a) || b_node.right == Some(a) {
            return self.swap_nodes(b, a);
        }

        let a_node = self.nodes.get(a);
        let (a_parent, a_left, a_right) = (a_node.parent, a_node.left, a_node.right);
        let b_node = self.nodes.get(b);
        let (b_parent, b_left, b_right) = (b_node.parent, b_node.left, b_node.right);

        if a_left == Some(b) || a_right == Some(b) {
            // `b` is a direct child of `a`: `b` takes `a`'s place with `a`
            // hanging where `b` was, and `a` adopts `b`'s children.
            self.replace_child(a_parent, a, Some(b));
            {
                let b_node = self.nodes.get_mut(b);
                b_node.parent = a_parent;
                if a_left == Some(b) {
                    b_node.left = Some(a);
                    b_node.right = a_right;
                } else {
                    b_node.left = a_left;
                    b_node.right = Some(a);
                }
            }
            let kept = if a_left == Some(b) { a_right } else { a_left };
            if let Some(kept) = kept {
                self.nodes.get_mut(kept).parent = Some(b);
            }
            {
                let a_node = self.nodes.get_mut(a);
                a_node.parent = Some(b);
                a_node.left = b_left;
                a_node.right = b_right;
            }
        } else {
            // Disjoint: swap the surrounding links wholesale.
            self.replace_child(a_parent, a, Some(b));
            self.replace_child(b_parent, b, Some(a));
            {
                let a_node = self.nodes.get_mut(a);
                a_node.parent = b_parent;
                a_node.left = b_left;
                a_node.right = b_right;
            }
            {
                let b_node = self.nodes.get_mut(b);
                b_node.parent = a_parent;
                b_node.left = a_left;
                b_node.right = a_right;
            }
            if let Some(child) = a_left {
                self.nodes.get_mut(child).parent = Some(b);
            }
            if let Some(child) = a_right {
                self.nodes.get_mut(child).parent = Some(b);
            }
        }
        if let Some(child) = b_left {
            self.nodes.get_mut(child).parent = Some(a);
        }
        if let Some(child) = b_right {
            self.nodes.get_mut(child).parent = Some(a);
        }

        // Balance describes the position, so it travels with the position.
        let a_balance = self.nodes.get(a).balance;
        let b_balance = self.nodes.get(b).balance;
        self.nodes.get_mut(a).balance = b_balance;
        self.nodes.get_mut(b).balance = a_balance;
    }

    /// Returns the number of levels on the longest root-to-leaf path,
    /// following the taller side indicated by each balance factor. An empty
    /// tree has height 0.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            height += 1;
            let node = self.nodes.get(handle);
            current = if node.balance >= 0 { node.right } else { node.left };
        }
        height
    }

    /// Returns true if every leaf sits at the same depth. Vacuously true for
    /// the empty tree. A missing child contributes no leaf, so a node whose
    /// leaves all hang off one side is judged by that side alone.
    pub(crate) fn equal_leaf_depths(&self) -> bool {
        let Some(root) = self.root else { return true };

        let mut expected: Option<usize> = None;
        let mut stack: TraversalStack<(Handle, usize)> = SmallVec::new();
        stack.push((root, 0));

        while let Some((handle, depth)) = stack.pop() {
            let node = self.nodes.get(handle);
            if node.is_leaf() {
                match expected {
                    None => expected = Some(depth),
                    Some(first) if first != depth => return false,
                    Some(_) => {}
                }
            }
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
        }
        true
    }
}

impl<K: Ord, V> RawAvlMap<K, V> {
    /// Searches for a key and returns its handle if present.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
                Ordering::Equal => return Some(handle),
            }
        }
        None
    }

    /// Returns a reference to the value corresponding to the key.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.values.get(self.nodes.get(handle).value))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        let value = self.nodes.get(handle).value;
        Some(self.values.get_mut(value))
    }

    /// Returns the key-value pair corresponding to the key.
    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        let node = self.nodes.get(handle);
        Some((&node.key, self.values.get(node.value)))
    }

    /// Returns true if the tree contains the key.
    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    /// Inserts a key-value pair, returning the previous value for the key
    /// (if any) and the handle of the node now holding the key. An equal key
    /// has its value overwritten in place with no structural change.
    pub(crate) fn insert(&mut self, key: K, value: V) -> (Option<V>, Handle) {
        let Some(root) = self.root else {
            let value = self.values.alloc(value);
            let handle = self.nodes.alloc(Node::new(key, value, None));
            self.root = Some(handle);
            self.len = 1;
            return (None, handle);
        };

        // Descend to the attachment point.
        let mut current = root;
        let went_left = loop {
            let node = self.nodes.get(current);
            match key.cmp(&node.key) {
                Ordering::Less => match node.left {
                    Some(left) => current = left,
                    None => break true,
                },
                Ordering::Greater => match node.right {
                    Some(right) => current = right,
                    None => break false,
                },
                Ordering::Equal => {
                    let value_handle = node.value;
                    let old = mem::replace(self.values.get_mut(value_handle), value);
                    return (Some(old), current);
                }
            }
        };

        let parent = current;
        let value = self.values.alloc(value);
        let leaf = self.nodes.alloc(Node::new(key, value, Some(parent)));
        {
            let parent_node = self.nodes.get_mut(parent);
            if went_left {
                parent_node.left = Some(leaf);
            } else {
                parent_node.right = Some(leaf);
            }
        }
        self.len += 1;

        // The attachment point was a leaf exactly when its balance was 0;
        // only then did its subtree grow and the change propagate.
        if self.nodes.get(parent).balance == 0 {
            self.nodes.get_mut(parent).balance = if went_left { -1 } else { 1 };
            self.insert_fix(parent, leaf);
        } else {
            // One child on each side now; height unchanged.
            self.nodes.get_mut(parent).balance = 0;
        }
        (None, leaf)
    }

    /// Walks upward from a node whose subtree just grew one level, adjusting
    /// ancestor balances. A single or double rotation at the first ancestor
    /// pushed to +2 or -2 restores that subtree's prior height, ending the
    /// walk. Each case is keyed on balances read before any rotation.
    fn insert_fix(&mut self, mut parent: Handle, mut node: Handle) {
        loop {
            let Some(grandparent) = self.nodes.get(parent).parent else { return };

            if self.nodes.get(grandparent).left == Some(parent) {
                let balance = self.nodes.get(grandparent).balance - 1;
                self.nodes.get_mut(grandparent).balance = balance;

                if balance == 0 {
                    return;
                } else if balance == -1 {
                    node = parent;
                    parent = grandparent;
                } else {
                    if self.nodes.get(parent).left == Some(node) {
                        // Zig-zig: one rotation levels both pivots.
                        self.rotate_right(grandparent);
                        self.nodes.get_mut(parent).balance = 0;
                        self.nodes.get_mut(grandparent).balance = 0;
                    } else {
                        // Zig-zag: the inserted side's pre-rotation balance
                        // decides all three results.
                        let node_balance = self.nodes.get(node).balance;
                        self.rotate_left(parent);
                        self.rotate_right(grandparent);
                        match node_balance {
                            -1 => {
                                self.nodes.get_mut(parent).balance = 0;
                                self.nodes.get_mut(grandparent).balance = 1;
                            }
                            0 => {
                                self.nodes.get_mut(parent).balance = 0;
                                self.nodes.get_mut(grandparent).balance = 0;
                            }
                            _ => {
                                self.nodes.get_mut(parent).balance = -1;
                                self.nodes.get_mut(grandparent).balance = 0;
                            }
                        }
                        self.nodes.get_mut(node).balance = 0;
                    }
                    return;
                }
            } else {
                let balance = self.nodes.get(grandparent).balance + 1;
                self.nodes.get_mut(grandparent).balance = balance;

                if balance == 0 {
                    return;
                } else if balance == 1 {
                    node = parent;
                    parent = grandparent;
                } else {
                    if self.nodes.get(parent).right == Some(node) {
                        self.rotate_left(grandparent);
                        self.nodes.get_mut(parent).balance = 0;
                        self.nodes.get_mut(grandparent).balance = 0;
                    } else {
                        let node_balance = self.nodes.get(node).balance;
                        self.rotate_right(parent);
                        self.rotate_left(grandparent);
                        match node_balance {
                            1 => {
                                self.nodes.get_mut(parent).balance = 0;
                                self.nodes.get_mut(grandparent).balance = -1;
                            }
                            0 => {
                                self.nodes.get_mut(parent).balance = 0;
                                self.nodes.get_mut(grandparent).balance = 0;
                            }
                            _ => {
                                self.nodes.get_mut(parent).balance = 1;
                                self.nodes.get_mut(grandparent).balance = 0;
                            }
                        }
                        self.nodes.get_mut(node).balance = 0;
                    }
                    return;
                }
            }
        }
    }

    /// Removes a key from the tree, returning its value if it was present.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.remove_handle(handle).1)
    }

    /// Removes a key from the tree, returning the stored key and value if
    /// the key was present.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.remove_handle(handle))
    }

    /// Moves all elements from `other` into `self`, leaving `other` empty.
    /// On duplicate keys, values from `other` win.
    pub(crate) fn append(&mut self, other: &mut Self) {
        for (key, value) in other.drain_to_vec() {
            self.insert(key, value);
        }
    }

    /// Splits the tree at `key`: pairs with keys greater than or equal to it
    /// move to the returned tree, the rest stay.
    pub(crate) fn split_off<Q>(&mut self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut tail = alloc::vec::Vec::new();
        loop {
            let splits = match self.last_key_value() {
                Some((last, _)) => last.borrow() >= key,
                None => false,
            };
            if !splits {
                break;
            }
            let Some(pair) = self.pop_last() else { break };
            tail.push(pair);
        }

        // Popped in descending order; insert ascending.
        let mut split = Self::with_capacity(tail.len());
        for (key, value) in tail.into_iter().rev() {
            split.insert(key, value);
        }
        split
    }
}

impl<K: Clone, V: Clone> Clone for RawAvlMap<K, V> {
    fn clone(&self) -> Self {
        let mut clone = Self::with_capacity(self.len);
        let Some(root) = self.root else { return clone };

        let root_node = self.nodes.get(root);
        let value = clone.values.alloc(self.values.get(root_node.value).clone());
        let mut new_node = Node::new(root_node.key.clone(), value, None);
        new_node.balance = root_node.balance;
        let new_root = clone.nodes.alloc(new_node);
        clone.root = Some(new_root);

        // Pre-order copy; the stack pairs source handles with their freshly
        // allocated counterparts.
        let mut stack: TraversalStack<(Handle, Handle)> = SmallVec::new();
        stack.push((root, new_root));
        while let Some((source, target)) = stack.pop() {
            let node = self.nodes.get(source);
            if let Some(left) = node.left {
                let child = self.nodes.get(left);
                let value = clone.values.alloc(self.values.get(child.value).clone());
                let mut new_node = Node::new(child.key.clone(), value, Some(target));
                new_node.balance = child.balance;
                let new_left = clone.nodes.alloc(new_node);
                clone.nodes.get_mut(target).left = Some(new_left);
                stack.push((left, new_left));
            }
            if let Some(right) = node.right {
                let child = self.nodes.get(right);
                let value = clone.values.alloc(self.values.get(child.value).clone());
                let mut new_node = Node::new(child.key.clone(), value, Some(target));
                new_node.balance = child.balance;
                let new_right = clone.nodes.alloc(new_node);
                clone.nodes.get_mut(target).right = Some(new_right);
                stack.push((right, new_right));
            }
        }
        clone.len = self.len;
        clone
    }
}
