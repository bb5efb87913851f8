use super::AvlMap;

impl<K, V> AvlMap<K, V> {
    /// Returns the height of the tree in levels, where an empty map has height 0
    /// and a map with one entry has height 1.
    ///
    /// This is a structural extension and is not part of the standard
    /// `BTreeMap` API.
    ///
    /// The balance invariant keeps the height at or below
    /// 1.44 log<sub>2</sub>(n + 2) for a map of n entries.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.height(), 0);
    ///
    /// map.insert(2, "b");
    /// assert_eq!(map.height(), 1);
    ///
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    /// assert_eq!(map.height(), 2);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns `true` if every leaf of the tree sits at the same depth.
    ///
    /// This is a structural extension and is not part of the standard
    /// `BTreeMap` API.
    ///
    /// Only leaves count: a node with a single child contributes no leaf on its
    /// empty side, so a two-entry map is still considered equal-depth. An empty
    /// map is equal-depth by convention.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert!(map.equal_leaf_depths());
    ///
    /// // Two entries: the single leaf is the only leaf.
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert!(map.equal_leaf_depths());
    ///
    /// // Perfect tree of three: both leaves at depth 2.
    /// map.insert(3, "c");
    /// assert!(map.equal_leaf_depths());
    ///
    /// // A fourth entry grows a leaf one level deeper than the others.
    /// map.insert(4, "d");
    /// assert!(!map.equal_leaf_depths());
    /// ```
    #[must_use]
    pub fn equal_leaf_depths(&self) -> bool {
        self.raw.equal_leaf_depths()
    }
}
