use super::AvlSet;

impl<T> AvlSet<T> {
    /// Returns the height of the tree in levels, where an empty set has height 0
    /// and a set with one element has height 1.
    ///
    /// This is a structural extension and is not part of the standard
    /// `BTreeSet` API.
    ///
    /// The balance invariant keeps the height at or below
    /// 1.44 log<sub>2</sub>(n + 2) for a set of n elements.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.height(), 0);
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.height(), 2);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.map.height()
    }

    /// Returns `true` if every leaf of the tree sits at the same depth.
    ///
    /// This is a structural extension and is not part of the standard
    /// `BTreeSet` API.
    ///
    /// Only leaves count: a node with a single child contributes no leaf on its
    /// empty side. An empty set is equal-depth by convention.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    /// assert!(set.equal_leaf_depths());
    ///
    /// set.insert(4);
    /// assert!(!set.equal_leaf_depths());
    /// ```
    #[must_use]
    pub fn equal_leaf_depths(&self) -> bool {
        self.map.equal_leaf_depths()
    }
}
