use super::AvlMap;
use crate::raw::RawAvlMap;

impl<K, V> AvlMap<K, V> {
    /// Creates an empty map with capacity for at least `capacity` elements.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let map: AvlMap<i32, i32> = AvlMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlMap {
            raw: RawAvlMap::with_capacity(capacity),
        }
    }

    /// Returns the current capacity for the map.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let map: AvlMap<i32, i32> = AvlMap::with_capacity(32);
    /// assert_eq!(map.capacity(), 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
