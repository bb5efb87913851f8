use core::fmt::{self, Debug};
use core::mem;

use crate::raw::{Handle, RawAvlMap};

/// A view into a single entry in a map, which may either be vacant or occupied.
///
/// This `enum` is constructed from the [`entry`] method on [`AvlMap`].
///
/// [`entry`]: crate::AvlMap::entry
/// [`AvlMap`]: crate::AvlMap
pub enum Entry<'a, K: 'a, V: 'a> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

/// A view into a vacant entry in a `AvlMap`.
/// It is part of the [`Entry`] enum.
pub struct VacantEntry<'a, K, V> {
    pub(crate) key: K,
    pub(crate) tree: &'a mut RawAvlMap<K, V>,
}

/// A view into an occupied entry in a `AvlMap`.
/// It is part of the [`Entry`] enum.
pub struct OccupiedEntry<'a, K, V> {
    pub(crate) handle: Handle,
    pub(crate) tree: &'a mut RawAvlMap<K, V>,
}

impl<'a, K: Ord, V> Entry<'a, K, V> {
    /// Ensures a value is in the entry by inserting the default if empty, and returns
    /// a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map: AvlMap<&str, usize> = AvlMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// assert_eq!(map["poneyland"], 12);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) if vacant (insertion), O(1) if occupied.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the default function if empty,
    /// and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map: AvlMap<&str, String> = AvlMap::new();
    /// let s = "hoho".to_string();
    ///
    /// map.entry("poneyland").or_insert_with(|| s);
    ///
    /// assert_eq!(map["poneyland"], "hoho".to_string());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) if vacant (insertion), O(1) if occupied.
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Ensures a value is in the entry by inserting, if empty, the result of the default function.
    /// This method allows for generating key-derived values for insertion by providing the default
    /// function a reference to the key that was moved during the `.entry(key)` method call.
    ///
    /// The reference to the moved key is provided so that cloning or copying the key is
    /// unnecessary, unlike with `.or_insert_with(|| ... )`.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map: AvlMap<&str, usize> = AvlMap::new();
    ///
    /// map.entry("poneyland").or_insert_with_key(|key| key.chars().count());
    ///
    /// assert_eq!(map["poneyland"], 9);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) if vacant (insertion), O(1) if occupied.
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let value = default(entry.key());
                entry.insert(value)
            }
        }
    }

    /// Returns a reference to this entry's key.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map: AvlMap<&str, usize> = AvlMap::new();
    /// assert_eq!(map.entry("poneyland").key(), &"poneyland");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[allow(clippy::must_use_candidate)]
    pub fn key(&self) -> &K {
        match *self {
            Entry::Occupied(ref entry) => entry.key(),
            Entry::Vacant(ref entry) => entry.key(),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map: AvlMap<&str, usize> = AvlMap::new();
    ///
    /// map.entry("poneyland")
    ///    .and_modify(|e| { *e += 1 })
    ///    .or_insert(42);
    /// assert_eq!(map["poneyland"], 42);
    ///
    /// map.entry("poneyland")
    ///    .and_modify(|e| { *e += 1 })
    ///    .or_insert(42);
    /// assert_eq!(map["poneyland"], 43);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[allow(clippy::return_self_not_must_use)]
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Sets the value of the entry, and returns an `OccupiedEntry`.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map: AvlMap<&str, String> = AvlMap::new();
    /// let entry = map.entry("poneyland").insert_entry("hoho".to_string());
    ///
    /// assert_eq!(entry.key(), &"poneyland");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) if vacant (insertion), O(1) if occupied.
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V> {
        match self {
            Entry::Occupied(mut entry) => {
                entry.insert(value);
                entry
            }
            Entry::Vacant(entry) => entry.insert_entry(value),
        }
    }
}

impl<'a, K: Ord, V: Default> Entry<'a, K, V> {
    /// Ensures a value is in the entry by inserting the default value if empty,
    /// and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map: AvlMap<&str, Option<usize>> = AvlMap::new();
    /// map.entry("poneyland").or_default();
    ///
    /// assert_eq!(map["poneyland"], None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) if vacant (insertion), O(1) if occupied.
    #[allow(clippy::must_use_candidate)]
    pub fn or_default(self) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(Default::default()),
        }
    }
}

impl<'a, K: Ord, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value
    /// through the `VacantEntry`.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map: AvlMap<&str, usize> = AvlMap::new();
    /// assert_eq!(map.entry("poneyland").key(), &"poneyland");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[allow(clippy::must_use_candidate)]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes ownership of the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    /// use yama_tree::avl_map::Entry;
    ///
    /// let mut map: AvlMap<&str, usize> = AvlMap::new();
    ///
    /// if let Entry::Vacant(v) = map.entry("poneyland") {
    ///     v.into_key();
    /// }
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[allow(clippy::must_use_candidate)]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Sets the value of the entry with the `VacantEntry`'s key,
    /// and returns a mutable reference to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    /// use yama_tree::avl_map::Entry;
    ///
    /// let mut map: AvlMap<&str, u32> = AvlMap::new();
    ///
    /// if let Entry::Vacant(o) = map.entry("poneyland") {
    ///     o.insert(37);
    /// }
    /// assert_eq!(map["poneyland"], 37);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(self, value: V) -> &'a mut V {
        let VacantEntry { key, tree } = self;

        // The key was vacant, so insert cannot return a displaced value.
        let (_, handle) = tree.insert(key, value);
        let value_handle = tree.node(handle).value;
        tree.value_mut(value_handle)
    }

    /// Sets the value of the entry with the `VacantEntry`'s key,
    /// and returns an `OccupiedEntry`.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    /// use yama_tree::avl_map::Entry;
    ///
    /// let mut map: AvlMap<&str, u32> = AvlMap::new();
    ///
    /// if let Entry::Vacant(o) = map.entry("poneyland") {
    ///     let entry = o.insert_entry(37);
    ///     assert_eq!(entry.get(), &37);
    /// }
    /// assert_eq!(map["poneyland"], 37);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V> {
        let VacantEntry { key, tree } = self;

        // The key was vacant, so insert cannot return a displaced value.
        let (_, handle) = tree.insert(key, value);
        OccupiedEntry { handle, tree }
    }
}

impl<'a, K: Ord, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the key in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map: AvlMap<&str, usize> = AvlMap::new();
    /// map.entry("poneyland").or_insert(12);
    /// assert_eq!(map.entry("poneyland").key(), &"poneyland");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn key(&self) -> &K {
        &self.tree.node(self.handle).key
    }

    /// Takes ownership of the key and value from the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    /// use yama_tree::avl_map::Entry;
    ///
    /// let mut map: AvlMap<&str, usize> = AvlMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// if let Entry::Occupied(o) = map.entry("poneyland") {
    ///     // We delete the entry from the map.
    ///     o.remove_entry();
    /// }
    ///
    /// // If now try to get the value, it will panic:
    /// // println!("{}", map["poneyland"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[allow(clippy::must_use_candidate)]
    pub fn remove_entry(self) -> (K, V) {
        let OccupiedEntry { handle, tree } = self;
        tree.remove_handle(handle)
    }

    /// Gets a reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    /// use yama_tree::avl_map::Entry;
    ///
    /// let mut map: AvlMap<&str, usize> = AvlMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// if let Entry::Occupied(o) = map.entry("poneyland") {
    ///     assert_eq!(o.get(), &12);
    /// }
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn get(&self) -> &V {
        let value_handle = self.tree.node(self.handle).value;
        self.tree.value(value_handle)
    }

    /// Gets a mutable reference to the value in the entry.
    ///
    /// If you need a reference to the `OccupiedEntry` that may outlive the
    /// destruction of the `Entry` value, see [`into_mut`].
    ///
    /// [`into_mut`]: OccupiedEntry::into_mut
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    /// use yama_tree::avl_map::Entry;
    ///
    /// let mut map: AvlMap<&str, usize> = AvlMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// assert_eq!(map["poneyland"], 12);
    /// if let Entry::Occupied(mut o) = map.entry("poneyland") {
    ///     *o.get_mut() += 10;
    ///     assert_eq!(*o.get(), 22);
    ///
    ///     // We can use the same Entry multiple times.
    ///     *o.get_mut() += 2;
    /// }
    /// assert_eq!(map["poneyland"], 24);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn get_mut(&mut self) -> &mut V {
        let value_handle = self.tree.node(self.handle).value;
        self.tree.value_mut(value_handle)
    }

    /// Converts the entry into a mutable reference to its value.
    ///
    /// If you need multiple references to the `OccupiedEntry`, see [`get_mut`].
    ///
    /// [`get_mut`]: OccupiedEntry::get_mut
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    /// use yama_tree::avl_map::Entry;
    ///
    /// let mut map: AvlMap<&str, usize> = AvlMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// assert_eq!(map["poneyland"], 12);
    /// if let Entry::Occupied(o) = map.entry("poneyland") {
    ///     *o.into_mut() += 10;
    /// }
    /// assert_eq!(map["poneyland"], 22);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_mut(self) -> &'a mut V {
        let OccupiedEntry { handle, tree } = self;
        let value_handle = tree.node(handle).value;
        tree.value_mut(value_handle)
    }

    /// Sets the value of the entry with the `OccupiedEntry`'s key,
    /// and returns the entry's old value.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    /// use yama_tree::avl_map::Entry;
    ///
    /// let mut map: AvlMap<&str, usize> = AvlMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// if let Entry::Occupied(mut o) = map.entry("poneyland") {
    ///     assert_eq!(o.insert(15), 12);
    /// }
    /// assert_eq!(map["poneyland"], 15);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Takes the value of the entry out of the map, and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    /// use yama_tree::avl_map::Entry;
    ///
    /// let mut map: AvlMap<&str, usize> = AvlMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// if let Entry::Occupied(o) = map.entry("poneyland") {
    ///     assert_eq!(o.remove(), 12);
    /// }
    /// // If we try to get "poneyland"'s value, it'll panic:
    /// // println!("{}", map["poneyland"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[allow(clippy::must_use_candidate)]
    pub fn remove(self) -> V {
        self.remove_entry().1
    }
}

impl<K: Debug + Ord, V: Debug> Debug for Entry<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Entry::Vacant(ref v) => f.debug_tuple("Entry").field(v).finish(),
            Entry::Occupied(ref o) => f.debug_tuple("Entry").field(o).finish(),
        }
    }
}

impl<K: Debug, V> Debug for VacantEntry<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VacantEntry").field(&self.key).finish()
    }
}

impl<K: Debug + Ord, V: Debug> Debug for OccupiedEntry<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedEntry").field("key", self.key()).field("value", self.get()).finish()
    }
}
