use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::Index;

use crate::raw::{Handle, RawAvlMap};

mod capacity;
mod entry;
mod paths;

pub use entry::{Entry, OccupiedEntry, VacantEntry};

/// An ordered map based on an [AVL tree].
///
/// Given a key type with a [total order], an ordered map stores its entries in key order.
/// That means that keys must be of a type that implements the [`Ord`] trait,
/// such that two keys can always be compared to determine their [`Ordering`].
/// Examples of keys with a total order are strings with lexicographical order,
/// and numbers with their natural order.
///
/// Iterators obtained from functions such as [`AvlMap::iter`], [`AvlMap::into_iter`],
/// [`AvlMap::values`], or [`AvlMap::keys`] produce their items in key order, and take
/// worst-case logarithmic and amortized constant time per item returned.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `AvlMap` that observed the logic error and not result in undefined behavior. This could
/// include panics, incorrect results, aborts, memory leaks, and non-termination.
///
/// # Examples
///
/// ```
/// use yama_tree::AvlMap;
///
/// // type inference lets us omit an explicit type signature (which
/// // would be `AvlMap<&str, &str>` in this example).
/// let mut movie_reviews = AvlMap::new();
///
/// // review some movies.
/// movie_reviews.insert("Office Space",       "Deals with real issues in the workplace.");
/// movie_reviews.insert("Pulp Fiction",       "Masterpiece.");
/// movie_reviews.insert("The Godfather",      "Very enjoyable.");
/// movie_reviews.insert("The Blues Brothers", "Eye lyked it a lot.");
///
/// // check for a specific one.
/// if !movie_reviews.contains_key("Les Miserables") {
///     println!("We've got {} reviews, but Les Miserables ain't one.",
///              movie_reviews.len());
/// }
///
/// // oops, this review has a lot of spelling mistakes, let's delete it.
/// movie_reviews.remove("The Blues Brothers");
///
/// // look up the values associated with some keys.
/// let to_find = ["Up!", "Office Space"];
/// for movie in &to_find {
///     match movie_reviews.get(movie) {
///        Some(review) => println!("{movie}: {review}"),
///        None => println!("{movie} is unreviewed.")
///     }
/// }
///
/// // Look up the value for a key (will panic if the key is not found).
/// println!("Movie review: {}", movie_reviews["Office Space"]);
///
/// // iterate over everything.
/// for (movie, review) in &movie_reviews {
///     println!("{movie}: \"{review}\"");
/// }
/// ```
///
/// An `AvlMap` with a known list of items can be initialized from an array:
///
/// ```
/// use yama_tree::AvlMap;
///
/// let solar_distance = AvlMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// ```
///
/// ## `Entry` API
///
/// `AvlMap` implements an [`Entry API`], which allows for complex
/// methods of getting, setting, updating and removing keys and their values:
///
/// [`Entry API`]: AvlMap::entry
///
/// ```
/// use yama_tree::AvlMap;
///
/// // type inference lets us omit an explicit type signature (which
/// // would be `AvlMap<&str, u8>` in this example).
/// let mut player_stats = AvlMap::new();
///
/// fn random_stat_buff() -> u8 {
///     // could actually return some random value here - let's just return
///     // some fixed value for now
///     42
/// }
///
/// // insert a key only if it doesn't already exist
/// player_stats.entry("health").or_insert(100);
///
/// // insert a key using a function that provides a new value only if it
/// // doesn't already exist
/// player_stats.entry("defence").or_insert_with(random_stat_buff);
///
/// // update a key, guarding against the key possibly not being set
/// let stat = player_stats.entry("attack").or_insert(100);
/// *stat += random_stat_buff();
///
/// // modify an entry before an insert with in-place mutation
/// player_stats.entry("mana").and_modify(|mana| *mana += 200).or_insert(100);
/// ```
///
/// # Background
///
/// An AVL tree is a [binary search tree] that keeps itself rigidly balanced: at every node,
/// the heights of the two subtrees differ by at most one. Each node stores that difference as
/// a balance factor in {-1, 0, +1}. An insertion or removal adjusts the factors along the
/// search path and applies at most two rotations per visited level to restore the invariant,
/// so updates stay O(log n).
///
/// The rigidity buys the strongest height guarantee of the classic balanced search trees: a
/// tree holding n entries is never taller than 1.44 log<sub>2</sub>(n + 2) levels. Compared
/// with red-black trees, AVL trees rebalance more eagerly and stay flatter, which makes them
/// a good fit for workloads where lookups outnumber updates.
///
/// This implementation stores nodes in a contiguous arena addressed by compact handles
/// rather than heap-allocating each node individually. Values live in their own arena, so
/// mutating a value never touches the node wiring. Every node carries a parent link, which
/// lets the rebalancing passes and the iterators walk the tree iteratively, with no
/// recursion and no auxiliary stack.
///
/// [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
pub struct AvlMap<K, V> {
    raw: RawAvlMap<K, V>,
}

/// An iterator over the entries of a `AvlMap`.
///
/// This `struct` is created by the [`iter`] method on [`AvlMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use yama_tree::AvlMap;
///
/// let map = AvlMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: AvlMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: *const RawAvlMap<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
    _marker: PhantomData<&'a RawAvlMap<K, V>>,
}

// SAFETY: Iter behaves as &RawAvlMap<K, V>, so it is Send/Sync when the tree is Sync.
unsafe impl<K: Sync, V: Sync> Send for Iter<'_, K, V> {}
unsafe impl<K: Sync, V: Sync> Sync for Iter<'_, K, V> {}

/// A mutable iterator over the entries of a `AvlMap`.
///
/// This `struct` is created by the [`iter_mut`] method on [`AvlMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use yama_tree::AvlMap;
///
/// let mut map = AvlMap::from([(1, 10), (2, 20)]);
/// for (_, value) in map.iter_mut() {
///     *value += 1;
/// }
/// let values: Vec<_> = map.values().copied().collect();
/// assert_eq!(values, [11, 21]);
/// ```
///
/// [`iter_mut`]: AvlMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K: 'a, V: 'a> {
    tree: *mut RawAvlMap<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
    _marker: PhantomData<&'a mut (K, V)>,
}

// SAFETY: IterMut behaves as &mut RawAvlMap<K, V>, so it is Send when K and V are Send.
// It is NOT Sync because mutable iterators should not be shared across threads.
unsafe impl<K: Send, V: Send> Send for IterMut<'_, K, V> {}

/// An owning iterator over the entries of a `AvlMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`AvlMap`]
/// (provided by the [`IntoIterator`] trait). See its documentation for more.
///
/// # Examples
///
/// ```
/// use yama_tree::AvlMap;
///
/// let map = AvlMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.into_iter();
/// assert_eq!(iter.next(), Some((1, "a")));
/// assert_eq!(iter.next_back(), Some((2, "b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of a `AvlMap`.
///
/// This `struct` is created by the [`keys`] method on [`AvlMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use yama_tree::AvlMap;
///
/// let map = AvlMap::from([(2, "b"), (1, "a")]);
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, [1, 2]);
/// ```
///
/// [`keys`]: AvlMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `AvlMap`.
///
/// This `struct` is created by the [`values`] method on [`AvlMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use yama_tree::AvlMap;
///
/// let map = AvlMap::from([(1, "a"), (2, "b")]);
/// let values: Vec<_> = map.values().copied().collect();
/// assert_eq!(values, ["a", "b"]);
/// ```
///
/// [`values`]: AvlMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// A mutable iterator over the values of a `AvlMap`.
///
/// This `struct` is created by the [`values_mut`] method on [`AvlMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use yama_tree::AvlMap;
///
/// let mut map = AvlMap::from([
///     (1, String::from("hello")),
///     (2, String::from("goodbye")),
/// ]);
/// for value in map.values_mut() {
///     value.push('!');
/// }
/// let values: Vec<_> = map.values().cloned().collect();
/// assert_eq!(values, [String::from("hello!"), String::from("goodbye!")]);
/// ```
///
/// [`values_mut`]: AvlMap::values_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

// SAFETY: ValuesMut is Send when its inner IterMut is Send.
unsafe impl<K: Send, V: Send> Send for ValuesMut<'_, K, V> {}

/// An owning iterator over the keys of a `AvlMap`.
///
/// This `struct` is created by the [`into_keys`] method on [`AvlMap`].
/// See its documentation for more.
///
/// # Examples
///
/// ```
/// use yama_tree::AvlMap;
///
/// let map = AvlMap::from([(2, "b"), (1, "a")]);
/// let mut keys = map.into_keys();
/// assert_eq!(keys.next(), Some(1));
/// assert_eq!(keys.next_back(), Some(2));
/// assert_eq!(keys.next(), None);
/// ```
///
/// [`into_keys`]: AvlMap::into_keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

/// An owning iterator over the values of a `AvlMap`.
///
/// This `struct` is created by the [`into_values`] method on [`AvlMap`].
/// See its documentation for more.
///
/// # Examples
///
/// ```
/// use yama_tree::AvlMap;
///
/// let map = AvlMap::from([(1, "hello"), (2, "goodbye")]);
/// let mut values = map.into_values();
/// assert_eq!(values.next(), Some("hello"));
/// assert_eq!(values.next_back(), Some("goodbye"));
/// assert_eq!(values.next(), None);
/// ```
///
/// [`into_values`]: AvlMap::into_values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> AvlMap<K, V> {
    /// Makes a new, empty `AvlMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> AvlMap<K, V> {
        AvlMap { raw: RawAvlMap::new() }
    }

    /// Clears the map, removing all elements.
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
    /// let mut a = AvlMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
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
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns the key-value pair corresponding to the supplied key. This is
    /// potentially useful:
    /// - for key types where non-identical keys can be considered equal;
    /// - for getting the `&K` stored key value from a borrowed `&Q` lookup key; or
    /// - for getting a reference to a key with the same lifetime as the collection.
    ///
    /// The supplied key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
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
    /// map.insert(1, "a");
    /// assert_eq!(map.get_key_value(&1), Some((&1, &"a")));
    /// assert_eq!(map.get_key_value(&2), None);
    /// ```
    pub fn get_key_value<Q>(&self, k: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(k)
    }

    /// Returns the first key-value pair in the map.
    /// The key in this pair is the minimum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[allow(clippy::must_use_candidate)]
    pub fn first_key_value(&self) -> Option<(&K, &V)>
    where
        K: Ord,
    {
        self.raw.first_key_value()
    }

    /// Returns the first entry in the map for in-place manipulation.
    /// The key of this entry is the minimum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// if let Some(mut entry) = map.first_entry() {
    ///     if *entry.key() > 0 {
    ///         entry.insert("first");
    ///     }
    /// }
    /// assert_eq!(*map.get(&1).unwrap(), "first");
    /// assert_eq!(*map.get(&2).unwrap(), "b");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn first_entry(&mut self) -> Option<OccupiedEntry<'_, K, V>>
    where
        K: Ord,
    {
        let handle = self.raw.first_handle()?;
        Some(OccupiedEntry { handle, tree: &mut self.raw })
    }

    /// Removes and returns the first element in the map.
    /// The key of this element is the minimum key that was in the map.
    ///
    /// # Examples
    ///
    /// Draining elements in ascending order, while keeping a usable map each iteration.
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// while let Some((key, _val)) = map.pop_first() {
    ///     assert!(map.iter().all(|(k, _v)| *k > key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_first(&mut self) -> Option<(K, V)>
    where
        K: Ord,
    {
        self.raw.pop_first()
    }

    /// Returns the last key-value pair in the map.
    /// The key in this pair is the maximum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.last_key_value(), Some((&2, &"a")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[allow(clippy::must_use_candidate)]
    pub fn last_key_value(&self) -> Option<(&K, &V)>
    where
        K: Ord,
    {
        self.raw.last_key_value()
    }

    /// Returns the last entry in the map for in-place manipulation.
    /// The key of this entry is the maximum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// if let Some(mut entry) = map.last_entry() {
    ///     if *entry.key() > 0 {
    ///         entry.insert("last");
    ///     }
    /// }
    /// assert_eq!(*map.get(&1).unwrap(), "a");
    /// assert_eq!(*map.get(&2).unwrap(), "last");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn last_entry(&mut self) -> Option<OccupiedEntry<'_, K, V>>
    where
        K: Ord,
    {
        let handle = self.raw.last_handle()?;
        Some(OccupiedEntry { handle, tree: &mut self.raw })
    }

    /// Removes and returns the last element in the map.
    /// The key of this element is the maximum key that was in the map.
    ///
    /// # Examples
    ///
    /// Draining elements in descending order, while keeping a usable map each iteration.
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// while let Some((key, _val)) = map.pop_last() {
    ///     assert!(map.iter().all(|(k, _v)| *k < key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_last(&mut self) -> Option<(K, V)>
    where
        K: Ord,
    {
        self.raw.pop_last()
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
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
    /// map.insert(1, "a");
    /// assert_eq!(map.contains_key(&1), true);
    /// assert_eq!(map.contains_key(&2), false);
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.contains_key(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
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
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    ///
    /// If the map did have this key present, the value is updated, and the old
    /// value is returned. The key is not updated, though; this matters for
    /// types that can be `==` without being identical.
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
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        self.raw.insert(key, value).0
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
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
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }

    /// Removes a key from the map, returning the stored key and value if the key
    /// was previously in the map.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
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
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all pairs `(k, v)` for which `f(&k, &mut v)` returns `false`.
    /// The elements are visited in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map: AvlMap<i32, i32> = (0..8).map(|x| (x, x*10)).collect();
    /// // Keep only the elements with even-numbered keys.
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert!(map.into_iter().eq(vec![(0, 0), (2, 20), (4, 40), (6, 60)]));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n log n) in the worst case (when many elements are removed).
    pub fn retain<F>(&mut self, f: F)
    where
        K: Ord,
        F: FnMut(&K, &mut V) -> bool,
    {
        self.raw.retain(f);
    }

    /// Moves all elements from `other` into `self`, leaving `other` empty.
    ///
    /// If a key from `other` is already present in `self`, the respective
    /// value from `self` will be overwritten with the respective value from `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut a = AvlMap::new();
    /// a.insert(1, "a");
    /// a.insert(2, "b");
    /// a.insert(3, "c"); // Note: Key (3) also present in b.
    ///
    /// let mut b = AvlMap::new();
    /// b.insert(3, "d"); // Note: Key (3) also present in a.
    /// b.insert(4, "e");
    /// b.insert(5, "f");
    ///
    /// a.append(&mut b);
    ///
    /// assert_eq!(a.len(), 5);
    /// assert_eq!(b.len(), 0);
    ///
    /// assert_eq!(a[&1], "a");
    /// assert_eq!(a[&2], "b");
    /// assert_eq!(a[&3], "d");
    /// assert_eq!(a[&4], "e");
    /// assert_eq!(a[&5], "f");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m log(n + m)), where m is the size of `other` and n is the size of `self`.
    pub fn append(&mut self, other: &mut Self)
    where
        K: Ord,
    {
        if other.is_empty() {
            return;
        }

        // Fast path: if self is empty, just swap the raw trees (O(1))
        if self.is_empty() {
            core::mem::swap(&mut self.raw, &mut other.raw);
            return;
        }

        self.raw.append(&mut other.raw);
    }

    /// Gets the given key's corresponding entry in the map for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut count: AvlMap<&str, usize> = AvlMap::new();
    ///
    /// // count the number of occurrences of letters in the vec
    /// for x in ["a", "b", "a", "c", "a", "b"] {
    ///     *count.entry(x).or_insert(0) += 1;
    /// }
    ///
    /// assert_eq!(count["a"], 3);
    /// assert_eq!(count["b"], 2);
    /// assert_eq!(count["c"], 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V>
    where
        K: Ord,
    {
        match self.raw.search(&key) {
            Some(handle) => Entry::Occupied(OccupiedEntry { handle, tree: &mut self.raw }),
            None => Entry::Vacant(VacantEntry { key, tree: &mut self.raw }),
        }
    }

    /// Splits the collection into two at the given key. Returns everything after the given key,
    /// including the key. If the key is not present, the split will occur at the nearest
    /// greater key, or return an empty map if no such key exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut a = AvlMap::new();
    /// a.insert(1, "a");
    /// a.insert(2, "b");
    /// a.insert(3, "c");
    /// a.insert(17, "d");
    /// a.insert(41, "e");
    ///
    /// let b = a.split_off(&3);
    ///
    /// assert_eq!(a.len(), 2);
    /// assert_eq!(b.len(), 3);
    ///
    /// assert_eq!(a[&1], "a");
    /// assert_eq!(a[&2], "b");
    ///
    /// assert_eq!(b[&3], "c");
    /// assert_eq!(b[&17], "d");
    /// assert_eq!(b[&41], "e");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m log n), where m is the number of elements being split off.
    #[allow(clippy::return_self_not_must_use)]
    pub fn split_off<Q>(&mut self, key: &Q) -> Self
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        AvlMap { raw: self.raw.split_off(key) }
    }

    /// Creates a consuming iterator visiting all the keys, in sorted order.
    /// The map cannot be used after calling this.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut a = AvlMap::new();
    /// a.insert(2, "b");
    /// a.insert(1, "a");
    ///
    /// let keys: Vec<i32> = a.into_keys().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) to create the iterator (drains all elements); iteration is O(1) per element.
    pub fn into_keys(mut self) -> IntoKeys<K, V> {
        IntoKeys { inner: IntoIter { inner: self.raw.drain_to_vec().into_iter() } }
    }

    /// Creates a consuming iterator visiting all the values, in order by key.
    /// The map cannot be used after calling this.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut a = AvlMap::new();
    /// a.insert(1, "hello");
    /// a.insert(2, "goodbye");
    ///
    /// let values: Vec<&str> = a.into_values().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) to create the iterator (drains all elements); iteration is O(1) per element.
    pub fn into_values(mut self) -> IntoValues<K, V> {
        IntoValues { inner: IntoIter { inner: self.raw.drain_to_vec().into_iter() } }
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; each iteration step is O(1) amortized.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: &raw const self.raw,
            front: self.raw.first_handle(),
            back: self.raw.last_handle(),
            remaining: self.raw.len(),
            _marker: PhantomData,
        }
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut map = AvlMap::from([
    ///    ("a", 1),
    ///    ("b", 2),
    ///    ("c", 3),
    /// ]);
    ///
    /// // add 10 to the value if the key isn't "a"
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; each iteration step is O(1) amortized.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            front: self.raw.first_handle(),
            back: self.raw.last_handle(),
            remaining: self.raw.len(),
            tree: &raw mut self.raw,
            _marker: PhantomData,
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut a = AvlMap::new();
    /// a.insert(2, "b");
    /// a.insert(1, "a");
    ///
    /// let keys: Vec<_> = a.keys().cloned().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; each iteration step is O(1) amortized.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut a = AvlMap::new();
    /// a.insert(1, "hello");
    /// a.insert(2, "goodbye");
    ///
    /// let values: Vec<&str> = a.values().cloned().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; each iteration step is O(1) amortized.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut a = AvlMap::new();
    /// a.insert(1, String::from("hello"));
    /// a.insert(2, String::from("goodbye"));
    ///
    /// for value in a.values_mut() {
    ///     value.push_str("!");
    /// }
    ///
    /// let values: Vec<String> = a.values().cloned().collect();
    /// assert_eq!(values, [String::from("hello!"),
    ///                     String::from("goodbye!")]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; each iteration step is O(1) amortized.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { inner: self.iter_mut() }
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut a = AvlMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let mut a = AvlMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a");
    /// assert!(!a.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl<K: Clone, V: Clone> Clone for AvlMap<K, V> {
    fn clone(&self) -> Self {
        AvlMap { raw: self.raw.clone() }
    }
}

impl<K: Hash, V: Hash> Hash for AvlMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for AvlMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for AvlMap<K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for AvlMap<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord> Ord for AvlMap<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for AvlMap<K, V> {
    fn default() -> Self {
        AvlMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = AvlMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for AvlMap<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a AvlMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut AvlMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for AvlMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use yama_tree::AvlMap;
    ///
    /// let map = AvlMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        let entries = self.raw.drain_to_vec();
        IntoIter { inner: entries.into_iter() }
    }
}

impl<K, Q, V> Index<&Q> for AvlMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for AvlMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.front?;

        // SAFETY: When remaining > 0 and front is Some, self.tree is a valid pointer
        // obtained from a live reference in iter().
        let tree = unsafe { &*self.tree };
        let node = tree.node(handle);
        let key = &node.key;
        let value = tree.value(node.value);

        self.remaining -= 1;
        self.front = tree.successor(handle);

        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.back?;

        // SAFETY: When remaining > 0 and back is Some, self.tree is a valid pointer.
        let tree = unsafe { &*self.tree };
        let node = tree.node(handle);
        let key = &node.key;
        let value = tree.value(node.value);

        self.remaining -= 1;
        self.back = tree.predecessor(handle);

        Some((key, value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
    }
}

impl<'a, K: 'a, V: 'a> Default for Iter<'a, K, V> {
    /// Creates an empty `avl_map::Iter`.
    ///
    /// ```
    /// # use yama_tree::avl_map;
    /// let iter: avl_map::Iter<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            // SAFETY: tree is never dereferenced when remaining == 0 and front/back are None,
            // so a dangling pointer is safe here.
            tree: core::ptr::NonNull::dangling().as_ptr(),
            front: None,
            back: None,
            remaining: 0,
            _marker: PhantomData,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.front?;

        // SAFETY: We have exclusive access to the tree through the raw pointer and visit
        // each node exactly once in each direction. Keys live in the nodes arena and values
        // in the values arena (separate allocations), accessed through separate raw pointers
        // so a key reference never aliases a value reference.
        unsafe {
            let node = RawAvlMap::node_ptr(self.tree, handle);
            let key = &node.key;
            let value = RawAvlMap::value_mut_ptr(self.tree, node.value);

            self.remaining -= 1;
            self.front = RawAvlMap::successor_ptr(self.tree, handle);

            Some((key, value))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.back?;

        // SAFETY: Same as in next() - exclusive access, each node visited once per
        // direction, keys and values in separate arenas accessed independently.
        unsafe {
            let node = RawAvlMap::node_ptr(self.tree, handle);
            let key = &node.key;
            let value = RawAvlMap::value_mut_ptr(self.tree, node.value);

            self.remaining -= 1;
            self.back = RawAvlMap::predecessor_ptr(self.tree, handle);

            Some((key, value))
        }
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("remaining", &self.remaining).finish()
    }
}

impl<'a, K: 'a, V: 'a> Default for IterMut<'a, K, V> {
    /// Creates an empty `avl_map::IterMut`.
    ///
    /// ```
    /// # use yama_tree::avl_map;
    /// let iter: avl_map::IterMut<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IterMut {
            tree: core::ptr::null_mut(),
            front: None,
            back: None,
            remaining: 0,
            _marker: PhantomData,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("len", &self.inner.len()).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    /// Creates an empty `avl_map::IntoIter`.
    ///
    /// ```
    /// # use yama_tree::avl_map;
    /// let iter: avl_map::IntoIter<u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter { inner: alloc::vec::Vec::new().into_iter() }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys").field("remaining", &self.inner.remaining).finish()
    }
}

impl<K, V> Default for Keys<'_, K, V> {
    /// Creates an empty `avl_map::Keys`.
    ///
    /// ```
    /// # use yama_tree::avl_map;
    /// let iter: avl_map::Keys<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Keys { inner: Iter::default() }
    }
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys { inner: self.inner.clone() }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values { inner: self.inner.clone() }
    }
}

impl<K, V> Default for Values<'_, K, V> {
    /// Creates an empty `avl_map::Values`.
    ///
    /// ```
    /// # use yama_tree::avl_map;
    /// let iter: avl_map::Values<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Values { inner: Iter::default() }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Values").field("remaining", &self.inner.remaining).finish()
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for ValuesMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuesMut").field("remaining", &self.inner.remaining).finish()
    }
}

impl<'a, K, V> Default for ValuesMut<'a, K, V> {
    /// Creates an empty `avl_map::ValuesMut`.
    ///
    /// ```
    /// # use yama_tree::avl_map;
    /// let iter: avl_map::ValuesMut<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        ValuesMut { inner: IterMut::default() }
    }
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

impl<K: fmt::Debug, V> fmt::Debug for IntoKeys<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoKeys").field("len", &self.inner.len()).finish()
    }
}

impl<K, V> Default for IntoKeys<K, V> {
    /// Creates an empty `avl_map::IntoKeys`.
    ///
    /// ```
    /// # use yama_tree::avl_map;
    /// let iter: avl_map::IntoKeys<u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoKeys { inner: IntoIter::default() }
    }
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoValues<K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for IntoValues<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoValues").field("len", &self.inner.len()).finish()
    }
}

impl<K, V> Default for IntoValues<K, V> {
    /// Creates an empty `avl_map::IntoValues`.
    ///
    /// ```
    /// # use yama_tree::avl_map;
    /// let iter: avl_map::IntoValues<u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoValues { inner: IntoIter::default() }
    }
}
