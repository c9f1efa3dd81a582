//! FILENAME: series/src/series.rs
//! PURPOSE: The one-dimensional keyed sequence.
//! CONTEXT: This file defines the `Series` struct, a mapping from unique keys
//! to values backed by an insertion-ordered map. It is used standalone and as
//! the return type of every row/column projection of a frame. Iteration order
//! is insertion order and stays stable for the lifetime of an instance (there
//! is no removal operation; filtering builds a new series).

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{SeriesError, SeriesResult};
use crate::value::{cast, FromObservation, InnerWidth, Observation};

/// Insertion-ordered map with the Fx hasher. The iteration-order guarantees
/// of the container contracts (scan order, textual dumps) come from this.
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Layout tag for a series. Purely descriptive: it changes how `shape` is
/// reported and how the series renders, never how entries are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A keyed sequence of values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize + Eq + Hash, V: Serialize",
    deserialize = "K: Deserialize<'de> + Eq + Hash, V: Deserialize<'de>"
))]
pub struct Series<K, V> {
    entries: FxIndexMap<K, V>,
    orientation: Orientation,
}

impl<K, V> Series<K, V>
where
    K: Hash + Eq,
{
    /// Creates an empty series. Standalone series are vertical; projections
    /// of a frame pick their own orientation.
    pub fn new() -> Self {
        Series {
            entries: FxIndexMap::default(),
            orientation: Orientation::Vertical,
        }
    }

    /// Creates a series from an existing key/value collection, keeping the
    /// collection's order. Duplicate keys keep the last value.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Series {
            entries: entries.into_iter().collect(),
            orientation: Orientation::Vertical,
        }
    }

    /// Re-tags the orientation, builder style.
    pub fn oriented(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, K, V> {
        self.entries.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, K, V> {
        self.entries.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.entries.iter()
    }

    /// Non-failing probe; returns `None` on a missing key.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Direct lookup; a missing key is an error.
    pub fn get(&self, key: &K) -> SeriesResult<&V>
    where
        K: Debug,
    {
        self.entries
            .get(key)
            .ok_or_else(|| SeriesError::KeyNotFound(format!("{:?}", key)))
    }

    /// Inserts or overwrites.
    pub fn set(&mut self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    /// Sub-sequence for the requested keys, in request order. Fails if any
    /// key is absent.
    pub fn get_many(&self, keys: &[K]) -> SeriesResult<Series<K, V>>
    where
        K: Clone + Debug,
        V: Clone,
    {
        let mut entries = FxIndexMap::default();
        for key in keys {
            entries.insert(key.clone(), self.get(key)?.clone());
        }
        Ok(Series {
            entries,
            orientation: self.orientation,
        })
    }

    /// Copies the requested keys out of `source` into this series.
    /// All-or-nothing: every key is looked up before anything is written, so
    /// a missing key leaves this series untouched.
    pub fn set_many(&mut self, keys: &[K], source: &Series<K, V>) -> SeriesResult<()>
    where
        K: Clone + Debug,
        V: Clone,
    {
        let mut staged = Vec::with_capacity(keys.len());
        for key in keys {
            staged.push((key.clone(), source.get(key)?.clone()));
        }
        for (key, value) in staged {
            self.entries.insert(key, value);
        }
        Ok(())
    }

    /// New series with the entries whose key satisfies the predicate.
    pub fn filter_by_key<P>(&self, predicate: P) -> Series<K, V>
    where
        P: Fn(&K) -> bool,
        K: Clone,
        V: Clone,
    {
        self.filter_by_entry(|key, _| predicate(key))
    }

    /// New series with the entries whose value satisfies the predicate.
    pub fn filter_by_value<P>(&self, predicate: P) -> Series<K, V>
    where
        P: Fn(&V) -> bool,
        K: Clone,
        V: Clone,
    {
        self.filter_by_entry(|_, value| predicate(value))
    }

    /// New series with the entries satisfying the predicate. The source is
    /// never mutated; key/value pairing and order are preserved.
    pub fn filter_by_entry<P>(&self, predicate: P) -> Series<K, V>
    where
        P: Fn(&K, &V) -> bool,
        K: Clone,
        V: Clone,
    {
        let entries = self
            .entries
            .iter()
            .filter(|&(key, value)| predicate(key, value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Series {
            entries,
            orientation: self.orientation,
        }
    }

    /// Re-keys by implicit conversion.
    pub fn reindex_into<N>(&self) -> Series<N, V>
    where
        N: Hash + Eq + From<K>,
        K: Clone,
        V: Clone,
    {
        self.reindex_with(|key| N::from(key.clone()))
    }

    /// Re-keys through an explicit mapping function.
    pub fn reindex_with<N, F>(&self, mapping: F) -> Series<N, V>
    where
        N: Hash + Eq,
        F: Fn(&K) -> N,
        V: Clone,
    {
        let entries = self
            .entries
            .iter()
            .map(|(key, value)| (mapping(key), value.clone()))
            .collect();
        Series {
            entries,
            orientation: self.orientation,
        }
    }

    /// Re-keys by zipping against a supplied key collection, matching new
    /// keys to old keys by equality. The collection must have exactly one
    /// entry per element of the series, and every old key must have an equal
    /// counterpart in it.
    pub fn reindex_matching<N>(&self, new_keys: &[N]) -> SeriesResult<Series<N, V>>
    where
        N: Hash + Eq + Clone + PartialEq<K>,
        K: Debug,
        V: Clone,
    {
        if new_keys.len() != self.len() {
            return Err(SeriesError::LengthMismatch {
                expected: self.len(),
                actual: new_keys.len(),
            });
        }
        let mut entries = FxIndexMap::default();
        for (old, value) in &self.entries {
            let matched = new_keys
                .iter()
                .find(|candidate| **candidate == *old)
                .ok_or_else(|| SeriesError::KeyNotFound(format!("{:?}", old)))?;
            entries.insert(matched.clone(), value.clone());
        }
        Ok(Series {
            entries,
            orientation: self.orientation,
        })
    }

    /// Element-wise combination with another sequence over this sequence's
    /// key set. Fails if `other` lacks any of this sequence's keys; the
    /// result's key set equals this sequence's, not the union.
    pub fn combine<U, W, F>(&self, other: &Series<K, U>, op: F) -> SeriesResult<Series<K, W>>
    where
        F: Fn(&V, &U) -> W,
        K: Clone + Debug,
    {
        let mut entries = FxIndexMap::default();
        for (key, value) in &self.entries {
            let rhs = other.get(key)?;
            entries.insert(key.clone(), op(value, rhs));
        }
        Ok(Series {
            entries,
            orientation: self.orientation,
        })
    }

    /// Element-wise conversion through an explicit selector.
    pub fn map_values<W, F>(&self, selector: F) -> Series<K, W>
    where
        F: Fn(&V) -> W,
        K: Clone,
    {
        let entries = self
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), selector(value)))
            .collect();
        Series {
            entries,
            orientation: self.orientation,
        }
    }

    /// Lazy sequence of the keys whose value satisfies the predicate.
    /// Recomputed on every call; nothing is cached.
    pub fn keys_where<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a K> + 'a
    where
        P: Fn(&V) -> bool + 'a,
    {
        self.entries
            .iter()
            .filter(move |&(_, value)| predicate(value))
            .map(|(key, _)| key)
    }

    /// Reported display shape. `inner width` is the widest collection-valued
    /// entry (1 for scalars and for an empty series).
    pub fn shape(&self) -> (usize, usize)
    where
        V: InnerWidth,
    {
        let width = self
            .entries
            .values()
            .map(InnerWidth::inner_width)
            .max()
            .unwrap_or(1)
            .max(1);
        match self.orientation {
            Orientation::Horizontal => (width, self.len()),
            Orientation::Vertical => (self.len(), width),
        }
    }
}

impl<K> Series<K, Observation>
where
    K: Hash + Eq + Clone,
{
    /// Element-wise conversion through the default observation casts. The
    /// first inconvertible value fails the whole operation.
    pub fn cast<W: FromObservation>(&self) -> SeriesResult<Series<K, W>> {
        let mut entries = FxIndexMap::default();
        for (key, value) in &self.entries {
            entries.insert(key.clone(), cast::<W>(value)?);
        }
        Ok(Series {
            entries,
            orientation: self.orientation,
        })
    }
}

impl<K: Hash + Eq, V> Default for Series<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for Series<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.orientation == other.orientation && self.entries == other.entries
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for Series<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Series::from_entries(iter)
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for Series<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<K: Hash + Eq, V> IntoIterator for Series<K, V> {
    type Item = (K, V);
    type IntoIter = indexmap::map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K: Hash + Eq, V> IntoIterator for &'a Series<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = indexmap::map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A nested series reports its cardinality as its width.
impl<K, V> InnerWidth for Series<K, V> {
    fn inner_width(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> fmt::Display for Series<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    /// Vertical: one `key value` line per entry. Horizontal: a key header
    /// line over a value line, each column padded to its widest text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.entries.keys().map(|k| k.to_string()).collect();
        let values: Vec<String> = self.entries.values().map(|v| v.to_string()).collect();
        match self.orientation {
            Orientation::Vertical => {
                let key_width = keys.iter().map(|k| k.len()).max().unwrap_or(0);
                for (key, value) in keys.iter().zip(values.iter()) {
                    writeln!(f, "{:<width$} {}", key, value, width = key_width)?;
                }
                Ok(())
            }
            Orientation::Horizontal => {
                let widths: Vec<usize> = keys
                    .iter()
                    .zip(values.iter())
                    .map(|(k, v)| k.len().max(v.len()))
                    .collect();
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{:<width$}", key, width = widths[i])?;
                }
                writeln!(f)?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{:<width$}", value, width = widths[i])?;
                }
                writeln!(f)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Series<String, i64> {
        Series::from_entries(vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 3),
        ])
    }

    #[test]
    fn test_get_set_peek() {
        let mut series = sample();
        assert_eq!(series.get(&"b".to_string()), Ok(&2));
        assert_eq!(series.peek(&"z".to_string()), None);
        assert!(matches!(
            series.get(&"z".to_string()),
            Err(SeriesError::KeyNotFound(_))
        ));

        series.set("b".to_string(), 20);
        series.set("d".to_string(), 4);
        assert_eq!(series.get(&"b".to_string()), Ok(&20));
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let series = sample();
        let keys: Vec<&String> = series.keys().collect();
        assert_eq!(keys, ["a", "b", "c"]);

        // Overwriting does not move a key
        let mut series = sample();
        series.set("a".to_string(), 10);
        let keys: Vec<&String> = series.keys().collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn test_get_many() {
        let series = sample();
        let picked = series
            .get_many(&["c".to_string(), "a".to_string()])
            .unwrap();
        assert_eq!(picked.len(), 2);
        let keys: Vec<&String> = picked.keys().collect();
        assert_eq!(keys, ["c", "a"]);

        assert!(series
            .get_many(&["a".to_string(), "z".to_string()])
            .is_err());
    }

    #[test]
    fn test_set_many_is_all_or_nothing() {
        let mut target = sample();
        let source = Series::from_entries(vec![("a".to_string(), 100)]);

        // "b" is missing from the source, so nothing may change
        let err = target.set_many(&["a".to_string(), "b".to_string()], &source);
        assert!(err.is_err());
        assert_eq!(target.get(&"a".to_string()), Ok(&1));

        target.set_many(&["a".to_string()], &source).unwrap();
        assert_eq!(target.get(&"a".to_string()), Ok(&100));
    }

    #[test]
    fn test_filters_do_not_mutate_source() {
        let series = sample();
        let odd = series.filter_by_value(|v| v % 2 == 1);
        let keys: Vec<&String> = odd.keys().collect();
        assert_eq!(keys, ["a", "c"]);
        assert_eq!(series.len(), 3);

        let only_b = series.filter_by_key(|k| k == "b");
        assert_eq!(only_b.len(), 1);

        let both = series.filter_by_entry(|k, v| k == "a" || *v == 3);
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn test_reindex_with() {
        let series = sample();
        let upper = series.reindex_with(|k| k.to_uppercase());
        assert_eq!(upper.get(&"A".to_string()), Ok(&1));
        assert_eq!(upper.len(), 3);
    }

    #[test]
    fn test_reindex_into() {
        let series: Series<u8, i64> = Series::from_entries(vec![(1u8, 10), (2u8, 20)]);
        let wide: Series<u32, i64> = series.reindex_into();
        assert_eq!(wide.get(&1u32), Ok(&10));
        assert_eq!(wide.get(&2u32), Ok(&20));
    }

    #[test]
    fn test_reindex_matching() {
        // New keys carry extra data but compare equal to the old ones
        #[derive(Debug, Clone, Hash, PartialEq, Eq)]
        struct Tagged(String, u32);
        impl PartialEq<String> for Tagged {
            fn eq(&self, other: &String) -> bool {
                self.0 == *other
            }
        }

        let series = sample();
        let tags = vec![
            Tagged("b".to_string(), 1),
            Tagged("a".to_string(), 0),
            Tagged("c".to_string(), 2),
        ];
        let retagged = series.reindex_matching(&tags).unwrap();
        assert_eq!(retagged.get(&Tagged("a".to_string(), 0)), Ok(&1));
        assert_eq!(retagged.get(&Tagged("c".to_string(), 2)), Ok(&3));
        // Old order is preserved, not the order of the supplied keys
        let keys: Vec<&Tagged> = retagged.keys().collect();
        assert_eq!(keys[0].0, "a");

        // Wrong cardinality
        let short = vec![Tagged("a".to_string(), 0)];
        assert_eq!(
            series.reindex_matching(&short),
            Err(SeriesError::LengthMismatch {
                expected: 3,
                actual: 1
            })
        );

        // Right cardinality, no counterpart for "c"
        let mismatched = vec![
            Tagged("a".to_string(), 0),
            Tagged("b".to_string(), 1),
            Tagged("x".to_string(), 9),
        ];
        assert!(matches!(
            series.reindex_matching(&mismatched),
            Err(SeriesError::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_combine_requires_superset() {
        let lhs = sample();
        let rhs = Series::from_entries(vec![
            ("a".to_string(), 10),
            ("b".to_string(), 20),
            ("c".to_string(), 30),
            ("d".to_string(), 40),
        ]);
        let sum = lhs.combine(&rhs, |l, r| l + r).unwrap();
        // Result keys equal lhs's keys, not the union
        assert_eq!(sum.len(), 3);
        assert_eq!(sum.get(&"a".to_string()), Ok(&11));
        assert_eq!(sum.get(&"c".to_string()), Ok(&33));

        let incomplete = Series::from_entries(vec![("a".to_string(), 1)]);
        assert!(matches!(
            lhs.combine(&incomplete, |l, r| l + r),
            Err(SeriesError::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_map_values() {
        let series = sample();
        let doubled = series.map_values(|v| v * 2);
        assert_eq!(doubled.get(&"b".to_string()), Ok(&4));

        let text = series.map_values(|v| v.to_string());
        assert_eq!(text.get(&"c".to_string()), Ok(&"3".to_string()));
    }

    #[test]
    fn test_cast() {
        let series: Series<&str, Observation> = Series::from_entries(vec![
            ("a", Observation::Int(1)),
            ("b", Observation::Int(2)),
        ]);
        let ints = series.cast::<i64>().unwrap();
        assert_eq!(ints.get(&"b"), Ok(&2));
        let floats = series.cast::<f64>().unwrap();
        assert_eq!(floats.get(&"a"), Ok(&1.0));

        let mixed: Series<&str, Observation> = Series::from_entries(vec![
            ("a", Observation::Int(1)),
            ("b", Observation::from("two")),
        ]);
        assert!(matches!(
            mixed.cast::<i64>(),
            Err(SeriesError::TypeConversion { .. })
        ));
    }

    #[test]
    fn test_keys_where_is_recomputed() {
        let mut series = sample();
        let first: Vec<String> = series.keys_where(|v| *v > 1).cloned().collect();
        assert_eq!(first, ["b", "c"]);

        // Restartable: a fresh call sees the mutated state
        series.set("a".to_string(), 99);
        let second: Vec<String> = series.keys_where(|v| *v > 1).cloned().collect();
        assert_eq!(second, ["a", "b", "c"]);
    }

    #[test]
    fn test_shape_follows_orientation() {
        let vertical = sample();
        assert_eq!(vertical.shape(), (3, 1));

        let horizontal = sample().oriented(Orientation::Horizontal);
        assert_eq!(horizontal.shape(), (1, 3));

        let empty: Series<String, i64> = Series::new();
        assert_eq!(empty.shape(), (0, 1));
    }

    #[test]
    fn test_shape_reports_nested_width() {
        let nested: Series<&str, Series<&str, i64>> = Series::from_entries(vec![
            ("r1", Series::from_entries(vec![("c1", 1), ("c2", 2)])),
            ("r2", Series::from_entries(vec![("c1", 3)])),
        ]);
        assert_eq!(nested.shape(), (2, 2));
    }

    #[test]
    fn test_display_vertical() {
        let series = sample();
        assert_eq!(series.to_string(), "a 1\nb 2\nc 3\n");
    }

    #[test]
    fn test_display_horizontal() {
        let series = Series::from_entries(vec![("alpha", 1), ("b", 22)])
            .oriented(Orientation::Horizontal);
        assert_eq!(series.to_string(), "alpha b \n1     22\n");
    }

    #[test]
    fn test_serde_roundtrip_keeps_order() {
        let series = sample();
        let json = serde_json::to_string(&series).unwrap();
        let back: Series<String, i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, series);
        let keys: Vec<&String> = back.keys().collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }
}
