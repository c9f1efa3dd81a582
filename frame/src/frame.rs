//! FILENAME: frame/src/frame.rs
//! PURPOSE: The dual-indexed table and its synchronization machinery.
//! CONTEXT: This file defines the `Frame` struct, which stores the same
//! logical table twice (grouped by row key, and grouped by column key) so
//! that row access and column access are both a single outer lookup. The
//! two maps must stay content-equal at all times; every mutation path runs
//! through one dual-write primitive, and every bulk constructor derives the
//! second map from the first with `transpose`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Debug;
use std::hash::Hash;

use series::{FxIndexMap, Observation};

/// Converts an outer-by-inner map into the equivalent inner-by-outer map.
/// This is the single synchronization primitive behind the bulk
/// constructors, sub-frame selection, and deserialization. Applying it
/// twice yields the original map.
pub fn transpose<A, B, V>(
    source: &FxIndexMap<A, FxIndexMap<B, V>>,
) -> FxIndexMap<B, FxIndexMap<A, V>>
where
    A: Hash + Eq + Clone,
    B: Hash + Eq + Clone,
    V: Clone,
{
    let mut target: FxIndexMap<B, FxIndexMap<A, V>> = FxIndexMap::default();
    for (outer, inner) in source {
        for (inner_key, value) in inner {
            target
                .entry(inner_key.clone())
                .or_default()
                .insert(outer.clone(), value.clone());
        }
    }
    target
}

/// A two-key-dimensional store with symmetric row-major and column-major
/// access.
///
/// Invariant: for every (row, col) present in either map,
/// `rows[row][col] == cols[col][row]`, and the outer key sets of the two
/// maps describe the same set of recorded cells. Rows and columns are never
/// removed; a smaller table is obtained by selection, which copies.
#[derive(Debug, Clone)]
pub struct Frame<R, C, V = Observation> {
    /// Row-major storage: row key to (column key to cell).
    pub(crate) rows: FxIndexMap<R, FxIndexMap<C, V>>,

    /// Column-major storage: column key to (row key to cell).
    pub(crate) cols: FxIndexMap<C, FxIndexMap<R, V>>,
}

impl<R, C, V> Frame<R, C, V>
where
    R: Hash + Eq + Clone + Debug,
    C: Hash + Eq + Clone + Debug,
    V: Clone,
{
    /// Creates a new, empty frame.
    pub fn new() -> Self {
        Frame {
            rows: FxIndexMap::default(),
            cols: FxIndexMap::default(),
        }
    }

    /// Builds a frame row-first: the row-major map is copied from the
    /// input, the column-major map is derived by transposition. Duplicate
    /// (row, col) pairs keep the last value; rows without cells are dropped.
    pub fn from_rows<I, J>(rows: I) -> Self
    where
        I: IntoIterator<Item = (R, J)>,
        J: IntoIterator<Item = (C, V)>,
    {
        let mut row_major: FxIndexMap<R, FxIndexMap<C, V>> = FxIndexMap::default();
        for (row, cells) in rows {
            let inner = row_major.entry(row).or_default();
            for (col, value) in cells {
                inner.insert(col, value);
            }
        }
        Self::from_row_map(row_major)
    }

    /// Builds a frame column-first; mirror image of [`Frame::from_rows`].
    pub fn from_cols<I, J>(cols: I) -> Self
    where
        I: IntoIterator<Item = (C, J)>,
        J: IntoIterator<Item = (R, V)>,
    {
        let mut col_major: FxIndexMap<C, FxIndexMap<R, V>> = FxIndexMap::default();
        for (col, cells) in cols {
            let inner = col_major.entry(col).or_default();
            for (row, value) in cells {
                inner.insert(row, value);
            }
        }
        Self::from_col_map(col_major)
    }

    /// Builds a frame from (row, col, value) records. Later records with a
    /// duplicate (row, col) overwrite earlier ones.
    pub fn from_triples<I>(triples: I) -> Self
    where
        I: IntoIterator<Item = (R, C, V)>,
    {
        let mut row_major: FxIndexMap<R, FxIndexMap<C, V>> = FxIndexMap::default();
        for (row, col, value) in triples {
            row_major.entry(row).or_default().insert(col, value);
        }
        Self::from_row_map(row_major)
    }

    pub(crate) fn from_row_map(mut rows: FxIndexMap<R, FxIndexMap<C, V>>) -> Self {
        rows.retain(|_, cells| !cells.is_empty());
        let cols = transpose(&rows);
        Frame { rows, cols }
    }

    pub(crate) fn from_col_map(mut cols: FxIndexMap<C, FxIndexMap<R, V>>) -> Self {
        cols.retain(|_, cells| !cells.is_empty());
        let rows = transpose(&cols);
        Frame { rows, cols }
    }

    /// (row count, column count).
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.cols.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row keys in insertion order.
    pub fn row_keys(&self) -> indexmap::map::Keys<'_, R, FxIndexMap<C, V>> {
        self.rows.keys()
    }

    /// Column keys in insertion order.
    pub fn col_keys(&self) -> indexmap::map::Keys<'_, C, FxIndexMap<R, V>> {
        self.cols.keys()
    }

    pub fn contains_row(&self, row: &R) -> bool {
        self.rows.contains_key(row)
    }

    pub fn contains_col(&self, col: &C) -> bool {
        self.cols.contains_key(col)
    }

    /// Non-mutating probe. Unlike [`Frame::get`], never materializes
    /// anything; a missing cell is `None`.
    pub fn peek(&self, row: &R, col: &C) -> Option<&V> {
        self.rows.get(row).and_then(|cells| cells.get(col))
    }

    /// Records a value at (row, col), creating the row and column on first
    /// contact. Both representations are updated before control returns.
    pub fn set(&mut self, row: R, col: C, value: V) {
        self.write_cell(row, col, value);
    }

    /// The one dual-write primitive. Every mutation of cell content, from
    /// whichever direction, lands here.
    pub(crate) fn write_cell(&mut self, row: R, col: C, value: V) {
        self.rows
            .entry(row.clone())
            .or_default()
            .insert(col.clone(), value.clone());
        self.cols.entry(col).or_default().insert(row, value);
    }
}

impl<R, C, V> Frame<R, C, V>
where
    R: Hash + Eq + Clone + Debug,
    C: Hash + Eq + Clone + Debug,
    V: Clone + Default,
{
    /// Get-or-create for the crossing cell: if (row, col) has no recorded
    /// value yet, a default placeholder is written through the dual-write
    /// primitive first. Reads therefore have the documented side effect of
    /// materializing empty rows and columns.
    pub(crate) fn ensure_cell(&mut self, row: &R, col: &C) {
        let present = self
            .rows
            .get(row)
            .map_or(false, |cells| cells.contains_key(col));
        if !present {
            self.write_cell(row.clone(), col.clone(), V::default());
        }
    }

    /// Cell read from the row-major side, materializing the cell if absent.
    pub fn get(&mut self, row: R, col: C) -> &V {
        self.ensure_cell(&row, &col);
        &self.rows[&row][&col]
    }

    /// The same logical read expressed from the column-major side. Equal to
    /// [`Frame::get`] with the keys swapped, for every reachable state.
    pub fn get_by_col(&mut self, col: C, row: R) -> &V {
        self.ensure_cell(&row, &col);
        &self.cols[&col][&row]
    }
}

impl<R, C, V> Default for Frame<R, C, V>
where
    R: Hash + Eq + Clone + Debug,
    C: Hash + Eq + Clone + Debug,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Equality over logical content. The column-major map is derived data, so
/// comparing the row-major maps is sufficient.
impl<R, C, V> PartialEq for Frame<R, C, V>
where
    R: Hash + Eq,
    C: Hash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

/// Only the row-major map is emitted; the dual representation is an
/// internal affair.
impl<R, C, V> Serialize for Frame<R, C, V>
where
    R: Serialize + Hash + Eq,
    C: Serialize + Hash + Eq,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows.serialize(serializer)
    }
}

/// Reads a row-major map and rebuilds the column-major map through
/// `transpose`, so no serialized input can produce an inconsistent frame.
impl<'de, R, C, V> Deserialize<'de> for Frame<R, C, V>
where
    R: Deserialize<'de> + Hash + Eq + Clone + Debug,
    C: Deserialize<'de> + Hash + Eq + Clone + Debug,
    V: Deserialize<'de> + Clone,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows: FxIndexMap<R, FxIndexMap<C, V>> = Deserialize::deserialize(deserializer)?;
        Ok(Frame::from_row_map(rows))
    }
}
