//! FILENAME: frame/src/view.rs
//! PURPOSE: Live row and column views with write-back.
//! CONTEXT: A view is not a copy: it is a borrowed handle holding the
//! parent frame and the key it is bound to. Every write through a view is
//! routed back through the parent's dual-write setter, so the other
//! representation can never fall out of sync. The borrow ties the view's
//! lifetime to the parent and rules out concurrent direct mutation.

use std::fmt::Debug;
use std::hash::Hash;

use series::{Orientation, Series};

use crate::error::FrameResult;
use crate::frame::Frame;

/// A live view over one row of a frame.
pub struct RowView<'f, R, C, V> {
    frame: &'f mut Frame<R, C, V>,
    row: R,
}

/// A live view over one column of a frame.
pub struct ColView<'f, R, C, V> {
    frame: &'f mut Frame<R, C, V>,
    col: C,
}

impl<R, C, V> Frame<R, C, V>
where
    R: Hash + Eq + Clone + Debug,
    C: Hash + Eq + Clone + Debug,
    V: Clone,
{
    /// Live view over one row. The row need not exist yet; it is created on
    /// the first write (or materializing read) through the view.
    pub fn row_view(&mut self, row: R) -> RowView<'_, R, C, V> {
        RowView { frame: self, row }
    }

    /// Live view over one column; mirror image of [`Frame::row_view`].
    pub fn col_view(&mut self, col: C) -> ColView<'_, R, C, V> {
        ColView { frame: self, col }
    }
}

impl<'f, R, C, V> RowView<'f, R, C, V>
where
    R: Hash + Eq + Clone + Debug,
    C: Hash + Eq + Clone + Debug,
    V: Clone,
{
    /// The row key this view is bound to.
    pub fn key(&self) -> &R {
        &self.row
    }

    /// Number of cells recorded in this row so far.
    pub fn len(&self) -> usize {
        self.frame.rows.get(&self.row).map_or(0, |cells| cells.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column keys recorded in this row, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &C> {
        self.frame.rows.get(&self.row).into_iter().flat_map(|cells| cells.keys())
    }

    /// Non-mutating probe of one cell.
    pub fn peek(&self, col: &C) -> Option<&V> {
        self.frame.peek(&self.row, col)
    }

    /// Writes through to the parent frame's cell setter; both internal
    /// representations see the value before this returns.
    pub fn set(&mut self, col: C, value: V) {
        self.frame.set(self.row.clone(), col, value);
    }

    /// Copies the requested columns out of `source` into this row.
    /// All-or-nothing, like the series operation it mirrors.
    pub fn set_many(&mut self, cols: &[C], source: &Series<C, V>) -> FrameResult<()> {
        let mut staged = Vec::with_capacity(cols.len());
        for col in cols {
            staged.push((col.clone(), source.get(col)?.clone()));
        }
        for (col, value) in staged {
            self.frame.set(self.row.clone(), col, value);
        }
        Ok(())
    }

    /// Independent snapshot of the row as a horizontal series.
    pub fn to_series(&self) -> Series<C, V> {
        let cells = self.frame.rows.get(&self.row);
        cells
            .into_iter()
            .flat_map(|cells| cells.iter())
            .map(|(col, value)| (col.clone(), value.clone()))
            .collect::<Series<C, V>>()
            .oriented(Orientation::Horizontal)
    }
}

impl<'f, R, C, V> RowView<'f, R, C, V>
where
    R: Hash + Eq + Clone + Debug,
    C: Hash + Eq + Clone + Debug,
    V: Clone + Default,
{
    /// Materializing read through the parent frame.
    pub fn get(&mut self, col: C) -> &V {
        self.frame.get(self.row.clone(), col)
    }
}

impl<'f, R, C, V> ColView<'f, R, C, V>
where
    R: Hash + Eq + Clone + Debug,
    C: Hash + Eq + Clone + Debug,
    V: Clone,
{
    /// The column key this view is bound to.
    pub fn key(&self) -> &C {
        &self.col
    }

    /// Number of cells recorded in this column so far.
    pub fn len(&self) -> usize {
        self.frame.cols.get(&self.col).map_or(0, |cells| cells.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row keys recorded in this column, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &R> {
        self.frame.cols.get(&self.col).into_iter().flat_map(|cells| cells.keys())
    }

    /// Non-mutating probe of one cell.
    pub fn peek(&self, row: &R) -> Option<&V> {
        self.frame.cols.get(&self.col).and_then(|cells| cells.get(row))
    }

    /// Writes through to the parent frame's cell setter.
    pub fn set(&mut self, row: R, value: V) {
        self.frame.set(row, self.col.clone(), value);
    }

    /// Copies the requested rows out of `source` into this column.
    /// All-or-nothing.
    pub fn set_many(&mut self, rows: &[R], source: &Series<R, V>) -> FrameResult<()> {
        let mut staged = Vec::with_capacity(rows.len());
        for row in rows {
            staged.push((row.clone(), source.get(row)?.clone()));
        }
        for (row, value) in staged {
            self.frame.set(row, self.col.clone(), value);
        }
        Ok(())
    }

    /// Independent snapshot of the column as a vertical series.
    pub fn to_series(&self) -> Series<R, V> {
        let cells = self.frame.cols.get(&self.col);
        cells
            .into_iter()
            .flat_map(|cells| cells.iter())
            .map(|(row, value)| (row.clone(), value.clone()))
            .collect::<Series<R, V>>()
            .oriented(Orientation::Vertical)
    }
}

impl<'f, R, C, V> ColView<'f, R, C, V>
where
    R: Hash + Eq + Clone + Debug,
    C: Hash + Eq + Clone + Debug,
    V: Clone + Default,
{
    /// Materializing read through the parent frame.
    pub fn get(&mut self, row: R) -> &V {
        self.frame.get_by_col(self.col.clone(), row)
    }
}
