//! FILENAME: frame/src/select.rs
//! PURPOSE: Sub-frame selection and row/column projection.
//! CONTEXT: Selection builds a new, independent frame by pulling whole rows
//! or columns out of the source and re-running a bulk constructor, so the
//! second representation is re-derived by transposition and no mutable
//! state is shared. Slices and the all-rows/all-cols accessors project into
//! plain series snapshots instead.

use std::fmt::Debug;
use std::hash::Hash;

use series::{Orientation, Series};

use crate::error::{FrameError, FrameResult};
use crate::frame::Frame;

impl<R, C, V> Frame<R, C, V>
where
    R: Hash + Eq + Clone + Debug,
    C: Hash + Eq + Clone + Debug,
    V: Clone,
{
    /// Independent snapshot of one row as a horizontal series.
    pub fn row(&self, row: &R) -> FrameResult<Series<C, V>> {
        let cells = self
            .rows
            .get(row)
            .ok_or_else(|| FrameError::RowNotFound(format!("{:?}", row)))?;
        Ok(cells
            .iter()
            .map(|(col, value)| (col.clone(), value.clone()))
            .collect::<Series<C, V>>()
            .oriented(Orientation::Horizontal))
    }

    /// Independent snapshot of one column as a vertical series.
    pub fn col(&self, col: &C) -> FrameResult<Series<R, V>> {
        let cells = self
            .cols
            .get(col)
            .ok_or_else(|| FrameError::ColumnNotFound(format!("{:?}", col)))?;
        Ok(cells
            .iter()
            .map(|(row, value)| (row.clone(), value.clone()))
            .collect::<Series<R, V>>()
            .oriented(Orientation::Vertical))
    }

    /// Every row as a snapshot series, keyed by row key. Eagerly built;
    /// writes go through [`Frame::row_view`] one key at a time.
    pub fn all_rows(&self) -> Series<R, Series<C, V>> {
        self.rows
            .iter()
            .map(|(row, cells)| {
                let series = cells
                    .iter()
                    .map(|(col, value)| (col.clone(), value.clone()))
                    .collect::<Series<C, V>>()
                    .oriented(Orientation::Horizontal);
                (row.clone(), series)
            })
            .collect::<Series<R, Series<C, V>>>()
            .oriented(Orientation::Vertical)
    }

    /// Every column as a snapshot series, keyed by column key.
    pub fn all_cols(&self) -> Series<C, Series<R, V>> {
        self.cols
            .iter()
            .map(|(col, cells)| {
                let series = cells
                    .iter()
                    .map(|(row, value)| (row.clone(), value.clone()))
                    .collect::<Series<R, V>>()
                    .oriented(Orientation::Vertical);
                (col.clone(), series)
            })
            .collect::<Series<C, Series<R, V>>>()
            .oriented(Orientation::Horizontal)
    }

    /// New frame holding only the requested rows, in request order. The
    /// result shares no state with the source. Fails on an unknown row key.
    pub fn select_rows(&self, keys: &[R]) -> FrameResult<Self> {
        let mut picked = Vec::with_capacity(keys.len());
        for key in keys {
            let cells = self
                .rows
                .get(key)
                .ok_or_else(|| FrameError::RowNotFound(format!("{:?}", key)))?;
            let cells: Vec<(C, V)> = cells
                .iter()
                .map(|(col, value)| (col.clone(), value.clone()))
                .collect();
            picked.push((key.clone(), cells));
        }
        Ok(Self::from_rows(picked))
    }

    /// New frame holding only the requested columns; mirror image of
    /// [`Frame::select_rows`].
    pub fn select_cols(&self, keys: &[C]) -> FrameResult<Self> {
        let mut picked = Vec::with_capacity(keys.len());
        for key in keys {
            let cells = self
                .cols
                .get(key)
                .ok_or_else(|| FrameError::ColumnNotFound(format!("{:?}", key)))?;
            let cells: Vec<(R, V)> = cells
                .iter()
                .map(|(row, value)| (row.clone(), value.clone()))
                .collect();
            picked.push((key.clone(), cells));
        }
        Ok(Self::from_cols(picked))
    }

    /// Part of one row, restricted to the given columns, in request order.
    pub fn row_slice(&self, row: &R, cols: &[C]) -> FrameResult<Series<C, V>> {
        let cells = self
            .rows
            .get(row)
            .ok_or_else(|| FrameError::RowNotFound(format!("{:?}", row)))?;
        let mut out = Series::new().oriented(Orientation::Horizontal);
        for col in cols {
            let value = cells
                .get(col)
                .ok_or_else(|| FrameError::ColumnNotFound(format!("{:?}", col)))?;
            out.set(col.clone(), value.clone());
        }
        Ok(out)
    }

    /// Part of one column, restricted to the given rows, in request order.
    pub fn col_slice(&self, col: &C, rows: &[R]) -> FrameResult<Series<R, V>> {
        let cells = self
            .cols
            .get(col)
            .ok_or_else(|| FrameError::ColumnNotFound(format!("{:?}", col)))?;
        let mut out = Series::new();
        for row in rows {
            let value = cells
                .get(row)
                .ok_or_else(|| FrameError::RowNotFound(format!("{:?}", row)))?;
            out.set(row.clone(), value.clone());
        }
        Ok(out)
    }
}
