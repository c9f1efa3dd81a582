//! FILENAME: frame/src/search.rs
//! PURPOSE: Linear search over frame cells.
//! CONTEXT: The scan walks the row-major map in its iteration order, rows
//! outer and columns inner, and stops at the first match. There is no index
//! by value; worst case is the full cell count.

use std::fmt::Debug;
use std::hash::Hash;

use series::{cast, FromObservation, Observation};

use crate::error::{FrameError, FrameResult};
use crate::frame::Frame;

impl<R, C, V> Frame<R, C, V>
where
    R: Hash + Eq + Clone + Debug,
    C: Hash + Eq + Clone + Debug,
    V: Clone,
{
    /// First (row, col) whose cell satisfies the predicate, scanning rows
    /// outer / columns inner in insertion order.
    pub fn find<P>(&self, predicate: P) -> FrameResult<(R, C)>
    where
        P: Fn(&V) -> bool,
    {
        self.try_find(predicate).ok_or(FrameError::NoMatch)
    }

    /// Same scan as [`Frame::find`], but absence is not an error.
    pub fn try_find<P>(&self, predicate: P) -> Option<(R, C)>
    where
        P: Fn(&V) -> bool,
    {
        for (row, cells) in &self.rows {
            for (col, value) in cells {
                if predicate(value) {
                    return Some((row.clone(), col.clone()));
                }
            }
        }
        None
    }

    /// Equality form of [`Frame::find`].
    pub fn find_value(&self, target: &V) -> FrameResult<(R, C)>
    where
        V: PartialEq,
    {
        self.find(|value| value == target)
    }
}

impl<R, C> Frame<R, C, Observation>
where
    R: Hash + Eq + Clone + Debug,
    C: Hash + Eq + Clone + Debug,
{
    /// Typed scan: each cell is cast to `T` before the predicate runs.
    /// Null cells are skipped (a placeholder carries no observation); a
    /// non-null cell that cannot convert aborts the scan with a conversion
    /// error rather than being silently excluded.
    pub fn find_as<T, P>(&self, predicate: P) -> FrameResult<(R, C)>
    where
        T: FromObservation,
        P: Fn(&T) -> bool,
    {
        self.try_find_as(predicate)?.ok_or(FrameError::NoMatch)
    }

    /// Same typed scan; absence is `Ok(None)`, but a conversion failure is
    /// still an error.
    pub fn try_find_as<T, P>(&self, predicate: P) -> FrameResult<Option<(R, C)>>
    where
        T: FromObservation,
        P: Fn(&T) -> bool,
    {
        for (row, cells) in &self.rows {
            for (col, value) in cells {
                if value.is_null() {
                    continue;
                }
                let typed = cast::<T>(value)?;
                if predicate(&typed) {
                    return Ok(Some((row.clone(), col.clone())));
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Frame<&'static str, &'static str, i64> {
        Frame::from_rows(vec![
            ("rA", vec![("c1", 10), ("c2", 20)]),
            ("rB", vec![("c1", 30), ("c2", 20)]),
        ])
    }

    #[test]
    fn test_find_scan_order_is_row_outer() {
        let frame = sample();
        // Matches both (rA, c1) and (rB, c2); the row-major scan must
        // report the first in row-outer, column-inner order
        let hit = frame.find(|v| *v == 10 || *v == 20).unwrap();
        assert_eq!(hit, ("rA", "c1"));

        let hit = frame.find(|v| *v == 20).unwrap();
        assert_eq!(hit, ("rA", "c2"));
    }

    #[test]
    fn test_find_no_match() {
        let frame = sample();
        assert_eq!(frame.find(|v| *v > 99), Err(FrameError::NoMatch));
        assert_eq!(frame.try_find(|v| *v > 99), None);
        assert_eq!(frame.try_find(|v| *v == 30), Some(("rB", "c1")));
    }

    #[test]
    fn test_find_value() {
        let frame = sample();
        assert_eq!(frame.find_value(&30), Ok(("rB", "c1")));
        assert_eq!(frame.find_value(&31), Err(FrameError::NoMatch));
    }

    #[test]
    fn test_find_as_casts_cells() {
        let frame: Frame<&str, &str> = Frame::from_triples(vec![
            ("rA", "c1", Observation::Int(1)),
            ("rA", "c2", Observation::Int(7)),
        ]);
        let hit = frame.find_as::<i64, _>(|v| *v > 5).unwrap();
        assert_eq!(hit, ("rA", "c2"));

        // Int cells widen when scanned as floats
        let hit = frame.find_as::<f64, _>(|v| *v > 5.0).unwrap();
        assert_eq!(hit, ("rA", "c2"));
    }

    #[test]
    fn test_find_as_skips_nulls() {
        let frame: Frame<&str, &str> = Frame::from_triples(vec![
            ("rA", "c1", Observation::Null),
            ("rA", "c2", Observation::Int(7)),
        ]);
        let hit = frame.find_as::<i64, _>(|v| *v > 0).unwrap();
        assert_eq!(hit, ("rA", "c2"));
    }

    #[test]
    fn test_find_as_fails_loudly_on_kind_mismatch() {
        let frame: Frame<&str, &str> = Frame::from_triples(vec![
            ("rA", "c1", Observation::from("text")),
            ("rA", "c2", Observation::Int(7)),
        ]);
        assert!(matches!(
            frame.find_as::<i64, _>(|v| *v > 0),
            Err(FrameError::Series(_))
        ));
        assert!(frame.try_find_as::<i64, _>(|v| *v > 0).is_err());
    }
}
