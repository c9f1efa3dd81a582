//! FILENAME: series/src/lib.rs
//! PURPOSE: Library root for the keyed-sequence crate.
//! CONTEXT: Exposes the `Series` container, the `Observation` cell type, and
//! the crate error type for use by the frame crate and by clients that only
//! need one-dimensional data.

pub mod error;
pub mod series;
pub mod value;

// Re-export commonly used types at the crate root
pub use error::{SeriesError, SeriesResult};
pub use series::{FxIndexMap, Orientation, Series};
pub use value::{cast, FromObservation, InnerWidth, Observation, ObservationKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_an_observation_series() {
        let series: Series<&str, Observation> = Series::from_entries(vec![
            ("count", Observation::Int(3)),
            ("label", Observation::from("total")),
        ]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.get(&"count"), Ok(&Observation::Int(3)));
    }

    #[test]
    fn it_chains_filter_and_combine() {
        let base: Series<&str, i64> =
            Series::from_entries(vec![("a", 1), ("b", 2), ("c", 3)]);
        let weights: Series<&str, i64> =
            Series::from_entries(vec![("a", 10), ("b", 20), ("c", 30)]);

        let weighted = base
            .filter_by_value(|v| *v != 2)
            .combine(&weights, |l, r| l * r)
            .unwrap();
        assert_eq!(weighted.get(&"a"), Ok(&10));
        assert_eq!(weighted.get(&"c"), Ok(&90));
        assert!(weighted.peek(&"b").is_none());
    }
}
