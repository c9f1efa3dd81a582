//! FILENAME: frame/src/lib.rs
//! PURPOSE: Library root for the dual-indexed table crate.
//! CONTEXT: Re-exports the frame, its views, and the series types it builds
//! on, so clients depend on this crate alone for two-dimensional work.

pub mod error;
pub mod frame;
pub mod render;
pub mod search;
pub mod select;
pub mod view;

// Re-export commonly used types at the crate root
pub use error::{FrameError, FrameResult};
pub use frame::{transpose, Frame};
pub use view::{ColView, RowView};

// Series types travel with the frame API
pub use series::{
    cast, FromObservation, FxIndexMap, InnerWidth, Observation, ObservationKind, Orientation,
    Series, SeriesError,
};
