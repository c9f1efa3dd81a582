//! FILENAME: series/src/value.rs
//! PURPOSE: Defines the observation type stored in sequence and table cells.
//! CONTEXT: This file contains the `Observation` enum, a closed sum type over
//! the scalar kinds a cell may hold, together with the conversion machinery
//! (constructors from native types, fallible casts back out) and the
//! `InnerWidth` trait used by shape reporting.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SeriesError;

/// A single cell value. `Null` doubles as the placeholder written when a
/// cell is materialized before any real value is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Observation {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

/// Enumerates the underlying kind stored in an [`Observation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObservationKind {
    Null,
    Int,
    Float,
    Text,
    Bool,
}

impl Observation {
    /// Returns the [`ObservationKind`] describing the contained value.
    pub fn kind(&self) -> ObservationKind {
        match self {
            Observation::Null => ObservationKind::Null,
            Observation::Int(_) => ObservationKind::Int,
            Observation::Float(_) => ObservationKind::Float,
            Observation::Text(_) => ObservationKind::Text,
            Observation::Bool(_) => ObservationKind::Bool,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Observation::Null)
    }
}

impl ObservationKind {
    /// Returns a lower-case name for the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ObservationKind::Null => "null",
            ObservationKind::Int => "int",
            ObservationKind::Float => "float",
            ObservationKind::Text => "text",
            ObservationKind::Bool => "bool",
        }
    }
}

impl Default for Observation {
    fn default() -> Self {
        Observation::Null
    }
}

impl From<i64> for Observation {
    fn from(value: i64) -> Self {
        Observation::Int(value)
    }
}

impl From<f64> for Observation {
    fn from(value: f64) -> Self {
        Observation::Float(value)
    }
}

impl From<&str> for Observation {
    fn from(value: &str) -> Self {
        Observation::Text(value.to_string())
    }
}

impl From<String> for Observation {
    fn from(value: String) -> Self {
        Observation::Text(value)
    }
}

impl From<bool> for Observation {
    fn from(value: bool) -> Self {
        Observation::Bool(value)
    }
}

impl<T: Into<Observation>> From<Option<T>> for Observation {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Observation::Null,
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observation::Null => Ok(()),
            Observation::Int(i) => write!(f, "{}", i),
            Observation::Float(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Observation::Text(s) => write!(f, "{}", s),
            Observation::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Fallible extraction of a native scalar from an [`Observation`].
///
/// The only implicit widening is `Int` to `f64`. Anything else across
/// kinds is a conversion failure.
pub trait FromObservation: Sized {
    /// The kind name reported in conversion errors.
    fn target_name() -> &'static str;

    fn from_observation(obs: &Observation) -> Option<Self>;
}

impl FromObservation for i64 {
    fn target_name() -> &'static str {
        "int"
    }

    fn from_observation(obs: &Observation) -> Option<Self> {
        match obs {
            Observation::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromObservation for f64 {
    fn target_name() -> &'static str {
        "float"
    }

    fn from_observation(obs: &Observation) -> Option<Self> {
        match obs {
            Observation::Int(i) => Some(*i as f64),
            Observation::Float(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromObservation for String {
    fn target_name() -> &'static str {
        "text"
    }

    fn from_observation(obs: &Observation) -> Option<Self> {
        match obs {
            Observation::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromObservation for bool {
    fn target_name() -> &'static str {
        "bool"
    }

    fn from_observation(obs: &Observation) -> Option<Self> {
        match obs {
            Observation::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Converts an observation to a native scalar, reporting the stored and
/// requested kinds on failure.
pub fn cast<T: FromObservation>(obs: &Observation) -> Result<T, SeriesError> {
    T::from_observation(obs).ok_or_else(|| SeriesError::TypeConversion {
        from: obs.kind().as_str().to_string(),
        to: T::target_name().to_string(),
    })
}

/// Reported display width of a value: 1 for scalars, the element count for
/// values that are themselves collections. Only shape reporting reads this.
pub trait InnerWidth {
    fn inner_width(&self) -> usize {
        1
    }
}

impl InnerWidth for Observation {}
impl InnerWidth for i64 {}
impl InnerWidth for i32 {}
impl InnerWidth for u32 {}
impl InnerWidth for u64 {}
impl InnerWidth for usize {}
impl InnerWidth for f64 {}
impl InnerWidth for f32 {}
impl InnerWidth for bool {}
impl InnerWidth for String {}
impl InnerWidth for &str {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(Observation::Null.kind().as_str(), "null");
        assert_eq!(Observation::Int(1).kind().as_str(), "int");
        assert_eq!(Observation::Float(1.5).kind().as_str(), "float");
        assert_eq!(Observation::from("x").kind().as_str(), "text");
        assert_eq!(Observation::Bool(true).kind().as_str(), "bool");
    }

    #[test]
    fn test_from_native_types() {
        assert_eq!(Observation::from(3i64), Observation::Int(3));
        assert_eq!(Observation::from(2.5f64), Observation::Float(2.5));
        assert_eq!(Observation::from("hi"), Observation::Text("hi".to_string()));
        assert_eq!(Observation::from(false), Observation::Bool(false));
        assert_eq!(Observation::from(None::<i64>), Observation::Null);
        assert_eq!(Observation::from(Some(7i64)), Observation::Int(7));
    }

    #[test]
    fn test_cast_same_kind() {
        assert_eq!(cast::<i64>(&Observation::Int(4)), Ok(4));
        assert_eq!(cast::<f64>(&Observation::Float(0.5)), Ok(0.5));
        assert_eq!(cast::<String>(&Observation::from("a")), Ok("a".to_string()));
        assert_eq!(cast::<bool>(&Observation::Bool(true)), Ok(true));
    }

    #[test]
    fn test_cast_widens_int_to_float() {
        assert_eq!(cast::<f64>(&Observation::Int(4)), Ok(4.0));
    }

    #[test]
    fn test_cast_across_kinds_fails() {
        let err = cast::<i64>(&Observation::from("4")).unwrap_err();
        assert_eq!(
            err,
            SeriesError::TypeConversion {
                from: "text".to_string(),
                to: "int".to_string(),
            }
        );
        // No narrowing from float to int either
        assert!(cast::<i64>(&Observation::Float(4.0)).is_err());
        assert!(cast::<bool>(&Observation::Int(1)).is_err());
    }

    #[test]
    fn test_cast_null_fails() {
        assert!(cast::<i64>(&Observation::Null).is_err());
        assert!(cast::<String>(&Observation::Null).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Observation::Null.to_string(), "");
        assert_eq!(Observation::Int(42).to_string(), "42");
        assert_eq!(Observation::Float(3.0).to_string(), "3");
        assert_eq!(Observation::Float(3.25).to_string(), "3.25");
        assert_eq!(Observation::from("abc").to_string(), "abc");
        assert_eq!(Observation::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_serde_roundtrip() {
        let values = vec![
            Observation::Null,
            Observation::Int(-2),
            Observation::Float(1.5),
            Observation::from("text"),
            Observation::Bool(false),
        ];
        let json = serde_json::to_string(&values).unwrap();
        let back: Vec<Observation> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}
