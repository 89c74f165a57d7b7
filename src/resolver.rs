// ============================================================================
// RESOLVER.RS - Form Values to Grid Descriptor
// ============================================================================
//
// Commit reads only the fields the active mode requires:
//
//   Default     nothing, always succeeds
//   Resolution  dx, dy (reals, both > 0)
//   Explicit    rows, cols (integers) and the four bounds (reals), then
//               the geometry constructor decides whether they form a grid
//
// Cancel has no inputs and always yields the "no descriptor" outcome.
// ============================================================================

use tracing::{debug, info};

use crate::coercion::{coerce_integer, coerce_real, integer_out_of_range};
use crate::descriptor::{GridDescriptor, GridResolution};
use crate::error::{MISSING_GEOMETRY, MISSING_SPACING, ValidationError};
use crate::form::FieldValues;
use crate::geometry::{GeometryError, GridGeometry};
use crate::mode::{GridField, GridMode};

/// How a grid-definition session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Committed(GridDescriptor),
    /// Dismissed; the caller keeps whatever descriptor it held before.
    Cancelled,
}

impl SessionOutcome {
    pub fn into_descriptor(self) -> Option<GridDescriptor> {
        match self {
            SessionOutcome::Committed(d) => Some(d),
            SessionOutcome::Cancelled => None,
        }
    }
}

/// Resolve the current form state into a descriptor.
pub fn commit(values: &FieldValues, mode: GridMode) -> Result<GridDescriptor, ValidationError> {
    let result = match mode {
        GridMode::Default => Ok(GridDescriptor::Default),
        GridMode::Resolution => resolve_resolution(values),
        GridMode::Explicit => resolve_explicit(values),
    };
    match &result {
        Ok(descriptor) => info!(%descriptor, "grid committed"),
        Err(err) => debug!(mode = mode.name(), error = %err, "grid commit rejected"),
    }
    result
}

pub fn cancel() -> SessionOutcome {
    info!("grid definition cancelled");
    SessionOutcome::Cancelled
}

fn resolve_resolution(values: &FieldValues) -> Result<GridDescriptor, ValidationError> {
    let dx = coerce_real(values.get(GridField::XSpacing));
    let dy = coerce_real(values.get(GridField::YSpacing));
    let (Some(dx), Some(dy)) = (dx, dy) else {
        return Err(ValidationError::MissingFields(MISSING_SPACING.to_string()));
    };

    let resolution = GridResolution::new(dx, dy)
        .map_err(|err| ValidationError::InvalidSpacing(err.to_string()))?;
    Ok(GridDescriptor::Resolution(resolution))
}

/// A count field: None when missing, an error when it is a whole number
/// too large to hold.
fn coerce_count(text: &str, name: &'static str) -> Option<Result<i64, GeometryError>> {
    if integer_out_of_range(text) {
        return Some(Err(GeometryError::CountOutOfRange { name }));
    }
    coerce_integer(text).map(Ok)
}

fn resolve_explicit(values: &FieldValues) -> Result<GridDescriptor, ValidationError> {
    let rows = coerce_count(values.get(GridField::Rows), "Row");
    let cols = coerce_count(values.get(GridField::Cols), "Column");
    let x_min = coerce_real(values.get(GridField::XMin));
    let x_max = coerce_real(values.get(GridField::XMax));
    let y_min = coerce_real(values.get(GridField::YMin));
    let y_max = coerce_real(values.get(GridField::YMax));

    let (Some(rows), Some(cols), Some(x_min), Some(x_max), Some(y_min), Some(y_max)) =
        (rows, cols, x_min, x_max, y_min, y_max)
    else {
        return Err(ValidationError::MissingFields(MISSING_GEOMETRY.to_string()));
    };

    let geometry = GridGeometry::new(rows?, cols?, x_min, x_max, y_min, y_max)?;
    Ok(GridDescriptor::Explicit(geometry))
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn explicit(rows: &str, cols: &str, x: (&str, &str), y: (&str, &str)) -> FieldValues {
        FieldValues::new()
            .with(GridField::Rows, rows)
            .with(GridField::Cols, cols)
            .with(GridField::XMin, x.0)
            .with(GridField::XMax, x.1)
            .with(GridField::YMin, y.0)
            .with(GridField::YMax, y.1)
    }

    fn random_text(rng: &mut StdRng) -> String {
        const CHARS: &[u8] = b"0123456789-.eE xyz";
        let len = rng.random_range(0..8);
        (0..len)
            .map(|_| CHARS[rng.random_range(0..CHARS.len())] as char)
            .collect()
    }

    fn random_values(rng: &mut StdRng) -> FieldValues {
        let mut values = FieldValues::new();
        for field in GridField::ALL {
            values.set(field, random_text(rng));
        }
        values
    }

    #[test]
    fn test_default_ignores_any_field_contents() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let values = random_values(&mut rng);
            assert_eq!(commit(&values, GridMode::Default), Ok(GridDescriptor::Default));
        }
    }

    #[test]
    fn test_resolution_commit() {
        let values = FieldValues::new()
            .with(GridField::XSpacing, "10")
            .with(GridField::YSpacing, "20");
        assert_eq!(
            commit(&values, GridMode::Resolution),
            Ok(GridDescriptor::Resolution(GridResolution::new(10.0, 20.0).unwrap()))
        );
    }

    #[test]
    fn test_resolution_missing_spacing() {
        let values = FieldValues::new().with(GridField::XSpacing, "10");
        assert_eq!(
            commit(&values, GridMode::Resolution),
            Err(ValidationError::MissingFields(MISSING_SPACING.to_string()))
        );
    }

    #[test]
    fn test_resolution_ignores_geometry_fields() {
        let values = explicit("", "x", ("", ""), ("", ""))
            .with(GridField::XSpacing, "0.5")
            .with(GridField::YSpacing, "0.25");
        assert!(commit(&values, GridMode::Resolution).is_ok());
    }

    #[test]
    fn test_resolution_rejects_non_positive_spacing() {
        let values = FieldValues::new()
            .with(GridField::XSpacing, "0")
            .with(GridField::YSpacing, "5");
        let err = commit(&values, GridMode::Resolution).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSpacing(_)));
        assert!(err.message().starts_with("X spacing"));

        let values = values.with(GridField::XSpacing, "1").with(GridField::YSpacing, "-2");
        assert!(matches!(
            commit(&values, GridMode::Resolution),
            Err(ValidationError::InvalidSpacing(_))
        ));
    }

    #[test]
    fn test_explicit_commit() {
        let values = explicit("50", "50", ("0", "100"), ("0", "100"));
        let descriptor = commit(&values, GridMode::Explicit).unwrap();
        let g = descriptor.geometry().unwrap();
        assert_eq!(g.rows(), 50);
        assert_eq!(g.cols(), 50);
        assert_eq!(g.bounds(), (0.0, 100.0, 0.0, 100.0));
        assert!(descriptor.resolution().is_none());
    }

    #[test]
    fn test_explicit_inverted_bounds() {
        let values = explicit("50", "50", ("100", "0"), ("0", "100"));
        assert!(matches!(
            commit(&values, GridMode::Explicit),
            Err(ValidationError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_explicit_zero_rows() {
        let values = explicit("0", "50", ("0", "100"), ("0", "100"));
        let err = commit(&values, GridMode::Explicit).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidGeometry(_)));
        assert_eq!(err.title(), "Invalid grid geometry");
    }

    #[test]
    fn test_explicit_missing_any_field() {
        let full = explicit("50", "50", ("0", "100"), ("0", "100"));
        for field in GridMode::Explicit.active_fields() {
            let values = full.clone().with(*field, "");
            assert_eq!(
                commit(&values, GridMode::Explicit),
                Err(ValidationError::MissingFields(MISSING_GEOMETRY.to_string())),
                "blank {}",
                field.key()
            );
        }
    }

    #[test]
    fn test_explicit_fractional_count_is_missing() {
        let values = explicit("2.5", "50", ("0", "100"), ("0", "100"));
        assert!(matches!(
            commit(&values, GridMode::Explicit),
            Err(ValidationError::MissingFields(_))
        ));
    }

    #[test]
    fn test_explicit_oversized_count_is_invalid_not_missing() {
        let values = explicit("9223372036854775808", "50", ("0", "100"), ("0", "100"));
        let err = commit(&values, GridMode::Explicit).unwrap_err();
        assert_eq!(err, ValidationError::InvalidGeometry("Row count is too large.".to_string()));

        let values = explicit("50", "-99999999999999999999", ("0", "100"), ("0", "100"));
        assert!(matches!(
            commit(&values, GridMode::Explicit),
            Err(ValidationError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_explicit_oversized_count_with_blank_bound_is_missing() {
        let values = explicit("9223372036854775808", "50", ("", "100"), ("0", "100"));
        assert!(matches!(
            commit(&values, GridMode::Explicit),
            Err(ValidationError::MissingFields(_))
        ));
    }

    #[test]
    fn test_cancel_never_yields_a_descriptor() {
        assert_eq!(cancel(), SessionOutcome::Cancelled);
        assert_eq!(cancel().into_descriptor(), None);
        let done = SessionOutcome::Committed(GridDescriptor::Default);
        assert_eq!(done.into_descriptor(), Some(GridDescriptor::Default));
    }
}
