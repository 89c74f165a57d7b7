//! Commit errors. Every variant is recoverable: the form stays open and the
//! user corrects the input.

use thiserror::Error;

use crate::geometry::GeometryError;

pub const MISSING_SPACING: &str = "All grid spacing fields are required.";
pub const MISSING_GEOMETRY: &str = "All grid geometry fields are required.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A field required by the active mode is empty or unparseable.
    #[error("{0}")]
    MissingFields(String),

    /// The geometry fields parse but do not describe a grid.
    #[error("{0}")]
    InvalidGeometry(String),

    /// A cell spacing is zero or negative.
    #[error("{0}")]
    InvalidSpacing(String),
}

impl ValidationError {
    /// Short heading for an error dialog.
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::MissingFields(_) => "Missing fields",
            ValidationError::InvalidGeometry(_) => "Invalid grid geometry",
            ValidationError::InvalidSpacing(_) => "Invalid grid spacing",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationError::MissingFields(m)
            | ValidationError::InvalidGeometry(m)
            | ValidationError::InvalidSpacing(m) => m,
        }
    }
}

impl From<GeometryError> for ValidationError {
    fn from(err: GeometryError) -> Self {
        ValidationError::InvalidGeometry(err.to_string())
    }
}
