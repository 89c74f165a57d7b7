use std::fmt;

use crate::geometry::{Extent, GeometryError, GridGeometry};
use crate::mode::GridMode;

/// Cells per axis when the grid is defined by point extent alone.
pub const DEFAULT_GRID_CELLS: i64 = 100;

/// Cell spacing along each axis. Both values are finite and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridResolution {
    dx: f64,
    dy: f64,
}

impl GridResolution {
    pub fn new(dx: f64, dy: f64) -> Result<Self, GeometryError> {
        for (axis, value) in [('X', dx), ('Y', dy)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeometryError::NonPositiveSpacing { axis, value });
            }
        }
        Ok(Self { dx, dy })
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn dy(&self) -> f64 {
        self.dy
    }
}

/// The resolved definition of an interpolation grid.
///
/// Each mode carries exactly the parameters it needs: no spacing under
/// `Explicit`, no geometry under `Resolution`, nothing under `Default`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GridDescriptor {
    #[default]
    Default,
    Resolution(GridResolution),
    Explicit(GridGeometry),
}

impl GridDescriptor {
    pub fn mode(&self) -> GridMode {
        match self {
            GridDescriptor::Default => GridMode::Default,
            GridDescriptor::Resolution(_) => GridMode::Resolution,
            GridDescriptor::Explicit(_) => GridMode::Explicit,
        }
    }

    pub fn resolution(&self) -> Option<GridResolution> {
        match self {
            GridDescriptor::Resolution(r) => Some(*r),
            _ => None,
        }
    }

    pub fn geometry(&self) -> Option<&GridGeometry> {
        match self {
            GridDescriptor::Explicit(g) => Some(g),
            _ => None,
        }
    }

    /// Build the concrete grid for a set of points with bounding box
    /// `extent`.
    ///
    /// Resolution mode rounds the cell counts up and pushes the max edges
    /// out so the spacing is exact. Explicit mode ignores the extent.
    pub fn realize(&self, extent: &Extent) -> Result<GridGeometry, GeometryError> {
        match self {
            GridDescriptor::Default => GridGeometry::new(
                DEFAULT_GRID_CELLS,
                DEFAULT_GRID_CELLS,
                extent.x_min,
                extent.x_max,
                extent.y_min,
                extent.y_max,
            ),
            GridDescriptor::Resolution(r) => {
                let cols = cells_for_span(extent.width(), r.dx());
                let rows = cells_for_span(extent.height(), r.dy());
                GridGeometry::new(
                    rows,
                    cols,
                    extent.x_min,
                    extent.x_min + cols as f64 * r.dx(),
                    extent.y_min,
                    extent.y_min + rows as f64 * r.dy(),
                )
            }
            GridDescriptor::Explicit(g) => Ok(g.clone()),
        }
    }
}

/// At least one cell, even for a zero-width span.
fn cells_for_span(span: f64, spacing: f64) -> i64 {
    let n = (span / spacing).ceil();
    if n.is_finite() && n >= 1.0 {
        // `as` saturates at i64::MAX; GridGeometry rejects that later.
        n as i64
    } else {
        1
    }
}

impl fmt::Display for GridDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridDescriptor::Default => write!(
                f,
                "Default ({0} x {0} cells over the point extent)",
                DEFAULT_GRID_CELLS
            ),
            GridDescriptor::Resolution(r) => {
                write!(f, "Resolution (dx = {}, dy = {})", r.dx(), r.dy())
            }
            GridDescriptor::Explicit(g) => write!(
                f,
                "Explicit ({} rows x {} cols, x {}..{}, y {}..{})",
                g.rows(),
                g.cols(),
                g.x_min(),
                g.x_max(),
                g.y_min(),
                g.y_max()
            ),
        }
    }
}
