// ============================================================================
// GEOMETRY.RS - Rectangular Grid Geometry
// ============================================================================
//
// A grid geometry is a row/column count plus the coordinate bounds the cells
// cover. Construction is the validity check: a GridGeometry that exists is
// always well-formed (positive counts, finite and ordered bounds, non-zero
// cell size).
//
// Rows run along Y, columns along X.
// ============================================================================

use thiserror::Error;

/// Why a set of geometry parameters does not describe a grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Row count must be a positive integer (got {0}).")]
    NonPositiveRows(i64),

    #[error("Column count must be a positive integer (got {0}).")]
    NonPositiveCols(i64),

    #[error("Grid of {rows} x {cols} cells is too large.")]
    TooManyCells { rows: i64, cols: i64 },

    /// The count text is a whole number but does not fit in an i64.
    #[error("{name} count is too large.")]
    CountOutOfRange { name: &'static str },

    #[error("{axis} spacing must be greater than zero (got {value}).")]
    NonPositiveSpacing { axis: char, value: f64 },

    #[error("Bound {name} must be a finite number.")]
    NonFiniteBound { name: &'static str },

    #[error("X max ({max}) must be greater than X min ({min}).")]
    InvertedX { min: f64, max: f64 },

    #[error("Y max ({max}) must be greater than Y min ({min}).")]
    InvertedY { min: f64, max: f64 },

    #[error("Bounds are too close together for {count} cells along {axis}.")]
    DegenerateCells { axis: char, count: usize },
}

/// Axis-aligned bounding box of scattered point data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Extent {
    /// Bounding box of `points`. None when there are no points or any
    /// coordinate is not finite.
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        let (&(x0, y0), rest) = points.split_first()?;
        let mut extent = Extent {
            x_min: x0,
            x_max: x0,
            y_min: y0,
            y_max: y0,
        };
        for &(x, y) in rest {
            extent.x_min = extent.x_min.min(x);
            extent.x_max = extent.x_max.max(x);
            extent.y_min = extent.y_min.min(y);
            extent.y_max = extent.y_max.max(y);
        }
        let finite = points.iter().all(|(x, y)| x.is_finite() && y.is_finite());
        finite.then_some(extent)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    rows: usize,
    cols: usize,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl GridGeometry {
    /// Validate and build a geometry. Counts arrive as signed integers
    /// because that is what the form fields parse to.
    pub fn new(
        rows: i64,
        cols: i64,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> Result<Self, GeometryError> {
        if rows <= 0 {
            return Err(GeometryError::NonPositiveRows(rows));
        }
        if cols <= 0 {
            return Err(GeometryError::NonPositiveCols(cols));
        }
        let (Ok(n_rows), Ok(n_cols)) = (usize::try_from(rows), usize::try_from(cols)) else {
            return Err(GeometryError::TooManyCells { rows, cols });
        };
        if n_rows.checked_mul(n_cols).is_none() {
            return Err(GeometryError::TooManyCells { rows, cols });
        }

        for (name, value) in [
            ("X min", x_min),
            ("X max", x_max),
            ("Y min", y_min),
            ("Y max", y_max),
        ] {
            if !value.is_finite() {
                return Err(GeometryError::NonFiniteBound { name });
            }
        }
        if x_max <= x_min {
            return Err(GeometryError::InvertedX { min: x_min, max: x_max });
        }
        if y_max <= y_min {
            return Err(GeometryError::InvertedY { min: y_min, max: y_max });
        }

        let geometry = Self {
            rows: n_rows,
            cols: n_cols,
            x_min,
            x_max,
            y_min,
            y_max,
        };

        // Huge counts over a tiny span can round the cell size to zero, or
        // overflow the span itself (e.g. -f64::MAX..f64::MAX).
        let cw = geometry.cell_width();
        if !(cw.is_finite() && cw > 0.0) {
            return Err(GeometryError::DegenerateCells { axis: 'X', count: n_cols });
        }
        let ch = geometry.cell_height();
        if !(ch.is_finite() && ch > 0.0) {
            return Err(GeometryError::DegenerateCells { axis: 'Y', count: n_rows });
        }

        Ok(geometry)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// `(x_min, x_max, y_min, y_max)`
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.x_min, self.x_max, self.y_min, self.y_max)
    }

    pub fn extent(&self) -> Extent {
        Extent {
            x_min: self.x_min,
            x_max: self.x_max,
            y_min: self.y_min,
            y_max: self.y_max,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn cell_width(&self) -> f64 {
        (self.x_max - self.x_min) / self.cols as f64
    }

    pub fn cell_height(&self) -> f64 {
        (self.y_max - self.y_min) / self.rows as f64
    }

    /// Center of the cell at (`row`, `col`), counted from (x_min, y_min).
    /// None when the index is outside the grid.
    pub fn cell_center(&self, row: usize, col: usize) -> Option<(f64, f64)> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let x = self.x_min + (col as f64 + 0.5) * self.cell_width();
        let y = self.y_min + (row as f64 + 0.5) * self.cell_height();
        Some((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_geometry() {
        let g = GridGeometry::new(50, 50, 0.0, 100.0, 0.0, 100.0).unwrap();
        assert_eq!(g.rows(), 50);
        assert_eq!(g.cols(), 50);
        assert_eq!(g.bounds(), (0.0, 100.0, 0.0, 100.0));
        assert_eq!(g.cell_count(), 2500);
        assert!((g.cell_width() - 2.0).abs() < 1e-12);
        assert!((g.cell_height() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_positive_counts_rejected() {
        assert_eq!(
            GridGeometry::new(0, 50, 0.0, 1.0, 0.0, 1.0),
            Err(GeometryError::NonPositiveRows(0))
        );
        assert_eq!(
            GridGeometry::new(10, -2, 0.0, 1.0, 0.0, 1.0),
            Err(GeometryError::NonPositiveCols(-2))
        );
    }

    #[test]
    fn test_inverted_and_flat_bounds_rejected() {
        assert!(matches!(
            GridGeometry::new(10, 10, 100.0, 0.0, 0.0, 1.0),
            Err(GeometryError::InvertedX { .. })
        ));
        assert!(matches!(
            GridGeometry::new(10, 10, 0.0, 1.0, 5.0, 5.0),
            Err(GeometryError::InvertedY { .. })
        ));
    }

    #[test]
    fn test_non_finite_bound_rejected() {
        assert_eq!(
            GridGeometry::new(10, 10, 0.0, f64::INFINITY, 0.0, 1.0),
            Err(GeometryError::NonFiniteBound { name: "X max" })
        );
    }

    #[test]
    fn test_overflowing_cell_count_rejected() {
        assert!(matches!(
            GridGeometry::new(i64::MAX, i64::MAX, 0.0, 1.0, 0.0, 1.0),
            Err(GeometryError::TooManyCells { .. })
        ));
    }

    #[test]
    fn test_degenerate_span_rejected() {
        assert!(matches!(
            GridGeometry::new(1, 1, -f64::MAX, f64::MAX, 0.0, 1.0),
            Err(GeometryError::DegenerateCells { axis: 'X', .. })
        ));
    }

    #[test]
    fn test_error_detail_is_readable() {
        let err = GridGeometry::new(0, 5, 0.0, 1.0, 0.0, 1.0).unwrap_err();
        assert_eq!(err.to_string(), "Row count must be a positive integer (got 0).");
    }

    #[test]
    fn test_cell_center() {
        let g = GridGeometry::new(2, 4, 0.0, 8.0, 10.0, 14.0).unwrap();
        assert_eq!(g.cell_center(0, 0), Some((1.0, 11.0)));
        assert_eq!(g.cell_center(1, 3), Some((7.0, 13.0)));
        assert_eq!(g.cell_center(2, 0), None);
    }

    #[test]
    fn test_extent_from_points() {
        let pts = [(1.0, 5.0), (-2.0, 3.0), (4.0, 9.0)];
        let e = Extent::from_points(&pts).unwrap();
        assert_eq!(e, Extent { x_min: -2.0, x_max: 4.0, y_min: 3.0, y_max: 9.0 });
        assert_eq!(e.width(), 6.0);
        assert_eq!(e.height(), 6.0);

        assert_eq!(Extent::from_points(&[]), None);
        assert_eq!(Extent::from_points(&[(0.0, 0.0), (f64::NAN, 1.0)]), None);
    }
}
