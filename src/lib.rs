// ============================================================================
// GRIDSPEC - Interpolation Grid Definition
// ============================================================================
//
// Turns the text of a grid form into a validated grid descriptor.
//
// A grid is defined in one of three modes:
// - Default     extent from the point data, 100 x 100 cells
// - Resolution  extent from the point data, explicit cell spacing
// - Explicit    explicit rows/cols and coordinate bounds
//
// MODULE MAP (leaves first):
// - coercion    field text -> numbers, keystroke filters
// - mode        modes, fields, which fields are active
// - geometry    validated rectangular grid geometry
// - descriptor  the resolved grid definition
// - resolver    commit/cancel
// - form        field text + mode for one session
// - session     modal loop over a front end
// - settings    INI persistence of the last form
// - console     terminal command grammar
// ============================================================================

pub mod coercion;
pub mod console;
pub mod descriptor;
pub mod error;
pub mod form;
pub mod geometry;
pub mod mode;
pub mod resolver;
pub mod session;
pub mod settings;

pub use descriptor::{DEFAULT_GRID_CELLS, GridDescriptor, GridResolution};
pub use error::ValidationError;
pub use form::{FieldValues, GridForm};
pub use geometry::{Extent, GeometryError, GridGeometry};
pub use mode::{GridField, GridMode, ModeState};
pub use resolver::{SessionOutcome, cancel, commit};
pub use session::{FormEvent, FormFrontend, run_form, run_session, widget_edits};
pub use settings::Settings;

use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging for the front ends.
///
/// Use `RUST_LOG` environment variable to override the default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
