// ============================================================================
// FORM.RS - Grid Form State
// ============================================================================
//
// The form is the only mutable state of a grid-definition session: the
// active mode plus the committed text of all eight fields. Text in disabled
// fields is never cleared, so flipping modes back and forth restores what
// the user typed earlier.
// ============================================================================

use tracing::debug;

use crate::coercion::sanitize;
use crate::descriptor::GridDescriptor;
use crate::error::ValidationError;
use crate::mode::{GridField, GridMode, ModeState};
use crate::resolver::{self, SessionOutcome};

/// Current text of every grid field, indexed by [`GridField`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    texts: [String; 8],
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field text pre-populated from a prior descriptor. Fields the
    /// descriptor does not cover stay empty.
    pub fn from_descriptor(descriptor: &GridDescriptor) -> Self {
        let mut values = Self::new();
        match descriptor {
            GridDescriptor::Default => {}
            GridDescriptor::Resolution(r) => {
                values.set(GridField::XSpacing, r.dx().to_string());
                values.set(GridField::YSpacing, r.dy().to_string());
            }
            GridDescriptor::Explicit(g) => {
                values.set(GridField::Rows, g.rows().to_string());
                values.set(GridField::Cols, g.cols().to_string());
                values.set(GridField::XMin, g.x_min().to_string());
                values.set(GridField::XMax, g.x_max().to_string());
                values.set(GridField::YMin, g.y_min().to_string());
                values.set(GridField::YMax, g.y_max().to_string());
            }
        }
        values
    }

    pub fn get(&self, field: GridField) -> &str {
        &self.texts[field.index()]
    }

    /// Store raw text as-is. Front ends that have not filtered keystrokes
    /// should go through [`GridForm::edit`] instead.
    pub fn set(&mut self, field: GridField, text: impl Into<String>) {
        self.texts[field.index()] = text.into();
    }

    /// Builder form of [`FieldValues::set`].
    pub fn with(mut self, field: GridField, text: impl Into<String>) -> Self {
        self.set(field, text);
        self
    }
}

/// One grid-definition session: mode plus field text.
#[derive(Debug, Clone, Default)]
pub struct GridForm {
    state: ModeState,
    values: FieldValues,
}

impl GridForm {
    /// Mode and text come from `seed` when given, otherwise the form
    /// starts empty in `Default` mode.
    pub fn new(seed: Option<&GridDescriptor>) -> Self {
        Self {
            state: ModeState::seeded(seed),
            values: seed.map(FieldValues::from_descriptor).unwrap_or_default(),
        }
    }

    /// Restore a form exactly, including text in inactive fields.
    pub fn from_parts(mode: GridMode, values: FieldValues) -> Self {
        let mut state = ModeState::new();
        state.select(mode);
        Self { state, values }
    }

    pub fn mode(&self) -> GridMode {
        self.state.mode()
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn text(&self, field: GridField) -> &str {
        self.values.get(field)
    }

    pub fn is_enabled(&self, field: GridField) -> bool {
        self.state.is_enabled(field)
    }

    pub fn select_mode(&mut self, mode: GridMode) {
        if self.state.select(mode) {
            debug!(mode = mode.name(), "grid mode selected");
        }
    }

    /// Store `text` for `field` after stripping characters that cannot be
    /// part of the field's number kind. Disabled fields are left alone;
    /// returns whether the edit was applied.
    pub fn edit(&mut self, field: GridField, text: &str) -> bool {
        if !self.is_enabled(field) {
            debug!(field = field.key(), mode = self.mode().name(), "edit to disabled field ignored");
            return false;
        }
        let clean = sanitize(text, field.kind());
        if clean != text {
            debug!(field = field.key(), raw = text, kept = clean.as_str(), "stripped invalid characters");
        }
        self.values.set(field, clean);
        true
    }

    pub fn commit(&self) -> Result<GridDescriptor, ValidationError> {
        resolver::commit(&self.values, self.mode())
    }

    pub fn cancel(&self) -> SessionOutcome {
        resolver::cancel()
    }
}
