use crate::coercion::NumberKind;
use crate::descriptor::GridDescriptor;

/// How the grid is defined. Exactly one mode is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridMode {
    /// Extent from point data, fixed 100x100 cells.
    #[default]
    Default,
    /// Extent from point data, explicit cell spacing.
    Resolution,
    /// Explicit row/column counts and coordinate bounds.
    Explicit,
}

impl GridMode {
    pub const ALL: [GridMode; 3] = [GridMode::Default, GridMode::Resolution, GridMode::Explicit];

    pub fn name(self) -> &'static str {
        match self {
            GridMode::Default => "Default",
            GridMode::Resolution => "Resolution",
            GridMode::Explicit => "Explicit",
        }
    }

    /// Case-insensitive inverse of [`GridMode::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// Fields the user may edit (and must fill) in this mode.
    pub fn active_fields(self) -> &'static [GridField] {
        match self {
            GridMode::Default => &[],
            GridMode::Resolution => &RESOLUTION_FIELDS,
            GridMode::Explicit => &GEOMETRY_FIELDS,
        }
    }

    /// Fields shown greyed out in this mode. Their text is kept.
    pub fn disabled_fields(self) -> Vec<GridField> {
        GridField::ALL
            .into_iter()
            .filter(|f| !self.is_active(*f))
            .collect()
    }

    pub fn is_active(self, field: GridField) -> bool {
        self.active_fields().contains(&field)
    }
}

/// The eight text fields of the grid form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridField {
    XSpacing,
    YSpacing,
    Rows,
    Cols,
    XMin,
    XMax,
    YMin,
    YMax,
}

pub const RESOLUTION_FIELDS: [GridField; 2] = [GridField::XSpacing, GridField::YSpacing];

pub const GEOMETRY_FIELDS: [GridField; 6] = [
    GridField::Rows,
    GridField::Cols,
    GridField::XMin,
    GridField::XMax,
    GridField::YMin,
    GridField::YMax,
];

impl GridField {
    pub const ALL: [GridField; 8] = [
        GridField::XSpacing,
        GridField::YSpacing,
        GridField::Rows,
        GridField::Cols,
        GridField::XMin,
        GridField::XMax,
        GridField::YMin,
        GridField::YMax,
    ];

    /// Position in [`GridField::ALL`]; used to index field storage.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn kind(self) -> NumberKind {
        match self {
            GridField::Rows | GridField::Cols => NumberKind::Integer,
            _ => NumberKind::Real,
        }
    }

    /// Short machine name, used by the settings file and the console.
    pub fn key(self) -> &'static str {
        match self {
            GridField::XSpacing => "dx",
            GridField::YSpacing => "dy",
            GridField::Rows => "rows",
            GridField::Cols => "cols",
            GridField::XMin => "xmin",
            GridField::XMax => "xmax",
            GridField::YMin => "ymin",
            GridField::YMax => "ymax",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GridField::XSpacing => "X spacing:",
            GridField::YSpacing => "Y spacing:",
            GridField::Rows => "Rows:",
            GridField::Cols => "Columns:",
            GridField::XMin => "X min:",
            GridField::XMax => "X max:",
            GridField::YMin => "Y min:",
            GridField::YMax => "Y max:",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(key))
    }
}

// ─── Mode State ──────────────────────────────────────────────────────────────
//
// Transitions happen only on explicit selection. Switching never touches
// field text; that lives in FieldValues and survives every switch.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeState {
    mode: GridMode,
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start in the seed descriptor's mode, or `Default` without one.
    pub fn seeded(seed: Option<&GridDescriptor>) -> Self {
        Self {
            mode: seed.map(GridDescriptor::mode).unwrap_or_default(),
        }
    }

    pub fn mode(&self) -> GridMode {
        self.mode
    }

    /// Returns true when the mode actually changed.
    pub fn select(&mut self, mode: GridMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    pub fn is_enabled(&self, field: GridField) -> bool {
        self.mode.is_active(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::GridResolution;

    #[test]
    fn test_active_field_table() {
        assert!(GridMode::Default.active_fields().is_empty());
        assert_eq!(GridMode::Default.disabled_fields().len(), 8);

        assert_eq!(GridMode::Resolution.active_fields(), &RESOLUTION_FIELDS);
        assert_eq!(GridMode::Resolution.disabled_fields(), GEOMETRY_FIELDS.to_vec());

        assert_eq!(GridMode::Explicit.active_fields(), &GEOMETRY_FIELDS);
        assert_eq!(GridMode::Explicit.disabled_fields(), RESOLUTION_FIELDS.to_vec());
    }

    #[test]
    fn test_field_indices_match_all_order() {
        for (i, field) in GridField::ALL.into_iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_field_kinds() {
        assert_eq!(GridField::Rows.kind(), NumberKind::Integer);
        assert_eq!(GridField::Cols.kind(), NumberKind::Integer);
        assert_eq!(GridField::XSpacing.kind(), NumberKind::Real);
        assert_eq!(GridField::YMax.kind(), NumberKind::Real);
    }

    #[test]
    fn test_names_and_keys_parse_back() {
        for mode in GridMode::ALL {
            assert_eq!(GridMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(GridMode::from_name(" EXPLICIT "), Some(GridMode::Explicit));
        assert_eq!(GridMode::from_name("auto"), None);

        for field in GridField::ALL {
            assert_eq!(GridField::from_key(field.key()), Some(field));
        }
        assert_eq!(GridField::from_key("XMin"), Some(GridField::XMin));
        assert_eq!(GridField::from_key("zmin"), None);
    }

    #[test]
    fn test_initial_state() {
        assert_eq!(ModeState::new().mode(), GridMode::Default);
        assert_eq!(ModeState::seeded(None).mode(), GridMode::Default);

        let seed = GridDescriptor::Resolution(GridResolution::new(5.0, 7.0).unwrap());
        assert_eq!(ModeState::seeded(Some(&seed)).mode(), GridMode::Resolution);
    }

    #[test]
    fn test_select_reports_change() {
        let mut state = ModeState::new();
        assert!(state.select(GridMode::Explicit));
        assert!(!state.select(GridMode::Explicit));
        assert!(state.is_enabled(GridField::Rows));
        assert!(!state.is_enabled(GridField::XSpacing));
    }
}
