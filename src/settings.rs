use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::coercion::is_valid_partial;
use crate::form::{FieldValues, GridForm};
use crate::mode::{GridField, GridMode};

/// Grid dialog settings, loaded from INI file or defaults.
/// Remembers the last mode and the text of every field, including fields
/// that were disabled when the dialog closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    // ── Grid ──
    pub mode: String, // "Default", "Resolution", "Explicit"

    // ── Resolution ──
    pub dx: String,
    pub dy: String,

    // ── Geometry ──
    pub rows: String,
    pub cols: String,
    pub xmin: String,
    pub xmax: String,
    pub ymin: String,
    pub ymax: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Grid
            mode: GridMode::Default.name().to_string(),

            // Resolution
            dx: String::new(),
            dy: String::new(),

            // Geometry
            rows: String::new(),
            cols: String::new(),
            xmin: String::new(),
            xmax: String::new(),
            ymin: String::new(),
            ymax: String::new(),
        }
    }
}

impl Settings {
    pub const FILE_NAME: &'static str = "gridspec.ini";

    /// Load settings from the default INI file, creating it if needed.
    pub fn load_or_create() -> Self {
        Self::load_or_create_at(Path::new(Self::FILE_NAME))
    }

    /// Load settings from `path`, or create it with defaults if it doesn't
    /// exist. Read failures fall back to defaults.
    pub fn load_or_create_at(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => {
                    let mut settings = Self::default();
                    settings.parse_ini(&content);
                    settings
                }
                Err(e) => {
                    warn!("Could not read {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            }
        } else {
            let settings = Self::default();
            settings.save_at(path);
            settings
        }
    }

    /// Capture the current form, inactive field text included.
    pub fn from_form(form: &GridForm) -> Self {
        let mut cfg = Self {
            mode: form.mode().name().to_string(),
            ..Self::default()
        };
        for field in GridField::ALL {
            *cfg.field_mut(field) = form.text(field).to_string();
        }
        cfg
    }

    /// Rebuild the form these settings were captured from. Unknown mode
    /// names fall back to `Default`; stored text is kept verbatim.
    pub fn seed_form(&self) -> GridForm {
        let mode = GridMode::from_name(&self.mode).unwrap_or_default();
        let mut values = FieldValues::new();
        for field in GridField::ALL {
            values.set(field, self.field(field).as_str());
        }
        GridForm::from_parts(mode, values)
    }

    pub fn field(&self, field: GridField) -> &String {
        match field {
            GridField::XSpacing => &self.dx,
            GridField::YSpacing => &self.dy,
            GridField::Rows => &self.rows,
            GridField::Cols => &self.cols,
            GridField::XMin => &self.xmin,
            GridField::XMax => &self.xmax,
            GridField::YMin => &self.ymin,
            GridField::YMax => &self.ymax,
        }
    }

    fn field_mut(&mut self, field: GridField) -> &mut String {
        match field {
            GridField::XSpacing => &mut self.dx,
            GridField::YSpacing => &mut self.dy,
            GridField::Rows => &mut self.rows,
            GridField::Cols => &mut self.cols,
            GridField::XMin => &mut self.xmin,
            GridField::XMax => &mut self.xmax,
            GridField::YMin => &mut self.ymin,
            GridField::YMax => &mut self.ymax,
        }
    }

    /// Save current settings to the default INI file.
    pub fn save(&self) {
        self.save_at(Path::new(Self::FILE_NAME));
    }

    pub fn save_at(&self, path: &Path) {
        match fs::write(path, self.to_ini()) {
            Ok(()) => info!("Saved grid settings to {}", path.display()),
            Err(e) => warn!("Could not save {}: {}", path.display(), e),
        }
    }

    fn to_ini(&self) -> String {
        let mut s = String::new();
        s.push_str("# gridspec Settings\n");
        s.push_str("# Edit values below. Delete this file to reset to defaults.\n\n");

        s.push_str("[Grid]\n");
        s.push_str("# mode: Default, Resolution, Explicit\n");
        s.push_str(&format!("mode = {}\n", self.mode));
        s.push('\n');

        s.push_str("[Resolution]\n");
        s.push_str("# cell spacing along X and Y (grid extent comes from the points)\n");
        s.push_str(&format!("dx = {}\n", self.dx));
        s.push_str(&format!("dy = {}\n", self.dy));
        s.push('\n');

        s.push_str("[Geometry]\n");
        s.push_str(&format!("rows = {}\n", self.rows));
        s.push_str(&format!("cols = {}\n", self.cols));
        s.push_str(&format!("xmin = {}\n", self.xmin));
        s.push_str(&format!("xmax = {}\n", self.xmax));
        s.push_str(&format!("ymin = {}\n", self.ymin));
        s.push_str(&format!("ymax = {}\n", self.ymax));

        s
    }

    fn parse_ini(&mut self, content: &str) {
        let map = parse_ini_to_map(content);

        if let Some(v) = map.get("mode") {
            if let Some(mode) = GridMode::from_name(v) {
                self.mode = mode.name().to_string();
            }
        }

        // Field text is stored as typed; it only has to look like a number
        // in progress, the resolver decides the rest on commit.
        for field in GridField::ALL {
            if let Some(v) = map.get(field.key()) {
                if is_valid_partial(v, field.kind()) {
                    *self.field_mut(field) = v.clone();
                }
            }
        }
    }
}

/// Parse INI content into a flat key-value map (section headers are ignored,
/// keys are globally unique in our format).
fn parse_ini_to_map(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            let key = key.trim().to_string();
            let val = val.trim().to_string();
            map.insert(key, val);
        }
    }
    map
}
