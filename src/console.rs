// ============================================================================
// CONSOLE.RS - Line Commands for the Terminal Front End
// ============================================================================
//
// COMMANDS:
// - "mode explicit"      Select a mode (default, resolution, explicit)
// - "set rows 50"        Set a field
// - "rows = 50"          Same thing
// - "show"               Print the form
// - "ok"                 Commit
// - "cancel"             Dismiss without changing the grid
// - "help"               List commands
//
// Field names: dx dy rows cols xmin xmax ymin ymax (any case).
// A field with nothing after it ("set dx" or "dx =") clears the field.
// Values are refused, not trimmed, when they are not numbers.
// ============================================================================

use std::fmt::Write as _;

use crate::coercion::{NumberKind, normalize_entry};
use crate::form::GridForm;
use crate::mode::{GridField, GridMode};
use crate::session::FormEvent;

pub const HELP: &str = "\
Commands:
  mode <default|resolution|explicit>   choose how the grid is defined
  set <field> <value>                  set a field (or: <field> = <value>)
  show                                 print the current form
  ok                                   accept the grid
  cancel                               close without changing the grid
Fields: dx dy rows cols xmin xmax ymin ymax";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Event(FormEvent),
    Show,
    Help,
    /// Blank line.
    Nothing,
}

/// Parse one input line. The error string is meant for the user.
///
/// The command word is read first, so an '=' anywhere later on the line
/// ("set dx = 5", "mode = explicit") never changes which command runs.
pub fn parse_command(line: &str) -> Result<ConsoleCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ConsoleCommand::Nothing);
    }

    let split = line.find(|c: char| c.is_whitespace() || c == '=').unwrap_or(line.len());
    let (word, rest) = line.split_at(split);
    let rest = rest.trim_start();
    match word.to_ascii_lowercase().as_str() {
        "mode" => {
            let name = rest.strip_prefix('=').unwrap_or(rest).trim();
            GridMode::from_name(name)
                .map(|m| ConsoleCommand::Event(FormEvent::SelectMode(m)))
                .ok_or_else(|| format!("Unknown mode '{}'. Use default, resolution or explicit.", name))
        }
        "set" => {
            let (key, value) = match rest.split_once('=') {
                Some(pair) => pair,
                None => rest.split_once(char::is_whitespace).unwrap_or((rest, "")),
            };
            parse_field_edit(key, value)
        }
        "show" => Ok(ConsoleCommand::Show),
        "ok" | "commit" => Ok(ConsoleCommand::Event(FormEvent::Commit)),
        "cancel" | "quit" => Ok(ConsoleCommand::Event(FormEvent::Cancel)),
        "help" | "?" => Ok(ConsoleCommand::Help),
        _ => match line.split_once('=') {
            Some((key, value)) => parse_field_edit(key, value),
            None => Err(format!("Unknown command '{}'. Type 'help' for a list.", word)),
        },
    }
}

/// A typed value is taken whole: valid text is kept, other numeric
/// spellings ("1e3", ".5") are rewritten in plain digits, and anything else
/// is refused rather than stripped down to a different number.
fn parse_field_edit(key: &str, value: &str) -> Result<ConsoleCommand, String> {
    let field = GridField::from_key(key).ok_or_else(|| format!("Unknown field '{}'.", key.trim()))?;
    let value = value.trim();
    let text = normalize_entry(value, field.kind()).ok_or_else(|| match field.kind() {
        NumberKind::Integer => format!("'{}' is not a whole number; {} is unchanged.", value, field.key()),
        NumberKind::Real => format!("'{}' is not a number; {} is unchanged.", value, field.key()),
    })?;
    Ok(ConsoleCommand::Event(FormEvent::Edit(field, text)))
}

/// Feedback for an edit the form would ignore because `field` is not used
/// in the current mode.
pub fn disabled_message(form: &GridForm, field: GridField) -> Option<String> {
    if form.is_enabled(field) {
        return None;
    }
    Some(format!(
        "{} is disabled in {} mode; switch with 'mode <name>' first.",
        field.key(),
        form.mode().name()
    ))
}

/// Render the form, marking disabled fields.
pub fn render_form(form: &GridForm) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "Mode: {}", form.mode().name());
    for field in GridField::ALL {
        let state = if form.is_enabled(field) { "" } else { "  (disabled)" };
        let _ = writeln!(s, "  {:<10} {:<12}{}", field.label(), form.text(field), state);
    }
    s
}
