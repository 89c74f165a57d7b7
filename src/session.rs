//! The modal wait: drive a [`GridForm`] from a front end until the user
//! commits a valid grid or cancels.

use tracing::{debug, warn};

use crate::descriptor::GridDescriptor;
use crate::error::ValidationError;
use crate::form::GridForm;
use crate::mode::{GridField, GridMode};
use crate::resolver::SessionOutcome;

/// One user action, as reported by a front end.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    SelectMode(GridMode),
    Edit(GridField, String),
    Commit,
    Cancel,
}

/// The presentation side of a session (terminal, GUI, test script).
pub trait FormFrontend {
    /// Block until the user does something. `None` means the front end
    /// went away (window closed, stdin hit EOF) and counts as Cancel.
    fn next_event(&mut self, form: &GridForm) -> Option<FormEvent>;

    /// Show a failed commit. The session continues afterwards.
    fn show_error(&mut self, error: &ValidationError);
}

/// Edit events for widget text the form has not seen yet.
///
/// Front ends that hold their own input widgets call this before any event
/// that reads or replaces field text (a mode switch, a commit), so typing
/// that never produced an edit event still reaches the form. Disabled and
/// unchanged fields produce nothing.
pub fn widget_edits(
    form: &GridForm,
    widgets: impl IntoIterator<Item = (GridField, String)>,
) -> Vec<FormEvent> {
    widgets
        .into_iter()
        .filter(|(field, text)| form.is_enabled(*field) && form.text(*field) != text.as_str())
        .map(|(field, text)| FormEvent::Edit(field, text))
        .collect()
}

/// Run a session seeded from `seed` until it ends.
pub fn run_session<F: FormFrontend>(
    frontend: &mut F,
    seed: Option<&GridDescriptor>,
) -> SessionOutcome {
    let mut form = GridForm::new(seed);
    run_form(frontend, &mut form)
}

/// Like [`run_session`] but on a caller-built form, so the caller can
/// inspect the final field text (e.g. to persist it).
pub fn run_form<F: FormFrontend>(frontend: &mut F, form: &mut GridForm) -> SessionOutcome {
    loop {
        let Some(event) = frontend.next_event(form) else {
            debug!("front end closed");
            return form.cancel();
        };
        match event {
            FormEvent::SelectMode(mode) => form.select_mode(mode),
            FormEvent::Edit(field, text) => {
                form.edit(field, &text);
            }
            FormEvent::Commit => match form.commit() {
                Ok(descriptor) => return SessionOutcome::Committed(descriptor),
                Err(err) => {
                    warn!(title = err.title(), "{}", err.message());
                    frontend.show_error(&err);
                }
            },
            FormEvent::Cancel => return form.cancel(),
        }
    }
}
