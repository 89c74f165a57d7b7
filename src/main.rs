// ============================================================================
// MAIN.RS - Terminal Grid Definition
// ============================================================================
//
// Reads commands from stdin until the grid is accepted or the session is
// cancelled. The last form is restored from gridspec.ini at start and saved
// back after a successful commit.
//
// Usage:
//   gridprompt            restore the last form
//   gridprompt --fresh    start from an empty Default form
//
// Set RUST_LOG=debug to see every edit and mode switch.
// ============================================================================

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::warn;

use gridspec::console::{ConsoleCommand, HELP, disabled_message, parse_command, render_form};
use gridspec::{
    FormEvent, FormFrontend, GridForm, SessionOutcome, Settings, ValidationError, init_logging,
    run_form,
};

/// Front end reading line commands from any buffered reader.
struct Terminal<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    fn prompt(&mut self) -> io::Result<Option<String>> {
        write!(self.output, "grid> ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> FormFrontend for Terminal<R, W> {
    fn next_event(&mut self, form: &GridForm) -> Option<FormEvent> {
        loop {
            let line = match self.prompt() {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    warn!("stdin closed: {}", e);
                    return None;
                }
            };
            match parse_command(&line) {
                Ok(ConsoleCommand::Event(FormEvent::Edit(field, _))) if !form.is_enabled(field) => {
                    let msg = disabled_message(form, field).unwrap_or_default();
                    let _ = writeln!(self.output, "{}", msg);
                }
                Ok(ConsoleCommand::Event(event)) => return Some(event),
                Ok(ConsoleCommand::Show) => {
                    let _ = write!(self.output, "{}", render_form(form));
                }
                Ok(ConsoleCommand::Help) => {
                    let _ = writeln!(self.output, "{}", HELP);
                }
                Ok(ConsoleCommand::Nothing) => {}
                Err(msg) => {
                    let _ = writeln!(self.output, "{}", msg);
                }
            }
        }
    }

    fn show_error(&mut self, error: &ValidationError) {
        let _ = writeln!(self.output, "{}: {}", error.title(), error.message());
    }
}

fn main() -> Result<()> {
    init_logging();

    let fresh = std::env::args().skip(1).any(|a| a == "--fresh");
    let mut form = if fresh {
        GridForm::new(None)
    } else {
        Settings::load_or_create().seed_form()
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut terminal = Terminal {
        input: stdin.lock(),
        output: stdout.lock(),
    };

    writeln!(terminal.output, "{}", HELP).context("Failed to write to stdout")?;
    write!(terminal.output, "{}", render_form(&form)).context("Failed to write to stdout")?;

    match run_form(&mut terminal, &mut form) {
        SessionOutcome::Committed(descriptor) => {
            Settings::from_form(&form).save();
            writeln!(terminal.output, "Grid: {}", descriptor).context("Failed to write to stdout")?;
        }
        SessionOutcome::Cancelled => {
            writeln!(terminal.output, "Cancelled; grid unchanged.").context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
