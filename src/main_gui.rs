// ============================================================================
// MAIN_GUI.RS - Grid Definition Dialog (FLTK)
// ============================================================================
//
// A modal dialog over the same session loop as the terminal front end.
// Widget callbacks only send messages; next_event() pumps the FLTK event
// loop until one arrives, so the session reads like a blocking call.
//
// Build with: cargo build --bin gui --features gui
// ============================================================================

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use fltk::{
    app,
    button::{Button, RadioRoundButton},
    dialog,
    enums::{Align, Color, Event, FrameType},
    frame::Frame,
    group::Flex,
    input::Input,
    prelude::*,
    window::Window,
};

use gridspec::coercion::{NumberKind, is_valid_partial};
use gridspec::{
    FormEvent, FormFrontend, GridField, GridForm, GridMode, SessionOutcome, Settings,
    ValidationError, init_logging, run_form, widget_edits,
};

const WIN_W: i32 = 380;
const WIN_H: i32 = 440;
const ROW_H: i32 = 26;
const LABEL_W: i32 = 90;

#[derive(Debug, Clone, Copy)]
enum GuiMsg {
    Mode(GridMode),
    Ok,
    Cancel,
}

// ─── Numeric Input Filtering ─────────────────────────────────────────────────
//
// Revert-based validation using handle() instead of set_callback(), so it
// keeps working if a callback is attached later. On every event that may
// have changed the text, keep it if it is a valid number-in-progress and
// otherwise restore the last valid text.

fn attach_numeric_validation(input: &mut Input, kind: NumberKind) {
    let last_valid = Rc::new(RefCell::new(input.value()));
    input.handle(move |field, ev| match ev {
        Event::KeyUp | Event::Paste | Event::Shortcut | Event::Unfocus => {
            let current = field.value();
            let lv = last_valid.borrow().clone();
            if current == lv {
                return false;
            }
            if is_valid_partial(&current, kind) {
                *last_valid.borrow_mut() = current;
            } else {
                let restore = field.position().saturating_sub(1);
                field.set_value(&lv);
                field.set_position(restore).ok();
            }
            false // don't consume
        }
        _ => false,
    });
}

fn field_tooltip(field: GridField) -> &'static str {
    match field {
        GridField::XSpacing => "Cell width along X.\nMust be greater than zero.",
        GridField::YSpacing => "Cell height along Y.\nMust be greater than zero.",
        GridField::Rows => "Number of cells along Y.",
        GridField::Cols => "Number of cells along X.",
        GridField::XMin | GridField::XMax => "Left/right edge of the grid.\nX max must exceed X min.",
        GridField::YMin | GridField::YMax => "Bottom/top edge of the grid.\nY max must exceed Y min.",
    }
}

// ─── Dialog ──────────────────────────────────────────────────────────────────

struct GridDialog {
    window: Window,
    radios: Vec<(GridMode, RadioRoundButton)>,
    inputs: Vec<(GridField, Input)>,
    receiver: app::Receiver<GuiMsg>,
    pending: VecDeque<FormEvent>,
}

impl GridDialog {
    fn build(form: &GridForm) -> Self {
        let (sender, receiver) = app::channel::<GuiMsg>();

        let mut window = Window::default()
            .with_size(WIN_W, WIN_H)
            .with_label("Interpolation Grid");
        window.make_modal(true);

        let mut col = Flex::default_fill().column();
        col.set_margin(12);
        col.set_pad(4);

        let mut lbl_mode = Frame::default().with_label("GRID DEFINITION");
        lbl_mode.set_label_size(11);
        lbl_mode.set_align(Align::Inside | Align::Left);
        col.fixed(&lbl_mode, 18);

        let mut radios = Vec::new();
        for (mode, label) in [
            (GridMode::Default, "Default (100 x 100 over point extent)"),
            (GridMode::Resolution, "Grid spacing"),
            (GridMode::Explicit, "Explicit geometry"),
        ] {
            let mut radio = RadioRoundButton::default().with_label(label);
            radio.emit(sender, GuiMsg::Mode(mode));
            col.fixed(&radio, ROW_H);
            radios.push((mode, radio));
        }

        let mut sep = Frame::default();
        sep.set_frame(FrameType::FlatBox);
        sep.set_color(Color::from_hex(0x585b70));
        col.fixed(&sep, 1);

        let mut inputs = Vec::new();
        for field in GridField::ALL {
            let mut row = Flex::default().row();
            let mut lbl = Frame::default().with_label(field.label());
            lbl.set_align(Align::Inside | Align::Left);
            row.fixed(&lbl, LABEL_W);

            let mut input = Input::default();
            input.set_value(form.text(field));
            input.set_tooltip(field_tooltip(field));
            attach_numeric_validation(&mut input, field.kind());
            row.end();
            col.fixed(&row, ROW_H);
            inputs.push((field, input));
        }

        Frame::default(); // spacer

        let mut btn_row = Flex::default().row();
        Frame::default();
        let mut btn_ok = Button::default().with_label("OK");
        btn_ok.emit(sender, GuiMsg::Ok);
        btn_row.fixed(&btn_ok, 80);
        let mut btn_cancel = Button::default().with_label("Cancel");
        btn_cancel.emit(sender, GuiMsg::Cancel);
        btn_row.fixed(&btn_cancel, 80);
        btn_row.end();
        col.fixed(&btn_row, 30);

        col.end();
        window.end();

        // Close button and Escape both land here.
        window.set_callback(move |_| sender.send(GuiMsg::Cancel));

        Self {
            window,
            radios,
            inputs,
            receiver,
            pending: VecDeque::new(),
        }
    }

    /// Bring widgets in line with the form after the session applied the
    /// previous event.
    fn sync(&mut self, form: &GridForm) {
        for (mode, radio) in self.radios.iter_mut() {
            radio.set_value(*mode == form.mode());
        }
        for (field, input) in self.inputs.iter_mut() {
            if form.is_enabled(*field) {
                input.activate();
            } else {
                input.deactivate();
            }
            if input.value() != form.text(*field) && form.is_enabled(*field) {
                input.set_value(form.text(*field));
            }
        }
        self.window.redraw();
    }
}

impl FormFrontend for GridDialog {
    fn next_event(&mut self, form: &GridForm) -> Option<FormEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        self.sync(form);

        while app::wait() {
            let Some(msg) = self.receiver.recv() else {
                continue;
            };
            let follow_up = match msg {
                GuiMsg::Mode(mode) => FormEvent::SelectMode(mode),
                GuiMsg::Ok => FormEvent::Commit,
                GuiMsg::Cancel => return Some(FormEvent::Cancel),
            };
            // Typed text only reaches the form here, so flush it before a
            // mode switch can re-seed the inputs from the form.
            let widgets = self.inputs.iter().map(|(field, input)| (*field, input.value()));
            self.pending.extend(widget_edits(form, widgets));
            self.pending.push_back(follow_up);
            return self.pending.pop_front();
        }
        None
    }

    fn show_error(&mut self, error: &ValidationError) {
        dialog::alert_default(&format!("{}\n\n{}", error.title(), error.message()));
    }
}

fn main() {
    init_logging();

    let _app = app::App::default().with_scheme(app::Scheme::Gtk);

    let mut form = Settings::load_or_create().seed_form();
    let mut dialog = GridDialog::build(&form);
    dialog.window.show();

    let outcome = run_form(&mut dialog, &mut form);
    dialog.window.hide();

    match outcome {
        SessionOutcome::Committed(descriptor) => {
            Settings::from_form(&form).save();
            println!("Grid: {}", descriptor);
        }
        SessionOutcome::Cancelled => println!("Cancelled; grid unchanged."),
    }
}
