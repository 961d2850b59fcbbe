//! Form state behind the terminal UI.
//!
//! Holds the wizard plus the bits that only exist on screen (focus, typed
//! file paths, status line, acknowledgment popup). Key handling lives here
//! and never touches the terminal, so it is tested directly.

use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::draft::{options, Field, FieldKind, FileSlot};
use crate::wizard::{Acknowledgment, Action, Outcome, Step, WizardPolicy, WizardState};

/// Extensions the file picker offers.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Whether a path looks like an image by its extension.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// A focusable element of the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// "Mulai Pengajuan" on the intro step.
    Start,
    /// A text or choice input.
    Input(Field),
    /// A file slot with its path entry.
    File(FileSlot),
    /// Terms and conditions checkbox.
    Terms,
    /// "Kembali".
    Back,
    /// "Lanjut".
    Next,
    /// "Submit Pengajuan".
    Submit,
}

impl Control {
    /// Controls of a step, in focus order.
    pub fn for_step(step: Step) -> Vec<Control> {
        match step {
            Step::Intro => vec![Control::Start],
            Step::Personal | Step::Financial => step
                .fields()
                .iter()
                .map(|f| Control::Input(*f))
                .chain([Control::Back, Control::Next])
                .collect(),
            Step::Documents => vec![
                Control::File(FileSlot::Ktp),
                Control::File(FileSlot::Selfie),
                Control::Terms,
                Control::Back,
                Control::Submit,
            ],
        }
    }

    /// Whether printable keys are captured as text by this control.
    fn takes_text(self) -> bool {
        match self {
            Control::Input(field) => !matches!(field.kind(), FieldKind::Choice(_)),
            Control::File(_) => true,
            _ => false,
        }
    }
}

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Confirmation.
    Info,
    /// Something was refused.
    Error,
}

/// One-line message under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// Severity.
    pub kind: StatusKind,
    /// Message text.
    pub text: String,
}

/// Everything the terminal UI draws.
#[derive(Debug)]
pub struct FormState {
    /// Wizard being driven.
    pub wizard: WizardState,
    /// Submission policy.
    pub policy: WizardPolicy,
    /// Index into [`Control::for_step`] of the current step.
    pub focus: usize,
    /// Paths being typed into the two file slots.
    pub file_inputs: [String; 2],
    /// Status line.
    pub status: Option<Status>,
    /// Popup after a successful submission.
    pub acknowledgment: Option<Acknowledgment>,
    /// Show the long intro copy on step 1.
    pub show_intro: bool,
    /// Set when the user asked to quit.
    pub should_quit: bool,
}

fn slot_index(slot: FileSlot) -> usize {
    match slot {
        FileSlot::Ktp => 0,
        FileSlot::Selfie => 1,
    }
}

impl FormState {
    /// Fresh form under `policy`.
    pub fn new(policy: WizardPolicy, show_intro: bool) -> Self {
        Self {
            wizard: WizardState::new(&policy),
            policy,
            focus: 0,
            file_inputs: Default::default(),
            status: None,
            acknowledgment: None,
            show_intro,
            should_quit: false,
        }
    }

    /// Controls of the current step.
    pub fn controls(&self) -> Vec<Control> {
        Control::for_step(self.wizard.step)
    }

    /// Focused control.
    pub fn focused(&self) -> Control {
        let controls = self.controls();
        controls[self.focus.min(controls.len() - 1)]
    }

    /// Path typed so far for a slot.
    pub fn file_input(&self, slot: FileSlot) -> &str {
        &self.file_inputs[slot_index(slot)]
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(Status {
            kind,
            text: text.into(),
        });
    }

    /// Run an action through the wizard and react to the outcome.
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        let wizard = std::mem::take(&mut self.wizard);
        let (next, outcome) = wizard.apply(&action, &self.policy);
        self.wizard = next;

        match &outcome {
            Outcome::Moved { .. } => {
                self.focus = 0;
                self.status = None;
            }
            Outcome::Submitted(ack) => {
                self.focus = 0;
                self.status = None;
                if self.policy.clear_draft {
                    self.file_inputs = Default::default();
                }
                self.acknowledgment = Some(ack.clone());
            }
            Outcome::Blocked { .. } => {
                self.set_status(
                    StatusKind::Error,
                    "Setujui syarat dan ketentuan terlebih dahulu",
                );
            }
            Outcome::Updated | Outcome::Ignored => {}
        }
        outcome
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.controls().len();
    }

    fn focus_prev(&mut self) {
        let len = self.controls().len();
        self.focus = (self.focus + len - 1) % len;
    }

    /// Accept the typed path for `slot` if it names an existing image.
    pub fn pick_file(&mut self, slot: FileSlot) {
        let raw = self.file_input(slot).trim().to_string();
        if raw.is_empty() {
            self.set_status(StatusKind::Error, "Ketik path file terlebih dahulu");
            return;
        }
        let path = Path::new(&raw);
        if !is_image_path(path) {
            tracing::debug!(slot = slot.key(), path = %raw, "rejected non-image pick");
            self.set_status(StatusKind::Error, "Format: JPG, PNG (Max 5MB)");
            return;
        }
        if !path.is_file() {
            self.set_status(StatusKind::Error, format!("File tidak ditemukan: {raw}"));
            return;
        }
        self.dispatch(Action::SetFile {
            slot,
            path: path.to_path_buf(),
        });
        self.file_inputs[slot_index(slot)].clear();
        let name = self
            .wizard
            .draft
            .file(slot)
            .map(|f| f.name.clone())
            .unwrap_or_default();
        self.set_status(StatusKind::Info, format!("{}: {name}", slot.label()));
    }

    fn edit_text(&mut self, field: Field, edit: impl FnOnce(&mut String)) {
        let mut value = self.wizard.draft.get(field).to_string();
        edit(&mut value);
        self.dispatch(Action::SetField { field, value });
    }

    fn activate(&mut self) {
        match self.focused() {
            Control::Start | Control::Next => {
                self.dispatch(Action::Advance);
            }
            Control::Back => {
                let target = self.wizard.step.number().saturating_sub(1);
                self.dispatch(Action::GoToStep { step: target });
            }
            Control::Submit => {
                self.dispatch(Action::Submit);
            }
            Control::Terms => {
                self.dispatch(Action::ToggleTerms);
            }
            Control::File(slot) => self.pick_file(slot),
            Control::Input(field) if field.kind() == FieldKind::Multiline => {
                self.edit_text(field, |value| value.push('\n'))
            }
            Control::Input(_) => self.focus_next(),
        }
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.should_quit = true;
            return;
        }

        if self.acknowledgment.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.acknowledgment = None;
            }
            return;
        }

        let focused = self.focused();
        let step = self.wizard.step;

        if ctrl {
            match key.code {
                KeyCode::Char('n') => {
                    self.dispatch(Action::Advance);
                }
                KeyCode::Char('p') => {
                    self.dispatch(Action::Retreat);
                }
                KeyCode::Char('s') if step == Step::Documents => {
                    self.dispatch(Action::Submit);
                }
                KeyCode::Char('s') => {
                    self.set_status(StatusKind::Error, "Submit tersedia di langkah 4");
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::PageDown => {
                self.dispatch(Action::Advance);
            }
            KeyCode::PageUp => {
                self.dispatch(Action::Retreat);
            }
            KeyCode::Enter => self.activate(),
            KeyCode::Esc => self.status = None,
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                match focused {
                    Control::Input(field) => {
                        if let FieldKind::Choice(list) = field.kind() {
                            let value = options::cycle(list, self.wizard.draft.get(field), forward);
                            self.dispatch(Action::SetField {
                                field,
                                value: value.to_string(),
                            });
                        }
                    }
                    _ if step == Step::Intro => {
                        self.dispatch(Action::NudgeLoanAmount {
                            steps: if forward { 1 } else { -1 },
                        });
                    }
                    _ => {}
                }
            }
            KeyCode::Backspace => match focused {
                Control::Input(field) if focused.takes_text() => {
                    self.edit_text(field, |value| {
                        value.pop();
                    })
                }
                Control::File(slot) => {
                    self.file_inputs[slot_index(slot)].pop();
                }
                _ => {}
            },
            KeyCode::Char(c @ ('[' | ']')) if !focused.takes_text() => {
                self.dispatch(Action::NudgeLoanAmount {
                    steps: if c == ']' { 1 } else { -1 },
                });
            }
            KeyCode::Char(' ') if step == Step::Documents && !focused.takes_text() => {
                self.dispatch(Action::ToggleTerms);
            }
            KeyCode::Char(c) => match focused {
                Control::Input(field) if focused.takes_text() => {
                    self.edit_text(field, |value| value.push(c))
                }
                Control::File(slot) => self.file_inputs[slot_index(slot)].push(c),
                _ => {}
            },
            _ => {}
        }
    }
}
