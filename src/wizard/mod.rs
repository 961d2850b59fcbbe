//! Wizard form controller.
//!
//! The whole form is one [`WizardState`] value. Every user interaction is an
//! [`Action`], and [`WizardState::apply`] turns the current state plus an
//! action into the next state and an [`Outcome`]. Nothing here touches a
//! terminal, so the state machine is exercised directly by tests and by
//! `kamikaya replay`.
//!
//! Transitions:
//!
//! ```text
//! Intro --advance--> Personal --advance--> Financial --advance--> Documents
//!   ^  <--retreat--          <--retreat--            <--retreat--    |
//!   +-------------------------------submit---------------------------+
//! ```

mod step;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SubmissionConfig;
use crate::draft::{ApplicationDraft, Field, FileHandle, FileSlot, LoanAmount};

pub use step::Step;

/// Default acknowledgment shown after submission.
pub const DEFAULT_ACKNOWLEDGMENT: &str =
    "Pengajuan pinjaman berhasil disubmit! Tim kami akan menghubungi Anda dalam 1x24 jam.";

/// A single user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Replace one text field.
    SetField {
        /// Field to update.
        field: Field,
        /// New value, unvalidated.
        value: String,
    },
    /// Put the slider at `amount` (snapped onto the grid).
    SetLoanAmount {
        /// Requested amount in Rupiah.
        amount: u64,
    },
    /// Move the slider by a number of ticks.
    NudgeLoanAmount {
        /// Ticks to move; negative moves down.
        steps: i64,
    },
    /// Pick a file for a slot.
    SetFile {
        /// Target slot.
        slot: FileSlot,
        /// Picked file.
        path: PathBuf,
    },
    /// Next step.
    Advance,
    /// Previous step.
    Retreat,
    /// Jump back to an earlier step.
    GoToStep {
        /// 1-based target step.
        step: u8,
    },
    /// Flip the terms-and-conditions checkbox.
    ToggleTerms,
    /// Submit the application.
    Submit,
}

/// Why a submission was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// Terms must be accepted first.
    TermsNotAccepted,
}

/// Notice produced by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgment {
    /// Reference the applicant can quote.
    pub reference: String,
    /// Text shown to the applicant.
    pub message: String,
    /// Amount that was requested.
    pub loan_amount: LoanAmount,
    /// When the submission happened.
    pub submitted_at: DateTime<Utc>,
}

impl Acknowledgment {
    fn issue(message: &str, draft: &ApplicationDraft, sequence: u32) -> Self {
        let submitted_at = Utc::now();
        Self {
            reference: format!(
                "KMK-{}-{:03}",
                submitted_at.format("%Y%m%d%H%M%S"),
                sequence
            ),
            message: message.to_string(),
            loan_amount: draft.loan_amount,
            submitted_at,
        }
    }
}

/// Result of applying an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Draft or checkbox changed; step unchanged.
    Updated,
    /// Step changed.
    Moved {
        /// Step before the action.
        from: Step,
        /// Step after the action.
        to: Step,
    },
    /// Nothing to do (bounds, forward jumps, unknown steps).
    Ignored,
    /// Submission accepted; the step is back at the start.
    Submitted(Acknowledgment),
    /// Submission refused by policy.
    Blocked {
        /// What is missing.
        reason: BlockReason,
    },
}

/// Product switches that shape submission.
///
/// The defaults reproduce the permissive form: the terms box does not gate
/// submission and the draft survives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardPolicy {
    /// Refuse submission while the terms box is unchecked.
    pub require_terms: bool,
    /// Reset the draft on submission, not just the step.
    pub clear_draft: bool,
    /// Acknowledgment text.
    pub acknowledgment: String,
    /// Slider position for a fresh draft.
    pub default_amount: LoanAmount,
}

impl Default for WizardPolicy {
    fn default() -> Self {
        Self {
            require_terms: false,
            clear_draft: false,
            acknowledgment: DEFAULT_ACKNOWLEDGMENT.to_string(),
            default_amount: LoanAmount::default(),
        }
    }
}

impl WizardPolicy {
    /// Policy from the configured submission and loan settings.
    pub fn from_config(submission: &SubmissionConfig, default_amount: LoanAmount) -> Self {
        Self {
            require_terms: submission.require_terms,
            clear_draft: submission.clear_draft,
            acknowledgment: submission.acknowledgment.clone(),
            default_amount,
        }
    }
}

/// Complete form state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    /// Screen being shown.
    pub step: Step,
    /// Entered data.
    pub draft: ApplicationDraft,
    /// Terms checkbox on the documents screen.
    pub terms_accepted: bool,
    /// Successful submissions so far in this session.
    pub submissions: u32,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(&WizardPolicy::default())
    }
}

impl WizardState {
    /// Fresh form at the first step.
    pub fn new(policy: &WizardPolicy) -> Self {
        Self {
            step: Step::Intro,
            draft: ApplicationDraft::with_loan_amount(policy.default_amount),
            terms_accepted: false,
            submissions: 0,
        }
    }

    /// Apply one action, returning the next state and what happened.
    #[must_use]
    pub fn apply(mut self, action: &Action, policy: &WizardPolicy) -> (Self, Outcome) {
        let outcome = match action {
            Action::SetField { field, value } => {
                self.draft.set(*field, value.as_str());
                Outcome::Updated
            }
            Action::SetLoanAmount { amount } => {
                self.draft.loan_amount = LoanAmount::new(*amount);
                Outcome::Updated
            }
            Action::NudgeLoanAmount { steps } => {
                self.draft.loan_amount = self.draft.loan_amount.nudge(*steps);
                Outcome::Updated
            }
            Action::SetFile { slot, path } => {
                self.draft.set_file(*slot, FileHandle::from_path(path));
                Outcome::Updated
            }
            Action::Advance => self.move_to(self.step.next()),
            Action::Retreat => self.move_to(self.step.prev()),
            Action::GoToStep { step } => {
                let target = Step::from_number(*step)
                    .filter(|target| *target != Step::Documents && *target < self.step);
                self.move_to(target)
            }
            Action::ToggleTerms => {
                self.terms_accepted = !self.terms_accepted;
                Outcome::Updated
            }
            Action::Submit => self.submit(policy),
        };
        (self, outcome)
    }

    /// Apply a sequence of actions, collecting every outcome.
    pub fn apply_all<'a>(
        self,
        actions: impl IntoIterator<Item = &'a Action>,
        policy: &WizardPolicy,
    ) -> (Self, Vec<Outcome>) {
        let mut outcomes = Vec::new();
        let state = actions.into_iter().fold(self, |state, action| {
            let (next, outcome) = state.apply(action, policy);
            outcomes.push(outcome);
            next
        });
        (state, outcomes)
    }

    /// Replace one text field.
    #[must_use]
    pub fn set_field(self, field: Field, value: impl Into<String>) -> Self {
        let action = Action::SetField {
            field,
            value: value.into(),
        };
        self.apply(&action, &WizardPolicy::default()).0
    }

    /// Pick a file for a slot.
    #[must_use]
    pub fn set_file(self, slot: FileSlot, path: impl Into<PathBuf>) -> Self {
        let action = Action::SetFile {
            slot,
            path: path.into(),
        };
        self.apply(&action, &WizardPolicy::default()).0
    }

    /// Next step, stopping at the last.
    #[must_use]
    pub fn advance(self) -> Self {
        self.apply(&Action::Advance, &WizardPolicy::default()).0
    }

    /// Previous step, stopping at the first.
    #[must_use]
    pub fn retreat(self) -> Self {
        self.apply(&Action::Retreat, &WizardPolicy::default()).0
    }

    /// Jump back to step `n` (1-3). Forward jumps are ignored.
    #[must_use]
    pub fn go_to_step(self, n: u8) -> Self {
        self.apply(&Action::GoToStep { step: n }, &WizardPolicy::default())
            .0
    }

    /// Submit under `policy`.
    #[must_use]
    pub fn submit_with(self, policy: &WizardPolicy) -> (Self, Outcome) {
        self.apply(&Action::Submit, policy)
    }

    fn move_to(&mut self, target: Option<Step>) -> Outcome {
        match target {
            Some(to) if to != self.step => {
                let from = self.step;
                self.step = to;
                tracing::debug!(from = from.number(), to = to.number(), "step changed");
                Outcome::Moved { from, to }
            }
            _ => Outcome::Ignored,
        }
    }

    fn submit(&mut self, policy: &WizardPolicy) -> Outcome {
        if policy.require_terms && !self.terms_accepted {
            tracing::info!("submission blocked: terms not accepted");
            return Outcome::Blocked {
                reason: BlockReason::TermsNotAccepted,
            };
        }

        self.submissions += 1;
        let ack = Acknowledgment::issue(&policy.acknowledgment, &self.draft, self.submissions);
        tracing::info!(
            reference = %ack.reference,
            loan_amount = ack.loan_amount.value(),
            filled = self.draft.filled_count(),
            terms_accepted = self.terms_accepted,
            "application submitted"
        );

        self.step = Step::Intro;
        self.terms_accepted = false;
        if policy.clear_draft {
            self.draft = ApplicationDraft::with_loan_amount(policy.default_amount);
        }
        Outcome::Submitted(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_step(n: u8) -> WizardState {
        let mut state = WizardState::default();
        for _ in 1..n {
            state = state.advance();
        }
        state
    }

    #[test]
    fn test_initial_state() {
        let state = WizardState::default();
        assert_eq!(state.step, Step::Intro);
        assert_eq!(state.draft, ApplicationDraft::default());
        assert!(!state.terms_accepted);
    }

    #[test]
    fn test_advance_moves_one_step() {
        let (state, outcome) =
            WizardState::default().apply(&Action::Advance, &WizardPolicy::default());
        assert_eq!(state.step, Step::Personal);
        assert_eq!(
            outcome,
            Outcome::Moved {
                from: Step::Intro,
                to: Step::Personal
            }
        );
    }

    #[test]
    fn test_advance_at_last_step_is_ignored() {
        let (state, outcome) = at_step(4).apply(&Action::Advance, &WizardPolicy::default());
        assert_eq!(state.step, Step::Documents);
        assert_eq!(outcome, Outcome::Ignored);
    }

    #[test]
    fn test_retreat_at_first_step_is_ignored() {
        let (state, outcome) =
            WizardState::default().apply(&Action::Retreat, &WizardPolicy::default());
        assert_eq!(state.step, Step::Intro);
        assert_eq!(outcome, Outcome::Ignored);
    }

    #[test]
    fn test_step_stays_in_range_for_any_navigation() {
        // Deterministic pseudo-random walk over advance/retreat.
        let mut state = WizardState::default();
        let mut seed: u32 = 0x9e37_79b9;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            state = if seed % 2 == 0 {
                state.advance()
            } else {
                state.retreat()
            };
            assert!((1..=4).contains(&state.step.number()));
        }
    }

    #[test]
    fn test_go_to_step_jumps_backward() {
        let state = at_step(4).go_to_step(1);
        assert_eq!(state.step, Step::Intro);
        let state = at_step(4).go_to_step(3);
        assert_eq!(state.step, Step::Financial);
    }

    #[test]
    fn test_go_to_step_ignores_forward_and_invalid() {
        let policy = WizardPolicy::default();
        let (state, outcome) = at_step(2).apply(&Action::GoToStep { step: 3 }, &policy);
        assert_eq!(state.step, Step::Personal);
        assert_eq!(outcome, Outcome::Ignored);

        let (state, outcome) = at_step(4).apply(&Action::GoToStep { step: 4 }, &policy);
        assert_eq!(state.step, Step::Documents);
        assert_eq!(outcome, Outcome::Ignored);

        let (_, outcome) = at_step(3).apply(&Action::GoToStep { step: 0 }, &policy);
        assert_eq!(outcome, Outcome::Ignored);
    }

    #[test]
    fn test_fields_survive_navigation() {
        let state = WizardState::default()
            .advance()
            .set_field(Field::FullName, "Budi")
            .set_field(Field::Nik, "1234567890123456");
        assert_eq!(state.step, Step::Personal);

        let state = state.advance();
        assert_eq!(state.step, Step::Financial);
        let state = state.go_to_step(2);
        assert_eq!(state.step, Step::Personal);
        assert_eq!(state.draft.full_name, "Budi");
        assert_eq!(state.draft.nik, "1234567890123456");
    }

    #[test]
    fn test_set_file_keeps_last_pick() {
        let state = at_step(4)
            .set_file(FileSlot::Ktp, "fileA.jpg")
            .set_file(FileSlot::Ktp, "fileB.jpg");
        assert_eq!(state.draft.file(FileSlot::Ktp).unwrap().name, "fileB.jpg");
        assert!(state.draft.file(FileSlot::Selfie).is_none());
    }

    #[test]
    fn test_slider_stays_on_grid() {
        let policy = WizardPolicy::default();
        let actions = [
            Action::SetLoanAmount { amount: 7_654_321 },
            Action::NudgeLoanAmount { steps: 100 },
            Action::NudgeLoanAmount { steps: -3 },
            Action::SetLoanAmount { amount: 0 },
            Action::NudgeLoanAmount { steps: 12 },
        ];
        let mut state = WizardState::default();
        for action in &actions {
            state = state.apply(action, &policy).0;
            let value = state.draft.loan_amount.value();
            assert_eq!(value % 1_000_000, 0);
            assert!((1_000_000..=50_000_000).contains(&value));
        }
        assert_eq!(state.draft.loan_amount.value(), 13_000_000);
    }

    #[test]
    fn test_submit_without_terms_is_accepted_by_default() {
        let state = at_step(4);
        assert!(!state.terms_accepted);
        let (state, outcome) = state.submit_with(&WizardPolicy::default());
        assert_eq!(state.step, Step::Intro);
        match outcome {
            Outcome::Submitted(ack) => {
                assert_eq!(ack.message, DEFAULT_ACKNOWLEDGMENT);
                assert!(ack.reference.starts_with("KMK-"));
                assert_eq!(ack.loan_amount.value(), 20_000_000);
            }
            other => panic!("expected submission, got {other:?}"),
        }
        assert_eq!(state.submissions, 1);
    }

    #[test]
    fn test_submit_keeps_draft_by_default() {
        let state = at_step(2).set_field(Field::FullName, "Siti").advance().advance();
        let (state, _) = state.submit_with(&WizardPolicy::default());
        assert_eq!(state.step, Step::Intro);
        assert_eq!(state.draft.full_name, "Siti");
    }

    #[test]
    fn test_submit_clears_draft_when_configured() {
        let policy = WizardPolicy {
            clear_draft: true,
            default_amount: LoanAmount::new(5_000_000),
            ..Default::default()
        };
        let state = WizardState::new(&policy)
            .set_field(Field::Email, "siti@example.com")
            .set_file(FileSlot::Selfie, "me.png");
        let (state, outcome) = state.submit_with(&policy);
        assert!(matches!(outcome, Outcome::Submitted(_)));
        assert_eq!(state.draft, ApplicationDraft::with_loan_amount(LoanAmount::new(5_000_000)));
    }

    #[test]
    fn test_require_terms_blocks_until_toggled() {
        let policy = WizardPolicy {
            require_terms: true,
            ..Default::default()
        };
        let (state, outcome) = at_step(4).submit_with(&policy);
        assert_eq!(
            outcome,
            Outcome::Blocked {
                reason: BlockReason::TermsNotAccepted
            }
        );
        assert_eq!(state.step, Step::Documents);

        let (state, _) = state.apply(&Action::ToggleTerms, &policy);
        let (state, outcome) = state.submit_with(&policy);
        assert!(matches!(outcome, Outcome::Submitted(_)));
        assert_eq!(state.step, Step::Intro);
        assert!(!state.terms_accepted);
    }

    #[test]
    fn test_apply_all_collects_outcomes() {
        let actions = vec![
            Action::Advance,
            Action::Advance,
            Action::Retreat,
            Action::Retreat,
            Action::Retreat,
        ];
        let (state, outcomes) =
            WizardState::default().apply_all(&actions, &WizardPolicy::default());
        assert_eq!(state.step, Step::Intro);
        assert_eq!(outcomes.len(), 5);
        assert_eq!(outcomes[4], Outcome::Ignored);
    }

    #[test]
    fn test_action_json_shape() {
        let json = r#"[
            {"action": "advance"},
            {"action": "set_field", "field": "fullName", "value": "Budi"},
            {"action": "set_file", "slot": "ktp_file", "path": "ktp.jpg"},
            {"action": "go_to_step", "step": 1},
            {"action": "submit"}
        ]"#;
        let actions: Vec<Action> = serde_json::from_str(json).unwrap();
        assert_eq!(actions.len(), 5);
        assert_eq!(
            actions[1],
            Action::SetField {
                field: Field::FullName,
                value: "Budi".into()
            }
        );
    }
}
