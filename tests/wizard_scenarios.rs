//! End-to-end wizard scenarios through the public library API.

use kamikaya::draft::{FileSlot, MAX_LOAN_AMOUNT, MIN_LOAN_AMOUNT};
use kamikaya::wizard::{Action, BlockReason, Outcome, Step, WizardPolicy, WizardState};
use kamikaya::{format_rupiah, Field};

#[test]
fn test_fields_survive_navigation() {
    let state = WizardState::default()
        .advance()
        .set_field(Field::FullName, "Budi")
        .set_field(Field::Nik, "1234567890123456")
        .advance()
        .go_to_step(2);

    assert_eq!(state.step, Step::Personal);
    assert_eq!(state.draft.full_name, "Budi");
    assert_eq!(state.draft.nik, "1234567890123456");
}

#[test]
fn test_last_file_wins() {
    let state = WizardState::default()
        .set_file(FileSlot::Ktp, "fileA.png")
        .set_file(FileSlot::Ktp, "fileB.png");
    assert_eq!(state.draft.file(FileSlot::Ktp).unwrap().name, "fileB.png");
    assert!(state.draft.file(FileSlot::Selfie).is_none());
}

#[test]
fn test_submit_without_terms_by_default() {
    let policy = WizardPolicy::default();
    let state = WizardState::new(&policy).advance().advance().advance();
    assert_eq!(state.step, Step::Documents);
    assert!(!state.terms_accepted);

    let (state, outcome) = state.submit_with(&policy);
    assert_eq!(state.step, Step::Intro);
    assert!(matches!(outcome, Outcome::Submitted(_)));
}

#[test]
fn test_require_terms_policy() {
    let policy = WizardPolicy {
        require_terms: true,
        ..WizardPolicy::default()
    };
    let actions = [
        Action::Advance,
        Action::Advance,
        Action::Advance,
        Action::Submit,
        Action::ToggleTerms,
        Action::Submit,
    ];
    let (state, outcomes) = WizardState::new(&policy).apply_all(&actions, &policy);

    assert_eq!(
        outcomes[3],
        Outcome::Blocked {
            reason: BlockReason::TermsNotAccepted
        }
    );
    assert!(matches!(outcomes[5], Outcome::Submitted(_)));
    assert_eq!(state.step, Step::Intro);
    assert_eq!(state.submissions, 1);
}

#[test]
fn test_step_stays_in_bounds_for_any_sequence() {
    let policy = WizardPolicy::default();
    let mut state = WizardState::new(&policy);
    // Deterministic pseudo-random walk.
    let mut seed: u32 = 0x2545_f491;
    for _ in 0..500 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let action = if seed % 2 == 0 {
            Action::Advance
        } else {
            Action::Retreat
        };
        state = state.apply(&action, &policy).0;
        assert!((1..=4).contains(&state.step.number()));
    }
}

#[test]
fn test_slider_always_on_grid() {
    let policy = WizardPolicy::default();
    let mut state = WizardState::new(&policy);
    let requests: [i64; 7] = [-3, 40, 7, -100, 1, 55, -2];
    for (i, steps) in requests.iter().enumerate() {
        let action = if i % 2 == 0 {
            Action::NudgeLoanAmount { steps: *steps }
        } else {
            Action::SetLoanAmount {
                amount: (steps.unsigned_abs()) * 987_654,
            }
        };
        state = state.apply(&action, &policy).0;
        let value = state.draft.loan_amount.value();
        assert_eq!(value % 1_000_000, 0);
        assert!((MIN_LOAN_AMOUNT..=MAX_LOAN_AMOUNT).contains(&value));
    }
}

#[test]
fn test_rupiah_bounds() {
    assert_eq!(format_rupiah(1_000_000), "Rp 1.000.000");
    assert_eq!(format_rupiah(50_000_000), "Rp 50.000.000");
}
