//! Bounded loan amount chosen with the slider.

use serde::{Deserialize, Serialize};

/// Smallest amount the slider allows.
pub const MIN_LOAN_AMOUNT: u64 = 1_000_000;
/// Largest amount the slider allows.
pub const MAX_LOAN_AMOUNT: u64 = 50_000_000;
/// Slider granularity.
pub const LOAN_AMOUNT_STEP: u64 = 1_000_000;
/// Amount shown on first render.
pub const DEFAULT_LOAN_AMOUNT: u64 = 20_000_000;

/// A loan amount that always sits on the slider grid.
///
/// Every constructor clamps to `[MIN_LOAN_AMOUNT, MAX_LOAN_AMOUNT]` and snaps
/// to the nearest multiple of `LOAN_AMOUNT_STEP`, the same way a range input
/// settles on its nearest tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct LoanAmount(u64);

impl LoanAmount {
    /// Number of ticks above the minimum the slider can reach.
    pub const MAX_TICKS: u64 = (MAX_LOAN_AMOUNT - MIN_LOAN_AMOUNT) / LOAN_AMOUNT_STEP;

    /// Snap an arbitrary amount onto the slider grid.
    pub fn new(raw: u64) -> Self {
        let clamped = raw.clamp(MIN_LOAN_AMOUNT, MAX_LOAN_AMOUNT);
        let offset = clamped - MIN_LOAN_AMOUNT;
        let ticks = (offset + LOAN_AMOUNT_STEP / 2) / LOAN_AMOUNT_STEP;
        Self::from_ticks(ticks)
    }

    /// Build from a tick index, clamping past either end.
    pub fn from_ticks(ticks: u64) -> Self {
        Self(MIN_LOAN_AMOUNT + ticks.min(Self::MAX_TICKS) * LOAN_AMOUNT_STEP)
    }

    /// The amount in Rupiah.
    pub fn value(self) -> u64 {
        self.0
    }

    /// Tick index of this amount, 0 at the minimum.
    pub fn ticks(self) -> u64 {
        (self.0 - MIN_LOAN_AMOUNT) / LOAN_AMOUNT_STEP
    }

    /// Move the slider by `steps` ticks, stopping at either end.
    #[must_use]
    pub fn nudge(self, steps: i64) -> Self {
        let target = self.ticks() as i64 + steps;
        Self::from_ticks(target.clamp(0, Self::MAX_TICKS as i64) as u64)
    }

    /// Slider position in `[0.0, 1.0]`.
    pub fn ratio(self) -> f64 {
        self.ticks() as f64 / Self::MAX_TICKS as f64
    }

    /// Whether `raw` is already a valid slider value.
    pub fn is_on_grid(raw: u64) -> bool {
        (MIN_LOAN_AMOUNT..=MAX_LOAN_AMOUNT).contains(&raw)
            && (raw - MIN_LOAN_AMOUNT) % LOAN_AMOUNT_STEP == 0
    }
}

impl Default for LoanAmount {
    fn default() -> Self {
        Self(DEFAULT_LOAN_AMOUNT)
    }
}

impl From<u64> for LoanAmount {
    fn from(raw: u64) -> Self {
        Self::new(raw)
    }
}

impl From<LoanAmount> for u64 {
    fn from(amount: LoanAmount) -> Self {
        amount.0
    }
}
