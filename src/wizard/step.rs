//! The four screens of the intake wizard.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::draft::Field;

/// One wizard screen. Ordered: `Intro < Personal < Financial < Documents`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Step {
    /// Service introduction.
    #[default]
    Intro = 1,
    /// Personal data.
    Personal = 2,
    /// Financial information.
    Financial = 3,
    /// Document upload and submission.
    Documents = 4,
}

impl Step {
    /// All steps in order.
    pub const ALL: [Step; 4] = [Step::Intro, Step::Personal, Step::Financial, Step::Documents];

    /// 1-based step number.
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Step for a 1-based number.
    pub fn from_number(n: u8) -> Option<Step> {
        match n {
            1 => Some(Step::Intro),
            2 => Some(Step::Personal),
            3 => Some(Step::Financial),
            4 => Some(Step::Documents),
            _ => None,
        }
    }

    /// Following step, or `None` at the last one.
    pub fn next(self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    /// Preceding step, or `None` at the first one.
    pub fn prev(self) -> Option<Step> {
        self.number().checked_sub(1).and_then(Step::from_number)
    }

    /// Screen heading.
    pub fn title(self) -> &'static str {
        match self {
            Step::Intro => "APA ITU KSP ?",
            Step::Personal => "Data Pribadi",
            Step::Financial => "Informasi Keuangan",
            Step::Documents => "Upload Dokumen",
        }
    }

    /// Draft fields edited on this screen.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Step::Intro | Step::Documents => &[],
            Step::Personal => &[
                Field::FullName,
                Field::Nik,
                Field::Phone,
                Field::Email,
                Field::Address,
            ],
            Step::Financial => &[Field::Occupation, Field::Income, Field::Purpose],
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl TryFrom<u8> for Step {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Step::from_number(n).ok_or_else(|| format!("step must be 1-4, got {n}"))
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_round_trip() {
        for step in Step::ALL {
            assert_eq!(Step::from_number(step.number()), Some(step));
        }
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(5), None);
    }

    #[test]
    fn test_next_and_prev_stop_at_ends() {
        assert_eq!(Step::Intro.prev(), None);
        assert_eq!(Step::Intro.next(), Some(Step::Personal));
        assert_eq!(Step::Documents.next(), None);
        assert_eq!(Step::Documents.prev(), Some(Step::Financial));
    }

    #[test]
    fn test_fields_cover_every_field_once() {
        let mut seen: Vec<Field> = Step::ALL.iter().flat_map(|s| s.fields()).copied().collect();
        seen.sort_by_key(|f| f.key());
        seen.dedup();
        assert_eq!(seen.len(), Field::ALL.len());
    }

    #[test]
    fn test_serde_as_number() {
        assert_eq!(serde_json::to_string(&Step::Financial).unwrap(), "3");
        let step: Step = serde_json::from_str("2").unwrap();
        assert_eq!(step, Step::Personal);
        assert!(serde_json::from_str::<Step>("9").is_err());
    }
}
