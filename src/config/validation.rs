//! ConfigField trait implementations for config sections.
//!
//! Values are checked here before they ever reach the config file.

use tracing_subscriber::EnvFilter;

use super::field::{parse_amount, parse_bool, ConfigField, FieldError};
use super::{LoanConfig, LoggingConfig, SubmissionConfig, TuiConfig};
use crate::draft::{format_rupiah, LoanAmount, MAX_LOAN_AMOUNT, MIN_LOAN_AMOUNT};

fn invalid(key: &str, expected: &str) -> FieldError {
    FieldError::InvalidValue {
        key: key.into(),
        expected: expected.into(),
    }
}

impl ConfigField for LoanConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "default_amount" => Some(self.default_amount.value().to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "default_amount" => {
                let expected = format!(
                    "multiple of 1000000 between {} and {}",
                    format_rupiah(MIN_LOAN_AMOUNT as i64),
                    format_rupiah(MAX_LOAN_AMOUNT as i64)
                );
                let raw = parse_amount(value).ok_or_else(|| invalid(key, &expected))?;
                if !LoanAmount::is_on_grid(raw) {
                    return Err(invalid(key, &expected));
                }
                self.default_amount = LoanAmount::new(raw);
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["default_amount"]
    }

    fn section_name() -> &'static str {
        "loan"
    }
}

impl ConfigField for SubmissionConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "require_terms" => Some(self.require_terms.to_string()),
            "clear_draft" => Some(self.clear_draft.to_string()),
            "acknowledgment" => Some(self.acknowledgment.clone()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "require_terms" => {
                self.require_terms =
                    parse_bool(value).map_err(|_| invalid(key, "true or false"))?;
                Ok(())
            }
            "clear_draft" => {
                self.clear_draft = parse_bool(value).map_err(|_| invalid(key, "true or false"))?;
                Ok(())
            }
            "acknowledgment" => {
                if value.trim().is_empty() {
                    return Err(invalid(key, "non-empty text"));
                }
                self.acknowledgment = value.to_string();
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["require_terms", "clear_draft", "acknowledgment"]
    }

    fn section_name() -> &'static str {
        "submission"
    }
}

impl ConfigField for TuiConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "tick_rate_ms" => Some(self.tick_rate_ms.to_string()),
            "show_intro" => Some(self.show_intro.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "tick_rate_ms" => {
                let rate: u64 = value
                    .parse()
                    .map_err(|_| invalid(key, "positive integer"))?;
                if rate == 0 {
                    return Err(invalid(key, "positive integer"));
                }
                self.tick_rate_ms = rate;
                Ok(())
            }
            "show_intro" => {
                self.show_intro = parse_bool(value).map_err(|_| invalid(key, "true or false"))?;
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["tick_rate_ms", "show_intro"]
    }

    fn section_name() -> &'static str {
        "tui"
    }
}

impl ConfigField for LoggingConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.level.clone()),
            "file" => Some(self.file.clone()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "level" => {
                EnvFilter::try_new(value)
                    .map_err(|_| invalid(key, "log filter such as info or kamikaya=debug"))?;
                self.level = value.to_string();
                Ok(())
            }
            "file" => {
                if value.trim().is_empty() {
                    return Err(invalid(key, "file path"));
                }
                self.file = value.to_string();
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["level", "file"]
    }

    fn section_name() -> &'static str {
        "logging"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_default_amount_accepts_grid_values() {
        let mut loan = LoanConfig::default();
        loan.set_field("default_amount", "35.000.000").unwrap();
        assert_eq!(loan.default_amount.value(), 35_000_000);
        assert_eq!(loan.get_field("default_amount").unwrap(), "35000000");
    }

    #[test]
    fn test_loan_default_amount_rejects_off_grid() {
        let mut loan = LoanConfig::default();
        assert!(loan.set_field("default_amount", "1500000").is_err());
        assert!(loan.set_field("default_amount", "60000000").is_err());
        assert!(loan.set_field("default_amount", "banyak").is_err());
        assert_eq!(loan.default_amount, LoanAmount::default());
    }

    #[test]
    fn test_submission_fields() {
        let mut submission = SubmissionConfig::default();
        submission.set_field("require_terms", "on").unwrap();
        submission.set_field("clear_draft", "true").unwrap();
        submission.set_field("acknowledgment", "Terima kasih!").unwrap();
        assert!(submission.require_terms);
        assert!(submission.clear_draft);
        assert_eq!(submission.get_field("acknowledgment").unwrap(), "Terima kasih!");
        assert!(submission.set_field("acknowledgment", "   ").is_err());
        assert!(submission.set_field("clear_draft", "perhaps").is_err());
    }

    #[test]
    fn test_tui_tick_rate_must_be_positive() {
        let mut tui = TuiConfig::default();
        assert!(tui.set_field("tick_rate_ms", "0").is_err());
        assert!(tui.set_field("tick_rate_ms", "-5").is_err());
        tui.set_field("tick_rate_ms", "50").unwrap();
        assert_eq!(tui.tick_rate_ms, 50);
    }

    #[test]
    fn test_logging_level_is_checked() {
        let mut logging = LoggingConfig::default();
        logging.set_field("level", "kamikaya=debug").unwrap();
        assert_eq!(logging.level, "kamikaya=debug");
        assert!(logging.set_field("level", "kamikaya=loud").is_err());
    }

    #[test]
    fn test_unknown_keys() {
        let mut tui = TuiConfig::default();
        assert!(tui.get_field("theme").is_none());
        assert!(matches!(
            tui.set_field("theme", "dark"),
            Err(FieldError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_section_names() {
        assert_eq!(LoanConfig::section_name(), "loan");
        assert_eq!(SubmissionConfig::section_name(), "submission");
        assert_eq!(TuiConfig::section_name(), "tui");
        assert_eq!(LoggingConfig::section_name(), "logging");
    }
}
