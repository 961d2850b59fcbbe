//! Choice lists offered for the financial-information fields.
//!
//! The first entry of every list is the empty "not chosen" placeholder.

/// One entry of a choice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    /// Stored value.
    pub value: &'static str,
    /// Text shown to the applicant.
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> SelectOption {
    SelectOption { value, label }
}

/// Occupation choices.
pub const OCCUPATION_OPTIONS: &[SelectOption] = &[
    opt("", "Pilih pekerjaan"),
    opt("karyawan", "Karyawan Swasta"),
    opt("pns", "PNS"),
    opt("wiraswasta", "Wiraswasta"),
    opt("freelancer", "Freelancer"),
    opt("pensiunan", "Pensiunan"),
    opt("lainnya", "Lainnya"),
];

/// Monthly income ranges.
pub const INCOME_OPTIONS: &[SelectOption] = &[
    opt("", "Pilih range penghasilan"),
    opt("1-3", "Rp 1-3 Juta"),
    opt("3-5", "Rp 3-5 Juta"),
    opt("5-10", "Rp 5-10 Juta"),
    opt("10-20", "Rp 10-20 Juta"),
    opt("20+", "Di atas Rp 20 Juta"),
];

/// Loan purposes.
pub const PURPOSE_OPTIONS: &[SelectOption] = &[
    opt("", "Pilih tujuan pinjaman"),
    opt("modal_usaha", "Modal Usaha"),
    opt("renovasi", "Renovasi Rumah"),
    opt("pendidikan", "Pendidikan"),
    opt("kesehatan", "Kesehatan"),
    opt("konsumtif", "Kebutuhan Konsumtif"),
    opt("lainnya", "Lainnya"),
];

/// Label for a stored value, if the value is in the list.
pub fn label_for(options: &[SelectOption], value: &str) -> Option<&'static str> {
    options.iter().find(|o| o.value == value).map(|o| o.label)
}

/// The value after (or before) `current` in the list, wrapping around.
///
/// Values not in the list (free text set elsewhere) restart from the
/// placeholder.
pub fn cycle(options: &[SelectOption], current: &str, forward: bool) -> &'static str {
    if options.is_empty() {
        return "";
    }
    let len = options.len();
    let next = match options.iter().position(|o| o.value == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    options[next].value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_start_with_placeholder() {
        for list in [OCCUPATION_OPTIONS, INCOME_OPTIONS, PURPOSE_OPTIONS] {
            assert_eq!(list[0].value, "");
            assert!(list[0].label.starts_with("Pilih"));
        }
    }

    #[test]
    fn test_label_for() {
        assert_eq!(label_for(OCCUPATION_OPTIONS, "pns"), Some("PNS"));
        assert_eq!(label_for(INCOME_OPTIONS, "20+"), Some("Di atas Rp 20 Juta"));
        assert_eq!(label_for(PURPOSE_OPTIONS, "mobil"), None);
    }

    #[test]
    fn test_cycle_forward_wraps() {
        assert_eq!(cycle(INCOME_OPTIONS, "", true), "1-3");
        assert_eq!(cycle(INCOME_OPTIONS, "20+", true), "");
    }

    #[test]
    fn test_cycle_backward_wraps() {
        assert_eq!(cycle(PURPOSE_OPTIONS, "", false), "lainnya");
        assert_eq!(cycle(PURPOSE_OPTIONS, "renovasi", false), "modal_usaha");
    }

    #[test]
    fn test_cycle_unknown_value_restarts() {
        assert_eq!(cycle(OCCUPATION_OPTIONS, "astronaut", true), "");
    }
}
