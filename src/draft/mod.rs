//! The application draft: everything the applicant has entered so far.
//!
//! Field identifiers are a closed enum so a typo in a field name is a
//! compile error rather than a silently ignored update.

mod amount;
pub mod currency;
pub mod options;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use amount::{
    LoanAmount, DEFAULT_LOAN_AMOUNT, LOAN_AMOUNT_STEP, MAX_LOAN_AMOUNT, MIN_LOAN_AMOUNT,
};
pub use currency::{format_rupiah, format_thousands};
pub use options::SelectOption;

/// Error returned when a field or slot name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldParseError {
    /// No draft field has this name.
    #[error("Unknown field: {0}")]
    UnknownField(String),
    /// No file slot has this name.
    #[error("Unknown file slot: {0}")]
    UnknownSlot(String),
}

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    Multiline,
    /// One value from a fixed list.
    Choice(&'static [SelectOption]),
}

/// Text fields of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Applicant's full name.
    #[serde(alias = "fullName")]
    FullName,
    /// National identity number from the KTP.
    Nik,
    /// Phone number.
    Phone,
    /// Email address.
    Email,
    /// Home address.
    Address,
    /// Occupation, one of [`options::OCCUPATION_OPTIONS`] in the UI.
    Occupation,
    /// Monthly income range, one of [`options::INCOME_OPTIONS`] in the UI.
    Income,
    /// Loan purpose, one of [`options::PURPOSE_OPTIONS`] in the UI.
    Purpose,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 8] = [
        Field::FullName,
        Field::Nik,
        Field::Phone,
        Field::Email,
        Field::Address,
        Field::Occupation,
        Field::Income,
        Field::Purpose,
    ];

    /// Identifier used in exports and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Field::FullName => "full_name",
            Field::Nik => "nik",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Address => "address",
            Field::Occupation => "occupation",
            Field::Income => "income",
            Field::Purpose => "purpose",
        }
    }

    /// Form label.
    pub fn label(self) -> &'static str {
        match self {
            Field::FullName => "Nama Lengkap",
            Field::Nik => "NIK",
            Field::Phone => "Nomor Telepon",
            Field::Email => "Email",
            Field::Address => "Alamat Lengkap",
            Field::Occupation => "Pekerjaan",
            Field::Income => "Penghasilan per Bulan",
            Field::Purpose => "Tujuan Pinjaman",
        }
    }

    /// Hint shown while the field is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            Field::FullName => "Masukkan nama lengkap",
            Field::Nik => "Masukkan NIK",
            Field::Phone => "Masukkan nomor telepon",
            Field::Email => "Masukkan email",
            Field::Address => "Masukkan alamat lengkap",
            Field::Occupation => options::OCCUPATION_OPTIONS[0].label,
            Field::Income => options::INCOME_OPTIONS[0].label,
            Field::Purpose => options::PURPOSE_OPTIONS[0].label,
        }
    }

    /// Editing style of this field.
    pub fn kind(self) -> FieldKind {
        match self {
            Field::Address => FieldKind::Multiline,
            Field::Occupation => FieldKind::Choice(options::OCCUPATION_OPTIONS),
            Field::Income => FieldKind::Choice(options::INCOME_OPTIONS),
            Field::Purpose => FieldKind::Choice(options::PURPOSE_OPTIONS),
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = FieldParseError;

    /// Accepts the snake_case key or the camelCase form-input name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full_name" | "fullName" => Ok(Field::FullName),
            "nik" => Ok(Field::Nik),
            "phone" => Ok(Field::Phone),
            "email" => Ok(Field::Email),
            "address" => Ok(Field::Address),
            "occupation" => Ok(Field::Occupation),
            "income" => Ok(Field::Income),
            "purpose" => Ok(Field::Purpose),
            _ => Err(FieldParseError::UnknownField(s.to_string())),
        }
    }
}

/// The two document upload targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileSlot {
    /// Photo of the KTP identity card.
    #[serde(rename = "ktp_file", alias = "ktpFile")]
    Ktp,
    /// Selfie holding the KTP.
    #[serde(rename = "selfie_file", alias = "selfieFile")]
    Selfie,
}

impl FileSlot {
    /// Both slots, in form order.
    pub const ALL: [FileSlot; 2] = [FileSlot::Ktp, FileSlot::Selfie];

    /// Identifier used in exports and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            FileSlot::Ktp => "ktp_file",
            FileSlot::Selfie => "selfie_file",
        }
    }

    /// Form label.
    pub fn label(self) -> &'static str {
        match self {
            FileSlot::Ktp => "Upload KTP",
            FileSlot::Selfie => "Upload Foto Selfie dengan KTP",
        }
    }

    /// Call to action shown while the slot is empty.
    pub fn prompt(self) -> &'static str {
        match self {
            FileSlot::Ktp => "Klik untuk upload KTP",
            FileSlot::Selfie => "Klik untuk upload selfie",
        }
    }
}

impl fmt::Display for FileSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FileSlot {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ktp_file" | "ktpFile" | "ktp" => Ok(FileSlot::Ktp),
            "selfie_file" | "selfieFile" | "selfie" => Ok(FileSlot::Selfie),
            _ => Err(FieldParseError::UnknownSlot(s.to_string())),
        }
    }
}

/// A file the applicant picked. Never opened or read by the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    /// Location as given by the picker.
    pub path: PathBuf,
    /// Display name.
    pub name: String,
}

impl FileHandle {
    /// Wrap a picked path, using its final component as the display name.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }
}

/// Everything entered in the wizard so far.
///
/// Serialises with the backend's field names so an export has the shape of
/// an application payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    /// Requested amount.
    pub loan_amount: LoanAmount,
    /// Loan purpose.
    #[serde(default)]
    pub purpose: String,
    /// Full name.
    #[serde(default)]
    pub full_name: String,
    /// NIK.
    #[serde(default)]
    pub nik: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Email.
    #[serde(default)]
    pub email: String,
    /// Address.
    #[serde(default)]
    pub address: String,
    /// Occupation.
    #[serde(default)]
    pub occupation: String,
    /// Monthly income range.
    #[serde(default)]
    pub income: String,
    /// KTP photo.
    #[serde(default)]
    pub ktp_file: Option<FileHandle>,
    /// Selfie with KTP.
    #[serde(default)]
    pub selfie_file: Option<FileHandle>,
}

impl Default for ApplicationDraft {
    fn default() -> Self {
        Self::with_loan_amount(LoanAmount::default())
    }
}

impl ApplicationDraft {
    /// Empty draft starting the slider at `amount`.
    pub fn with_loan_amount(amount: LoanAmount) -> Self {
        Self {
            loan_amount: amount,
            purpose: String::new(),
            full_name: String::new(),
            nik: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            occupation: String::new(),
            income: String::new(),
            ktp_file: None,
            selfie_file: None,
        }
    }

    /// Current value of a text field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Nik => &self.nik,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::Address => &self.address,
            Field::Occupation => &self.occupation,
            Field::Income => &self.income,
            Field::Purpose => &self.purpose,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FullName => &mut self.full_name,
            Field::Nik => &mut self.nik,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
            Field::Address => &mut self.address,
            Field::Occupation => &mut self.occupation,
            Field::Income => &mut self.income,
            Field::Purpose => &mut self.purpose,
        }
    }

    /// Replace one text field. Any string is accepted.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Append a character to a text field.
    pub fn push_char(&mut self, field: Field, ch: char) {
        self.slot_mut(field).push(ch);
    }

    /// Remove the last character of a text field.
    pub fn pop_char(&mut self, field: Field) {
        self.slot_mut(field).pop();
    }

    /// File currently held in a slot.
    pub fn file(&self, slot: FileSlot) -> Option<&FileHandle> {
        match slot {
            FileSlot::Ktp => self.ktp_file.as_ref(),
            FileSlot::Selfie => self.selfie_file.as_ref(),
        }
    }

    /// Put a file in a slot, replacing whatever was there.
    pub fn set_file(&mut self, slot: FileSlot, file: FileHandle) {
        match slot {
            FileSlot::Ktp => self.ktp_file = Some(file),
            FileSlot::Selfie => self.selfie_file = Some(file),
        }
    }

    /// Human-readable value for a field: choice labels instead of raw values.
    pub fn display_value(&self, field: Field) -> &str {
        let raw = self.get(field);
        match field.kind() {
            FieldKind::Choice(list) if !raw.is_empty() => {
                options::label_for(list, raw).unwrap_or(raw)
            }
            _ => raw,
        }
    }

    /// Number of text fields and file slots that hold something.
    pub fn filled_count(&self) -> usize {
        let fields = Field::ALL
            .iter()
            .filter(|f| !self.get(**f).is_empty())
            .count();
        let files = FileSlot::ALL
            .iter()
            .filter(|s| self.file(**s).is_some())
            .count();
        fields + files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_draft_is_empty() {
        let draft = ApplicationDraft::default();
        assert_eq!(draft.loan_amount.value(), DEFAULT_LOAN_AMOUNT);
        for field in Field::ALL {
            assert_eq!(draft.get(field), "");
        }
        assert!(draft.ktp_file.is_none());
        assert!(draft.selfie_file.is_none());
        assert_eq!(draft.filled_count(), 0);
    }

    #[test]
    fn test_set_touches_only_one_field() {
        let mut draft = ApplicationDraft::default();
        draft.set(Field::Email, "budi@example.com");
        assert_eq!(draft.get(Field::Email), "budi@example.com");
        for field in Field::ALL.into_iter().filter(|f| *f != Field::Email) {
            assert_eq!(draft.get(field), "", "{field} changed");
        }
    }

    #[test]
    fn test_set_accepts_anything() {
        let mut draft = ApplicationDraft::default();
        draft.set(Field::Nik, "not a number");
        assert_eq!(draft.nik, "not a number");
        draft.set(Field::Nik, "");
        assert_eq!(draft.nik, "");
    }

    #[test]
    fn test_push_and_pop_char() {
        let mut draft = ApplicationDraft::default();
        for ch in "Budi".chars() {
            draft.push_char(Field::FullName, ch);
        }
        draft.pop_char(Field::FullName);
        assert_eq!(draft.full_name, "Bud");
        draft.pop_char(Field::Phone);
        assert_eq!(draft.phone, "");
    }

    #[test]
    fn test_set_file_last_write_wins() {
        let mut draft = ApplicationDraft::default();
        draft.set_file(FileSlot::Ktp, FileHandle::from_path("a/ktp-lama.jpg"));
        draft.set_file(FileSlot::Ktp, FileHandle::from_path("b/ktp-baru.png"));
        assert_eq!(draft.file(FileSlot::Ktp).unwrap().name, "ktp-baru.png");
        assert!(draft.file(FileSlot::Selfie).is_none());
    }

    #[test]
    fn test_file_handle_name() {
        let handle = FileHandle::from_path("/tmp/uploads/selfie.jpg");
        assert_eq!(handle.name, "selfie.jpg");
        assert_eq!(handle.path, PathBuf::from("/tmp/uploads/selfie.jpg"));
    }

    #[test]
    fn test_field_from_str_accepts_both_spellings() {
        assert_eq!("full_name".parse::<Field>().unwrap(), Field::FullName);
        assert_eq!("fullName".parse::<Field>().unwrap(), Field::FullName);
        assert_eq!(
            "loanAmount".parse::<Field>(),
            Err(FieldParseError::UnknownField("loanAmount".into()))
        );
    }

    #[test]
    fn test_slot_from_str() {
        assert_eq!("ktpFile".parse::<FileSlot>().unwrap(), FileSlot::Ktp);
        assert_eq!("selfie_file".parse::<FileSlot>().unwrap(), FileSlot::Selfie);
        assert!("passport".parse::<FileSlot>().is_err());
    }

    #[test]
    fn test_display_value_uses_choice_labels() {
        let mut draft = ApplicationDraft::default();
        draft.set(Field::Purpose, "modal_usaha");
        draft.set(Field::Income, "custom");
        assert_eq!(draft.display_value(Field::Purpose), "Modal Usaha");
        assert_eq!(draft.display_value(Field::Income), "custom");
        assert_eq!(draft.display_value(Field::Occupation), "");
    }

    #[test]
    fn test_serialises_with_backend_names() {
        let mut draft = ApplicationDraft::default();
        draft.set(Field::FullName, "Budi");
        draft.set_file(FileSlot::Ktp, FileHandle::from_path("ktp.jpg"));
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["full_name"], "Budi");
        assert_eq!(json["loan_amount"], 20_000_000);
        assert_eq!(json["ktp_file"]["name"], "ktp.jpg");
        assert!(json["selfie_file"].is_null());
    }

    #[test]
    fn test_field_serde_alias() {
        let field: Field = serde_json::from_str("\"fullName\"").unwrap();
        assert_eq!(field, Field::FullName);
        let slot: FileSlot = serde_json::from_str("\"selfieFile\"").unwrap();
        assert_eq!(slot, FileSlot::Selfie);
        assert_eq!(serde_json::to_string(&FileSlot::Ktp).unwrap(), "\"ktp_file\"");
    }
}
