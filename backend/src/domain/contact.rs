//! Contact submission model, field validation and sanitisation.
//!
//! Validation runs locally and never reaches the network. Sanitisation trims
//! every string and strips HTML tags so markup is not stored in the content
//! backend; it is not a general XSS filter.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Minimum length of the full name after trimming.
pub const FULL_NAME_MIN: usize = 2;
/// Minimum length of the message after trimming.
pub const MESSAGE_MIN: usize = 10;
/// Budget tiers offered by the form, in whole currency units.
pub const BUDGET_TIERS: [u32; 5] = [1_000, 5_000, 10_000, 25_000, 50_000];

/// One entry of the subject drop-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectOption {
    /// Value submitted to the backend.
    pub value: &'static str,
    /// Label shown to the visitor.
    pub label: &'static str,
}

/// Subjects offered by the form.
pub const SUBJECT_OPTIONS: [SubjectOption; 6] = [
    SubjectOption { value: "general", label: "General inquiry" },
    SubjectOption { value: "project", label: "New project" },
    SubjectOption { value: "partnership", label: "Partnership" },
    SubjectOption { value: "support", label: "Support" },
    SubjectOption { value: "careers", label: "Careers" },
    SubjectOption { value: "other", label: "Something else" },
];

/// Payload sent to the relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "+44 20 7946 0958")]
    pub phone: Option<String>,
    #[schema(example = "project")]
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 10000)]
    pub budget: Option<u32>,
    #[schema(example = "We would like a new brand identity.")]
    pub message: String,
}

impl ContactSubmission {
    /// Copy with every string field trimmed and stripped of HTML tags.
    ///
    /// Blank optional fields become `None`. Idempotent.
    ///
    /// # Examples
    /// ```
    /// use site_backend::domain::contact::ContactSubmission;
    ///
    /// let raw = ContactSubmission {
    ///     full_name: "  <b>Ada</b> ".into(),
    ///     email: "ada@example.com".into(),
    ///     phone: Some("   ".into()),
    ///     subject: "project".into(),
    ///     budget: None,
    ///     message: "<script>x</script>Hello there!".into(),
    /// };
    /// let clean = raw.sanitized();
    /// assert_eq!(clean.full_name, "Ada");
    /// assert_eq!(clean.phone, None);
    /// assert_eq!(clean.message, "xHello there!");
    /// assert_eq!(clean.sanitized(), clean);
    /// ```
    pub fn sanitized(&self) -> Self {
        Self {
            full_name: sanitize_text(&self.full_name),
            email: sanitize_text(&self.email),
            phone: self
                .phone
                .as_deref()
                .map(sanitize_text)
                .filter(|phone| !phone.is_empty()),
            subject: sanitize_text(&self.subject),
            budget: self.budget,
            message: sanitize_text(&self.message),
        }
    }
}

/// Verdict returned to the form after relaying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactSubmissionResult {
    /// Identifier of the stored record, when the backend reported one.
    pub id: Option<String>,
    /// True only when the backend accepted the record.
    pub success: bool,
    /// Confirmation or failure message for the visitor.
    pub message: String,
}

/// Form fields in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContactField {
    FullName,
    Email,
    Phone,
    Subject,
    Budget,
    Message,
}

impl ContactField {
    /// Every field, in display order.
    pub const ALL: [Self; 6] = [
        Self::FullName,
        Self::Email,
        Self::Phone,
        Self::Subject,
        Self::Budget,
        Self::Message,
    ];

    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Subject => "subject",
            Self::Budget => "budget",
            Self::Message => "message",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Subject => "Subject",
            Self::Budget => "Budget",
            Self::Message => "Message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-field validation failure shown next to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{field} is required")]
    Required { field: ContactField },
    #[error("Full name must be at least {FULL_NAME_MIN} characters")]
    NameTooShort,
    #[error("Full name may only contain letters, spaces, hyphens and apostrophes")]
    NameCharacters,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
    #[error("Please choose a subject from the list")]
    UnknownSubject,
    #[error("Please choose a budget from the list")]
    UnknownBudget,
    #[error("Message must be at least {MESSAGE_MIN} characters")]
    MessageTooShort,
}

/// Raw values as typed into the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactFormValues {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub budget: String,
    pub message: String,
}

impl ContactFormValues {
    /// Current value of `field`.
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FullName => &self.full_name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Subject => &self.subject,
            ContactField::Budget => &self.budget,
            ContactField::Message => &self.message,
        }
    }

    /// Replace the value of `field`.
    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::FullName => &mut self.full_name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Subject => &mut self.subject,
            ContactField::Budget => &mut self.budget,
            ContactField::Message => &mut self.message,
        };
        *slot = value;
    }

    /// Validate every field, returning the failures keyed by field.
    pub fn validate(&self) -> BTreeMap<ContactField, FieldError> {
        ContactField::ALL
            .into_iter()
            .filter_map(|field| {
                validate_field(field, self.get(field))
                    .err()
                    .map(|error| (field, error))
            })
            .collect()
    }

    /// Build the submission payload if every field is valid.
    ///
    /// # Errors
    ///
    /// Returns every field failure when the values are not submittable.
    pub fn to_submission(&self) -> Result<ContactSubmission, BTreeMap<ContactField, FieldError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        let phone = self.phone.trim();
        let budget = match self.budget.trim() {
            "" => None,
            raw => Some(parse_budget(raw).map_err(|error| {
                BTreeMap::from([(ContactField::Budget, error)])
            })?),
        };
        Ok(ContactSubmission {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: (!phone.is_empty()).then(|| phone.to_owned()),
            subject: self.subject.clone(),
            budget,
            message: self.message.clone(),
        })
    }
}

fn full_name_regex() -> &'static Regex {
    static FULL_NAME_RE: OnceLock<Regex> = OnceLock::new();
    FULL_NAME_RE.get_or_init(|| {
        Regex::new(r"^[\p{L}\s'-]+$")
            .unwrap_or_else(|error| panic!("full name regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^\+?[0-9]{7,15}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

fn html_tag_regex() -> &'static Regex {
    static HTML_TAG_RE: OnceLock<Regex> = OnceLock::new();
    HTML_TAG_RE.get_or_init(|| {
        Regex::new(r"<[^>]*>")
            .unwrap_or_else(|error| panic!("html tag regex failed to compile: {error}"))
    })
}

/// Whether `value` is a plausible full name.
///
/// # Examples
/// ```
/// use site_backend::domain::contact::is_valid_full_name;
///
/// assert!(is_valid_full_name("Jo"));
/// assert!(!is_valid_full_name("J"));
/// ```
pub fn is_valid_full_name(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.chars().count() >= FULL_NAME_MIN && full_name_regex().is_match(trimmed)
}

/// Whether `value` matches `local@domain.tld` after trimming.
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}

/// Whether `value` is a loose phone number once separators are removed.
pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();
    phone_regex().is_match(&compact)
}

/// Whether `value` is one of the offered subjects.
pub fn is_known_subject(value: &str) -> bool {
    let trimmed = value.trim();
    SUBJECT_OPTIONS.iter().any(|option| option.value == trimmed)
}

fn parse_budget(raw: &str) -> Result<u32, FieldError> {
    raw.parse::<u32>()
        .ok()
        .filter(|tier| BUDGET_TIERS.contains(tier))
        .ok_or(FieldError::UnknownBudget)
}

/// Validate one field as the visitor types.
///
/// # Errors
///
/// Returns the [`FieldError`] to display next to the input.
pub fn validate_field(field: ContactField, value: &str) -> Result<(), FieldError> {
    let trimmed = value.trim();
    match field {
        ContactField::FullName => {
            if trimmed.is_empty() {
                Err(FieldError::Required { field })
            } else if trimmed.chars().count() < FULL_NAME_MIN {
                Err(FieldError::NameTooShort)
            } else if !is_valid_full_name(trimmed) {
                Err(FieldError::NameCharacters)
            } else {
                Ok(())
            }
        }
        ContactField::Email => {
            if trimmed.is_empty() {
                Err(FieldError::Required { field })
            } else if is_valid_email(trimmed) {
                Ok(())
            } else {
                Err(FieldError::InvalidEmail)
            }
        }
        ContactField::Phone => {
            if trimmed.is_empty() || is_valid_phone(trimmed) {
                Ok(())
            } else {
                Err(FieldError::InvalidPhone)
            }
        }
        ContactField::Subject => {
            if trimmed.is_empty() {
                Err(FieldError::Required { field })
            } else if is_known_subject(trimmed) {
                Ok(())
            } else {
                Err(FieldError::UnknownSubject)
            }
        }
        ContactField::Budget => {
            if trimmed.is_empty() {
                Ok(())
            } else {
                parse_budget(trimmed).map(|_| ())
            }
        }
        ContactField::Message => {
            if trimmed.is_empty() {
                Err(FieldError::Required { field })
            } else if trimmed.chars().count() < MESSAGE_MIN {
                Err(FieldError::MessageTooShort)
            } else {
                Ok(())
            }
        }
    }
}

/// Strip HTML tags, then trim surrounding whitespace.
pub fn sanitize_text(value: &str) -> String {
    html_tag_regex().replace_all(value, "").trim().to_owned()
}

#[cfg(test)]
mod tests;
