//! Contact data model.
//!
//! Clients submit [`ContactFields`]; [`ContactDraft`] is the validated form
//! that may be persisted, and [`Contact`] is a stored record with its
//! server-assigned identifier.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Maximum length of a contact name, in characters.
pub const NAME_MAX: usize = 100;
/// Minimum length of a phone number, in characters.
pub const PHONE_MIN: usize = 5;
/// Maximum length of a phone number, in characters.
pub const PHONE_MAX: usize = 15;
/// Maximum length of a postal address, in characters.
pub const ADDRESS_MAX: usize = 250;

/// A single violated field constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    NameRequired,
    NameTooLong { max: usize },
    PhoneNumberRequired,
    PhoneNumberLength { min: usize, max: usize },
    PhoneNumberInvalidCharacters,
    EmailInvalid,
    AddressTooLong { max: usize },
}

impl fmt::Display for ContactValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameRequired => write!(f, "The Name field is required."),
            Self::NameTooLong { max } => {
                write!(f, "The Name field cannot exceed {max} characters.")
            }
            Self::PhoneNumberRequired => write!(f, "The PhoneNumber field is required."),
            Self::PhoneNumberLength { min, max } => write!(
                f,
                "The PhoneNumber field must be between {min} and {max} characters."
            ),
            Self::PhoneNumberInvalidCharacters => write!(
                f,
                "The PhoneNumber field contains invalid characters. It can include digits, \
                 spaces, plus signs, hyphens, and parentheses."
            ),
            Self::EmailInvalid => write!(f, "The Email field is not a valid email address."),
            Self::AddressTooLong { max } => {
                write!(f, "The Address field cannot exceed {max} characters.")
            }
        }
    }
}

impl std::error::Error for ContactValidationError {}

/// Every constraint a set of [`ContactFields`] violated, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactValidationErrors(Vec<ContactValidationError>);

impl ContactValidationErrors {
    /// Violations in field order (name, phone number, email, address).
    pub fn as_slice(&self) -> &[ContactValidationError] {
        &self.0
    }

    /// Human-readable message for each violation.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// Whether the given violation was reported.
    pub fn contains(&self, error: ContactValidationError) -> bool {
        self.0.contains(&error)
    }
}

impl fmt::Display for ContactValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(", "))
    }
}

impl std::error::Error for ContactValidationErrors {}

/// Server-assigned contact identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(i32);

impl ContactId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for ContactId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unvalidated contact fields as supplied by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

static PHONE_NUMBER_RE: OnceLock<Regex> = OnceLock::new();

fn phone_number_regex() -> &'static Regex {
    PHONE_NUMBER_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = r"^[0-9 +\-()]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("phone number regex failed to compile: {error}"))
    })
}

/// Exactly one `@`, neither leading nor trailing, and no line breaks.
fn is_valid_email(email: &str) -> bool {
    if email.contains(['\r', '\n']) {
        return false;
    }
    match (email.find('@'), email.rfind('@')) {
        (Some(first), Some(last)) => first == last && first > 0 && first + 1 < email.len(),
        _ => false,
    }
}

/// Blank optional values are treated as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validated contact fields, ready to be created or written over a record.
///
/// ## Invariants
/// - `name` is non-blank and at most [`NAME_MAX`] characters.
/// - `phone_number` is [`PHONE_MIN`]..=[`PHONE_MAX`] characters of digits,
///   spaces, `+`, `-`, `(` and `)`.
/// - `email`, when present, contains exactly one `@` that is neither the
///   first nor the last character.
/// - `address`, when present, is at most [`ADDRESS_MAX`] characters.
///
/// # Examples
/// ```
/// use contact_manager::domain::{ContactDraft, ContactFields};
///
/// let draft = ContactDraft::try_new(ContactFields {
///     name: Some("Ada Lovelace".into()),
///     phone_number: Some("+44 20 7946 000".into()),
///     email: Some("ada@example.org".into()),
///     address: None,
/// })
/// .expect("valid contact");
/// assert_eq!(draft.name(), "Ada Lovelace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    name: String,
    phone_number: String,
    email: Option<String>,
    address: Option<String>,
}

impl ContactDraft {
    /// Validate every field, collecting all violations before failing.
    pub fn try_new(fields: ContactFields) -> Result<Self, ContactValidationErrors> {
        let ContactFields {
            name,
            phone_number,
            email,
            address,
        } = fields;
        let mut errors = Vec::new();

        let name = non_blank(name);
        match &name {
            None => errors.push(ContactValidationError::NameRequired),
            Some(value) if value.chars().count() > NAME_MAX => {
                errors.push(ContactValidationError::NameTooLong { max: NAME_MAX });
            }
            Some(_) => {}
        }

        let phone_number = non_blank(phone_number);
        match &phone_number {
            None => errors.push(ContactValidationError::PhoneNumberRequired),
            Some(value) => {
                let length = value.chars().count();
                if !(PHONE_MIN..=PHONE_MAX).contains(&length) {
                    errors.push(ContactValidationError::PhoneNumberLength {
                        min: PHONE_MIN,
                        max: PHONE_MAX,
                    });
                }
                if !phone_number_regex().is_match(value) {
                    errors.push(ContactValidationError::PhoneNumberInvalidCharacters);
                }
            }
        }

        let email = non_blank(email);
        if email.as_deref().is_some_and(|value| !is_valid_email(value)) {
            errors.push(ContactValidationError::EmailInvalid);
        }

        let address = non_blank(address);
        if address
            .as_deref()
            .is_some_and(|value| value.chars().count() > ADDRESS_MAX)
        {
            errors.push(ContactValidationError::AddressTooLong { max: ADDRESS_MAX });
        }

        match (name, phone_number) {
            (Some(name), Some(phone_number)) if errors.is_empty() => Ok(Self {
                name,
                phone_number,
                email,
                address,
            }),
            _ => Err(ContactValidationErrors(errors)),
        }
    }

    /// Contact name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Phone number, unique across contacts.
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Optional email address, unique across contacts.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Optional postal address.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Build the uniqueness lookup for this draft.
    ///
    /// `excluding` names the record being updated so it does not collide
    /// with itself.
    pub fn duplicate_probe(&self, excluding: Option<ContactId>) -> DuplicateProbe {
        DuplicateProbe {
            phone_number: self.phone_number.clone(),
            email: self.email.clone(),
            excluding,
        }
    }
}

impl TryFrom<ContactFields> for ContactDraft {
    type Error = ContactValidationErrors;

    fn try_from(value: ContactFields) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

/// Lookup for stored contacts sharing a phone number or email with a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateProbe {
    pub phone_number: String,
    pub email: Option<String>,
    pub excluding: Option<ContactId>,
}

impl DuplicateProbe {
    /// Whether `contact` collides with this probe.
    pub fn matches(&self, contact: &Contact) -> bool {
        if self.excluding == Some(contact.id) {
            return false;
        }
        self.phone_matches(contact) || self.email_matches(contact)
    }

    pub fn phone_matches(&self, contact: &Contact) -> bool {
        contact.phone_number == self.phone_number
    }

    /// Emails collide regardless of case, mirroring the `lower(email)`
    /// unique index.
    pub fn email_matches(&self, contact: &Contact) -> bool {
        match (self.email.as_deref(), contact.email.as_deref()) {
            (Some(wanted), Some(stored)) => wanted.to_lowercase() == stored.to_lowercase(),
            _ => false,
        }
    }
}

/// Stored contact record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl Contact {
    /// Combine a stored identifier with validated fields.
    pub fn from_draft(id: ContactId, draft: ContactDraft) -> Self {
        let ContactDraft {
            name,
            phone_number,
            email,
            address,
        } = draft;
        Self {
            id,
            name,
            phone_number,
            email,
            address,
        }
    }

    /// Replace the four mutable fields, keeping the identifier.
    pub fn overwrite(&mut self, draft: ContactDraft) {
        *self = Self::from_draft(self.id, draft);
    }
}

#[cfg(test)]
mod tests;
