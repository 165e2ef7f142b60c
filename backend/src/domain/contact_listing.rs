//! Search, sort, and paging parameters for listing contacts.

use std::cmp::Ordering;

use pagination::PageRequest;

use crate::domain::Contact;

/// Case-insensitive substring filter over name, phone number, and email.
///
/// Terms are trimmed and lower-cased; blank input means "no filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Normalise raw client input, returning `None` for blank terms.
    ///
    /// # Examples
    /// ```
    /// use contact_manager::domain::SearchTerm;
    ///
    /// assert!(SearchTerm::parse("   ").is_none());
    /// let term = SearchTerm::parse("  Ada ").expect("non-blank term");
    /// assert_eq!(term.as_str(), "ada");
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_lowercase()))
    }

    /// Normalised term.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the term occurs in the contact's name, phone number, or email.
    pub fn matches(&self, contact: &Contact) -> bool {
        let needle = self.0.as_str();
        contact.name.to_lowercase().contains(needle)
            || contact.phone_number.to_lowercase().contains(needle)
            || contact
                .email
                .as_deref()
                .is_some_and(|email| email.to_lowercase().contains(needle))
    }
}

/// Column used to order a contact listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    #[default]
    Name,
    PhoneNumber,
    Email,
}

impl SortField {
    /// Match a client-supplied field name case-insensitively.
    ///
    /// Unrecognised names fall back to [`SortField::Name`].
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "phonenumber" => Self::PhoneNumber,
            "email" => Self::Email,
            _ => Self::Name,
        }
    }
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Map the `sortDescending` flag onto a direction.
    pub const fn from_descending(descending: bool) -> Self {
        if descending {
            Self::Descending
        } else {
            Self::Ascending
        }
    }
}

fn caseless(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Sort order for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContactSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl ContactSort {
    /// Compare two contacts under this sort.
    ///
    /// Names and emails compare without regard to case, like
    /// `ORDER BY lower(..)`. Absent emails order after present ones when
    /// ascending and before them when descending, as PostgreSQL does by
    /// default. Ties fall back to the ascending identifier so pages are
    /// stable.
    pub fn compare(&self, a: &Contact, b: &Contact) -> Ordering {
        let primary = match self.field {
            SortField::Name => caseless(&a.name, &b.name),
            SortField::PhoneNumber => a.phone_number.cmp(&b.phone_number),
            SortField::Email => match (&a.email, &b.email) {
                (Some(x), Some(y)) => caseless(x, y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        };
        let directed = match self.direction {
            SortDirection::Ascending => primary,
            SortDirection::Descending => primary.reverse(),
        };
        directed.then_with(|| a.id.cmp(&b.id))
    }
}

/// Full listing request: optional filter, sort, and page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactListQuery {
    pub search: Option<SearchTerm>,
    pub sort: ContactSort,
    pub page: PageRequest,
}
