//! Tests for contact validation and duplicate probing.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn valid_fields() -> ContactFields {
    ContactFields {
        name: Some("Grace Hopper".to_owned()),
        phone_number: Some("+1 555 010 9999".to_owned()),
        email: Some("grace@example.com".to_owned()),
        address: Some("1 Navy Way".to_owned()),
    }
}

fn errors_for(fields: ContactFields) -> ContactValidationErrors {
    ContactDraft::try_new(fields).expect_err("fields should be rejected")
}

#[rstest]
fn accepts_valid_fields(valid_fields: ContactFields) {
    let draft = ContactDraft::try_new(valid_fields).expect("valid contact");
    assert_eq!(draft.name(), "Grace Hopper");
    assert_eq!(draft.phone_number(), "+1 555 010 9999");
    assert_eq!(draft.email(), Some("grace@example.com"));
    assert_eq!(draft.address(), Some("1 Navy Way"));
}

#[rstest]
fn blank_optional_fields_become_absent(valid_fields: ContactFields) {
    let draft = ContactDraft::try_new(ContactFields {
        email: Some("   ".to_owned()),
        address: Some(String::new()),
        ..valid_fields
    })
    .expect("blank optionals are allowed");
    assert_eq!(draft.email(), None);
    assert_eq!(draft.address(), None);
}

#[rstest]
fn reports_every_violation_in_field_order() {
    let errors = errors_for(ContactFields {
        name: None,
        phone_number: Some("12".to_owned()),
        email: Some("not-an-email".to_owned()),
        address: Some("x".repeat(ADDRESS_MAX + 1)),
    });

    assert_eq!(
        errors.messages(),
        vec![
            "The Name field is required.".to_owned(),
            "The PhoneNumber field must be between 5 and 15 characters.".to_owned(),
            "The Email field is not a valid email address.".to_owned(),
            "The Address field cannot exceed 250 characters.".to_owned(),
        ]
    );
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("   "))]
fn name_is_required(valid_fields: ContactFields, #[case] name: Option<&str>) {
    let errors = errors_for(ContactFields {
        name: name.map(str::to_owned),
        ..valid_fields
    });
    assert_eq!(errors.as_slice(), &[ContactValidationError::NameRequired]);
}

#[rstest]
fn name_length_is_bounded(valid_fields: ContactFields) {
    let at_limit = ContactFields {
        name: Some("n".repeat(NAME_MAX)),
        ..valid_fields.clone()
    };
    assert!(ContactDraft::try_new(at_limit).is_ok());

    let errors = errors_for(ContactFields {
        name: Some("n".repeat(NAME_MAX + 1)),
        ..valid_fields
    });
    assert!(errors.contains(ContactValidationError::NameTooLong { max: NAME_MAX }));
    assert_eq!(
        errors.messages(),
        vec!["The Name field cannot exceed 100 characters.".to_owned()]
    );
}

#[rstest]
#[case("12345")]
#[case("123456789012345")]
#[case("(01) 234-567")]
#[case("+44 20 7946")]
fn accepts_phone_numbers_in_range(valid_fields: ContactFields, #[case] phone: &str) {
    let draft = ContactDraft::try_new(ContactFields {
        phone_number: Some(phone.to_owned()),
        ..valid_fields
    })
    .expect("phone number is valid");
    assert_eq!(draft.phone_number(), phone);
}

#[rstest]
#[case("1234", &[ContactValidationError::PhoneNumberLength { min: PHONE_MIN, max: PHONE_MAX }])]
#[case("1234567890123456", &[ContactValidationError::PhoneNumberLength { min: PHONE_MIN, max: PHONE_MAX }])]
#[case("+44 20 7946 0000", &[ContactValidationError::PhoneNumberLength { min: PHONE_MIN, max: PHONE_MAX }])]
#[case("555-CALL-NOW", &[ContactValidationError::PhoneNumberInvalidCharacters])]
#[case("12345#", &[ContactValidationError::PhoneNumberInvalidCharacters])]
#[case("1.2", &[
    ContactValidationError::PhoneNumberLength { min: PHONE_MIN, max: PHONE_MAX },
    ContactValidationError::PhoneNumberInvalidCharacters,
])]
fn rejects_invalid_phone_numbers(
    valid_fields: ContactFields,
    #[case] phone: &str,
    #[case] expected: &[ContactValidationError],
) {
    let errors = errors_for(ContactFields {
        phone_number: Some(phone.to_owned()),
        ..valid_fields
    });
    assert_eq!(errors.as_slice(), expected);
    assert!(
        errors
            .messages()
            .iter()
            .all(|message| message.starts_with("The PhoneNumber field"))
    );
}

#[rstest]
fn phone_number_is_required(valid_fields: ContactFields) {
    let errors = errors_for(ContactFields {
        phone_number: None,
        ..valid_fields
    });
    assert_eq!(
        errors.messages(),
        vec!["The PhoneNumber field is required.".to_owned()]
    );
}

#[rstest]
#[case("a@b")]
#[case("first.last@example.co.uk")]
#[case("x y@z")]
fn accepts_email_with_single_inner_at(valid_fields: ContactFields, #[case] email: &str) {
    let fields = ContactFields {
        email: Some(email.to_owned()),
        ..valid_fields
    };
    assert!(ContactDraft::try_new(fields).is_ok());
}

#[rstest]
#[case("plainaddress")]
#[case("@example.com")]
#[case("user@")]
#[case("a@b@c")]
#[case("line\nbreak@example.com")]
fn rejects_malformed_email(valid_fields: ContactFields, #[case] email: &str) {
    let errors = errors_for(ContactFields {
        email: Some(email.to_owned()),
        ..valid_fields
    });
    assert_eq!(errors.as_slice(), &[ContactValidationError::EmailInvalid]);
}

#[rstest]
fn length_counts_characters_not_bytes(valid_fields: ContactFields) {
    let fields = ContactFields {
        name: Some("é".repeat(NAME_MAX)),
        ..valid_fields
    };
    assert!(ContactDraft::try_new(fields).is_ok());
}

#[fixture]
fn stored() -> Contact {
    Contact {
        id: ContactId::new(7),
        name: "Stored".to_owned(),
        phone_number: "0123456789".to_owned(),
        email: Some("stored@example.com".to_owned()),
        address: None,
    }
}

#[rstest]
fn probe_matches_phone_or_email(stored: Contact) {
    let phone_probe = DuplicateProbe {
        phone_number: "0123456789".to_owned(),
        email: None,
        excluding: None,
    };
    let email_probe = DuplicateProbe {
        phone_number: "99999".to_owned(),
        email: Some("stored@example.com".to_owned()),
        excluding: None,
    };
    assert!(phone_probe.matches(&stored));
    assert!(email_probe.matches(&stored));
}

#[rstest]
#[case("STORED@example.com")]
#[case("Stored@Example.Com")]
fn email_collisions_ignore_case(stored: Contact, #[case] email: &str) {
    let probe = DuplicateProbe {
        phone_number: "99999".to_owned(),
        email: Some(email.to_owned()),
        excluding: None,
    };
    assert!(probe.email_matches(&stored));
    assert!(!probe.phone_matches(&stored));
}

#[rstest]
fn probe_skips_excluded_record(stored: Contact) {
    let probe = DuplicateProbe {
        phone_number: "0123456789".to_owned(),
        email: None,
        excluding: Some(ContactId::new(7)),
    };
    assert!(!probe.matches(&stored));
}

#[rstest]
fn absent_emails_never_collide(mut stored: Contact) {
    stored.email = None;
    let probe = DuplicateProbe {
        phone_number: "55555".to_owned(),
        email: None,
        excluding: None,
    };
    assert!(!probe.matches(&stored));
}

#[rstest]
fn overwrite_keeps_identifier(mut stored: Contact, valid_fields: ContactFields) {
    let draft = ContactDraft::try_new(valid_fields).expect("valid contact");
    stored.overwrite(draft);
    assert_eq!(stored.id, ContactId::new(7));
    assert_eq!(stored.name, "Grace Hopper");
    assert_eq!(stored.email.as_deref(), Some("grace@example.com"));
}
