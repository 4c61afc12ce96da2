//! Tests for contact validation and sanitisation.

use super::*;
use rstest::rstest;

fn valid_values() -> ContactFormValues {
    ContactFormValues {
        full_name: "Ada Lovelace".to_owned(),
        email: "ada@example.com".to_owned(),
        phone: String::new(),
        subject: "project".to_owned(),
        budget: String::new(),
        message: "We need a new brand identity.".to_owned(),
    }
}

#[rstest]
#[case::two_letters("Jo")]
#[case::accented("Zoë Saldaña")]
#[case::apostrophe("Conan O'Brien")]
#[case::hyphen("Jean-Luc Picard")]
#[case::padded("  Ada  ")]
fn accepts_plausible_names(#[case] name: &str) {
    assert!(is_valid_full_name(name));
}

#[rstest]
#[case::single("J")]
#[case::digits("R2D2")]
#[case::punctuation("Ada!")]
#[case::blank("   ")]
fn rejects_implausible_names(#[case] name: &str) {
    assert!(!is_valid_full_name(name));
}

#[rstest]
#[case::plain("a@b.co", true)]
#[case::padded("  ada@example.com ", true)]
#[case::no_tld("a@b", false)]
#[case::inner_space("a b@c.de", false)]
#[case::no_at("example.com", false)]
fn email_shape(#[case] email: &str, #[case] expected: bool) {
    assert_eq!(is_valid_email(email), expected);
}

#[rstest]
#[case::international("+44 20 7946 0958", true)]
#[case::dotted("555.123.4567", true)]
#[case::parenthesised("(555) 123-4567", true)]
#[case::too_short("12345", false)]
#[case::letters("call me", false)]
#[case::too_long("+1234567890123456", false)]
fn phone_shape(#[case] phone: &str, #[case] expected: bool) {
    assert_eq!(is_valid_phone(phone), expected);
}

#[test]
fn blank_required_fields_report_required() {
    for field in [
        ContactField::FullName,
        ContactField::Email,
        ContactField::Subject,
        ContactField::Message,
    ] {
        assert_eq!(
            validate_field(field, "  "),
            Err(FieldError::Required { field })
        );
    }
}

#[test]
fn optional_fields_accept_blank() {
    assert_eq!(validate_field(ContactField::Phone, ""), Ok(()));
    assert_eq!(validate_field(ContactField::Budget, " "), Ok(()));
}

#[rstest]
#[case::short_name(ContactField::FullName, "J", FieldError::NameTooShort)]
#[case::bad_name(ContactField::FullName, "J0hn", FieldError::NameCharacters)]
#[case::bad_email(ContactField::Email, "ada@", FieldError::InvalidEmail)]
#[case::bad_phone(ContactField::Phone, "12", FieldError::InvalidPhone)]
#[case::bad_subject(ContactField::Subject, "sales", FieldError::UnknownSubject)]
#[case::bad_budget(ContactField::Budget, "1234", FieldError::UnknownBudget)]
#[case::short_message(ContactField::Message, "Hi there", FieldError::MessageTooShort)]
fn field_failures(#[case] field: ContactField, #[case] value: &str, #[case] expected: FieldError) {
    assert_eq!(validate_field(field, value), Err(expected));
}

#[test]
fn error_messages_name_the_field() {
    let error = FieldError::Required {
        field: ContactField::FullName,
    };
    assert_eq!(error.to_string(), "Full name is required");
    assert_eq!(
        FieldError::MessageTooShort.to_string(),
        "Message must be at least 10 characters"
    );
}

#[test]
fn valid_values_build_a_submission() {
    let mut values = valid_values();
    values.phone = " +44 20 7946 0958 ".to_owned();
    values.budget = "10000".to_owned();

    let submission = values.to_submission().expect("values are valid");
    assert_eq!(submission.phone.as_deref(), Some("+44 20 7946 0958"));
    assert_eq!(submission.budget, Some(10_000));
    assert_eq!(submission.subject, "project");
}

#[test]
fn invalid_values_report_every_failing_field() {
    let mut values = valid_values();
    values.full_name = "J".to_owned();
    values.email = "nope".to_owned();

    let errors = values.to_submission().expect_err("values are invalid");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get(&ContactField::FullName), Some(&FieldError::NameTooShort));
    assert_eq!(errors.get(&ContactField::Email), Some(&FieldError::InvalidEmail));
}

#[test]
fn sanitize_strips_tags_then_trims() {
    assert_eq!(sanitize_text("  <p>Hello <em>there</em></p>  "), "Hello there");
    assert_eq!(sanitize_text("a < b"), "a < b");
}

#[test]
fn sanitized_submission_is_stable() {
    let raw = ContactSubmission {
        full_name: " <i>Ada</i> Lovelace ".to_owned(),
        email: " ada@example.com ".to_owned(),
        phone: Some("<b></b>".to_owned()),
        subject: "general".to_owned(),
        budget: Some(5_000),
        message: " <a href=\"x\">Link</a> and text ".to_owned(),
    };

    let once = raw.sanitized();
    assert_eq!(once.full_name, "Ada Lovelace");
    assert_eq!(once.email, "ada@example.com");
    assert_eq!(once.phone, None);
    assert_eq!(once.message, "Link and text");
    assert_eq!(once.sanitized(), once);
}

#[test]
fn submission_serialises_camel_case_and_skips_absent_optionals() {
    let submission = valid_values().to_submission().expect("values are valid");
    let value = serde_json::to_value(&submission).expect("submission serialises");
    assert_eq!(
        value,
        serde_json::json!({
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "subject": "project",
            "message": "We need a new brand identity."
        })
    );
}

#[test]
fn offered_options_are_all_valid() {
    for option in SUBJECT_OPTIONS {
        assert_eq!(validate_field(ContactField::Subject, option.value), Ok(()));
    }
    for tier in BUDGET_TIERS {
        assert_eq!(validate_field(ContactField::Budget, &tier.to_string()), Ok(()));
    }
}
