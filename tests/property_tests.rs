// Property-Based Testing - Validation and Merge Rules
// These tests use proptest to probe the field validators and the patch
// merge semantics with generated inputs.

use proptest::prelude::*;
use rolodex::{
    validate_draft, validate_email, validate_phone, Contact, ContactDraft, ContactId, ContactPatch,
};

// Custom strategies for generating test data
mod strategies {
    use super::*;

    // Phones in the accepted international format
    pub fn valid_phone_strategy() -> impl Strategy<Value = String> {
        prop::string::string_regex(r"\+[0-9]{10,15}").unwrap()
    }

    // Phones with a digit count outside the accepted 10-15 range
    pub fn wrong_length_phone_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::string::string_regex(r"\+[0-9]{1,9}").unwrap(),
            prop::string::string_regex(r"\+[0-9]{16,20}").unwrap(),
        ]
    }

    // Simple well-formed email addresses
    pub fn valid_email_strategy() -> impl Strategy<Value = String> {
        prop::string::string_regex(r"[a-z0-9]{1,10}@[a-z0-9]{1,10}\.[a-z]{2,4}").unwrap()
    }
}

fn contact_with_email(id: &str, email: &str) -> Contact {
    Contact {
        id: ContactId::new(id).unwrap(),
        first_name: "Ann".to_string(),
        last_name: "Archer".to_string(),
        email: email.to_string(),
        phone: "+12025550100".to_string(),
        active: true,
        created_at: None,
        updated_at: None,
    }
}

proptest! {
    #[test]
    fn valid_phones_are_accepted(phone in strategies::valid_phone_strategy()) {
        prop_assert!(validate_phone(&phone).is_ok());
    }

    #[test]
    fn wrong_length_phones_are_rejected(phone in strategies::wrong_length_phone_strategy()) {
        let err = validate_phone(&phone).unwrap_err();
        prop_assert_eq!(
            err,
            "Phone must be in international format, e.g. +1234567890".to_string()
        );
    }

    #[test]
    fn phones_without_leading_plus_are_rejected(digits in prop::string::string_regex(r"[0-9]{10,15}").unwrap()) {
        prop_assert!(validate_phone(&digits).is_err());
    }

    #[test]
    fn valid_emails_are_accepted(email in strategies::valid_email_strategy()) {
        prop_assert!(validate_email(&email, &[], None).is_ok());
    }

    #[test]
    fn strings_without_at_sign_are_invalid_emails(text in "[a-z0-9.]{1,20}") {
        prop_assert_eq!(
            validate_email(&text, &[], None).unwrap_err(),
            "Invalid email".to_string()
        );
    }

    #[test]
    fn duplicate_email_is_rejected_unless_editing_self(email in strategies::valid_email_strategy()) {
        let contacts = vec![contact_with_email("c-1", &email)];

        // New contact with an existing email collides
        prop_assert_eq!(
            validate_email(&email, &contacts, None).unwrap_err(),
            "Email already exists".to_string()
        );

        // The owning contact may keep its email on edit
        let own_id = ContactId::new("c-1").unwrap();
        prop_assert!(validate_email(&email, &contacts, Some(&own_id)).is_ok());
    }

    #[test]
    fn well_formed_drafts_always_validate(
        first in "[A-Za-z]{1,12}",
        last in "[A-Za-z]{1,12}",
        email in strategies::valid_email_strategy(),
        phone in strategies::valid_phone_strategy(),
    ) {
        let draft = ContactDraft::builder()
            .first_name(first)
            .last_name(last)
            .email(email)
            .phone(phone)
            .build();
        prop_assert!(validate_draft(&draft, &[], None).is_ok());
    }

    #[test]
    fn patch_merge_touches_only_set_fields(
        new_email in proptest::option::of(strategies::valid_email_strategy()),
        new_phone in proptest::option::of(strategies::valid_phone_strategy()),
        new_active in proptest::option::of(any::<bool>()),
    ) {
        let original = contact_with_email("c-1", "ann@example.com");
        let patch = ContactPatch {
            first_name: None,
            last_name: None,
            email: new_email.clone(),
            phone: new_phone.clone(),
            active: new_active,
        };

        let mut merged = original.clone();
        patch.apply_to(&mut merged);

        prop_assert_eq!(merged.first_name, original.first_name);
        prop_assert_eq!(merged.last_name, original.last_name);
        prop_assert_eq!(merged.email, new_email.unwrap_or(original.email));
        prop_assert_eq!(merged.phone, new_phone.unwrap_or(original.phone));
        prop_assert_eq!(merged.active, new_active.unwrap_or(original.active));
    }
}
