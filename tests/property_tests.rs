//! Property-based tests for catalog field validation.

use proptest::prelude::*;
use storefront_catalog::entities::{validate_not_blank, validate_slug, SLUG_MAX_LENGTH};

// Strategies for generating test data
fn slug_strategy() -> impl Strategy<Value = String> {
    "[-a-zA-Z0-9_]{1,50}".prop_map(|s| s)
}

fn forbidden_char_strategy() -> impl Strategy<Value = char> {
    prop_oneof![
        Just(' '),
        Just('/'),
        Just('.'),
        Just('!'),
        Just('é'),
        Just('\n'),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn well_formed_slugs_are_accepted(slug in slug_strategy()) {
        prop_assert!(validate_slug(&slug).is_ok(), "valid slug rejected: {}", slug);
    }

    #[test]
    fn any_forbidden_character_rejects_the_slug(
        prefix in "[a-z0-9]{0,20}",
        bad in forbidden_char_strategy(),
        suffix in "[a-z0-9]{0,20}",
    ) {
        let slug = format!("{}{}{}", prefix, bad, suffix);
        prop_assert!(validate_slug(&slug).is_err(), "invalid slug accepted: {:?}", slug);
    }

    #[test]
    fn overlong_slugs_are_rejected(len in (SLUG_MAX_LENGTH + 1)..200usize) {
        let slug = "x".repeat(len);
        prop_assert!(validate_slug(&slug).is_err());
    }

    #[test]
    fn whitespace_only_text_is_blank(s in "[ \t\n]{0,10}") {
        prop_assert!(validate_not_blank(&s).is_err());
    }

    #[test]
    fn text_with_visible_characters_is_not_blank(s in " {0,3}[a-zA-Z0-9]{1,10} {0,3}") {
        prop_assert!(validate_not_blank(&s).is_ok());
    }
}
