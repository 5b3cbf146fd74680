//! Property-based tests for description cleaning and truncation

use proptest::prelude::*;

use crate::core::nethys::extract::{clean_html, truncate_description, DESCRIPTION_LIMIT, ELLIPSIS};

// ============================================================================
// Strategies
// ============================================================================

/// Prose without markup or character references.
fn arb_plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,;:!?'()\\-]{0,600}"
}

/// Prose of mixed-width characters, to catch byte/char confusion.
fn arb_unicode_text() -> impl Strategy<Value = String> {
    "[a-zé•🔗 ]{0,800}"
}

/// Prose interleaved with simple inline tags.
fn arb_tagged_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (
            "[a-z ]{0,20}",
            prop_oneof![
                Just("<b>"),
                Just("</b>"),
                Just("<i>"),
                Just("</i>"),
                Just("<a href=\"/Spells.aspx?ID=1\">"),
                Just("</a>"),
                Just("<span class=\"action\">"),
                Just("</span>"),
            ],
        ),
        0..20,
    )
    .prop_map(|parts| {
        parts
            .into_iter()
            .map(|(text, tag)| format!("{text}{tag}"))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_short_text_is_unchanged(text in arb_unicode_text()) {
        prop_assume!(text.chars().count() <= DESCRIPTION_LIMIT);
        let description = truncate_description(text.clone(), DESCRIPTION_LIMIT);
        prop_assert_eq!(description.text, text);
        prop_assert!(!description.truncated);
    }

    #[test]
    fn prop_long_text_is_cut_to_limit(text in arb_unicode_text()) {
        prop_assume!(text.chars().count() > DESCRIPTION_LIMIT);
        let description = truncate_description(text.clone(), DESCRIPTION_LIMIT);

        prop_assert!(description.truncated);
        prop_assert_eq!(
            description.text.chars().count(),
            DESCRIPTION_LIMIT + ELLIPSIS.chars().count()
        );
        prop_assert!(description.text.ends_with(ELLIPSIS));

        let kept: String = text.chars().take(DESCRIPTION_LIMIT).collect();
        prop_assert!(description.text.starts_with(&kept));
    }

    #[test]
    fn prop_plain_text_survives_cleaning(text in arb_plain_text()) {
        prop_assert_eq!(clean_html(&text), text.trim());
    }

    #[test]
    fn prop_cleaning_removes_all_tags(text in arb_tagged_text()) {
        let cleaned = clean_html(&text);
        prop_assert!(!cleaned.contains('<'));
        prop_assert!(!cleaned.contains('>'));
    }

    #[test]
    fn prop_cleaning_is_idempotent(text in arb_tagged_text()) {
        let once = clean_html(&text);
        prop_assert_eq!(clean_html(&once), once.clone());
    }
}
