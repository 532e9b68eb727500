use ibex::fallback::fallback;
use ibex::intent::Intent;

#[test]
fn non_empty_for_every_intent() {
    for intent in Intent::ALL {
        let text = fallback(intent, "anything at all");
        assert!(!text.is_empty(), "empty fallback for {intent:?}");
    }
}

#[test]
fn research_template_quotes_the_message_verbatim() {
    let text = fallback(Intent::Research, "zero-day lifecycles");
    assert!(text.contains("\"zero-day lifecycles\""));
}

#[test]
fn creative_template_quotes_the_message_verbatim() {
    let text = fallback(Intent::Creative, "a poem about firewalls");
    assert!(text.contains("\"a poem about firewalls\""));
}

#[test]
fn fixed_templates_ignore_the_message() {
    let a = fallback(Intent::Greeting, "hello there");
    let b = fallback(Intent::Greeting, "completely different input");
    assert_eq!(a, b);
    assert!(a.contains("Ibex"));
}

#[test]
fn deterministic_for_identical_inputs() {
    for intent in Intent::ALL {
        assert_eq!(fallback(intent, "same input"), fallback(intent, "same input"));
    }
}

#[test]
fn default_category_has_a_template() {
    let text = fallback(Intent::Casual, "whatever");
    assert!(!text.is_empty());
}
