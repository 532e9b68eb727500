use ibex::intent::{Intent, IntentClassifier, IntentRule};

#[test]
fn threat_checked_before_greeting() {
    let classifier = IntentClassifier::new();
    assert_eq!(
        classifier.classify("hello, I think this is a phishing scam"),
        Intent::Threat
    );
}

#[test]
fn threat_keyword_wins_when_no_higher_priority_match() {
    let classifier = IntentClassifier::new();
    assert_eq!(classifier.classify("this looks suspicious"), Intent::Threat);
    assert_eq!(classifier.classify("someone tried to hack me"), Intent::Threat);
}

#[test]
fn greeting_resolves_without_threat_words() {
    let classifier = IntentClassifier::new();
    assert_eq!(classifier.classify("hello there"), Intent::Greeting);
}

#[test]
fn empty_message_is_casual() {
    let classifier = IntentClassifier::new();
    assert_eq!(classifier.classify(""), Intent::Casual);
}

#[test]
fn keyword_free_message_is_casual() {
    let classifier = IntentClassifier::new();
    assert_eq!(classifier.classify("sunny weather today"), Intent::Casual);
}

#[test]
fn matching_is_case_insensitive() {
    let classifier = IntentClassifier::new();
    assert_eq!(classifier.classify("HELLO FRIEND"), Intent::Greeting);
    assert_eq!(classifier.classify("PHISHING ALERT"), Intent::Threat);
}

#[test]
fn each_category_reachable() {
    let classifier = IntentClassifier::new();
    let cases = [
        ("is this email dangerous?", Intent::Threat),
        ("good morning to you", Intent::Greeting),
        ("can you give me some advice", Intent::Help),
        ("thanks, that was great", Intent::Appreciation),
        ("we are a startup seeking funding", Intent::Startup),
        ("please research quantum routing", Intent::Research),
        ("write me a story about a goat", Intent::Creative),
        ("just passing by", Intent::Casual),
    ];
    for (message, expected) in cases {
        assert_eq!(classifier.classify(message), expected, "message: {message}");
    }
}

#[test]
fn hint_names_parse_case_insensitively() {
    assert_eq!(Intent::from_name("THREAT"), Some(Intent::Threat));
    assert_eq!(Intent::from_name(" greeting "), Some(Intent::Greeting));
    assert_eq!(Intent::from_name("research"), Some(Intent::Research));
    assert_eq!(Intent::from_name("nonsense"), None);
    assert_eq!(Intent::from_name(""), None);
}

#[test]
fn custom_rules_evaluated_in_order() {
    // First matching rule wins; position is the tie-break.
    let classifier = IntentClassifier::with_rules(vec![
        IntentRule {
            intent: Intent::Research,
            keywords: vec!["quantum".into()],
        },
        IntentRule {
            intent: Intent::Threat,
            keywords: vec!["quantum".into(), "hack".into()],
        },
    ]);
    assert_eq!(classifier.classify("quantum hack incoming"), Intent::Research);
    assert_eq!(classifier.classify("hack incoming"), Intent::Threat);
}

#[test]
fn custom_rule_keywords_lowercased_on_construction() {
    let classifier = IntentClassifier::with_rules(vec![IntentRule {
        intent: Intent::Threat,
        keywords: vec!["SCAM".into()],
    }]);
    assert_eq!(classifier.classify("an obvious scam"), Intent::Threat);
}

#[test]
fn custom_rules_fall_through_to_casual() {
    let classifier = IntentClassifier::with_rules(vec![IntentRule {
        intent: Intent::Threat,
        keywords: vec!["breach".into()],
    }]);
    assert_eq!(classifier.classify("hello there"), Intent::Casual);
}
