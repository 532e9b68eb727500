use serde::{Deserialize, Serialize};

/// Coarse category of a user message. Selects the persona instruction
/// used for prompt construction and the fallback template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Threat,
    Help,
    Appreciation,
    Startup,
    Research,
    Creative,
    Casual,
}

impl Intent {
    pub const ALL: [Intent; 8] = [
        Intent::Greeting,
        Intent::Threat,
        Intent::Help,
        Intent::Appreciation,
        Intent::Startup,
        Intent::Research,
        Intent::Creative,
        Intent::Casual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Threat => "threat",
            Intent::Help => "help",
            Intent::Appreciation => "appreciation",
            Intent::Startup => "startup",
            Intent::Research => "research",
            Intent::Creative => "creative",
            Intent::Casual => "casual",
        }
    }

    /// Parse an intent name as sent in a client hint. Unknown names yield
    /// `None` so callers can ignore bad hints and classify instead.
    pub fn from_name(name: &str) -> Option<Intent> {
        match name.trim().to_lowercase().as_str() {
            "greeting" => Some(Intent::Greeting),
            "threat" => Some(Intent::Threat),
            "help" => Some(Intent::Help),
            "appreciation" => Some(Intent::Appreciation),
            "startup" => Some(Intent::Startup),
            "research" => Some(Intent::Research),
            "creative" => Some(Intent::Creative),
            "casual" => Some(Intent::Casual),
            _ => None,
        }
    }
}

/// One prioritized classification rule: the first rule whose keyword set
/// matches wins, so position in the rule list is semantically meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: Vec<String>,
}

/// Keyword classifier over an ordered rule list.
///
/// Matching is case-insensitive substring search. Threat keywords are
/// checked ahead of everything else so a message carrying both a greeting
/// word and a threat word resolves to the security branch. Unmatched or
/// empty input falls through to `Casual`.
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

/// Default rule list, highest priority first.
const DEFAULT_RULES: &[(Intent, &[&str])] = &[
    (
        Intent::Threat,
        &[
            "threat",
            "suspicious",
            "scam",
            "phishing",
            "hack",
            "dangerous",
            "malware",
            "breach",
        ],
    ),
    (
        Intent::Greeting,
        &["hello", "hi", "hey", "good morning", "good evening"],
    ),
    (
        Intent::Help,
        &["help", "how", "advice", "guide", "what should"],
    ),
    (
        Intent::Appreciation,
        &["thank", "thanks", "good job", "awesome"],
    ),
    (
        Intent::Startup,
        &["startup", "founder", "pitch deck", "business plan"],
    ),
    (
        Intent::Research,
        &["research", "study", "investigate", "deep dive"],
    ),
    (
        Intent::Creative,
        &["creative", "story", "poem", "brainstorm"],
    ),
];

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Classifier with the built-in rule list.
    pub fn new() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(intent, keywords)| IntentRule {
                intent: *intent,
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();
        Self { rules }
    }

    /// Classifier with a caller-supplied rule list, evaluated in order.
    /// Keywords are lowercased once here; `classify` lowercases only the
    /// message.
    pub fn with_rules(rules: Vec<IntentRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|r| IntentRule {
                intent: r.intent,
                keywords: r.keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();
        Self { rules }
    }

    /// Map a raw message to an intent. Pure, total, never panics.
    pub fn classify(&self, message: &str) -> Intent {
        let msg = message.to_lowercase();
        for rule in &self.rules {
            if rule.keywords.iter().any(|kw| msg.contains(kw.as_str())) {
                return rule.intent;
            }
        }
        Intent::Casual
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}
