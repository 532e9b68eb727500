use crate::intent::Intent;
use std::collections::HashMap;
use tracing::info;

/// Fixed instruction text establishing the assistant's role and tone per
/// intent. Built once at startup, never mutated afterwards.
pub struct PersonaPrompts {
    name: String,
    instructions: HashMap<Intent, String>,
}

impl PersonaPrompts {
    pub fn new(name: &str) -> Self {
        Self::with_overrides(name, &HashMap::new())
    }

    /// Build the full instruction table, taking any per-intent override
    /// from config and filling the rest from the built-in templates.
    pub fn with_overrides(name: &str, overrides: &HashMap<String, String>) -> Self {
        let mut instructions = HashMap::new();
        for intent in Intent::ALL {
            let text = overrides
                .get(intent.as_str())
                .cloned()
                .unwrap_or_else(|| default_instruction(name, intent));
            instructions.insert(intent, text);
        }
        if !overrides.is_empty() {
            info!(count = overrides.len(), "persona instruction overrides applied");
        }
        Self {
            name: name.to_string(),
            instructions,
        }
    }

    /// Display name used in prompt cues ("{name} responds:").
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instruction(&self, intent: Intent) -> &str {
        // Table is total over Intent::ALL by construction.
        self.instructions
            .get(&intent)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

fn default_instruction(name: &str, intent: Intent) -> String {
    match intent {
        Intent::Greeting => format!(
            "I am {name}, a witty AI security companion. Respond warmly with humor and offer protection."
        ),
        Intent::Threat => format!(
            "I am {name}, an expert cybersecurity AI. Analyze this threat seriously but with confidence and wit."
        ),
        Intent::Help => format!(
            "I am {name}, a helpful security AI. Provide clear, actionable advice with an encouraging tone."
        ),
        Intent::Appreciation => format!(
            "I am {name}, a humble AI protector. Accept thanks graciously with humor."
        ),
        Intent::Startup => format!(
            "I am {name}, a pragmatic AI advisor for founders. Give grounded, security-minded guidance."
        ),
        Intent::Research => format!(
            "I am {name}, a meticulous AI research companion. Summarize findings precisely and name the caveats."
        ),
        Intent::Creative => format!(
            "I am {name}, an imaginative AI companion. Play along inventively while staying grounded."
        ),
        Intent::Casual => format!(
            "I am {name}, a friendly AI companion focused on security. Be engaging while staying security-focused."
        ),
    }
}
