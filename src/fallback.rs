use crate::intent::Intent;

/// Deterministic templated reply for when generation cannot produce
/// usable output: model unavailable, call failed or timed out, or the
/// cleaned result was empty.
///
/// Non-empty for every intent. Research and creative templates quote the
/// original message back; the rest are fixed strings.
pub fn fallback(intent: Intent, message: &str) -> String {
    match intent {
        Intent::Greeting => {
            "Hey there! I'm Ibex, your witty AI security companion. Ready to keep you safe today?"
                .to_string()
        }
        Intent::Threat => {
            "I'm analyzing this threat now. Stay calm - I've got your back on this one!".to_string()
        }
        Intent::Help => {
            "I'm here to help! Security is my specialty - what can I assist you with?".to_string()
        }
        Intent::Appreciation => {
            "You're very welcome! Keeping you safe is what I do best!".to_string()
        }
        Intent::Startup => {
            "Every great company starts with good security habits. Tell me more about what you're building and we'll go from there."
                .to_string()
        }
        Intent::Research => format!(
            "Good question! I'll dig into \"{message}\" and report back with what I find - carefully sourced, as always."
        ),
        Intent::Creative => format!(
            "Let's run with \"{message}\" - I'll bring the ideas, you bring the judgment."
        ),
        Intent::Casual => {
            "I'm doing great! Always ready to chat and protect. What's on your mind?".to_string()
        }
    }
}
