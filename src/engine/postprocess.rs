use crate::intent::Intent;

/// Keep at most this many sentences of generated text.
const MAX_SENTENCES: usize = 2;

/// Clean raw model output into a reply, or `None` when nothing usable
/// survives (the caller then falls back).
///
/// The model may or may not echo the input ahead of its reply; stripping
/// the prompt when present is part of the contract here, not incidental
/// string surgery. After stripping, the text is cut to the first two
/// non-empty sentences, rejoined with ". ", and given a trailing period.
/// Threat replies get a safety-tip suffix picked from the original
/// message's topic.
pub fn clean(raw: &str, prompt: &str, intent: Intent, original_message: &str) -> Option<String> {
    let stripped = if !prompt.is_empty() && raw.contains(prompt) {
        raw.replacen(prompt, "", 1)
    } else {
        raw.to_string()
    };

    let sentences: Vec<&str> = stripped
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if sentences.is_empty() {
        return None;
    }

    let mut text = sentences
        .iter()
        .take(MAX_SENTENCES)
        .copied()
        .collect::<Vec<_>>()
        .join(". ");
    if !text.ends_with('.') {
        text.push('.');
    }

    if intent == Intent::Threat {
        text.push(' ');
        text.push_str(safety_tip(original_message));
    }

    Some(text)
}

/// Fixed safety-tip suffixes for threat replies, chosen by topic keyword.
fn safety_tip(message: &str) -> &'static str {
    let msg = message.to_lowercase();
    if msg.contains("voice") {
        "Voice threats are serious - always verify callers independently!"
    } else if msg.contains("email") {
        "Email security tip: never click suspicious links!"
    } else {
        "I've got your back on this security issue!"
    }
}
