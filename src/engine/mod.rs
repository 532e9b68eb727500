pub mod postprocess;

use serde::Serialize;
use tracing::{debug, warn};

use crate::context::ContextStore;
use crate::fallback::fallback;
use crate::intent::{Intent, IntentClassifier};
use crate::model::{GenParams, TextGenerator};
use crate::persona::PersonaPrompts;
use crate::prompt::PromptBuilder;

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Generated,
    Fallback,
}

impl ReplySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplySource::Generated => "generated",
            ReplySource::Fallback => "fallback",
        }
    }
}

/// A completed reply. `text` is always non-empty.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub intent: Intent,
    pub source: ReplySource,
}

/// The orchestration pipeline: classify the message, assemble a persona
/// prompt over recent context, invoke the model, and either clean the
/// output or substitute the intent's fallback template.
///
/// `generator: None` means the model was not loaded at startup; the
/// engine then answers from fallback templates permanently without
/// attempting calls.
pub struct Engine {
    classifier: IntentClassifier,
    personas: PersonaPrompts,
    builder: PromptBuilder,
    params: GenParams,
    generator: Option<Box<dyn TextGenerator>>,
}

impl Engine {
    pub fn new(
        classifier: IntentClassifier,
        personas: PersonaPrompts,
        builder: PromptBuilder,
        params: GenParams,
        generator: Option<Box<dyn TextGenerator>>,
    ) -> Self {
        Self {
            classifier,
            personas,
            builder,
            params,
            generator,
        }
    }

    /// Model-available flag for the status surface.
    pub fn model_available(&self) -> bool {
        self.generator.is_some()
    }

    /// Run one message through the pipeline. Every path terminates in a
    /// non-empty reply; generation failures never surface to the caller.
    ///
    /// A valid `intent_hint` overrides classification; an unknown hint is
    /// ignored. The context store is appended only after a successfully
    /// processed generated reply, so fallback text never crowds the
    /// window.
    pub async fn chat(
        &self,
        message: &str,
        intent_hint: Option<&str>,
        ctx: &mut ContextStore,
    ) -> Reply {
        let intent = intent_hint
            .and_then(Intent::from_name)
            .unwrap_or_else(|| self.classifier.classify(message));

        let generator = match &self.generator {
            Some(g) => g,
            None => {
                debug!(intent = intent.as_str(), "model unavailable, using fallback");
                return Reply {
                    text: fallback(intent, message),
                    intent,
                    source: ReplySource::Fallback,
                };
            }
        };

        let prompt = self.builder.build(
            message,
            self.personas.instruction(intent),
            &ctx.recent(self.builder.context_turns()),
        );

        let raw = match generator.generate(&prompt, &self.params).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(intent = intent.as_str(), code = e.code(), "generation failed: {e}");
                return Reply {
                    text: fallback(intent, message),
                    intent,
                    source: ReplySource::Fallback,
                };
            }
        };

        match postprocess::clean(&raw, &prompt, intent, message) {
            Some(text) => {
                ctx.append(message, &text);
                Reply {
                    text,
                    intent,
                    source: ReplySource::Generated,
                }
            }
            None => {
                warn!(
                    intent = intent.as_str(),
                    code = "degenerate",
                    "empty output after cleanup, using fallback"
                );
                Reply {
                    text: fallback(intent, message),
                    intent,
                    source: ReplySource::Fallback,
                }
            }
        }
    }
}
