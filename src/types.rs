use serde::{Deserialize, Serialize};

use crate::engine::ReplySource;

/// Inbound chat request. `message` defaults to empty so a missing field
/// surfaces as the same client error as a blank one.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Optional client-supplied intent; unknown values are ignored.
    pub intent_hint: Option<String>,
    /// Conversation session the context window is scoped to.
    #[serde(default = "default_session")]
    pub session: String,
}

fn default_session() -> String {
    "main".into()
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub model_used: ReplySource,
    pub processing_time_ms: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    #[serde(default = "default_threat_type")]
    pub threat_type: String,
}

fn default_threat_type() -> String {
    "general".into()
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub advice: String,
    pub threat_type: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
