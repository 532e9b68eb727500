pub mod http;

pub use http::HttpGenerator;

use async_trait::async_trait;

/// Decoding parameters for a single generation call. Output length
/// bounds are margins over the estimated prompt length in tokens.
#[derive(Debug, Clone)]
pub struct GenParams {
    pub temperature: f32,
    pub top_p: f32,
    pub no_repeat_ngram: u32,
    pub min_new_tokens: u32,
    pub max_new_tokens: u32,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            top_p: 0.9,
            no_repeat_ngram: 2,
            min_new_tokens: 10,
            max_new_tokens: 50,
        }
    }
}

/// Failure of a single generation call. Each kind carries a distinct
/// diagnostic code for logs; all of them route to the fallback
/// synthesizer. No retries anywhere: one failure is final for the
/// request.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("generation timed out after {0}s")]
    Timeout(u64),
    #[error("model endpoint returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("request failed: {0}")]
    Request(String),
    #[error("unreadable model response: {0}")]
    Decode(String),
}

impl GenerateError {
    pub fn code(&self) -> &'static str {
        match self {
            GenerateError::Timeout(_) => "timeout",
            GenerateError::Api { .. } => "api",
            GenerateError::Request(_) => "request",
            GenerateError::Decode(_) => "decode",
        }
    }
}

/// The external model behind a single seam: a prompt and parameters go
/// in, raw text or a typed failure comes out. The call may block for
/// model inference; implementations own their timeout.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, params: &GenParams) -> Result<String, GenerateError>;
}

/// Estimate token count using a simple heuristic: ~4 chars per token.
/// This matches the rough BPE average for English text.
pub fn estimate_tokens(text: &str) -> u32 {
    (text.len() as f64 / 4.0).ceil() as u32
}
