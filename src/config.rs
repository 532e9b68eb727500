use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

use crate::intent::{Intent, IntentRule};
use crate::model::GenParams;

/// Top-level configuration loaded from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IbexConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub generation: GenerationConfig,
    pub context: ContextConfig,
    pub persona: PersonaConfig,
    /// Optional replacement rule list for the intent classifier,
    /// highest priority first. Empty means built-in rules.
    #[serde(default)]
    pub intents: Vec<IntentRuleConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
        }
    }
}

fn default_port() -> u16 {
    5000
}
fn default_bind() -> String {
    "127.0.0.1".into()
}

#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    /// Base URL of the text-generation endpoint. None means the gateway
    /// runs permanently in fallback mode.
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_no_repeat_ngram")]
    pub no_repeat_ngram: u32,
    #[serde(default = "default_min_new_tokens")]
    pub min_new_tokens: u32,
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            no_repeat_ngram: default_no_repeat_ngram(),
            min_new_tokens: default_min_new_tokens(),
            max_new_tokens: default_max_new_tokens(),
        }
    }
}

impl GenerationConfig {
    pub fn params(&self) -> GenParams {
        GenParams {
            temperature: self.temperature,
            top_p: self.top_p,
            no_repeat_ngram: self.no_repeat_ngram,
            min_new_tokens: self.min_new_tokens,
            max_new_tokens: self.max_new_tokens,
        }
    }
}

fn default_temperature() -> f32 {
    0.8
}
fn default_top_p() -> f32 {
    0.9
}
fn default_no_repeat_ngram() -> u32 {
    2
}
fn default_min_new_tokens() -> u32 {
    10
}
fn default_max_new_tokens() -> u32 {
    50
}

#[derive(Debug, Deserialize)]
pub struct ContextConfig {
    /// Turns kept per session before FIFO eviction.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Excerpt length stored per side of a turn.
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
    /// Recent turns rendered into the prompt.
    #[serde(default = "default_prompt_turns")]
    pub prompt_turns: usize,
    /// Hard cap on the assembled prompt.
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            excerpt_chars: default_excerpt_chars(),
            prompt_turns: default_prompt_turns(),
            max_prompt_chars: default_max_prompt_chars(),
        }
    }
}

fn default_capacity() -> usize {
    3
}
fn default_excerpt_chars() -> usize {
    50
}
fn default_prompt_turns() -> usize {
    2
}
fn default_max_prompt_chars() -> usize {
    400
}

#[derive(Debug, Deserialize)]
pub struct PersonaConfig {
    #[serde(default = "default_persona_name")]
    pub name: String,
    /// Per-intent instruction overrides, keyed by intent name.
    #[serde(default)]
    pub instructions: HashMap<String, String>,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: default_persona_name(),
            instructions: HashMap::new(),
        }
    }
}

fn default_persona_name() -> String {
    "Ibex".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntentRuleConfig {
    pub intent: String,
    pub keywords: Vec<String>,
}

impl IbexConfig {
    /// Classifier rules parsed from config. Intent names were checked by
    /// `validate`, so unknown names cannot survive to here.
    pub fn intent_rules(&self) -> Vec<IntentRule> {
        self.intents
            .iter()
            .filter_map(|r| {
                Intent::from_name(&r.intent).map(|intent| IntentRule {
                    intent,
                    keywords: r.keywords.clone(),
                })
            })
            .collect()
    }
}

/// Load configuration from file or use defaults.
///
/// Search order:
/// 1. `IBEX_CONFIG` env var
/// 2. `~/.ibex/config.toml`
/// 3. Zero-config defaults (no file needed)
pub fn load() -> anyhow::Result<IbexConfig> {
    let path = config_path();

    if path.exists() {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let mut config: IbexConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config at {}: {e}", path.display()))?;

        resolve_endpoint(&mut config);
        validate(&config)?;

        info!("loaded config from {}", path.display());
        Ok(config)
    } else {
        info!("no config file found, using zero-config defaults");
        let mut config = IbexConfig::default();
        resolve_endpoint(&mut config);
        Ok(config)
    }
}

fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("IBEX_CONFIG") {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(".ibex").join("config.toml")
}

/// Resolve the model endpoint from the environment if not set in config.
fn resolve_endpoint(config: &mut IbexConfig) {
    if config.model.endpoint.is_none() {
        config.model.endpoint = std::env::var("IBEX_MODEL_ENDPOINT").ok();
    }
}

/// Validate the config and return clear error messages.
pub fn validate(config: &IbexConfig) -> anyhow::Result<()> {
    if config.generation.temperature <= 0.0 {
        anyhow::bail!("generation.temperature must be > 0");
    }
    if config.generation.top_p <= 0.0 || config.generation.top_p > 1.0 {
        anyhow::bail!("generation.top_p must be in (0, 1]");
    }
    if config.generation.max_new_tokens < config.generation.min_new_tokens {
        anyhow::bail!("generation.max_new_tokens must be >= generation.min_new_tokens");
    }
    if config.model.timeout_secs == 0 {
        anyhow::bail!("model.timeout_secs must be > 0");
    }
    if config.context.capacity == 0 {
        anyhow::bail!("context.capacity must be > 0");
    }
    if config.context.excerpt_chars == 0 {
        anyhow::bail!("context.excerpt_chars must be > 0");
    }
    if config.context.max_prompt_chars == 0 {
        anyhow::bail!("context.max_prompt_chars must be > 0");
    }

    for (i, rule) in config.intents.iter().enumerate() {
        if Intent::from_name(&rule.intent).is_none() {
            anyhow::bail!("intents[{i}] names unknown intent '{}'", rule.intent);
        }
        if rule.keywords.is_empty() {
            anyhow::bail!("intents[{i}] ('{}') has no keywords", rule.intent);
        }
    }

    for key in config.persona.instructions.keys() {
        if Intent::from_name(key).is_none() {
            anyhow::bail!("persona.instructions names unknown intent '{key}'");
        }
    }

    Ok(())
}
