use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::IbexConfig;
use crate::context::ContextStore;
use crate::engine::Engine;
use crate::model::{HttpGenerator, TextGenerator};
use crate::persona::PersonaPrompts;
use crate::prompt::PromptBuilder;
use crate::types::{AdviceRequest, AdviceResponse, ChatRequest, ChatResponse};

pub struct AppState {
    pub engine: Engine,
    pub config: IbexConfig,
    /// One context store per conversation session, each behind its own
    /// lock so concurrent requests on one session serialize and separate
    /// sessions never share history.
    contexts: RwLock<HashMap<String, Arc<Mutex<ContextStore>>>>,
}

impl AppState {
    pub fn new(engine: Engine, config: IbexConfig) -> Self {
        Self {
            engine,
            config,
            contexts: RwLock::new(HashMap::new()),
        }
    }

    /// Per-session context, created on first use. Double-checked so the
    /// common path takes only the read lock.
    pub async fn session_context(&self, session: &str) -> Arc<Mutex<ContextStore>> {
        {
            let contexts = self.contexts.read().await;
            if let Some(ctx) = contexts.get(session) {
                return Arc::clone(ctx);
            }
        }

        let mut contexts = self.contexts.write().await;
        Arc::clone(contexts.entry(session.to_string()).or_insert_with(|| {
            Arc::new(Mutex::new(ContextStore::new(
                self.config.context.capacity,
                self.config.context.excerpt_chars,
            )))
        }))
    }

    pub async fn session_count(&self) -> usize {
        self.contexts.read().await.len()
    }
}

pub async fn run(config: IbexConfig) -> anyhow::Result<()> {
    let generator = build_generator(&config).await;
    let engine = build_engine(&config, generator);

    let is_loopback = config.server.bind == "127.0.0.1" || config.server.bind == "::1";
    let addr = format!("{}:{}", config.server.bind, config.server.port);

    let state = Arc::new(AppState::new(engine, config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("ibex gateway listening on {addr}");
    if is_loopback {
        info!("bound to loopback - local access only");
    } else {
        warn!("bound to {addr} - exposed beyond loopback");
    }

    axum::serve(listener, app).await?;
    Ok(())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/security-advice", post(security_advice))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Decide model availability once, at startup. No endpoint or a failed
/// probe means every request answers from fallback templates without
/// paying per-request call latency.
async fn build_generator(config: &IbexConfig) -> Option<Box<dyn TextGenerator>> {
    let endpoint = match config.model.endpoint.as_deref() {
        Some(e) => e,
        None => {
            warn!("no model endpoint configured, running in fallback mode");
            return None;
        }
    };

    let generator = HttpGenerator::new(endpoint, config.model.timeout_secs);
    if generator.probe().await {
        Some(Box::new(generator))
    } else {
        warn!(endpoint, "model probe failed, running in fallback mode");
        None
    }
}

pub fn build_engine(config: &IbexConfig, generator: Option<Box<dyn TextGenerator>>) -> Engine {
    let rules = config.intent_rules();
    let classifier = if rules.is_empty() {
        crate::intent::IntentClassifier::new()
    } else {
        crate::intent::IntentClassifier::with_rules(rules)
    };
    info!(rules = classifier.rule_count(), "intent classifier configured");

    let personas = PersonaPrompts::with_overrides(&config.persona.name, &config.persona.instructions);
    let builder = PromptBuilder::new(
        personas.name(),
        config.context.prompt_turns,
        config.context.max_prompt_chars,
    );

    Engine::new(
        classifier,
        personas,
        builder,
        config.generation.params(),
        generator,
    )
}

async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "ibex",
        "status": "active",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "AI security companion chat gateway",
        "endpoints": ["/chat", "/security-advice", "/health"],
    }))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "model_available": state.engine.model_available(),
        "sessions": state.session_count().await,
        "timestamp": chrono::Utc::now(),
    }))
}

async fn chat(State(state): State<Arc<AppState>>, Json(req): Json<ChatRequest>) -> Response {
    let started = Instant::now();

    let message = req.message.trim();
    if message.is_empty() {
        // The one client-visible error: there is no message to answer.
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "message required"})),
        )
            .into_response();
    }

    let request_id = Uuid::new_v4();
    let ctx = state.session_context(&req.session).await;
    let mut ctx = ctx.lock().await;
    let reply = state
        .engine
        .chat(message, req.intent_hint.as_deref(), &mut ctx)
        .await;
    drop(ctx);

    let elapsed_ms = started.elapsed().as_millis() as u64;
    info!(
        %request_id,
        session = %req.session,
        intent = reply.intent.as_str(),
        source = reply.source.as_str(),
        elapsed_ms,
        "chat completed"
    );

    Json(ChatResponse {
        response: reply.text,
        model_used: reply.source,
        processing_time_ms: elapsed_ms,
        timestamp: chrono::Utc::now(),
    })
    .into_response()
}

/// Security-advice endpoint: synthesizes an advice request for the given
/// threat type and runs it through the same pipeline under a dedicated
/// session, so advice lookups never crowd a chat window.
async fn security_advice(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AdviceRequest>,
) -> Json<AdviceResponse> {
    let threat_type = if req.threat_type.trim().is_empty() {
        "general".to_string()
    } else {
        req.threat_type
    };

    let message = format!("Provide security advice for {threat_type} threat");
    let ctx = state.session_context("security-advice").await;
    let mut ctx = ctx.lock().await;
    let reply = state.engine.chat(&message, None, &mut ctx).await;
    drop(ctx);

    info!(threat_type = %threat_type, source = reply.source.as_str(), "advice generated");

    Json(AdviceResponse {
        advice: reply.text,
        threat_type,
        timestamp: chrono::Utc::now(),
    })
}
