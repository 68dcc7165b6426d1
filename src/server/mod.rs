pub mod handlers;
pub mod types;

use crate::{Result, config::Config, feedback::FeedbackStore, llm::OpenAiGateway, shell::Shell};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/preview", post(handlers::preview))
        .route("/api/tips", post(handlers::tips))
        .route(
            "/api/feedback",
            get(handlers::list_feedback).post(handlers::submit_feedback),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Builds the production gateway, feedback store and shell from `config`.
pub fn app_state(config: &Config) -> Result<AppState> {
    let gateway = OpenAiGateway::new(config.llm.clone())?;
    info!("Inference gateway ready for model: {}", gateway.model());

    let feedback = FeedbackStore::new(&config.feedback.path);

    let shell = Shell::new(Arc::new(gateway), Arc::new(feedback))
        .with_preview_max_side(config.server.preview_max_side);

    Ok(AppState {
        shell: Arc::new(shell),
    })
}

pub async fn run(config: Config) -> Result<()> {
    let app = router(app_state(&config)?, config.server.max_upload_bytes);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
