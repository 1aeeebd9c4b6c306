//! HTTP route handlers for the article generator API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::services::ServeDir;

use crate::article::export::{GeneratedArticle, MARKDOWN_MIME};
use crate::article::form::ArticleForm;
use crate::article::prompt_builder::build_prompt;
use crate::llm::generation::generate_article;

use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();
    Router::new()
        .route("/health", get(health_check))
        .route("/api/article", post(generate))
        .route("/api/article/download", get(download_latest))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let endpoint = Arc::clone(&state.endpoint);
    let ready = tokio::task::spawn_blocking(move || endpoint.is_ready())
        .await
        .unwrap_or(false);
    let ollama = if ready { "ready" } else { "unreachable" };

    Json(serde_json::json!({
        "status": "ok",
        "service": "article-generator",
        "version": env!("CARGO_PKG_VERSION"),
        "ollama": ollama,
    }))
}

/// Handle article generation requests.
async fn generate(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ArticleForm>,
) -> Result<Json<GeneratedArticle>, (StatusCode, String)> {
    let (request, config) = form
        .into_parts(&state.config.default_model)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    tracing::info!(
        "Generating article on {:?} with {} ({} words)",
        request.topic,
        config.model,
        request.target_words
    );

    let endpoint = Arc::clone(&state.endpoint);
    let model = config.model.clone();
    let content = tokio::task::spawn_blocking(move || {
        let prompt = build_prompt(&request);
        generate_article(endpoint.as_ref(), &prompt, &config)
    })
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("generation task failed: {e}"),
        )
    })?
    .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))?;

    let article = GeneratedArticle::new(content, model);
    tracing::info!("Article ready: {}", article.file_name);
    state.store_article(article.clone()).await;

    Ok(Json(article))
}

/// Serve the latest article as a Markdown download.
async fn download_latest(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let article = state.latest_article().await.ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            "No article has been generated yet.".to_string(),
        )
    })?;

    let headers = [
        (header::CONTENT_TYPE, format!("{MARKDOWN_MIME}; charset=utf-8")),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", article.file_name),
        ),
    ];
    Ok((headers, article.to_bytes()))
}
