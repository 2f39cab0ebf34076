use crate::aggregate::Aggregator;
use crate::cache::MovieCache;
use crate::config::Config;
use crate::error::MovieError;
use crate::metadata::{MetadataApi, MetadataClient};
use crate::models::Movie;
use crate::streaming::{StreamingApi, StreamingClient};
use crate::upstream;
use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::Query;
use serde::Deserialize;
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub const MAX_BATCH_IDS: usize = 50;
const WELCOME: &str = "Welcome to the Movie API. Use /movies to get a list of movies or /movies/{id} to get details of a specific movie.";

#[derive(Clone)]
pub struct AppState {
    pub movies: Aggregator,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = upstream::http_client(config.upstream_timeout)?;
        let metadata: Arc<dyn MetadataApi> =
            Arc::new(MetadataClient::from_config(config, client.clone()));
        let streaming: Arc<dyn StreamingApi> =
            Arc::new(StreamingClient::from_config(config, client));
        let movies = Aggregator::new(metadata, streaming, MovieCache::new())
            .with_batch_concurrency(config.batch_concurrency);
        Ok(Self { movies })
    }
}

pub async fn run_server(config: Config) -> Result<()> {
    let state = AppState::from_config(&config)?;
    info!(
        "Batch lookups limited to {} concurrent movies",
        config.batch_concurrency
    );

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/movies", get(list_movies))
        .route("/movies/:id", get(get_movie))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn welcome() -> &'static str {
    WELCOME
}

async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Deserialize)]
struct MovieIds {
    #[serde(default)]
    id: Vec<String>,
}

async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<MovieIds>,
) -> Result<Json<Vec<Movie>>, AppError> {
    if query.id.len() > MAX_BATCH_IDS {
        return Err(AppError::BadRequest(format!(
            "at most {} ids per request, got {}",
            MAX_BATCH_IDS,
            query.id.len()
        )));
    }
    if query.id.iter().any(|id| id.trim().is_empty()) {
        return Err(AppError::BadRequest("movie ids must not be blank".into()));
    }
    let movies = state.movies.movies(&query.id).await?;
    Ok(Json(movies))
}

async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, AppError> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest("movie ids must not be blank".into()));
    }
    let movie = state.movies.movie(&id).await?;
    Ok(Json(movie))
}

#[derive(Debug)]
pub enum AppError {
    Movie(MovieError),
    BadRequest(String),
}

impl From<MovieError> for AppError {
    fn from(err: MovieError) -> Self {
        AppError::Movie(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Movie(err @ MovieError::NotFound { .. }) => (
                StatusCode::NOT_FOUND,
                json!({ "error": err.to_string(), "id": err.id() }),
            ),
            // Upstream details stay in the logs.
            AppError::Movie(err @ MovieError::Upstream { .. }) => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": "upstream provider failed", "id": err.id() }),
            ),
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
        };
        (status, Json(body)).into_response()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
