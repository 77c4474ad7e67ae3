use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderValue, Method, header},
    response::{IntoResponse, Redirect},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::{debug, info, warn};

use crate::AppState;
use crate::config::AppConfig;
use crate::error::{ApiError, SessionError};
use crate::qr;
use crate::session::{RoomId, Session, SessionStore};

/// Start the Axum server with the provided configuration.
///
/// Runs until Ctrl-C is received.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let state = AppState::new(SessionStore::new(), Arc::clone(&config));
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        desktop_dir = %config.assets.desktop_dir().display(),
        mobile_dir = %config.assets.mobile_dir().display(),
        "Server started"
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    info!(name: "server.stopped", "Server stopped");
    Ok(())
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let desktop = ServeDir::new(state.config.assets.desktop_dir());
    let mobile = ServeDir::new(state.config.assets.mobile_dir());
    let cors = build_cors(&state.config.server.cors_origins);

    Router::new()
        .route("/", get(|| async { Redirect::to("/desktop") }))
        .route("/health", get(health))
        .route("/sessions", get(list_sessions).post(create_session))
        .route("/sessions/{room_id}", get(get_session))
        .route("/api/qrcode/{room_id}", get(room_qrcode))
        .nest_service("/desktop", desktop)
        .nest_service("/mobile", mobile)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        return cors.allow_origin(Any);
    }

    // A wildcard cannot sit in an origin list, nor be combined with credentials.
    if origins.iter().any(|origin| origin.trim() == "*") {
        if origins.len() > 1 {
            warn!(?origins, "Wildcard CORS origin overrides the other listed origins");
        }
        return cors.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(parsed).allow_credentials(true)
}

// ─────────────────────────────────────────────────────────────────────────────
// API Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /sessions - List every session, oldest first.
async fn list_sessions(State(state): State<AppState>) -> Json<Vec<Session>> {
    let sessions = state.sessions.list_sessions();
    debug!(name: "session.listed", count = sessions.len(), "Listed sessions");
    Json(sessions)
}

/// POST /sessions - Create a session with a fresh room code.
async fn create_session(State(state): State<AppState>) -> Json<Session> {
    let session = state.sessions.create_session();
    info!(
        name: "session.created",
        room_id = %session.room_id,
        created_at = session.created_at,
        "Session created"
    );
    Json(session)
}

/// GET /sessions/{room_id} - Look up a session by its room code.
async fn get_session(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Session>, ApiError> {
    let lookup = RoomId::parse(&raw).and_then(|room_id| {
        state
            .sessions
            .find(&room_id)
            .ok_or_else(|| SessionError::NotFound(room_id.to_string()))
    });

    match lookup {
        Ok(session) => Ok(Json(session)),
        Err(e) => {
            debug!(
                name: "session.lookup_failed",
                room_id = %raw,
                error = %e,
                "Session lookup failed"
            );
            Err(e.into())
        }
    }
}

/// GET /api/qrcode/{room_id} - PNG QR code linking to the room's mobile page.
///
/// The room does not have to exist; the code only has to be well formed.
async fn room_qrcode(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let room_id = RoomId::parse(&raw)?;
    let url = state.config.server.mobile_join_url(&room_id);
    let png = qr::render_png(&url)?;

    debug!(
        name: "qrcode.rendered",
        room_id = %room_id,
        url = %url,
        bytes = png.len(),
        "QR code rendered"
    );
    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    sessions: usize,
}

/// GET /health - Liveness check.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        sessions: state.sessions.len(),
    })
}
