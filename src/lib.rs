//! GyroLaser session registry
//!
//! Backend that lets presenters list existing collaboration sessions and
//! create new ones, each identified by a short random room code.
//!
//! # Architecture
//!
//! - **Server**: Axum-based HTTP server exposing the session endpoints and
//!   serving the desktop and mobile clients
//! - **Session Store**: in-memory, lock-guarded registry injected into every
//!   handler through [`AppState`]
//!
//! # Modules
//!
//! - [`config`]: CLI and layered configuration
//! - [`error`]: Error taxonomy and HTTP mapping
//! - [`qr`]: QR codes for the mobile join link
//! - [`server`]: Router, handlers and serve loop
//! - [`session`]: Room codes and session storage
//! - [`telemetry`]: Logging setup

pub mod config;
pub mod error;
pub mod qr;
pub mod server;
pub mod session;
pub mod telemetry;

use crate::config::AppConfig;

use session::SessionStore;
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Session store for the lifetime of the process.
    pub sessions: SessionStore,
    /// Resolved application configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(sessions: SessionStore, config: Arc<AppConfig>) -> Self {
        Self { sessions, config }
    }
}
