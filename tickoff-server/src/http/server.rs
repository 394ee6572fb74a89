//! Router assembly and the listening loop
//!
//! Sessions are signed with a key derived from the configured secret; every
//! request passes through the tower-http trace layer.

use std::net::SocketAddr;

use axum::Router;
use axum_extra::extract::cookie::Key;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::QueryExecutor;
use crate::state::AppState;

/// Minimum secret length accepted for signing cookies
pub const MIN_SESSION_SECRET_LEN: usize = 64;

/// Listener and session settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3000)
    pub bind_addr: SocketAddr,

    /// Secret for signing session cookies (at least 64 bytes).
    ///
    /// When absent a random key is generated and sessions do not survive
    /// a restart.
    pub session_secret: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            session_secret: None,
        }
    }
}

impl ServerConfig {
    /// Build the cookie signing key from the configured secret.
    pub fn cookie_key(&self) -> Result<Key, ServerError> {
        match &self.session_secret {
            Some(secret) if secret.len() >= MIN_SESSION_SECRET_LEN => {
                Ok(Key::from(secret.as_bytes()))
            }
            Some(secret) => Err(ServerError::SessionSecretTooShort {
                len: secret.len(),
                min: MIN_SESSION_SECRET_LEN,
            }),
            None => {
                tracing::warn!("No session secret configured; sessions will not survive a restart");
                Ok(Key::generate())
            }
        }
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::users::router())
        .merge(routes::lists::router())
        .merge(routes::todos::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind, serve until Ctrl+C or SIGTERM, then drain in-flight requests.
///
/// ```ignore
/// let executor = QueryExecutor::from_url(&database_url)?;
/// run_server(executor, ServerConfig::default()).await?;
/// ```
pub async fn run_server(executor: QueryExecutor, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(AppState::new(executor, config.cookie_key()?));

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "tickoff listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let signal = shutdown_signal().await;
            tracing::info!(signal, "shutting down, draining open requests");
        })
        .await?;

    tracing::info!("tickoff stopped");
    Ok(())
}

/// Resolves with the name of the first shutdown signal received.
async fn shutdown_signal() -> &'static str {
    let interrupt = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for Ctrl+C");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                "SIGTERM"
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("listener failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session secret is {len} bytes, need at least {min}")]
    SessionSecretTooShort { len: usize, min: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_port_3000_without_secret() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert!(config.session_secret.is_none());
        assert!(config.cookie_key().is_ok());
    }

    #[test]
    fn short_secret_rejected() {
        let config = ServerConfig {
            session_secret: Some("too short".into()),
            ..ServerConfig::default()
        };
        assert!(matches!(
            config.cookie_key(),
            Err(ServerError::SessionSecretTooShort { len: 9, min: 64 })
        ));
    }

    #[test]
    fn long_secret_accepted() {
        let config = ServerConfig {
            session_secret: Some("k".repeat(64)),
            ..ServerConfig::default()
        };
        assert!(config.cookie_key().is_ok());
    }
}
