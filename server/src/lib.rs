//! HTTP stub surface for the hosting frame client.
//!
//! Three endpoints, all returning fixed data from [`Config`]: the mini-app
//! manifest, the mock wallet connection, and the frame action acknowledgment.
//! The action endpoint accepts any payload and ignores its contents.

pub mod config;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use piggyworld_types::api::{FrameActionResponse, Manifest, WalletConnectResponse};

pub use config::Config;

#[derive(Clone)]
pub struct Api {
    config: Arc<Config>,
}

impl Api {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn router(&self) -> Router {
        // The frame host calls from another origin.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        Router::new()
            .route("/api/farcaster-manifest", get(manifest))
            .route("/api/connect-wallet", post(connect_wallet))
            .route("/api/frame-action", post(frame_action))
            .layer(cors)
            .with_state(self.config.clone())
    }
}

async fn manifest(State(config): State<Arc<Config>>) -> Json<Manifest> {
    Json(config.manifest())
}

async fn connect_wallet(State(config): State<Arc<Config>>) -> Json<WalletConnectResponse> {
    Json(config.wallet_response())
}

async fn frame_action(
    State(config): State<Arc<Config>>,
    body: Bytes,
) -> Json<FrameActionResponse> {
    // Payload contents are deliberately ignored.
    debug!(bytes = body.len(), "frame action received");
    Json(config.action_response())
}
