//! HTTP surface: axum router, route handlers, and graceful shutdown.
//!
//! Routes:
//! - POST /link_token             `{ userId? }` → `{ link_token }`
//! - POST /exchange_public_token  `{ public_token }` → `{ access_token }`
//! - GET  /transactions           → provider payload, untouched
//!
//! Every route accepts an optional `x-session-id` header. Bodies are optional; one that does not
//! decode fails with the route's error code. Cross-origin requests are allowed from any origin.

pub mod body;
pub mod error;
pub mod session;

pub use body::JsonBody;
pub use error::ApiError;
pub use session::{SESSION_HEADER, Session};

// crates.io
use axum::{
	Json, Router,
	extract::State,
	routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
// self
use crate::{
	_prelude::*,
	auth::UserId,
	obs::Operation,
	relay::{ExchangeResponse, LinkTokenResponse, Relay},
};

/// Shared application state passed to all route handlers.
#[derive(Clone, Debug)]
pub struct AppState {
	/// Relay service every handler delegates to.
	pub relay: Arc<Relay>,
}

/// Body of `POST /link_token`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LinkTokenBody {
	/// Provider-facing user identifier; the demo user is used when absent.
	#[serde(default, rename = "userId")]
	pub user_id: Option<UserId>,
}

/// Body of `POST /exchange_public_token`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ExchangeBody {
	/// Public token from the client-side linking flow.
	#[serde(default)]
	pub public_token: Option<String>,
}

/// Builds the full axum router around `relay`.
pub fn router(relay: Relay) -> Router {
	Router::new()
		.route("/link_token", post(link_token))
		.route("/exchange_public_token", post(exchange_public_token))
		.route("/transactions", get(transactions))
		.with_state(AppState { relay: Arc::new(relay) })
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
}

/// Serves `router` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
	F: 'static + Send + Future<Output = ()>,
{
	axum::serve(listener, router).with_graceful_shutdown(shutdown).await
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			tracing::warn!(error = %e, "Failed to listen for Ctrl-C.");
			std::future::pending::<()>().await;
		}
	};
	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut signal) => {
				signal.recv().await;
			},
			Err(e) => {
				tracing::warn!(error = %e, "Failed to listen for SIGTERM.");
				std::future::pending::<()>().await;
			},
		}
	};
	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	tracing::info!("Shutdown signal received.");
}

async fn link_token(
	State(state): State<AppState>,
	body: Result<JsonBody<LinkTokenBody>, ApiError>,
) -> Result<Json<LinkTokenResponse>, ApiError> {
	let user = request_body(Operation::CreateLinkToken, body)?.user_id;

	state
		.relay
		.create_link_token(user)
		.await
		.map(Json)
		.map_err(ApiError::for_operation(Operation::CreateLinkToken))
}

async fn exchange_public_token(
	State(state): State<AppState>,
	Session(session): Session,
	body: Result<JsonBody<ExchangeBody>, ApiError>,
) -> Result<Json<ExchangeResponse>, ApiError> {
	let public_token = request_body(Operation::ExchangePublicToken, body)?.public_token;

	state
		.relay
		.exchange_public_token(&session, public_token)
		.await
		.map(Json)
		.map_err(ApiError::for_operation(Operation::ExchangePublicToken))
}

async fn transactions(
	State(state): State<AppState>,
	Session(session): Session,
) -> Result<Json<serde_json::Value>, ApiError> {
	state
		.relay
		.get_transactions(&session)
		.await
		.map(Json)
		.map_err(ApiError::for_operation(Operation::GetTransactions))
}

fn request_body<T>(
	operation: Operation,
	body: Result<JsonBody<T>, ApiError>,
) -> Result<T, ApiError> {
	body.map(|JsonBody(body)| body).map_err(|rejection| {
		tracing::error!(
			operation = operation.as_str(),
			error = %rejection.error,
			detail = ?rejection.error,
			"Request body rejected."
		);

		ApiError::new(operation, rejection.error)
	})
}
