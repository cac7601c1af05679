// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::state::AppState;
use crate::config::ConfigData;
use crate::mock;
use crate::proxy::forward_request;
use axum::Router;
use miette::IntoDiagnostic;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::trace::TraceLayer;

/// Builds the application router.
///
/// Mock routes (when enabled) answer first; anything they don't match, including a known path with another
/// method, goes to the proxy.
pub fn build_router(state: AppState) -> Router {
	let mut router = Router::<AppState>::new();
	if state.config.mock.enabled {
		router = router.merge(mock::routes::<AppState>());
	}

	router
		.fallback(forward_request)
		.method_not_allowed_fallback(forward_request)
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

pub async fn run_server(config: Arc<ConfigData>) -> miette::Result<()> {
	let bind_addr = config.bind_addr;
	let state = AppState::new(Arc::clone(&config))?;
	let app = build_router(state);

	let listener = TcpListener::bind(bind_addr).await.into_diagnostic()?;
	tracing::info!(
		address = %bind_addr,
		proxy_target = %config.proxy.target,
		paths = ?config.proxy.paths,
		mock = config.mock.enabled,
		"Listening on http://{}",
		bind_addr
	);
	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await
		.into_diagnostic()?;

	tracing::info!("Server shut down");
	Ok(())
}

async fn shutdown_signal() {
	if let Err(error) = ctrl_c().await {
		tracing::error!(source = ?error, "Failed to listen for Ctrl+C");
		std::future::pending::<()>().await;
	}
	tracing::info!("Received Ctrl+C, shutting down");
}
