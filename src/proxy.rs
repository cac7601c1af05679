// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ProxyConfig;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{HOST, InvalidHeaderValue};
use axum::http::{HeaderValue, StatusCode, Uri, Version};
use axum::response::{IntoResponse, Response};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use miette::Diagnostic;
use std::sync::Arc;
use thiserror::Error;

pub type HttpClient = Client<HttpConnector, Body>;

#[derive(Debug, Diagnostic, Error)]
pub enum ProxyError {
	#[error("proxy target authority can't be used as a Host header")]
	InvalidHost(#[from] InvalidHeaderValue),
	#[error("couldn't build the URI to forward to")]
	InvalidForwardUri(#[from] axum::http::Error),
	#[error("request to the backend failed")]
	Upstream(#[from] hyper_util::client::legacy::Error),
}

impl IntoResponse for ProxyError {
	fn into_response(self) -> Response {
		let status = match self {
			ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
			ProxyError::InvalidHost(_) | ProxyError::InvalidForwardUri(_) => StatusCode::INTERNAL_SERVER_ERROR,
		};
		(status, self.to_string()).into_response()
	}
}

/// Pass-through reverse proxy for the backend API and uploaded files.
///
/// Requests are forwarded as they are; only the URI's scheme and authority change, and the Host header if
/// `change_origin` is set.
#[derive(Clone, Debug)]
pub struct DevProxy {
	target: Uri,
	/// The Host header to send, if the client's one is being replaced.
	origin_host: Option<HeaderValue>,
	paths: Vec<String>,
	client: HttpClient,
}

impl DevProxy {
	pub fn new(config: &ProxyConfig) -> Result<Self, ProxyError> {
		let origin_host = match (config.change_origin, config.target.authority()) {
			(true, Some(authority)) => Some(HeaderValue::from_str(authority.as_str())?),
			_ => None,
		};
		let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

		Ok(Self {
			target: config.target.clone(),
			origin_host,
			paths: config.paths.clone(),
			client,
		})
	}

	/// Whether requests for this path go to the backend.
	///
	/// A prefix matches itself and anything below it, so `/api` matches `/api` and `/api/tickets` but not
	/// `/apiary`.
	pub fn matches(&self, path: &str) -> bool {
		self.paths.iter().any(|prefix| {
			path.strip_prefix(prefix.as_str())
				.is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
		})
	}

	/// Gets the backend URI for a request URI, keeping its path and query as they are.
	pub fn forward_uri(&self, uri: &Uri) -> Result<Uri, ProxyError> {
		let base_path = self.target.path().trim_end_matches('/');
		let path_and_query = uri.path_and_query().map(|path_and_query| path_and_query.as_str()).unwrap_or("/");

		let mut builder = Uri::builder().path_and_query(format!("{}{}", base_path, path_and_query));
		if let Some(scheme) = self.target.scheme() {
			builder = builder.scheme(scheme.clone());
		}
		if let Some(authority) = self.target.authority() {
			builder = builder.authority(authority.clone());
		}
		Ok(builder.build()?)
	}

	pub async fn forward(&self, mut request: Request) -> Result<Response, ProxyError> {
		*request.uri_mut() = self.forward_uri(request.uri())?;
		*request.version_mut() = Version::HTTP_11;
		if let Some(host) = &self.origin_host {
			request.headers_mut().insert(HOST, host.clone());
		}

		let response = self.client.request(request).await?;
		Ok(response.into_response())
	}
}

/// Fallback handler sending unmatched requests under the proxied paths to the backend.
pub async fn forward_request(State(proxy): State<Arc<DevProxy>>, request: Request) -> Response {
	if !proxy.matches(request.uri().path()) {
		return StatusCode::NOT_FOUND.into_response();
	}

	let method = request.method().clone();
	let uri = request.uri().clone();
	match proxy.forward(request).await {
		Ok(response) => response,
		Err(error) => {
			tracing::warn!(source = ?error, %method, %uri, "Failed to proxy request");
			error.into_response()
		}
	}
}
