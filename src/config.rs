// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use axum::http::Uri;
use axum::http::uri::Scheme;
use kdl::{KdlDocument, KdlNode, KdlValue};
use miette::{Diagnostic, IntoDiagnostic};
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;
use tokio::fs::read_to_string;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5173";
pub const DEFAULT_PROXY_TARGET: &str = "http://localhost:4000";
pub const DEFAULT_PROXY_PATHS: [&str; 2] = ["/api", "/uploads"];

#[derive(Debug, Diagnostic, Error)]
pub enum ConfigError {
	#[error("`{node}` must be {expected}")]
	#[diagnostic(code(config::wrong_type))]
	WrongType { node: String, expected: &'static str },
	#[error("`{value}` is not a valid listen address")]
	#[diagnostic(code(config::bind_addr), help("use an IP and port, like 127.0.0.1:5173"))]
	InvalidBindAddr {
		value: String,
		#[source]
		source: std::net::AddrParseError,
	},
	#[error("`{value}` is not a valid proxy target")]
	#[diagnostic(code(config::proxy_target), help("use an absolute http URI, like http://localhost:4000"))]
	InvalidTarget { value: String },
	#[error("proxied path `{value}` must start with `/`")]
	#[diagnostic(code(config::proxy_path))]
	InvalidPath { value: String },
}

#[derive(Clone, Debug)]
pub struct ConfigData {
	pub bind_addr: SocketAddr,
	pub proxy: ProxyConfig,
	pub mock: MockConfig,
}

#[derive(Clone, Debug)]
pub struct ProxyConfig {
	/// Where proxied requests are sent.
	pub target: Uri,
	/// Whether to replace the Host header with the target's authority.
	pub change_origin: bool,
	/// Path prefixes that are forwarded, without trailing slashes.
	pub paths: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct MockConfig {
	/// Whether the mock ticket routes answer in place of the backend.
	pub enabled: bool,
}

impl Default for ConfigData {
	fn default() -> Self {
		Self {
			bind_addr: SocketAddr::from(([127, 0, 0, 1], 5173)),
			proxy: ProxyConfig::default(),
			mock: MockConfig { enabled: true },
		}
	}
}

impl Default for ProxyConfig {
	fn default() -> Self {
		Self {
			target: Uri::from_static(DEFAULT_PROXY_TARGET),
			change_origin: true,
			paths: DEFAULT_PROXY_PATHS.iter().map(|path| path.to_string()).collect(),
		}
	}
}

/// Reads and parses the configuration file at the given path.
pub async fn parse_config(config_path: impl AsRef<Path>) -> miette::Result<ConfigData> {
	let config_file_contents = read_to_string(config_path).await.into_diagnostic()?;
	parse_config_str(&config_file_contents)
}

/// Like [parse_config], but a missing file gives the default configuration instead of an error.
pub async fn load_config(config_path: impl AsRef<Path>) -> miette::Result<ConfigData> {
	let config_path = config_path.as_ref();
	match read_to_string(config_path).await {
		Ok(contents) => parse_config_str(&contents),
		Err(error) if error.kind() == ErrorKind::NotFound => {
			tracing::info!(path = %config_path.display(), "No config file found; using defaults");
			Ok(ConfigData::default())
		}
		Err(error) => Err(error).into_diagnostic(),
	}
}

pub fn parse_config_str(contents: &str) -> miette::Result<ConfigData> {
	let document: KdlDocument = contents.parse()?;
	let mut config = ConfigData::default();

	if let Some(node) = document.get("bind_addr") {
		let value = string_arg(node)?;
		config.bind_addr = value
			.parse()
			.map_err(|source| ConfigError::InvalidBindAddr {
				value: value.to_string(),
				source,
			})?;
	}

	if let Some(proxy_node) = document.get("proxy") {
		if let Some(children) = proxy_node.children() {
			config.proxy = parse_proxy(children)?;
		}
	}

	if let Some(mock_node) = document.get("mock") {
		if let Some(enabled) = mock_node.get("enabled") {
			config.mock.enabled = enabled.as_bool().ok_or_else(|| ConfigError::WrongType {
				node: String::from("mock enabled"),
				expected: "a boolean",
			})?;
		}
	}

	Ok(config)
}

fn parse_proxy(document: &KdlDocument) -> Result<ProxyConfig, ConfigError> {
	let mut proxy = ProxyConfig::default();

	if let Some(node) = document.get("target") {
		let value = string_arg(node)?;
		proxy.target = parse_target(value)?;
	}

	if let Some(node) = document.get("change_origin") {
		proxy.change_origin = node.get(0).and_then(KdlValue::as_bool).ok_or_else(|| ConfigError::WrongType {
			node: String::from("change_origin"),
			expected: "a boolean",
		})?;
	}

	let path_nodes: Vec<&KdlNode> = document
		.nodes()
		.iter()
		.filter(|node| node.name().value() == "path")
		.collect();
	if !path_nodes.is_empty() {
		let mut paths = Vec::with_capacity(path_nodes.len());
		for node in path_nodes {
			let value = string_arg(node)?;
			if !value.starts_with('/') {
				return Err(ConfigError::InvalidPath {
					value: value.to_string(),
				});
			}
			// "/" trims to "", which forwards everything
			paths.push(value.trim_end_matches('/').to_string());
		}
		proxy.paths = paths;
	}

	Ok(proxy)
}

fn parse_target(value: &str) -> Result<Uri, ConfigError> {
	let invalid = || ConfigError::InvalidTarget {
		value: value.to_string(),
	};
	let uri: Uri = value.parse().map_err(|_| invalid())?;
	if uri.scheme() != Some(&Scheme::HTTP) || uri.authority().is_none() {
		return Err(invalid());
	}
	Ok(uri)
}

fn string_arg(node: &KdlNode) -> Result<&str, ConfigError> {
	node.get(0).and_then(KdlValue::as_string).ok_or_else(|| ConfigError::WrongType {
		node: node.name().value().to_string(),
		expected: "a string",
	})
}
