// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use crate::mock::TicketStore;
use crate::proxy::DevProxy;
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone, Debug, FromRef)]
pub struct AppState {
	pub config: Arc<ConfigData>,
	pub ticket_store: Arc<TicketStore>,
	pub proxy: Arc<DevProxy>,
}

impl AppState {
	pub fn new(config: Arc<ConfigData>) -> miette::Result<Self> {
		let proxy = DevProxy::new(&config.proxy)?;
		Ok(Self {
			config,
			ticket_store: Arc::new(TicketStore::seeded()),
			proxy: Arc::new(proxy),
		})
	}
}
