// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A ticket as the ticket desk UI receives it from the API.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
	pub id: i64,
	/// The human-facing ticket number, e.g. `TKT-001`.
	pub ticket_no: String,
	pub created_at: DateTime<Utc>,
	/// The name of the person who reported the issue.
	pub name: String,
	pub division: String,
	/// Free text; the UI knows values like "Urgent", but nothing restricts it.
	pub priority: String,
	pub description: String,
	/// Free text; "Belum" marks a ticket that hasn't been handled yet.
	pub status: String,
	pub assignee: String,
}

/// Response body for the ticket listing.
///
/// `count` is always the number of entries in `rows`; use [TicketList::new] to build one.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TicketList {
	pub rows: Vec<Ticket>,
	pub count: usize,
}

impl TicketList {
	pub fn new(rows: Vec<Ticket>) -> Self {
		let count = rows.len();
		Self { rows, count }
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Message {
	pub message: String,
}

impl Message {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}
