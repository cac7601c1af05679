// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canned ticket API used while developing the UI without a backend.
//!
//! The dataset is built once and never changes; the resolve, decline, and delete routes report success
//! without touching it.

use crate::model::{Message, Ticket, TicketList};
use axum::Json;
use axum::Router;
use axum::extract::{FromRef, Path, State};
use axum::routing::{delete, get, post};
use chrono::Utc;
use std::sync::Arc;

pub const RESOLVED_MESSAGE: &str = "Ticket resolved successfully";
pub const DECLINED_MESSAGE: &str = "Ticket declined successfully";
pub const DELETED_MESSAGE: &str = "Ticket deleted successfully";

#[derive(Debug)]
pub struct TicketStore {
	tickets: Vec<Ticket>,
}

impl TicketStore {
	/// Builds the mock dataset, stamped with the current time.
	pub fn seeded() -> Self {
		let tickets = vec![Ticket {
			id: 1,
			ticket_no: String::from("TKT-001"),
			created_at: Utc::now(),
			name: String::from("Budi Santoso"),
			division: String::from("IT"),
			priority: String::from("Urgent"),
			description: String::from("Printer di lantai 2 tidak bisa terhubung ke jaringan"),
			status: String::from("Belum"),
			assignee: String::from("Admin"),
		}];
		Self { tickets }
	}

	pub fn list(&self) -> TicketList {
		TicketList::new(self.tickets.clone())
	}
}

pub fn routes<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	Arc<TicketStore>: FromRef<S>,
{
	Router::new()
		.route("/api/tickets", get(list_tickets))
		.route("/api/tickets/{id}/resolve", post(resolve_ticket))
		.route("/api/tickets/{id}/decline", post(decline_ticket))
		.route("/api/tickets/{id}", delete(delete_ticket))
}

async fn list_tickets(State(store): State<Arc<TicketStore>>) -> Json<TicketList> {
	Json(store.list())
}

// The ID is matched as an opaque segment and otherwise ignored.
async fn resolve_ticket(Path(_id): Path<String>) -> Json<Message> {
	Json(Message::new(RESOLVED_MESSAGE))
}

async fn decline_ticket(Path(_id): Path<String>) -> Json<Message> {
	Json(Message::new(DECLINED_MESSAGE))
}

async fn delete_ticket(Path(_id): Path<String>) -> Json<Message> {
	Json(Message::new(DELETED_MESSAGE))
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::body::Body;
	use axum::http::header::CONTENT_TYPE;
	use axum::http::{Method, Request, StatusCode};
	use http_body_util::BodyExt;
	use serde_json::{Value, json};
	use tower::util::ServiceExt;

	fn app() -> Router {
		routes().with_state(Arc::new(TicketStore::seeded()))
	}

	async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
		let response = app
			.clone()
			.oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
			.await
			.unwrap();
		let status = response.status();
		assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
		let body = response.into_body().collect().await.unwrap().to_bytes();
		(status, serde_json::from_slice(&body).unwrap())
	}

	#[test]
	fn seeded_store_has_one_pending_ticket() {
		let list = TicketStore::seeded().list();
		assert_eq!(list.count, 1);
		assert_eq!(list.rows[0].id, 1);
		assert_eq!(list.rows[0].ticket_no, "TKT-001");
		assert_eq!(list.rows[0].status, "Belum");
	}

	#[tokio::test]
	async fn list_returns_rows_and_count() {
		let app = app();
		let (status, body) = call(&app, Method::GET, "/api/tickets").await;

		assert_eq!(status, StatusCode::OK);
		let rows = body["rows"].as_array().unwrap();
		assert_eq!(body["count"], json!(rows.len()));
		assert_eq!(rows[0]["id"], json!(1));
		assert_eq!(rows[0]["ticketNo"], json!("TKT-001"));
		assert_eq!(rows[0]["status"], json!("Belum"));
		assert_eq!(rows[0]["priority"], json!("Urgent"));
	}

	#[tokio::test]
	async fn mutations_answer_with_fixed_messages() {
		let app = app();

		let (status, body) = call(&app, Method::POST, "/api/tickets/1/resolve").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({ "message": RESOLVED_MESSAGE }));

		let (status, body) = call(&app, Method::POST, "/api/tickets/1/decline").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({ "message": DECLINED_MESSAGE }));

		let (status, body) = call(&app, Method::DELETE, "/api/tickets/1").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({ "message": DELETED_MESSAGE }));
	}

	#[tokio::test]
	async fn id_is_not_interpreted() {
		let app = app();
		let (_, body) = call(&app, Method::POST, "/api/tickets/not-a-number/resolve").await;
		assert_eq!(body, json!({ "message": RESOLVED_MESSAGE }));
		let (_, body) = call(&app, Method::DELETE, "/api/tickets/999").await;
		assert_eq!(body, json!({ "message": DELETED_MESSAGE }));
	}

	#[tokio::test]
	async fn mutations_leave_the_dataset_alone() {
		let app = app();
		let (_, before) = call(&app, Method::GET, "/api/tickets").await;

		for _ in 0..3 {
			let (_, body) = call(&app, Method::POST, "/api/tickets/1/resolve").await;
			assert_eq!(body, json!({ "message": RESOLVED_MESSAGE }));
			let (_, body) = call(&app, Method::POST, "/api/tickets/1/decline").await;
			assert_eq!(body, json!({ "message": DECLINED_MESSAGE }));
			let (_, body) = call(&app, Method::DELETE, "/api/tickets/1").await;
			assert_eq!(body, json!({ "message": DELETED_MESSAGE }));
		}

		let (_, after) = call(&app, Method::GET, "/api/tickets").await;
		assert_eq!(after["count"], json!(1));
		assert_eq!(after["rows"][0]["status"], json!("Belum"));
		assert_eq!(before, after);
	}
}
