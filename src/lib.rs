// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Development server for the ticket desk UI.
//!
//! Serves a canned ticket API in place of the backend and passes every other API and upload request
//! through to the real backend.

pub mod config;
pub mod mock;
pub mod model;
pub mod proxy;
pub mod web;
