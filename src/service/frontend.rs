// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Front-end router: the client-facing relay.
//!
//! A pure pass-through with no state of its own. Request bodies go upstream
//! verbatim and upstream responses come back verbatim; the only rewrite is
//! the path. When an upstream service cannot be reached the relay answers
//! with a transport-error envelope itself, since there is no upstream body
//! to forward.
//!
//! ## Endpoints
//!
//! - `GET /products/{name}` - Relays to the catalog's query endpoint
//! - `POST /orders` - Relays to the order service's place-order endpoint

use super::envelope::error_response;
use crate::ShopError;
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Shared state: upstream base URLs plus one pooled HTTP client.
#[derive(Clone)]
pub struct FrontendState {
    http: reqwest::Client,
    catalog_url: String,
    order_url: String,
}

// === Handlers ===

/// GET /products/{name} - Relay a product lookup.
async fn get_product(State(state): State<FrontendState>, Path(name): Path<String>) -> Response {
    let url = format!("{}/query/{}", state.catalog_url, name);
    relay(state.http.get(&url)).await
}

/// POST /orders - Relay an order placement.
async fn post_order(State(state): State<FrontendState>, body: Bytes) -> Response {
    let url = format!("{}/order", state.order_url);
    let request = state
        .http
        .post(&url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body);
    relay(request).await
}

/// Sends the prepared upstream request and relays status and body verbatim.
async fn relay(request: reqwest::RequestBuilder) -> Response {
    match forward(request).await {
        Ok((status, body)) => {
            (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
        }
        Err(err) => error_response(&err),
    }
}

async fn forward(request: reqwest::RequestBuilder) -> Result<(StatusCode, Bytes), ShopError> {
    let response = request.send().await?;
    let status = response.status();
    Ok((status, response.bytes().await?))
}

// === Router ===

/// Builds the front-end router pointing at the given upstream base URLs.
pub fn router(catalog_url: impl Into<String>, order_url: impl Into<String>) -> Router {
    Router::new()
        .route("/products/{name}", get(get_product))
        .route("/orders", post(post_order))
        .layer(TraceLayer::new_for_http())
        .with_state(FrontendState {
            http: reqwest::Client::new(),
            catalog_url: catalog_url.into(),
            order_url: order_url.into(),
        })
}
