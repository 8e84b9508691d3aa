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

//! Order service: debits the catalog over HTTP, then records the purchase.
//!
//! The two steps are not transactional. A crash after the catalog debit
//! succeeds but before the log append completes leaves stock reduced with no
//! order recorded; nothing here compensates for that window, it is part of
//! the design. What the service does guarantee is ordering: the log lock is
//! taken only after the catalog has answered, never across the network call,
//! and no order number is assigned unless the debit succeeded.
//!
//! ## Endpoints
//!
//! - `POST /order` - Place an order: `{"name": "Tux", "quantity": 5}`

use super::catalog::PurchaseRequest;
use super::envelope::Envelope;
use super::run_blocking;
use crate::base::OrderId;
use crate::{Item, OrderLog, ShopError};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// === Catalog Client ===

/// HTTP client for the catalog's debit operation.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Creates a client for the catalog at `base_url`, e.g.
    /// `http://localhost:8081`.
    pub fn new(base_url: impl Into<String>) -> Self {
        CatalogClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// POSTs a debit for `quantity` units of `name`.
    ///
    /// Transport problems surface as `Err`. A successfully parsed envelope
    /// comes back as `Ok` whether it carries data or an error, so the caller
    /// can relay the catalog's verdict unchanged.
    pub async fn buy(&self, name: &str, quantity: u32) -> Result<Envelope<Item>, ShopError> {
        let url = format!("{}/buy_qty", self.base_url);
        let request = PurchaseRequest {
            name: name.to_string(),
            quantity: i64::from(quantity),
        };
        let response = self.http.post(&url).json(&request).send().await?;
        Ok(response.json::<Envelope<Item>>().await?)
    }
}

// === Response DTOs ===

/// Success payload of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrderPlaced {
    pub order_number: OrderId,
}

// === Application State ===

/// Shared state: the order log plus the upstream catalog client.
#[derive(Clone)]
pub struct OrderState {
    pub log: Arc<OrderLog>,
    pub catalog: CatalogClient,
}

// === Handlers ===

/// POST /order - Debit the catalog, then append to the log.
async fn place_order(
    State(state): State<OrderState>,
    Json(request): Json<PurchaseRequest>,
) -> Envelope<OrderPlaced> {
    let quantity = match request.checked_quantity() {
        Ok(quantity) => quantity,
        // Same verdict the catalog would give; skip the network round trip.
        Err(err) => return Envelope::error(&err),
    };

    let item = match state.catalog.buy(&request.name, quantity).await {
        Ok(Envelope::Data(item)) => item,
        // A catalog error envelope is relayed to the caller unmodified.
        Ok(Envelope::Error(body)) => return Envelope::Error(body),
        Err(err) => return Envelope::error(&err),
    };

    // Stock is already debited at this point. If the append below fails the
    // debit stands; see the module docs.
    let log = Arc::clone(&state.log);
    let appended = run_blocking(move || log.append(item.name, quantity, item.price)).await;
    match appended {
        Ok(order_no) => {
            tracing::debug!(%order_no, "order recorded");
            Envelope::data(OrderPlaced { order_number: order_no })
        }
        Err(err) => Envelope::error(&err),
    }
}

// === Router ===

/// Builds the order router around a log handle and a catalog client.
pub fn router(log: Arc<OrderLog>, catalog: CatalogClient) -> Router {
    Router::new()
        .route("/order", post(place_order))
        .layer(TraceLayer::new_for_http())
        .with_state(OrderState { log, catalog })
}
