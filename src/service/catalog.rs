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

//! Catalog service: the HTTP surface over the [`Inventory`].
//!
//! ## Endpoints
//!
//! - `GET /query/{name}` - Current price and stock of one item
//! - `POST /buy_qty` - Debit stock: `{"name": "Tux", "quantity": 3}`

use super::envelope::Envelope;
use super::run_blocking;
use crate::{Inventory, Item, ShopError};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// === Request DTOs ===

/// Request body for a purchase, shared with the order service's endpoint.
///
/// `quantity` is accepted as a plain signed integer so out-of-range values
/// become a structured envelope error instead of a body-rejection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PurchaseRequest {
    pub name: String,
    pub quantity: i64,
}

impl PurchaseRequest {
    /// Checked conversion of the wire quantity to a stock count.
    pub fn checked_quantity(&self) -> Result<u32, ShopError> {
        if self.quantity <= 0 {
            return Err(ShopError::InvalidQuantity);
        }
        // A count beyond u32 can never be covered by u32 stock.
        u32::try_from(self.quantity).map_err(|_| ShopError::InsufficientStock)
    }
}

// === Application State ===

/// Shared state: the inventory behind the HTTP surface.
#[derive(Clone)]
pub struct CatalogState {
    pub inventory: Arc<Inventory>,
}

// === Handlers ===

/// GET /query/{name} - Look up one item.
async fn query_item(
    State(state): State<CatalogState>,
    Path(name): Path<String>,
) -> Envelope<Item> {
    let inventory = Arc::clone(&state.inventory);
    Envelope::from(run_blocking(move || inventory.query(&name)).await)
}

/// POST /buy_qty - Debit stock and return the post-debit item.
async fn buy_item(
    State(state): State<CatalogState>,
    Json(request): Json<PurchaseRequest>,
) -> Envelope<Item> {
    let quantity = match request.checked_quantity() {
        Ok(quantity) => quantity,
        Err(err) => return Envelope::error(&err),
    };

    let inventory = Arc::clone(&state.inventory);
    Envelope::from(run_blocking(move || inventory.debit(&request.name, quantity)).await)
}

// === Router ===

/// Builds the catalog router around an inventory handle.
pub fn router(inventory: Arc<Inventory>) -> Router {
    Router::new()
        .route("/query/{name}", get(query_item))
        .route("/buy_qty", post(buy_item))
        .layer(TraceLayer::new_for_http())
        .with_state(CatalogState { inventory })
}
