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

//! # Toy Store
//!
//! This library provides the pieces of a small three-service toy store: a
//! catalog service owning authoritative stock and price data, an order
//! service recording completed purchases, and a front-end router relaying
//! client traffic to both.
//!
//! ## Core Components
//!
//! - [`Inventory`]: stock/price map behind a reader-writer lock, mirrored to
//!   a CSV file on every debit
//! - [`OrderLog`]: append-only purchase record with gapless numbering
//! - [`RwLock`]: hand-rolled writer-priority reader-writer lock
//! - [`ShopError`]: error taxonomy shared by all three services
//! - [`service`]: the three HTTP routers, built around injected state
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use toystore_rs::Inventory;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let inventory = Inventory::open(dir.path().join("toys_db.csv"), Duration::ZERO).unwrap();
//!
//! // Seeded defaults are available immediately.
//! let tux = inventory.query("Tux").unwrap();
//! assert_eq!(tux.stock, 10000);
//!
//! // A debit checks, decrements, and persists under one write-lock hold.
//! let tux = inventory.debit("Tux", 3).unwrap();
//! assert_eq!(tux.stock, 9997);
//! ```
//!
//! ## Consistency Model
//!
//! Stock debits and order records live in two services linked only by an
//! HTTP call. There is no two-phase commit: a crash between a successful
//! catalog debit and the matching log append leaves stock reduced with no
//! order recorded. That window is a documented property of the design and
//! is exercised by the integration tests rather than papered over.

mod base;
pub mod error;
mod inventory;
mod item;
mod order_log;
pub mod rwlock;
pub mod service;

pub use base::{
    CATALOG_HOST_VAR, CATALOG_PORT, DEFAULT_HOST, FRONTEND_PORT, ORDER_HOST_VAR, ORDER_PORT,
    OrderId,
};
pub use error::ShopError;
pub use inventory::Inventory;
pub use item::Item;
pub use order_log::{Order, OrderLog};
pub use rwlock::{RwLock, RwLockReadGuard, RwLockWriteGuard};
