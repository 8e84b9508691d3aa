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

//! Append-only order log for the order service.
//!
//! Appends are serialized by a plain exclusive lock; the log is write-mostly
//! and never queried by name, so concurrent readers buy nothing here. Every
//! append rewrites the backing file before the new order number is
//! published, which keeps the numbering gapless even when the filesystem
//! fails mid-request.

use crate::ShopError;
use crate::base::OrderId;
use csv::{ReaderBuilder, Trim, Writer};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// An immutable record of one completed purchase.
///
/// `price` is the unit price captured from the catalog at debit time, not a
/// reference that could drift if the catalog later changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Order {
    pub order_no: OrderId,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
}

/// Log contents, always accessed under the lock.
#[derive(Debug)]
struct LogState {
    orders: Vec<Order>,
    /// Highest number ever assigned; the next append uses `last_no + 1`.
    last_no: OrderId,
}

/// Mutex-guarded append-only record of completed purchases.
///
/// # Invariants
///
/// - Order numbers are strictly increasing with no gaps: a number is
///   published only after the entry carrying it has been persisted.
/// - Numbers survive restarts; [`open`](OrderLog::open) recovers the next
///   value from the highest number on file.
pub struct OrderLog {
    state: Mutex<LogState>,
    path: PathBuf,
    /// Simulated per-request processing time, spent while the lock is held.
    delay: Duration,
}

impl OrderLog {
    /// Opens the log backed by the CSV file at `path`.
    ///
    /// An existing file is loaded and the numbering resumes past its highest
    /// order number. A missing file means an empty log starting at zero; the
    /// file itself is only created by the first append.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Persistence`] if an existing file cannot be read
    /// or parsed.
    pub fn open(path: impl Into<PathBuf>, delay: Duration) -> Result<Self, ShopError> {
        let path = path.into();
        let orders = if path.exists() {
            load_orders(&path)?
        } else {
            Vec::new()
        };

        let last_no = orders
            .iter()
            .map(|order| order.order_no)
            .max()
            .unwrap_or(OrderId(0));
        tracing::debug!(orders = orders.len(), last = %last_no, path = %path.display(), "order log opened");

        Ok(OrderLog {
            state: Mutex::new(LogState { orders, last_no }),
            path,
            delay,
        })
    }

    /// Records a completed purchase and returns its assigned order number.
    ///
    /// The number is `last + 1` at append time. If the file rewrite fails
    /// the entry is dropped and the numbering stands still, so the error is
    /// surfaced without burning a number.
    pub fn append(
        &self,
        name: impl Into<String>,
        quantity: u32,
        price: Decimal,
    ) -> Result<OrderId, ShopError> {
        let mut state = self.state.lock();
        thread::sleep(self.delay);

        let order_no = state.last_no.next();
        state.orders.push(Order {
            order_no,
            name: name.into(),
            quantity,
            price,
        });

        if let Err(err) = persist_orders(&self.path, &state.orders) {
            state.orders.pop();
            tracing::warn!(%order_no, "order append rolled back: {err}");
            return Err(err);
        }

        state.last_no = order_no;
        Ok(order_no)
    }

    /// Highest order number assigned so far; zero for a fresh log.
    pub fn last_order_no(&self) -> OrderId {
        self.state.lock().last_no
    }

    /// Snapshot of all recorded orders, in append order.
    pub fn orders(&self) -> Vec<Order> {
        self.state.lock().orders.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads the full order list from the backing file.
///
/// Expected columns: `order_no, name, quantity, price`, with a header row.
fn load_orders(path: &Path) -> Result<Vec<Order>, ShopError> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let mut orders = Vec::new();
    for result in rdr.deserialize::<Order>() {
        orders.push(result?);
    }
    Ok(orders)
}

/// Rewrites the backing file with the full order list.
fn persist_orders(path: &Path, orders: &[Order]) -> Result<(), ShopError> {
    let mut wtr = Writer::from_path(path)?;
    for order in orders {
        wtr.serialize(order)?;
    }
    wtr.flush()?;
    Ok(())
}
