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

//! Inventory store for the catalog service.
//!
//! The [`Inventory`] owns the authoritative item map behind a single
//! writer-priority [`RwLock`] and mirrors every mutation to a CSV backing
//! file.
//!
//! # Operations
//!
//! - **Query**: shared read access; returns a copy of the item, so a caller
//!   never holds a reference into the map after the lock is released.
//! - **Debit**: exclusive write access; the stock check, the decrement, and
//!   the file rewrite happen under one unbroken lock hold, so no other read
//!   or debit can interleave between check and act.
//!
//! # Persistence
//!
//! The whole store is rewritten synchronously inside the write hold, before
//! the caller sees a result. A failed rewrite rolls the in-memory decrement
//! back and surfaces [`ShopError::Persistence`], keeping memory and file in
//! agreement.

use crate::rwlock::RwLock;
use crate::{Item, ShopError};
use csv::{ReaderBuilder, Trim, Writer};
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// Authoritative stock and price data, serialized by one reader-writer lock.
///
/// # Invariants
///
/// - `stock` never goes negative; a debit that would overdraw is rejected
///   with the item unchanged.
/// - The backing file only ever holds a complete snapshot of the map as it
///   stood at some single instant.
/// - Items are never added or removed at runtime; the set of names is fixed
///   once loaded.
pub struct Inventory {
    items: RwLock<HashMap<String, Item>>,
    path: PathBuf,
    /// Simulated per-request processing time, spent while the lock is held
    /// so contention is observable under load.
    delay: Duration,
}

impl Inventory {
    /// Opens the store backed by the CSV file at `path`.
    ///
    /// An existing file is loaded as-is; a missing one is seeded with the
    /// default toy set and written out immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Persistence`] if the file cannot be read,
    /// parsed, or (when seeding) created.
    pub fn open(path: impl Into<PathBuf>, delay: Duration) -> Result<Self, ShopError> {
        let path = path.into();
        let items = if path.exists() {
            let items = load_items(&path)?;
            tracing::debug!(items = items.len(), path = %path.display(), "inventory loaded");
            items
        } else {
            let items: HashMap<String, Item> = seed_items()
                .into_iter()
                .map(|item| (item.name.clone(), item))
                .collect();
            persist_items(&path, &items)?;
            tracing::debug!(items = items.len(), path = %path.display(), "inventory seeded");
            items
        };

        Ok(Inventory {
            items: RwLock::new(items),
            path,
            delay,
        })
    }

    /// Looks up an item by name under the read lock.
    ///
    /// Returns a copy of the item as it stood at a single instant; unknown
    /// names fail fast with [`ShopError::NotFound`], skipping the delay.
    pub fn query(&self, name: &str) -> Result<Item, ShopError> {
        let items = self.items.read();
        let item = items.get(name).ok_or(ShopError::NotFound)?;
        thread::sleep(self.delay);
        Ok(item.clone())
    }

    /// Debits `quantity` units of `name` under the write lock and persists
    /// the store, returning the post-debit item.
    ///
    /// # Errors
    ///
    /// - [`ShopError::InvalidQuantity`] - `quantity` is zero.
    /// - [`ShopError::NotFound`] - no item with that name.
    /// - [`ShopError::InsufficientStock`] - stock would go negative; the
    ///   item is left unchanged.
    /// - [`ShopError::Persistence`] - the file rewrite failed; the decrement
    ///   is rolled back before the lock is released.
    pub fn debit(&self, name: &str, quantity: u32) -> Result<Item, ShopError> {
        if quantity == 0 {
            return Err(ShopError::InvalidQuantity);
        }

        let mut items = self.items.write();
        let item = items.get_mut(name).ok_or(ShopError::NotFound)?;
        thread::sleep(self.delay);

        item.debit(quantity)?;
        let snapshot = item.clone();

        if let Err(err) = persist_items(&self.path, &items) {
            // Undo the decrement so memory never runs ahead of the file.
            if let Some(item) = items.get_mut(name) {
                item.stock += quantity;
            }
            tracing::warn!(%name, quantity, "debit rolled back: {err}");
            return Err(err);
        }

        Ok(snapshot)
    }
}

/// Items stocked when no backing file exists yet.
fn seed_items() -> Vec<Item> {
    vec![
        Item::new("Tux", dec!(25.99), 10000),
        Item::new("Whale", dec!(19.99), 10000),
        Item::new("Elephant", dec!(29.99), 10000),
        Item::new("Fox", dec!(29.99), 10000),
        Item::new("Python", dec!(29.99), 10000),
        Item::new("Dolphin", dec!(22.99), 10000),
    ]
}

/// Reads the full item map from the backing file.
///
/// Expected columns: `name, price, stock`, with a header row. A malformed
/// row fails the load; the backing file is authoritative state, not
/// untrusted input.
fn load_items(path: &Path) -> Result<HashMap<String, Item>, ShopError> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let mut items = HashMap::new();
    for result in rdr.deserialize::<Item>() {
        let item: Item = result?;
        items.insert(item.name.clone(), item);
    }
    Ok(items)
}

/// Rewrites the backing file with the full item map.
///
/// Rows are sorted by name so consecutive snapshots of the same state are
/// byte-identical.
fn persist_items(path: &Path, items: &HashMap<String, Item>) -> Result<(), ShopError> {
    let mut rows: Vec<&Item> = items.values().collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));

    let mut wtr = Writer::from_path(path)?;
    for item in rows {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}
