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

//! Catalog items.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use toystore_rs::Item;
//!
//! let mut tux = Item::new("Tux", dec!(25.99), 10000);
//! tux.debit(3).unwrap();
//! assert_eq!(tux.stock, 9997);
//! ```

use crate::ShopError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One catalog entry: a toy with its unit price and remaining stock.
///
/// The same serde shape backs both the CSV file rows and the JSON wire;
/// `price` travels as a decimal string (`"25.99"`) so amounts stay exact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Item {
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }

    /// Removes `quantity` units from stock.
    ///
    /// Checked: a zero quantity and a quantity above the remaining stock are
    /// both rejected with the item left untouched, so `stock` can never go
    /// negative.
    pub fn debit(&mut self, quantity: u32) -> Result<(), ShopError> {
        if quantity == 0 {
            return Err(ShopError::InvalidQuantity);
        }
        if self.stock < quantity {
            return Err(ShopError::InsufficientStock);
        }
        self.stock -= quantity;
        Ok(())
    }
}
