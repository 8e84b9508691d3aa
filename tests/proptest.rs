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

//! Property-based tests for the store engines.
//!
//! These tests verify invariants that should hold for any sequence of
//! queries, debits, and order appends.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use toystore_rs::service::catalog::PurchaseRequest;
use toystore_rs::{Inventory, Item, OrderId, OrderLog, ShopError};

// =============================================================================
// Arbitrary Strategies
// =============================================================================

/// Generate a positive price (0.01 to 1000.00 with 2 decimal places).
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

// =============================================================================
// Item Invariant Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// A debit succeeds exactly when the stock covers it, and never
    /// leaves a negative count behind.
    #[test]
    fn debit_succeeds_exactly_when_stock_covers_it(
        stock in 0u32..10_000,
        quantity in 1u32..10_000,
        price in arb_price(),
    ) {
        let mut item = Item::new("Tux", price, stock);

        if quantity <= stock {
            prop_assert_eq!(item.debit(quantity), Ok(()));
            prop_assert_eq!(item.stock, stock - quantity);
        } else {
            prop_assert_eq!(item.debit(quantity), Err(ShopError::InsufficientStock));
            prop_assert_eq!(item.stock, stock);
        }
    }

    /// A zero quantity is rejected before stock is even considered.
    #[test]
    fn zero_quantity_is_always_invalid(
        stock in any::<u32>(),
        price in arb_price(),
    ) {
        let mut item = Item::new("Tux", price, stock);

        prop_assert_eq!(item.debit(0), Err(ShopError::InvalidQuantity));
        prop_assert_eq!(item.stock, stock);
    }
}

// =============================================================================
// Inventory Invariant Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Final stock equals initial stock minus every debit that succeeded.
    #[test]
    fn stock_accounting_is_exact(
        initial in 0u32..2000,
        quantities in prop::collection::vec(1u32..200, 0..25),
    ) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("toys_db.csv");
        fs::write(&path, format!("name,price,stock\nTux,25.99,{initial}\n")).unwrap();
        let inventory = Inventory::open(&path, Duration::ZERO).unwrap();

        let mut expected = initial;
        for quantity in quantities {
            match inventory.debit("Tux", quantity) {
                Ok(item) => {
                    prop_assert!(quantity <= expected);
                    expected -= quantity;
                    prop_assert_eq!(item.stock, expected);
                }
                Err(ShopError::InsufficientStock) => prop_assert!(quantity > expected),
                Err(err) => prop_assert!(false, "unexpected error: {}", err),
            }
        }

        prop_assert_eq!(inventory.query("Tux").unwrap().stock, expected);
    }

    /// State read back from disk matches the in-memory state, whatever
    /// sequence of debits got it there.
    #[test]
    fn persisted_state_survives_reopen(
        debits in prop::collection::vec((0usize..6, 1u32..100), 0..15),
    ) {
        const TOYS: [&str; 6] = ["Tux", "Whale", "Elephant", "Fox", "Python", "Dolphin"];

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("toys_db.csv");
        let inventory = Inventory::open(&path, Duration::ZERO).unwrap();

        for (index, quantity) in debits {
            let _ = inventory.debit(TOYS[index], quantity);
        }

        let reopened = Inventory::open(&path, Duration::ZERO).unwrap();
        for name in TOYS {
            prop_assert_eq!(reopened.query(name).unwrap(), inventory.query(name).unwrap());
        }
    }
}

// =============================================================================
// Order Log Invariant Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Append numbering is dense from one and survives a reopen.
    #[test]
    fn order_numbers_are_dense_and_durable(
        orders in prop::collection::vec(("[A-Za-z]{1,12}", 1u32..50, arb_price()), 1..10),
    ) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.csv");
        let log = OrderLog::open(&path, Duration::ZERO).unwrap();

        for (i, (name, quantity, price)) in orders.iter().enumerate() {
            let assigned = log.append(name.clone(), *quantity, *price).unwrap();
            prop_assert_eq!(assigned, OrderId(i as u64 + 1));
        }

        let reopened = OrderLog::open(&path, Duration::ZERO).unwrap();
        prop_assert_eq!(reopened.last_order_no(), OrderId(orders.len() as u64));
        prop_assert_eq!(reopened.orders(), log.orders());
    }
}

// =============================================================================
// Wire Contract Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Every wire quantity lands in exactly one bucket: usable, invalid,
    /// or beyond any possible stock.
    #[test]
    fn wire_quantities_partition_cleanly(quantity in any::<i64>()) {
        let request = PurchaseRequest { name: "Tux".into(), quantity };

        match request.checked_quantity() {
            Ok(checked) => {
                prop_assert!(quantity > 0);
                prop_assert_eq!(i64::from(checked), quantity);
            }
            Err(ShopError::InvalidQuantity) => prop_assert!(quantity <= 0),
            Err(ShopError::InsufficientStock) => {
                prop_assert!(quantity > i64::from(u32::MAX));
            }
            Err(err) => prop_assert!(false, "unexpected error: {}", err),
        }
    }
}
