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

//! Core identifier types and service-discovery constants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a placed order.
///
/// Wraps a `u64`. Numbers are assigned sequentially starting at 1 and are
/// never reused, even across restarts of the order service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl OrderId {
    /// The number the next order after this one receives.
    pub fn next(self) -> OrderId {
        OrderId(self.0 + 1)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Well-known port of the front-end router.
pub const FRONTEND_PORT: u16 = 8080;

/// Well-known port of the catalog service.
pub const CATALOG_PORT: u16 = 8081;

/// Well-known port of the order service.
pub const ORDER_PORT: u16 = 8082;

/// Environment variable naming the host the catalog service runs on.
pub const CATALOG_HOST_VAR: &str = "CATALOG_SERVICE_HOST";

/// Environment variable naming the host the order service runs on.
pub const ORDER_HOST_VAR: &str = "ORDER_SERVICE_HOST";

/// Host assumed for peer services when no environment override is set.
pub const DEFAULT_HOST: &str = "localhost";
