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

//! HTTP surface of the three services.
//!
//! Each service is an [`axum::Router`] built around injected state, so the
//! integration tests can run all three in one process on ephemeral ports.
//! All application responses share the [`envelope::Envelope`] wire shape.

pub mod catalog;
pub mod envelope;
pub mod frontend;
pub mod order;

use crate::ShopError;

/// Runs a blocking store operation off the async runtime's worker threads.
///
/// The stores sleep and write files while holding locks, which would stall
/// the runtime if run inline.
pub(crate) async fn run_blocking<T, F>(op: F) -> Result<T, ShopError>
where
    F: FnOnce() -> Result<T, ShopError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(op).await {
        Ok(result) => result,
        Err(err) => Err(ShopError::Internal(format!("store task failed: {err}"))),
    }
}
