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

//! Error types shared by the catalog, order, and front-end services.

use thiserror::Error;

/// Store operation errors.
///
/// The `Display` text of each variant is the `message` field clients see in
/// the wire envelope, so the strings here are part of the public interface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShopError {
    /// Requested product name is not in the catalog
    #[error("product not found")]
    NotFound,

    /// Purchase quantity exceeds the remaining stock
    #[error("not enough stock")]
    InsufficientStock,

    /// Purchase quantity is not a positive count
    #[error("quantity must be positive")]
    InvalidQuantity,

    /// Writing the backing file failed; in-memory state was rolled back
    #[error("failed to persist state: {0}")]
    Persistence(String),

    /// A peer service could not be reached or sent an unreadable reply
    #[error("upstream service unavailable: {0}")]
    Transport(String),

    /// A request-handling task died in-process
    #[error("internal error: {0}")]
    Internal(String),
}

impl ShopError {
    /// Stable numeric code carried in the wire envelope.
    ///
    /// Both [`NotFound`](ShopError::NotFound) and
    /// [`InsufficientStock`](ShopError::InsufficientStock) report 404, so
    /// clients distinguish them by message, not code.
    pub fn code(&self) -> u16 {
        match self {
            ShopError::NotFound | ShopError::InsufficientStock => 404,
            ShopError::InvalidQuantity => 400,
            ShopError::Persistence(_) | ShopError::Internal(_) => 500,
            ShopError::Transport(_) => 502,
        }
    }
}

impl From<csv::Error> for ShopError {
    fn from(err: csv::Error) -> Self {
        ShopError::Persistence(err.to_string())
    }
}

impl From<std::io::Error> for ShopError {
    fn from(err: std::io::Error) -> Self {
        ShopError::Persistence(err.to_string())
    }
}

impl From<reqwest::Error> for ShopError {
    fn from(err: reqwest::Error) -> Self {
        ShopError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::ShopError;

    #[test]
    fn error_display_messages() {
        assert_eq!(ShopError::NotFound.to_string(), "product not found");
        assert_eq!(ShopError::InsufficientStock.to_string(), "not enough stock");
        assert_eq!(ShopError::InvalidQuantity.to_string(), "quantity must be positive");
        assert_eq!(
            ShopError::Persistence("disk full".into()).to_string(),
            "failed to persist state: disk full"
        );
        assert_eq!(
            ShopError::Transport("connection refused".into()).to_string(),
            "upstream service unavailable: connection refused"
        );
        assert_eq!(
            ShopError::Internal("task panicked".into()).to_string(),
            "internal error: task panicked"
        );
    }

    #[test]
    fn wire_codes() {
        assert_eq!(ShopError::NotFound.code(), 404);
        assert_eq!(ShopError::InsufficientStock.code(), 404);
        assert_eq!(ShopError::InvalidQuantity.code(), 400);
        assert_eq!(ShopError::Persistence(String::new()).code(), 500);
        assert_eq!(ShopError::Internal(String::new()).code(), 500);
        assert_eq!(ShopError::Transport(String::new()).code(), 502);
    }

    #[test]
    fn errors_are_cloneable() {
        let error = ShopError::InsufficientStock;
        let cloned = error.clone();
        assert_eq!(error, cloned);
    }
}
