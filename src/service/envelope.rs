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

//! The JSON response envelope shared by all services.
//!
//! Every application response is either `{"data": ...}` or
//! `{"error": {"code": N, "message": "..."}}`, carried over HTTP 200 even on
//! failure. Keeping failure semantics in the body rather than the transport
//! status matches what existing clients of the store parse, so it is kept as
//! a deliberate compatibility choice.

use crate::ShopError;
use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Uniform response wrapper for all service endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Envelope<T> {
    Data(T),
    Error(ErrorBody),
}

/// Error payload: a stable numeric code plus a human-readable message.
///
/// The message is the [`ShopError`] display text, which intermediate hops
/// relay unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

impl<T> Envelope<T> {
    pub fn data(value: T) -> Self {
        Envelope::Data(value)
    }

    pub fn error(err: &ShopError) -> Self {
        Envelope::Error(ErrorBody {
            code: err.code(),
            message: err.to_string(),
        })
    }

    /// Unwraps the envelope a client received into a plain `Result`.
    pub fn into_result(self) -> Result<T, ErrorBody> {
        match self {
            Envelope::Data(value) => Ok(value),
            Envelope::Error(body) => Err(body),
        }
    }
}

impl<T> From<Result<T, ShopError>> for Envelope<T> {
    fn from(result: Result<T, ShopError>) -> Self {
        match result {
            Ok(value) => Envelope::data(value),
            Err(err) => Envelope::error(&err),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        // Always HTTP 200; the body carries success or failure.
        Json(self).into_response()
    }
}

/// Builds the error response for `err` outside a typed handler.
pub fn error_response(err: &ShopError) -> Response {
    Envelope::<serde_json::Value>::error(err).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Item;
    use rust_decimal_macros::dec;

    #[test]
    fn data_envelope_wire_shape() {
        let envelope = Envelope::data(Item::new("Tux", dec!(25.99), 9997));
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "data": { "name": "Tux", "price": "25.99", "stock": 9997 }
            })
        );
    }

    #[test]
    fn error_envelope_wire_shape() {
        let envelope = Envelope::<Item>::error(&ShopError::NotFound);
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "error": { "code": 404, "message": "product not found" }
            })
        );
    }

    #[test]
    fn envelope_round_trips_both_arms() {
        let data: Envelope<Item> = serde_json::from_str(
            r#"{"data":{"name":"Fox","price":"29.99","stock":10000}}"#,
        )
        .unwrap();
        assert_eq!(data.into_result().unwrap().name, "Fox");

        let error: Envelope<Item> =
            serde_json::from_str(r#"{"error":{"code":404,"message":"not enough stock"}}"#).unwrap();
        let body = error.into_result().unwrap_err();
        assert_eq!(body.code, 404);
        assert_eq!(body.message, "not enough stock");
    }
}
