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

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use toystore_rs::{
    CATALOG_HOST_VAR, CATALOG_PORT, DEFAULT_HOST, FRONTEND_PORT, ORDER_HOST_VAR, ORDER_PORT,
    service,
};
use tracing_subscriber::EnvFilter;

/// Front-end router - the client-facing entry point
///
/// Relays GET /products/{name} to the catalog service and POST /orders to
/// the order service, forwarding bodies verbatim.
#[derive(Parser, Debug)]
#[command(name = "frontend")]
#[command(about = "Toy store front-end router", long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = FRONTEND_PORT)]
    port: u16,

    /// Host where the catalog service runs
    #[arg(long, env = CATALOG_HOST_VAR, default_value = DEFAULT_HOST)]
    catalog_host: String,

    /// Host where the order service runs
    #[arg(long, env = ORDER_HOST_VAR, default_value = DEFAULT_HOST)]
    order_host: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let app = service::frontend::router(
        format!("http://{}:{}", args.catalog_host, CATALOG_PORT),
        format!("http://{}:{}", args.order_host, ORDER_PORT),
    );

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("front-end listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
