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
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use toystore_rs::service::order::CatalogClient;
use toystore_rs::{CATALOG_HOST_VAR, CATALOG_PORT, DEFAULT_HOST, ORDER_PORT, OrderLog, service};
use tracing_subscriber::EnvFilter;

/// Order service - records completed purchases
///
/// Serves POST /order. Each request debits the catalog service over HTTP
/// and, only on success, appends to the CSV-backed order log.
#[derive(Parser, Debug)]
#[command(name = "order")]
#[command(about = "Toy store order service", long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = ORDER_PORT)]
    port: u16,

    /// Backing CSV file for the order log
    #[arg(long, value_name = "FILE", default_value = "data/orders.csv")]
    data: PathBuf,

    /// Artificial per-request processing delay, in milliseconds
    #[arg(long, default_value_t = 200)]
    delay_ms: u64,

    /// Host where the catalog service runs
    #[arg(long, env = CATALOG_HOST_VAR, default_value = DEFAULT_HOST)]
    catalog_host: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if let Some(parent) = args.data.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating data directory '{}'", parent.display()))?;
    }
    let log = OrderLog::open(&args.data, Duration::from_millis(args.delay_ms))
        .with_context(|| format!("opening order log at '{}'", args.data.display()))?;
    let catalog = CatalogClient::new(format!("http://{}:{}", args.catalog_host, CATALOG_PORT));
    let app = service::order::router(Arc::new(log), catalog);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("order service listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
