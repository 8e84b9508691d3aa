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
use toystore_rs::{CATALOG_PORT, Inventory, service};
use tracing_subscriber::EnvFilter;

/// Catalog service - authoritative stock and price data
///
/// Serves GET /query/{name} and POST /buy_qty over the CSV-backed
/// inventory store. A missing backing file is seeded with the default
/// toy set on startup.
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(about = "Toy store catalog service", long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = CATALOG_PORT)]
    port: u16,

    /// Backing CSV file for the inventory
    #[arg(long, value_name = "FILE", default_value = "data/toys_db.csv")]
    data: PathBuf,

    /// Artificial per-request processing delay, in milliseconds
    #[arg(long, default_value_t = 200)]
    delay_ms: u64,
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
    let inventory = Inventory::open(&args.data, Duration::from_millis(args.delay_ms))
        .with_context(|| format!("opening inventory at '{}'", args.data.display()))?;
    let app = service::catalog::router(Arc::new(inventory));

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("catalog service listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
