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

use anyhow::bail;
use clap::Parser;
use crossbeam::channel;
use std::collections::HashMap;
use std::thread;
use std::time::{Duration, Instant};
use toystore_rs::{DEFAULT_HOST, FRONTEND_PORT};

/// Load generator - drives the front-end with queries and orders
///
/// Spawns client threads that browse the catalog through the front-end and
/// place an order every Nth request. Toy names rotate round-robin with a
/// per-client offset, so runs are reproducible.
#[derive(Parser, Debug)]
#[command(name = "loadgen")]
#[command(about = "Toy store load generator", long_about = None)]
struct Args {
    /// Front-end host
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Front-end port
    #[arg(long, default_value_t = FRONTEND_PORT)]
    port: u16,

    /// Number of concurrent client threads
    #[arg(long, default_value_t = 4)]
    clients: usize,

    /// Requests each client issues
    #[arg(long, default_value_t = 100)]
    requests: usize,

    /// Place an order every Nth request (0 = queries only)
    #[arg(long, default_value_t = 5)]
    order_every: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpKind {
    Query,
    Order,
}

#[derive(Debug)]
struct Sample {
    kind: OpKind,
    elapsed: Duration,
    /// The service answered with an error envelope, e.g. out of stock.
    rejected: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let base = format!("http://{}:{}", args.host, args.port);

    let (tx, rx) = channel::unbounded();
    let started = Instant::now();

    let mut clients = Vec::new();
    for client_no in 0..args.clients {
        let tx = tx.clone();
        let base = base.clone();
        clients.push(thread::spawn(move || {
            run_client(client_no, &base, args.requests, args.order_every, &tx)
        }));
    }
    drop(tx);

    for client in clients {
        match client.join() {
            Ok(result) => result?,
            Err(_) => bail!("client thread panicked"),
        }
    }
    let wall = started.elapsed();

    let samples: Vec<Sample> = rx.iter().collect();
    report(&samples, wall);
    Ok(())
}

/// One client's request loop; latencies go back over the channel.
///
/// Stock numbers seen in query replies cap later order quantities; a toy
/// last reported as sold out gets queried instead of ordered.
fn run_client(
    client_no: usize,
    base: &str,
    requests: usize,
    order_every: usize,
    tx: &channel::Sender<Sample>,
) -> anyhow::Result<()> {
    const TOYS: [&str; 6] = ["Tux", "Whale", "Elephant", "Fox", "Python", "Dolphin"];
    let http = reqwest::blocking::Client::new();
    let mut seen_stock: HashMap<&str, u32> = HashMap::new();

    for i in 0..requests {
        let name = TOYS[(client_no + i) % TOYS.len()];
        let cap = seen_stock.get(name).copied().unwrap_or(u32::MAX);
        let is_order = order_every > 0 && (i + 1) % order_every == 0 && cap > 0;

        let start = Instant::now();
        let body: serde_json::Value = if is_order {
            let quantity = (1 + (i % 3) as u32).min(cap);
            http.post(format!("{base}/orders"))
                .json(&serde_json::json!({ "name": name, "quantity": quantity }))
                .send()?
                .json()?
        } else {
            http.get(format!("{base}/products/{name}")).send()?.json()?
        };
        if let Some(stock) = body["data"]["stock"].as_u64() {
            seen_stock.insert(name, u32::try_from(stock).unwrap_or(u32::MAX));
        }

        tx.send(Sample {
            kind: if is_order { OpKind::Order } else { OpKind::Query },
            elapsed: start.elapsed(),
            rejected: body.get("error").is_some(),
        })?;
    }
    Ok(())
}

fn report(samples: &[Sample], wall: Duration) {
    for (kind, label) in [(OpKind::Query, "queries"), (OpKind::Order, "orders ")] {
        let latencies: Vec<Duration> = samples
            .iter()
            .filter(|sample| sample.kind == kind)
            .map(|sample| sample.elapsed)
            .collect();
        let rejected = samples
            .iter()
            .filter(|sample| sample.kind == kind && sample.rejected)
            .count();
        println!(
            "{label}: {} sent, {} rejected, avg latency {:?}",
            latencies.len(),
            rejected,
            average(&latencies)
        );
    }
    println!("wall time: {wall:?}");
}

fn average(latencies: &[Duration]) -> Duration {
    if latencies.is_empty() {
        return Duration::ZERO;
    }
    latencies.iter().sum::<Duration>() / latencies.len() as u32
}
