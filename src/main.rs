//! depthbook - Binary Entry Point
//!
//! Replays a short scripted feed (snapshot, then deltas) through a
//! price-keyed book and prints the visible top of book after each step.
//!
//! ```bash
//! # Optional first argument: hard depth cap per side
//! RUST_LOG=debug cargo run -- 10
//! ```

use depthbook::orderbook::{OrderBookSide, PriceBook};
use depthbook::types::price::from_fixed_trimmed;
use depthbook::types::PriceDelta;
use depthbook::{BookConfig, Error, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SNAPSHOT_ASKS: &[[&str; 2]] = &[
    ["50001.5", "0.40"],
    ["50000.0", "1.25"],
    ["50003.0", "2.00"],
    ["50002.0", "0.75"],
];

const SNAPSHOT_BIDS: &[[&str; 2]] = &[
    ["49998.0", "0.50"],
    ["49999.5", "1.10"],
    ["49997.0", "3.00"],
];

/// `(is_ask, [price, size])`
const UPDATES: &[(bool, [&str; 2])] = &[
    (true, ["50000.0", "0"]),
    (false, ["49999.8", "0.20"]),
    (true, ["50000.5", "0.90"]),
    (false, ["49997.0", "0"]),
    (true, ["50003.0", "0"]),
];

fn parse_all(rows: &[[&str; 2]]) -> Result<Vec<PriceDelta>> {
    rows.iter().map(|row| PriceDelta::parse(row)).collect()
}

fn print_book(label: &str, book: &PriceBook) -> Result<()> {
    println!("--- {} ---", label);
    for level in book.asks().levels().iter().rev() {
        println!(
            "  ask {:>12}  {}",
            from_fixed_trimmed(level.price),
            from_fixed_trimmed(level.size)
        );
    }
    for level in book.bids().levels() {
        println!(
            "  bid {:>12}  {}",
            from_fixed_trimmed(level.price),
            from_fixed_trimmed(level.size)
        );
    }
    println!(
        "  spread:   {}",
        book.spread().map(from_fixed_trimmed).unwrap_or_default()
    );
    println!("  checksum: {}", book.checksum_hex(10)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = BookConfig::new();
    if let Some(arg) = std::env::args().nth(1) {
        let depth = arg
            .parse::<usize>()
            .map_err(|_| Error::InvalidNumber { value: arg.clone() })?;
        config = config.with_depth(depth);
    }
    info!(depth = ?config.depth, "building book from snapshot");

    let mut book = PriceBook::from_snapshot(
        parse_all(SNAPSHOT_ASKS)?,
        parse_all(SNAPSHOT_BIDS)?,
        config,
    )?;
    print_book("snapshot", &book)?;

    for (nonce, (is_ask, fields)) in UPDATES.iter().enumerate() {
        let delta = PriceDelta::parse(fields)?;
        if *is_ask {
            book.asks_mut().store_array(delta)?;
        } else {
            book.bids_mut().store_array(delta)?;
        }
        book.set_nonce(nonce as u64 + 1);
    }
    print_book("after updates", &book)?;

    book.limit(Some(2))?;
    print_book("limited to 2", &book)?;

    book.limit(None)?;
    print_book("restored", &book)?;

    info!(nonce = ?book.nonce(), "replay complete");
    Ok(())
}
