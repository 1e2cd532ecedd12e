//! Price publisher (one publication cycle).
//!
//! # Cycle
//!
//! ```text
//!   config.toml ──▶ init logging / metrics ──▶ BlockchainClient + Wallet
//!                                                     │
//!                                                     ▼
//!   prices.json ──▶ Publisher::check_balance ──▶ Publisher::prepare ──▶ Publisher::upload
//!                      (advisory, may halt)        (fails the run)       (logged only)
//! ```

use clap::Parser;
use std::fs;
use std::path::PathBuf;

use alloy::primitives::Address;
use price_publisher::blockchain::{BlockchainClient, StorageTxClient, Wallet};
use price_publisher::config::{load_config, PublisherConfig};
use price_publisher::observability::{logging, metrics};
use price_publisher::{PriceRecord, Publisher};

#[derive(Parser)]
#[command(name = "price-publisher")]
#[command(about = "Publish a batch of aggregated prices to the storage network", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON array of price records sharing one timestamp.
    #[arg(short, long, required_unless_present = "check_balance_only")]
    batch: Option<PathBuf>,

    /// Strip per-source evidence before signing (overrides the config).
    #[arg(long)]
    omit_sources: bool,

    /// Report the wallet balance and exit.
    #[arg(long)]
    check_balance_only: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PublisherConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("price-publisher v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let storage_address: Address = config.publisher.storage_address.parse()?;
    let wallet = Wallet::from_env(config.blockchain.chain_id)?;
    let client = BlockchainClient::new(config.blockchain.clone()).await?;
    let publisher = Publisher::new(
        StorageTxClient::new(client, wallet, storage_address),
        config.publisher.min_balance,
    );

    let snapshot = publisher.check_balance().await;
    if snapshot.is_balance_low {
        tracing::warn!(
            balance = snapshot.balance,
            min_balance = config.publisher.min_balance,
            "Wallet balance is low"
        );
    }

    if cli.check_balance_only {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    if snapshot.is_balance_low && config.publisher.halt_on_low_balance {
        tracing::warn!("Skipping publication cycle because the balance is low");
        return Ok(());
    }

    let Some(batch_path) = cli.batch else {
        return Err("--batch is required".into());
    };
    let prices: Vec<PriceRecord> = serde_json::from_str(&fs::read_to_string(&batch_path)?)?;
    tracing::info!(
        path = %batch_path.display(),
        records = prices.len(),
        "Loaded price batch"
    );

    let omit_sources = cli.omit_sources || config.publisher.omit_sources;
    let tx = publisher.prepare(&prices, omit_sources).await?;
    publisher.upload(&tx).await;

    tracing::info!("Publication cycle complete");
    Ok(())
}
