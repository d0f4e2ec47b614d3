use std::time::Duration;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mango_twap::commands::{
    cancel_command, market_order_command, order_command, MarketOrderArgs, OrderArgs,
};
use mango_twap::config::{parse_interval, Env};
use mango_twap::context::TradeContext;
use mango_twap::error::Error;
use mango_twap::shared::Side;

#[derive(Parser)]
#[command(name = "mango-twap", version, about = "TWAP trading bot")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Cancel existing orders, then rest a post-only order at the mid price.
    Order {
        #[arg(long)]
        market: String,
        #[arg(long, value_enum)]
        side: Side,
        #[arg(long)]
        amount: Decimal,
        /// Skip buys above / sells below this price.
        #[arg(long = "priceThreshold")]
        price_threshold: Option<Decimal>,
    },
    /// Repeat a pseudo market order on a fixed interval.
    Twap {
        /// Tick interval, e.g. `30s`, `5m`, or bare seconds.
        #[arg(long, value_parser = parse_interval)]
        interval: Duration,
        #[arg(long)]
        market: String,
        #[arg(long, value_enum)]
        side: Side,
        #[arg(long)]
        amount: Decimal,
        /// Skip buys above / sells below this price.
        #[arg(long = "priceThreshold")]
        price_threshold: Option<Decimal>,
        /// Resolve the execution price but do not submit.
        #[arg(long = "dryRun")]
        dry_run: bool,
    },
    /// Cancel all resting orders on a market, then exit.
    Cancel {
        #[arg(long)]
        market: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    let env = Env::load()?;
    let ctx = TradeContext::connect(&env).await?;
    info!("using wallet {}", ctx.owner);

    match cli.command {
        Command::Order {
            market,
            side,
            amount,
            price_threshold,
        } => {
            let args = OrderArgs {
                market,
                side,
                amount,
                price_threshold,
            };
            match order_command(&ctx, &args).await? {
                Some(signature) => info!("order placed: {signature}"),
                None => info!("order not placed"),
            }
            Ok(())
        }
        Command::Twap {
            interval,
            market,
            side,
            amount,
            price_threshold,
            dry_run,
        } => {
            let args = MarketOrderArgs {
                market,
                side,
                amount,
                price_threshold,
                dry_run,
            };
            twap_loop(&ctx, &args, interval).await
        }
        Command::Cancel { market } => {
            cancel_command(&ctx, &market).await?;
            Ok(())
        }
    }
}

/// Run the market-order command on a fixed interval, starting
/// immediately. Ticks are awaited in sequence; when a tick overruns its
/// interval the missed fires are skipped, not queued.
async fn twap_loop(
    ctx: &TradeContext,
    args: &MarketOrderArgs,
    interval: Duration,
) -> Result<(), Error> {
    info!(
        "twap {} of {} on {} every {:?} ready",
        args.side, args.amount, args.market, interval
    );

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        info!("market order starting...");
        match market_order_command(ctx, args).await {
            Ok(Some(signature)) => info!("market order success: {signature}"),
            Ok(None) => {}
            Err(e) => error!("market order failed: {e}"),
        }
    }
}
