use clap::Parser;
use momentum_rotator::cli::{Cli, Commands};
use momentum_rotator::config::Config;
use momentum_rotator::store::{CsvStore, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration; a present-but-broken file is fatal
    if !std::path::Path::new(&cli.config).exists() {
        eprintln!("Config file {} not found, using defaults", cli.config);
    }
    let config = Config::load_or_default(&cli.config)?;

    // Initialize telemetry
    momentum_rotator::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting paper rotation");
            args.execute(&config).await?;
        }
        Commands::Status => {
            let store = CsvStore::open(&config.store.dir)?;
            match store.load_state()? {
                Some(snapshot) => {
                    println!("momentum-rotator status");
                    println!("  Held: {}", snapshot.position.label());
                    println!("  Quantity: {}", snapshot.position.quantity);
                    println!("  Cash: {} USDT", snapshot.position.cash_usdt);
                    println!("  Switches today: {}", snapshot.state.switches_today);
                }
                None => println!("No persisted state (fresh start, parked in USDT)"),
            }
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Universe: {} assets", config.universe.assets.len());
            println!(
                "  Edge gate: {} bps, net edge: {} bps (enabled={})",
                config.engine.edge_threshold_bps,
                config.engine.net_edge_threshold_bps,
                config.engine.net_edge_gate_enabled
            );
            println!(
                "  Confirm: {} ticks, min hold: {}s, cooldown: {}s, max switches/day: {}",
                config.engine.confirm_n,
                config.engine.min_hold_secs,
                config.engine.cooldown_secs,
                config.engine.max_switches_per_day
            );
            println!(
                "  Costs: fee {} + slippage {} + spread {} bps per leg",
                config.costs.fee_bps, config.costs.slippage_bps, config.costs.spread_buffer_bps
            );
            println!("  Tick: {}s", config.feed.tick_interval_secs);
        }
    }

    Ok(())
}
