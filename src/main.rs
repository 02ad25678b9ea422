use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arbit::api::{run_server, AppState};
use arbit::config::Config;
use arbit::pear::{BasketExecutor, PearClient};
use arbit::simulation::PaperExecutor;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arbit=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    print_banner(&config);

    let executor: Arc<dyn BasketExecutor> = if config.agent.paper_trading {
        info!("📝 Paper trading: basket orders fill locally");
        Arc::new(PaperExecutor::new())
    } else {
        warn!("⚠️ LIVE TRADING: basket orders go to {}", config.pear.api_url);
        Arc::new(PearClient::new(&config.pear)?)
    };

    let state = Arc::new(AppState::new(executor, config.agent.paper_trading));

    tokio::select! {
        result = run_server(state, &config.server.bind_addr) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("🛑 Shutdown signal received");
        }
    }

    Ok(())
}

fn print_banner(config: &Config) {
    println!("\n╔═══════════════════════════════════════════════════════════╗");
    println!("║              ARBIT Trading Card Scorer                    ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();
    println!(
        "📊 Mode: {}",
        if config.agent.paper_trading {
            "PAPER TRADING (Safe Mode)"
        } else {
            "⚠️  LIVE TRADING ⚠️"
        }
    );
    println!("🍐 Pear API: {}", config.pear.api_url);
    println!("   • Client ID: {}", config.pear.client_id);
    println!("   • Slippage: {:.2}%", config.pear.slippage * 100.0);
    println!("🌐 Listening on: {}", config.server.bind_addr);
    println!();
    println!("Press Ctrl+C to stop");
    println!("═══════════════════════════════════════════════════════════");
    println!();
}
