use clap::arg;
use clap::command;
use clap::Parser;
use paypal_gateway::orders::api::PaypalOrders;
use paypal_gateway::server;
use paypal_gateway::utils::config_loader;
use paypal_gateway::utils::logging;
use anyhow::Result;
use paypal_gateway::utils::logging::LogLevel;
use tokio::sync::watch;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML config; without it everything is read from the environment
    #[arg(short, long, env = "CONFIG")]
    config: Option<String>,
    #[arg(long, env = "LOG_LEVEL" , value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read args, load config
    // -------------------------------

    let args = Args::parse();
    let service_config = config_loader::run(args.config.as_deref()).await?;
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 2. Wire client, token cache and orders API
    // -------------------------------

    let orders = PaypalOrders::from_config(&service_config)?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // -------------------------------
    // 3. Background token revalidation
    // -------------------------------

    let refresher = orders
        .tokens()
        .loop_refresh_token(service_config.settings.refresh_interval_seconds(), shutdown_rx.clone());

    // -------------------------------
    // 4. Stop everything on ctrl-c
    // -------------------------------

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown signal received");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                // keep the sender alive so nothing shuts down by accident
                error!("failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        }
    });

    // -------------------------------
    // 5. HTTP server
    // -------------------------------

    info!("Service starting...");
    let served = server::server::start(&service_config.settings, orders, shutdown_rx).await;

    refresher.abort();
    let _ = refresher.await;
    info!("Service stopped");
    served
}
