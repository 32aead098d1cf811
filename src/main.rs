//! Sentiscope - Main entry point.

use std::sync::Arc;

use clap::Parser;

use sentiscope::{
    analysis::Analyzer,
    classifier::create_classifier,
    cli::{Cli, Command, run_analyze_command, run_history_command},
    config::Config,
    db::connect_from_config,
    observability::init_tracing,
    web::{AppState, start_server},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    init_tracing(&config.logging)?;

    let store = connect_from_config(&config.database).await?;

    match cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::History { limit } => run_history_command(store.as_ref(), limit).await,
        Command::Analyze { text } => {
            let classifier = create_classifier(&config.classifier)?;
            let analyzer = Analyzer::new(classifier, store, config.server.history_limit);
            run_analyze_command(&analyzer, &text).await
        }
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let addr = config.server.socket_addr()?;

            let classifier = create_classifier(&config.classifier)?;
            tracing::info!(backend = classifier.name(), "Classifier ready");

            let analyzer = Analyzer::new(classifier, store, config.server.history_limit);
            let state = Arc::new(
                AppState::new(analyzer).with_max_body_bytes(config.server.max_body_bytes),
            );

            let (bound, handle) = start_server(addr, state).await?;
            println!("Sentiscope listening on http://{}", bound);

            tokio::signal::ctrl_c().await?;
            tracing::info!("Received Ctrl-C, shutting down");
            handle.shutdown().await;
            Ok(())
        }
    }
}
