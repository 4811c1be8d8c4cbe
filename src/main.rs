use clap::Parser;
use std::sync::Arc;
use zim_search_provider::cli::Cli;
use zim_search_provider::config::Config;
use zim_search_provider::notebook::{ZimRegistry, ZimViewer};
use zim_search_provider::provider::SearchProvider;
use zim_search_provider::search::SearchSettings;
use zim_search_provider::server::ProviderServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; the session bus forwards them to the journal
    zim_search_provider::tracing::init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    tracing::info!(
        search_all = config.search_all,
        names_only = config.names_only,
        "Starting zim-search-provider"
    );

    let registry = Arc::new(ZimRegistry::new(
        config.notebooks_list_path(),
        config.zim_command.clone(),
    ));
    let viewer = Arc::new(ZimViewer::new(config.zim_command.clone()));

    let provider = SearchProvider::with_default(
        registry,
        viewer,
        SearchSettings::from(&config),
        config.default_notebook.as_deref(),
    )
    .await?;

    let _connection = ProviderServer::new(Arc::new(provider))
        .serve()
        .await
        .inspect_err(|e| {
            tracing::error!("Error serving search provider: {:?}", e);
        })?;

    shutdown_signal().await?;
    tracing::info!("Shutting down");

    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() -> anyhow::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result?,
        _ = terminate.recv() => {}
    }
    Ok(())
}
