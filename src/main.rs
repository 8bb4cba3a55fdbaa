// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use raptor::{
    AppState, CommandLineInput, GatewayConfig, GithubHttpClient, NotionHttpClient, QueryCatalog,
    ResultsLog,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("raptor.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}";

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds every client the routes depend on and serves the gateway.
///
/// The composition root owns client lifecycles: handlers only ever see
/// the injected trait objects in `AppState`.
async fn serve(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let notion = NotionHttpClient::new(&config.notion_token)?;
    let github = GithubHttpClient::new(config.github_token.as_ref())?;

    let results = match &config.results_uri {
        Some(uri) => match ResultsLog::connect(uri).await {
            Ok(log_store) => Some(Arc::new(log_store)),
            Err(err) => {
                // Fail open: exports work without the log.
                log::error!("results log unavailable: {}", err);
                None
            }
        },
        None => {
            log::info!("no DATABASE configured; results log disabled");
            None
        }
    };

    let addr = config.bind_addr();
    let state = AppState {
        config: Arc::new(config),
        workspace: Arc::new(notion),
        repositories: Arc::new(github),
        queries: Arc::new(QueryCatalog::new(results)),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("raptor listening on {}", addr);
    axum::serve(listener, raptor::router(state)).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = GatewayConfig::resolve(cli)?;

    serve(config).await
}
