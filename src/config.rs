// src/config.rs
use crate::error::GatewayError;
use clap::Parser;
use std::fmt;

/// Parsed command-line input. Everything secret or deployment-specific
/// comes from the environment instead; the CLI only shapes the process.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Address to bind the HTTP listener on
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP listener on
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// An opaque bearer credential for an upstream service.
///
/// Debug output masks the value so a token never lands in a log line or
/// a panic message.
#[derive(Clone)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(value: String) -> Result<Self, GatewayError> {
        if value.trim().is_empty() {
            return Err(GatewayError::MissingConfiguration(
                "API token must not be empty".to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken(****)")
    }
}

/// Resolved gateway configuration — validated and ready to construct
/// every client the routes depend on.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub notion_token: ApiToken,
    /// Database queried when `/notion/database` gets no `id` parameter.
    pub default_database: Option<String>,
    pub github_owner: String,
    pub github_token: Option<ApiToken>,
    /// Repositories appended to every issue/pull request unless the
    /// caller forces an exclusive list.
    pub default_repos: Vec<String>,
    /// Postgres URI for the append-only results log; absent disables it.
    pub results_uri: Option<String>,
    pub host: String,
    pub port: u16,
    pub verbose: bool,
}

impl GatewayConfig {
    /// Resolves a complete gateway configuration from CLI input and
    /// environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, GatewayError> {
        let notion_token = ApiToken::new(require_env("NOTION_TOKEN")?)?;
        let github_owner = require_env("GITHUB_OWNER")?;
        let github_token = optional_env("GITHUB_TOKEN").map(ApiToken::new).transpose()?;

        let default_repos = optional_env("GITHUB_REPOS")
            .map(|value| split_list(&value))
            .unwrap_or_default();

        Ok(GatewayConfig {
            notion_token,
            default_database: optional_env("NOTION_DEFAULT_DATABASE"),
            github_owner,
            github_token,
            default_repos,
            results_uri: optional_env("DATABASE"),
            host: cli.host,
            port: cli.port,
            verbose: cli.verbose,
        })
    }

    /// The listener address in `host:port` form.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn require_env(name: &str) -> Result<String, GatewayError> {
    std::env::var(name).map_err(|_| {
        GatewayError::MissingConfiguration(format!("{} environment variable not set", name))
    })
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Splits a comma-separated list, dropping empty entries and padding.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}
