// src/api/github.rs
//! Thin HTTP client for the GitHub REST API.
//!
//! Lists issues and pull requests for a repository and flattens each
//! item to a scalar record so the exporter never sees nested objects.
//! Note the issues endpoint also returns pull requests; the `is_pr` and
//! `pr_number` fields carry that distinction through to the export.

use crate::config::ApiToken;
use crate::constants::GITHUB_API_PAGE_SIZE;
use crate::error::{GatewayError, UpstreamErrorCode};
use crate::model::{Record, Scalar};
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("raptor/", env!("CARGO_PKG_VERSION"));

/// A thin wrapper around a reqwest `Client` for GitHub API requests.
///
/// The credential is optional: unauthenticated requests work against
/// public repositories, only with a tighter rate limit.
#[derive(Clone)]
pub struct GithubHttpClient {
    client: Client,
}

impl GithubHttpClient {
    pub fn new(token: Option<&ApiToken>) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(token)?)
            .build()?;
        Ok(Self { client })
    }

    fn create_headers(token: Option<&ApiToken>) -> Result<header::HeaderMap, GatewayError> {
        let mut headers = header::HeaderMap::new();

        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT_HEADER));

        if let Some(token) = token {
            let auth_header = format!("Bearer {}", token.as_str());
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&auth_header).map_err(|e| {
                    GatewayError::MissingConfiguration(format!("Invalid API token format: {}", e))
                })?,
            );
        }

        Ok(headers)
    }

    /// Fetches one page of a list endpoint and deserializes the items.
    async fn get_list(&self, endpoint: &str) -> Result<Vec<IssueWire>, GatewayError> {
        let url = format!(
            "{}/{}?state=all&per_page={}",
            API_BASE_URL, endpoint, GITHUB_API_PAGE_SIZE
        );
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&text).map_err(|e| {
                log::error!("failed to parse list response: {}", e);
                GatewayError::MalformedResponse(e.to_string())
            })
        } else {
            Err(parse_error_message(&text, status))
        }
    }
}

#[async_trait::async_trait]
impl super::RepositorySource for GithubHttpClient {
    async fn list_issues(&self, owner: &str, repo: &str) -> Result<Vec<Record>, GatewayError> {
        let endpoint = format!("repos/{}/{}/issues", owner, repo);
        let items = self.get_list(&endpoint).await?;
        Ok(items.into_iter().map(|item| issue_record(item, repo)).collect())
    }

    async fn list_pulls(&self, owner: &str, repo: &str) -> Result<Vec<Record>, GatewayError> {
        let endpoint = format!("repos/{}/{}/pulls", owner, repo);
        let items = self.get_list(&endpoint).await?;
        Ok(items.into_iter().map(|item| pull_record(item, repo)).collect())
    }
}

/// Wire shape of the GitHub error body.
#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

fn parse_error_message(body: &str, status: StatusCode) -> GatewayError {
    let message = serde_json::from_str::<ErrorMessage>(body)
        .map(|envelope| envelope.message)
        .unwrap_or_else(|_| format!("HTTP {}", status));

    GatewayError::UpstreamService {
        code: UpstreamErrorCode::from_http_status(status.as_u16()),
        message,
        status: status.as_u16(),
    }
}

// --- Wire types ---
//
// One struct covers both endpoints: pull-request listings simply never
// carry `pull_request`, and issue listings never carry `merged_at`.

#[derive(Debug, Deserialize)]
struct IssueWire {
    #[serde(default)]
    url: String,
    #[serde(default)]
    id: i64,
    #[serde(default)]
    number: i64,
    #[serde(default)]
    state: String,
    #[serde(default)]
    locked: bool,
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    closed_at: Option<String>,
    #[serde(default)]
    merged_at: Option<String>,
    #[serde(default)]
    assignee: Option<ActorWire>,
    #[serde(default)]
    assignees: Vec<ActorWire>,
    #[serde(default)]
    labels: Vec<LabelWire>,
    #[serde(default)]
    milestone: Option<MilestoneWire>,
    #[serde(default)]
    user: Option<ActorWire>,
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ActorWire {
    #[serde(default)]
    login: String,
}

#[derive(Debug, Deserialize)]
struct LabelWire {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct MilestoneWire {
    #[serde(default)]
    title: String,
}

// --- Flattening ---

fn joined_logins(actors: &[ActorWire]) -> String {
    actors
        .iter()
        .map(|actor| actor.login.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn joined_labels(labels: &[LabelWire]) -> String {
    labels
        .iter()
        .map(|label| label.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Common flattening shared by both record shapes, in export-column
/// order up to the trailing endpoint-specific fields.
fn base_record(item: &IssueWire) -> Record {
    let mut record = Record::new();
    record.insert("url".to_string(), Scalar::from(item.url.clone()));
    record.insert("id".to_string(), Scalar::from(item.id));
    record.insert("number".to_string(), Scalar::from(item.number));
    record.insert("state".to_string(), Scalar::from(item.state.clone()));
    record.insert("locked".to_string(), Scalar::from(item.locked));
    record.insert("title".to_string(), Scalar::from(item.title.clone()));
    record.insert("body".to_string(), Scalar::from(item.body.clone()));
    record.insert("created_at".to_string(), Scalar::from(item.created_at.clone()));
    record.insert("updated_at".to_string(), Scalar::from(item.updated_at.clone()));
    record.insert("closed_at".to_string(), Scalar::from(item.closed_at.clone()));
    record
}

fn shared_tail(record: &mut Record, item: &IssueWire, repo: &str) {
    record.insert(
        "assignee".to_string(),
        item.assignee
            .as_ref()
            .map_or(Scalar::Null, |actor| Scalar::from(actor.login.clone())),
    );
    record.insert("assignees".to_string(), Scalar::from(joined_logins(&item.assignees)));
    record.insert("labels".to_string(), Scalar::from(joined_labels(&item.labels)));
    record.insert(
        "milestone".to_string(),
        item.milestone
            .as_ref()
            .map_or(Scalar::Null, |milestone| Scalar::from(milestone.title.clone())),
    );
    record.insert("repo".to_string(), Scalar::from(repo));
    record.insert(
        "user".to_string(),
        item.user
            .as_ref()
            .map_or(Scalar::Null, |actor| Scalar::from(actor.login.clone())),
    );
}

fn issue_record(item: IssueWire, repo: &str) -> Record {
    let is_pr = item.pull_request.is_some();

    let mut record = base_record(&item);
    shared_tail(&mut record, &item, repo);
    record.insert("is_pr".to_string(), Scalar::from(is_pr));
    record.insert(
        "pr_number".to_string(),
        if is_pr { Scalar::from(item.number) } else { Scalar::Null },
    );
    record
}

fn pull_record(item: IssueWire, repo: &str) -> Record {
    let mut record = base_record(&item);
    record.insert("merged_at".to_string(), Scalar::from(item.merged_at.clone()));
    shared_tail(&mut record, &item, repo);
    record
}
