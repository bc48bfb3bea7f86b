use std::fmt;
use std::time::Duration;

use log::info;
use reqwest::blocking::{Client, Request};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const GITHUB_JSON: &str = "application/vnd.github+json";
pub const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
pub const DEFAULT_API_VERSION: &str = "2022-11-28";
pub const DEFAULT_REF: &str = "main";

/// Where and how to dispatch the capture workflow. Endpoint and token always
/// come from the caller (flags or environment).
#[derive(Clone)]
pub struct TriggerConfig {
    pub endpoint: String,
    pub token: String,
    pub git_ref: String,
    pub api_version: String,
    /// `None` waits for the server indefinitely.
    pub timeout: Option<Duration>,
}

impl TriggerConfig {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            git_ref: DEFAULT_REF.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: None,
        }
    }

    pub fn with_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = git_ref.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn client(&self) -> Result<Client> {
        Ok(Client::builder().timeout(self.timeout).build()?)
    }
}

// Keep the token out of logs
impl fmt::Debug for TriggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .field("git_ref", &self.git_ref)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CaptureInputs {
    pub url: String,
    pub output_filename: String,
}

/// Body of a `workflow_dispatch` call.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WorkflowDispatch {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub inputs: CaptureInputs,
}

impl WorkflowDispatch {
    pub fn new(git_ref: &str, url: &str, output_filename: &str) -> Self {
        Self {
            git_ref: git_ref.to_string(),
            inputs: CaptureInputs {
                url: url.to_string(),
                output_filename: output_filename.to_string(),
            },
        }
    }
}

pub fn dispatch_request(
    client: &Client,
    config: &TriggerConfig,
    payload: &WorkflowDispatch,
) -> Result<Request> {
    let request = client
        .post(&config.endpoint)
        .header(ACCEPT, GITHUB_JSON)
        .bearer_auth(&config.token)
        .header(API_VERSION_HEADER, &config.api_version)
        .json(payload)
        .build()?;
    Ok(request)
}

/// Sends one dispatch request and hands back whatever status the server
/// answered with. The response body is ignored and nothing is retried.
pub fn trigger_capture(
    config: &TriggerConfig,
    url: &str,
    output_filename: &str,
) -> Result<StatusCode> {
    let client = config.client()?;
    trigger_capture_with(&client, config, url, output_filename)
}

/// Same as [`trigger_capture`] on a caller supplied client. The client's own
/// timeout applies; `config.timeout` is not consulted.
pub fn trigger_capture_with(
    client: &Client,
    config: &TriggerConfig,
    url: &str,
    output_filename: &str,
) -> Result<StatusCode> {
    let payload = WorkflowDispatch::new(&config.git_ref, url, output_filename);
    let request = dispatch_request(client, config, &payload)?;

    info!("Dispatching capture of {} to {}", url, config.endpoint);
    let response = client.execute(request)?;
    Ok(response.status())
}
