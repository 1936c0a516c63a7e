use reqwest::{Client, StatusCode};
use serde::Deserialize;
use stepwise_types::{ResponseSink, SubmissionRecord};

use crate::{HttpSinkConfig, ResponseMode};

#[derive(Debug, thiserror::Error)]
pub enum HttpSinkError {
    /// The request did not complete: unreachable, timed out, or TLS failure.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Endpoint rejected the submission with status {status}")]
    Rejected { status: StatusCode },

    /// The endpoint answered `{"result": "error"}`.
    #[error("Endpoint reported an error: {0}")]
    Script(String),
}

/// Reply shape of the spreadsheet endpoint.
#[derive(Debug, Deserialize)]
struct ScriptReply {
    result: String,
    #[serde(default)]
    error: Option<String>,
}

/// Posts each submission as one JSON object.
///
/// No retries: a failed delivery is reported and the user decides whether to
/// submit again.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: Client,
    endpoint: String,
    mode: ResponseMode,
}

impl HttpSink {
    /// Build a sink with the configured request timeout.
    pub fn new(config: &HttpSinkConfig) -> Result<Self, HttpSinkError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Build a sink around an existing client. The client's own timeout applies.
    pub fn with_client(client: Client, config: &HttpSinkConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            mode: config.response_mode,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn mode(&self) -> ResponseMode {
        self.mode
    }

    async fn inspect(response: reqwest::Response) -> Result<(), HttpSinkError> {
        let status = response.status();
        if !status.is_success() {
            return Err(HttpSinkError::Rejected { status });
        }
        let body = response.text().await?;
        // Anything that is not the script's reply shape counts as accepted.
        match serde_json::from_str::<ScriptReply>(&body) {
            Ok(reply) if reply.result == "error" => Err(HttpSinkError::Script(
                reply.error.unwrap_or_else(|| "unknown error".to_string()),
            )),
            _ => Ok(()),
        }
    }
}

impl ResponseSink for HttpSink {
    type Error = HttpSinkError;

    async fn deliver(&self, record: &SubmissionRecord) -> Result<(), Self::Error> {
        tracing::debug!(endpoint = %self.endpoint, fields = record.len(), "posting submission");

        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "submission request failed"))?;

        let status = response.status();
        let outcome = match self.mode {
            ResponseMode::Opaque => Ok(()),
            ResponseMode::Inspect => Self::inspect(response).await,
        };
        match &outcome {
            Ok(()) => tracing::info!(status = status.as_u16(), "submission delivered"),
            Err(err) => tracing::warn!(status = status.as_u16(), error = %err, "submission rejected"),
        }
        outcome
    }
}
