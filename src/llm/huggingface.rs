use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/google/pegasus-xsum";

pub const NO_SUMMARY_PLACEHOLDER: &str = "No summary could be generated.";
pub const ERROR_PLACEHOLDER: &str = "An error occurred while summarizing.";

/// Response fields that may carry the summary, in order of preference
const SUMMARY_FIELDS: &[&str] = &["generated_text", "summary_text"];

#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    client: reqwest::Client,
    api_token: Option<String>,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct SummarizeRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
    options: Options,
}

#[derive(Debug, Serialize)]
struct Parameters {
    min_length: u32,
    max_length: u32,
    length_penalty: f32,
}

#[derive(Debug, Serialize)]
struct Options {
    use_cache: bool,
    wait_for_model: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            min_length: 100,
            max_length: 200,
            length_penalty: 1.5,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            use_cache: true,
            wait_for_model: true,
        }
    }
}

/// Terminal state of one summarization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Succeeded(String),
    /// The endpoint answered, but not with a usable summary
    Malformed,
    /// Transport, auth or server failure
    Failed,
}

impl SummaryOutcome {
    /// Text to show as the summary, placeholders included
    pub fn into_text(self) -> String {
        match self {
            SummaryOutcome::Succeeded(text) => text,
            SummaryOutcome::Malformed => NO_SUMMARY_PLACEHOLDER.to_string(),
            SummaryOutcome::Failed => ERROR_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Error)]
enum SummarizeError {
    #[error("request to inference API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("inference API error ({status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

impl HuggingFaceClient {
    pub fn new(api_token: Option<String>, endpoint: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_token: api_token.filter(|t| !t.is_empty()),
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }

    /// Summarize `text`. Never fails: remote problems are logged and mapped
    /// to [`SummaryOutcome::Failed`], unexpected bodies to
    /// [`SummaryOutcome::Malformed`].
    pub async fn summarize(&self, text: &str) -> SummaryOutcome {
        match self.post(text).await {
            Ok(body) => {
                let outcome = parse_summary(&body);
                if outcome == SummaryOutcome::Malformed {
                    tracing::warn!("Unexpected response shape: {}", truncate(&body, 200));
                } else {
                    tracing::info!("Summary received");
                }
                outcome
            }
            Err(e) => {
                tracing::error!("Error summarizing the text: {}", e);
                SummaryOutcome::Failed
            }
        }
    }

    async fn post(&self, text: &str) -> Result<String, SummarizeError> {
        let request = SummarizeRequest {
            inputs: text,
            parameters: Parameters::default(),
            options: Options::default(),
        };

        let mut builder = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&request);

        if let Some(token) = &self.api_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        tracing::debug!(endpoint = %self.endpoint, chars = text.len(), "Sending summarize request");

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Status { status, body });
        }

        Ok(response.text().await?)
    }
}

/// Pull the summary out of a response body shaped like
/// `[{"summary_text": "..."}]`.
fn parse_summary(body: &str) -> SummaryOutcome {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return SummaryOutcome::Malformed;
    };

    let first = match value.as_array().and_then(|items| items.first()) {
        Some(first) => first,
        None => return SummaryOutcome::Malformed,
    };

    SUMMARY_FIELDS
        .iter()
        .filter_map(|field| first.get(*field).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(|s| SummaryOutcome::Succeeded(s.to_string()))
        .unwrap_or(SummaryOutcome::Malformed)
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
