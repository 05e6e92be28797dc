use async_trait::async_trait;
use rp_core::{GenerateError, Prediction, PredictionRequest};
use serde_json::Value;

/// The slice of the relay's HTTP surface the generation client needs.
/// Abstracted so the polling loop can be exercised against scripted
/// status sequences in tests.
#[async_trait]
pub trait RelayApi {
    async fn create(&self, request: &PredictionRequest) -> Result<Prediction, GenerateError>;
    async fn status(&self, id: &str) -> Result<Prediction, GenerateError>;
}

/// Talks to a running relay over HTTP.
pub struct HttpRelay {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRelay {
    /// `base_url` is the relay's predictions endpoint, e.g.
    /// `http://localhost:3001/api/predictions`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl RelayApi for HttpRelay {
    async fn create(&self, request: &PredictionRequest) -> Result<Prediction, GenerateError> {
        let resp = self
            .http
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| GenerateError::Submission(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            // Prefer the provider's own detail message when the body has one.
            let detail = resp
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("detail")
                        .or_else(|| body.get("error"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                });
            return Err(GenerateError::Submission(detail.unwrap_or_else(|| {
                format!("API request failed with status {}", status.as_u16())
            })));
        }

        resp.json::<Prediction>()
            .await
            .map_err(|e| GenerateError::Submission(e.to_string()))
    }

    async fn status(&self, id: &str) -> Result<Prediction, GenerateError> {
        let resp = self
            .http
            .get(format!("{}/{id}", self.base_url))
            .send()
            .await
            .map_err(|e| GenerateError::PollingTransport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GenerateError::PollingTransport(format!(
                "Failed to check prediction status: {}",
                status.as_u16()
            )));
        }

        resp.json::<Prediction>()
            .await
            .map_err(|e| GenerateError::PollingTransport(e.to_string()))
    }
}
