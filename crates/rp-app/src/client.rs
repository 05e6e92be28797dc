use std::time::Duration;

use rp_core::{GenerateError, PaintColor, PredictionRequest, PredictionStatus};
use tracing::info;

use crate::preprocess;
use crate::progress::ProgressSender;
use crate::relay::RelayApi;

pub const POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const MAX_POLL_ATTEMPTS: u32 = 60;

/// Drives one generation from submission to a terminal outcome.
///
/// Polls are strictly sequential: every interval wait precedes its
/// status check, and each check's response is awaited before the next
/// wait begins.
pub struct GenerationClient<R: RelayApi> {
    relay: R,
    poll_interval: Duration,
    max_attempts: u32,
}

impl<R: RelayApi> GenerationClient<R> {
    pub fn new(relay: R) -> Self {
        Self {
            relay,
            poll_interval: POLL_INTERVAL,
            max_attempts: MAX_POLL_ATTEMPTS,
        }
    }

    /// Shorter cadence for tests.
    #[cfg(test)]
    fn with_cadence(relay: R, poll_interval: Duration, max_attempts: u32) -> Self {
        Self {
            relay,
            poll_interval,
            max_attempts,
        }
    }

    /// Preprocess the photo, submit the job once (no retry), then poll
    /// until terminal. Returns the result reference.
    pub async fn generate(
        &self,
        image: &[u8],
        color: &PaintColor,
        progress: &ProgressSender,
    ) -> Result<String, GenerateError> {
        progress.emit("Resizing and converting image...");
        let data_url = preprocess::to_data_url(image, preprocess::MAX_DIMENSION)?;

        let request = PredictionRequest::repaint(data_url, color);

        progress.emit("Sending to AI...");
        let prediction = self.relay.create(&request).await?;
        info!(id = %prediction.id, "prediction submitted");

        self.poll(&prediction.id, progress).await
    }

    /// Fixed-interval polling, bounded at `max_attempts` checks.
    async fn poll(&self, id: &str, progress: &ProgressSender) -> Result<String, GenerateError> {
        for attempt in 1..=self.max_attempts {
            tokio::time::sleep(self.poll_interval).await;

            let prediction = self.relay.status(id).await?;
            match prediction.status {
                PredictionStatus::Starting => {
                    progress.emit("Starting AI processing...");
                }
                PredictionStatus::Processing => {
                    let elapsed = attempt as u64 * self.poll_interval.as_secs();
                    progress.emit(format!("Processing... ({elapsed}s)"));
                }
                PredictionStatus::Succeeded => {
                    return match prediction.first_output() {
                        Some(url) => {
                            progress.emit("Complete!");
                            info!(id = %prediction.id, "prediction succeeded");
                            Ok(url.to_string())
                        }
                        None => Err(GenerateError::NoOutput),
                    };
                }
                PredictionStatus::Failed => {
                    return Err(GenerateError::JobFailed(
                        prediction.error.unwrap_or_else(|| "AI processing failed".to_string()),
                    ));
                }
                PredictionStatus::Canceled => return Err(GenerateError::Canceled),
            }
        }

        Err(GenerateError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rp_core::Prediction;
    use serde_json::json;

    use super::*;
    use crate::progress::progress_channel;

    /// Replays a fixed sequence of status results and counts calls.
    struct ScriptedRelay {
        statuses: Mutex<VecDeque<Result<Prediction, GenerateError>>>,
        creates: AtomicUsize,
        polls: AtomicUsize,
    }

    impl ScriptedRelay {
        fn new(statuses: Vec<Result<Prediction, GenerateError>>) -> Self {
            Self {
                statuses: Mutex::new(statuses.into()),
                creates: AtomicUsize::new(0),
                polls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RelayApi for ScriptedRelay {
        async fn create(&self, _request: &PredictionRequest) -> Result<Prediction, GenerateError> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            Ok(prediction(json!({ "id": "p1", "status": "starting" })))
        }

        async fn status(&self, _id: &str) -> Result<Prediction, GenerateError> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            self.statuses
                .lock()
                .unwrap()
                .pop_front()
                .expect("polled past the scripted sequence")
        }
    }

    fn prediction(value: serde_json::Value) -> Prediction {
        serde_json::from_value(value).unwrap()
    }

    fn running() -> Result<Prediction, GenerateError> {
        Ok(prediction(json!({ "id": "p1", "status": "running" })))
    }

    fn client(relay: ScriptedRelay) -> GenerationClient<ScriptedRelay> {
        GenerationClient::with_cadence(relay, Duration::ZERO, MAX_POLL_ATTEMPTS)
    }

    fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<String>) -> Vec<String> {
        let mut messages = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    #[tokio::test]
    async fn test_running_twice_then_succeeded_returns_after_three_polls() {
        let relay = ScriptedRelay::new(vec![
            running(),
            running(),
            Ok(prediction(json!({ "id": "p1", "status": "succeeded", "output": "X" }))),
        ]);
        let client = client(relay);
        let (tx, mut rx) = progress_channel();

        let url = client.poll("p1", &tx).await.unwrap();
        assert_eq!(url, "X");
        assert_eq!(client.relay.polls.load(Ordering::SeqCst), 3);

        let messages = drain(&mut rx);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages.last().map(String::as_str), Some("Complete!"));
    }

    #[tokio::test]
    async fn test_sixty_running_responses_time_out_without_a_sixty_first_poll() {
        let relay = ScriptedRelay::new((0..60).map(|_| running()).collect());
        let client = client(relay);
        let (tx, _rx) = progress_channel();

        let err = client.poll("p1", &tx).await.unwrap_err();
        assert!(matches!(err, GenerateError::Timeout));
        // A 61st status call would panic inside the scripted fake.
        assert_eq!(client.relay.polls.load(Ordering::SeqCst), 60);
    }

    #[tokio::test]
    async fn test_failed_on_first_poll_stops_immediately_with_provider_detail() {
        let relay = ScriptedRelay::new(vec![Ok(prediction(
            json!({ "id": "p1", "status": "failed", "error": "boom" }),
        ))]);
        let client = client(relay);
        let (tx, _rx) = progress_channel();

        let err = client.poll("p1", &tx).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(client.relay.polls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_without_detail_gets_generic_message() {
        let relay =
            ScriptedRelay::new(vec![Ok(prediction(json!({ "id": "p1", "status": "failed" })))]);
        let client = client(relay);
        let (tx, _rx) = progress_channel();

        let err = client.poll("p1", &tx).await.unwrap_err();
        assert_eq!(err.to_string(), "AI processing failed");
    }

    #[tokio::test]
    async fn test_canceled_stops_immediately() {
        let relay =
            ScriptedRelay::new(vec![Ok(prediction(json!({ "id": "p1", "status": "canceled" })))]);
        let client = client(relay);
        let (tx, _rx) = progress_channel();

        let err = client.poll("p1", &tx).await.unwrap_err();
        assert!(matches!(err, GenerateError::Canceled));
        assert_eq!(client.relay.polls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transport_error_aborts_polling() {
        let relay = ScriptedRelay::new(vec![
            running(),
            Err(GenerateError::PollingTransport("connection reset".into())),
        ]);
        let client = client(relay);
        let (tx, _rx) = progress_channel();

        let err = client.poll("p1", &tx).await.unwrap_err();
        assert!(matches!(err, GenerateError::PollingTransport(_)));
        assert_eq!(client.relay.polls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_succeeded_without_output_is_an_error() {
        let relay =
            ScriptedRelay::new(vec![Ok(prediction(json!({ "id": "p1", "status": "succeeded" })))]);
        let client = client(relay);
        let (tx, _rx) = progress_channel();

        let err = client.poll("p1", &tx).await.unwrap_err();
        assert!(matches!(err, GenerateError::NoOutput));
    }

    #[tokio::test]
    async fn test_progress_receiver_dropped_mid_poll_does_not_abort() {
        let relay = ScriptedRelay::new(vec![
            running(),
            Ok(prediction(json!({ "id": "p1", "status": "succeeded", "output": ["A", "B"] }))),
        ]);
        let client = client(relay);
        let (tx, rx) = progress_channel();
        drop(rx);

        let url = client.poll("p1", &tx).await.unwrap();
        assert_eq!(url, "A");
    }
}
