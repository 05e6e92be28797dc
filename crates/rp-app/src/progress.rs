use tokio::sync::mpsc;

/// Human-readable status updates for one generation attempt.
///
/// Modeled as a channel rather than a callback so the consumer can stop
/// listening (drop the receiver) without interrupting the generation:
/// `emit` ignores send errors.
#[derive(Clone)]
pub struct ProgressSender(mpsc::UnboundedSender<String>);

pub fn progress_channel() -> (ProgressSender, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ProgressSender(tx), rx)
}

impl ProgressSender {
    pub fn emit(&self, message: impl Into<String>) {
        let _ = self.0.send(message.into());
    }
}
