pub mod client;
pub mod preprocess;
pub mod progress;
pub mod relay;
pub mod session;

pub use client::GenerationClient;
pub use progress::{ProgressSender, progress_channel};
pub use relay::{HttpRelay, RelayApi};
pub use session::Session;
