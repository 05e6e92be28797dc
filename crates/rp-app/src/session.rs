use chrono::{DateTime, Utc};
use rp_core::{GenerateError, PaintColor};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// User-visible lifecycle of the visualizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Ready,
    Generating,
    Succeeded,
    Errored,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please choose a photo and a paint color first")]
    MissingFields,
    #[error("A generation is already in progress")]
    AlreadyGenerating,
}

/// Everything the generation driver needs for one attempt, stamped
/// with the epoch that keeps stale outcomes out of the session.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    pub epoch: Uuid,
    pub image: Vec<u8>,
    pub color: PaintColor,
}

/// The single active generation context for one user interaction.
///
/// At most one job is in flight at a time; anything that abandons the
/// current job (new upload, try-again) rotates the epoch so a late
/// outcome from the old job is ignored rather than written into state
/// the user has already moved past.
pub struct Session {
    image: Option<Vec<u8>>,
    color: Option<PaintColor>,
    phase: Phase,
    result_url: Option<String>,
    error: Option<String>,
    last_progress: Option<String>,
    epoch: Uuid,
    started_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            image: None,
            color: None,
            phase: Phase::Idle,
            result_url: None,
            error: None,
            last_progress: None,
            epoch: Uuid::new_v4(),
            started_at: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result_url(&self) -> Option<&str> {
        self.result_url.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_progress(&self) -> Option<&str> {
        self.last_progress.as_deref()
    }

    pub fn color(&self) -> Option<&PaintColor> {
        self.color.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// A new photo starts a new interaction: stale output, errors, and
    /// any in-flight job are all discarded.
    pub fn upload_image(&mut self, bytes: Vec<u8>) {
        self.image = Some(bytes);
        self.result_url = None;
        self.error = None;
        self.last_progress = None;
        self.epoch = Uuid::new_v4();
        self.phase = self.resting_phase();
    }

    /// Picking a color clears a displayed error but never a displayed
    /// result; the old result stands until a new generation replaces it.
    pub fn select_color(&mut self, color: PaintColor) {
        self.color = Some(color);
        match self.phase {
            Phase::Errored => {
                self.error = None;
                self.phase = self.resting_phase();
            }
            Phase::Idle | Phase::Ready => self.phase = self.resting_phase(),
            Phase::Generating | Phase::Succeeded => {}
        }
    }

    /// Guarded entry into `Generating`. Rejects synchronously, before
    /// any network traffic, when a job is already in flight or either
    /// input is missing.
    pub fn begin(&mut self) -> Result<GenerationTicket, SessionError> {
        if self.phase == Phase::Generating {
            return Err(SessionError::AlreadyGenerating);
        }
        let (Some(image), Some(color)) = (self.image.as_ref(), self.color.as_ref()) else {
            return Err(SessionError::MissingFields);
        };

        self.epoch = Uuid::new_v4();
        self.phase = Phase::Generating;
        self.error = None;
        self.last_progress = None;
        self.started_at = Some(Utc::now());
        info!(epoch = %self.epoch, color = %color, "generation started");

        Ok(GenerationTicket {
            epoch: self.epoch,
            image: image.clone(),
            color: color.clone(),
        })
    }

    /// Record a progress message for the current job; stale epochs are
    /// silently dropped.
    pub fn note_progress(&mut self, epoch: Uuid, message: impl Into<String>) {
        if epoch == self.epoch && self.phase == Phase::Generating {
            self.last_progress = Some(message.into());
        }
    }

    /// Resolve the job the ticket belongs to. Returns false when the
    /// outcome is stale (the session moved on) and was ignored.
    pub fn finish(&mut self, epoch: Uuid, outcome: Result<String, GenerateError>) -> bool {
        if epoch != self.epoch || self.phase != Phase::Generating {
            debug!(%epoch, "ignoring stale generation outcome");
            return false;
        }

        let elapsed = self
            .started_at
            .map(|t| Utc::now().signed_duration_since(t).num_seconds());
        match outcome {
            Ok(url) => {
                info!(elapsed_s = elapsed, "generation succeeded");
                self.result_url = Some(url);
                self.error = None;
                self.phase = Phase::Succeeded;
            }
            Err(e) => {
                info!(elapsed_s = elapsed, error = %e, "generation failed");
                self.error = Some(e.to_string());
                self.phase = Phase::Errored;
            }
        }
        true
    }

    /// Discard the displayed result or error (or abandon an in-flight
    /// job) and go back to `Ready`, keeping the image and color.
    pub fn try_again(&mut self) {
        match self.phase {
            Phase::Succeeded => self.result_url = None,
            Phase::Errored => self.error = None,
            Phase::Generating => self.epoch = Uuid::new_v4(),
            Phase::Idle | Phase::Ready => return,
        }
        self.last_progress = None;
        self.phase = self.resting_phase();
    }

    /// Phase when nothing is in flight and nothing is displayed.
    fn resting_phase(&self) -> Phase {
        if self.image.is_some() && self.color.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
