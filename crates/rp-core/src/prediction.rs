use serde::{Deserialize, Serialize};

use crate::color::PaintColor;
use crate::prompt;

/// Body posted to the provider's job-creation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRequest {
    pub version: String,
    pub input: PredictionInput,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionInput {
    /// Base64 data URL of the (already resized) room photo.
    pub image: String,
    pub prompt: String,
    pub num_inference_steps: u32,
    pub image_guidance_scale: f64,
    pub guidance_scale: f64,
}

impl PredictionRequest {
    /// Build a repaint job for one photo and one target color.
    pub fn repaint(image_data_url: String, color: &PaintColor) -> Self {
        Self {
            version: prompt::MODEL_VERSION.to_string(),
            input: PredictionInput {
                image: image_data_url,
                prompt: prompt::repaint_prompt(color),
                num_inference_steps: prompt::NUM_INFERENCE_STEPS,
                image_guidance_scale: prompt::IMAGE_GUIDANCE_SCALE,
                guidance_scale: prompt::GUIDANCE_SCALE,
            },
        }
    }
}

/// Provider job lifecycle. Some providers say `queued`/`running`,
/// others `starting`/`processing`; both normalize here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    #[serde(alias = "queued")]
    Starting,
    #[serde(alias = "running")]
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

impl PredictionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }
}

/// `output` comes back as either one reference or a list of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PredictionOutput {
    Single(String),
    Many(Vec<String>),
}

/// One provider-side job as reported by create/status responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PredictionOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
}

impl Prediction {
    /// The result reference, taking the first element when `output` is a list.
    pub fn first_output(&self) -> Option<&str> {
        match &self.output {
            Some(PredictionOutput::Single(url)) => Some(url),
            Some(PredictionOutput::Many(urls)) => urls.first().map(String::as_str),
            None => None,
        }
    }
}
