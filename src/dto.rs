use serde::{Deserialize, Serialize};

use crate::transcript::{TranscriptResult, TranscriptSegment};

/// Accepted as both the query string (GET) and the JSON body (POST).
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TranscriptParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

impl TranscriptParams {
    /// Builds params from raw query pairs. Repeated keys keep their first value.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.clone())
        };

        Self {
            url: first("url"),
            video_id: first("video_id"),
        }
    }

    /// `url` wins; an empty `url` falls through to `video_id`.
    pub fn input(&self) -> Option<&str> {
        [self.url.as_deref(), self.video_id.as_deref()]
            .into_iter()
            .flatten()
            .find(|value| !value.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct TranscriptDto {
    pub video_id: String,
    pub transcript: String,
    pub segments: Vec<TranscriptSegment>,
    pub duration: f64,
}

impl TranscriptDto {
    pub fn new(video_id: String, result: TranscriptResult) -> Self {
        Self {
            video_id,
            transcript: result.text,
            segments: result.segments,
            duration: result.duration,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceStatusDto {
    pub service: &'static str,
    pub version: &'static str,
    pub youtube_transcript_available: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}
