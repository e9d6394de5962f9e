pub mod config;
pub mod error;
pub mod parser;
pub mod transcriber;

use async_trait::async_trait;

pub use config::YoutubeConfig;
pub use error::{FetchCause, TranscriptError};
pub use transcriber::YoutubeTranscriptApi;

/// One timed caption line as the provider returns it.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptSnippet {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Fetches the caption track for `video_id` in the first of `languages`
    /// the video has.
    async fn fetch(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> Result<Vec<TranscriptSnippet>, TranscriptError>;
}
