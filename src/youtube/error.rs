use thiserror::Error;

#[derive(Debug, Error)]
#[error(
    "Could not retrieve a transcript for the video https://www.youtube.com/watch?v={video_id}! \
     This is most likely caused by: {cause}"
)]
pub struct TranscriptError {
    pub video_id: String,
    pub cause: FetchCause,
}

impl TranscriptError {
    pub fn new(video_id: impl Into<String>, cause: FetchCause) -> Self {
        Self {
            video_id: video_id.into(),
            cause,
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchCause {
    #[error("Request to YouTube failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Failed to automatically give consent to saving cookies")]
    ConsentCookie,

    #[error("YouTube is blocking requests from your IP (recaptcha challenge)")]
    IpBlocked,

    #[error("YouTube is blocking requests from your IP (bot check required)")]
    RequestBlocked,

    #[error("The data required to fetch the transcript is not parsable")]
    DataUnparsable,

    #[error("This video is age-restricted")]
    AgeRestricted,

    #[error("You provided an invalid video id. Make sure you are using the video id and NOT the url!")]
    InvalidVideoId,

    #[error("The video is no longer available")]
    VideoUnavailable,

    #[error("The video is unplayable: {reason}{}", format_subreasons(.subreasons))]
    VideoUnplayable {
        reason: String,
        subreasons: Vec<String>,
    },

    #[error("Subtitles are disabled for this video")]
    TranscriptsDisabled,

    #[error(
        "No transcripts were found for any of the requested language codes: {requested:?} \
         (available: {available:?})"
    )]
    NoTranscriptFound {
        requested: Vec<String>,
        available: Vec<String>,
    },

    #[error("The requested video cannot be retrieved without a PO Token")]
    PoTokenRequired,
}

fn format_subreasons(subreasons: &[String]) -> String {
    if subreasons.is_empty() {
        String::new()
    } else {
        format!(" ({})", subreasons.join(" "))
    }
}
