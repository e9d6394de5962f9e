use std::sync::LazyLock;

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use regex::Regex;
use reqwest::header::{ACCEPT_LANGUAGE, COOKIE};
use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;

use crate::youtube::config::YoutubeConfig;
use crate::youtube::error::{FetchCause, TranscriptError};
use crate::youtube::parser::parse_timedtext;
use crate::youtube::{TranscriptProvider, TranscriptSnippet};

const CONSENT_FORM_MARKER: &str = "action=\"https://consent.youtube.com/s\"";
const RECAPTCHA_MARKER: &str = "class=\"g-recaptcha\"";
const BOT_CHECK_REASON: &str = "Sign in to confirm you’re not a bot";
const AGE_RESTRICTED_REASON: &str = "This video may be inappropriate for some users.";
const VIDEO_UNAVAILABLE_REASON: &str = "This video is unavailable";

static API_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("Invalid API key regex")
});
static CONSENT_VALUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"name="v" value="(.*?)""#).expect("Invalid consent regex"));

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayabilityStatus {
    status: Option<String>,
    reason: Option<String>,
    error_screen: Option<ErrorScreen>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorScreen {
    player_error_message_renderer: Option<PlayerErrorMessage>,
}

#[derive(Deserialize)]
struct PlayerErrorMessage {
    subreason: Option<Runs>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Runs {
    #[serde(default)]
    runs: Vec<Run>,
    simple_text: Option<String>,
}

#[derive(Deserialize)]
struct Run {
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_renderer: Option<PlayerCaptionsRenderer>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerCaptionsRenderer {
    caption_tracks: Option<Vec<CaptionTrack>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    kind: Option<String>,
    name: Option<Runs>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }

    fn display_name(&self) -> &str {
        self.name
            .as_ref()
            .and_then(|name| {
                name.simple_text
                    .as_deref()
                    .or_else(|| name.runs.first().map(|run| run.text.as_str()))
            })
            .unwrap_or(&self.language_code)
    }

    fn transcript_url(&self) -> String {
        self.base_url.replace("&fmt=srv3", "")
    }
}

/// Fetches captions the way the YouTube web player does: scrape the watch
/// page for the innertube key, ask the player endpoint for caption tracks,
/// then download the chosen timedtext track.
#[derive(Clone)]
pub struct YoutubeTranscriptApi {
    client: reqwest::Client,
    config: YoutubeConfig,
}

impl YoutubeTranscriptApi {
    pub fn new(config: YoutubeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    /// Sends with the consent cookie, if any, and reads the body. YouTube
    /// answers 429 when it rate limits an IP.
    async fn send_text(request: RequestBuilder, cookie: Option<&str>) -> Result<String, FetchCause> {
        let request = match cookie {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        };

        let response = request.send().await?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchCause::IpBlocked);
        }
        Ok(response.error_for_status()?.text().await?)
    }

    async fn fetch_html(&self, video_id: &str, cookie: Option<&str>) -> Result<String, FetchCause> {
        let request = self
            .client
            .get(self.config.watch_url(video_id))
            .header(ACCEPT_LANGUAGE, "en-US");

        let html = Self::send_text(request, cookie).await?;
        debug!("Fetched watch page for {video_id}: {} bytes", html.len());
        Ok(html)
    }

    /// Returns the watch page and, if one had to be given, the consent cookie.
    async fn fetch_video_html(&self, video_id: &str) -> Result<(String, Option<String>), FetchCause> {
        let html = self.fetch_html(video_id, None).await?;
        if !html.contains(CONSENT_FORM_MARKER) {
            return Ok((html, None));
        }

        debug!("Consent interstitial for {video_id}, retrying with consent cookie");
        let value = CONSENT_VALUE_REGEX
            .captures(&html)
            .and_then(|caps| caps.get(1))
            .ok_or(FetchCause::ConsentCookie)?;
        let cookie = format!("CONSENT=YES+{}", value.as_str());

        let html = self.fetch_html(video_id, Some(&cookie)).await?;
        if html.contains(CONSENT_FORM_MARKER) {
            return Err(FetchCause::ConsentCookie);
        }
        Ok((html, Some(cookie)))
    }

    async fn fetch_player_data(
        &self,
        video_id: &str,
        api_key: &str,
        cookie: Option<&str>,
    ) -> Result<PlayerResponse, FetchCause> {
        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": self.config.innertube_client_name,
                    "clientVersion": self.config.innertube_client_version,
                }
            },
            "videoId": video_id,
        });

        let request = self.client.post(self.config.player_url(api_key)).json(&body);
        let text = Self::send_text(request, cookie).await?;
        serde_json::from_str(&text).map_err(|e| {
            debug!("Player response for {video_id} is not parsable: {e}");
            FetchCause::DataUnparsable
        })
    }

    /// Returns the caption tracks and the consent cookie later requests need.
    async fn fetch_caption_tracks(
        &self,
        video_id: &str,
    ) -> Result<(Vec<CaptionTrack>, Option<String>), FetchCause> {
        let (html, cookie) = self.fetch_video_html(video_id).await?;
        let api_key = extract_api_key(&html)?;
        let player = self.fetch_player_data(video_id, api_key, cookie.as_deref()).await?;

        if let Some(status) = &player.playability_status {
            assert_playable(video_id, status)?;
        }

        let tracks = player
            .captions
            .and_then(|captions| captions.player_captions_renderer)
            .and_then(|renderer| renderer.caption_tracks)
            .ok_or(FetchCause::TranscriptsDisabled)?;
        Ok((tracks, cookie))
    }

    async fn fetch_snippets(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> Result<Vec<TranscriptSnippet>, FetchCause> {
        let (tracks, cookie) = self.fetch_caption_tracks(video_id).await?;
        let track = find_track(&tracks, languages)?;
        debug!(
            "Using {} caption track '{}' ({}) for {video_id}",
            if track.is_generated() { "generated" } else { "manual" },
            track.display_name(),
            track.language_code
        );

        let url = track.transcript_url();
        if url.contains("&exp=xpe") {
            return Err(FetchCause::PoTokenRequired);
        }

        let request = self.client.get(url).header(ACCEPT_LANGUAGE, "en-US");
        let xml = Self::send_text(request, cookie.as_deref()).await?;

        Ok(parse_timedtext(&xml))
    }
}

#[async_trait]
impl TranscriptProvider for YoutubeTranscriptApi {
    async fn fetch(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> Result<Vec<TranscriptSnippet>, TranscriptError> {
        self.fetch_snippets(video_id, languages)
            .await
            .map_err(|cause| TranscriptError::new(video_id, cause))
    }
}

fn extract_api_key(html: &str) -> Result<&str, FetchCause> {
    if let Some(key) = API_KEY_REGEX.captures(html).and_then(|caps| caps.get(1)) {
        return Ok(key.as_str());
    }
    if html.contains(RECAPTCHA_MARKER) {
        return Err(FetchCause::IpBlocked);
    }
    Err(FetchCause::DataUnparsable)
}

fn assert_playable(video_id: &str, status: &PlayabilityStatus) -> Result<(), FetchCause> {
    let code = match status.status.as_deref() {
        None | Some("OK") => return Ok(()),
        Some(code) => code,
    };
    let reason = status.reason.as_deref().unwrap_or_default();

    match (code, reason) {
        ("LOGIN_REQUIRED", BOT_CHECK_REASON) => Err(FetchCause::RequestBlocked),
        ("LOGIN_REQUIRED", AGE_RESTRICTED_REASON) => Err(FetchCause::AgeRestricted),
        ("ERROR", VIDEO_UNAVAILABLE_REASON) if video_id.starts_with("http") => {
            Err(FetchCause::InvalidVideoId)
        }
        ("ERROR", VIDEO_UNAVAILABLE_REASON) => Err(FetchCause::VideoUnavailable),
        _ => {
            let subreasons = status
                .error_screen
                .as_ref()
                .and_then(|screen| screen.player_error_message_renderer.as_ref())
                .and_then(|renderer| renderer.subreason.as_ref())
                .map(|subreason| subreason.runs.iter().map(|run| run.text.clone()).collect())
                .unwrap_or_default();

            Err(FetchCause::VideoUnplayable {
                reason: reason.to_string(),
                subreasons,
            })
        }
    }
}

/// First requested language with a track wins; within a language, manually
/// created tracks beat generated ones.
fn find_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Result<&'a CaptionTrack, FetchCause> {
    languages
        .iter()
        .find_map(|lang| {
            tracks
                .iter()
                .filter(|track| &track.language_code == lang)
                .min_by_key(|track| track.is_generated())
        })
        .ok_or_else(|| FetchCause::NoTranscriptFound {
            requested: languages.to_vec(),
            available: tracks.iter().map(|track| track.language_code.clone()).collect(),
        })
}
