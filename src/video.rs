use std::sync::LazyLock;

use regex::Regex;

static VIDEO_URL_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)")
            .expect("Invalid watch URL regex"),
        Regex::new(r"youtube\.com/shorts/([^&\n?#]+)").expect("Invalid shorts URL regex"),
    ]
});

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("empty video identifier")]
    Empty,
    #[error("unrecognized YouTube URL: {0}")]
    UnrecognizedUrl(String),
}

/// Pulls the video id out of a watch, short link, embed or shorts URL.
///
/// The token runs up to the first `&`, newline, `?` or `#` and must be
/// non-empty, so `https://youtube.com/watch?v=` gives `None`.
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_URL_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Turns user input into a video id. Anything mentioning `youtube` or
/// `youtu.be` is parsed as a URL, everything else is taken as an id.
pub fn normalize(raw: &str) -> Result<String, InvalidInput> {
    if raw.is_empty() {
        return Err(InvalidInput::Empty);
    }

    if raw.contains("youtube") || raw.contains("youtu.be") {
        extract_video_id(raw)
            .map(str::to_string)
            .ok_or_else(|| InvalidInput::UnrecognizedUrl(raw.to_string()))
    } else {
        Ok(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123"),
            Some("abc123")
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123&t=42s"),
            Some("abc123")
        );
    }

    #[test]
    fn extracts_from_short_link_and_embed() {
        assert_eq!(extract_video_id("https://youtu.be/abc123"), Some("abc123"));
        assert_eq!(extract_video_id("https://youtu.be/abc123?t=5"), Some("abc123"));
        assert_eq!(
            extract_video_id("https://youtube.com/embed/abc123"),
            Some("abc123")
        );
        assert_eq!(
            extract_video_id("https://youtube.com/embed/abc123#start"),
            Some("abc123")
        );
    }

    #[test]
    fn extracts_from_shorts_url() {
        assert_eq!(
            extract_video_id("https://youtube.com/shorts/abc123?feature=share"),
            Some("abc123")
        );
    }

    #[test]
    fn empty_token_is_not_an_id() {
        assert_eq!(extract_video_id("https://youtube.com/watch?v="), None);
        assert_eq!(extract_video_id("https://youtube.com/watch?v=&t=1"), None);
    }

    #[test]
    fn unsupported_shapes_yield_none() {
        assert_eq!(extract_video_id("https://www.youtube.com/"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/playlist?list=PL1"), None);
        assert_eq!(extract_video_id("dQw4w9WgXcQ"), None);
    }

    #[test]
    fn bare_id_passes_through() {
        assert_eq!(normalize("dQw4w9WgXcQ"), Ok("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn url_input_is_extracted() {
        assert_eq!(
            normalize("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Ok("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(normalize(""), Err(InvalidInput::Empty));
    }

    #[test]
    fn unrecognized_youtube_url_is_rejected() {
        assert!(matches!(
            normalize("https://www.youtube.com/channel/UC123"),
            Err(InvalidInput::UnrecognizedUrl(_))
        ));
        assert!(normalize("https://youtube.com/watch?v=").is_err());
    }
}
