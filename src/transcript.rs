use serde::Serialize;

use crate::youtube::TranscriptSnippet;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub duration: f64,
    pub text: String,
}

impl From<TranscriptSnippet> for TranscriptSegment {
    fn from(snippet: TranscriptSnippet) -> Self {
        Self {
            start: snippet.start,
            duration: snippet.duration,
            text: snippet.text,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptResult {
    pub text: String,
    pub segments: Vec<TranscriptSegment>,
    pub duration: f64,
}

impl TranscriptResult {
    /// Joins segment text with single spaces; the duration is where the last
    /// segment ends, or zero without segments.
    pub fn from_segments(segments: Vec<TranscriptSegment>) -> Self {
        let text = segments
            .iter()
            .map(|seg| seg.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let duration = segments
            .last()
            .map(|seg| seg.start + seg.duration)
            .unwrap_or(0.0);

        Self {
            text,
            segments,
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: f64, duration: f64, text: &str) -> TranscriptSegment {
        TranscriptSegment {
            start,
            duration,
            text: text.to_string(),
        }
    }

    #[test]
    fn joins_text_and_ends_at_last_segment() {
        let result = TranscriptResult::from_segments(vec![
            segment(0.0, 2.0, "hi"),
            segment(2.0, 3.0, "there"),
        ]);

        assert_eq!(result.text, "hi there");
        assert_eq!(result.duration, 5.0);
        assert_eq!(result.segments.len(), 2);
    }

    #[test]
    fn empty_transcript_has_zero_duration() {
        let result = TranscriptResult::from_segments(Vec::new());

        assert_eq!(result.text, "");
        assert_eq!(result.duration, 0.0);
        assert!(result.segments.is_empty());
    }

    #[test]
    fn duration_uses_last_segment_not_longest() {
        let result = TranscriptResult::from_segments(vec![
            segment(0.0, 30.0, "long"),
            segment(4.5, 1.25, "short"),
        ]);

        assert_eq!(result.duration, 5.75);
    }
}
