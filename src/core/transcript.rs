use crate::error::{Error, Result};
use std::path::Path;
use yt_transcript_rs::{FetchedTranscript, api::YouTubeTranscriptApi};

#[derive(Clone)]
pub struct TranscriptService {
    api: YouTubeTranscriptApi,
}

impl TranscriptService {
    pub fn new() -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| Error::custom(format!("Failed to initialize transcript API: {e}")))?;
        Ok(Self { api })
    }

    pub async fn fetch_transcript(
        &self,
        video_id: &str,
        languages: &[&str],
        preserve_formatting: bool,
    ) -> Result<FetchedTranscript> {
        match self
            .api
            .fetch_transcript(video_id, languages, preserve_formatting)
            .await
        {
            Ok(transcript) => Ok(transcript),
            Err(e) => Err(Error::custom(format!("Failed to fetch transcript: {e}"))),
        }
    }

    /// Renders the fetched snippets as `[start - end] text` lines. Snippet
    /// text often carries HTML entities; they are decoded here so the
    /// analysis pipeline never sees them.
    pub fn format_transcript(transcript: &FetchedTranscript) -> Vec<String> {
        transcript
            .snippets
            .iter()
            .map(|snippet| {
                let start = format_timestamp(snippet.start);
                let end = format_timestamp(snippet.start + snippet.duration);
                let text = html_escape::decode_html_entities(snippet.text.trim());
                format!("[{start} - {end}] {text}")
            })
            .collect()
    }
}

/// Reads a transcription from disk, decoding any HTML entities left over by
/// the transcription export.
pub async fn load_transcript_file(path: &Path) -> Result<String> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(html_escape::decode_html_entities(&raw).into_owned())
}

fn format_timestamp(seconds: f64) -> String {
    let total_millis = (seconds * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let secs = (total_millis % 60_000) / 1_000;
    let millis = total_millis % 1_000;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
    } else {
        format!("{minutes:02}:{secs:02}.{millis:03}")
    }
}

pub fn extract_video_id(url: &str) -> Option<String> {
    // Accept full YouTube URLs, short links, or a bare ID.
    let raw_id = if let Some(v_param) = url.split("v=").nth(1) {
        v_param.split('&').next().unwrap_or(v_param)
    } else if let Some(youtu_be) = url.split("youtu.be/").nth(1) {
        youtu_be.split('?').next().unwrap_or(youtu_be)
    } else {
        url
    };

    sanitize_video_id(raw_id).ok()
}

const MAX_VIDEO_ID_LEN: usize = 128;

/// Ensure a video identifier is safe for downstream use (filesystem paths,
/// API calls). Only ASCII alphanumeric characters plus `_` and `-` pass.
pub fn sanitize_video_id(raw: &str) -> Result<String> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(Error::invalid_input("video-id", "video ID cannot be empty"));
    }

    if trimmed.len() > MAX_VIDEO_ID_LEN {
        return Err(Error::invalid_input(
            "video-id",
            "video ID is unexpectedly long",
        ));
    }

    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
    {
        return Err(Error::invalid_input(
            "video-id",
            "video ID contains unsupported characters; expected only letters, numbers, '-' or '_'",
        ));
    }

    Ok(trimmed.to_string())
}

/// Derives a usable package identifier from a transcript file path when the
/// caller did not supply one: the file stem, squeezed into the same character
/// set as a video ID.
pub fn id_from_path(path: &Path) -> Result<String> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::invalid_input("video-id", "transcript path has no file name"))?;

    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    sanitize_video_id(&cleaned)
}

#[cfg(test)]
mod tests {
    use super::{MAX_VIDEO_ID_LEN, extract_video_id, id_from_path, sanitize_video_id};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    #[test]
    fn allows_expected_characters() {
        let id = sanitize_video_id("abcDEF123-_x").expect("valid ID");
        assert_eq!(id, "abcDEF123-_x");
    }

    #[test]
    fn rejects_empty() {
        assert!(sanitize_video_id("   ").is_err());
    }

    #[test]
    fn rejects_invalid_chars() {
        assert!(sanitize_video_id("abc/../../etc").is_err());
    }

    #[test]
    fn rejects_too_long() {
        let long = "a".repeat(MAX_VIDEO_ID_LEN + 1);
        assert!(sanitize_video_id(&long).is_err());
    }

    #[test]
    fn extracts_from_watch_and_short_urls() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?si=abc"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn derives_id_from_file_stem() {
        let id = id_from_path(Path::new("videos/video 1/aula Liderança.txt")).expect("id");
        assert_eq!(id, "aula_Lideran_a");
    }
}
