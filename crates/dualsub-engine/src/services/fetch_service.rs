//! Segmented track retrieval.
//!
//! Upstream timed-text assets for this class of source are split into
//! same-shaped files numbered with an incrementing integer before the file
//! extension. This module assembles one complete track document from that
//! sequence. The failure classification is load-bearing: a "not found"
//! response is the expected end-of-sequence signal and terminates cleanly,
//! while transient failures are retried with exponential backoff before the
//! sequence gives up and keeps whatever was already accumulated.

use std::sync::LazyLock;
use std::time::Duration;

use dualsub_bridge::config::FetchConfig;
use dualsub_track::{Track, vtt};
use regex::Regex;

static SEGMENT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(\.\w+)$").expect("segment number pattern"));

/// Failure classification for one segment request.
#[derive(Debug, thiserror::Error)]
pub enum SegmentError {
    /// The segment does not exist. Expected once the sequence runs past its
    /// last segment; never retried.
    #[error("segment not found")]
    NotFound,
    /// The request exceeded the hard timeout.
    #[error("request timed out")]
    Timeout,
    /// Any other transport-level failure.
    #[error("request failed: {0}")]
    Transport(String),
}

/// Track-level fetch failure: not a single segment could be retrieved.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("no segments could be retrieved")]
    Empty,
}

/// Retrieval collaborator: fetches one segment body by URL.
pub trait SegmentSource {
    async fn fetch(&self, url: &str) -> Result<String, SegmentError>;
}

/// [`SegmentSource`] over the engine's shared HTTP client. The client is
/// built with the configured per-request timeout.
pub struct HttpSegmentSource {
    client: reqwest::Client,
}

impl HttpSegmentSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl SegmentSource for HttpSegmentSource {
    async fn fetch(&self, url: &str) -> Result<String, SegmentError> {
        let response = self.client.get(url).send().await.map_err(classify)?;
        if !response.status().is_success() {
            return Err(SegmentError::NotFound);
        }
        response.text().await.map_err(classify)
    }
}

fn classify(error: reqwest::Error) -> SegmentError {
    if error.is_timeout() {
        SegmentError::Timeout
    } else {
        SegmentError::Transport(error.without_url().to_string())
    }
}

/// Retry and timing knobs for one fetch session, taken from config.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub max_retries: u32,
    pub retry_base_delay: Duration,
}

impl From<&FetchConfig> for FetchSettings {
    fn from(config: &FetchConfig) -> Self {
        Self {
            max_retries: config.max_segment_retries.max(1),
            retry_base_delay: Duration::from_millis(config.retry_base_delay_milliseconds),
        }
    }
}

/// Substitutes the trailing numeric token before the file extension, e.g.
/// `.../track-1.vtt` with index 4 becomes `.../track-4.vtt`. Templates
/// without such a token are returned unchanged and treated as
/// single-segment sources.
pub fn segment_url(template: &str, index: u32) -> String {
    match SEGMENT_NUMBER.captures(template) {
        Some(caps) => {
            let number = caps.get(1).map(|m| m.start()).unwrap_or(0);
            let extension = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            format!("{}{}{}", &template[..number], index, extension)
        }
        None => template.to_string(),
    }
}

/// Assembles one track's raw document from its numbered segment sequence.
///
/// Segments are fetched starting at index 1. Each retrieved body is
/// validated first; an invalid body means the sequence ran past its end and
/// terminates it cleanly, as does a not-found response. Transient failures
/// retry the same index with delays of `base * 2^(attempt-1)` until the
/// per-segment attempt cap is reached, at which point the sequence ends
/// with whatever was accumulated. The retry counter resets on every
/// successful segment.
///
/// Only a completely empty accumulation is an error: a document with at
/// least one valid segment is accepted even if later segments failed.
pub async fn assemble_document<S: SegmentSource>(
    source: &S,
    template: &str,
    settings: &FetchSettings,
) -> Result<String, FetchError> {
    let single_segment = segment_url(template, 1) == segment_url(template, 2);
    let mut document = String::new();
    let mut index: u32 = 1;
    let mut retries: u32 = 0;

    loop {
        let url = segment_url(template, index);
        match source.fetch(&url).await {
            Ok(body) => {
                let report = vtt::validate(&body);
                if !report.is_valid() {
                    // Retrievable but not a usable document: the sequence
                    // ran past its end, not an error.
                    log::debug!("Segment {index} is not a usable document, ending sequence");
                    break;
                }
                if !report.has_format_header {
                    log::warn!("Segment {index} of {template} is missing its format header");
                }

                // Joined with a blank line so concatenated segments parse
                // exactly like the per-segment parses would.
                document.push_str(body.trim_end());
                document.push_str("\n\n");
                index += 1;
                retries = 0;

                if single_segment {
                    break;
                }
            }
            Err(SegmentError::NotFound) => {
                log::debug!("Segment {index} not found, sequence complete");
                break;
            }
            Err(error) => {
                retries += 1;
                let delay = settings.retry_base_delay * 2u32.pow(retries - 1);
                log::warn!("Segment {index} failed ({error}), attempt {retries}, backing off {delay:?}");
                tokio::time::sleep(delay).await;
                if retries >= settings.max_retries {
                    log::error!("Segment {index} exhausted its {retries} attempts, ending sequence");
                    break;
                }
            }
        }
    }

    if document.is_empty() {
        return Err(FetchError::Empty);
    }
    Ok(document)
}

/// Fetches and parses one complete track.
///
/// A document that yields no cues degrades to an empty track with a logged
/// warning; only an entirely unretrievable sequence is an error.
pub async fn fetch_track<S: SegmentSource>(
    source: &S,
    template: &str,
    settings: &FetchSettings,
) -> Result<Track, FetchError> {
    let document = assemble_document(source, template, settings).await?;
    let cues = vtt::parse(&document);
    if cues.is_empty() {
        log::warn!("Document assembled from {template} produced no cues");
    } else {
        log::info!("Assembled {} cues from {template}", cues.len());
    }
    Ok(Track::new(cues))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<String, SegmentError>>>,
        requests: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<String, SegmentError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl SegmentSource for ScriptedSource {
        async fn fetch(&self, url: &str) -> Result<String, SegmentError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(SegmentError::NotFound))
        }
    }

    fn settings() -> FetchSettings {
        FetchSettings {
            max_retries: 3,
            retry_base_delay: Duration::from_secs(1),
        }
    }

    fn segment(start: u32, text: &str) -> String {
        format!("WEBVTT\n\n00:00:0{start}.000 --> 00:00:0{}.000\n{text}\n", start + 1)
    }

    #[test]
    fn segment_url_substitutes_the_trailing_number() {
        assert_eq!(
            segment_url("https://host/track-1.vtt", 4),
            "https://host/track-4.vtt"
        );
        assert_eq!(segment_url("https://host/12/sub3.vtt", 10), "https://host/12/sub10.vtt");
    }

    #[test]
    fn segment_url_leaves_unnumbered_templates_alone() {
        assert_eq!(segment_url("https://host/track.vtt", 7), "https://host/track.vtt");
    }

    #[tokio::test(start_paused = true)]
    async fn not_found_ends_the_sequence_without_retrying() {
        let source = ScriptedSource::new(vec![
            Ok(segment(1, "one")),
            Ok(segment(3, "two")),
            Err(SegmentError::NotFound),
        ]);

        let started = tokio::time::Instant::now();
        let document = assemble_document(&source, "https://host/track-1.vtt", &settings())
            .await
            .unwrap();

        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(
            source.requests(),
            vec![
                "https://host/track-1.vtt",
                "https://host/track-2.vtt",
                "https://host/track-3.vtt",
            ]
        );

        let cues = vtt::parse(&document);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "one");
        assert_eq!(cues[1].text, "two");
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_back_off_then_keep_the_partial_document() {
        let source = ScriptedSource::new(vec![
            Ok(segment(1, "one")),
            Err(SegmentError::Timeout),
            Err(SegmentError::Timeout),
            Err(SegmentError::Timeout),
        ]);

        let started = tokio::time::Instant::now();
        let document = assemble_document(&source, "https://host/track-1.vtt", &settings())
            .await
            .unwrap();

        // Three failed attempts at segment 2, waiting 1s, 2s and 4s.
        assert_eq!(started.elapsed(), Duration::from_secs(7));
        assert_eq!(source.requests().len(), 4);

        let cues = vtt::parse(&document);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "one");
    }

    #[tokio::test(start_paused = true)]
    async fn retry_counter_resets_after_each_successful_segment() {
        let source = ScriptedSource::new(vec![
            Err(SegmentError::Transport("reset".into())),
            Ok(segment(1, "one")),
            Err(SegmentError::Timeout),
            Err(SegmentError::Timeout),
            Ok(segment(3, "two")),
            Err(SegmentError::NotFound),
        ]);

        let started = tokio::time::Instant::now();
        let document = assemble_document(&source, "https://host/track-1.vtt", &settings())
            .await
            .unwrap();

        // 1s for segment 1's single retry, then 1s + 2s for segment 2's two:
        // the counter started over instead of carrying across segments.
        assert_eq!(started.elapsed(), Duration::from_secs(4));
        assert_eq!(vtt::parse(&document).len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_segment_content_is_treated_as_past_the_end() {
        let source = ScriptedSource::new(vec![
            Ok(segment(1, "one")),
            Ok("<html>503 from a misconfigured edge</html>".to_string()),
        ]);

        let started = tokio::time::Instant::now();
        let document = assemble_document(&source, "https://host/track-1.vtt", &settings())
            .await
            .unwrap();

        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(source.requests().len(), 2);
        assert_eq!(vtt::parse(&document).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_retrieved_is_a_track_level_failure() {
        let source = ScriptedSource::new(vec![Err(SegmentError::NotFound)]);
        let result = assemble_document(&source, "https://host/track-1.vtt", &settings()).await;
        assert!(matches!(result, Err(FetchError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn unnumbered_template_fetches_exactly_one_segment() {
        let source = ScriptedSource::new(vec![Ok(segment(1, "only"))]);
        let document = assemble_document(&source, "https://host/track.vtt", &settings())
            .await
            .unwrap();

        assert_eq!(source.requests(), vec!["https://host/track.vtt"]);
        assert_eq!(vtt::parse(&document).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unparseable_document_degrades_to_an_empty_track() {
        let source = ScriptedSource::new(vec![
            // Valid per the well-formedness pass, but the cue is dropped at
            // parse time because its interval is inverted.
            Ok("WEBVTT\n\n00:00:05.000 --> 00:00:01.000\nBackwards\n".to_string()),
            Err(SegmentError::NotFound),
        ]);

        let track = fetch_track(&source, "https://host/track-1.vtt", &settings())
            .await
            .unwrap();
        assert!(track.is_empty());
    }
}
