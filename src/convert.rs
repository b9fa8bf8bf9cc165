// Transcript-to-subtitle conversion boundary.
//
// The workflow treats conversion as an opaque pure function; any failure is
// wrapped as `SubliftError::Conversion`. `WebVttConverter` is the reference
// implementation for the Amazon Transcribe output format.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SubliftError};

/// Raw structured output of a completed transcription job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptDocument {
    #[serde(rename = "jobName", default)]
    pub job_name: String,
    pub results: TranscriptResults,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptResults {
    #[serde(default)]
    pub transcripts: Vec<Transcript>,
    #[serde(default)]
    pub items: Vec<TranscriptItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub transcript: String,
}

/// One recognized token. Pronunciation items carry timings; punctuation
/// items carry none and attach to the preceding word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub alternatives: Vec<ItemAlternative>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemAlternative {
    #[serde(default)]
    pub confidence: Option<String>,
    pub content: String,
}

/// Converts a transcript document into subtitle text.
#[cfg_attr(test, mockall::automock)]
pub trait SubtitleConverter: Send + Sync {
    fn convert(&self, document: &TranscriptDocument) -> Result<String>;
}

/// Cue sizing limits for the WebVTT renderer
const MAX_CUE_CHARS: usize = 64;
const MAX_CUE_GAP_SECS: f64 = 1.5;

pub struct WebVttConverter;

struct Cue {
    start: f64,
    end: f64,
    text: String,
}

impl SubtitleConverter for WebVttConverter {
    fn convert(&self, document: &TranscriptDocument) -> Result<String> {
        let cues = build_cues(&document.results.items)?;

        let mut vtt = String::from("WEBVTT\n");
        for cue in cues {
            vtt.push_str(&format!(
                "\n{} --> {}\n{}\n",
                format_vtt_time(cue.start),
                format_vtt_time(cue.end),
                cue.text
            ));
        }

        Ok(vtt)
    }
}

fn build_cues(items: &[TranscriptItem]) -> Result<Vec<Cue>> {
    let mut cues: Vec<Cue> = Vec::new();
    let mut current: Option<Cue> = None;

    for item in items {
        let content = match item.alternatives.first() {
            Some(alternative) => alternative.content.as_str(),
            None => continue,
        };

        match item.kind.as_str() {
            "pronunciation" => {
                let start = parse_seconds(item.start_time.as_deref(), content)?;
                let end = parse_seconds(item.end_time.as_deref(), content)?;

                match current.as_mut() {
                    Some(cue)
                        if cue.text.len() < MAX_CUE_CHARS
                            && start - cue.end <= MAX_CUE_GAP_SECS =>
                    {
                        cue.text.push(' ');
                        cue.text.push_str(content);
                        cue.end = end;
                    }
                    _ => {
                        if let Some(finished) = current.take() {
                            cues.push(finished);
                        }
                        current = Some(Cue {
                            start,
                            end,
                            text: content.to_string(),
                        });
                    }
                }
            }
            "punctuation" => {
                if let Some(mut cue) = current.take() {
                    cue.text.push_str(content);
                    if matches!(content, "." | "?" | "!") {
                        cues.push(cue);
                    } else {
                        current = Some(cue);
                    }
                }
            }
            _ => {}
        }
    }

    if let Some(cue) = current {
        cues.push(cue);
    }

    Ok(cues)
}

fn parse_seconds(value: Option<&str>, content: &str) -> Result<f64> {
    value
        .and_then(|v| v.parse::<f64>().ok())
        .ok_or_else(|| {
            SubliftError::Conversion(format!("item '{}' has no usable timing", content))
        })
}

/// Format time in seconds to WebVTT time format (HH:MM:SS.mmm)
fn format_vtt_time(seconds: f64) -> String {
    let total_milliseconds = (seconds * 1000.0) as u64;
    let hours = total_milliseconds / 3_600_000;
    let minutes = (total_milliseconds % 3_600_000) / 60_000;
    let secs = (total_milliseconds % 60_000) / 1_000;
    let millis = total_milliseconds % 1_000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pronunciation(content: &str, start: &str, end: &str) -> TranscriptItem {
        TranscriptItem {
            kind: "pronunciation".to_string(),
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            alternatives: vec![ItemAlternative {
                confidence: Some("0.99".to_string()),
                content: content.to_string(),
            }],
        }
    }

    fn punctuation(content: &str) -> TranscriptItem {
        TranscriptItem {
            kind: "punctuation".to_string(),
            start_time: None,
            end_time: None,
            alternatives: vec![ItemAlternative {
                confidence: None,
                content: content.to_string(),
            }],
        }
    }

    fn document(items: Vec<TranscriptItem>) -> TranscriptDocument {
        TranscriptDocument {
            job_name: "transcription-job-test".to_string(),
            results: TranscriptResults {
                transcripts: vec![Transcript {
                    transcript: "Hello world.".to_string(),
                }],
                items,
            },
        }
    }

    #[test]
    fn test_format_vtt_time() {
        assert_eq!(format_vtt_time(0.0), "00:00:00.000");
        assert_eq!(format_vtt_time(65.123), "00:01:05.123");
        assert_eq!(format_vtt_time(3661.500), "01:01:01.500");
    }

    #[test]
    fn test_convert_renders_cue_with_attached_punctuation() {
        let doc = document(vec![
            pronunciation("Hello", "0.0", "0.4"),
            pronunciation("world", "0.5", "0.9"),
            punctuation("."),
        ]);

        let vtt = WebVttConverter.convert(&doc).unwrap();
        assert!(vtt.starts_with("WEBVTT\n"));
        assert!(vtt.contains("00:00:00.000 --> 00:00:00.900\nHello world.\n"));
    }

    #[test]
    fn test_convert_splits_cue_on_long_silence() {
        let doc = document(vec![
            pronunciation("First", "0.0", "0.4"),
            pronunciation("Second", "5.0", "5.4"),
        ]);

        let vtt = WebVttConverter.convert(&doc).unwrap();
        assert!(vtt.contains("00:00:00.000 --> 00:00:00.400\nFirst\n"));
        assert!(vtt.contains("00:00:05.000 --> 00:00:05.400\nSecond\n"));
    }

    #[test]
    fn test_convert_empty_document_yields_header_only() {
        let doc = document(vec![]);
        assert_eq!(WebVttConverter.convert(&doc).unwrap(), "WEBVTT\n");
    }

    #[test]
    fn test_convert_fails_on_missing_timings() {
        let doc = document(vec![TranscriptItem {
            kind: "pronunciation".to_string(),
            start_time: None,
            end_time: None,
            alternatives: vec![ItemAlternative {
                confidence: None,
                content: "Hello".to_string(),
            }],
        }]);

        let result = WebVttConverter.convert(&doc);
        assert!(matches!(result, Err(SubliftError::Conversion(_))));
    }

    #[test]
    fn test_transcript_document_parses_provider_json() {
        let json = r#"{
            "jobName": "transcription-job-abc",
            "accountId": "123456789012",
            "status": "COMPLETED",
            "results": {
                "transcripts": [{"transcript": "Hello world."}],
                "items": [
                    {
                        "type": "pronunciation",
                        "start_time": "0.0",
                        "end_time": "0.4",
                        "alternatives": [{"confidence": "0.99", "content": "Hello"}]
                    },
                    {
                        "type": "punctuation",
                        "alternatives": [{"confidence": "0.0", "content": "."}]
                    }
                ]
            }
        }"#;

        let doc: TranscriptDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.job_name, "transcription-job-abc");
        assert_eq!(doc.results.transcripts[0].transcript, "Hello world.");
        assert_eq!(doc.results.items.len(), 2);
        assert_eq!(doc.results.items[0].alternatives[0].content, "Hello");
    }
}
