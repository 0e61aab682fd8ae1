//! Roadmap narration: a spoken script rendered from milestones, synthesized
//! once, and wrapped into a playable WAV data URI.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use hound::{SampleFormat, WavSpec, WavWriter};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::flows::prompts::interpolate;
use crate::flows::roadmap::Period;
use crate::llm_client::{GenerativeModel, LlmError};

/// The speech model emits 16-bit little-endian mono PCM at this rate.
pub const SAMPLE_RATE: u32 = 24_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narration {
    pub script: String,
    /// `data:audio/wav;base64,...`; absent when the provider produced no audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

/// Renders one `- <Unit> N: Title - task, task` line per milestone into `template`.
pub fn script<M: Period>(template: &str, milestones: &[M]) -> String {
    let lines = milestones
        .iter()
        .map(|m| format!("- {}: {} - {}", m.label(), m.title(), m.tasks().join(", ")))
        .collect::<Vec<_>>()
        .join("\n");
    interpolate(template, &[("milestones", lines.as_str())])
}

/// Issues the single speech-synthesis call for `script`.
pub async fn narrate(model: &dyn GenerativeModel, script: String) -> Result<Narration, LlmError> {
    let audio = match model.synthesize_speech(&script).await? {
        Some(pcm) => {
            let wav = pcm_to_wav(&pcm)?;
            debug!("Narration audio: {} PCM bytes -> {} WAV bytes", pcm.len(), wav.len());
            Some(wav_data_uri(&wav))
        }
        None => {
            warn!("Narration produced no audio; returning script only");
            None
        }
    };
    Ok(Narration { script, audio })
}

/// Wraps raw PCM into a WAV container. A trailing odd byte is dropped.
pub fn pcm_to_wav(pcm: &[u8]) -> Result<Vec<u8>, LlmError> {
    let mut cursor = Cursor::new(Vec::new());
    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::new(&mut cursor, spec).map_err(audio_error)?;
    for frame in pcm.chunks_exact(2) {
        writer
            .write_sample(i16::from_le_bytes([frame[0], frame[1]]))
            .map_err(audio_error)?;
    }
    writer.finalize().map_err(audio_error)?;

    Ok(cursor.into_inner())
}

pub fn wav_data_uri(wav: &[u8]) -> String {
    format!("data:audio/wav;base64,{}", B64.encode(wav))
}

fn audio_error(e: hound::Error) -> LlmError {
    LlmError::Audio(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::roadmap::Milestone;

    #[test]
    fn test_script_lists_milestones_in_order() {
        let milestones = vec![
            Milestone {
                month: 1,
                title: "Basics".to_string(),
                tasks: vec!["Read".to_string(), "Practice".to_string()],
            },
            Milestone {
                month: 2,
                title: "Projects".to_string(),
                tasks: vec!["Build a CLI".to_string()],
            },
        ];
        let text = script("Intro\n{milestones}", &milestones);
        assert_eq!(
            text,
            "Intro\n- Month 1: Basics - Read, Practice\n- Month 2: Projects - Build a CLI"
        );
    }

    #[test]
    fn test_pcm_to_wav_writes_header_and_samples() {
        let pcm = [0x01, 0x00, 0xff, 0x7f, 0x00, 0x80];
        let wav = pcm_to_wav(&pcm).unwrap();
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");

        let mut reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, SAMPLE_RATE);
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.bits_per_sample, 16);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![1, i16::MAX, i16::MIN]);
    }

    #[test]
    fn test_pcm_to_wav_drops_trailing_odd_byte() {
        let wav = pcm_to_wav(&[0x02, 0x00, 0x09]).unwrap();
        let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
        assert_eq!(reader.len(), 1);
    }

    #[test]
    fn test_data_uri_prefix() {
        assert_eq!(wav_data_uri(&[0, 1, 2]), "data:audio/wav;base64,AAEC");
    }
}
