use crate::error::AppError;

/// Turns text into an audio clip.
pub trait SpeechSynthesizer: Send + Sync {
    fn content_type(&self) -> &'static str;
    fn synthesize(&self, text: &str) -> Result<Vec<u8>, AppError>;
}

const SAMPLE_RATE: u32 = 8_000;
const BITS_PER_SAMPLE: u16 = 16;
const MS_PER_WORD: u32 = 250;
const MIN_MS: u32 = 500;
/// Longest clip produced, whatever the note length.
const MAX_MS: u32 = 3 * 60 * 1_000;

/// Emits a silent 16-bit mono PCM WAV whose length tracks the word count.
#[derive(Debug, Clone, Default)]
pub struct SilenceSynthesizer;

impl SpeechSynthesizer for SilenceSynthesizer {
    fn content_type(&self) -> &'static str {
        "audio/wav"
    }

    fn synthesize(&self, text: &str) -> Result<Vec<u8>, AppError> {
        let words = u32::try_from(text.split_whitespace().count()).unwrap_or(u32::MAX);
        let millis = words.saturating_mul(MS_PER_WORD).clamp(MIN_MS, MAX_MS);
        let samples = SAMPLE_RATE / 1_000 * millis;
        Ok(silent_wav(samples))
    }
}

fn silent_wav(samples: u32) -> Vec<u8> {
    let block_align = BITS_PER_SAMPLE / 8;
    let data_len = samples * u32::from(block_align);
    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&(SAMPLE_RATE * u32::from(block_align)).to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.resize(44 + data_len as usize, 0);
    out
}
