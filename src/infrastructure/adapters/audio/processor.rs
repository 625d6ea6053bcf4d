//! Symphonia Audio Processor
//!
//! 参考音频预处理：解码 → 单声道 → 重采样到模型采样率 → 时长校验 → 峰值归一化 → WAV

use crate::application::ports::{AudioError, AudioProcessorPort, PreparedReference};
use crate::domain::synthesis::Waveform;
use crate::domain::voice::AudioFormat;

use super::codec::{decode_audio, encode_wav, resample};

/// 音频处理配置
#[derive(Debug, Clone)]
pub struct AudioProcessingConfig {
    /// 模型采样率
    pub target_sample_rate: u32,
    /// 参考音频最短时长（秒）
    pub min_reference_secs: f64,
    /// 参考音频最长时长（秒）
    pub max_reference_secs: f64,
}

impl Default for AudioProcessingConfig {
    fn default() -> Self {
        Self {
            target_sample_rate: 24000,
            min_reference_secs: 1.0,
            max_reference_secs: 60.0,
        }
    }
}

/// 基于 symphonia 的音频处理器
pub struct SymphoniaAudioProcessor {
    config: AudioProcessingConfig,
}

impl SymphoniaAudioProcessor {
    pub fn new(config: AudioProcessingConfig) -> Self {
        Self { config }
    }

    fn check_duration(&self, waveform: &Waveform) -> Result<(), AudioError> {
        let secs = waveform.samples.len() as f64 / waveform.sample_rate as f64;
        if secs < self.config.min_reference_secs {
            return Err(AudioError::InvalidAudio(format!(
                "reference audio is {:.2}s, at least {:.1}s required",
                secs, self.config.min_reference_secs
            )));
        }
        if secs > self.config.max_reference_secs {
            return Err(AudioError::InvalidAudio(format!(
                "reference audio is {:.2}s, at most {:.1}s allowed",
                secs, self.config.max_reference_secs
            )));
        }
        Ok(())
    }
}

impl Default for SymphoniaAudioProcessor {
    fn default() -> Self {
        Self::new(AudioProcessingConfig::default())
    }
}

impl AudioProcessorPort for SymphoniaAudioProcessor {
    fn prepare_reference(
        &self,
        data: &[u8],
        format: AudioFormat,
    ) -> Result<PreparedReference, AudioError> {
        let decoded = decode_audio(data, Some(format.extension()))?;
        let source_sample_rate = decoded.sample_rate;
        let source_channels = decoded.channels;

        let mono = decoded.into_mono();
        if mono.is_empty() {
            return Err(AudioError::InvalidAudio(
                "reference audio contains no samples".to_string(),
            ));
        }

        let target_rate = self.config.target_sample_rate;
        let mut waveform = Waveform::new(
            resample(&mono.samples, mono.sample_rate, target_rate),
            target_rate,
        );
        self.check_duration(&waveform)?;

        let peak = waveform.peak();
        if peak <= f32::EPSILON {
            return Err(AudioError::InvalidAudio(
                "reference audio is silent".to_string(),
            ));
        }
        for s in waveform.samples.iter_mut() {
            *s /= peak;
        }

        let duration_ms = waveform.duration_ms();
        let wav_data = encode_wav(&waveform);

        tracing::debug!(
            source_sample_rate,
            source_channels,
            duration_ms,
            size = wav_data.len(),
            "Reference audio normalized"
        );

        Ok(PreparedReference {
            wav_data,
            sample_rate: target_rate,
            duration_ms,
            source_sample_rate,
            source_channels,
        })
    }

    fn to_output_rate(&self, waveform: Waveform) -> Waveform {
        let target_rate = self.config.target_sample_rate;
        if waveform.sample_rate == target_rate || waveform.sample_rate == 0 {
            return waveform;
        }
        tracing::debug!(
            from = waveform.sample_rate,
            to = target_rate,
            "Resampling model output"
        );
        Waveform::new(
            resample(&waveform.samples, waveform.sample_rate, target_rate),
            target_rate,
        )
    }

    fn encode_wav(&self, waveform: &Waveform) -> Result<Vec<u8>, AudioError> {
        if waveform.sample_rate == 0 {
            return Err(AudioError::EncodingError(
                "waveform has no sample rate".to_string(),
            ));
        }
        Ok(encode_wav(waveform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::audio::codec::decode_wav;

    fn stereo_wav(sample_rate: u32, seconds: f32, amplitude: f32) -> Vec<u8> {
        // 手工构造双声道 16-bit WAV
        let frames = (sample_rate as f32 * seconds) as usize;
        let data_size = frames * 4;
        let mut wav = Vec::with_capacity(44 + data_size);
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&((36 + data_size) as u32).to_le_bytes());
        wav.extend_from_slice(b"WAVE");
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes());
        wav.extend_from_slice(&2u16.to_le_bytes());
        wav.extend_from_slice(&sample_rate.to_le_bytes());
        wav.extend_from_slice(&(sample_rate * 4).to_le_bytes());
        wav.extend_from_slice(&4u16.to_le_bytes());
        wav.extend_from_slice(&16u16.to_le_bytes());
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&(data_size as u32).to_le_bytes());
        for i in 0..frames {
            let v = amplitude
                * (2.0 * std::f32::consts::PI * 200.0 * i as f32 / sample_rate as f32).sin();
            let s = (v * 32767.0) as i16;
            wav.extend_from_slice(&s.to_le_bytes());
            wav.extend_from_slice(&s.to_le_bytes());
        }
        wav
    }

    #[test]
    fn test_prepare_reference_resamples_to_mono_24k() {
        let processor = SymphoniaAudioProcessor::default();
        let prepared = processor
            .prepare_reference(&stereo_wav(44100, 2.0, 0.25), AudioFormat::Wav)
            .unwrap();

        assert_eq!(prepared.source_sample_rate, 44100);
        assert_eq!(prepared.source_channels, 2);
        assert_eq!(prepared.sample_rate, 24000);
        assert!((1990..=2010).contains(&prepared.duration_ms));

        let decoded = decode_wav(&prepared.wav_data).unwrap();
        assert_eq!(decoded.sample_rate, 24000);
        // 峰值归一化到接近 1.0
        assert!(decoded.peak() > 0.95);
    }

    #[test]
    fn test_prepare_reference_rejects_short_audio() {
        let processor = SymphoniaAudioProcessor::default();
        let err = processor
            .prepare_reference(&stereo_wav(16000, 0.3, 0.5), AudioFormat::Wav)
            .unwrap_err();
        assert!(matches!(err, AudioError::InvalidAudio(_)));
    }

    #[test]
    fn test_prepare_reference_rejects_long_audio() {
        let processor = SymphoniaAudioProcessor::new(AudioProcessingConfig {
            max_reference_secs: 1.5,
            ..Default::default()
        });
        let err = processor
            .prepare_reference(&stereo_wav(16000, 2.0, 0.5), AudioFormat::Wav)
            .unwrap_err();
        assert!(matches!(err, AudioError::InvalidAudio(_)));
    }

    #[test]
    fn test_prepare_reference_rejects_silence() {
        let processor = SymphoniaAudioProcessor::default();
        let err = processor
            .prepare_reference(&stereo_wav(16000, 2.0, 0.0), AudioFormat::Wav)
            .unwrap_err();
        assert!(matches!(err, AudioError::InvalidAudio(_)));
    }

    #[test]
    fn test_to_output_rate_resamples_foreign_rates() {
        let processor = SymphoniaAudioProcessor::default();

        let converted = processor.to_output_rate(Waveform::new(vec![0.1; 16000], 16000));
        assert_eq!(converted.sample_rate, 24000);
        assert_eq!(converted.samples.len(), 24000);

        let untouched = processor.to_output_rate(Waveform::new(vec![0.1; 240], 24000));
        assert_eq!(untouched.samples.len(), 240);
    }

    #[test]
    fn test_encode_wav_requires_sample_rate() {
        let processor = SymphoniaAudioProcessor::default();
        assert!(processor.encode_wav(&Waveform::new(vec![0.0], 0)).is_err());
        assert!(processor.encode_wav(&Waveform::new(vec![0.0], 24000)).is_ok());
    }
}
