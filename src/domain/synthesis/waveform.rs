//! 单声道 PCM 波形

use super::SynthesisError;

/// 单声道 f32 波形，样本范围 [-1.0, 1.0]
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 时长（毫秒）
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (self.samples.len() as u64 * 1000) / self.sample_rate as u64
    }

    /// 峰值幅度
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0_f32, |acc, s| acc.max(s.abs()))
    }

    /// 按顺序拼接多段波形，所有片段采样率必须一致
    pub fn concat(segments: Vec<Waveform>) -> Result<Waveform, SynthesisError> {
        let mut iter = segments.into_iter();
        let Some(mut joined) = iter.next() else {
            return Ok(Waveform::new(Vec::new(), 0));
        };

        for segment in iter {
            if segment.sample_rate != joined.sample_rate {
                return Err(SynthesisError::SampleRateMismatch {
                    expected: joined.sample_rate,
                    actual: segment.sample_rate,
                });
            }
            joined.samples.extend(segment.samples);
        }

        Ok(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_ms() {
        let w = Waveform::new(vec![0.0; 24000], 24000);
        assert_eq!(w.duration_ms(), 1000);
        assert_eq!(Waveform::new(vec![0.0; 10], 0).duration_ms(), 0);
    }

    #[test]
    fn test_concat_preserves_order() {
        let a = Waveform::new(vec![0.1, 0.2], 24000);
        let b = Waveform::new(vec![0.3], 24000);
        let joined = Waveform::concat(vec![a, b]).unwrap();
        assert_eq!(joined.samples, vec![0.1, 0.2, 0.3]);
        assert_eq!(joined.sample_rate, 24000);
    }

    #[test]
    fn test_concat_rejects_mixed_rates() {
        let a = Waveform::new(vec![0.1], 24000);
        let b = Waveform::new(vec![0.3], 16000);
        assert!(matches!(
            Waveform::concat(vec![a, b]),
            Err(SynthesisError::SampleRateMismatch { expected: 24000, actual: 16000 })
        ));
    }

    #[test]
    fn test_peak() {
        let w = Waveform::new(vec![0.1, -0.7, 0.5], 24000);
        assert!((w.peak() - 0.7).abs() < f32::EPSILON);
    }
}
