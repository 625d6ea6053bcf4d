//! Audio Adapter - 基于 symphonia 的音频解码与 WAV 编码

mod codec;
mod processor;

pub use codec::{decode_audio, decode_wav, encode_wav, DecodedAudio};
pub use processor::{AudioProcessingConfig, SymphoniaAudioProcessor};
