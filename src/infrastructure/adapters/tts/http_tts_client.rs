//! HTTP TTS Client - 调用外部声音克隆推理服务
//!
//! 实现 TtsEnginePort trait，通过 HTTP 调用持有模型的推理服务
//!
//! 推理服务 API:
//! POST {base}/v1/load              {"backbone_repo", "backbone_device", "codec_repo", "codec_device"}
//! POST {base}/v1/reference/encode  multipart: audio (wav), reference_text? → {"codes": [...]}
//! POST {base}/v1/synthesize        {"text", "ref_codes", "ref_text"}       → audio/wav
//! GET  {base}/health

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    DevicePlacement, EncodeReferenceRequest, ModelInfo, SynthesizeRequest, TtsEnginePort,
    TtsError,
};
use crate::domain::synthesis::Waveform;
use crate::domain::voice::VoiceEmbedding;
use crate::infrastructure::adapters::audio::decode_wav;

/// 模型加载请求体
#[derive(Debug, Serialize)]
struct LoadHttpRequest<'a> {
    backbone_repo: &'a str,
    backbone_device: &'a str,
    codec_repo: &'a str,
    codec_device: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoadHttpResponse {
    #[serde(default)]
    sample_rate: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct EncodeHttpResponse {
    codes: Vec<u32>,
}

/// 合成请求体
#[derive(Debug, Serialize)]
struct SynthesizeHttpRequest<'a> {
    text: &'a str,
    ref_codes: &'a [u32],
    ref_text: Option<&'a str>,
}

/// HTTP TTS 客户端配置
#[derive(Debug, Clone)]
pub struct HttpTtsClientConfig {
    /// 推理服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 主干模型仓库
    pub backbone_repo: String,
    /// 编解码器模型仓库
    pub codec_repo: String,
    /// 设备放置
    pub devices: DevicePlacement,
}

impl Default for HttpTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            timeout_secs: 300,
            backbone_repo: "neuphonic/neutts-air".to_string(),
            codec_repo: "neuphonic/neucodec".to_string(),
            devices: DevicePlacement::default(),
        }
    }
}

impl HttpTtsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_devices(mut self, devices: DevicePlacement) -> Self {
        self.devices = devices;
        self
    }
}

/// HTTP TTS 客户端
pub struct HttpTtsClient {
    client: Client,
    config: HttpTtsClientConfig,
}

impl HttpTtsClient {
    pub fn new(config: HttpTtsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

fn map_send_error(e: reqwest::Error) -> TtsError {
    if e.is_timeout() {
        TtsError::Timeout
    } else if e.is_connect() {
        TtsError::NetworkError(format!("Cannot connect to inference service: {}", e))
    } else {
        TtsError::NetworkError(e.to_string())
    }
}

#[async_trait]
impl TtsEnginePort for HttpTtsClient {
    async fn load(&self) -> Result<ModelInfo, TtsError> {
        let body = LoadHttpRequest {
            backbone_repo: &self.config.backbone_repo,
            backbone_device: &self.config.devices.backbone_device,
            codec_repo: &self.config.codec_repo,
            codec_device: &self.config.devices.codec_device,
        };

        tracing::info!(
            url = %self.url("/v1/load"),
            backbone = %self.config.backbone_repo,
            backbone_device = %self.config.devices.backbone_device,
            codec = %self.config.codec_repo,
            codec_device = %self.config.devices.codec_device,
            "Loading voice cloning model"
        );

        let response = self
            .client
            .post(self.url("/v1/load"))
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ModelNotLoaded(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let loaded: LoadHttpResponse = response
            .json()
            .await
            .map_err(|e| TtsError::InvalidResponse(e.to_string()))?;

        Ok(ModelInfo {
            backbone: self.config.backbone_repo.clone(),
            codec: self.config.codec_repo.clone(),
            sample_rate: loaded.sample_rate.unwrap_or(24000),
        })
    }

    async fn encode_reference(
        &self,
        request: EncodeReferenceRequest,
    ) -> Result<VoiceEmbedding, TtsError> {
        let audio = Part::bytes(request.audio_wav)
            .file_name("reference.wav")
            .mime_str("audio/wav")
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;
        let mut form = Form::new().part("audio", audio);
        if let Some(reference_text) = request.reference_text {
            form = form.text("reference_text", reference_text);
        }

        tracing::debug!(
            url = %self.url("/v1/reference/encode"),
            voice_id = %request.voice_id,
            "Sending reference encode request"
        );

        let response = self
            .client
            .post(self.url("/v1/reference/encode"))
            .multipart(form)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = format!("HTTP {}: {}", status, error_text);
            return Err(if status.is_client_error() {
                TtsError::InvalidAudio(message)
            } else {
                TtsError::GenerationError(message)
            });
        }

        let encoded: EncodeHttpResponse = response
            .json()
            .await
            .map_err(|e| TtsError::InvalidResponse(e.to_string()))?;
        if encoded.codes.is_empty() {
            return Err(TtsError::InvalidResponse(
                "inference service returned no reference codes".to_string(),
            ));
        }

        tracing::info!(
            voice_id = %request.voice_id,
            codes = encoded.codes.len(),
            "Reference encoded"
        );

        Ok(VoiceEmbedding::new(encoded.codes))
    }

    async fn synthesize(&self, request: SynthesizeRequest) -> Result<Waveform, TtsError> {
        let body = SynthesizeHttpRequest {
            text: &request.text,
            ref_codes: &request.embedding.codes,
            ref_text: request.reference_text.as_deref(),
        };

        tracing::debug!(
            url = %self.url("/v1/synthesize"),
            voice_id = %request.voice_id,
            text_len = request.text.len(),
            "Sending synthesize request"
        );

        let response = self
            .client
            .post(self.url("/v1/synthesize"))
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::GenerationError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?;

        let waveform = decode_wav(&audio_data)
            .map_err(|e| TtsError::InvalidResponse(format!("Invalid audio payload: {}", e)))?;

        tracing::info!(
            voice_id = %request.voice_id,
            duration_ms = waveform.duration_ms(),
            sample_rate = waveform.sample_rate,
            "Synthesis completed"
        );

        Ok(waveform)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.url("/health"))
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::AudioProcessorPort;
    use crate::infrastructure::adapters::audio::{encode_wav, SymphoniaAudioProcessor};
    use axum::extract::Multipart;
    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};

    async fn encode(mut multipart: Multipart) -> axum::response::Response {
        let mut audio_len = 0;
        let mut has_text = false;
        while let Ok(Some(field)) = multipart.next_field().await {
            match field.name() {
                Some("audio") => audio_len = field.bytes().await.map(|b| b.len()).unwrap_or(0),
                Some("reference_text") => has_text = true,
                _ => {}
            }
        }
        if audio_len < 44 {
            return (StatusCode::UNPROCESSABLE_ENTITY, "bad reference").into_response();
        }
        // 带转写文本时多返回一个码，便于区分
        let codes: Vec<u32> = if has_text { vec![7, 8, 9, 1] } else { vec![7, 8, 9] };
        Json(serde_json::json!({ "codes": codes })).into_response()
    }

    async fn synthesize(Json(body): Json<serde_json::Value>) -> axum::response::Response {
        if body["text"] == "fail" {
            return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
        }
        let sample_rate = if body["text"] == "low rate" { 16000 } else { 24000 };
        let wav = encode_wav(&Waveform::new(vec![0.1; 2400], sample_rate));
        ([(header::CONTENT_TYPE, "audio/wav")], wav).into_response()
    }

    async fn spawn_mock() -> String {
        let app = Router::new()
            .route("/health", get(|| async { "ok" }))
            .route(
                "/v1/load",
                post(|| async { Json(serde_json::json!({ "sample_rate": 24000 })) }),
            )
            .route("/v1/reference/encode", post(encode))
            .route("/v1/synthesize", post(synthesize));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn synth_request(text: &str) -> SynthesizeRequest {
        SynthesizeRequest {
            text: text.to_string(),
            embedding: VoiceEmbedding::new(vec![1, 2, 3]),
            reference_text: Some("hello".to_string()),
            voice_id: "v".to_string(),
        }
    }

    #[test]
    fn test_config_default() {
        let config = HttpTtsClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 300);
        assert_eq!(config.devices.backbone_device, "cpu");
    }

    #[test]
    fn test_url_join_trims_slash() {
        let client = HttpTtsClient::new(HttpTtsClientConfig::new("http://host:9000/")).unwrap();
        assert_eq!(client.url("/health"), "http://host:9000/health");
    }

    #[tokio::test]
    async fn test_round_trip_against_mock_service() {
        let base = spawn_mock().await;
        let client = HttpTtsClient::new(HttpTtsClientConfig::new(base).with_timeout(10)).unwrap();

        assert!(client.health_check().await);
        let info = client.load().await.unwrap();
        assert_eq!(info.sample_rate, 24000);

        let embedding = client
            .encode_reference(EncodeReferenceRequest {
                audio_wav: encode_wav(&Waveform::new(vec![0.2; 24000], 24000)),
                reference_text: None,
                voice_id: "v".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(embedding.codes, vec![7, 8, 9]);

        let waveform = client.synthesize(synth_request("hi")).await.unwrap();
        assert_eq!(waveform.sample_rate, 24000);
        assert_eq!(waveform.samples.len(), 2400);
    }

    #[tokio::test]
    async fn test_reference_text_part_only_sent_when_present() {
        let base = spawn_mock().await;
        let client = HttpTtsClient::new(HttpTtsClientConfig::new(base)).unwrap();
        let request = |reference_text: Option<&str>| EncodeReferenceRequest {
            audio_wav: encode_wav(&Waveform::new(vec![0.2; 24000], 24000)),
            reference_text: reference_text.map(str::to_string),
            voice_id: "v".to_string(),
        };

        let without = client.encode_reference(request(None)).await.unwrap();
        assert_eq!(without.codes, vec![7, 8, 9]);

        let with = client.encode_reference(request(Some("hello"))).await.unwrap();
        assert_eq!(with.codes, vec![7, 8, 9, 1]);
    }

    #[tokio::test]
    async fn test_foreign_sample_rate_is_resampled_for_output() {
        let base = spawn_mock().await;
        let client = HttpTtsClient::new(HttpTtsClientConfig::new(base)).unwrap();

        let waveform = client.synthesize(synth_request("low rate")).await.unwrap();
        assert_eq!(waveform.sample_rate, 16000);

        let output = SymphoniaAudioProcessor::default().to_output_rate(waveform);
        assert_eq!(output.sample_rate, 24000);
        assert_eq!(output.samples.len(), 3600);
    }

    #[tokio::test]
    async fn test_service_errors_are_classified() {
        let base = spawn_mock().await;
        let client = HttpTtsClient::new(HttpTtsClientConfig::new(base)).unwrap();

        let err = client
            .encode_reference(EncodeReferenceRequest {
                audio_wav: vec![0; 4],
                reference_text: None,
                voice_id: "v".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::InvalidAudio(_)));

        let err = client.synthesize(synth_request("fail")).await.unwrap_err();
        assert!(matches!(err, TtsError::GenerationError(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let client =
            HttpTtsClient::new(HttpTtsClientConfig::new("http://127.0.0.1:1").with_timeout(5))
                .unwrap();
        assert!(!client.health_check().await);
        let err = client.synthesize(synth_request("hi")).await.unwrap_err();
        assert!(matches!(err, TtsError::NetworkError(_) | TtsError::Timeout));
    }
}
