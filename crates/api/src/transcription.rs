// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Speech-to-text for the incident narration.

use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// A transcription that could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptionError {
    /// No audio was supplied.
    #[error("no audio was supplied")]
    EmptyAudio,
    /// No transcription service is configured.
    #[error("transcription is not configured")]
    NotConfigured,
    /// The request did not reach the service.
    #[error("transcription request failed: {0}")]
    Transport(String),
    /// The service answered with an unexpected status.
    #[error("transcription service returned HTTP {0}")]
    Status(u16),
    /// The response could not be decoded.
    #[error("transcription response could not be decoded: {0}")]
    Decode(String),
}

/// Turns recorded audio into text.
pub trait Transcriber: Send + Sync + 'static {
    /// Transcribes `audio`, whose media type is `mime_type`.
    fn transcribe(
        &self,
        audio: Vec<u8>,
        mime_type: &str,
    ) -> impl Future<Output = Result<String, TranscriptionError>> + Send;
}

#[derive(Debug, Deserialize)]
struct TranscriptionPayload {
    text: String,
}

/// Posts the raw audio to `{url}` and expects `{ "text": "..." }` back.
#[derive(Debug, Clone)]
pub struct HttpTranscriber {
    client: reqwest::Client,
    url: String,
}

impl HttpTranscriber {
    /// Creates a transcriber against `url`.
    ///
    /// # Errors
    ///
    /// Returns `TranscriptionError::Transport` if the HTTP client cannot be
    /// built.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, TranscriptionError> {
        let client: reqwest::Client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TranscriptionError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, audio: Vec<u8>, mime_type: &str) -> Result<String, TranscriptionError> {
        if audio.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }
        debug!(url = %self.url, bytes = audio.len(), "Requesting transcription");
        let response: reqwest::Response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, mime_type)
            .body(audio)
            .send()
            .await
            .map_err(|err| TranscriptionError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(TranscriptionError::Status(response.status().as_u16()));
        }
        let payload: TranscriptionPayload = response
            .json()
            .await
            .map_err(|err| TranscriptionError::Decode(err.to_string()))?;
        Ok(payload.text)
    }
}

/// Appends `transcription` to the existing narration, on a new line when the
/// narration already has text.
#[must_use]
pub fn append_transcription(current: &str, transcription: &str) -> String {
    let separator: &str = if current.trim().is_empty() { "" } else { "\n" };
    format!("{current}{separator}{transcription}")
}
