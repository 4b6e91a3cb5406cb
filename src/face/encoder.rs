//! Client side of the face-encoding service.
//!
//! Detection and descriptor extraction run in an external service; this
//! module only ships the captured image there and validates what comes back.

use async_trait::async_trait;
use derive_more::Display;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::descriptor::{Descriptor, DescriptorError};
use super::image::CapturedImage;

#[derive(Debug, Display)]
pub enum EncoderError {
    #[display(fmt = "face service request failed: {}", _0)]
    Request(reqwest::Error),
    #[display(fmt = "face service returned {}: {}", status, body)]
    Status { status: u16, body: String },
    #[display(fmt = "face service returned a bad descriptor: {}", _0)]
    BadDescriptor(DescriptorError),
}

impl std::error::Error for EncoderError {}

/// Finds every face in an image and returns one descriptor per face, in the
/// order the detector reports them.
#[async_trait]
pub trait FaceEncoder: Send + Sync {
    async fn encode(&self, image: &CapturedImage) -> Result<Vec<Descriptor>, EncoderError>;
}

/// Descriptor of the first detected face, or `None` when no face is found.
pub async fn extract_descriptor(
    encoder: &dyn FaceEncoder,
    image: &CapturedImage,
) -> Result<Option<Descriptor>, EncoderError> {
    let faces = encoder.encode(image).await?;

    tracing::debug!(
        width = image.width,
        height = image.height,
        faces = faces.len(),
        "Frame encoded"
    );
    if faces.len() > 1 {
        tracing::debug!(faces = faces.len(), "multiple faces in frame, using the first");
    }

    Ok(faces.into_iter().next())
}

#[derive(Deserialize)]
struct EncodingsResponse {
    encodings: Vec<Vec<f64>>,
}

/// `FaceEncoder` backed by an HTTP face-encoding service.
///
/// `POST {base_url}/encodings` with the raw image body; the service answers
/// `{"encodings": [[f64; 128], ...]}`.
#[derive(Clone)]
pub struct RemoteFaceEncoder {
    client: Client,
    endpoint: String,
}

impl RemoteFaceEncoder {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, EncoderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(EncoderError::Request)?;

        Ok(Self {
            client,
            endpoint: format!("{}/encodings", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl FaceEncoder for RemoteFaceEncoder {
    async fn encode(&self, image: &CapturedImage) -> Result<Vec<Descriptor>, EncoderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, image.mime_type())
            .body(image.bytes.clone())
            .send()
            .await
            .map_err(EncoderError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EncoderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: EncodingsResponse = response.json().await.map_err(EncoderError::Request)?;

        parsed
            .encodings
            .into_iter()
            .map(|values| Descriptor::new(values).map_err(EncoderError::BadDescriptor))
            .collect()
    }
}
