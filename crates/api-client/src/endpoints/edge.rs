//! Edge detection endpoint

use crate::client::EdgeServiceClient;
use crate::error::{ApiError, ApiResult};
use citra_image::{codec, EdgeMethod, PixelBuffer, SourceFormat};
use reqwest::multipart::{Form, Part};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Multipart field the service reads the upload from
pub const IMAGE_FIELD: &str = "image";

/// Edge detection API interface
#[derive(Clone, Debug)]
pub struct EdgeApi {
    client: EdgeServiceClient,
}

impl EdgeApi {
    /// Create a new edge API interface
    pub(crate) fn new(client: EdgeServiceClient) -> Self {
        Self { client }
    }

    /// Route for a method, relative to the base URL
    #[must_use]
    pub fn path(method: EdgeMethod) -> String {
        format!("edge/{method}")
    }

    /// Upload an encoded image and decode the edge map the service returns
    #[instrument(skip(self, image), fields(bytes = image.len()))]
    pub async fn detect(&self, image: Vec<u8>, method: EdgeMethod) -> ApiResult<PixelBuffer> {
        let (file_name, mime) = match SourceFormat::sniff(&image) {
            Some(format) => (format!("image.{}", format.extension()), format.mime_type()),
            None => ("image".to_string(), "application/octet-stream"),
        };

        let part = Part::bytes(image)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|source| ApiError::Transport { method, source })?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let (request, request_id) = self.client.post(&Self::path(method));
        debug!(request_id = %request_id, method = %method, "Sending edge detection request");

        let start = Instant::now();
        let response = request
            .multipart(form)
            .send()
            .await
            .map_err(|source| ApiError::Transport { method, source })?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(
                request_id = %request_id,
                method = %method,
                status = status.as_u16(),
                "Edge detection request failed"
            );
            return Err(ApiError::edge_request(method, status.as_u16(), message));
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport { method, source })?;
        info!(
            request_id = %request_id,
            method = %method,
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Edge detection response received"
        );

        Ok(codec::decode(&body)?)
    }

    /// Encode `pixels` as PNG and upload them
    pub async fn detect_buffer(
        &self,
        pixels: &PixelBuffer,
        method: EdgeMethod,
    ) -> ApiResult<PixelBuffer> {
        let png = codec::encode_png(pixels)?;
        self.detect(png, method).await
    }
}
