//! [`EdgeDetector`] backed by the remote service

use crate::client::EdgeServiceClient;
use crate::config::ClientConfig;
use crate::endpoints::EdgeApi;
use crate::error::{ApiError, ApiResult};
use citra_image::{EdgeDetector, EdgeMethod, EdgeSource, PixelBuffer};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Edge detection delegated to the HTTP service
///
/// Requests are serialized: a call made while another is outstanding waits
/// for it to finish before sending its own upload. Clones share that queue.
#[derive(Clone, Debug)]
pub struct RemoteEdgeDetector {
    api: EdgeApi,
    in_flight: Arc<Mutex<()>>,
}

impl RemoteEdgeDetector {
    /// Wrap an existing client
    #[must_use]
    pub fn new(client: EdgeServiceClient) -> Self {
        Self {
            api: client.edges(),
            in_flight: Arc::new(Mutex::new(())),
        }
    }

    /// Build a client from `config` and wrap it
    pub fn from_config(config: ClientConfig) -> ApiResult<Self> {
        Ok(Self::new(EdgeServiceClient::with_config(config)?))
    }
}

impl EdgeDetector for RemoteEdgeDetector {
    type Error = ApiError;

    fn detect_edges(
        &self,
        source: EdgeSource<'_>,
        method: EdgeMethod,
    ) -> impl Future<Output = Result<PixelBuffer, Self::Error>> + Send {
        async move {
            let _turn = self.in_flight.lock().await;
            match source.encoded() {
                Some(encoded) => self.api.detect(encoded.to_vec(), method).await,
                None => {
                    debug!(method = %method, "No encoded source, uploading PNG of the buffer");
                    self.api.detect_buffer(source.pixels(), method).await
                }
            }
        }
    }
}
