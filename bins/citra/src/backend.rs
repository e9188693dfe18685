//! Edge detector selection.

use anyhow::Result;
use citra_api_client::{ClientConfig, RemoteEdgeDetector};
use citra_image::{EdgeDetector, EdgeMethod, EdgeSource, LocalEdgeDetector, PixelBuffer};
use serde::{Deserialize, Serialize};

/// Where edge detection runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process convolution
    #[default]
    Local,
    /// The HTTP edge service
    Remote,
}

/// The configured detector.
#[derive(Debug)]
pub enum EdgeBackend {
    Local(LocalEdgeDetector),
    Remote(RemoteEdgeDetector),
}

impl EdgeBackend {
    /// Build the detector for `kind`. The client config is only used for `Remote`.
    pub fn new(kind: BackendKind, client: ClientConfig) -> Result<Self> {
        Ok(match kind {
            BackendKind::Local => Self::Local(LocalEdgeDetector),
            BackendKind::Remote => Self::Remote(RemoteEdgeDetector::from_config(client)?),
        })
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    pub async fn detect(&self, source: EdgeSource<'_>, method: EdgeMethod) -> Result<PixelBuffer> {
        Ok(match self {
            Self::Local(detector) => detector.detect_edges(source, method).await?,
            Self::Remote(detector) => detector.detect_edges(source, method).await?,
        })
    }
}
