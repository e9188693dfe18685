//! HTTP client for the remote Citra edge detection service
//!
//! The service exposes `POST {base_url}/edge/{method}` taking a multipart
//! `image` field and answering with a PNG edge map. This crate wraps that
//! route and offers it as an [`citra_image::EdgeDetector`], so callers can
//! swap it for local convolution without touching their pipeline.
//!
//! # Example
//!
//! ```rust,no_run
//! use citra_api_client::{ClientConfig, RemoteEdgeDetector};
//! use citra_image::{codec, EdgeDetector, EdgeMethod, EdgeSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::default().with_base_url("http://localhost:8000");
//!     let detector = RemoteEdgeDetector::from_config(config)?;
//!
//!     let file = std::fs::read("photo.png")?;
//!     let pixels = codec::decode(&file)?;
//!     let source = EdgeSource::new(&pixels).with_encoded(&file);
//!     let edges = detector.detect_edges(source, EdgeMethod::Sobel).await?;
//!     println!("{}x{}", edges.width(), edges.height());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod detector;
pub mod endpoints;
pub mod error;

pub use client::EdgeServiceClient;
pub use config::ClientConfig;
pub use detector::RemoteEdgeDetector;
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::EdgeServiceClient;
    pub use crate::config::ClientConfig;
    pub use crate::detector::RemoteEdgeDetector;
    pub use crate::endpoints::EdgeApi;
    pub use crate::error::{ApiError, ApiResult};
}
