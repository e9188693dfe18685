//! Endpoint-specific API implementations
//!
//! | Module | Service route | Description |
//! |--------|---------------|-------------|
//! | `edge` | `POST /edge/{method}` | Edge detection on an uploaded image |

pub mod edge;

pub use edge::EdgeApi;
