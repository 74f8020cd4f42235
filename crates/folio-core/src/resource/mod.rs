//! Image resource resolution pipeline.
//!
//! This module contains the stages that turn an image reference into a
//! decoded, device-scaled resource:
//! - **decode**: Turn raw bytes into raster images
//! - **embedded**: Detect and decode inline base64 data references
//! - **cache**: Bounded LRU cache of decoded resources
//! - **provider**: URI resolution and byte-stream acquisition seams
//! - **loader**: Orchestrates the full resolution flow

pub mod cache;
pub mod decode;
pub mod embedded;
pub mod loader;
pub mod provider;

// Re-exports for convenient access
pub use cache::ResourceCache;
pub use decode::ImageDecoder;
pub use embedded::{is_embedded_data, EmbeddedDataDecoder};
pub use loader::ImageResourceLoader;
pub use provider::{DocumentUriResolver, FileStreamProvider, StreamProvider, UriResolver};
