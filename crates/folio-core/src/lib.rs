//! Folio Core - Image-resource resolution and caching for document
//! rendering.
//!
//! During layout, every image reference in a document (external URI or
//! inline base64 data) must become a decoded, device-resolution-scaled
//! image, with any given external resource fetched and decoded at most once
//! per rendering session.
//!
//! # Architecture
//!
//! ```text
//! Reference → Embedded? → decode fresh (never cached)
//!           → Resolve URI → Cache probe → hit: stored resource
//!                                       → miss: fetch → decode → scale → cache
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use folio_core::{Config, ImageResourceLoader, RenderContext};
//!
//! let config = Config::default();
//! let loader = ImageResourceLoader::with_defaults(&config);
//! let resource = loader.resolve("figures/plot.png", &RenderContext::new(2.0));
//! if let Some((w, h)) = resource.dimensions() {
//!     println!("intrinsic size: {w}x{h}");
//! }
//! ```
//!
//! Failures are never fatal: an unreachable or undecodable reference yields
//! a resource with an absent image, which the layout engine treats as "no
//! intrinsic size available".

// Module declarations
pub mod config;
pub mod error;
pub mod resource;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, FolioError, LoadError, LoadResult, Result};
pub use resource::{
    DocumentUriResolver, FileStreamProvider, ImageDecoder, ImageResourceLoader, ResourceCache,
    StreamProvider, UriResolver,
};
pub use types::{ImageResource, RasterImage, RenderContext};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_default_loader_resolves_local_file() {
        use image::{DynamicImage, ImageFormat};
        use std::io::Cursor;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        let img = DynamicImage::new_rgb8(5, 7);
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        std::fs::write(&path, buffer.into_inner()).unwrap();

        let loader = ImageResourceLoader::with_defaults(&Config::default());
        let resource = loader.resolve(path.to_str().unwrap(), &RenderContext::new(2.0));
        assert_eq!(resource.dimensions(), Some((10, 14)));
    }
}
