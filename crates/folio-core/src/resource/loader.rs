//! Image resource loading - the single entry point of the subsystem.
//!
//! The loader turns an image reference (external URI or inline embedded
//! data) into a decoded, device-scaled [`ImageResource`], fetching and
//! decoding any given external resource at most once per session via the
//! bounded cache. Failures never propagate: the caller always receives a
//! structurally valid resource, with the image absent when resolution or
//! decoding failed.

use std::io::Read;
use std::sync::Arc;

use url::Url;

use crate::config::Config;
use crate::error::{LoadError, LoadResult};
use crate::types::{ImageResource, RasterImage, RenderContext};

use super::cache::ResourceCache;
use super::decode::ImageDecoder;
use super::embedded::{self, EmbeddedDataDecoder};
use super::provider::{DocumentUriResolver, FileStreamProvider, StreamProvider, UriResolver};

/// Resolves image references to decoded, device-scaled resources.
pub struct ImageResourceLoader {
    resolver: Box<dyn UriResolver>,
    streams: Box<dyn StreamProvider>,
    decoder: ImageDecoder,
    embedded: EmbeddedDataDecoder,
    cache: ResourceCache,
}

impl ImageResourceLoader {
    /// Create a loader with explicit collaborators.
    pub fn new(
        config: &Config,
        resolver: Box<dyn UriResolver>,
        streams: Box<dyn StreamProvider>,
    ) -> Self {
        Self {
            resolver,
            streams,
            decoder: ImageDecoder::new(),
            embedded: EmbeddedDataDecoder::new(),
            cache: ResourceCache::new(config.cache.capacity),
        }
    }

    /// Create a loader serving local files, with no base document URI.
    pub fn with_defaults(config: &Config) -> Self {
        Self::new(
            config,
            Box::new(DocumentUriResolver::new()),
            Box::new(FileStreamProvider::new()),
        )
    }

    /// Resolve a reference to an image resource.
    ///
    /// Embedded data references are decoded fresh on every call and never
    /// cached. External references are resolved to absolute form, served
    /// from the cache when possible, and otherwise fetched, decoded, scaled
    /// by the context's device scale factor, and cached under the absolute
    /// reference. Failed loads are logged, not cached, and reported as a
    /// resource with an absent image.
    pub fn resolve(&self, reference: &str, ctx: &RenderContext) -> ImageResource {
        if embedded::is_embedded_data(reference) {
            return self.embedded.decode(reference, ctx);
        }

        let absolute = self.resolver.resolve(reference);
        if let Some(hit) = self.cache.get(&absolute) {
            tracing::trace!("image cache hit for '{absolute}'");
            return hit;
        }

        match self.load_external(&absolute, ctx) {
            Ok(resource) => {
                self.cache.insert(absolute, resource.clone());
                resource
            }
            Err(err) => {
                log_recovered(&absolute, &err);
                ImageResource::missing(Some(absolute))
            }
        }
    }

    /// Fetch, decode, and scale an external reference.
    ///
    /// The acquired stream is dropped (closed) on every exit path of this
    /// function, including the PDF short-circuit and read failures.
    fn load_external(&self, absolute: &str, ctx: &RenderContext) -> LoadResult<ImageResource> {
        let mut stream = self
            .streams
            .open(absolute)
            .ok_or_else(|| LoadError::Unresolvable {
                reference: absolute.to_string(),
            })?;

        if has_pdf_extension(absolute) {
            return Err(LoadError::PdfUnsupported {
                reference: absolute.to_string(),
            });
        }

        let mut bytes = Vec::new();
        stream
            .read_to_end(&mut bytes)
            .map_err(|source| LoadError::Io {
                reference: absolute.to_string(),
                source,
            })?;
        drop(stream);

        let image = self.decoder.decode(&bytes)?.scaled(ctx.dots_per_pixel());
        Ok(ImageResource::resolved(
            absolute.to_string(),
            Arc::new(image),
        ))
    }

    /// Number of resources currently cached. Diagnostic only.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// Whether the path component of a resolved reference names a PDF document.
/// PDF-as-image embedding is deliberately unimplemented; such references
/// yield an empty resource instead of an error.
fn has_pdf_extension(absolute: &str) -> bool {
    let path = match Url::parse(absolute) {
        Ok(url) => url.path().to_ascii_lowercase(),
        // Plain paths can still carry query/fragment tails
        Err(_) => {
            let raw = absolute.split(['?', '#']).next().unwrap_or(absolute);
            raw.to_ascii_lowercase()
        }
    };
    path.ends_with(".pdf")
}

fn log_recovered(reference: &str, err: &LoadError) {
    match err {
        LoadError::PdfUnsupported { .. } => {
            tracing::debug!("skipping PDF reference '{reference}': embedding as image is not implemented");
        }
        _ => tracing::warn!("image '{reference}' unavailable: {err}"),
    }
}
