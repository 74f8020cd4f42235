//! Inline base64-embedded image references.
//!
//! References of the form `data:<media-type>;base64,<payload>` carry their
//! image bytes inline. They bypass URI resolution and the resource cache
//! entirely and are decoded fresh on every request.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{LoadError, LoadResult};
use crate::types::{ImageResource, RasterImage, RenderContext};

use super::decode::ImageDecoder;

const EMBEDDED_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64";

/// Whether a reference is an inline embedded image rather than a URI.
pub fn is_embedded_data(reference: &str) -> bool {
    reference.starts_with(EMBEDDED_PREFIX)
}

/// Decodes embedded data references into image resources.
#[derive(Debug, Default)]
pub struct EmbeddedDataDecoder {
    decoder: ImageDecoder,
}

impl EmbeddedDataDecoder {
    pub fn new() -> Self {
        Self {
            decoder: ImageDecoder::new(),
        }
    }

    /// Decode an embedded reference, scaling to the context's device
    /// resolution.
    ///
    /// Embedded images have no externally addressable location, so the
    /// returned resource carries no source reference. Failures are logged
    /// and yield a resource with both fields absent.
    pub fn decode(&self, reference: &str, ctx: &RenderContext) -> ImageResource {
        match self.try_decode(reference, ctx) {
            Ok(image) => ImageResource {
                source: None,
                image: Some(Arc::new(image)),
            },
            Err(err) => {
                tracing::warn!(
                    "cannot decode embedded image '{}': {err}",
                    reference_for_log(reference)
                );
                ImageResource::default()
            }
        }
    }

    fn try_decode(&self, reference: &str, ctx: &RenderContext) -> LoadResult<RasterImage> {
        let (media_type, payload) = split_embedded(reference)?;
        let bytes = BASE64
            .decode(payload)
            .map_err(|e| LoadError::EmbeddedData {
                message: format!("invalid base64 payload: {e}"),
            })?;
        let image = self.decoder.decode(&bytes)?.with_media_type(media_type);
        Ok(image.scaled(ctx.dots_per_pixel()))
    }
}

/// Split `data:<media-type>;base64,<payload>` into its media type and raw
/// payload.
fn split_embedded(reference: &str) -> LoadResult<(&str, &str)> {
    let rest = reference
        .strip_prefix("data:")
        .ok_or_else(|| LoadError::EmbeddedData {
            message: "missing 'data:' prefix".to_string(),
        })?;
    let (metadata, payload) = rest.split_once(',').ok_or_else(|| LoadError::EmbeddedData {
        message: "missing ',' separator before payload".to_string(),
    })?;
    let media_type = metadata
        .strip_suffix(BASE64_MARKER)
        .ok_or_else(|| LoadError::EmbeddedData {
            message: "payload is not marked base64".to_string(),
        })?;
    Ok((media_type, payload))
}

/// Embedded references can be hundreds of kilobytes; log a readable prefix.
fn reference_for_log(reference: &str) -> &str {
    match reference.char_indices().nth(64) {
        Some((idx, _)) => &reference[..idx],
        None => reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;

    fn embedded_png(width: u32, height: u32) -> String {
        let img = DynamicImage::new_rgb8(width, height);
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        format!(
            "data:image/png;base64,{}",
            BASE64.encode(buffer.into_inner())
        )
    }

    #[test]
    fn test_detection() {
        assert!(is_embedded_data("data:image/png;base64,AAAA"));
        assert!(!is_embedded_data("https://example.com/a.png"));
        assert!(!is_embedded_data("data:text/plain;base64,AAAA"));
        assert!(!is_embedded_data("images/photo.png"));
    }

    #[test]
    fn test_decode_valid_reference() {
        let decoder = EmbeddedDataDecoder::new();
        let resource = decoder.decode(&embedded_png(6, 4), &RenderContext::default());
        assert!(resource.source.is_none());
        let image = resource.image.expect("image should decode");
        assert_eq!((image.width(), image.height()), (6, 4));
        assert_eq!(image.media_type(), Some("image/png"));
    }

    #[test]
    fn test_decode_applies_device_scale() {
        let decoder = EmbeddedDataDecoder::new();
        let resource = decoder.decode(&embedded_png(6, 4), &RenderContext::new(2.0));
        assert_eq!(resource.dimensions(), Some((12, 8)));
    }

    #[test]
    fn test_malformed_base64_yields_empty_resource() {
        let decoder = EmbeddedDataDecoder::new();
        let resource = decoder.decode(
            "data:image/png;base64,@@not-base64@@",
            &RenderContext::default(),
        );
        assert!(resource.source.is_none());
        assert!(resource.image.is_none());
    }

    #[test]
    fn test_missing_base64_marker_yields_empty_resource() {
        let decoder = EmbeddedDataDecoder::new();
        let resource = decoder.decode("data:image/png,rawbytes", &RenderContext::default());
        assert!(resource.image.is_none());
    }

    #[test]
    fn test_valid_base64_of_garbage_yields_empty_resource() {
        let decoder = EmbeddedDataDecoder::new();
        let reference = format!("data:image/png;base64,{}", BASE64.encode(b"not an image"));
        let resource = decoder.decode(&reference, &RenderContext::default());
        assert!(resource.image.is_none());
    }

    #[test]
    fn test_split_embedded_extracts_media_type() {
        let (media_type, payload) = split_embedded("data:image/gif;base64,R0lGOD").unwrap();
        assert_eq!(media_type, "image/gif");
        assert_eq!(payload, "R0lGOD");
    }
}
