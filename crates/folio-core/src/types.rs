//! Core types shared across the resource subsystem.

use std::sync::Arc;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// The result of resolving an image reference.
///
/// An `ImageResource` is always structurally valid: an absent `image` is the
/// normal, non-exceptional signal that the reference could not be resolved or
/// decoded. The layout engine treats it as "no intrinsic size available".
#[derive(Debug, Clone, Default)]
pub struct ImageResource {
    /// The fully resolved absolute reference this resource was loaded from.
    /// `None` for embedded data references, which have no addressable
    /// location.
    pub source: Option<String>,

    /// The decoded, device-scaled image. `None` when resolution or decoding
    /// failed. Shared so repeated cache hits hand out the same decoded
    /// object.
    pub image: Option<Arc<RasterImage>>,
}

impl ImageResource {
    /// A successfully resolved external resource.
    pub fn resolved(source: String, image: Arc<RasterImage>) -> Self {
        Self {
            source: Some(source),
            image: Some(image),
        }
    }

    /// A resource that could not be resolved or decoded.
    pub fn missing(source: Option<String>) -> Self {
        Self {
            source,
            image: None,
        }
    }

    /// Whether a decoded image is available.
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Device-scaled pixel dimensions, if the image decoded.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|img| (img.width(), img.height()))
    }
}

/// A decoded raster image owning its pixel buffer.
///
/// Created by the decoder with the image's native dimensions, then scaled at
/// most once (by value, see [`RasterImage::scaled`]) before being shared.
/// Once wrapped in an `Arc` and cached it is immutable.
#[derive(Debug)]
pub struct RasterImage {
    data: DynamicImage,
    width: u32,
    height: u32,
    media_type: Option<String>,
}

impl RasterImage {
    /// Wrap a freshly decoded image. Dimensions are taken from the buffer.
    pub fn new(data: DynamicImage) -> Self {
        let (width, height) = data.dimensions();
        Self {
            data,
            width,
            height,
            media_type: None,
        }
    }

    /// Attach the media-type hint an embedded reference declared.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Current pixel width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Current pixel height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Media-type hint from the source reference, if one was declared.
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    /// The decoded pixel data.
    pub fn data(&self) -> &DynamicImage {
        &self.data
    }

    /// Rescale to the device resolution given by `factor` (dots per pixel).
    ///
    /// A factor of exactly 1.0 returns the image untouched, skipping the
    /// resample entirely. Otherwise the buffer is resampled to
    /// `round(width * factor)` by `round(height * factor)`, floored at one
    /// pixel.
    ///
    /// Consumes `self`: a handle that has already been shared (cached) cannot
    /// be scaled again, so cached entries stay immutable.
    pub fn scaled(self, factor: f32) -> Self {
        if factor == 1.0 {
            return self;
        }
        let width = scaled_dimension(self.width, factor);
        let height = scaled_dimension(self.height, factor);
        let data = self.data.resize_exact(width, height, FilterType::Triangle);
        Self {
            data,
            width,
            height,
            media_type: self.media_type,
        }
    }
}

fn scaled_dimension(dim: u32, factor: f32) -> u32 {
    ((dim as f32 * factor).round() as u32).max(1)
}

/// Per-call rendering context.
///
/// Passed explicitly to every resolution so the device scale factor is read
/// at call time, never stored as mutable loader state.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    dots_per_pixel: f32,
}

impl RenderContext {
    /// A context with the given device scale factor.
    pub fn new(dots_per_pixel: f32) -> Self {
        Self { dots_per_pixel }
    }

    /// The device scale factor (dots per pixel).
    pub fn dots_per_pixel(&self) -> f32 {
        self.dots_per_pixel
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            dots_per_pixel: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(width: u32, height: u32) -> RasterImage {
        RasterImage::new(DynamicImage::new_rgb8(width, height))
    }

    #[test]
    fn test_scale_identity_is_noop() {
        let img = raster(640, 480);
        let bytes_before = img.data().as_bytes().to_vec();
        let scaled = img.scaled(1.0);
        assert_eq!(scaled.width(), 640);
        assert_eq!(scaled.height(), 480);
        assert_eq!(scaled.data().as_bytes(), bytes_before.as_slice());
    }

    #[test]
    fn test_scale_rounds_target_dimensions() {
        let scaled = raster(3, 5).scaled(1.5);
        // 3 * 1.5 = 4.5 rounds to 5, 5 * 1.5 = 7.5 rounds to 8
        assert_eq!(scaled.width(), 5);
        assert_eq!(scaled.height(), 8);
    }

    #[test]
    fn test_scale_doubles() {
        let scaled = raster(100, 40).scaled(2.0);
        assert_eq!((scaled.width(), scaled.height()), (200, 80));
    }

    #[test]
    fn test_scale_never_collapses_to_zero() {
        let scaled = raster(2, 2).scaled(0.1);
        assert_eq!((scaled.width(), scaled.height()), (1, 1));
    }

    #[test]
    fn test_missing_resource_has_no_dimensions() {
        let resource = ImageResource::missing(Some("file:///a.png".into()));
        assert!(!resource.has_image());
        assert_eq!(resource.dimensions(), None);
        assert_eq!(resource.source.as_deref(), Some("file:///a.png"));
    }

    #[test]
    fn test_media_type_hint() {
        let img = raster(1, 1).with_media_type("image/png");
        assert_eq!(img.media_type(), Some("image/png"));
    }
}
