//! Image decoding and the artwork store.
//!
//! Face artwork is referenced from card records by id; the store maps ids to
//! the encoded source bytes so exports can embed them without re-encoding.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use deck_core::ImageRef;

use crate::error::{RenderError, RenderResult};

/// Decoded RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA pixel data (4 bytes per pixel).
    pub data: Vec<u8>,
}

/// Encoded image formats understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG with alpha support.
    Png,
    /// JPEG (no alpha).
    Jpeg,
    /// Unknown/other format.
    Unknown,
}

impl ImageFormat {
    /// Detect format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpeg,
            _ => Self::Unknown,
        }
    }

    /// Detect format from magic bytes.
    #[must_use]
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            Self::Png
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Self::Jpeg
        } else {
            Self::Unknown
        }
    }

    /// MIME type for data URIs.
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Unknown => "application/octet-stream",
        }
    }
}

/// Decode PNG or JPEG bytes to RGBA.
///
/// # Errors
///
/// Returns an error if the image cannot be decoded.
pub fn decode_image(data: &[u8]) -> RenderResult<RasterImage> {
    let img = image::load_from_memory(data)
        .map_err(|e| RenderError::Resource(format!("Failed to decode image: {e}")))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(RasterImage {
        width,
        height,
        data: rgba.into_raw(),
    })
}

/// Read the pixel size of encoded image bytes without decoding the pixels.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the header is malformed.
pub fn image_dimensions(data: &[u8]) -> RenderResult<(u32, u32)> {
    image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| RenderError::Resource(format!("Failed to read image header: {e}")))?
        .into_dimensions()
        .map_err(|e| RenderError::Resource(format!("Failed to read image size: {e}")))
}

/// Encode RGBA pixels as PNG.
///
/// # Errors
///
/// Returns an error if the buffer size does not match the dimensions or
/// encoding fails.
pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> RenderResult<Vec<u8>> {
    use image::ImageEncoder;

    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(rgba, width, height, image::ExtendedColorType::Rgba8)
        .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))?;
    Ok(buf)
}

/// Wrap encoded bytes in a base64 data URI.
#[must_use]
pub fn to_data_uri(data: &[u8], format: ImageFormat) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(data);
    format!("data:{};base64,{encoded}", format.mime())
}

/// Load an image from a base64 data URI.
///
/// Supports URIs like `data:image/png;base64,iVBORw0KGgo...`.
///
/// # Errors
///
/// Returns an error if the data URI is malformed or the image cannot be decoded.
pub fn load_image_from_data_uri(uri: &str) -> RenderResult<RasterImage> {
    decode_image(&data_uri_bytes(uri)?)
}

fn data_uri_bytes(uri: &str) -> RenderResult<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| RenderError::Resource("Not a data URI".to_string()))?;
    let (metadata, payload) = rest
        .split_once(',')
        .ok_or_else(|| RenderError::Resource("Invalid data URI: missing comma".to_string()))?;
    if !metadata.contains(";base64") {
        return Err(RenderError::Resource(
            "Only base64 data URIs are supported".to_string(),
        ));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| RenderError::Resource(format!("Failed to decode base64: {e}")))
}

#[derive(Debug, Clone)]
struct StoredImage {
    bytes: Vec<u8>,
    format: ImageFormat,
}

/// Encoded face artwork keyed by [`ImageRef::id`].
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    images: HashMap<String, StoredImage>,
}

impl ImageStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add encoded image bytes under `id`.
    ///
    /// Returns a handle carrying the natural size.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a PNG or JPEG image.
    pub fn insert(&mut self, id: impl Into<String>, bytes: Vec<u8>) -> RenderResult<ImageRef> {
        let id = id.into();
        let format = ImageFormat::from_magic_bytes(&bytes);
        if format == ImageFormat::Unknown {
            return Err(RenderError::Resource(format!("Unsupported image format: {id}")));
        }
        let (width, height) = image_dimensions(&bytes)?;
        tracing::debug!("Stored image {id} ({width}x{height})");
        #[allow(clippy::cast_precision_loss)]
        let handle = ImageRef::new(id.clone(), width as f32, height as f32);
        self.images.insert(id, StoredImage { bytes, format });
        Ok(handle)
    }

    /// Add an image from a data URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI or image is malformed.
    pub fn insert_data_uri(&mut self, id: impl Into<String>, uri: &str) -> RenderResult<ImageRef> {
        self.insert(id, data_uri_bytes(uri)?)
    }

    /// Read an image file, keyed by its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn load_file(&mut self, path: &Path) -> RenderResult<ImageRef> {
        let bytes = std::fs::read(path)?;
        self.insert(path.to_string_lossy(), bytes)
    }

    /// Whether an image is stored under `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.images.contains_key(id)
    }

    /// Number of stored images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The stored image as a data URI.
    #[must_use]
    pub fn data_uri(&self, id: &str) -> Option<String> {
        self.images
            .get(id)
            .map(|img| to_data_uri(&img.bytes, img.format))
    }
}
