//! Shared value types for the Lumen pipeline domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! values with invariants (temperatures are finite and in range, byte sizes
//! are compared against ceilings) and participate in domain decisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ModelName;

// ---------------------------------------------------------------------------
// Model selection
// ---------------------------------------------------------------------------

/// Which of the two remote model configurations a step runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    /// Fast, cheap model for extraction and formatting steps.
    Fast,
    /// Slower, more capable model for the causal explanation and risk audit.
    Reasoning,
}

impl std::fmt::Display for ModelTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Reasoning => write!(f, "reasoning"),
        }
    }
}

// ---------------------------------------------------------------------------

/// Sampling temperature sent with a completion request.
///
/// Outputs are meant to be literal, so every configured tier stays at or below
/// [`Temperature::MAX_LITERAL`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Temperature(f32);

impl Temperature {
    /// Upper bound for the factual, non-creative steps in this system.
    pub const MAX_LITERAL: f32 = 0.3;

    /// Clamps `value` into the literal range; NaN becomes `0.0`.
    pub fn clamped(value: f32) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, Self::MAX_LITERAL))
        }
    }

    /// Returns the underlying `f32` value.
    pub fn as_f32(self) -> f32 {
        self.0
    }
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

// ---------------------------------------------------------------------------

/// Model and temperature for one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSettings {
    pub model: ModelName,
    pub temperature: Temperature,
}

/// The pair of tier configurations a pipeline runs with.
///
/// Model names come from configuration; temperatures are fixed per pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub fast: TierSettings,
    pub reasoning: TierSettings,
}

impl ModelSettings {
    /// Returns the settings for `tier`.
    pub fn tier(&self, tier: ModelTier) -> &TierSettings {
        match tier {
            ModelTier::Fast => &self.fast,
            ModelTier::Reasoning => &self.reasoning,
        }
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// API credential for the remote endpoint.
///
/// `Debug` is redacted so the key never reaches a log line.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Keys at or below this length are treated as mistyped.
    const MIN_PLAUSIBLE_LEN: usize = 20;

    /// Wraps a key, returning `None` when it is blank.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into().trim().to_string();
        if v.is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    /// Returns the raw key for use in a request header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Cheap plausibility check applied before a run is started from the UI.
    pub fn looks_valid(&self) -> bool {
        self.0.len() > Self::MIN_PLAUSIBLE_LEN
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey(<redacted, {} chars>)", self.0.len())
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Image formats the vision endpoint accepts, sniffed from magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageMime {
    Png,
    Jpeg,
    Webp,
    Gif,
}

impl ImageMime {
    /// Detects the image format from the leading bytes of `bytes`.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else {
            None
        }
    }

    /// The MIME type string sent alongside the inline image data.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
        }
    }
}

/// An image to embed in a completion request.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    mime: ImageMime,
    bytes: Vec<u8>,
}

impl ImagePayload {
    /// Wraps raw image bytes, returning `None` if the format is not recognised.
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        let mime = ImageMime::sniff(&bytes)?;
        Some(Self { mime, bytes })
    }

    pub fn mime(&self) -> ImageMime {
        self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> ByteSize {
        ByteSize::new(self.bytes.len() as u64)
    }
}

impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime", &self.mime)
            .field("size", &self.bytes.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------

/// A size in bytes, used for upload ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ByteSize(u64);

impl ByteSize {
    pub const MIB: u64 = 1024 * 1024;

    pub fn new(bytes: u64) -> Self {
        Self(bytes)
    }

    pub fn from_mib(mib: u64) -> Self {
        Self(mib * Self::MIB)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ByteSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}MB", self.0 as f64 / Self::MIB as f64)
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_is_clamped_to_literal_range() {
        assert_eq!(Temperature::clamped(0.1).as_f32(), 0.1);
        assert_eq!(Temperature::clamped(0.3).as_f32(), Temperature::MAX_LITERAL);
        assert_eq!(Temperature::clamped(0.7).as_f32(), Temperature::MAX_LITERAL);
        assert_eq!(Temperature::clamped(-0.1).as_f32(), 0.0);
        assert_eq!(Temperature::clamped(f32::NAN).as_f32(), 0.0);
    }

    #[test]
    fn sniffs_common_image_formats() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        assert_eq!(ImageMime::sniff(&png), Some(ImageMime::Png));
        assert_eq!(ImageMime::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageMime::Jpeg));
        assert_eq!(ImageMime::sniff(b"RIFF\0\0\0\0WEBPVP8 "), Some(ImageMime::Webp));
        assert_eq!(ImageMime::sniff(b"GIF89a..."), Some(ImageMime::Gif));
        assert_eq!(ImageMime::sniff(b"%PDF-1.4"), None);
        assert!(ImagePayload::from_bytes(b"plain text".to_vec()).is_none());
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("AIzaSyA-very-secret-key-value").unwrap();
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("secret"));
        assert!(key.looks_valid());
        assert!(!ApiKey::new("short").unwrap().looks_valid());
        assert!(ApiKey::new("  ").is_none());
    }

    #[test]
    fn byte_size_displays_in_megabytes() {
        assert_eq!(ByteSize::from_mib(10).to_string(), "10.0MB");
        assert_eq!(ByteSize::from_mib(10).as_u64(), 10 * 1024 * 1024);
    }
}
