//! Format types for PPTX presentations.

use crate::common::RGBColor;
use crate::ooxml::opc::constants::content_type as ct;

/// Image format types supported by PPTX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl ImageFormat {
    /// Content type of the media part.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => ct::PNG,
            Self::Jpeg => ct::JPEG,
            Self::Gif => ct::GIF,
            Self::Bmp => ct::BMP,
            Self::Tiff => ct::TIFF,
        }
    }

    /// Get the file extension for this image format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Detect image format from bytes (magic number detection).
    pub fn detect_from_bytes(bytes: &[u8]) -> Option<Self> {
        const SIGNATURES: [(&[u8], ImageFormat); 6] = [
            (&[0x89, 0x50, 0x4E, 0x47], ImageFormat::Png),
            (&[0xFF, 0xD8, 0xFF], ImageFormat::Jpeg),
            (b"GIF8", ImageFormat::Gif),
            (b"BM", ImageFormat::Bmp),
            (&[0x49, 0x49, 0x2A, 0x00], ImageFormat::Tiff),
            (&[0x4D, 0x4D, 0x00, 0x2A], ImageFormat::Tiff),
        ];

        if bytes.len() < 4 {
            return None;
        }
        SIGNATURES
            .iter()
            .find(|(magic, _)| bytes.starts_with(magic))
            .map(|&(_, format)| format)
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlignment {
    pub(crate) fn to_xml_value(self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "ctr",
            Self::Right => "r",
        }
    }
}

/// Text formatting properties for text boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFormat {
    /// Font size in points
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    pub color: RGBColor,
    pub alignment: TextAlignment,
    /// Shape fill behind the text
    pub fill: Option<RGBColor>,
    /// Opacity from 0.0 to 1.0 applied to text and fill
    pub alpha: Option<f64>,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            size: 18.0,
            bold: false,
            italic: false,
            color: RGBColor::WHITE,
            alignment: TextAlignment::Left,
            fill: None,
            alpha: None,
        }
    }
}
