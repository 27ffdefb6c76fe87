//! Replacement pixel production
//!
//! The splicer consumes opaque RGB buffers; this module produces the
//! headless defaults — a white label and a red macro at the dimensions the
//! scanner emits. QR and text parameters ride along untouched for preview
//! frontends that rasterize them onto the label before splicing.

use image::{Rgb, RgbImage};
use log::debug;

/// Replacement label dimensions (width, height)
pub const LABEL_DIMENSIONS: (u32, u32) = (609, 567);
/// Replacement macro dimensions (width, height)
///
/// The macro is a fixed-size placeholder regardless of the original's size.
pub const MACRO_DIMENSIONS: (u32, u32) = (1495, 606);

const LABEL_FILL: Rgb<u8> = Rgb([255, 255, 255]);
const MACRO_FILL: Rgb<u8> = Rgb([255, 0, 0]);

/// Text content for a replacement label
///
/// Carries the QR payload and up to four lines of text below it. The
/// headless producer does not rasterize these; rendering frontends do.
#[derive(Debug, Clone, Default)]
pub struct LabelParams {
    pub qr_text: Option<String>,
    pub lines: [Option<String>; 4],
}

impl LabelParams {
    pub fn new(qr_text: Option<String>, lines: [Option<String>; 4]) -> Self {
        LabelParams { qr_text, lines }
    }
}

/// An RGB pixel buffer with its declared dimensions
///
/// Row-major, 3 bytes per pixel.
#[derive(Debug, Clone)]
pub struct ReplacementPixels {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Produces the replacement label pixels
pub fn label_pixels(params: &LabelParams) -> ReplacementPixels {
    let line_count = params.lines.iter().flatten().count();
    if params.qr_text.is_some() || line_count > 0 {
        debug!(
            "Label carries a QR payload and {} text line(s); rasterization is left to the preview frontend",
            line_count
        );
    }

    let (width, height) = LABEL_DIMENSIONS;
    let image = RgbImage::from_pixel(width, height, LABEL_FILL);
    ReplacementPixels {
        data: image.into_raw(),
        width,
        height,
    }
}

/// Produces the replacement macro pixels
pub fn macro_pixels() -> ReplacementPixels {
    let (width, height) = MACRO_DIMENSIONS;
    let image = RgbImage::from_pixel(width, height, MACRO_FILL);
    ReplacementPixels {
        data: image.into_raw(),
        width,
        height,
    }
}
