//! TIFF tag utilities
//!
//! Name lookups for tags, field types and enumerated tag values, used for
//! diagnostics and the inspect command's structure dump.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::tiff::constants::{compression, field_types, photometric, tags};

lazy_static! {
    /// Names of the tags that appear in SVS directories
    static ref TAG_NAMES: HashMap<u16, &'static str> = {
        let mut names = HashMap::new();
        names.insert(tags::NEW_SUBFILE_TYPE, "NewSubfileType");
        names.insert(tags::IMAGE_WIDTH, "ImageWidth");
        names.insert(tags::IMAGE_LENGTH, "ImageLength");
        names.insert(tags::BITS_PER_SAMPLE, "BitsPerSample");
        names.insert(tags::COMPRESSION, "Compression");
        names.insert(tags::PHOTOMETRIC_INTERPRETATION, "PhotometricInterpretation");
        names.insert(tags::IMAGE_DESCRIPTION, "ImageDescription");
        names.insert(tags::STRIP_OFFSETS, "StripOffsets");
        names.insert(tags::ORIENTATION, "Orientation");
        names.insert(tags::SAMPLES_PER_PIXEL, "SamplesPerPixel");
        names.insert(tags::ROWS_PER_STRIP, "RowsPerStrip");
        names.insert(tags::STRIP_BYTE_COUNTS, "StripByteCounts");
        names.insert(tags::X_RESOLUTION, "XResolution");
        names.insert(tags::Y_RESOLUTION, "YResolution");
        names.insert(tags::PLANAR_CONFIGURATION, "PlanarConfiguration");
        names.insert(tags::RESOLUTION_UNIT, "ResolutionUnit");
        names.insert(tags::SOFTWARE, "Software");
        names.insert(tags::DATE_TIME, "DateTime");
        names.insert(tags::PREDICTOR, "Predictor");
        names.insert(tags::COLOR_MAP, "ColorMap");
        names.insert(tags::TILE_WIDTH, "TileWidth");
        names.insert(tags::TILE_LENGTH, "TileLength");
        names.insert(tags::TILE_OFFSETS, "TileOffsets");
        names.insert(tags::TILE_BYTE_COUNTS, "TileByteCounts");
        names.insert(tags::SAMPLE_FORMAT, "SampleFormat");
        names.insert(tags::IMAGE_DEPTH, "ImageDepth");
        names.insert(tags::ICC_PROFILE, "ICCProfile");
        names
    };
}

/// Get the name of a TIFF tag
///
/// Returns a human-readable name for a tag based on its numeric ID.
/// If the tag is not recognized, returns "Unknown".
pub fn get_tag_name(tag: u16) -> &'static str {
    TAG_NAMES.get(&tag).copied().unwrap_or("Unknown")
}

/// Get the name of a TIFF field type
pub fn get_field_type_name(field_type: u16) -> &'static str {
    match field_type {
        field_types::BYTE => "BYTE",
        field_types::ASCII => "ASCII",
        field_types::SHORT => "SHORT",
        field_types::LONG => "LONG",
        field_types::RATIONAL => "RATIONAL",
        field_types::SBYTE => "SBYTE",
        field_types::UNDEFINED => "UNDEFINED",
        field_types::SSHORT => "SSHORT",
        field_types::SLONG => "SLONG",
        field_types::SRATIONAL => "SRATIONAL",
        field_types::FLOAT => "FLOAT",
        field_types::DOUBLE => "DOUBLE",
        field_types::LONG8 => "LONG8",
        field_types::SLONG8 => "SLONG8",
        field_types::IFD8 => "IFD8",
        _ => "Unknown",
    }
}

/// Get the name of a compression method
pub fn get_compression_name(compression_code: u64) -> &'static str {
    match compression_code as u16 {
        compression::NONE => "None",
        compression::CCITT_RLE => "CCITT RLE",
        compression::CCITT_FAX3 => "CCITT Group 3 Fax",
        compression::CCITT_FAX4 => "CCITT Group 4 Fax",
        compression::LZW => "LZW",
        compression::JPEG_OLD => "JPEG (old-style)",
        compression::JPEG => "JPEG",
        compression::DEFLATE => "Adobe Deflate",
        compression::PACKBITS => "PackBits",
        _ => "Unknown",
    }
}

/// Get the name of a photometric interpretation method
pub fn get_photometric_name(photometric_code: u64) -> &'static str {
    match photometric_code as u16 {
        photometric::WHITE_IS_ZERO => "WhiteIsZero",
        photometric::BLACK_IS_ZERO => "BlackIsZero",
        photometric::RGB => "RGB",
        photometric::PALETTE => "Palette",
        photometric::TRANSPARENCY_MASK => "TransparencyMask",
        photometric::CMYK => "CMYK",
        photometric::YCBCR => "YCbCr",
        photometric::CIELAB => "CIELAB",
        _ => "Unknown",
    }
}
