//! TIFF format constants
//!
//! This module defines constants used throughout the TIFF processing code,
//! making the code more readable and maintainable by replacing magic numbers
//! with descriptive names.

/// TIFF header constants
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// BigTIFF version number (43)
    pub const BIG_TIFF_VERSION: u16 = 43;

    /// "II" byte order marker for little-endian
    pub const LITTLE_ENDIAN_MARKER: [u8; 2] = [0x49, 0x49];

    /// BigTIFF offset size (8 bytes)
    pub const BIGTIFF_OFFSET_SIZE: u16 = 8;

    /// Length of a classic TIFF header
    pub const TIFF_HEADER_LEN: u64 = 8;

    /// Length of a BigTIFF header; also the first-IFD offset in built sub-images
    pub const BIGTIFF_HEADER_LEN: u64 = 16;
}

/// Field types as defined in the TIFF spec
pub mod field_types {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const SBYTE: u16 = 6;      // 8-bit signed integer
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with unspecified format
    pub const SSHORT: u16 = 8;     // 16-bit signed integer
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
    pub const FLOAT: u16 = 11;     // Single precision IEEE floating point
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
    pub const LONG8: u16 = 16;     // BigTIFF 64-bit unsigned integer
    pub const SLONG8: u16 = 17;    // BigTIFF 64-bit signed integer
    pub const IFD8: u16 = 18;      // BigTIFF 64-bit IFD offset
}

/// Standard TIFF tags
pub mod tags {
    // Basic image structure tags
    pub const NEW_SUBFILE_TYPE: u16 = 254;           // Subfile data descriptor
    pub const IMAGE_WIDTH: u16 = 256;                // Width of the image in pixels
    pub const IMAGE_LENGTH: u16 = 257;               // Height of the image in pixels
    pub const BITS_PER_SAMPLE: u16 = 258;            // Bits per component
    pub const COMPRESSION: u16 = 259;                // Compression scheme
    pub const PHOTOMETRIC_INTERPRETATION: u16 = 262; // Color space of image data
    pub const IMAGE_DESCRIPTION: u16 = 270;          // Free-text image description
    pub const STRIP_OFFSETS: u16 = 273;              // Offsets to the data strips
    pub const ORIENTATION: u16 = 274;                // Image orientation
    pub const SAMPLES_PER_PIXEL: u16 = 277;          // Number of components per pixel
    pub const ROWS_PER_STRIP: u16 = 278;             // Rows per strip of data
    pub const STRIP_BYTE_COUNTS: u16 = 279;          // Byte counts for strips
    pub const X_RESOLUTION: u16 = 282;               // Horizontal resolution
    pub const Y_RESOLUTION: u16 = 283;               // Vertical resolution
    pub const PLANAR_CONFIGURATION: u16 = 284;       // How components are stored
    pub const RESOLUTION_UNIT: u16 = 296;            // Unit of measurement for resolution
    pub const SOFTWARE: u16 = 305;                   // Software used to create the image
    pub const DATE_TIME: u16 = 306;                  // Date and time of image creation
    pub const PREDICTOR: u16 = 317;                  // Prediction scheme used on image data
    pub const COLOR_MAP: u16 = 320;                  // Colormap for palette color images
    pub const TILE_WIDTH: u16 = 322;                 // Width of a tile
    pub const TILE_LENGTH: u16 = 323;                // Length of a tile
    pub const TILE_OFFSETS: u16 = 324;               // Offsets to the data tiles
    pub const TILE_BYTE_COUNTS: u16 = 325;           // Byte counts for tiles
    pub const SAMPLE_FORMAT: u16 = 339;              // Interpretation of sample data
    pub const IMAGE_DEPTH: u16 = 32997;              // Aperio: Z-depth of the image
    pub const ICC_PROFILE: u16 = 34675;              // Embedded ICC color profile
}

/// Compression types
pub mod compression {
    pub const NONE: u16 = 1;              // No compression
    pub const CCITT_RLE: u16 = 2;         // CCITT modified Huffman RLE
    pub const CCITT_FAX3: u16 = 3;        // CCITT Group 3 fax
    pub const CCITT_FAX4: u16 = 4;        // CCITT Group 4 fax
    pub const LZW: u16 = 5;               // LZW compression
    pub const JPEG_OLD: u16 = 6;          // Old JPEG (used by Aperio macros)
    pub const JPEG: u16 = 7;              // JPEG compression
    pub const DEFLATE: u16 = 8;           // Adobe Deflate (zlib)
    pub const PACKBITS: u16 = 32773;      // PackBits compression
}

/// Photometric interpretation values
pub mod photometric {
    pub const WHITE_IS_ZERO: u16 = 0;     // Minimum value is white
    pub const BLACK_IS_ZERO: u16 = 1;     // Minimum value is black
    pub const RGB: u16 = 2;               // RGB color model
    pub const PALETTE: u16 = 3;           // Palette color (color map indexed)
    pub const TRANSPARENCY_MASK: u16 = 4; // Transparency mask
    pub const CMYK: u16 = 5;              // CMYK color model
    pub const YCBCR: u16 = 6;             // YCbCr color model
    pub const CIELAB: u16 = 8;            // CIE L*a*b color model
}

/// Planar configuration values
pub mod planar_config {
    pub const CHUNKY: u16 = 1;            // Components stored interleaved (RGBRGBRGB)
}

/// Resolution unit values
pub mod resolution_unit {
    pub const NONE: u16 = 1;              // No meaningful units
    pub const INCH: u16 = 2;              // Inches (default)
}

/// Predictor values
pub mod predictor {
    pub const NONE: u16 = 1;                    // No prediction scheme
    pub const HORIZONTAL_DIFFERENCING: u16 = 2; // Horizontal differencing (LZW)
}

/// NewSubfileType values used by Aperio sub-images
pub mod subfile {
    /// Reduced-resolution subfile; the label directory carries this
    pub const REDUCED_RESOLUTION: u64 = 1;
    /// Reduced resolution combined with the macro flag (bit 3)
    pub const MACRO: u64 = 9;
}
