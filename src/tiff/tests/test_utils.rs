use std::io::Cursor;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::utils::logger::Logger;

/// Creates a logger writing into the system temp directory
pub fn test_logger() -> Logger {
    let path = std::env::temp_dir().join("slidekit_unit_tests.log");
    Logger::new(&path.to_string_lossy()).unwrap()
}

/// Creates a test buffer with a classic TIFF header and a two-entry IFD
pub fn create_test_tiff_buffer() -> Cursor<Vec<u8>> {
    let mut buffer = Vec::new();

    // TIFF header (little-endian)
    buffer.write_u16::<LittleEndian>(0x4949).unwrap(); // II for little-endian
    buffer.write_u16::<LittleEndian>(42).unwrap(); // TIFF magic number
    buffer.write_u32::<LittleEndian>(8).unwrap(); // IFD offset

    // Sample IFD (at offset 8)
    buffer.write_u16::<LittleEndian>(2).unwrap(); // Entry count (2 entries)

    // Entry 1: ImageWidth (tag 256)
    buffer.write_u16::<LittleEndian>(256).unwrap(); // Tag
    buffer.write_u16::<LittleEndian>(4).unwrap(); // Type (LONG)
    buffer.write_u32::<LittleEndian>(1).unwrap(); // Count
    buffer.write_u32::<LittleEndian>(800).unwrap(); // Value (width)

    // Entry 2: ImageLength/Height (tag 257)
    buffer.write_u16::<LittleEndian>(257).unwrap(); // Tag
    buffer.write_u16::<LittleEndian>(4).unwrap(); // Type (LONG)
    buffer.write_u32::<LittleEndian>(1).unwrap(); // Count
    buffer.write_u32::<LittleEndian>(600).unwrap(); // Value (height)

    // Next IFD offset (0 = no more IFDs)
    buffer.write_u32::<LittleEndian>(0).unwrap();

    Cursor::new(buffer)
}

/// Creates a test buffer with a BigTIFF header and a two-entry IFD
pub fn create_test_bigtiff_buffer() -> Cursor<Vec<u8>> {
    let mut buffer = Vec::new();

    // BigTIFF header (little-endian)
    buffer.write_u16::<LittleEndian>(0x4949).unwrap(); // II for little-endian
    buffer.write_u16::<LittleEndian>(43).unwrap(); // BigTIFF version
    buffer.write_u16::<LittleEndian>(8).unwrap(); // Offset size
    buffer.write_u16::<LittleEndian>(0).unwrap(); // Reserved
    buffer.write_u64::<LittleEndian>(16).unwrap(); // IFD offset

    // Sample IFD (at offset 16)
    buffer.write_u64::<LittleEndian>(2).unwrap(); // Entry count (2 entries)

    // Entry 1: ImageWidth (tag 256)
    buffer.write_u16::<LittleEndian>(256).unwrap(); // Tag
    buffer.write_u16::<LittleEndian>(4).unwrap(); // Type (LONG)
    buffer.write_u64::<LittleEndian>(1).unwrap(); // Count
    buffer.write_u64::<LittleEndian>(1024).unwrap(); // Value (width)

    // Entry 2: ImageLength/Height (tag 257)
    buffer.write_u16::<LittleEndian>(257).unwrap(); // Tag
    buffer.write_u16::<LittleEndian>(4).unwrap(); // Type (LONG)
    buffer.write_u64::<LittleEndian>(1).unwrap(); // Count
    buffer.write_u64::<LittleEndian>(768).unwrap(); // Value (height)

    // Next IFD offset (0 = no more IFDs)
    buffer.write_u64::<LittleEndian>(0).unwrap();

    Cursor::new(buffer)
}

/// Creates a BigTIFF buffer whose single IFD carries an out-of-line
/// ImageDescription (tag 270) and an out-of-line two-strip offset array
/// (tag 273), to exercise the follow/too-long decoding paths
pub fn create_test_bigtiff_with_out_of_line() -> (Cursor<Vec<u8>>, &'static str) {
    let description = "synthetic sub-image";
    let mut buffer = Vec::new();

    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(43).unwrap();
    buffer.write_u16::<LittleEndian>(8).unwrap();
    buffer.write_u16::<LittleEndian>(0).unwrap();
    buffer.write_u64::<LittleEndian>(16).unwrap();

    // IFD at 16: 2 entries -> data area starts at 16 + 8 + 40 + 8 = 72
    buffer.write_u64::<LittleEndian>(2).unwrap();

    // Entry 1: ImageDescription (tag 270), ASCII, out of line at 72
    buffer.write_u16::<LittleEndian>(270).unwrap();
    buffer.write_u16::<LittleEndian>(2).unwrap();
    buffer.write_u64::<LittleEndian>(description.len() as u64).unwrap();
    buffer.write_u64::<LittleEndian>(72).unwrap();

    // Entry 2: StripOffsets (tag 273), LONG8 x2, out of line at 92
    buffer.write_u16::<LittleEndian>(273).unwrap();
    buffer.write_u16::<LittleEndian>(16).unwrap();
    buffer.write_u64::<LittleEndian>(2).unwrap();
    buffer.write_u64::<LittleEndian>(92).unwrap();

    // Next IFD offset
    buffer.write_u64::<LittleEndian>(0).unwrap();

    // Description payload at 72 (19 bytes, padded to 20)
    buffer.extend_from_slice(description.as_bytes());
    buffer.push(0);

    // Strip offset payload at 92
    buffer.write_u64::<LittleEndian>(200).unwrap();
    buffer.write_u64::<LittleEndian>(300).unwrap();

    (Cursor::new(buffer), description)
}
