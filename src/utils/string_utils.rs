//! String utility functions
//!
//! Utilities for working with strings and text data.

/// Trims trailing null characters from a byte buffer
pub fn trim_trailing_nulls(buffer: &mut Vec<u8>) {
    while !buffer.is_empty() && buffer[buffer.len() - 1] == 0 {
        buffer.pop();
    }
}

/// Renders an ASCII tag payload for display, trimming trailing nulls
pub fn display_ascii(bytes: &[u8]) -> String {
    let mut buffer = bytes.to_vec();
    trim_trailing_nulls(&mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}
