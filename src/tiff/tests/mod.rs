//! Unit tests for the TIFF module

mod test_utils;
