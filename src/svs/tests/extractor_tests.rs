//! Tests for the label extractor

use std::io::Cursor;

use crate::svs::label_extractor::LabelExtractor;
use crate::svs::tests::test_utils::test_logger;
use crate::tiff::errors::TiffError;
use crate::tiff::ifd::{IFD, IFDEntry};
use crate::tiff::reader::TiffReader;
use crate::tiff::value::TagValue;

/// Builds a synthetic label IFD the way the inspector would deliver it:
/// entries carry decoded values for the tags the extractor copies
fn synthetic_label_ifd(width: u64, height: u64) -> IFD {
    let mut ifd = IFD::new(1, 0);

    let mut add = |tag: u16, field_type: u16, count: u64, value: TagValue| {
        let mut entry = IFDEntry::new(tag, field_type, count, 0);
        entry.value = value;
        ifd.add_entry(entry);
    };

    add(256, 3, 1, TagValue::Unsigned(vec![width]));
    add(257, 3, 1, TagValue::Unsigned(vec![height]));
    add(258, 3, 3, TagValue::Unsigned(vec![8, 8, 8]));
    add(259, 3, 1, TagValue::Unsigned(vec![5]));
    add(278, 3, 1, TagValue::Unsigned(vec![height]));

    ifd
}

#[test]
fn test_classic_extract_roundtrip() {
    let strip = vec![0x42u8; 512];
    let label_ifd = synthetic_label_ifd(100, 50);

    let buffer = LabelExtractor::build(&strip, &label_ifd).unwrap();

    let logger = test_logger();
    let mut reader = TiffReader::new(&logger);
    let tiff = reader.read(&mut Cursor::new(&buffer)).unwrap();

    assert!(!tiff.is_big_tiff);
    assert_eq!(tiff.ifd_count(), 1);

    let ifd = &tiff.ifds[0];
    assert_eq!(ifd.get_dimensions(), Some((100, 50)));
    assert_eq!(ifd.get_tag_value(254), Some(1));
    assert_eq!(ifd.get_tag_value(259), Some(5));
    assert_eq!(ifd.get_tag_value(262), Some(2));
    assert_eq!(ifd.get_tag_value(277), Some(3));
    assert_eq!(ifd.get_tag_value(278), Some(50));
    assert_eq!(ifd.get_tag_value(279), Some(512));
    assert_eq!(ifd.get_tag_value(284), Some(1));
    assert_eq!(ifd.get_tag_value(317), Some(2));
    assert_eq!(ifd.next_ifd_offset, 0);

    // Bits-per-sample is followed out of line and starts on an even byte
    let bits = ifd.get_entry(258).unwrap();
    assert_eq!(bits.value, TagValue::Unsigned(vec![8, 8, 8]));
    assert_eq!(bits.value_offset % 2, 0);

    // The strip bytes land untouched at the recorded offset
    let strip_offset = ifd.get_tag_value(273).unwrap() as usize;
    assert_eq!(&buffer[strip_offset..strip_offset + 512], &strip[..]);
    assert_eq!(strip_offset + 512, buffer.len());
}

#[test]
fn test_extract_missing_width_fails() {
    let mut ifd = IFD::new(1, 0);
    let mut entry = IFDEntry::new(257, 3, 1, 0);
    entry.value = TagValue::Unsigned(vec![50]);
    ifd.add_entry(entry);

    match LabelExtractor::build(&[0u8; 16], &ifd) {
        Err(TiffError::LabelMacroNotFound(_)) => {}
        other => panic!("expected LabelMacroNotFound, got {:?}", other.map(|_| ())),
    }
}
