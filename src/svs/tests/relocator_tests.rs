//! Tests for the offset relocator

use std::io::Cursor;

use byteorder::{ByteOrder as _, LittleEndian};

use crate::svs::pixels::{self, LabelParams};
use crate::svs::relocator::OffsetRelocator;
use crate::svs::sub_image::{SubImageBuilder, SubImageKind};
use crate::svs::tests::test_utils::test_logger;
use crate::tiff::errors::TiffError;
use crate::tiff::ifd::IFD;
use crate::tiff::reader::TiffReader;

const TARGET: u64 = 0x100000;

fn build_label() -> Vec<u8> {
    let pixels = pixels::label_pixels(&LabelParams::default());
    let description = "Aperio Leica Biosystems - label 609x567".to_string();
    SubImageBuilder::new(SubImageKind::Label, pixels, Some(description))
        .unwrap()
        .build()
        .unwrap()
}

/// Parses the unrelocated buffer so slot positions and original offsets
/// can be compared against the relocated bytes
fn parse_directory(buffer: &[u8]) -> IFD {
    let logger = test_logger();
    let mut reader = TiffReader::new(&logger);
    let tiff = reader.read(&mut Cursor::new(buffer)).unwrap();
    tiff.ifds.into_iter().next().unwrap()
}

fn slot_value(buffer: &[u8], slot_offset: u64) -> u64 {
    LittleEndian::read_u64(&buffer[slot_offset as usize..slot_offset as usize + 8])
}

#[test]
fn test_strip_offset_rebased_by_target_minus_header() {
    let buffer = build_label();
    let original = parse_directory(&buffer);
    let strip_entry = original.get_entry(273).unwrap().clone();

    let logger = test_logger();
    let relocated = OffsetRelocator::new(&logger)
        .relocate(buffer, TARGET, SubImageKind::Label, u64::MAX)
        .unwrap();

    let rebased = slot_value(&relocated.buffer, strip_entry.slot_offset);
    assert_eq!(rebased, strip_entry.value_offset + TARGET - 16);
}

#[test]
fn test_description_offset_rebased() {
    let buffer = build_label();
    let original = parse_directory(&buffer);
    let description_entry = original.get_entry(270).unwrap().clone();

    let logger = test_logger();
    let relocated = OffsetRelocator::new(&logger)
        .relocate(buffer, TARGET, SubImageKind::Label, u64::MAX)
        .unwrap();

    let rebased = slot_value(&relocated.buffer, description_entry.slot_offset);
    assert_eq!(rebased, description_entry.value_offset + TARGET - 16);
}

#[test]
fn test_inline_values_untouched() {
    let buffer = build_label();
    let original = parse_directory(&buffer);
    let width_entry = original.get_entry(256).unwrap().clone();

    let logger = test_logger();
    let relocated = OffsetRelocator::new(&logger)
        .relocate(buffer, TARGET, SubImageKind::Label, u64::MAX)
        .unwrap();

    assert_eq!(slot_value(&relocated.buffer, width_entry.slot_offset), 609);
}

#[test]
fn test_label_next_ifd_points_past_buffer_end() {
    let buffer = build_label();
    let buffer_len = buffer.len() as u64;
    let original = parse_directory(&buffer);

    let logger = test_logger();
    let relocated = OffsetRelocator::new(&logger)
        .relocate(buffer, TARGET, SubImageKind::Label, u64::MAX)
        .unwrap();

    let expected = buffer_len + TARGET - 16;
    assert_eq!(relocated.next_ifd_offset, Some(expected));
    assert_eq!(
        slot_value(&relocated.buffer, original.next_ifd_slot_offset),
        expected
    );
}

#[test]
fn test_macro_next_ifd_stays_zero() {
    let pixels = pixels::macro_pixels();
    let buffer = SubImageBuilder::new(SubImageKind::Macro, pixels, None)
        .unwrap()
        .build()
        .unwrap();
    let original = parse_directory(&buffer);

    let logger = test_logger();
    let relocated = OffsetRelocator::new(&logger)
        .relocate(buffer, TARGET, SubImageKind::Macro, u64::MAX)
        .unwrap();

    assert_eq!(relocated.next_ifd_offset, None);
    assert_eq!(slot_value(&relocated.buffer, original.next_ifd_slot_offset), 0);
}

#[test]
fn test_rebased_offsets_land_inside_target_window() {
    let buffer = build_label();
    let buffer_len = buffer.len() as u64;
    let original = parse_directory(&buffer);

    let logger = test_logger();
    let relocated = OffsetRelocator::new(&logger)
        .relocate(buffer, TARGET, SubImageKind::Label, u64::MAX)
        .unwrap();

    for entry in &original.entries {
        if !entry.is_value_inline(true).unwrap() || entry.tag == 273 {
            let rebased = slot_value(&relocated.buffer, entry.slot_offset);
            assert!(rebased >= TARGET);
            assert!(rebased < TARGET + buffer_len);
        }
    }
}

#[test]
fn test_target_inside_header_rejected() {
    let buffer = build_label();
    let logger = test_logger();

    match OffsetRelocator::new(&logger).relocate(buffer, 8, SubImageKind::Label, u64::MAX) {
        Err(TiffError::RelocationOutOfRange(8)) => {}
        other => panic!("expected RelocationOutOfRange, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_payload_past_slide_end_rejected() {
    let buffer = build_label();
    let logger = test_logger();

    // A slide barely larger than the target cannot hold the strip
    match OffsetRelocator::new(&logger).relocate(buffer, TARGET, SubImageKind::Label, TARGET + 100)
    {
        Err(TiffError::RelocationOutOfRange(_)) => {}
        other => panic!("expected RelocationOutOfRange, got {:?}", other.map(|_| ())),
    }
}
