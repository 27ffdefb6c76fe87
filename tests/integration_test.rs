//! End-to-end splice tests
//!
//! Builds a synthetic three-directory SVS-shaped slide (pyramid stub plus
//! label and macro), replaces its label and macro in place, and checks the
//! file-format invariants on the result.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use slidekit::svs::pixels::{LABEL_DIMENSIONS, MACRO_DIMENSIONS};
use slidekit::utils::logger::Logger;
use slidekit::{LabelParams, SlideKit, TiffReader};

const LABEL_FILL: u8 = 0xBB;
const MACRO_FILL: u8 = 0xCC;
const PYRAMID_DESCRIPTION: &[u8] = b"Aperio pyramid level zero";

struct Fixture {
    bytes: Vec<u8>,
    label_dir_offset: u64,
    label_strip_offset: u64,
    label_strip_len: u64,
}

fn align_even(offset: u64) -> u64 {
    offset + offset % 2
}

fn write_entry(buffer: &mut Vec<u8>, tag: u16, field_type: u16, count: u64, value: u64) {
    buffer.write_u16::<LittleEndian>(tag).unwrap();
    buffer.write_u16::<LittleEndian>(field_type).unwrap();
    buffer.write_u64::<LittleEndian>(count).unwrap();
    buffer.write_u64::<LittleEndian>(value).unwrap();
}

/// Builds a minimal slide: pyramid stub, LZW label, JPEG macro
fn build_fixture(macro_next_ifd: u64) -> Fixture {
    let dir0_offset = 16u64;
    let dir0_entries = 7u64;
    let desc0_offset = dir0_offset + 8 + dir0_entries * 20 + 8;
    let strip0_offset = align_even(desc0_offset + PYRAMID_DESCRIPTION.len() as u64);
    let strip0_len = 64u64;

    let label_dir_offset = strip0_offset + strip0_len;
    let label_entries = 12u64;
    let bits_offset = label_dir_offset + 8 + label_entries * 20 + 8;
    let label_strip_offset = align_even(bits_offset + 6);
    let label_strip_len = 512u64;

    let macro_dir_offset = label_strip_offset + label_strip_len;
    let macro_entries = 9u64;
    let macro_strip_offset = macro_dir_offset + 8 + macro_entries * 20 + 8;
    let macro_strip_len = 1024u64;

    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(43).unwrap();
    buffer.write_u16::<LittleEndian>(8).unwrap();
    buffer.write_u16::<LittleEndian>(0).unwrap();
    buffer.write_u64::<LittleEndian>(dir0_offset).unwrap();

    buffer.write_u64::<LittleEndian>(dir0_entries).unwrap();
    write_entry(&mut buffer, 254, 4, 1, 0);
    write_entry(&mut buffer, 256, 4, 1, 4096);
    write_entry(&mut buffer, 257, 4, 1, 4096);
    write_entry(&mut buffer, 259, 3, 1, 7);
    write_entry(&mut buffer, 270, 2, PYRAMID_DESCRIPTION.len() as u64, desc0_offset);
    write_entry(&mut buffer, 273, 16, 1, strip0_offset);
    write_entry(&mut buffer, 279, 16, 1, strip0_len);
    buffer.write_u64::<LittleEndian>(label_dir_offset).unwrap();

    buffer.extend_from_slice(PYRAMID_DESCRIPTION);
    if buffer.len() % 2 != 0 {
        buffer.push(0);
    }
    buffer.extend_from_slice(&vec![0xAAu8; strip0_len as usize]);

    assert_eq!(buffer.len() as u64, label_dir_offset);
    buffer.write_u64::<LittleEndian>(label_entries).unwrap();
    write_entry(&mut buffer, 254, 4, 1, 1);
    write_entry(&mut buffer, 256, 3, 1, 100);
    write_entry(&mut buffer, 257, 3, 1, 50);
    write_entry(&mut buffer, 258, 3, 3, bits_offset);
    write_entry(&mut buffer, 259, 3, 1, 5);
    write_entry(&mut buffer, 262, 3, 1, 2);
    write_entry(&mut buffer, 273, 16, 1, label_strip_offset);
    write_entry(&mut buffer, 277, 3, 1, 3);
    write_entry(&mut buffer, 278, 3, 1, 50);
    write_entry(&mut buffer, 279, 16, 1, label_strip_len);
    write_entry(&mut buffer, 284, 3, 1, 1);
    write_entry(&mut buffer, 317, 3, 1, 2);
    buffer.write_u64::<LittleEndian>(macro_dir_offset).unwrap();

    buffer.write_u16::<LittleEndian>(8).unwrap();
    buffer.write_u16::<LittleEndian>(8).unwrap();
    buffer.write_u16::<LittleEndian>(8).unwrap();
    buffer.extend_from_slice(&vec![0u8; (label_strip_offset - bits_offset - 6) as usize]);
    buffer.extend_from_slice(&vec![LABEL_FILL; label_strip_len as usize]);

    assert_eq!(buffer.len() as u64, macro_dir_offset);
    buffer.write_u64::<LittleEndian>(macro_entries).unwrap();
    write_entry(&mut buffer, 254, 4, 1, 9);
    write_entry(&mut buffer, 256, 3, 1, 400);
    write_entry(&mut buffer, 257, 3, 1, 300);
    write_entry(&mut buffer, 259, 3, 1, 6);
    write_entry(&mut buffer, 262, 3, 1, 6);
    write_entry(&mut buffer, 273, 16, 1, macro_strip_offset);
    write_entry(&mut buffer, 277, 3, 1, 3);
    write_entry(&mut buffer, 278, 3, 1, 300);
    write_entry(&mut buffer, 279, 16, 1, macro_strip_len);
    buffer.write_u64::<LittleEndian>(macro_next_ifd).unwrap();

    assert_eq!(buffer.len() as u64, macro_strip_offset);
    buffer.extend_from_slice(&vec![MACRO_FILL; macro_strip_len as usize]);

    Fixture {
        bytes: buffer,
        label_dir_offset,
        label_strip_offset,
        label_strip_len,
    }
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("slidekit_integration_{}.svs", name))
}

fn temp_log(name: &str) -> String {
    std::env::temp_dir()
        .join(format!("slidekit_integration_{}.log", name))
        .to_string_lossy()
        .into_owned()
}

#[test]
fn test_full_splice_preserves_format_invariants() {
    let fixture = build_fixture(0);
    let slide_path = temp_path("splice");
    fs::write(&slide_path, &fixture.bytes).unwrap();

    let kit = SlideKit::new(Some(&temp_log("splice"))).unwrap();
    kit.replace(&slide_path.to_string_lossy(), &LabelParams::default(), true)
        .unwrap();

    let after = fs::read(&slide_path).unwrap();

    // The replacement payloads are larger than the originals, so the file grew
    assert!(after.len() > fixture.bytes.len());

    // Everything ahead of the label directory is byte-identical
    let untouched = fixture.label_dir_offset as usize;
    assert_eq!(&after[..untouched], &fixture.bytes[..untouched]);

    // The whole chain still parses
    let logger = Logger::new(&temp_log("splice_parse")).unwrap();
    let mut reader = TiffReader::new(&logger);
    let tiff = reader.read(&mut Cursor::new(&after)).unwrap();
    assert_eq!(tiff.ifd_count(), 3);

    let pyramid = &tiff.ifds[0];
    let label = &tiff.ifds[1];
    let macro_ = &tiff.ifds[2];

    // Pyramid directory is untouched, description included
    assert_eq!(pyramid.get_dimensions(), Some((4096, 4096)));
    assert_eq!(
        pyramid.get_entry(270).unwrap().value.as_ascii(),
        Some(PYRAMID_DESCRIPTION)
    );

    // The new label directory sits exactly where the old one did
    assert_eq!(label.offset, fixture.label_dir_offset);
    assert_eq!(label.get_tag_value(254), Some(1));
    assert_eq!(
        label.get_dimensions(),
        Some((LABEL_DIMENSIONS.0 as u64, LABEL_DIMENSIONS.1 as u64))
    );
    assert_eq!(label.get_tag_value(259), Some(1));
    assert_eq!(
        label.get_entry(270).unwrap().value.as_ascii(),
        Some(&b"Aperio Leica Biosystems - label 609x567"[..])
    );

    // Chain continuity: label points at the macro, macro terminates
    assert_eq!(label.next_ifd_offset, macro_.offset);
    assert_eq!(macro_.get_tag_value(254), Some(9));
    assert_eq!(
        macro_.get_dimensions(),
        Some((MACRO_DIMENSIONS.0 as u64, MACRO_DIMENSIONS.1 as u64))
    );
    assert_eq!(macro_.next_ifd_offset, 0);

    // The raw terminator slot reads as eight zero bytes
    let terminator_slot = macro_.next_ifd_slot_offset as usize;
    assert_eq!(
        LittleEndian::read_u64(&after[terminator_slot..terminator_slot + 8]),
        0
    );

    // The spliced strips hold the expected pixels
    let label_strip = label.get_tag_value(273).unwrap() as usize;
    assert_eq!(&after[label_strip..label_strip + 6], &[255u8; 6]);
    let macro_strip = macro_.get_tag_value(273).unwrap() as usize;
    assert_eq!(&after[macro_strip..macro_strip + 6], &[255, 0, 0, 255, 0, 0]);

    // Each strip ends inside the file
    let label_strip_len = label.get_tag_value(279).unwrap() as usize;
    assert!(label_strip + label_strip_len <= after.len());
    let macro_strip_len = macro_.get_tag_value(279).unwrap() as usize;
    assert_eq!(macro_strip + macro_strip_len, after.len());

    fs::remove_file(slide_path).unwrap();
}

#[test]
fn test_splice_without_redaction_keeps_unreached_original_bytes() {
    let fixture = build_fixture(0);
    let slide_path = temp_path("keep");
    fs::write(&slide_path, &fixture.bytes).unwrap();

    let kit = SlideKit::new(Some(&temp_log("keep"))).unwrap();
    kit.replace(&slide_path.to_string_lossy(), &LabelParams::default(), false)
        .unwrap();

    // The new label payload overwrites everything from the label directory
    // onward, but nothing before it
    let after = fs::read(&slide_path).unwrap();
    let untouched = fixture.label_dir_offset as usize;
    assert_eq!(&after[..untouched], &fixture.bytes[..untouched]);

    fs::remove_file(slide_path).unwrap();
}

#[test]
fn test_redaction_zeroes_original_strips_before_splice() {
    let fixture = build_fixture(0);
    let slide_path = temp_path("redact_only");
    fs::write(&slide_path, &fixture.bytes).unwrap();

    let kit = SlideKit::new(Some(&temp_log("redact_only"))).unwrap();
    kit.redact(&slide_path.to_string_lossy()).unwrap();

    let after = fs::read(&slide_path).unwrap();
    let start = fixture.label_strip_offset as usize;
    let end = start + fixture.label_strip_len as usize;
    assert!(after[start..end].iter().all(|&byte| byte == 0));

    fs::remove_file(slide_path).unwrap();
}

#[test]
fn test_dangling_macro_next_pointer_is_refused() {
    // A macro whose next-IFD pointer leads past the end of the file never
    // reaches the splice; the walk fails and the slide is left untouched
    let fixture = build_fixture(0x100000);
    let slide_path = temp_path("non_terminal");
    fs::write(&slide_path, &fixture.bytes).unwrap();

    let kit = SlideKit::new(Some(&temp_log("non_terminal"))).unwrap();
    let result = kit.replace(&slide_path.to_string_lossy(), &LabelParams::default(), true);
    assert!(result.is_err());

    let after = fs::read(&slide_path).unwrap();
    assert_eq!(after, fixture.bytes);

    fs::remove_file(slide_path).unwrap();
}

#[test]
fn test_label_export_decodes_with_directory_reader() {
    let fixture = build_fixture(0);
    let slide_path = temp_path("export");
    fs::write(&slide_path, &fixture.bytes).unwrap();

    let kit = SlideKit::new(Some(&temp_log("export"))).unwrap();
    let label_tiff = kit.label_tiff(&slide_path.to_string_lossy()).unwrap();

    let logger = Logger::new(&temp_log("export_parse")).unwrap();
    let mut reader = TiffReader::new(&logger);
    let tiff = reader.read(&mut Cursor::new(&label_tiff)).unwrap();

    assert!(!tiff.is_big_tiff);
    let ifd = &tiff.ifds[0];
    assert_eq!(ifd.get_dimensions(), Some((100, 50)));
    assert_eq!(ifd.get_tag_value(259), Some(5));

    // The exported strip is the original label strip
    let strip_offset = ifd.get_tag_value(273).unwrap() as usize;
    let strip_len = ifd.get_tag_value(279).unwrap() as usize;
    assert_eq!(strip_len, fixture.label_strip_len as usize);
    assert!(label_tiff[strip_offset..strip_offset + strip_len]
        .iter()
        .all(|&byte| byte == LABEL_FILL));

    fs::remove_file(slide_path).unwrap();
}
