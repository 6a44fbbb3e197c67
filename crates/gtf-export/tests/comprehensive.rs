//! Comprehensive tests for gtf-export
//!
//! Decodes a small animation and checks every exported file.

use gtf_export::*;
use gtf_gif::{compose, decode, Color};

/// 2x1 screen, red/green/blue/white palette, NETSCAPE loop 3 and two
/// frames: red+green (80 ms, disposal 1) then blue over column 1 (40 ms)
fn animation() -> Vec<u8> {
    let mut data = b"GIF89a".to_vec();
    data.extend_from_slice(&[2, 0, 1, 0, 0xF1, 0, 0]);
    data.extend_from_slice(&[0xFF, 0, 0, 0, 0xFF, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
    data.extend_from_slice(&[0x21, 0xFF, 0x0B]);
    data.extend_from_slice(b"NETSCAPE2.0");
    data.extend_from_slice(&[0x03, 0x01, 0x03, 0x00, 0x00]);
    data.extend_from_slice(&[0x21, 0xF9, 4, 0x04, 8, 0, 0, 0]);
    data.extend_from_slice(&[0x2C, 0, 0, 0, 0, 2, 0, 1, 0, 0, 2, 2, 0x44, 0x0A, 0]);
    data.extend_from_slice(&[0x21, 0xF9, 4, 0x04, 4, 0, 0, 0]);
    data.extend_from_slice(&[0x2C, 1, 0, 0, 0, 1, 0, 1, 0, 0, 2, 2, 0x54, 0x01, 0]);
    data.push(0x3B);
    data
}

fn read_png(data: &[u8]) -> (u32, u32, Vec<u8>) {
    let mut reader = png::Decoder::new(data).read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());
    (info.width, info.height, buf)
}

// ============================================================================
// BUNDLE
// ============================================================================

#[test]
fn test_bundle_from_decoded_gif() {
    let doc = decode(&animation()).unwrap();
    let frames = compose(&doc);
    let options = ExportOptions { mtime: Some(1_000), ..Default::default() };
    let bundle = ExportBundle::build(&doc, &frames, "dots", &options).unwrap();

    let (w, h, first) = read_png(&bundle.get("dots-frame-001.png").unwrap().data);
    assert_eq!((w, h), (2, 1));
    assert_eq!(first, vec![255, 0, 0, 255, 0, 255, 0, 255]);

    let (_, _, second) = read_png(&bundle.get("dots-frame-002.png").unwrap().data);
    assert_eq!(second, vec![255, 0, 0, 255, 0, 0, 255, 255]);

    let (w, h, sheet) = read_png(&bundle.get("dots-spritesheet.png").unwrap().data);
    assert_eq!((w, h), (4, 1));
    assert_eq!(&sheet[8..16], &second[..]);
}

#[test]
fn test_metadata_document() {
    let doc = decode(&animation()).unwrap();
    let frames = compose(&doc);
    let metadata = build_metadata(&doc, &frames, None);

    assert_eq!(metadata.total_duration, 120);
    let json: serde_json::Value = serde_json::from_str(&metadata.to_json().unwrap()).unwrap();
    assert_eq!(json["loopCount"], 3);
    assert_eq!(json["frames"][1]["bounds"]["left"], 1);
    assert_eq!(json["frames"][1]["disposalMethod"], 1);
}

#[test]
fn test_css_timing_follows_delays() {
    let doc = decode(&animation()).unwrap();
    let frames = compose(&doc);
    let sheet = build_sprite_sheet(&frames, &SpriteOptions::default()).unwrap().unwrap();
    let css = build_animation_css("dots", &sheet.metadata);

    assert!(css.contains("animation: dots-animation 0.12s steps(2) infinite;"));
    assert!(css.contains("  0.00%, 66.67% { background-position: -0px -0px; }"));
    assert!(css.contains("  66.67%, 100.00% { background-position: -2px -0px; }"));
}

// ============================================================================
// SPRITE OPTIONS
// ============================================================================

#[test]
fn test_vertical_sheet_with_solid_background() {
    let doc = decode(&animation()).unwrap();
    let frames = compose(&doc);
    let options = SpriteOptions {
        columns: Some(1),
        spacing: 2,
        background: SpriteBackground::Solid(Color::rgb(1, 2, 3)),
    };
    let sheet = build_sprite_sheet(&frames, &options).unwrap().unwrap();

    assert_eq!((sheet.width, sheet.height), (2, 4));
    assert_eq!(sheet.metadata.frames[1].y, 3);
    // Gap rows carry the background
    assert_eq!(&sheet.rgba[8..12], &[1, 2, 3, 255]);
    assert_eq!(sheet.metadata.background, "#010203");
}

// ============================================================================
// ARCHIVE
// ============================================================================

#[test]
fn test_archive_is_deterministic_with_fixed_mtime() {
    let build = || {
        let mut tar = TarBuilder::with_mtime(42);
        tar.append("one.txt", b"1").unwrap();
        tar.append("two.txt", b"22").unwrap();
        tar.finish()
    };
    assert_eq!(build(), build());
    assert_eq!(build().len(), 6 * 512);
}

#[test]
fn test_png_size_mismatch() {
    assert!(matches!(
        encode_png(&[0; 7], 1, 2),
        Err(ExportError::RasterSize { expected: 8, actual: 7 })
    ));
}
