//! Palette Resolver
//!
//! Maps palette indices to RGBA. The transparent index wins over the
//! table; indices past the end of the table resolve to transparent black
//! and are reported once per distinct index. A transparent index outside
//! the table is reported only when some pixel uses it.

use std::collections::BTreeMap;

use crate::color::ColorTable;
use crate::error::FrameIssue;

/// RGBA raster plus the fallbacks applied while producing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub rgba: Vec<u8>,
    pub issues: Vec<FrameIssue>,
}

/// Resolve `indices` against `table`
pub fn resolve(indices: &[u8], table: &ColorTable, transparent_index: Option<u8>) -> Resolved {
    let mut rgba = Vec::with_capacity(indices.len() * 4);
    let mut out_of_range: BTreeMap<u8, usize> = BTreeMap::new();
    let mut transparent_used = false;

    for &index in indices {
        if transparent_index == Some(index) {
            transparent_used = true;
            rgba.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }

        match table.get(index) {
            Some(color) => rgba.extend_from_slice(&color.to_array()),
            None => {
                *out_of_range.entry(index).or_default() += 1;
                rgba.extend_from_slice(&[0, 0, 0, 0]);
            }
        }
    }

    let mut issues = Vec::new();
    if let Some(index) = transparent_index.filter(|&i| transparent_used && table.get(i).is_none()) {
        issues.push(FrameIssue::TransparentIndexOutOfRange {
            index,
            table_len: table.len(),
        });
    }
    issues.extend(out_of_range.into_iter().map(|(index, count)| {
        FrameIssue::PaletteIndexOutOfRange {
            index,
            table_len: table.len(),
            count,
        }
    }));

    Resolved { rgba, issues }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::test_utils::rgbw;

    #[test]
    fn test_resolve_opaque() {
        let table = ColorTable::from_colors(rgbw());
        let out = resolve(&[0, 3, 2], &table, None);
        assert_eq!(out.rgba, vec![255, 0, 0, 255, 255, 255, 255, 255, 0, 0, 255, 255]);
        assert!(out.issues.is_empty());
    }

    #[test]
    fn test_transparent_index_ignores_palette() {
        let table = ColorTable::from_colors(rgbw());
        let out = resolve(&[1, 3, 1], &table, Some(3));
        assert_eq!(&out.rgba[4..8], &[0, 0, 0, 0]);
        assert_eq!(&out.rgba[0..4], &[0, 255, 0, 255]);
        assert!(out.issues.is_empty());
    }

    #[test]
    fn test_out_of_range_defaults_to_transparent() {
        let table = ColorTable::from_colors(vec![Color::WHITE, Color::BLACK]);
        let out = resolve(&[0, 7, 7, 5], &table, None);
        assert_eq!(&out.rgba[4..16], &[0; 12]);
        assert_eq!(
            out.issues,
            vec![
                FrameIssue::PaletteIndexOutOfRange { index: 5, table_len: 2, count: 1 },
                FrameIssue::PaletteIndexOutOfRange { index: 7, table_len: 2, count: 2 },
            ]
        );
    }

    #[test]
    fn test_out_of_range_transparent_index() {
        let table = ColorTable::from_colors(vec![Color::WHITE, Color::BLACK]);
        let out = resolve(&[9, 1], &table, Some(9));
        assert_eq!(&out.rgba[0..4], &[0, 0, 0, 0]);
        assert_eq!(
            out.issues,
            vec![FrameIssue::TransparentIndexOutOfRange { index: 9, table_len: 2 }]
        );
    }

    #[test]
    fn test_unused_out_of_range_transparent_index_is_silent() {
        let table = ColorTable::from_colors(vec![Color::WHITE, Color::BLACK]);
        let out = resolve(&[0, 1, 1], &table, Some(9));
        assert_eq!(&out.rgba[0..4], &[255, 255, 255, 255]);
        assert!(out.issues.is_empty());
    }
}
