//! Scanline De-interlacer

/// Interlace passes as (first row, row step), in storage order
pub const PASSES: [(usize, usize); 4] = [(0, 8), (4, 8), (2, 4), (1, 2)];

/// Reorder rows stored in 4-pass interlaced order into top-to-bottom order.
///
/// `row_len` is the length of one row in elements (pixels for an index
/// buffer, bytes for an RGBA raster). The output always holds
/// `row_len * height` elements; rows missing from a short input are left
/// zeroed.
pub fn deinterlace(data: &[u8], row_len: usize, height: usize) -> Vec<u8> {
    let mut out = vec![0u8; row_len * height];
    if row_len == 0 {
        return out;
    }

    let mut rows = data.chunks(row_len);
    for (start, step) in PASSES {
        for dest_row in (start..height).step_by(step) {
            let Some(src) = rows.next() else {
                return out;
            };
            let offset = dest_row * row_len;
            out[offset..offset + src.len()].copy_from_slice(src);
        }
    }
    out
}
