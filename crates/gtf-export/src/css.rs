//! CSS timing description for a sprite sheet

use crate::sprite::SpriteMetadata;

/// CSS class plus `@keyframes` stepping through the sheet cells.
///
/// Each frame holds its cell from the end of the previous frame's delay to
/// the end of its own, as percentages of the total duration. A sheet whose
/// delays sum to zero runs for one second.
pub fn build_animation_css(base_name: &str, metadata: &SpriteMetadata) -> String {
    let total_ms = match metadata.total_delay_ms() {
        0 => 1000,
        ms => ms,
    };
    let duration_s = total_ms as f64 / 1000.0;
    let percent = |ms: u64| ms as f64 / total_ms as f64 * 100.0;

    let mut css = format!(".{} {{\n", base_name);
    css.push_str(&format!("  width: {}px;\n", metadata.frame_width));
    css.push_str(&format!("  height: {}px;\n", metadata.frame_height));
    css.push_str("  background-repeat: no-repeat;\n");
    css.push_str(&format!(
        "  animation: {}-animation {:.2}s steps({}) infinite;\n",
        base_name, duration_s, metadata.total_frames
    ));
    css.push_str("}\n\n");

    css.push_str(&format!("@keyframes {}-animation {{\n", base_name));
    let mut elapsed = 0u64;
    for frame in &metadata.frames {
        let start = percent(elapsed);
        elapsed += frame.delay as u64;
        let end = percent(elapsed);
        css.push_str(&format!(
            "  {:.2}%, {:.2}% {{ background-position: -{}px -{}px; }}\n",
            start, end, frame.x, frame.y
        ));
    }
    css.push_str("}\n");
    css
}
