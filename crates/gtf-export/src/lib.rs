//! giftoframes Export
//!
//! Consumers of composited frames.
//!
//! Features:
//! - Sprite sheet packing with CSS keyframe timing
//! - Metadata JSON
//! - PNG frame encoding
//! - ustar archives

pub mod bundle;
pub mod css;
pub mod error;
pub mod metadata;
pub mod raster;
pub mod sprite;
pub mod tar;

pub use bundle::{frame_file_name, ExportBundle, ExportFile, ExportOptions};
pub use css::build_animation_css;
pub use error::{ExportError, Result};
pub use metadata::{build_metadata, FrameBounds, FrameEntry, Metadata};
pub use raster::encode_png;
pub use sprite::{build_sprite_sheet, SpriteBackground, SpriteFrame, SpriteMetadata, SpriteOptions, SpriteSheet};
pub use tar::TarBuilder;
