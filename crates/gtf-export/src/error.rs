//! Export errors

/// Export error
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Raster has {actual} bytes, expected {expected}")]
    RasterSize { expected: usize, actual: usize },

    #[error("Sprite sheet of {columns} columns by {rows} rows is too large")]
    SheetTooLarge { columns: usize, rows: usize },

    #[error("Archive entry name too long: {0}")]
    EntryName(String),

    #[error("Animation has no frames")]
    EmptyAnimation,
}

pub type Result<T> = std::result::Result<T, ExportError>;
