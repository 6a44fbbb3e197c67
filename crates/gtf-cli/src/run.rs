//! Conversion driver: read, decode, composite, export, write

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use gtf_export::{ExportBundle, ExportOptions};
use gtf_gif::{compose, DecodeOptions, Decoder};

use crate::config::Config;
use crate::summary::Summary;

/// Outcome of one conversion
#[derive(Debug, Clone)]
pub struct Report {
    pub summary: Summary,
    pub written: Vec<PathBuf>,
}

impl Config {
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            strict: self.strict,
            ..Default::default()
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            sprite: self.sprite.clone(),
            sprite_sheet: !self.no_sprite,
            archive: !self.no_archive,
            metadata: !self.no_metadata,
            mtime: None,
        }
    }
}

/// Convert `config.input` and write every export file into `config.output_dir`
pub fn run(config: &Config) -> anyhow::Result<Report> {
    let bytes = fs::read(&config.input)
        .with_context(|| format!("Failed to read {}", config.input.display()))?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), config.input.display());

    let doc = Decoder::new(config.decode_options())
        .decode(&bytes)
        .with_context(|| format!("Failed to decode {}", config.input.display()))?;

    let source = config.input.file_name().map(|n| n.to_string_lossy().into_owned());
    let summary = Summary::new(&doc, source);

    if doc.frames.is_empty() {
        tracing::warn!("{} contains no frames, nothing to export", config.input.display());
        return Ok(Report { summary, written: Vec::new() });
    }

    let frames = compose(&doc);
    let bundle = ExportBundle::build(&doc, &frames, &config.base_name, &config.export_options())
        .context("Failed to build export files")?;

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;

    let mut written = Vec::with_capacity(bundle.files.len());
    for file in &bundle.files {
        let path = config.output_dir.join(&file.name);
        fs::write(&path, &file.data).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("Wrote {} ({} bytes)", path.display(), file.data.len());
        written.push(path);
    }

    tracing::info!("Wrote {} files to {}", written.len(), config.output_dir.display());
    Ok(Report { summary, written })
}
