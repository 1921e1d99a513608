//! Batch driver: requests in, one JPEG per derivable profile out.
//!
//! Recoverable faults (an identifier missing from the dataset) are logged
//! and skipped; everything else aborts the batch with context.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::dataset::Dataset;
use crate::foundation::error::NutrigraphResult;
use crate::profile::NutrientProfile;
use crate::render::Renderer;
use crate::request::parse_requests;
use crate::theme::Theme;

/// JPEG quality for the final encode.
pub const JPEG_QUALITY: u8 = 95;

pub struct BatchOptions {
    /// Serving-request list (three-line groups).
    pub requests: PathBuf,
    /// Comma-delimited nutrient sheet.
    pub dataset: PathBuf,
    /// Directory receiving one image per profile; must already exist.
    pub out_dir: PathBuf,
    /// Font file used for every caption.
    pub font: PathBuf,
    pub theme: Theme,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub requested: usize,
    pub written: usize,
    pub skipped: usize,
}

#[tracing::instrument(skip_all)]
pub fn run_batch(options: &BatchOptions) -> NutrigraphResult<BatchSummary> {
    let source = std::fs::read_to_string(&options.requests)
        .with_context(|| format!("read request list '{}'", options.requests.display()))?;
    let requests = parse_requests(&source)?;
    tracing::info!(count = requests.len(), "parsed serving requests");

    let dataset = Dataset::from_path(&options.dataset)?;
    tracing::debug!(records = dataset.len(), "loaded nutrient dataset");

    let font_bytes = std::fs::read(&options.font)
        .with_context(|| format!("read font '{}'", options.font.display()))?;
    let mut renderer = Renderer::new(options.theme.clone(), font_bytes)?;

    let mut summary = BatchSummary {
        requested: requests.len(),
        ..BatchSummary::default()
    };

    for request in &requests {
        let Some(record) = dataset.lookup(request.identifier) else {
            tracing::warn!(
                identifier = request.identifier,
                "identifier not found in the dataset; skipping"
            );
            summary.skipped += 1;
            continue;
        };

        let profile =
            NutrientProfile::derive(&record, request.serving_grams, &request.description)?;
        let image = renderer.render_profile(&profile)?;

        let path = options
            .out_dir
            .join(output_filename(&profile.name, profile.identifier));
        write_jpeg(image, &path)?;
        tracing::info!("wrote {}", path.display());
        summary.written += 1;
    }

    Ok(summary)
}

/// Deterministic output name. The identifier keeps two foods that share a
/// display name from overwriting each other.
pub fn output_filename(name: &str, identifier: i64) -> String {
    format!(
        "{}_{identifier}_nutrition.jpg",
        name.replace([' ', '/'], "_")
    )
}

fn write_jpeg(image: image::RgbaImage, path: &Path) -> NutrigraphResult<()> {
    let file =
        File::create(path).with_context(|| format!("create output '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);

    // JPEG carries no alpha; the canvas is opaque so the drop is lossless.
    let rgb = image::DynamicImage::ImageRgba8(image).to_rgb8();
    encoder
        .encode_image(&rgb)
        .with_context(|| format!("encode jpeg '{}'", path.display()))?;
    Ok(())
}
