//! Catalog assembly
//!
//! This module orchestrates one build:
//! 1. Decode the uploaded images, dropping unreadable ones with a warning
//! 2. Fan out text extraction across a bounded worker pool
//! 3. Join every task in upload order (a full barrier before rendering)
//! 4. Compose one page per artwork, sequentially, and finalize the bytes
//!
//! Extraction concurrency is an optimization for the interactive surface;
//! page order is always upload order because results are joined in spawn
//! order, never completion order.

use std::sync::Arc;

use catalog_extract::{ExtractError, TextExtractor};
use image::DynamicImage;
use printpdf::{PdfDocument, PdfSaveOptions};
use tokio::sync::Semaphore;

use crate::compose::{compose_page, place_logo};
use crate::constants::{MAX_BATCH_SIZE, MAX_EXTRACTION_WORKERS};
use crate::logo::{Logo, resolve_logo};
use crate::settings::CatalogSettings;
use crate::types::*;

/// Build a catalog and finalize it into PDF bytes.
pub async fn build_catalog(
    sources: Vec<ArtworkSource>,
    settings: &CatalogSettings,
    extractor: Arc<dyn TextExtractor>,
) -> Result<BuildOutput> {
    let (doc, summary) = assemble_catalog(sources, settings, extractor).await?;

    // Serialization is CPU-bound, spawn blocking
    let bytes = tokio::task::spawn_blocking(move || {
        let mut doc = doc;
        let mut save_warnings = Vec::new();
        doc.save(&PdfSaveOptions::default(), &mut save_warnings)
    })
    .await?;

    Ok(BuildOutput { bytes, summary })
}

/// Build a catalog, returning the open document for inspection.
pub async fn assemble_catalog(
    sources: Vec<ArtworkSource>,
    settings: &CatalogSettings,
    extractor: Arc<dyn TextExtractor>,
) -> Result<(PdfDocument, BuildSummary)> {
    settings.validate()?;

    if sources.is_empty() {
        return Err(CatalogError::NoImages);
    }
    if sources.len() > MAX_BATCH_SIZE {
        return Err(CatalogError::Config(format!(
            "Batch of {} images exceeds the limit of {}",
            sources.len(),
            MAX_BATCH_SIZE
        )));
    }

    let source_count = sources.len();
    let mut warnings = Vec::new();

    let decoded = decode_sources(sources, &mut warnings);
    let skipped = source_count - decoded.len();

    let items = extract_all(decoded, extractor, &mut warnings).await?;

    let logo = resolve_logo(&settings.logo, &mut warnings).await;

    let doc = compose_catalog(&items, logo.as_ref(), settings, &mut warnings);
    let pages = doc.pages.len();

    Ok((
        doc,
        BuildSummary {
            source_count,
            pages,
            skipped,
            warnings,
        },
    ))
}

/// Decode every source; corrupt ones are dropped with a warning, not fatal.
fn decode_sources(
    sources: Vec<ArtworkSource>,
    warnings: &mut Vec<BuildWarning>,
) -> Vec<(ArtworkItem, DynamicImage)> {
    let mut decoded = Vec::with_capacity(sources.len());

    for (order_index, source) in sources.into_iter().enumerate() {
        match image::load_from_memory(&source.bytes) {
            Ok(bitmap) => {
                let item = ArtworkItem {
                    name: source.name,
                    width_px: bitmap.width(),
                    height_px: bitmap.height(),
                    bytes: source.bytes,
                    text: String::new(),
                    order_index,
                };
                decoded.push((item, bitmap));
            }
            Err(err) => {
                log::warn!("skipping unreadable image '{}': {}", source.name, err);
                warnings.push(BuildWarning::UnreadableImage {
                    name: source.name,
                    detail: err.to_string(),
                });
            }
        }
    }

    decoded
}

/// Run extraction for every item on a bounded pool, then join in spawn
/// order. A failed extraction degrades to empty text for that item.
async fn extract_all(
    decoded: Vec<(ArtworkItem, DynamicImage)>,
    extractor: Arc<dyn TextExtractor>,
    warnings: &mut Vec<BuildWarning>,
) -> Result<Vec<ArtworkItem>> {
    let workers = decoded.len().clamp(1, MAX_EXTRACTION_WORKERS);
    let semaphore = Arc::new(Semaphore::new(workers));

    let mut pending = Vec::with_capacity(decoded.len());
    for (item, bitmap) in decoded {
        let extractor = Arc::clone(&extractor);
        let semaphore = Arc::clone(&semaphore);
        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            match tokio::task::spawn_blocking(move || extractor.extract(&bitmap)).await {
                Ok(result) => result,
                Err(err) => Err(ExtractError::Worker(err.to_string())),
            }
        });
        pending.push((item, handle));
    }

    let mut items = Vec::with_capacity(pending.len());
    for (mut item, handle) in pending {
        match handle.await? {
            Ok(text) => item.text = text,
            Err(err) => {
                log::warn!("extraction failed for '{}': {}", item.name, err);
                warnings.push(BuildWarning::ExtractionFailed {
                    name: item.name.clone(),
                    detail: err.to_string(),
                });
            }
        }
        items.push(item);
    }

    Ok(items)
}

/// Compose one page per item into a fresh document, in ascending
/// order_index. Single-threaded: the document is the one mutable resource
/// of a build.
pub fn compose_catalog(
    items: &[ArtworkItem],
    logo: Option<&Logo>,
    settings: &CatalogSettings,
    warnings: &mut Vec<BuildWarning>,
) -> PdfDocument {
    let mut doc = PdfDocument::new("Artwork Catalog");

    let placed = logo.and_then(|logo| place_logo(&mut doc, logo, warnings));

    for item in items {
        let page = compose_page(&mut doc, item, placed.as_ref(), settings, warnings);
        doc.pages.push(page);
    }

    doc
}
