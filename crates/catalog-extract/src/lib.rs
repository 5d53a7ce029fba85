//! Text extraction for artwork images
//!
//! Wraps an external OCR engine behind the [`TextExtractor`] trait. The
//! catalog builder treats the engine as a black box: one decoded image in,
//! plain text out. A failed extraction is an error the caller downgrades to
//! empty text; it never aborts a batch.

mod tesseract;

pub use tesseract::{TesseractConfig, TesseractExtractor, detect_version};

use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),
    #[error("OCR engine failed: {0}")]
    Engine(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Extraction worker failed: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;

/// One decoded image in, extracted UTF-8 text out.
///
/// Implementations must be shareable across the builder's worker tasks.
/// Invocations are independent and order-insensitive.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, image: &DynamicImage) -> Result<String>;
}
