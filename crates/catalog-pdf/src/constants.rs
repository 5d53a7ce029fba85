//! Shared constants for catalog composition
//!
//! This module centralizes magic numbers used throughout page geometry
//! and text layout.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Page Geometry
// =============================================================================

/// Left/right page margin; also the logo's offset from the page edges (mm)
pub const PAGE_MARGIN_MM: f32 = 10.0;

/// Bottom margin no text line may cross (mm)
pub const BOTTOM_MARGIN_MM: f32 = 15.0;

/// Top of the content area when no logo occupies the top band (mm)
pub const TOP_MARGIN_NO_LOGO_MM: f32 = 20.0;

/// Gap between a top-anchored logo and the content below it (mm)
pub const LOGO_CONTENT_GAP_MM: f32 = 2.0;

/// Gap between the artwork image and the text block (mm)
pub const ARTWORK_TEXT_GAP_MM: f32 = 4.0;

// =============================================================================
// Artwork Scaling
// =============================================================================

/// Hard cap on the rendered artwork width (mm)
pub const ARTWORK_MAX_WIDTH_MM: f32 = 120.0;

/// Fraction of the printable width the artwork may occupy
pub const ARTWORK_WIDTH_FRACTION: f32 = 0.8;

/// Fraction of the page height the artwork may occupy
pub const ARTWORK_MAX_HEIGHT_FRACTION: f32 = 0.5;

// =============================================================================
// Text Layout
// =============================================================================

/// Line height as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.5;

/// Baseline offset from the line top, as a fraction of the font size
pub const BASELINE_FACTOR: f32 = 0.8;

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Approximate character width ratio for Times Roman
pub const TIMES_CHAR_WIDTH_RATIO: f32 = 0.48;

/// Character width ratio for Courier (monospaced)
pub const COURIER_CHAR_WIDTH_RATIO: f32 = 0.6;

// =============================================================================
// Builder Limits
// =============================================================================

/// Upper bound on one batch, to keep memory in check
pub const MAX_BATCH_SIZE: usize = 256;

/// Upper bound on concurrent extraction workers
pub const MAX_EXTRACTION_WORKERS: usize = 8;

/// Upper bound accepted for the configured logo width (mm)
pub const MAX_LOGO_WIDTH_MM: f32 = 200.0;

/// Accepted font size range (points)
pub const MIN_FONT_SIZE_PT: f32 = 6.0;
pub const MAX_FONT_SIZE_PT: f32 = 72.0;
