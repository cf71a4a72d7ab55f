//! Constants used throughout the conversion pipeline
//!
//! This module centralizes magic numbers for layout and PDF output.

// =============================================================================
// Layout
// =============================================================================

/// Fixed inset from every page edge, in millimeters
pub const PAGE_MARGIN_MM: f32 = 10.0;

/// Size of one pixel at 72 dpi, in millimeters
pub const PIXEL_TO_MM: f32 = 0.352778;

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Millimeters per point
pub const MM_PER_PT: f32 = 25.4 / 72.0;

// =============================================================================
// Page Formats (points, portrait)
// =============================================================================

pub const A3_PT: (f32, f32) = (841.89, 1190.55);
pub const A4_PT: (f32, f32) = (595.28, 841.89);
pub const A5_PT: (f32, f32) = (419.53, 595.28);
pub const LETTER_PT: (f32, f32) = (612.0, 792.0);

// =============================================================================
// Raster Surfaces
// =============================================================================

/// Largest surface the default raster backend will allocate, in pixels
pub const MAX_SURFACE_PIXELS: u64 = 16_384 * 16_384;
