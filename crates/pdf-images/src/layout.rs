//! Image placement on a page
//!
//! Maps an image's pixel size onto a page's physical size, keeping a fixed
//! margin on every side. All values are in millimeters with the origin at the
//! top-left corner of the page.

use crate::constants::{PAGE_MARGIN_MM, PIXEL_TO_MM};
use crate::types::FitMode;

/// Placement rectangle of one image on one page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
}

impl PageGeometry {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Calculate where an image goes on a page.
///
/// Pixel dimensions must be non-zero; the page must be larger than twice the
/// margin on both axes.
///
/// # Arguments
/// * `image_width` - Image width in pixels
/// * `image_height` - Image height in pixels
/// * `page_width` - Page width in millimeters
/// * `page_height` - Page height in millimeters
/// * `fit_mode` - How to size the image
pub fn compute_layout(
    image_width: f32,
    image_height: f32,
    page_width: f32,
    page_height: f32,
    fit_mode: FitMode,
) -> PageGeometry {
    let available_width = page_width - 2.0 * PAGE_MARGIN_MM;
    let available_height = page_height - 2.0 * PAGE_MARGIN_MM;

    match fit_mode {
        FitMode::Fit => {
            let scale = (available_width / image_width).min(available_height / image_height);
            centered(image_width * scale, image_height * scale, page_width, page_height)
        }
        FitMode::Fill => PageGeometry {
            width: available_width,
            height: available_height,
            x: PAGE_MARGIN_MM,
            y: PAGE_MARGIN_MM,
        },
        FitMode::Original => {
            // Axes clamp independently, so extreme images may change aspect
            let width = (image_width * PIXEL_TO_MM).min(available_width);
            let height = (image_height * PIXEL_TO_MM).min(available_height);
            centered(width, height, page_width, page_height)
        }
    }
}

fn centered(width: f32, height: f32, page_width: f32, page_height: f32) -> PageGeometry {
    PageGeometry {
        width,
        height,
        x: (page_width - width) / 2.0,
        y: (page_height - height) / 2.0,
    }
}
