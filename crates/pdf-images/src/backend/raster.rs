//! Pixel decoding and off-screen surfaces backed by the `image` crate

use crate::constants::MAX_SURFACE_PIXELS;
use crate::data_url;
use crate::services::{PixelDecoder, PixelDimensions, SurfaceProvider};
use crate::types::*;
use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage};
use std::io::Cursor;

/// A fully decoded image
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub pixels: DynamicImage,
}

impl PixelDimensions for DecodedImage {
    fn pixel_size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// Decodes any format the `image` crate understands.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateDecoder;

impl PixelDecoder for ImageCrateDecoder {
    type Image = DecodedImage;

    async fn decode(&self, data_url: &str) -> Result<DecodedImage> {
        let (_, bytes) = data_url::decode(data_url)?;

        // Decoding is CPU-bound, spawn blocking
        let pixels = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
            .await?
            .map_err(|e| ConvertError::Decode(e.to_string()))?;

        Ok(DecodedImage { pixels })
    }
}

/// RGBA surfaces with an upper bound on their pixel count
#[derive(Debug, Clone, Copy)]
pub struct RgbaSurfaces {
    pub max_pixels: u64,
}

impl Default for RgbaSurfaces {
    fn default() -> Self {
        Self {
            max_pixels: MAX_SURFACE_PIXELS,
        }
    }
}

impl SurfaceProvider<DecodedImage> for RgbaSurfaces {
    type Surface = RgbaImage;

    fn create_surface(&self, width: u32, height: u32) -> Option<RgbaImage> {
        let pixels = u64::from(width) * u64::from(height);
        if pixels == 0 || pixels > self.max_pixels {
            return None;
        }
        Some(RgbaImage::new(width, height))
    }

    fn draw_into(&self, surface: &mut RgbaImage, image: &DecodedImage) {
        image::imageops::overlay(surface, &image.pixels.to_rgba8(), 0, 0);
    }

    fn surface_to_png(&self, surface: RgbaImage) -> Result<String> {
        let mut bytes = Vec::new();
        surface.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(data_url::encode(ImageKind::Png.mime(), &bytes))
    }
}
