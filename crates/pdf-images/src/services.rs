//! Capabilities the conversion pipeline depends on
//!
//! Each external collaborator (file reading, image decoding, off-screen
//! drawing, document assembly) is a small trait so the pipeline can run
//! against the real backends in [`crate::backend`] or against fakes in tests.
//! Encoded images travel between services as base64 `data:` URLs.

use crate::asset::ImageAsset;
use crate::layout::PageGeometry;
use crate::types::{ImageKind, PageSetup, Result};

/// Turns an asset into an encoded `data:` URL.
#[allow(async_fn_in_trait)]
pub trait FileReader {
    async fn read_as_data_url(&self, asset: &ImageAsset) -> Result<String>;
}

/// Anything that knows its pixel size
pub trait PixelDimensions {
    fn pixel_size(&self) -> (u32, u32);
}

/// Decodes an encoded image into pixels.
#[allow(async_fn_in_trait)]
pub trait PixelDecoder {
    type Image: PixelDimensions;

    async fn decode(&self, data_url: &str) -> Result<Self::Image>;
}

/// Off-screen raster surfaces that decoded images of type `I` can be drawn into.
pub trait SurfaceProvider<I> {
    type Surface;

    /// Returns `None` when no surface of this size can be obtained.
    fn create_surface(&self, width: u32, height: u32) -> Option<Self::Surface>;

    fn draw_into(&self, surface: &mut Self::Surface, image: &I);

    /// Encode the surface as a PNG `data:` URL.
    fn surface_to_png(&self, surface: Self::Surface) -> Result<String>;
}

/// Creates output documents.
pub trait DocumentFactory {
    type Document: DocumentBuilder;

    /// Whether the document backend can be used at all
    fn is_available(&self) -> bool {
        true
    }

    /// Create a document holding one empty page.
    fn create_document(&self, setup: PageSetup) -> Result<Self::Document>;
}

/// A document being assembled page by page.
pub trait DocumentBuilder {
    /// Append an empty page with the document's page setup and make it current.
    fn add_page(&mut self) -> Result<()>;

    /// Size of the current page in millimeters (width, height)
    fn current_page_size(&self) -> (f32, f32);

    /// Place an encoded image on the current page.
    fn add_image(&mut self, data_url: &str, kind: ImageKind, geometry: &PageGeometry)
    -> Result<()>;

    fn page_count(&self) -> usize;

    /// Finish the document and return its bytes.
    fn serialize(self) -> Result<Vec<u8>>;
}
