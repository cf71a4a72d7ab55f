//! Default service implementations
//!
//! - [`AssetReader`]: files via `tokio::fs`, or in-memory bytes
//! - [`ImageCrateDecoder`] and [`RgbaSurfaces`]: pixel work with the `image` crate
//! - [`PdfDocumentFactory`]: PDF assembly with `lopdf`

mod pdf;
mod raster;
mod reader;

pub use pdf::{PdfDocumentBuilder, PdfDocumentFactory, page_format_pt};
pub use raster::{DecodedImage, ImageCrateDecoder, RgbaSurfaces};
pub use reader::AssetReader;

use crate::controller::SessionController;
use crate::pipeline::Converter;

/// Converter wired to the default backends
pub type DefaultConverter =
    Converter<AssetReader, ImageCrateDecoder, RgbaSurfaces, PdfDocumentFactory>;

/// Session controller wired to the default backends
pub type DefaultController =
    SessionController<AssetReader, ImageCrateDecoder, RgbaSurfaces, PdfDocumentFactory>;

/// Build a converter using the default backends.
pub fn default_converter() -> DefaultConverter {
    Converter::new(
        AssetReader,
        ImageCrateDecoder,
        RgbaSurfaces::default(),
        PdfDocumentFactory,
    )
}
