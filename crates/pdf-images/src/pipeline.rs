//! Image to PDF conversion
//!
//! This module orchestrates the conversion process, one image at a time:
//! 1. Read the image into a `data:` URL
//! 2. Normalize WebP to PNG through an off-screen surface
//! 3. Decode to get pixel dimensions
//! 4. Create the document, or append a page for every later image
//! 5. Compute the placement and embed the image

use crate::asset::ImageAsset;
use crate::layout::{PageGeometry, compute_layout};
use crate::options::LayoutOptions;
use crate::services::*;
use crate::types::*;

/// One image placed on one output page
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPage {
    /// Name of the source asset
    pub source: String,
    /// Kind the image was embedded as (WebP becomes PNG)
    pub kind: ImageKind,
    /// Decoded pixel size
    pub pixel_size: (u32, u32),
    /// Page size in millimeters as reported by the document
    pub page_size: (f32, f32),
    pub geometry: PageGeometry,
}

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Serialized output document
    pub bytes: Vec<u8>,
    /// Pages in output order
    pub pages: Vec<PlacedPage>,
    /// Assets skipped because they could not be normalized
    pub skipped: Vec<String>,
}

impl Conversion {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Converts image assets into a single document using injected services.
pub struct Converter<R, D, S, F> {
    reader: R,
    decoder: D,
    surfaces: S,
    documents: F,
}

impl<R, D, S, F> Converter<R, D, S, F>
where
    R: FileReader,
    D: PixelDecoder,
    S: SurfaceProvider<D::Image>,
    F: DocumentFactory,
{
    pub fn new(reader: R, decoder: D, surfaces: S, documents: F) -> Self {
        Self {
            reader,
            decoder,
            surfaces,
            documents,
        }
    }

    /// Whether the document backend can be used
    pub fn is_available(&self) -> bool {
        self.documents.is_available()
    }

    /// Convert images into one document, one page per image, in input order.
    ///
    /// Read and decode failures abort the whole conversion. A WebP image
    /// whose surface cannot be created is skipped. If nothing could be
    /// placed the conversion fails with [`ConvertError::EmptyDocument`].
    pub async fn convert(
        &self,
        images: &[ImageAsset],
        options: &LayoutOptions,
    ) -> Result<Conversion> {
        if images.is_empty() {
            return Err(ConvertError::NoImages);
        }

        let mut document: Option<F::Document> = None;
        let mut pages = Vec::with_capacity(images.len());
        let mut skipped = Vec::new();

        for (index, asset) in images.iter().enumerate() {
            log::debug!(
                "Converting image {}/{}: {}",
                index + 1,
                images.len(),
                asset.name()
            );

            let encoded = self.reader.read_as_data_url(asset).await?;

            let Some((encoded, kind)) = self.normalize(asset, encoded).await? else {
                log::warn!(
                    "Skipping {}: no drawing surface available for conversion",
                    asset.name()
                );
                skipped.push(asset.name().to_string());
                continue;
            };

            let (width, height) = self.decode_size(asset, &encoded).await?;

            let mut doc = match document.take() {
                Some(mut doc) => {
                    doc.add_page()?;
                    doc
                }
                None => self.documents.create_document(options.page_setup())?,
            };

            let page_size = doc.current_page_size();
            let geometry = compute_layout(
                width as f32,
                height as f32,
                page_size.0,
                page_size.1,
                options.fit_mode,
            );
            doc.add_image(&encoded, kind, &geometry)?;
            document = Some(doc);

            pages.push(PlacedPage {
                source: asset.name().to_string(),
                kind,
                pixel_size: (width, height),
                page_size,
                geometry,
            });
        }

        let document = document.ok_or(ConvertError::EmptyDocument)?;
        log::info!(
            "Converted {} image(s) into {} page(s), {} skipped",
            images.len(),
            document.page_count(),
            skipped.len()
        );
        let bytes = document.serialize()?;

        Ok(Conversion {
            bytes,
            pages,
            skipped,
        })
    }

    /// Compute the placement every image would get, without building output.
    ///
    /// WebP images that could not get a drawing surface are left out, as
    /// [`Converter::convert`] would skip them.
    pub async fn plan(
        &self,
        images: &[ImageAsset],
        options: &LayoutOptions,
    ) -> Result<Vec<PlacedPage>> {
        if images.is_empty() {
            return Err(ConvertError::NoImages);
        }

        let probe = self.documents.create_document(options.page_setup())?;
        let page_size = probe.current_page_size();

        let mut pages = Vec::with_capacity(images.len());
        for asset in images {
            let encoded = self.reader.read_as_data_url(asset).await?;
            let (width, height) = self.decode_size(asset, &encoded).await?;
            let kind = match asset.kind() {
                ImageKind::Webp => {
                    if self.surfaces.create_surface(width, height).is_none() {
                        log::warn!("{} would be skipped: no drawing surface", asset.name());
                        continue;
                    }
                    ImageKind::Png
                }
                other => other,
            };
            pages.push(PlacedPage {
                source: asset.name().to_string(),
                kind,
                pixel_size: (width, height),
                page_size,
                geometry: compute_layout(
                    width as f32,
                    height as f32,
                    page_size.0,
                    page_size.1,
                    options.fit_mode,
                ),
            });
        }

        if pages.is_empty() {
            return Err(ConvertError::EmptyDocument);
        }
        Ok(pages)
    }

    /// Bring an encoded image into a kind the document can embed.
    ///
    /// Returns `None` when the image has to be skipped.
    async fn normalize(
        &self,
        asset: &ImageAsset,
        encoded: String,
    ) -> Result<Option<(String, ImageKind)>> {
        match asset.kind() {
            ImageKind::Png | ImageKind::Jpeg => Ok(Some((encoded, asset.kind()))),
            ImageKind::Webp => {
                let image = self.decoder.decode(&encoded).await?;
                let (width, height) = image.pixel_size();
                let Some(mut surface) = self.surfaces.create_surface(width, height) else {
                    return Ok(None);
                };
                self.surfaces.draw_into(&mut surface, &image);
                let png = self.surfaces.surface_to_png(surface)?;
                Ok(Some((png, ImageKind::Png)))
            }
            ImageKind::Unsupported => Err(ConvertError::Unsupported(asset.name().to_string())),
        }
    }

    async fn decode_size(&self, asset: &ImageAsset, encoded: &str) -> Result<(u32, u32)> {
        let image = self.decoder.decode(encoded).await?;
        let (width, height) = image.pixel_size();
        if width == 0 || height == 0 {
            return Err(ConvertError::Decode(format!(
                "{} has zero pixel dimensions",
                asset.name()
            )));
        }
        asset.record_dimensions(width, height);
        Ok((width, height))
    }
}
