//! Fake services for pipeline and session tests.
//!
//! Fake images carry their pixel size as their payload (`"800x600"`), and fake
//! documents serialize to one text line per page.

#![allow(dead_code)]

use pdf_images::backend::AssetReader;
use pdf_images::*;

pub fn asset(name: &str, mime: &str, width: u32, height: u32) -> ImageAsset {
    ImageAsset::from_bytes(name, mime, format!("{width}x{height}").into_bytes())
}

pub fn png(name: &str, width: u32, height: u32) -> ImageAsset {
    asset(name, "image/png", width, height)
}

pub fn jpeg(name: &str, width: u32, height: u32) -> ImageAsset {
    asset(name, "image/jpeg", width, height)
}

pub fn webp(name: &str, width: u32, height: u32) -> ImageAsset {
    asset(name, "image/webp", width, height)
}

/// An asset whose payload the fake decoder rejects
pub fn corrupt(name: &str, mime: &str) -> ImageAsset {
    ImageAsset::from_bytes(name, mime, b"garbage".to_vec())
}

#[derive(Default)]
pub struct FakeReader {
    pub fail_on: Option<String>,
}

impl FileReader for FakeReader {
    async fn read_as_data_url(&self, asset: &ImageAsset) -> Result<String> {
        if self.fail_on.as_deref() == Some(asset.name()) {
            return Err(ConvertError::Read {
                name: asset.name().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            });
        }
        AssetReader.read_as_data_url(asset).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeImage {
    pub width: u32,
    pub height: u32,
}

impl PixelDimensions for FakeImage {
    fn pixel_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

pub struct FakeDecoder;

impl PixelDecoder for FakeDecoder {
    type Image = FakeImage;

    async fn decode(&self, data_url: &str) -> Result<FakeImage> {
        let (_, bytes) = data_url::decode(data_url)?;
        let text = String::from_utf8_lossy(&bytes);
        let (w, h) = text
            .split_once('x')
            .ok_or_else(|| ConvertError::Decode(format!("not an image: {text}")))?;
        let width = w
            .parse()
            .map_err(|_| ConvertError::Decode(format!("bad width: {w}")))?;
        let height = h
            .parse()
            .map_err(|_| ConvertError::Decode(format!("bad height: {h}")))?;
        Ok(FakeImage { width, height })
    }
}

#[derive(Default)]
pub struct FakeSurfaces {
    pub unavailable: bool,
}

impl SurfaceProvider<FakeImage> for FakeSurfaces {
    type Surface = FakeImage;

    fn create_surface(&self, width: u32, height: u32) -> Option<FakeImage> {
        if self.unavailable {
            None
        } else {
            Some(FakeImage { width, height })
        }
    }

    fn draw_into(&self, surface: &mut FakeImage, image: &FakeImage) {
        assert_eq!(surface.pixel_size(), image.pixel_size());
    }

    fn surface_to_png(&self, surface: FakeImage) -> Result<String> {
        Ok(data_url::encode(
            "image/png",
            format!("{}x{}", surface.width, surface.height).as_bytes(),
        ))
    }
}

pub struct FakeDocuments {
    pub available: bool,
    /// Page size reported by created documents, in millimeters
    pub page_size: (f32, f32),
}

impl Default for FakeDocuments {
    fn default() -> Self {
        Self {
            available: true,
            page_size: (210.0, 297.0),
        }
    }
}

impl DocumentFactory for FakeDocuments {
    type Document = FakeDocument;

    fn is_available(&self) -> bool {
        self.available
    }

    fn create_document(&self, setup: PageSetup) -> Result<FakeDocument> {
        Ok(FakeDocument {
            setup,
            page_size: self.page_size,
            pages: vec![Vec::new()],
            add_page_calls: 0,
        })
    }
}

pub struct FakeDocument {
    pub setup: PageSetup,
    pub page_size: (f32, f32),
    pub pages: Vec<Vec<(ImageKind, PageGeometry)>>,
    pub add_page_calls: usize,
}

impl DocumentBuilder for FakeDocument {
    fn add_page(&mut self) -> Result<()> {
        self.add_page_calls += 1;
        self.pages.push(Vec::new());
        Ok(())
    }

    fn current_page_size(&self) -> (f32, f32) {
        self.page_size
    }

    fn add_image(
        &mut self,
        data_url: &str,
        kind: ImageKind,
        geometry: &PageGeometry,
    ) -> Result<()> {
        let (mime, _) = data_url::decode(data_url)?;
        assert_eq!(mime, kind.mime(), "embedded data must match its kind");
        if let Some(page) = self.pages.last_mut() {
            page.push((kind, *geometry));
        }
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn serialize(self) -> Result<Vec<u8>> {
        let mut out = format!(
            "{:?} {:?} add_page_calls={}\n",
            self.setup.size, self.setup.orientation, self.add_page_calls
        );
        for page in &self.pages {
            let images: Vec<String> = page.iter().map(|(kind, _)| format!("{kind:?}")).collect();
            out.push_str(&format!("page {}\n", images.join(",")));
        }
        Ok(out.into_bytes())
    }
}

pub type FakeConverter = Converter<FakeReader, FakeDecoder, FakeSurfaces, FakeDocuments>;

pub fn fake_converter() -> FakeConverter {
    Converter::new(
        FakeReader::default(),
        FakeDecoder,
        FakeSurfaces::default(),
        FakeDocuments::default(),
    )
}

/// Lines of a serialized fake document describing pages
pub fn page_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .filter(|line| line.starts_with("page"))
        .map(str::to_string)
        .collect()
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
