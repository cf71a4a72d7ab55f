//! PDF assembly with `lopdf`
//!
//! Pages are collected in memory and written out as a flat page tree when the
//! document is serialized. Images become Image XObjects:
//! - JPEG data is embedded as-is with `DCTDecode`
//! - PNG data is decoded and re-compressed with `FlateDecode`, alpha goes to an `SMask`

use crate::constants::{A3_PT, A4_PT, A5_PT, LETTER_PT, MM_PER_PT, PT_PER_MM};
use crate::data_url;
use crate::layout::PageGeometry;
use crate::services::{DocumentBuilder, DocumentFactory};
use crate::types::*;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::ImageFormat;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;

/// Page format in points, with orientation applied
pub fn page_format_pt(setup: PageSetup) -> (f32, f32) {
    let (w, h) = match setup.size {
        PageSize::A3 => A3_PT,
        PageSize::A4 => A4_PT,
        PageSize::A5 => A5_PT,
        PageSize::Letter => LETTER_PT,
    };
    match setup.orientation {
        Orientation::Portrait => (w, h),
        Orientation::Landscape => (h, w),
    }
}

/// Creates in-memory PDF documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfDocumentFactory;

impl DocumentFactory for PdfDocumentFactory {
    type Document = PdfDocumentBuilder;

    fn create_document(&self, setup: PageSetup) -> Result<PdfDocumentBuilder> {
        let (width_pt, height_pt) = page_format_pt(setup);
        Ok(PdfDocumentBuilder::new(width_pt, height_pt))
    }
}

/// Content collected for one output page
#[derive(Default)]
struct PendingPage {
    ops: String,
    xobjects: Dictionary,
}

pub struct PdfDocumentBuilder {
    doc: Document,
    pages_id: ObjectId,
    width_pt: f32,
    height_pt: f32,
    finished: Vec<PendingPage>,
    current: PendingPage,
    image_count: usize,
}

impl PdfDocumentBuilder {
    fn new(width_pt: f32, height_pt: f32) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            width_pt,
            height_pt,
            finished: Vec::new(),
            current: PendingPage::default(),
            image_count: 0,
        }
    }
}

impl DocumentBuilder for PdfDocumentBuilder {
    fn add_page(&mut self) -> Result<()> {
        let done = std::mem::take(&mut self.current);
        self.finished.push(done);
        Ok(())
    }

    fn current_page_size(&self) -> (f32, f32) {
        (self.width_pt * MM_PER_PT, self.height_pt * MM_PER_PT)
    }

    fn add_image(
        &mut self,
        data_url: &str,
        kind: ImageKind,
        geometry: &PageGeometry,
    ) -> Result<()> {
        let (_, bytes) = data_url::decode(data_url)?;
        let stream = match kind {
            ImageKind::Jpeg => jpeg_xobject(bytes)?,
            ImageKind::Png => png_xobject(&mut self.doc, &bytes)?,
            ImageKind::Webp | ImageKind::Unsupported => {
                return Err(ConvertError::Unsupported(format!(
                    "{} cannot be embedded directly",
                    kind.mime()
                )));
            }
        };
        let xobject_id = self.doc.add_object(stream);

        self.image_count += 1;
        let name = format!("Im{}", self.image_count);
        let command = generate_placement_command(&name, geometry, self.height_pt);

        self.current
            .xobjects
            .set(name.as_bytes(), Object::Reference(xobject_id));
        self.current.ops.push_str(&command);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.finished.len() + 1
    }

    fn serialize(mut self) -> Result<Vec<u8>> {
        let mut pages = std::mem::take(&mut self.finished);
        pages.push(std::mem::take(&mut self.current));
        let mut page_refs = Vec::with_capacity(pages.len());

        for page in pages {
            let content_id = self
                .doc
                .add_object(Stream::new(Dictionary::new(), page.ops.into_bytes()));

            let mut resources = Dictionary::new();
            resources.set("XObject", Object::Dictionary(page.xobjects));

            let page_id = self.doc.add_object(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(self.pages_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(self.width_pt),
                        Object::Real(self.height_pt),
                    ]),
                ),
                ("Resources", Object::Dictionary(resources)),
                ("Contents", Object::Reference(content_id)),
            ]));
            page_refs.push(Object::Reference(page_id));
        }

        // Create pages tree
        let count = page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        // Create catalog
        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.doc.trailer.set("Root", catalog_id);

        let mut writer = Vec::new();
        self.doc.save_to(&mut writer)?;
        Ok(writer)
    }
}

/// Generate the content stream command that draws an image.
///
/// Geometry is top-left based in millimeters; PDF user space is bottom-left
/// based in points.
fn generate_placement_command(name: &str, geometry: &PageGeometry, page_height_pt: f32) -> String {
    let width = geometry.width * PT_PER_MM;
    let height = geometry.height * PT_PER_MM;
    let x = geometry.x * PT_PER_MM;
    let y = page_height_pt - geometry.y * PT_PER_MM - height;
    format!(
        "q {:.4} 0 0 {:.4} {:.4} {:.4} cm /{} Do Q\n",
        width, height, x, y, name
    )
}

fn image_dict(width: u32, height: u32, color_space: &str, filter: &str) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", width as i64);
    dict.set("Height", height as i64);
    dict.set("ColorSpace", Object::Name(color_space.as_bytes().to_vec()));
    dict.set("BitsPerComponent", 8i64);
    dict.set("Filter", Object::Name(filter.as_bytes().to_vec()));
    dict
}

/// Frame parameters read from a JPEG's SOF segment
#[derive(Debug, PartialEq, Eq)]
struct JpegHeader {
    width: u32,
    height: u32,
    components: u8,
    /// Carries an Adobe APP14 segment (CMYK samples are stored inverted)
    adobe: bool,
}

/// Walk the marker segments up to the first frame header.
fn read_jpeg_header(data: &[u8]) -> Result<JpegHeader> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return Err(ConvertError::Decode("missing JPEG start marker".to_string()));
    }

    let mut adobe = false;
    let mut i = 2;
    while i + 4 <= data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        // Fill bytes and markers without a length field
        if marker == 0xFF {
            i += 1;
            continue;
        }
        if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            i += 2;
            continue;
        }

        let length = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        let Some(segment) = data.get(i + 4..i + 2 + length.max(2)) else {
            break;
        };
        match marker {
            0xEE if segment.starts_with(b"Adobe") => adobe = true,
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                if segment.len() < 6 {
                    break;
                }
                return Ok(JpegHeader {
                    height: u16::from_be_bytes([segment[1], segment[2]]) as u32,
                    width: u16::from_be_bytes([segment[3], segment[4]]) as u32,
                    components: segment[5],
                    adobe,
                });
            }
            0xD9 | 0xDA => break,
            _ => {}
        }
        i += 2 + length.max(2);
    }

    Err(ConvertError::Decode(
        "could not find a JPEG frame header".to_string(),
    ))
}

/// JPEG data goes into the PDF unchanged. The color space follows the
/// number of components in the frame header.
fn jpeg_xobject(bytes: Vec<u8>) -> Result<Stream> {
    let header = read_jpeg_header(&bytes)?;
    let color_space = match header.components {
        1 => "DeviceGray",
        3 => "DeviceRGB",
        4 => "DeviceCMYK",
        n => {
            return Err(ConvertError::Unsupported(format!(
                "JPEG with {n} color components"
            )));
        }
    };

    let mut dict = image_dict(header.width, header.height, color_space, "DCTDecode");
    if header.components == 4 && header.adobe {
        let decode = [1, 0, 1, 0, 1, 0, 1, 0].map(Object::Integer).to_vec();
        dict.set("Decode", Object::Array(decode));
    }
    Ok(Stream::new(dict, bytes))
}

/// PNG data is decoded to 8-bit samples and deflated. Transparency becomes a
/// separate soft mask object.
fn png_xobject(doc: &mut Document, bytes: &[u8]) -> Result<Stream> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| ConvertError::Decode(e.to_string()))?;
    let (width, height) = (image.width(), image.height());
    let color = image.color();

    let (samples, color_space) = if color.has_color() {
        (image.to_rgb8().into_raw(), "DeviceRGB")
    } else {
        (image.to_luma8().into_raw(), "DeviceGray")
    };

    let mut dict = image_dict(width, height, color_space, "FlateDecode");

    if color.has_alpha() {
        let alpha: Vec<u8> = image.to_rgba8().pixels().map(|p| p[3]).collect();
        let mask_dict = image_dict(width, height, "DeviceGray", "FlateDecode");
        let mask_id = doc.add_object(Stream::new(mask_dict, deflate(&alpha)?));
        dict.set("SMask", Object::Reference(mask_id));
    }

    Ok(Stream::new(dict, deflate(&samples)?))
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
