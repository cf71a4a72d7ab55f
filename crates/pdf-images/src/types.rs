use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("No supported images selected")]
    NoImages,
    #[error("Document service is not available")]
    ServiceUnavailable,
    #[error("Failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Invalid data URL: {0}")]
    DataUrl(String),
    #[error("Unsupported image: {0}")]
    Unsupported(String),
    #[error("No pages were produced")]
    EmptyDocument,
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Output page sizes.
///
/// Physical dimensions are owned by the document backend; the layout code
/// always asks the created document for its page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    A3,
    A5,
}

impl PageSize {
    pub fn name(self) -> &'static str {
        match self {
            PageSize::A4 => "a4",
            PageSize::Letter => "letter",
            PageSize::A3 => "a3",
            PageSize::A5 => "a5",
        }
    }
}

/// How an image's pixel rectangle maps onto the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FitMode {
    /// Scale uniformly to fit inside the margins (preserve aspect ratio)
    #[default]
    Fit,
    /// Near-native size at 72 dpi, each axis clamped to the margins
    Original,
    /// Stretch to the margin box (ignore aspect ratio)
    Fill,
}

/// Declared image kind of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Webp,
    Unsupported,
}

impl ImageKind {
    /// Classify a MIME type such as `image/png`.
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => ImageKind::Png,
            "image/jpeg" | "image/jpg" => ImageKind::Jpeg,
            "image/webp" => ImageKind::Webp,
            _ => ImageKind::Unsupported,
        }
    }

    /// Classify a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "png" => ImageKind::Png,
            "jpg" | "jpeg" => ImageKind::Jpeg,
            "webp" => ImageKind::Webp,
            _ => ImageKind::Unsupported,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Webp => "image/webp",
            ImageKind::Unsupported => "application/octet-stream",
        }
    }

    pub fn is_supported(self) -> bool {
        self != ImageKind::Unsupported
    }
}

/// Page size and orientation used to create an output document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSetup {
    pub size: PageSize,
    pub orientation: Orientation,
}
