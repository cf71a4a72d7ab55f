use crate::types::ImageKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Where an asset's bytes live
#[derive(Debug, Clone)]
pub enum AssetSource {
    /// A file on disk, read when the pipeline reaches it
    File(PathBuf),
    /// Bytes already held in memory
    Memory(Arc<[u8]>),
}

/// One input image
#[derive(Debug, Clone)]
pub struct ImageAsset {
    name: String,
    source: AssetSource,
    kind: ImageKind,
    dimensions: OnceLock<(u32, u32)>,
}

impl ImageAsset {
    /// Create an asset from a file path, taking the kind from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let kind = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(ImageKind::from_extension)
            .unwrap_or(ImageKind::Unsupported);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            name,
            source: AssetSource::File(path.to_owned()),
            kind,
            dimensions: OnceLock::new(),
        }
    }

    /// Create an asset from in-memory bytes and a declared MIME type.
    pub fn from_bytes(name: impl Into<String>, mime: &str, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            source: AssetSource::Memory(bytes.into()),
            kind: ImageKind::from_mime(mime),
            dimensions: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &AssetSource {
        &self.source
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    pub fn is_supported(&self) -> bool {
        self.kind.is_supported()
    }

    /// Decoded pixel dimensions, once the pipeline has decoded this asset
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions.get().copied()
    }

    /// Record decoded dimensions. Later calls keep the first value.
    pub(crate) fn record_dimensions(&self, width: u32, height: u32) {
        let _ = self.dimensions.set((width, height));
    }
}

/// Split a selection into supported assets and the names of rejected ones,
/// preserving order.
pub fn filter_supported(assets: Vec<ImageAsset>) -> (Vec<ImageAsset>, Vec<String>) {
    let mut supported = Vec::new();
    let mut rejected = Vec::new();
    for asset in assets {
        if asset.is_supported() {
            supported.push(asset);
        } else {
            rejected.push(asset.name);
        }
    }
    (supported, rejected)
}
