use crate::asset::{AssetSource, ImageAsset};
use crate::data_url;
use crate::services::FileReader;
use crate::types::*;

/// Reads asset bytes from disk or memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetReader;

impl FileReader for AssetReader {
    async fn read_as_data_url(&self, asset: &ImageAsset) -> Result<String> {
        let bytes = match asset.source() {
            AssetSource::File(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| ConvertError::Read {
                        name: asset.name().to_string(),
                        source,
                    })?
            }
            AssetSource::Memory(bytes) => bytes.to_vec(),
        };
        Ok(data_url::encode(asset.kind().mime(), &bytes))
    }
}
