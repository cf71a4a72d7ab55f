pub mod asset;
pub mod backend;
pub mod constants;
pub mod controller;
pub mod data_url;
pub mod layout;
pub mod options;
pub mod pipeline;
pub mod services;
pub mod session;
pub mod types;

pub use asset::{AssetSource, ImageAsset, filter_supported};
pub use backend::{DefaultController, DefaultConverter, default_converter};
pub use controller::{ArtifactStore, SessionController};
pub use layout::{PageGeometry, compute_layout};
pub use options::LayoutOptions;
pub use pipeline::{Conversion, Converter, PlacedPage};
pub use services::*;
pub use session::*;
pub use types::*;
