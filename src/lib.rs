pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{DirectorySource, MemorySource};
pub use crate::config::TerrainConfig;
pub use crate::core::{
    availability::TileAvailability,
    engine::{summaries_to_json, LoadedTile, TerrainEngine, TileSummary},
    mask::child_tile_mask,
    provider::GeoserverTerrainProvider,
};
pub use crate::domain::model::{Credit, HeightmapTerrainData, TileKey, TileProviderError, TilingScheme};
pub use crate::domain::ports::{TerrainProvider, TerrainSource};
pub use crate::utils::error::{Result, TerrainError};
