pub mod availability;
pub mod engine;
pub mod mask;
pub mod provider;

pub use crate::domain::model::{HeightmapTerrainData, TileKey, TilingScheme};
pub use crate::domain::ports::{TerrainProvider, TerrainSource};
pub use crate::utils::error::Result;
