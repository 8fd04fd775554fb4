use crate::core::availability::TileAvailability;
use crate::domain::model::{Credit, HeightmapTerrainData, TileProviderError, TilingScheme};
use crate::utils::error::{Result, TerrainError};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Where tiles actually come from: tiling scheme, availability and the raw
/// height samples for each tile.
#[async_trait]
pub trait TerrainSource: Send + Sync {
    fn tiling_scheme(&self) -> TilingScheme;
    fn maximum_level(&self) -> u32;
    fn level_zero_maximum_geometric_error(&self) -> f64;
    fn heightmap_width(&self) -> u32;
    fn heightmap_height(&self) -> u32;
    fn ready(&self) -> bool;
    fn get_tile_data_available(&self, x: u32, y: u32, level: u32) -> bool;

    /// Row-major samples, `heightmap_width * heightmap_height` of them.
    async fn geometry(&self, x: u32, y: u32, level: u32) -> Result<Vec<i16>>;
}

/// What the globe engine calls to obtain terrain.
#[async_trait]
pub trait TerrainProvider: Send + Sync {
    fn tiling_scheme(&self) -> TilingScheme;
    fn credit(&self) -> &Credit;
    fn ready(&self) -> bool;
    fn has_water_mask(&self) -> bool;
    fn has_vertex_normals(&self) -> bool;
    fn availability(&self) -> Option<&TileAvailability>;
    fn subscribe_errors(&self) -> broadcast::Receiver<TileProviderError>;
    fn get_level_maximum_geometric_error(&self, level: u32) -> f64;

    /// `None` when the provider cannot tell yet.
    fn get_tile_data_available(&self, x: u32, y: u32, level: u32) -> Option<bool>;

    async fn request_tile_geometry(
        &self,
        _x: u32,
        _y: u32,
        _level: u32,
    ) -> Result<HeightmapTerrainData> {
        Err(TerrainError::NotImplemented {
            operation: "request_tile_geometry",
        })
    }

    async fn load_tile_data_availability(&self, _x: u32, _y: u32, _level: u32) -> Result<()> {
        Err(TerrainError::NotImplemented {
            operation: "load_tile_data_availability",
        })
    }
}
