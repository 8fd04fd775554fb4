use crate::core::availability::TileAvailability;
use crate::core::mask::child_tile_mask;
use crate::domain::model::{Credit, HeightmapTerrainData, TileKey, TileProviderError, TilingScheme};
use crate::domain::ports::{TerrainProvider, TerrainSource};
use crate::utils::error::{Result, TerrainError};
use async_trait::async_trait;
use tokio::sync::broadcast;

const ERROR_EVENT_CAPACITY: usize = 64;

/// Serves heightmap tiles from a GeoServer-backed [`TerrainSource`] to the
/// globe engine.
///
/// Tiling scheme, heightmap size, readiness and the level-zero geometric
/// error are read from the source once, when the provider is built. Nothing
/// is cached and failed requests are not retried; failures are published on
/// the error channel and handed back to the caller.
pub struct GeoserverTerrainProvider<S: TerrainSource> {
    source: S,
    credit: Credit,
    tiling_scheme: TilingScheme,
    availability: TileAvailability,
    heightmap_width: u32,
    heightmap_height: u32,
    level_zero_maximum_geometric_error: f64,
    ready: bool,
    has_water_mask: bool,
    has_vertex_normals: bool,
    error_event: broadcast::Sender<TileProviderError>,
}

impl<S: TerrainSource> GeoserverTerrainProvider<S> {
    pub fn new(source: S, credit: impl Into<String>) -> Self {
        let tiling_scheme = source.tiling_scheme();
        let availability = TileAvailability::new(tiling_scheme, source.maximum_level());
        let (error_event, _) = broadcast::channel(ERROR_EVENT_CAPACITY);

        tracing::debug!(
            "Terrain provider over {} scheme, {}x{} heightmaps, maximum level {}",
            tiling_scheme,
            source.heightmap_width(),
            source.heightmap_height(),
            source.maximum_level()
        );

        Self {
            credit: Credit::new(credit),
            tiling_scheme,
            availability,
            heightmap_width: source.heightmap_width(),
            heightmap_height: source.heightmap_height(),
            level_zero_maximum_geometric_error: source.level_zero_maximum_geometric_error(),
            ready: source.ready(),
            has_water_mask: false,
            has_vertex_normals: false,
            error_event,
            source,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn heightmap_width(&self) -> u32 {
        self.heightmap_width
    }

    pub fn heightmap_height(&self) -> u32 {
        self.heightmap_height
    }

    fn raise_error(&self, key: TileKey, error: &TerrainError) {
        tracing::warn!("Terrain tile {} failed: {}", key, error);
        // No subscribers is fine, the caller still gets the error.
        let _ = self.error_event.send(TileProviderError {
            key,
            message: error.to_string(),
        });
    }
}

#[async_trait]
impl<S: TerrainSource> TerrainProvider for GeoserverTerrainProvider<S> {
    fn tiling_scheme(&self) -> TilingScheme {
        self.tiling_scheme
    }

    fn credit(&self) -> &Credit {
        &self.credit
    }

    fn ready(&self) -> bool {
        self.ready
    }

    fn has_water_mask(&self) -> bool {
        self.has_water_mask
    }

    fn has_vertex_normals(&self) -> bool {
        self.has_vertex_normals
    }

    fn availability(&self) -> Option<&TileAvailability> {
        Some(&self.availability)
    }

    fn subscribe_errors(&self) -> broadcast::Receiver<TileProviderError> {
        self.error_event.subscribe()
    }

    fn get_level_maximum_geometric_error(&self, level: u32) -> f64 {
        self.level_zero_maximum_geometric_error / 2f64.powf(f64::from(level))
    }

    fn get_tile_data_available(&self, x: u32, y: u32, level: u32) -> Option<bool> {
        Some(self.source.get_tile_data_available(x, y, level))
    }

    async fn request_tile_geometry(
        &self,
        x: u32,
        y: u32,
        level: u32,
    ) -> Result<HeightmapTerrainData> {
        let key = TileKey::new(x, y, level);
        tracing::debug!("Requesting terrain tile {}", key);

        let samples = match self.source.geometry(x, y, level).await {
            Ok(samples) => samples,
            Err(e) => {
                self.raise_error(key, &e);
                return Err(e);
            }
        };

        let mask = child_tile_mask(x, y, level, &self.source);
        HeightmapTerrainData::new(samples, self.heightmap_width, self.heightmap_height, mask)
            .inspect_err(|e| self.raise_error(key, e))
    }
}
