use crate::domain::model::{estimated_level_zero_geometric_error, TileKey, TilingScheme};
use crate::domain::ports::TerrainSource;
use crate::utils::error::{Result, TerrainError};
use async_trait::async_trait;
use std::collections::HashMap;

/// Terrain held in memory, for embedding small tile sets and for tests.
#[derive(Debug, Clone)]
pub struct MemorySource {
    tiling_scheme: TilingScheme,
    heightmap_width: u32,
    heightmap_height: u32,
    maximum_level: u32,
    level_zero_maximum_geometric_error: f64,
    ready: bool,
    tiles: HashMap<TileKey, Vec<i16>>,
}

impl MemorySource {
    pub fn new(
        tiling_scheme: TilingScheme,
        heightmap_width: u32,
        heightmap_height: u32,
        maximum_level: u32,
    ) -> Self {
        Self {
            tiling_scheme,
            heightmap_width,
            heightmap_height,
            maximum_level,
            level_zero_maximum_geometric_error: estimated_level_zero_geometric_error(
                tiling_scheme,
                heightmap_width,
            ),
            ready: true,
            tiles: HashMap::new(),
        }
    }

    pub fn with_level_zero_maximum_geometric_error(mut self, error: f64) -> Self {
        self.level_zero_maximum_geometric_error = error;
        self
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn insert(&mut self, key: TileKey, samples: Vec<i16>) -> Result<()> {
        if key.level > self.maximum_level || !self.tiling_scheme.contains(key) {
            return Err(TerrainError::InvalidConfigValueError {
                field: "tile".to_string(),
                value: key.to_string(),
                reason: format!(
                    "Outside the {} tiling scheme up to level {}",
                    self.tiling_scheme, self.maximum_level
                ),
            });
        }

        let expected = self.heightmap_width as usize * self.heightmap_height as usize;
        if samples.len() != expected {
            return Err(TerrainError::GeometrySizeMismatch {
                expected,
                actual: samples.len(),
            });
        }

        self.tiles.insert(key, samples);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn insert_unchecked(&mut self, key: TileKey, samples: Vec<i16>) {
        self.tiles.insert(key, samples);
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[async_trait]
impl TerrainSource for MemorySource {
    fn tiling_scheme(&self) -> TilingScheme {
        self.tiling_scheme
    }

    fn maximum_level(&self) -> u32 {
        self.maximum_level
    }

    fn level_zero_maximum_geometric_error(&self) -> f64 {
        self.level_zero_maximum_geometric_error
    }

    fn heightmap_width(&self) -> u32 {
        self.heightmap_width
    }

    fn heightmap_height(&self) -> u32 {
        self.heightmap_height
    }

    fn ready(&self) -> bool {
        self.ready
    }

    fn get_tile_data_available(&self, x: u32, y: u32, level: u32) -> bool {
        self.tiles.contains_key(&TileKey::new(x, y, level))
    }

    async fn geometry(&self, x: u32, y: u32, level: u32) -> Result<Vec<i16>> {
        let key = TileKey::new(x, y, level);
        self.tiles
            .get(&key)
            .cloned()
            .ok_or(TerrainError::TileNotAvailable { key })
    }
}
