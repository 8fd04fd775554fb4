use crate::domain::model::{estimated_level_zero_geometric_error, TileKey, TilingScheme};
use crate::domain::ports::TerrainSource;
use crate::utils::error::{Result, TerrainError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Tiles exported from GeoServer as headerless little-endian 16-bit BIL
/// files, laid out as `{root}/{level}/{x}/{y}.bil`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    tiling_scheme: TilingScheme,
    heightmap_width: u32,
    heightmap_height: u32,
    maximum_level: u32,
    level_zero_maximum_geometric_error: f64,
}

impl DirectorySource {
    pub fn new(
        root: impl Into<PathBuf>,
        tiling_scheme: TilingScheme,
        heightmap_width: u32,
        heightmap_height: u32,
        maximum_level: u32,
    ) -> Self {
        Self {
            root: root.into(),
            tiling_scheme,
            heightmap_width,
            heightmap_height,
            maximum_level,
            level_zero_maximum_geometric_error: estimated_level_zero_geometric_error(
                tiling_scheme,
                heightmap_width,
            ),
        }
    }

    pub fn with_level_zero_maximum_geometric_error(mut self, error: f64) -> Self {
        self.level_zero_maximum_geometric_error = error;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tile_path(&self, key: TileKey) -> PathBuf {
        self.root
            .join(key.level.to_string())
            .join(key.x.to_string())
            .join(format!("{}.bil", key.y))
    }

    fn sample_count(&self) -> usize {
        self.heightmap_width as usize * self.heightmap_height as usize
    }

    /// Writes one tile in the layout `geometry` reads back.
    pub async fn write_tile(&self, key: TileKey, samples: &[i16]) -> Result<()> {
        if samples.len() != self.sample_count() {
            return Err(TerrainError::GeometrySizeMismatch {
                expected: self.sample_count(),
                actual: samples.len(),
            });
        }

        let path = self.tile_path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!("Wrote tile {} to {}", key, path.display());
        Ok(())
    }
}

#[async_trait]
impl TerrainSource for DirectorySource {
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
        self.root.is_dir()
    }

    /// Stats the tile file synchronously; the engine calls this from its
    /// frame loop, so keep the tile root on local disk.
    fn get_tile_data_available(&self, x: u32, y: u32, level: u32) -> bool {
        let key = TileKey::new(x, y, level);
        level <= self.maximum_level
            && self.tiling_scheme.contains(key)
            && self.tile_path(key).is_file()
    }

    async fn geometry(&self, x: u32, y: u32, level: u32) -> Result<Vec<i16>> {
        let key = TileKey::new(x, y, level);
        if !self.get_tile_data_available(x, y, level) {
            return Err(TerrainError::TileNotAvailable { key });
        }

        let path = self.tile_path(key);
        tracing::trace!("Reading tile {} from {}", key, path.display());
        let bytes = tokio::fs::read(&path).await?;

        if bytes.len() != self.sample_count() * 2 {
            return Err(TerrainError::GeometrySizeMismatch {
                expected: self.sample_count(),
                actual: bytes.len() / 2,
            });
        }

        Ok(bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect())
    }
}
