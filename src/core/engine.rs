use crate::domain::model::{HeightmapTerrainData, TileKey};
use crate::domain::ports::TerrainProvider;
use crate::utils::error::{Result, TerrainError};
use serde::Serialize;
use std::collections::VecDeque;

/// A tile as the engine would hand it to its mesher.
#[derive(Debug, Clone)]
pub struct LoadedTile {
    pub key: TileKey,
    pub data: HeightmapTerrainData,
    pub geometric_error: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TileSummary {
    pub key: TileKey,
    pub width: u32,
    pub height: u32,
    pub min_height: Option<i16>,
    pub max_height: Option<i16>,
    pub child_tile_mask: u8,
    pub geometric_error: f64,
}

impl From<&LoadedTile> for TileSummary {
    fn from(tile: &LoadedTile) -> Self {
        let range = tile.data.height_range();
        Self {
            key: tile.key,
            width: tile.data.width(),
            height: tile.data.height(),
            min_height: range.map(|(min, _)| min),
            max_height: range.map(|(_, max)| max),
            child_tile_mask: tile.data.child_tile_mask(),
            geometric_error: tile.geometric_error,
        }
    }
}

/// Pretty-printed JSON array of `summaries`.
pub fn summaries_to_json(summaries: &[TileSummary]) -> Result<String> {
    Ok(serde_json::to_string_pretty(summaries)?)
}

/// Host-side driver: asks a provider for tiles the way the globe engine does.
pub struct TerrainEngine<P: TerrainProvider> {
    provider: P,
}

impl<P: TerrainProvider> TerrainEngine<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn load_tile(&self, key: TileKey) -> Result<LoadedTile> {
        if !self.provider.ready() {
            return Err(TerrainError::SourceNotReady);
        }

        if self.provider.get_tile_data_available(key.x, key.y, key.level) == Some(false) {
            return Err(TerrainError::TileNotAvailable { key });
        }

        let data = self
            .provider
            .request_tile_geometry(key.x, key.y, key.level)
            .await?;
        let geometric_error = self.provider.get_level_maximum_geometric_error(key.level);

        tracing::info!(
            "Loaded tile {} ({}x{}, child mask {:04b}, geometric error {:.2})",
            key,
            data.width(),
            data.height(),
            data.child_tile_mask(),
            geometric_error
        );

        Ok(LoadedTile {
            key,
            data,
            geometric_error,
        })
    }

    /// Loads `root` and, following each tile's child mask, its descendants
    /// down to `depth` levels below it. Breadth first.
    pub async fn load_subtree(&self, root: TileKey, depth: u32) -> Result<Vec<LoadedTile>> {
        let mut loaded = Vec::new();
        let mut queue = VecDeque::from([root]);

        while let Some(key) = queue.pop_front() {
            let tile = self.load_tile(key).await?;

            if key.level - root.level < depth {
                for child in key.children().into_iter().flatten() {
                    if tile.data.is_child_available(key, child) {
                        queue.push_back(child);
                    }
                }
            }
            loaded.push(tile);
        }

        tracing::debug!("Loaded {} tiles below {}", loaded.len(), root);
        Ok(loaded)
    }
}
