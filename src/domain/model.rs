use crate::utils::error::{Result, TerrainError};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// WGS84 semi-major axis in metres.
pub const ELLIPSOID_MAXIMUM_RADIUS: f64 = 6_378_137.0;

/// Address of a tile in the quad-tree pyramid. `y = 0` is the northern row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileKey {
    pub x: u32,
    pub y: u32,
    pub level: u32,
}

impl TileKey {
    pub fn new(x: u32, y: u32, level: u32) -> Self {
        Self { x, y, level }
    }

    /// The four quadrant children at `level + 1`, in child-mask bit order.
    /// `None` when the children's address does not fit in `u32`.
    pub fn children(&self) -> Option<[TileKey; 4]> {
        let x = self.x.checked_mul(2)?;
        let y = self.y.checked_mul(2)?;
        let level = self.level.checked_add(1)?;
        // x and y are even here, so `+ 1` cannot overflow
        Some([
            TileKey { x, y, level },
            TileKey { x: x + 1, y, level },
            TileKey { x, y: y + 1, level },
            TileKey {
                x: x + 1,
                y: y + 1,
                level,
            },
        ])
    }

    pub fn parent(&self) -> Option<TileKey> {
        if self.level == 0 {
            return None;
        }
        Some(TileKey {
            x: self.x / 2,
            y: self.y / 2,
            level: self.level - 1,
        })
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.level, self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TilingScheme {
    /// Plate carrée, two root tiles side by side.
    #[default]
    Geographic,
    /// Spherical mercator, a single root tile.
    WebMercator,
}

impl TilingScheme {
    pub fn number_of_x_tiles_at_level(&self, level: u32) -> u64 {
        let root = match self {
            TilingScheme::Geographic => 2,
            TilingScheme::WebMercator => 1,
        };
        2u64.saturating_pow(level).saturating_mul(root)
    }

    pub fn number_of_y_tiles_at_level(&self, level: u32) -> u64 {
        2u64.saturating_pow(level)
    }

    pub fn number_of_tiles_at_level(&self, level: u32) -> u64 {
        self.number_of_x_tiles_at_level(level)
            .saturating_mul(self.number_of_y_tiles_at_level(level))
    }

    pub fn contains(&self, key: TileKey) -> bool {
        u64::from(key.x) < self.number_of_x_tiles_at_level(key.level)
            && u64::from(key.y) < self.number_of_y_tiles_at_level(key.level)
    }
}

impl fmt::Display for TilingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TilingScheme::Geographic => write!(f, "geographic"),
            TilingScheme::WebMercator => write!(f, "web_mercator"),
        }
    }
}

/// Rough level-zero error for a heightmap of `heightmap_width` samples,
/// the same estimate the engine applies to its own heightmap providers.
pub fn estimated_level_zero_geometric_error(
    tiling_scheme: TilingScheme,
    heightmap_width: u32,
) -> f64 {
    (ELLIPSOID_MAXIMUM_RADIUS * 2.0 * PI * 0.25)
        / (f64::from(heightmap_width) * tiling_scheme.number_of_x_tiles_at_level(0) as f64)
}

/// Attribution displayed by the engine for this terrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credit {
    text: String,
}

impl Credit {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Credit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Row-major height samples for one tile plus the mask of children that
/// hold data at the next level.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightmapTerrainData {
    buffer: Vec<i16>,
    width: u32,
    height: u32,
    child_tile_mask: u8,
    water_mask: Option<Vec<u8>>,
}

impl HeightmapTerrainData {
    pub fn new(buffer: Vec<i16>, width: u32, height: u32, child_tile_mask: u8) -> Result<Self> {
        let expected = width as usize * height as usize;
        if buffer.len() != expected {
            return Err(TerrainError::GeometrySizeMismatch {
                expected,
                actual: buffer.len(),
            });
        }

        Ok(Self {
            buffer,
            width,
            height,
            child_tile_mask: child_tile_mask & 0x0f,
            water_mask: None,
        })
    }

    /// Attaches a land/water mask (0 = land, 255 = water), either a single
    /// byte for the whole tile or one byte per sample.
    pub fn with_water_mask(mut self, water_mask: Vec<u8>) -> Result<Self> {
        let samples = self.buffer.len();
        if water_mask.len() != 1 && water_mask.len() != samples {
            return Err(TerrainError::GeometrySizeMismatch {
                expected: samples,
                actual: water_mask.len(),
            });
        }
        self.water_mask = Some(water_mask);
        Ok(self)
    }

    pub fn buffer(&self) -> &[i16] {
        &self.buffer
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn child_tile_mask(&self) -> u8 {
        self.child_tile_mask
    }

    pub fn water_mask(&self) -> Option<&[u8]> {
        self.water_mask.as_deref()
    }

    pub fn height_at(&self, col: u32, row: u32) -> Option<i16> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.buffer
            .get(row as usize * self.width as usize + col as usize)
            .copied()
    }

    pub fn height_range(&self) -> Option<(i16, i16)> {
        let min = self.buffer.iter().copied().min()?;
        let max = self.buffer.iter().copied().max()?;
        Some((min, max))
    }

    /// Whether `child` (one of `this.children()`) was flagged as available.
    pub fn is_child_available(&self, this: TileKey, child: TileKey) -> bool {
        if child.parent() != Some(this) {
            return false;
        }
        let bit = (child.x - this.x * 2) + 2 * (child.y - this.y * 2);
        self.child_tile_mask & (1 << bit) != 0
    }
}

/// Published on a provider's error channel when a tile request fails.
#[derive(Debug, Clone, PartialEq)]
pub struct TileProviderError {
    pub key: TileKey,
    pub message: String,
}
