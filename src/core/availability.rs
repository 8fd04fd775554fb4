use crate::domain::model::{TileKey, TilingScheme};
use crate::utils::error::{Result, TerrainError};
use std::collections::BTreeMap;

/// Inclusive rectangle of tiles at one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub start_x: u32,
    pub start_y: u32,
    pub end_x: u32,
    pub end_y: u32,
}

impl TileRange {
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.start_x..=self.end_x).contains(&x) && (self.start_y..=self.end_y).contains(&y)
    }
}

/// Per-level record of which tiles the engine may ask for, bounded by the
/// source's maximum level.
#[derive(Debug, Clone)]
pub struct TileAvailability {
    tiling_scheme: TilingScheme,
    maximum_level: u32,
    // only levels that have had a range added
    ranges: BTreeMap<u32, Vec<TileRange>>,
}

impl TileAvailability {
    pub fn new(tiling_scheme: TilingScheme, maximum_level: u32) -> Self {
        Self {
            tiling_scheme,
            maximum_level,
            ranges: BTreeMap::new(),
        }
    }

    pub fn tiling_scheme(&self) -> TilingScheme {
        self.tiling_scheme
    }

    pub fn maximum_level(&self) -> u32 {
        self.maximum_level
    }

    pub fn add_available_tile_range(
        &mut self,
        level: u32,
        start_x: u32,
        start_y: u32,
        end_x: u32,
        end_y: u32,
    ) -> Result<()> {
        if level > self.maximum_level {
            return Err(TerrainError::InvalidConfigValueError {
                field: "availability.level".to_string(),
                value: level.to_string(),
                reason: format!("Level exceeds maximum level {}", self.maximum_level),
            });
        }
        if start_x > end_x || start_y > end_y {
            return Err(TerrainError::InvalidConfigValueError {
                field: "availability.range".to_string(),
                value: format!("{},{} -> {},{}", start_x, start_y, end_x, end_y),
                reason: "Range start must not exceed range end".to_string(),
            });
        }
        if !self.tiling_scheme.contains(TileKey::new(end_x, end_y, level)) {
            return Err(TerrainError::InvalidConfigValueError {
                field: "availability.range".to_string(),
                value: format!("{},{}", end_x, end_y),
                reason: format!(
                    "Outside the {} tiling scheme at level {}",
                    self.tiling_scheme, level
                ),
            });
        }

        self.ranges.entry(level).or_default().push(TileRange {
            start_x,
            start_y,
            end_x,
            end_y,
        });
        tracing::trace!(
            "Level {} available range {},{} -> {},{}",
            level,
            start_x,
            start_y,
            end_x,
            end_y
        );
        Ok(())
    }

    pub fn is_tile_available(&self, level: u32, x: u32, y: u32) -> bool {
        self.ranges
            .get(&level)
            .map(|ranges| ranges.iter().any(|range| range.contains(x, y)))
            .unwrap_or(false)
    }

    /// Same bit layout as [`crate::core::mask::child_tile_mask`].
    pub fn compute_child_mask_for_tile(&self, level: u32, x: u32, y: u32) -> u8 {
        if level >= self.maximum_level {
            return 0;
        }
        let Some(children) = TileKey::new(x, y, level).children() else {
            return 0;
        };
        children
            .iter()
            .enumerate()
            .filter(|(_, child)| self.is_tile_available(child.level, child.x, child.y))
            .fold(0u8, |mask, (bit, _)| mask | (1 << bit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_availability() {
        let availability = TileAvailability::new(TilingScheme::Geographic, 5);
        assert_eq!(availability.maximum_level(), 5);
        assert!(!availability.is_tile_available(0, 0, 0));
        assert_eq!(availability.compute_child_mask_for_tile(0, 0, 0), 0);
    }

    #[test]
    fn test_unbounded_maximum_level_is_cheap() {
        let mut availability = TileAvailability::new(TilingScheme::WebMercator, u32::MAX);
        assert_eq!(availability.maximum_level(), u32::MAX);
        assert!(!availability.is_tile_available(u32::MAX, 0, 0));

        availability.add_available_tile_range(40, 0, 0, 3, 3).unwrap();
        assert!(availability.is_tile_available(40, 3, 3));
        assert!(!availability.is_tile_available(41, 0, 0));
        assert_eq!(availability.compute_child_mask_for_tile(39, 1, 1), 0b1111);
        assert_eq!(availability.compute_child_mask_for_tile(u32::MAX - 1, 0, 0), 0);
    }

    #[test]
    fn test_range_lookup() {
        let mut availability = TileAvailability::new(TilingScheme::Geographic, 3);
        availability.add_available_tile_range(0, 0, 0, 1, 0).unwrap();
        availability.add_available_tile_range(2, 2, 1, 3, 2).unwrap();

        assert!(availability.is_tile_available(0, 1, 0));
        assert!(availability.is_tile_available(2, 3, 2));
        assert!(!availability.is_tile_available(2, 4, 2));
        assert!(!availability.is_tile_available(1, 0, 0));
        assert!(!availability.is_tile_available(9, 0, 0));
    }

    #[test]
    fn test_rejects_bad_ranges() {
        let mut availability = TileAvailability::new(TilingScheme::WebMercator, 2);
        assert!(availability.add_available_tile_range(3, 0, 0, 0, 0).is_err());
        assert!(availability.add_available_tile_range(1, 1, 0, 0, 0).is_err());
        assert!(availability.add_available_tile_range(1, 0, 0, 2, 0).is_err());
        assert!(availability.add_available_tile_range(1, 0, 0, 1, 1).is_ok());
    }

    #[test]
    fn test_child_mask_from_ranges() {
        let mut availability = TileAvailability::new(TilingScheme::Geographic, 2);
        // western half of (1, 0, 1)'s children
        availability.add_available_tile_range(2, 2, 0, 2, 1).unwrap();

        assert_eq!(availability.compute_child_mask_for_tile(1, 1, 0), 0b0101);
        assert_eq!(availability.compute_child_mask_for_tile(1, 0, 0), 0);
        assert_eq!(availability.compute_child_mask_for_tile(2, 2, 0), 0);
    }
}
