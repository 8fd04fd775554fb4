use geoserver_terrain::{
    child_tile_mask, GeoserverTerrainProvider, MemorySource, TerrainProvider, TileAvailability,
    TileKey, TilingScheme,
};

/// Availability pattern that differs per quadrant and per level.
fn available(key: TileKey) -> bool {
    (key.x * 7 + key.y * 3 + key.level) % 4 != 0
}

fn source_for_levels(max_level: u32) -> MemorySource {
    let scheme = TilingScheme::Geographic;
    let mut source = MemorySource::new(scheme, 2, 2, max_level);
    for level in 0..=max_level {
        for y in 0..scheme.number_of_y_tiles_at_level(level) as u32 {
            for x in 0..scheme.number_of_x_tiles_at_level(level) as u32 {
                let key = TileKey::new(x, y, level);
                if available(key) {
                    source.insert(key, vec![0; 4]).unwrap();
                }
            }
        }
    }
    source
}

fn expected_mask(x: u32, y: u32, level: u32) -> u8 {
    let child = |cx, cy| available(TileKey::new(cx, cy, level + 1));
    let mut mask = 0;
    if child(2 * x, 2 * y) {
        mask |= 1;
    }
    if child(2 * x + 1, 2 * y) {
        mask |= 2;
    }
    if child(2 * x, 2 * y + 1) {
        mask |= 4;
    }
    if child(2 * x + 1, 2 * y + 1) {
        mask |= 8;
    }
    mask
}

#[test]
fn test_mask_bits_for_every_tile_up_to_level_four() {
    let source = source_for_levels(5);
    let scheme = TilingScheme::Geographic;

    for level in 0..=4 {
        for y in 0..scheme.number_of_y_tiles_at_level(level) as u32 {
            for x in 0..scheme.number_of_x_tiles_at_level(level) as u32 {
                assert_eq!(
                    child_tile_mask(x, y, level, &source),
                    expected_mask(x, y, level),
                    "tile {}/{}/{}",
                    level,
                    x,
                    y
                );
            }
        }
    }
}

#[test]
fn test_deepest_level_has_no_children() {
    let source = source_for_levels(3);
    for x in 0..16 {
        for y in 0..8 {
            assert_eq!(child_tile_mask(x, y, 3, &source), 0);
        }
    }
}

#[tokio::test]
async fn test_provider_mask_matches_helper() {
    let provider = GeoserverTerrainProvider::new(source_for_levels(4), "");

    for level in 0..3 {
        for y in 0..(1u32 << level) {
            for x in 0..(2u32 << level) {
                if !available(TileKey::new(x, y, level)) {
                    continue;
                }
                let data = provider.request_tile_geometry(x, y, level).await.unwrap();
                assert_eq!(data.child_tile_mask(), expected_mask(x, y, level));
            }
        }
    }
}

#[test]
fn test_availability_ranges_use_the_same_bit_layout() {
    let mut availability = TileAvailability::new(TilingScheme::WebMercator, 3);
    // only the south-east child of (1, 0, 1)
    availability.add_available_tile_range(2, 3, 1, 3, 1).unwrap();
    assert_eq!(availability.compute_child_mask_for_tile(1, 1, 0), 0b1000);

    let mut source = MemorySource::new(TilingScheme::WebMercator, 1, 1, 3);
    source.insert(TileKey::new(3, 1, 2), vec![0]).unwrap();
    assert_eq!(child_tile_mask(1, 0, 1, &source), 0b1000);
}
