use crate::domain::model::TileKey;
use crate::domain::ports::TerrainSource;

/// Bit `i` is set when `TileKey::children()[i]` has data at `level + 1`.
/// Children whose address does not fit in `u32` count as unavailable.
pub fn child_tile_mask<S>(x: u32, y: u32, level: u32, source: &S) -> u8
where
    S: TerrainSource + ?Sized,
{
    let Some(children) = TileKey::new(x, y, level).children() else {
        return 0;
    };

    children
        .iter()
        .enumerate()
        .fold(0u8, |mask, (bit, child)| {
            if source.get_tile_data_available(child.x, child.y, child.level) {
                mask | (1 << bit)
            } else {
                mask
            }
        })
}
