//! Where a consumer puts its wall blocks.
//!
//! The convention is inverted from what the cell names suggest: a solid block goes on every `Empty` cell
//! and `Filled` cells are left open. So the border corridor becomes a wall around the scene and the carved
//! passages become the maze's walls, while the uncarved `Filled` cells are the space a player moves
//! through.

use crate::cells::{Brick, Cartesian2DCoordinate};
use crate::errors::*;
use crate::grid::BrickGrid;
use crate::units::BlockSide;

/// Block size used by the scene the maze was made for.
pub const DEFAULT_BLOCK_SIDE: BlockSide = BlockSide(50);

/// Scene position of one block's centre. `y` grows upwards from the bottom of the scene.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct ScenePoint {
    pub x: u32,
    pub y: u32,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct WallBlock {
    pub cell: Cartesian2DCoordinate,
    pub position: ScenePoint,
}

/// One `WallBlock` per `Empty` cell, in row major order.
///
/// Positions are the 1-based grid position times the block side: column `c`, row `r` is placed at
/// `(side * (c + 1), side * (r + 1))`. Row 0 is placed lowest, so a y-up scene shows the grid flipped
/// vertically.
///
/// Fails with `OversizedScene` when the scene extent at this block side does not fit in a `u32`.
#[derive(Debug, Clone)]
pub struct BlockLayout {
    blocks: Vec<WallBlock>,
    block_side: BlockSide,
    scene_width: u32,
    scene_height: u32,
}

impl BlockLayout {
    pub fn new(grid: &BrickGrid, block_side: BlockSide) -> Result<BlockLayout> {
        let (width, height) = (grid.width().0, grid.height().0);
        let scene_extent = |cells: usize| {
            (cells as u64 + 1)
                .checked_mul(u64::from(block_side.0))
                .filter(|&extent| extent <= u64::from(u32::MAX))
                .map(|extent| extent as u32)
        };
        let (scene_width, scene_height) = match (scene_extent(width), scene_extent(height)) {
            (Some(w), Some(h)) => (w, h),
            _ => bail!(ErrorKind::OversizedScene(width, height, block_side.0)),
        };

        // Every position is at most the scene extent, checked above.
        let blocks = grid.iter()
            .filter(|&coord| grid.get(coord) == Some(Brick::Empty))
            .map(|coord| {
                WallBlock {
                    cell: coord,
                    position: ScenePoint {
                        x: block_side.0 * (coord.x + 1),
                        y: block_side.0 * (coord.y + 1),
                    },
                }
            })
            .collect();

        Ok(BlockLayout {
            blocks: blocks,
            block_side: block_side,
            scene_width: scene_width,
            scene_height: scene_height,
        })
    }

    #[inline]
    pub fn blocks(&self) -> &[WallBlock] {
        &self.blocks
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[inline]
    pub fn block_side(&self) -> BlockSide {
        self.block_side
    }

    /// Width and height of a scene holding every block with a one block margin on each side.
    pub fn scene_size(&self) -> (u32, u32) {
        (self.scene_width, self.scene_height)
    }

    pub fn has_block_at(&self, cell: Cartesian2DCoordinate) -> bool {
        self.blocks.iter().any(|b| b.cell == cell)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Maze;
    use crate::units::{Height, Width};

    #[test]
    fn one_block_per_empty_cell() {
        let maze = Maze::from_seed(Width(14), Height(14), 9).unwrap();
        let layout = BlockLayout::new(maze.grid(), DEFAULT_BLOCK_SIDE).unwrap();

        assert_eq!(layout.len(), maze.grid().count(Brick::Empty));
        for coord in maze.grid().iter() {
            assert_eq!(layout.has_block_at(coord),
                       maze.grid().get(coord) == Some(Brick::Empty),
                       "{}",
                       coord);
        }
    }

    #[test]
    fn positions_are_one_based_multiples_of_the_side() {
        let maze = Maze::from_seed(Width(14), Height(14), 9).unwrap();
        let layout = BlockLayout::new(maze.grid(), DEFAULT_BLOCK_SIDE).unwrap();

        let first = layout.blocks()[0];
        assert_eq!(first.cell, Cartesian2DCoordinate::new(0, 0));
        assert_eq!(first.position, ScenePoint { x: 50, y: 50 });

        let last = layout.blocks()[layout.len() - 1];
        assert_eq!(last.cell, Cartesian2DCoordinate::new(13, 13));
        assert_eq!(last.position, ScenePoint { x: 700, y: 700 });

        assert_eq!(layout.scene_size(), (750, 750));
    }

    #[test]
    fn filled_grid_has_no_blocks() {
        let grid = BrickGrid::filled(Width(3), Height(3));
        let layout = BlockLayout::new(&grid, BlockSide(10)).unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.block_side(), BlockSide(10));
    }

    #[test]
    fn oversized_block_side_is_rejected() {
        let maze = Maze::from_seed(Width(14), Height(14), 9).unwrap();
        match BlockLayout::new(maze.grid(), BlockSide(400_000_000)) {
            Err(Error(ErrorKind::OversizedScene(14, 14, 400_000_000), _)) => {}
            other => panic!("expected an oversized scene error, got {:?}", other),
        }

        // 15 * side is exactly u32::MAX, the largest scene that fits.
        let side = u32::MAX / 15;
        let layout = BlockLayout::new(maze.grid(), BlockSide(side)).unwrap();
        assert_eq!(layout.scene_size(), (u32::MAX, u32::MAX));
        assert!(BlockLayout::new(maze.grid(), BlockSide(side + 1)).is_err());
    }
}
