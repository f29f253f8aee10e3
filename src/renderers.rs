use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use tracing::info;

use crate::cells::{Brick, Cartesian2DCoordinate};
use crate::errors::*;
use crate::grid::BrickGrid;
use crate::layout::DEFAULT_BLOCK_SIDE;
use crate::pathing::Distances;
use crate::units::BlockSide;

const WHITE: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
const BACKGROUND: Rgb<u8> = Rgb([0x10, 0x10, 0x18]);
const NEAR_BLOCK: Rgb<u8> = Rgb([0xf7, 0xb5, 0xef]);
const FAR_BLOCK: Rgb<u8> = Rgb([0x3d, 0xac, 0xf7]);

#[derive(Debug)]
pub struct RenderOptions<'path, 'dist> {
    block_side: BlockSide,
    block_colour: Rgb<u8>,
    background_colour: Rgb<u8>,
    distances: Option<&'dist Distances>,
    output_file: Option<&'path Path>,
}

#[derive(Debug)]
pub struct RenderOptionsBuilder<'path, 'dist> {
    options: RenderOptions<'path, 'dist>,
}

impl<'path, 'dist> RenderOptionsBuilder<'path, 'dist> {
    pub fn new() -> RenderOptionsBuilder<'path, 'dist> {
        RenderOptionsBuilder {
            options: RenderOptions {
                block_side: DEFAULT_BLOCK_SIDE,
                block_colour: WHITE,
                background_colour: BACKGROUND,
                distances: None,
                output_file: None,
            },
        }
    }

    pub fn block_side(mut self, side: BlockSide) -> RenderOptionsBuilder<'path, 'dist> {
        self.options.block_side = side;
        self
    }

    pub fn block_colour(mut self, colour: Rgb<u8>) -> RenderOptionsBuilder<'path, 'dist> {
        self.options.block_colour = colour;
        self
    }

    pub fn background_colour(mut self, colour: Rgb<u8>) -> RenderOptionsBuilder<'path, 'dist> {
        self.options.background_colour = colour;
        self
    }

    /// Shade each block by its distance from the flood fill start instead of `block_colour`.
    pub fn colour_distances(mut self,
                            distances: Option<&'dist Distances>)
                            -> RenderOptionsBuilder<'path, 'dist> {
        self.options.distances = distances;
        self
    }

    pub fn output_file(mut self, output_file: Option<&'path Path>) -> RenderOptionsBuilder<'path, 'dist> {
        self.options.output_file = output_file;
        self
    }

    pub fn build(self) -> RenderOptions<'path, 'dist> {
        self.options
    }
}

impl<'path, 'dist> Default for RenderOptionsBuilder<'path, 'dist> {
    fn default() -> Self {
        RenderOptionsBuilder::new()
    }
}

/// Draw every block (`Empty` cell) as a square of `block_side` pixels, row 0 at the top of the image.
/// Saves a PNG too if the options carry an output file.
pub fn render_blocks(grid: &BrickGrid, options: &RenderOptions) -> Result<RgbImage> {
    let side = options.block_side.0;
    if side == 0 {
        bail!("block side must be at least 1 pixel");
    }
    let image_width = (grid.width().0 as u32).checked_mul(side);
    let image_height = (grid.height().0 as u32).checked_mul(side);
    let (image_width, image_height) = match (image_width, image_height) {
        (Some(w), Some(h)) => (w, h),
        _ => bail!(ErrorKind::OversizedScene(grid.width().0, grid.height().0, side)),
    };

    let mut image: RgbImage = ImageBuffer::from_pixel(image_width, image_height, options.background_colour);

    for coord in grid.iter() {
        if grid.get(coord) != Some(Brick::Empty) {
            continue;
        }
        let colour = block_colour(coord, options);
        let (left, top) = (coord.x * side, coord.y * side);
        for y in top..top + side {
            for x in left..left + side {
                image.put_pixel(x, y, colour);
            }
        }
    }

    if let Some(path) = options.output_file {
        image.save(path).chain_err(|| format!("Failed to save maze image to {}", path.display()))?;
        info!(path = %path.display(), width = image_width, height = image_height, "saved maze image");
    }

    Ok(image)
}

fn block_colour(coord: Cartesian2DCoordinate, options: &RenderOptions) -> Rgb<u8> {
    match options.distances {
        Some(distances) => {
            match distances.distance_to(coord) {
                Some(d) if distances.max() > 0 => {
                    let t = d as f32 / distances.max() as f32;
                    blend(NEAR_BLOCK, FAR_BLOCK, t)
                }
                Some(_) => NEAR_BLOCK,
                None => options.block_colour,
            }
        }
        None => options.block_colour,
    }
}

fn blend(a: Rgb<u8>, b: Rgb<u8>, t: f32) -> Rgb<u8> {
    let mix = |i: usize| (a.0[i] as f32 + (b.0[i] as f32 - a.0[i] as f32) * t).round() as u8;
    Rgb([mix(0), mix(1), mix(2)])
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Height, Width};

    fn sample_grid() -> BrickGrid {
        let mut g = BrickGrid::filled(Width(3), Height(2));
        g.set(Cartesian2DCoordinate::new(0, 0), Brick::Empty).unwrap();
        g.set(Cartesian2DCoordinate::new(1, 0), Brick::Empty).unwrap();
        g.set(Cartesian2DCoordinate::new(1, 1), Brick::Empty).unwrap();
        g
    }

    #[test]
    fn blocks_fill_their_squares() {
        let g = sample_grid();
        let options = RenderOptionsBuilder::new().block_side(BlockSide(4)).build();
        let image = render_blocks(&g, &options).unwrap();

        assert_eq!(image.dimensions(), (12, 8));
        assert_eq!(*image.get_pixel(0, 0), WHITE);
        assert_eq!(*image.get_pixel(7, 3), WHITE);
        assert_eq!(*image.get_pixel(8, 0), BACKGROUND);
        assert_eq!(*image.get_pixel(0, 4), BACKGROUND);
        assert_eq!(*image.get_pixel(5, 6), WHITE);
    }

    #[test]
    fn distance_shading() {
        let g = sample_grid();
        let d = Distances::new(&g, Cartesian2DCoordinate::new(0, 0)).unwrap();
        let options = RenderOptionsBuilder::new()
            .block_side(BlockSide(1))
            .colour_distances(Some(&d))
            .build();
        let image = render_blocks(&g, &options).unwrap();

        assert_eq!(*image.get_pixel(0, 0), NEAR_BLOCK);
        assert_eq!(*image.get_pixel(1, 1), FAR_BLOCK);
        assert_ne!(*image.get_pixel(1, 0), NEAR_BLOCK);
    }

    #[test]
    fn zero_side_is_an_error() {
        let options = RenderOptionsBuilder::new().block_side(BlockSide(0)).build();
        assert!(render_blocks(&sample_grid(), &options).is_err());
    }

    #[test]
    fn oversized_side_is_an_error() {
        let options = RenderOptionsBuilder::new().block_side(BlockSide(u32::MAX)).build();
        match render_blocks(&sample_grid(), &options) {
            Err(Error(ErrorKind::OversizedScene(_, _, side), _)) => assert_eq!(side, u32::MAX),
            other => panic!("expected an oversized scene error, got {:?}", other.map(|i| i.dimensions())),
        }
    }
}
