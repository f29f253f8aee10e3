//! The maze generator: a bordered brick grid carved once at construction time.

use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use tracing::debug;

use crate::cells::{Brick, Cartesian2DCoordinate};
use crate::errors::*;
use crate::generators::{self, CarveStats, CarveStyle, DirectionSource, RandomDirections};
use crate::grid::BrickGrid;
use crate::units::{ColumnIndex, Height, RowIndex, Width};

/// Smallest accepted side. The seed at `(2, 2)`, the punctures at row 1 and `(height - 2, width - 3)`
/// and the walk's two cell lookahead all fit inside the border ring from this size up.
pub const MIN_SIDE_LENGTH: usize = 5;

/// Where the carving walk starts, also opened before the walk runs.
pub const SEED: Cartesian2DCoordinate = Cartesian2DCoordinate { x: 2, y: 2 };

/// A generated maze. The grid is complete when construction returns and can only be read afterwards.
///
/// Building another maze means constructing another `Maze`; there is no regeneration in place.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: BrickGrid,
    style: CarveStyle,
    stats: CarveStats,
}

impl Maze {
    /// Carve a maze with a randomly seeded generator.
    pub fn new(width: Width, height: Height) -> Result<Maze> {
        let mut directions = RandomDirections::new(XorShiftRng::from_entropy());
        Maze::with_directions(width, height, &mut directions)
    }

    /// Reproducible maze, the same seed and dimensions always give the same grid.
    pub fn from_seed(width: Width, height: Height, seed: u64) -> Result<Maze> {
        let mut directions = RandomDirections::new(XorShiftRng::seed_from_u64(seed));
        Maze::with_directions(width, height, &mut directions)
    }

    /// Carve with the default `CarveStyle::Backtracking`: a walk frame keeps trying its remaining directions
    /// after a child frame returns. Use `with_style` with `CarveStyle::SingleRun` for frames that stop after
    /// their first carve.
    pub fn with_directions<D>(width: Width, height: Height, directions: &mut D) -> Result<Maze>
        where D: DirectionSource + ?Sized
    {
        Maze::with_style(width, height, directions, CarveStyle::default())
    }

    /// The full construction:
    ///
    /// - every cell `Filled`
    /// - the border rows and columns `Empty`
    /// - the seed `(2, 2)` `Empty`, then the carving walk from it
    /// - `(row 1, col 2)` and `(row height - 2, col width - 3)` forced `Empty`, joining the carved interior to
    ///   the border corridor whatever the walk did
    pub fn with_style<D>(width: Width,
                         height: Height,
                         directions: &mut D,
                         style: CarveStyle)
                         -> Result<Maze>
        where D: DirectionSource + ?Sized
    {
        validate_dimensions(width, height)?;

        let mut grid = BrickGrid::filled(width, height);
        grid.set_row(RowIndex(0), Brick::Empty)?;
        grid.set_row(RowIndex(height.0 - 1), Brick::Empty)?;
        grid.set_column(ColumnIndex(0), Brick::Empty)?;
        grid.set_column(ColumnIndex(width.0 - 1), Brick::Empty)?;

        grid.set(SEED, Brick::Empty)?;
        let stats = generators::carve_passages(&mut grid, SEED, directions, style);

        for &puncture in &exit_punctures(width, height) {
            grid.set(puncture, Brick::Empty)?;
        }

        debug!(width = width.0,
               height = height.0,
               frames = stats.frames,
               carved = stats.carved_cells,
               max_depth = stats.max_depth,
               "maze carved");

        Ok(Maze {
            grid: grid,
            style: style,
            stats: stats,
        })
    }

    /// The finished grid.
    #[inline]
    pub fn grid(&self) -> &BrickGrid {
        &self.grid
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.grid.height()
    }

    #[inline]
    pub fn style(&self) -> CarveStyle {
        self.style
    }

    #[inline]
    pub fn carve_stats(&self) -> CarveStats {
        self.stats
    }

    pub fn into_grid(self) -> BrickGrid {
        self.grid
    }
}

/// The two cells opened after carving: `(row 1, col 2)` and `(row height - 2, col width - 3)`.
pub fn exit_punctures(width: Width, height: Height) -> [Cartesian2DCoordinate; 2] {
    [Cartesian2DCoordinate::new(2, 1),
     Cartesian2DCoordinate::new((width.0 - 3) as u32, (height.0 - 2) as u32)]
}

fn validate_dimensions(width: Width, height: Height) -> Result<()> {
    let (w, h) = (width.0, height.0);
    let addressable = w <= u32::MAX as usize && h <= u32::MAX as usize && w.checked_mul(h).is_some();
    if w < MIN_SIDE_LENGTH || h < MIN_SIDE_LENGTH || !addressable {
        bail!(ErrorKind::InvalidDimensions(w, h));
    }
    Ok(())
}
