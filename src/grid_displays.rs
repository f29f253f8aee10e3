use std::fmt;

use crate::cells::{Brick, Cartesian2DCoordinate};
use crate::grid::BrickGrid;
use crate::pathing::Distances;

/// Glyph for a cell with a wall block on it (an `Empty` cell).
pub const BLOCK: char = '█';
/// Glyph for an open (`Filled`) cell.
pub const OPEN: char = ' ';

/// Overlay for the text rendering of block cells.
pub trait GridDisplay {
    /// Character drawn on a block cell instead of `BLOCK`, if any.
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> Option<char>;
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> Option<char> {
        // single lowercase hex digit, wrapping for long routes
        self.distance_to(coord).and_then(|d| std::char::from_digit(d % 16, 16))
    }
}

/// The block layout as text, one line per grid row, top border first.
impl fmt::Display for BrickGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", TextRender::new(self))
    }
}

/// Text rendering of a grid with an optional overlay on its block cells.
pub struct TextRender<'a> {
    grid: &'a BrickGrid,
    overlay: Option<&'a dyn GridDisplay>,
}

impl<'a> TextRender<'a> {
    pub fn new(grid: &'a BrickGrid) -> TextRender<'a> {
        TextRender {
            grid: grid,
            overlay: None,
        }
    }

    pub fn with_overlay(grid: &'a BrickGrid, overlay: &'a dyn GridDisplay) -> TextRender<'a> {
        TextRender {
            grid: grid,
            overlay: Some(overlay),
        }
    }
}

impl<'a> fmt::Debug for TextRender<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TextRender :: grid: {:?}, overlay: {}", self.grid, self.overlay.is_some())
    }
}

impl<'a> fmt::Display for TextRender<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (y, row) in self.grid.rows().enumerate() {
            let line: String = row.iter()
                .enumerate()
                .map(|(x, brick)| match *brick {
                    Brick::Filled => OPEN,
                    Brick::Empty => {
                        let coord = Cartesian2DCoordinate::new(x as u32, y as u32);
                        self.overlay
                            .and_then(|o| o.render_cell_body(coord))
                            .unwrap_or(BLOCK)
                    }
                })
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
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
    fn blocks_on_empty_cells() {
        assert_eq!(format!("{}", sample_grid()), "██\n █\n");
    }

    #[test]
    fn distance_overlay() {
        let g = sample_grid();
        let d = Distances::new(&g, Cartesian2DCoordinate::new(0, 0)).unwrap();
        assert_eq!(TextRender::with_overlay(&g, &d).to_string(), "01\n 2\n");
    }
}
