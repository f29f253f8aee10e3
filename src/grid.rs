use std::fmt;
use std::io;
use std::slice;

use crate::cells::{Brick, Cartesian2DCoordinate};
use crate::errors::*;
use crate::units::{ColumnIndex, Height, RowIndex, Width};


/// Fixed size rectangle of bricks stored row major.
///
/// Reads outside the grid give `None`, writes outside the grid are an `OutOfBoundsAccess` error.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BrickGrid {
    bricks: Vec<Brick>,
    width: usize,
    height: usize,
}

impl fmt::Debug for BrickGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BrickGrid :: width: {}, height: {}, empty: {}",
               self.width, self.height, self.count(Brick::Empty))
    }
}

impl BrickGrid {
    /// Every cell starts `Filled`.
    ///
    /// No validation is done here beyond what `Vec` allocation requires, `Maze` checks the dimensions
    /// it accepts before building a grid.
    pub fn filled(width: Width, height: Height) -> BrickGrid {
        BrickGrid {
            bricks: vec![Brick::Filled; width.0 * height.0],
            width: width.0,
            height: height.0,
        }
    }

    #[inline]
    pub fn width(&self) -> Width {
        Width(self.width)
    }

    #[inline]
    pub fn height(&self) -> Height {
        Height(self.height)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.bricks.len()
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width && (coord.y as usize) < self.height
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    pub fn index_to_grid_coordinate(&self, index: usize) -> Option<Cartesian2DCoordinate> {
        if index < self.size() {
            Some(Cartesian2DCoordinate::new((index % self.width) as u32,
                                            (index / self.width) as u32))
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, coord: Cartesian2DCoordinate) -> Option<Brick> {
        self.grid_coordinate_to_index(coord).map(|i| self.bricks[i])
    }

    /// `[row][col]` style lookup.
    #[inline]
    pub fn brick_at(&self, row: RowIndex, column: ColumnIndex) -> Option<Brick> {
        self.row(row).and_then(|bricks| bricks.get(column.0).cloned())
    }

    /// Is the cell inside the grid and still `Filled`? Cells outside the grid never are.
    #[inline]
    pub fn is_filled(&self, coord: Cartesian2DCoordinate) -> bool {
        self.get(coord).map_or(false, Brick::is_filled)
    }

    pub fn set(&mut self, coord: Cartesian2DCoordinate, brick: Brick) -> Result<()> {
        match self.grid_coordinate_to_index(coord) {
            Some(i) => {
                self.bricks[i] = brick;
                Ok(())
            }
            None => bail!(ErrorKind::OutOfBoundsAccess(coord.x as usize, coord.y as usize)),
        }
    }

    pub fn set_row(&mut self, row: RowIndex, brick: Brick) -> Result<()> {
        if row.0 >= self.height {
            bail!(ErrorKind::OutOfBoundsAccess(0, row.0));
        }
        let start = row.0 * self.width;
        for b in &mut self.bricks[start..start + self.width] {
            *b = brick;
        }
        Ok(())
    }

    pub fn set_column(&mut self, column: ColumnIndex, brick: Brick) -> Result<()> {
        if column.0 >= self.width {
            bail!(ErrorKind::OutOfBoundsAccess(column.0, 0));
        }
        for b in self.bricks.iter_mut().skip(column.0).step_by(self.width) {
            *b = brick;
        }
        Ok(())
    }

    #[inline]
    pub fn row(&self, row: RowIndex) -> Option<&[Brick]> {
        if row.0 < self.height {
            let start = row.0 * self.width;
            Some(&self.bricks[start..start + self.width])
        } else {
            None
        }
    }

    /// Rows from the top border (row 0) downwards.
    pub fn rows(&self) -> slice::Chunks<Brick> {
        self.bricks.chunks(self.width.max(1))
    }

    /// Coordinates of every cell in row major order.
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_index: 0,
            cells_count: self.size(),
            width: self.width,
        }
    }

    /// Owned `[row][col]` copy for consumers that want to keep their own mutable version.
    pub fn to_rows(&self) -> Vec<Vec<Brick>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    pub fn count(&self, brick: Brick) -> usize {
        self.bricks.iter().filter(|&&b| b == brick).count()
    }

    /// Write a plain text dump: a `width height` header line then one line per row, `0` for `Empty` and `1`
    /// for `Filled`.
    pub fn write_text<W: io::Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{} {}", self.width, self.height)?;
        for row in self.rows() {
            let line: String = row.iter()
                .map(|b| match *b {
                    Brick::Empty => '0',
                    Brick::Filled => '1',
                })
                .collect();
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_index: usize,
    cells_count: usize,
    width: usize,
}

impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index < self.cells_count {
            let coord = Cartesian2DCoordinate::new((self.current_index % self.width) as u32,
                                                   (self.current_index / self.width) as u32);
            self.current_index += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_index;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()
