use std::collections::HashMap;
use std::hash::BuildHasherDefault;

use bit_set::BitSet;
use fnv::FnvHasher;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cells::{Brick, Cartesian2DCoordinate, CompassPrimary, ALL_DIRECTIONS};
use crate::grid::BrickGrid;

pub type FnvHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;
pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// The in-grid cells North, South, East or West of `coord`, whatever their state.
pub fn neighbours(grid: &BrickGrid, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
    ALL_DIRECTIONS.iter()
        .filter_map(|&dir: &CompassPrimary| coord.offset(dir, 1))
        .filter(|&c| grid.is_valid_coordinate(c))
        .collect()
}

/// Neighbouring cells that are `Empty`, the steps a flood fill can take.
pub fn open_neighbours(grid: &BrickGrid, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
    neighbours(grid, coord)
        .into_iter()
        .filter(|&c| grid.get(c) == Some(Brick::Empty))
        .collect()
}

/// Step counts from a start cell to every `Empty` cell it connects to through `Empty` cells.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill out from `start_coordinate`.
    ///
    /// Returns None if the start is outside the grid or not `Empty`.
    pub fn new(grid: &BrickGrid, start_coordinate: Cartesian2DCoordinate) -> Option<Distances> {

        if grid.get(start_coordinate) != Some(Brick::Empty) {
            return None;
        }

        let fnv = BuildHasherDefault::<FnvHasher>::default();
        let mut distances = FnvHashMap::with_capacity_and_hasher(grid.size(), fnv);
        distances.insert(start_coordinate, 0);
        let mut max = 0;

        // Unweighted steps: the first time a cell is reached is by a shortest route, so the map doubles as
        // the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for next in open_neighbours(grid, *cell_coord) {
                    if !distances.contains_key(&next) {
                        distances.insert(next, distance_to_cell + 1);
                        new_frontier.push(next);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate: start_coordinate,
            distances: distances,
            max_distance: max,
        })
    }

    #[inline]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline]
    pub fn distance_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// Number of cells reached, the start included.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// Every cell at the maximum distance, sorted.
    pub fn furthest_points(&self) -> Vec<Cartesian2DCoordinate> {
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, &d)| d == self.max_distance)
            .map(|(&c, _)| c)
            .collect::<Vec<_>>();
        furthest.sort();
        furthest
    }
}

/// Row major indices of the `Empty` cells connected to `start`. Empty if `start` is not an `Empty` cell.
pub fn reachable_from(grid: &BrickGrid, start: Cartesian2DCoordinate) -> BitSet {
    let mut reached = BitSet::with_capacity(grid.size());
    if grid.get(start) != Some(Brick::Empty) {
        return reached;
    }

    let mut stack = vec![start];
    while let Some(coord) = stack.pop() {
        let index = match grid.grid_coordinate_to_index(coord) {
            Some(i) => i,
            None => continue,
        };
        if reached.insert(index) {
            stack.extend(open_neighbours(grid, coord));
        }
    }
    reached
}

/// How many separate 4-connected regions of `Empty` cells the grid has.
pub fn empty_regions(grid: &BrickGrid) -> usize {
    let mut regions = UnionFind::<usize>::new(grid.size());

    for coord in grid.iter() {
        if grid.get(coord) != Some(Brick::Empty) {
            continue;
        }
        let index = grid.grid_coordinate_to_index(coord);
        // East and South are enough to see every adjacent pair once.
        for &dir in &[CompassPrimary::East, CompassPrimary::South] {
            let other = coord.offset(dir, 1)
                .filter(|&c| grid.get(c) == Some(Brick::Empty))
                .and_then(|c| grid.grid_coordinate_to_index(c));
            if let (Some(a), Some(b)) = (index, other) {
                let _ = regions.union(a, b);
            }
        }
    }

    let labels = regions.into_labeling();
    grid.iter()
        .filter_map(|coord| grid.grid_coordinate_to_index(coord).map(|i| (coord, i)))
        .filter(|&(coord, i)| grid.get(coord) == Some(Brick::Empty) && labels[i] == i)
        .count()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Height, Width};
    use itertools::Itertools;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    /// Grid from rows of `#` (Empty) and `.` (Filled).
    fn grid_from(rows: &[&str]) -> BrickGrid {
        let mut g = BrickGrid::filled(Width(rows[0].len()), Height(rows.len()));
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    g.set(gc(x as u32, y as u32), Brick::Empty).unwrap();
                }
            }
        }
        g
    }

    #[test]
    fn neighbour_cells() {
        let g = BrickGrid::filled(Width(10), Height(10));
        let check_expected_neighbours = |coord, expected_neighbours: &[Cartesian2DCoordinate]| {
            let found: Vec<Cartesian2DCoordinate> = neighbours(&g, coord).into_iter().sorted().collect();
            let expected: Vec<Cartesian2DCoordinate> = expected_neighbours.iter().cloned().sorted().collect();
            assert_eq!(found, expected);
        };

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);
        // side
        check_expected_neighbours(gc(0, 8), &[gc(1, 8), gc(0, 7), gc(0, 9)]);
        // inside
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);
    }

    #[test]
    fn distances_need_an_empty_start() {
        let g = grid_from(&["#.", ".."]);
        assert!(Distances::new(&g, gc(1, 1)).is_none());
        assert!(Distances::new(&g, gc(5, 5)).is_none());
        assert!(Distances::new(&g, gc(0, 0)).is_some());
    }

    #[test]
    fn distances_follow_empty_cells() {
        let g = grid_from(&["###.#",
                            "..#.#",
                            "..###"]);
        let d = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(d.start(), gc(0, 0));
        assert_eq!(d.distance_to(gc(0, 0)), Some(0));
        assert_eq!(d.distance_to(gc(2, 0)), Some(2));
        assert_eq!(d.distance_to(gc(2, 2)), Some(4));
        assert_eq!(d.distance_to(gc(4, 0)), Some(8));
        assert_eq!(d.distance_to(gc(3, 0)), None);
        assert_eq!(d.distance_to(gc(0, 1)), None);
        assert_eq!(d.max(), 8);
        assert_eq!(d.furthest_points(), vec![gc(4, 0)]);
        assert_eq!(d.reachable_count(), 9);
    }

    #[test]
    fn reachable_sets() {
        let g = grid_from(&["##.#",
                            "#..#",
                            "...#"]);
        let from_corner = reachable_from(&g, gc(0, 0));
        assert_eq!(from_corner.iter().collect::<Vec<_>>(), vec![0, 1, 4]);
        let from_right = reachable_from(&g, gc(3, 2));
        assert_eq!(from_right.len(), 3);
        assert!(reachable_from(&g, gc(2, 0)).is_empty());
    }

    #[test]
    fn region_counting() {
        assert_eq!(empty_regions(&grid_from(&["...", "..."])), 0);
        assert_eq!(empty_regions(&grid_from(&["#.#", "..."])), 2);
        assert_eq!(empty_regions(&grid_from(&["###", "#.#", "###"])), 1);
        assert_eq!(empty_regions(&grid_from(&["#.#", ".#.", "#.#"])), 5);
    }
}
