use rand::Rng;
use tracing::trace;

use crate::cells::{Brick, Cartesian2DCoordinate, CompassPrimary};
use crate::grid::BrickGrid;


/// Where the carving walk gets its directions from: a uniform pick over the 4 `CompassPrimary` values.
///
/// Each maze owns its source, so independent mazes never share generator state.
pub trait DirectionSource {
    fn next_direction(&mut self) -> CompassPrimary;
}

/// Uniform random directions from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomDirections<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomDirections<R> {
    pub fn new(rng: R) -> RandomDirections<R> {
        RandomDirections { rng: rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> DirectionSource for RandomDirections<R> {
    #[inline]
    fn next_direction(&mut self) -> CompassPrimary {
        CompassPrimary::rand_direction(&mut self.rng)
    }
}

/// Replays a fixed sequence of directions, starting again from the front when it runs out.
/// An empty script always answers `East`.
#[derive(Debug, Clone)]
pub struct ScriptedDirections {
    script: Vec<CompassPrimary>,
    position: usize,
    picks: usize,
}

impl ScriptedDirections {
    pub fn new(script: Vec<CompassPrimary>) -> ScriptedDirections {
        ScriptedDirections {
            script: script,
            position: 0,
            picks: 0,
        }
    }

    /// Script from direction indices, `0 = East, 1 = West, 2 = South, 3 = North`.
    pub fn from_indices(indices: &[usize]) -> ScriptedDirections {
        ScriptedDirections::new(indices.iter().cloned().map(CompassPrimary::from_index).collect())
    }

    /// How many directions have been handed out so far.
    pub fn picks(&self) -> usize {
        self.picks
    }
}

impl DirectionSource for ScriptedDirections {
    fn next_direction(&mut self) -> CompassPrimary {
        self.picks += 1;
        if self.script.is_empty() {
            return CompassPrimary::East;
        }
        let dir = self.script[self.position];
        self.position = (self.position + 1) % self.script.len();
        dir
    }
}

/// What a walk frame does once the walk it started by carving has finished.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CarveStyle {
    /// Resume the frame's round-robin from the direction that carved. That direction now fails the
    /// lookahead so the frame moves on to its remaining directions, giving a branching maze that covers
    /// every reachable frontier cell.
    Backtracking,
    /// The frame ends as soon as it has carved once, so the maze is a single unbranched run.
    SingleRun,
}

impl Default for CarveStyle {
    fn default() -> CarveStyle {
        CarveStyle::Backtracking
    }
}

/// Counters describing one complete carving walk.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct CarveStats {
    /// Frontier cells a frame was opened at, including the start.
    pub frames: usize,
    /// Cells switched from `Filled` to `Empty`, two per passage.
    pub carved_cells: usize,
    /// Directions that failed the lookahead.
    pub rejected_directions: usize,
    /// Deepest the frame stack got, the recursion depth of the equivalent recursive walk.
    pub max_depth: usize,
}

#[derive(Debug, Copy, Clone)]
struct WalkFrame {
    at: Cartesian2DCoordinate,
    direction: CompassPrimary,
    attempts: u8,
}

/// A frame has tried every direction once it has made this many attempts.
const DIRECTION_ATTEMPTS: u8 = 4;

/// Randomized depth first carve with a lookahead of two cells.
///
/// From each frontier cell a random first direction is picked, then directions are tried round-robin
/// (`(index + 1) mod 4`) until one passes the lookahead: the cells one and two steps away must both be
/// inside the grid and `Filled`. Both get carved to `Empty` and a new frame opens on the far cell with a
/// fresh random direction. A frame that rejects all 4 directions ends.
///
/// The walk uses an explicit stack rather than recursion, consuming directions from `directions` in the
/// same order the recursive form would.
pub fn carve_passages<D>(grid: &mut BrickGrid,
                         start: Cartesian2DCoordinate,
                         directions: &mut D,
                         style: CarveStyle)
                         -> CarveStats
    where D: DirectionSource + ?Sized
{
    let mut stats = CarveStats::default();
    let mut stack = vec![WalkFrame {
                             at: start,
                             direction: directions.next_direction(),
                             attempts: 0,
                         }];
    stats.frames = 1;
    stats.max_depth = 1;

    loop {
        let next_frontier = match stack.last_mut() {
            None => break,
            Some(frame) => {
                if frame.attempts >= DIRECTION_ATTEMPTS {
                    None
                } else if let Some((one_step, two_step)) = lookahead(grid, frame.at, frame.direction) {
                    carve_cell(grid, one_step);
                    carve_cell(grid, two_step);
                    stats.carved_cells += 2;
                    trace!("carved {} -> {} heading {:?}", frame.at, two_step, frame.direction);

                    if style == CarveStyle::SingleRun {
                        frame.attempts = DIRECTION_ATTEMPTS;
                    }
                    Some(two_step)
                } else {
                    frame.direction = frame.direction.round_robin_next();
                    frame.attempts += 1;
                    stats.rejected_directions += 1;
                    continue;
                }
            }
        };

        match next_frontier {
            Some(at) => {
                stack.push(WalkFrame {
                    at: at,
                    direction: directions.next_direction(),
                    attempts: 0,
                });
                stats.frames += 1;
                if stack.len() > stats.max_depth {
                    stats.max_depth = stack.len();
                }
            }
            None => {
                let _ = stack.pop();
            }
        }
    }

    stats
}

/// The one and two step cells in `direction` if both are inside the grid and still `Filled`.
#[inline]
fn lookahead(grid: &BrickGrid,
             from: Cartesian2DCoordinate,
             direction: CompassPrimary)
             -> Option<(Cartesian2DCoordinate, Cartesian2DCoordinate)> {
    let one_step = from.offset(direction, 1)?;
    if !grid.is_filled(one_step) {
        return None;
    }
    let two_step = from.offset(direction, 2)?;
    if !grid.is_filled(two_step) {
        return None;
    }
    Some((one_step, two_step))
}

/// Only ever called on cells that `lookahead` has bounds checked.
#[inline]
fn carve_cell(grid: &mut BrickGrid, coord: Cartesian2DCoordinate) {
    if let Err(e) = grid.set(coord, Brick::Empty) {
        debug_assert!(false, "carving walk escaped the grid: {}", e);
    }
}
