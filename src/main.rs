use brickmaze::{
    generators::{CarveStyle, RandomDirections},
    grid_displays::TextRender,
    layout::BlockLayout,
    maze::{Maze, SEED},
    pathing::Distances,
    renderers,
    units::{BlockSide, Height, Width},
};
use docopt::Docopt;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    path::Path,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Brick mazes

Usage:
    brickmaze_driver -h | --help
    brickmaze_driver [(--size=<n>|[--width=<w> --height=<h>])] [--seed=<s>] [--single-run] [--text-out=<path>] [--show-distances] [--image-out=<path>] [--block-pixels=<n>] [--colour-distances] [--save-grid=<path>] [--verbose]

Options:
    -h --help              Show this screen.
    --size=<n>             The grid size is n * n.
    --width=<w>            The grid width in a w*h grid [default: 14].
    --height=<h>           The grid height in a w*h grid [default: 14].
    --seed=<s>             Seed for the carving walk's random directions, random if not given.
    --single-run           Stop each walk frame after its first carve, giving one unbranched run.
    --text-out=<path>      Output file path for the text rendering of the maze instead of printing it.
    --show-distances       Show the distance (hex, wrapping) from the seed cell on every reachable block.
    --image-out=<path>     Output file path for a PNG rendering of the maze's blocks.
    --block-pixels=<n>     Pixel count for one block side in the image [default: 50].
    --colour-distances     Shade image blocks by their distance from the seed cell.
    --save-grid=<path>     Save the grid as text: a 'width height' line then a line of 0 (Empty) / 1 (Filled) per row.
    --verbose              Debug level logging, otherwise RUST_LOG or 'info'.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_size: Option<usize>,
    flag_width: usize,
    flag_height: usize,
    flag_seed: Option<u64>,
    flag_single_run: bool,
    flag_text_out: String,
    flag_show_distances: bool,
    flag_image_out: String,
    flag_block_pixels: u32,
    flag_colour_distances: bool,
    flag_save_grid: String,
    flag_verbose: bool,
}

// The driver's errors chain the library errors and the command line parsing errors.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::brickmaze::errors::Error, ::brickmaze::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    init_logging(args.flag_verbose);

    let (width, height) = if let Some(square_grid_size) = args.flag_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_width, args.flag_height)
    };
    let style = if args.flag_single_run {
        CarveStyle::SingleRun
    } else {
        CarveStyle::Backtracking
    };
    let rng = match args.flag_seed {
        Some(seed) => XorShiftRng::seed_from_u64(seed),
        None => XorShiftRng::from_entropy(),
    };

    let maze = Maze::with_style(Width(width), Height(height), &mut RandomDirections::new(rng), style)
        .chain_err(|| "Failed to generate maze")?;
    let layout = BlockLayout::new(maze.grid(), BlockSide(args.flag_block_pixels))
        .chain_err(|| "Failed to lay out maze blocks")?;
    info!(width = width, height = height, blocks = layout.len(), "generated maze");
    debug!("{:?}", maze.carve_stats());

    let distances = if args.flag_show_distances || args.flag_colour_distances {
        Distances::new(maze.grid(), SEED)
    } else {
        None
    };

    let text = match distances.as_ref() {
        Some(d) if args.flag_show_distances => TextRender::with_overlay(maze.grid(), d).to_string(),
        _ => TextRender::new(maze.grid()).to_string(),
    };
    if args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_image_out.is_empty() {
        let colour_by = if args.flag_colour_distances {
            distances.as_ref()
        } else {
            None
        };
        let render_options = renderers::RenderOptionsBuilder::new()
            .block_side(layout.block_side())
            .colour_distances(colour_by)
            .output_file(Some(Path::new(&args.flag_image_out)))
            .build();
        renderers::render_blocks(maze.grid(), &render_options)?;
    }

    if !args.flag_save_grid.is_empty() {
        let mut f = File::create(&args.flag_save_grid)
            .chain_err(|| format!("Failed to create grid file {}", args.flag_save_grid))?;
        maze.grid().write_text(&mut f)?;
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
