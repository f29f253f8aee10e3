//! Error types for the library, created by `error_chain!`.
//!
//! Other modules `use crate::errors::*;` to get `Error`, `ErrorKind`, `Result` and `ResultExt`.

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        ImageSave(::image::ImageError);
    }

    errors {
        // Either side is too short for the fixed seed offsets and the lookahead-2 walk,
        // or the cell count does not fit in memory addressing.
        InvalidDimensions(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}: both sides must be at least {} and the cell count addressable",
                    width, height, crate::maze::MIN_SIDE_LENGTH)
        }

        // Block positions or image pixels for this grid and block side do not fit in a u32.
        OversizedScene(width: usize, height: usize, block_side: u32) {
            description("block side too large for the grid")
            display("{}x{} grid at {} per block side is too large for a scene",
                    width, height, block_side)
        }

        // A cell write outside `[0, width) x [0, height)`.
        OutOfBoundsAccess(x: usize, y: usize) {
            description("grid access out of bounds")
            display("grid access out of bounds at x: {}, y: {}", x, y)
        }
    }
}
