#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Loop Renderer and Logs
//!
//! Human-readable output of the loop environment:
//!
//! -   [`ascii`] turns the canvas map into a fixed-glyph text grid with the
//!     trajectory start highlighted.
//! -   [`log`] owns the two append-only files: the loop-sites log (one JSON
//!     array of site indices per accepted loop) and the render log (grid
//!     snapshots headed by episode and global step).
//!
//! Every append opens, writes and closes the file within the call. No handle
//! outlives a write.

use thiserror::Error;

pub mod ascii;
pub mod log;

pub use ascii::{glyph, render_canvas, START_MARKER};
pub use log::{read_loops, read_render_blocks, LoopLog, RenderBlock, RenderLog};

#[derive(Error, Debug)]
pub enum LogError {
    #[error("log i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed loop entry on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed render header on line {line}: {header:?}")]
    Header { line: usize, header: String },
}
