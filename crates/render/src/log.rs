use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::LogError;

const HEADER_PREFIX: &str = "Episode: ";
const HEADER_STEP: &str = ", global step = ";

fn append(path: &Path, text: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())
}

/// Append-only record of accepted loops, one JSON array of sites per line.
#[derive(Debug, Clone)]
pub struct LoopLog {
    path: PathBuf,
}

impl LoopLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// # Errors
    ///
    /// Returns [`LogError::Io`] if the file cannot be opened or written.
    pub fn append(&self, trajectory: &[usize]) -> Result<(), LogError> {
        let mut line = serde_json::to_string(trajectory).map_err(io::Error::from)?;
        line.push('\n');
        append(&self.path, &line)?;
        tracing::debug!(path = %self.path.display(), sites = trajectory.len(), "loop appended");
        Ok(())
    }

    /// # Errors
    ///
    /// See [`read_loops`].
    pub fn read(&self) -> Result<Vec<Vec<usize>>, LogError> {
        read_loops(&self.path)
    }
}

/// Reads every loop recorded in a loop-sites log. Blank lines are skipped.
///
/// # Errors
///
/// Returns [`LogError::Io`] when the file cannot be read and
/// [`LogError::Parse`] on the first line that is not an array of sites.
pub fn read_loops(path: impl AsRef<Path>) -> Result<Vec<Vec<usize>>, LogError> {
    let text = fs::read_to_string(path)?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| LogError::Parse { line: i + 1, source })
        })
        .collect()
}

/// Append-only record of canvas snapshots.
#[derive(Debug, Clone)]
pub struct RenderLog {
    path: PathBuf,
}

impl RenderLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `screen` under an `Episode: <n>, global step = <n>` header.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Io`] if the file cannot be opened or written.
    pub fn append(&self, episode: u64, global_step: u64, screen: &str) -> Result<(), LogError> {
        let block = format!("{HEADER_PREFIX}{episode}{HEADER_STEP}{global_step}\n{screen}\n");
        append(&self.path, &block)?;
        tracing::debug!(path = %self.path.display(), episode, global_step, "render appended");
        Ok(())
    }
}

/// One snapshot read back from a render log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderBlock {
    pub episode: u64,
    pub global_step: u64,
    pub grid: String,
}

fn parse_header(line: &str) -> Option<(u64, u64)> {
    let rest = line.strip_prefix(HEADER_PREFIX)?;
    let (episode, step) = rest.split_once(HEADER_STEP)?;
    Some((episode.trim().parse().ok()?, step.trim().parse().ok()?))
}

/// Splits a render log into its snapshots. Text before the first header is
/// ignored.
///
/// # Errors
///
/// Returns [`LogError::Io`] when the file cannot be read and
/// [`LogError::Header`] for a header line with unparsable counters.
pub fn read_render_blocks(path: impl AsRef<Path>) -> Result<Vec<RenderBlock>, LogError> {
    let text = fs::read_to_string(path)?;
    let mut blocks: Vec<RenderBlock> = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.starts_with(HEADER_PREFIX) {
            let (episode, global_step) = parse_header(line).ok_or_else(|| LogError::Header {
                line: i + 1,
                header: line.to_string(),
            })?;
            blocks.push(RenderBlock { episode, global_step, grid: String::new() });
        } else if let Some(block) = blocks.last_mut() {
            block.grid.push_str(line);
            block.grid.push('\n');
        }
    }
    for block in &mut blocks {
        block.grid = block.grid.trim_matches('\n').to_string();
    }
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_canvas;
    use lattice::Lattice;

    fn scratch(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("render-{}-{name}", std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn loops_read_back_in_order() {
        let log = LoopLog::new(scratch("loops.log"));
        log.append(&[3, 4, 8, 7]).unwrap();
        log.append(&[0, 1]).unwrap();
        assert_eq!(log.read().unwrap(), vec![vec![3, 4, 8, 7], vec![0, 1]]);
        let _ = fs::remove_file(log.path());
    }

    #[test]
    fn python_style_lists_parse() {
        let path = scratch("legacy.log");
        fs::write(&path, "[12, 13, 17]\n\n[5]\n").unwrap();
        assert_eq!(read_loops(&path).unwrap(), vec![vec![12, 13, 17], vec![5]]);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn malformed_loop_reports_line() {
        let path = scratch("bad.log");
        fs::write(&path, "[1, 2]\nnot a loop\n").unwrap();
        assert!(matches!(read_loops(&path), Err(LogError::Parse { line: 2, .. })));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn render_blocks_keep_headers_and_grids() {
        let log = RenderLog::new(scratch("renders.log"));
        let lattice = Lattice::new(2);
        let first = render_canvas(&[0.0, 1.0, 0.0, 0.0], lattice, 0).unwrap();
        let second = render_canvas(&[0.0, 0.0, -1.0, 0.0], lattice, 3).unwrap();
        log.append(1, 12, &first).unwrap();
        log.append(4, 40, &second).unwrap();

        let blocks = read_render_blocks(log.path()).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!((blocks[0].episode, blocks[0].global_step), (1, 12));
        assert_eq!((blocks[1].episode, blocks[1].global_step), (4, 40));
        assert_eq!(blocks[0].grid, first.trim_matches('\n'));
        assert!(blocks[1].grid.contains("| o  x |"));
        let _ = fs::remove_file(log.path());
    }

    #[test]
    fn bad_header_is_an_error() {
        let path = scratch("bad-renders.log");
        fs::write(&path, "Episode: one, global step = 2\n").unwrap();
        assert!(matches!(read_render_blocks(&path), Err(LogError::Header { line: 1, .. })));
        let _ = fs::remove_file(&path);
    }
}
