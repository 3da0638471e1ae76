//! Subcommand implementations that run to completion.

use std::path::Path;

use anyhow::{Context, Result};
use render::{read_loops, read_render_blocks};
use rl::EnvConfig;

/// Length statistics over a set of accepted loops.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopSummary {
    pub count: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

#[allow(clippy::cast_precision_loss)]
pub fn summarize(loops: &[Vec<usize>]) -> Option<LoopSummary> {
    let lengths = loops.iter().map(Vec::len);
    let min = lengths.clone().min()?;
    let max = lengths.clone().max()?;
    let total: usize = lengths.sum();
    Some(LoopSummary {
        count: loops.len(),
        min,
        max,
        mean: total as f64 / loops.len() as f64,
    })
}

pub fn loops(log: &Path) -> Result<()> {
    let loops = read_loops(log).with_context(|| format!("reading {}", log.display()))?;
    match summarize(&loops) {
        Some(summary) => tracing::info!(
            count = summary.count,
            min = summary.min,
            max = summary.max,
            mean = summary.mean,
            "accepted loops"
        ),
        None => tracing::info!(path = %log.display(), "no accepted loops recorded"),
    }
    Ok(())
}

pub fn renders(log: &Path, last: usize) -> Result<()> {
    let blocks = read_render_blocks(log).with_context(|| format!("reading {}", log.display()))?;
    let skip = blocks.len().saturating_sub(last);
    for block in &blocks[skip..] {
        println!("Episode: {}, global step = {}", block.episode, block.global_step);
        println!("{}", block.grid);
    }
    tracing::info!(shown = blocks.len() - skip, total = blocks.len(), "render blocks");
    Ok(())
}

pub fn config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(path) => EnvConfig::from_path(path).with_context(|| format!("loading {}", path.display()))?,
        None => EnvConfig::default(),
    };
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
