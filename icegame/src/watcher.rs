use std::io::ErrorKind;
use std::path::Path;
use std::sync::mpsc;

use anyhow::{Context, Result};
use notify::{Event, RecursiveMode, Watcher as NotifyWatcher};
use render::{read_loops, LogError};
use tracing::info;

/// Loops in `path`. A log that does not exist yet holds none.
fn current_loops(path: &Path) -> Result<Vec<Vec<usize>>, LogError> {
    match read_loops(path) {
        Err(LogError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        other => other,
    }
}

/// Reports loops appended after `already_seen`, returns the new total.
fn report_new_loops(path: &Path, already_seen: usize) -> Result<usize> {
    let loops = current_loops(path)?;
    for (index, sites) in loops.iter().enumerate().skip(already_seen) {
        info!(index, length = sites.len(), ?sites, "loop accepted");
    }
    Ok(loops.len())
}

/// Directory holding `path`, so the log can be watched before it exists.
fn watch_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Whether an event path names the loop log.
fn is_loop_log(event_path: &Path, path: &Path) -> bool {
    event_path.file_name().is_some() && event_path.file_name() == path.file_name()
}

/// Blocks, logging each loop appended to `path` until the watcher stops.
pub fn follow(path: &Path) -> Result<()> {
    let mut seen = current_loops(path)
        .with_context(|| format!("reading {}", path.display()))?
        .len();
    info!(path = %path.display(), existing = seen, "watching loop log");

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        let _ = tx.send(res);
    })?;
    let dir = watch_dir(path);
    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("watching {}", dir.display()))?;

    for res in rx {
        match res {
            Ok(event)
                if (event.kind.is_modify() || event.kind.is_create())
                    && event.paths.iter().any(|p| is_loop_log(p, path)) =>
            {
                match report_new_loops(path, seen) {
                    Ok(total) => seen = total,
                    // The writer may be mid-append; the next event retries.
                    Err(e) => tracing::warn!("Skipping unreadable loop log: {e:?}"),
                }
            }
            Ok(_) => {}
            Err(e) => tracing::error!("Error watching loop log: {e:?}"),
        }
    }
    Ok(())
}
