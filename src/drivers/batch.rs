use std::path::{Path, PathBuf};
use log::info;
use crate::drivers::csv_trace::{load_trace_csv, LoadedTrace};
use crate::drivers::error::FileLoadError;
/// Result of loading one file selection.
#[derive(Debug)]
pub enum BatchOutcome {
    /// The selection was empty; nothing to show.
    Cancelled,
    Loaded(PlotBatch),
}
/// Figures ready to display, plus the export directory they leave behind.
#[derive(Debug)]
pub struct PlotBatch {
    pub figures: Vec<LoadedTrace>,
    /// Directory of the last file loaded; the default for figure exports.
    pub export_dir: PathBuf,
}
/// Loads every path in order. The first file that cannot be loaded aborts the
/// whole batch.
pub fn load_batch(paths: &[PathBuf]) -> Result<BatchOutcome, FileLoadError> {
    let Some(last) = paths.last() else {
        info!("empty file selection, nothing to plot");
        return Ok(BatchOutcome::Cancelled);
    };
    let figures = paths
        .iter()
        .map(|path| load_trace_csv(path))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(BatchOutcome::Loaded(PlotBatch {
        figures,
        export_dir: export_dir_for(last),
    }))
}
pub fn export_dir_for(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
