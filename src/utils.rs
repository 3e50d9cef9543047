use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, ConvertResult};

/// Progress bar over the annotation files; the message shows the file being converted.
///
/// Drawing goes to stderr and is skipped automatically when stderr is not a terminal.
pub fn create_progress_bar(len: u64) -> ProgressBar {
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("#>-");
    ProgressBar::new(len).with_style(style)
}

/// Make sure the output directory exists and return its path.
///
/// Unlike a fresh dataset export, existing files are kept: only the label files
/// of the current run are regenerated.
pub fn create_output_directory(path: &Path) -> ConvertResult<PathBuf> {
    if path.is_dir() {
        log::debug!("Output directory {:?} already exists", path);
    } else {
        fs::create_dir_all(path).map_err(|e| ConvertError::io(path, e))?;
    }
    Ok(path.to_path_buf())
}
