//! Writing referenced media to disk.

use crate::presentation::Presentation;
use slidemark_core::{Error, ExportNames, Result};
use std::fs;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

/// Outcome of an image export.
#[derive(Debug, Default)]
pub struct ExportSummary {
    /// Number of image files written.
    pub exported: usize,

    /// Directory the images were written to; `None` when nothing was referenced.
    pub output_dir: Option<PathBuf>,

    /// Per-image failures. These do not stop the remaining images.
    pub failures: Vec<Error>,
}

/// Write each media path in `names` once, under its export name.
///
/// `output_dir` is created only when at least one image is referenced.
/// Failing to create it is an error; failing to read or write an
/// individual image is recorded in [`ExportSummary::failures`].
pub fn export_images<R: Read + Seek>(
    pres: &mut Presentation<R>,
    names: &ExportNames,
    output_dir: &Path,
) -> Result<ExportSummary> {
    let mut summary = ExportSummary::default();
    if names.is_empty() {
        return Ok(summary);
    }

    fs::create_dir_all(output_dir).map_err(|e| Error::WriteFailed {
        path: output_dir.display().to_string(),
        source: e,
    })?;
    summary.output_dir = Some(output_dir.to_path_buf());

    for (media_path, file_name) in names.iter() {
        let target = output_dir.join(file_name);
        match write_media(pres, media_path, &target) {
            Ok(()) => {
                log::debug!("Exported {} -> {}", media_path, target.display());
                summary.exported += 1;
            }
            Err(e) => {
                log::warn!("Skipping image {}: {}", media_path, e);
                summary.failures.push(e);
            }
        }
    }

    Ok(summary)
}

fn write_media<R: Read + Seek>(
    pres: &mut Presentation<R>,
    media_path: &str,
    target: &Path,
) -> Result<()> {
    let data = pres.read_media(media_path)?;
    fs::write(target, data).map_err(|e| Error::WriteFailed {
        path: target.display().to_string(),
        source: e,
    })
}
