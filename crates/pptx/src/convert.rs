//! One-call conversion of a `.pptx` file to Markdown plus exported images.

use crate::presentation::Presentation;
use slidemark_core::{Error, MarkdownRenderer, Result};
use std::path::{Path, PathBuf};

/// Options for [`convert`].
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Image directory name, relative to the input file's directory.
    /// Defaults to `<input stem>_images`.
    pub image_dir: Option<String>,
}

impl ConvertOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom image directory name.
    pub fn with_image_dir(mut self, image_dir: impl Into<String>) -> Self {
        self.image_dir = Some(image_dir.into());
        self
    }
}

/// Result of converting one file.
#[derive(Debug)]
pub struct Conversion {
    /// The rendered document.
    pub markdown: String,

    /// Where images were written; `None` when the deck references none.
    pub image_dir: Option<PathBuf>,

    /// Number of image files written.
    pub exported: usize,

    /// Images that could not be exported.
    pub failures: Vec<Error>,
}

/// Parse `input`, export its images next to it, and render Markdown.
///
/// The Markdown is returned, not written; see [`markdown_path`] for where
/// callers conventionally put it.
pub fn convert(input: impl AsRef<Path>, options: &ConvertOptions) -> Result<Conversion> {
    let input = input.as_ref();
    let mut pres = Presentation::open(input)?;

    let image_dir = options
        .image_dir
        .clone()
        .unwrap_or_else(|| default_image_dir(input));
    let output_dir = input
        .parent()
        .map(|dir| dir.join(&image_dir))
        .unwrap_or_else(|| PathBuf::from(&image_dir));

    let names = pres.export_names();
    let summary = crate::export::export_images(&mut pres, &names, &output_dir)?;
    let markdown = MarkdownRenderer::new(image_dir).render(pres.slides(), &names);
    pres.close();

    Ok(Conversion {
        markdown,
        image_dir: summary.output_dir,
        exported: summary.exported,
        failures: summary.failures,
    })
}

/// Markdown output path: the input with its extension replaced by `.md`.
pub fn markdown_path(input: &Path) -> PathBuf {
    input.with_extension("md")
}

/// Default image directory name: input file stem plus `_images`.
pub fn default_image_dir(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    format!("{}_images", stem)
}
