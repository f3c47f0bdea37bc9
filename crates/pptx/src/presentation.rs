//! A parsed presentation and access to its media.

use crate::archive::Archive;
use crate::export::{export_images, ExportSummary};
use crate::order::slide_order;
use crate::slide::assemble_slide;
use slidemark_core::{Error, ExportNames, MarkdownRenderer, Result, Slide};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Slides in presentation order, plus the open package they came from.
#[derive(Debug)]
pub struct Presentation<R: Read + Seek = BufReader<File>> {
    archive: Archive<R>,
    slides: Vec<Slide>,
}

impl Presentation<BufReader<File>> {
    /// Open and parse a `.pptx` file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::parse(Archive::open(path)?)
    }
}

impl<R: Read + Seek> Presentation<R> {
    /// Parse a package from any seekable reader. `name` is used in errors.
    pub fn from_reader(reader: R, name: impl Into<String>) -> Result<Self> {
        Self::parse(Archive::from_reader(reader, name)?)
    }

    /// Resolve slide order and assemble every slide.
    ///
    /// On error the archive is dropped before the error is returned.
    pub fn parse(mut archive: Archive<R>) -> Result<Self> {
        let order = slide_order(&mut archive)?;

        let mut slides = Vec::with_capacity(order.len());
        for (idx, slide_path) in order.iter().enumerate() {
            slides.push(assemble_slide(&mut archive, slide_path, idx + 1)?);
        }

        log::debug!("Parsed {} slides from {}", slides.len(), archive.name());
        Ok(Self { archive, slides })
    }

    /// Slides in presentation order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the presentation has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Name the package was opened under.
    pub fn name(&self) -> &str {
        self.archive.name()
    }

    /// Raw bytes of a media part, e.g. `ppt/media/image1.png`.
    pub fn read_media(&mut self, media_path: &str) -> Result<Vec<u8>> {
        self.archive.read_entry(media_path).map_err(|e| match e {
            Error::PartMissing { path } => Error::MediaNotFound { path },
            other => other,
        })
    }

    /// Export names for every resolved image, in slide order.
    pub fn export_names(&self) -> ExportNames {
        ExportNames::from_slides(&self.slides)
    }

    /// Render the slides as Markdown, linking images under `image_dir`.
    pub fn to_markdown(&self, image_dir: &str) -> String {
        MarkdownRenderer::new(image_dir).render(&self.slides, &self.export_names())
    }

    /// Write every referenced image into `output_dir`.
    pub fn export_images(&mut self, output_dir: impl AsRef<Path>) -> Result<ExportSummary> {
        let names = self.export_names();
        export_images(self, &names, output_dir.as_ref())
    }

    /// Release the package. Slides stay readable; media reads fail afterwards.
    pub fn close(&mut self) {
        self.archive.close();
    }
}
