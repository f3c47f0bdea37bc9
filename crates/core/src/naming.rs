//! Export filenames for media referenced by slides.
//!
//! Several media parts can share a basename (`ppt/media/img.png` and
//! `ppt/embeddings/img.png`), so every distinct media path is given a unique
//! file name before anything is rendered or written. The same table is used
//! by the Markdown renderer for link targets and by the image exporter for
//! the files it writes.

use crate::types::Slide;
use std::collections::{HashMap, HashSet};

/// Mapping from archive media path to its export file name.
#[derive(Debug, Clone, Default)]
pub struct ExportNames {
    /// (media path, file name) in first-reference order.
    entries: Vec<(String, String)>,
    by_path: HashMap<String, usize>,
    taken: HashSet<String>,
    collisions: HashMap<String, usize>,
}

impl ExportNames {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from every resolved image reference, in slide order.
    pub fn from_slides(slides: &[Slide]) -> Self {
        let mut names = Self::new();
        for slide in slides {
            for image in slide.resolved_images() {
                names.assign(&image.media_path);
            }
        }
        names
    }

    /// Return the export name for `media_path`, assigning one on first use.
    ///
    /// The first reference to a basename keeps it. Later media paths with the
    /// same basename get `<stem>_<n>.<ext>`, where `n` counts the collisions
    /// seen for that basename so far.
    pub fn assign(&mut self, media_path: &str) -> &str {
        if let Some(&idx) = self.by_path.get(media_path) {
            return &self.entries[idx].1;
        }

        let base = basename(media_path);
        let name = if self.taken.contains(base) {
            let counter = self.collisions.entry(base.to_string()).or_insert(0);
            loop {
                *counter += 1;
                let candidate = with_suffix(base, *counter);
                if !self.taken.contains(&candidate) {
                    break candidate;
                }
            }
        } else {
            base.to_string()
        };

        if name != base {
            log::debug!("Renaming {} to {} to avoid a filename collision", media_path, name);
        }

        self.taken.insert(name.clone());
        self.by_path.insert(media_path.to_string(), self.entries.len());
        self.entries.push((media_path.to_string(), name));
        &self.entries[self.entries.len() - 1].1
    }

    /// Export name for a media path already in the table.
    pub fn get(&self, media_path: &str) -> Option<&str> {
        self.by_path
            .get(media_path)
            .map(|&idx| self.entries[idx].1.as_str())
    }

    /// (media path, file name) pairs, one per distinct media path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }

    /// Number of distinct media paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no media is referenced.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Insert `_<n>` before the extension: `img.png` -> `img_1.png`.
fn with_suffix(file_name: &str, n: usize) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}_{}.{}", stem, n, ext),
        _ => format!("{}_{}", file_name, n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImageRef, SlideBuilder};

    fn slide_with_images(index: usize, paths: &[&str]) -> Slide {
        let mut builder = SlideBuilder::new();
        for (i, path) in paths.iter().enumerate() {
            builder.add_image(ImageRef {
                rel_id: format!("rId{}", i + 1),
                media_path: path.to_string(),
            });
        }
        builder.build(index)
    }

    #[test]
    fn test_collisions_are_numbered() {
        let mut names = ExportNames::new();
        assert_eq!(names.assign("a/img.png"), "img.png");
        assert_eq!(names.assign("b/img.png"), "img_1.png");
        assert_eq!(names.assign("c/img.png"), "img_2.png");
        // Same media path as the second reference.
        assert_eq!(names.assign("b/img.png"), "img_1.png");
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_from_slides_skips_unresolved() {
        let slides = vec![
            slide_with_images(1, &["ppt/media/image1.png", ""]),
            slide_with_images(2, &["ppt/media/image1.png", "ppt/media/image2.jpeg"]),
        ];
        let names = ExportNames::from_slides(&slides);

        let pairs: Vec<_> = names.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("ppt/media/image1.png", "image1.png"),
                ("ppt/media/image2.jpeg", "image2.jpeg"),
            ]
        );
        assert_eq!(names.get(""), None);
    }

    #[test]
    fn test_generated_name_never_reused() {
        let mut names = ExportNames::new();
        assert_eq!(names.assign("a/img.png"), "img.png");
        assert_eq!(names.assign("b/img.png"), "img_1.png");
        // A real file already called img_1.png cannot take the generated name.
        assert_eq!(names.assign("c/img_1.png"), "img_1_1.png");
        assert_eq!(names.assign("d/img.png"), "img_2.png");
    }

    #[test]
    fn test_deterministic_across_runs() {
        let paths = ["x/a.png", "y/a.png", "x/b.gif", "z/a.png", "y/b.gif"];
        let run = || {
            let mut names = ExportNames::new();
            paths
                .iter()
                .map(|p| names.assign(p).to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
        assert_eq!(run(), vec!["a.png", "a_1.png", "b.gif", "a_2.png", "b_1.gif"]);
    }

    #[test]
    fn test_with_suffix() {
        assert_eq!(with_suffix("img.png", 1), "img_1.png");
        assert_eq!(with_suffix("archive.tar.gz", 2), "archive.tar_2.gz");
        assert_eq!(with_suffix("noext", 3), "noext_3");
        assert_eq!(with_suffix(".hidden", 1), ".hidden_1");
    }
}
