//! Slide assembly: shape tree plus the slide's own relationships.

use crate::archive::Archive;
use crate::rels::{part_dir, read_optional_relationships, rels_path_for};
use crate::shapes::{parse_shape_tree, walk};
use slidemark_core::{Error, Result, Slide};
use std::io::{Read, Seek};

/// Assemble the slide at `slide_path` as the `index`-th slide (1-based).
///
/// Picture relationship IDs are resolved against the slide's own directory;
/// IDs with no internal target keep an empty media path. Any failure is
/// reported as [`Error::SlideParseFailed`] for this slide.
pub fn assemble_slide<R: Read + Seek>(
    archive: &mut Archive<R>,
    slide_path: &str,
    index: usize,
) -> Result<Slide> {
    read_slide(archive, slide_path, index).map_err(|e| match e {
        Error::ArchiveClosed => e,
        other => other.in_slide(slide_path),
    })
}

fn read_slide<R: Read + Seek>(
    archive: &mut Archive<R>,
    slide_path: &str,
    index: usize,
) -> Result<Slide> {
    let content = archive.read_entry(slide_path)?;
    let tree = parse_shape_tree(&content, slide_path)?;
    let rels = read_optional_relationships(archive, &rels_path_for(slide_path))?;

    let base = part_dir(slide_path);
    let mut slide = walk(&tree);
    slide.resolve_images(|rel_id| {
        let target = rels.resolve(rel_id, base);
        if target.is_none() {
            log::debug!("{}: no media target for {}", slide_path, rel_id);
        }
        target
    });

    Ok(slide.build(index))
}
