//! Slide ordering.
//!
//! The presentation part lists slides as `p:sldId` elements whose `r:id`
//! points into the presentation's relationship part. When that list is
//! missing or nothing in it resolves, slide parts are picked up by name and
//! sorted lexically instead (`slide10.xml` sorts before `slide2.xml`).

use crate::archive::Archive;
use crate::rels::{part_dir, read_optional_relationships, read_relationships, rels_path_for};
use crate::xml::{local_name, malformed, part_text, prefixed_attr};
use quick_xml::events::Event;
use quick_xml::Reader;
use slidemark_core::Result;
use std::io::{Read, Seek};

/// Main presentation part when the package root relationships don't name one.
pub const DEFAULT_PRESENTATION_PART: &str = "ppt/presentation.xml";

const PACKAGE_RELS: &str = "_rels/.rels";

/// Locate the main presentation part via the package root relationships.
pub fn presentation_part<R: Read + Seek>(archive: &mut Archive<R>) -> Result<String> {
    let root = read_optional_relationships(archive, PACKAGE_RELS)?;
    let part = root
        .find_by_type("officeDocument")
        .filter(|rel| !rel.external)
        .map(|rel| crate::rels::resolve("", &rel.target))
        .unwrap_or_else(|| DEFAULT_PRESENTATION_PART.to_string());
    Ok(part)
}

/// Ordered slide part paths for the package.
pub fn slide_order<R: Read + Seek>(archive: &mut Archive<R>) -> Result<Vec<String>> {
    let pres_part = presentation_part(archive)?;
    let pres_rels = read_relationships(archive, &rels_path_for(&pres_part))?;
    let pres_xml = archive.read_entry(&pres_part)?;
    let slide_ids = parse_slide_id_list(&pres_xml, &pres_part)?;

    let base = part_dir(&pres_part);
    let mut slides = Vec::with_capacity(slide_ids.len());
    for rel_id in &slide_ids {
        match pres_rels.resolve(rel_id, base) {
            Some(path) => slides.push(path),
            None => log::debug!("Skipping slide id {} with no relationship target", rel_id),
        }
    }

    if slides.is_empty() {
        log::debug!(
            "No slides resolved from {} ({} ids), scanning archive entries",
            pres_part,
            slide_ids.len()
        );
        slides = scan_slide_parts(archive, base)?;
    }

    Ok(slides)
}

/// Relationship IDs from `p:sldIdLst`, in document order.
pub fn parse_slide_id_list(xml: &[u8], part: &str) -> Result<Vec<String>> {
    let text = part_text(xml, part)?;
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut ids = Vec::new();
    let mut in_list = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if local_name(e.name().as_ref()) == b"sldIdLst" => {
                in_list = true;
            }
            Ok(Event::End(ref e)) if local_name(e.name().as_ref()) == b"sldIdLst" => {
                in_list = false;
            }
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if in_list && local_name(e.name().as_ref()) == b"sldId" =>
            {
                if let Some(id) = prefixed_attr(e, b"id") {
                    ids.push(id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(part, e)),
            _ => {}
        }
    }

    Ok(ids)
}

/// Slide parts found by name under `<base>/slides/`, sorted lexically.
fn scan_slide_parts<R: Read + Seek>(archive: &Archive<R>, base: &str) -> Result<Vec<String>> {
    let prefix = if base.is_empty() {
        "slides/slide".to_string()
    } else {
        format!("{}/slides/slide", base)
    };

    let mut slides: Vec<String> = archive
        .entry_names()?
        .into_iter()
        .filter(|name| {
            name.starts_with(&prefix) && name.ends_with(".xml") && !name.contains("_rels")
        })
        .collect();
    slides.sort();
    Ok(slides)
}
