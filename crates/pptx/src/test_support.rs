//! In-memory PPTX packages for tests.

use crate::archive::Archive;
use std::io::{Cursor, Write};
use zip::write::{FileOptions, ZipWriter};

pub(crate) const REL_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
pub(crate) const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
pub(crate) const REL_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";

/// Builds a ZIP package entry by entry.
#[derive(Default)]
pub(crate) struct PackageBuilder {
    entries: Vec<(String, Vec<u8>)>,
}

impl PackageBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn file(mut self, path: &str, content: impl AsRef<[u8]>) -> Self {
        self.entries.push((path.to_string(), content.as_ref().to_vec()));
        self
    }

    /// Presentation part with one `sldId` per relationship ID, in order.
    pub(crate) fn presentation(self, slide_rel_ids: &[&str]) -> Self {
        self.file("ppt/presentation.xml", presentation_xml(slide_rel_ids))
    }

    /// Presentation relationships part.
    pub(crate) fn presentation_rels(self, rels: &[(&str, &str, &str)]) -> Self {
        self.file("ppt/_rels/presentation.xml.rels", rels_xml(rels))
    }

    /// A standard deck: `slides[i]` is the spTree body of `slide{i+1}.xml`.
    pub(crate) fn deck(self, slides: &[&str]) -> Self {
        let ids: Vec<String> = (0..slides.len()).map(|i| format!("rId{}", i + 2)).collect();
        let targets: Vec<String> = (0..slides.len())
            .map(|i| format!("slides/slide{}.xml", i + 1))
            .collect();
        let rels: Vec<(&str, &str, &str)> = ids
            .iter()
            .zip(&targets)
            .map(|(id, target)| (id.as_str(), REL_SLIDE, target.as_str()))
            .collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();

        let mut builder = self.presentation(&id_refs).presentation_rels(&rels);
        for (i, body) in slides.iter().enumerate() {
            builder = builder.file(&format!("ppt/slides/slide{}.xml", i + 1), slide_xml(body));
        }
        builder
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();
        for (path, content) in &self.entries {
            zip.start_file(path.as_str(), options).unwrap();
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    pub(crate) fn open(self) -> Archive<Cursor<Vec<u8>>> {
        Archive::from_reader(Cursor::new(self.build()), "test.pptx").unwrap()
    }
}

pub(crate) fn presentation_xml(slide_rel_ids: &[&str]) -> String {
    let mut ids = String::new();
    for (i, rel_id) in slide_rel_ids.iter().enumerate() {
        ids.push_str(&format!(r#"<p:sldId id="{}" r:id="{}"/>"#, 256 + i, rel_id));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
    xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
    xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
  <p:sldIdLst>{}</p:sldIdLst>
  <p:sldSz cx="9144000" cy="6858000"/>
</p:presentation>"#,
        ids
    )
}

/// Relationships part from (id, type, target) triples.
pub(crate) fn rels_xml(rels: &[(&str, &str, &str)]) -> String {
    let mut body = String::new();
    for (id, rel_type, target) in rels {
        body.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            id, rel_type, target
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
        body
    )
}

/// Slide part wrapping the given spTree children.
pub(crate) fn slide_xml(tree: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
    xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
    xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld>
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
      {}
    </p:spTree>
  </p:cSld>
</p:sld>"#,
        tree
    )
}

/// A `p:sp` with an optional placeholder type and one paragraph per entry.
pub(crate) fn shape(placeholder: Option<&str>, paragraphs: &[&str]) -> String {
    let ph = match placeholder {
        Some(kind) => format!(r#"<p:ph type="{}"/>"#, kind),
        None => String::new(),
    };
    let mut body = String::new();
    for para in paragraphs {
        body.push_str(&format!(r#"<a:p><a:r><a:rPr lang="en-US"/><a:t>{}</a:t></a:r></a:p>"#, para));
    }
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Shape"/><p:cNvSpPr/><p:nvPr>{}</p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>"#,
        ph, body
    )
}

/// A `p:pic` whose blip embeds the given relationship ID.
pub(crate) fn picture(rel_id: &str) -> String {
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="4" name="Picture"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="{}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr/></p:pic>"#,
        rel_id
    )
}

/// A `p:grpSp` around the given children.
pub(crate) fn group(children: &str) -> String {
    format!(
        r#"<p:grpSp><p:nvGrpSpPr><p:cNvPr id="10" name="Group"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:grpSp>"#,
        children
    )
}

/// Minimal PNG signature plus padding.
pub(crate) const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
