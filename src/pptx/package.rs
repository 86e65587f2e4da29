use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use quick_xml::Reader;
use quick_xml::events::Event;
use zip::{CompressionMethod, ZipArchive};
use zip::write::{SimpleFileOptions, ZipWriter};
use crate::errors::DocumentError;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

/// An open `.pptx` package with pending slide part replacements.
///
/// The package keeps the source archive intact; rewritten parts are staged
/// in memory and only materialize when the package is written back. Every
/// entry that is not replaced keeps its original content on write.
pub struct PptxPackage {
    /// Source archive
    archive: ZipArchive<Cursor<Vec<u8>>>,
    /// Slide part names in presentation order
    slide_parts: Vec<String>,
    /// Staged replacement XML, keyed by part name
    replacements: HashMap<String, Vec<u8>>,
}

impl PptxPackage {
    /// Open a package file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Open a package from raw bytes
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, DocumentError> {
        let mut archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| DocumentError::Archive(format!("Failed to open package: {}", e)))?;
        let slide_parts = ordered_slide_parts(&mut archive)?;
        Ok(Self {
            archive,
            slide_parts,
            replacements: HashMap::new(),
        })
    }

    /// Slide part names in presentation order
    pub fn slide_parts(&self) -> &[String] {
        &self.slide_parts
    }

    /// Read the raw bytes of a package part
    pub fn part_bytes(&mut self, name: &str) -> Result<Vec<u8>, DocumentError> {
        match self.archive.by_name(name) {
            Ok(mut file) => {
                let mut data = Vec::with_capacity(file.size() as usize);
                file.read_to_end(&mut data)?;
                Ok(data)
            },
            Err(zip::result::ZipError::FileNotFound) => {
                Err(DocumentError::MissingPart(name.to_string()))
            },
            Err(e) => Err(DocumentError::Archive(format!(
                "Failed to read part {}: {}",
                name, e
            ))),
        }
    }

    /// Stage replacement bytes for a part
    pub fn replace_part(&mut self, name: &str, data: Vec<u8>) {
        self.replacements.insert(name.to_string(), data);
    }

    /// Whether any part has been replaced since the package was opened
    pub fn is_modified(&self) -> bool {
        !self.replacements.is_empty()
    }

    /// Serialize the package with all staged replacements applied.
    ///
    /// Untouched entries keep their original content; replaced parts get
    /// the staged bytes. Entry order follows the source archive and
    /// directory markers are dropped.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, DocumentError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for i in 0..self.archive.len() {
            let mut entry = self.archive.by_index(i).map_err(|e| {
                DocumentError::Archive(format!("Failed to read entry {}: {}", i, e))
            })?;
            let name = entry.name().to_string();
            if name.ends_with('/') {
                continue;
            }

            let data = match self.replacements.get(&name) {
                Some(replacement) => replacement.clone(),
                None => {
                    let mut original = Vec::with_capacity(entry.size() as usize);
                    entry.read_to_end(&mut original)?;
                    original
                },
            };

            writer.start_file(name.as_str(), options).map_err(|e| {
                DocumentError::Archive(format!("Failed to write entry {}: {}", name, e))
            })?;
            writer.write_all(&data)?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| DocumentError::Archive(format!("Failed to finish package: {}", e)))?;
        Ok(cursor.into_inner())
    }

    /// Write the package to a file, overwriting it
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<(), DocumentError> {
        let data = self.to_bytes()?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

/// Resolve the ordered slide part list.
///
/// The authoritative order comes from `<p:sldIdLst>` in the presentation
/// part, with each `r:id` resolved through the presentation relationships.
/// When either part is missing or incomplete, fall back to scanning
/// `ppt/slides/slide<N>.xml` entries sorted by number.
fn ordered_slide_parts(
    archive: &mut ZipArchive<Cursor<Vec<u8>>>,
) -> Result<Vec<String>, DocumentError> {
    let presentation_xml = read_optional(archive, PRESENTATION_PART)?;
    let rels_xml = read_optional(archive, PRESENTATION_RELS_PART)?;

    if let (Some(presentation), Some(rels)) = (&presentation_xml, &rels_xml) {
        let ids = parse_slide_ids(presentation)?;
        let targets = parse_relationships(rels)?;

        let mut parts = Vec::with_capacity(ids.len());
        let mut complete = true;
        for id in &ids {
            match targets.get(id) {
                Some(target) => parts.push(resolve_target(target)),
                None => {
                    complete = false;
                    break;
                },
            }
        }
        if complete && !parts.is_empty() {
            return Ok(parts);
        }
    }

    let scanned = scan_slide_parts(archive);
    if presentation_xml.is_none() && scanned.is_empty() {
        return Err(DocumentError::InvalidFormat(format!(
            "package has no {} part and no slide parts",
            PRESENTATION_PART
        )));
    }
    Ok(scanned)
}

/// Read a part that may legitimately be absent
fn read_optional(
    archive: &mut ZipArchive<Cursor<Vec<u8>>>,
    name: &str,
) -> Result<Option<Vec<u8>>, DocumentError> {
    match archive.by_name(name) {
        Ok(mut file) => {
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            Ok(Some(data))
        },
        Err(zip::result::ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(DocumentError::Archive(format!(
            "Failed to read part {}: {}",
            name, e
        ))),
    }
}

/// Relationship ids of `<p:sldId>` entries, in document order
fn parse_slide_ids(xml: &[u8]) -> Result<Vec<String>, DocumentError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut ids = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"sldId" {
                    for attr in e.attributes() {
                        let attr = attr.map_err(|e| {
                            DocumentError::Xml(format!("Presentation attribute error: {}", e))
                        })?;
                        if attr.key.as_ref() == b"r:id" {
                            let value = attr.unescape_value().map_err(|e| {
                                DocumentError::Xml(format!("Presentation attribute error: {}", e))
                            })?;
                            ids.push(value.to_string());
                        }
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocumentError::Xml(format!(
                    "Presentation parse error: {}",
                    e
                )));
            },
            _ => {},
        }
        buf.clear();
    }

    Ok(ids)
}

/// Relationship id to target map from a `.rels` part
fn parse_relationships(xml: &[u8]) -> Result<HashMap<String, String>, DocumentError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut targets = HashMap::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    let mut r_id = None;
                    let mut target = None;

                    for attr in e.attributes() {
                        let attr = attr.map_err(|e| {
                            DocumentError::Xml(format!("Relationship attribute error: {}", e))
                        })?;
                        match attr.key.as_ref() {
                            b"Id" => {
                                let value = attr.unescape_value().map_err(|e| {
                                    DocumentError::Xml(format!("Relationship attribute error: {}", e))
                                })?;
                                r_id = Some(value.to_string());
                            },
                            b"Target" => {
                                let value = attr.unescape_value().map_err(|e| {
                                    DocumentError::Xml(format!("Relationship attribute error: {}", e))
                                })?;
                                target = Some(value.to_string());
                            },
                            _ => {},
                        }
                    }

                    if let (Some(id), Some(target)) = (r_id, target) {
                        targets.insert(id, target);
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocumentError::Xml(format!(
                    "Relationships parse error: {}",
                    e
                )));
            },
            _ => {},
        }
        buf.clear();
    }

    Ok(targets)
}

/// Resolve a relationship target to a package part name.
///
/// Targets are relative to `ppt/` unless they start with `/`.
fn resolve_target(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else {
        format!("ppt/{}", target)
    }
}

/// Fallback slide list: `ppt/slides/slide<N>.xml` sorted by number
fn scan_slide_parts(archive: &ZipArchive<Cursor<Vec<u8>>>) -> Vec<String> {
    let mut numbered: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = name
                .strip_prefix("ppt/slides/slide")?
                .strip_suffix(".xml")?
                .parse::<u32>()
                .ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    numbered.sort_by_key(|(number, _)| *number);
    numbered.into_iter().map(|(_, name)| name).collect()
}
