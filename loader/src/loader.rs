//! Main loader module. Contains [load_str] and [load_file], parsing loose
//! configuration documents.

use crate::common::{
    ATTRIBUTE_SOURCE_ON_DISK, ATTRIBUTE_TARGET_IN_ARCHIVE, ELEMENT_ARCHIVE, ELEMENT_DIR,
    ELEMENT_FILE,
    archive::VirtualArchive,
    archive_path::ArchivePath,
    entry::{ArchiveEntry, DirEntry, Entry, FileEntry},
};
use anyhow::{Context, Error, anyhow, bail, ensure};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use std::{fs, path::Path, str};

/// Known attributes of a single element.
#[derive(Default, Debug)]
struct Attributes {
    source_on_disk: Option<String>,
    target_in_archive: Option<String>,
}
impl Attributes {
    fn parse(element: &BytesStart) -> Result<Self, Error> {
        let mut attributes = Self::default();

        for attribute in element.attributes() {
            let attribute = attribute?;
            let key = str::from_utf8(attribute.key.as_ref())?;
            let value = attribute.unescape_value()?.into_owned();

            let slot = match key {
                ATTRIBUTE_SOURCE_ON_DISK => &mut attributes.source_on_disk,
                ATTRIBUTE_TARGET_IN_ARCHIVE => &mut attributes.target_in_archive,
                key => {
                    log::debug!("ignoring unknown attribute {key}");
                    continue;
                }
            };
            ensure!(slot.is_none(), "duplicated attribute {key}");
            *slot = Some(value);
        }

        Ok(attributes)
    }

    fn target_in_archive(&mut self) -> Result<ArchivePath, Error> {
        let target_in_archive = self
            .target_in_archive
            .take()
            .ok_or_else(|| anyhow!("missing {ATTRIBUTE_TARGET_IN_ARCHIVE} attribute"))?;

        Ok(ArchivePath::from_string(target_in_archive))
    }
    fn source_on_disk(&mut self) -> Result<String, Error> {
        self.source_on_disk
            .take()
            .ok_or_else(|| anyhow!("missing {ATTRIBUTE_SOURCE_ON_DISK} attribute"))
    }
}

fn element_name(element: &BytesStart) -> Result<String, Error> {
    let name = element.name();
    let name = str::from_utf8(name.as_ref())?;
    Ok(name.to_owned())
}

/// Builds nested archive (without entries) from its start element.
fn archive_entry_from_element(element: &BytesStart) -> Result<ArchiveEntry, Error> {
    let mut attributes = Attributes::parse(element)?;
    ensure!(
        attributes.source_on_disk.is_none(),
        "{ELEMENT_ARCHIVE} must not have {ATTRIBUTE_SOURCE_ON_DISK} attribute"
    );

    Ok(ArchiveEntry::new(attributes.target_in_archive()?))
}

/// Builds entry from element without children.
fn entry_from_empty_element(element: &BytesStart) -> Result<Entry, Error> {
    let name = element_name(element)?;

    let entry = match name.as_str() {
        ELEMENT_DIR => {
            let mut attributes = Attributes::parse(element)?;
            Entry::Dir(DirEntry {
                source_on_disk: attributes.source_on_disk()?,
                target_in_archive: attributes.target_in_archive()?,
            })
        }
        ELEMENT_FILE => {
            let mut attributes = Attributes::parse(element)?;
            Entry::File(FileEntry {
                source_on_disk: attributes.source_on_disk()?,
                target_in_archive: attributes.target_in_archive()?,
            })
        }
        ELEMENT_ARCHIVE => Entry::Archive(archive_entry_from_element(element)?),
        name => bail!("unexpected element {name}"),
    };

    Ok(entry)
}

/// Checks root element, which must be a plain `archive`.
fn root_from_element(element: &BytesStart) -> Result<VirtualArchive, Error> {
    let name = element_name(element)?;
    ensure!(
        name == ELEMENT_ARCHIVE,
        "root element must be {ELEMENT_ARCHIVE}, got {name}"
    );

    let attributes = Attributes::parse(element)?;
    ensure!(
        attributes.source_on_disk.is_none() && attributes.target_in_archive.is_none(),
        "root {ELEMENT_ARCHIVE} must not have attributes"
    );

    Ok(VirtualArchive::new())
}

/// Parses loose configuration document.
///
/// The document must have single `archive` root element. Its children (and
/// children of nested `archive` elements) must be `dir`, `file` or `archive`
/// elements. `dir` and `file` must have no children. Order of entries is
/// preserved.
pub fn load_str(xml: &str) -> Result<VirtualArchive, Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    // archives opened but not closed yet, root archive has no entry
    let mut archives_open = Vec::<(Option<ArchiveEntry>, VirtualArchive)>::new();
    let mut root = None::<VirtualArchive>;

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .with_context(|| format!("read event at {position}"))?;

        match event {
            Event::Start(element) => {
                if archives_open.is_empty() {
                    ensure!(root.is_none(), "multiple root elements");
                    archives_open.push((None, root_from_element(&element)?));
                    continue;
                }

                let name = element_name(&element)?;
                ensure!(
                    name == ELEMENT_ARCHIVE,
                    "element {name} must not have children"
                );
                let archive_entry = archive_entry_from_element(&element)
                    .with_context(|| format!("element at {position}"))?;
                archives_open.push((Some(archive_entry), VirtualArchive::new()));
            }
            Event::Empty(element) => match archives_open.last_mut() {
                None => {
                    ensure!(root.is_none(), "multiple root elements");
                    root = Some(root_from_element(&element)?);
                }
                Some((_, archive)) => {
                    let entry = entry_from_empty_element(&element)
                        .with_context(|| format!("element at {position}"))?;
                    archive.entries.push(entry);
                }
            },
            Event::End(_) => {
                // names are matched by reader
                let (archive_entry, archive) = archives_open
                    .pop()
                    .ok_or_else(|| anyhow!("unexpected end element at {position}"))?;

                match (archive_entry, archives_open.last_mut()) {
                    (None, None) => root = Some(archive),
                    (Some(mut archive_entry), Some((_, parent))) => {
                        archive_entry.archive = archive;
                        parent.entries.push(Entry::Archive(archive_entry));
                    }
                    _ => bail!("unbalanced archive elements at {position}"),
                }
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                ensure!(
                    text.trim().is_empty(),
                    "unexpected text {text:?} at {position}"
                );
            }
            Event::CData(_) => bail!("unexpected cdata at {position}"),
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
            Event::Eof => break,
        }
    }

    ensure!(archives_open.is_empty(), "unclosed archive elements");
    let root = root.ok_or_else(|| anyhow!("missing root {ELEMENT_ARCHIVE} element"))?;

    log::info!("loaded {} entries", root.entries_count_recursive());

    Ok(root)
}

/// Reads and parses loose configuration document from `path`. See
/// [load_str].
pub fn load_file(path: &Path) -> Result<VirtualArchive, Error> {
    let xml = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let archive = load_str(&xml).with_context(|| format!("load {}", path.display()))?;
    Ok(archive)
}
