//! Descriptor helpers. Contains [store_file] and [store_memory], writing a
//! [VirtualArchive] as loose configuration xml document.

use crate::common::{
    ATTRIBUTE_SOURCE_ON_DISK, ATTRIBUTE_TARGET_IN_ARCHIVE, ELEMENT_ARCHIVE, ELEMENT_DIR,
    ELEMENT_FILE, archive::VirtualArchive, archive_path::ArchivePath, entry::Entry,
};
use anyhow::{Context, Error};
use quick_xml::{
    Writer,
    escape::escape,
    events::{BytesDecl, BytesEnd, BytesStart, Event, attributes::Attribute},
};
use std::{
    borrow::Cow,
    fs,
    io::{self, Write},
    path::Path,
};

/// Spaces per nesting level.
const INDENT_SIZE: usize = 4;

/// Escapes attribute value. On top of markup characters, whitespace other
/// than space is written as character reference, otherwise parsers normalize
/// it to space on read (attribute value normalization).
fn attribute_value_escape(value: &str) -> Cow<'_, str> {
    let value = escape(value);
    if !value.contains(['\t', '\n', '\r']) {
        return value;
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for character in value.chars() {
        match character {
            '\t' => escaped.push_str("&#9;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            character => escaped.push(character),
        }
    }
    Cow::Owned(escaped)
}
fn attribute_push(
    element: &mut BytesStart,
    key: &str,
    value: &str,
) {
    let value = attribute_value_escape(value);
    element.push_attribute(Attribute::from((key.as_bytes(), value.as_bytes())));
}

/// Writes `archive` element. Root archive has no `target_in_archive`.
fn archive_write<W: io::Write>(
    writer: &mut Writer<W>,
    archive: &VirtualArchive,
    target_in_archive: Option<&ArchivePath>,
) -> Result<(), Error> {
    let mut element = BytesStart::new(ELEMENT_ARCHIVE);
    if let Some(target_in_archive) = target_in_archive {
        attribute_push(&mut element, ATTRIBUTE_TARGET_IN_ARCHIVE, target_in_archive);
    }

    if archive.entries.is_empty() {
        writer.write_event(Event::Empty(element))?;
        return Ok(());
    }

    writer.write_event(Event::Start(element))?;
    for entry in &archive.entries {
        entry_write(writer, entry)?;
    }
    writer.write_event(Event::End(BytesEnd::new(ELEMENT_ARCHIVE)))?;

    Ok(())
}
fn entry_write<W: io::Write>(
    writer: &mut Writer<W>,
    entry: &Entry,
) -> Result<(), Error> {
    match entry {
        Entry::Dir(dir_entry) => source_element_write(
            writer,
            ELEMENT_DIR,
            &dir_entry.source_on_disk,
            &dir_entry.target_in_archive,
        ),
        Entry::File(file_entry) => source_element_write(
            writer,
            ELEMENT_FILE,
            &file_entry.source_on_disk,
            &file_entry.target_in_archive,
        ),
        Entry::Archive(archive_entry) => archive_write(
            writer,
            &archive_entry.archive,
            Some(&archive_entry.target_in_archive),
        ),
    }
}
/// Writes `dir` or `file` element.
fn source_element_write<W: io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    source_on_disk: &str,
    target_in_archive: &ArchivePath,
) -> Result<(), Error> {
    let mut element = BytesStart::new(name);
    attribute_push(&mut element, ATTRIBUTE_SOURCE_ON_DISK, source_on_disk);
    attribute_push(&mut element, ATTRIBUTE_TARGET_IN_ARCHIVE, target_in_archive);

    writer.write_event(Event::Empty(element))?;

    Ok(())
}

/// Writes `archive` as xml document into `writer`.
pub fn store(
    archive: &VirtualArchive,
    writer: impl io::Write,
) -> Result<(), Error> {
    let mut writer = Writer::new_with_indent(writer, b' ', INDENT_SIZE);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    archive_write(&mut writer, archive, None)?;
    writer.get_mut().write_all(b"\n")?;

    Ok(())
}

/// Serializes `archive` to [String]. Mostly for testing and logging purposes.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use loose_config_builder::{common::archive::VirtualArchive, descriptor::store_memory};
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// assert_eq!(
///     store_memory(&VirtualArchive::new())?,
///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<archive/>\n"
/// );
/// #
/// # Ok(())
/// # }
/// ```
pub fn store_memory(archive: &VirtualArchive) -> Result<String, Error> {
    let mut buffer = Vec::new();
    store(archive, &mut buffer)?;
    let document = String::from_utf8(buffer)?;
    Ok(document)
}

/// Serializes `archive` to given file path. File is created or truncated.
/// Serialized document can be read back with `load_file` method of loader.
pub fn store_file(
    archive: &VirtualArchive,
    path: &Path,
) -> Result<(), Error> {
    let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = io::BufWriter::new(file);

    store(archive, &mut writer).with_context(|| format!("write {}", path.display()))?;

    let file = writer
        .into_inner()
        .map_err(|error| error.into_error())
        .with_context(|| format!("flush {}", path.display()))?;
    file.sync_all()?;
    drop(file);

    log::info!(
        "stored {} entries into {}",
        archive.entries_count_recursive(),
        path.display()
    );

    Ok(())
}
