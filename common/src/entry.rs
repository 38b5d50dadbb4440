//! Entry represents single item of a [VirtualArchive], placed under specific
//! path.

use crate::{
    ELEMENT_ARCHIVE, ELEMENT_DIR, ELEMENT_FILE, archive::VirtualArchive,
    archive_path::ArchivePath,
};

/// On-disk directory mapped to a location inside the archive. The runtime
/// walks the directory recursively when resolving this entry.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct DirEntry {
    /// Canonical absolute path of the directory, or its relocated form, eg.
    /// `APP_ROOT/src/main/webapp`.
    pub source_on_disk: String,
    /// Location inside enclosing archive.
    pub target_in_archive: ArchivePath,
}

/// Single on-disk file mapped to a location inside the archive.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct FileEntry {
    /// Canonical absolute path of the file, or its relocated form.
    pub source_on_disk: String,
    /// Location inside enclosing archive.
    pub target_in_archive: ArchivePath,
}

/// Archive embedded inside enclosing archive namespace, eg. a web module inside
/// an enterprise application. It has no on-disk source of its own, only
/// children.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ArchiveEntry {
    /// Location inside enclosing archive.
    pub target_in_archive: ArchivePath,
    /// Contents of the nested archive.
    pub archive: VirtualArchive,
}
impl ArchiveEntry {
    /// Creates empty nested archive placed at `target_in_archive`.
    pub fn new(target_in_archive: ArchivePath) -> Self {
        Self {
            target_in_archive,
            archive: VirtualArchive::new(),
        }
    }
}

/// Node of the archive tree.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Entry {
    /// See [DirEntry].
    Dir(DirEntry),
    /// See [FileEntry].
    File(FileEntry),
    /// See [ArchiveEntry].
    Archive(ArchiveEntry),
}
impl Entry {
    /// Element name used for this entry in persisted descriptor.
    pub fn element_name(&self) -> &'static str {
        match self {
            Entry::Dir(_) => ELEMENT_DIR,
            Entry::File(_) => ELEMENT_FILE,
            Entry::Archive(_) => ELEMENT_ARCHIVE,
        }
    }

    /// Location of this entry inside enclosing archive.
    pub fn target_in_archive(&self) -> &ArchivePath {
        match self {
            Entry::Dir(dir_entry) => &dir_entry.target_in_archive,
            Entry::File(file_entry) => &file_entry.target_in_archive,
            Entry::Archive(archive_entry) => &archive_entry.target_in_archive,
        }
    }

    /// On-disk source of this entry. Always [None] for [Entry::Archive].
    pub fn source_on_disk(&self) -> Option<&str> {
        match self {
            Entry::Dir(dir_entry) => Some(&dir_entry.source_on_disk),
            Entry::File(file_entry) => Some(&file_entry.source_on_disk),
            Entry::Archive(_) => None,
        }
    }

    /// Returns nested archive if this is an [Entry::Archive].
    pub fn as_archive(&self) -> Option<&ArchiveEntry> {
        match self {
            Entry::Archive(archive_entry) => Some(archive_entry),
            _ => None,
        }
    }

    /// Mutable version of [Self::as_archive].
    pub fn as_archive_mut(&mut self) -> Option<&mut ArchiveEntry> {
        match self {
            Entry::Archive(archive_entry) => Some(archive_entry),
            _ => None,
        }
    }
}
