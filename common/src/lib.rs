//! Common crate, containing types shared between `loose-config-builder` and
//! `loose-config-loader`.
//!
//! The root type of this crate is [archive::VirtualArchive]. It's an ordered
//! list of [entry::Entry] items, each placed at an [archive_path::ArchivePath]
//! inside the archive namespace. An entry either points at a directory or a
//! file on disk, or is itself a nested [archive::VirtualArchive].
//!
//! The persisted form of a [archive::VirtualArchive] is an xml document, a
//! "loose configuration", in which every node is an element named after one of
//! the `ELEMENT_*` constants, carrying `ATTRIBUTE_*` attributes. Builder writes
//! it, loader reads it back, both agree on names defined here.

#![warn(missing_docs)]

pub mod archive;
pub mod archive_path;
pub mod entry;

/// Element name of the root archive and of every nested archive.
pub const ELEMENT_ARCHIVE: &str = "archive";
/// Element name of a directory entry.
pub const ELEMENT_DIR: &str = "dir";
/// Element name of a file entry.
pub const ELEMENT_FILE: &str = "file";

/// Attribute holding on-disk location of a directory or file entry.
pub const ATTRIBUTE_SOURCE_ON_DISK: &str = "sourceOnDisk";
/// Attribute holding location of an entry inside enclosing archive.
pub const ATTRIBUTE_TARGET_IN_ARCHIVE: &str = "targetInArchive";
