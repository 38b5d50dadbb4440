//! Virtual archive is the root entity, an ordered collection of entries.

use crate::entry::Entry;

/// [VirtualArchive] represents an archive (eg. `war` or `ear`) assembled
/// directly from files and directories on disk, without packaging them.
///
/// It is a bit like a `zip` listing: a single entity describing a
/// directory/file tree, but instead of content it only keeps on-disk locations.
/// It will usually be built with `loose-config-builder`, persisted as a loose
/// configuration document and read by the deployment runtime.
///
/// Order of [Self::entries] is significant, the runtime may use it for
/// layering, so it's preserved everywhere.
#[derive(PartialEq, Eq, Clone, Default, Debug)]
pub struct VirtualArchive {
    /// Entries of this archive, in insertion order.
    pub entries: Vec<Entry>,
}
impl VirtualArchive {
    /// Creates archive without entries.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Total number of entries in this archive and all nested archives.
    pub fn entries_count_recursive(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| match entry {
                Entry::Archive(archive_entry) => 1 + archive_entry.archive.entries_count_recursive(),
                _ => 1,
            })
            .sum()
    }
}
