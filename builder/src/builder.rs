//! Builder helpers. Contains [Builder], builder for [VirtualArchive], and
//! [EntryHandle] used to address its entries.

use crate::{
    common::{
        archive::VirtualArchive,
        archive_path::ArchivePath,
        entry::{ArchiveEntry, DirEntry, Entry, FileEntry},
    },
    descriptor,
    relocation::Relocation,
    staging,
};
use anyhow::{Context, Error, anyhow};
use std::{
    fs, iter,
    path::{Path, PathBuf},
};

/// Address of an entry inside [Builder] tree.
///
/// Handle is a list of indices, starting from the root archive, going through
/// nested archives. [EntryHandle::root] (empty list) addresses the root archive
/// itself. Handles returned by [Builder::archive_add] are used as `parent` for
/// registering entries inside nested archive.
///
/// Entries are only appended by [Builder], so handles stay valid, unless the
/// tree is rearranged with [Builder::document_root_mut].
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct EntryHandle {
    indices: Box<[usize]>,
}
impl EntryHandle {
    /// Handle of the root archive.
    pub fn root() -> Self {
        Self {
            indices: Box::new([]),
        }
    }

    /// Whether this is the root archive handle.
    pub fn is_root(&self) -> bool {
        self.indices.is_empty()
    }

    fn child(
        &self,
        index: usize,
    ) -> Self {
        let indices = self
            .indices
            .iter()
            .copied()
            .chain(iter::once(index))
            .collect();

        Self { indices }
    }
}

/// Main builder for loose configuration. Inside it keeps a [VirtualArchive]
/// tree, grown by `*_add` methods and written with [Builder::store_file].
///
/// Directories and files are registered with their canonical on-disk path,
/// rewritten by [Relocation] if one was provided in
/// [Builder::with_relocation].
///
/// Registering a directory or a file which does not exist (or is of other kind)
/// is not an error, the call returns `Ok(None)` and tree is left untouched.
#[derive(Debug)]
pub struct Builder {
    archive: VirtualArchive,
    relocation: Option<Relocation>,
}
impl Builder {
    /// Creates [self] with empty root archive, writing canonical paths as
    /// `sourceOnDisk`.
    pub fn new() -> Self {
        Self {
            archive: VirtualArchive::new(),
            relocation: None,
        }
    }

    /// Creates [self] with empty root archive, writing `sourceOnDisk` rewritten
    /// by `relocation`.
    pub fn with_relocation(relocation: Relocation) -> Self {
        Self {
            archive: VirtualArchive::new(),
            relocation: Some(relocation),
        }
    }

    /// Relocation rule set on construction.
    pub fn relocation(&self) -> Option<&Relocation> {
        self.relocation.as_ref()
    }

    /// Handle of the root archive, same as [EntryHandle::root].
    pub fn root(&self) -> EntryHandle {
        EntryHandle::root()
    }

    /// Maps directory `source_directory` to `target` in `parent` archive.
    ///
    /// Returns `Ok(None)` if `source_directory` is not an existing directory.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Error;
    /// # use loose_config_builder::builder::Builder;
    /// #
    /// # fn main() -> Result<(), Error> {
    /// # let directory = tempfile::tempdir()?;
    /// #
    /// let mut builder = Builder::new();
    /// let root = builder.root();
    ///
    /// // existing directory is registered
    /// let entry = builder.dir_add(&root, directory.path(), "/WEB-INF/classes")?;
    /// assert!(entry.is_some());
    ///
    /// // missing directory is silently skipped
    /// let entry = builder.dir_add(&root, &directory.path().join("missing"), "/")?;
    /// assert!(entry.is_none());
    ///
    /// assert_eq!(builder.document_root().entries.len(), 1);
    /// #
    /// # Ok(())
    /// # }
    /// ```
    pub fn dir_add(
        &mut self,
        parent: &EntryHandle,
        source_directory: &Path,
        target: &str,
    ) -> Result<Option<EntryHandle>, Error> {
        if !source_directory.is_dir() {
            log::debug!(
                "skipping dir {}: not an existing directory",
                source_directory.display()
            );
            return Ok(None);
        }

        let source_on_disk = self.source_on_disk(source_directory)?;
        let entry = Entry::Dir(DirEntry {
            source_on_disk,
            target_in_archive: ArchivePath::from_string(target.to_owned()),
        });

        let entry_handle = self.entry_push(parent, entry)?;

        Ok(Some(entry_handle))
    }

    /// Maps file `source_file` to `target` in `parent` archive.
    ///
    /// Returns `Ok(None)` if `source_file` is not an existing regular file.
    pub fn file_add(
        &mut self,
        parent: &EntryHandle,
        source_file: &Path,
        target: &str,
    ) -> Result<Option<EntryHandle>, Error> {
        self.file_add_inner(parent, source_file, target, None)
    }

    /// Like [Self::file_add], but first copies `source_file` into a new unique
    /// subdirectory of `staging_directory` and registers the copy.
    ///
    /// Copy is skipped (and original file registered) if `staging_directory`
    /// is not an existing directory or `source_file` is already located in it.
    /// Copy failures are returned as errors.
    pub fn file_add_staged(
        &mut self,
        parent: &EntryHandle,
        source_file: &Path,
        target: &str,
        staging_directory: &Path,
    ) -> Result<Option<EntryHandle>, Error> {
        self.file_add_inner(parent, source_file, target, Some(staging_directory))
    }

    fn file_add_inner(
        &mut self,
        parent: &EntryHandle,
        source_file: &Path,
        target: &str,
        staging_directory: Option<&Path>,
    ) -> Result<Option<EntryHandle>, Error> {
        if !source_file.is_file() {
            log::debug!(
                "skipping file {}: not an existing regular file",
                source_file.display()
            );
            return Ok(None);
        }

        // fail on bad parent before anything is copied
        archive_resolve(&self.archive, &parent.indices)?;

        let staged_file: PathBuf;
        let source_file = match staging_directory {
            Some(staging_directory)
                if staging_directory.is_dir()
                    && !staging::is_inside(source_file, staging_directory)? =>
            {
                staged_file = staging::file_stage(source_file, staging_directory)?;
                staged_file.as_path()
            }
            _ => source_file,
        };

        let source_on_disk = self.source_on_disk(source_file)?;
        let entry = Entry::File(FileEntry {
            source_on_disk,
            target_in_archive: ArchivePath::from_string(target.to_owned()),
        });

        let entry_handle = self.entry_push(parent, entry)?;

        Ok(Some(entry_handle))
    }

    /// Creates empty nested archive at `target` in `parent` archive. Returned
    /// handle should be used as `parent` to fill the nested archive.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Error;
    /// # use loose_config_builder::builder::Builder;
    /// #
    /// # fn main() -> Result<(), Error> {
    /// # let directory = tempfile::tempdir()?;
    /// #
    /// let mut builder = Builder::new();
    /// let root = builder.root();
    ///
    /// let war = builder.archive_add(&root, "/web.war")?;
    /// builder.dir_add(&war, directory.path(), "/")?;
    ///
    /// let war_entry = builder.entry(&war).unwrap().as_archive().unwrap();
    /// assert_eq!(&*war_entry.target_in_archive, "/web.war");
    /// assert_eq!(war_entry.archive.entries.len(), 1);
    /// #
    /// # Ok(())
    /// # }
    /// ```
    pub fn archive_add(
        &mut self,
        parent: &EntryHandle,
        target: &str,
    ) -> Result<EntryHandle, Error> {
        let entry = Entry::Archive(ArchiveEntry::new(ArchivePath::from_string(
            target.to_owned(),
        )));

        self.entry_push(parent, entry)
    }

    /// Creates nested archive at `target` in `parent` archive, containing
    /// whole `directory` mapped to its root.
    ///
    /// Same as [Self::archive_add] followed by [Self::dir_add] with `/` target,
    /// so missing `directory` leaves the nested archive empty.
    pub fn archive_dir_add(
        &mut self,
        parent: &EntryHandle,
        target: &str,
        directory: &Path,
    ) -> Result<EntryHandle, Error> {
        let archive_handle = self.archive_add(parent, target)?;

        self.dir_add(&archive_handle, directory, "/")?;

        Ok(archive_handle)
    }

    /// Returns entry for `entry_handle`, if it exists. Root handle has no
    /// entry, use [Self::document_root] for it.
    pub fn entry(
        &self,
        entry_handle: &EntryHandle,
    ) -> Option<&Entry> {
        let (index, parent_indices) = entry_handle.indices.split_last()?;
        let archive = archive_resolve(&self.archive, parent_indices).ok()?;
        archive.entries.get(*index)
    }

    /// Root archive, for inspection.
    pub fn document_root(&self) -> &VirtualArchive {
        &self.archive
    }

    /// Root archive, for manual manipulation of the tree.
    pub fn document_root_mut(&mut self) -> &mut VirtualArchive {
        &mut self.archive
    }

    /// Finalizes the builder, returning built [VirtualArchive].
    pub fn finalize(self) -> VirtualArchive {
        self.archive
    }

    /// Writes current tree as loose configuration document to `path`. See
    /// [descriptor::store_file].
    pub fn store_file(
        &self,
        path: &Path,
    ) -> Result<(), Error> {
        descriptor::store_file(&self.archive, path)
    }

    /// Builds `sourceOnDisk` value for existing `source`.
    fn source_on_disk(
        &self,
        source: &Path,
    ) -> Result<String, Error> {
        let source_canonical =
            fs::canonicalize(source).with_context(|| format!("canonicalize {}", source.display()))?;

        let source_canonical = source_canonical
            .into_os_string()
            .into_string()
            .map_err(|source_canonical| {
                anyhow!("path is not valid unicode: {:?}", source_canonical)
            })?;

        let source_on_disk = match &self.relocation {
            Some(relocation) => relocation.apply(source_canonical),
            None => source_canonical,
        };

        Ok(source_on_disk)
    }

    fn entry_push(
        &mut self,
        parent: &EntryHandle,
        entry: Entry,
    ) -> Result<EntryHandle, Error> {
        let archive = archive_resolve_mut(&mut self.archive, &parent.indices)?;

        log::debug!(
            "adding {} {} -> {}",
            entry.element_name(),
            entry.source_on_disk().unwrap_or("-"),
            entry.target_in_archive()
        );

        let index = archive.entries.len();
        archive.entries.push(entry);

        Ok(parent.child(index))
    }
}

/// Walks `indices` from `archive`, every step must be a nested archive.
fn archive_resolve<'a>(
    archive: &'a VirtualArchive,
    indices: &[usize],
) -> Result<&'a VirtualArchive, Error> {
    indices.iter().try_fold(archive, |archive, index| {
        archive
            .entries
            .get(*index)
            .and_then(Entry::as_archive)
            .map(|archive_entry| &archive_entry.archive)
            .ok_or_else(|| anyhow!("entry handle {:?} does not point to an archive", indices))
    })
}
fn archive_resolve_mut<'a>(
    archive: &'a mut VirtualArchive,
    indices: &[usize],
) -> Result<&'a mut VirtualArchive, Error> {
    indices.iter().try_fold(archive, |archive, index| {
        archive
            .entries
            .get_mut(*index)
            .and_then(Entry::as_archive_mut)
            .map(|archive_entry| &mut archive_entry.archive)
            .ok_or_else(|| anyhow!("entry handle {:?} does not point to an archive", indices))
    })
}
