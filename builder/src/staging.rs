//! Staging helpers. Contains [file_stage], used to copy files living outside
//! of the project into a stable staging directory before they are referenced
//! by a descriptor.

use anyhow::{Context, Error, anyhow, bail};
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

/// Incremented on every generated name, makes names unique within process
/// even if clock resolution is coarse or goes backwards.
static UNIQUE_DIRECTORY_COUNTER: AtomicU64 = AtomicU64::new(0);

/// How many names to try if directory already exists (eg. created by another
/// process).
const UNIQUE_DIRECTORY_ATTEMPTS: usize = 16;

/// Generates `<nanoseconds since epoch>-<counter>` name.
fn unique_directory_name() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_nanos())
        .unwrap_or_default();
    let counter = UNIQUE_DIRECTORY_COUNTER.fetch_add(1, Ordering::Relaxed);

    format!("{timestamp}-{counter}")
}

/// Creates new, empty subdirectory of `staging_directory` with unique name.
///
/// Directory is created with [fs::create_dir], so existing directory is never
/// reused.
pub fn unique_directory_create(staging_directory: &Path) -> Result<PathBuf, Error> {
    for _ in 0..UNIQUE_DIRECTORY_ATTEMPTS {
        let path = staging_directory.join(unique_directory_name());

        match fs::create_dir(&path) {
            Ok(()) => return Ok(path),
            Err(error) if error.kind() == io::ErrorKind::AlreadyExists => {
                log::debug!("staging directory {} already exists", path.display());
                continue;
            }
            Err(error) => {
                return Err(Error::new(error)
                    .context(format!("create staging directory {}", path.display())));
            }
        }
    }

    bail!(
        "unable to create unique directory in {} after {} attempts",
        staging_directory.display(),
        UNIQUE_DIRECTORY_ATTEMPTS
    );
}

/// Copies `source_file` into a fresh subdirectory of `staging_directory`,
/// keeping its file name. Returns path of the copy.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use std::fs;
/// # use loose_config_builder::staging::file_stage;
/// #
/// # fn main() -> Result<(), Error> {
/// # let directory = tempfile::tempdir()?;
/// # let source_file = directory.path().join("a.txt");
/// # fs::write(&source_file, b"a")?;
/// # let staging_directory = directory.path().join("staging");
/// # fs::create_dir(&staging_directory)?;
/// #
/// let staged_file = file_stage(&source_file, &staging_directory)?;
///
/// assert_eq!(staged_file.file_name(), source_file.file_name());
/// assert_eq!(
///     staged_file.parent().and_then(|parent| parent.parent()),
///     Some(staging_directory.as_path())
/// );
/// #
/// # Ok(())
/// # }
/// ```
pub fn file_stage(
    source_file: &Path,
    staging_directory: &Path,
) -> Result<PathBuf, Error> {
    let file_name = source_file
        .file_name()
        .ok_or_else(|| anyhow!("missing file name in {}", source_file.display()))?;

    let directory = unique_directory_create(staging_directory)?;

    let staged_file = directory.join(file_name);
    fs::copy(source_file, &staged_file).with_context(|| {
        format!(
            "copy {} -> {}",
            source_file.display(),
            staged_file.display()
        )
    })?;

    log::info!(
        "staged {} -> {}",
        source_file.display(),
        staged_file.display()
    );

    Ok(staged_file)
}

/// Checks whether `path` is located in `directory`, comparing canonical forms
/// component by component.
pub fn is_inside(
    path: &Path,
    directory: &Path,
) -> Result<bool, Error> {
    let path = fs::canonicalize(path).with_context(|| format!("canonicalize {}", path.display()))?;
    let directory = fs::canonicalize(directory)
        .with_context(|| format!("canonicalize {}", directory.display()))?;

    Ok(path.starts_with(directory))
}
