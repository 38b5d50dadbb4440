//! Archive path helpers. Contains [from_file_base_relative_path] that creates
//! archive paths from fs paths.

use crate::common::archive_path::ArchivePath;
use anyhow::{Error, anyhow, ensure};
use std::{
    iter,
    path::{Component, Path},
};

/// Creates archive path (eg. "/dir1/dir2/file.html") from relative fs path
/// (eg. "workdir\\dir1\\dir2\\file.html").
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use std::path::PathBuf;
/// # use loose_config_builder::{
/// #    archive_path::from_file_base_relative_path, common::archive_path::ArchivePath,
/// # };
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// assert_eq!(
///     from_file_base_relative_path(&PathBuf::from("WEB-INF/web.xml"))?,
///     ArchivePath::from_string("/WEB-INF/web.xml".to_owned()),
/// );
/// #
/// # Ok(())
/// # }
/// ```
pub fn from_file_base_relative_path(
    file_base_relative_path: &Path,
) -> Result<ArchivePath, Error> {
    ensure!(
        file_base_relative_path.is_relative(),
        "path must be relative, got {:?}",
        file_base_relative_path
    );

    // list of path components, eg. ["dir1", "dir2", "file.bin"]
    let file_base_relative_path_components = file_base_relative_path
        .to_str()
        .ok_or_else(|| anyhow!("cannot convert path to string"))?
        // windows separators are accepted on every platform
        .split(['/', '\\'])
        .filter(|component| !component.is_empty())
        .map(|component| {
            // we cannot handle things like '.' or '..' here
            ensure!(
                matches!(Path::new(component).components().next(), Some(Component::Normal(_))),
                "relative path must contain only standard path items, got {:?}",
                component
            );

            Ok(component)
        })
        .collect::<Result<Vec<_>, Error>>()?;

    ensure!(
        !file_base_relative_path_components.is_empty(),
        "relative path must not be empty"
    );

    // we add empty element at the beginning to have path starting with /
    let archive_path_string = itertools::join(
        iter::once("").chain(file_base_relative_path_components),
        "/",
    );

    Ok(ArchivePath::from_string(archive_path_string))
}
