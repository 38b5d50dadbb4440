//! Relocation helpers. Contains [Relocation], rewriting absolute source paths
//! into portable ones.

use std::path::is_separator;

/// Rule replacing project root prefix of a source path with a symbolic name.
///
/// When the project is mounted under different absolute paths (eg. developer
/// machine vs container), `sourceOnDisk` attributes written as absolute paths
/// would break. With [Relocation] set, `/home/me/proj/src/a.txt` is written as
/// `APP_ROOT/src/a.txt` and the runtime resolves `APP_ROOT` on its side.
///
/// Both fields are required, so a half-configured rule cannot exist.
///
/// Matching rules:
/// - trailing separators of `project_root` are removed on construction, unless
///   `project_root` consists of separators only (eg. `/`),
/// - prefix must end on a path component boundary, so `/proj` matches
///   `/proj/a.txt` and `/proj`, but not `/project2/a.txt`.
///
/// The boundary rule is stricter than a plain string prefix test, which would
/// rewrite `/project2/a.txt` into `APP_ROOTject2/a.txt`. Descriptors produced
/// by tools using plain prefix matching may therefore differ for sibling
/// directories sharing the root's name as prefix.
///
/// No other normalization is done, paths are expected to be canonical.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Relocation {
    project_root: String,
    source_on_disk_name: String,
}
impl Relocation {
    /// Creates [self] replacing `project_root` with `source_on_disk_name`.
    pub fn new(
        project_root: String,
        source_on_disk_name: String,
    ) -> Self {
        let project_root = project_root_normalize(project_root);

        Self {
            project_root,
            source_on_disk_name,
        }
    }

    /// Project root, after normalization.
    pub fn project_root(&self) -> &str {
        &self.project_root
    }

    /// Symbolic name replacing the project root.
    pub fn source_on_disk_name(&self) -> &str {
        &self.source_on_disk_name
    }

    /// Rewrites `path` if it's located in project root, returns it unchanged
    /// otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// # use loose_config_builder::relocation::Relocation;
    /// #
    /// let relocation = Relocation::new("/proj".to_owned(), "APP_ROOT".to_owned());
    ///
    /// assert_eq!(relocation.apply("/proj/src/a.txt".to_owned()), "APP_ROOT/src/a.txt");
    /// assert_eq!(relocation.apply("/other/a.txt".to_owned()), "/other/a.txt");
    /// ```
    pub fn apply(
        &self,
        path: String,
    ) -> String {
        match self.remainder(&path) {
            Some(remainder) => format!("{}{}", self.source_on_disk_name, remainder),
            None => path,
        }
    }

    /// Part of `path` following project root, if `path` is located in it.
    fn remainder<'p>(
        &self,
        path: &'p str,
    ) -> Option<&'p str> {
        let remainder = path.strip_prefix(self.project_root.as_str())?;

        let boundary = remainder.is_empty()
            || remainder.starts_with(is_separator)
            || self.project_root.ends_with(is_separator);
        if !boundary {
            return None;
        }

        Some(remainder)
    }
}

fn project_root_normalize(project_root: String) -> String {
    let project_root_trimmed = project_root.trim_end_matches(is_separator);

    // "/" would become empty and match everything
    if project_root_trimmed.is_empty() {
        return project_root;
    }

    project_root_trimmed.to_owned()
}
