//! Archive path contains custom type for representing path inside a virtual
//! archive.

use std::{borrow::Borrow, fmt, ops::Deref};

/// [ArchivePath] represents location of an entry inside enclosing archive
/// namespace, eg. `/WEB-INF/classes` or `/` for archive root.
///
/// The value is kept exactly as provided by the caller. No separator
/// normalization is performed and leading `/` is not enforced, the runtime
/// reading the descriptor decides how to interpret it.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct ArchivePath {
    inner: String,
}
impl ArchivePath {
    /// Construct path from string representation. Refer to [self] for details.
    pub fn from_string(inner: String) -> Self {
        Self { inner }
    }

    /// Path of the archive root.
    pub fn root() -> Self {
        Self::from_string("/".to_owned())
    }
}

// to allow comparing and searching directly by str
impl Deref for ArchivePath {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl Borrow<str> for ArchivePath {
    fn borrow(&self) -> &str {
        self.inner.as_str()
    }
}
impl fmt::Display for ArchivePath {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.inner)
    }
}
