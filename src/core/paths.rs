//! core::paths
//!
//! Path helpers shared by the option resolver.

use std::path::{Path, PathBuf};

/// Directory containing the source file, used as the last include path.
///
/// A bare file name resolves to `.`, so the working directory stays
/// searchable for `gassc site.scss`.
///
/// # Example
///
/// ```
/// use gassc::core::paths::source_dir;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(source_dir(Path::new("styles/site.scss")), PathBuf::from("styles"));
/// assert_eq!(source_dir(Path::new("site.scss")), PathBuf::from("."));
/// ```
pub fn source_dir(source: &Path) -> PathBuf {
    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        // Only a root or prefix has no parent.
        None => source.to_path_buf(),
    }
}
