//! Document path validation.
//!
//! Catalog documents are addressed by paths relative to a source root (a
//! directory or a base URL). Validation keeps every path inside that root.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Validates and normalizes a relative document path.
///
/// `.` segments, duplicate separators, leading/trailing slashes are dropped and
/// `..` is resolved as long as it never climbs above the root. Null bytes and
/// platform prefixes are rejected, as are paths that normalize to nothing.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use folio_storage::validate_path;
///
/// assert_eq!(validate_path("data//./books.json").unwrap(), Path::new("data/books.json"));
/// assert_eq!(validate_path("/data/series.json").unwrap(), Path::new("data/series.json"));
/// assert!(validate_path("../secrets.json").is_err());
/// assert!(validate_path("./").is_err());
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let original = path.as_ref();
    let invalid = || ErrorKind::InvalidPath(original.to_path_buf());
    let mut segments = Vec::new();
    for component in original.components() {
        match component {
            Component::Normal(segment) if segment.as_encoded_bytes().contains(&0) => exn::bail!(invalid()),
            Component::Normal(segment) => segments.push(segment),
            Component::CurDir | Component::RootDir => {},
            Component::ParentDir => {
                if segments.pop().is_none() {
                    exn::bail!(invalid());
                }
            },
            Component::Prefix(_) => exn::bail!(invalid()),
        }
    }
    if segments.is_empty() {
        exn::bail!(invalid());
    }
    Ok(segments.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("data/books.json", "data/books.json")]
    #[case("data//books.json", "data/books.json")]
    #[case("./data/./books.json", "data/books.json")]
    #[case("data/tmp/../books.json", "data/books.json")]
    #[case("/data/books.json", "data/books.json")]
    #[case("data/", "data")]
    fn test_valid_paths(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(validate(input).unwrap(), Path::new(expected));
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("//")]
    #[case("..")]
    #[case("../books.json")]
    #[case("data/../../books.json")]
    #[case("data\0.json")]
    fn test_invalid_paths(#[case] input: &str) {
        let err = validate(input).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidPath(_)));
    }
}
