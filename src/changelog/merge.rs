//! Insert a new section into a changelog document.

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::error::ChangelogError;

/// Marker placed in a changelog to say "new releases go right below me".
pub const ANCHOR: &str = "--->";

/// Content assumed for a changelog that does not exist yet.
pub const DEFAULT_HEADER: &str = "# Changelog\n";

/// Insert `section` into `document`.
///
/// In priority order: right after the first [`ANCHOR`]; right after a
/// leading `# ` heading line; or below a freshly synthesized
/// `# Changelog` heading, with the whole original document kept after it.
///
/// The insertion point only depends on the document, so repeated runs land
/// in the same place. Content is not deduplicated: merging the same section
/// twice yields it twice.
pub fn merge_changelog(section: &str, document: &str) -> String {
    if let Some(idx) = document.find(ANCHOR) {
        let (head, tail) = document.split_at(idx + ANCHOR.len());
        return format!("{head}\n\n{section}\n{tail}");
    }

    if let Some(end) = leading_heading_end(document) {
        let (heading, rest) = document.split_at(end);
        return format!("{heading}\n{section}\n{rest}");
    }

    format!("{}\n{section}\n\n{document}", DEFAULT_HEADER)
}

/// Byte offset just past the newline of a leading `# Title` line.
fn leading_heading_end(document: &str) -> Option<usize> {
    let title = document.strip_prefix("# ")?;
    let newline = title.find('\n')?;
    if title[..newline].trim_end_matches('\r').is_empty() {
        return None;
    }
    Some("# ".len() + newline + 1)
}

/// Merge `section` into the changelog at `path` and write it back.
///
/// A missing file counts as [`DEFAULT_HEADER`]. The new content goes to a
/// temporary file next to the target which then replaces it, so readers see
/// either the old or the new document. Returns the absolute path written.
pub fn update_changelog_file(path: &Path, section: &str) -> Result<PathBuf, ChangelogError> {
    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("{} does not exist, creating it", path.display());
            DEFAULT_HEADER.to_string()
        }
        Err(e) => return Err(ChangelogError::ReadFailed(e)),
    };

    let updated = merge_changelog(section, &existing);

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = replacement_file(path, dir).map_err(ChangelogError::WriteFailed)?;
    tmp.write_all(updated.as_bytes())
        .map_err(ChangelogError::WriteFailed)?;
    tmp.persist(path)
        .map_err(|e| ChangelogError::WriteFailed(e.error))?;

    Ok(std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()))
}

/// Temp file in `dir` that will replace `path`, carrying the permissions of
/// the current file, or ordinary new-file permissions when there is none.
fn replacement_file(path: &Path, dir: &Path) -> io::Result<NamedTempFile> {
    let current = fs::metadata(path).ok().map(|m| m.permissions());

    let mut builder = Builder::new();
    #[cfg(unix)]
    if current.is_none() {
        use std::os::unix::fs::PermissionsExt;
        // Subject to the umask, like any freshly created file.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let tmp = builder.tempfile_in(dir)?;
    if let Some(permissions) = current {
        tmp.as_file().set_permissions(permissions)?;
    }
    Ok(tmp)
}
