//! Feed persistence.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tempfile::NamedTempFile;

/// Write `content` to `path` so readers see either the old feed or the new
/// one, never a partial file.
///
/// The temporary file is created next to `path` so the final rename stays on
/// one filesystem.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;

    // Feeds are served to subscribers; tempfile creates 0600.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
