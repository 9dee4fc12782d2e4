// ============================================================
// Layer 6 — Plain-Text Export
// ============================================================
// "Download" for the extracted text and the summary: the
// string is written byte-for-byte as UTF-8, with no header,
// trailing newline or other framing.

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Write `contents` to `path` exactly, creating parent directories.
pub fn export_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
    }

    fs::write(path, contents.as_bytes())
        .with_context(|| format!("Cannot write '{}'", path.display()))?;

    tracing::info!("Wrote {} bytes to '{}'", contents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_exact_bytes() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("summary.txt");
        let text = "Résumé: line one.\nline two";

        export_text(&path, text).unwrap();
        assert_eq!(fs::read(&path).unwrap(), text.as_bytes());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("text.txt");
        export_text(&path, "first, longer contents").unwrap();
        export_text(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }
}
