use std::path::{Path, PathBuf};

/// A user-selected file that has not been uploaded yet.
///
/// Exists only inside a creation or upload session and is discarded on
/// submit or cancel; the backend only ever sees it as a multipart payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    /// Byte size as reported by the filesystem.
    pub size: u64,
    pub path: PathBuf,
}

impl PendingFile {
    /// Stat a file on disk and capture its name and byte size.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .and_then(|v| v.to_str())
            .unwrap_or_default()
            .to_string();
        Ok(Self {
            name,
            size: metadata.len(),
            path: path.to_path_buf(),
        })
    }

    /// Lowercased extension taken after the final `.` of the name, if any.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.name.rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Size in mebibytes, for display.
    pub fn size_mb(&self) -> f64 {
        self.size as f64 / 1024.0 / 1024.0
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn named(name: &str) -> PendingFile {
        PendingFile {
            name: name.to_string(),
            size: 0,
            path: PathBuf::from(name),
        }
    }

    #[test]
    fn extension_is_lowercased_after_final_dot() {
        assert_eq!(named("report.PDF").extension().as_deref(), Some("pdf"));
        assert_eq!(named("notes.tar.md").extension().as_deref(), Some("md"));
        assert_eq!(named("README").extension(), None);
        assert_eq!(named("trailing.").extension(), None);
    }

    #[test]
    fn from_path_captures_name_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"twelve bytes").unwrap();

        let pending = PendingFile::from_path(&path).unwrap();
        assert_eq!(pending.name, "sample.txt");
        assert_eq!(pending.size, 12);
        assert_eq!(pending.extension().as_deref(), Some("txt"));
    }
}
