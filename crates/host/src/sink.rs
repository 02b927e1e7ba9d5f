use folio_traits::{FileSink, SaveError, SavedFile, validate_filename};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Writes each document to `<dir>/<filename>`, creating `dir` if needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl FileSink for DirectorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<SavedFile, SaveError> {
        validate_filename(filename)?;
        let io_error = |source| SaveError::Io {
            filename: filename.to_string(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_error)?;
        let path = self.dir.join(filename);
        std::fs::write(&path, bytes).map_err(io_error)?;
        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());

        Ok(SavedFile {
            filename: filename.to_string(),
            location: Some(path),
            size: bytes.len(),
        })
    }

    fn name(&self) -> &'static str {
        "DirectorySink"
    }
}

/// Keeps saved documents in memory, in save order.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the saved files, in save order.
    pub fn filenames(&self) -> Vec<String> {
        self.files
            .lock()
            .map(|files| files.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    /// Bytes of the most recent file saved as `filename`.
    pub fn get(&self, filename: &str) -> Option<Vec<u8>> {
        let files = self.files.lock().ok()?;
        files
            .iter()
            .rev()
            .find(|(name, _)| name == filename)
            .map(|(_, bytes)| bytes.clone())
    }

    pub fn len(&self) -> usize {
        self.files.lock().map(|files| files.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FileSink for MemorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<SavedFile, SaveError> {
        validate_filename(filename)?;
        let mut files = self
            .files
            .lock()
            .map_err(|_| SaveError::Other("memory sink lock poisoned".to_string()))?;
        files.push((filename.to_string(), bytes.to_vec()));
        Ok(SavedFile {
            filename: filename.to_string(),
            location: None,
            size: bytes.len(),
        })
    }

    fn name(&self) -> &'static str {
        "MemorySink"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn directory_sink_writes_file() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("out"));
        let saved = sink.save("report.pdf", b"%PDF-1.7").unwrap();
        assert_eq!(saved.size, 8);
        let location = saved.location.unwrap();
        assert_eq!(std::fs::read(location).unwrap(), b"%PDF-1.7");
    }

    #[test]
    fn directory_sink_rejects_escaping_names() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());
        assert!(matches!(
            sink.save("../report.pdf", b""),
            Err(SaveError::InvalidName(_))
        ));
    }

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());
        sink.save("a.pdf", b"1").unwrap();
        sink.save("b.pdf", b"22").unwrap();
        assert_eq!(sink.filenames(), vec!["a.pdf", "b.pdf"]);
        assert_eq!(sink.get("b.pdf").unwrap(), b"22");
        assert!(sink.get("c.pdf").is_none());
    }
}
