use crate::common::error::{CompileError, Result};
use std::fs;
use std::path::Path;

pub struct SourceLoader;

impl SourceLoader {
    /// Read a whole source file into memory.
    pub fn load(path: &Path) -> Result<String> {
        let source = fs::read_to_string(path).map_err(|source| CompileError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = source.len(), "loaded source");
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "def main():\n    pass").unwrap();
        let source = SourceLoader::load(file.path()).unwrap();
        assert!(source.starts_with("def main():"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.py");
        match SourceLoader::load(&missing) {
            Err(CompileError::SourceRead { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected SourceRead, got {:?}", other),
        }
    }
}
