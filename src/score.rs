//! Durable storage for the best score.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;

const SCORE_FILE: &str = "scores.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreRecord {
    #[serde(rename = "best-score", default)]
    best_score: u32,
}

/// The best score, kept under the `best-score` key of a small TOML file.
#[derive(Debug, Clone)]
pub struct ScoreFile {
    path: PathBuf,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ScoreFile { path: path.into() }
    }

    /// The score file inside the given data directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SCORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored best score. A missing file counts as zero.
    pub fn load(&self) -> Result<u32> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(toml::from_str::<ScoreRecord>(&contents)?.best_score),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the best score atomically (write tmp + rename).
    pub fn save(&self, best: u32) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let toml_str = toml::to_string(&ScoreRecord { best_score: best })?;
        let tmp_path = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp_path, toml_str)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_zero() {
        let dir = TempDir::new().unwrap();
        assert_eq!(ScoreFile::in_dir(dir.path()).load().unwrap(), 0);
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = ScoreFile::in_dir(&dir.path().join("nested"));
        store.save(17).unwrap();
        assert_eq!(store.load().unwrap(), 17);
        store.save(23).unwrap();
        assert_eq!(store.load().unwrap(), 23);
    }

    #[test]
    fn uses_the_best_score_key() {
        let dir = TempDir::new().unwrap();
        let store = ScoreFile::in_dir(dir.path());
        store.save(5).unwrap();
        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert!(contents.contains("best-score = 5"));
    }

    #[test]
    fn garbage_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = ScoreFile::in_dir(dir.path());
        std::fs::write(store.path(), "best-score = \"lots\"").unwrap();
        assert!(store.load().is_err());
    }
}
