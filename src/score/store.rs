use anyhow::{Context, Result};
use log::warn;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A single persisted integer slot holding the top score
pub trait ScoreStore {
    /// Read the stored score, 0 when nothing was stored yet
    fn load(&self) -> Result<u32>;

    /// Overwrite the stored score
    fn save(&mut self, score: u32) -> Result<()>;
}

/// Keeps the score in memory for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    value: u32,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self { value }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<u32> {
        Ok(self.value)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.value = score;
        Ok(())
    }
}

/// Stores scores in a JSON object keyed by name
///
/// Several presets can share one file, each under its own key:
///
/// ```json
/// { "highScore": 31, "topScore": 12 }
/// ```
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
    key: String,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, u32>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read scores from {:?}", self.path))?;
        if json.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse scores in {:?}", self.path))
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<u32> {
        Ok(self.read_all()?.get(&self.key).copied().unwrap_or(0))
    }

    fn save(&mut self, score: u32) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        // A damaged file must not block saving; other keys in it are lost
        let mut scores = self.read_all().unwrap_or_else(|e| {
            warn!("Discarding unreadable scores file: {:#}", e);
            BTreeMap::new()
        });
        scores.insert(self.key.clone(), score);

        let json = serde_json::to_string_pretty(&scores).context("Failed to serialize scores")?;

        // Write next to the target and rename over it, so the file is
        // never left half-written
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write scores to {:?}", tmp_path))?;
        std::fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace scores file {:?}", self.path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(store.load().unwrap(), 0);

        store.save(12).unwrap();
        assert_eq!(store.load().unwrap(), 12);
        assert_eq!(MemoryScoreStore::with_value(4).load().unwrap(), 4);
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let dir = TempDir::new().unwrap();
        let store = FileScoreStore::new(dir.path().join("scores.json"), "highScore");
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_file_store_roundtrip_creates_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scores.json");

        let mut store = FileScoreStore::new(&path, "highScore");
        store.save(27).unwrap();

        assert!(path.exists());
        let reopened = FileScoreStore::new(&path, "highScore");
        assert_eq!(reopened.load().unwrap(), 27);
    }

    #[test]
    fn test_keys_share_a_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");

        let mut classic = FileScoreStore::new(&path, "highScore");
        let mut compact = FileScoreStore::new(&path, "topScore");
        classic.save(30).unwrap();
        compact.save(8).unwrap();

        assert_eq!(classic.load().unwrap(), 30);
        assert_eq!(compact.load().unwrap(), 8);

        let raw: BTreeMap<String, u32> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.len(), 2);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileScoreStore::new(&path, "highScore");
        let err = store.load().unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse scores"));
    }

    #[test]
    fn test_save_recovers_from_truncated_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "{\"highScore\": 3").unwrap();

        let mut store = FileScoreStore::new(&path, "highScore");
        store.save(42).unwrap();

        assert_eq!(store.load().unwrap(), 42);
        assert!(!path.with_extension("json.tmp").exists());
    }
}
