use crate::models::HabitData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode habits: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Habit list persisted as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty list. A file that exists but cannot be read
    /// or parsed is an error, so it never gets overwritten by an empty save.
    pub async fn load(&self) -> Result<HabitData, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) => {
                let data: HabitData = serde_json::from_slice(&bytes).map_err(|source| StorageError::Parse {
                    path: self.path.clone(),
                    source,
                })?;
                info!(path = %self.path.display(), habits = data.habits.len(), "loaded habits");
                Ok(data)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no habit file yet, starting empty");
                Ok(HabitData::default())
            }
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Writes to a sibling temp file and renames it over the target.
    pub async fn save(&self, data: &HabitData) -> Result<(), StorageError> {
        let payload = serde_json::to_vec_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload).await.map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), habits = data.habits.len(), "saved habits");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HabitDraft;

    fn unique_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("habit_tracker_{name}_{}_{nanos}.json", std::process::id()))
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let store = JsonFileStore::new(unique_path("missing"));
        assert_eq!(store.load().await.unwrap(), HabitData::default());
    }

    #[tokio::test]
    async fn save_then_load_keeps_habits() {
        let store = JsonFileStore::new(unique_path("roundtrip"));
        let mut data = HabitData::default();
        let id = data
            .create(HabitDraft {
                name: "Stretch".into(),
                description: "Morning".into(),
                color: "#FF9800".into(),
            })
            .id;
        data.get_mut(id)
            .unwrap()
            .tracked_days
            .insert("2025-02-28".parse().unwrap());

        store.save(&data).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, data);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"trackedDays\""));
        assert!(raw.contains("\"2025-02-28\": true"));
        std::fs::remove_file(store.path()).unwrap();
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let path = unique_path("corrupt");
        std::fs::write(&path, "{not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load().await, Err(StorageError::Parse { .. })));
        std::fs::remove_file(&path).unwrap();
    }
}
