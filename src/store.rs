use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Serialize, Deserialize)]
struct EntryPointRecord {
    message_id: u64,
}

/// Durable record of the intake message so a restart re-binds it instead of
/// posting a duplicate.
pub struct EntryPointStore {
    file_path: PathBuf,
}

impl EntryPointStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn load(&self) -> AppResult<Option<u64>> {
        match fs::read_to_string(&self.file_path) {
            Ok(contents) => serde_json::from_str::<EntryPointRecord>(&contents)
                .map(|record| Some(record.message_id))
                .map_err(|err| {
                    AppError::Persistence(format!(
                        "invalid entry point record {}: {err}",
                        self.file_path.display()
                    ))
                }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self, message_id: u64) -> AppResult<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(&EntryPointRecord { message_id })
            .map_err(|err| AppError::Persistence(format!("failed to encode record: {err}")))?;
        fs::write(&self.file_path, data)?;
        Ok(())
    }
}
